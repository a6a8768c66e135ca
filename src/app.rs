use crate::countdown::TimerMode;

pub const DEFAULT_DURATION_SECS: u64 = 3000; // 50 minutes
pub const DEFAULT_TARGET_TIME: &str = "12:00";
pub const DEFAULT_PRECAUTIONS: &str = "注意事項：\n1. 拿出手機平板一律扣分.\n2. 作弊一律零分計算.";
pub const DEFAULT_REMINDERS: &str =
    "提醒事項：\n筆試考完請至骨科實作室等待&準備跑台考試.\n筆試考完繼續上課.";

/// Which of the two screens is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Setup,
    Display,
}

/// Value confirmed by the setup screen: raw seconds for duration mode, the
/// unvalidated `"HH:MM"` string for end-of-day mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerValue {
    Seconds(i64),
    EndOfDay(String),
}

/// The configuration in effect since "start" was last pressed. Both value
/// fields persist across mode switches so the operator's prior entries are
/// not lost when toggling mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub mode: TimerMode,
    pub duration_seconds: u64,
    pub target_time: String,
    pub precautions: String,
    pub reminders: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            mode: TimerMode::Duration,
            duration_seconds: DEFAULT_DURATION_SECS,
            target_time: DEFAULT_TARGET_TIME.to_string(),
            precautions: DEFAULT_PRECAUTIONS.to_string(),
            reminders: DEFAULT_REMINDERS.to_string(),
        }
    }
}

/// Single source of truth for the active screen and the confirmed timer
/// configuration. A pure state container; none of these operations can fail.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub screen: Screen,
    pub config: SessionConfig,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional screen transition; no validation, no side effects.
    pub fn select_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    /// Record the confirmed configuration and switch to the display screen.
    /// Negative seconds are coerced to 0; an end-of-day string is stored
    /// as-is. Only the active mode's value field is overwritten.
    pub fn apply_config(&mut self, value: TimerValue, precautions: String, reminders: String) {
        match value {
            TimerValue::Seconds(seconds) => {
                self.config.mode = TimerMode::Duration;
                self.config.duration_seconds = seconds.max(0) as u64;
            }
            TimerValue::EndOfDay(target) => {
                self.config.mode = TimerMode::EndOfDay;
                self.config.target_time = target;
            }
        }
        self.config.precautions = precautions;
        self.config.reminders = reminders;
        self.screen = Screen::Display;
    }

    /// Notice edits propagate on every keystroke, ahead of "start".
    pub fn set_notices(&mut self, precautions: String, reminders: String) {
        self.config.precautions = precautions;
        self.config.reminders = reminders;
    }

    /// Back to the setup screen. The config is kept so the operator's last
    /// values pre-fill the form.
    pub fn return_to_setup(&mut self) {
        self.screen = Screen::Setup;
    }
}
