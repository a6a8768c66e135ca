use chrono::{DateTime, Local};

use crate::app::SessionConfig;
use crate::countdown::{Band, Countdown};
use crate::platform::WakeLock;

/// Live state of the display screen: the running countdown, the wall clock
/// shown next to it, the fullscreen flag, and the held wake lock.
///
/// Dropping the session is the teardown point: countdown mutation stops with
/// it and the wake lock is released.
pub struct DisplaySession {
    countdown: Countdown,
    wall_clock: DateTime<Local>,
    fullscreen: bool,
    wake_lock: Box<dyn WakeLock>,
}

impl DisplaySession {
    /// Initialize from the confirmed config and take the wake lock
    /// best-effort. The lock outcome never gates the countdown.
    pub fn mount(
        config: &SessionConfig,
        now: DateTime<Local>,
        mut wake_lock: Box<dyn WakeLock>,
    ) -> Self {
        let countdown = Countdown::start(config, now);
        wake_lock.acquire();
        Self {
            countdown,
            wall_clock: now,
            fullscreen: false,
            wake_lock,
        }
    }

    pub fn on_tick(&mut self, now: DateTime<Local>) {
        self.wall_clock = now;
        self.countdown.on_tick(now);
    }

    /// The terminal regained focus; hosts tend to drop inhibitors while a
    /// page is hidden, so re-acquire if needed.
    pub fn on_focus_gained(&mut self) {
        if !self.wake_lock.is_held() {
            self.wake_lock.acquire();
        }
    }

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
    }

    pub fn exit_fullscreen(&mut self) {
        self.fullscreen = false;
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.countdown.remaining_seconds()
    }

    pub fn is_expired(&self) -> bool {
        self.countdown.is_expired()
    }

    pub fn band(&self) -> Band {
        self.countdown.band()
    }

    pub fn wall_clock(&self) -> DateTime<Local> {
        self.wall_clock
    }

    pub fn wake_lock_held(&self) -> bool {
        self.wake_lock.is_held()
    }
}

impl Drop for DisplaySession {
    fn drop(&mut self) {
        self.wake_lock.release();
    }
}
