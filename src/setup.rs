use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Modifier, Style};
use tui_textarea::TextArea;

use crate::app::{SessionConfig, TimerValue};
use crate::countdown::{total_seconds, TimerMode};

/// Form fields in focus order. Minutes/Seconds and EndTime are mutually
/// exclusive depending on the mode toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Mode,
    Minutes,
    Seconds,
    EndTime,
    Precautions,
    Reminders,
}

/// What a key press did to the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Handled,
    Submit,
}

/// Operator-facing state of the setup screen. Confirmed values reach the
/// session holder only through `confirm`; the notice editors are live-bound
/// and synced on every keystroke by the caller.
pub struct SetupForm {
    pub mode: TimerMode,
    pub minutes: String,
    pub seconds: String,
    pub end_time: String,
    pub precautions: TextArea<'static>,
    pub reminders: TextArea<'static>,
    pub focus: Field,
}

impl SetupForm {
    /// Pre-fill from the holder's config so a round trip through the
    /// display screen loses nothing.
    pub fn from_config(config: &SessionConfig) -> Self {
        let mut form = Self {
            mode: config.mode,
            minutes: (config.duration_seconds / 60).to_string(),
            seconds: (config.duration_seconds % 60).to_string(),
            end_time: config.target_time.clone(),
            precautions: notice_editor(&config.precautions),
            reminders: notice_editor(&config.reminders),
            focus: Field::Mode,
        };
        form.apply_focus_styles();
        form
    }

    /// Switch which input group is shown; the hidden group keeps its values.
    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            TimerMode::Duration => TimerMode::EndOfDay,
            TimerMode::EndOfDay => TimerMode::Duration,
        };
        // Focus must land on a field that exists under the new mode.
        if !self.focus_ring().contains(&self.focus) {
            self.focus = Field::Mode;
            self.apply_focus_styles();
        }
    }

    fn focus_ring(&self) -> &'static [Field] {
        match self.mode {
            TimerMode::Duration => &[
                Field::Mode,
                Field::Minutes,
                Field::Seconds,
                Field::Precautions,
                Field::Reminders,
            ],
            TimerMode::EndOfDay => &[
                Field::Mode,
                Field::EndTime,
                Field::Precautions,
                Field::Reminders,
            ],
        }
    }

    pub fn focus_next(&mut self) {
        let ring = self.focus_ring();
        let idx = ring.iter().position(|field| *field == self.focus).unwrap_or(0);
        self.focus = ring[(idx + 1) % ring.len()];
        self.apply_focus_styles();
    }

    pub fn focus_prev(&mut self) {
        let ring = self.focus_ring();
        let idx = ring.iter().position(|field| *field == self.focus).unwrap_or(0);
        self.focus = ring[(idx + ring.len() - 1) % ring.len()];
        self.apply_focus_styles();
    }

    pub fn on_key(&mut self, key: KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Tab => {
                self.focus_next();
                return FormEvent::Handled;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return FormEvent::Handled;
            }
            _ => {}
        }

        match self.focus {
            Field::Mode => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => self.toggle_mode(),
                KeyCode::Enter => return FormEvent::Submit,
                KeyCode::Down => self.focus_next(),
                KeyCode::Up => self.focus_prev(),
                _ => {}
            },
            Field::Minutes | Field::Seconds | Field::EndTime => match key.code {
                KeyCode::Enter => return FormEvent::Submit,
                KeyCode::Down => self.focus_next(),
                KeyCode::Up => self.focus_prev(),
                KeyCode::Backspace => {
                    self.active_line_mut().pop();
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.active_line_mut().push(c);
                }
                _ => {}
            },
            Field::Precautions => {
                self.precautions.input(key);
            }
            Field::Reminders => {
                self.reminders.input(key);
            }
        }
        FormEvent::Handled
    }

    /// Confirmed value handed to the session holder on start. Duration
    /// totals pass through arithmetically; clamping happens in the holder.
    pub fn confirm(&self) -> TimerValue {
        match self.mode {
            TimerMode::Duration => {
                TimerValue::Seconds(total_seconds(&self.minutes, &self.seconds))
            }
            TimerMode::EndOfDay => TimerValue::EndOfDay(self.end_time.clone()),
        }
    }

    pub fn precautions_text(&self) -> String {
        self.precautions.lines().join("\n")
    }

    pub fn reminders_text(&self) -> String {
        self.reminders.lines().join("\n")
    }

    fn active_line_mut(&mut self) -> &mut String {
        match self.focus {
            Field::Seconds => &mut self.seconds,
            Field::EndTime => &mut self.end_time,
            _ => &mut self.minutes,
        }
    }

    fn apply_focus_styles(&mut self) {
        let focus = self.focus;
        for (editor, field) in [
            (&mut self.precautions, Field::Precautions),
            (&mut self.reminders, Field::Reminders),
        ] {
            if focus == field {
                editor.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
            } else {
                editor.set_cursor_style(Style::default());
            }
        }
    }
}

fn notice_editor(text: &str) -> TextArea<'static> {
    let mut editor = TextArea::new(text.lines().map(str::to_owned).collect());
    editor.set_cursor_line_style(Style::default());
    editor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SessionConfig;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn form() -> SetupForm {
        SetupForm::from_config(&SessionConfig::default())
    }

    #[test]
    fn prefills_from_default_config() {
        let form = form();
        assert_eq!(form.mode, TimerMode::Duration);
        assert_eq!(form.minutes, "50");
        assert_eq!(form.seconds, "0");
        assert_eq!(form.end_time, "12:00");
        assert!(form.precautions_text().starts_with("注意事項"));
        assert!(form.reminders_text().starts_with("提醒事項"));
    }

    #[test]
    fn prefill_splits_duration_into_minutes_and_seconds() {
        let config = SessionConfig {
            duration_seconds: 90,
            ..SessionConfig::default()
        };
        let form = SetupForm::from_config(&config);
        assert_eq!(form.minutes, "1");
        assert_eq!(form.seconds, "30");
    }

    #[test]
    fn mode_round_trip_keeps_field_values() {
        let mut form = form();
        form.minutes = "7".to_string();
        form.seconds = "30".to_string();
        form.end_time = "15:45".to_string();

        form.toggle_mode();
        assert_eq!(form.mode, TimerMode::EndOfDay);
        form.toggle_mode();
        assert_eq!(form.mode, TimerMode::Duration);

        assert_eq!(form.minutes, "7");
        assert_eq!(form.seconds, "30");
        assert_eq!(form.end_time, "15:45");
    }

    #[test]
    fn focus_cycles_through_duration_fields() {
        let mut form = form();
        assert_eq!(form.focus, Field::Mode);
        form.focus_next();
        assert_eq!(form.focus, Field::Minutes);
        form.focus_next();
        assert_eq!(form.focus, Field::Seconds);
        form.focus_next();
        assert_eq!(form.focus, Field::Precautions);
        form.focus_next();
        assert_eq!(form.focus, Field::Reminders);
        form.focus_next();
        assert_eq!(form.focus, Field::Mode);
    }

    #[test]
    fn focus_skips_duration_fields_in_end_of_day_mode() {
        let mut form = form();
        form.toggle_mode();
        form.focus_next();
        assert_eq!(form.focus, Field::EndTime);
        form.focus_next();
        assert_eq!(form.focus, Field::Precautions);
    }

    #[test]
    fn toggling_mode_moves_focus_off_hidden_fields() {
        let mut form = form();
        form.focus_next(); // Minutes
        form.toggle_mode();
        assert_eq!(form.focus, Field::Mode);
    }

    #[test]
    fn typing_edits_the_focused_line_field() {
        let mut form = form();
        form.focus_next(); // Minutes
        form.on_key(key(KeyCode::Backspace));
        form.on_key(key(KeyCode::Backspace));
        form.on_key(key(KeyCode::Char('5')));
        assert_eq!(form.minutes, "5");
    }

    #[test]
    fn enter_on_a_line_field_submits() {
        let mut form = form();
        form.focus_next(); // Minutes
        assert_eq!(form.on_key(key(KeyCode::Enter)), FormEvent::Submit);
    }

    #[test]
    fn enter_on_the_mode_row_submits() {
        let mut form = form();
        assert_eq!(form.on_key(key(KeyCode::Enter)), FormEvent::Submit);
    }

    #[test]
    fn enter_inside_a_notice_editor_inserts_a_newline() {
        let mut form = form();
        while form.focus != Field::Precautions {
            form.focus_next();
        }
        let lines_before = form.precautions.lines().len();
        assert_eq!(form.on_key(key(KeyCode::Enter)), FormEvent::Handled);
        assert_eq!(form.precautions.lines().len(), lines_before + 1);
    }

    #[test]
    fn space_toggles_mode_on_the_mode_row() {
        let mut form = form();
        form.on_key(key(KeyCode::Char(' ')));
        assert_eq!(form.mode, TimerMode::EndOfDay);
        form.on_key(key(KeyCode::Left));
        assert_eq!(form.mode, TimerMode::Duration);
    }

    #[test]
    fn confirm_in_duration_mode_totals_the_fields() {
        let mut form = form();
        form.minutes = "5".to_string();
        form.seconds = "0".to_string();
        assert_eq!(form.confirm(), TimerValue::Seconds(300));
    }

    #[test]
    fn confirm_with_malformed_minutes_counts_seconds_only() {
        let mut form = form();
        form.minutes = "abc".to_string();
        form.seconds = "30".to_string();
        assert_eq!(form.confirm(), TimerValue::Seconds(30));
    }

    #[test]
    fn confirm_in_end_of_day_mode_passes_the_raw_string() {
        let mut form = form();
        form.toggle_mode();
        form.end_time = "whenever".to_string();
        assert_eq!(
            form.confirm(),
            TimerValue::EndOfDay("whenever".to_string())
        );
    }

    #[test]
    fn notice_text_preserves_embedded_newlines() {
        let config = SessionConfig {
            precautions: "a\nb\nc".to_string(),
            ..SessionConfig::default()
        };
        let form = SetupForm::from_config(&config);
        assert_eq!(form.precautions_text(), "a\nb\nc");
    }
}
