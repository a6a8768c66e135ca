use std::cell::Cell;

use chrono::{DateTime, Local, NaiveTime};

use crate::app::SessionConfig;

/// How the countdown target was specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerMode {
    /// A fixed number of seconds from the moment timing starts.
    Duration,
    /// A target wall-clock time-of-day on the current date.
    EndOfDay,
}

/// Wall-clock source. Injectable so the countdown logic is testable
/// without waiting on real time.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Fixed clock for tests; advances only when told to.
#[derive(Debug, Clone)]
pub struct FixedClock(Cell<DateTime<Local>>);

impl FixedClock {
    pub fn at(now: DateTime<Local>) -> Self {
        Self(Cell::new(now))
    }

    pub fn advance_secs(&self, secs: i64) {
        self.0.set(self.0.get() + chrono::Duration::seconds(secs));
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0.get()
    }
}

/// Base-10 parse of the longest signed digit prefix; anything unparseable
/// contributes 0. Mirrors how the operator-facing fields degrade instead of
/// erroring.
pub fn parse_field(input: &str) -> i64 {
    let trimmed = input.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<i64>().map(|n| sign * n).unwrap_or(0)
}

/// Total seconds from the minutes/seconds fields. Deliberately not clamped:
/// a negative entry passes through arithmetically and the session holder
/// coerces the final value.
pub fn total_seconds(minutes: &str, seconds: &str) -> i64 {
    parse_field(minutes) * 60 + parse_field(seconds)
}

/// Parse an `"HH:MM"` time-of-day. Out-of-range components are rejected.
pub fn parse_end_time(input: &str) -> Option<NaiveTime> {
    let (hours, minutes) = input.split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

/// Whole seconds until today's `target` time-of-day, clamped to 0. A target
/// already in the past stays 0 (no next-day rollover), and a malformed
/// target string yields 0 rather than a nonsensical countdown.
pub fn remaining_until(target: &str, now: DateTime<Local>) -> u64 {
    let Some(time) = parse_end_time(target) else {
        return 0;
    };
    match now.date_naive().and_time(time).and_local_timezone(Local) {
        chrono::LocalResult::Single(target) | chrono::LocalResult::Ambiguous(target, _) => {
            (target - now).num_seconds().max(0) as u64
        }
        chrono::LocalResult::None => 0,
    }
}

/// Urgency classification of the remaining time. Pure function of the
/// second count, recomputed every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Normal,
    Warning,
    Critical,
    Expired,
}

impl Band {
    pub fn of(remaining_seconds: u64) -> Self {
        match remaining_seconds {
            0 => Band::Expired,
            1..=60 => Band::Critical,
            61..=300 => Band::Warning,
            _ => Band::Normal,
        }
    }
}

/// The running countdown owned by the display screen.
///
/// Duration mode decrements the running value each tick, so delayed ticks
/// stretch the countdown. EndOfDay mode recomputes from the wall clock each
/// tick and self-corrects. Both keep ticking at 0.
#[derive(Debug, Clone)]
pub struct Countdown {
    mode: TimerMode,
    target_time: String,
    remaining: u64,
}

impl Countdown {
    pub fn start(config: &SessionConfig, now: DateTime<Local>) -> Self {
        let remaining = match config.mode {
            TimerMode::Duration => config.duration_seconds,
            TimerMode::EndOfDay => remaining_until(&config.target_time, now),
        };
        Self {
            mode: config.mode,
            target_time: config.target_time.clone(),
            remaining,
        }
    }

    pub fn on_tick(&mut self, now: DateTime<Local>) {
        self.remaining = match self.mode {
            TimerMode::Duration => self.remaining.saturating_sub(1),
            TimerMode::EndOfDay => remaining_until(&self.target_time, now),
        };
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn band(&self) -> Band {
        Band::of(self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SessionConfig;
    use chrono::TimeZone;

    fn local(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 1, h, m, s).unwrap()
    }

    fn duration_config(seconds: u64) -> SessionConfig {
        SessionConfig {
            mode: TimerMode::Duration,
            duration_seconds: seconds,
            ..SessionConfig::default()
        }
    }

    fn end_of_day_config(target: &str) -> SessionConfig {
        SessionConfig {
            mode: TimerMode::EndOfDay,
            target_time: target.to_string(),
            ..SessionConfig::default()
        }
    }

    #[test]
    fn parse_field_plain_numbers() {
        assert_eq!(parse_field("50"), 50);
        assert_eq!(parse_field("  7"), 7);
        assert_eq!(parse_field("0"), 0);
    }

    #[test]
    fn parse_field_signs() {
        assert_eq!(parse_field("-5"), -5);
        assert_eq!(parse_field("+3"), 3);
    }

    #[test]
    fn parse_field_degrades_to_zero() {
        assert_eq!(parse_field(""), 0);
        assert_eq!(parse_field("abc"), 0);
        assert_eq!(parse_field("-"), 0);
    }

    #[test]
    fn parse_field_takes_digit_prefix() {
        assert_eq!(parse_field("12abc"), 12);
        assert_eq!(parse_field("3.9"), 3);
    }

    #[test]
    fn total_seconds_combines_fields() {
        assert_eq!(total_seconds("5", "0"), 300);
        assert_eq!(total_seconds("2", "90"), 210);
        assert_eq!(total_seconds("0", "45"), 45);
    }

    #[test]
    fn total_seconds_malformed_field_contributes_zero() {
        assert_eq!(total_seconds("abc", "30"), 30);
        assert_eq!(total_seconds("5", "xyz"), 300);
    }

    #[test]
    fn total_seconds_negative_passes_through() {
        assert_eq!(total_seconds("-1", "30"), -30);
    }

    #[test]
    fn parse_end_time_accepts_valid_times() {
        assert_eq!(parse_end_time("12:00"), NaiveTime::from_hms_opt(12, 0, 0));
        assert_eq!(parse_end_time("9:05"), NaiveTime::from_hms_opt(9, 5, 0));
        assert_eq!(parse_end_time("23:59"), NaiveTime::from_hms_opt(23, 59, 0));
    }

    #[test]
    fn parse_end_time_rejects_malformed_input() {
        assert_eq!(parse_end_time("24:00"), None);
        assert_eq!(parse_end_time("12:60"), None);
        assert_eq!(parse_end_time("12"), None);
        assert_eq!(parse_end_time("ab:cd"), None);
        assert_eq!(parse_end_time(""), None);
    }

    #[test]
    fn remaining_until_counts_down_to_target() {
        assert_eq!(remaining_until("12:00", local(11, 59, 30)), 30);
        assert_eq!(remaining_until("12:00", local(11, 0, 0)), 3600);
    }

    #[test]
    fn remaining_until_clamps_past_target_to_zero() {
        assert_eq!(remaining_until("12:00", local(12, 0, 0)), 0);
        // No rollover to tomorrow once the target has passed.
        assert_eq!(remaining_until("12:00", local(12, 0, 1)), 0);
        assert_eq!(remaining_until("12:00", local(18, 30, 0)), 0);
    }

    #[test]
    fn remaining_until_malformed_target_is_zero() {
        assert_eq!(remaining_until("bogus", local(11, 0, 0)), 0);
        assert_eq!(remaining_until("25:99", local(11, 0, 0)), 0);
    }

    #[test]
    fn duration_countdown_starts_from_config_verbatim() {
        let countdown = Countdown::start(&duration_config(300), local(10, 0, 0));
        assert_eq!(countdown.remaining_seconds(), 300);
        assert!(!countdown.is_expired());
    }

    #[test]
    fn duration_tick_decrements_running_value() {
        let mut countdown = Countdown::start(&duration_config(3), local(10, 0, 0));
        countdown.on_tick(local(10, 0, 1));
        assert_eq!(countdown.remaining_seconds(), 2);
        countdown.on_tick(local(10, 0, 2));
        assert_eq!(countdown.remaining_seconds(), 1);
    }

    #[test]
    fn duration_tick_is_idempotent_at_zero() {
        let mut countdown = Countdown::start(&duration_config(1), local(10, 0, 0));
        countdown.on_tick(local(10, 0, 1));
        assert_eq!(countdown.remaining_seconds(), 0);
        assert!(countdown.is_expired());
        countdown.on_tick(local(10, 0, 2));
        countdown.on_tick(local(10, 0, 3));
        assert_eq!(countdown.remaining_seconds(), 0);
    }

    #[test]
    fn end_of_day_countdown_recomputes_each_tick() {
        let mut countdown = Countdown::start(&end_of_day_config("12:00"), local(11, 59, 30));
        assert_eq!(countdown.remaining_seconds(), 30);

        countdown.on_tick(local(11, 59, 40));
        assert_eq!(countdown.remaining_seconds(), 20);
    }

    #[test]
    fn end_of_day_countdown_is_monotonic_and_holds_at_zero() {
        let mut countdown = Countdown::start(&end_of_day_config("12:00"), local(11, 59, 58));
        let mut previous = countdown.remaining_seconds();

        for elapsed in 1..=10 {
            countdown.on_tick(local(11, 59, 58) + chrono::Duration::seconds(elapsed));
            assert!(countdown.remaining_seconds() <= previous);
            previous = countdown.remaining_seconds();
        }
        assert_eq!(countdown.remaining_seconds(), 0);
        assert!(countdown.is_expired());
    }

    #[test]
    fn end_of_day_countdown_with_malformed_target_expires_immediately() {
        let countdown = Countdown::start(&end_of_day_config("not a time"), local(9, 0, 0));
        assert_eq!(countdown.remaining_seconds(), 0);
        assert!(countdown.is_expired());
    }

    #[test]
    fn band_thresholds() {
        assert_eq!(Band::of(3000), Band::Normal);
        assert_eq!(Band::of(301), Band::Normal);
        assert_eq!(Band::of(300), Band::Warning);
        assert_eq!(Band::of(61), Band::Warning);
        assert_eq!(Band::of(60), Band::Critical);
        assert_eq!(Band::of(1), Band::Critical);
        assert_eq!(Band::of(0), Band::Expired);
    }

    #[test]
    fn fixed_clock_advances_only_when_told() {
        let clock = FixedClock::at(local(11, 0, 0));
        assert_eq!(clock.now(), local(11, 0, 0));
        clock.advance_secs(90);
        assert_eq!(clock.now(), local(11, 1, 30));
    }
}
