use chrono::{DateTime, Local};

/// `HH:MM:SS` once the countdown spans hours, `MM:SS` below that.
pub fn format_remaining(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// 24-hour wall clock, the convention used on the projected board.
pub fn format_wall_clock(now: DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}
