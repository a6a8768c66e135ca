use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tui_big_text::{BigText, PixelSize};

use crate::app::SessionConfig;
use crate::countdown::{Band, TimerMode};
use crate::display::DisplaySession;
use crate::timefmt::{format_remaining, format_wall_clock};

pub fn render(session: &DisplaySession, config: &SessionConfig, f: &mut Frame) {
    let area = f.area();

    if session.is_fullscreen() {
        render_timer(session, f, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(10),   // timer
            Constraint::Length(8), // notice panels
            Constraint::Length(1), // key hints
        ])
        .split(area);

    render_header(session, config, f, chunks[0]);
    render_timer(session, f, chunks[1]);
    render_notices(config, f, chunks[2]);

    let hints = Paragraph::new("(f) 全螢幕  (b) 返回編輯  (q) 離開")
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
        .alignment(Alignment::Center);
    f.render_widget(hints, chunks[3]);
}

fn render_header(session: &DisplaySession, config: &SessionConfig, f: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(24)])
        .split(area);

    let mode_badge = match config.mode {
        TimerMode::Duration => "模式: 倒數計時".to_string(),
        TimerMode::EndOfDay => format!("模式: 至 {}", config.target_time),
    };
    let wake_badge = if session.wake_lock_held() {
        Span::styled("● 螢幕長亮已開啟", Style::default().fg(Color::Green))
    } else {
        Span::styled("○ 螢幕長亮未啟用", Style::default().fg(Color::DarkGray))
    };

    let left = Paragraph::new(vec![
        Line::styled(
            "物治系筆試倒計時 by HM Lee",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(vec![
            Span::styled(mode_badge, Style::default().fg(Color::Gray)),
            Span::raw("   "),
            wake_badge,
        ]),
    ]);
    f.render_widget(left, columns[0]);

    let right = Paragraph::new(vec![
        Line::styled("現在時間", Style::default().fg(Color::DarkGray)),
        Line::styled(
            format_wall_clock(session.wall_clock()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ])
    .alignment(Alignment::Right);
    f.render_widget(right, columns[1]);
}

fn render_timer(session: &DisplaySession, f: &mut Frame, area: Rect) {
    if session.is_expired() {
        render_expired(f, area);
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(8), // big digits
            Constraint::Length(1), // caption
            Constraint::Min(0),
        ])
        .split(area);

    let digits = BigText::builder()
        .pixel_size(PixelSize::Full)
        .style(
            Style::default()
                .fg(band_color(session.band()))
                .add_modifier(Modifier::BOLD),
        )
        .lines(vec![Line::from(format_remaining(session.remaining_seconds()))])
        .alignment(Alignment::Center)
        .build();
    f.render_widget(digits, rows[1]);

    let caption = Paragraph::new("R E M A I N I N G")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(caption, rows[2]);
}

fn render_expired(f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(4), // big terminal banner
            Constraint::Length(2), // subtitle
            Constraint::Min(0),
        ])
        .split(area);

    let banner = BigText::builder()
        .pixel_size(PixelSize::Quadrant)
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .lines(vec![Line::from("TIME IS UP")])
        .alignment(Alignment::Center)
        .build();
    f.render_widget(banner, rows[1]);

    let subtitle = Paragraph::new("考試結束")
        .style(
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(subtitle, rows[2]);
}

fn render_notices(config: &SessionConfig, f: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let precautions = Paragraph::new(config.precautions.clone())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title("注意事項"),
        );
    f.render_widget(precautions, columns[0]);

    let reminders = Paragraph::new(config.reminders.clone())
        .style(Style::default().fg(Color::Yellow))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title("提醒事項"),
        );
    f.render_widget(reminders, columns[1]);
}

fn band_color(band: Band) -> Color {
    match band {
        Band::Normal => Color::White,
        Band::Warning => Color::Yellow,
        Band::Critical => Color::LightRed,
        Band::Expired => Color::Red,
    }
}
