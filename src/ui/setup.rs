use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::countdown::TimerMode;
use crate::setup::{Field, SetupForm};

const ACCENT: Color = Color::Cyan;

pub fn render(form: &mut SetupForm, f: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(4)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Length(3), // mode toggle
            Constraint::Length(3), // duration or end-time inputs
            Constraint::Min(4),    // precautions
            Constraint::Min(4),    // reminders
            Constraint::Length(1), // key hints
        ])
        .split(f.area());

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            "物治系筆試倒計時",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  by HM Lee", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    render_mode_toggle(form, f, chunks[1]);

    match form.mode {
        TimerMode::Duration => render_duration_inputs(form, f, chunks[2]),
        TimerMode::EndOfDay => {
            let focused = form.focus == Field::EndTime;
            f.render_widget(line_field(&form.end_time, "結束時刻", focused), chunks[2]);
        }
    }

    form.precautions
        .set_block(field_block("注意事項", form.focus == Field::Precautions));
    f.render_widget(&form.precautions, chunks[3]);

    form.reminders
        .set_block(field_block("提醒事項", form.focus == Field::Reminders));
    f.render_widget(&form.reminders, chunks[4]);

    let hints = Paragraph::new("(tab) 切換欄位  (ctrl-s/enter) 開始計時  (esc) 離開")
        .style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
        .alignment(Alignment::Center);
    f.render_widget(hints, chunks[5]);
}

fn render_mode_toggle(form: &SetupForm, f: &mut Frame, area: Rect) {
    let selected = Style::default()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD);
    let unselected = Style::default().fg(Color::DarkGray);

    let (duration_style, end_style) = match form.mode {
        TimerMode::Duration => (selected, unselected),
        TimerMode::EndOfDay => (unselected, selected),
    };

    let toggle = Paragraph::new(Line::from(vec![
        Span::styled(" 設定時長 (倒數) ", duration_style),
        Span::raw("   "),
        Span::styled(" 設定結束時間 (至何時) ", end_style),
    ]))
    .alignment(Alignment::Center)
    .block(field_block("模式", form.focus == Field::Mode));
    f.render_widget(toggle, area);
}

fn render_duration_inputs(form: &SetupForm, f: &mut Frame, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    f.render_widget(
        line_field(&form.minutes, "分鐘", form.focus == Field::Minutes),
        columns[0],
    );
    f.render_widget(
        line_field(&form.seconds, "秒鐘", form.focus == Field::Seconds),
        columns[1],
    );
}

fn line_field(value: &str, title: &str, focused: bool) -> Paragraph<'static> {
    let mut spans = vec![Span::raw(value.to_owned())];
    if focused {
        spans.push(Span::styled(
            " ",
            Style::default().add_modifier(Modifier::REVERSED),
        ));
    }
    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(field_block(title, focused))
}

fn field_block(title: &str, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title.to_owned())
}
