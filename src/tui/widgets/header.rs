use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::config::settings::StudentConfig;
use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect, student: &StudentConfig, date_str: &str) {
    let title_line = Line::from(vec![
        Span::styled("  vidyamitra  ", theme::pink().add_modifier(Modifier::BOLD)),
        Span::styled(format!("Welcome, {}", student.name), theme::bold()),
    ]);

    let mut details = Vec::new();
    if !student.department.is_empty() {
        details.push(student.department.clone());
    }
    if student.semester > 0 {
        details.push(format!("Semester {}", student.semester));
    }
    if !student.usn.is_empty() {
        details.push(student.usn.clone());
    }

    let mut date_spans = Vec::new();
    if !details.is_empty() {
        date_spans.push(Span::styled(details.join(" | "), theme::blue()));
        date_spans.push(Span::styled("  ·  ", theme::dim()));
    }
    date_spans.push(Span::styled(date_str, theme::dim()));

    let text = vec![title_line, Line::from(""), Line::from(date_spans)];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::pink().add_modifier(Modifier::BOLD))
        .style(theme::base());

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
