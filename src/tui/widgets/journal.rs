use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::models::Summary;
use crate::tui::theme;

/// The Recall step: yesterday's summary, plus whether today's is written.
pub fn render(frame: &mut Frame, area: Rect, yesterday: Option<&Summary>, written_today: bool) {
    let block = Block::default()
        .title(Span::styled(" 3R · Recall ", theme::pink()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let mut lines = vec![Line::from("")];
    match yesterday {
        Some(summary) => {
            for l in summary.content.lines() {
                lines.push(Line::from(Span::styled(format!("  {}", l), theme::bold())));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "  No summary for yesterday",
            theme::dim(),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(if written_today {
        Line::from(Span::styled("  ✓ Today's review written", theme::green()))
    } else {
        Line::from(Span::styled("  Today's review pending, press [w]", theme::amber()))
    });

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
