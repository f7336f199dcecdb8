use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::performance::{PerformanceReport, Strength};
use crate::tui::theme;
use crate::utils::format::{format_percent, pad, progress_bar};

fn strength_style(strength: Strength) -> Style {
    match strength {
        Strength::Strong => theme::green(),
        Strength::Average => theme::amber(),
        Strength::Weak => theme::red(),
    }
}

pub fn render(frame: &mut Frame, area: Rect, report: &PerformanceReport) {
    let block = Block::default()
        .title(Span::styled(" Performance ", theme::pink()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(false))
        .style(theme::surface());

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Overall ", theme::dim()),
            Span::styled(
                format_percent(report.overall_average),
                theme::pink().add_modifier(Modifier::BOLD),
            ),
            Span::styled("   Attendance ", theme::dim()),
            Span::styled(
                format_percent(report.overall_attendance),
                theme::green().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
    ];

    if report.subjects.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No marks yet: vidyamitra marks set <subject> --total N",
            theme::dim(),
        )));
    }

    let name_width = (area.width as usize).saturating_sub(24).clamp(6, 20);
    for s in &report.subjects {
        let style = strength_style(s.strength);
        lines.push(Line::from(vec![
            Span::styled(format!("  {} ", pad(&s.subject, name_width)), theme::bold()),
            Span::styled(progress_bar(s.score, 100, 10), style),
            Span::styled(format!(" {:>3}%", s.score), style),
        ]));
        if !s.components.is_empty() {
            lines.push(Line::from(Span::styled(
                format!("    {}", s.components.summary()),
                theme::dim(),
            )));
        }
    }

    let b = report.breakdown;
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  ", theme::dim()),
        Span::styled(format!("● {} strong", b.strong), theme::green()),
        Span::styled("  ", theme::dim()),
        Span::styled(format!("● {} average", b.average), theme::amber()),
        Span::styled("  ", theme::dim()),
        Span::styled(format!("● {} weak", b.weak), theme::red()),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
