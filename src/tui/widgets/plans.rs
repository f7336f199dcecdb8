use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Tabs},
    Frame,
};

use crate::models::{PlanEntry, PlanKind};
use crate::planner::board::Progress;
use crate::planner::Tab;
use crate::tui::theme;
use crate::utils::format::{pad, progress_bar};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    tab: Tab,
    entries: &[&PlanEntry],
    focused_idx: usize,
    progress: Progress,
) {
    let block = Block::default()
        .title(Span::styled(" My Study Schedule ", theme::pink()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border(true))
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let titles: Vec<Line> = Tab::DASHBOARD
        .iter()
        .map(|t| Line::from(format!(" {} ", t.label())))
        .collect();
    let selected = Tab::DASHBOARD.iter().position(|t| *t == tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme::dim())
        .highlight_style(theme::pink().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
        .divider(Span::styled("│", theme::dim()));
    frame.render_widget(tabs, chunks[0]);

    if entries.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("  No plans for {}", tab.label().to_lowercase()),
                theme::bold(),
            )),
            Line::from(Span::styled(
                "  Enjoy your day or add a new plan with [a]",
                theme::dim(),
            )),
        ]);
        frame.render_widget(empty, chunks[1]);
    } else {
        let width = chunks[1].width as usize;
        let subject_width = width.saturating_sub(30).max(8);
        let items: Vec<ListItem> = entries
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let is_focused = i == focused_idx;
                let (check, check_style) = if p.completed {
                    ("●", theme::green())
                } else {
                    ("○", theme::dim())
                };
                let kind_style = match p.kind {
                    PlanKind::Ai => theme::blue(),
                    PlanKind::Manual => theme::pink(),
                };
                let subject_style = if is_focused {
                    theme::pink().add_modifier(Modifier::BOLD)
                } else if p.completed {
                    theme::dim().add_modifier(Modifier::CROSSED_OUT)
                } else {
                    theme::bold()
                };

                let mut spans = vec![
                    Span::styled(if is_focused { " ▸ " } else { "   " }, theme::pink()),
                    Span::styled(check, check_style),
                    Span::styled(format!(" {} ", p.kind.icon()), kind_style),
                    Span::styled(
                        format!("{:<6}", p.time.as_deref().unwrap_or("--:--")),
                        theme::dim(),
                    ),
                    Span::styled(pad(&p.subject, subject_width), subject_style),
                    Span::styled(format!(" {}", p.duration), theme::dim()),
                ];
                if p.is_overdue && !p.completed {
                    spans.push(Span::styled(" (Overdue)", theme::red().add_modifier(Modifier::BOLD)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();
        frame.render_widget(List::new(items), chunks[1]);
    }

    let mut footer = vec![
        Span::styled("  ", theme::dim()),
        Span::styled(
            progress_bar(progress.done as u32, progress.total as u32, 12),
            theme::green(),
        ),
        Span::styled(format!("  {}/{} done", progress.done, progress.total), theme::dim()),
    ];
    if progress.overdue > 0 {
        footer.push(Span::styled(format!("  ·  {} overdue", progress.overdue), theme::red()));
    }
    frame.render_widget(Paragraph::new(Line::from(footer)), chunks[2]);
}
