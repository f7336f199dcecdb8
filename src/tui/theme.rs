use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(20, 18, 24);
pub const SURFACE: Color = Color::Rgb(30, 27, 36);
pub const BORDER: Color = Color::Rgb(62, 56, 74);
pub const TEXT: Color = Color::Rgb(232, 228, 240);
pub const TEXT_DIM: Color = Color::Rgb(138, 130, 154);
pub const PINK: Color = Color::Rgb(236, 72, 153);
pub const BLUE: Color = Color::Rgb(59, 130, 246);
pub const GREEN: Color = Color::Rgb(16, 185, 129);
pub const AMBER: Color = Color::Rgb(245, 158, 11);
pub const RED: Color = Color::Rgb(239, 68, 68);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn pink() -> Style {
    Style::default().fg(PINK)
}

pub fn blue() -> Style {
    Style::default().fg(BLUE)
}

pub fn green() -> Style {
    Style::default().fg(GREEN)
}

pub fn amber() -> Style {
    Style::default().fg(AMBER)
}

pub fn red() -> Style {
    Style::default().fg(RED)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border(focused: bool) -> Style {
    if focused {
        pink()
    } else {
        Style::default().fg(BORDER)
    }
}
