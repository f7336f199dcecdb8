use chrono::NaiveDate;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// "Thursday, 14 March 2024"
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

/// Long form of an ISO date string, or the string itself if it doesn't parse.
pub fn format_iso_long(date: &str) -> String {
    NaiveDate::parse_from_str(date, crate::clock::DATE_FORMAT)
        .map(format_long_date)
        .unwrap_or_else(|_| date.to_string())
}

pub fn format_percent(value: Option<u32>) -> String {
    match value {
        Some(v) => format!("{}%", v),
        None => "--".to_string(),
    }
}

/// Create a simple ASCII progress bar
pub fn progress_bar(filled: u32, total: u32, width: usize) -> String {
    if total == 0 {
        return "░".repeat(width);
    }
    let ratio = (filled as f64 / total as f64).min(1.0);
    let filled_count = (ratio * width as f64).round() as usize;
    let empty_count = width.saturating_sub(filled_count);
    format!("{}{}", "█".repeat(filled_count), "░".repeat(empty_count))
}

/// Cut `s` to at most `max` terminal columns, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Left-align `s` in a column `width` cells wide, truncating if needed.
pub fn pad(s: &str, width: usize) -> String {
    let cut = truncate(s, width);
    let fill = width.saturating_sub(cut.width());
    format!("{}{}", cut, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_dates_read_naturally() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        assert_eq!(format_long_date(d), "Monday, 4 March 2024");
        assert_eq!(format_iso_long("2024-03-14"), "Thursday, 14 March 2024");
        assert_eq!(format_iso_long("soon"), "soon");
    }

    #[test]
    fn bars_fill_proportionally() {
        assert_eq!(progress_bar(1, 2, 4), "██░░");
        assert_eq!(progress_bar(5, 2, 4), "████");
        assert_eq!(progress_bar(0, 0, 3), "░░░");
    }

    #[test]
    fn truncation_counts_columns() {
        assert_eq!(truncate("Algorithms", 20), "Algorithms");
        assert_eq!(truncate("Algorithms", 5), "Algo…");
        assert_eq!(truncate("数据结构", 5), "数据…");
        assert_eq!(pad("OS", 4), "OS  ");
        assert_eq!(format_percent(None), "--");
        assert_eq!(format_percent(Some(71)), "71%");
    }
}
