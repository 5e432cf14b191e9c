use ratatui::style::{Color, Modifier, Style};

const LEVELS: [&str; 8] = ["▁", "▂", "▃", "▄", "▅", "▆", "▇", "█"];

/// Returns an intensity bar of the given width based on lines/max.
pub fn intensity_bar(lines: usize, max: usize, width: usize) -> String {
    if max == 0 || width == 0 {
        return "░".repeat(width);
    }

    let ratio = lines as f64 / max as f64;
    let filled = ((ratio * width as f64).round() as usize).min(width);
    let intensity_idx =
        ((ratio * (LEVELS.len() - 1) as f64).round() as usize).min(LEVELS.len() - 1);

    let bar_char = LEVELS[intensity_idx];
    bar_char.repeat(filled) + &"░".repeat(width - filled)
}

/// Chooses a style/color based on relative share of line changes.
pub fn get_intensity_color(lines: usize, max: usize) -> Style {
    if max == 0 {
        return Style::default().fg(Color::White);
    }

    let ratio = lines as f64 / max as f64;
    if ratio > 0.8 {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if ratio > 0.6 {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if ratio > 0.4 {
        Style::default().fg(Color::Green)
    } else if ratio > 0.2 {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Blue)
    }
}
