use crossterm::style::{Color, Stylize};

/// Design tokens for texfast console output.
pub mod colors {
    use super::Color;

    pub const SUCCESS: Color = Color::Green;
    pub const ERROR: Color = Color::Red;
    pub const WARNING: Color = Color::Yellow;
    pub const INFO: Color = Color::Cyan;
    pub const DIM: Color = Color::DarkGrey;
}

/// Leader of timed action lines
pub const ACTION_PREFIX: &str = ":::::::";

/// Apply `color` when the terminal supports it.
pub fn paint(text: &str, color: Color, supports_color: bool) -> String {
    if supports_color {
        format!("{}", text.with(color))
    } else {
        text.to_string()
    }
}
