//! Renderers for colourizing output on a terminal

use owo_colors::OwoColorize;

use super::syntax::{Render, Syntax};

/// Embellish fragments with ANSI escapes to create highlighting in
/// terminal output.
pub struct Terminal;

impl Render for Terminal {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Neutral => content.to_string(),
            Syntax::Text => content // string - #4e9a06 (green) bold
                .color(owo_colors::Rgb(0x4e, 0x9a, 0x06))
                .bold()
                .to_string(),
            Syntax::Number => content // constant.numeric - #ad7fa8 (purple) bold
                .color(owo_colors::Rgb(0xad, 0x7f, 0xa8))
                .bold()
                .to_string(),
            Syntax::Bracket => content // punctuation - #999999 (grey)
                .color(owo_colors::Rgb(153, 153, 153))
                .bold()
                .to_string(),
            Syntax::Absent => content
                .color(owo_colors::Rgb(153, 153, 153))
                .italic()
                .to_string(),
            Syntax::Error => content
                .bright_red()
                .to_string(),
            Syntax::Problem => content
                .bold()
                .to_string(),
            Syntax::Location => content.to_string(),
            Syntax::Gutter => content
                .bright_blue()
                .to_string(),
            Syntax::Caret => content
                .bright_red()
                .to_string(),
        }
    }
}
