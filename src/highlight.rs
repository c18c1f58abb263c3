use inksac::prelude::*;

use crate::input::tokenizer::PIPE;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    pub fn without_color() -> Self {
        Self {
            color_support: ColorSupport::NoColor,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colors a command line without changing its spacing. Words in command
    /// position are cyan (bold when `is_builtin` says so), `|` is magenta and
    /// flags are yellow.
    pub fn highlight_line(&self, line: &str, is_builtin: impl Fn(&str) -> bool) -> String {
        if !self.enabled() {
            return line.to_string();
        }

        let mut command_position = true;
        line.split(' ')
            .map(|word| {
                if word.is_empty() {
                    return String::new();
                }
                if word == PIPE {
                    command_position = true;
                    let pipe_style = Style::builder().foreground(Color::Magenta).build();
                    return word.style(pipe_style).to_string();
                }
                if std::mem::take(&mut command_position) {
                    let style = if is_builtin(word) {
                        Style::builder().foreground(Color::Cyan).bold().build()
                    } else {
                        Style::builder().foreground(Color::Cyan).build()
                    };
                    return word.style(style).to_string();
                }
                if word.starts_with('-') {
                    let flag_style = Style::builder().foreground(Color::Yellow).build();
                    return word.style(flag_style).to_string();
                }
                word.to_string()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder()
            .foreground(Color::Red)
            .bold()
            .build();

        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        hint.style(hint_style).to_string()
    }
}
