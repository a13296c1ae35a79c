//! Coloured status text for reports printed to stdout.

use std::fmt::Display;

use owo_colors::{OwoColorize, colors::css};

/// How a piece of report text should read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Good,
    Caution,
    Muted,
}

/// Renders `text` in `tone`, or plain when stdout shows no colour.
fn paint(text: impl Display, tone: Tone, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match tone {
        Tone::Good => text.fg::<css::Green>().to_string(),
        Tone::Caution => text.fg::<css::Orange>().to_string(),
        Tone::Muted => text.dimmed().to_string(),
    }
}

fn stdout_has_color() -> bool {
    supports_color::on_cached(supports_color::Stream::Stdout).is_some()
}

/// Tones for anything printable.
pub trait Paint: Display {
    /// A good outcome, in green.
    fn good(&self) -> String {
        paint(self, Tone::Good, stdout_has_color())
    }

    /// Something needing attention, in amber.
    fn caution(&self) -> String {
        paint(self, Tone::Caution, stdout_has_color())
    }

    /// Secondary detail, dimmed.
    fn muted(&self) -> String {
        paint(self, Tone::Muted, stdout_has_color())
    }
}

impl<T: Display + ?Sized> Paint for T {}
