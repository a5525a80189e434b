//! Colored transcript printing
//!
//! All interactive output goes through one small printer so the prefix and
//! palette stay consistent. Serialization of concurrent calls is the
//! gateway's job, not this type's.

use console::style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Plain,
    Cyan,
    Yellow,
    Green,
    Red,
    Blue,
}

#[derive(Clone, Debug)]
pub struct Console {
    prefix: String,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Self {
            prefix: "codescout> ".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn line(&self, tint: Tint, message: &str) {
        let text = format!("{}{}", self.prefix, message);
        match tint {
            Tint::Plain => println!("{}", text),
            Tint::Cyan => println!("{}", style(text).cyan()),
            Tint::Yellow => println!("{}", style(text).yellow()),
            Tint::Green => println!("{}", style(text).green()),
            Tint::Red => println!("{}", style(text).red()),
            Tint::Blue => println!("{}", style(text).blue()),
        }
    }

    /// Print without trailing newline (prompt position).
    pub fn inline(&self, tint: Tint, message: &str) {
        use std::io::Write;
        let text = format!("{}{}", self.prefix, message);
        match tint {
            Tint::Cyan => print!("{}", style(text).cyan()),
            Tint::Red => print!("{}", style(text).red()),
            _ => print!("{}", text),
        }
        let _ = std::io::stdout().flush();
    }

    /// Full-width separator between turns.
    pub fn separator(&self) {
        let width = console::Term::stdout().size().1 as usize;
        println!("{}", style("━".repeat(width.max(20))).blue().bright());
    }
}
