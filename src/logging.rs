//=====================================================================
// Logging, grounded in the original engine's `Log` class
// (`Common/Log/Log.hpp`): six message levels plus an 18-entry ANSI
// color ring, with color disabled automatically when the output isn't
// a terminal. Unlike the original, this is an explicit value threaded
// through setup and simulation rather than a process-wide singleton -
// a `Logger` is `Clone` and cheap to hand to every worker thread.
//=====================================================================
use std::fs::File;
use std::io::{IsTerminal, Write};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Reset,
    ResetN,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BoldBlack,
    BoldRed,
    BoldGreen,
    BoldYellow,
    BoldBlue,
    BoldMagenta,
    BoldCyan,
    BoldWhite,
}

impl Color {
    // The 18-entry ring, matching the original's exact enumeration and
    // escape sequences.
    const RING: [Color; 18] = [
        Color::Reset,
        Color::ResetN,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
        Color::BoldBlack,
        Color::BoldRed,
        Color::BoldGreen,
        Color::BoldYellow,
        Color::BoldBlue,
        Color::BoldMagenta,
        Color::BoldCyan,
        Color::BoldWhite,
    ];

    fn code(self) -> &'static str {
        match self {
            Color::Reset => "\x1b[0m",
            Color::ResetN => "\x1b[0m\n",
            Color::Black => "\x1b[30m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
            Color::White => "\x1b[37m",
            Color::BoldBlack => "\x1b[1m\x1b[30m",
            Color::BoldRed => "\x1b[1m\x1b[31m",
            Color::BoldGreen => "\x1b[1m\x1b[32m",
            Color::BoldYellow => "\x1b[1m\x1b[33m",
            Color::BoldBlue => "\x1b[1m\x1b[34m",
            Color::BoldMagenta => "\x1b[1m\x1b[35m",
            Color::BoldCyan => "\x1b[1m\x1b[36m",
            Color::BoldWhite => "\x1b[1m\x1b[37m",
        }
    }
}

#[derive(Clone)]
pub struct Logger {
    stdout_is_tty: bool,
    stderr_is_tty: bool,
    file: Option<Arc<Mutex<File>>>,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self { stdout_is_tty: std::io::stdout().is_terminal(), stderr_is_tty: std::io::stderr().is_terminal(), file: None }
    }

    // Everything written through `msg`/`warn`/etc. is duplicated to
    // `path`, uncolored, in addition to the console.
    pub fn with_output_file(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let mut logger = Self::new();
        let file = File::create(path)?;
        logger.file = Some(Arc::new(Mutex::new(file)));
        Ok(logger)
    }

    fn color(&self, on_stdout: bool, color: Color) -> &'static str {
        let is_tty = if on_stdout { self.stdout_is_tty } else { self.stderr_is_tty };
        if is_tty {
            color.code()
        } else {
            ""
        }
    }

    fn to_file(&self, text: &str) {
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{text}");
            }
        }
    }

    pub fn msg(&self, text: &str) {
        println!("{text}");
        self.to_file(text);
    }

    pub fn bmsg(&self, text: &str) {
        println!("{}{text}{}", self.color(true, Color::BoldWhite), self.color(true, Color::Reset));
        self.to_file(text);
    }

    pub fn warn(&self, text: &str) {
        eprintln!(
            "{}[W] {}{}{text}{}",
            self.color(false, Color::BoldYellow),
            self.color(false, Color::Reset),
            self.color(false, Color::Yellow),
            self.color(false, Color::Reset)
        );
        self.to_file(&format!("[W] {text}"));
    }

    pub fn error(&self, text: &str) {
        eprintln!(
            "{}[E] {}{}{text}{}",
            self.color(false, Color::BoldRed),
            self.color(false, Color::Reset),
            self.color(false, Color::Red),
            self.color(false, Color::Reset)
        );
        self.to_file(&format!("[E] {text}"));
    }

    pub fn ok(&self, text: &str) {
        println!("{}{text}{}", self.color(true, Color::Cyan), self.color(true, Color::Reset));
        self.to_file(text);
    }

    pub fn bok(&self, text: &str) {
        println!("{}{text}{}", self.color(true, Color::BoldCyan), self.color(true, Color::Reset));
        self.to_file(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_ring_has_eighteen_entries() {
        assert_eq!(Color::RING.len(), 18);
    }

    #[test]
    fn test_non_tty_color_collapses_to_empty() {
        let logger = Logger { stdout_is_tty: false, stderr_is_tty: false, file: None };
        assert_eq!(logger.color(true, Color::BoldCyan), "");
        assert_eq!(logger.color(false, Color::Red), "");
    }

    #[test]
    fn test_tty_color_returns_escape_code() {
        let logger = Logger { stdout_is_tty: true, stderr_is_tty: true, file: None };
        assert_eq!(logger.color(true, Color::Reset), "\x1b[0m");
    }

    #[test]
    fn test_with_output_file_duplicates_messages() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("kcode-mc-log-test-{}.txt", std::process::id()));
        let logger = Logger::with_output_file(&path).unwrap();
        logger.msg("hello");
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("hello"));
        let _ = std::fs::remove_file(&path);
    }
}
