//! Command-line echo on stdout.
//!
//! Styling is decided once per process by [`ConsoleGuard`]; the guard resets
//! terminal colors when dropped so every exit path leaves the terminal clean.
use crossterm::execute;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use std::io::{self, IsTerminal, Write};

/// Terminal customization held for the lifetime of a run.
#[derive(Debug)]
pub struct ConsoleGuard {
    styled: bool,
}

impl ConsoleGuard {
    /// Style output only when stdout is a terminal and `NO_COLOR` is unset.
    pub fn acquire() -> Self {
        let styled = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self { styled }
    }

    pub fn console(&self) -> Console<io::Stdout> {
        Console::new(io::stdout(), self.styled)
    }
}

impl Drop for ConsoleGuard {
    fn drop(&mut self) {
        if self.styled {
            let mut out = io::stdout();
            let _ = execute!(out, ResetColor);
        }
    }
}

/// Writes one generated command line per eligible entry.
#[derive(Debug)]
pub struct Console<W: Write> {
    out: W,
    styled: bool,
}

impl<W: Write> Console<W> {
    pub fn new(out: W, styled: bool) -> Self {
        Self { out, styled }
    }

    /// Print `line` and flush, so it precedes any output of the child it names.
    pub fn echo_command(&mut self, line: &str) -> io::Result<()> {
        if self.styled {
            execute!(
                self.out,
                SetForegroundColor(Color::Cyan),
                Print(line),
                ResetColor,
                Print("\n")
            )
        } else {
            writeln!(self.out, "{line}")?;
            self.out.flush()
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}
