//! console/terminal.rs
//! Line-oriented operator I/O.
//!
//! Every question the workflow asks goes through [`Terminal::prompt`], which
//! blocks until a full line arrives. End of input is reported as
//! `UnexpectedEof` so the caller can shut down cleanly.

use std::io::{self, BufRead, Write};

pub(crate) trait Terminal {
    /// Show `message` (no newline) and return the next input line, trimmed.
    fn prompt(&mut self, message: &str) -> io::Result<String>;

    /// Print one line of output.
    fn say(&mut self, line: &str);
}

/// Real stdin/stdout.
pub(crate) struct StdTerminal;

impl Terminal for StdTerminal {
    fn prompt(&mut self, message: &str) -> io::Result<String> {
        let mut stdout = io::stdout();
        write!(stdout, "{message}")?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
        }
        Ok(line.trim().to_string())
    }

    fn say(&mut self, line: &str) {
        println!("{line}");
    }
}

pub(crate) fn is_end_of_input(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
}
