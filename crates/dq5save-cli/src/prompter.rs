//! Console prompts for confirming writes

use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

/// CLI prompter for save confirmation
pub struct CliPrompter {
    assume_yes: bool,
}

impl CliPrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    /// Ask a yes/no question. Anything but an explicit yes is a no.
    pub fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{} [y/N] ", message);
        io::stdout().flush().ok();

        let stdin = io::stdin();
        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() {
            eprintln!("Failed to read input");
            return false;
        }
        parse_answer(&line)
    }

    pub fn display_message(&self, message: &str) {
        println!("{}", message);
    }

    pub fn display_warning(&self, message: &str) {
        eprintln!("{}", message.yellow());
    }
}

fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
