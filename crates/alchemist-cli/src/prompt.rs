//! Interactive confirmations on stdin.

use anyhow::Context;
use std::io::{BufRead, Write};

/// Asks yes/no and pick-one questions, or answers them itself when the user
/// passed `--yes`.
#[derive(Debug, Clone, Copy)]
pub struct Prompter {
    assume_yes: bool,
}

impl Prompter {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }

    /// Ask a yes/no question. Empty input or end of input selects `default`.
    pub fn confirm(&self, question: &str, default: bool) -> anyhow::Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        let answer = ask(&format!("{question} {hint} "))?;
        Ok(parse_yes_no(answer.as_deref(), default))
    }

    /// Ask the user to pick one of `count` numbered options (1-based on
    /// screen). Returns the 0-based index, or `None` on `c` / end of input.
    pub fn choose(&self, question: &str, count: usize) -> anyhow::Result<Option<usize>> {
        if count == 0 {
            return Ok(None);
        }
        if self.assume_yes {
            return Ok(Some(0));
        }
        loop {
            let Some(answer) = ask(&format!("{question} [1-{count}, c to cancel] "))? else {
                return Ok(None);
            };
            match parse_choice(&answer, count) {
                Choice::Picked(i) => return Ok(Some(i)),
                Choice::Cancel => return Ok(None),
                Choice::Invalid => eprintln!("Please enter a number between 1 and {count}, or c."),
            }
        }
    }
}

/// Read one line from stdin; `None` at end of input.
fn ask(prompt: &str) -> anyhow::Result<Option<String>> {
    eprint!("{prompt}");
    std::io::stderr().flush().ok();
    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok((read > 0).then(|| line.trim().to_string()))
}

fn parse_yes_no(answer: Option<&str>, default: bool) -> bool {
    match answer.map(str::to_ascii_lowercase).as_deref() {
        Some("y" | "yes") => true,
        Some("n" | "no") => false,
        _ => default,
    }
}

#[derive(Debug, PartialEq)]
enum Choice {
    Picked(usize),
    Cancel,
    Invalid,
}

fn parse_choice(answer: &str, count: usize) -> Choice {
    if answer.eq_ignore_ascii_case("c") {
        return Choice::Cancel;
    }
    match answer.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Picked(n - 1),
        _ => Choice::Invalid,
    }
}
