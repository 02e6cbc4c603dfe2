//! Terminal rendering and prompts.

use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use permkit_coordinator::CoordinatorState;
use permkit_dialog::{AlertPresenter, Dialog, DialogError};
use permkit_permission::PermissionStatus;

/// Ask until the user types one of `options` (or its 1-based number).
pub fn ask(question: &str, options: &[&str]) -> io::Result<usize> {
    if options.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "nothing to choose from"));
    }
    let stdin = io::stdin();
    loop {
        print!("{} [{}] ", question.bold(), options.join("/"));
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        let answer = line.trim().to_ascii_lowercase();

        if let Ok(n) = answer.parse::<usize>() {
            if (1..=options.len()).contains(&n) {
                return Ok(n - 1);
            }
        }
        if let Some(index) = options.iter().position(|o| o.to_ascii_lowercase() == answer) {
            return Ok(index);
        }
        println!("{}", "Please pick one of the listed options.".yellow());
    }
}

/// Shows alerts as a numbered terminal menu.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalAlerts;

impl AlertPresenter for TerminalAlerts {
    async fn present(&self, dialog: &Dialog) -> Result<usize, DialogError> {
        if dialog.actions.is_empty() {
            return Err(DialogError::Cancelled);
        }
        println!();
        println!("{}", dialog.title.bold().red());
        println!("{}", dialog.message);
        for (i, action) in dialog.actions.iter().enumerate() {
            println!("  {}. {}", i + 1, action.label);
        }

        let numbers: Vec<String> = (1..=dialog.actions.len()).map(|n| n.to_string()).collect();
        let numbers: Vec<&str> = numbers.iter().map(String::as_str).collect();
        ask("Choose", &numbers).map_err(|e| DialogError::PlatformError(e.to_string()))
    }
}

fn switch(status: PermissionStatus) -> String {
    if status.is_granted() {
        format!("{}", "[ ON ]".green().bold())
    } else {
        format!("{} ({status})", "[OFF ]".dimmed())
    }
}

/// Print the settings screen for `state`.
pub fn render(state: &CoordinatorState) {
    println!();
    println!("  Notification  {}", switch(state.notification()));
    println!("  Camera        {}", switch(state.camera()));
    let needed = state.permissions_needed();
    if needed > 0 {
        println!("  {}", format!("{needed} permission(s) needed").yellow());
    } else {
        println!("  {}", "All permissions granted".green());
    }
}
