//! # Console Input
//!
//! Prompt helpers for the interactive menu.
//!
//! ## Conventions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Prompt Behavior                                  │
//! │                                                                         │
//! │  • Every helper returns Option: None means end-of-input (Ctrl-D),       │
//! │    which unwinds cleanly back through the menus to a normal exit        │
//! │  • Bad input (unparsable number, out-of-range choice) re-prompts        │
//! │    with a specific message instead of failing                           │
//! │  • Values are trimmed; blank answers are rejected where the field       │
//! │    is required                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{self, BufRead, Write};

use tracing::warn;

use shopkeep_core::{Category, Money};

/// Prints a prompt and reads one trimmed line. `None` on end-of-input.
pub fn prompt(label: &str) -> Option<String> {
    print!("{label}");
    io::stdout().flush().ok();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(err) => {
            warn!(error = %err, "Failed to read console input");
            None
        }
    }
}

/// Prompts until a non-blank answer arrives.
pub fn prompt_required(label: &str) -> Option<String> {
    loop {
        let answer = prompt(label)?;
        if !answer.is_empty() {
            return Some(answer);
        }
        println!("A value is required.");
    }
}

/// Prompts for a whole number, re-prompting on unparsable input.
pub fn prompt_i64(label: &str) -> Option<i64> {
    loop {
        let answer = prompt(label)?;
        match answer.parse() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a whole number."),
        }
    }
}

/// Prompts for a price as a plain decimal (`2.50`), re-prompting on
/// anything [`Money::parse`] rejects.
pub fn prompt_money(label: &str) -> Option<Money> {
    loop {
        let answer = prompt(label)?;
        match Money::parse(&answer) {
            Some(value) => return Some(value),
            None => println!("Please enter a price like 2.50."),
        }
    }
}

/// Prompts for a menu choice in `0..=max`, re-prompting when out of range.
pub fn prompt_choice(label: &str, max: usize) -> Option<usize> {
    loop {
        let answer = prompt(label)?;
        match answer.parse::<usize>() {
            Ok(choice) if choice <= max => return Some(choice),
            _ => println!("Please choose an option between 0 and {max}."),
        }
    }
}

/// Lists all categories and prompts for one by number.
pub fn prompt_category() -> Option<Category> {
    for (index, category) in Category::ALL.iter().enumerate() {
        println!("  {}. {}", index + 1, category.label());
    }

    loop {
        let answer = prompt("Category number: ")?;
        match answer.parse::<usize>() {
            Ok(index) if (1..=Category::ALL.len()).contains(&index) => {
                return Some(Category::ALL[index - 1]);
            }
            _ => println!(
                "Please choose a category between 1 and {}.",
                Category::ALL.len()
            ),
        }
    }
}
