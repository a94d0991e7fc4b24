//! Tokens command implementation.

use anyhow::{Context, Result};
use ferrule_priority::tokenize;

/// Runs the tokens command.
pub fn run(priority: &str) -> Result<()> {
    let tokens = tokenize(priority)
        .with_context(|| format!("Failed to tokenize priority string: {priority}"))?;

    println!("{} token(s)", tokens.len());
    for token in &tokens {
        let op = if token.is_remove { "remove" } else { "add" };
        println!(
            "  {:>4}  {:<14} {:<7} {}",
            token.offset,
            token.category.name(),
            op,
            token.text
        );
    }
    Ok(())
}
