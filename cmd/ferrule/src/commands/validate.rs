//! Validate command implementation.

use anyhow::Result;
use ferrule_backend::validate_priority_string;
use tracing::info;

/// Runs the validate command.
pub fn run(priority: &str) -> Result<()> {
    info!("Validating priority string: {}", priority);

    match validate_priority_string(priority) {
        Ok(()) => {
            println!("OK: {priority}");
            Ok(())
        }
        Err(err) => {
            let info = err.info();
            eprintln!("error[{}]: {}", info.kind.as_str(), info.message);
            if !info.token.is_empty() {
                eprintln!("  token: {:?} at byte offset {}", info.token, info.offset);
            }
            anyhow::bail!("invalid priority string");
        }
    }
}
