//! Compile command implementation.

use anyhow::{Context, Result};
use ferrule_backend::compile_priority_string;
use std::fs;
use tracing::info;

/// Runs the compile command.
pub fn run(
    priority: &str,
    output_path: Option<&str>,
    format: &str,
    show_fingerprint: bool,
) -> Result<()> {
    info!("Compiling priority string: {}", priority);

    let config = compile_priority_string(priority)
        .with_context(|| format!("Failed to compile priority string: {priority}"))?;

    let rendered = match format.to_lowercase().as_str() {
        "json" => serde_json::to_string_pretty(&config)
            .with_context(|| "Failed to serialize configuration")?,
        "yaml" | "yml" => {
            serde_yaml::to_string(&config).with_context(|| "Failed to serialize configuration")?
        }
        _ => {
            anyhow::bail!("Unknown output format: {format}. Use 'yaml' or 'json'.");
        }
    };

    match output_path {
        Some(path) => {
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output file: {path}"))?;
            info!("Compiled configuration written to: {}", path);
        }
        None => println!("{rendered}"),
    }

    if show_fingerprint {
        println!("fingerprint: {:016x}", config.fingerprint());
    }

    Ok(())
}
