//! CLI subcommand implementations.

pub mod compile;
pub mod tokens;
pub mod validate;
