//! Configuration applicator.
//!
//! [`BackendContext`] is the seam between the compiler and a live TLS
//! backend handle. [`apply`] pushes a [`BackendConfig`] through that
//! seam, stopping at the first rejected call.

use tracing::debug;

use ferrule_priority::ProtocolVersion;

use crate::config::BackendConfig;
use crate::error::{Error, Result};

/// A mutable TLS backend handle that accepts compiled configuration.
///
/// Each setter returns `Err(message)` when the backend rejects the
/// value; [`apply`] converts that into an [`Error::Apply`] naming the
/// failing operation. Implementations must not assume any call order
/// beyond "cipher lists before options".
pub trait BackendContext {
    /// Installs the cipher list for TLS 1.2 and below.
    fn set_cipher_list(&mut self, list: &str) -> std::result::Result<(), String>;

    /// Installs the TLS 1.3 ciphersuite list.
    fn set_tls13_ciphersuites(&mut self, suites: &str) -> std::result::Result<(), String>;

    /// Sets the minimum accepted protocol version. Implementations
    /// translate to their own identifier via [`ProtocolVersion::wire_id`].
    fn set_min_version(&mut self, version: ProtocolVersion) -> std::result::Result<(), String>;

    /// ORs the given option flags into the handle.
    fn set_options(&mut self, options: u64) -> std::result::Result<(), String>;

    /// Called once after a priority string has been fully applied, with
    /// the original input. Default is a no-op; backends that surface the
    /// active policy for diagnostics can record it here.
    fn record_priority_string(&mut self, _input: &str) {}
}

/// Applies a compiled configuration to a backend handle.
///
/// Stops at the first rejected setter. Empty cipher lists are skipped
/// rather than applied: an empty list means "nothing to install", and
/// pushing it to the backend would clear suites the handle may need for
/// other protocol versions.
///
/// # Errors
///
/// Returns [`Error::Apply`] naming the rejected operation. The handle
/// is left partially configured; callers needing atomicity should apply
/// to a fresh handle and swap.
pub fn apply<C: BackendContext + ?Sized>(ctx: &mut C, config: &BackendConfig) -> Result<()> {
    if let Some(list) = config.cipher_list.as_deref() {
        if !list.is_empty() {
            ctx.set_cipher_list(list).map_err(|message| Error::Apply {
                operation: "cipher list",
                message,
            })?;
        }
    }

    if let Some(suites) = config.ciphersuites_tls13.as_deref() {
        if !suites.is_empty() {
            ctx.set_tls13_ciphersuites(suites)
                .map_err(|message| Error::Apply {
                    operation: "TLS 1.3 ciphersuites",
                    message,
                })?;
        }
    }

    if let Some(min) = config.min_version {
        ctx.set_min_version(min)
            .map_err(|message| Error::Apply {
                operation: "minimum version",
                message,
            })?;
    }

    if !config.options.is_empty() {
        ctx.set_options(config.options.bits())
            .map_err(|message| Error::Apply {
                operation: "options",
                message,
            })?;
    }

    debug!("applied backend configuration");
    Ok(())
}
