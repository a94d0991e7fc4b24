//! Token-sequence parser building the abstract [`PolicyConfig`].
//!
//! Tokens are processed strictly in order. Each compile starts from a
//! zero-valued configuration, so a failed parse never leaves partial
//! state behind for the next invocation.
//!
//! Two asymmetries are deliberate and part of the public contract:
//!
//! - An unrecognized **keyword** aborts the parse with `UnknownKeyword`,
//!   while an unrecognized **modifier** is tolerated (forward
//!   compatibility for policy strings referencing modifiers this backend
//!   cannot express).
//! - A second base keyword silently overwrites the first (last-wins),
//!   including resetting the enabled-version set to the new keyword's
//!   defaults. This is observed reference behavior, not a guarded
//!   invariant.

use tracing::warn;

use crate::error::{truncate_echo, Error, Result, MAX_ERROR_TOKEN};
use crate::model::{
    BaseKeyword, PolicyConfig, ProtocolVersion, MAX_CIPHERS, MAX_KX, MAX_MACS, MAX_NAME_LEN,
};
use crate::token::{Token, TokenCategory, TokenList};

/// Folds a token list into a [`PolicyConfig`].
///
/// # Errors
///
/// - [`Error::UnknownKeyword`] for unrecognized keyword text.
/// - [`Error::InvalidVersion`] for unrecognized `VERS-` text.
/// - [`Error::InvalidCipher`] for oversized algorithm names.
/// - [`Error::TooComplex`] when a per-category list bound is exceeded.
/// - [`Error::Conflict`] when any version ends up both enabled and
///   disabled. The parser never auto-resolves the overlap.
pub fn parse(tokens: &TokenList<'_>) -> Result<PolicyConfig> {
    let mut config = PolicyConfig::default();

    for token in tokens {
        match token.category {
            TokenCategory::Keyword => parse_keyword(token, &mut config)?,
            TokenCategory::Modifier => parse_modifier(token, &mut config),
            TokenCategory::Version => parse_version(token, &mut config)?,
            TokenCategory::Cipher => {
                push_name(token, &mut config.enabled_ciphers, &mut config.disabled_ciphers, MAX_CIPHERS)?;
            }
            TokenCategory::KeyExchange => {
                push_name(token, &mut config.enabled_kx, &mut config.disabled_kx, MAX_KX)?;
            }
            TokenCategory::Mac => {
                push_name(token, &mut config.enabled_macs, &mut config.disabled_macs, MAX_MACS)?;
            }
            // Accepted syntactically, reserved for future mapping.
            TokenCategory::Signature | TokenCategory::Group => {}
            // Operators were consumed during tokenization; unknown
            // tokens (including unknown modifiers) are tolerated.
            TokenCategory::Unknown | TokenCategory::Operator => {}
        }
    }

    let overlap = config
        .enabled_versions
        .intersection(config.disabled_versions);
    if !overlap.is_empty() {
        return Err(Error::Conflict { versions: overlap });
    }

    // `NONE` with an empty enabled set is valid: the operator must then
    // enumerate every version explicitly.
    Ok(config)
}

fn parse_keyword(token: &Token<'_>, config: &mut PolicyConfig) -> Result<()> {
    let Some(keyword) = BaseKeyword::from_token(token.text) else {
        return Err(Error::UnknownKeyword {
            offset: token.offset,
            token: token.text.to_string(),
        });
    };

    // Last-wins: a later keyword replaces the base defaults, resetting
    // the enabled set while accumulated disables are kept.
    config.base_keyword = Some(keyword);
    config.enabled_versions = keyword.default_versions();
    config.min_security_bits = keyword.min_security_bits();
    if keyword == BaseKeyword::Pfs {
        config.require_pfs = true;
    }
    if keyword == BaseKeyword::None {
        config.explicit_none = true;
    }
    Ok(())
}

fn parse_modifier(token: &Token<'_>, config: &mut PolicyConfig) {
    match token.text {
        "%SERVER_PRECEDENCE" => config.server_precedence = true,
        "%COMPAT" => config.compat_mode = true,
        "%NO_EXTENSIONS" => config.no_extensions = true,
        "%FORCE_SESSION_HASH" => config.force_session_hash = true,
        "%DUMBFW" => config.dumb_firewall_padding = true,
        "%FALLBACK_SCSV" => config.fallback_scsv = true,
        other => {
            // Recognized by the classifier but without a backend
            // equivalent: tolerated, nothing is set.
            warn!(modifier = other, "modifier has no backend mapping, ignored");
        }
    }
}

fn parse_version(token: &Token<'_>, config: &mut PolicyConfig) -> Result<()> {
    let Some(version) = ProtocolVersion::from_vers_token(token.text) else {
        return Err(Error::InvalidVersion {
            offset: token.offset,
            token: token.text.to_string(),
        });
    };

    if token.is_remove {
        config.disabled_versions.insert(version);
        config.enabled_versions.remove(version);
    } else {
        config.enabled_versions.insert(version);
        config.disabled_versions.remove(version);
    }
    Ok(())
}

fn push_name(
    token: &Token<'_>,
    enabled: &mut Vec<String>,
    disabled: &mut Vec<String>,
    max: usize,
) -> Result<()> {
    if token.text.len() >= MAX_NAME_LEN {
        return Err(Error::InvalidCipher {
            offset: token.offset,
            token: truncate_echo(token.text, MAX_ERROR_TOKEN),
        });
    }

    let list = if token.is_remove { disabled } else { enabled };
    if list.len() >= max {
        return Err(Error::TooComplex {
            offset: token.offset,
        });
    }
    list.push(token.text.to_string());
    Ok(())
}
