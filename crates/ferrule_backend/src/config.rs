//! Backend configuration model.
//!
//! [`BackendConfig`] is the concrete, backend-facing output of the
//! mapper: cipher-suite list strings, a protocol version range and an
//! options bitmask. It is pure data; only the applicator ever touches a
//! live backend handle.

use std::fmt;

use serde::{Deserialize, Serialize};

use ferrule_priority::ProtocolVersion;

/// Maximum length of a generated cipher list string. The static mapper
/// tables are test-enforced to stay within this bound.
pub const MAX_CIPHER_LIST: usize = 1024;

/// Backend option flags, OR-ed into a single bitmask.
///
/// Bit values follow the OpenSSL-compatible `SSL_OP_*` constants the
/// target backend understands.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct OptionsMask(u64);

impl OptionsMask {
    /// No options set.
    pub const EMPTY: Self = Self(0);

    /// Server cipher order takes precedence (`SSL_OP_CIPHER_SERVER_PREFERENCE`).
    pub const CIPHER_SERVER_PREFERENCE: Self = Self(0x0040_0000);
    /// Disable SSL 3.0 (`SSL_OP_NO_SSLv3`).
    pub const NO_SSL3: Self = Self(0x0200_0000);
    /// Disable TLS 1.0 (`SSL_OP_NO_TLSv1`).
    pub const NO_TLS10: Self = Self(0x0400_0000);
    /// Disable TLS 1.1 (`SSL_OP_NO_TLSv1_1`).
    pub const NO_TLS11: Self = Self(0x1000_0000);
    /// Disable TLS 1.2 (`SSL_OP_NO_TLSv1_2`).
    pub const NO_TLS12: Self = Self(0x0800_0000);
    /// Bug-workaround compatibility mode (`SSL_OP_ALL` subset).
    pub const COMPAT: Self = Self(0x0000_0004);

    /// Returns the raw bitmask.
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }

    /// Returns true when no flag is set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Adds the given flags.
    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    /// Returns true when every flag in `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl fmt::Display for OptionsMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Concrete backend configuration produced by the mapper.
///
/// Ownership transfers to the applicator; nothing here references a
/// live backend handle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Cipher list for TLS 1.2 and below, if any such version is enabled.
    pub cipher_list: Option<String>,
    /// TLS 1.3 ciphersuite list, if TLS 1.3 is enabled.
    pub ciphersuites_tls13: Option<String>,
    /// Lowest enabled TLS-family version.
    pub min_version: Option<ProtocolVersion>,
    /// Highest enabled TLS-family version.
    pub max_version: Option<ProtocolVersion>,
    /// OR-ed backend option flags.
    pub options: OptionsMask,
}

impl BackendConfig {
    /// Returns true when either version bound is set.
    #[must_use]
    pub const fn has_version_range(&self) -> bool {
        self.min_version.is_some() || self.max_version.is_some()
    }
}

impl fmt::Display for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(list) = &self.cipher_list {
            writeln!(f, "Cipher list: {list}")?;
        }
        if let Some(suites) = &self.ciphersuites_tls13 {
            writeln!(f, "TLS 1.3 ciphersuites: {suites}")?;
        }
        if self.has_version_range() {
            let min = self.min_version.map_or("-", ProtocolVersion::name);
            let max = self.max_version.map_or("-", ProtocolVersion::name);
            writeln!(f, "Version range: {min} .. {max}")?;
        }
        if !self.options.is_empty() {
            writeln!(f, "Options: {}", self.options)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_mask_insert_and_contains() {
        let mut mask = OptionsMask::EMPTY;
        mask.insert(OptionsMask::CIPHER_SERVER_PREFERENCE);
        mask.insert(OptionsMask::NO_SSL3);
        assert!(mask.contains(OptionsMask::CIPHER_SERVER_PREFERENCE));
        assert!(mask.contains(OptionsMask::NO_SSL3));
        assert!(!mask.contains(OptionsMask::NO_TLS12));
        assert_eq!(mask.bits(), 0x0040_0000 | 0x0200_0000);
    }

    #[test]
    fn flag_bits_match_backend_constants() {
        assert_eq!(OptionsMask::CIPHER_SERVER_PREFERENCE.bits(), 0x0040_0000);
        assert_eq!(OptionsMask::NO_SSL3.bits(), 0x0200_0000);
        assert_eq!(OptionsMask::NO_TLS10.bits(), 0x0400_0000);
        assert_eq!(OptionsMask::NO_TLS11.bits(), 0x1000_0000);
        assert_eq!(OptionsMask::NO_TLS12.bits(), 0x0800_0000);
        assert_eq!(OptionsMask::COMPAT.bits(), 0x0000_0004);
    }

    #[test]
    fn default_config_has_no_range() {
        let config = BackendConfig::default();
        assert!(!config.has_version_range());
        assert!(config.options.is_empty());
    }

    #[test]
    fn display_dump_lists_populated_fields() {
        let config = BackendConfig {
            cipher_list: Some("ECDHE-RSA-AES128-GCM-SHA256".to_string()),
            ciphersuites_tls13: None,
            min_version: Some(ProtocolVersion::Tls12),
            max_version: Some(ProtocolVersion::Tls13),
            options: OptionsMask::CIPHER_SERVER_PREFERENCE,
        };
        let dump = config.to_string();
        assert!(dump.contains("Cipher list: ECDHE-RSA-AES128-GCM-SHA256"));
        assert!(dump.contains("TLS1.2 .. TLS1.3"));
        assert!(dump.contains("0x00400000"));
        assert!(!dump.contains("ciphersuites"));
    }
}
