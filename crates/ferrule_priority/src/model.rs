//! Abstract policy model.
//!
//! [`PolicyConfig`] is the backend-agnostic intermediate representation
//! produced by the parser and consumed read-only by the backend mapper.
//! It is created zero-valued, populated token by token, and discarded
//! after mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum number of enabled or disabled cipher names.
pub const MAX_CIPHERS: usize = 128;

/// Maximum number of enabled or disabled key-exchange names.
pub const MAX_KX: usize = 32;

/// Maximum number of enabled or disabled MAC names.
pub const MAX_MACS: usize = 16;

/// Maximum length of a single cipher, key-exchange or MAC name.
pub const MAX_NAME_LEN: usize = 64;

/// TLS and DTLS protocol versions understood by the policy language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    /// SSL 3.0 (deprecated).
    Ssl3,
    /// TLS 1.0.
    Tls10,
    /// TLS 1.1.
    Tls11,
    /// TLS 1.2.
    Tls12,
    /// TLS 1.3.
    Tls13,
    /// DTLS 1.0 (based on TLS 1.1).
    Dtls10,
    /// DTLS 1.2 (based on TLS 1.2).
    Dtls12,
    /// DTLS 1.3 (based on TLS 1.3).
    Dtls13,
}

/// TLS-family versions in ascending protocol order. DTLS versions are
/// tracked in [`VersionSet`] but never contribute to the TLS range.
pub const TLS_ORDER: [ProtocolVersion; 5] = [
    ProtocolVersion::Ssl3,
    ProtocolVersion::Tls10,
    ProtocolVersion::Tls11,
    ProtocolVersion::Tls12,
    ProtocolVersion::Tls13,
];

impl ProtocolVersion {
    /// All versions, in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Ssl3,
        Self::Tls10,
        Self::Tls11,
        Self::Tls12,
        Self::Tls13,
        Self::Dtls10,
        Self::Dtls12,
        Self::Dtls13,
    ];

    /// Returns the priority-string display name (without `VERS-` prefix).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ssl3 => "SSL3.0",
            Self::Tls10 => "TLS1.0",
            Self::Tls11 => "TLS1.1",
            Self::Tls12 => "TLS1.2",
            Self::Tls13 => "TLS1.3",
            Self::Dtls10 => "DTLS1.0",
            Self::Dtls12 => "DTLS1.2",
            Self::Dtls13 => "DTLS1.3",
        }
    }

    /// Returns the wire protocol identifier.
    #[must_use]
    pub const fn wire_id(self) -> u16 {
        match self {
            Self::Ssl3 => 0x0300,
            Self::Tls10 => 0x0301,
            Self::Tls11 => 0x0302,
            Self::Tls12 => 0x0303,
            Self::Tls13 => 0x0304,
            Self::Dtls10 => 0xFEFF,
            Self::Dtls12 => 0xFEFD,
            Self::Dtls13 => 0xFEFC,
        }
    }

    /// Returns true for the datagram variants.
    #[must_use]
    pub const fn is_dtls(self) -> bool {
        matches!(self, Self::Dtls10 | Self::Dtls12 | Self::Dtls13)
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Ssl3 => 0,
            Self::Tls10 => 1,
            Self::Tls11 => 2,
            Self::Tls12 => 3,
            Self::Tls13 => 4,
            Self::Dtls10 => 5,
            Self::Dtls12 => 6,
            Self::Dtls13 => 7,
        }
    }

    /// Resolves a `VERS-*` token to a version.
    ///
    /// Accepts both `VERS-SSL3.0` and the shorthand `VERS-SSL3`, matching
    /// the priority string dialect.
    #[must_use]
    pub fn from_vers_token(token: &str) -> Option<Self> {
        match token {
            "VERS-SSL3.0" | "VERS-SSL3" => Some(Self::Ssl3),
            "VERS-TLS1.0" => Some(Self::Tls10),
            "VERS-TLS1.1" => Some(Self::Tls11),
            "VERS-TLS1.2" => Some(Self::Tls12),
            "VERS-TLS1.3" => Some(Self::Tls13),
            "VERS-DTLS1.0" => Some(Self::Dtls10),
            "VERS-DTLS1.2" => Some(Self::Dtls12),
            "VERS-DTLS1.3" => Some(Self::Dtls13),
            _ => None,
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set over the finite protocol-version enumeration.
///
/// The parser maintains two of these (enabled and disabled); a successful
/// parse guarantees they are disjoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VersionSet {
    bits: u8,
}

impl VersionSet {
    /// The empty set.
    pub const EMPTY: Self = Self { bits: 0 };

    /// Creates a set from the given versions.
    #[must_use]
    pub fn of(versions: &[ProtocolVersion]) -> Self {
        let mut set = Self::EMPTY;
        for &v in versions {
            set.insert(v);
        }
        set
    }

    /// Adds a version to the set.
    pub fn insert(&mut self, version: ProtocolVersion) {
        self.bits |= 1 << version.bit();
    }

    /// Removes a version from the set.
    pub fn remove(&mut self, version: ProtocolVersion) {
        self.bits &= !(1 << version.bit());
    }

    /// Returns true if the version is in the set.
    #[must_use]
    pub const fn contains(self, version: ProtocolVersion) -> bool {
        self.bits & (1 << version.bit()) != 0
    }

    /// Returns the intersection of two sets.
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self {
            bits: self.bits & other.bits,
        }
    }

    /// Returns true if the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.bits == 0
    }

    /// Returns the number of versions in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Iterates over the versions in the set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = ProtocolVersion> {
        ProtocolVersion::ALL
            .into_iter()
            .filter(move |&v| self.contains(v))
    }

    /// Returns the lowest enabled TLS-family version, ignoring DTLS.
    #[must_use]
    pub fn lowest_tls(self) -> Option<ProtocolVersion> {
        TLS_ORDER.into_iter().find(|&v| self.contains(v))
    }

    /// Returns the highest enabled TLS-family version, ignoring DTLS.
    #[must_use]
    pub fn highest_tls(self) -> Option<ProtocolVersion> {
        TLS_ORDER.into_iter().rev().find(|&v| self.contains(v))
    }
}

impl fmt::Display for VersionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for version in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(version.name())?;
            first = false;
        }
        Ok(())
    }
}

/// Base policy keywords establishing defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseKeyword {
    /// Balanced modern defaults.
    Normal,
    /// Fast AEAD suites first.
    Performance,
    /// Minimum 128-bit security.
    Secure128,
    /// Minimum 192-bit security.
    Secure192,
    /// Minimum 256-bit security.
    Secure256,
    /// Perfect forward secrecy required.
    Pfs,
    /// Older protocol versions and ciphers allowed.
    Legacy,
    /// Nothing enabled; the operator enumerates everything explicitly.
    None,
    /// System-wide policy. Treated as `Normal` by this implementation.
    System,
}

impl BaseKeyword {
    /// Resolves recognized keyword text.
    ///
    /// `SUITEB128`/`SUITEB192` are classified as keywords by the tokenizer
    /// but have no mapping here; the parser reports them as unknown,
    /// matching the reference behavior.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "NORMAL" => Some(Self::Normal),
            "PERFORMANCE" => Some(Self::Performance),
            "SECURE128" => Some(Self::Secure128),
            "SECURE192" => Some(Self::Secure192),
            "SECURE256" => Some(Self::Secure256),
            "PFS" => Some(Self::Pfs),
            "LEGACY" => Some(Self::Legacy),
            "NONE" => Some(Self::None),
            "SYSTEM" => Some(Self::System),
            _ => None,
        }
    }

    /// Returns the canonical keyword text.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Performance => "PERFORMANCE",
            Self::Secure128 => "SECURE128",
            Self::Secure192 => "SECURE192",
            Self::Secure256 => "SECURE256",
            Self::Pfs => "PFS",
            Self::Legacy => "LEGACY",
            Self::None => "NONE",
            Self::System => "SYSTEM",
        }
    }

    /// Initial enabled-version set implied by this keyword.
    #[must_use]
    pub fn default_versions(self) -> VersionSet {
        match self {
            Self::Legacy => VersionSet::of(&[
                ProtocolVersion::Tls10,
                ProtocolVersion::Tls11,
                ProtocolVersion::Tls12,
            ]),
            Self::None => VersionSet::EMPTY,
            _ => VersionSet::of(&[ProtocolVersion::Tls12, ProtocolVersion::Tls13]),
        }
    }

    /// Implied minimum security level in bits (0 = unconstrained).
    #[must_use]
    pub const fn min_security_bits(self) -> u16 {
        match self {
            Self::Normal | Self::System => 64,
            Self::Performance | Self::Secure128 | Self::Pfs => 128,
            Self::Secure192 => 192,
            Self::Secure256 => 256,
            Self::Legacy | Self::None => 0,
        }
    }
}

impl fmt::Display for BaseKeyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend-agnostic policy produced by the parser.
///
/// Invariant: after a successful parse, `enabled_versions` and
/// `disabled_versions` are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Base keyword, if one was given. Duplicate base keywords follow
    /// last-wins semantics (documented behavior, see crate docs).
    pub base_keyword: Option<BaseKeyword>,
    /// True if the `NONE` keyword was used: an empty enabled-version set
    /// is then intentional, not an error.
    pub explicit_none: bool,

    /// Versions explicitly or implicitly enabled.
    pub enabled_versions: VersionSet,
    /// Versions explicitly disabled.
    pub disabled_versions: VersionSet,

    /// Cipher names explicitly enabled, in input order.
    pub enabled_ciphers: Vec<String>,
    /// Cipher names explicitly disabled, in input order.
    pub disabled_ciphers: Vec<String>,
    /// Key-exchange names explicitly enabled, in input order.
    pub enabled_kx: Vec<String>,
    /// Key-exchange names explicitly disabled, in input order.
    pub disabled_kx: Vec<String>,
    /// MAC names explicitly enabled, in input order.
    pub enabled_macs: Vec<String>,
    /// MAC names explicitly disabled, in input order.
    pub disabled_macs: Vec<String>,

    /// `%SERVER_PRECEDENCE`: server cipher order wins.
    pub server_precedence: bool,
    /// `%COMPAT`: enable workarounds for broken peers.
    pub compat_mode: bool,
    /// `%NO_EXTENSIONS`: omit TLS extensions.
    pub no_extensions: bool,
    /// `%FORCE_SESSION_HASH`: require extended master secret.
    pub force_session_hash: bool,
    /// `%DUMBFW`: pad ClientHello for broken firewalls.
    pub dumb_firewall_padding: bool,
    /// `%FALLBACK_SCSV`: send the fallback signaling cipher suite.
    pub fallback_scsv: bool,

    /// Perfect forward secrecy required (the `PFS` keyword).
    pub require_pfs: bool,
    /// Minimum security level in bits (0 = unconstrained).
    pub min_security_bits: u16,
}

impl PolicyConfig {
    /// Returns true if a base keyword was specified.
    #[must_use]
    pub const fn has_base_keyword(&self) -> bool {
        self.base_keyword.is_some()
    }
}

impl fmt::Display for PolicyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(keyword) = self.base_keyword {
            writeln!(f, "Base keyword: {keyword}")?;
        }
        if !self.enabled_versions.is_empty() {
            writeln!(f, "Enabled versions: {}", self.enabled_versions)?;
        }
        if !self.disabled_versions.is_empty() {
            writeln!(f, "Disabled versions: {}", self.disabled_versions)?;
        }
        if self.server_precedence {
            writeln!(f, "Server precedence: yes")?;
        }
        if self.compat_mode {
            writeln!(f, "Compatibility mode: yes")?;
        }
        if self.require_pfs {
            writeln!(f, "Perfect forward secrecy: required")?;
        }
        if self.min_security_bits > 0 {
            writeln!(f, "Minimum security: {} bits", self.min_security_bits)?;
        }
        Ok(())
    }
}
