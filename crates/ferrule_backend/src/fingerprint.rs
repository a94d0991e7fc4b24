//! Configuration fingerprints.
//!
//! A fingerprint is a seeded xxh64 over the canonical field encoding of
//! a [`BackendConfig`]. Two configurations compare equal exactly when
//! their fingerprints do, so operators can diff deployed policies
//! without shipping the full suite lists around.

use xxhash_rust::xxh64::xxh64;

use ferrule_priority::ProtocolVersion;

use crate::config::BackendConfig;

/// Domain-separation seed; bump only on an encoding change.
const FINGERPRINT_SEED: u64 = 0xFE44_0001;

impl BackendConfig {
    /// Returns the stable fingerprint of this configuration.
    ///
    /// The encoding walks fields in declaration order with explicit
    /// absent markers, so `Some("")` and `None` hash differently.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut canon = String::new();
        push_field(&mut canon, "cipher_list", self.cipher_list.as_deref());
        push_field(
            &mut canon,
            "ciphersuites_tls13",
            self.ciphersuites_tls13.as_deref(),
        );
        push_field(
            &mut canon,
            "min_version",
            self.min_version.map(ProtocolVersion::name),
        );
        push_field(
            &mut canon,
            "max_version",
            self.max_version.map(ProtocolVersion::name),
        );
        canon.push_str("options=");
        canon.push_str(&self.options.bits().to_string());
        canon.push('\n');
        xxh64(canon.as_bytes(), FINGERPRINT_SEED)
    }
}

fn push_field(canon: &mut String, name: &str, value: Option<&str>) {
    canon.push_str(name);
    canon.push('=');
    match value {
        Some(value) => {
            canon.push('+');
            canon.push_str(value);
        }
        None => canon.push('-'),
    }
    canon.push('\n');
}
