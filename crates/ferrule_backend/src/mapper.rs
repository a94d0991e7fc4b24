//! Policy to backend-configuration mapper.
//!
//! Pure translation from a parsed [`PolicyConfig`] to a concrete
//! [`BackendConfig`]. Cipher selection is table-driven: each base
//! keyword resolves to a fixed, ordered suite list. The mapper never
//! touches a backend handle.

use tracing::debug;

use ferrule_priority::{BaseKeyword, PolicyConfig, ProtocolVersion};

use crate::config::{BackendConfig, OptionsMask};
use crate::error::Result;

/// Default TLS 1.3 suite list, used for every keyword that does not
/// override it.
const TLS13_DEFAULT: &str = "TLS13-AES128-GCM-SHA256:\
                             TLS13-AES256-GCM-SHA384:\
                             TLS13-CHACHA20-POLY1305-SHA256";

fn cipher_list_for(keyword: Option<BaseKeyword>) -> &'static str {
    let Some(keyword) = keyword else {
        return "DEFAULT";
    };
    match keyword {
        BaseKeyword::Normal => {
            "ECDHE-RSA-AES128-GCM-SHA256:\
             ECDHE-RSA-AES256-GCM-SHA384:\
             ECDHE-ECDSA-AES128-GCM-SHA256:\
             ECDHE-ECDSA-AES256-GCM-SHA384:\
             ECDHE-RSA-CHACHA20-POLY1305:\
             DHE-RSA-AES128-GCM-SHA256:\
             DHE-RSA-AES256-GCM-SHA384"
        }
        BaseKeyword::Performance => {
            "AES128-GCM-SHA256:\
             CHACHA20-POLY1305-SHA256:\
             ECDHE-RSA-AES128-GCM-SHA256:\
             ECDHE-RSA-CHACHA20-POLY1305"
        }
        BaseKeyword::Secure128 => {
            "ECDHE-RSA-AES128-GCM-SHA256:\
             ECDHE-RSA-AES256-GCM-SHA384:\
             ECDHE-ECDSA-AES128-GCM-SHA256:\
             ECDHE-ECDSA-AES256-GCM-SHA384"
        }
        // AES-256 only above 128-bit security.
        BaseKeyword::Secure192 | BaseKeyword::Secure256 => {
            "ECDHE-RSA-AES256-GCM-SHA384:\
             ECDHE-ECDSA-AES256-GCM-SHA384:\
             ECDHE-RSA-CHACHA20-POLY1305:\
             DHE-RSA-AES256-GCM-SHA384"
        }
        // Ephemeral key exchange only.
        BaseKeyword::Pfs => {
            "ECDHE-RSA-AES128-GCM-SHA256:\
             ECDHE-RSA-AES256-GCM-SHA384:\
             ECDHE-ECDSA-AES128-GCM-SHA256:\
             ECDHE-ECDSA-AES256-GCM-SHA384:\
             ECDHE-RSA-CHACHA20-POLY1305:\
             DHE-RSA-AES128-GCM-SHA256:\
             DHE-RSA-AES256-GCM-SHA384"
        }
        BaseKeyword::None => "",
        BaseKeyword::Legacy => {
            "AES128-SHA:\
             AES256-SHA:\
             ECDHE-RSA-AES128-SHA:\
             ECDHE-RSA-AES256-SHA:\
             DHE-RSA-AES128-SHA:\
             DHE-RSA-AES256-SHA"
        }
        BaseKeyword::System => "DEFAULT",
    }
}

fn tls13_suites_for(keyword: Option<BaseKeyword>) -> &'static str {
    match keyword {
        Some(BaseKeyword::Performance) => {
            "TLS13-AES128-GCM-SHA256:\
             TLS13-CHACHA20-POLY1305-SHA256"
        }
        Some(BaseKeyword::Secure192 | BaseKeyword::Secure256) => {
            "TLS13-AES256-GCM-SHA384:\
             TLS13-CHACHA20-POLY1305-SHA256"
        }
        Some(BaseKeyword::None) => "",
        _ => TLS13_DEFAULT,
    }
}

fn options_for(policy: &PolicyConfig) -> OptionsMask {
    let mut options = OptionsMask::EMPTY;

    if policy.server_precedence {
        options.insert(OptionsMask::CIPHER_SERVER_PREFERENCE);
    }

    let disabled = policy.disabled_versions;
    if disabled.contains(ProtocolVersion::Ssl3) {
        options.insert(OptionsMask::NO_SSL3);
    }
    if disabled.contains(ProtocolVersion::Tls10) {
        options.insert(OptionsMask::NO_TLS10);
    }
    if disabled.contains(ProtocolVersion::Tls11) {
        options.insert(OptionsMask::NO_TLS11);
    }
    if disabled.contains(ProtocolVersion::Tls12) {
        options.insert(OptionsMask::NO_TLS12);
    }

    if policy.compat_mode {
        options.insert(OptionsMask::COMPAT);
    }

    options
}

/// Translates a parsed policy into a concrete backend configuration.
///
/// The cipher list field is populated only when a pre-1.3 TLS version
/// is enabled, and the TLS 1.3 suite field only when TLS 1.3 is. A
/// policy that enables neither (e.g. bare `NONE`) maps to an empty
/// configuration, which the applicator treats as a no-op.
///
/// # Errors
///
/// Infallible today; the `Result` return keeps the signature stable for
/// backends whose suite tables are resolved dynamically.
pub fn map(policy: &PolicyConfig) -> Result<BackendConfig> {
    let mut config = BackendConfig::default();

    let enabled = policy.enabled_versions;
    let wants_legacy_tls = enabled.contains(ProtocolVersion::Tls10)
        || enabled.contains(ProtocolVersion::Tls11)
        || enabled.contains(ProtocolVersion::Tls12);

    if wants_legacy_tls {
        config.cipher_list = Some(cipher_list_for(policy.base_keyword).to_string());
    }
    if enabled.contains(ProtocolVersion::Tls13) {
        config.ciphersuites_tls13 = Some(tls13_suites_for(policy.base_keyword).to_string());
    }

    config.min_version = enabled.lowest_tls();
    config.max_version = enabled.highest_tls();
    config.options = options_for(policy);

    debug!(
        cipher_list = config.cipher_list.as_deref().unwrap_or(""),
        options = %config.options,
        "mapped policy to backend configuration"
    );

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_CIPHER_LIST;
    use ferrule_priority::{parse, tokenize};

    fn map_str(input: &str) -> BackendConfig {
        let tokens = tokenize(input).unwrap();
        let policy = parse(&tokens).unwrap();
        map(&policy).unwrap()
    }

    #[test]
    fn normal_fills_both_suite_lists() {
        let config = map_str("NORMAL");
        let list = config.cipher_list.as_deref().unwrap();
        assert!(list.starts_with("ECDHE-RSA-AES128-GCM-SHA256"));
        assert!(list.contains("DHE-RSA-AES256-GCM-SHA384"));
        let suites = config.ciphersuites_tls13.as_deref().unwrap();
        assert!(suites.contains("TLS13-AES128-GCM-SHA256"));
        assert_eq!(config.min_version, Some(ProtocolVersion::Tls12));
        assert_eq!(config.max_version, Some(ProtocolVersion::Tls13));
    }

    #[test]
    fn secure256_restricts_to_aes256() {
        let config = map_str("SECURE256");
        let list = config.cipher_list.as_deref().unwrap();
        assert!(!list.contains("AES128"));
        let suites = config.ciphersuites_tls13.as_deref().unwrap();
        assert!(!suites.contains("TLS13-AES128-GCM-SHA256"));
        assert!(suites.contains("TLS13-AES256-GCM-SHA384"));
    }

    #[test]
    fn tls13_only_policy_has_no_legacy_cipher_list() {
        let config = map_str("NORMAL:-VERS-TLS1.2");
        assert!(config.cipher_list.is_none());
        assert!(config.ciphersuites_tls13.is_some());
        assert_eq!(config.min_version, Some(ProtocolVersion::Tls13));
        assert_eq!(config.max_version, Some(ProtocolVersion::Tls13));
        assert!(config.options.contains(OptionsMask::NO_TLS12));
    }

    #[test]
    fn none_keyword_maps_to_empty_config() {
        let config = map_str("NONE:+VERS-TLS1.2");
        assert_eq!(config.cipher_list.as_deref(), Some(""));
        assert!(config.ciphersuites_tls13.is_none());
        assert_eq!(config.min_version, Some(ProtocolVersion::Tls12));
    }

    #[test]
    fn legacy_enables_old_versions_and_suites() {
        let config = map_str("LEGACY");
        let list = config.cipher_list.as_deref().unwrap();
        assert!(list.contains("AES128-SHA"));
        assert!(config.ciphersuites_tls13.is_none());
        assert_eq!(config.min_version, Some(ProtocolVersion::Tls10));
        assert_eq!(config.max_version, Some(ProtocolVersion::Tls12));
    }

    #[test]
    fn modifiers_and_removed_versions_set_option_bits() {
        let config = map_str("NORMAL:%SERVER_PRECEDENCE:%COMPAT:-VERS-TLS1.0:-VERS-TLS1.1");
        assert!(config.options.contains(OptionsMask::CIPHER_SERVER_PREFERENCE));
        assert!(config.options.contains(OptionsMask::COMPAT));
        assert!(config.options.contains(OptionsMask::NO_TLS10));
        assert!(config.options.contains(OptionsMask::NO_TLS11));
        assert!(!config.options.contains(OptionsMask::NO_TLS12));
    }

    #[test]
    fn system_maps_to_backend_default_list() {
        let config = map_str("SYSTEM");
        assert_eq!(config.cipher_list.as_deref(), Some("DEFAULT"));
    }

    #[test]
    fn mapping_is_deterministic() {
        let a = map_str("PERFORMANCE:%SERVER_PRECEDENCE");
        let b = map_str("PERFORMANCE:%SERVER_PRECEDENCE");
        assert_eq!(a, b);
    }

    #[test]
    fn all_static_tables_fit_the_list_bound() {
        let keywords = [
            None,
            Some(BaseKeyword::Normal),
            Some(BaseKeyword::Performance),
            Some(BaseKeyword::Secure128),
            Some(BaseKeyword::Secure192),
            Some(BaseKeyword::Secure256),
            Some(BaseKeyword::Pfs),
            Some(BaseKeyword::Legacy),
            Some(BaseKeyword::None),
            Some(BaseKeyword::System),
        ];
        for keyword in keywords {
            assert!(cipher_list_for(keyword).len() <= MAX_CIPHER_LIST);
            assert!(tls13_suites_for(keyword).len() <= MAX_CIPHER_LIST);
        }
    }
}
