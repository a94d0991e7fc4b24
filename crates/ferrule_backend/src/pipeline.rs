//! End-to-end compiler pipeline.
//!
//! The three public entry points run the phase chain
//! tokenize -> parse -> map (-> apply) and maintain the per-thread
//! diagnostic snapshot that [`last_error`] exposes. Errors surface
//! through `Result` as usual; the snapshot exists for callers several
//! stack frames away from the failing call, typically logging code in
//! a connection teardown path.

use std::cell::RefCell;

use tracing::debug;

use ferrule_priority::{parse, tokenize, ErrorInfo};

use crate::apply::{apply, BackendContext};
use crate::config::BackendConfig;
use crate::error::{Error, Result};

thread_local! {
    static LAST_ERROR: RefCell<Option<ErrorInfo>> = const { RefCell::new(None) };
}

/// Returns the diagnostic snapshot from the most recent failed pipeline
/// invocation on this thread, or `None` if the last invocation
/// succeeded. Overwritten on every invocation.
#[must_use]
pub fn last_error() -> Option<ErrorInfo> {
    LAST_ERROR.with(|slot| slot.borrow().clone())
}

fn record(result: Result<BackendConfig>) -> Result<BackendConfig> {
    LAST_ERROR.with(|slot| {
        *slot.borrow_mut() = result.as_ref().err().map(Error::info);
    });
    result
}

fn run_compile(input: &str) -> Result<BackendConfig> {
    let tokens = tokenize(input)?;
    debug!(tokens = tokens.len(), "tokenized priority string");
    let policy = parse(&tokens)?;
    debug!(%policy, "parsed policy");
    crate::mapper::map(&policy)
}

/// Compiles a priority string into a backend configuration without
/// touching any backend handle.
///
/// # Errors
///
/// Returns the first tokenizer, parser or mapper error. The per-thread
/// [`last_error`] snapshot is updated either way.
pub fn compile_priority_string(input: &str) -> Result<BackendConfig> {
    record(run_compile(input))
}

/// Checks a priority string for validity. Identical to
/// [`compile_priority_string`] except the configuration is discarded,
/// so it is safe to call on untrusted input before any handle exists.
///
/// # Errors
///
/// Returns the first tokenizer, parser or mapper error.
pub fn validate_priority_string(input: &str) -> Result<()> {
    compile_priority_string(input).map(|_| ())
}

/// Compiles a priority string and applies the result to a backend
/// handle. On success the original input is recorded on the handle via
/// [`BackendContext::record_priority_string`].
///
/// # Errors
///
/// Returns compilation errors, or [`Error::Apply`] when the backend
/// rejects part of the configuration. An apply failure leaves the
/// handle partially configured.
pub fn set_priority_string<C: BackendContext + ?Sized>(ctx: &mut C, input: &str) -> Result<()> {
    let config = compile_priority_string(input)?;
    let outcome = apply(ctx, &config);
    LAST_ERROR.with(|slot| {
        *slot.borrow_mut() = outcome.as_ref().err().map(Error::info);
    });
    outcome?;
    ctx.record_priority_string(input);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apply::tests::MockContext;
    use crate::config::OptionsMask;
    use ferrule_priority::ErrorKind;

    #[test]
    fn set_priority_string_configures_the_handle() {
        let mut ctx = MockContext::default();
        set_priority_string(&mut ctx, "NORMAL:%SERVER_PRECEDENCE").unwrap();
        assert!(ctx.cipher_list.is_some());
        assert!(ctx.ciphersuites.is_some());
        assert_ne!(ctx.options & OptionsMask::CIPHER_SERVER_PREFERENCE.bits(), 0);
        assert_eq!(
            ctx.recorded_input.as_deref(),
            Some("NORMAL:%SERVER_PRECEDENCE")
        );
        assert!(last_error().is_none());
    }

    #[test]
    fn validation_never_touches_a_handle() {
        // A handle that rejects every operation would surface any
        // applicator call as an error; it also records each call.
        let mut ctx = MockContext {
            fail_on: Some("cipher list"),
            ..MockContext::default()
        };
        validate_priority_string("SECURE256").unwrap();
        assert!(ctx.calls.is_empty());
        assert!(ctx.recorded_input.is_none());
        assert!(last_error().is_none());

        // The same string applied for real does reach the handle.
        let err = set_priority_string(&mut ctx, "SECURE256").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MapperFailed);
        assert_eq!(ctx.calls, vec!["cipher list"]);
    }

    #[test]
    fn failures_populate_the_snapshot() {
        // SUITEB128 classifies as a keyword but has no base-keyword
        // mapping, so the parser rejects it; unrecognized free-form
        // tokens would be tolerated instead.
        let err = validate_priority_string("SUITEB128").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownKeyword);
        let info = last_error().expect("snapshot set on failure");
        assert_eq!(info.kind, ErrorKind::UnknownKeyword);
        assert_eq!(info.token, "SUITEB128");
    }

    #[test]
    fn unrecognized_tokens_are_tolerated() {
        validate_priority_string("NORMAL:BOGUS_TOKEN_XYZ").unwrap();
        assert!(last_error().is_none());
    }

    #[test]
    fn snapshot_is_cleared_by_the_next_success() {
        validate_priority_string("NORMAL:+VERS-TLS9.9").unwrap_err();
        assert!(last_error().is_some());
        validate_priority_string("NORMAL").unwrap();
        assert!(last_error().is_none());
    }

    #[test]
    fn apply_failures_reach_the_snapshot() {
        let mut ctx = MockContext {
            fail_on: Some("cipher list"),
            ..MockContext::default()
        };
        let err = set_priority_string(&mut ctx, "NORMAL").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MapperFailed);
        assert!(ctx.recorded_input.is_none());
        let info = last_error().expect("snapshot set on apply failure");
        assert_eq!(info.kind, ErrorKind::MapperFailed);
    }

    #[test]
    fn snapshot_is_thread_local() {
        validate_priority_string("SUITEB192").unwrap_err();
        assert!(last_error().is_some());
        let other = std::thread::spawn(|| last_error().is_none())
            .join()
            .unwrap();
        assert!(other, "fresh thread starts with an empty snapshot");
    }
}
