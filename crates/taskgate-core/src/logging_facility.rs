//! Logging initialization
//!
//! Single initialization point for the gateway's tracing setup. Call
//! `init(profile)` once at process startup; repeat calls are no-ops.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for production
    Production,
    /// No subscriber output; tests install their own capture if needed
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// - **Development**: human-readable logs, default filter `taskgate=debug`
/// - **Production**: JSON structured logs, default filter `taskgate=info`
/// - **Test**: bare registry, no output
///
/// `RUST_LOG` overrides the default filter in either non-test profile.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("taskgate=debug")),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("taskgate=info")),
                )
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
