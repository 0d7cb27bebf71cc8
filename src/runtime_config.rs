//! # Runtime Configuration
//!
//! Environment-driven settings for the serving binary.
//!
//! ## Environment Variables
//!
//! - `GOODAY_ADDR`: listen address (default `0.0.0.0:8080`)
//! - `GOODAY_STACK_SIZE`: coroutine stack size in bytes, decimal (`16384`) or hex
//!   (`0x4000`); default `0x4000`
//!
//! ```rust
//! use gooday::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! println!("Stack size: {} bytes", config.stack_size);
//! ```

use std::env;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_STACK_SIZE: usize = 0x4000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub addr: String,
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_ADDR.to_string(),
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self::from_vars(env::var("GOODAY_ADDR").ok(), env::var("GOODAY_STACK_SIZE").ok())
    }

    fn from_vars(addr: Option<String>, stack_size: Option<String>) -> Self {
        Self {
            addr: addr
                .filter(|a| !a.is_empty())
                .unwrap_or_else(|| DEFAULT_ADDR.to_string()),
            stack_size: stack_size
                .as_deref()
                .map(parse_size)
                .unwrap_or(DEFAULT_STACK_SIZE),
        }
    }

    /// Apply the coroutine settings to the `may` runtime. Call before starting the server.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}

fn parse_size(val: &str) -> usize {
    let parsed = match val.strip_prefix("0x") {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => val.parse(),
    };
    parsed.unwrap_or(DEFAULT_STACK_SIZE)
}
