//! # parse-address
//!
//! Forgiving US postal address parsing.
//!
//! This library decomposes free-form address text into structured fields
//! (street number, directionals, street name and type, secondary unit, city,
//! state, ZIP+4) or recognizes it as a street intersection or a PO Box.
//!
//! ## Features
//!
//! - **Address Parsing**: Standard, informal, intersection and PO Box forms
//! - **Normalization**: Canonical directionals, street types and state codes
//! - **Bounded Work**: Inputs are length-capped and every pattern runs in
//!   linear time, so adversarial input cannot stall the parser
//! - **Thread Safe**: One parser can be shared across threads without locking
//!
//! ## Quick Start
//!
//! ```rust
//! use parse_address::{AddressParser, ParseResult};
//!
//! let parser = AddressParser::new();
//!
//! match parser.parse("789 Oak Avenue, Portland, OR 97201-1234")? {
//!     ParseResult::Address(address) => {
//!         println!("Number: {}", address.number);
//!         println!("Street: {} {}", address.street, address.street_type);
//!         println!("City: {}", address.city);
//!     }
//!     other => println!("Parsed as {}", other.type_name()),
//! }
//! # Ok::<(), parse_address::Error>(())
//! ```

#![deny(missing_docs)]
#![warn(rust_2018_idioms)]

mod decompose;
pub mod error;
pub mod extract;
pub mod guard;
pub mod normalizer;
pub mod parser;
pub mod types;

// Re-export main API
pub use error::{Error, ErrorKind, Result};
pub use normalizer::AddressNormalizer;
pub use parser::AddressParser;
pub use types::*;

use guard::{DEFAULT_MAX_INPUT_LEN, DEFAULT_MAX_WORKING_LEN};

/// Environment variable overriding [`ParserConfig::max_input_len`].
pub const ENV_MAX_INPUT_LENGTH: &str = "PARSE_ADDRESS_MAX_INPUT_LENGTH";

/// Environment variable overriding [`ParserConfig::max_working_len`].
pub const ENV_MAX_WORKING_LENGTH: &str = "PARSE_ADDRESS_MAX_WORKING_LENGTH";

/// Smallest accepted input cap.
const MIN_INPUT_LEN: usize = 100;

/// Largest accepted input cap.
const MAX_INPUT_LEN: usize = 100_000;

/// Length bounds for the input guard.
///
/// # Examples
///
/// ```rust
/// use parse_address::{AddressParser, ParserConfig};
///
/// let config = ParserConfig::builder()
///     .max_input_len(2_000)
///     .max_working_len(256)
///     .build();
///
/// let parser = AddressParser::with_config(config)?;
/// # Ok::<(), parse_address::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Inputs longer than this many bytes are rejected
    pub max_input_len: usize,

    /// Sanitized input is truncated to this many bytes before parsing
    pub max_working_len: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            max_working_len: DEFAULT_MAX_WORKING_LEN,
        }
    }
}

impl ParserConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ParserConfigBuilder {
        ParserConfigBuilder::new()
    }

    /// Load bounds from the environment on top of the defaults.
    ///
    /// Unparseable values are logged and ignored.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the resulting bounds are out of range.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            max_input_len: env_usize(&lookup, ENV_MAX_INPUT_LENGTH, defaults.max_input_len),
            max_working_len: env_usize(&lookup, ENV_MAX_WORKING_LENGTH, defaults.max_working_len),
        };
        config.validate()?;
        Ok(config)
    }

    /// Check the bounds are usable.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_INPUT_LEN..=MAX_INPUT_LEN).contains(&self.max_input_len) {
            return Err(Error::invalid_config(format!(
                "max input length must be between {MIN_INPUT_LEN} and {MAX_INPUT_LEN}"
            )));
        }
        if self.max_working_len == 0 {
            return Err(Error::invalid_config("max working length must be positive"));
        }
        if self.max_working_len > self.max_input_len {
            return Err(Error::invalid_config(
                "max working length must not exceed max input length",
            ));
        }
        Ok(())
    }
}

fn env_usize<F>(lookup: &F, key: &str, default: usize) -> usize
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        return default;
    };
    match raw.trim().parse::<usize>() {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key, error = %e, default, "invalid integer value, using default");
            default
        }
    }
}

/// Builder for ParserConfig.
#[derive(Debug, Clone)]
pub struct ParserConfigBuilder {
    max_input_len: usize,
    max_working_len: usize,
}

impl ParserConfigBuilder {
    /// Create a new configuration builder with default values.
    pub fn new() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            max_working_len: DEFAULT_MAX_WORKING_LEN,
        }
    }

    /// Set the maximum accepted input length in bytes.
    pub fn max_input_len(mut self, len: usize) -> Self {
        self.max_input_len = len;
        self
    }

    /// Set the length the sanitized input is truncated to.
    pub fn max_working_len(mut self, len: usize) -> Self {
        self.max_working_len = len;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ParserConfig {
        ParserConfig {
            max_input_len: self.max_input_len,
            max_working_len: self.max_working_len,
        }
    }
}

impl Default for ParserConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
