//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ResilienceConfig (validated, immutable)
//!     → handed to registry / budget / manager constructors
//! ```
//!
//! # Design Decisions
//! - Config is immutable once a breaker is constructed for an endpoint;
//!   late `register_config` calls only affect future breakers
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{CircuitBreakerConfig, ResilienceConfig, RetryConfig, TimeoutPolicyConfig};
pub use validation::{validate_config, ValidationError};
