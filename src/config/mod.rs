//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SubwatchConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the monitor's threshold is derived
//!   from it exactly once, so there is no reload path
//! - All fields have defaults to allow minimal configs; broker identity is
//!   the only thing a file must provide
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BrokerConfig, ListenerConfig, MonitorConfig, ObservabilityConfig, RetryPolicyConfig,
    SubwatchConfig,
};
pub use validation::{validate_config, ValidationError};
