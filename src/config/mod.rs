pub mod logging;
pub mod security;

pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use security::{ConfigError, SecurityConfig};
