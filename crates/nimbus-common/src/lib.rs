pub mod errors;
pub mod signal;
pub mod types;

pub use errors::{ConfigError, NimbusError};
pub use signal::BusyFlag;
pub use types::Color;

pub type Result<T> = std::result::Result<T, NimbusError>;
