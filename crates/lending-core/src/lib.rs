pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "amortisation")]
pub mod amortisation;

#[cfg(feature = "penalties")]
pub mod penalties;

#[cfg(feature = "products")]
pub mod products;

pub use error::LendingError;
pub use types::*;

/// Standard result type for all lending-core operations
pub type LendingResult<T> = Result<T, LendingError>;
