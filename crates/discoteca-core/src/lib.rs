pub mod clock;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod services;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use errors::CoreError;
pub use validation::{Validate, Validated, ValidationError, validate};
