//! URL shortener service implementation.
//!
//! [`ShortenerService`] wraps a record store and the chess sequence codec.
//! It owns the collision retry policy: the codec stays pure and never loops.

pub mod clock;
pub mod retry;
pub mod service;

pub use clock::{Clock, SystemClock};
pub use retry::RetryPolicy;
pub use service::ShortenerService;
