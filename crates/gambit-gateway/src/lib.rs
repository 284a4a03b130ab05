//! HTTP edge of the gambit shortener.
//!
//! Exposes the [`Shortener`](gambit_core::Shortener) contract as a JSON API
//! and serves the chess sequence redirects.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::{AppError, Result};
pub use state::AppState;
