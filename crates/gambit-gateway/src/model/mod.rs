mod envelope;
mod health;
mod url;

pub use envelope::ApiResponse;
pub use health::HealthResponse;
pub use url::{CreateUrlRequest, UrlResponse};
