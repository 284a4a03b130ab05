//! Record store backends for the Gambit URL shortener.

pub mod memory;
pub mod mysql;

pub use gambit_core::repository::{ReadRepository, Repository, UrlRecord};
pub use gambit_core::StorageError;
pub use memory::InMemoryRepository;
pub use mysql::MySqlRepository;
