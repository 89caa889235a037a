pub mod config;
pub mod crown;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

mod state;

pub use config::TableConfig;
pub use state::{Directory, Memory, StorageError, Store};
