pub mod config;
pub mod error;
pub mod fixtures;
pub mod persistence;
pub mod reducer;
pub mod store;

pub use config::{load_settings, Settings};
pub use error::{LoadError, Rejection};
pub use persistence::{Persistence, DEFAULT_SLOT_KEY};
pub use reducer::{apply, reduce, Command};
pub use store::ContractStore;
