pub mod config;
pub mod error;
pub mod filter;
pub mod store;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use filter::SearchFilters;
pub use store::MusicLog;
pub use types::AlbumEntry;
