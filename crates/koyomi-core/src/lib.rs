pub mod config;
pub mod error;
pub mod models;
pub mod request;
pub mod schedule;
pub mod session;
pub mod store;
pub mod view;

pub use config::CalendarConfig;
pub use error::KoyomiError;
pub use models::{CatalogEntry, CustomLinkMap, WatchingSet};
pub use session::Session;
pub use store::{KeyValueStore, MemoryStore, PreferenceStore};
