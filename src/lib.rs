pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod io;
pub mod logging;

pub use config::Settings;
pub use error::{IndexError, IndexResult, MalformedRecordError};
pub use index::{Category, IndexRecord, SearchIndexStore, SourceFormat};
