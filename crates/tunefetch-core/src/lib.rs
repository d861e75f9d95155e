//! tunefetch-core: find and download the audio for track database entries

pub mod acquire;
pub mod config;
pub mod downloader;
pub mod entry;
pub mod error;
pub mod matcher;
pub mod search;
pub mod streams;
pub mod sync;

pub use acquire::AudioAcquirer;
pub use config::Config;
pub use entry::{ExpectedDuration, TrackEntry};
pub use error::{Result, TuneFetchError};
pub use search::{SearchResult, Searcher};
pub use sync::TrackSync;
