pub mod config;
pub mod doctor;
pub mod fetch;
pub mod matching;
pub mod search;
pub mod sync;
