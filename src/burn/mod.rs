pub mod aggregator;
pub mod error;
pub mod format;
pub mod types;
pub mod watch;
