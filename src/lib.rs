// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod controller;
pub mod error;
pub mod model;
pub mod sink;
pub mod storage;

pub use config::{PipelineOptions, Preferences};
pub use controller::{ApplyOutcome, FilterController};
pub use error::ApplyError;
