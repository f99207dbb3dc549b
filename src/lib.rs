pub mod config;
pub mod domain;
pub mod error;
pub mod tags;
pub mod ui;

pub use error::{RelkitError, Result};
