pub mod config;
pub mod engines;
pub mod error;
pub mod service;
pub mod types;

pub use error::{Result, TunebreedError};
