//! Aggregate Stats

pub mod errors;
pub mod records;
mod repository;
pub mod service;

pub use errors::StatsServiceError;
pub use service::*;
