//! Offers

pub mod data;
pub mod errors;
pub mod pricing;
pub mod records;
mod repository;
pub mod service;
pub mod validation;

pub use errors::OffersServiceError;
pub(crate) use repository::PgOffersRepository;
pub use service::*;
