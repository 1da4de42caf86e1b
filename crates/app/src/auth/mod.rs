//! Authentication

mod errors;
mod models;
mod principal;
mod repository;
mod service;
mod token;

pub use errors::*;
pub use models::*;
pub use principal::*;
pub use service::*;
pub use token::*;
