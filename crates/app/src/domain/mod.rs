//! Marketplace Domain Concerns

pub mod deletion;
pub mod offers;
pub mod orders;
pub mod pagination;
pub mod reviews;
pub mod stats;
pub mod users;
pub mod validation;
