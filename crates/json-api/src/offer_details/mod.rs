//! Offer Details
//!
//! Single tiers, addressed directly. Errors and schemas are shared with
//! offers.

mod handlers;

pub(crate) use handlers::*;
