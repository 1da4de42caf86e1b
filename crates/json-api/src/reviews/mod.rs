//! Reviews

mod errors;
mod handlers;
mod schemas;

pub(crate) use handlers::*;
