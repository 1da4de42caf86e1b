//! Marketplace rule core: offers, orders, reviews and the policy that guards
//! them, backed by `PostgreSQL`.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod ids;
pub mod policy;

#[cfg(test)]
mod test;
