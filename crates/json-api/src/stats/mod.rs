//! Platform statistics

pub(crate) mod base_info;
