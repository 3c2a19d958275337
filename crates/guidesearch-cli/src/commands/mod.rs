//! CLI command handlers

pub mod check;
pub mod filters;
pub mod get;
pub mod ls;
pub mod search;
pub mod stats;
