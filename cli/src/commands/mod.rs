//! Command implementations

pub mod gethosts;
pub mod run;
