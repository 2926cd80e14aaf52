//! CLI command implementations.

pub mod common;
pub mod count;
pub mod inspect;
pub mod search;
pub mod solve;
pub mod version;
