//! Common types used across the SouthXchange client library.

pub mod common;
pub mod serde_helpers;

pub use common::*;
