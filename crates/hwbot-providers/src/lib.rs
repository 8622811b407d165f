//! # hwbot-providers
//!
//! Review API client implementations.

pub mod practicum;
