//! # hwbot-core
//!
//! Core types, traits, configuration, and error handling for the homework
//! status watcher.

pub mod config;
pub mod error;
pub mod response;
pub mod status;
pub mod traits;
