//! # hwbot-channels
//!
//! Messaging platform integrations for hwbot.

pub mod telegram;
