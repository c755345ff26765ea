//! Shelfcast - audiobook folders as podcast feeds
//!
//! This library crate exposes the server, config and export layers for
//! integration testing.

pub mod config;
pub mod export;
pub mod server;
pub mod streaming;
