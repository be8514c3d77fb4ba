//! FoodGram Operations Library
//!
//! This library exposes the startup-orchestration modules for use in tests
//! and by the `foodgram-ops` binary.

pub mod admin;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod entrypoint;
pub mod error;
pub mod seed;
pub mod server;
pub mod staticfiles;
