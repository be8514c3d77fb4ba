//! FoodGram Gateway Library
//!
//! The reverse proxy in front of the FoodGram deployment: path-prefix
//! routing to the application server, static and media file service, and
//! single-page-app fallback for the frontend bundle.

pub mod config;
pub mod error;
pub mod proxy;
pub mod routes;
pub mod state;
