//! FoodGram Shared Library
//!
//! This crate contains the domain types and parsing logic shared between
//! the operations binary and the gateway: the ingredient seed record, the
//! seed-file formats, and the field validators used when provisioning the
//! administrative account.

pub mod errors;
pub mod ingredients;
pub mod validation;

// Re-export commonly used items
pub use errors::SeedError;
pub use ingredients::{NewIngredient, SeedBatch, SeedFormat};
