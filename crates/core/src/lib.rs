//! Core types and logic for movie-tracker
//!
//! This crate contains the domain types shared across all other crates,
//! plus the pure parts of reconciliation and the view model.

mod cache;
mod collation;
pub mod constants;
pub mod env_config;
mod error;
mod movie;
mod reconcile;
mod suggest;
mod view;
mod wire;

pub use cache::*;
pub use collation::{CollationKey, compare_titles};
pub use error::*;
pub use movie::*;
pub use reconcile::*;
pub use suggest::suggest;
pub use view::*;
pub use wire::*;
