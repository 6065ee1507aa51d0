//! Service layer for movie-tracker
//!
//! Owns the in-memory collection and keeps it reconciled with the
//! RemoteStore, writing through to the LocalCache.

#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod error;
mod reconciler;
mod remote;
mod tracker;

pub use error::ServiceError;
pub use reconciler::{AddOutcome, Reconciler, SyncOutcome};
pub use remote::RemoteStore;
pub use tracker::{MovieTracker, SheetsTracker};
