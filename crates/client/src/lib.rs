//! HTTP client for the RemoteStore endpoint (year-tabbed spreadsheet).

mod client;
mod error;
#[cfg(test)]
mod tests;

pub use client::{SheetsClient, truncate};
pub use error::ClientError;
