//! Notes manager library
//!
//! This library keeps a collection of short notes (title, body, color label,
//! pin flag) in a local key-value store, and provides the filter/sort view
//! and the intent-driven controller a front end needs to display and edit
//! them. A light/dark theme preference is stored alongside.

mod cli;
mod config;
mod controller;
mod errors;
mod note;
mod persistence;
mod presentation;
mod query;
mod store;
mod theme;
mod types;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use controller::*;
pub use errors::*;
pub use note::*;
pub use persistence::*;
pub use presentation::*;
pub use query::*;
pub use store::*;
pub use theme::*;
pub use types::*;
