//! Library crate for catalog-admin.
//!
//! This crate exposes the building blocks of the TUI:
//! - REST API client and wire types (`api`)
//! - Application state and update loop (`app`)
//! - Runtime configuration (`config`)
//! - API error type (`error`)
//! - Client-side pagination helpers (`pager`)
//! - In-memory search filters (`search`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `catalog-admin` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod pager;
pub mod search;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Error type shared by every API client operation.
pub use error::ApiError;
