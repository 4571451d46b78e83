//! Photo Portal: brand/person/date photo storage with gallery views
//!
//! Images live in an object store; their metadata lives in three JSON
//! documents (photos, sheet links, purchases) that are loaded whole, changed
//! and written back. Gallery views are projections of the photo document.

pub mod access;
pub mod commands;
pub mod config;
pub mod documents;
pub mod error;
pub mod format;
pub mod hierarchy;
pub mod logging;
pub mod objects;
pub mod purchases;
pub mod sheets;
pub mod tooling;
pub mod types;
pub mod views;
