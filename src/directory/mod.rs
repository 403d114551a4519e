//! # Directory Module
//!
//! Exhibitor records and where they come from.
//!
//! ## Key Components
//!
//! - [`record`] - The [`ExhibitorRecord`] type and booth code parsing
//! - [`loader`] - Reading records from hall data files
//! - [`shared`] - The atomically swappable handle to the served index
//! - [`error`] - Load-time validation errors

pub mod error;
pub mod loader;
pub mod record;
pub mod shared;

pub use error::ValidationError;
pub use loader::DirectorySource;
pub use record::{BoothCode, DEFAULT_CATEGORY, ExhibitorRecord, Position};
pub use shared::SharedDirectory;
