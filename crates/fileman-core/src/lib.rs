//! Core types for fileman.
//!
//! This crate provides the data structures shared by the walking, file
//! operation and watching crates: walk configuration, platform conventions,
//! compiled name patterns, match criteria and error types.

mod config;
mod error;
mod name;
mod pattern;
mod platform;
mod query;

pub use config::{RootSelection, WalkConfig, WalkConfigBuilder};
pub use error::{WalkError, WalkWarning, WarningKind};
pub use name::{base_name, dotted_extension, replace_extension};
pub use pattern::NamePattern;
pub use platform::{DEFAULT_SYSTEM_DRIVE, PathConvention, Platform, SYSTEM_DRIVE_VAR};
pub use query::{ContentQuery, FileChange, KILOBYTE, TimeWindow};
