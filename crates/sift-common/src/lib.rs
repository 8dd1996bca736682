//! Common utilities for sift.
//!
//! This crate provides shared infrastructure used outside the parsing core:
//! - **Warning System** - deduplicated, colored terminal output for build issues
//! - **Fetching** - blocking HTTP retrieval of markup sources

pub mod net;
pub mod warning;
