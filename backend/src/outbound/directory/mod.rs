//! Upstream person directory adapters.
//!
//! This module provides a thin HTTP implementation of the `PersonDirectory`
//! port against a json REST collection mounted at `/persons`.

mod dto;
mod http_directory;

pub use http_directory::{HttpDirectoryBuildError, HttpPersonDirectory};
