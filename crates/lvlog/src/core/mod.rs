//! Core components for the lvlog logging system.
//!
//! ### [`error`] - Error handling
//! The crate-wide [`Error`] enum and [`Result`] alias. Configuration
//! failures, lazy file creation failures and write failures all surface
//! through it.
//!
//! ### [`result`] - Result extensions
//! Helpers that attach path context to raw `io::Error`s.

pub mod error;
pub mod result;

pub use error::{Error, Result};
pub use result::IoResultExt;
