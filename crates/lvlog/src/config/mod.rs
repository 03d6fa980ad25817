//! Configuration types
//!
//! - `level`: the [`Severity`] enumeration and its parsing rules
//! - `base`: the [`Config`] record and its resolved [`Target`]

mod base;
mod level;

pub use base::{Config, Target};
pub use level::{COLOR_RESET, Severity};
