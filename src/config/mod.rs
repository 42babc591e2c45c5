//! Editor configuration
//!
//! Settings live in a plain struct; a Rhai config file can override them at
//! startup.

mod engine;
mod settings;

pub use engine::ConfigEngine;
pub use settings::{Modifier, Settings};
