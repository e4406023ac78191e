//! Split published Intune security baseline templates into one Settings
//! Catalog document per application or category.

pub mod baseline;
pub mod cmd;
pub mod config;
pub mod error;
pub mod fetch;
pub mod templates;
