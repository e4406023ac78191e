pub mod config;
pub mod list;
pub mod progress;
pub mod split;
