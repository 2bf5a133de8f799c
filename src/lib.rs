pub mod config;
pub mod error;
pub mod messenger;
pub mod models;
pub mod prompt;
pub mod upload;
