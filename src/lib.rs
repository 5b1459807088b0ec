pub mod cli;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod interactive;
pub mod local;
pub mod progress;
pub mod render;
