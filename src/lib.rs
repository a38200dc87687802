pub mod cli_app;
pub mod config;
pub mod delivery;
pub mod error;
pub mod identity;
pub mod models;
pub mod service;
pub mod wait;
pub mod watcher;
