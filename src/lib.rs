pub mod app;
pub mod bookmarks;
pub mod client;
pub mod config;
pub mod error;
pub mod state;
