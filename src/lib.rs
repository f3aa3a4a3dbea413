pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod search;
pub mod terminal;
pub mod ui;
