pub mod app;
pub mod cli;
pub mod config;
pub mod debounce;
pub mod document;
pub mod error;
pub mod event;
pub mod file_browser;
pub mod file_history;
pub mod file_ops;
pub mod help;
pub mod history_filter;
pub mod history_store;
pub mod list_view_state;
pub mod logging;
pub mod menu;
pub mod persistence;
pub mod ui;
pub mod utils;
pub mod version;

shadow_rs::shadow!(build);
