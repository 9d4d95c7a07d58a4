pub mod app;
pub mod config;
pub mod engine;
pub mod runtime;
pub mod terminal;
pub mod ui;
