//! Terminal workbench for composing a prompt and comparing model settings
//! across up to ten columns, with local API key storage.

pub mod about;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod grid;
pub mod logging;
pub mod theme;
pub mod tui;
