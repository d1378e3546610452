//! tasklist - task list library
//!
//! The core is a store of tasks and a renderer that projects the store onto
//! a display surface after every mutation.
//!
//! # Module Organization
//!
//! - `task`: Task records and id generation
//! - `store`: In-memory task store (add, toggle, delete)
//! - `date`: Due date parsing and formatting
//! - `render`: Row projection and the `DisplaySurface` trait
//! - `app`: Event wiring (form submit, per-row controls, redraw)
//! - `script`: Session scripts for non-interactive runs
//! - `ui`: Interactive terminal surface using ratatui
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `tasklist.toml`
//! - `error`: Error types and result aliases
//! - `output`: Human and JSON output

pub mod app;
pub mod cli;
pub mod config;
pub mod date;
pub mod error;
pub mod output;
pub mod render;
pub mod script;
pub mod store;
pub mod task;
pub mod ui;

pub use error::{Error, Result};
