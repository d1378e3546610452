//! Command-line interface for tasklist
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputOptions;

mod init;
mod play;

/// tasklist - a minimal task list
///
/// Add tasks with a due date, mark them complete, delete them. Tasks live
/// for the length of one session.
#[derive(Parser, Debug)]
#[command(name = "tasklist")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to ./tasklist.toml, then the user config)
    #[arg(long, global = true, env = "TASKLIST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the interactive task list (default)
    Ui,

    /// Run a session script and print the resulting list
    Play {
        /// Script file; reads stdin when omitted or `-`
        script: Option<PathBuf>,
    },

    /// Write a default tasklist.toml into the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let options = OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };
        let cwd = std::env::current_dir()?;
        match self.command.unwrap_or(Commands::Ui) {
            Commands::Init { force } => init::run(&cwd, force, options),
            Commands::Play { script } => {
                let config = Config::resolve(self.config.as_deref(), &cwd)?;
                play::run(&config, script, options)
            }
            Commands::Ui => {
                let config = Config::resolve(self.config.as_deref(), &cwd)?;
                crate::ui::run(&config)
            }
        }
    }
}
