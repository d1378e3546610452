//! tasklist init command implementation
//!
//! Writes a default `tasklist.toml` so display and id settings are easy to
//! discover and edit.

use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::{emit_success, HumanOutput, OutputOptions};

#[derive(serde::Serialize)]
struct InitReport {
    path: PathBuf,
    created: bool,
}

pub fn run(dir: &Path, force: bool, options: OutputOptions) -> Result<()> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        return Err(Error::InvalidArgument(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    Config::default().save(&path)?;
    tracing::debug!(path = %path.display(), "wrote default config");

    let report = InitReport {
        path: path.clone(),
        created: true,
    };
    let mut human = HumanOutput::new(format!("Wrote {}", path.display()));
    human.push_detail("edit [display] to change how tasks are rendered");
    emit_success(options, "init", &report, Some(&human))
}
