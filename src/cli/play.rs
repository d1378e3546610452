//! tasklist play command implementation
//!
//! Replays a session script against an in-memory surface and prints the
//! list as it stands at the end (plus any `render` snapshots).

use std::io::Read;
use std::path::PathBuf;

use crate::app::App;
use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::render::{MemorySurface, RenderOptions, Row};
use crate::script::{parse_script, run_script};
use crate::store::TaskStore;

pub fn run(config: &Config, script: Option<PathBuf>, options: OutputOptions) -> Result<()> {
    let source = read_source(script)?;
    let commands = parse_script(&source)?;

    let store = TaskStore::new(config.tasks.id_strategy);
    let render_options = RenderOptions::from(&config.display);
    let mut app = App::new(store, MemorySurface::new(), render_options);
    let report = run_script(&mut app, &commands);
    tracing::debug!(
        commands = commands.len(),
        tasks = report.rows.len(),
        warnings = report.warnings.len(),
        "script finished"
    );

    let mut human = HumanOutput::new(list_header(&report.rows));
    for (idx, snapshot) in report.snapshots.iter().enumerate() {
        human.push_detail(format!("render #{}: {}", idx + 1, list_header(snapshot)));
        for row in snapshot {
            human.push_detail(format!("  {}", describe_row(row)));
        }
    }
    for row in &report.rows {
        human.push_detail(describe_row(row));
    }
    for warning in &report.warnings {
        human.push_warning(warning.clone());
    }

    emit_success(options, "play", &report, Some(&human))
}

fn read_source(script: Option<PathBuf>) -> Result<String> {
    match script {
        Some(path) if path.as_os_str() != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn list_header(rows: &[Row]) -> String {
    match rows.len() {
        0 => "No tasks".to_string(),
        1 => "1 task".to_string(),
        count => format!("{count} tasks"),
    }
}

fn describe_row(row: &Row) -> String {
    if row.classes.is_empty() {
        format!("#{} {}", row.task_id, row.to_line())
    } else {
        format!("#{} {} ({})", row.task_id, row.to_line(), row.classes.join(" "))
    }
}
