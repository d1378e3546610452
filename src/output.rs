//! Shared output formatting for tasklist commands.

use serde::Serialize;

use crate::error::{Error, Result};

pub const SCHEMA_VERSION: &str = "tasklist.v1";

#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub quiet: bool,
}

#[derive(Debug, Clone)]
pub struct HumanOutput {
    header: String,
    details: Vec<String>,
    warnings: Vec<String>,
}

impl HumanOutput {
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            details: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn push_detail(&mut self, value: impl Into<String>) {
        self.details.push(value.into());
    }

    pub fn push_warning(&mut self, value: impl Into<String>) {
        self.warnings.push(value.into());
    }
}

pub fn emit_success<T: Serialize>(
    options: OutputOptions,
    command: &str,
    data: &T,
    human: Option<&HumanOutput>,
) -> Result<()> {
    if options.json {
        let warnings = human.map(|h| h.warnings.clone()).unwrap_or_default();

        #[derive(Serialize)]
        struct Envelope<'a, T: Serialize> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            data: &'a T,
            #[serde(skip_serializing_if = "Vec::is_empty")]
            warnings: Vec<String>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "success",
            data,
            warnings,
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if let Some(human) = human {
        // Warnings are user-visible even when quiet.
        for warning in &human.warnings {
            eprintln!("warning: {warning}");
        }
        if !options.quiet {
            println!("{}", format_human(human));
        }
    }

    Ok(())
}

pub fn emit_error(command: &str, err: &Error, json: bool) -> Result<()> {
    if json {
        #[derive(Serialize)]
        struct ErrorBody<'a> {
            message: &'a str,
            code: i32,
            kind: &'static str,
            #[serde(skip_serializing_if = "Option::is_none")]
            details: Option<serde_json::Value>,
        }

        #[derive(Serialize)]
        struct Envelope<'a> {
            schema_version: &'static str,
            command: &'a str,
            status: &'static str,
            error: ErrorBody<'a>,
        }

        let payload = Envelope {
            schema_version: SCHEMA_VERSION,
            command,
            status: "error",
            error: ErrorBody {
                message: &err.to_string(),
                code: err.exit_code(),
                kind: error_kind(err),
                details: err.details(),
            },
        };

        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    eprintln!("error: {err}");
    if let Some(hint) = error_hint(err) {
        eprintln!("hint: {hint}");
    }
    Ok(())
}

pub fn format_human(output: &HumanOutput) -> String {
    let mut lines = Vec::new();
    lines.push(output.header.clone());
    for detail in &output.details {
        lines.push(format!("- {detail}"));
    }
    lines.join("\n")
}

pub fn infer_command_name_from_args() -> String {
    std::env::args()
        .skip(1)
        .find(|arg| !arg.starts_with('-'))
        .filter(|arg| matches!(arg.as_str(), "ui" | "play" | "init"))
        .unwrap_or_else(|| "tasklist".to_string())
}

fn error_kind(err: &Error) -> &'static str {
    match err.exit_code() {
        2 => "user_error",
        _ => "operation_failed",
    }
}

fn error_hint(err: &Error) -> Option<&'static str> {
    match err {
        Error::InvalidConfig(_) | Error::TomlParse(_) => Some("fix tasklist.toml then retry"),
        Error::ScriptSyntax { .. } => {
            Some("commands are: add <title> | <due>, toggle <id>, delete <id>, render")
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_output_lists_details() {
        let mut output = HumanOutput::new("Tasks (2)");
        output.push_detail("a (Due: Jan 01, 2025) [Complete] [Delete]");
        output.push_detail("b (Due: Jan 02, 2025) [Undo] [Delete]");
        assert_eq!(
            format_human(&output),
            "Tasks (2)\n- a (Due: Jan 01, 2025) [Complete] [Delete]\n- b (Due: Jan 02, 2025) [Undo] [Delete]"
        );
    }

    #[test]
    fn human_output_without_details_is_header_only() {
        let output = HumanOutput::new("No tasks");
        assert_eq!(format_human(&output), "No tasks");
    }
}
