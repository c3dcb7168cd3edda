use std::path::Path;
use std::process;

use crate::commands::read_json_file;
use crate::{report_error, OutputFormat};

static VSM_SCHEMA_STR: &str = include_str!("../../../../docs/vsm-schema.json");

/// Check a payload against the JSON Schema, then against the rules the
/// schema cannot express (exactly one current entity, counters ≥ 1).
pub(crate) fn cmd_validate(file: &Path, output: OutputFormat, quiet: bool) {
    let schema: serde_json::Value = match serde_json::from_str(VSM_SCHEMA_STR) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("internal error: failed to parse embedded VSM schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let doc = read_json_file(file, output, quiet);

    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("internal error: failed to compile schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let mut errors: Vec<String> = validator
        .iter_errors(&doc)
        .map(|e| format!("{}", e))
        .collect();

    if errors.is_empty() {
        if let Err(e) = vsm_model::parse_vsm(&doc) {
            errors.push(e.to_string());
        }
    }

    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid"),
                OutputFormat::Json => println!("{{\"valid\": true}}"),
            }
        }
    } else {
        match output {
            OutputFormat::Text => {
                if !quiet {
                    eprintln!("invalid value stream map");
                    for err in &errors {
                        eprintln!("  - {}", err);
                    }
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "valid": false,
                    "errors": errors
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_default()
                );
            }
        }
        process::exit(1);
    }
}
