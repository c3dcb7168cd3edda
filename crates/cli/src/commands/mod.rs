pub(crate) mod fetch;
pub(crate) mod page;
pub(crate) mod parse;
pub(crate) mod validate;

use std::path::Path;
use std::process;

use vsm_client::{ClientConfig, HttpTransport, VsmService};
use vsm_model::{to_vsm_json, Vsm};

use crate::{render, report_error, OutputFormat, ServerArgs};

/// Read and parse a JSON file, exiting with status 1 on failure.
pub(crate) fn read_json_file(path: &Path, output: OutputFormat, quiet: bool) -> serde_json::Value {
    let content = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("error reading file '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    match serde_json::from_str(&content) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing JSON in '{}': {}", path.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}

/// Build an HTTP-backed service from flags, environment and config file.
pub(crate) fn build_service(
    server: &ServerArgs,
    output: OutputFormat,
    quiet: bool,
) -> VsmService<HttpTransport> {
    match ClientConfig::load(&server.overrides()) {
        Ok(config) => {
            tracing::debug!(server = %config.server_url, "client configured");
            VsmService::new(HttpTransport::new(config))
        }
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}

pub(crate) fn runtime(output: OutputFormat, quiet: bool) -> tokio::runtime::Runtime {
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            report_error(
                &format!("error: failed to create tokio runtime: {}", e),
                output,
                quiet,
            );
            process::exit(1);
        }
    }
}

/// Normalized wire JSON of a parsed map.
pub(crate) fn vsm_to_value(vsm: &Vsm) -> serde_json::Value {
    serde_json::to_value(to_vsm_json(vsm)).unwrap_or(serde_json::Value::Null)
}

pub(crate) fn print_vsm(vsm: &Vsm, output: OutputFormat) {
    match output {
        OutputFormat::Text => print!("{}", render::outline(vsm)),
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&vsm_to_value(vsm))
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
    }
}
