use std::path::Path;
use std::process;

use vsm_client::routes::vsm_page_path;
use vsm_model::{Entity, PageMeta};

use crate::commands::{build_service, read_json_file, runtime, vsm_to_value};
use crate::{render, report_error, OutputFormat, ServerArgs};

pub(crate) fn cmd_page(
    file: &Path,
    fetch: bool,
    server: &ServerArgs,
    output: OutputFormat,
    quiet: bool,
) {
    let doc = read_json_file(file, output, quiet);

    let meta = match PageMeta::from_json(&doc) {
        Ok(m) => m,
        Err(e) => {
            let msg = format!("error in '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let vsm = if fetch {
        let service = build_service(server, output, quiet);
        let rt = runtime(output, quiet);
        match rt.block_on(service.fetch(&meta)) {
            Ok(vsm) => Some(vsm),
            Err(e) => {
                report_error(&format!("error: {}", e), output, quiet);
                process::exit(1);
            }
        }
    } else {
        None
    };

    match output {
        OutputFormat::Text => {
            for (label, value) in meta.key_values() {
                println!("{}: {}", label, value);
            }
            println!("Page: {}", vsm_page_path(&meta));
            if let Some(vsm) = &vsm {
                println!();
                print!("{}", render::outline(vsm));
            }
        }
        OutputFormat::Json => {
            let entity_type = match meta.entity() {
                Entity::Pipeline(_) => "pipeline",
                Entity::Material(_) => "material",
            };
            let fields: serde_json::Map<String, serde_json::Value> = meta
                .key_values()
                .into_iter()
                .map(|(label, value)| (label.to_lowercase(), serde_json::Value::String(value)))
                .collect();

            let mut result = serde_json::json!({
                "type": entity_type,
                "fields": fields,
                "page": vsm_page_path(&meta),
            });
            if let Some(vsm) = &vsm {
                result["vsm"] = vsm_to_value(vsm);
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&result).unwrap_or_default()
            );
        }
    }
}
