use std::path::Path;
use std::process;

use crate::commands::{print_vsm, read_json_file};
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_parse(file: &Path, output: OutputFormat, quiet: bool) {
    let doc = read_json_file(file, output, quiet);

    match vsm_model::parse_vsm(&doc) {
        Ok(vsm) => print_vsm(&vsm, output),
        Err(e) => {
            let msg = format!("error in '{}': {}", file.display(), e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    }
}
