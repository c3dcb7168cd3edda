use std::process;

use crate::commands::{build_service, print_vsm, runtime};
use crate::{report_error, FetchTarget, OutputFormat, ServerArgs};

pub(crate) fn cmd_fetch(target: &FetchTarget, server: &ServerArgs, output: OutputFormat, quiet: bool) {
    let service = build_service(server, output, quiet);
    let rt = runtime(output, quiet);

    let result = rt.block_on(async {
        match target {
            FetchTarget::Pipeline { name, counter } => service.get_pipeline_vsm(name, *counter).await,
            FetchTarget::Material {
                fingerprint,
                revision,
            } => service.get_material_vsm(fingerprint, revision).await,
        }
    });

    match result {
        Ok(vsm) => print_vsm(&vsm, output),
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    }
}
