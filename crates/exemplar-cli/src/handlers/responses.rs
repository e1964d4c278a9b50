//! Responses command handler

use super::utils::{load_document, requested_media_types};
use crate::cli::ResponsesArgs;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{OutputWriter, ResponseReport};
use exemplar_core::{ApiDocument, ExampleGenerator, SynthesizerConfig};
use tracing::{debug, instrument};

/// Handle the responses command
#[instrument(skip(settings, output), fields(file = %args.spec.display()))]
pub fn handle_responses(args: ResponsesArgs, settings: &SynthesizerConfig, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("responses_command");
    let document = load_document(&args.spec, settings, true)?;

    if let Some(path) = &args.path {
        if !document.responses.iter().any(|response| &response.path == path) {
            return Err(Error::invalid_args(format!(
                "No operation responses declared for path '{}'",
                path
            )));
        }
    }

    output.info(&format!(
        "Rendering {} responses from {}",
        document.responses.len(),
        args.spec.display()
    ))?;
    let reports = collect_reports(&document, settings, &args);
    if reports.is_empty() {
        output.warning("No response declares an example, a model reference or an array schema")?;
    }
    output.responses(&reports)
}

/// Render every matching response that has something to render
fn collect_reports(document: &ApiDocument, settings: &SynthesizerConfig, args: &ResponsesArgs) -> Vec<ResponseReport> {
    let mut generator = ExampleGenerator::with_config(&document.registry, settings.clone());
    let overrides = requested_media_types(&args.media_types);

    let mut reports = Vec::new();
    for response in &document.responses {
        if args.path.as_deref().is_some_and(|path| path != response.path) {
            continue;
        }
        let Some(schema) = &response.schema else {
            debug!(path = %response.path, status = %response.status_code, "Response has no schema");
            continue;
        };

        let produces = match overrides {
            Some(media_types) => media_types,
            None if response.media_types.is_empty() => settings.default_media_types.as_slice(),
            None => response.media_types.as_slice(),
        };

        match generator.generate_from_response_schema(&response.status_code, schema, produces) {
            Some(examples) => reports.push(ResponseReport {
                method: response.method.clone(),
                path: response.path.clone(),
                status_code: response.status_code.clone(),
                examples,
            }),
            None => debug!(
                path = %response.path,
                status = %response.status_code,
                "Nothing to render for response"
            ),
        }
    }
    reports
}
