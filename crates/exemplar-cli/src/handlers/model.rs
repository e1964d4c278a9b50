//! Model command handler

use super::utils::{load_document, requested_media_types};
use crate::cli::ModelArgs;
use crate::error::{from_loader, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use exemplar_core::{ExampleGenerator, SynthesizerConfig};
use tracing::{info, instrument};

/// Handle the model command
#[instrument(skip(settings, output), fields(file = %args.spec.display(), model = %args.name))]
pub fn handle_model(args: ModelArgs, settings: &SynthesizerConfig, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("model_command", &args.name);
    let document = load_document(&args.spec, settings, false)?;

    // Fail with a proper exit code instead of rendering the sentinel
    document.model(&args.name).map_err(from_loader)?;

    output.section(&format!("Model {}", args.name))?;
    let mut generator = ExampleGenerator::with_config(&document.registry, settings.clone());
    let records = generator.generate_for_model(None, requested_media_types(&args.media_types), &args.name);

    info!(records = records.len(), "Rendered model examples");
    output.examples(&records)
}
