//! Shared utilities for command handlers

use crate::error::{from_loader, Result};
use crate::logging::timing::Timer;
use exemplar_core::{ApiDocument, DocumentLoader, LoaderConfig, SynthesizerConfig};
use std::path::Path;
use tracing::{debug, info};

/// Load an API document, optionally skipping its operation responses
pub fn load_document(path: &Path, settings: &SynthesizerConfig, include_responses: bool) -> Result<ApiDocument> {
    let _timer = Timer::with_details("load_document", &path.display().to_string());

    let loader = DocumentLoader::with_config(LoaderConfig {
        include_responses,
        default_produces: settings.default_media_types.clone(),
    });
    let document = loader.load(path).map_err(from_loader)?;

    info!(
        path = %path.display(),
        flavor = ?document.flavor,
        models = document.registry.len(),
        responses = document.responses.len(),
        "Loaded API document"
    );
    Ok(document)
}

/// Media types given on the command line, or `None` to use the defaults
pub fn requested_media_types(media_types: &[String]) -> Option<&[String]> {
    if media_types.is_empty() {
        debug!("No media types requested, using configured defaults");
        None
    } else {
        Some(media_types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requested_media_types() {
        assert_eq!(requested_media_types(&[]), None);
        let xml = vec!["application/xml".to_string()];
        assert_eq!(requested_media_types(&xml), Some(xml.as_slice()));
    }
}
