//! Models command handler

use super::utils::load_document;
use crate::cli::ModelsArgs;
use crate::error::Result;
use crate::logging::timing::Timer;
use crate::output::{ModelSummary, OutputWriter};
use exemplar_core::{
    ApiDocument, IntegerFormat, NumberFormat, SchemaKind, SchemaNode, SynthesizerConfig,
};
use tracing::instrument;

/// Handle the models command
#[instrument(skip(settings, output), fields(file = %args.spec.display()))]
pub fn handle_models(args: ModelsArgs, settings: &SynthesizerConfig, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("models_command");
    let document = load_document(&args.spec, settings, false)?;

    let models = summarize(&document);
    if models.is_empty() {
        output.warning(&format!("{} defines no models", args.spec.display()))?;
    }
    output.models(&models)
}

fn summarize(document: &ApiDocument) -> Vec<ModelSummary> {
    document
        .registry
        .iter()
        .map(|(name, schema)| ModelSummary {
            name: name.to_string(),
            kind: kind_label(schema),
        })
        .collect()
}

/// Short description of a schema's shape for listings
fn kind_label(schema: &SchemaNode) -> String {
    let label = match &schema.kind {
        SchemaKind::Boolean => "boolean",
        SchemaKind::Integer(IntegerFormat::Int32) => "integer",
        SchemaKind::Integer(IntegerFormat::Int64) => "long",
        SchemaKind::Number(NumberFormat::Float) => "float",
        SchemaKind::Number(NumberFormat::Double) => "double",
        SchemaKind::Number(NumberFormat::Unspecified) => "number",
        SchemaKind::String if schema.is_enum() => "enum",
        SchemaKind::String => "string",
        SchemaKind::Date => "date",
        SchemaKind::DateTime => "date-time",
        SchemaKind::Uuid => "uuid",
        SchemaKind::Uri => "uri",
        SchemaKind::Binary => "binary",
        SchemaKind::Array { .. } => "array",
        SchemaKind::Map { .. } => "map",
        SchemaKind::Object { .. } => "object",
        SchemaKind::Composed { composition, .. } => composition.keyword(),
        SchemaKind::Reference(target) => return format!("$ref {}", target),
        SchemaKind::Any => "any",
    };
    label.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use exemplar_core::loader::Format;
    use exemplar_core::DocumentLoader;
    use std::path::Path;

    #[test]
    fn test_summarize_models() {
        let content = serde_json::json!({
            "swagger": "2.0",
            "paths": {},
            "definitions": {
                "Animal": {"allOf": [{"$ref": "#/definitions/Base"}]},
                "Base": {"type": "object", "properties": {"id": {"type": "integer", "format": "int64"}}},
                "Mood": {"type": "string", "enum": ["calm", "busy"]},
                "Alias": {"$ref": "#/definitions/Base"}
            }
        })
        .to_string();
        let document = DocumentLoader::new()
            .load_str(&content, Format::Json, Path::new("api.json"))
            .unwrap();

        let kinds: Vec<(String, String)> = summarize(&document)
            .into_iter()
            .map(|summary| (summary.name, summary.kind))
            .collect();
        assert!(kinds.contains(&("Animal".to_string(), "allOf".to_string())));
        assert!(kinds.contains(&("Base".to_string(), "object".to_string())));
        assert!(kinds.contains(&("Mood".to_string(), "enum".to_string())));
        assert!(kinds.contains(&("Alias".to_string(), "$ref Base".to_string())));
    }
}
