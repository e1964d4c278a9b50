//! Exemplar Core - example payload synthesis for API schemas
//!
//! This crate produces representative, reproducible example payloads for
//! OpenAPI and JSON-Schema style models that carry no author example, and
//! renders them per media type.
//!
//! ## Main Components
//!
//! - **Schema Graph**: typed schema nodes and a registry of named models
//! - **Synthesis**: seeded sampling, property and model resolution with cycle
//!   handling and per-node memoization
//! - **Rendering**: JSON pretty-printing, XML encoding with `quick-xml`, and
//!   the output record format
//! - **Loading**: OpenAPI 3 and Swagger 2 documents from YAML or JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use exemplar_core::{ExampleGenerator, ModelRegistry, SchemaNode};
//!
//! let mut registry = ModelRegistry::new();
//! registry.insert(
//!     "Pet",
//!     SchemaNode::object([
//!         ("petName", SchemaNode::string()),
//!         ("vaccinated", SchemaNode::boolean()),
//!     ]),
//! );
//!
//! let mut generator = ExampleGenerator::new(&registry);
//! let records = generator.generate_for_model(None, None, "Pet");
//! assert_eq!(records[0].content_type(), Some("application/json"));
//! ```
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

pub mod loader;
pub mod render;
pub mod schema;
pub mod synthesis;

// Re-export commonly used types for convenience
pub use loader::{
    load_document, ApiDocument, DocumentLoader, LoaderConfig, LoaderError, LoaderResult,
    ResponseExample,
};
pub use render::{
    ExampleRecord, GeneratedContentType, MediaFamily, RenderedExample, MIME_TYPE_JSON,
    MIME_TYPE_XML,
};
pub use render::xml::{XmlEncoder, XmlExampleEncoder};
pub use schema::{
    Composition, IntegerFormat, ModelRegistry, NumberFormat, SchemaKind, SchemaNode,
    SchemaRegistry, XmlHints,
};
pub use synthesis::{
    ExampleGenerator, FixedSampler, Sampler, SeededSampler, SynthesizerConfig, TraversalContext,
    DEFAULT_SEED,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
