//! Example synthesis
//!
//! [`ExampleGenerator`] walks a schema graph and produces one deterministic
//! example value per schema. The property resolver handles a single node by
//! kind; the model resolver handles named models, cycles and memoization.
//! Rendering per media type lives in [`crate::render`].
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

pub mod context;
pub mod model;
pub mod property;
pub mod sampler;

pub use context::TraversalContext;
pub use sampler::{scale_unit, FixedSampler, Sampler, SeededSampler, DEFAULT_SEED};

use crate::render::xml::{XmlEncoder, XmlExampleEncoder};
use crate::render::MIME_TYPE_JSON;
use crate::schema::SchemaRegistry;
use serde::{Deserialize, Serialize};

/// Tunables for an [`ExampleGenerator`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesizerConfig {
    /// Seed for the default sampler
    pub seed: u64,
    /// Media types used when a caller supplies none
    pub default_media_types: Vec<String>,
}

impl Default for SynthesizerConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            default_media_types: vec![MIME_TYPE_JSON.to_string()],
        }
    }
}

/// Synthesizes and renders examples for schemas of one registry
pub struct ExampleGenerator<'r, S = SeededSampler> {
    pub(crate) registry: &'r dyn SchemaRegistry,
    pub(crate) sampler: S,
    pub(crate) xml_encoder: Box<dyn XmlEncoder + 'r>,
    pub(crate) config: SynthesizerConfig,
}

impl<'r> ExampleGenerator<'r, SeededSampler> {
    /// Generator with the default seed and the built-in XML encoder
    pub fn new(registry: &'r dyn SchemaRegistry) -> Self {
        Self::with_config(registry, SynthesizerConfig::default())
    }

    pub fn with_config(registry: &'r dyn SchemaRegistry, config: SynthesizerConfig) -> Self {
        Self {
            registry,
            sampler: SeededSampler::with_seed(config.seed),
            xml_encoder: Box::new(XmlExampleEncoder::new()),
            config,
        }
    }
}

impl<'r, S: Sampler> ExampleGenerator<'r, S> {
    /// Replace the numeric sampler
    pub fn with_sampler<T: Sampler>(self, sampler: T) -> ExampleGenerator<'r, T> {
        ExampleGenerator {
            registry: self.registry,
            sampler,
            xml_encoder: self.xml_encoder,
            config: self.config,
        }
    }

    /// Replace the XML encoder
    pub fn with_xml_encoder(mut self, encoder: impl XmlEncoder + 'r) -> Self {
        self.xml_encoder = Box::new(encoder);
        self
    }

    pub fn registry(&self) -> &'r dyn SchemaRegistry {
        self.registry
    }

    pub fn config(&self) -> &SynthesizerConfig {
        &self.config
    }
}
