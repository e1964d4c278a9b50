//! Schema graph consumed by the synthesizer
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

pub mod node;
pub mod registry;

pub use node::{
    simple_ref, Composition, IntegerFormat, NumberFormat, Properties, SchemaKind, SchemaNode,
    XmlHints,
};
pub use registry::{ModelRegistry, SchemaRegistry};
