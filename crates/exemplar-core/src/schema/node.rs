//! Schema node model
//!
//! A [`SchemaNode`] is one typed declaration of an API data model. The set of
//! kinds is closed ([`SchemaKind`]) so the resolvers can match on it
//! exhaustively. Each node owns a write-once slot for its synthesized example
//! so repeated resolution within a run is memoized.
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::sync::OnceLock;

/// Width of an integer schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegerFormat {
    /// `int32` or no format
    #[default]
    Int32,
    /// `int64`
    Int64,
}

/// Precision of a number schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberFormat {
    /// No format declared
    #[default]
    Unspecified,
    /// `float`
    Float,
    /// `double`
    Double,
}

/// Composition keyword of a composed schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    AllOf,
    AnyOf,
    OneOf,
}

impl Composition {
    /// The JSON Schema keyword for this composition
    pub fn keyword(&self) -> &'static str {
        match self {
            Composition::AllOf => "allOf",
            Composition::AnyOf => "anyOf",
            Composition::OneOf => "oneOf",
        }
    }
}

/// Ordered list of named property schemas
pub type Properties = Vec<(String, SchemaNode)>;

/// The closed set of schema kinds
#[derive(Debug, Clone, Default)]
pub enum SchemaKind {
    Boolean,
    Integer(IntegerFormat),
    Number(NumberFormat),
    /// Plain string; enums are strings with candidate values
    String,
    Date,
    DateTime,
    Uuid,
    Uri,
    /// `binary`, `byte` or a Swagger 2 `file`
    Binary,
    Array {
        items: Option<Box<SchemaNode>>,
    },
    /// Object whose values are described by `additionalProperties`
    Map {
        values: Box<SchemaNode>,
    },
    Object {
        properties: Properties,
    },
    Composed {
        composition: Composition,
        members: Vec<SchemaNode>,
        properties: Properties,
    },
    /// Reference to a registry model by simple name
    Reference(String),
    /// No usable type information
    #[default]
    Any,
}

/// XML naming hints from the schema's `xml` object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlHints {
    pub name: Option<String>,
    pub namespace: Option<String>,
    pub prefix: Option<String>,
    pub attribute: bool,
    pub wrapped: bool,
}

/// One schema declaration plus its memoized example
#[derive(Debug, Clone, Default)]
pub struct SchemaNode {
    /// Declared property name, or model name for registry entries
    pub name: Option<String>,
    pub kind: SchemaKind,
    pub format: Option<String>,
    /// Author-supplied example
    pub example: Option<Value>,
    pub default: Option<Value>,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub max_items: Option<usize>,
    pub enum_values: Vec<Value>,
    pub xml: Option<XmlHints>,
    cached_example: OnceLock<Value>,
}

impl SchemaNode {
    /// Create a node of the given kind with no constraints
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer(IntegerFormat::Int32))
    }

    pub fn long() -> Self {
        Self::new(SchemaKind::Integer(IntegerFormat::Int64)).with_format("int64")
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number(NumberFormat::Unspecified))
    }

    pub fn float() -> Self {
        Self::new(SchemaKind::Number(NumberFormat::Float)).with_format("float")
    }

    pub fn double() -> Self {
        Self::new(SchemaKind::Number(NumberFormat::Double)).with_format("double")
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn date() -> Self {
        Self::new(SchemaKind::Date).with_format("date")
    }

    pub fn date_time() -> Self {
        Self::new(SchemaKind::DateTime).with_format("date-time")
    }

    pub fn uuid() -> Self {
        Self::new(SchemaKind::Uuid).with_format("uuid")
    }

    pub fn uri() -> Self {
        Self::new(SchemaKind::Uri).with_format("uri")
    }

    pub fn binary() -> Self {
        Self::new(SchemaKind::Binary).with_format("binary")
    }

    /// Array of `items`
    pub fn array(items: SchemaNode) -> Self {
        Self::new(SchemaKind::Array {
            items: Some(Box::new(items)),
        })
    }

    /// Map whose values follow `values`
    pub fn map(values: SchemaNode) -> Self {
        Self::new(SchemaKind::Map {
            values: Box::new(values),
        })
    }

    /// Object with the given properties in declaration order. Each property
    /// node takes its key as its declared name.
    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        Self::new(SchemaKind::Object {
            properties: name_properties(properties),
        })
    }

    pub fn all_of(members: Vec<SchemaNode>) -> Self {
        Self::composed(Composition::AllOf, members)
    }

    pub fn any_of(members: Vec<SchemaNode>) -> Self {
        Self::composed(Composition::AnyOf, members)
    }

    pub fn one_of(members: Vec<SchemaNode>) -> Self {
        Self::composed(Composition::OneOf, members)
    }

    fn composed(composition: Composition, members: Vec<SchemaNode>) -> Self {
        Self::new(SchemaKind::Composed {
            composition,
            members,
            properties: Vec::new(),
        })
    }

    /// Reference to a registry model. Accepts a simple name or a full
    /// `#/components/schemas/Name` pointer.
    pub fn reference(target: &str) -> Self {
        Self::new(SchemaKind::Reference(simple_ref(target).to_string()))
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_example(mut self, example: Value) -> Self {
        self.example = Some(example);
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_minimum(mut self, minimum: f64) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn with_maximum(mut self, maximum: f64) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    pub fn with_enum(mut self, values: Vec<Value>) -> Self {
        self.enum_values = values;
        self
    }

    pub fn with_xml(mut self, xml: XmlHints) -> Self {
        self.xml = Some(xml);
        self
    }

    /// Attach own properties to an object or composed node. Other kinds are
    /// left unchanged.
    pub fn with_properties<I, K>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = (K, SchemaNode)>,
        K: Into<String>,
    {
        match &mut self.kind {
            SchemaKind::Object { properties } | SchemaKind::Composed { properties, .. } => {
                properties.extend(name_properties(extra));
            }
            _ => {}
        }
        self
    }

    /// Own declared properties (empty for non-structured kinds)
    pub fn properties(&self) -> &[(String, SchemaNode)] {
        match &self.kind {
            SchemaKind::Object { properties } | SchemaKind::Composed { properties, .. } => {
                properties
            }
            _ => &[],
        }
    }

    pub fn has_properties(&self) -> bool {
        !self.properties().is_empty()
    }

    /// Composition members (empty unless composed)
    pub fn members(&self) -> &[SchemaNode] {
        match &self.kind {
            SchemaKind::Composed { members, .. } => members,
            _ => &[],
        }
    }

    pub fn composition(&self) -> Option<Composition> {
        match &self.kind {
            SchemaKind::Composed { composition, .. } => Some(*composition),
            _ => None,
        }
    }

    pub fn is_all_of(&self) -> bool {
        self.composition() == Some(Composition::AllOf)
    }

    /// Simple name of the referenced model, if this node is a reference
    pub fn reference_name(&self) -> Option<&str> {
        match &self.kind {
            SchemaKind::Reference(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self.kind, SchemaKind::Array { .. })
    }

    pub fn is_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }

    /// Example memoized by a previous resolution
    pub fn cached_example(&self) -> Option<&Value> {
        self.cached_example.get()
    }

    /// Author example if present, else the memoized one
    pub fn current_example(&self) -> Option<&Value> {
        self.example.as_ref().or_else(|| self.cached_example())
    }

    /// Memoize `value` unless an example was already cached, returning the
    /// value that is stored on the node
    pub fn cache_example(&self, value: Value) -> &Value {
        self.cached_example.get_or_init(|| value)
    }

    /// Drop memoized examples on this node and all of its children
    pub fn clear_example_cache(&mut self) {
        self.cached_example.take();
        match &mut self.kind {
            SchemaKind::Array { items: Some(items) } => items.clear_example_cache(),
            SchemaKind::Map { values } => values.clear_example_cache(),
            SchemaKind::Object { properties } => {
                properties.iter_mut().for_each(|(_, p)| p.clear_example_cache())
            }
            SchemaKind::Composed {
                members,
                properties,
                ..
            } => {
                members.iter_mut().for_each(SchemaNode::clear_example_cache);
                properties.iter_mut().for_each(|(_, p)| p.clear_example_cache());
            }
            _ => {}
        }
    }
}

fn name_properties<I, K>(properties: I) -> Properties
where
    I: IntoIterator<Item = (K, SchemaNode)>,
    K: Into<String>,
{
    properties
        .into_iter()
        .map(|(key, node)| {
            let key = key.into();
            let node = if node.name.is_none() {
                node.with_name(key.clone())
            } else {
                node
            };
            (key, node)
        })
        .collect()
}

/// Last segment of a `$ref` pointer (`#/components/schemas/Pet` -> `Pet`)
pub fn simple_ref(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}
