//! XML example encoding
//!
//! The synthesizer hands a schema to an [`XmlEncoder`] for every XML media
//! type. [`XmlExampleEncoder`] writes a small XML document with `quick-xml`
//! using fixed stand-in values for primitives.
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

use crate::schema::{Composition, SchemaKind, SchemaNode, SchemaRegistry};
use crate::synthesis::property::{EXAMPLE_DATE, EXAMPLE_URI, EXAMPLE_UUID};
use crate::synthesis::TraversalContext;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;
use std::error::Error;
use std::io::{Cursor, Write};

pub const XML_BOOLEAN: &str = "true";
pub const XML_INTEGER: &str = "123";
pub const XML_NUMBER: &str = "1.3579";
pub const XML_STRING: &str = "aeiou";
pub const XML_DATE_TIME: &str = "2000-01-23T04:56:07.000Z";

const XML_ARRAY_LENGTH: usize = 2;
const DEFAULT_ELEMENT: &str = "element";
const MAP_KEY_ELEMENT: &str = "key";

type WriteResult<T = ()> = Result<T, Box<dyn Error>>;

/// Turns a schema into an XML example document
pub trait XmlEncoder {
    /// Encode `schema`, resolving references through `registry`. `None` when
    /// there is nothing to encode.
    fn encode(&self, schema: Option<&SchemaNode>, registry: &dyn SchemaRegistry) -> Option<String>;
}

/// `quick-xml` backed encoder
#[derive(Debug, Clone)]
pub struct XmlExampleEncoder {
    indent: usize,
}

impl XmlExampleEncoder {
    pub fn new() -> Self {
        Self { indent: 2 }
    }

    /// Spaces per nesting level
    pub fn with_indent(indent: usize) -> Self {
        Self { indent }
    }

    fn write_document(&self, schema: &SchemaNode, registry: &dyn SchemaRegistry) -> WriteResult<String> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', self.indent);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let root = root_element_name(schema);
        let mut walk = XmlWalk {
            registry,
            ctx: TraversalContext::new(),
        };
        // A registry model rendered directly is already open at the root
        let model_name = schema
            .name
            .as_deref()
            .filter(|name| registry.lookup(name).is_some());
        if let Some(name) = model_name {
            walk.ctx.enter(name);
        }
        walk.write_node(&mut writer, &root, schema)?;

        let bytes = writer.into_inner().into_inner();
        Ok(String::from_utf8(bytes)?)
    }
}

impl Default for XmlExampleEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlEncoder for XmlExampleEncoder {
    fn encode(&self, schema: Option<&SchemaNode>, registry: &dyn SchemaRegistry) -> Option<String> {
        let schema = schema?;
        match self.write_document(schema, registry) {
            Ok(xml) => Some(xml),
            Err(err) => {
                log::warn!("Failed to encode XML example: {}", err);
                None
            }
        }
    }
}

struct XmlWalk<'a> {
    registry: &'a dyn SchemaRegistry,
    ctx: TraversalContext,
}

impl<'a> XmlWalk<'a> {
    fn write_node<W: Write>(&mut self, writer: &mut Writer<W>, tag: &str, schema: &SchemaNode) -> WriteResult {
        match &schema.kind {
            SchemaKind::Reference(target) => {
                let registry = self.registry;
                let Some(model) = registry.lookup(target) else {
                    log::warn!("XML reference '{}' does not resolve to a known model", target);
                    return Ok(());
                };
                // A model already open further up is cut here
                if !self.ctx.enter(target) {
                    return Ok(());
                }
                let result = self.write_node(writer, tag, model);
                self.ctx.leave(target);
                result
            }
            SchemaKind::Array { items } => {
                let Some(items) = items.as_deref() else {
                    return Ok(());
                };
                let count = schema
                    .max_items
                    .unwrap_or(XML_ARRAY_LENGTH)
                    .min(XML_ARRAY_LENGTH);
                let wrapped = schema.xml.as_ref().is_some_and(|xml| xml.wrapped);
                if wrapped {
                    let item_tag = element_name(items).unwrap_or_else(|| tag.to_string());
                    writer.write_event(Event::Start(start_element(tag, schema)))?;
                    for _ in 0..count {
                        self.write_node(writer, &item_tag, items)?;
                    }
                    writer.write_event(Event::End(BytesEnd::new(qualified(tag, schema))))?;
                } else {
                    let item_tag = items
                        .xml
                        .as_ref()
                        .and_then(|xml| xml.name.clone())
                        .unwrap_or_else(|| tag.to_string());
                    for _ in 0..count {
                        self.write_node(writer, &item_tag, items)?;
                    }
                }
                Ok(())
            }
            SchemaKind::Map { values } => {
                writer.write_event(Event::Start(start_element(tag, schema)))?;
                self.write_node(writer, MAP_KEY_ELEMENT, values)?;
                writer.write_event(Event::End(BytesEnd::new(qualified(tag, schema))))?;
                Ok(())
            }
            SchemaKind::Composed {
                composition: Composition::AnyOf | Composition::OneOf,
                properties,
                members,
            } if properties.is_empty() => {
                let registry = self.registry;
                let branch = members.iter().find(|member| {
                    member
                        .reference_name()
                        .map_or(true, |target| registry.lookup(target).is_some())
                });
                match branch {
                    Some(branch) => self.write_node(writer, tag, branch),
                    None => Ok(()),
                }
            }
            SchemaKind::Object { .. } | SchemaKind::Composed { .. } => {
                self.write_structure(writer, tag, schema)
            }
            SchemaKind::Any => {
                writer.write_event(Event::Empty(start_element(tag, schema)))?;
                Ok(())
            }
            _ => {
                let text = primitive_text(schema).unwrap_or_default();
                writer.write_event(Event::Start(start_element(tag, schema)))?;
                writer.write_event(Event::Text(BytesText::new(&text)))?;
                writer.write_event(Event::End(BytesEnd::new(qualified(tag, schema))))?;
                Ok(())
            }
        }
    }

    fn write_structure<W: Write>(&mut self, writer: &mut Writer<W>, tag: &str, schema: &SchemaNode) -> WriteResult {
        let mut properties: Vec<(String, SchemaNode)> = Vec::new();
        self.collect_properties(schema, &mut properties);

        let mut start = start_element(tag, schema);
        let mut children = Vec::new();
        for (key, property) in &properties {
            let is_attribute = property.xml.as_ref().is_some_and(|xml| xml.attribute);
            match primitive_text(property) {
                Some(text) if is_attribute => {
                    let name = element_name(property).unwrap_or_else(|| key.clone());
                    start.push_attribute((name.as_str(), text.as_str()));
                }
                _ => children.push((key, property)),
            }
        }

        if children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for (key, property) in children {
            let child_tag = property
                .xml
                .as_ref()
                .and_then(|xml| xml.name.clone())
                .unwrap_or_else(|| key.clone());
            self.write_node(writer, &child_tag, property)?;
        }
        writer.write_event(Event::End(BytesEnd::new(qualified(tag, schema))))?;
        Ok(())
    }

    /// Own properties plus those of every `allOf` branch. A later
    /// declaration of a key replaces the earlier one in place.
    fn collect_properties(&mut self, schema: &SchemaNode, out: &mut Vec<(String, SchemaNode)>) {
        for (key, property) in schema.properties() {
            match out.iter_mut().find(|(existing, _)| existing == key) {
                Some(slot) => slot.1 = property.clone(),
                None => out.push((key.clone(), property.clone())),
            }
        }
        if !schema.is_all_of() {
            return;
        }
        for member in schema.members() {
            match member.reference_name() {
                Some(target) => {
                    let registry = self.registry;
                    if let Some(model) = registry.lookup(target) {
                        if self.ctx.enter(target) {
                            self.collect_properties(model, out);
                            self.ctx.leave(target);
                        }
                    }
                }
                None => self.collect_properties(member, out),
            }
        }
    }
}

/// Element name for a document root
fn root_element_name(schema: &SchemaNode) -> String {
    element_name(schema)
        .or_else(|| schema.reference_name().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_ELEMENT.to_string())
}

fn element_name(schema: &SchemaNode) -> Option<String> {
    schema
        .xml
        .as_ref()
        .and_then(|xml| xml.name.clone())
        .or_else(|| schema.name.clone())
}

fn start_element(tag: &str, schema: &SchemaNode) -> BytesStart<'static> {
    let mut start = BytesStart::new(qualified(tag, schema));
    if let Some(xml) = &schema.xml {
        if let Some(namespace) = &xml.namespace {
            let key = match &xml.prefix {
                Some(prefix) => format!("xmlns:{}", prefix),
                None => "xmlns".to_string(),
            };
            start.push_attribute((key.as_str(), namespace.as_str()));
        }
    }
    start
}

/// `prefix:tag` when the schema declares an XML prefix
fn qualified(tag: &str, schema: &SchemaNode) -> String {
    match schema.xml.as_ref().and_then(|xml| xml.prefix.as_deref()) {
        Some(prefix) => format!("{}:{}", prefix, tag),
        None => tag.to_string(),
    }
}

/// Text for a primitive node, `None` for structured kinds
fn primitive_text(schema: &SchemaNode) -> Option<String> {
    let stand_in = match &schema.kind {
        SchemaKind::Boolean => XML_BOOLEAN,
        SchemaKind::Integer(_) => XML_INTEGER,
        SchemaKind::Number(_) => XML_NUMBER,
        SchemaKind::String => match schema.enum_values.first() {
            Some(Value::String(first)) => first.as_str(),
            _ => XML_STRING,
        },
        SchemaKind::Date => EXAMPLE_DATE,
        SchemaKind::DateTime => XML_DATE_TIME,
        SchemaKind::Uuid => EXAMPLE_UUID,
        SchemaKind::Uri => EXAMPLE_URI,
        SchemaKind::Binary => "",
        _ => return None,
    };
    match &schema.example {
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Bool(_)) | Some(Value::Number(_)) => schema.example.as_ref().map(Value::to_string),
        _ => Some(stand_in.to_string()),
    }
}
