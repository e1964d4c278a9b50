//! Model resolver: named models, composition and cycle handling
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

use super::{ExampleGenerator, Sampler, TraversalContext};
use crate::schema::{Composition, SchemaNode};
use serde_json::{Map, Value};

impl<'r, S: Sampler> ExampleGenerator<'r, S> {
    /// Resolve the registry model `name` whose schema is `schema`.
    ///
    /// When `name` is already being resolved further up the stack, the
    /// model's current example is returned instead of recursing. It is
    /// absent until the outer resolution finishes.
    pub fn resolve_model(
        &mut self,
        name: &str,
        media_type: &str,
        schema: &SchemaNode,
        ctx: &mut TraversalContext,
    ) -> Option<Value> {
        if !ctx.enter(name) {
            log::debug!("Model '{}' is already being resolved, reusing its current example", name);
            return schema.current_example().cloned();
        }
        let resolved = self.resolve_structure(name, media_type, schema, ctx);
        ctx.leave(name);
        resolved
    }

    /// Structural rules shared by registry models and inline object or
    /// composed nodes. The result is memoized on `schema`.
    pub(crate) fn resolve_structure(
        &mut self,
        name: &str,
        media_type: &str,
        schema: &SchemaNode,
        ctx: &mut TraversalContext,
    ) -> Option<Value> {
        if let Some(example) = schema.current_example() {
            return Some(example.clone());
        }

        if schema.has_properties() || schema.is_all_of() {
            let mut values = Map::new();
            self.merge_structure(name, media_type, schema, &mut values, ctx);
            return Some(schema.cache_example(Value::Object(values)).clone());
        }

        if let Some(composition @ (Composition::AnyOf | Composition::OneOf)) = schema.composition() {
            let registry = self.registry;
            let branch = schema.members().iter().find(|member| {
                member
                    .reference_name()
                    .map_or(true, |target| registry.lookup(target).is_some())
            });
            let Some(branch) = branch else {
                log::debug!("No {} branch of '{}' resolves", composition.keyword(), name);
                return None;
            };
            let resolved = self.resolve_property(name, media_type, Some(branch), ctx)?;
            return Some(schema.cache_example(resolved).clone());
        }

        if schema.is_array() || schema.is_enum() {
            let property_name = schema.name.as_deref().unwrap_or(name);
            return self.resolve_property(property_name, media_type, Some(schema), ctx);
        }

        log::warn!("Model '{}' has no resolvable structure", name);
        None
    }

    /// Resolve the own properties of `schema` into `values`, then every
    /// `allOf` branch. A later declaration of a key replaces the earlier
    /// value but keeps its position.
    fn merge_structure(
        &mut self,
        owner: &str,
        media_type: &str,
        schema: &SchemaNode,
        values: &mut Map<String, Value>,
        ctx: &mut TraversalContext,
    ) {
        for (key, property) in schema.properties() {
            let value = self
                .resolve_property(key, media_type, Some(property), ctx)
                .unwrap_or(Value::Null);
            values.insert(key.clone(), value);
        }

        if schema.is_all_of() {
            for member in schema.members() {
                self.merge_branch(owner, media_type, member, values, ctx);
            }
        }
    }

    fn merge_branch(
        &mut self,
        owner: &str,
        media_type: &str,
        member: &SchemaNode,
        values: &mut Map<String, Value>,
        ctx: &mut TraversalContext,
    ) {
        let Some(target) = member.reference_name() else {
            self.merge_structure(owner, media_type, member, values, ctx);
            return;
        };

        let registry = self.registry;
        let Some(model) = registry.lookup(target) else {
            log::warn!("allOf branch '{}' of '{}' does not resolve to a known model", target, owner);
            return;
        };
        if !ctx.enter(target) {
            log::debug!("Skipping allOf branch '{}' of '{}', already being resolved", target, owner);
            return;
        }
        self.merge_structure(target, media_type, model, values, ctx);
        ctx.leave(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ModelRegistry;
    use crate::synthesis::FixedSampler;
    use serde_json::json;

    fn resolve_named(registry: &ModelRegistry, name: &str) -> Option<Value> {
        let mut generator = ExampleGenerator::new(registry).with_sampler(FixedSampler::new(vec![0.5]));
        let mut ctx = TraversalContext::new();
        let schema = registry.get(name)?;
        let value = generator.resolve_model(name, "application/json", schema, &mut ctx);
        assert_eq!(ctx.depth(), 0);
        value
    }

    #[test]
    fn test_object_model() {
        let mut registry = ModelRegistry::new();
        registry.insert(
            "Pet",
            SchemaNode::object([
                ("petName", SchemaNode::string()),
                ("vaccinated", SchemaNode::boolean()),
                ("born", SchemaNode::date()),
            ]),
        );

        let value = resolve_named(&registry, "Pet").unwrap();
        assert_eq!(
            value,
            json!({"petName": "petName", "vaccinated": true, "born": "2000-01-23"})
        );
        assert_eq!(registry.get("Pet").unwrap().cached_example(), Some(&value));
    }

    #[test]
    fn test_self_reference_terminates() {
        let mut registry = ModelRegistry::new();
        registry.insert(
            "Node",
            SchemaNode::object([
                ("label", SchemaNode::string()),
                ("parent", SchemaNode::reference("#/components/schemas/Node")),
                ("children", SchemaNode::array(SchemaNode::reference("Node"))),
            ]),
        );

        let value = resolve_named(&registry, "Node").unwrap();
        assert_eq!(
            value,
            json!({"label": "label", "parent": null, "children": [null, null]})
        );
    }

    #[test]
    fn test_cycle_guard_returns_cached_example() {
        let mut registry = ModelRegistry::new();
        registry.insert("Loop", SchemaNode::object([("next", SchemaNode::reference("Loop"))]));
        let schema = registry.get("Loop").unwrap();
        schema.cache_example(json!({"next": "cached"}));

        let mut generator = ExampleGenerator::new(&registry);
        let mut ctx = TraversalContext::new();
        ctx.enter("Loop");
        assert_eq!(
            generator.resolve_model("Loop", "application/json", schema, &mut ctx),
            Some(json!({"next": "cached"}))
        );
    }

    #[test]
    fn test_all_of_merges_branches() {
        let mut registry = ModelRegistry::new();
        registry.insert("Named", SchemaNode::object([("name", SchemaNode::string())]));
        registry.insert(
            "Dog",
            SchemaNode::all_of(vec![
                SchemaNode::reference("Named"),
                SchemaNode::object([("barks", SchemaNode::boolean())]),
            ])
            .with_properties([("id", SchemaNode::integer())]),
        );

        let value = resolve_named(&registry, "Dog").unwrap();
        assert_eq!(value, json!({"id": 5, "name": "name", "barks": true}));
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["id", "name", "barks"]);
    }

    #[test]
    fn test_all_of_later_branch_overrides_property() {
        let mut registry = ModelRegistry::new();
        registry.insert(
            "Base",
            SchemaNode::object([("status", SchemaNode::string()), ("id", SchemaNode::integer())]),
        );
        registry.insert(
            "Approved",
            SchemaNode::all_of(vec![
                SchemaNode::reference("Base"),
                SchemaNode::object([(
                    "status",
                    SchemaNode::string().with_enum(vec![json!("approved")]),
                )]),
            ]),
        );

        let value = resolve_named(&registry, "Approved").unwrap();
        assert_eq!(value, json!({"status": "approved", "id": 5}));
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["status", "id"]);
    }

    #[test]
    fn test_all_of_skips_missing_branch() {
        let mut registry = ModelRegistry::new();
        registry.insert(
            "Partial",
            SchemaNode::all_of(vec![
                SchemaNode::reference("Ghost"),
                SchemaNode::object([("kept", SchemaNode::string())]),
            ]),
        );
        assert_eq!(resolve_named(&registry, "Partial"), Some(json!({"kept": "kept"})));
    }

    #[test]
    fn test_any_of_picks_first_resolvable_branch() {
        let mut registry = ModelRegistry::new();
        registry.insert("Cat", SchemaNode::object([("meows", SchemaNode::boolean())]));
        registry.insert(
            "Pet",
            SchemaNode::one_of(vec![SchemaNode::reference("Ghost"), SchemaNode::reference("Cat")]),
        );
        registry.insert("Broken", SchemaNode::any_of(vec![SchemaNode::reference("Ghost")]));
        registry.insert("Inline", SchemaNode::any_of(vec![SchemaNode::string(), SchemaNode::reference("Cat")]));

        assert_eq!(resolve_named(&registry, "Pet"), Some(json!({"meows": true})));
        assert_eq!(resolve_named(&registry, "Broken"), None);
        assert_eq!(resolve_named(&registry, "Inline"), Some(json!("Inline")));
    }

    #[test]
    fn test_array_and_enum_models() {
        let mut registry = ModelRegistry::new();
        registry.insert("Tags", SchemaNode::array(SchemaNode::string()).with_max_items(3));
        registry.insert(
            "Status",
            SchemaNode::string().with_enum(vec![json!("placed"), json!("approved")]),
        );

        assert_eq!(resolve_named(&registry, "Tags"), Some(json!(["Tags", "Tags", "Tags"])));
        assert_eq!(resolve_named(&registry, "Status"), Some(json!("placed")));
    }

    #[test]
    fn test_model_without_structure() {
        let mut registry = ModelRegistry::new();
        registry.insert("Opaque", SchemaNode::string());
        assert_eq!(resolve_named(&registry, "Opaque"), None);
    }

    #[test]
    fn test_author_example_on_model() {
        let mut registry = ModelRegistry::new();
        registry.insert(
            "Order",
            SchemaNode::object([("id", SchemaNode::long())]).with_example(json!({"id": 10})),
        );
        assert_eq!(resolve_named(&registry, "Order"), Some(json!({"id": 10})));
    }
}
