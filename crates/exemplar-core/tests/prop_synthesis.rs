//! Property-based tests for example synthesis
//!
//! These tests check the array length policy and seed reproducibility over
//! generated schemas.

use exemplar_core::synthesis::TraversalContext;
use exemplar_core::{ExampleGenerator, ModelRegistry, SchemaNode, SynthesizerConfig};
use proptest::prelude::*;

/// Strategy for primitive item schemas
fn primitive_schema_strategy() -> impl Strategy<Value = SchemaNode> {
    prop_oneof![
        Just(SchemaNode::boolean()),
        Just(SchemaNode::integer()),
        Just(SchemaNode::long()),
        Just(SchemaNode::float()),
        Just(SchemaNode::double()),
        Just(SchemaNode::string()),
        Just(SchemaNode::date()),
        Just(SchemaNode::uuid()),
    ]
}

proptest! {
    #[test]
    fn prop_array_length_never_exceeds_cap(
        item in primitive_schema_strategy(),
        max_items in proptest::option::of(0usize..10_000),
    ) {
        let registry = ModelRegistry::new();
        let mut generator = ExampleGenerator::new(&registry);
        let mut ctx = TraversalContext::new();

        let mut schema = SchemaNode::array(item);
        schema.max_items = max_items;
        let value = generator
            .resolve_property("values", "application/json", Some(&schema), &mut ctx)
            .unwrap();
        let items = value.as_array().unwrap();

        let expected = max_items.unwrap_or(2).min(5);
        prop_assert_eq!(items.len(), expected);
        prop_assert!(items.windows(2).all(|pair| pair[0] == pair[1]));
    }

    #[test]
    fn prop_same_seed_same_example(
        seed in any::<u64>(),
        minimum in -100i32..100,
        width in 1i32..100,
    ) {
        let build = || {
            let mut registry = ModelRegistry::new();
            registry.insert(
                "Measurement",
                SchemaNode::object([
                    (
                        "reading",
                        SchemaNode::double()
                            .with_minimum(f64::from(minimum))
                            .with_maximum(f64::from(minimum + width)),
                    ),
                    ("count", SchemaNode::long()),
                ]),
            );
            registry
        };
        let config = SynthesizerConfig { seed, ..SynthesizerConfig::default() };

        let first_registry = build();
        let second_registry = build();
        let first = ExampleGenerator::with_config(&first_registry, config.clone())
            .generate_for_model(None, None, "Measurement");
        let second = ExampleGenerator::with_config(&second_registry, config)
            .generate_for_model(None, None, "Measurement");

        prop_assert_eq!(first, second);
    }
}
