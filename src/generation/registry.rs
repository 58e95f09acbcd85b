//! Definition registry and type mapper
//!
//! The registry is built once from `definitions` before any operation is synthesized and
//! is read-only afterwards, so forward and circular references resolve by name without
//! recursion into other definitions.

use indexmap::IndexMap;
use std::collections::{BTreeMap, HashSet};

use crate::generation::utils::type_name_for_definition;
use crate::generation::{
    ArrayRepresentation, DEFINITIONS_PREFIX, Documentation, Field, NamedType, Parameter,
    QualifiedName, Schema, SchemaType, TargetType,
};

/// A registered definition
#[derive(Debug, Clone)]
pub struct Definition<'d> {
    pub name: QualifiedName,
    pub schema: &'d Schema,
}

/// Lookup table from `$ref` string to generated type
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry<'d> {
    types: BTreeMap<String, Definition<'d>>,
}

/// Registers every entry of `definitions` as a type nested in `owner`.
///
/// Keys are processed in sorted order; when two keys sanitize to the same identifier
/// the later one receives a numeric suffix.
pub fn build_registry<'d>(
    definitions: &'d IndexMap<String, Schema>,
    owner: &QualifiedName,
) -> DefinitionRegistry<'d> {
    let sorted: BTreeMap<&String, &Schema> = definitions.iter().collect();
    let mut taken: HashSet<String> = HashSet::new();
    let mut types = BTreeMap::new();

    for (key, schema) in sorted {
        let base = type_name_for_definition(key);
        let mut name = base.clone();
        let mut suffix = 2;
        while !taken.insert(name.clone()) {
            name = format!("{base}_{suffix}");
            suffix += 1;
        }
        if name != base {
            tracing::debug!(definition = %key, name = %name, "Renamed colliding definition");
        }

        types.insert(
            format!("{DEFINITIONS_PREFIX}{key}"),
            Definition {
                name: owner.nested(name),
                schema,
            },
        );
    }

    DefinitionRegistry { types }
}

impl<'d> DefinitionRegistry<'d> {
    /// Definition registered for `reference`
    pub fn get(&self, reference: &str) -> Option<&Definition<'d>> {
        self.types.get(reference)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered definitions, sorted by `$ref`
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Definition<'d>)> {
        self.types.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Type mapper reading from this registry
    pub fn mapper(&self) -> TypeMapper<'_, 'd> {
        TypeMapper { registry: self }
    }

    /// Named types for every definition, sorted by `$ref`
    pub fn named_types(&self) -> Vec<NamedType> {
        let mapper = self.mapper();
        self.iter()
            .map(|(reference, definition)| mapper.named_type(reference, definition))
            .collect()
    }
}

/// Maps schemas and parameters to target types
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'r, 'd> {
    registry: &'r DefinitionRegistry<'d>,
}

impl TypeMapper<'_, '_> {
    /// Target type of `schema`, wrapping arrays with `arrays`.
    ///
    /// Never fails: an absent schema or an unknown `$ref` maps to the opaque type.
    pub fn resolve_type(&self, schema: Option<&Schema>, arrays: ArrayRepresentation) -> TargetType {
        let Some(schema) = schema else {
            return TargetType::Opaque;
        };

        if let Some(reference) = schema.reference() {
            return match self.registry.get(reference) {
                Some(definition) => TargetType::Named(definition.name.clone()),
                None => {
                    tracing::debug!(reference = %reference, "Unknown schema reference, using opaque type");
                    TargetType::Opaque
                }
            };
        }

        match &schema.schema_type {
            SchemaType::Empty => TargetType::Void,
            SchemaType::String => TargetType::String,
            SchemaType::Integer | SchemaType::Number => TargetType::Number,
            SchemaType::Boolean => TargetType::Boolean,
            SchemaType::Array => arrays.wrap(self.resolve_field_type(schema.items.as_deref())),
            SchemaType::Object | SchemaType::File | SchemaType::Unknown(_) => TargetType::Opaque,
        }
    }

    /// Target type for a field of a named type (native arrays)
    pub fn resolve_field_type(&self, schema: Option<&Schema>) -> TargetType {
        self.resolve_type(schema, ArrayRepresentation::NativeArray)
    }

    /// Target type of an operation parameter (sequences)
    pub fn resolve_parameter_type(&self, parameter: &Parameter) -> TargetType {
        match &parameter.schema {
            Some(schema) => self.resolve_type(Some(schema), ArrayRepresentation::Sequence),
            None => self.resolve_type(Some(&parameter.schema_view()), ArrayRepresentation::Sequence),
        }
    }

    fn named_type(&self, reference: &str, definition: &Definition<'_>) -> NamedType {
        let schema = definition.schema;
        let fields = schema
            .properties
            .iter()
            .map(|(name, property)| Field {
                name: name.clone(),
                target_type: self.resolve_field_type(Some(property)),
                required: schema.is_required(name),
                documentation: Documentation::for_schema(property, name),
            })
            .collect();

        NamedType {
            reference: reference.to_string(),
            name: definition.name.clone(),
            documentation: Documentation::for_schema(schema, &definition.name.name),
            fields,
        }
    }
}
