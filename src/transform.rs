//! Read/write mode schema rewrites.
//!
//! All functions take the source node by reference and return a new node;
//! nothing is rewritten in place.
//!
//! - Nullable properties (`nullable: true` or `x-nullable: true`) become
//!   `{oneOf: [{type: null}, <property>]}`.
//! - In read mode `required` is recomputed as the non-nullable properties.
//!   The declared `required` list is not consulted.
//! - In write mode `required` is emptied.
//! - Members of `allOf`/`oneOf`/`anyOf` are transformed the same way and lose
//!   their `title`, so inlined fragments do not produce named types.
//!
//! Running a transform on its own output changes nothing.

use indexmap::IndexMap;

use crate::config::Mode;
use crate::schema::Schema;

/// Applies the mode rewrite to every definition, keeping order.
pub fn transform_definitions(
    definitions: &IndexMap<String, Schema>,
    mode: Mode,
) -> IndexMap<String, Schema> {
    definitions
        .iter()
        .map(|(name, schema)| (name.clone(), transform(schema, mode)))
        .collect()
}

/// Rewrites one schema node and everything below it.
///
/// Only `properties` and the composition keywords are followed. Schemas under
/// `items` or `additionalProperties` keep their declared `required` list.
pub fn transform(schema: &Schema, mode: Mode) -> Schema {
    let mut result = schema.clone();

    if let Some(properties) = &schema.properties {
        result.required = Some(match mode {
            Mode::Read => properties
                .iter()
                .filter(|(_, property)| !property.is_nullable())
                .map(|(name, _)| name.clone())
                .collect(),
            Mode::Write => vec![],
        });
        result.properties = Some(
            properties
                .iter()
                .map(|(name, property)| (name.clone(), transform_property(property, mode)))
                .collect(),
        );
    }

    result.all_of = transform_members(&schema.all_of, mode);
    result.one_of = transform_members(&schema.one_of, mode);
    result.any_of = transform_members(&schema.any_of, mode);

    result
}

fn transform_property(property: &Schema, mode: Mode) -> Schema {
    if !property.declares_nullable() {
        return transform(property, mode);
    }
    let mut inner = property.clone();
    inner.nullable = None;
    inner.x_nullable = None;
    if inner.is_null_union() {
        return transform(&inner, mode);
    }
    Schema::null_union(transform_fragment(&inner, mode))
}

fn transform_members(members: &Option<Vec<Schema>>, mode: Mode) -> Option<Vec<Schema>> {
    members.as_ref().map(|members| {
        members
            .iter()
            .map(|member| transform_fragment(member, mode))
            .collect()
    })
}

fn transform_fragment(fragment: &Schema, mode: Mode) -> Schema {
    let mut result = transform(fragment, mode);
    result.title = None;
    result
}
