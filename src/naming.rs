//! Type naming convention and definition renaming.
//!
//! Every definition id is turned into `<UpperCamelCase>Dto[Read|Write]`, and
//! every `$ref` pointing at it is rewritten to the new name.

use std::collections::HashMap;

use heck::ToUpperCamelCase;
use indexmap::IndexMap;
use serde_json::Value;
use tracing::debug;

use crate::error::{DtoGenError, Result};
use crate::schema::Schema;

pub const DEFINITIONS_POINTER: &str = "#/definitions/";
pub const FILE_EXTENSION: &str = "js.flow";

/// `user-profile` -> `UserProfile`. Re-applying it is a no-op.
pub fn canonical_id(raw: &str) -> String {
    raw.to_upper_camel_case()
}

/// Canonical id plus the generated type suffix.
pub fn type_name(raw: &str, suffix: &str) -> String {
    format!("{}{}", canonical_id(raw), suffix)
}

/// File a type is written to, relative to the output directory.
pub fn file_name(type_name: &str) -> String {
    format!("{}.{}", type_name, FILE_EXTENSION)
}

/// Re-keys definitions to their type names and rewrites references to them.
///
/// Both the raw id and its canonical form are accepted as reference targets,
/// either as a `#/definitions/` pointer or as a bare name. References to
/// anything else are left alone.
pub fn rename_definitions(
    definitions: &IndexMap<String, Schema>,
    suffix: &str,
) -> Result<IndexMap<String, Schema>> {
    let mut owners: HashMap<String, &str> = HashMap::new();
    let mut qualified_names = Vec::with_capacity(definitions.len());

    for raw_id in definitions.keys() {
        let qualified = type_name(raw_id, suffix);
        if let Some(first) = owners.insert(qualified.clone(), raw_id) {
            return Err(DtoGenError::DuplicateTypeName {
                type_name: qualified,
                first: first.to_owned(),
                second: raw_id.clone(),
            });
        }
        debug!("{} -> {}", raw_id, qualified);
        qualified_names.push(qualified);
    }

    // Raw ids win over canonical ids when the two spellings collide.
    let mut renames: HashMap<String, String> = HashMap::new();
    for (raw_id, qualified) in definitions.keys().zip(&qualified_names) {
        renames
            .entry(canonical_id(raw_id))
            .or_insert_with(|| qualified.clone());
    }
    for (raw_id, qualified) in definitions.keys().zip(&qualified_names) {
        renames.insert(raw_id.clone(), qualified.clone());
    }

    Ok(definitions
        .values()
        .zip(qualified_names)
        .map(|(schema, qualified)| {
            let mut schema = schema.clone();
            rewrite_refs(&mut schema, &renames);
            (qualified, schema)
        })
        .collect())
}

fn renamed_ref(reference: &str, renames: &HashMap<String, String>) -> Option<String> {
    let target = reference
        .strip_prefix(DEFINITIONS_POINTER)
        .unwrap_or(reference);
    renames
        .get(target)
        .map(|name| format!("{}{}", DEFINITIONS_POINTER, name))
}

fn rewrite_refs(schema: &mut Schema, renames: &HashMap<String, String>) {
    if let Some(renamed) = schema
        .ref_path
        .as_deref()
        .and_then(|reference| renamed_ref(reference, renames))
    {
        schema.ref_path = Some(renamed);
    }

    if let Some(properties) = schema.properties.as_mut() {
        properties
            .values_mut()
            .for_each(|property| rewrite_refs(property, renames));
    }
    if let Some(items) = schema.items.as_mut() {
        rewrite_refs(items, renames);
    }
    for members in [
        schema.all_of.as_mut(),
        schema.one_of.as_mut(),
        schema.any_of.as_mut(),
    ]
    .into_iter()
    .flatten()
    {
        members
            .iter_mut()
            .for_each(|member| rewrite_refs(member, renames));
    }
    schema
        .extra
        .values_mut()
        .for_each(|value| rewrite_value_refs(value, renames));
}

// `$ref`s can hide inside keywords that are not modelled, e.g. additionalProperties.
fn rewrite_value_refs(value: &mut Value, renames: &HashMap<String, String>) {
    match value {
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get_mut("$ref") {
                if let Some(renamed) = renamed_ref(reference, renames) {
                    *reference = renamed;
                }
            }
            map.values_mut()
                .for_each(|value| rewrite_value_refs(value, renames));
        }
        Value::Array(values) => values
            .iter_mut()
            .for_each(|value| rewrite_value_refs(value, renames)),
        _ => {}
    }
}

/// Every type name of a run, with the import path of its file.
///
/// Filled completely before any declaration is emitted so forward references
/// resolve regardless of definition order.
#[derive(Debug, Default)]
pub struct NameRegistry {
    paths: IndexMap<String, String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        NameRegistry::default()
    }

    /// Adds `type_name`. Names are unique by the time they get here, see
    /// [`rename_definitions`].
    pub fn register(&mut self, type_name: impl AsRef<str>) {
        let type_name = type_name.as_ref();
        self.paths
            .insert(type_name.to_owned(), format!("./{}", file_name(type_name)));
    }

    /// Registered spelling of `name`, compared case-insensitively.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        if let Some((registered, _)) = self.paths.get_key_value(name) {
            return Some(registered);
        }
        let lower = name.to_lowercase();
        self.paths
            .keys()
            .find(|registered| registered.to_lowercase() == lower)
            .map(String::as_str)
    }

    /// Import path for `name`; unregistered names get the path they would have.
    pub fn import_path(&self, name: &str) -> String {
        self.paths
            .get(name)
            .cloned()
            .unwrap_or_else(|| format!("./{}", file_name(name)))
    }
}
