use itertools::Itertools;
use serde_json::Value;

use super::TypeEmitter;
use crate::error::Result;
use crate::schema::{Schema, SchemaType};

const INDENT: &str = "  ";

/// Emits Flow `export type` declarations.
#[derive(Debug, Clone)]
pub struct FlowEmitter {
    /// Column description comments are wrapped at
    pub comment_width: usize,
}

impl Default for FlowEmitter {
    fn default() -> Self {
        FlowEmitter { comment_width: 80 }
    }
}

impl TypeEmitter for FlowEmitter {
    fn emit(&self, type_name: &str, schema: &Schema) -> Result<String> {
        let mut lines = self.comment_lines(schema.description.as_deref(), "");
        lines.push(format!(
            "export type {} = {};",
            type_name,
            self.render(schema, 0)
        ));
        Ok(lines.join("\n"))
    }
}

impl FlowEmitter {
    fn render(&self, schema: &Schema, depth: usize) -> String {
        if let Some(reference) = &schema.ref_path {
            return reference_name(reference).to_owned();
        }
        if let Some(values) = &schema.enum_values {
            return values.iter().map(literal).join(" | ");
        }
        if let Some(members) = non_empty(&schema.one_of).or(non_empty(&schema.any_of)) {
            return members.iter().map(|m| self.render(m, depth)).join(" | ");
        }
        if let Some(members) = non_empty(&schema.all_of) {
            let mut parts: Vec<String> = members
                .iter()
                .map(|member| self.render_grouped(member, depth))
                .collect();
            if schema.properties.is_some() {
                parts.push(self.render_object(schema, depth));
            }
            return parts.join(" & ");
        }
        if schema.properties.is_some() {
            return self.render_object(schema, depth);
        }
        match &schema.schema_type {
            Some(schema_type) => schema_type
                .names()
                .into_iter()
                .map(|name| self.render_type(name, schema, depth))
                .unique()
                .join(" | "),
            None => "mixed".to_owned(),
        }
    }

    /// Parenthesizes unions used as intersection members.
    fn render_grouped(&self, schema: &Schema, depth: usize) -> String {
        let rendered = self.render(schema, depth);
        if renders_as_union(schema) {
            format!("({})", rendered)
        } else {
            rendered
        }
    }

    fn render_type(&self, name: &str, schema: &Schema, depth: usize) -> String {
        match name {
            "string" => "string".to_owned(),
            "integer" | "number" => "number".to_owned(),
            "boolean" => "boolean".to_owned(),
            "null" => "null".to_owned(),
            "array" => match &schema.items {
                Some(items) => format!("Array<{}>", self.render(items, depth)),
                None => "Array<mixed>".to_owned(),
            },
            "object" => self.render_map(schema, depth),
            _ => "mixed".to_owned(),
        }
    }

    fn render_object(&self, schema: &Schema, depth: usize) -> String {
        let properties = match &schema.properties {
            Some(properties) if !properties.is_empty() => properties,
            _ => return "{}".to_owned(),
        };
        let indent = INDENT.repeat(depth + 1);

        let mut lines = vec!["{".to_owned()];
        for (name, property) in properties {
            lines.extend(self.comment_lines(property.description.as_deref(), &indent));
            let optional = if schema.is_required(name) { "" } else { "?" };
            lines.push(format!(
                "{}{}{}: {},",
                indent,
                property_key(name),
                optional,
                self.render(property, depth + 1)
            ));
        }
        lines.push(format!("{}}}", INDENT.repeat(depth)));
        lines.join("\n")
    }

    fn render_map(&self, schema: &Schema, depth: usize) -> String {
        let value_type = match schema.extra.get("additionalProperties") {
            Some(Value::Bool(false)) => return "{}".to_owned(),
            Some(value @ Value::Object(_)) => serde_json::from_value::<Schema>(value.clone())
                .map(|values| self.render(&values, depth))
                .unwrap_or_else(|_| "mixed".to_owned()),
            _ => "mixed".to_owned(),
        };
        format!("{{ [key: string]: {} }}", value_type)
    }

    fn comment_lines(&self, description: Option<&str>, indent: &str) -> Vec<String> {
        description
            .map(|description| {
                textwrap::wrap(description, self.comment_width)
                    .iter()
                    .map(|line| format!("{}// {}", indent, line))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn non_empty(members: &Option<Vec<Schema>>) -> Option<&Vec<Schema>> {
    members.as_ref().filter(|members| !members.is_empty())
}

fn renders_as_union(schema: &Schema) -> bool {
    if schema.ref_path.is_some() {
        return false;
    }
    if let Some(values) = &schema.enum_values {
        return values.len() > 1;
    }
    if let Some(members) = non_empty(&schema.one_of).or(non_empty(&schema.any_of)) {
        return members.len() > 1;
    }
    matches!(&schema.schema_type, Some(SchemaType::Multiple(names)) if names.len() > 1)
}

/// `#/definitions/PetDtoRead` -> `PetDtoRead`
fn reference_name(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(text) => quote(text),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => "null".to_owned(),
        _ => "mixed".to_owned(),
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn property_key(name: &str) -> String {
    let mut chars = name.chars();
    let is_identifier = chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        name.to_owned()
    } else {
        quote(name)
    }
}
