//! Turns an emitted type body into a complete declaration file.
//!
//! References to other generated types are recovered from the body text,
//! resolved against the [`NameRegistry`] and turned into `import type` lines.

use std::fmt;

use itertools::Itertools;
use tracing::warn;

use crate::config::Mode;
use crate::naming::{self, NameRegistry};

pub const HEADER: &str = "// @flow";

/// Emitters may leave backspace characters behind as formatting artifacts.
const CONTROL_MARKER: char = '\u{8}';

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub type_name: String,
    /// File name relative to the output directory
    pub file_name: String,
    pub content: String,
    /// Resolved names of the types this declaration imports
    pub references: Vec<String>,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

impl Declaration {
    /// Builds the declaration for `type_name` from its emitted `body`.
    pub fn assemble(
        type_name: &str,
        body: &str,
        suffix: &str,
        mode: Mode,
        registry: &NameRegistry,
    ) -> Self {
        let body = strip_control_markers(body);
        let references: Vec<String> = find_references(&body, suffix, type_name)
            .into_iter()
            .map(|name| match registry.resolve(&name) {
                Some(registered) => registered.to_owned(),
                None => {
                    warn!("{} references unknown type {}", type_name, name);
                    name
                }
            })
            .filter(|name| name != type_name)
            .unique()
            .collect();

        let body = match mode {
            Mode::Read => normalize_read_nullability(&body),
            Mode::Write => body,
        };

        let imports = references
            .iter()
            .map(|name| {
                format!(
                    "import type {{ {} }} from '{}';\n",
                    name,
                    registry.import_path(name)
                )
            })
            .join("");

        Declaration {
            type_name: type_name.to_owned(),
            file_name: naming::file_name(type_name),
            content: format!("{}\n{}\n{}\n", HEADER, imports, body.trim_end()),
            references,
        }
    }
}

pub fn strip_control_markers(body: &str) -> String {
    body.replace(CONTROL_MARKER, "")
}

/// Identifier tokens ending in `suffix`, other than `own_name`, in order of
/// first appearance.
pub fn find_references(body: &str, suffix: &str, own_name: &str) -> Vec<String> {
    body.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|token| token.ends_with(suffix) && *token != own_name)
        .unique()
        .map(str::to_owned)
        .collect()
}

/// Makes optional properties explicitly nullable: `a?: T` becomes
/// `a: null | T`, and a doubled `null | null` collapses to one.
pub fn normalize_read_nullability(body: &str) -> String {
    let mut body = body.replace("?: ", ": null | ");
    while body.contains("null | null") {
        body = body.replace("null | null", "null");
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(names: &[&str]) -> NameRegistry {
        let mut registry = NameRegistry::new();
        for name in names {
            registry.register(name);
        }
        registry
    }

    #[test]
    fn control_markers_are_removed() {
        assert_eq!(strip_control_markers("a\u{8}b\u{8}\u{8}c"), "abc");
    }

    #[test]
    fn references_exclude_self_and_repeat_mentions() {
        let body = "export type OrderDtoRead = {\n  a: UserDtoRead,\n  b: Array<LineDtoRead>,\n  c: UserDtoRead,\n  d: OrderDtoRead,\n};";
        assert_eq!(
            find_references(body, "DtoRead", "OrderDtoRead"),
            vec!["UserDtoRead", "LineDtoRead"]
        );
    }

    #[test]
    fn references_match_whole_tokens_only() {
        let body = "a: UserDtoReader, b: UserDtoRead_x, c: UserDtoRead";
        assert_eq!(find_references(body, "DtoRead", "X"), vec!["UserDtoRead"]);
    }

    #[test]
    fn read_nullability_normalization() {
        assert_eq!(normalize_read_nullability("  a?: string,"), "  a: null | string,");
        assert_eq!(normalize_read_nullability("  a?: null | string,"), "  a: null | string,");
        assert_eq!(normalize_read_nullability("  a: number,"), "  a: number,");
    }

    #[test]
    fn assembled_file_imports_resolved_names() {
        let registry = registry(&["OrderDtoRead", "UserProfileDtoRead"]);
        let body = "export type OrderDtoRead = {\n  owner: UserprofileDtoRead,\n  note?: null | string,\n};";
        let declaration =
            Declaration::assemble("OrderDtoRead", body, "DtoRead", Mode::Read, &registry);

        assert_eq!(declaration.file_name, "OrderDtoRead.js.flow");
        assert_eq!(declaration.references, vec!["UserProfileDtoRead"]);
        assert_eq!(
            declaration.content,
            "// @flow\n\
             import type { UserProfileDtoRead } from './UserProfileDtoRead.js.flow';\n\
             \n\
             export type OrderDtoRead = {\n  owner: UserprofileDtoRead,\n  note: null | string,\n};\n"
        );
    }

    #[test]
    fn unresolved_reference_is_kept_verbatim() {
        let registry = registry(&["OrderDtoWrite"]);
        let body = "export type OrderDtoWrite = {\n  ghost?: GhostDtoWrite,\n};";
        let declaration =
            Declaration::assemble("OrderDtoWrite", body, "DtoWrite", Mode::Write, &registry);

        assert_eq!(declaration.references, vec!["GhostDtoWrite"]);
        assert!(declaration
            .content
            .contains("import type { GhostDtoWrite } from './GhostDtoWrite.js.flow';"));
        assert!(declaration.content.contains("ghost?: GhostDtoWrite"));
    }

    #[test]
    fn declaration_without_references_has_blank_separator() {
        let registry = registry(&["TagDto"]);
        let declaration = Declaration::assemble(
            "TagDto",
            "export type TagDto = string;\u{8}",
            "Dto",
            Mode::Write,
            &registry,
        );
        assert!(declaration.references.is_empty());
        assert_eq!(declaration.content, "// @flow\n\nexport type TagDto = string;\n");
    }
}
