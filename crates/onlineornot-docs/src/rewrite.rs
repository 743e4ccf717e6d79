//! Enum annotation of generated Terraform Markdown docs.
//!
//! `tfplugindocs` renders attributes as
//!
//! ```text
//! ## Schema
//!
//! - `name` (String) Check name.
//! - `assertions` (Block List) (see [below for nested schema](#nestedblock--assertions))
//!
//! <a id="nestedblock--assertions"></a>
//! ### Nested Schema for `assertions`
//!
//! - `type` (String) Assertion type.
//! ```
//!
//! Each attribute line whose (context-qualified) field has enum values gets
//! a sorted `Must be one of: ...` sentence appended. Lines that already
//! carry one are left alone, which makes [`rewrite`] idempotent.

use std::sync::LazyLock;

use regex::Regex;

use crate::extract::{EnumInfo, FieldEnums};

/// Text marking an attribute line as already annotated.
pub const MUST_BE_ONE_OF: &str = "Must be one of:";

/// `## Schema`: start of the top-level attribute list.
static SCHEMA_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^## Schema").expect("valid schema heading regex"));

/// ``### Nested Schema for `name` `` (or `` `parent.name` `` for deeper levels).
static NESTED_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^### Nested Schema for `([a-z_]+(?:\.[a-z_]+)*)`")
        .expect("valid nested heading regex")
});

/// ``- `field` (Type) description``; group 1 is everything up to the type label.
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(- `([a-z_]+)` \([^)]+\))(.*)$").expect("valid attribute regex")
});

/// Annotate every matching attribute line in `text` with its enum values.
///
/// Lines are split and re-joined on `\n`, so line count, ordering and a
/// trailing newline are preserved; only annotated attribute lines change.
#[must_use]
pub fn rewrite(text: &str, enums: &FieldEnums) -> String {
    if enums.is_empty() {
        return text.to_string();
    }

    let mut context = String::new();
    let mut out: Vec<String> = Vec::new();

    for line in text.split('\n') {
        if SCHEMA_HEADING_RE.is_match(line) {
            context.clear();
        }
        if let Some(caps) = NESTED_HEADING_RE.captures(line) {
            // Field names in docs are relative to the innermost block.
            let nested = caps[1].rsplit('.').next().unwrap_or_default();
            context = nested.to_string();
        }
        out.push(rewrite_line(line, &context, enums).unwrap_or_else(|| line.to_string()));
    }

    out.join("\n")
}

/// Annotated form of `line`, or `None` when it should pass through unchanged.
fn rewrite_line(line: &str, context: &str, enums: &FieldEnums) -> Option<String> {
    let caps = ATTRIBUTE_RE.captures(line)?;
    let head = caps.get(1)?.as_str();
    let field = caps.get(2)?.as_str();
    let rest = caps.get(3).map_or("", |m| m.as_str());

    let info = lookup(enums, context, field)?;
    if rest.contains(MUST_BE_ONE_OF) {
        return None;
    }

    let suffix = constraint_sentence(info);
    let description = rest.trim();
    if description.is_empty() {
        Some(format!("{head} {suffix}"))
    } else {
        let description = description.strip_suffix('.').unwrap_or(description);
        Some(format!("{head} {description}. {suffix}"))
    }
}

/// Find the enum for `field` under `context`.
///
/// Falls back to the bare field name inside nested blocks, because list
/// data sources nest items under headings that do not match the wire
/// envelope. This can pick up the wrong enum when two blocks of one page
/// share a field name that only one of them constrains.
fn lookup<'e>(enums: &'e FieldEnums, context: &str, field: &str) -> Option<&'e EnumInfo> {
    if context.is_empty() {
        return enums.get(field);
    }
    enums
        .get(&format!("{context}.{field}"))
        .or_else(|| enums.get(field))
}

/// `Must be one of: `A`, `B`.` with values sorted.
fn constraint_sentence(info: &EnumInfo) -> String {
    let mut values: Vec<&str> = info.values().iter().map(String::as_str).collect();
    values.sort_unstable();
    let quoted: Vec<String> = values.iter().map(|v| format!("`{v}`")).collect();
    format!("{MUST_BE_ONE_OF} {}.", quoted.join(", "))
}
