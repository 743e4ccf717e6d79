#![allow(clippy::doc_markdown)] // README uses "OpenAPI" and "OnlineOrNot" proper nouns throughout
#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod enrich;
mod error;
mod extract;
mod fetch;
mod resources;
mod rewrite;

pub use onlineornot_docs_core as schema;

pub use config::ProjectConfig;
pub use enrich::{enrich_docs, run, EnrichOptions, EnrichReport, DEFAULT_DOCS_DIR};
pub use error::{Error, Result};
pub use extract::{extract_enums, EnumInfo, FieldEnums};
pub use fetch::{fetch_spec, load_spec, parse_spec, SpecSource, DEFAULT_OPENAPI_URL};
pub use resources::{build_enum_table, ResourceEnumTable, ResourceKind, ResourcePaths};
pub use rewrite::{rewrite, MUST_BE_ONE_OF};
