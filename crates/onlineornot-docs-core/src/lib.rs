//! Shared OpenAPI document model for the OnlineOrNot documentation tooling.
//!
//! This crate provides a deliberately small subset of the `OpenAPI` 3.x
//! object model: paths, operations, request/response media types and
//! recursive schema nodes with `$ref`, `allOf`/`oneOf`/`anyOf`, `properties`
//! and `items`. Everything else in a real document is ignored on
//! deserialization, so a newer upstream schema never breaks parsing.
//!
//! `onlineornot-docs` (enum extraction and documentation rewriting) depends
//! on these types. You should not need to depend on this crate directly.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod schema;

pub use schema::{
    Components, HttpMethod, MediaType, OpenApiSpec, Operation, PathItem, RequestBody, Response,
    Schema, SchemaType, COMPONENT_SCHEMA_PREFIX,
};
