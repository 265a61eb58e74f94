//! Conforma Core - declarative JSON shape validation
//!
//! This crate decides whether a parsed JSON value conforms to an immutable,
//! declarative [`Schema`], and when it does not, produces a deterministic,
//! ordered list of [`Violation`]s with a human-readable primary message.
//!
//! ## Properties
//!
//! - **Pure**: [`validate`] is a function of its inputs. It never errors,
//!   never panics on any input value, and holds no state. Concurrent calls
//!   never interact.
//! - **Fail-fast by default**: validation of a container stops at the first
//!   failing child, so the report carries exactly one violation, the first
//!   in declaration order (object fields) / index order (array items).
//!   [`Validator::collect_all`] switches to accumulate-all diagnostics.
//! - **Qualified paths**: every violation locates the failing node with an
//!   ordered field-name/index path.
//!
//! ## Quick Start
//!
//! ```rust
//! use conforma_core::{validate, Schema};
//! use serde_json::json;
//!
//! let schema: Schema = Schema::object()
//!     .field("a", Schema::string().required())
//!     .into();
//!
//! let report = validate(&json!({"a": ""}), &schema);
//! assert!(!report.is_valid());
//! assert_eq!(
//!     report.primary_message(),
//!     Some("\"a\" is not allowed to be empty"),
//! );
//! ```
//!
//! ## Rule kinds
//!
//! - [`StringRule`]: string, optionally rejecting `""`
//! - [`ArrayRule`]: array, with optional per-item schema, length floor, and
//!   uniqueness
//! - [`ObjectRule`]: object with declared fields validated in order
//! - [`EnumRule`]: string drawn from a fixed, case-sensitive set
//!
//! A node's `required` flag governs presence of its key in the parent;
//! absent non-required keys always validate.
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

pub mod engine;
pub mod path;
pub mod report;
pub mod schema;

pub use engine::{validate, ValidationOptions, Validator};
pub use path::{PathSegment, ViolationPath};
pub use report::{ValidationReport, Violation, ViolationKind};
pub use schema::{ArrayRule, EnumRule, ObjectRule, Schema, StringRule};
