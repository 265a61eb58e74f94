//! Violation and report types for validation outcomes
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::path::ViolationPath;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// The taxonomy of structural failures. Every violation carries exactly one
/// of these; nothing is ever thrown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// A required key/slot is absent (or null).
    MissingRequiredField,
    /// Expected a string, array, or object and got something else.
    WrongType,
    /// A string rule with `allow_empty = false` met an empty string.
    EmptyStringNotAllowed,
    /// An array has fewer items than `min_items`.
    ArrayTooShort,
    /// A `unique_items` array repeats a value.
    DuplicateItem,
    /// A value is not in the allowed set of an enum rule.
    ValueNotInEnum,
}

/// A single structural failure: where it happened, what kind it is, and the
/// human-readable message the caller surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message} (at {path})")]
pub struct Violation {
    /// Location of the failing node; empty for a root-level failure.
    pub path: ViolationPath,
    /// Which rule was violated.
    pub kind: ViolationKind,
    /// Primary message, e.g. `"a" is required`.
    pub message: String,
}

impl Violation {
    /// Create a violation.
    pub fn new<M: Into<String>>(path: ViolationPath, kind: ViolationKind, message: M) -> Self {
        Self {
            path,
            kind,
            message: message.into(),
        }
    }
}

/// Outcome of a validation run. Violations are empty iff the value is valid;
/// under the default fail-fast options there is at most one entry, the first
/// violation in declaration/index order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// A passing report.
    pub fn pass() -> Self {
        Self {
            violations: Vec::new(),
        }
    }

    /// A failing report carrying the collected violations.
    pub fn fail(violations: Vec<Violation>) -> Self {
        debug_assert!(!violations.is_empty(), "failing report needs a violation");
        Self { violations }
    }

    /// Whether the value conformed to the schema.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The violations, first-encountered first.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// The first violation's message, the one a single-message response
    /// envelope surfaces. `None` when valid.
    pub fn primary_message(&self) -> Option<&str> {
        self.violations.first().map(|v| v.message.as_str())
    }
}

impl Serialize for ValidationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationReport", 2)?;
        state.serialize_field("valid", &self.is_valid())?;
        state.serialize_field("violations", &self.violations)?;
        state.end()
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", violation)?;
        }
        Ok(())
    }
}
