//! Schema rules and the builder API
//!
//! A [`Schema`] is an immutable, recursive description of expected JSON
//! shape. Construction mirrors the declarative chaining the rules come from:
//!
//! ```rust
//! use conforma_core::Schema;
//!
//! let schema: Schema = Schema::object()
//!     .field("a", Schema::array()
//!         .items(Schema::one_of(["austin", "derek", "ricky", "ginsu"]))
//!         .min_items(1)
//!         .unique()
//!         .required())
//!     .into();
//! ```
//!
//! Schemas also round-trip through serde with a `"type"` tag, which is the
//! on-disk format the CLI loads:
//!
//! ```json
//! {
//!   "type": "object",
//!   "fields": {
//!     "a": { "type": "string", "required": true }
//!   }
//! }
//! ```
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};

/// A schema node: one rule kind per JSON shape it accepts.
///
/// Every variant carries a `required` flag governing whether its **key**
/// must be present in the parent container. Absence of a non-required key
/// is always valid, regardless of the node's other constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Schema {
    /// The value must be a string.
    String(StringRule),
    /// The value must be an array.
    Array(ArrayRule),
    /// The value must be an object.
    Object(ObjectRule),
    /// The value must be a string drawn from a fixed set.
    Enum(EnumRule),
}

impl Schema {
    /// Start a string rule (optional, empty not allowed).
    pub fn string() -> StringRule {
        StringRule::default()
    }

    /// Start an array rule (optional, no item schema, no length floor).
    pub fn array() -> ArrayRule {
        ArrayRule::default()
    }

    /// Start an object rule with no declared fields.
    pub fn object() -> ObjectRule {
        ObjectRule::default()
    }

    /// Start an enum rule over the given allowed values, in order.
    pub fn one_of<I, S>(values: I) -> EnumRule
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        EnumRule {
            allowed_values: values.into_iter().map(Into::into).collect(),
            required: false,
        }
    }

    /// Whether this node's key must be present in its parent.
    pub fn is_required(&self) -> bool {
        match self {
            Schema::String(rule) => rule.required,
            Schema::Array(rule) => rule.required,
            Schema::Object(rule) => rule.required,
            Schema::Enum(rule) => rule.required,
        }
    }
}

/// Rule for string values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRule {
    /// Whether the key must be present in the parent.
    #[serde(default)]
    pub required: bool,
    /// Whether `""` passes. Off by default.
    #[serde(default)]
    pub allow_empty: bool,
}

impl StringRule {
    /// Require the key to be present.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Accept the empty string.
    pub fn allow_empty(mut self) -> Self {
        self.allow_empty = true;
        self
    }
}

/// Rule for array values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayRule {
    /// Schema every element must satisfy, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Minimum number of elements, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,
    /// Reject repeated values (by value equality).
    #[serde(default)]
    pub unique_items: bool,
    /// Whether the key must be present in the parent.
    #[serde(default)]
    pub required: bool,
}

impl ArrayRule {
    /// Require every element to satisfy `schema`.
    pub fn items<S: Into<Schema>>(mut self, schema: S) -> Self {
        self.items = Some(Box::new(schema.into()));
        self
    }

    /// Require at least `min` elements.
    pub fn min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    /// Reject repeated values.
    pub fn unique(mut self) -> Self {
        self.unique_items = true;
        self
    }

    /// Require the key to be present.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Rule for object values. Fields validate in declaration order, which is
/// why they are a list and not a map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRule {
    /// Declared fields, in order, each with its own schema.
    #[serde(default, with = "ordered_fields", skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<(String, Schema)>,
    /// Whether the key must be present in the parent.
    #[serde(default)]
    pub required: bool,
}

impl ObjectRule {
    /// Declare a field. Order of calls is the order of validation.
    pub fn field<N: Into<String>, S: Into<Schema>>(mut self, name: N, schema: S) -> Self {
        self.fields.push((name.into(), schema.into()));
        self
    }

    /// Require the key to be present.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Rule for values drawn from a fixed set of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumRule {
    /// Allowed values, case-sensitive, in declaration order.
    pub allowed_values: Vec<String>,
    /// Whether the key must be present in the parent.
    #[serde(default)]
    pub required: bool,
}

impl EnumRule {
    /// Require the key to be present.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

impl From<StringRule> for Schema {
    fn from(rule: StringRule) -> Self {
        Schema::String(rule)
    }
}

impl From<ArrayRule> for Schema {
    fn from(rule: ArrayRule) -> Self {
        Schema::Array(rule)
    }
}

impl From<ObjectRule> for Schema {
    fn from(rule: ObjectRule) -> Self {
        Schema::Object(rule)
    }
}

impl From<EnumRule> for Schema {
    fn from(rule: EnumRule) -> Self {
        Schema::Enum(rule)
    }
}

/// Serde helpers that keep object fields as a JSON map on disk while
/// preserving document order in memory.
mod ordered_fields {
    use super::Schema;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(
        fields: &[(String, Schema)],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (name, schema) in fields {
            map.serialize_entry(name, schema)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<(String, Schema)>, D::Error> {
        struct FieldsVisitor;

        impl<'de> Visitor<'de> for FieldsVisitor {
            type Value = Vec<(String, Schema)>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of field name to schema")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut fields = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry()? {
                    fields.push(entry);
                }
                Ok(fields)
            }
        }

        deserializer.deserialize_map(FieldsVisitor)
    }
}
