//! The validation engine: a pure, depth-first walk of value against schema
//!
//! Copyright (c) 2025 Conforma Team
//! Licensed under the Apache-2.0 license

use crate::path::ViolationPath;
use crate::report::{ValidationReport, Violation, ViolationKind};
use crate::schema::{ArrayRule, EnumRule, ObjectRule, Schema, StringRule};
use serde_json::Value;

/// Engine options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Stop at the first violation (the default, matching single-message
    /// reporting). Set to `false` to collect every violation instead.
    pub stop_on_first_error: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            stop_on_first_error: true,
        }
    }
}

/// A reusable validator. Pure and stateless: safe to share across threads
/// and to call concurrently with independent inputs.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidationOptions,
}

impl Validator {
    /// A fail-fast validator (default options).
    pub fn new() -> Self {
        Self::default()
    }

    /// A validator with explicit options.
    pub fn with_options(options: ValidationOptions) -> Self {
        Self { options }
    }

    /// A validator that accumulates every violation instead of stopping at
    /// the first.
    pub fn collect_all() -> Self {
        Self::with_options(ValidationOptions {
            stop_on_first_error: false,
        })
    }

    /// Validate `value` against `schema`. Never fails: the outcome is a
    /// report, not an error.
    pub fn validate(&self, value: &Value, schema: &Schema) -> ValidationReport {
        let mut violations = Vec::new();
        self.check_node(Some(value), schema, &ViolationPath::root(), &mut violations);
        if violations.is_empty() {
            ValidationReport::pass()
        } else {
            ValidationReport::fail(violations)
        }
    }

    /// Validate one node. `value` is `None` when the key is absent in the
    /// parent; `null` counts as absent too. Returns whether the node passed.
    fn check_node(
        &self,
        value: Option<&Value>,
        schema: &Schema,
        path: &ViolationPath,
        out: &mut Vec<Violation>,
    ) -> bool {
        let value = match value {
            None | Some(Value::Null) => {
                if schema.is_required() {
                    out.push(Violation::new(
                        path.clone(),
                        ViolationKind::MissingRequiredField,
                        format!("{} is required", label(path)),
                    ));
                    return false;
                }
                // Absent and not required: nothing else to check.
                return true;
            }
            Some(value) => value,
        };

        match schema {
            Schema::String(rule) => self.check_string(rule, value, path, out),
            Schema::Array(rule) => self.check_array(rule, value, path, out),
            Schema::Object(rule) => self.check_object(rule, value, path, out),
            Schema::Enum(rule) => self.check_enum(rule, value, path, out),
        }
    }

    fn check_string(
        &self,
        rule: &StringRule,
        value: &Value,
        path: &ViolationPath,
        out: &mut Vec<Violation>,
    ) -> bool {
        let Some(text) = value.as_str() else {
            out.push(Violation::new(
                path.clone(),
                ViolationKind::WrongType,
                format!("{} must be a string", label(path)),
            ));
            return false;
        };
        if text.is_empty() && !rule.allow_empty {
            out.push(Violation::new(
                path.clone(),
                ViolationKind::EmptyStringNotAllowed,
                format!("{} is not allowed to be empty", label(path)),
            ));
            return false;
        }
        true
    }

    fn check_array(
        &self,
        rule: &ArrayRule,
        value: &Value,
        path: &ViolationPath,
        out: &mut Vec<Violation>,
    ) -> bool {
        let Some(items) = value.as_array() else {
            out.push(Violation::new(
                path.clone(),
                ViolationKind::WrongType,
                format!("{} must be an array", label(path)),
            ));
            return false;
        };

        let mut ok = true;

        if let Some(min) = rule.min_items {
            if items.len() < min {
                out.push(Violation::new(
                    path.clone(),
                    ViolationKind::ArrayTooShort,
                    format!("{} must contain at least {} items", label(path), min),
                ));
                if self.options.stop_on_first_error {
                    return false;
                }
                ok = false;
            }
        }

        if rule.unique_items {
            // Value equality, quadratic scan; payloads here are small.
            for index in 1..items.len() {
                if items[..index].contains(&items[index]) {
                    let item_path = path.child_index(index);
                    out.push(Violation::new(
                        item_path.clone(),
                        ViolationKind::DuplicateItem,
                        format!("{} contains a duplicate value", label(&item_path)),
                    ));
                    if self.options.stop_on_first_error {
                        return false;
                    }
                    ok = false;
                }
            }
        }

        if let Some(item_schema) = &rule.items {
            for (index, item) in items.iter().enumerate() {
                let item_path = path.child_index(index);
                if !self.check_node(Some(item), item_schema, &item_path, out) {
                    if self.options.stop_on_first_error {
                        return false;
                    }
                    ok = false;
                }
            }
        }

        ok
    }

    fn check_object(
        &self,
        rule: &ObjectRule,
        value: &Value,
        path: &ViolationPath,
        out: &mut Vec<Violation>,
    ) -> bool {
        let Some(map) = value.as_object() else {
            out.push(Violation::new(
                path.clone(),
                ViolationKind::WrongType,
                format!("{} must be an object", label(path)),
            ));
            return false;
        };

        let mut ok = true;
        for (name, field_schema) in &rule.fields {
            let field_path = path.child(name.clone());
            if !self.check_node(map.get(name), field_schema, &field_path, out) {
                if self.options.stop_on_first_error {
                    return false;
                }
                ok = false;
            }
        }
        ok
    }

    fn check_enum(
        &self,
        rule: &EnumRule,
        value: &Value,
        path: &ViolationPath,
        out: &mut Vec<Violation>,
    ) -> bool {
        let member = value
            .as_str()
            .is_some_and(|text| rule.allowed_values.iter().any(|allowed| allowed == text));
        if !member {
            out.push(Violation::new(
                path.clone(),
                ViolationKind::ValueNotInEnum,
                format!(
                    "{} must be one of [{}]",
                    label(path),
                    rule.allowed_values.join(", ")
                ),
            ));
            return false;
        }
        true
    }
}

/// Quoted field label for a message: the innermost field name on the path,
/// or `"value"` for an anonymous root.
fn label(path: &ViolationPath) -> String {
    format!("\"{}\"", path.field_label().unwrap_or("value"))
}

/// Validate with the default fail-fast options.
pub fn validate(value: &Value, schema: &Schema) -> ValidationReport {
    Validator::new().validate(value, schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_root_required_missing() {
        let schema: Schema = Schema::string().required().into();
        let report = validate(&Value::Null, &schema);
        let violations = report.violations();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::MissingRequiredField);
        assert!(violations[0].path.is_root());
        assert_eq!(violations[0].message, "\"value\" is required");
    }

    #[test]
    fn test_optional_null_field_is_valid() {
        let schema: Schema = Schema::object().field("a", Schema::string()).into();
        assert!(validate(&json!({"a": null}), &schema).is_valid());
    }

    #[test]
    fn test_string_type_mismatch() {
        let schema: Schema = Schema::object().field("a", Schema::string()).into();
        let report = validate(&json!({"a": 7}), &schema);
        let violation = &report.violations()[0];
        assert_eq!(violation.kind, ViolationKind::WrongType);
        assert_eq!(violation.message, "\"a\" must be a string");
        assert_eq!(violation.path.to_string(), "$.a");
    }

    #[test]
    fn test_array_checks_run_in_order() {
        // Too short and non-unique at once: min_items fires first.
        let schema: Schema = Schema::object()
            .field(
                "a",
                Schema::array()
                    .items(Schema::one_of(["x"]))
                    .min_items(3)
                    .unique()
                    .required(),
            )
            .into();
        let report = validate(&json!({"a": ["x", "x"]}), &schema);
        assert_eq!(report.violations().len(), 1);
        assert_eq!(report.violations()[0].kind, ViolationKind::ArrayTooShort);
        assert_eq!(
            report.primary_message(),
            Some("\"a\" must contain at least 3 items")
        );
    }

    #[test]
    fn test_object_fields_fail_in_declaration_order() {
        let schema: Schema = Schema::object()
            .field("first", Schema::string().required())
            .field("second", Schema::string().required())
            .into();
        let report = validate(&json!({}), &schema);
        assert_eq!(report.violations().len(), 1);
        assert_eq!(report.primary_message(), Some("\"first\" is required"));
    }

    #[test]
    fn test_collect_all_reports_every_violation() {
        let schema: Schema = Schema::object()
            .field("first", Schema::string().required())
            .field("second", Schema::string().required())
            .field("third", Schema::string())
            .into();
        let report = Validator::collect_all().validate(&json!({"third": 3}), &schema);
        let kinds: Vec<ViolationKind> = report.violations().iter().map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            [
                ViolationKind::MissingRequiredField,
                ViolationKind::MissingRequiredField,
                ViolationKind::WrongType,
            ]
        );
    }

    #[test]
    fn test_enum_non_string_value() {
        let schema: Schema = Schema::object()
            .field("a", Schema::one_of(["austin", "derek"]))
            .into();
        let report = validate(&json!({"a": 4}), &schema);
        assert_eq!(report.violations()[0].kind, ViolationKind::ValueNotInEnum);
        assert_eq!(
            report.primary_message(),
            Some("\"a\" must be one of [austin, derek]")
        );
    }

    #[test]
    fn test_enum_is_case_sensitive() {
        let schema: Schema = Schema::object().field("a", Schema::one_of(["austin"])).into();
        assert!(!validate(&json!({"a": "Austin"}), &schema).is_valid());
        assert!(validate(&json!({"a": "austin"}), &schema).is_valid());
    }

    #[test]
    fn test_object_expected_but_array_given() {
        let schema: Schema = Schema::array()
            .items(Schema::object().field("a", Schema::string()))
            .into();
        let report = validate(&json!([[1, 2]]), &schema);
        let violation = &report.violations()[0];
        assert_eq!(violation.kind, ViolationKind::WrongType);
        assert_eq!(violation.message, "\"value\" must be an object");
        assert_eq!(violation.path.to_string(), "$[0]");
    }

    #[test]
    fn test_duplicate_reports_second_occurrence() {
        let schema: Schema = Schema::array().unique().into();
        let report = validate(&json!(["a", "b", "a", "a"]), &schema);
        // Fail-fast: only the first duplicate, at index 2.
        assert_eq!(report.violations().len(), 1);
        assert_eq!(report.violations()[0].path.to_string(), "$[2]");

        let all = Validator::collect_all().validate(&json!(["a", "b", "a", "a"]), &schema);
        let paths: Vec<String> = all.violations().iter().map(|v| v.path.to_string()).collect();
        assert_eq!(paths, ["$[2]", "$[3]"]);
    }
}
