//! Declarative validation configuration for a form

use indexmap::IndexMap;
use serde_json::{Map, Value};

type Validator = Box<dyn Fn(&str, &Value) -> Result<(), String> + Send + Sync>;
type Filter = Box<dyn Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync>;

/// Per-field error messages, in field declaration order
pub type FieldErrors = IndexMap<String, Vec<String>>;

#[derive(Default)]
struct FieldRules {
    filters: Vec<Filter>,
    validators: Vec<Validator>,
}

/// Filters and validators for every field of a form
///
/// Fields are checked in the order they were first declared. Every failing
/// rule is reported, not only the first one per field.
#[derive(Default)]
pub struct FormValidationConfig {
    fields: IndexMap<String, FieldRules>,
}

impl FormValidationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter to a field (applied before validators, in insertion order)
    pub fn add_filter<F>(&mut self, field: &str, filter: F)
    where
        F: Fn(&str, Value) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.fields
            .entry(field.to_string())
            .or_default()
            .filters
            .push(Box::new(filter));
    }

    /// Add a validator to a field
    pub fn add_validator<V>(&mut self, field: &str, validator: V)
    where
        V: Fn(&str, &Value) -> Result<(), String> + Send + Sync + 'static,
    {
        self.fields
            .entry(field.to_string())
            .or_default()
            .validators
            .push(Box::new(validator));
    }

    /// Declared field names
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Run the validators of a single field without filtering
    pub fn check_field(&self, field: &str, value: &Value) -> Vec<String> {
        let Some(rules) = self.fields.get(field) else {
            return Vec::new();
        };

        rules
            .validators
            .iter()
            .filter_map(|validate| validate(field, value).err())
            .collect()
    }

    /// Filter then validate a payload
    ///
    /// Returns an object holding only the declared fields, filtered. Undeclared
    /// keys are dropped. A non-object payload is treated as an empty one.
    pub fn validate_and_filter(&self, payload: Value) -> Result<Value, FieldErrors> {
        let mut input = match payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let mut output = Map::new();
        let mut errors = FieldErrors::new();

        for (field, rules) in &self.fields {
            let mut value = input.remove(field).unwrap_or(Value::Null);

            for filter in &rules.filters {
                value = match filter(field, value) {
                    Ok(filtered) => filtered,
                    Err(e) => {
                        errors.entry(field.clone()).or_default().push(e.to_string());
                        Value::Null
                    }
                };
            }

            for validate in &rules.validators {
                if let Err(message) = validate(field, &value) {
                    errors.entry(field.clone()).or_default().push(message);
                }
            }

            output.insert(field.clone(), value);
        }

        if errors.is_empty() {
            Ok(Value::Object(output))
        } else {
            Err(errors)
        }
    }
}
