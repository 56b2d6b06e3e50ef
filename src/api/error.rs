//! Errors returned by the forms API and their field-keyed presentation

use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

/// Key for messages that do not belong to a single field
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Validation and failure messages grouped by the field they belong to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// A map holding one message for one field
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// Build the map from an error response body.
    ///
    /// JSON objects are flattened into dotted field paths
    /// (`formSteps.1.formDefinition`); anything else lands under
    /// [`NON_FIELD_ERRORS`].
    pub fn from_body(body: &str) -> Self {
        let mut errors = Self::new();
        match serde_json::from_str::<Value>(body) {
            Ok(value @ Value::Object(_)) => errors.collect("", &value),
            Ok(value) => errors.collect(NON_FIELD_ERRORS, &value),
            Err(_) if !body.trim().is_empty() => errors.insert(NON_FIELD_ERRORS, body.trim()),
            Err(_) => {}
        }
        errors
    }

    fn collect(&mut self, path: &str, value: &Value) {
        match value {
            Value::Null => {}
            Value::String(message) => self.insert(path_or_all(path), message.clone()),
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    match item {
                        Value::String(message) => self.insert(path_or_all(path), message.clone()),
                        nested => self.collect(&join_path(path, &i.to_string()), nested),
                    }
                }
            }
            Value::Object(map) => {
                for (key, nested) in map {
                    self.collect(&join_path(path, key), nested);
                }
            }
            other => self.insert(path_or_all(path), other.to_string()),
        }
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Append every message of `other`
    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn messages_for(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
        self.0.iter()
    }

    /// One `field: message` line per message, non-field messages first
    pub fn display_lines(&self) -> Vec<String> {
        let general = self
            .messages_for(NON_FIELD_ERRORS)
            .iter()
            .map(|message| message.to_string());
        let per_field = self
            .iter()
            .filter(|(field, _)| field.as_str() != NON_FIELD_ERRORS)
            .flat_map(|(field, messages)| {
                messages.iter().map(move |message| format!("{field}: {message}"))
            });
        general.chain(per_field).collect()
    }
}

fn join_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn path_or_all(path: &str) -> &str {
    if path.is_empty() {
        NON_FIELD_ERRORS
    } else {
        path
    }
}

/// Errors raised by the forms API gateway
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("http {status}")]
    Http { status: u16, errors: FieldErrors },
    #[error("json error: {0}")]
    Serde(String),
}

impl ApiError {
    /// Field-keyed view of the failure, ready to be shown next to the form
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            Self::Http { status, errors } if errors.is_empty() => {
                FieldErrors::single(NON_FIELD_ERRORS, format!("Request failed with status {status}"))
            }
            Self::Http { errors, .. } => errors.clone(),
            other => FieldErrors::single(NON_FIELD_ERRORS, other.to_string()),
        }
    }
}
