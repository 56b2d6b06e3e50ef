//! Form steps and form definitions as exchanged with the forms API

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde_json::Value;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::Arc;
use uuid::Uuid;

/// A reusable, independently stored configuration of field components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinition {
    pub uuid: String,
    /// References embedded in a step may carry only the uuid
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub login_required: bool,
    /// Component configuration document, opaque to the editor
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub configuration: serde_json::Value,
}

/// The definition slot of a form step: either still empty or pointing at a
/// form definition.
#[derive(Debug, Clone, Default)]
pub enum StepDefinition {
    #[default]
    Empty,
    Definition(Arc<FormDefinition>),
}

impl StepDefinition {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn uuid(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Definition(definition) => Some(&definition.uuid),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Definition(definition) => Some(&definition.name),
        }
    }

    /// True when this slot holds exactly `definition` (same allocation).
    pub fn is_same(&self, definition: &Arc<FormDefinition>) -> bool {
        match self {
            Self::Empty => false,
            Self::Definition(current) => Arc::ptr_eq(current, definition),
        }
    }
}

impl PartialEq for StepDefinition {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Definition(a), Self::Definition(b)) => self.is_same(b) || a == b,
            _ => false,
        }
    }
}

impl Serialize for StepDefinition {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // An empty slot goes over the wire as `{}`
            Self::Empty => serializer.serialize_map(Some(0))?.end(),
            Self::Definition(definition) => definition.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for StepDefinition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Definition(FormDefinition),
            Placeholder(Value),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Definition(definition) => Ok(Self::Definition(Arc::new(definition))),
            Wire::Placeholder(value) if is_placeholder(&value) => Ok(Self::Empty),
            Wire::Placeholder(other) => Err(D::Error::custom(format!(
                "expected a form definition or an empty placeholder, got {other}"
            ))),
        }
    }
}

/// `{}`, `""` and `null` all mean "nothing picked yet"
fn is_placeholder(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// One page of a multi-step form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStep {
    #[serde(default)]
    pub form_definition: StepDefinition,
    pub order: usize,
}

impl FormStep {
    /// A step whose definition has not been picked yet
    pub fn placeholder(order: usize) -> Self {
        Self {
            form_definition: StepDefinition::Empty,
            order,
        }
    }

    pub fn with_definition(definition: Arc<FormDefinition>, order: usize) -> Self {
        Self {
            form_definition: StepDefinition::Definition(definition),
            order,
        }
    }
}

/// Body of the create/update request for a form
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormPayload {
    pub uuid: Uuid,
    pub name: String,
    pub slug: String,
    pub form_steps: Vec<FormStep>,
}

/// Response of the server-side form duplication
#[derive(Debug, Clone, Deserialize)]
pub struct CopiedForm {
    pub uuid: Uuid,
}
