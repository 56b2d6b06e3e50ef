//! Trait abstraction for the forms API gateway to enable mocking in tests

use super::error::ApiError;
use crate::state::{FormDefinition, FormPayload, FormStep};
use async_trait::async_trait;
use uuid::Uuid;

/// Operations the editor shell performs against the forms API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FormsApi: Send + Sync {
    /// Fetch the persisted steps of an existing form
    async fn fetch_form_steps(&self, form_uuid: Uuid) -> Result<Vec<FormStep>, ApiError>;

    /// Fetch every available form definition
    async fn fetch_form_definitions(&self) -> Result<Vec<FormDefinition>, ApiError>;

    /// Create (`is_new`) or update the form
    async fn save_form(&self, payload: &FormPayload, is_new: bool) -> Result<(), ApiError>;

    /// Duplicate the form server-side, returning the uuid of the copy
    async fn copy_form(&self, form_uuid: Uuid) -> Result<Uuid, ApiError>;
}
