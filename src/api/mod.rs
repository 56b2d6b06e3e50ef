//! Forms API gateway

mod client;
mod error;
mod traits;

pub use client::{
    ApiConfig, FormsClient, DEFAULT_API_BASE, DEFAULT_FORMS_ENDPOINT,
    DEFAULT_FORM_DEFINITIONS_ENDPOINT,
};
pub use error::{ApiError, FieldErrors, NON_FIELD_ERRORS};
#[cfg(test)]
pub use traits::MockFormsApi;
pub use traits::FormsApi;
