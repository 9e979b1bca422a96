//! Error types for the HubSpot deal-flow client.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::models::ObjectType;
use thiserror::Error;

/// Errors that can occur when interacting with the HubSpot API.
#[derive(Error, Debug)]
pub enum HubspotError {
    /// HTTP request never produced a response
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// API returned a non-success status code
    #[error("API error (status {status}): {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// More associations than the relation allows
    #[error(
        "There are {count} {related} associated with {} '{object_id}', there should be at most one",
        .object.singular()
    )]
    MultipleAssociations {
        object: ObjectType,
        object_id: String,
        related: ObjectType,
        count: usize,
    },

    /// A search that must be unique matched several records
    #[error("Multiple {object} found for {property} '{value}', there should only be one")]
    MultipleMatches {
        object: ObjectType,
        property: String,
        value: String,
        count: usize,
    },

    /// Nothing matched the searched key/value
    #[error("Could not find {entity} with {key} '{value}'")]
    NotFound {
        entity: &'static str,
        key: String,
        value: String,
    },

    /// The record found disagrees with the caller's expectation
    #[error("Record '{id}' has {property} '{actual}', but we expected '{expected}'")]
    PropertyMismatch {
        id: String,
        property: String,
        expected: String,
        actual: String,
    },

    /// The record found lacks a property the caller needs
    #[error("The {entity} '{id}' does not have a {property}")]
    MissingProperty {
        entity: &'static str,
        id: String,
        property: String,
    },

    /// Paginated search gave up before the listing was exhausted
    #[error("Gave up searching for {key} '{value}' after {pages} pages")]
    PageLimitExceeded {
        key: String,
        value: String,
        pages: usize,
    },

    /// The listing handed back a cursor that was already visited
    #[error("Pagination cursor '{cursor}' was returned twice")]
    CursorCycle { cursor: String },

    /// The operation needs configuration that was not provided
    #[error(transparent)]
    Configuration(#[from] ConfigError),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with HubspotError
pub type HubspotResult<T> = Result<T, HubspotError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
