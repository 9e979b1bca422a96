//! hubspot-dealflow - client bindings for the HubSpot APIs behind the deal-flow pipeline.
//!
//! Every operation is a single request/response exchange against HubSpot, with
//! light post-processing: enforcing at-most-one associations, checking that a
//! search matched exactly one record, paging through form submissions, and
//! building multipart upload bodies.
//!
//! # Architecture
//!
//! - **config**: Explicit configuration loaded from environment variables
//! - **error**: Custom error types for precise error handling
//! - **models**: Records, property maps, searches, submissions and files
//! - **client**: The synchronous client, its pluggable transport and an async wrapper
//! - **metrics**: Request counters and timings
//! - **cli**: The `hubspot-dealflow` command-line interface

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;

pub use client::{AsyncHubspotClient, AsyncHubspotClientImpl, HubspotClient, Transport};
pub use config::{AuthMode, Config, DealFlowSettings};
pub use error::{ConfigError, ConfigResult, HubspotError, HubspotResult};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use models::{
    ApplicationForm, Association, CrmObject, DealAssociation, DealProperties, FileUploadOptions,
    ObjectType, PropertyMap, SearchRequest, SubmissionMap, SubmissionPage,
};
