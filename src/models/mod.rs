//! Data models for HubSpot entities.
//!
//! This module contains the data structures representing CRM records, searches,
//! form submissions and file uploads as they travel over the HubSpot API.

pub mod deal;
pub mod file;
pub mod form;
pub mod object;
pub mod search;

pub use deal::{DealAssociation, DealProperties};
pub use file::{FileAccess, FileUploadOptions, FileUploadResponse};
pub use form::{ApplicationForm, FormValue, Submission, SubmissionMap, SubmissionPage};
pub use object::{Association, AssociationList, AssociationRef, CrmObject, ObjectType, PropertyMap};
pub use search::{Filter, FilterGroup, SearchRequest, SearchResponse};
