//! Async wrapper around the synchronous HubspotClient.
//!
//! This module provides an async interface to the synchronous HubspotClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::HubspotClient;
use crate::error::{HubspotError, HubspotResult};
use crate::models::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Async versions of the caller-facing HubspotClient operations.
#[async_trait]
pub trait AsyncHubspotClient: Send + Sync {
    async fn get_company_for_contact(&self, contact_id: &str) -> HubspotResult<Association>;
    async fn get_deal_for_company(&self, company_id: &str) -> HubspotResult<Association>;
    async fn get_contact_id(
        &self,
        application_id: &str,
        company_number: &str,
    ) -> HubspotResult<String>;
    async fn search(
        &self,
        object: ObjectType,
        request: SearchRequest,
    ) -> HubspotResult<Vec<CrmObject>>;

    async fn find_submission(
        &self,
        form_id: &str,
        key: &str,
        value: &str,
    ) -> HubspotResult<SubmissionMap>;
    async fn find_application_form(
        &self,
        form_id: &str,
        application_id: &str,
    ) -> HubspotResult<ApplicationForm>;

    async fn create_deal_flow_card(
        &self,
        card_name: &str,
        contact_id: &str,
        company_id: &str,
        application_id: &str,
    ) -> HubspotResult<CrmObject>;
    async fn update_deal(&self, deal_id: &str, properties: PropertyMap) -> HubspotResult<()>;
    async fn update_deal_validation_status(
        &self,
        deal_id: &str,
        validation_check_finished: bool,
    ) -> HubspotResult<()>;

    async fn upload_file(
        &self,
        content: Vec<u8>,
        folder_path: &str,
        file_name: &str,
    ) -> HubspotResult<String>;
}

/// Async wrapper around synchronous HubspotClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool, preventing blocking
/// the async runtime.
#[derive(Clone)]
pub struct AsyncHubspotClientImpl {
    client: Arc<HubspotClient>,
}

impl AsyncHubspotClientImpl {
    pub fn new(client: HubspotClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Run a client operation on the blocking pool.
    async fn run<T, F>(&self, op: F) -> HubspotResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&HubspotClient) -> HubspotResult<T> + Send + 'static,
    {
        let client = self.client.clone();
        tokio::task::spawn_blocking(move || op(&client))
            .await
            .map_err(|e| HubspotError::Transport(format!("Task join error: {}", e)))?
    }
}

#[async_trait]
impl AsyncHubspotClient for AsyncHubspotClientImpl {
    async fn get_company_for_contact(&self, contact_id: &str) -> HubspotResult<Association> {
        let contact_id = contact_id.to_string();
        self.run(move |client| client.get_company_for_contact(&contact_id))
            .await
    }

    async fn get_deal_for_company(&self, company_id: &str) -> HubspotResult<Association> {
        let company_id = company_id.to_string();
        self.run(move |client| client.get_deal_for_company(&company_id))
            .await
    }

    async fn get_contact_id(
        &self,
        application_id: &str,
        company_number: &str,
    ) -> HubspotResult<String> {
        let application_id = application_id.to_string();
        let company_number = company_number.to_string();
        self.run(move |client| client.get_contact_id(&application_id, &company_number))
            .await
    }

    async fn search(
        &self,
        object: ObjectType,
        request: SearchRequest,
    ) -> HubspotResult<Vec<CrmObject>> {
        self.run(move |client| client.search(object, &request)).await
    }

    async fn find_submission(
        &self,
        form_id: &str,
        key: &str,
        value: &str,
    ) -> HubspotResult<SubmissionMap> {
        let form_id = form_id.to_string();
        let key = key.to_string();
        let value = value.to_string();
        self.run(move |client| client.find_submission(&form_id, &key, &value))
            .await
    }

    async fn find_application_form(
        &self,
        form_id: &str,
        application_id: &str,
    ) -> HubspotResult<ApplicationForm> {
        let form_id = form_id.to_string();
        let application_id = application_id.to_string();
        self.run(move |client| client.find_application_form(&form_id, &application_id))
            .await
    }

    async fn create_deal_flow_card(
        &self,
        card_name: &str,
        contact_id: &str,
        company_id: &str,
        application_id: &str,
    ) -> HubspotResult<CrmObject> {
        let card_name = card_name.to_string();
        let contact_id = contact_id.to_string();
        let company_id = company_id.to_string();
        let application_id = application_id.to_string();
        self.run(move |client| {
            client.create_deal_flow_card(&card_name, &contact_id, &company_id, &application_id)
        })
        .await
    }

    async fn update_deal(&self, deal_id: &str, properties: PropertyMap) -> HubspotResult<()> {
        let deal_id = deal_id.to_string();
        self.run(move |client| client.update_deal(&deal_id, &properties))
            .await
    }

    async fn update_deal_validation_status(
        &self,
        deal_id: &str,
        validation_check_finished: bool,
    ) -> HubspotResult<()> {
        let deal_id = deal_id.to_string();
        self.run(move |client| {
            client.update_deal_validation_status(&deal_id, validation_check_finished)
        })
        .await
    }

    async fn upload_file(
        &self,
        content: Vec<u8>,
        folder_path: &str,
        file_name: &str,
    ) -> HubspotResult<String> {
        let folder_path = folder_path.to_string();
        let file_name = file_name.to_string();
        self.run(move |client| client.upload_file(&content, &folder_path, &file_name))
            .await
    }
}
