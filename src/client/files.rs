//! File uploads through the Files v3 API.

use super::multipart::MultipartForm;
use super::{decode, segment, HubspotClient, Method};
use crate::error::{HubspotError, HubspotResult};
use crate::models::file::FileAccessUpdate;
use crate::models::{FileAccess, FileUploadOptions, FileUploadResponse};

impl HubspotClient {
    /// Upload a file with the default options and return its preview URL.
    pub fn upload_file(
        &self,
        content: &[u8],
        folder_path: &str,
        file_name: &str,
    ) -> HubspotResult<String> {
        self.upload_file_with_options(content, folder_path, file_name, &FileUploadOptions::default())
    }

    /// Upload a file and return its preview URL in the configured portal.
    ///
    /// Anything but `201 Created` is an error.
    pub fn upload_file_with_options(
        &self,
        content: &[u8],
        folder_path: &str,
        file_name: &str,
        options: &FileUploadOptions,
    ) -> HubspotResult<String> {
        let portal_id = self.config.require_portal_id()?;

        let form = MultipartForm::new()
            .file("file", file_name, content)
            .text("folderPath", folder_path)
            .text("options", &serde_json::to_string(options)?);

        tracing::info!(
            "Uploading '{}' ({} bytes) to '{}'",
            file_name,
            content.len(),
            folder_path
        );

        let payload = (form.content_type(), form.finish());
        let response = self.execute(Method::Post, "/files/v3/files", &[], Some(payload))?;

        if response.status != 201 {
            tracing::warn!("File upload answered with status {}", response.status);
            return Err(HubspotError::UpstreamStatus {
                status: response.status,
                body: response.body,
            });
        }

        let uploaded: FileUploadResponse = decode(&response)?;
        self.metrics.record_file_uploaded();

        Ok(self.preview_url(portal_id, &uploaded.id))
    }

    /// Make an uploaded file publicly reachable (not indexed) and return its URL.
    pub fn make_file_public(&self, file_id: &str) -> HubspotResult<String> {
        let path = format!("/files/v3/files/{}", segment(file_id));
        let update = FileAccessUpdate {
            access: FileAccess::PublicNotIndexable,
        };

        let file: FileUploadResponse = self.send_json(Method::Patch, &path, &update)?;
        file.url.ok_or_else(|| HubspotError::MissingProperty {
            entity: "file",
            id: file_id.to_string(),
            property: "url".to_string(),
        })
    }

    /// Preview URL of a file in the configured portal.
    pub fn file_preview_url(&self, file_id: &str) -> HubspotResult<String> {
        let portal_id = self.config.require_portal_id()?;
        Ok(self.preview_url(portal_id, file_id))
    }

    fn preview_url(&self, portal_id: &str, file_id: &str) -> String {
        format!(
            "{}/file-preview/{}/file/{}",
            self.config.app_base_url.trim_end_matches('/'),
            portal_id,
            file_id
        )
    }
}
