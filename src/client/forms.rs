//! Form submissions and the paginated key/value search over them.

use super::{segment, HubspotClient};
use crate::error::{HubspotError, HubspotResult};
use crate::models::{ApplicationForm, SubmissionMap, SubmissionPage};
use std::collections::HashSet;

/// Submissions requested per page.
const PAGE_SIZE: &str = "50";

impl HubspotClient {
    /// Fetch one page of a form's submissions.
    ///
    /// `after` is the cursor from the previous page; `None` fetches the first page.
    pub fn submissions_page(
        &self,
        form_id: &str,
        after: Option<&str>,
    ) -> HubspotResult<SubmissionPage> {
        let path = format!("/form-integrations/v1/submissions/forms/{}", segment(form_id));

        let page: SubmissionPage = match after {
            Some(cursor) => self.get(&path, &[("limit", PAGE_SIZE), ("after", cursor)])?,
            None => self.get(&path, &[("limit", PAGE_SIZE)])?,
        };

        self.metrics.record_page_fetched();
        self.metrics.record_records_fetched(page.results.len());
        Ok(page)
    }

    /// Page through a form's submissions until one has `key` equal to `value`.
    ///
    /// Stops at the first match. Fails with [`HubspotError::NotFound`] once the
    /// last page has been scanned, [`HubspotError::PageLimitExceeded`] after the
    /// configured page ceiling, and [`HubspotError::CursorCycle`] if HubSpot
    /// hands back a cursor it already returned.
    pub fn find_submission(
        &self,
        form_id: &str,
        key: &str,
        value: &str,
    ) -> HubspotResult<SubmissionMap> {
        tracing::info!("Searching form '{}' for submission with {} '{}'", form_id, key, value);

        let max_pages = self.config.max_submission_pages;
        let mut cursor: Option<String> = None;
        let mut seen = HashSet::new();

        for page_number in 1..=max_pages {
            let page = self.submissions_page(form_id, cursor.as_deref())?;

            if let Some(found) = page.find_by(key, value) {
                tracing::info!("Found submission with {} '{}' on page {}", key, value, page_number);
                return Ok(found);
            }

            let Some(next) = page.next_cursor() else {
                return Err(HubspotError::NotFound {
                    entity: "submission",
                    key: key.to_string(),
                    value: value.to_string(),
                });
            };

            if !seen.insert(next.to_string()) {
                tracing::warn!("Form '{}' returned cursor '{}' twice", form_id, next);
                return Err(HubspotError::CursorCycle {
                    cursor: next.to_string(),
                });
            }

            tracing::debug!("Try next page after '{}'", next);
            cursor = Some(next.to_string());
        }

        tracing::warn!(
            "Stopped searching form '{}' for {} '{}' after {} pages",
            form_id,
            key,
            value,
            max_pages
        );
        Err(HubspotError::PageLimitExceeded {
            key: key.to_string(),
            value: value.to_string(),
            pages: max_pages,
        })
    }

    /// Find the application submitted with this application id.
    ///
    /// The submission must answer `company_number`.
    pub fn find_application_form(
        &self,
        form_id: &str,
        application_id: &str,
    ) -> HubspotResult<ApplicationForm> {
        let answers = self.find_submission(form_id, "application_id", application_id)?;
        ApplicationForm::from_answers(application_id, answers)
    }
}
