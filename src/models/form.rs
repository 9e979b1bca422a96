//! Form submissions as returned by the form-integrations API.

use crate::error::{HubspotError, HubspotResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// One answered field of a submission.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FormValue {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type_id: Option<String>,
}

impl FormValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            object_type_id: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Epoch milliseconds
    #[serde(default)]
    pub submitted_at: i64,

    #[serde(default)]
    pub values: Vec<FormValue>,
}

impl Submission {
    pub fn submitted_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.submitted_at)
    }

    /// Group this submission's answers by field name.
    pub fn to_map(&self) -> SubmissionMap {
        let mut map = SubmissionMap::default();
        for value in &self.values {
            map.insert(&value.name, &value.value);
        }
        map
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PagingNext {
    #[serde(default)]
    pub after: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<PagingNext>,
}

/// One page of `GET /form-integrations/v1/submissions/forms/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionPage {
    #[serde(default)]
    pub results: Vec<Submission>,

    #[serde(default)]
    pub paging: Option<Paging>,
}

impl SubmissionPage {
    /// Cursor of the following page; `None` on the last page.
    pub fn next_cursor(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|p| p.next.as_ref())
            .and_then(|n| n.after.as_deref())
            .filter(|after| !after.is_empty())
    }

    /// First submission on this page whose `key` field holds `value`.
    pub fn find_by(&self, key: &str, value: &str) -> Option<SubmissionMap> {
        self.results
            .iter()
            .map(Submission::to_map)
            .find(|map| map.has_value(key, value))
    }
}

/// A submission's answers grouped by field name.
///
/// A name may repeat within one submission (multi-select fields); its distinct
/// values are kept in the order they were encountered.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct SubmissionMap(BTreeMap<String, Vec<String>>);

impl SubmissionMap {
    pub fn insert(&mut self, name: &str, value: &str) {
        let values = self.0.entry(name.to_string()).or_default();
        if !values.iter().any(|v| v == value) {
            values.push(value.to_string());
        }
    }

    /// First value recorded for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn get_all(&self, name: &str) -> &[String] {
        self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_value(&self, name: &str, value: &str) -> bool {
        self.get_all(name).iter().any(|v| v == value)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Vec<String>> {
        self.0.iter()
    }
}

/// An application submitted through the deal-flow form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationForm {
    pub application_id: String,
    pub company_name: Option<String>,
    pub company_number: String,
    pub answers: SubmissionMap,
}

impl ApplicationForm {
    pub fn from_answers(application_id: &str, answers: SubmissionMap) -> HubspotResult<Self> {
        let company_number = answers
            .get("company_number")
            .ok_or_else(|| HubspotError::MissingProperty {
                entity: "submission",
                id: application_id.to_string(),
                property: "company number".to_string(),
            })?
            .to_string();

        Ok(Self {
            application_id: application_id.to_string(),
            company_name: answers.get("company").map(str::to_string),
            company_number,
            answers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(values: &[(&str, &str)]) -> Submission {
        Submission {
            submitted_at: 1611226634790,
            values: values.iter().map(|(n, v)| FormValue::new(*n, *v)).collect(),
        }
    }

    #[test]
    fn test_submission_map_single_values() {
        let map = submission(&[("name1", "value1"), ("name2", "value2")]).to_map();

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name1"), Some("value1"));
        assert_eq!(map.get("name2"), Some("value2"));
        assert_eq!(map.get("missing"), None);
    }

    #[test]
    fn test_submission_map_collects_repeated_names_in_order() {
        let map = submission(&[("tag", "a"), ("other", "x"), ("tag", "b"), ("tag", "a")]).to_map();

        assert_eq!(map.get_all("tag"), ["a".to_string(), "b".to_string()]);
        assert_eq!(map.get("tag"), Some("a"));
        assert!(map.has_value("tag", "b"));
    }

    #[test]
    fn test_find_by_scans_results() {
        let page = SubmissionPage {
            results: vec![
                submission(&[("application_id", "some-application_id"), ("other", "v")]),
                submission(&[("application_id", "other-application_id"), ("other", "v")]),
            ],
            paging: None,
        };

        assert!(page.find_by("application_id", "application_id").is_none());

        let found = page.find_by("application_id", "other-application_id").unwrap();
        assert_eq!(found.get("application_id"), Some("other-application_id"));
    }

    #[test]
    fn test_next_cursor() {
        let page: SubmissionPage = serde_json::from_str(
            r#"{"results": [], "paging": {"next": {"after": "page-id", "link": "x"}}}"#,
        )
        .unwrap();
        assert_eq!(page.next_cursor(), Some("page-id"));

        let last: SubmissionPage = serde_json::from_str(r#"{"results": []}"#).unwrap();
        assert_eq!(last.next_cursor(), None);

        let empty_after: SubmissionPage =
            serde_json::from_str(r#"{"results": [], "paging": {"next": {"after": ""}}}"#).unwrap();
        assert_eq!(empty_after.next_cursor(), None);
    }

    #[test]
    fn test_submitted_at_utc() {
        let s = submission(&[]);
        let at = s.submitted_at_utc().unwrap();
        assert_eq!(at.timestamp_millis(), 1611226634790);
    }

    #[test]
    fn test_application_form_requires_company_number() {
        let answers = submission(&[("application_id", "app1"), ("company", "Acme")]).to_map();
        let err = ApplicationForm::from_answers("app1", answers).unwrap_err();
        assert!(matches!(err, HubspotError::MissingProperty { .. }));

        let answers = submission(&[
            ("application_id", "app1"),
            ("company", "Acme"),
            ("company_number", "0001"),
        ])
        .to_map();
        let form = ApplicationForm::from_answers("app1", answers).unwrap();
        assert_eq!(form.company_name.as_deref(), Some("Acme"));
        assert_eq!(form.company_number, "0001");
    }
}
