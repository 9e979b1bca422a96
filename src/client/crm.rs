//! Contacts, companies and the associations between CRM records.

use super::{decode, segment, HubspotClient, Method};
use crate::error::{HubspotError, HubspotResult};
use crate::models::{
    Association, AssociationList, AssociationRef, CrmObject, ObjectType, PropertyMap,
    SearchRequest, SearchResponse,
};
use serde::Serialize;

#[derive(Serialize)]
pub(crate) struct PropertiesEnvelope<'a> {
    pub properties: &'a PropertyMap,
}

impl HubspotClient {
    // ========================= Associations =========================

    /// Fetch a record with its associations of one kind and return the single related id.
    ///
    /// Zero associations is [`Association::NotAssociated`]; more than one is
    /// [`HubspotError::MultipleAssociations`]. Request failures are errors,
    /// never "not associated".
    pub fn lookup_association(
        &self,
        object: ObjectType,
        id: &str,
        related: ObjectType,
    ) -> HubspotResult<Association> {
        let path = format!("/crm/v3/objects/{}/{}", object.plural(), segment(id));
        let record: CrmObject = self.get(
            &path,
            &[("associations", related.singular()), ("archived", "false")],
        )?;

        at_most_one(object, id, related, record.associated(related))
    }

    /// List a record's associations of one kind through the associations endpoint.
    pub fn list_associations(
        &self,
        object: ObjectType,
        id: &str,
        related: ObjectType,
    ) -> HubspotResult<Vec<AssociationRef>> {
        let path = format!(
            "/crm/v3/objects/{}/{}/associations/{}",
            object.plural(),
            segment(id),
            related.singular()
        );
        let list: AssociationList = self.get(&path, &[("limit", "500")])?;
        tracing::debug!(
            "{} '{}' has {} associated {}",
            object.singular(),
            id,
            list.results.len(),
            related
        );
        Ok(list.results)
    }

    /// The company associated with a contact, if any.
    pub fn get_company_for_contact(&self, contact_id: &str) -> HubspotResult<Association> {
        self.lookup_association(ObjectType::Contact, contact_id, ObjectType::Company)
    }

    /// The deal associated with a company, if any.
    pub fn get_deal_for_company(&self, company_id: &str) -> HubspotResult<Association> {
        let deals = self.list_associations(ObjectType::Company, company_id, ObjectType::Deal)?;
        at_most_one(ObjectType::Company, company_id, ObjectType::Deal, &deals)
    }

    // ========================= Search =========================

    /// Run one search request and return every record on the first page.
    pub fn search(
        &self,
        object: ObjectType,
        request: &SearchRequest,
    ) -> HubspotResult<Vec<CrmObject>> {
        let path = format!("/crm/v3/objects/{}/search", object.plural());
        tracing::info!("Searching {} with {} filter groups", object, request.filter_groups.len());

        let response: SearchResponse = self.send_json(Method::Post, &path, request)?;
        self.metrics.record_records_fetched(response.results.len());
        Ok(response.results)
    }

    /// Search for records whose properties equal every given value.
    pub fn search_by_properties(
        &self,
        object: ObjectType,
        filters: &[(&str, &str)],
        properties: &[&str],
    ) -> HubspotResult<Vec<CrmObject>> {
        let request = SearchRequest::all_equal(filters.iter().copied())
            .with_properties(properties.iter().copied());
        self.search(object, &request)
    }

    /// The id of the one contact with this application id.
    ///
    /// The contact's `company_number` must match `company_number`.
    pub fn get_contact_id(
        &self,
        application_id: &str,
        company_number: &str,
    ) -> HubspotResult<String> {
        let mut contacts = self.search_by_properties(
            ObjectType::Contact,
            &[("application_id", application_id)],
            &["contact_id", "company_number"],
        )?;

        match contacts.len() {
            0 => Err(HubspotError::NotFound {
                entity: "contact",
                key: "application_id".to_string(),
                value: application_id.to_string(),
            }),
            1 => {
                let contact = contacts.remove(0);
                let actual = contact.property("company_number").unwrap_or_default();
                if actual != company_number {
                    return Err(HubspotError::PropertyMismatch {
                        id: contact.id.clone(),
                        property: "company_number".to_string(),
                        expected: company_number.to_string(),
                        actual: actual.to_string(),
                    });
                }
                Ok(contact.id)
            }
            count => Err(HubspotError::MultipleMatches {
                object: ObjectType::Contact,
                property: "application_id".to_string(),
                value: application_id.to_string(),
                count,
            }),
        }
    }

    // ========================= Objects =========================

    /// Create a record and return it as HubSpot stored it.
    pub fn create_object(
        &self,
        object: ObjectType,
        properties: &PropertyMap,
    ) -> HubspotResult<CrmObject> {
        let path = format!("/crm/v3/objects/{}", object.plural());
        let created: CrmObject =
            self.send_json(Method::Post, &path, &PropertiesEnvelope { properties })?;
        tracing::info!("Created {} '{}'", object.singular(), created.id);
        Ok(created)
    }

    /// Overwrite the given properties of a record.
    pub fn update_object(
        &self,
        object: ObjectType,
        id: &str,
        properties: &PropertyMap,
    ) -> HubspotResult<()> {
        let path = format!("/crm/v3/objects/{}/{}", object.plural(), segment(id));
        self.send_json_discard(Method::Patch, &path, &PropertiesEnvelope { properties })
    }

    /// Fetch a record with the requested properties.
    pub fn get_object(
        &self,
        object: ObjectType,
        id: &str,
        properties: &[&str],
    ) -> HubspotResult<CrmObject> {
        let path = format!("/crm/v3/objects/{}/{}", object.plural(), segment(id));
        let properties = properties.join(",");
        let response = if properties.is_empty() {
            self.execute(Method::Get, &path, &[], None)?
        } else {
            self.execute(Method::Get, &path, &[("properties", properties.as_str())], None)?
        };
        decode(&response)
    }
}

fn at_most_one(
    object: ObjectType,
    id: &str,
    related: ObjectType,
    associations: &[AssociationRef],
) -> HubspotResult<Association> {
    match associations {
        [] => Ok(Association::NotAssociated),
        [only] => Ok(Association::Found(only.id.clone())),
        many => Err(HubspotError::MultipleAssociations {
            object,
            object_id: id.to_string(),
            related,
            count: many.len(),
        }),
    }
}
