//! Deal properties used by the deal-flow pipeline.
//!
//! Deals are plain [`PropertyMap`]s on the wire. [`DealProperties`] is a typed
//! builder over that map and the accessors on [`CrmObject`] read it back, so
//! there is one representation for requests and responses alike.

use super::object::{CrmObject, ObjectType, PropertyMap};

pub const DEAL_NAME: &str = "dealname";
pub const DEAL_STAGE: &str = "dealstage";
pub const PIPELINE: &str = "pipeline";
pub const APPLICATION_ID: &str = "application_id";
pub const OWNER_ID: &str = "hubspot_owner_id";
pub const VALIDATION_CHECK_FINISHED: &str = "validation_check_finished";
/// Application id property written by deal updates.
pub const UUID: &str = "uuid";

/// Records a deal can be associated with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DealAssociation {
    Company,
    Contact,
}

impl DealAssociation {
    pub fn object_type(self) -> ObjectType {
        match self {
            DealAssociation::Company => ObjectType::Company,
            DealAssociation::Contact => ObjectType::Contact,
        }
    }

    /// Association label sent in the URL.
    pub fn label(self) -> &'static str {
        match self {
            DealAssociation::Company => "deal_to_company",
            DealAssociation::Contact => "deal_to_contact",
        }
    }
}

/// Builder for a deal's property map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealProperties(PropertyMap);

impl DealProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn deal_name(self, name: impl Into<String>) -> Self {
        self.set(DEAL_NAME, name)
    }

    pub fn deal_stage(self, stage: impl Into<String>) -> Self {
        self.set(DEAL_STAGE, stage)
    }

    pub fn pipeline(self, pipeline: impl Into<String>) -> Self {
        self.set(PIPELINE, pipeline)
    }

    pub fn application_id(self, id: impl Into<String>) -> Self {
        self.set(APPLICATION_ID, id)
    }

    pub fn owner_id(self, owner: impl Into<String>) -> Self {
        self.set(OWNER_ID, owner)
    }

    pub fn validation_check_finished(self, finished: bool) -> Self {
        self.set(VALIDATION_CHECK_FINISHED, finished.to_string())
    }

    /// Set an arbitrary property.
    pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        self.0.insert(name, value);
        self
    }

    pub fn as_map(&self) -> &PropertyMap {
        &self.0
    }

    pub fn into_map(self) -> PropertyMap {
        self.0
    }
}

impl From<DealProperties> for PropertyMap {
    fn from(properties: DealProperties) -> Self {
        properties.0
    }
}

impl CrmObject {
    pub fn deal_name(&self) -> Option<&str> {
        self.property(DEAL_NAME)
    }

    pub fn deal_stage(&self) -> Option<&str> {
        self.property(DEAL_STAGE)
    }

    pub fn pipeline(&self) -> Option<&str> {
        self.property(PIPELINE)
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.property(OWNER_ID)
    }

    pub fn validation_check_finished(&self) -> Option<bool> {
        self.properties.get_bool(VALIDATION_CHECK_FINISHED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_serializes_to_flat_properties() {
        let props = DealProperties::new()
            .deal_name("Acme Ltd")
            .deal_stage("appointmentscheduled")
            .validation_check_finished(false);

        assert_eq!(
            serde_json::to_value(props.as_map()).unwrap(),
            json!({
                "dealname": "Acme Ltd",
                "dealstage": "appointmentscheduled",
                "validation_check_finished": "false"
            })
        );
    }

    #[test]
    fn test_accessors_read_response_properties() {
        let deal: CrmObject = serde_json::from_value(json!({
            "id": "dealid",
            "properties": {
                "dealname": "Acme Ltd",
                "pipeline": "default",
                "amount": null,
                "validation_check_finished": "true"
            }
        }))
        .unwrap();

        assert_eq!(deal.deal_name(), Some("Acme Ltd"));
        assert_eq!(deal.pipeline(), Some("default"));
        assert_eq!(deal.deal_stage(), None);
        assert_eq!(deal.validation_check_finished(), Some(true));
    }

    #[test]
    fn test_association_labels() {
        assert_eq!(DealAssociation::Company.label(), "deal_to_company");
        assert_eq!(DealAssociation::Contact.object_type(), ObjectType::Contact);
    }
}
