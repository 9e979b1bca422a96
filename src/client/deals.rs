//! Deals and the deal-flow card workflow.
//!
//! A deal-flow card is a deal created in the configured pipeline and stage,
//! owned by the configured owner, and associated with exactly one company and
//! one contact.

use super::{segment, HubspotClient, Method};
use crate::error::HubspotResult;
use crate::models::deal;
use crate::models::{CrmObject, DealAssociation, DealProperties, ObjectType, PropertyMap};

impl HubspotClient {
    /// Associate a deal with a company or a contact.
    pub fn associate_deal(
        &self,
        deal_id: &str,
        target: DealAssociation,
        target_id: &str,
    ) -> HubspotResult<()> {
        let path = format!(
            "/crm/v3/objects/deals/{}/associations/{}/{}/{}",
            segment(deal_id),
            target.object_type().singular(),
            segment(target_id),
            target.label()
        );
        self.execute(Method::Put, &path, &[], None)?;
        tracing::debug!(
            "Associated deal '{}' with {} '{}'",
            deal_id,
            target.object_type().singular(),
            target_id
        );
        Ok(())
    }

    pub fn create_deal(&self, properties: &PropertyMap) -> HubspotResult<CrmObject> {
        self.create_object(ObjectType::Deal, properties)
    }

    pub fn update_deal(&self, deal_id: &str, properties: &PropertyMap) -> HubspotResult<()> {
        self.update_object(ObjectType::Deal, deal_id, properties)
    }

    /// Create a deal-flow card and associate it with a company and a contact.
    ///
    /// Issues three requests in order: create, associate company, associate
    /// contact. The first failure is returned; a card created before a failed
    /// association is left in place.
    pub fn create_deal_flow_card(
        &self,
        card_name: &str,
        contact_id: &str,
        company_id: &str,
        application_id: &str,
    ) -> HubspotResult<CrmObject> {
        let settings = self.config.require_deal_flow()?;
        tracing::info!("Creating a deal flow card for application '{}'", application_id);

        let properties = DealProperties::new()
            .deal_name(card_name)
            .deal_stage(&settings.starting_stage)
            .pipeline(&settings.pipeline)
            .application_id(application_id)
            .owner_id(&settings.owner_id)
            .validation_check_finished(false);

        let deal = self.create_deal(properties.as_map())?;

        self.associate_deal(&deal.id, DealAssociation::Company, company_id)?;
        self.associate_deal(&deal.id, DealAssociation::Contact, contact_id)?;

        Ok(deal)
    }

    /// Rename and restage a deal-flow card.
    pub fn update_deal_flow_card(
        &self,
        deal_id: &str,
        deal_name: &str,
        deal_stage: &str,
        application_id: &str,
        validation_check_finished: bool,
    ) -> HubspotResult<()> {
        tracing::info!("Updating deal flow card '{}'", deal_id);

        let properties = DealProperties::new()
            .deal_name(deal_name)
            .deal_stage(deal_stage)
            .set(deal::UUID, application_id)
            .validation_check_finished(validation_check_finished);

        self.update_deal(deal_id, properties.as_map())
    }

    /// Set only the `validation_check_finished` flag of a deal-flow card.
    pub fn update_deal_validation_status(
        &self,
        deal_id: &str,
        validation_check_finished: bool,
    ) -> HubspotResult<()> {
        tracing::info!(
            "Setting validation status of deal flow card '{}' to {}",
            deal_id,
            validation_check_finished
        );

        let properties = DealProperties::new().validation_check_finished(validation_check_finished);
        self.update_deal(deal_id, properties.as_map())
    }
}
