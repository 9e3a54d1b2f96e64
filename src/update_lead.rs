//! "Update Lead" action: partial update of an existing Copper lead.
//!
//! Only fields that carry a value are sent. The clear flags null out email,
//! phone numbers or address and win over any value given for the same field.

use serde_json::Value;

use crate::copper_client::CopperClient;
use crate::errors::{ActionError, Operation};
use crate::http::{HttpInvoker, HttpMethod};
use crate::models::{
    non_empty, EmailEntry, LeadUpdateBody, LeadUpdateInput, Patch, PhoneEntry, MAX_CUSTOM_FIELDS,
};

pub fn validate_lead_update(input: &LeadUpdateInput) -> Result<(), ActionError> {
    if input.lead_id.is_empty() {
        return Err(ActionError::Validation("Lead ID is required".to_string()));
    }
    if input.custom_fields.len() > MAX_CUSTOM_FIELDS {
        return Err(ActionError::Validation(format!(
            "At most {} custom fields can be updated at once, got {}",
            MAX_CUSTOM_FIELDS,
            input.custom_fields.len()
        )));
    }
    Ok(())
}

/// Builds the `PUT /leads/{id}` body.
pub fn build_lead_update_body(input: &LeadUpdateInput) -> LeadUpdateBody {
    let email = if input.clear_email {
        Patch::Clear
    } else if let Some(email) = non_empty(&input.email) {
        Patch::Set(EmailEntry {
            email: email.to_string(),
            category: input.email_category.unwrap_or_default(),
        })
    } else {
        Patch::Unchanged
    };

    let phone_numbers = if input.clear_phone {
        Patch::Clear
    } else if let Some(number) = non_empty(&input.phone_number) {
        Patch::Set(vec![PhoneEntry {
            number: number.to_string(),
            category: input.phone_category.unwrap_or_default(),
        }])
    } else {
        Patch::Unchanged
    };

    let address = if input.clear_address {
        Patch::Clear
    } else {
        input
            .address
            .to_address()
            .map_or(Patch::Unchanged, Patch::Set)
    };

    let custom_fields: Vec<_> = input
        .custom_fields
        .iter()
        .filter_map(|field| field.to_value())
        .collect();

    LeadUpdateBody {
        name: non_empty(&input.name).map(str::to_string),
        details: non_empty(&input.details).map(str::to_string),
        title: non_empty(&input.title).map(str::to_string),
        company_name: non_empty(&input.company_name).map(str::to_string),
        monetary_value: input.monetary_value,
        customer_source_id: input.customer_source_id,
        assignee_id: input.assignee_id,
        status_id: input.status_id,
        email,
        phone_numbers,
        address,
        custom_fields: if custom_fields.is_empty() {
            None
        } else {
            Some(custom_fields)
        },
    }
}

impl<I: HttpInvoker> CopperClient<I> {
    /// Applies a partial update to a lead and returns Copper's response body.
    ///
    /// Fails with `ActionError::NoFieldsProvided` without touching the network
    /// when the update would send an empty body.
    pub async fn update_lead(&self, input: &LeadUpdateInput) -> Result<Value, ActionError> {
        validate_lead_update(input)?;

        let body = build_lead_update_body(input);
        if body.is_empty() {
            return Err(ActionError::NoFieldsProvided);
        }

        let url = self.endpoint(&["leads", input.lead_id.as_str()], Operation::UpdateLead)?;

        tracing::info!("Updating lead {} in Copper", input.lead_id);
        tracing::debug!(
            "Lead {} update fields: {:?}",
            input.lead_id,
            serde_json::to_value(&body)
                .ok()
                .and_then(|v| v.as_object().map(|o| o.keys().cloned().collect::<Vec<_>>()))
        );

        self.send(HttpMethod::Put, url, &body)
            .await
            .map_err(|failure| {
                tracing::warn!("Copper update of lead {} failed: {}", input.lead_id, failure);
                ActionError::from_failure(
                    Operation::UpdateLead,
                    failure,
                    Some(input.lead_id.as_str()),
                )
            })
    }
}
