//! "Create Person" action: adds a new person/contact to Copper.

use serde_json::Value;

use crate::copper_client::CopperClient;
use crate::errors::{ActionError, Operation};
use crate::http::{HttpInvoker, HttpMethod};
use crate::models::{non_empty, EmailEntry, PersonBody, PersonInput, PhoneEntry};

/// Rejects input the form marks as invalid (a missing or empty name).
pub fn validate_person(input: &PersonInput) -> Result<(), ActionError> {
    if input.name.is_empty() {
        return Err(ActionError::Validation("Name is required".to_string()));
    }
    Ok(())
}

/// Builds the `POST /people` body.
///
/// Each optional field is mapped independently: blank text, an empty tag list
/// or a zero company id are left out of the body.
pub fn build_person_body(input: &PersonInput) -> PersonBody {
    let emails = non_empty(&input.email).map(|email| {
        vec![EmailEntry {
            email: email.to_string(),
            category: input.email_category.unwrap_or_default(),
        }]
    });

    let phone_numbers = non_empty(&input.phone_number).map(|number| {
        vec![PhoneEntry {
            number: number.to_string(),
            category: input.phone_category.unwrap_or_default(),
        }]
    });

    PersonBody {
        name: input.name.clone(),
        emails,
        phone_numbers,
        title: non_empty(&input.title).map(str::to_string),
        company_id: input.company_id.filter(|id| *id != 0),
        tags: if input.tags.is_empty() {
            None
        } else {
            Some(input.tags.clone())
        },
        address: input.address.to_address(),
    }
}

impl<I: HttpInvoker> CopperClient<I> {
    /// Creates a person in Copper and returns Copper's response body.
    pub async fn create_person(&self, input: &PersonInput) -> Result<Value, ActionError> {
        validate_person(input)?;

        let body = build_person_body(input);
        let url = self.endpoint(&["people"], Operation::CreatePerson)?;

        tracing::info!("Creating person in Copper: {}", body.name);

        self.send(HttpMethod::Post, url, &body)
            .await
            .map_err(|failure| {
                tracing::warn!("Copper person creation failed: {}", failure);
                ActionError::from_failure(Operation::CreatePerson, failure, None)
            })
    }
}
