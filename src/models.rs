use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Upper bound on custom field pairs sent in a single lead update.
pub const MAX_CUSTOM_FIELDS: usize = 3;

// ============ Categories ============

/// Category attached to an email address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailCategory {
    #[default]
    Work,
    Personal,
    Other,
}

/// Category attached to a phone number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneCategory {
    #[default]
    Mobile,
    Work,
    Home,
    Other,
}

// ============ Action Inputs ============

/// Postal address fields as entered in a form.
///
/// Every part is optional; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

impl AddressInput {
    /// Builds an address holding only the non-empty parts, or `None` when
    /// every part is empty.
    pub fn to_address(&self) -> Option<Address> {
        let address = Address {
            street: non_empty(&self.street).map(str::to_string),
            city: non_empty(&self.city).map(str::to_string),
            state: non_empty(&self.state).map(str::to_string),
            postal_code: non_empty(&self.postal_code).map(str::to_string),
            country: non_empty(&self.country).map(str::to_string),
        };

        if address == Address::default() {
            None
        } else {
            Some(address)
        }
    }
}

/// Input of the "create person" action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonInput {
    /// Full name of the person. Required.
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email_category: Option<EmailCategory>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone_category: Option<PhoneCategory>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company_id: Option<i64>,
    #[serde(flatten)]
    pub address: AddressInput,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// One (definition id, value) pair for a lead's custom field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldInput {
    pub id: Option<i64>,
    pub value: Option<String>,
}

impl CustomFieldInput {
    pub fn new(id: i64, value: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            value: Some(value.into()),
        }
    }

    /// The pair to send, when both halves are set. A zero id or an empty
    /// value counts as unset.
    pub fn to_value(&self) -> Option<CustomFieldValue> {
        let id = self.id.filter(|id| *id != 0)?;
        let value = non_empty(&self.value)?;
        Some(CustomFieldValue {
            custom_field_definition_id: id,
            value: value.to_string(),
        })
    }
}

/// Input of the "update lead" action.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeadUpdateInput {
    /// Copper id of the lead to update. Required.
    pub lead_id: String,
    pub name: Option<String>,
    pub details: Option<String>,
    pub title: Option<String>,
    pub company_name: Option<String>,
    pub email: Option<String>,
    pub email_category: Option<EmailCategory>,
    pub phone_number: Option<String>,
    pub phone_category: Option<PhoneCategory>,
    pub address: AddressInput,
    pub monetary_value: Option<f64>,
    pub customer_source_id: Option<i64>,
    pub assignee_id: Option<i64>,
    pub status_id: Option<i64>,
    /// Ordered custom field pairs, at most `MAX_CUSTOM_FIELDS`.
    pub custom_fields: Vec<CustomFieldInput>,
    pub clear_email: bool,
    pub clear_phone: bool,
    pub clear_address: bool,
}

impl LeadUpdateInput {
    pub fn new(lead_id: impl Into<String>) -> Self {
        Self {
            lead_id: lead_id.into(),
            ..Default::default()
        }
    }
}

/// The "update lead" form as the host submits it, with three fixed custom
/// field slots.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadUpdateForm {
    #[serde(default, deserialize_with = "string_or_number")]
    pub lead_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email_category: Option<EmailCategory>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub phone_category: Option<PhoneCategory>,
    #[serde(flatten)]
    pub address: AddressInput,
    #[serde(default)]
    pub monetary_value: Option<f64>,
    #[serde(default)]
    pub customer_source_id: Option<i64>,
    #[serde(default)]
    pub assignee_id: Option<i64>,
    #[serde(default)]
    pub status_id: Option<i64>,
    #[serde(default)]
    pub custom_field1_id: Option<i64>,
    #[serde(default)]
    pub custom_field1_value: Option<String>,
    #[serde(default)]
    pub custom_field2_id: Option<i64>,
    #[serde(default)]
    pub custom_field2_value: Option<String>,
    #[serde(default)]
    pub custom_field3_id: Option<i64>,
    #[serde(default)]
    pub custom_field3_value: Option<String>,
    #[serde(default)]
    pub clear_email: Option<bool>,
    #[serde(default)]
    pub clear_phone: Option<bool>,
    #[serde(default)]
    pub clear_address: Option<bool>,
}

impl From<LeadUpdateForm> for LeadUpdateInput {
    fn from(form: LeadUpdateForm) -> Self {
        let slots = [
            (form.custom_field1_id, form.custom_field1_value),
            (form.custom_field2_id, form.custom_field2_value),
            (form.custom_field3_id, form.custom_field3_value),
        ];

        Self {
            lead_id: form.lead_id,
            name: form.name,
            details: form.details,
            title: form.title,
            company_name: form.company_name,
            email: form.email,
            email_category: form.email_category,
            phone_number: form.phone_number,
            phone_category: form.phone_category,
            address: form.address,
            monetary_value: form.monetary_value,
            customer_source_id: form.customer_source_id,
            assignee_id: form.assignee_id,
            status_id: form.status_id,
            custom_fields: slots
                .into_iter()
                .map(|(id, value)| CustomFieldInput { id, value })
                .collect(),
            clear_email: form.clear_email.unwrap_or(false),
            clear_phone: form.clear_phone.unwrap_or(false),
            clear_address: form.clear_address.unwrap_or(false),
        }
    }
}

// ============ Request Bodies ============

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailEntry {
    pub email: String,
    pub category: EmailCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhoneEntry {
    pub number: String,
    pub category: PhoneCategory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomFieldValue {
    pub custom_field_definition_id: i64,
    pub value: String,
}

/// A field in a partial update.
///
/// `Unchanged` is skipped during serialization (paired with
/// `skip_serializing_if = "Patch::is_unchanged"`), `Clear` is written as
/// `null` and `Set` as the value itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<T> {
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Unchanged
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Patch::Set(value) => value.serialize(serializer),
            Patch::Clear | Patch::Unchanged => serializer.serialize_none(),
        }
    }
}

/// Body of `POST /people`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonBody {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emails: Option<Vec<EmailEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<Vec<PhoneEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

/// Body of `PUT /leads/{id}`. Omitted keys leave the lead untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeadUpdateBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monetary_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_source_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<i64>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub email: Patch<EmailEntry>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub phone_numbers: Patch<Vec<PhoneEntry>>,
    #[serde(skip_serializing_if = "Patch::is_unchanged")]
    pub address: Patch<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<Vec<CustomFieldValue>>,
}

impl LeadUpdateBody {
    /// True when serializing would produce `{}`.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.details.is_none()
            && self.title.is_none()
            && self.company_name.is_none()
            && self.monetary_value.is_none()
            && self.customer_source_id.is_none()
            && self.assignee_id.is_none()
            && self.status_id.is_none()
            && self.email.is_unchanged()
            && self.phone_numbers.is_unchanged()
            && self.address.is_unchanged()
            && self.custom_fields.is_none()
    }
}

// ============ Helpers ============

/// `Some(text)` only for a present, non-empty string.
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Treats `null` and `""` as absent before decoding the value.
fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(value) => serde_json::from_value(value).map(Some).map_err(D::Error::custom),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts ids typed either as text or as a number.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_patch_serialization() {
        let body = LeadUpdateBody {
            email: Patch::Clear,
            phone_numbers: Patch::Set(vec![PhoneEntry {
                number: "555-0100".to_string(),
                category: PhoneCategory::Home,
            }]),
            ..Default::default()
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "email": null,
                "phone_numbers": [{"number": "555-0100", "category": "home"}]
            })
        );
    }

    #[test]
    fn test_empty_lead_body_serializes_to_empty_object() {
        let body = LeadUpdateBody::default();
        assert!(body.is_empty());
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({}));
    }

    #[test]
    fn test_zero_numeric_fields_make_body_non_empty() {
        let body = LeadUpdateBody {
            monetary_value: Some(0.0),
            ..Default::default()
        };
        assert!(!body.is_empty());
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"monetary_value": 0.0})
        );
    }

    #[test]
    fn test_address_keeps_only_non_empty_parts() {
        let input = AddressInput {
            street: Some("Main St".to_string()),
            city: Some(String::new()),
            postal_code: Some("94105".to_string()),
            ..Default::default()
        };

        let address = input.to_address().unwrap();
        assert_eq!(
            serde_json::to_value(&address).unwrap(),
            json!({"street": "Main St", "postal_code": "94105"})
        );
    }

    #[test]
    fn test_blank_address_is_none() {
        let input = AddressInput {
            street: Some(String::new()),
            ..Default::default()
        };
        assert!(input.to_address().is_none());
        assert!(AddressInput::default().to_address().is_none());
    }

    #[test]
    fn test_custom_field_requires_both_halves() {
        assert!(CustomFieldInput::new(10, "gold").to_value().is_some());
        assert!(CustomFieldInput::new(0, "gold").to_value().is_none());
        assert!(CustomFieldInput::new(10, "").to_value().is_none());
        assert!(CustomFieldInput {
            id: Some(10),
            value: None
        }
        .to_value()
        .is_none());
    }

    #[test]
    fn test_person_input_from_form_json() {
        let input: PersonInput = serde_json::from_value(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "emailCategory": "",
            "phoneCategory": "home",
            "companyId": 42,
            "postalCode": "SW1A",
            "tags": null
        }))
        .unwrap();

        assert_eq!(input.name, "Ada Lovelace");
        assert_eq!(input.email_category, None);
        assert_eq!(input.phone_category, Some(PhoneCategory::Home));
        assert_eq!(input.company_id, Some(42));
        assert_eq!(input.address.postal_code.as_deref(), Some("SW1A"));
        assert!(input.tags.is_empty());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result: Result<PersonInput, _> = serde_json::from_value(json!({
            "name": "Ada",
            "emailCategory": "pager"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_lead_form_slots_become_ordered_list() {
        let form: LeadUpdateForm = serde_json::from_value(json!({
            "leadId": 123,
            "customField2Id": 7,
            "customField2Value": "blue",
            "clearPhone": true
        }))
        .unwrap();

        let input = LeadUpdateInput::from(form);
        assert_eq!(input.lead_id, "123");
        assert_eq!(input.custom_fields.len(), MAX_CUSTOM_FIELDS);
        assert_eq!(input.custom_fields[0], CustomFieldInput::default());
        assert_eq!(input.custom_fields[1], CustomFieldInput::new(7, "blue"));
        assert!(input.clear_phone);
        assert!(!input.clear_email);
    }
}
