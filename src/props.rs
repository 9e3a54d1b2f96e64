//! Form definitions for the actions.
//!
//! Hosts render these to collect input; the property names match the JSON
//! keys `PersonInput` and `LeadUpdateForm` accept.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyKind {
    ShortText,
    LongText,
    Number,
    Checkbox {
        #[serde(rename = "defaultValue")]
        default_value: bool,
    },
    Array,
    StaticDropdown {
        options: Vec<DropdownOption>,
        #[serde(rename = "defaultValue")]
        default_value: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub required: bool,
    #[serde(flatten)]
    pub kind: PropertyKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionDefinition {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub props: Vec<Property>,
}

impl ActionDefinition {
    pub fn prop(&self, name: &str) -> Option<&Property> {
        self.props.iter().find(|p| p.name == name)
    }
}

fn prop(
    name: &'static str,
    display_name: &'static str,
    description: &'static str,
    required: bool,
    kind: PropertyKind,
) -> Property {
    Property {
        name,
        display_name,
        description,
        required,
        kind,
    }
}

fn email_category() -> Property {
    prop(
        "emailCategory",
        "Email Category",
        "Category for the email address",
        false,
        PropertyKind::StaticDropdown {
            options: vec![
                DropdownOption { label: "Work", value: "work" },
                DropdownOption { label: "Personal", value: "personal" },
                DropdownOption { label: "Other", value: "other" },
            ],
            default_value: "work",
        },
    )
}

fn phone_category() -> Property {
    prop(
        "phoneCategory",
        "Phone Category",
        "Category for the phone number",
        false,
        PropertyKind::StaticDropdown {
            options: vec![
                DropdownOption { label: "Mobile", value: "mobile" },
                DropdownOption { label: "Work", value: "work" },
                DropdownOption { label: "Home", value: "home" },
                DropdownOption { label: "Other", value: "other" },
            ],
            default_value: "mobile",
        },
    )
}

fn address_props() -> Vec<Property> {
    use PropertyKind::ShortText;
    vec![
        prop("street", "Street Address", "Street address", false, ShortText),
        prop("city", "City", "City", false, ShortText),
        prop("state", "State", "State or province", false, ShortText),
        prop("postalCode", "Postal Code", "Postal or ZIP code", false, ShortText),
        prop("country", "Country", "Country", false, ShortText),
    ]
}

fn custom_field_slot(index: u8) -> [Property; 2] {
    let (id_name, id_display, id_description, value_name, value_display, value_description) =
        match index {
            1 => (
                "customField1Id",
                "Custom Field 1 ID",
                "ID of the first custom field definition",
                "customField1Value",
                "Custom Field 1 Value",
                "Value for the first custom field",
            ),
            2 => (
                "customField2Id",
                "Custom Field 2 ID",
                "ID of the second custom field definition",
                "customField2Value",
                "Custom Field 2 Value",
                "Value for the second custom field",
            ),
            _ => (
                "customField3Id",
                "Custom Field 3 ID",
                "ID of the third custom field definition",
                "customField3Value",
                "Custom Field 3 Value",
                "Value for the third custom field",
            ),
        };

    [
        prop(id_name, id_display, id_description, false, PropertyKind::Number),
        prop(
            value_name,
            value_display,
            value_description,
            false,
            PropertyKind::ShortText,
        ),
    ]
}

fn clear_flag(
    name: &'static str,
    display_name: &'static str,
    description: &'static str,
) -> Property {
    prop(
        name,
        display_name,
        description,
        false,
        PropertyKind::Checkbox {
            default_value: false,
        },
    )
}

/// Form of the "Create Person" action.
pub fn create_person_definition() -> ActionDefinition {
    use PropertyKind::{Array, Number, ShortText};

    let mut props = vec![
        prop("name", "Name", "Full name of the person", true, ShortText),
        prop("email", "Email", "Primary email address", false, ShortText),
        email_category(),
        prop("phoneNumber", "Phone Number", "Primary phone number", false, ShortText),
        phone_category(),
        prop("title", "Title", "Job title or position", false, ShortText),
        prop(
            "companyId",
            "Company ID",
            "ID of the company this person belongs to",
            false,
            Number,
        ),
    ];
    props.extend(address_props());
    props.push(prop(
        "tags",
        "Tags",
        "Tags associated with this person",
        false,
        Array,
    ));

    ActionDefinition {
        name: "create_person",
        display_name: "Create Person",
        description: "Adds a new person/contact to Copper CRM.",
        props,
    }
}

/// Form of the "Update Lead" action.
pub fn update_lead_definition() -> ActionDefinition {
    use PropertyKind::{LongText, Number, ShortText};

    let mut props = vec![
        prop("leadId", "Lead ID", "The ID of the lead to update", true, ShortText),
        prop("name", "Name", "Full name of the lead", false, ShortText),
        prop("email", "Email", "Primary email address", false, ShortText),
        email_category(),
        prop("phoneNumber", "Phone Number", "Primary phone number", false, ShortText),
        phone_category(),
    ];
    props.extend(address_props());
    props.extend([
        prop(
            "customerSourceId",
            "Customer Source ID",
            "ID of the customer source for this lead",
            false,
            Number,
        ),
        prop(
            "details",
            "Details",
            "Additional details about the lead",
            false,
            LongText,
        ),
        prop("title", "Title", "Job title or position", false, ShortText),
        prop("companyName", "Company Name", "Name of the company", false, ShortText),
        prop(
            "monetaryValue",
            "Monetary Value",
            "Expected monetary value of the lead",
            false,
            Number,
        ),
        prop(
            "assigneeId",
            "Assignee ID",
            "ID of the user assigned to this lead",
            false,
            Number,
        ),
        prop("statusId", "Status ID", "ID of the status for this lead", false, Number),
    ]);
    for slot in 1..=3 {
        props.extend(custom_field_slot(slot));
    }
    props.extend([
        clear_flag(
            "clearEmail",
            "Clear Email",
            "Set to true to remove the email field (set to null)",
        ),
        clear_flag(
            "clearPhone",
            "Clear Phone",
            "Set to true to remove the phone number field (set to null)",
        ),
        clear_flag(
            "clearAddress",
            "Clear Address",
            "Set to true to remove the address field (set to null)",
        ),
    ]);

    ActionDefinition {
        name: "update_lead",
        display_name: "Update Lead",
        description: "Updates an existing lead. Only specified fields will be updated.",
        props,
    }
}

/// Every action this service can run.
pub fn catalogue() -> Vec<ActionDefinition> {
    vec![create_person_definition(), update_lead_definition()]
}
