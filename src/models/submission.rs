use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::{ContactFields, REQUIRED_MESSAGE};
use crate::entities::{contact_us, inquiry, inquiry_item, product};
use crate::errors::FieldErrors;

/// Contact form body as posted. Every field is required.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ContactSubmission {
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(example = "Wholesale pricing")]
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl ContactSubmission {
    /// Trims every field and checks it, reporting all problems at once.
    pub fn into_fields(self) -> Result<ContactFields, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut require = |field: &str, value: Option<String>| match value {
            Some(v) => v.trim().to_string(),
            None => {
                errors.add(field, REQUIRED_MESSAGE);
                String::new()
            }
        };

        let fields = ContactFields {
            name: require("name", self.name),
            email: require("email", self.email),
            subject: require("subject", self.subject),
            message: require("message", self.message),
        };

        if let Err(invalid) = fields.validate() {
            for (field, messages) in FieldErrors::from(invalid) {
                // missing fields already carry their own message
                if errors.contains(&field) {
                    continue;
                }
                for message in messages {
                    errors.add(field.clone(), message);
                }
            }
        }

        if errors.is_empty() {
            Ok(fields)
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct InquiryItemSubmission {
    /// Id of an existing product
    pub product: Option<String>,
}

/// Inquiry form body: the contact fields plus an optional product list
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct InquirySubmission {
    #[serde(flatten)]
    pub contact: ContactSubmission,
    #[serde(default)]
    pub items: Option<Vec<InquiryItemSubmission>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactData {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl From<&contact_us::Model> for ContactData {
    fn from(model: &contact_us::Model) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            email: model.email.clone(),
            subject: model.subject.clone(),
            message: model.message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InquiryItemData {
    pub id: Uuid,
    pub product: Uuid,
}

impl From<&inquiry_item::Model> for InquiryItemData {
    fn from(model: &inquiry_item::Model) -> Self {
        Self {
            id: model.id,
            product: model.product_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InquiryData {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub items: Vec<InquiryItemData>,
}

impl InquiryData {
    pub fn new(model: &inquiry::Model, items: &[inquiry_item::Model]) -> Self {
        Self {
            id: model.id,
            name: model.name.clone(),
            email: model.email.clone(),
            subject: model.subject.clone(),
            message: model.message.clone(),
            items: items.iter().map(InquiryItemData::from).collect(),
        }
    }
}

/// A stored inquiry together with its items and the products they name
#[derive(Debug, Clone)]
pub struct InquiryRecord {
    pub inquiry: inquiry::Model,
    pub lines: Vec<InquiryLine>,
}

#[derive(Debug, Clone)]
pub struct InquiryLine {
    pub item: inquiry_item::Model,
    pub product: product::Model,
}

impl fmt::Display for InquiryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.product.name)
    }
}

impl InquiryRecord {
    pub fn items(&self) -> Vec<inquiry_item::Model> {
        self.lines.iter().map(|line| line.item.clone()).collect()
    }

    pub fn to_data(&self) -> InquiryData {
        InquiryData::new(&self.inquiry, &self.items())
    }
}

/// Envelope returned for an accepted submission
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SubmissionResponse<T> {
    #[schema(example = "success")]
    pub status: String,
    pub message: String,
    pub data: T,
    /// Present only when the record was stored but the administrator was not notified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl<T> SubmissionResponse<T> {
    pub fn new(message: &str, data: T, warning: Option<&str>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
            data,
            warning: warning.map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BLANK_MESSAGE;

    #[test]
    fn missing_fields_are_required() {
        let errors = ContactSubmission {
            name: Some("Ada".into()),
            ..Default::default()
        }
        .into_fields()
        .unwrap_err();

        for field in ["email", "subject", "message"] {
            assert_eq!(
                errors.get(field),
                Some(&[REQUIRED_MESSAGE.to_string()][..]),
                "{field}"
            );
        }
        assert!(!errors.contains("name"));
    }

    #[test]
    fn values_are_trimmed() {
        let fields = ContactSubmission {
            name: Some("  Ada ".into()),
            email: Some(" ada@example.com ".into()),
            subject: Some("Hi".into()),
            message: Some("Hello\n".into()),
        }
        .into_fields()
        .unwrap();

        assert_eq!(fields.name, "Ada");
        assert_eq!(fields.email, "ada@example.com");
        assert_eq!(fields.message, "Hello");
    }

    #[test]
    fn blank_name_reports_blank() {
        let errors = ContactSubmission {
            name: Some("   ".into()),
            email: Some("ada@example.com".into()),
            subject: Some("Hi".into()),
            message: Some("Hello".into()),
        }
        .into_fields()
        .unwrap_err();

        assert_eq!(errors.get("name"), Some(&[BLANK_MESSAGE.to_string()][..]));
    }

    #[test]
    fn inquiry_body_flattens_contact_fields() {
        let body: InquirySubmission = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "subject": "Samples",
            "message": "Please",
            "items": [{"product": "00000000-0000-0000-0000-000000000000"}]
        }))
        .unwrap();

        assert_eq!(body.contact.name.as_deref(), Some("Ada"));
        assert_eq!(body.items.map(|items| items.len()), Some(1));
    }

    #[test]
    fn warning_is_omitted_when_absent() {
        let json = serde_json::to_value(SubmissionResponse::new("ok", 1, None)).unwrap();
        assert!(json.get("warning").is_none());
        assert_eq!(json["status"], "success");
    }
}
