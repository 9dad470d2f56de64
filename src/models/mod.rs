//! Request and response shapes shared by handlers and services.

pub mod product;
pub mod submission;

pub use product::{
    ImageResponse, MaterialResponse, PaginationMeta, ProductDetail, ProductDetailResponse,
    ProductListResponse, ProductSummary,
};
pub use submission::{
    ContactData, ContactSubmission, InquiryData, InquiryItemData, InquiryItemSubmission,
    InquiryLine, InquiryRecord, InquirySubmission, SubmissionResponse,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const REQUIRED_MESSAGE: &str = "This field is required.";
pub const BLANK_MESSAGE: &str = "This field may not be blank.";

/// Rejects values that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some(BLANK_MESSAGE.into());
        return Err(err);
    }
    Ok(())
}

/// Renders a price with exactly two decimal places.
pub fn format_price(price: Decimal) -> String {
    let mut price = price;
    price.rescale(2);
    price.to_string()
}

/// The name/email/subject/message set carried by both contact messages and inquiries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct ContactFields {
    #[validate(
        custom = "validate_not_blank",
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    pub name: String,

    #[validate(
        custom = "validate_not_blank",
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: String,

    #[validate(
        custom = "validate_not_blank",
        length(max = 200, message = "Ensure this field has no more than 200 characters.")
    )]
    pub subject: String,

    #[validate(custom = "validate_not_blank")]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FieldErrors;
    use rust_decimal_macros::dec;

    fn fields() -> ContactFields {
        ContactFields {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            subject: "Hello".into(),
            message: "Hi there".into(),
        }
    }

    #[test]
    fn valid_fields_pass() {
        assert!(fields().validate().is_ok());
    }

    #[test]
    fn invalid_email_is_reported_on_email_only() {
        let mut f = fields();
        f.email = "not-an-email".into();
        let errors = FieldErrors::from(f.validate().unwrap_err());
        assert_eq!(
            errors.get("email"),
            Some(&["Enter a valid email address.".to_string()][..])
        );
        assert!(!errors.contains("name"));
    }

    #[test]
    fn overlong_name_is_rejected() {
        let mut f = fields();
        f.name = "x".repeat(201);
        let errors = FieldErrors::from(f.validate().unwrap_err());
        assert!(errors.contains("name"));

        f.name = "x".repeat(200);
        assert!(f.validate().is_ok());
    }

    #[test]
    fn whitespace_message_is_blank() {
        let mut f = fields();
        f.message = " \n\t ".into();
        let errors = FieldErrors::from(f.validate().unwrap_err());
        assert_eq!(errors.get("message"), Some(&[BLANK_MESSAGE.to_string()][..]));
    }

    #[test]
    fn prices_render_with_two_places() {
        assert_eq!(format_price(dec!(12.5)), "12.50");
        assert_eq!(format_price(dec!(3)), "3.00");
        assert_eq!(format_price(dec!(19.99)), "19.99");
    }
}
