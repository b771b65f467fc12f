use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Request to create a new profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 30))]
    pub username: String,
    #[validate(email, length(max = 50))]
    pub email: String,
    #[validate(length(min = 6, max = 50))]
    pub password: String,
    #[validate(length(min = 1, max = 30))]
    #[serde(alias = "first_name", rename = "firstName")]
    pub first_name: String,
    #[validate(length(min = 1, max = 30))]
    #[serde(alias = "last_name", rename = "lastName")]
    pub last_name: String,
    #[validate(length(min = 1, max = 256))]
    pub hobbies: String,
    #[validate(length(min = 1, max = 256))]
    pub interests: String,
    #[validate(custom(function = validate_zipcode))]
    pub zipcode: String,
    #[validate(range(min = 1, max = 50))]
    #[serde(alias = "friend_radius", rename = "friendRadius")]
    pub friend_radius: u16,
    #[serde(default)]
    pub image: Option<ImageUpload>,
}

/// Optional profile photo, sent inline as base64
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageUpload {
    pub filename: String,
    #[serde(rename = "data")]
    pub data_base64: String,
}

fn validate_zipcode(zipcode: &str) -> Result<(), ValidationError> {
    if zipcode.len() == 5 && zipcode.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("zipcode"))
    }
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}
