use crate::models::domain::{PairState, User};
use serde::{Deserialize, Serialize};

/// Public view of a profile (no credentials)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub username: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub hobbies: String,
    pub interests: String,
    pub zipcode: String,
    #[serde(rename = "friendRadius")]
    pub friend_radius: u16,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

impl From<&User> for ProfileSummary {
    fn from(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            hobbies: user.hobbies.clone(),
            interests: user.interests.clone(),
            zipcode: user.zipcode.clone(),
            friend_radius: user.friend_radius,
            image_url: user.image_url.clone(),
        }
    }
}

/// Response for signup and login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub profile: ProfileSummary,
    #[serde(rename = "csrfToken")]
    pub csrf_token: String,
}

/// Candidate feed for the homepage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesResponse {
    pub candidates: Vec<ProfileSummary>,
    #[serde(rename = "totalNearby")]
    pub total_nearby: usize,
}

/// Users listed on the potential-matches and matches pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchListResponse {
    pub users: Vec<ProfileSummary>,
}

/// Result of recording a match / no-match action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestRecordedResponse {
    pub success: bool,
    #[serde(rename = "pairState")]
    pub pair_state: PairState,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
