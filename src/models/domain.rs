use serde::{Deserialize, Serialize};

/// A member profile as stored in the users table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub hobbies: String,
    #[serde(default)]
    pub interests: String,
    pub zipcode: String,
    #[serde(rename = "friendRadius")]
    pub friend_radius: u16,
    #[serde(rename = "imageUrl", default)]
    pub image_url: String,
    #[serde(default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// One directional interest record: `user_matching` answered
/// `user_being_matched` with a yes (`interest = true`) or a no.
///
/// The pair `(user_matching, user_being_matched)` is unique in storage and
/// a recorded answer is never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interest {
    #[serde(rename = "userMatching")]
    pub user_matching: String,
    #[serde(rename = "userBeingMatched")]
    pub user_being_matched: String,
    pub interest: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Interest {
    pub fn new(user_matching: &str, user_being_matched: &str, interest: bool) -> Self {
        Self {
            user_matching: user_matching.to_string(),
            user_being_matched: user_being_matched.to_string(),
            interest,
            created_at: chrono::Utc::now(),
        }
    }
}

/// What one user has recorded about another, in one direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectionState {
    Unresolved,
    ResolvedPositive,
    ResolvedNegative,
}

/// Combined state of an unordered user pair
///
/// `Pending` means one side answered yes and the other has not answered at
/// all. A single no from either side puts the pair in `Declined` for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairState {
    Unresolved,
    Pending,
    Matched,
    Declined,
}

/// A zipcode centroid used by the distance index
#[derive(Debug, Clone)]
pub struct ZipcodeCentroid {
    pub zipcode: String,
    pub latitude: f64,
    pub longitude: f64,
}
