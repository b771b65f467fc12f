// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{DirectionState, Interest, PairState, User, ZipcodeCentroid};
pub use requests::{ImageUpload, LoginRequest, SignupRequest};
pub use responses::{
    AuthResponse, CandidatesResponse, ErrorResponse, HealthResponse, InterestRecordedResponse,
    MatchListResponse, ProfileSummary,
};
