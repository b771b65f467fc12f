// Core algorithm exports
pub mod candidates;
pub mod distance;
pub mod resolver;

pub use candidates::{eligible_zipcodes, nearby_candidates, SelectorError};
pub use distance::{calculate_bounding_box, haversine_miles, is_within_bounding_box, BoundingBox};
pub use resolver::{confirmed_matches, pair_state, potential_matches, responded_to};
