use crate::models::User;
use std::collections::HashSet;
use thiserror::Error;

/// Errors from the candidate selector
#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("user {0} has no zip code on record")]
    MissingZipcode(String),
}

/// Compute the set of zipcodes a user's feed may draw from
///
/// The distance function maps `(radius, origin zipcode)` to the set of
/// zipcodes within that radius; it is injected so the geocoding backend can
/// be swapped out (and faked in tests). The user's own zipcode is always
/// part of the result, so an empty distance result still leaves the feed
/// with same-zipcode users.
pub fn eligible_zipcodes<F>(user: &User, distance: F) -> Result<HashSet<String>, SelectorError>
where
    F: Fn(u16, &str) -> HashSet<String>,
{
    if user.zipcode.trim().is_empty() {
        return Err(SelectorError::MissingZipcode(user.username.clone()));
    }

    let mut zipcodes = distance(user.friend_radius, &user.zipcode);
    zipcodes.insert(user.zipcode.clone());
    Ok(zipcodes)
}

/// Select the users a requester may be shown as candidates
///
/// Filters the population down to users in an eligible zipcode, never
/// including the requester themself. `cap` bounds the result size; it is a
/// policy knob, not a correctness requirement, and `None` disables it.
/// Result ordering follows the input population.
pub fn nearby_candidates<F>(
    user: &User,
    all_users: &[User],
    distance: F,
    cap: Option<usize>,
) -> Result<Vec<User>, SelectorError>
where
    F: Fn(u16, &str) -> HashSet<String>,
{
    let eligible = eligible_zipcodes(user, distance)?;

    let mut candidates: Vec<User> = all_users
        .iter()
        .filter(|u| u.username != user.username)
        .filter(|u| eligible.contains(&u.zipcode))
        .cloned()
        .collect();

    if let Some(cap) = cap {
        candidates.truncate(cap);
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, zipcode: &str, radius: u16) -> User {
        User {
            username: username.to_string(),
            email: format!("{}@example.com", username),
            password_hash: String::new(),
            first_name: username.to_string(),
            last_name: "Test".to_string(),
            hobbies: String::new(),
            interests: String::new(),
            zipcode: zipcode.to_string(),
            friend_radius: radius,
            image_url: String::new(),
            created_at: None,
        }
    }

    fn fixed_distance<'a>(zipcodes: &'a [&'a str]) -> impl Fn(u16, &str) -> HashSet<String> + 'a {
        move |_radius, _origin| zipcodes.iter().map(|z| z.to_string()).collect()
    }

    #[test]
    fn test_nearby_includes_users_within_radius() {
        let alice = user("alice", "10001", 5);
        let bob = user("bob", "10002", 5);
        let population = vec![alice.clone(), bob.clone()];

        let result =
            nearby_candidates(&alice, &population, fixed_distance(&["10001", "10002"]), None)
                .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].username, "bob");
    }

    #[test]
    fn test_never_returns_requester() {
        let alice = user("alice", "10001", 5);
        let population = vec![alice.clone()];

        let result =
            nearby_candidates(&alice, &population, fixed_distance(&["10001"]), None).unwrap();

        assert!(result.is_empty());
    }

    #[test]
    fn test_empty_distance_result_reduces_to_same_zipcode() {
        let alice = user("alice", "10001", 5);
        let bob = user("bob", "10001", 5);
        let carol = user("carol", "10002", 5);
        let population = vec![alice.clone(), bob, carol];

        let result = nearby_candidates(&alice, &population, fixed_distance(&[]), None).unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].username, "bob");
    }

    #[test]
    fn test_missing_zipcode_is_an_error() {
        let alice = user("alice", "", 5);

        let err = eligible_zipcodes(&alice, fixed_distance(&["10001"])).unwrap_err();
        assert!(matches!(err, SelectorError::MissingZipcode(_)));
    }

    #[test]
    fn test_cap_bounds_result_size() {
        let alice = user("alice", "10001", 5);
        let population: Vec<User> = (0..25)
            .map(|i| user(&format!("user{}", i), "10001", 5))
            .collect();

        let result =
            nearby_candidates(&alice, &population, fixed_distance(&["10001"]), Some(10)).unwrap();

        assert_eq!(result.len(), 10);
    }

    #[test]
    fn test_out_of_range_zipcodes_excluded() {
        let alice = user("alice", "10001", 5);
        let far = user("zed", "90210", 5);
        let population = vec![alice.clone(), far];

        let result =
            nearby_candidates(&alice, &population, fixed_distance(&["10001", "10002"]), None)
                .unwrap();

        assert!(result.is_empty());
    }
}
