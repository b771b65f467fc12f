// Integration tests for the Friendly matching pipeline: zipcode index ->
// candidate selector -> interest records -> resolver.

use friendly::core::candidates::nearby_candidates;
use friendly::core::resolver::{confirmed_matches, potential_matches, responded_to};
use friendly::models::{Interest, User, ZipcodeCentroid};
use friendly::services::ZipcodeIndex;

fn user(username: &str, zipcode: &str, radius: u16) -> User {
    User {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password_hash: "$2b$12$fake".to_string(),
        first_name: username.to_string(),
        last_name: "Test".to_string(),
        hobbies: "board games".to_string(),
        interests: "history".to_string(),
        zipcode: zipcode.to_string(),
        friend_radius: radius,
        image_url: String::new(),
        created_at: None,
    }
}

fn centroid(zipcode: &str, lat: f64, lon: f64) -> ZipcodeCentroid {
    ZipcodeCentroid {
        zipcode: zipcode.to_string(),
        latitude: lat,
        longitude: lon,
    }
}

/// Manhattan-ish cluster plus one centroid ~80 miles away
fn test_index() -> ZipcodeIndex {
    ZipcodeIndex::new(vec![
        centroid("10001", 40.7506, -73.9972),
        centroid("10002", 40.7157, -73.9861),
        centroid("10003", 40.7317, -73.9891),
        centroid("19103", 39.9529, -75.1733),
    ])
}

#[test]
fn test_end_to_end_feed_through_zip_index() {
    let index = test_index();

    let alice = user("alice", "10001", 5);
    let population = vec![
        alice.clone(),
        user("bob", "10002", 5),
        user("carol", "10003", 10),
        user("phil", "19103", 50), // Philadelphia, out of range
    ];

    let feed = nearby_candidates(
        &alice,
        &population,
        |radius, origin| index.zipcodes_within(radius, origin),
        Some(10),
    )
    .unwrap();

    let names: Vec<&str> = feed.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["bob", "carol"]);
}

#[test]
fn test_feed_excludes_already_answered_users() {
    let index = test_index();

    let alice = user("alice", "10001", 5);
    let population = vec![
        alice.clone(),
        user("bob", "10002", 5),
        user("carol", "10003", 10),
    ];

    // alice already declined bob
    let interests = vec![Interest::new("alice", "bob", false)];
    let answered = responded_to("alice", &interests);

    let feed = nearby_candidates(
        &alice,
        &population,
        |radius, origin| index.zipcodes_within(radius, origin),
        None,
    )
    .unwrap();

    let remaining: Vec<&str> = feed
        .iter()
        .filter(|u| !answered.contains(&u.username))
        .map(|u| u.username.as_str())
        .collect();

    assert_eq!(remaining, vec!["carol"]);
}

#[test]
fn test_full_match_lifecycle() {
    // alice likes bob, bob likes carol and alice, carol declines bob
    let mut interests: Vec<Interest> = vec![];

    interests.push(Interest::new("alice", "bob", true));
    assert_eq!(
        potential_matches("bob", &interests),
        ["alice".to_string()].into_iter().collect()
    );

    interests.push(Interest::new("bob", "carol", true));
    interests.push(Interest::new("bob", "alice", true));
    assert_eq!(
        confirmed_matches("alice", &interests),
        ["bob".to_string()].into_iter().collect()
    );
    assert_eq!(
        confirmed_matches("bob", &interests),
        ["alice".to_string()].into_iter().collect()
    );

    interests.push(Interest::new("carol", "bob", false));
    assert_eq!(
        confirmed_matches("bob", &interests),
        ["alice".to_string()].into_iter().collect(),
        "carol's decline must not disturb the alice/bob match"
    );
    assert!(potential_matches("carol", &interests).is_empty());
}

#[test]
fn test_radius_controls_reach() {
    let index = test_index();

    // 50 miles does not reach Philadelphia, 100 does
    assert!(!index.zipcodes_within(50, "10001").contains("19103"));
    assert!(index.zipcodes_within(100, "10001").contains("19103"));
}

#[test]
fn test_feed_cap_applies_after_radius_filter() {
    let index = test_index();

    let alice = user("alice", "10001", 5);
    let population: Vec<User> = (0..30)
        .map(|i| user(&format!("user{:02}", i), "10002", 5))
        .collect();

    let feed = nearby_candidates(
        &alice,
        &population,
        |radius, origin| index.zipcodes_within(radius, origin),
        Some(10),
    )
    .unwrap();

    assert_eq!(feed.len(), 10);
}
