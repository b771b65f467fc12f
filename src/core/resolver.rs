use crate::models::{DirectionState, Interest, PairState};
use std::collections::HashSet;

/// Mutual match reconciliation over a snapshot of interest records.
///
/// All functions here are pure: they take the full set of records involving
/// a user and derive match state from it, so the persistent store never
/// carries a separately-maintained "matched" flag that could drift. Every
/// derivation uses set membership, which makes duplicate records (possible
/// in data predating the unique pair constraint) harmless.

/// Usernames the given user has already answered, in either polarity
pub fn responded_to(username: &str, interests: &[Interest]) -> HashSet<String> {
    interests
        .iter()
        .filter(|i| i.user_matching == username)
        .map(|i| i.user_being_matched.clone())
        .collect()
}

/// Usernames who said yes to the given user
fn incoming_positive(username: &str, interests: &[Interest]) -> HashSet<String> {
    interests
        .iter()
        .filter(|i| i.user_being_matched == username && i.interest)
        .map(|i| i.user_matching.clone())
        .collect()
}

/// Usernames the given user said yes to
fn outgoing_positive(username: &str, interests: &[Interest]) -> HashSet<String> {
    interests
        .iter()
        .filter(|i| i.user_matching == username && i.interest)
        .map(|i| i.user_being_matched.clone())
        .collect()
}

/// Users who said yes to `username` and have not been answered back
///
/// Anyone `username` has already responded to, positively or negatively, is
/// excluded so the same pair is never re-prompted.
pub fn potential_matches(username: &str, interests: &[Interest]) -> HashSet<String> {
    let answered = responded_to(username, interests);

    incoming_positive(username, interests)
        .into_iter()
        .filter(|candidate| !answered.contains(candidate))
        .collect()
}

/// Users with a confirmed bidirectional match with `username`
///
/// A confirmed match exists exactly when both directions hold a positive
/// record.
pub fn confirmed_matches(username: &str, interests: &[Interest]) -> HashSet<String> {
    let outgoing = outgoing_positive(username, interests);
    let incoming = incoming_positive(username, interests);

    outgoing.intersection(&incoming).cloned().collect()
}

/// What `from` has recorded about `to`
///
/// The unique pair constraint makes conflicting polarities for one ordered
/// pair unrepresentable; a positive record wins over legacy duplicates.
pub fn direction_state(from: &str, to: &str, interests: &[Interest]) -> DirectionState {
    let mut seen_negative = false;
    for record in interests
        .iter()
        .filter(|i| i.user_matching == from && i.user_being_matched == to)
    {
        if record.interest {
            return DirectionState::ResolvedPositive;
        }
        seen_negative = true;
    }

    if seen_negative {
        DirectionState::ResolvedNegative
    } else {
        DirectionState::Unresolved
    }
}

/// Combined state of the unordered pair `(a, b)`
pub fn pair_state(a: &str, b: &str, interests: &[Interest]) -> PairState {
    use DirectionState::*;

    match (
        direction_state(a, b, interests),
        direction_state(b, a, interests),
    ) {
        (ResolvedNegative, _) | (_, ResolvedNegative) => PairState::Declined,
        (ResolvedPositive, ResolvedPositive) => PairState::Matched,
        (ResolvedPositive, Unresolved) | (Unresolved, ResolvedPositive) => PairState::Pending,
        (Unresolved, Unresolved) => PairState::Unresolved,
    }
}
