use crate::core::{candidates, resolver};
use crate::error::AppError;
use crate::models::{
    CandidatesResponse, HealthResponse, InterestRecordedResponse, MatchListResponse, PairState,
    ProfileSummary,
};
use crate::routes::session::Session;
use crate::routes::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;

/// Health check endpoint
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

#[derive(Debug, Deserialize)]
pub struct HomeQuery {
    pub notice: Option<String>,
}

/// Homepage candidate feed
///
/// GET /
///
/// For a logged-in user: nearby users within their friend radius, minus
/// everyone they have already answered, capped by the configured feed size.
/// The homepage is also the redirect target for authorization failures, so
/// anonymous requests get a plain landing payload instead of an error.
pub async fn home_feed(
    state: web::Data<AppState>,
    session: Option<Session>,
    query: web::Query<HomeQuery>,
) -> Result<HttpResponse, AppError> {
    let Some(session) = session else {
        return Ok(HttpResponse::Ok().json(serde_json::json!({
            "service": "friendly",
            "version": env!("CARGO_PKG_VERSION"),
            "notice": query.notice,
        })));
    };

    let user = state
        .postgres
        .get_user(&session.username)
        .await?
        .ok_or_else(|| AppError::NotFound(session.username.clone()))?;

    let interests = state
        .postgres
        .list_interests_involving(&user.username)
        .await?;
    let answered = resolver::responded_to(&user.username, &interests);

    let eligible = candidates::eligible_zipcodes(&user, |radius, origin| {
        state.zip_index.zipcodes_within(radius, origin)
    })?;

    let mut zipcodes: Vec<String> = eligible.into_iter().collect();
    zipcodes.sort_unstable();

    let nearby = state
        .postgres
        .list_users_in_zipcodes(&zipcodes, &user.username)
        .await?;
    let total_nearby = nearby.len();

    let feed: Vec<ProfileSummary> = nearby
        .iter()
        .filter(|u| !answered.contains(&u.username))
        .take(state.candidate_cap)
        .map(ProfileSummary::from)
        .collect();

    tracing::debug!(
        "Feed for {}: {} candidates of {} nearby",
        user.username,
        feed.len(),
        total_nearby
    );

    Ok(HttpResponse::Ok().json(CandidatesResponse {
        candidates: feed,
        total_nearby,
    }))
}

/// Record positive interest in a user
///
/// POST /users/{username}/match
pub async fn record_match(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    record_interest_action(&state, &session, &req, &path.into_inner(), true).await
}

/// Record disinterest in a user
///
/// POST /users/{username}/no-match
pub async fn record_no_match(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    record_interest_action(&state, &session, &req, &path.into_inner(), false).await
}

async fn record_interest_action(
    state: &AppState,
    session: &Session,
    req: &HttpRequest,
    target: &str,
    interest: bool,
) -> Result<HttpResponse, AppError> {
    session.require_csrf(req)?;

    if target == session.username {
        return Err(AppError::Validation(
            "cannot record interest in yourself".to_string(),
        ));
    }

    if state.postgres.get_user(target).await?.is_none() {
        return Err(AppError::NotFound(target.to_string()));
    }

    // First answer wins: a repeat for the same pair is a no-op, never a
    // reversal
    let recorded = state
        .postgres
        .record_interest(&session.username, target, interest)
        .await?;

    let interests = state
        .postgres
        .list_interests_involving(&session.username)
        .await?;
    let pair_state = resolver::pair_state(&session.username, target, &interests);

    if recorded && pair_state == PairState::Matched {
        tracing::info!("Confirmed match: {} <-> {}", session.username, target);
    }

    Ok(HttpResponse::Ok().json(InterestRecordedResponse {
        success: true,
        pair_state,
    }))
}

/// Users who said yes to you and are still waiting on your answer
///
/// GET /users/{username}/potential-matches
pub async fn potential_matches(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    session.require_self(&username)?;

    let interests = state.postgres.list_interests_involving(&username).await?;
    let names = sorted(resolver::potential_matches(&username, &interests));
    let users = state.postgres.get_users_by_usernames(&names).await?;

    Ok(HttpResponse::Ok().json(MatchListResponse {
        users: users.iter().map(ProfileSummary::from).collect(),
    }))
}

/// Confirmed mutual matches
///
/// GET /users/{username}/matches
pub async fn confirmed_matches(
    state: web::Data<AppState>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let username = path.into_inner();
    session.require_self(&username)?;

    let interests = state.postgres.list_interests_involving(&username).await?;
    let names = sorted(resolver::confirmed_matches(&username, &interests));
    let users = state.postgres.get_users_by_usernames(&names).await?;

    Ok(HttpResponse::Ok().json(MatchListResponse {
        users: users.iter().map(ProfileSummary::from).collect(),
    }))
}

fn sorted(names: std::collections::HashSet<String>) -> Vec<String> {
    let mut names: Vec<String> = names.into_iter().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_sorted_is_deterministic() {
        let names: std::collections::HashSet<String> =
            ["carol", "alice", "bob"].iter().map(|s| s.to_string()).collect();

        assert_eq!(sorted(names), vec!["alice", "bob", "carol"]);
    }
}
