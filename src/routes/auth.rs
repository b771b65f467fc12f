use crate::error::AppError;
use crate::models::{AuthResponse, ImageUpload, LoginRequest, SignupRequest};
use crate::routes::session::{Session, SESSION_COOKIE};
use crate::routes::AppState;
use crate::services::postgres::NewUser;
use crate::services::storage::MediaStorageClient;
use crate::services::{hash_password, verify_password, PostgresError};
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse};
use base64::Engine as _;
use validator::Validate;

/// Create a profile
///
/// POST /signup
///
/// On success the response sets the session cookie, so a fresh signup is
/// already logged in.
pub async fn signup(
    state: web::Data<AppState>,
    req: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    if let Err(errors) = req.validate() {
        tracing::info!("Signup validation failed: {}", errors);
        return Err(AppError::Validation(errors.to_string()));
    }
    let req = req.into_inner();

    let image_url = match &req.image {
        Some(upload) => upload_or_placeholder(&state, &req.username, upload).await?,
        None => state.default_image_url.clone(),
    };

    let password_hash = hash_password(&req.password)?;

    let new_user = NewUser {
        username: req.username.clone(),
        email: req.email,
        password_hash,
        first_name: req.first_name,
        last_name: req.last_name,
        hobbies: req.hobbies,
        interests: req.interests,
        zipcode: req.zipcode,
        friend_radius: req.friend_radius,
        image_url,
    };

    match state.postgres.insert_user(&new_user).await {
        Ok(()) => {}
        Err(PostgresError::DuplicateUser(_)) => return Err(AppError::DuplicateUser),
        Err(e) => return Err(e.into()),
    }

    let user = state
        .postgres
        .get_user(&req.username)
        .await?
        .ok_or_else(|| AppError::NotFound(req.username.clone()))?;

    let (token, csrf) = state.sessions.issue(&user.username)?;

    tracing::info!("New user signed up: {}", user.username);

    Ok(HttpResponse::Created()
        .cookie(session_cookie(token))
        .json(AuthResponse {
            profile: (&user).into(),
            csrf_token: csrf,
        }))
}

/// Authenticate and start a session
///
/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    if let Err(errors) = req.validate() {
        return Err(AppError::Validation(errors.to_string()));
    }

    // Unknown user and wrong password produce the same generic failure so
    // the endpoint cannot be used to enumerate usernames
    let Some(user) = state.postgres.get_user(&req.username).await? else {
        return Err(AppError::Authentication);
    };
    if !verify_password(&user.password_hash, &req.password)? {
        return Err(AppError::Authentication);
    }

    let (token, csrf) = state.sessions.issue(&user.username)?;

    tracing::debug!("User logged in: {}", user.username);

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token))
        .json(AuthResponse {
            profile: (&user).into(),
            csrf_token: csrf,
        }))
}

/// End the current session
///
/// POST /logout
pub async fn logout(session: Session, req: HttpRequest) -> Result<HttpResponse, AppError> {
    session.require_csrf(&req)?;

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    Ok(HttpResponse::Ok()
        .cookie(removal)
        .json(serde_json::json!({ "success": true })))
}

fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Decode and store the signup photo, falling back to the placeholder
///
/// Storage being down must not block signup: the failure is logged and the
/// profile gets the default image instead.
async fn upload_or_placeholder(
    state: &AppState,
    username: &str,
    upload: &ImageUpload,
) -> Result<String, AppError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(upload.data_base64.as_bytes())
        .map_err(|_| AppError::Validation("image data is not valid base64".to_string()))?;

    let key = MediaStorageClient::image_key(username, &upload.filename);

    match state.storage.store_image(bytes, &key).await {
        Ok(url) => Ok(url),
        Err(e) => {
            tracing::warn!(
                "Image upload for {} failed, falling back to placeholder: {}",
                username,
                e
            );
            Ok(state.default_image_url.clone())
        }
    }
}
