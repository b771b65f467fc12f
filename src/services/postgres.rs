use crate::models::{Interest, User, ZipcodeCentroid};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate user: {0}")]
    DuplicateUser(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// A profile row to insert at signup
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub hobbies: String,
    pub interests: String,
    pub zipcode: String,
    pub friend_radius: u16,
    pub image_url: String,
}

/// PostgreSQL client for profiles, interest records and zipcode centroids
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, PostgresError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Fetch a single profile by username
    pub async fn get_user(&self, username: &str) -> Result<Option<User>, PostgresError> {
        let query = r#"
            SELECT username, email, password_hash, first_name, last_name,
                   hobbies, interests, zipcode, friend_radius, image_url, created_at
            FROM users
            WHERE username = $1
        "#;

        let row = sqlx::query(query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Insert a new profile
    ///
    /// A unique violation on username or email maps to `DuplicateUser`; the
    /// caller decides how much detail to surface.
    pub async fn insert_user(&self, user: &NewUser) -> Result<(), PostgresError> {
        let query = r#"
            INSERT INTO users
                (username, email, password_hash, first_name, last_name,
                 hobbies, interests, zipcode, friend_radius, image_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, NOW())
        "#;

        let result = sqlx::query(query)
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.hobbies)
            .bind(&user.interests)
            .bind(&user.zipcode)
            .bind(user.friend_radius as i32)
            .bind(&user.image_url)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => {
                tracing::debug!("Created user {}", user.username);
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(PostgresError::DuplicateUser(user.username.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// List users located in any of the given zipcodes, excluding one username
    pub async fn list_users_in_zipcodes(
        &self,
        zipcodes: &[String],
        exclude_username: &str,
    ) -> Result<Vec<User>, PostgresError> {
        let query = r#"
            SELECT username, email, password_hash, first_name, last_name,
                   hobbies, interests, zipcode, friend_radius, image_url, created_at
            FROM users
            WHERE zipcode = ANY($1) AND username <> $2
            ORDER BY created_at
        "#;

        let rows = sqlx::query(query)
            .bind(zipcodes)
            .bind(exclude_username)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    /// Fetch profiles for a set of usernames
    pub async fn get_users_by_usernames(
        &self,
        usernames: &[String],
    ) -> Result<Vec<User>, PostgresError> {
        if usernames.is_empty() {
            return Ok(vec![]);
        }

        let query = r#"
            SELECT username, email, password_hash, first_name, last_name,
                   hobbies, interests, zipcode, friend_radius, image_url, created_at
            FROM users
            WHERE username = ANY($1)
            ORDER BY username
        "#;

        let rows = sqlx::query(query)
            .bind(usernames)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    /// Record a directional interest
    ///
    /// The pair is unique and a recorded answer is never changed, so the
    /// insert is an idempotent no-op when a record for this direction
    /// already exists. Returns whether a new record was written.
    pub async fn record_interest(
        &self,
        user_matching: &str,
        user_being_matched: &str,
        interest: bool,
    ) -> Result<bool, PostgresError> {
        let query = r#"
            INSERT INTO interests (user_matching, user_being_matched, interest, created_at)
            VALUES ($1, $2, $3, NOW())
            ON CONFLICT (user_matching, user_being_matched) DO NOTHING
        "#;

        let result = sqlx::query(query)
            .bind(user_matching)
            .bind(user_being_matched)
            .bind(interest)
            .execute(&self.pool)
            .await?;

        let recorded = result.rows_affected() > 0;
        tracing::debug!(
            "Interest {} -> {} ({}): {}",
            user_matching,
            user_being_matched,
            interest,
            if recorded { "recorded" } else { "already answered" }
        );

        Ok(recorded)
    }

    /// Fetch every interest record the given user appears in, on either side
    ///
    /// This is the snapshot the resolver derives match state from.
    pub async fn list_interests_involving(
        &self,
        username: &str,
    ) -> Result<Vec<Interest>, PostgresError> {
        let query = r#"
            SELECT user_matching, user_being_matched, interest, created_at
            FROM interests
            WHERE user_matching = $1 OR user_being_matched = $1
            ORDER BY created_at
        "#;

        let rows = sqlx::query(query)
            .bind(username)
            .fetch_all(&self.pool)
            .await?;

        let interests = rows
            .iter()
            .map(|row| Interest {
                user_matching: row.get("user_matching"),
                user_being_matched: row.get("user_being_matched"),
                interest: row.get("interest"),
                created_at: row.get("created_at"),
            })
            .collect();

        Ok(interests)
    }

    /// Load all zipcode centroids for the in-memory distance index
    pub async fn load_zipcode_centroids(&self) -> Result<Vec<ZipcodeCentroid>, PostgresError> {
        let query = "SELECT zipcode, latitude, longitude FROM zipcodes";

        let rows = sqlx::query(query).fetch_all(&self.pool).await?;

        let centroids = rows
            .iter()
            .map(|row| ZipcodeCentroid {
                zipcode: row.get("zipcode"),
                latitude: row.get("latitude"),
                longitude: row.get("longitude"),
            })
            .collect();

        Ok(centroids)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

fn user_from_row(row: &sqlx::postgres::PgRow) -> User {
    User {
        username: row.get("username"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        hobbies: row.get("hobbies"),
        interests: row.get("interests"),
        zipcode: row.get("zipcode"),
        friend_radius: row.get::<i32, _>("friend_radius") as u16,
        image_url: row.get("image_url"),
        created_at: row.get("created_at"),
    }
}
