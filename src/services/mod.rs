// Service exports
pub mod auth;
pub mod postgres;
pub mod storage;
pub mod zipgeo;

pub use auth::{hash_password, verify_password, AuthError, SessionClaims, SessionKeys};
pub use postgres::{NewUser, PostgresClient, PostgresError};
pub use storage::{MediaStorageClient, StorageError};
pub use zipgeo::ZipcodeIndex;
