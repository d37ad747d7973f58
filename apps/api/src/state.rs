use sqlx::PgPool;

use crate::config::Config;
use crate::media::MediaStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Blob storage collaborator for profile photos, certificate images and
    /// garage sale pictures. Only the admin write paths touch it; the public
    /// pages serve stored URLs as-is.
    #[allow(dead_code)]
    pub media: MediaStore,
    #[allow(dead_code)]
    pub config: Config,
}
