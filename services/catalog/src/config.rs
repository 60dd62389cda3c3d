/// Catalog service configuration loaded from environment variables.
#[derive(Debug)]
pub struct CatalogConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 8000). Env var: `CATALOG_PORT`.
    pub catalog_port: u16,
    /// HS256 secret for session tokens.
    pub jwt_secret: String,
    /// HMAC key for stored verification and reset tokens.
    pub token_hash_secret: String,
    /// Base URL of the web client, used to build password-reset links.
    pub frontend_url: String,
    pub media: MediaConfig,
}

/// Credentials and limits for the media host.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
    /// Upper bound for a single upload or delete call, in seconds (default 30).
    /// Env var: `MEDIA_TIMEOUT_SECS`.
    pub timeout_secs: u64,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            catalog_port: std::env::var("CATALOG_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8000),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            token_hash_secret: std::env::var("TOKEN_HASH_SECRET").expect("TOKEN_HASH_SECRET"),
            frontend_url: std::env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_owned()),
            media: MediaConfig {
                cloud_name: std::env::var("CLOUDINARY_CLOUD_NAME")
                    .expect("CLOUDINARY_CLOUD_NAME"),
                api_key: std::env::var("CLOUDINARY_API_KEY").expect("CLOUDINARY_API_KEY"),
                api_secret: std::env::var("CLOUDINARY_API_SECRET")
                    .expect("CLOUDINARY_API_SECRET"),
                timeout_secs: std::env::var("MEDIA_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(30),
            },
        }
    }
}
