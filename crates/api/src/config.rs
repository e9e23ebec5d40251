/// Which backend holds the nudges collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeStoreKind {
    /// Shared Postgres pool (production).
    Postgres,
    /// Process-local memory, the original service's first iteration.
    /// Useful for local development without a database.
    Memory,
}

/// Which backend holds the uploaded cover images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectStoreKind {
    /// Local directory, served back at `/uploads`.
    Local,
    /// S3 bucket behind a public base URL.
    S3,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Nudge collection backend (default: `postgres`).
    pub nudge_store: NudgeStoreKind,
    /// Cover image backend (default: `local`).
    pub object_store: ObjectStoreKind,
    /// Local object store root (default: `uploads`).
    pub upload_dir: String,
    /// S3 bucket, required when `object_store` is `s3`.
    pub s3_bucket: Option<String>,
    /// S3 key prefix (default: `nudges`).
    pub s3_prefix: String,
    /// Public base URL for S3 keys, required when `object_store` is `s3`.
    pub s3_public_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `NUDGE_STORE`          | `postgres`                 |
    /// | `OBJECT_STORE`         | `local`                    |
    /// | `UPLOAD_DIR`           | `uploads`                  |
    /// | `S3_BUCKET`            | (unset)                    |
    /// | `S3_PREFIX`            | `nudges`                   |
    /// | `S3_PUBLIC_URL`        | (unset)                    |
    ///
    /// Panics on unparseable values; misconfiguration should fail fast
    /// at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let nudge_store = match std::env::var("NUDGE_STORE")
            .unwrap_or_else(|_| "postgres".into())
            .as_str()
        {
            "postgres" => NudgeStoreKind::Postgres,
            "memory" => NudgeStoreKind::Memory,
            other => panic!("NUDGE_STORE must be 'postgres' or 'memory', got '{other}'"),
        };

        let object_store = match std::env::var("OBJECT_STORE")
            .unwrap_or_else(|_| "local".into())
            .as_str()
        {
            "local" => ObjectStoreKind::Local,
            "s3" => ObjectStoreKind::S3,
            other => panic!("OBJECT_STORE must be 'local' or 's3', got '{other}'"),
        };

        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".into());

        let s3_bucket = std::env::var("S3_BUCKET").ok();
        let s3_prefix = std::env::var("S3_PREFIX").unwrap_or_else(|_| "nudges".into());
        let s3_public_url = std::env::var("S3_PUBLIC_URL")
            .ok()
            .map(|u| u.trim_end_matches('/').to_string());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            nudge_store,
            object_store,
            upload_dir,
            s3_bucket,
            s3_prefix,
            s3_public_url,
        }
    }
}
