use std::env;

/// Runtime configuration for the portal
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQL connection string for remote mode (e.g. postgres:// or sqlite://)
    pub database_url: String,

    /// S3-compatible endpoint URL for remote-mode blob storage
    pub s3_endpoint: String,

    /// S3 access key
    pub s3_access_key: String,

    /// S3 secret key
    pub s3_secret_key: String,

    /// Bucket holding uploaded media
    pub s3_bucket: String,

    /// S3 region. Carried for client setup only; never consulted when
    /// deciding remote vs local mode.
    pub s3_region: String,

    /// Directory for local-mode JSON blobs (default: "./data")
    pub data_dir: String,

    /// Local-mode poll interval in seconds (default: 2)
    pub poll_interval_secs: u64,

    /// Admin login (default: "admin")
    pub admin_username: String,

    /// Admin password (default: "admin123")
    pub admin_password: String,

    /// Maximum accepted upload body in bytes (default: 256 MB)
    pub max_upload_size: usize,

    /// Bind port (default: 3000)
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            s3_endpoint: String::new(),
            s3_access_key: String::new(),
            s3_secret_key: String::new(),
            s3_bucket: String::new(),
            s3_region: "us-east-1".to_string(),
            data_dir: "./data".to_string(),
            poll_interval_secs: 2,
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            max_upload_size: 256 * 1024 * 1024, // 256 MB
            port: 3000,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or_default(),
            s3_endpoint: env::var("S3_ENDPOINT").unwrap_or_default(),
            s3_access_key: env::var("S3_ACCESS_KEY").unwrap_or_default(),
            s3_secret_key: env::var("S3_SECRET_KEY").unwrap_or_default(),
            s3_bucket: env::var("S3_BUCKET").unwrap_or_default(),
            s3_region: env::var("S3_REGION").unwrap_or(default.s3_region),

            data_dir: env::var("DATA_DIR").unwrap_or(default.data_dir),

            poll_interval_secs: env::var("POLL_INTERVAL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.poll_interval_secs),

            admin_username: env::var("ADMIN_USERNAME").unwrap_or(default.admin_username),
            admin_password: env::var("ADMIN_PASSWORD").unwrap_or(default.admin_password),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),

            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.port),
        }
    }

    /// Remote mode requires the full set of backend parameters. A single
    /// missing one forces local fallback; there is no partial configuration.
    /// `s3_region` is intentionally excluded from the check.
    pub fn remote_configured(&self) -> bool {
        !self.database_url.is_empty()
            && !self.s3_endpoint.is_empty()
            && !self.s3_access_key.is_empty()
            && !self.s3_secret_key.is_empty()
            && !self.s3_bucket.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote_config() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".to_string(),
            s3_endpoint: "http://127.0.0.1:9000".to_string(),
            s3_access_key: "minioadmin".to_string(),
            s3_secret_key: "minioadmin".to_string(),
            s3_bucket: "media".to_string(),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_default_is_local_mode() {
        let config = AppConfig::default();
        assert!(!config.remote_configured());
        assert_eq!(config.poll_interval_secs, 2);
        assert_eq!(config.data_dir, "./data");
    }

    #[test]
    fn test_full_backend_config_is_remote() {
        assert!(remote_config().remote_configured());
    }

    #[test]
    fn test_any_missing_parameter_forces_local() {
        for clear in 0..5 {
            let mut config = remote_config();
            match clear {
                0 => config.database_url.clear(),
                1 => config.s3_endpoint.clear(),
                2 => config.s3_access_key.clear(),
                3 => config.s3_secret_key.clear(),
                _ => config.s3_bucket.clear(),
            }
            assert!(!config.remote_configured());
        }
    }

    #[test]
    fn test_region_not_consulted_for_mode() {
        let mut config = remote_config();
        config.s3_region.clear();
        assert!(config.remote_configured());
    }
}
