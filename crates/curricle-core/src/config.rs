use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CurricleError, Result};

/// Root configuration for curricle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurricleConfig {
    /// Outbound API endpoints.
    pub api: ApiConfig,

    /// Upload limits per media class.
    #[serde(default)]
    pub uploads: UploadConfig,

    /// Quiz editing policy.
    #[serde(default)]
    pub quiz: QuizConfig,
}

impl CurricleConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| CurricleError::Config(format!("Failed to read config file: {}", e)))?;

        Self::parse_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        // Substitute environment variables
        let content = substitute_env_vars(content);

        toml::from_str(&content)
            .map_err(|e| CurricleError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Load configuration with defaults for everything but the API base URL.
    pub fn default_with_base_url(url: &str) -> Self {
        Self {
            api: ApiConfig {
                base_url: url.to_string(),
                ..Default::default()
            },
            uploads: UploadConfig::default(),
            quiz: QuizConfig::default(),
        }
    }
}

/// Outbound endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the platform API (e.g. `https://api.example.com`).
    pub base_url: String,

    /// Path of the media upload endpoint.
    #[serde(default = "default_upload_path")]
    pub upload_path: String,

    /// Path of the course-creation endpoint.
    #[serde(default = "default_courses_path")]
    pub courses_path: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Full URL of the upload endpoint.
    pub fn upload_url(&self) -> String {
        join_url(&self.base_url, &self.upload_path)
    }

    /// Full URL of the course-creation endpoint.
    pub fn courses_url(&self) -> String {
        join_url(&self.base_url, &self.courses_path)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            upload_path: default_upload_path(),
            courses_path: default_courses_path(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_upload_path() -> String {
    "/api/upload".to_string()
}

fn default_courses_path() -> String {
    "/api/courses".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Upload size limits, bytes, keyed by media class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum video upload size.
    #[serde(default = "default_max_video_bytes")]
    pub max_video_bytes: u64,

    /// Maximum image upload size.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,

    /// Maximum document upload size.
    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_video_bytes: default_max_video_bytes(),
            max_image_bytes: default_max_image_bytes(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

fn default_max_video_bytes() -> u64 {
    500 * 1024 * 1024 // 500 MiB
}

fn default_max_image_bytes() -> u64 {
    10 * 1024 * 1024 // 10 MiB
}

fn default_max_document_bytes() -> u64 {
    50 * 1024 * 1024 // 50 MiB
}

/// Quiz editing policy.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct QuizConfig {
    /// Default cap on correct answers per multi-correct question.
    /// Absent means unbounded.
    pub max_correct_answers: Option<usize>,
}

/// Substitute environment variables in the format ${VAR_NAME}.
fn substitute_env_vars(content: &str) -> String {
    let mut result = content.to_string();
    let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

    for cap in re.captures_iter(content) {
        let var_name = &cap[1];
        if let Ok(value) = std::env::var(var_name) {
            result = result.replace(&cap[0], &value);
        }
    }

    result
}
