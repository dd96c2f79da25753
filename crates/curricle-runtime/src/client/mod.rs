use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use curricle_core::config::ApiConfig;
use curricle_core::error::{CurricleError, Result};
use curricle_core::media::MediaFile;
use curricle_core::transport::{CourseApi, MediaTransport, UploadReceipt};
use curricle_core::wire::{CoursePayload, CreateCourseResponse, UploadResponse};

fn build_client(config: &ApiConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| CurricleError::Config(format!("Failed to build HTTP client: {}", e)))
}

/// Media transport backed by the platform's multipart upload endpoint.
///
/// The file goes out as a single `file` part; the endpoint answers
/// with `{"success": bool, "url": ..., "message": ...}`.
pub struct HttpMediaGateway {
    client: reqwest::Client,
    upload_url: String,
}

impl HttpMediaGateway {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            upload_url: config.upload_url(),
        })
    }
}

impl MediaTransport for HttpMediaGateway {
    fn upload(
        &self,
        file: MediaFile,
    ) -> Pin<Box<dyn Future<Output = Result<UploadReceipt>> + Send + '_>> {
        let client = self.client.clone();
        let url = self.upload_url.clone();
        Box::pin(async move {
            let part = reqwest::multipart::Part::bytes(file.bytes)
                .file_name(file.file_name)
                .mime_str(&file.mime_type)
                .map_err(|e| CurricleError::UploadRejected(format!("Invalid MIME type: {}", e)))?;
            let form = reqwest::multipart::Form::new().part("file", part);

            let response = client
                .post(&url)
                .multipart(form)
                .send()
                .await
                .map_err(|e| CurricleError::Transport(e.to_string()))?;
            let body: UploadResponse = response
                .json()
                .await
                .map_err(|e| CurricleError::Serialization(e.to_string()))?;

            if !body.success {
                return Err(CurricleError::Api(
                    body.message.unwrap_or_else(|| "upload rejected".to_string()),
                ));
            }
            match body.url {
                Some(url) => Ok(UploadReceipt {
                    url,
                    message: body.message,
                }),
                None => Err(CurricleError::Serialization(
                    "Upload response carries no url".to_string(),
                )),
            }
        })
    }
}

/// Course endpoint client speaking the JSON creation contract.
pub struct HttpCourseApi {
    client: reqwest::Client,
    courses_url: String,
}

impl HttpCourseApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: build_client(config)?,
            courses_url: config.courses_url(),
        })
    }
}

impl CourseApi for HttpCourseApi {
    fn create_course(
        &self,
        payload: CoursePayload,
    ) -> Pin<Box<dyn Future<Output = Result<CreateCourseResponse>> + Send + '_>> {
        let client = self.client.clone();
        let url = self.courses_url.clone();
        Box::pin(async move {
            let response = client
                .post(&url)
                .json(&payload)
                .send()
                .await
                .map_err(|e| CurricleError::Transport(e.to_string()))?;
            // Rejections come back as success:false bodies, also on
            // non-2xx statuses, so the body is decoded either way.
            response
                .json()
                .await
                .map_err(|e| CurricleError::Serialization(e.to_string()))
        })
    }
}
