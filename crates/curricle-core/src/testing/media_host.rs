//! In-memory media host for upload tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, RwLock};

use tokio::sync::watch;

use crate::error::{CurricleError, Result};
use crate::media::MediaFile;
use crate::transport::{MediaTransport, UploadReceipt};

/// A single upload observed by the mock host.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedUpload {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone)]
enum Mode {
    Instant,
    Held,
    Failing(String),
}

/// Mock implementation of [`MediaTransport`] that records every upload.
///
/// Three behaviors are available: `instant` resolves immediately with a
/// synthetic URL, `held` parks every transfer until [`release_all`] is
/// called, and `failing` rejects each transfer with a transport error.
/// The held mode exists so cancellation can be exercised while a
/// transfer is genuinely in flight.
///
/// [`release_all`]: MockMediaHost::release_all
#[derive(Clone)]
pub struct MockMediaHost {
    mode: Mode,
    uploads: Arc<RwLock<Vec<RecordedUpload>>>,
    release: Arc<watch::Sender<bool>>,
}

impl MockMediaHost {
    fn with_mode(mode: Mode) -> Self {
        let (release, _) = watch::channel(false);
        Self {
            mode,
            uploads: Arc::new(RwLock::new(Vec::new())),
            release: Arc::new(release),
        }
    }

    /// Host that completes every upload immediately.
    pub fn instant() -> Self {
        Self::with_mode(Mode::Instant)
    }

    /// Host that holds every upload until [`release_all`](Self::release_all).
    pub fn held() -> Self {
        Self::with_mode(Mode::Held)
    }

    /// Host that fails every upload with a transport error.
    pub fn failing(message: &str) -> Self {
        Self::with_mode(Mode::Failing(message.to_string()))
    }

    /// Let all held transfers proceed to completion.
    pub fn release_all(&self) {
        // Lost sends only happen when every receiver is gone, which
        // means no transfer is waiting anyway.
        let _ = self.release.send(true);
    }

    /// All uploads observed so far, in call order.
    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.read().unwrap().clone()
    }

    /// Number of uploads that reached the host.
    pub fn upload_count(&self) -> usize {
        self.uploads.read().unwrap().len()
    }

    /// Assert that a file with this name reached the host.
    pub fn assert_uploaded(&self, file_name: &str) {
        let uploads = self.uploads.read().unwrap();
        assert!(
            uploads.iter().any(|u| u.file_name == file_name),
            "Expected an upload of '{}' but saw: {:?}",
            file_name,
            uploads.iter().map(|u| u.file_name.as_str()).collect::<Vec<_>>()
        );
    }

    /// Assert that no upload reached the host.
    pub fn assert_no_uploads(&self) {
        let count = self.uploads.read().unwrap().len();
        assert!(count == 0, "Expected no uploads but saw {}", count);
    }
}

impl Default for MockMediaHost {
    fn default() -> Self {
        Self::instant()
    }
}

impl MediaTransport for MockMediaHost {
    fn upload(
        &self,
        file: MediaFile,
    ) -> Pin<Box<dyn Future<Output = Result<UploadReceipt>> + Send + '_>> {
        self.uploads.write().unwrap().push(RecordedUpload {
            file_name: file.file_name.clone(),
            mime_type: file.mime_type.clone(),
            size_bytes: file.size_bytes(),
        });
        let mode = self.mode.clone();
        let mut release = self.release.subscribe();
        Box::pin(async move {
            if matches!(mode, Mode::Held) {
                while !*release.borrow_and_update() {
                    if release.changed().await.is_err() {
                        return Err(CurricleError::Transport("media host dropped".to_string()));
                    }
                }
            }
            match mode {
                Mode::Failing(message) => Err(CurricleError::Transport(message)),
                _ => Ok(UploadReceipt {
                    url: format!("https://media.invalid/{}", file.file_name),
                    message: None,
                }),
            }
        })
    }
}
