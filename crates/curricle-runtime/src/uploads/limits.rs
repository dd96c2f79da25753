use curricle_core::config::UploadConfig;
use curricle_core::error::{CurricleError, Result};
use curricle_core::media::{MediaClass, MediaFile};

/// Size ceiling for a media class.
pub fn max_bytes(class: MediaClass, limits: &UploadConfig) -> u64 {
    match class {
        MediaClass::Video => limits.max_video_bytes,
        MediaClass::Image => limits.max_image_bytes,
        MediaClass::Document => limits.max_document_bytes,
    }
}

/// Check a file against the expected class and its size ceiling.
///
/// Runs before any bytes leave the machine; a rejected file never
/// reaches the transport.
pub fn check_file(file: &MediaFile, expected: MediaClass, limits: &UploadConfig) -> Result<()> {
    let class = match file.class() {
        Some(class) => class,
        None => {
            return Err(CurricleError::UploadRejected(format!(
                "Unsupported file type: {}",
                file.mime_type
            )));
        }
    };

    if class != expected {
        return Err(CurricleError::UploadRejected(format!(
            "Expected a {} file, got {} ({})",
            expected, class, file.mime_type
        )));
    }

    let ceiling = max_bytes(class, limits);
    if file.size_bytes() > ceiling {
        return Err(CurricleError::UploadRejected(format!(
            "{} exceeds the {} size limit of {} bytes",
            file.file_name, class, ceiling
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> UploadConfig {
        UploadConfig::default()
    }

    #[test]
    fn test_video_within_limit_passes() {
        let file = MediaFile::new("intro.mp4", "video/mp4", vec![0u8; 1024]);
        assert!(check_file(&file, MediaClass::Video, &limits()).is_ok());
    }

    #[test]
    fn test_any_video_subtype_within_limit_passes() {
        let file = MediaFile::new("intro.mkv", "video/x-matroska", vec![0u8; 1024]);
        assert!(check_file(&file, MediaClass::Video, &limits()).is_ok());
    }

    #[test]
    fn test_unknown_mime_rejected() {
        let file = MediaFile::new("binary.exe", "application/x-msdownload", vec![0u8; 16]);
        let err = check_file(&file, MediaClass::Video, &limits()).unwrap_err();
        assert!(matches!(err, CurricleError::UploadRejected(_)));
    }

    #[test]
    fn test_class_mismatch_rejected() {
        let file = MediaFile::new("cover.png", "image/png", vec![0u8; 16]);
        let err = check_file(&file, MediaClass::Video, &limits()).unwrap_err();
        assert!(matches!(err, CurricleError::UploadRejected(_)));
    }

    #[test]
    fn test_oversized_file_rejected() {
        let limits = UploadConfig {
            max_video_bytes: 8,
            ..UploadConfig::default()
        };
        let file = MediaFile::new("intro.mp4", "video/mp4", vec![0u8; 9]);
        let err = check_file(&file, MediaClass::Video, &limits).unwrap_err();
        assert!(matches!(err, CurricleError::UploadRejected(_)));
    }

    #[test]
    fn test_file_at_exact_limit_passes() {
        let limits = UploadConfig {
            max_video_bytes: 8,
            ..UploadConfig::default()
        };
        let file = MediaFile::new("intro.mp4", "video/mp4", vec![0u8; 8]);
        assert!(check_file(&file, MediaClass::Video, &limits).is_ok());
    }
}
