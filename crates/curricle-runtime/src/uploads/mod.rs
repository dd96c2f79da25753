mod limits;
mod registry;
mod task;

pub use limits::{check_file, max_bytes};
pub use registry::{UploadEvent, UploadRegistry};
pub use task::{UploadId, UploadState, UploadTask};
