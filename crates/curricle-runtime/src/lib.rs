pub mod client;
pub mod studio;
pub mod submit;
pub mod uploads;

pub use client::{HttpCourseApi, HttpMediaGateway};
pub use studio::{prelude, Studio, StudioBuilder};
pub use submit::{CourseSubmitter, SubmitAction, SubmitReceipt};
pub use uploads::{UploadEvent, UploadId, UploadRegistry, UploadState, UploadTask};
