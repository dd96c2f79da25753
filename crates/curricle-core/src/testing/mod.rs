//! Testing utilities for curricle-based code.
//!
//! Provides in-memory implementations of the two outbound boundaries
//! (media upload, course creation) that record every call and reply
//! with scripted outcomes, so editor and upload flows can be tested
//! without a network.
//!
//! # Example
//!
//! ```ignore
//! let host = MockMediaHost::instant();
//! let api = MockCourseApi::accepting();
//!
//! // ... run the flow under test ...
//!
//! host.assert_uploaded("intro.mp4");
//! api.assert_called_times(1);
//! ```

pub mod course_api;
pub mod media_host;

pub use course_api::MockCourseApi;
pub use media_host::{MockMediaHost, RecordedUpload};
