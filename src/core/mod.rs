//! Core plumbing shared by every stageline command
//!
//! - **error**: Comprehensive error types with contextual help messages

pub mod error;
