//! Data models for the strata-link client library.
//!
//! Defines function references and argument objects for the binding layer,
//! plus file descriptors, upload responses, and progress payloads for the
//! upload helpers.

pub mod file_descriptor;
pub mod function_args;
pub mod function_reference;
pub mod progress_update;
pub mod storage_response;
pub mod upload_file;
pub mod upload_file_response;

pub use file_descriptor::FileDescriptor;
pub use function_args::FunctionArgs;
pub use function_reference::{FunctionKind, FunctionReference};
pub use progress_update::{ProgressTracking, ProgressUpdate};
pub use storage_response::StorageResponse;
pub use upload_file::UploadFile;
pub use upload_file_response::UploadFileResponse;
