use std::path::PathBuf;

/// MIME type every upload is sent with, whatever the file contains.
pub const DOCUMENT_MIME_TYPE: &str = "application/octet-stream";

/// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file: PathBuf,
    pub caption: String,
}

/// A Telegram user as seen by this program.
///
/// Only `id` and `access_hash` are needed to address the upload; `name` is
/// kept for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: i64,
    pub access_hash: Option<i64>,
    pub name: String,
    pub is_self: bool,
}

/// Result of submitting a login code.
#[derive(Debug)]
pub enum SignInOutcome {
    Authorized(Account),
    /// The account has a cloud password; the code alone is not enough.
    PasswordRequired,
    InvalidCode,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentAttribute {
    FileName(String),
}

/// Everything sent along with an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub caption: String,
    pub mime_type: String,
    pub attributes: Vec<DocumentAttribute>,
}

impl Document {
    /// A generic binary document named `file_name`.
    pub fn binary(file_name: &str, caption: &str) -> Self {
        Self {
            caption: caption.to_string(),
            mime_type: DOCUMENT_MIME_TYPE.to_string(),
            attributes: vec![DocumentAttribute::FileName(file_name.to_string())],
        }
    }
}
