pub mod grammers;

use crate::error::ClientError;
use crate::models::{Account, Document, SignInOutcome};
use tokio::io::AsyncRead;

pub use grammers::GrammersMessenger;

/// The reminder shown next to the cloud password prompt.
pub trait PasswordHint {
    fn hint(&self) -> Option<&str>;
}

/// The remote calls the upload flow needs from a Telegram client.
///
/// Every method is a single round-trip; callers await each one before
/// issuing the next.
#[allow(async_fn_in_trait)]
pub trait Messenger {
    /// Returned by [`request_login_code`](Self::request_login_code), handed back to `sign_in`.
    type LoginToken;
    /// Server-side parameters needed to verify a cloud password.
    type PasswordChallenge: PasswordHint;
    /// Opaque handle to bytes already transferred to the server.
    type Upload;

    async fn connect(&mut self) -> Result<(), ClientError>;

    async fn is_authorized(&self) -> Result<bool, ClientError>;

    async fn request_login_code(&self, phone: &str) -> Result<Self::LoginToken, ClientError>;

    async fn sign_in(&self, token: &Self::LoginToken, code: &str) -> SignInOutcome;

    async fn password_challenge(&self) -> Result<Self::PasswordChallenge, ClientError>;

    async fn check_password(
        &self,
        challenge: Self::PasswordChallenge,
        password: &str,
    ) -> Result<Account, ClientError>;

    async fn list_contacts(&self) -> Result<Vec<Account>, ClientError>;

    async fn upload_file<R>(
        &self,
        name: &str,
        size: usize,
        reader: &mut R,
    ) -> Result<Self::Upload, ClientError>
    where
        R: AsyncRead + Unpin + Send;

    async fn send_document(
        &self,
        target: &Account,
        upload: Self::Upload,
        document: &Document,
    ) -> Result<(), ClientError>;

    /// Persist the authorization so the next run skips the login.
    async fn save_session(&self) -> Result<(), ClientError>;
}
