use crate::config::Config;
use crate::error::ClientError;
use crate::messenger::{Messenger, PasswordHint};
use crate::models::{Account, Document, SignInOutcome};
use grammers_client::types::media::Uploaded;
use grammers_client::types::{InputMessage, LoginToken, PasswordToken, User};
use grammers_client::{Client, InitParams, SignInError};
use grammers_session::{PackedChat, PackedType, Session};
use grammers_tl_types as tl;
use std::path::{Path, PathBuf};
use tokio::io::AsyncRead;

pub const DEFAULT_SESSION_PATH: &str = "session.dat";

/// Cloud password parameters plus the hint the user set for them.
pub struct PasswordChallenge {
    token: PasswordToken,
    hint: Option<String>,
}

/// [`Messenger`] backed by a `grammers` MTProto client.
pub struct GrammersMessenger {
    api_id: i32,
    api_hash: String,
    session_path: PathBuf,
    client: Option<Client>,
}

impl PasswordHint for PasswordChallenge {
    fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

/// The two builder steps that turn an upload into a document message.
trait DocumentMessage: Sized {
    type File;

    fn with_mime_type(self, mime_type: &str) -> Self;

    fn with_document(self, file: Self::File) -> Self;
}

impl DocumentMessage for InputMessage {
    type File = Uploaded;

    fn with_mime_type(self, mime_type: &str) -> Self {
        self.mime_type(mime_type)
    }

    fn with_document(self, file: Uploaded) -> Self {
        self.document(file)
    }
}

/// grammers resolves the MIME type when the media is attached, so it has
/// to be set first or the type is guessed from the file extension.
/// The file name attribute is added by grammers from the upload name.
fn document_message<M: DocumentMessage>(message: M, file: M::File, document: &Document) -> M {
    message
        .with_mime_type(&document.mime_type)
        .with_document(file)
}

impl GrammersMessenger {
    pub fn new(config: &Config, session_path: &Path) -> Self {
        Self {
            api_id: config.api_id,
            api_hash: config.api_hash.clone(),
            session_path: session_path.to_path_buf(),
            client: None,
        }
    }

    fn client(&self) -> Result<&Client, ClientError> {
        self.client.as_ref().ok_or(ClientError::NotConnected)
    }
}

fn request_failed(e: impl std::fmt::Display) -> ClientError {
    ClientError::Request(e.to_string().into())
}

fn account_from_user(user: &User) -> Account {
    Account {
        id: user.id(),
        access_hash: user.pack().access_hash,
        name: user.full_name(),
        is_self: true,
    }
}

fn account_from_raw(user: tl::types::User) -> Account {
    let name = [user.first_name, user.last_name]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    Account {
        id: user.id,
        access_hash: user.access_hash,
        name,
        is_self: user.is_self,
    }
}

impl Messenger for GrammersMessenger {
    type LoginToken = LoginToken;
    type PasswordChallenge = PasswordChallenge;
    type Upload = Uploaded;

    async fn connect(&mut self) -> Result<(), ClientError> {
        let session = Session::load_file_or_create(&self.session_path)?;
        let client = Client::connect(grammers_client::Config {
            session,
            api_id: self.api_id,
            api_hash: self.api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .map_err(|e| ClientError::Connect(e.to_string().into()))?;
        tracing::debug!(session = %self.session_path.display(), "Connected to Telegram");
        self.client = Some(client);
        Ok(())
    }

    async fn is_authorized(&self) -> Result<bool, ClientError> {
        self.client()?
            .is_authorized()
            .await
            .map_err(request_failed)
    }

    async fn request_login_code(&self, phone: &str) -> Result<LoginToken, ClientError> {
        self.client()?
            .request_login_code(phone)
            .await
            .map_err(request_failed)
    }

    async fn sign_in(&self, token: &LoginToken, code: &str) -> SignInOutcome {
        let client = match self.client() {
            Ok(client) => client,
            Err(e) => return SignInOutcome::Failed(e.to_string()),
        };
        match client.sign_in(token, code).await {
            Ok(user) => SignInOutcome::Authorized(account_from_user(&user)),
            Err(SignInError::PasswordRequired(_)) => SignInOutcome::PasswordRequired,
            Err(SignInError::InvalidCode) => SignInOutcome::InvalidCode,
            Err(e) => SignInOutcome::Failed(e.to_string()),
        }
    }

    async fn password_challenge(&self) -> Result<PasswordChallenge, ClientError> {
        let tl::enums::account::Password::Password(password) = self
            .client()?
            .invoke(&tl::functions::account::GetPassword {})
            .await
            .map_err(request_failed)?;
        let hint = password.hint.clone();
        Ok(PasswordChallenge {
            token: PasswordToken::new(password),
            hint,
        })
    }

    async fn check_password(
        &self,
        challenge: PasswordChallenge,
        password: &str,
    ) -> Result<Account, ClientError> {
        let user = self
            .client()?
            .check_password(challenge.token, password.as_bytes())
            .await
            .map_err(request_failed)?;
        Ok(account_from_user(&user))
    }

    async fn list_contacts(&self) -> Result<Vec<Account>, ClientError> {
        let contacts = self
            .client()?
            .invoke(&tl::functions::contacts::GetContacts { hash: 0 })
            .await
            .map_err(request_failed)?;
        let users = match contacts {
            tl::enums::contacts::Contacts::Contacts(contacts) => contacts.users,
            tl::enums::contacts::Contacts::NotModified => Vec::new(),
        };
        Ok(users
            .into_iter()
            .filter_map(|user| match user {
                tl::enums::User::User(user) => Some(account_from_raw(user)),
                tl::enums::User::Empty(_) => None,
            })
            .collect())
    }

    async fn upload_file<R>(
        &self,
        name: &str,
        size: usize,
        reader: &mut R,
    ) -> Result<Uploaded, ClientError>
    where
        R: AsyncRead + Unpin + Send,
    {
        let uploaded = self
            .client()?
            .upload_stream(reader, size, name.to_string())
            .await?;
        Ok(uploaded)
    }

    async fn send_document(
        &self,
        target: &Account,
        upload: Uploaded,
        document: &Document,
    ) -> Result<(), ClientError> {
        let peer = PackedChat {
            ty: PackedType::User,
            id: target.id,
            access_hash: target.access_hash,
        };
        let message = document_message(InputMessage::text(&document.caption), upload, document);
        self.client()?
            .send_message(peer, message)
            .await
            .map_err(request_failed)?;
        Ok(())
    }

    async fn save_session(&self) -> Result<(), ClientError> {
        self.client()?
            .session()
            .save_to_file(&self.session_path)
            .map_err(|source| ClientError::SaveSession {
                path: self.session_path.display().to_string(),
                source,
            })
    }
}
