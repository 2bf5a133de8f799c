use crate::config::Config;
use crate::error::UploadError;
use crate::messenger::{Messenger, PasswordHint};
use crate::models::{Account, Document, SignInOutcome, UploadRequest};
use crate::prompt::Console;
use std::path::Path;

/// How a run ended when no fatal error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The file was delivered to Saved Messages.
    Sent,
    /// Login failed for a reason other than a bad code; nothing was uploaded.
    LoginAbandoned,
}

/// Connects, logs in if needed and sends `request.file` to the account's
/// own chat.
pub async fn run_upload<M, C>(
    client: &mut M,
    console: &mut C,
    config: &Config,
    request: &UploadRequest,
    session_path: &Path,
) -> Result<RunOutcome, UploadError>
where
    M: Messenger,
    C: Console,
{
    if !request.file.is_file() {
        return Err(UploadError::FileNotFound(request.file.clone()));
    }

    console.say("Starting to upload");
    console.say("Logging in");
    client.connect().await?;

    let me = if client.is_authorized().await? {
        tracing::debug!("Session already authorized, looking up own account");
        find_self(client).await?
    } else {
        match log_in(client, console, config).await? {
            Some(me) => {
                client.save_session().await?;
                me
            }
            None => {
                console.say(&format!(
                    "If you want a fresh start just remove {} file and restart.",
                    session_path.display()
                ));
                return Ok(RunOutcome::LoginAbandoned);
            }
        }
    };
    tracing::info!(user_id = me.id, name = %me.name, "Logged in");

    send_file(client, console, &me, request).await?;
    console.say("Done");
    Ok(RunOutcome::Sent)
}

async fn find_self<M: Messenger>(client: &M) -> Result<Account, UploadError> {
    client
        .list_contacts()
        .await?
        .into_iter()
        .find(|account| account.is_self)
        .ok_or(UploadError::SelfNotFound)
}

/// Returns `None` when login failed in a way the operator should recover
/// from by deleting the session file.
async fn log_in<M, C>(
    client: &M,
    console: &mut C,
    config: &Config,
) -> Result<Option<Account>, UploadError>
where
    M: Messenger,
    C: Console,
{
    let token = client.request_login_code(&config.number).await?;
    let code = console.ask_code().map_err(UploadError::Prompt)?;

    match client.sign_in(&token, &code).await {
        SignInOutcome::Authorized(me) => Ok(Some(me)),
        SignInOutcome::PasswordRequired => {
            tracing::debug!("Account has a cloud password");
            let challenge = client.password_challenge().await?;
            let password = console
                .ask_password(challenge.hint())
                .map_err(UploadError::Prompt)?;
            let me = client.check_password(challenge, &password).await?;
            Ok(Some(me))
        }
        SignInOutcome::InvalidCode => Err(UploadError::InvalidCode),
        SignInOutcome::Failed(detail) => {
            tracing::warn!(error = %detail, "Sign-in failed");
            console.say(&format!("An error occurred: {detail}"));
            Ok(None)
        }
    }
}

async fn send_file<M, C>(
    client: &M,
    console: &mut C,
    target: &Account,
    request: &UploadRequest,
) -> Result<(), UploadError>
where
    M: Messenger,
    C: Console,
{
    let file_name = request
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| request.file.display().to_string());
    let document = Document::binary(&file_name, &request.caption);

    console.say("Uploading file");
    let open_error = |source: std::io::Error| UploadError::OpenFile {
        path: request.file.clone(),
        source,
    };
    let mut file = tokio::fs::File::open(&request.file)
        .await
        .map_err(open_error)?;
    let len = file.metadata().await.map_err(open_error)?.len();
    let size = upload_size(len).map_err(open_error)?;
    tracing::debug!(file = %file_name, size, "Uploading");
    let upload = client.upload_file(&file_name, size, &mut file).await?;

    console.say("Uploaded; Sending file");
    client.send_document(target, upload, &document).await?;
    Ok(())
}

fn upload_size(len: u64) -> std::io::Result<usize> {
    usize::try_from(len).map_err(|_| {
        std::io::Error::new(
            std::io::ErrorKind::FileTooLarge,
            format!("{len} bytes does not fit in memory on this platform"),
        )
    })
}
