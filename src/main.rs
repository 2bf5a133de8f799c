use anyhow::Context;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use telegram_uploader::config::{Config, DEFAULT_CONFIG_PATH};
use telegram_uploader::error::ConfigError;
use telegram_uploader::messenger::GrammersMessenger;
use telegram_uploader::messenger::grammers::DEFAULT_SESSION_PATH;
use telegram_uploader::models::UploadRequest;
use telegram_uploader::prompt::TerminalConsole;
use telegram_uploader::upload::{self, RunOutcome};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "telegram-uploader",
    about = "Upload a file to your own Telegram Saved Messages"
)]
struct Cli {
    /// The file to upload
    #[arg(short, long)]
    file: PathBuf,

    /// The caption of the file
    #[arg(short, long, default_value = "")]
    caption: String,

    /// Path to the JSON file holding ApiId, ApiHash and Number
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Where the Telegram session is stored between runs
    #[arg(long, default_value = DEFAULT_SESSION_PATH)]
    session: PathBuf,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Finds `--config` among raw arguments that clap could not parse.
fn config_path_from_args<I>(args: I) -> PathBuf
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut path = PathBuf::from(DEFAULT_CONFIG_PATH);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(value) = args.next() {
                path = PathBuf::from(value);
            }
        } else if let Some(value) = arg.to_str().and_then(|a| a.strip_prefix("--config=")) {
            path = PathBuf::from(value);
        }
    }
    path
}

fn main() {
    // A missing config is reported ahead of any usage error.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let config_path = config_path_from_args(std::env::args_os().skip(1));
            if !config_path.exists() {
                eprintln!(
                    "Error: {}",
                    ConfigError::NotFound(config_path.display().to_string())
                );
                std::process::exit(1);
            }
            e.exit()
        }
    };
    init_tracing();

    let config = match Config::load_from_path(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match run(cli, &config) {
        Ok(RunOutcome::Sent) => {}
        Ok(RunOutcome::LoginAbandoned) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli, config: &Config) -> anyhow::Result<RunOutcome> {
    let request = UploadRequest {
        file: cli.file,
        caption: cli.caption,
    };
    let mut client = GrammersMessenger::new(config, &cli.session);
    let mut console = TerminalConsole;

    let rt = tokio::runtime::Runtime::new().context("Failed to create tokio runtime")?;
    let outcome = rt.block_on(upload::run_upload(
        &mut client,
        &mut console,
        config,
        &request,
        &cli.session,
    ))?;
    Ok(outcome)
}
