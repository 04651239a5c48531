//! `shortener`: command-line client for the URL shortener REST API.
//!
//! Shares the session core with the web client. The token lives in a file
//! (`$HOME/.shortener_token` by default) instead of `localStorage`, and login
//! is a copy/paste of the token the provider callback shows in the browser.

mod backend;
mod storage;


use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use session::{
    ApiError, AuthError, CheckOutcome, CreateRequest, Provider, SessionStore, ShareXConfig,
    StorageError, Token, endpoints,
};
use tracing_subscriber::EnvFilter;

use crate::backend::ApiClient;
use crate::storage::CliStorage;

type CliSession = SessionStore<CliStorage, ApiClient>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot locate a token file; pass --token-file or set HOME")]
    NoTokenFile,
    #[error("unknown provider `{0}`")]
    UnknownProvider(String),
    #[error("provider `{0}` is not enabled on this server")]
    ProviderDisabled(&'static str),
    #[error("no token provided")]
    MissingToken,
    #[error("not logged in; run `shortener login --provider <name>`")]
    NotLoggedIn,
    #[error("no link named \"{0}\"")]
    NotFound(String),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("read stdin: {0}")]
    Io(#[from] io::Error),
    #[error("render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "shortener", about = "URL shortener API client")]
struct Cli {
    #[arg(long, env = "SHORTENER_BASE_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,

    /// Where the session token is kept between invocations.
    #[arg(long, env = "SHORTENER_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Use this token for one invocation without persisting it.
    #[arg(long, env = "SHORTENER_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the server's providers and build info.
    Info,
    /// Log in with a provider and store the resulting token.
    Login(LoginArgs),
    /// Forget the stored token.
    Logout,
    /// Validate the stored token and show who it belongs to.
    Whoami,
    /// Shorten a URL.
    Create(CreateArgs),
    /// Show metadata of a short link (id or full short URL).
    Lookup { link: String },
    /// List links recently created by the current user.
    Recent,
    /// List recorded visits of a short link.
    Visitors { link: String },
    /// Delete one of your recent links.
    Delete { link: String },
    /// Print a ShareX custom uploader config for the current session.
    Sharex,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    provider: String,

    /// Token copied from the browser; read from stdin when absent.
    #[arg(long = "with-token")]
    with_token: Option<String>,
}

#[derive(Args, Debug)]
struct CreateArgs {
    url: String,

    /// Custom short id.
    #[arg(long)]
    id: Option<String>,

    /// RFC 3339 expiry, e.g. 2027-01-01T00:00:00Z.
    #[arg(long)]
    expiration: Option<String>,

    #[arg(long)]
    password: Option<String>,
}

impl CreateArgs {
    fn into_request(self) -> CreateRequest {
        CreateRequest {
            url: self.url.trim().to_owned(),
            id: self.id.map(|id| id.trim().to_owned()).filter(|id| !id.is_empty()),
            expiration: self.expiration.filter(|value| !value.trim().is_empty()),
            password: self.password.filter(|value| !value.is_empty()),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    init_tracing();
    let cli = Cli::parse();

    let token_file = match cli.token_file {
        Some(path) => path,
        None => storage::default_token_file().ok_or(CliError::NoTokenFile)?,
    };
    let store = SessionStore::new(
        CliStorage::resolve(cli.token, token_file),
        ApiClient::new(cli.base_url),
    );
    tracing::debug!(base_url = store.backend().base_url(), "starting");

    match cli.command {
        Command::Info => print_json(&store.backend().info().await?),
        Command::Login(args) => run_login(&store, args).await,
        Command::Logout => {
            store.logout()?;
            println!("Logged out");
            Ok(())
        }
        Command::Whoami => run_whoami(&store).await,
        Command::Create(args) => run_create(&store, args).await,
        Command::Lookup { link } => run_lookup(&store, &link).await,
        Command::Recent => {
            let token = require_token(&store)?;
            let recent = store.guard(store.backend().recent(&token).await)?;
            print_json(&recent)
        }
        Command::Visitors { link } => {
            let token = require_token(&store)?;
            let id = short_id(&store, &link).await;
            let visitors = store.guard(store.backend().visitors(&token, &id).await)?;
            print_json(&visitors)
        }
        Command::Delete { link } => run_delete(&store, &link).await,
        Command::Sharex => {
            let token = require_token(&store)?;
            let config = ShareXConfig::new(store.backend().base_url(), &token);
            println!("{}", config.to_json()?);
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// =============================================================================
// SESSION COMMANDS
// =============================================================================

async fn run_login(store: &CliSession, args: LoginArgs) -> Result<(), CliError> {
    let provider = Provider::parse(args.provider.trim())
        .ok_or_else(|| CliError::UnknownProvider(args.provider.clone()))?;
    let info = store.backend().info().await?;

    if info.uses_proxy() {
        store.ensure_proxy_token(&info)?;
        tracing::info!("authentication delegated to proxy");
        return run_whoami(store).await;
    }
    if !info.has(provider) {
        return Err(CliError::ProviderDisabled(provider.id()));
    }

    let token = match args.with_token {
        Some(raw) => Some(Token::new(raw.trim())).filter(|token| !token.as_str().is_empty()),
        None => {
            eprintln!(
                "Open {} in a browser, finish signing in, then paste the token here:",
                endpoints::login_url(store.backend().base_url(), provider)
            );
            read_token(io::stdin().lock())?
        }
    };
    let token = token.ok_or(CliError::MissingToken)?;

    let profile = store.validate(&token).await?;
    store.set_token(&token)?;
    println!("Logged in as {} ({})", profile.name, profile.provider);
    Ok(())
}

async fn run_whoami(store: &CliSession) -> Result<(), CliError> {
    match store.check().await {
        CheckOutcome::NoToken => {
            println!("Not logged in");
            Ok(())
        }
        CheckOutcome::Authenticated(profile) => {
            println!("{} ({})", profile.name, profile.provider);
            Ok(())
        }
        CheckOutcome::Rejected(err) => Err(err.into()),
    }
}

// =============================================================================
// LINK COMMANDS
// =============================================================================

async fn run_create(store: &CliSession, args: CreateArgs) -> Result<(), CliError> {
    let token = require_token(store)?;
    let request = args.into_request();
    let created = store.guard(store.backend().create(&token, &request).await)?;
    println!("{}", created.url);
    if !created.deletion_url.is_empty() {
        println!("delete: {}", created.deletion_url);
    }
    Ok(())
}

async fn run_lookup(store: &CliSession, link: &str) -> Result<(), CliError> {
    let token = require_token(store)?;
    let id = short_id(store, link).await;
    match store.guard(store.backend().lookup(&token, &id).await)? {
        Some(entry) => print_json(&entry),
        None => Err(CliError::NotFound(id)),
    }
}

async fn run_delete(store: &CliSession, link: &str) -> Result<(), CliError> {
    let token = require_token(store)?;
    let id = short_id(store, link).await;
    let recent = store.guard(store.backend().recent(&token).await)?;
    let deletion_url = recent
        .get(&id)
        .and_then(|entry| entry.deletion_url.clone())
        .filter(|url| !url.is_empty())
        .ok_or_else(|| CliError::NotFound(id.clone()))?;
    store.guard(store.backend().delete(&token, &deletion_url).await)?;
    println!("Deleted {id}");
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn require_token(store: &CliSession) -> Result<Token, CliError> {
    store.get_token().ok_or(CliError::NotLoggedIn)
}

async fn short_id(store: &CliSession, link: &str) -> String {
    let display = store.backend().display_url().await;
    endpoints::short_id_from_input(&display, link)
}

/// First non-blank line of `reader`, trimmed.
fn read_token(reader: impl BufRead) -> io::Result<Option<Token>> {
    for line in reader.lines() {
        let line = line?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            return Ok(Some(Token::new(trimmed)));
        }
    }
    Ok(None)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
