mod storage;
mod transport;


use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use session::guard::{self, GuardDecision, Viewer};
use session::token::{self, TokenClaims};
use session::{ApiClient, ApiConfig, ApiError, Credentials, ExpiryPolicy, Location, Session, SessionStore};
use tracing_subscriber::EnvFilter;

use crate::storage::FileStorage;
use crate::transport::ReqwestTransport;

type CliStore = SessionStore<ReqwestTransport, FileStorage>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not signed in; run `chat-cli login` first")]
    NotSignedIn,
    #[error("missing password; pass --password, set CHAT_PASSWORD or pipe it on stdin")]
    MissingPassword,
    #[error("cannot locate a token file; pass --token-file or set CHAT_TOKEN_FILE")]
    NoTokenFile,
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("http client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("io failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "chat-cli", about = "Chat API session CLI")]
struct Cli {
    #[arg(long, env = "CHAT_BASE_URL", default_value = "http://127.0.0.1:8000/api/v1")]
    base_url: String,

    /// JSON file holding the persisted bearer token.
    #[arg(long, env = "CHAT_TOKEN_FILE")]
    token_file: Option<PathBuf>,

    /// Treat any stored token as valid, skipping the `exp` check.
    #[arg(long)]
    ignore_expiry: bool,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Exchange credentials for a token and print the profile.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "CHAT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored token.
    Logout,
    /// Fetch the profile for the stored token.
    Whoami,
    /// Show the stored token's claims without contacting the server.
    Status,
    /// Show where the navigation guard would send the current session.
    Route { path: String },
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "CHAT_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    ResetPassword {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "CHAT_PASSWORD", hide_env_values = true)]
        new_password: Option<String>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let token_file = match cli.token_file {
        Some(path) => path,
        None => default_token_file().ok_or(CliError::NoTokenFile)?,
    };
    let policy = if cli.ignore_expiry { ExpiryPolicy::Ignore } else { ExpiryPolicy::Enforce };
    let config = ApiConfig::new(&cli.base_url).with_expiry(policy);
    let mut store = build_store(config, FileStorage::new(token_file))?;

    match cli.command {
        Command::Login { username, password } => {
            let password = resolve_password(password)?;
            let user = store.login(&Credentials::new(username, password)).await?;
            print_json(&serde_json::to_value(user)?)
        }
        Command::Logout => {
            store.logout();
            println!("signed out");
            Ok(())
        }
        Command::Whoami => run_whoami(&mut store).await,
        Command::Status => print_json(&status_report(store.session(), now_secs(), policy)),
        Command::Route { path } => {
            let viewer = Viewer {
                authenticated: store.is_authenticated(now_secs()),
                is_admin: store.session().is_admin(),
            };
            println!("{}", route_outcome(&path, viewer));
            Ok(())
        }
        Command::Register { username, email, password } => {
            let password = resolve_password(password)?;
            let resp = store.register(&username, &email, &password).await?;
            println!("{}", if resp.message.is_empty() { "registered" } else { &resp.message });
            Ok(())
        }
        Command::ResetPassword { username, email, new_password } => {
            let new_password = resolve_password(new_password)?;
            let resp = store.reset_password(&username, &email, &new_password).await?;
            println!("{}", if resp.message.is_empty() { "password reset" } else { &resp.message });
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn build_store(config: ApiConfig, storage: FileStorage) -> Result<CliStore, CliError> {
    let http = reqwest::Client::builder().build()?;
    let api = ApiClient::new(config, ReqwestTransport::new(http), storage)
        .on_unauthorized(|| eprintln!("session expired; run `chat-cli login` again"));
    Ok(SessionStore::new(api))
}

async fn run_whoami(store: &mut CliStore) -> Result<(), CliError> {
    if !store.session().has_token() {
        return Err(CliError::NotSignedIn);
    }
    let user = store.fetch_profile().await?;
    print_json(&serde_json::to_value(user)?)
}

fn resolve_password(flag: Option<String>) -> Result<String, CliError> {
    if let Some(password) = flag.filter(|p| !p.is_empty()) {
        return Ok(password);
    }
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_owned();
    if password.is_empty() {
        return Err(CliError::MissingPassword);
    }
    Ok(password)
}

fn default_token_file() -> Option<PathBuf> {
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    Some(PathBuf::from(home).join(".chat-cli").join("token.json"))
}

#[allow(clippy::cast_precision_loss)]
fn status_report(session: &Session, now: i64, policy: ExpiryPolicy) -> Value {
    let Some(raw) = session.token.as_deref().filter(|t| !t.is_empty()) else {
        return json!({ "signed_in": false, "authenticated": false });
    };
    let claims = token::decode_claims(raw).ok();
    let (sub, exp) = claims.map_or((None, None), |TokenClaims { sub, exp }| (sub, exp));
    json!({
        "signed_in": true,
        "authenticated": session.is_authenticated(now, policy),
        "subject": sub,
        "expires_at": exp,
        "expires_in": exp.map(|e| e - now as f64),
    })
}

fn route_outcome(path: &str, viewer: Viewer) -> String {
    match guard::evaluate(&Location::parse(path), None, viewer) {
        GuardDecision::Proceed(def) => format!("proceed {}", def.path),
        GuardDecision::Redirect(to) => format!("redirect {to}"),
    }
}

fn now_secs() -> i64 {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    i64::try_from(secs).unwrap_or(0)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
