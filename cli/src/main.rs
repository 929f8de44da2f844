mod file_store;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use session::http::HttpAuthApi;
use session::{
    CredentialRequest, LoginForm, ProfileUpdate, Session, SessionController, SessionError, SignupForm, TransportError,
};
use tracing_subscriber::EnvFilter;

use crate::file_store::{DEFAULT_SESSION_FILE, FileStore};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}", .0.user_message())]
    Session(#[from] SessionError),
    #[error("could not build HTTP client: {0}")]
    Client(#[from] TransportError),
    #[error("not logged in")]
    NotLoggedIn,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "splito", about = "Splito session command line client")]
struct Cli {
    #[arg(long, env = "SPLITO_API_URL", default_value = session::api::DEFAULT_API_BASE_URL)]
    api_url: String,

    #[arg(long, env = "SPLITO_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    session_file: PathBuf,

    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in and store the session.
    Login(LoginArgs),
    /// Create an account and store the session.
    Register(RegisterArgs),
    /// Remove the stored session.
    Logout,
    /// Print the stored user, if any.
    Status,
    /// Ask the AuthAPI whether the stored token is still valid.
    Validate,
    /// Edit the stored user's profile.
    Profile(ProfileArgs),
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    #[arg(long, env = "SPLITO_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    username: String,
    #[arg(long)]
    email: String,
    #[arg(long, env = "SPLITO_PASSWORD", hide_env_values = true)]
    password: String,
    /// Defaults to `--password`.
    #[arg(long)]
    confirm_password: Option<String>,
    #[arg(long, default_value_t = false)]
    agree_terms: bool,
}

#[derive(Args, Debug, Default)]
struct ProfileArgs {
    #[arg(long)]
    username: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    bio: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    location: Option<String>,
}

impl RegisterArgs {
    fn into_form(self) -> SignupForm {
        SignupForm {
            confirm_password: self.confirm_password.unwrap_or_else(|| self.password.clone()),
            username: self.username,
            email: self.email,
            password: self.password,
            agree_terms: self.agree_terms,
        }
    }
}

impl ProfileArgs {
    /// Overlay the given flags on the current profile.
    fn apply(self, mut update: ProfileUpdate) -> ProfileUpdate {
        if let Some(username) = self.username {
            update.username = username;
        }
        if let Some(email) = self.email {
            update.email = email;
        }
        if let Some(bio) = self.bio {
            update.bio = bio;
        }
        if let Some(phone) = self.phone {
            update.phone = phone;
        }
        if let Some(location) = self.location {
            update.location = location;
        }
        update
    }
}

type CliController = SessionController<FileStore, HttpAuthApi>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", error_line(&err));
            ExitCode::FAILURE
        }
    }
}

/// What the user sees on stderr when a command fails.
fn error_line(err: &CliError) -> String {
    format!("error: {err}")
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let api = HttpAuthApi::new(cli.api_url, Duration::from_secs(cli.timeout_secs))?;
    let controller = SessionController::new(FileStore::new(cli.session_file), api);

    match cli.command {
        Command::Login(args) => {
            let request = CredentialRequest::Login(LoginForm { email: args.email, password: args.password });
            let session = controller.submit(request).await?;
            print_signed_in(&session);
            Ok(())
        }
        Command::Register(args) => {
            let session = controller.submit(CredentialRequest::Register(args.into_form())).await?;
            print_signed_in(&session);
            Ok(())
        }
        Command::Logout => {
            controller.clear();
            eprintln!("logged out");
            Ok(())
        }
        Command::Status => run_status(&controller),
        Command::Validate => run_validate(&controller).await,
        Command::Profile(args) => run_profile(&controller, args).await,
    }
}

fn print_signed_in(session: &Session) {
    eprintln!("signed in as {} <{}>", session.user.username, session.user.email);
}

fn run_status(controller: &CliController) -> Result<(), CliError> {
    let session = controller.load().ok_or(CliError::NotLoggedIn)?;
    println!("{}", serde_json::to_string_pretty(&session.user)?);
    Ok(())
}

async fn run_validate(controller: &CliController) -> Result<(), CliError> {
    if controller.load().is_none() {
        return Err(CliError::NotLoggedIn);
    }
    if controller.validate().await? {
        println!("valid");
        Ok(())
    } else {
        println!("expired");
        Err(CliError::NotLoggedIn)
    }
}

async fn run_profile(controller: &CliController, args: ProfileArgs) -> Result<(), CliError> {
    let session = controller.load().ok_or(CliError::NotLoggedIn)?;
    let update = args.apply(ProfileUpdate::from_user(&session.user));
    let updated = controller.update_profile(&update).await?;
    println!("{}", serde_json::to_string_pretty(&updated.user)?);
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;
