use super::*;

#[test]
fn login_parses_flags_and_defaults() {
    let cli = Cli::try_parse_from(["splito", "login", "--email", "a@b.com", "--password", "pw"]).unwrap();
    assert_eq!(cli.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
    assert_eq!(cli.timeout_secs, 10);
    match cli.command {
        Command::Login(args) => {
            assert_eq!(args.email, "a@b.com");
            assert_eq!(args.password, "pw");
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn register_confirm_password_defaults_to_password() {
    let args = RegisterArgs {
        username: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        password: "pw".to_owned(),
        confirm_password: None,
        agree_terms: true,
    };
    let form = args.into_form();
    assert_eq!(form.confirm_password, "pw");
    assert!(form.validate().is_ok());
}

#[test]
fn register_without_terms_fails_validation() {
    let cli = Cli::try_parse_from([
        "splito",
        "register",
        "--username",
        "alice",
        "--email",
        "alice@example.com",
        "--password",
        "pw",
    ])
    .unwrap();
    let Command::Register(args) = cli.command else {
        panic!("expected register");
    };
    assert_eq!(args.into_form().validate().unwrap_err(), session::ValidationError::TermsNotAccepted);
}

#[test]
fn profile_args_overlay_only_given_fields() {
    let base = ProfileUpdate {
        username: "alice".to_owned(),
        email: "alice@example.com".to_owned(),
        bio: "hi".to_owned(),
        ..ProfileUpdate::default()
    };
    let args = ProfileArgs { location: Some("Lagos".to_owned()), ..ProfileArgs::default() };
    let update = args.apply(base);
    assert_eq!(update.username, "alice");
    assert_eq!(update.bio, "hi");
    assert_eq!(update.location, "Lagos");
}

#[test]
fn session_errors_display_user_message() {
    let err = CliError::from(SessionError::Transport(TransportError::Timeout));
    assert_eq!(err.to_string(), session::error::TIMEOUT_MESSAGE);
}

#[test]
fn failures_print_the_inline_message() {
    let err = CliError::from(SessionError::Authentication { status: 401, message: "Invalid email or password".to_owned() });
    assert_eq!(error_line(&err), "error: Invalid email or password");
    assert_eq!(error_line(&CliError::NotLoggedIn), "error: not logged in");
}

#[test]
fn zero_timeout_is_rejected() {
    let parsed = Cli::try_parse_from(["splito", "--timeout-secs", "0", "status"]);
    assert!(parsed.is_err());
    let cli = Cli::try_parse_from(["splito", "--timeout-secs", "3", "status"]).unwrap();
    assert_eq!(cli.timeout_secs, 3);
}
