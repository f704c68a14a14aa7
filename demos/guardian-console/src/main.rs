use std::path::PathBuf;

use civica::prelude::*;

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

const USAGE: &str = "usage: guardian-console [status | login <user> <password> | logout | visit <path> | cluster <id> | moon]";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Status,
    Login(Credentials),
    Logout,
    Visit(String),
    Cluster(ClusterId),
    Moon,
}

fn parse_command(args: &[String]) -> Result<Command, String> {
    let words: Vec<&str> = args.iter().map(String::as_str).collect();
    match words.as_slice() {
        [] | ["status"] => Ok(Command::Status),
        ["login", user, password] => Ok(Command::Login(Credentials::new(*user, *password))),
        ["logout"] => Ok(Command::Logout),
        ["visit", path] => Ok(Command::Visit(path.to_string())),
        ["cluster", id] => id
            .parse()
            .map(|id| Command::Cluster(ClusterId(id)))
            .map_err(|_| format!("cluster id must be 0-255, got {id:?}")),
        ["moon"] => Ok(Command::Moon),
        _ => Err(USAGE.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Execution
// ---------------------------------------------------------------------------

/// Runs one command against the portal and returns the line to print.
async fn execute<S: Storage, A: Authenticator>(
    portal: &mut Portal<S, A>,
    command: Command,
) -> String {
    match command {
        Command::Status => describe(portal.sessions()),
        Command::Login(credentials) => match portal.login(&credentials).await {
            Ok(session) => format!(
                "logged in as {} ({}) until {}",
                session.user, session.access_level, session.expires_at
            ),
            Err(e) => format!("login failed: {e}"),
        },
        Command::Logout => {
            portal.logout();
            "logged out".to_string()
        }
        Command::Visit(path) => match portal.visit(&path) {
            Some(route) if Route::from_path(&path) == Some(route) => format!("showing {route}"),
            Some(route) => format!("{path} redirects to {route}"),
            None => format!("{path}: not found"),
        },
        Command::Cluster(id) => match portal.select_cluster(id) {
            Some(route) => format!("cluster {id} opens {route}"),
            None => format!("cluster {id} is not on the compass"),
        },
        Command::Moon => format!("{} moon", portal.lunar_phase()),
    }
}

fn describe<S: Storage, A: Authenticator>(sessions: &SessionManager<S, A>) -> String {
    match sessions.session() {
        Some(session) => format!(
            "{}: {} ({}) until {}",
            sessions.state(),
            session.user,
            session.access_level,
            session.expires_at
        ),
        None => sessions.state().to_string(),
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    civica::telemetry::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_command(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(2);
        }
    };

    let storage_dir = std::env::var_os("CIVICA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(civica::DEFAULT_STORAGE_DIR));
    tracing::debug!(storage_dir = %storage_dir.display(), "opening portal");

    let mut portal = PortalBuilder::new().storage_dir(storage_dir).build()?;
    println!("{}", execute(&mut portal, command).await);
    Ok(())
}
