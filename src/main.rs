//! Pitchside interactive shell.
//!
//! Drives the application shell against a live backend: login/logout,
//! navigation through the guarded route table, session inspection and
//! preferences. Useful for poking at a deployment without a browser.

use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use pitchside::app::App;
use pitchside::error::AppError;
use pitchside::router::{NavigationRequest, Outcome};

const HELP: &str = "commands:
  login <email> <password>   authenticate against /auth/login
  logout                     drop to anonymous, clear durable token
  me                         rehydrate session from /users/me
  session                    print the current session snapshot
  go <path>                  attempt a navigation through the guard
  routes                     list the route table
  prefs                      fetch preferences
  prefs set <json>           save preferences
  help                       this text
  quit | exit                leave";

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info")).unwrap();
    fmt().with_env_filter(filter).init();

    let app = App::from_env()?;
    info!(
        target: "pitchside",
        "Pitchside shell starting: api_base='{}', token_file='{}'",
        app.config.api_base,
        app.config.token_file.display()
    );

    // Rehydrate after a restart; an expired session is just Anonymous.
    match app.session.fetch_me().await {
        Ok(user) => println!("welcome back, user {} ({})", user.id, user.role),
        Err(AppError::SessionExpired { .. }) => {}
        Err(e) => eprintln!("could not reach {}: {}", app.config.api_base, e),
    }

    let mut current = "/".to_string();
    let mut rl = DefaultEditor::new()?;
    loop {
        let line = match rl.readline(&format!("pitchside {}> ", current)) {
            Ok(l) => l,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(line);
        let mut parts = line.split_whitespace();
        match parts.next().unwrap_or("") {
            "quit" | "exit" => break,
            "help" => println!("{}", HELP),
            "login" => {
                let (Some(email), Some(password)) = (parts.next(), parts.next()) else {
                    eprintln!("usage: login <email> <password>");
                    continue;
                };
                match app.session.login(email, password).await {
                    Ok(user) => println!("logged in as user {} ({})", user.id, user.role),
                    Err(e) => eprintln!("{}", e),
                }
            }
            "logout" => {
                app.session.logout().await;
                current = "/".to_string();
                println!("logged out");
            }
            "me" => match app.session.fetch_me().await {
                Ok(user) => println!("user {} role={} email={}", user.id, user.role, user.email.as_deref().unwrap_or("-")),
                Err(AppError::SessionExpired { .. }) => {
                    app.session.logout().await;
                    println!("no valid session; now anonymous");
                }
                Err(e) => eprintln!("{}", e),
            },
            "session" => println!("{:?}", app.session.snapshot()),
            "routes" => {
                for r in app.router.routes() {
                    let role = r.meta.role.unwrap_or("-");
                    println!(
                        "{:<14} {:?}  auth={} role={}",
                        r.path, r.view, r.meta.requires_auth, role
                    );
                }
            }
            "go" => {
                let Some(to) = parts.next() else {
                    eprintln!("usage: go <path>");
                    continue;
                };
                let req = NavigationRequest { to, from: &current };
                match app.router.navigate(&req, &app.session.snapshot()) {
                    Outcome::Proceed => {
                        if let Some(route) = app.router.find(to) {
                            println!("-> {} ({:?})", to, route.view);
                        }
                        current = to.to_string();
                    }
                    Outcome::Redirect(path) => {
                        println!("redirected to {}", path);
                        current = path;
                    }
                    Outcome::NotFound => println!("404: no route for {}", to),
                }
            }
            "prefs" => match parts.next() {
                None => match app.preferences.get().await {
                    Ok(v) => println!("{}", serde_json::to_string_pretty(&v).unwrap_or_default()),
                    Err(e) => eprintln!("{}", e),
                },
                Some("set") => {
                    let raw = line.splitn(3, ' ').nth(2).unwrap_or("");
                    match serde_json::from_str::<serde_json::Value>(raw) {
                        Ok(prefs) => match app.preferences.save(&prefs).await {
                            Ok(_) => println!("saved"),
                            Err(e) => eprintln!("{}", e),
                        },
                        Err(e) => eprintln!("invalid json: {}", e),
                    }
                }
                Some(other) => eprintln!("unknown prefs subcommand: {}", other),
            },
            other => eprintln!("unknown command: {} (try 'help')", other),
        }
    }
    Ok(())
}
