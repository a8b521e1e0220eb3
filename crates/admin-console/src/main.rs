//! Admin console - entry point.

use admin_console::{client::RegistrationApiClient, display, session::AdminSession};
use anyhow::Result;
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn prompt(label: &str) -> io::Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_rows(session: &AdminSession) {
    if let Some(err) = session.error() {
        println!("Error: {}", err);
    }

    if session.rows().is_empty() {
        println!("No registrations found");
        return;
    }

    for (index, row) in session.rows().iter().enumerate() {
        println!("#{}", index + 1);
        for (label, value) in display::render_record(&row.fields) {
            println!("  {}: {}", label, value);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url = std::env::var("REGISTRATION_API_URL")
        .unwrap_or_else(|_| "http://localhost:8080".to_string());

    let client = RegistrationApiClient::new(base_url)?;
    let mut session = AdminSession::new(client);

    let password = prompt("Admin password: ")?;
    if !session.login(&password).await {
        println!("{}", session.error().unwrap_or("Login failed"));
        return Ok(());
    }

    print_rows(&session);
    println!("Commands: refresh, delete <n>, quit");

    loop {
        let line = prompt("> ")?;
        let mut parts = line.split_whitespace();

        match parts.next() {
            None => continue,
            Some("refresh") | Some("r") => {
                session.refresh().await;
                print_rows(&session);
            }
            Some("delete") | Some("d") => {
                let Some(index) = parts.next().and_then(|n| n.parse::<usize>().ok()) else {
                    println!("Usage: delete <n>");
                    continue;
                };
                let Some(row) = session.rows().get(index.saturating_sub(1)) else {
                    println!("No registration #{}", index);
                    continue;
                };

                let id = row.id.clone();
                let name = row
                    .fields
                    .get("firstName")
                    .and_then(|v| v.as_str())
                    .unwrap_or("this registration")
                    .to_string();

                let answer = prompt(&format!("Delete registration for {}? [y/N] ", name))?;
                if !answer.eq_ignore_ascii_case("y") {
                    println!("Cancelled.");
                    continue;
                }

                if session.delete(&id).await {
                    println!("Deleted.");
                } else if let Some(err) = session.error() {
                    println!("Error: {}", err);
                }
                print_rows(&session);
            }
            Some("quit") | Some("q") => break,
            Some(other) => {
                println!("Unknown command: {}", other);
                println!("Commands: refresh, delete <n>, quit");
            }
        }
    }

    Ok(())
}
