mod config;
mod view;

use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::{bail, Result};
use clap::Parser;
use client_core::{HttpAuthGateway, LoginController, LoginEvent, LoginStep, PageEntry};

use crate::view::{parse_selection, TerminalView};

#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    server_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }

    let gateway = Arc::new(HttpAuthGateway::new(&settings.server_url)?);
    let mut controller = LoginController::new(PageEntry::Direct, gateway, TerminalView::default());
    controller.start().await;

    while !controller.finished() {
        match controller.step() {
            LoginStep::System => {
                let password = prompt("System password: ")?;
                controller
                    .dispatch(LoginEvent::SystemSubmitted { password })
                    .await;
            }
            LoginStep::User => {
                let line = prompt("NCO number (or 'logout'): ")?;
                if line.eq_ignore_ascii_case("logout") {
                    controller.dispatch(LoginEvent::LogoutRequested).await;
                    continue;
                }
                let user_id = parse_selection(&line, controller.view().roster());
                let pin = prompt("PIN: ")?;
                controller
                    .dispatch(LoginEvent::UserSubmitted { user_id, pin })
                    .await;
            }
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        bail!("stdin closed before sign-in completed");
    }
    Ok(line.trim().to_string())
}
