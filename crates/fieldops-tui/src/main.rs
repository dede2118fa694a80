mod app;
mod entity;
mod event;
mod logging;
mod theme;
mod ui;
mod viewmodel;

use anyhow::Context;
use app::App;
use clap::Parser;
use fieldops_client::{ApiClient, ImageUploader, Session, Settings};
use fieldops_core::User;
use ratatui::DefaultTerminal;

#[derive(Parser)]
#[command(name = "fieldops")]
#[command(about = "Admin console for the FieldOps service backend")]
struct Cli {
    /// Bearer token for the API session
    #[arg(long, env = "FIELDOPS_TOKEN")]
    token: String,

    /// Id of the signed-in user
    #[arg(long, env = "FIELDOPS_USER_ID")]
    user_id: String,

    /// Configuration file overriding the default config/fieldops.* lookup
    #[arg(long, env = "FIELDOPS_CONFIG")]
    config: Option<String>,

    /// Open this list at startup instead of the menu
    #[arg(long, value_enum)]
    open: Option<entity::EntityKind>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    color_eyre::install().ok();
    let cli = Cli::parse();
    let _guard = logging::init_logger()?;

    let settings =
        Settings::load_from(cli.config.as_deref()).context("loading configuration")?;
    let api = ApiClient::new(&settings)?;
    let uploader = if settings.images.upload_url.trim().is_empty() {
        None
    } else {
        Some(ImageUploader::new(settings.images.clone())?)
    };

    // Identity comes from the backend: fetch the signed-in user once and
    // derive capabilities from the stored role, never from local input.
    let bootstrap = Session::new(cli.token.clone(), User::default());
    let user = api
        .get_user(&bootstrap, &cli.user_id)
        .await
        .context("fetching signed-in user")?;
    if !user.is_approved() {
        anyhow::bail!("account {} is not approved", cli.user_id);
    }
    let session = Session::new(cli.token, user);
    tracing::info!(
        user = %session.user().name,
        role = session.role().label(),
        "session ready"
    );

    let mut app = App::new(api, uploader, session);
    if let Some(kind) = cli.open {
        app.open_list(kind);
    }

    let terminal = ratatui::init();
    let result = run_app(terminal, app).await;
    ratatui::restore();
    result
}

async fn run_app(mut terminal: DefaultTerminal, mut app: App) -> anyhow::Result<()> {
    loop {
        app.process_events();
        terminal.draw(|frame| ui::render(frame, &app))?;

        if app.should_quit {
            break;
        }

        // Poll events (non-blocking with 100ms timeout)
        if let Some(key) = event::poll_key(100)? {
            event::handle_key(&mut app, key);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_accepts_config_override_and_startup_list() {
        let cli = Cli::parse_from([
            "fieldops",
            "--token",
            "t",
            "--user-id",
            "u-1",
            "--config",
            "/etc/fieldops.toml",
            "--open",
            "maintenances",
        ]);
        assert_eq!(cli.config.as_deref(), Some("/etc/fieldops.toml"));
        assert_eq!(cli.open, Some(entity::EntityKind::Maintenances));
    }

    #[test]
    fn cli_defaults_leave_config_and_open_unset() {
        let cli = Cli::parse_from(["fieldops", "--token", "t", "--user-id", "u-1"]);
        assert!(cli.config.is_none());
        assert!(cli.open.is_none());
    }
}
