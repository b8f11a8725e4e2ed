mod api;
mod app;
mod config;
#[macro_use]
mod logging;
mod route;
mod session;
mod terminal;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use std::time::Duration;

use app::{Action, App};
use route::ViewContext;
use terminal::Tui;

/// Scribble - a keyboard-driven terminal client for the Scribble network
#[derive(Parser)]
#[command(name = "scribble")]
#[command(about = "Browse, post, like, and follow scribbles from the terminal")]
#[command(version)]
struct Cli {
    /// Page route to open: "/", "/profile/<id>", or "/following"
    #[arg(default_value = "/")]
    route: String,

    /// Server URL to connect to
    #[arg(long, short, env = "SCRIBBLE_SERVER_URL")]
    server: Option<String>,

    /// The logged-in user's id, used for the edit control on owned posts.
    /// Overrides the id stored with the credentials.
    #[arg(long, env = "SCRIBBLE_VIEWER_ID")]
    viewer: Option<i64>,

    /// Enable verbose logging
    #[arg(long, short)]
    verbose: bool,
}

// Load environment variables from .env file
// This allows SCRIBBLE_SERVER_URL and other config to be set without
// command-line args
fn load_env() {
    let _ = dotenv::dotenv();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    load_env();

    let log_config = if cli.verbose {
        logging::LogConfig::verbose()
    } else {
        logging::LogConfig::default()
    };
    logging::init_logging(&log_config)?;

    let Some(ctx) = ViewContext::parse(&cli.route) else {
        anyhow::bail!(
            "Unrecognized route '{}'. Known routes: /, /profile/<id>, /following",
            cli.route
        );
    };

    let config_manager = config::ConfigManager::new()?;
    let server_url = config_manager.determine_server_url(cli.server)?;
    log::info!("Using server {}", server_url);

    let mut api_client = api::ApiClient::new(server_url);

    // Credentials are optional: an anonymous viewer can still read the feed.
    let store = session::CredentialStore::new()?;
    let creds = match store.load() {
        Ok(creds) => creds,
        Err(e) => {
            log::warn!("Could not load credentials: {}", e);
            None
        }
    };
    let viewer = cli.viewer.or(creds.as_ref().and_then(|c| c.viewer_id));
    if let Some(creds) = &creds {
        api_client.set_credentials(
            Some(creds.csrf_token.clone()),
            Some(creds.session_cookie.clone()),
        );
    }

    let mut app = App::new(ctx, api_client, viewer);
    app.log_config = log_config;

    let mut tui = terminal::init()?;
    let result = run(&mut tui, &mut app).await;
    terminal::restore()?;
    result
}

/// Main event loop: draw, poll one key, run whatever it asked for.
async fn run(tui: &mut Tui, app: &mut App) -> Result<()> {
    // The page index always starts at 1 on launch; there is no restoration.
    app.load_feed(1).await?;

    while app.running {
        tui.draw(|frame| ui::render(app, frame))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = app.handle_key_event(key)? {
                    dispatch(app, action).await?;
                }
            }
        }
    }
    Ok(())
}

async fn dispatch(app: &mut App, action: Action) -> Result<()> {
    log_debug!(app.log_config, "dispatching {:?}", action);
    match action {
        Action::LoadPage(page) => app.load_feed(page).await,
        Action::ToggleLike => app.toggle_like_selected().await,
        Action::ToggleFollow => app.toggle_follow().await,
        Action::SubmitComposer => app.submit_composer().await,
    }
}
