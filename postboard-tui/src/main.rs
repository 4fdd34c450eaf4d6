//! postboard-tui - Terminal UI for Postboard
//!
//! Browse users, read their posts, and add or delete comments from the
//! terminal.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use libpostboard::gateway::mock::MockGateway;
use libpostboard::logging::{self, LogFormat, LogTarget, LoggingConfig};
use libpostboard::{Config, PostboardError, PostboardService, RacePolicy};
use ratatui::layout::Rect;

use postboard_tui::{
    app::{event::EventHandler, event::TuiEvent, map_key, map_mouse, reduce_ui, Focus, UiAction, UiState},
    services::{ServiceHandle, ServiceReply},
    terminal::{install_panic_hook, restore_terminal, set_mouse_capture, setup_terminal, Tui},
    ui::{self, form::FormEditor},
};

#[derive(Parser, Debug)]
#[command(name = "postboard-tui")]
#[command(version, about = "Browse users, posts and comments in the terminal")]
#[command(long_about = r#"Browse users, read their posts, and add or delete comments.

EXAMPLES:
    # Use the public demo backend
    postboard-tui

    # Point at another backend
    postboard-tui --api-url http://localhost:3000

    # Run against built-in sample data, no network
    postboard-tui --offline

    # Drop responses that arrive for a selection you already left
    postboard-tui --race-policy discard-stale

    # Write debug logs to a file (the terminal is taken by the UI)
    postboard-tui --log-file /tmp/postboard.log --log-level debug

CONFIGURATION:
    Read from --config, else $POSTBOARD_CONFIG, else
    ~/.config/postboard/config.toml. POSTBOARD_API_URL overrides the
    configured base URL; flags override both.

EXIT CODES:
    0 - Success
    1 - Error (terminal, network, etc.)
    2 - Configuration error
"#)]
struct Args {
    /// Path to the configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base URL of the REST backend
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// What to do with responses for a selection that is no longer current
    #[arg(long, value_name = "POLICY")]
    #[arg(help = "Race policy: last_response_wins (default) or discard_stale")]
    race_policy: Option<RacePolicy>,

    /// Use built-in sample data instead of the network
    #[arg(long)]
    offline: bool,

    /// Write logs to this file; without it logging is off
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log format
    #[arg(long, value_name = "FORMAT")]
    #[arg(help = "Log format: text (default), json, or pretty")]
    log_format: Option<LogFormat>,

    /// Minimum log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        let code = e
            .downcast_ref::<PostboardError>()
            .map_or(1, PostboardError::exit_code);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    // The UI owns the terminal, so logs only go to a file
    if let Some(path) = &args.log_file {
        let (env_format, env_level) = logging::env_defaults();
        LoggingConfig::new(
            args.log_format.unwrap_or(env_format),
            args.log_level.clone().unwrap_or(env_level),
            LogTarget::File(path.clone()),
        )
        .init()
        .with_context(|| format!("Failed to open log file {}", path.display()))?;
    }

    tracing::debug!("postboard-tui started with args: {:?}", args);

    let mut config =
        Config::load_from(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(url) = args.api_url {
        config.api.base_url = url;
    }
    if let Some(policy) = args.race_policy {
        config.behavior.race_policy = policy;
    }

    let service = if args.offline {
        tracing::info!("offline mode, using sample data");
        PostboardService::with_gateway(Arc::new(MockGateway::seeded()), config.behavior.race_policy)
    } else {
        PostboardService::from_config(&config).context("Failed to start the service layer")?
    };
    let services = ServiceHandle::new(service)?;
    let ui = UiState::with_config(&config.ui);

    // Install panic hook to restore terminal on panic
    install_panic_hook();

    let mut terminal = setup_terminal(ui.mouse_enabled)?;
    let result = run_app(&mut terminal, &services, ui);
    restore_terminal(terminal)?;

    result
}

fn run_app(terminal: &mut Tui, services: &ServiceHandle, mut ui: UiState) -> Result<()> {
    let mut editor = FormEditor::new();
    let event_handler = EventHandler::new(ui.config.tick_rate_ms);

    services.load_users();
    let mut redraw = true;

    loop {
        let app = services.state();
        ui = ui.fit_to(&app);

        if redraw {
            // Bring the text areas in line with the form before drawing
            editor.sync(&ui.form);
            editor.prepare(&ui.form, ui.form_field, ui.focus == Focus::Form);

            terminal.draw(|frame| ui::render(frame, &app, &ui, &editor))?;
            redraw = false;
        }

        let event = event_handler.next()?;
        if !matches!(event, TuiEvent::Tick) {
            redraw = true;
        }

        let action = match event {
            TuiEvent::Key(key) => match map_key(&ui, &app, key) {
                Some(action) => Some(action),
                None if accepts_text(&ui, &app) => {
                    let text = editor.input(ui.form_field, key);
                    Some(UiAction::FormInput(ui.form_field, text))
                }
                None => None,
            },
            TuiEvent::Mouse(mouse) => {
                let size = terminal.size()?;
                map_mouse(&ui, &app, mouse, Rect::new(0, 0, size.width, size.height))
            }
            other => Some(other.into()),
        };

        if let Some(action) = action {
            ui = apply(ui, action, services, terminal)?;
        }

        // Request events and submission results
        for reply in services.drain() {
            redraw = true;
            let action = match reply {
                ServiceReply::Event(event) => UiAction::Service(event),
                ServiceReply::Submitted { form, outcome } => {
                    UiAction::CommentSubmitted { form, outcome }
                }
                ServiceReply::StoreChanged => continue,
            };
            ui = reduce_ui(ui, action);
        }

        if ui.should_quit {
            break;
        }
    }

    Ok(())
}

/// Is an unbound key text for the comment form?
fn accepts_text(ui: &UiState, app: &libpostboard::AppState) -> bool {
    ui.focus == Focus::Form
        && ui.form_visible(app)
        && !ui.picker.is_open
        && !ui.help_visible
        && !ui.submitting
}

/// Reduce an action, then perform its side effect
fn apply(ui: UiState, action: UiAction, services: &ServiceHandle, terminal: &mut Tui) -> Result<UiState> {
    let mouse_before = ui.mouse_enabled;
    let ui = reduce_ui(ui, action.clone());

    match action {
        UiAction::ChooseUser(user_id) => services.select_user(user_id),
        UiAction::TogglePost(post_id) => services.toggle_post(post_id),
        UiAction::DeleteComment(comment_id) => services.delete_comment(comment_id),
        UiAction::SubmitComment => services.submit_comment(ui.form.clone()),
        _ => {}
    }

    if ui.mouse_enabled != mouse_before {
        set_mouse_capture(terminal, ui.mouse_enabled)?;
    }

    Ok(ui)
}
