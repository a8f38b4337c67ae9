//! Alumni registration page in the terminal.
//!
//! tab / shift+tab move between controls, the mouse works too, ctrl+c quits.
//! Logs go to `<cache_dir>/alumni-portal/alumni-portal.log`; set `RUST_LOG`
//! to change what is recorded.

mod config;

use alumni_portal::{RegistrationForm, Theme};
use anyhow::{Context, Result};
use bubbletea_rs::{Cmd, Model, MouseMotion, Msg, Program};
use config::{Config, LoggingConfig};
use once_cell::sync::OnceCell;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

// Model::init takes no arguments, so the loaded palette is parked here.
static THEME: OnceCell<Theme> = OnceCell::new();

struct App {
    form: RegistrationForm,
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let theme = THEME.get().cloned().unwrap_or_default();
        let form = RegistrationForm::new().with_theme(theme);
        (Self { form }, None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.form.update(&msg)
    }

    fn view(&self) -> String {
        self.form.view()
    }
}

fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    if !config.enabled {
        return Ok(None);
    }

    // RUST_LOG wins over the config file
    let default_filter = format!(
        "alumni_portal={level},registration_demo={level}",
        level = config.level
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    std::fs::create_dir_all(&config.dir)
        .with_context(|| format!("creating log directory {}", config.dir.display()))?;
    let appender = tracing_appender::rolling::never(&config.dir, "alumni-portal.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    Ok(Some(guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load().context("loading configuration")?;
    // Must stay alive until exit so buffered lines are flushed.
    let _log_guard = init_logging(&config.logging)?;

    let _ = THEME.set(config.theme.apply(Theme::default()));
    tracing::info!(config = ?Config::path(), "starting registration page");

    let program = Program::<App>::builder()
        .alt_screen(true)
        .mouse_motion(MouseMotion::Cell)
        .signal_handler(true)
        .build()
        .context("building the terminal program")?;

    program.run().await.context("running the terminal program")?;
    tracing::info!("registration page closed");
    Ok(())
}
