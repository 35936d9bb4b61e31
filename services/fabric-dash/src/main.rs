// services/fabric-dash/src/main.rs
//
// Fabric Demo Dashboard
// Terminal dashboard simulating a future Microsoft Fabric integration
//
// Run with: cargo run --bin fabric-dash -- --business-case Finance
//

use std::io::{self, stdout};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod state;
mod ui;
mod view;

use app::App;
use svckit::config::{self, DashboardConfig};
use svckit::services::Services;
use svckit::BusinessCase;

#[derive(Parser, Debug)]
#[command(name = "fabric-dash")]
#[command(about = "Demo dashboard showing how a custom UI could integrate with Microsoft Fabric")]
#[command(version = "0.1.0")]
struct Args {
    /// Configuration file (optional; defaults apply when missing)
    #[arg(short, long, default_value = "config/fabric-dash.yaml")]
    config: String,

    /// Initially selected business case (Sales, Procurement, Finance)
    #[arg(short, long)]
    business_case: Option<String>,

    /// Simulated pipeline latency in milliseconds
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Redraw interval in milliseconds
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Render a single frame to stdout and exit
    #[arg(long)]
    snapshot: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = config::load_config(&args.config)?;
    apply_overrides(&mut config, &args);

    let _log_guard = init_tracing(&config)?;

    let initial = match &args.business_case {
        Some(name) => name.parse::<BusinessCase>()?,
        None => BusinessCase::default(),
    };

    info!(
        "Fabric Demo Dashboard starting (mock mode, pipeline latency {}ms)",
        config.pipeline.simulated_latency_ms
    );

    let mut app = App::new(Services::mock(&config), initial, config.report.report_id.clone());

    if args.snapshot {
        let (width, height) = crossterm::terminal::size().unwrap_or((120, 40));
        println!("{}", ui::render_to_string(&app.view(), width, height.max(32))?);
        return Ok(());
    }

    // The UI loop blocks on terminal input; pipeline runs are spawned onto
    // this runtime's workers
    let runtime = build_runtime()?;
    let _runtime_guard = runtime.enter();

    // Setup terminal
    enable_raw_mode()?;
    let mut terminal_guard = TerminalGuard::new(restore_terminal);
    install_panic_hook();
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Run app
    let result = run_app(&mut terminal, &mut app, Duration::from_millis(config.ui.tick_ms));

    terminal_guard.restore()?;

    info!("Fabric Demo Dashboard stopped");
    result
}

fn build_runtime() -> io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .thread_name("fabric-dash-worker")
        .enable_all()
        .build()
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Restores the terminal before the panic message is printed, so it is not
/// lost on the alternate screen
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}

/// Runs the terminal restore at most once: explicitly on the normal exit
/// path, otherwise on drop (early `?` returns and unwinding)
struct TerminalGuard {
    restore: Option<fn() -> io::Result<()>>,
}

impl TerminalGuard {
    fn new(restore: fn() -> io::Result<()>) -> Self {
        Self {
            restore: Some(restore),
        }
    }

    fn restore(&mut self) -> io::Result<()> {
        match self.restore.take() {
            Some(restore) => restore(),
            None => Ok(()),
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

fn apply_overrides(config: &mut DashboardConfig, args: &Args) {
    if let Some(latency_ms) = args.latency_ms {
        config.pipeline.simulated_latency_ms = latency_ms;
    }
    if let Some(tick_ms) = args.tick_ms {
        config.ui.tick_ms = tick_ms;
    }
}

/// Logs go to a file: the terminal belongs to the dashboard
fn init_tracing(config: &DashboardConfig) -> Result<WorkerGuard> {
    let log_path = Path::new(&config.observability.log_file);
    let directory = log_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("invalid log file path: {}", log_path.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let level = &config.observability.log_level;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("fabric_dash={level},svckit={level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    Ok(guard)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, tick_rate: Duration) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        // One render pass per frame
        app.drain_events();
        let view = app.view();
        terminal.draw(|frame| ui::draw(frame, &view))?;

        // Handle input
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.handle_key(key.code) {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}
