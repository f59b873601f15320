use std::fs::File;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::info;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod controller;
mod domain;
mod filter;
mod format;
mod loader;
mod model;
mod pagination;
mod projection;
mod record;
mod sort;
mod state;
mod ui;

use controller::Controller;
use domain::{DEFAULT_PAGE_SIZE, DEFAULT_SOURCE, ETConfig, ETError};
use loader::{DataSource, spawn_load};
use model::{Model, Status};
use sort::SortKey;
use ui::TableUI;

/// Sortable, filterable and paginated employee table.
#[derive(Parser, Debug)]
#[command(name = "emptable", version, about)]
struct Args {
    /// Record source: an http(s) endpoint returning a JSON array, or a path to a JSON file.
    #[arg(value_name = "SOURCE", default_value = DEFAULT_SOURCE)]
    source: String,

    /// Rows per page.
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,

    /// Sort once the records arrived: id, fullName, age or any other record field.
    #[arg(short, long, value_name = "KEY")]
    sort: Option<SortKey>,

    /// Log file; the terminal belongs to the table. Level is taken from RUST_LOG.
    #[arg(long, default_value = "emptable.log")]
    log_file: String,

    /// Event poll interval in milliseconds.
    #[arg(long, default_value_t = 100)]
    poll_ms: u64,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
    }
}

fn init_logging(path: &str) -> Result<(), ETError> {
    let file = File::create(shellexpand::tilde(path).into_owned())?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(ErrorLayer::default())
        .init();
    Ok(())
}

fn run(args: Args) -> Result<(), ETError> {
    init_logging(&args.log_file)?;

    let source: DataSource = args.source.parse()?;
    let mut cfg = ETConfig::default()
        .with_source(source)
        .with_page_size(args.page_size)
        .with_event_poll_time(args.poll_ms);
    if let Some(key) = args.sort {
        cfg = cfg.with_initial_sort(key);
    }
    let cfg = cfg.validate()?;
    info!("Starting emptable: {:?}", cfg);

    // The single background load runs here; everything else stays on this thread.
    let runtime = tokio::runtime::Runtime::new()?;
    let pending = spawn_load(&runtime, cfg.source.clone());

    let mut model = Model::init(&cfg);
    let mut ui = TableUI::new();
    let mut controller = Controller::new(&cfg, pending);

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut model, &mut ui, &mut controller);
    ratatui::restore();

    info!(
        "Quitting with {} records loaded",
        model.state().records.len()
    );
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    model: &mut Model,
    ui: &mut TableUI,
    controller: &mut Controller,
) -> Result<(), ETError> {
    while model.status != Status::QUITTING {
        // Render the current view
        terminal.draw(|f| ui.draw(model, f))?;

        // Handle events and map to a Message
        if let Some(message) = controller.handle_event()? {
            model.update(message);
        };
    }
    Ok(())
}
