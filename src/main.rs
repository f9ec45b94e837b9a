//! gridview entry point: CLI wiring, logging setup, and mode dispatch.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::process;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::Level;
use tracing_subscriber::EnvFilter;

use gridview::cli::{self, CliOptions};
use gridview::config::DashboardConfig;
use gridview::error::{DashError, DashResult};
use gridview::io::export::{export_csv, write_json_lines};
use gridview::runner::run_headless_from;

fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env().add_directive(Level::INFO.into())
}

/// Routes logs away from the terminal UI: to `--log-file` when given,
/// otherwise to stderr in headless mode and nowhere in TUI mode.
fn init_logging(opts: &CliOptions) -> io::Result<()> {
    if let Some(path) = &opts.log_file {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else if opts.headless {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(io::stderr)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(io::sink)
            .init();
    }
    Ok(())
}

fn epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

fn run_headless_mode(config: &DashboardConfig, opts: &CliOptions) -> DashResult<()> {
    let run = run_headless_from(config, opts.ticks, epoch_ms());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if opts.json {
        write_json_lines(&run.snapshots, &mut out)?;
    } else {
        for s in &run.snapshots {
            writeln!(out, "{s}")?;
        }
        writeln!(out, "\n{}", run.summary)?;
        writeln!(out, "\n{}", run.fleet)?;
    }

    if let Some(path) = &opts.telemetry_out {
        export_csv(&run.snapshots, path)?;
        eprintln!("Snapshots written to {}", path.display());
    }
    Ok(())
}

#[cfg(feature = "tui")]
fn run_interactive(config: DashboardConfig) -> DashResult<()> {
    gridview::tui::run(config, epoch_ms())?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_config: DashboardConfig) -> DashResult<()> {
    eprintln!("error: built without the `tui` feature; use --headless");
    process::exit(1);
}

fn report(err: &DashError) {
    match err {
        DashError::Invalid(errors) => {
            for e in errors {
                eprintln!("{e}");
            }
        }
        other => eprintln!("error: {other}"),
    }
}

fn main() {
    let opts = match cli::parse_args() {
        Ok(opts) => opts,
        Err(msg) => {
            eprintln!("error: {msg}");
            cli::print_usage();
            process::exit(1);
        }
    };
    if opts.help {
        cli::print_usage();
        return;
    }

    if let Err(e) = init_logging(&opts) {
        let path = opts.log_file.as_deref().unwrap_or(Path::new(""));
        eprintln!("error: cannot open log file \"{}\": {e}", path.display());
        process::exit(1);
    }

    let result = cli::resolve_config(&opts).and_then(|config| {
        if opts.headless {
            run_headless_mode(&config, &opts)
        } else {
            run_interactive(config)
        }
    });

    if let Err(e) = result {
        report(&e);
        process::exit(1);
    }
}
