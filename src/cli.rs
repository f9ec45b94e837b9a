//! Command-line parsing for the `gridview` binary.

use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::config::DashboardConfig;
use crate::error::{DashError, DashResult};

/// Parsed command-line options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub config: Option<PathBuf>,
    pub preset: Option<String>,
    pub seed: Option<u64>,
    /// Refresh interval override in seconds.
    pub interval_secs: Option<u64>,
    pub headless: bool,
    /// Refresh intervals to simulate in headless mode.
    pub ticks: u64,
    /// Emit JSON lines instead of the text log in headless mode.
    pub json: bool,
    pub telemetry_out: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub help: bool,
}

/// Refresh intervals simulated when `--ticks` is not given.
pub const DEFAULT_TICKS: u64 = 20;

/// Largest accepted `--ticks` (about 35 days at the shortest interval).
pub const MAX_TICKS: u64 = 100_000;

pub fn parse_args() -> Result<CliOptions, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_args_from(args)
}

/// Parses arguments (without the program name).
pub fn parse_args_from(args: Vec<String>) -> Result<CliOptions, String> {
    let mut i = 0usize;
    let mut opts = CliOptions {
        ticks: DEFAULT_TICKS,
        ..CliOptions::default()
    };
    let mut ticks_given = false;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --config (expected a TOML file path)")?;
                if opts.config.replace(PathBuf::from(path)).is_some() {
                    return Err("--config provided more than once".to_string());
                }
            }
            "--preset" => {
                i += 1;
                let name =
                    args.next_or_err(i, "missing value for --preset (expected a preset name)")?;
                if opts.preset.replace(name.to_string()).is_some() {
                    return Err("--preset provided more than once".to_string());
                }
            }
            "--seed" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --seed (expected a u64)")?;
                let seed = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--seed value \"{raw}\" is not a valid u64"))?;
                opts.seed = Some(seed);
            }
            "--interval" => {
                i += 1;
                let raw =
                    args.next_or_err(i, "missing value for --interval (expected seconds)")?;
                let secs = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--interval value \"{raw}\" is not a whole number"))?;
                opts.interval_secs = Some(secs);
            }
            "--ticks" => {
                i += 1;
                let raw = args.next_or_err(i, "missing value for --ticks (expected a count)")?;
                opts.ticks = raw
                    .parse::<u64>()
                    .map_err(|_| format!("--ticks value \"{raw}\" is not a valid count"))?;
                if opts.ticks > MAX_TICKS {
                    return Err(format!("--ticks value {} exceeds the limit of {MAX_TICKS}", opts.ticks));
                }
                ticks_given = true;
            }
            "--telemetry-out" => {
                i += 1;
                let path = args.next_or_err(
                    i,
                    "missing value for --telemetry-out (expected a file path)",
                )?;
                if opts.telemetry_out.replace(PathBuf::from(path)).is_some() {
                    return Err("--telemetry-out provided more than once".to_string());
                }
            }
            "--log-file" => {
                i += 1;
                let path =
                    args.next_or_err(i, "missing value for --log-file (expected a file path)")?;
                opts.log_file = Some(PathBuf::from(path));
            }
            "--headless" => opts.headless = true,
            "--json" => opts.json = true,
            "--help" | "-h" => opts.help = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if opts.config.is_some() && opts.preset.is_some() {
        return Err(
            "arguments `--config` and `--preset` are mutually exclusive; choose one source"
                .to_string(),
        );
    }

    if !opts.headless {
        let headless_only = [
            (ticks_given, "--ticks"),
            (opts.json, "--json"),
            (opts.telemetry_out.is_some(), "--telemetry-out"),
        ];
        if let Some((_, flag)) = headless_only.iter().find(|(set, _)| *set) {
            return Err(format!("{flag} requires --headless"));
        }
    }

    Ok(opts)
}

/// Loads the config named by `opts`, applies overrides, and validates it.
///
/// `--config` wins over `--preset`; with neither the baseline preset is
/// used.
///
/// # Errors
///
/// Returns [`DashError::Config`] when the source cannot be loaded and
/// [`DashError::Invalid`] listing every violated constraint.
pub fn resolve_config(opts: &CliOptions) -> DashResult<DashboardConfig> {
    let mut config = if let Some(path) = &opts.config {
        DashboardConfig::from_toml_file(path)?
    } else if let Some(name) = &opts.preset {
        DashboardConfig::from_preset(name)?
    } else {
        DashboardConfig::baseline()
    };

    if let Some(seed) = opts.seed {
        config.seed = seed;
    }
    if let Some(secs) = opts.interval_secs {
        config.refresh.interval_ms = secs.saturating_mul(1000);
    }

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(DashError::Invalid(errors));
    }
    let source = match (&opts.config, &opts.preset) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(name)) => name.clone(),
        (None, None) => "baseline".to_string(),
    };
    info!(
        %source,
        seed = config.seed,
        "config loaded"
    );
    Ok(config)
}

trait SliceArgExt {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String>;
}

impl SliceArgExt for [String] {
    fn next_or_err(&self, index: usize, err: &str) -> Result<&str, String> {
        self.get(index)
            .map(String::as_str)
            .ok_or_else(|| err.to_string())
    }
}

pub fn print_usage() {
    eprintln!("gridview - synthetic power grid dashboard");
    eprintln!();
    eprintln!("Usage: gridview [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>          Load settings from a TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (baseline, storm, rush_hour)");
    eprintln!("  --seed <u64>             Override the random seed");
    eprintln!("  --interval <secs>        Refresh interval, 30-60 in steps of 5");
    eprintln!("  --headless               Print snapshots instead of opening the dashboard");
    eprintln!("  --ticks <n>              Refresh intervals to simulate headless (default {DEFAULT_TICKS})");
    eprintln!("  --json                   Headless output as JSON lines");
    eprintln!("  --telemetry-out <path>   Write headless snapshots to CSV");
    eprintln!("  --log-file <path>        Append logs to a file");
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If neither --config nor --preset is given, the baseline preset is used.");
    eprintln!("Log verbosity follows RUST_LOG.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_to_interactive() {
        let opts = parse_args_from(Vec::new()).expect("parse should succeed");
        assert!(!opts.headless);
        assert_eq!(opts.ticks, DEFAULT_TICKS);
        assert!(opts.config.is_none() && opts.preset.is_none());
    }

    #[test]
    fn supports_config_path() {
        let opts = parse_args_from(args(&["--config", "grid.toml"])).expect("parse should succeed");
        assert_eq!(
            opts.config.as_deref().and_then(|p| p.to_str()),
            Some("grid.toml")
        );
        assert!(opts.preset.is_none());
    }

    #[test]
    fn config_and_preset_are_exclusive() {
        let err = parse_args_from(args(&["--config", "a.toml", "--preset", "storm"]));
        assert!(err.is_err_and(|e| e.contains("mutually exclusive")));
    }

    #[test]
    fn parses_headless_run() {
        let opts = parse_args_from(args(&[
            "--headless",
            "--preset",
            "storm",
            "--seed",
            "7",
            "--ticks",
            "5",
            "--interval",
            "45",
            "--json",
            "--telemetry-out",
            "out.csv",
        ]))
        .expect("parse should succeed");
        assert!(opts.headless && opts.json);
        assert_eq!(opts.preset.as_deref(), Some("storm"));
        assert_eq!(opts.seed, Some(7));
        assert_eq!(opts.ticks, 5);
        assert_eq!(opts.interval_secs, Some(45));
        assert!(opts.telemetry_out.is_some());
    }

    #[test]
    fn headless_flags_need_headless() {
        let err = parse_args_from(args(&["--ticks", "3"]));
        assert_eq!(err, Err("--ticks requires --headless".to_string()));
        let err = parse_args_from(args(&["--json"]));
        assert!(err.is_err());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(parse_args_from(args(&["--seed", "abc"])).is_err());
        assert!(parse_args_from(args(&["--seed"])).is_err());
        assert!(parse_args_from(args(&["--bogus"])).is_err());
    }

    #[test]
    fn rejects_ticks_above_limit() {
        let ok = parse_args_from(args(&["--headless", "--ticks", &MAX_TICKS.to_string()]));
        assert_eq!(ok.map(|o| o.ticks), Ok(MAX_TICKS));
        let err = parse_args_from(args(&["--headless", "--ticks", &u64::MAX.to_string()]));
        assert!(err.is_err_and(|e| e.contains("exceeds the limit")));
    }

    #[test]
    fn resolve_applies_overrides() {
        let opts = parse_args_from(args(&["--preset", "storm", "--seed", "9", "--interval", "45"]))
            .expect("parse should succeed");
        let cfg = resolve_config(&opts).expect("config should resolve");
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.refresh.interval_ms, 45_000);
    }

    #[test]
    fn resolve_rejects_off_grid_interval() {
        let opts = parse_args_from(args(&["--interval", "42"])).expect("parse should succeed");
        let err = resolve_config(&opts);
        assert!(matches!(err, Err(DashError::Invalid(ref v)) if v.len() == 1));
    }

    #[test]
    fn resolve_reports_unknown_preset() {
        let opts = parse_args_from(args(&["--preset", "nope"])).expect("parse should succeed");
        assert!(matches!(resolve_config(&opts), Err(DashError::Config(_))));
    }

    #[test]
    fn help_flag_is_reported() {
        let opts = parse_args_from(args(&["-h"])).expect("parse should succeed");
        assert!(opts.help);
    }
}
