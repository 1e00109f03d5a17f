use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cmyk3::error::{ConfigError, ReduceError};
use cmyk3::models::{AppConfig, Document};
use cmyk3::services::{BatchReport, ColorReducer};
use cmyk_search::{Cmyk, ColorSpaceConverter, SearchStep};

/// Environment variable naming the config file when `--config` is absent
const CONFIG_ENV: &str = "CMYK3_CONFIG";

#[derive(Parser)]
#[command(name = "cmyk3")]
#[command(about = "Reduce CMYK colors to two chromatic inks plus black")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reduce every CMYK fill and stroke in a document's selection
    Reduce {
        /// Document JSON file
        document: PathBuf,

        /// Write the result here instead of back to DOCUMENT
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Grid step in percent (overrides the config)
        #[arg(short, long)]
        step: Option<f64>,

        /// Config file (defaults to $CMYK3_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Find the best three-channel match for a single color
    Match {
        /// Color as C,M,Y,K percentages (e.g. "40,40,40,0")
        #[arg(value_parser = parse_cmyk)]
        color: Cmyk,

        /// Grid step in percent (overrides the config)
        #[arg(short, long)]
        step: Option<f64>,

        /// Config file (defaults to $CMYK3_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the Lab value of a color under the configured ink model
    Lab {
        /// Color as C,M,Y,K percentages
        #[arg(value_parser = parse_cmyk)]
        color: Cmyk,

        /// Config file (defaults to $CMYK3_CONFIG)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the default config.yaml
    Init {
        /// Where to write the config
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Reduce {
            document,
            output,
            step,
            config,
        }) => run_reduce_command(&document, output.as_deref(), step, config),
        Some(Commands::Match {
            color,
            step,
            config,
        }) => run_match_command(color, step, config),
        Some(Commands::Lab { color, config }) => run_lab_command(color, config),
        Some(Commands::Init { output, force }) => run_init_command(&output, force),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cmyk3=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Resolve the config for a command.
///
/// A file named with `--config` must load; a broken one is an error.
/// A file from $CMYK3_CONFIG falls back to the defaults with a warning.
fn load_config(flag: Option<&Path>, env: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match flag {
        Some(path) => AppConfig::load(path),
        None => Ok(AppConfig::load_or_default(env)),
    }
}

fn config_from_cli(flag: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let env = std::env::var(CONFIG_ENV).ok().map(PathBuf::from);
    Ok(load_config(flag.as_deref(), env.as_deref())?)
}

fn resolve_step(flag: Option<f64>, config: &AppConfig) -> anyhow::Result<SearchStep> {
    match flag {
        Some(value) => Ok(SearchStep::new(value)?),
        None => Ok(config.search_step()?),
    }
}

/// Parse "C,M,Y,K" into a color.
fn parse_cmyk(s: &str) -> Result<Cmyk, String> {
    let values = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| format!("invalid channel value '{}': {e}", part.trim()))
        })
        .collect::<Result<Vec<f64>, String>>()?;

    let channels: [f64; 4] = values
        .try_into()
        .map_err(|v: Vec<f64>| format!("expected 4 comma-separated values, got {}", v.len()))?;
    Ok(Cmyk::from(channels))
}

/// Reduce a document's selection and write it back
fn run_reduce_command(
    document_path: &Path,
    output: Option<&Path>,
    step: Option<f64>,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    init_logging();

    let config = config_from_cli(config)?;
    let step = resolve_step(step, &config)?;
    let reducer = ColorReducer::new(config.ink_model()?, step);

    let mut document = Document::load(document_path)?;
    let result = reducer.reduce_selection(document.as_mut());
    let outcome = finish_reduce(result, document.as_ref(), output.unwrap_or(document_path))?;

    for line in &outcome.stdout {
        println!("{line}");
    }
    for line in &outcome.stderr {
        eprintln!("{line}");
    }
    if outcome.exit_code != 0 {
        std::process::exit(outcome.exit_code);
    }
    Ok(())
}

/// What a reduce run prints and how it exits
#[derive(Debug)]
struct ReduceOutcome {
    stdout: Vec<String>,
    stderr: Vec<String>,
    exit_code: i32,
}

/// Save the document where the batch changed it and build the user
/// messages. The document is written after a partial failure too.
fn finish_reduce(
    result: Result<BatchReport, ReduceError>,
    document: Option<&Document>,
    output: &Path,
) -> anyhow::Result<ReduceOutcome> {
    match result {
        Ok(report) => {
            if let Some(document) = document {
                document.save(output)?;
            }
            let mut stdout: Vec<String> = report
                .changes
                .iter()
                .map(|change| {
                    format!(
                        "  {} {}: {} -> {} (ΔE {:.2})",
                        change.location,
                        change.slot,
                        change.before,
                        change.after,
                        change.difference
                    )
                })
                .collect();
            stdout.push(format!(
                "Conversion complete (STEP={}). CMYK values are rounded to integers.",
                report.step
            ));
            if report.skipped > 0 {
                stdout.push(format!("Skipped {} unsupported objects.", report.skipped));
            }
            Ok(ReduceOutcome {
                stdout,
                stderr: Vec::new(),
                exit_code: 0,
            })
        }
        Err(e) => {
            let mut stderr = Vec::new();
            if let (ReduceError::Conversion { completed, .. }, Some(document)) = (&e, document) {
                document.save(output)?;
                stderr.push(format!(
                    "{} colors converted before the failure were kept.",
                    completed.converted()
                ));
            }
            stderr.push(format!("Error: {e}"));
            stderr.push(format!("at: {}", e.location().unwrap_or("N/A")));
            Ok(ReduceOutcome {
                stdout: Vec::new(),
                stderr,
                exit_code: 1,
            })
        }
    }
}

/// Reduce a single color and print the match
fn run_match_command(color: Cmyk, step: Option<f64>, config: Option<PathBuf>) -> anyhow::Result<()> {
    init_logging();

    let config = config_from_cli(config)?;
    let step = resolve_step(step, &config)?;
    let reducer = ColorReducer::new(config.ink_model()?, step);

    let best = reducer.reduce_color(color)?;
    println!("{color} -> {} (ΔE {:.2}, STEP={step})", best.cmyk, best.difference);
    Ok(())
}

/// Print the Lab value of a color
fn run_lab_command(color: Cmyk, config: Option<PathBuf>) -> anyhow::Result<()> {
    init_logging();

    let config = config_from_cli(config)?;
    let lab = config.ink_model()?.cmyk_to_lab(color)?;
    println!("{color} -> L {:.2} a {:.2} b {:.2}", lab.l, lab.a, lab.b);
    Ok(())
}

/// Write the default config file
fn run_init_command(output: &Path, force: bool) -> anyhow::Result<()> {
    if output.exists() && !force {
        println!(
            "Skipped {} (already exists, use --force to overwrite)",
            output.display()
        );
        return Ok(());
    }

    std::fs::write(output, AppConfig::default_yaml())?;
    println!("Wrote default config:");
    println!("  + {}", output.display());
    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var(CONFIG_ENV).ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    // Header
    println!("cmyk3 v{VERSION}");
    println!("Reduce CMYK colors to two chromatic inks plus black\n");

    println!("Environment Variables:");
    println!(
        "  {CONFIG_ENV} = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG     = {}",
        rust_log.as_deref().unwrap_or("cmyk3=warn (default)")
    );

    // Config source
    let config_source = match config_file {
        Some(ref path) if Path::new(path).exists() => path.to_string(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfiguration:");
    println!("  Source:  {config_source}");

    let config = match config_file {
        Some(ref path) => AppConfig::load(Path::new(path)).unwrap_or_default(),
        None => AppConfig::default(),
    };
    match config.search_step() {
        Ok(step) => {
            let candidates = cmyk_search::search::candidate_count(step);
            println!("  Step:    {step} ({candidates} conversions per color)");
            if !step.reaches_full_coverage() {
                println!("           step does not divide 100, 100% coverage is never tried");
            }
        }
        Err(e) => println!("  Step:    {} (invalid: {e})", config.step),
    }

    println!("\nCommands:");
    println!("  cmyk3 reduce   Reduce the selection of a document file");
    println!("  cmyk3 match    Find the three-channel match for one color");
    println!("  cmyk3 lab      Print the Lab value of a color");
    println!("  cmyk3 init     Write the default config.yaml");
    println!("\nRun 'cmyk3 --help' for more details.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmyk3::models::ColorSlot;
    use cmyk3::services::ColorChange;
    use cmyk_search::ConversionError;

    #[test]
    fn test_parse_cmyk() {
        assert_eq!(
            parse_cmyk("30,60,0,20"),
            Ok(Cmyk::new(30.0, 60.0, 0.0, 20.0))
        );
        assert_eq!(
            parse_cmyk(" 12.5, 0 ,100,7 "),
            Ok(Cmyk::new(12.5, 0.0, 100.0, 7.0))
        );
    }

    #[test]
    fn test_parse_cmyk_wrong_count() {
        assert_eq!(
            parse_cmyk("1,2,3"),
            Err("expected 4 comma-separated values, got 3".to_string())
        );
    }

    #[test]
    fn test_parse_cmyk_not_a_number() {
        assert!(parse_cmyk("1,2,x,4").unwrap_err().contains("'x'"));
    }

    #[test]
    fn test_cli_parses_reduce() {
        let cli = Cli::try_parse_from(["cmyk3", "reduce", "doc.json", "--step", "10"]).unwrap();
        match cli.command {
            Some(Commands::Reduce { document, step, .. }) => {
                assert_eq!(document, PathBuf::from("doc.json"));
                assert_eq!(step, Some(10.0));
            }
            _ => panic!("Expected reduce command"),
        }
    }

    #[test]
    fn test_resolve_step_prefers_flag() {
        let config = AppConfig::default();
        assert_eq!(resolve_step(Some(25.0), &config).unwrap().get(), 25.0);
        assert_eq!(resolve_step(None, &config).unwrap(), SearchStep::DEFAULT);
        assert!(resolve_step(Some(0.0), &config).is_err());
    }

    fn report(step: f64) -> BatchReport {
        BatchReport {
            step: SearchStep::new(step).unwrap(),
            changes: vec![ColorChange {
                location: "selection[0]".to_string(),
                slot: ColorSlot::Fill,
                before: Cmyk::new(40.0, 40.0, 40.0, 0.0),
                after: Cmyk::new(0.0, 10.0, 10.0, 40.0),
                difference: 1.234,
            }],
            skipped: 2,
        }
    }

    #[test]
    fn test_finish_reduce_success_saves_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let document = Document::default();

        let outcome = finish_reduce(Ok(report(10.0)), Some(&document), &output).unwrap();

        assert_eq!(outcome.exit_code, 0);
        assert_eq!(
            outcome.stdout,
            vec![
                "  selection[0] fill: C40 M40 Y40 K0 -> C0 M10 Y10 K40 (ΔE 1.23)".to_string(),
                "Conversion complete (STEP=10). CMYK values are rounded to integers.".to_string(),
                "Skipped 2 unsupported objects.".to_string(),
            ]
        );
        assert!(outcome.stderr.is_empty());
        assert!(output.exists());
    }

    #[test]
    fn test_finish_reduce_partial_failure_keeps_document() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let document = Document::default();
        let error = ReduceError::Conversion {
            location: "selection[1]".to_string(),
            slot: ColorSlot::Stroke,
            completed: report(10.0),
            source: ConversionError::Unavailable("no working profile".to_string()),
        };

        let outcome = finish_reduce(Err(error), Some(&document), &output).unwrap();

        assert_eq!(outcome.exit_code, 1);
        assert!(outcome.stdout.is_empty());
        assert_eq!(
            outcome.stderr[0],
            "1 colors converted before the failure were kept."
        );
        assert!(outcome.stderr[1].starts_with("Error: Failed to convert stroke color"));
        assert_eq!(outcome.stderr[2], "at: selection[1]");
        assert!(output.exists(), "partial results must be written");
    }

    #[test]
    fn test_finish_reduce_no_document() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");

        let outcome = finish_reduce(Err(ReduceError::NoDocument), None, &output).unwrap();

        assert_eq!(outcome.exit_code, 1);
        assert_eq!(
            outcome.stderr,
            vec!["Error: No document is open".to_string(), "at: N/A".to_string()]
        );
        assert!(!output.exists());
    }

    #[test]
    fn test_finish_reduce_empty_selection_does_not_save() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.json");
        let document = Document::default();

        let outcome =
            finish_reduce(Err(ReduceError::EmptySelection), Some(&document), &output).unwrap();

        assert_eq!(outcome.exit_code, 1);
        assert_eq!(outcome.stderr[1], "at: N/A");
        assert!(!output.exists());
    }

    #[test]
    fn test_explicit_config_must_load() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            load_config(Some(&missing), None),
            Err(ConfigError::Io { .. })
        ));

        let broken = dir.path().join("broken.yaml");
        std::fs::write(&broken, "step: [not a number\n").unwrap();
        assert!(matches!(
            load_config(Some(&broken), None),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_explicit_config_wins_over_env() {
        let dir = tempfile::tempdir().unwrap();
        let flag = dir.path().join("flag.yaml");
        std::fs::write(&flag, "step: 25\n").unwrap();
        let env = dir.path().join("missing.yaml");

        let config = load_config(Some(&flag), Some(&env)).unwrap();
        assert_eq!(config.step, 25.0);
    }

    #[test]
    fn test_env_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yaml");

        let config = load_config(None, Some(&missing)).unwrap();
        assert_eq!(config.search_step().unwrap(), SearchStep::DEFAULT);

        let config = load_config(None, None).unwrap();
        assert_eq!(config.search_step().unwrap(), SearchStep::DEFAULT);
    }
}
