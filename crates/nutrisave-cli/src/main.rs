mod config;
mod logging;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use nutrisave_core::{
    Error as CoreError, ReferenceCatalog, ValidationReport, catalog_json_schema,
    validate_catalog_json,
};
use nutrisave_generate::{
    CatalogExpectations, CatalogGenerator, GenerateOptions, GenerationError, check_catalog,
    resolve_per_store, write_catalog_json, write_json_pretty, write_pretty,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use config::{ConfigError, GeneratorConfig, load_config};
use logging::{LogOptions, init_logging};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("logging error: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{0}")]
    Validation(String),
}

#[derive(Parser, Debug)]
#[command(
    name = "nutrisave",
    version,
    about = "Generate a mock grocery catalog for NutriSave",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
    // Options for running `generate` without naming it.
    #[command(flatten)]
    generate: GenerateArgs,
    /// Log progress at info level.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,
    /// Emit log lines as JSON.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,
    /// Append JSON log lines to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the catalog file (default).
    Generate(GenerateArgs),
    /// Print the built-in reference items as JSON.
    Reference(OutArgs),
    /// Print the JSON Schema of the catalog file.
    Schema(OutArgs),
    /// Check an existing catalog file.
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Default)]
struct GenerateArgs {
    /// Output path for the catalog file [default: nutrisave_productos.json].
    #[arg(long, short, value_name = "PATH")]
    out: Option<PathBuf>,
    /// Products generated per store [default: 75].
    #[arg(long, value_name = "COUNT", allow_negative_numbers = true)]
    per_store: Option<i64>,
    /// Seed for the random source [default: random].
    #[arg(long)]
    seed: Option<u64>,
    /// Store name; repeat to replace the default store list.
    #[arg(long = "store", value_name = "NAME")]
    stores: Vec<String>,
    /// JSON file with base items to use instead of the built-in list.
    #[arg(long, value_name = "PATH")]
    reference: Option<PathBuf>,
    /// Write a JSON run report to this path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// TOML file with generation settings; flags take precedence.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct OutArgs {
    /// Write to this path instead of stdout.
    #[arg(long, short, value_name = "PATH")]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Catalog file to check.
    #[arg(value_name = "FILE")]
    file: PathBuf,
    /// JSON file with the base items the catalog was generated from.
    #[arg(long, value_name = "PATH")]
    reference: Option<PathBuf>,
    /// Expected products per store.
    #[arg(long, value_name = "COUNT")]
    per_store: Option<usize>,
    /// Expected store name; repeat for every store.
    #[arg(long = "store", value_name = "NAME")]
    stores: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_options = LogOptions {
        verbose: cli.verbose,
        json: cli.log_json,
        file: cli.log_file.as_deref(),
    };
    if let Err(err) = init_logging(&log_options).map_err(CliError::Logging) {
        eprintln!("error: {err}");
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Some(Command::Generate(args)) => run_generate(args),
        Some(Command::Reference(args)) => run_reference(args),
        Some(Command::Schema(args)) => run_schema(args),
        Some(Command::Validate(args)) => run_validate(args),
        None => run_generate(cli.generate),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let file_config = match &args.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };
    let config = file_config.merge(args.into_config());

    let output = config.output_or_default();
    let per_store = resolve_per_store(config.per_store_or_default())?;
    let stores = config.stores_or_default();
    let reference = load_reference(config.reference.as_deref())?;

    if stores.iter().any(|store| store.trim().is_empty()) {
        return Err(CliError::InvalidConfig(
            "store names must not be blank".to_string(),
        ));
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    tracing::info!(event = "seed_resolved", seed, explicit = config.seed.is_some());

    let options = GenerateOptions {
        stores,
        per_store,
        seed: Some(seed),
    };
    let mut result = CatalogGenerator::new(&reference).run(&options, &mut rng)?;

    let bytes_written = write_catalog_json(&output, &result.catalog)?;
    result.report.bytes_written = bytes_written;
    tracing::info!(
        event = "catalog_written",
        path = %output.display(),
        bytes_written
    );

    if let Some(report_path) = &config.report {
        write_json_pretty(report_path, &result.report)?;
        tracing::info!(event = "report_written", path = %report_path.display());
    }

    println!(
        "Generated {} with {} products per store.",
        output.display(),
        per_store
    );
    Ok(())
}

fn run_reference(args: OutArgs) -> Result<(), CliError> {
    let reference = ReferenceCatalog::builtin();
    emit_json(args.out.as_deref(), reference.items())
}

fn run_schema(args: OutArgs) -> Result<(), CliError> {
    emit_json(args.out.as_deref(), &catalog_json_schema())
}

fn run_validate(args: ValidateArgs) -> Result<(), CliError> {
    let contents = std::fs::read_to_string(&args.file).map_err(CoreError::from)?;
    let value: serde_json::Value = serde_json::from_str(&contents).map_err(CoreError::from)?;

    let mut report = validate_catalog_json(&value)?;
    if report.is_ok() {
        let catalog = serde_json::from_value(value).map_err(CoreError::from)?;
        let reference = load_reference(args.reference.as_deref())?;
        let expectations = CatalogExpectations {
            stores: if args.stores.is_empty() {
                None
            } else {
                Some(args.stores)
            },
            per_store: args.per_store,
        };
        report.merge(check_catalog(&catalog, &reference, &expectations));
    }

    print_report(&args.file, &report);

    if report.is_ok() {
        Ok(())
    } else {
        Err(CliError::Validation(format!(
            "{} failed validation with {} error(s)",
            args.file.display(),
            report.errors.len()
        )))
    }
}

fn load_reference(path: Option<&Path>) -> Result<ReferenceCatalog, CliError> {
    match path {
        Some(path) => {
            let reference = ReferenceCatalog::load_json(path)?;
            tracing::info!(
                event = "reference_loaded",
                path = %path.display(),
                items = reference.len()
            );
            Ok(reference)
        }
        None => Ok(ReferenceCatalog::builtin()),
    }
}

fn emit_json<T: serde::Serialize + ?Sized>(
    out: Option<&Path>,
    value: &T,
) -> Result<(), CliError> {
    match out {
        Some(path) => {
            write_json_pretty(path, value)?;
            tracing::info!(event = "json_written", path = %path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_pretty(&mut stdout, value)?;
            writeln!(stdout).map_err(GenerationError::from)?;
        }
    }
    Ok(())
}

fn print_report(file: &Path, report: &ValidationReport) {
    for issue in report.errors.iter().chain(report.warnings.iter()) {
        eprintln!(
            "{:?} [{}] {}: {}",
            issue.severity, issue.code, issue.path, issue.message
        );
    }
    if report.is_ok() {
        println!("{} is valid.", file.display());
    }
}

impl GenerateArgs {
    fn into_config(self) -> GeneratorConfig {
        GeneratorConfig {
            output: self.out,
            per_store: self.per_store,
            seed: self.seed,
            stores: if self.stores.is_empty() {
                None
            } else {
                Some(self.stores)
            },
            reference: self.reference,
            report: self.report,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_runs_default_generate() {
        let cli = Cli::try_parse_from(["nutrisave"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(cli.generate.out.is_none());
        assert!(cli.generate.stores.is_empty());
    }

    #[test]
    fn negative_per_store_parses_and_is_rejected() {
        let cli = Cli::try_parse_from(["nutrisave", "generate", "--per-store", "-1"])
            .expect("parse");
        let Some(Command::Generate(args)) = cli.command else {
            panic!("expected generate command");
        };
        assert_eq!(args.per_store, Some(-1));

        let result = run_generate(args);
        assert!(matches!(
            result,
            Err(CliError::Generation(GenerationError::InvalidInput(_)))
        ));
    }

    #[test]
    fn flags_become_config_overrides() {
        let cli = Cli::try_parse_from([
            "nutrisave",
            "--store",
            "Soriana",
            "--store",
            "Walmart",
            "--per-store",
            "3",
            "--seed",
            "7",
        ])
        .expect("parse");

        let config = cli.generate.into_config();
        assert_eq!(
            config.stores,
            Some(vec!["Soriana".to_string(), "Walmart".to_string()])
        );
        assert_eq!(config.per_store, Some(3));
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn generate_writes_catalog_and_report() {
        let dir = temp_out_dir("generate");
        let out = dir.join("catalog.json");
        let report = dir.join("report.json");

        let args = GenerateArgs {
            out: Some(out.clone()),
            per_store: Some(3),
            seed: Some(42),
            stores: vec!["Soriana".to_string(), "Walmart".to_string()],
            report: Some(report.clone()),
            ..GenerateArgs::default()
        };
        run_generate(args).expect("generate");

        let catalog: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).expect("read catalog"))
                .expect("parse catalog");
        let object = catalog.as_object().expect("object");
        assert_eq!(object.len(), 2);
        assert!(
            object
                .values()
                .all(|products| products.as_array().map(Vec::len) == Some(3))
        );

        let report: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report).expect("read report"))
                .expect("parse report");
        assert_eq!(report.get("seed").and_then(|v| v.as_u64()), Some(42));
        assert_eq!(
            report.get("products_total").and_then(|v| v.as_u64()),
            Some(6)
        );

        let validate = ValidateArgs {
            file: out,
            reference: None,
            per_store: Some(3),
            stores: vec!["Soriana".to_string(), "Walmart".to_string()],
        };
        run_validate(validate).expect("generated catalog validates");
    }

    #[test]
    fn config_file_supplies_defaults() {
        let dir = temp_out_dir("config");
        let out = dir.join("from_config.json");
        let config_path = dir.join("nutrisave.toml");
        std::fs::write(
            &config_path,
            format!(
                "output = {:?}\nper_store = 2\nseed = 1\nstores = [\"HEB\"]\n",
                out.display().to_string()
            ),
        )
        .expect("write config");

        let args = GenerateArgs {
            config: Some(config_path),
            per_store: Some(4),
            ..GenerateArgs::default()
        };
        run_generate(args).expect("generate");

        let catalog = nutrisave_generate::read_catalog_json(&out).expect("read catalog");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("HEB").map(<[_]>::len), Some(4));
    }

    #[test]
    fn validate_rejects_wrong_store_count() {
        let dir = temp_out_dir("validate");
        let out = dir.join("catalog.json");
        let args = GenerateArgs {
            out: Some(out.clone()),
            per_store: Some(1),
            seed: Some(3),
            stores: vec!["Costco".to_string()],
            ..GenerateArgs::default()
        };
        run_generate(args).expect("generate");

        let validate = ValidateArgs {
            file: out,
            reference: None,
            per_store: Some(2),
            stores: Vec::new(),
        };
        assert!(matches!(
            run_validate(validate),
            Err(CliError::Validation(_))
        ));
    }

    fn temp_out_dir(label: &str) -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("nutrisave_cli_{label}_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp out dir");
        dir
    }
}
