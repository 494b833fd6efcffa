//! bqlite: translate analyzed BigQuery statements to SQLite SQL.
//!
//! # Usage
//!
//! ```bash
//! # Translate a statement tree
//! bqlite stmt.json
//!
//! # Read from stdin, inline user functions
//! cat stmt.json | bqlite - --functions udfs.json
//!
//! # List the builtins that get mangled
//! bqlite builtins --catalog window
//! ```

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use tracing_subscriber::EnvFilter;

use bqlite::functions::FunctionCatalog;
use bqlite::prelude::*;

#[derive(Parser)]
#[command(name = "bqlite")]
#[command(version)]
#[command(about = "Translate resolved BigQuery statements into SQLite SQL", long_about = None)]
#[command(after_help = "EXAMPLES:
    bqlite stmt.json
    bqlite - --functions udfs.json < stmt.json
    bqlite stmt.json --prefix emu --format json")]
struct Cli {
    /// JSON statement tree to translate (`-` for stdin)
    input: Option<String>,

    /// JSON object of user function bodies keyed by flattened name
    #[arg(long)]
    functions: Option<PathBuf>,

    /// Config file (defaults to the user config dir)
    #[arg(short, long, env = "BQLITE_CONFIG")]
    config: Option<PathBuf>,

    /// Override the emulation function prefix
    #[arg(long)]
    prefix: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "sql")]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Sql,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum CatalogArg {
    Scalar,
    Aggregate,
    Window,
}

impl From<CatalogArg> for FunctionCatalog {
    fn from(arg: CatalogArg) -> Self {
        match arg {
            CatalogArg::Scalar => FunctionCatalog::Scalar,
            CatalogArg::Aggregate => FunctionCatalog::Aggregate,
            CatalogArg::Window => FunctionCatalog::Window,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List builtin function names of a catalog
    Builtins {
        #[arg(long, value_enum, default_value = "scalar")]
        catalog: CatalogArg,
    },
    /// Print the effective configuration
    Config,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "bqlite=debug" } else { "bqlite=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;

    match &cli.command {
        Some(Commands::Builtins { catalog }) => {
            show_builtins((*catalog).into(), &config);
            Ok(())
        }
        Some(Commands::Config) => {
            println!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
        None => match &cli.input {
            Some(input) => transpile(input, cli, config),
            None => {
                println!("{}", "bqlite: BigQuery statements on SQLite".cyan().bold());
                println!();
                println!("Usage: bqlite <INPUT> [OPTIONS]");
                println!();
                println!("Try: bqlite --help");
                Ok(())
            }
        },
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<TranspilerConfig> {
    let mut config = match &cli.config {
        Some(path) => TranspilerConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => TranspilerConfig::load_default()?,
    };
    if let Some(prefix) = &cli.prefix {
        config.function_prefix = prefix.clone();
        config.validate()?;
    }
    Ok(config)
}

fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input))
}

fn transpile(input: &str, cli: &Cli, config: TranspilerConfig) -> anyhow::Result<()> {
    let stmt: ResolvedStatement =
        serde_json::from_str(&read_input(input)?).context("invalid statement tree")?;

    let mut functions = FunctionRegistry::new();
    if let Some(path) = &cli.functions {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        functions.load_from_json(&json)?;
    }

    if cli.verbose {
        eprintln!("{} {}", "Statement:".dimmed(), stmt.statement.kind().yellow());
        eprintln!("{} {}", "Name paths:".dimmed(), stmt.name_paths.len());
        eprintln!("{} {}", "Inline functions:".dimmed(), functions.len());
    }

    let sql = Transpiler::new()
        .with_config(config)
        .with_functions(functions)
        .transpile(&stmt)?;

    match cli.format {
        OutputFormat::Sql => println!("{}", sql),
        OutputFormat::Json => {
            let out = serde_json::json!({ "sql": sql });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}

fn show_builtins(catalog: FunctionCatalog, config: &TranspilerConfig) {
    println!(
        "{} {}",
        "Mangled as".dimmed(),
        format!("{}_<name>_<family>", catalog.stem(&config.function_prefix)).cyan()
    );
    println!();
    for name in catalog.names() {
        println!("  {}", name.white());
    }
    println!();
    println!("{} builtin(s)", catalog.names().len().to_string().cyan());
}
