//! Command-line interface for xsdgen

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use xsdgen::loaders::collect_schema_files;
#[cfg(feature = "cli")]
use xsdgen::{JsonEmitter, Language, ParserConfig, Session, Strictness};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsdgen")]
#[command(author, version, about = "Parse XSD schemas into prototype trees for code generation", long_about = None)]
struct Cli {
    /// Schema file, or directory of schema files
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = "xgen_out")]
    output: PathBuf,

    /// Target language for builtin type mapping: Go, TypeScript, C, Java, Rust
    #[arg(short, long, default_value = "Go", value_parser = parse_language)]
    lang: Language,

    /// Package / module name handed to the emitter
    #[arg(short, long, default_value = "schema")]
    package: String,

    /// Fail on type references that cannot be resolved
    #[arg(long)]
    strict: bool,

    /// Print each prototype tree as JSON to stdout
    #[arg(long)]
    dump: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[cfg(feature = "cli")]
fn parse_language(s: &str) -> Result<Language, String> {
    s.parse()
}

#[cfg(feature = "cli")]
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn input_root(input: &Path) -> PathBuf {
    if input.is_dir() {
        input.to_path_buf()
    } else {
        input.parent().map(Path::to_path_buf).unwrap_or_default()
    }
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> Result<(), String> {
    let files = collect_schema_files(&cli.input).map_err(|e| e.to_string())?;

    let strictness = if cli.strict {
        Strictness::Strict
    } else {
        Strictness::Lenient
    };
    let config = ParserConfig::new()
        .with_lang(cli.lang)
        .with_strictness(strictness)
        .with_package(cli.package.clone())
        .with_input_dir(input_root(&cli.input))
        .with_output_dir(cli.output.clone());
    let mut session = Session::new(config).with_emitter(JsonEmitter::new());

    for file in &files {
        let tree = session
            .parse_file(file)
            .map_err(|e| format!("{}: {}", file.display(), e))?;
        if cli.dump {
            let json = serde_json::to_string_pretty(&tree).map_err(|e| e.to_string())?;
            println!("{}", json);
        }
    }

    tracing::info!(files = files.len(), output = %cli.output.display(), "done");
    Ok(())
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
