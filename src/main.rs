//! deepmerge CLI
//!
//! Entry point for the `deepmerge` command-line tool.

mod demo;

use clap::{Parser, Subcommand};
use deepmerge::{deep_assign, merge_all, AssignOptions, MergeOptions, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "deepmerge")]
#[command(about = "Deep merge and deep assign for JSON/TOML documents", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign a sample record into a fresh target with every option on and
    /// print the resulting descriptors
    Demo,

    /// Merge documents left to right into a new document (arrays concatenate)
    Merge {
        /// Drop duplicate elements from concatenated arrays
        #[arg(long)]
        unique_arrays: bool,

        /// JSON or TOML documents, lowest precedence first
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Assign source documents into a target document
    Assign {
        /// Comma-separated options: nonEnum, symbols, descriptors, proto
        #[arg(long, short = 'o', conflicts_with = "options_file")]
        options: Option<AssignOptions>,

        /// Options document (TOML, or JSON with a .json extension)
        #[arg(long)]
        options_file: Option<PathBuf>,

        /// Target document
        target: PathBuf,

        /// Source documents, applied in order
        #[arg(required = true)]
        sources: Vec<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Demo => demo::run().map_err(|e| e.to_string()),
        Commands::Merge {
            unique_arrays,
            files,
        } => run_merge(&files, unique_arrays),
        Commands::Assign {
            options,
            options_file,
            target,
            sources,
        } => run_assign(options, options_file, &target, &sources),
    };

    match result {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run_merge(files: &[PathBuf], unique_arrays: bool) -> Result<String, String> {
    let documents = files
        .iter()
        .map(|path| load_document(path))
        .collect::<Result<Vec<_>, _>>()?;
    let options = MergeOptions::default().with_unique_arrays(unique_arrays);
    let merged = merge_all(&documents, options).map_err(|e| e.to_string())?;
    to_pretty_json(&Value::Object(merged))
}

fn run_assign(
    options: Option<AssignOptions>,
    options_file: Option<PathBuf>,
    target: &Path,
    sources: &[PathBuf],
) -> Result<String, String> {
    let options = match options_file {
        Some(path) => AssignOptions::from_file(&path).map_err(|e| e.to_string())?,
        None => options.unwrap_or_default(),
    };
    let target = load_document(target)?;
    let sources = sources
        .iter()
        .map(|path| load_document(path))
        .collect::<Result<Vec<_>, _>>()?;
    let assigned = deep_assign(options)
        .assign(&target, &sources)
        .map_err(|e| e.to_string())?;
    to_pretty_json(&assigned)
}

fn to_pretty_json(value: &Value) -> Result<String, String> {
    let json = value.to_json().map_err(|e| e.to_string())?;
    serde_json::to_string_pretty(&json)
        .map(|s| s + "\n")
        .map_err(|e| format!("Error serializing output: {}", e))
}

/// Load a document; `.toml` files are read as TOML, anything else as JSON.
fn load_document(path: &Path) -> Result<Value, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let is_toml = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));
    let json = if is_toml {
        let toml_value: toml::Value = toml::from_str(&contents)
            .map_err(|e| format!("TOML parse error in {}: {}", path.display(), e))?;
        toml_to_json(toml_value)
    } else {
        serde_json::from_str(&contents)
            .map_err(|e| format!("JSON parse error in {}: {}", path.display(), e))?
    };
    Ok(Value::from(json))
}

/// Convert TOML Value to JSON Value
fn toml_to_json(toml: toml::Value) -> serde_json::Value {
    match toml {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}
