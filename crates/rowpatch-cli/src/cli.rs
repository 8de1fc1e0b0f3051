use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rowpatch_types::ReconciliationPolicy;

#[derive(Parser)]
#[command(
    name = "rowpatch",
    about = "Field-level JSON diffs and SQL patch statements",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with `[diff]` and `[query]` defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the fields a new document changes
    Diff(DiffArgs),
    /// Print the UPDATE statement applying a new document's scalar changes
    Query(QueryArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    /// Original document (`-` reads stdin)
    pub original: PathBuf,
    /// New document (`-` reads stdin)
    pub new: PathBuf,
    /// Array policy: merge, replace or union. The last one given wins.
    #[arg(short, long = "policy")]
    pub policies: Vec<ReconciliationPolicy>,
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(Args)]
pub struct QueryArgs {
    /// Original document (`-` reads stdin)
    pub original: PathBuf,
    /// New document (`-` reads stdin)
    pub new: PathBuf,
    #[arg(short, long)]
    pub table: Option<String>,
    /// `id`, `Id`, `ID`, or a clause appended after SET
    #[arg(short, long)]
    pub condition: Option<String>,
    /// Rename a field's column, as `field=column`
    #[arg(short, long = "map", value_parser = parse_mapping)]
    pub mappings: Vec<(String, String)>,
}

fn parse_mapping(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((field, column)) if !field.is_empty() && !column.is_empty() => {
            Ok((field.to_string(), column.to_string()))
        }
        _ => Err(format!("expected field=column, got '{s}'")),
    }
}
