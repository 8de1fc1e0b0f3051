use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use rowpatch_diff::diff_json;
use rowpatch_sql::build_patch_query;
use rowpatch_types::DiffResult;

use crate::cli::*;
use crate::config::Config;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_optional(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => match diff_documents(&args, &config)? {
            Some(diff) => {
                println!("{}", render_diff(&diff, cli.format)?);
                Ok(())
            }
            None => {
                println!("{}", "No differences.".green());
                Ok(())
            }
        },
        Command::Query(args) => {
            println!("{}", patch_query(&args, &config)?);
            Ok(())
        }
    }
}

/// Diff the two documents named by `args`. `None` means nothing changed.
fn diff_documents(args: &DiffArgs, config: &Config) -> anyhow::Result<Option<DiffResult>> {
    let mut options = args
        .policies
        .iter()
        .fold(config.diff, |opts, policy| opts.with_policy(*policy));
    if let Some(max_depth) = args.max_depth {
        options = options.with_max_depth(max_depth);
    }
    tracing::debug!(policy = %options.policy, max_depth = options.max_depth, "diffing documents");

    let (original, new) = read_pair(&args.original, &args.new)?;
    match diff_json(&original, &new, &options) {
        Ok(diff) => Ok(Some(diff)),
        Err(e) if e.is_no_diff() => Ok(None),
        Err(e) => Err(e).context("comparing documents"),
    }
}

fn patch_query(args: &QueryArgs, config: &Config) -> anyhow::Result<String> {
    let table = args
        .table
        .as_deref()
        .or(config.query.table.as_deref())
        .context("no table given; pass --table or set query.table in the config file")?;
    let condition = args
        .condition
        .as_deref()
        .or(config.query.condition.as_deref())
        .unwrap_or_default();

    let mut field_map = config.query.field_map.clone();
    field_map.extend(args.mappings.iter().cloned());

    let (original, new) = read_pair(&args.original, &args.new)?;
    build_patch_query(&original, &new, table, condition, &field_map)
        .context("building patch query")
}

fn render_diff(diff: &DiffResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(diff)?),
        OutputFormat::Text => Ok(diff
            .iter()
            .map(|(field, change)| format!("{field}: {}", change.to_value()))
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

fn read_pair(original: &Path, new: &Path) -> anyhow::Result<(Vec<u8>, Vec<u8>)> {
    if is_stdin(original) && is_stdin(new) {
        bail!("only one document can be read from stdin");
    }
    Ok((read_document(original)?, read_document(new)?))
}

fn read_document(path: &Path) -> anyhow::Result<Vec<u8>> {
    if is_stdin(path) {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("reading document from stdin")?;
        return Ok(buf);
    }
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}
