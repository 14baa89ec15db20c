//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{LookupStrategy, RenderStyle, Settings};
use crate::domain::{OrderedTree, TreeRender};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Bench {
            words,
            lookups,
            seed,
            strategy,
            keep_case,
        }) => cmd_bench(cli, words, *lookups, *seed, *strategy, *keep_case),
        Some(Commands::Show {
            values,
            sorted,
            rebalance,
            style,
        }) => cmd_show(cli, values, *sorted, *rebalance, *style),
        Some(Commands::Query {
            values,
            sorted,
            remove,
            find,
            successor,
            predecessor,
            range,
        }) => cmd_query(
            values,
            *sorted,
            remove,
            *find,
            *successor,
            *predecessor,
            range.as_deref(),
        ),
        Some(Commands::Config { template }) => cmd_config(cli, *template),
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
        None => Err(CliError::Usage(
            "no command given, see `ordtree --help`".to_string(),
        )),
    }
}

fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let settings = Settings::load(cli.config.as_deref())?;
    debug!("settings: {:?}", settings);
    Ok(settings)
}

/// Inserts in argument order, or sorts and appends when `sorted` is set.
fn build_tree(values: &[i64], sorted: bool) -> CliResult<OrderedTree<i64>> {
    if sorted {
        let mut values = values.to_vec();
        values.sort_unstable();
        Ok(OrderedTree::from_sorted(values)?)
    } else {
        Ok(values.iter().copied().collect())
    }
}

fn describe(value: Option<&i64>) -> String {
    value.map_or_else(|| "none".to_string(), i64::to_string)
}

#[instrument(skip(cli))]
fn cmd_bench(
    cli: &Cli,
    words: &Path,
    lookups: Option<usize>,
    seed: Option<u64>,
    strategy: Option<LookupStrategy>,
    keep_case: bool,
) -> CliResult<()> {
    let mut settings = load_settings(cli)?;
    if let Some(lookups) = lookups {
        settings.bench.lookups = lookups;
    }
    if seed.is_some() {
        settings.bench.seed = seed;
    }
    if let Some(strategy) = strategy {
        settings.bench.strategy = strategy;
    }
    if keep_case {
        settings.bench.lowercase = false;
    }
    if settings.bench.lookups == 0 {
        return Err(CliError::InvalidArgs("lookups must be at least 1".to_string()));
    }

    let container = ServiceContainer::new(settings);
    let source = container.word_source(words)?;
    output::header(&format!("Searching words from {}", words.display()));
    let report = container.benchmark_service(source).run()?;

    output::detail(&format!(
        "{} lookups in {} words",
        report.lookups, report.word_count
    ));
    for measurement in &report.measurements {
        output::info(measurement);
    }
    Ok(())
}

#[instrument(skip(cli))]
fn cmd_show(
    cli: &Cli,
    values: &[i64],
    sorted: bool,
    rebalance: bool,
    style: Option<RenderStyle>,
) -> CliResult<()> {
    let style = match style {
        Some(style) => style,
        None => load_settings(cli)?.render,
    };
    let mut tree = build_tree(values, sorted)?;
    if rebalance {
        tree.rebalance();
    }

    let rendered = match style {
        RenderStyle::Rotated => tree.to_string(),
        RenderStyle::Tree => tree.to_tree_string().to_string(),
    };
    output::info(rendered.trim_end());
    output::action("size", &tree.len());
    output::action("height", &tree.height());
    output::action("balanced", &tree.is_balanced());
    Ok(())
}

#[instrument]
fn cmd_query(
    values: &[i64],
    sorted: bool,
    remove: &[i64],
    find: Option<i64>,
    successor: Option<i64>,
    predecessor: Option<i64>,
    range: Option<&[i64]>,
) -> CliResult<()> {
    let mut tree = build_tree(values, sorted)?;

    for value in remove {
        let removed = tree.remove(value)?;
        output::action("removed", &removed);
    }
    if let Some(value) = find {
        output::action("find", &describe(tree.find(&value)));
    }
    if let Some(value) = successor {
        output::action("successor", &describe(tree.successor(&value)));
    }
    if let Some(value) = predecessor {
        output::action("predecessor", &describe(tree.predecessor(&value)));
    }
    if let Some(bounds) = range {
        let [low, high] = bounds else {
            return Err(CliError::InvalidArgs(
                "--range takes exactly LOW and HIGH".to_string(),
            ));
        };
        let found: Vec<String> = tree
            .range_find(low, high)
            .into_iter()
            .map(i64::to_string)
            .collect();
        output::action("range", &format!("[{}]", found.join(", ")));
    }

    output::detail(&format!("{} values, height {}", tree.len(), tree.height()));
    Ok(())
}

fn cmd_config(cli: &Cli, template: bool) -> CliResult<()> {
    if template {
        output::info(Settings::template().trim_end());
        return Ok(());
    }
    let settings = load_settings(cli)?;
    output::info(settings.to_toml()?.trim_end());
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    eprintln!("Generating completion file for {shell:?}...");
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
