mod config;
mod input;
mod render;

use std::io::{self, StdinLock, Stdout};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{json, Value};
use tracing::debug;

use kata_core::arrays::{
    find_duplicate, find_repeating_and_missing, majority_element, max_profit, max_subarray,
    merge_intervals, pascal_triangle, sort_colors,
};
use kata_core::matrix::{rotate_clockwise, search_sorted_matrix, set_matrix_zeroes};
use kata_core::permutation::permutations_by_swapping;
use kata_core::{
    distinct_permutation_count, factorial, next_permutation_with, parse_matrix, parse_vector,
    rank, Engine, Interval, KataError, KataResult, Matrix, Permutations,
};

use crate::config::Config;
use crate::input::Prompter;
use crate::render::{format_intervals, format_matrix, format_triangle, format_vector};

#[derive(Parser)]
#[command(
    name = "kata",
    version,
    about = "Console drills for classic array and matrix exercises"
)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Next lexicographic permutation (wraps past the greatest)
    Next {
        /// Values, e.g. "{1,2,3}" (prompts if omitted)
        values: Option<String>,

        /// Successor strategy (default from config)
        #[arg(short, long)]
        engine: Option<CliEngine>,

        /// Keep prompting until end of input
        #[arg(short, long)]
        repeat: bool,
    },

    /// List arrangements from the sorted one up to the input
    Enumerate {
        /// Values, e.g. "{1,2,3}" (prompts if omitted)
        values: Option<String>,

        /// List every distinct arrangement
        #[arg(short, long)]
        all: bool,
    },

    /// Rank of an arrangement among the distinct arrangements of its values
    Rank {
        /// Values, e.g. "{3,1,2}" (prompts if omitted)
        values: Option<String>,
    },

    /// All positional arrangements by swap recursion
    Permute {
        /// Values, e.g. "{1,2,3}" (prompts if omitted)
        values: Option<String>,
    },

    /// Compute n!
    Factorial {
        n: u64,
    },

    /// Zero every row and column that contains a zero
    Zeroes {
        /// Matrix, e.g. "{{1,1},{1,0}}" (prompts if omitted)
        matrix: Option<String>,
    },

    /// Print Pascal's triangle
    Pascal {
        /// Number of rows
        rows: usize,
    },

    /// Maximum contiguous subarray sum
    MaxSubarray {
        /// Values (prompts if omitted)
        values: Option<String>,
    },

    /// Sort 0s, 1s and 2s (Dutch national flag)
    SortColors {
        /// Values (prompts if omitted)
        values: Option<String>,
    },

    /// Best single buy/sell over daily prices
    Profit {
        /// Prices (prompts if omitted)
        values: Option<String>,
    },

    /// Rotate a square matrix 90 degrees clockwise
    Rotate {
        /// Matrix (prompts if omitted)
        matrix: Option<String>,
    },

    /// Merge overlapping intervals given as "{{start,end},...}"
    Merge {
        /// Intervals (prompts if omitted)
        intervals: Option<String>,
    },

    /// Element occurring more than n/2 times
    Majority {
        /// Values (prompts if omitted)
        values: Option<String>,
    },

    /// Duplicate among n+1 values drawn from 1..=n
    Duplicate {
        /// Values (prompts if omitted)
        values: Option<String>,
    },

    /// Repeated and missing value among n values drawn from 1..=n
    RepeatMissing {
        /// Values (prompts if omitted)
        values: Option<String>,
    },

    /// Search a matrix whose rows and columns are sorted ascending
    Search {
        /// Matrix (prompts if omitted)
        matrix: Option<String>,

        /// Value to look for
        #[arg(short, long, allow_hyphen_values = true)]
        target: i64,
    },

    /// Show current configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliEngine {
    /// Pivot, swap and suffix reversal
    Pivot,
    /// Full permutation table lookup
    Table,
}

impl From<CliEngine> for Engine {
    fn from(val: CliEngine) -> Self {
        match val {
            CliEngine::Pivot => Engine::Pivot,
            CliEngine::Table => Engine::Table,
        }
    }
}

/// Resolved settings shared by every command.
struct Session {
    config: Config,
    json: bool,
}

impl Session {
    fn prompter(&self) -> Prompter<StdinLock<'static>, Stdout> {
        Prompter::new(
            io::stdin().lock(),
            io::stdout(),
            self.config.input.prompt.clone(),
            self.config.input.max_attempts,
        )
    }

    /// Parses `raw` if given, otherwise prompts until a line is accepted.
    /// `Ok(None)` means stdin ended before any valid input.
    fn read<T>(
        &self,
        raw: Option<String>,
        label: &str,
        accept: fn(&str) -> KataResult<T>,
    ) -> Result<Option<T>> {
        match raw {
            Some(raw) => accept(&raw)
                .map(Some)
                .with_context(|| format!("invalid argument {raw:?}")),
            None => self.prompter().read_with(label, accept),
        }
    }

    fn read_vector(&self, raw: Option<String>) -> Result<Option<Vec<i64>>> {
        self.read(raw, "V", parse_vector)
    }

    fn read_matrix(&self, raw: Option<String>) -> Result<Option<Matrix<i64>>> {
        self.read(raw, "M", parse_matrix)
    }

    fn ensure_listable(&self, items: &[i64]) -> Result<()> {
        let max = self.config.permutation.max_table_len;
        if items.len() > max {
            return Err(anyhow::Error::new(KataError::TooLarge {
                len: items.len(),
                max,
            })
            .context("raise permutation.max_table_len to list longer inputs"));
        }
        Ok(())
    }

    fn emit(
        &self,
        human: impl FnOnce() -> String,
        machine: impl FnOnce() -> Value,
    ) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&machine())?);
        } else {
            println!("{}", human());
        }
        Ok(())
    }
}

/// Accepts only non-empty sequences at the prompt.
fn non_empty_vector(line: &str) -> KataResult<Vec<i64>> {
    let items = parse_vector(line)?;
    if items.is_empty() {
        return Err(KataError::InvalidInput(
            "cannot permute an empty sequence".into(),
        ));
    }
    Ok(items)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;
    let session = Session {
        json: cli.json || config.output.json,
        config,
    };

    match cli.command {
        Commands::Next {
            values,
            engine,
            repeat,
        } => cmd_next(&session, values, engine.map(Engine::from), repeat),
        Commands::Enumerate { values, all } => cmd_enumerate(&session, values, all),
        Commands::Rank { values } => cmd_rank(&session, values),
        Commands::Permute { values } => cmd_permute(&session, values),
        Commands::Factorial { n } => cmd_factorial(&session, n),
        Commands::Zeroes { matrix } => cmd_zeroes(&session, matrix),
        Commands::Pascal { rows } => cmd_pascal(&session, rows),
        Commands::MaxSubarray { values } => cmd_max_subarray(&session, values),
        Commands::SortColors { values } => cmd_sort_colors(&session, values),
        Commands::Profit { values } => cmd_profit(&session, values),
        Commands::Rotate { matrix } => cmd_rotate(&session, matrix),
        Commands::Merge { intervals } => cmd_merge(&session, intervals),
        Commands::Majority { values } => cmd_majority(&session, values),
        Commands::Duplicate { values } => cmd_duplicate(&session, values),
        Commands::RepeatMissing { values } => cmd_repeat_missing(&session, values),
        Commands::Search { matrix, target } => cmd_search(&session, matrix, target),
        Commands::Config => cmd_config(&session, cli.config.as_deref()),
    }
}

// ---------------------------------------------------------------------------
// Permutation commands
// ---------------------------------------------------------------------------

fn cmd_next(
    session: &Session,
    values: Option<String>,
    engine: Option<Engine>,
    repeat: bool,
) -> Result<()> {
    let engine = engine.unwrap_or(session.config.permutation.engine);

    if let Some(raw) = values {
        let items = parse_vector(&raw).with_context(|| format!("invalid argument {raw:?}"))?;
        return print_next(session, &items, engine);
    }

    let mut prompter = session.prompter();
    while let Some(items) = prompter.read_with("V", non_empty_vector)? {
        print_next(session, &items, engine)?;
        if !repeat {
            break;
        }
    }
    Ok(())
}

fn print_next(session: &Session, items: &[i64], engine: Engine) -> Result<()> {
    let next = next_permutation_with(items, engine, session.config.permutation.max_table_len)?;
    debug!(%engine, len = items.len(), "computed successor");
    session.emit(
        || format_vector(&next),
        || json!({ "input": items, "next": next, "engine": engine }),
    )
}

fn cmd_enumerate(session: &Session, values: Option<String>, all: bool) -> Result<()> {
    let Some(items) = session.read(values, "V", non_empty_vector)? else {
        return Ok(());
    };
    session.ensure_listable(&items)?;

    let mut listed = Vec::new();
    for arrangement in Permutations::new(&items)? {
        let reached = arrangement == items;
        listed.push(arrangement);
        if reached && !all {
            break;
        }
    }

    session.emit(
        || {
            let mut out: Vec<String> = listed.iter().map(|p| format_vector(p)).collect();
            out.push(format!("Total of {} permutations", listed.len()));
            out.join("\n")
        },
        || json!({ "permutations": listed, "total": listed.len() }),
    )
}

fn cmd_rank(session: &Session, values: Option<String>) -> Result<()> {
    let Some(items) = session.read(values, "V", non_empty_vector)? else {
        return Ok(());
    };
    let r = rank(&items)?;
    let count = distinct_permutation_count(&items)?;
    session.emit(
        || format!("Rank {r} of {count} distinct permutations"),
        || json!({ "input": items, "rank": r, "count": count }),
    )
}

fn cmd_permute(session: &Session, values: Option<String>) -> Result<()> {
    let Some(items) = session.read_vector(values)? else {
        return Ok(());
    };
    session.ensure_listable(&items)?;

    let all = permutations_by_swapping(&items);
    session.emit(
        || {
            let mut out: Vec<String> = all.iter().map(|p| format_vector(p)).collect();
            out.push(format!("Total of {} arrangements", all.len()));
            out.join("\n")
        },
        || json!({ "arrangements": all, "total": all.len() }),
    )
}

fn cmd_factorial(session: &Session, n: u64) -> Result<()> {
    let value = factorial(n)?;
    session.emit(
        || format!("{n}! = {value}"),
        || json!({ "n": n, "factorial": value }),
    )
}

// ---------------------------------------------------------------------------
// Array commands
// ---------------------------------------------------------------------------

fn cmd_pascal(session: &Session, rows: usize) -> Result<()> {
    let triangle = pascal_triangle(rows)?;
    session.emit(
        || format_triangle(&triangle),
        || json!({ "rows": triangle }),
    )
}

fn cmd_max_subarray(session: &Session, values: Option<String>) -> Result<()> {
    let Some(items) = session.read_vector(values)? else {
        return Ok(());
    };
    let best = max_subarray(&items)?;
    let range = &items[best.start..=best.end];
    session.emit(
        || {
            format!(
                "Sum {} over [{}..={}]: {}",
                best.sum,
                best.start,
                best.end,
                format_vector(range)
            )
        },
        || json!(best),
    )
}

fn cmd_sort_colors(session: &Session, values: Option<String>) -> Result<()> {
    let Some(mut items) = session.read_vector(values)? else {
        return Ok(());
    };
    sort_colors(&mut items)?;
    session.emit(|| format_vector(&items), || json!(items))
}

fn cmd_profit(session: &Session, values: Option<String>) -> Result<()> {
    let Some(prices) = session.read_vector(values)? else {
        return Ok(());
    };
    let trade = max_profit(&prices)?;
    session.emit(
        || match trade {
            Some(t) => format!(
                "Buy on day {} at {}, sell on day {} at {}: profit {}",
                t.buy_day, prices[t.buy_day], t.sell_day, prices[t.sell_day], t.profit
            ),
            None => "No profitable trade.".into(),
        },
        || json!(trade),
    )
}

fn cmd_merge(session: &Session, raw: Option<String>) -> Result<()> {
    let Some(matrix) = session.read_matrix(raw)? else {
        return Ok(());
    };
    if !matrix.is_empty() && matrix.cols() != 2 {
        bail!(
            "intervals need exactly two values each, got {} per row",
            matrix.cols()
        );
    }
    let intervals: Vec<Interval> = matrix
        .iter_rows()
        .map(|row| Interval::new(row[0], row[1]))
        .collect();
    let merged = merge_intervals(intervals)?;
    session.emit(|| format_intervals(&merged), || json!(merged))
}

fn cmd_majority(session: &Session, values: Option<String>) -> Result<()> {
    let Some(items) = session.read_vector(values)? else {
        return Ok(());
    };
    let majority = majority_element(&items);
    session.emit(
        || match majority {
            Some(m) => format!("Majority element: {m}"),
            None => "No majority element.".into(),
        },
        || json!({ "majority": majority }),
    )
}

fn cmd_duplicate(session: &Session, values: Option<String>) -> Result<()> {
    let Some(items) = session.read_vector(values)? else {
        return Ok(());
    };
    let duplicate = find_duplicate(&items)?;
    session.emit(
        || format!("Duplicate: {duplicate}"),
        || json!({ "duplicate": duplicate }),
    )
}

fn cmd_repeat_missing(session: &Session, values: Option<String>) -> Result<()> {
    let Some(items) = session.read_vector(values)? else {
        return Ok(());
    };
    let (repeated, missing) = find_repeating_and_missing(&items)?;
    session.emit(
        || format!("Repeated: {repeated}, missing: {missing}"),
        || json!({ "repeated": repeated, "missing": missing }),
    )
}

// ---------------------------------------------------------------------------
// Matrix commands
// ---------------------------------------------------------------------------

fn cmd_zeroes(session: &Session, raw: Option<String>) -> Result<()> {
    let Some(mut matrix) = session.read_matrix(raw)? else {
        return Ok(());
    };
    set_matrix_zeroes(&mut matrix);
    session.emit(|| format_matrix(&matrix), || json!(matrix.clone().into_rows()))
}

fn cmd_rotate(session: &Session, raw: Option<String>) -> Result<()> {
    let Some(mut matrix) = session.read_matrix(raw)? else {
        return Ok(());
    };
    rotate_clockwise(&mut matrix)?;
    session.emit(|| format_matrix(&matrix), || json!(matrix.clone().into_rows()))
}

fn cmd_search(session: &Session, raw: Option<String>, target: i64) -> Result<()> {
    let Some(matrix) = session.read_matrix(raw)? else {
        return Ok(());
    };
    let found = search_sorted_matrix(&matrix, target);
    session.emit(
        || match found {
            Some((row, col)) => format!("Found {target} at row {row}, column {col}"),
            None => format!("{target} not found."),
        },
        || json!({ "target": target, "position": found }),
    )
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn cmd_config(session: &Session, explicit: Option<&std::path::Path>) -> Result<()> {
    let cfg = &session.config;
    println!("Config: {}", config::show_config_path(explicit));
    println!();
    println!("[input]");
    println!("  prompt = {:?}", cfg.input.prompt);
    println!("  max_attempts = {}", cfg.input.max_attempts);
    println!();
    println!("[permutation]");
    println!("  engine = {}", cfg.permutation.engine);
    println!("  max_table_len = {}", cfg.permutation.max_table_len);
    println!();
    println!("[output]");
    println!("  json = {}", cfg.output.json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_next_with_engine() {
        let cli = Cli::try_parse_from(["kata", "next", "{3,2,1}", "--engine", "table"]).unwrap();
        match cli.command {
            Commands::Next {
                values,
                engine,
                repeat,
            } => {
                assert_eq!(values.as_deref(), Some("{3,2,1}"));
                assert!(matches!(engine, Some(CliEngine::Table)));
                assert!(!repeat);
            }
            _ => panic!("expected next"),
        }
    }

    #[test]
    fn test_parse_search_negative_target() {
        let cli =
            Cli::try_parse_from(["kata", "--json", "search", "{{1,2},{3,4}}", "-t", "-5"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Search { target: -5, .. }));
    }

    #[test]
    fn test_non_empty_vector() {
        assert_eq!(non_empty_vector("{2,1}").unwrap(), vec![2, 1]);
        assert!(matches!(
            non_empty_vector("{}"),
            Err(KataError::InvalidInput(_))
        ));
        assert!(matches!(non_empty_vector("2,1"), Err(KataError::Parse(_))));
    }
}
