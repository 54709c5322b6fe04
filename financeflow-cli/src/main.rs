use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use financeflow_core::{NormalizedBatch, Transaction, extract_payee, normalize_batch};
use financeflow_finance::{SpendingSummary, apply_all, suggest_adjustments};
use financeflow_ingest::{RecordFormat, read_records};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

mod config;
mod llm;
mod logging;
mod state;
mod statement;

#[derive(Parser, Debug)]
#[command(name = "financeflow", version, about = "Normalize, categorize and summarize parsed bank transactions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the category for a description
    Categorize { description: String },

    /// Print the payee extracted from a description
    Payee { description: String },

    /// Normalize a file of parsed transactions (JSON, CSV or a saved model reply)
    Normalize {
        #[arg(long)]
        input: PathBuf,

        /// Input format (default: from file extension)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Write JSON here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Keep parser confidence in the output
        #[arg(long)]
        with_confidence: bool,
    },

    /// Send statement text to the configured model, then normalize the result
    ParseStatement {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: Option<PathBuf>,

        #[arg(long)]
        with_confidence: bool,
    },

    /// Spending summary over normalized transactions (text report, or JSON with --json)
    Summary {
        #[arg(long)]
        input: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Suggest category changes for stored transactions
    Adjust {
        #[arg(long)]
        input: PathBuf,

        /// Accept every suggestion and print (or write) the updated list
        #[arg(long)]
        apply: bool,

        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Manage ~/.financeflow/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Json,
    Csv,
    LlmReply,
}

impl From<FormatArg> for RecordFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => RecordFormat::Json,
            FormatArg::Csv => RecordFormat::Csv,
            FormatArg::LlmReply => RecordFormat::LlmReply,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Categorize { description } => {
            let cfg = config::load_config()?;
            println!("{}", cfg.categorizer().categorize(&description));
        }

        Command::Payee { description } => {
            println!("{}", extract_payee(&description));
        }

        Command::Normalize {
            input,
            format,
            output,
            with_confidence,
        } => {
            let cfg = config::load_config()?;
            let format = format.map(Into::into).unwrap_or_else(|| RecordFormat::from_path(&input));
            let records = read_records(&input, format)?;
            let batch = normalize_batch(records, &cfg.categorizer());
            emit_batch(batch, output.as_deref(), with_confidence)?;
        }

        Command::ParseStatement {
            input,
            output,
            with_confidence,
        } => {
            let cfg = config::load_config()?;
            let client = llm::LlmClient::from_config(&cfg.llm)?;
            let records = statement::parse_statement_file(&client, &input).await?;
            let batch = normalize_batch(records, &cfg.categorizer());
            emit_batch(batch, output.as_deref(), with_confidence)?;
        }

        Command::Summary { input, json } => {
            let txns = read_transactions(&input)?;
            let summary = SpendingSummary::from_transactions(&txns);
            if json {
                write_json(&summary, None)?;
            } else {
                print_summary(&summary);
            }
        }

        Command::Adjust {
            input,
            apply,
            output,
        } => {
            let cfg = config::load_config()?;
            let mut txns = read_transactions(&input)?;
            let adjustments = suggest_adjustments(&txns, &cfg.categorizer());

            if !apply {
                if adjustments.is_empty() {
                    println!("No category adjustments suggested.");
                }
                for a in &adjustments {
                    println!("#{} {} | {} -> {}", a.index, a.description, a.current, a.suggested);
                }
                return Ok(());
            }

            let applied = apply_all(&adjustments, &mut txns)?;
            write_json(&txns, output.as_deref())?;
            eprintln!("Applied {applied} adjustment(s)");
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn read_transactions(path: &Path) -> Result<Vec<Transaction>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing transactions in {}", path.display()))
}

fn emit_batch(batch: NormalizedBatch, output: Option<&Path>, with_confidence: bool) -> Result<()> {
    info!(
        kept = batch.transactions.len(),
        duplicates = batch.duplicate_count(),
        "batch normalized"
    );
    for dup in &batch.duplicates {
        eprintln!(
            "duplicate: row {} matches row {} ({} | {} | {:.2})",
            dup.source_index, dup.matched_index, dup.row.date, dup.row.description, dup.row.amount
        );
    }
    if with_confidence {
        write_json(&batch.transactions, output)
    } else {
        write_json(&batch.into_transactions(), output)
    }
}

fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    match output {
        Some(p) => {
            if p.is_dir() {
                bail!("output path is a directory: {}", p.display());
            }
            std::fs::write(p, json + "\n").with_context(|| format!("write {}", p.display()))?;
            eprintln!("Wrote {}", p.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn print_summary(summary: &SpendingSummary) {
    println!("# Spending summary\n");
    println!("Transactions: {}", summary.transaction_count);
    println!("Income:        {:>12.2}", summary.total_income);
    println!("Expenses:      {:>12.2}", summary.total_expense);
    println!("Subscriptions: {:>12.2}", summary.total_subscription);
    println!("Net:           {:>12.2}", summary.net);

    println!("\n## By category\n");
    for c in &summary.by_category {
        println!(
            "- {:<16} {:>12.2}  {:>5.1}%  ({} txns)",
            c.category.label(),
            c.total,
            summary.category_share(&c.category) * 100.0,
            c.count
        );
    }

    println!("\n## Top payees\n");
    for p in &summary.top_payees {
        println!("- {:<24} {:>12.2}  ({} txns)", p.payee, p.total, p.count);
    }

    println!("\n## By month\n");
    for m in &summary.by_month {
        println!("- {}  spend={:.2} income={:.2}", m.month, m.spend, m.income);
    }
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
    fn test_summary_help_mentions_both_outputs() {
        let cmd = Cli::command();
        let summary = cmd.find_subcommand("summary").unwrap();
        let about = summary.get_about().unwrap().to_string();
        assert!(about.contains("text report"), "{about}");
        assert!(about.contains("--json"), "{about}");
    }
}
