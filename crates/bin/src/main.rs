//! Hobart CLI binary.
//!
//! Fetches a company's financial statements and price history, derives
//! standard ratios, and presents tables, commentary and an optional chat
//! session over the computed context.

use clap::{Parser, Subcommand};
use hobart_chat::{ChatContext, ChatSession, GeminiClient, GeminiConfig};
use hobart_data::yahoo::quotes;
use hobart_data::{
    CompanyData, CompanyDataProvider, HistoryInterval, HistoryRange, StatementFrequency,
    StatementTable,
};
use hobart_output::{
    AnalysisReport, ExportFormat, Exporter, format_issuer_header, format_ratio_table,
    generate_commentary, missing_ratio_messages,
};
use hobart_ratios::{RatioRecord, compute_ratios};
use indicatif::{ProgressBar, ProgressStyle};
use polars::prelude::DataFrame;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hobart")]
#[command(about = "Hobart: financial statement analyzer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch statements and compute financial ratios
    Analyze {
        /// Ticker symbol (e.g. AAPL, TSLA, INFY.NS)
        ticker: String,

        /// Statement frequency (annual or quarterly)
        #[arg(long, default_value = "annual")]
        frequency: StatementFrequency,

        /// Price-history window (1y/2y/5y/10y)
        #[arg(long, default_value = "1y")]
        range: HistoryRange,

        /// Price-history interval (1d/1wk/1mo)
        #[arg(long, default_value = "1d")]
        interval: HistoryInterval,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the ratio records as CSV to this path
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Interactive Q&A about a company's ratios
    Chat {
        /// Ticker symbol
        ticker: String,

        /// Statement frequency (annual or quarterly)
        #[arg(long, default_value = "annual")]
        frequency: StatementFrequency,

        /// Assistant model override
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            ticker,
            frequency,
            range,
            interval,
            format,
            export,
        } => analyze(&ticker, frequency, range, interval, &format, export).await,
        Commands::Chat {
            ticker,
            frequency,
            model,
        } => chat(&ticker, frequency, model).await,
    }
}

async fn analyze(
    ticker: &str,
    frequency: StatementFrequency,
    range: HistoryRange,
    interval: HistoryInterval,
    format: &str,
    export: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fetch_with_spinner(ticker, frequency, range, interval).await?;

    let records = compute_ratios(&data.income_statement, &data.balance_sheet);
    let commentary = generate_commentary(&records)
        .map(|c| c.sentences)
        .unwrap_or_default();
    let diagnostics = missing_ratio_messages(&records);

    if format == "json" {
        let report = AnalysisReport::new(
            ticker.to_string(),
            data.issuer.clone(),
            records.clone(),
            commentary,
            diagnostics,
        );
        println!("{}", report.to_json()?);
    } else {
        print_text_report(ticker, &data, &records, &commentary, &diagnostics)?;
    }

    if let Some(path) = export {
        records.export_to_file(&path, ExportFormat::Csv)?;
        println!("\nRatio records written to {}", path.display());
    }

    Ok(())
}

fn print_text_report(
    ticker: &str,
    data: &CompanyData,
    records: &[RatioRecord],
    commentary: &[String],
    diagnostics: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", format_issuer_header(ticker, &data.issuer));

    print_statement_preview("Income statement", &data.income_statement);
    print_statement_preview("Balance sheet", &data.balance_sheet);
    print_statement_preview("Cash-flow statement", &data.cash_flow);
    println!();

    if records.is_empty() {
        println!("Ratios not available for this company / period.");
    } else {
        println!("Computed ratios\n");
        print!("{}", format_ratio_table(records));
    }

    if !commentary.is_empty() {
        println!("\nCommentary");
        for sentence in commentary {
            println!("  - {sentence}");
        }
    }

    println!("\nDiagnostics");
    if diagnostics.is_empty() {
        println!("  No immediate calculation warnings detected.");
    } else {
        for message in diagnostics {
            println!("  ! {message}");
        }
    }

    print_history_section(&data.history)?;
    Ok(())
}

fn print_statement_preview(name: &str, table: &StatementTable) {
    if table.is_empty() {
        println!("{name}: no data available");
    } else {
        println!(
            "{name}: {} accounts x {} periods",
            table.row_count(),
            table.period_count()
        );
    }
}

fn print_history_section(history: &DataFrame) -> Result<(), Box<dyn std::error::Error>> {
    println!("\nPrice history");
    match quotes::summarize(history)? {
        Some(summary) => {
            println!(
                "  {} to {}: close {:.2} -> {:.2} ({:+.2}%), range {:.2}-{:.2}",
                summary.start_date,
                summary.end_date,
                summary.first_close,
                summary.last_close,
                summary.change_pct,
                summary.low,
                summary.high,
            );
        }
        None => println!("  No historical price available."),
    }
    Ok(())
}

async fn chat(
    ticker: &str,
    frequency: StatementFrequency,
    model: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GeminiConfig::from_env()?;
    if let Some(model) = model {
        config = config.with_model(model);
    }

    let data = fetch_with_spinner(
        ticker,
        frequency,
        HistoryRange::default(),
        HistoryInterval::default(),
    )
    .await?;
    let records = compute_ratios(&data.income_statement, &data.balance_sheet);
    let context = build_chat_context(ticker, &data, &records);

    let mut session = ChatSession::new(GeminiClient::new(config));

    println!(
        "Chatting about {}. Ask about its ratios, type 'exit' to quit.",
        data.issuer.name.as_deref().unwrap_or(ticker)
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let question = line.trim();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        let spinner = spinner("Thinking...");
        let answer = session.ask(question, &context).await;
        spinner.finish_and_clear();
        println!("{answer}\n");
    }

    Ok(())
}

/// Serialize the latest ratio record and issuer KPIs as chat context.
fn build_chat_context(ticker: &str, data: &CompanyData, records: &[RatioRecord]) -> ChatContext {
    let mut context = ChatContext::new();
    context.push("Ticker", ticker);

    if let Some(name) = &data.issuer.name {
        context.push("Company", name.as_str());
    }
    if let Some(market_cap) = data.issuer.market_cap {
        context.push("Market Cap", format!("{market_cap:.0}"));
    }
    if let Some(trailing_pe) = data.issuer.trailing_pe {
        context.push("Trailing P/E", format!("{trailing_pe:.2}"));
    }
    if let Some(profit_margin) = data.issuer.profit_margin {
        context.push("Profit Margin", format!("{profit_margin:.4}"));
    }

    if let Some(latest) = hobart_output::latest_record(records) {
        context.push("Period", latest.period.as_str());
        push_ratio(&mut context, "ROA", latest.roa);
        push_ratio(&mut context, "ROE", latest.roe);
        push_ratio(&mut context, "Current Ratio", latest.current_ratio);
        push_ratio(&mut context, "Quick Ratio", latest.quick_ratio);
    }

    context
}

fn push_ratio(context: &mut ChatContext, key: &str, value: Option<f64>) {
    match value {
        Some(v) => context.push(key, format!("{v:.4}")),
        None => context.push(key, "not available"),
    }
}

async fn fetch_with_spinner(
    ticker: &str,
    frequency: StatementFrequency,
    range: HistoryRange,
    interval: HistoryInterval,
) -> Result<CompanyData, Box<dyn std::error::Error>> {
    let provider = CompanyDataProvider::new();

    let pb = spinner(&format!("Fetching data for {ticker}..."));
    let result = provider.fetch(ticker, frequency, range, interval).await;
    pb.finish_and_clear();

    result.map_err(|e| format!("Failed to fetch data: {e}").into())
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid progress style"),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
