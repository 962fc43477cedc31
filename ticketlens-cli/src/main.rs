use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use ticketlens_core::logging::init_tracing;
use ticketlens_core::TicketLensConfig;
use ticketlens_engine::{
    load_prompts, validate_prompts, AnalysisPipeline, AnalysisRun, ArtefactExporter,
    HistoryEntry, HistoryStore, OpenAiReportClient, ReportDetail, TicketApiClient,
};
use ticketlens_filter::parse_prompt;
use tracing::info;

mod output;

use output::{
    default_history_path, print_artefacts, print_dataset, print_history, print_prompt_result,
    print_records, print_spec, CliError,
};

#[derive(Parser)]
#[command(name = "ticketlens")]
#[command(about = "TicketLens - prompt-driven ticket analytics", long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, env = "TICKETLENS_LOG", default_value = "info")]
    log_level: String,
    /// Prompt history file (defaults to ~/.ticketlens/history.json)
    #[arg(long, global = true, env = "TICKETLENS_HISTORY")]
    history_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch tickets once and analyse up to five prompts against them
    Analyze(AnalyzeArgs),
    /// Show the filters a prompt parses to, as JSON
    Parse {
        prompt: String,
    },
    /// List previously submitted prompts
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Show version information
    Version,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Prompt to analyse; repeat for several
    #[arg(short = 'p', long = "prompt")]
    prompts: Vec<String>,
    /// YAML or JSON file with more prompts
    #[arg(long)]
    prompts_file: Option<PathBuf>,
    /// Re-run prompt number N from the history
    #[arg(long = "rerun", value_name = "N")]
    rerun: Vec<usize>,
    #[arg(long, default_value_t = ReportDetail::Detailed)]
    detail: ReportDetail,
    /// Directory for charts and report documents
    #[arg(long, default_value = "ticketlens-out")]
    out: PathBuf,
    /// Print every fetched ticket
    #[arg(long, default_value_t = false)]
    show_raw: bool,
    /// Print the tickets each prompt matched
    #[arg(long, default_value_t = false)]
    show_filtered: bool,
    #[arg(long, default_value_t = false)]
    no_charts: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    init_tracing(Some(&cli.log_level))?;

    let history_path = cli.history_file;

    match cli.command {
        Commands::Analyze(args) => analyze(args, history_path).await,
        Commands::Parse { prompt } => print_spec(&parse_prompt(&prompt)),
        Commands::History { limit } => {
            let store = open_history(history_path)?;
            print_history(&store.history().latest(limit));
            Ok(())
        }
        Commands::Version => {
            println!("TicketLens v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn open_history(path: Option<PathBuf>) -> Result<HistoryStore, CliError> {
    let path = match path {
        Some(path) => path,
        None => default_history_path()?,
    };
    Ok(HistoryStore::load(path)?)
}

async fn analyze(args: AnalyzeArgs, history_path: Option<PathBuf>) -> Result<(), CliError> {
    let mut history = open_history(history_path)?;
    let prompts = gather_prompts(&args, &history)?;

    let config = TicketLensConfig::from_env()?;
    let timeout = Duration::from_secs(config.http_timeout_secs);
    let source = TicketApiClient::new(&config.source, timeout)?;
    let reporter = OpenAiReportClient::new(&config.report, timeout)?;
    info!(
        source = %source.url(),
        model = reporter.model(),
        prompts = prompts.len(),
        "starting analysis"
    );

    let pipeline = AnalysisPipeline::new(source, reporter).with_detail(args.detail);
    let run = pipeline.run(&prompts).await?;

    print_dataset(&run);
    if args.show_raw {
        print_records("Fetched tickets", &run.dataset.tickets)?;
    }

    finish_run(&run, &args, &mut history)
}

/// Prints and exports each result, then records every analysed prompt even
/// when printing or exporting a later one failed.
fn finish_run(
    run: &AnalysisRun,
    args: &AnalyzeArgs,
    history: &mut HistoryStore,
) -> Result<(), CliError> {
    let exporter = ArtefactExporter::new(&args.out).with_charts(!args.no_charts);
    let reported = report_results(run, args, &exporter);

    history.append(history_entries(run))?;
    reported
}

fn report_results(
    run: &AnalysisRun,
    args: &AnalyzeArgs,
    exporter: &ArtefactExporter,
) -> Result<(), CliError> {
    for result in &run.results {
        print_prompt_result(result);
        if args.show_filtered {
            print_records("Matched tickets", &result.outcome.tickets)?;
        }
        let artefacts = exporter.export(result)?;
        print_artefacts(&artefacts);
    }
    Ok(())
}

fn history_entries(run: &AnalysisRun) -> Vec<HistoryEntry> {
    run.results
        .iter()
        .map(|result| HistoryEntry::new(&result.prompt).with_matched(result.outcome.tickets.len()))
        .collect()
}

/// Collects prompts from flags, the prompts file and history re-runs, in that
/// order, and checks the count before anything touches the network.
fn gather_prompts(args: &AnalyzeArgs, history: &HistoryStore) -> Result<Vec<String>, CliError> {
    let mut prompts = args.prompts.clone();

    if let Some(path) = &args.prompts_file {
        prompts.extend(load_prompts(path)?);
    }

    for number in &args.rerun {
        let entry = history
            .history()
            .get(*number)
            .ok_or(ticketlens_engine::EngineError::UnknownHistoryEntry(*number))?;
        prompts.push(entry.prompt.clone());
    }

    Ok(validate_prompts(&prompts)?)
}
