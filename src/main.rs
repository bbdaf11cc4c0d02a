mod api;
mod server;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use title_lab::{
    format_float, AnalysisReport, AppConfig, RngSource, TitleEngine, TitleRequest, TitleScore,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "title-lab", about = "Video title generator and CTR scorer")]
struct Cli {
    /// Path to a TOML config file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    Generate(GenerateArgs),
    Score(ScoreArgs),
    Serve(ServeArgs),
    InitConfig(InitConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct GenerateArgs {
    #[arg(long)]
    competitor: String,
    #[arg(long)]
    keyword: String,
    #[arg(long)]
    count: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    #[arg(long)]
    title: String,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct InitConfigArgs {
    #[arg(long, default_value = "config/title_lab.toml")]
    path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
}

fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, _) = AppConfig::load(cli.config).map_err(|err| err.to_string())?;
    if let Command::InitConfig(args) = &cli.command {
        config.write(&args.path).map_err(|err| err.to_string())?;
        println!("Wrote {}", args.path.display());
        return Ok(());
    }
    // Scorers are built outside any async runtime: the remote sentiment
    // client is blocking.
    let engine = Arc::new(TitleEngine::from_config(&config).map_err(|err| err.to_string())?);

    match cli.command {
        Command::Generate(args) => run_generate(&engine, args),
        Command::Score(args) => run_score(&engine, args),
        Command::Serve(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .map_err(|err| format!("failed to start runtime: {}", err))?;
            runtime.block_on(server::serve(args, engine.clone()))
        }
        Command::InitConfig(_) => Ok(()),
    }
}

fn run_generate(engine: &TitleEngine, args: GenerateArgs) -> Result<(), String> {
    let mut request = TitleRequest::new(args.competitor, args.keyword);
    if let Some(count) = args.count {
        request = request.with_count(count);
    }

    let mut rng = RngSource::from_seed_option(args.seed);
    let report = engine.analyze(&request, &mut rng).map_err(|err| err.to_string())?;

    if args.json {
        return print_json(&report);
    }
    print_report(&report);
    Ok(())
}

fn run_score(engine: &TitleEngine, args: ScoreArgs) -> Result<(), String> {
    let score = engine.score_title(&args.title).map_err(|err| err.to_string())?;
    if args.json {
        return print_json(&score);
    }
    print_score(&score);
    Ok(())
}

fn print_report(report: &AnalysisReport) {
    let competitor = &report.competitor;
    println!("Competitor: {}", competitor.title);
    println!(
        "  CTR {} ({}) | sentiment {} ({}) | {} chars, {}",
        format_float(competitor.ctr.value, 1),
        competitor.ctr.rating.label(),
        competitor.sentiment.label.as_str(),
        format_float(competitor.sentiment.score, 2),
        competitor.length,
        competitor.length_verdict.label()
    );

    println!("\nOptimized titles:");
    for (idx, title) in report.titles.iter().enumerate() {
        println!("  {}. {}", idx + 1, title.text);
        println!(
            "     {} chars | CTR {} ({}) | sentiment {}",
            title.length,
            format_float(title.ctr.value, 1),
            title.ctr.rating.label(),
            title.sentiment.label.as_str()
        );
    }

    if !report.variants.is_empty() {
        println!("\nA/B variants:");
        for variant in &report.variants {
            println!(
                "- {} ({} chars, CTR {} {})",
                variant.text,
                variant.length,
                format_float(variant.ctr.value, 1),
                variant.ctr.rating.label()
            );
        }
    }

    for warning in &report.warnings {
        eprintln!("Warning: {}", warning);
    }
}

fn print_score(score: &TitleScore) {
    println!("Title: {}", score.title);
    println!("Length: {} chars ({})", score.length, score.length_verdict.label());
    println!(
        "CTR: {} ({})",
        format_float(score.ctr.value, 1),
        score.ctr.rating.label()
    );
    println!(
        "Sentiment: {} ({})",
        score.sentiment.label.as_str(),
        format_float(score.sentiment.score, 2)
    );
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize output: {}", err))?;
    println!("{}", payload);
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
