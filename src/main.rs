use clap::Parser;
use colored::Colorize;
use miette::{miette, Result};
use std::path::PathBuf;
use tracing::info;

mod analysis;
mod config;
mod discovery;
mod evidence;
mod parser;
mod pbxproj;
mod report;

use analysis::{Corpus, ReachabilityAnalyzer, Verdict};
use config::Config;
use discovery::{read_text, FileFinder};
use evidence::{BuildLogEvidence, CompileSourcesEvidence, EvidenceSource};
use parser::SwiftScanner;
use report::Reporter;

/// Exit code when at least one file is provably unused, for CI gating.
const EXIT_UNUSED_FOUND: i32 = 2;

/// proveunused - locate and prove unused Swift files (pbxproj + symbol reachability)
#[derive(Parser, Debug)]
#[command(name = "proveunused")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to project.pbxproj
    #[arg(long, required_unless_present = "build_log")]
    project: Option<PathBuf>,

    /// Source root folder to scan for .swift files
    #[arg(long)]
    src: PathBuf,

    /// Xcode target name whose Compile Sources define the compiled set
    #[arg(long, required_unless_present = "build_log")]
    target: Option<String>,

    /// Build log to use as compiled-set evidence instead of the manifest
    #[arg(long, value_name = "FILE")]
    build_log: Option<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Patterns to exclude from the scan (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Analyze files in parallel
    #[arg(long)]
    parallel: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for report::ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => report::ReportFormat::Terminal,
            OutputFormat::Json => report::ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("proveunused v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let results = run_analysis(&config, &cli)?;

    // Exit code contract: distinct non-zero when anything is provably
    // unused, so CI can gate on it.
    if results
        .iter()
        .any(|usage| usage.verdict == Verdict::HighConfUnused)
    {
        std::process::exit(EXIT_UNUSED_FOUND);
    }

    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&cli.src)?
    };

    // Override with CLI arguments
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }

    Ok(config)
}

fn run_analysis(config: &Config, cli: &Cli) -> Result<Vec<analysis::FileUsage>> {
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;

    let start_time = Instant::now();

    // Structural problems are fatal before any analysis runs.
    if !cli.src.is_dir() {
        return Err(miette!("source root not found: {}", cli.src.display()));
    }
    if let Some(project) = &cli.project {
        if !project.is_file() {
            return Err(miette!("project not found: {}", project.display()));
        }
    }

    // Step 1: Discover files
    info!("Discovering Swift files...");
    let finder = FileFinder::new(config);
    let files = finder.find_files(&cli.src);

    if files.is_empty() {
        println!("{}", "No Swift files found.".yellow());
        return Ok(Vec::new());
    }
    info!("Found {} Swift files", files.len());

    // Step 2: Scan declarations and fill the shared text cache
    let pb = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );
        pb
    };

    let scanner = SwiftScanner::with_entry_attributes(&config.entry_point_attributes);
    let mut scanned = Vec::with_capacity(files.len());
    let mut texts = Vec::with_capacity(files.len());
    for file in &files {
        let text = read_text(&file.path);
        scanned.push(scanner.scan(&file.rel_path, &text));
        texts.push((file.rel_path.clone(), text));
        pb.inc(1);
    }
    pb.finish_and_clear();
    let corpus = Corpus::new(texts);

    // Step 3: Recover the compiled set from one evidence source
    let evidence: Box<dyn EvidenceSource> = if let Some(log_path) = &cli.build_log {
        Box::new(BuildLogEvidence::new(log_path.clone(), cli.src.clone()))
    } else {
        let project = cli
            .project
            .clone()
            .ok_or_else(|| miette!("--project is required without --build-log"))?;
        let target = cli
            .target
            .clone()
            .ok_or_else(|| miette!("--target is required without --build-log"))?;
        Box::new(CompileSourcesEvidence::new(project, cli.src.clone(), target))
    };
    info!("Collecting compiled-set evidence from {}", evidence.describe());
    let compiled = evidence.collect()?;

    // Step 4: Reachability analysis
    info!("Running reachability analysis...");
    let analyzer = ReachabilityAnalyzer::new()
        .with_parallel(cli.parallel)
        .with_extended_symbols(cli.build_log.is_some());
    let results = analyzer.analyze(&scanned, &corpus, &compiled);

    // Step 5: Report
    let reporter = Reporter::new(cli.format.clone().into(), cli.output.clone())
        .with_max_references(config.report.max_references);
    reporter.report(&results)?;

    let elapsed = start_time.elapsed();
    info!(
        "Analyzed {} files in {:.2}s",
        results.len(),
        elapsed.as_secs_f64()
    );

    Ok(results)
}
