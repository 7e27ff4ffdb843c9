//! spamplan - probabilistic word-evidence classifier
//!
//! The command-line entry point, handling:
//! - Configuration resolution and validation
//! - Classification with the naive-Bayes or Fisher strategy
//! - Inspection of the per-word classifier table
//! - The reference corpus demo

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde_json::json;

use sp_core::classify::{Classifier, ClassifierOptions};
use sp_core::config::{
    load_config, ConfigError, ConfigOptions, ResolvedConfig, SelectionOrder, StrategyName,
};
use sp_core::dist::ProbError;
use sp_core::exit_codes::ExitCode;
use sp_core::knowledge::WordTable;
use sp_core::log_event;
use sp_core::logging::{
    event_names, generate_run_id, init_logging, LogConfig, LogContext, LogLevel, Stage,
};
use sp_core::output::{
    ClassificationReport, DemoCase, DemoReport, OutputFormat, PosteriorReport, Report,
    WordsReport, OUTPUT_SCHEMA_VERSION,
};
use sp_core::strategy::strategy_for;

/// spamplan - classify word sets from per-category word counts
#[derive(Parser)]
#[command(name = "spamplan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Override config directory
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Knowledge file (word/category counts)
    #[arg(long, global = true)]
    knowledge: Option<PathBuf>,

    /// Classifier settings file
    #[arg(long, global = true)]
    classifier: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "json")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Most probable category for a set of words
    Classify(QueryArgs),

    /// Full distribution over categories for a set of words
    Posterior(QueryArgs),

    /// Run the reference corpus through both strategies
    Demo(DemoArgs),

    /// Inspect the per-word classifier table
    Words(WordsArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Words of the message to classify
    #[arg(required = true)]
    words: Vec<String>,

    /// Maximum number of word classifiers to combine
    #[arg(long, short = 'n')]
    top_n: Option<usize>,

    /// Combination strategy (naive_bayes | fisher)
    #[arg(long)]
    strategy: Option<StrategyName>,

    /// Which end of the informativeness ranking to use
    #[arg(long)]
    selection: Option<SelectionOrder>,
}

#[derive(Args, Debug)]
struct DemoArgs {
    /// Maximum number of word classifiers to combine
    #[arg(long, short = 'n')]
    top_n: Option<usize>,
}

#[derive(Args, Debug)]
struct WordsArgs {
    /// Show at most this many words
    #[arg(long)]
    limit: Option<usize>,

    /// Ranking order (least_informative | most_informative)
    #[arg(long, default_value = "most_informative")]
    order: SelectionOrder,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Show the resolved configuration
    Show,
    /// Validate the configuration files
    Validate,
}

/// The reference driver's test corpus.
const DEMO_CORPUS: [&[&str]; 4] = [
    &["free"],
    &["monad"],
    &["free", "asdf", "bayes", "quick", "jump", "test"],
    &["free", "monad", "asdf", "bayes", "quick", "jump", "test"],
];

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() {
                ExitCode::ArgsError
            } else {
                ExitCode::Clean
            };
            let _ = err.print();
            std::process::exit(code.as_i32());
        }
    };

    let cli_level = (cli.global.verbose > 0 || cli.global.quiet)
        .then(|| LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet));
    init_logging(&LogConfig::from_env(cli_level, None));

    let ctx = LogContext::new(generate_run_id());
    log_event!(
        ctx,
        INFO,
        event_names::RUN_STARTED,
        Stage::Init,
        "Starting spamplan"
    );

    let exit_code = match &cli.command {
        Commands::Classify(args) => run_classify(&cli.global, &ctx, args),
        Commands::Posterior(args) => run_posterior(&cli.global, &ctx, args),
        Commands::Demo(args) => run_demo(&cli.global, &ctx, args),
        Commands::Words(args) => run_words(&cli.global, &ctx, args),
        Commands::Config(args) => match args.command {
            ConfigCommands::Show => run_config_show(&cli.global, &ctx),
            ConfigCommands::Validate => run_config_validate(&cli.global, &ctx),
        },
        Commands::Version => {
            print_version(&cli.global);
            ExitCode::Clean
        }
    };

    log_event!(
        ctx,
        INFO,
        event_names::RUN_FINISHED,
        Stage::Report,
        "Finished",
        exit_code = exit_code.as_i32()
    );
    std::process::exit(exit_code.as_i32());
}

// ============================================================================
// Command implementations
// ============================================================================

fn config_options(global: &GlobalOpts) -> ConfigOptions {
    ConfigOptions {
        config_dir: global.config_dir.clone(),
        knowledge_path: global.knowledge.clone(),
        classifier_path: global.classifier.clone(),
    }
}

fn load(global: &GlobalOpts, ctx: &LogContext) -> Result<ResolvedConfig, ExitCode> {
    match load_config(&config_options(global)) {
        Ok(config) => {
            log_event!(
                ctx,
                DEBUG,
                event_names::CONFIG_LOADED,
                Stage::Init,
                "Configuration loaded",
                knowledge_source = tracing::field::display(&config.knowledge_source),
                settings_source = tracing::field::display(&config.settings_source)
            );
            Ok(config)
        }
        Err(e) => {
            log_event!(
                ctx,
                DEBUG,
                event_names::CONFIG_ERROR,
                Stage::Init,
                "Configuration rejected",
                error = tracing::field::display(&e)
            );
            Err(output_config_error(global, &e))
        }
    }
}

fn build_classifier(
    global: &GlobalOpts,
    ctx: &LogContext,
    table: WordTable,
    strategy: StrategyName,
    options: ClassifierOptions,
) -> Result<Classifier<WordTable>, ExitCode> {
    let classifier = Classifier::with_options(table, strategy_for(strategy), options)
        .map_err(|e| output_error(global, ExitCode::from(&e), &e.to_string()))?;
    log_event!(
        ctx,
        DEBUG,
        event_names::CLASSIFIER_BUILT,
        Stage::Build,
        "Classifier ready",
        strategy = tracing::field::display(strategy),
        words = classifier.word_classifiers().count()
    );
    Ok(classifier)
}

fn resolve_top_n(global: &GlobalOpts, requested: Option<usize>, default: usize) -> Result<usize, ExitCode> {
    match requested {
        Some(0) => Err(output_error(
            global,
            ExitCode::ArgsError,
            "--top-n must be at least 1",
        )),
        Some(n) => Ok(n),
        None => Ok(default),
    }
}

fn query(
    global: &GlobalOpts,
    ctx: &LogContext,
    args: &QueryArgs,
) -> Result<ClassificationReport, ExitCode> {
    let config = load(global, ctx)?;
    let top_n = resolve_top_n(global, args.top_n, config.settings.top_n)?;
    let strategy = args.strategy.unwrap_or(config.settings.strategy);
    let mut options = config.classifier_options();
    if let Some(selection) = args.selection {
        options.selection = selection;
    }

    let table = config
        .word_table()
        .map_err(|e| output_config_error(global, &e))?;
    let classifier = build_classifier(global, ctx, table, strategy, options)?;

    match ClassificationReport::build(&classifier, &args.words, top_n) {
        Ok(report) => {
            log_event!(
                ctx,
                INFO,
                event_names::QUERY_CLASSIFIED,
                Stage::Combine,
                "Query classified",
                category = tracing::field::debug(&report.category),
                selected = report.selected.len()
            );
            Ok(report)
        }
        Err(e) => {
            log_event!(
                ctx,
                INFO,
                event_names::QUERY_UNDECIDED,
                Stage::Combine,
                "No category could be chosen",
                error = tracing::field::display(&e)
            );
            Err(output_error(global, ExitCode::from(&e), &e.to_string()))
        }
    }
}

fn run_classify(global: &GlobalOpts, ctx: &LogContext, args: &QueryArgs) -> ExitCode {
    let report = match query(global, ctx, args) {
        Ok(report) => report,
        Err(code) => return code,
    };
    let code = if report.category.is_some() {
        ExitCode::Clean
    } else {
        ExitCode::Undecided
    };
    emit(global, &report).unwrap_or(code)
}

fn run_posterior(global: &GlobalOpts, ctx: &LogContext, args: &QueryArgs) -> ExitCode {
    match query(global, ctx, args) {
        Ok(report) => emit(global, &PosteriorReport::from(report)).unwrap_or(ExitCode::Clean),
        Err(code) => code,
    }
}

fn run_demo(global: &GlobalOpts, ctx: &LogContext, args: &DemoArgs) -> ExitCode {
    let config = match load(global, ctx) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let top_n = match resolve_top_n(global, args.top_n, config.settings.top_n) {
        Ok(n) => n,
        Err(code) => return code,
    };

    let mut classifiers = Vec::new();
    for strategy in [StrategyName::NaiveBayes, StrategyName::Fisher] {
        let options = config.classifier_options();
        match build_classifier(global, ctx, WordTable::reference(), strategy, options) {
            Ok(c) => classifiers.push(c),
            Err(code) => return code,
        }
    }

    let mut cases = Vec::with_capacity(DEMO_CORPUS.len());
    for words in DEMO_CORPUS {
        let words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let results: Result<Vec<_>, ProbError> = classifiers
            .iter()
            .map(|c| ClassificationReport::build(c, &words, top_n))
            .collect();
        match results {
            Ok(results) => cases.push(DemoCase { words, results }),
            Err(e) => return output_error(global, ExitCode::from(&e), &e.to_string()),
        }
    }

    let report = DemoReport {
        schema_version: OUTPUT_SCHEMA_VERSION.to_string(),
        cases,
    };
    emit(global, &report).unwrap_or(ExitCode::Clean)
}

fn run_words(global: &GlobalOpts, ctx: &LogContext, args: &WordsArgs) -> ExitCode {
    let config = match load(global, ctx) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let table = match config.word_table() {
        Ok(table) => table,
        Err(e) => return output_config_error(global, &e),
    };
    let classifier = match build_classifier(
        global,
        ctx,
        table,
        config.settings.strategy,
        config.classifier_options(),
    ) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let report = WordsReport::build(&classifier, args.order, args.limit);
    emit(global, &report).unwrap_or(ExitCode::Clean)
}

/// Display the current configuration (including defaults if no files present).
fn run_config_show(global: &GlobalOpts, ctx: &LogContext) -> ExitCode {
    let config = match load(global, ctx) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let snapshot = config.snapshot();

    match global.format {
        OutputFormat::Json => {
            let response = json!({
                "schema_version": OUTPUT_SCHEMA_VERSION,
                "source": snapshot,
                "knowledge": &config.knowledge,
                "settings": &config.settings,
            });
            print_json(&response)
        }
        OutputFormat::Summary => {
            println!(
                "knowledge: {} ({}); classifier: {} ({})",
                display_path(&snapshot.knowledge_path),
                snapshot.knowledge_source,
                display_path(&snapshot.settings_path),
                snapshot.settings_source
            );
            ExitCode::Clean
        }
        OutputFormat::Md => {
            println!("# Configuration\n");
            println!("## Knowledge\n");
            println!("- path: {}", display_path(&snapshot.knowledge_path));
            println!("- source: {}", snapshot.knowledge_source);
            println!("- categories: {}", snapshot.categories.join(", "));
            println!("- known words: {}\n", snapshot.known_words);
            println!("## Classifier\n");
            println!("- path: {}", display_path(&snapshot.settings_path));
            println!("- source: {}", snapshot.settings_source);
            println!("- strategy: {}", config.settings.strategy);
            println!("- top_n: {}", config.settings.top_n);
            println!("- selection: {}", config.settings.selection);
            ExitCode::Clean
        }
    }
}

fn run_config_validate(global: &GlobalOpts, ctx: &LogContext) -> ExitCode {
    let config = match load(global, ctx) {
        Ok(config) => config,
        Err(code) => return code,
    };
    let snapshot = config.snapshot();

    match global.format {
        OutputFormat::Json => print_json(&json!({
            "schema_version": OUTPUT_SCHEMA_VERSION,
            "status": "valid",
            "source": snapshot,
        })),
        OutputFormat::Summary | OutputFormat::Md => {
            println!(
                "valid: knowledge {} / classifier {}",
                display_path(&snapshot.knowledge_path),
                display_path(&snapshot.settings_path)
            );
            ExitCode::Clean
        }
    }
}

fn print_version(global: &GlobalOpts) {
    match global.format {
        OutputFormat::Json => {
            print_json(&json!({
                "schema_version": OUTPUT_SCHEMA_VERSION,
                "config_schema_version": sp_core::config::CONFIG_SCHEMA_VERSION,
                "spamplan_version": env!("CARGO_PKG_VERSION"),
                "rust_version": env!("CARGO_PKG_RUST_VERSION"),
            }));
        }
        _ => {
            println!("spamplan {}", env!("CARGO_PKG_VERSION"));
            println!("schema version: {}", OUTPUT_SCHEMA_VERSION);
        }
    }
}

// ============================================================================
// Output helpers
// ============================================================================

/// Print a report; `Some` carries the exit code when rendering failed.
fn emit<R: Report>(global: &GlobalOpts, report: &R) -> Option<ExitCode> {
    match report.render(global.format) {
        Ok(text) => {
            println!("{}", text.trim_end());
            None
        }
        Err(e) => Some(output_error(global, ExitCode::InternalError, &e.to_string())),
    }
}

fn print_json(value: &serde_json::Value) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::Clean
        }
        Err(_) => ExitCode::InternalError,
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map_or_else(|| "(built-in)".to_string(), |p| p.display().to_string())
}

fn output_config_error(global: &GlobalOpts, error: &ConfigError) -> ExitCode {
    output_error(global, ExitCode::from(error), &error.to_string())
}

fn output_error(global: &GlobalOpts, code: ExitCode, message: &str) -> ExitCode {
    match global.format {
        OutputFormat::Json => {
            let response = json!({
                "schema_version": OUTPUT_SCHEMA_VERSION,
                "status": "error",
                "error": {
                    "code": code.as_i32(),
                    "name": code.code_name(),
                    "message": message,
                }
            });
            match serde_json::to_string_pretty(&response) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("error: {}", message),
            }
        }
        OutputFormat::Summary => eprintln!("[{}] {}", code.code_name(), message),
        OutputFormat::Md => {
            eprintln!("# Error\n");
            eprintln!("{}: {}", code.code_name(), message);
        }
    }
    code
}
