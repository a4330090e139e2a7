use initscope::analysis::Analyzer;
use initscope::cli::commands::{AnalyzeArgs, CliArgs, Commands, ConfigArgs, ExtractArgs, InputArgs, OptionsArgs, SyntaxesArgs};
use initscope::cli::output::{OptionEntry, OutputFormat, OutputFormatter};
use initscope::config::InitscopeConfig;
use initscope::dictionary::OptionDictionary;
use initscope::extract::{ConfigExtractor, ExtractionResult};
use initscope::syntax::{SyntaxId, SyntaxRegistry};
use initscope::util::logging::{self, LoggingConfig};
use initscope::{NAME, VERSION};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process;
use std::sync::Arc;
use tracing::{debug, error, info};

fn main() {
    let args = CliArgs::parse();
    let config = match InitscopeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_logging_from_args(&args, &InitscopeConfig::default());
            error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };
    init_logging_from_args(&args, &config);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Analyze(analyze_args) => handle_analyze(analyze_args, &config),
        Commands::Extract(extract_args) => handle_extract(extract_args, &config),
        Commands::Options(options_args) => handle_options(options_args),
        Commands::Syntaxes(syntaxes_args) => handle_syntaxes(syntaxes_args),
        Commands::Config(config_args) => handle_config(config_args, &config),
    };

    process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs, config: &InitscopeConfig) {
    let fallback = logging::parse_level(&config.log_level);
    let level = logging::resolve_level(args.log_level.as_deref(), args.verbose, args.quiet, fallback);
    logging::init_logging(LoggingConfig {
        level,
        ..LoggingConfig::from_config(config)
    });
}

fn handle_analyze(args: &AnalyzeArgs, config: &InitscopeConfig) -> i32 {
    let registry = Arc::new(SyntaxRegistry::with_defaults());
    let (syntax, extraction) = match run_extraction(&args.input, &registry, config) {
        Ok(found) => found,
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };

    let dictionary = match OptionDictionary::with_defaults().context("Failed to build option dictionary") {
        Ok(dictionary) => Arc::new(dictionary),
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };
    let analyzer = Analyzer::new(dictionary).with_registry(registry);
    let result = analyzer.analyze(&extraction, syntax);
    info!(
        syntax = %syntax,
        valid = result.valid,
        score = ?result.score,
        errors = result.error_count(),
        warnings = result.warning_count(),
        "analysis complete"
    );

    let formatter = OutputFormatter::new(OutputFormat::from(args.input.format));
    if let Err(code) = print(formatter.format_analysis(&result)) {
        return code;
    }

    if !result.valid {
        return 1;
    }
    match (args.fail_under, result.score) {
        (Some(threshold), Some(score)) if score < threshold => {
            info!(score, threshold, "score is below --fail-under");
            2
        }
        _ => 0,
    }
}

fn handle_extract(args: &ExtractArgs, config: &InitscopeConfig) -> i32 {
    let registry = Arc::new(SyntaxRegistry::with_defaults());
    let extraction = match run_extraction(&args.input, &registry, config) {
        Ok((_, extraction)) => extraction,
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };

    let formatter = OutputFormatter::new(OutputFormat::from(args.input.format));
    if let Err(code) = print(formatter.format_extraction(&extraction)) {
        return code;
    }
    if extraction.valid {
        0
    } else {
        1
    }
}

fn handle_options(args: &OptionsArgs) -> i32 {
    let dictionary = match OptionDictionary::with_defaults().context("Failed to build option dictionary") {
        Ok(dictionary) => dictionary,
        Err(e) => {
            error!("{:#}", e);
            return 1;
        }
    };
    let registry = SyntaxRegistry::with_defaults();
    let syntax = args.syntax.and_then(|id| registry.get(id));

    let mut options = match &args.search {
        Some(term) => dictionary.search(term),
        None => dictionary.iter().collect(),
    };
    if let Some(category) = args.category {
        options.retain(|o| o.category == category);
    }
    if args.required {
        options.retain(|o| o.required);
    }
    if let Some(id) = args.syntax {
        options.retain(|o| o.applies_to(id));
    }
    debug!(count = options.len(), "listing dictionary options");

    let entries: Vec<OptionEntry<'_>> = options
        .into_iter()
        .map(|option| OptionEntry {
            option,
            native_key: syntax.map(|s| s.descriptor().native_key(&option.key)),
        })
        .collect();

    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    match print(formatter.format_options(&entries)) {
        Ok(()) => 0,
        Err(code) => code,
    }
}

fn handle_syntaxes(args: &SyntaxesArgs) -> i32 {
    let registry = SyntaxRegistry::with_defaults();
    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    match print(formatter.format_syntaxes(&registry)) {
        Ok(()) => 0,
        Err(code) => code,
    }
}

fn handle_config(args: &ConfigArgs, config: &InitscopeConfig) -> i32 {
    let formatter = OutputFormatter::new(OutputFormat::from(args.format));
    match print(formatter.format_config(config)) {
        Ok(()) => 0,
        Err(code) => code,
    }
}

fn run_extraction(
    input: &InputArgs,
    registry: &Arc<SyntaxRegistry>,
    config: &InitscopeConfig,
) -> Result<(SyntaxId, ExtractionResult)> {
    let syntax = resolve_syntax(input, registry)?;
    let text = read_input(input.file.as_deref())?;
    debug!(syntax = %syntax, bytes = text.len(), "read snippet");

    let extractor = ConfigExtractor::with_registry(Arc::clone(registry)).with_limits(config.to_limits());
    Ok((syntax, extractor.extract(syntax, &text)))
}

fn resolve_syntax(input: &InputArgs, registry: &SyntaxRegistry) -> Result<SyntaxId> {
    if let Some(syntax) = input.syntax {
        return Ok(syntax);
    }
    let extension = input
        .file
        .as_deref()
        .filter(|path| path.as_os_str() != "-")
        .and_then(|path| path.extension())
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| anyhow!("Cannot guess the syntax of stdin input; pass --syntax"))?;

    let syntax = registry
        .detect_by_extension(extension)
        .ok_or_else(|| anyhow!("Unrecognized file extension '.{}'; pass --syntax", extension))?;
    debug!(extension, syntax = %syntax, "guessed syntax from extension");
    Ok(syntax)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            if !path.exists() {
                return Err(anyhow!("Path does not exist: {}", path.display()));
            }
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read snippet from stdin")?;
            Ok(text)
        }
    }
}

fn print(formatted: Result<String>) -> std::result::Result<(), i32> {
    match formatted {
        Ok(output) => {
            println!("{}", output.trim_end());
            Ok(())
        }
        Err(e) => {
            error!("{:#}", e);
            Err(1)
        }
    }
}
