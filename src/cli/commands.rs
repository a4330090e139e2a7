use crate::dictionary::OptionCategory;
use crate::syntax::SyntaxId;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect Sentry SDK initialization snippets
#[derive(Parser, Debug)]
#[command(
    name = "initscope",
    about = "Extract and review Sentry SDK initialization options",
    version,
    author,
    long_about = "initscope reads a Sentry SDK initialization snippet written in any supported \
                  language, extracts the configured options, and reviews them against a \
                  dictionary of known options with diagnostics, recommendations and a \
                  health score."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Analyze an initialization snippet",
        long_about = "Extracts options from a snippet and reports diagnostics, recommendations \
                      and a 0-100 health score.\n\n\
                      Examples:\n  \
                      initscope analyze sentry.js\n  \
                      initscope analyze --syntax python < settings.py\n  \
                      initscope analyze init.go --format json --fail-under 80"
    )]
    Analyze(AnalyzeArgs),

    #[command(
        about = "Extract options without analysis",
        long_about = "Prints the options found in a snippet, keyed by their spelling in the \
                      snippet.\n\n\
                      Examples:\n  \
                      initscope extract config/initializers/sentry.rb\n  \
                      initscope extract --syntax kotlin --format yaml"
    )]
    Extract(ExtractArgs),

    #[command(
        about = "Browse the option dictionary",
        long_about = "Lists known SDK options with their types, defaults and guidance.\n\n\
                      Examples:\n  \
                      initscope options --category sampling\n  \
                      initscope options --search replay --syntax javascript"
    )]
    Options(OptionsArgs),

    #[command(about = "List supported syntaxes and their initialization idioms")]
    Syntaxes(SyntaxesArgs),

    #[command(
        about = "Show the effective configuration",
        long_about = "Prints the settings read from INITSCOPE_* environment variables, \
                      with defaults filled in."
    )]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct InputArgs {
    #[arg(
        value_name = "FILE",
        help = "Snippet file to read (reads stdin when omitted or '-')"
    )]
    pub file: Option<PathBuf>,

    #[arg(
        short = 's',
        long,
        value_parser = parse_syntax,
        help = "Syntax of the snippet (guessed from the file extension when omitted)"
    )]
    pub syntax: Option<SyntaxId>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[arg(
        long,
        value_name = "SCORE",
        value_parser = clap::value_parser!(u8).range(0..=100),
        help = "Exit with status 2 when the score is below this value"
    )]
    pub fail_under: Option<u8>,
}

#[derive(Parser, Debug, Clone)]
pub struct ExtractArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct OptionsArgs {
    #[arg(short = 'c', long, value_parser = parse_category, help = "Only options in this category")]
    pub category: Option<OptionCategory>,

    #[arg(long, value_name = "TERM", help = "Case-insensitive search over key, name and description")]
    pub search: Option<String>,

    #[arg(long, help = "Only required options")]
    pub required: bool,

    #[arg(
        short = 's',
        long,
        value_parser = parse_syntax,
        help = "Only options available in this syntax, shown in its spelling"
    )]
    pub syntax: Option<SyntaxId>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct SyntaxesArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_syntax(s: &str) -> Result<SyntaxId, String> {
    s.parse::<SyntaxId>()
}

fn parse_category(s: &str) -> Result<OptionCategory, String> {
    s.parse::<OptionCategory>()
}
