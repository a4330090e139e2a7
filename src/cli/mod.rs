pub mod commands;
pub mod output;

pub use commands::{AnalyzeArgs, CliArgs, Commands, ConfigArgs, ExtractArgs, InputArgs, OptionsArgs, SyntaxesArgs};
pub use output::{OptionEntry, OutputFormat, OutputFormatter, SyntaxInfo};
