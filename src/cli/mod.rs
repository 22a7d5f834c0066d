pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, OutputFormatArg, PackageManagerArg};
pub use output::{OutputFormat, OutputFormatter, SetupReport};
