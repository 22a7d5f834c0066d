use tailwind_setup::cli::commands::CliArgs;
use tailwind_setup::cli::handlers::handle_setup;
use tailwind_setup::util::logging::parse_level;
use tailwind_setup::util::{init_logging, LoggingConfig};
use tailwind_setup::VERSION;

use clap::Parser;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(logging_config_from_args(&args));

    debug!("tailwind-setup v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = handle_setup(&args).await;
    std::process::exit(exit_code);
}

fn logging_config_from_args(args: &CliArgs) -> LoggingConfig {
    let env_config = LoggingConfig::from_env();
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        env_config.level
    };

    LoggingConfig {
        level,
        ..env_config
    }
}
