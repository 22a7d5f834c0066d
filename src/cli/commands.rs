use crate::package_manager::PackageManager;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Wire Tailwind CSS and PostCSS into an existing web application project
#[derive(Parser, Debug)]
#[command(
    name = "tailwind-setup",
    about = "Wire Tailwind CSS and PostCSS into an existing web application project",
    version,
    long_about = "tailwind-setup adds tailwindcss and postcss to package.json, creates \
                  .postcssrc.json and tailwind.config.js when they are missing, prepends the \
                  Tailwind import to src/styles.css and installs the new packages.\n\n\
                  Examples:\n  \
                  tailwind-setup\n  \
                  tailwind-setup /path/to/app\n  \
                  tailwind-setup --dry-run --format json\n  \
                  tailwind-setup --package-manager pnpm --skip-install"
)]
pub struct CliArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project root (defaults to current directory)"
    )]
    pub project_path: Option<PathBuf>,

    #[arg(
        short = 'n',
        long,
        help = "Show the changes that would be made without writing anything"
    )]
    pub dry_run: bool,

    #[arg(long, help = "Do not run the package install after writing files")]
    pub skip_install: bool,

    #[arg(
        short = 'p',
        long,
        value_enum,
        help = "Package manager for the install step (detected from the project by default)"
    )]
    pub package_manager: Option<PackageManagerArg>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Verbose logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
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

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManagerArg {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl From<PackageManagerArg> for PackageManager {
    fn from(arg: PackageManagerArg) -> Self {
        match arg {
            PackageManagerArg::Npm => PackageManager::Npm,
            PackageManagerArg::Yarn => PackageManager::Yarn,
            PackageManagerArg::Pnpm => PackageManager::Pnpm,
            PackageManagerArg::Bun => PackageManager::Bun,
        }
    }
}
