use anyhow::Result;
use clap::Parser;
use langpm::commands::{self, ConfigOverrides, LocalizeArgs};
use std::path::PathBuf;

/// langpm - language package manager for offline machine translation
///
/// Installs translation packages for language pairs from a package index and
/// runs translations with the installed engine.
///
/// Examples:
///   langpm install en es              # Install the English → Spanish package
///   langpm translate en es "Hello"    # Translate a text
///   langpm localize ./my_mod --to fr  # Translate a mod's localization files
#[derive(Parser, Debug)]
#[command(author, version = env!("LANGPM_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory holding installed packages
    #[arg(
        long = "packages-dir",
        env = "ARGOS_PACKAGES_DIR",
        value_name = "PATH",
        global = true
    )]
    pub packages_dir: Option<PathBuf>,

    /// Package index URL; a URL ending in '/' gets index.json appended
    #[arg(
        long = "index-url",
        env = "ARGOS_PACKAGE_INDEX",
        value_name = "URL",
        global = true
    )]
    pub index_url: Option<String>,

    /// Translation engine program
    #[arg(
        long = "translator",
        env = "LANGPM_TRANSLATOR",
        value_name = "PROGRAM",
        global = true
    )]
    pub translator: Option<String>,

    /// Device for the translation engine (cpu, cuda, auto)
    #[arg(
        long = "device",
        env = "ARGOS_DEVICE_TYPE",
        value_name = "DEVICE",
        global = true
    )]
    pub device: Option<String>,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            packages_dir: self.packages_dir.clone(),
            index_url: self.index_url.clone(),
            translator: self.translator.clone(),
            device: self.device.clone(),
        }
    }
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Install the package for a language pair
    Install(PairArgs),

    /// Translate text from an argument or stdin
    Translate(TranslateArgs),

    /// List installed packages
    List,

    /// List packages offered by the package index
    Available,

    /// Remove an installed package
    Remove(PairArgs),

    /// Translate a mod's localization folder
    Localize(LocalizeCliArgs),
}

#[derive(clap::Args, Debug)]
pub struct PairArgs {
    /// Source language code, e.g. "en"
    #[arg(value_name = "FROM")]
    pub from: String,

    /// Target language code, e.g. "es"
    #[arg(value_name = "TO")]
    pub to: String,
}

#[derive(clap::Args, Debug)]
pub struct TranslateArgs {
    #[command(flatten)]
    pub pair: PairArgs,

    /// Text to translate; read from stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// Install the package first if it is missing
    #[arg(long)]
    pub install: bool,
}

#[derive(clap::Args, Debug)]
pub struct LocalizeCliArgs {
    /// Mod directory containing a "localization" folder
    #[arg(value_name = "MOD_DIR")]
    pub mod_dir: PathBuf,

    /// Source language code
    #[arg(long, default_value = "en")]
    pub from: String,

    /// Target language code
    #[arg(long, default_value = "es")]
    pub to: String,

    /// Only copy and rename files, keep the texts
    #[arg(long = "no-translate")]
    pub no_translate: bool,

    /// Overwrite an existing target folder without asking
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Install the package first if it is missing
    #[arg(long)]
    pub install: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let runtime = langpm::runtime::RealRuntime;
    let overrides = cli.overrides();

    match cli.command {
        Commands::Install(args) => {
            commands::install(runtime, overrides, &args.from, &args.to).await?
        }
        Commands::Translate(args) => {
            commands::translate(
                runtime,
                overrides,
                &args.pair.from,
                &args.pair.to,
                args.text,
                args.install,
            )
            .await?
        }
        Commands::List => commands::list(runtime, overrides)?,
        Commands::Available => commands::available(runtime, overrides).await?,
        Commands::Remove(args) => commands::remove(runtime, overrides, &args.from, &args.to)?,
        Commands::Localize(args) => {
            let args = LocalizeArgs {
                mod_dir: args.mod_dir,
                source_code: args.from,
                target_code: args.to,
                no_translate: args.no_translate,
                assume_yes: args.yes,
                install: args.install,
            };
            commands::localize(runtime, overrides, args).await?
        }
    }
    Ok(())
}
