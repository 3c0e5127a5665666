use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use component_index_core::config::{Config, LOCAL_CONFIG_FILE};
use component_index_core::indexer::{ErrorPolicy, Indexer};
use component_index_core::{IndexError, IndexReport, Result};

mod args;
use args::{Cli, Commands, ConfigAction, OutputFormat, ScanArgs, Shell};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    let root = resolve_root(cli.root);
    let config_path = resolve_config_path(cli.config, &root);

    let result = match cli.command {
        Some(Commands::Categories) => handle_categories(config_path.as_deref()),
        Some(Commands::Config { action }) => handle_config(action, &root, config_path.as_deref()),
        Some(Commands::Completions { shell }) => {
            handle_completions(shell);
            Ok(())
        }
        Some(Commands::Scan) | None => {
            handle_scan(&root, config_path.as_deref(), &cli.scan, cli.quiet)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "[ERROR]".red().bold(), e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "off"
    } else {
        "error"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn handle_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let shell = match shell {
        Shell::Bash => clap_complete::Shell::Bash,
        Shell::Zsh => clap_complete::Shell::Zsh,
        Shell::Fish => clap_complete::Shell::Fish,
        Shell::PowerShell => clap_complete::Shell::PowerShell,
        Shell::Elvish => clap_complete::Shell::Elvish,
    };
    generate(shell, &mut cmd, "component-index", &mut io::stdout());
}

fn resolve_root(cli_root: Option<PathBuf>) -> PathBuf {
    if let Some(root) = cli_root {
        return root;
    }

    if let Ok(root) = std::env::var("COMPONENT_INDEX_ROOT") {
        return PathBuf::from(root);
    }

    PathBuf::from(".")
}

/// Priority: --config > $COMPONENT_INDEX_CONFIG > <root>/component-index.toml > user config
fn resolve_config_path(cli_config: Option<PathBuf>, root: &Path) -> Option<PathBuf> {
    if let Some(path) = cli_config {
        return Some(path);
    }

    if let Ok(path) = std::env::var("COMPONENT_INDEX_CONFIG") {
        return Some(PathBuf::from(path));
    }

    Config::discover(root)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            Config::load(path)
        }
        None => Ok(Config::default()),
    }
}

fn handle_scan(
    root: &Path,
    config_path: Option<&Path>,
    args: &ScanArgs,
    quiet: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let store = config.category_store().retain_only(&args.only)?;

    // CLI options override config file
    let policy = if args.keep_going {
        ErrorPolicy::Skip
    } else {
        config.scan.on_error
    };

    let indexer = Indexer::new(&store, root)?.with_policy(policy);
    debug!(root = %indexer.root().display(), policy = ?indexer.policy(), "scanning");
    let report = indexer.scan()?;

    if !quiet {
        for skipped in report.skipped() {
            eprintln!(
                "{} {} skipped: {}",
                "[WARN]".yellow().bold(),
                skipped.name,
                skipped.skipped.as_deref().unwrap_or_default()
            );
        }
    }

    print_report(&report, args.format)
}

fn print_report(report: &IndexReport, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let written = match format {
        OutputFormat::Text => report.render_text(&mut out),
        OutputFormat::Json => writeln!(out, "{}", report.to_json()?),
    };
    written
        .and_then(|()| out.flush())
        .map_err(|e| IndexError::Io {
            path: PathBuf::from("<stdout>"),
            source: e,
        })
}

fn handle_categories(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let store = config.category_store();

    if store.is_empty() {
        println!("No categories defined.");
        return Ok(());
    }

    println!();
    for category in store.all() {
        println!("{}", category.name.cyan().bold());
        for pattern in &category.patterns {
            println!("  {}", pattern);
        }
        println!();
    }

    Ok(())
}

fn handle_config(action: ConfigAction, root: &Path, config_path: Option<&Path>) -> Result<()> {
    match action {
        ConfigAction::Path => match config_path {
            Some(path) => println!("{}", path.display()),
            None => println!("{}", "(none, using builtin categories)".dimmed()),
        },
        ConfigAction::Init { local } => {
            let target = if local {
                root.join(LOCAL_CONFIG_FILE)
            } else {
                Config::user_path().unwrap_or_else(|| root.join(LOCAL_CONFIG_FILE))
            };
            let path = Config::init(&target)?;
            println!("{} {}", "Initialized:".green(), path.display());
        }
    }

    Ok(())
}
