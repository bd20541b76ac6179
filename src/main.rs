use anyhow::anyhow;
use caltrack::application::{init, open_tracker, ConfigService};
use caltrack::cli::session::parse_calories;
use caltrack::cli::{format_summary, Cli, Commands, Session};
use caltrack::error::CaltrackError;
use caltrack::infrastructure::FileSystemRepository;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

/// Log to stderr. CALTRACK_LOG takes precedence over -v flags.
fn init_logging(verbose: u8) -> anyhow::Result<()> {
    let filter = match std::env::var("CALTRACK_LOG") {
        Ok(directives) => EnvFilter::try_new(directives)?,
        Err(_) => {
            let level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            EnvFilter::new(format!("caltrack={}", level))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {}", e))
}

fn run(cli: Cli) -> Result<(), CaltrackError> {
    match cli.command {
        Some(Commands::Init { path, limit }) => init(&path, limit),
        Some(Commands::Config { key, value, list }) => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("default_limit = {}", config.default_limit);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: caltrack config [--list | <key> [<value>]]");
                println!("Valid keys: default_limit, created");
                Ok(())
            }
        }
        Some(Commands::Limit { value }) => {
            let repo = FileSystemRepository::discover()?;
            let mut tracker = open_tracker(&repo)?;

            match value {
                Some(value) => {
                    let limit = parse_calories(&value)?;
                    tracker.set_limit(limit)?;
                    println!("Calorie limit set to {}", limit);
                }
                None => println!("{}", tracker.limit()),
            }
            Ok(())
        }
        Some(Commands::Status) => {
            let repo = FileSystemRepository::discover()?;
            let tracker = open_tracker(&repo)?;
            print!("{}", format_summary(&tracker.summary()));
            Ok(())
        }
        Some(Commands::Reset) => {
            let repo = FileSystemRepository::discover()?;
            let mut tracker = open_tracker(&repo)?;
            tracker.reset()?;
            println!("Tracker reset");
            Ok(())
        }
        Some(Commands::Session) => {
            let repo = FileSystemRepository::discover()?;
            let mut session = Session::new(open_tracker(&repo)?);
            let stdin = std::io::stdin();
            session.run(stdin.lock(), std::io::stdout().lock())
        }
        None => {
            println!("caltrack - Daily calorie and workout tracker");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}
