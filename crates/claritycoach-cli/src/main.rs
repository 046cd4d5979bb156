use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "claritycoach", version, about = "ClarityCoach CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send one chat turn in the persistent CLI session
    Chat(commands::chat::ChatArgs),
    /// Classify texts offline and print labels as JSON
    Classify {
        /// Texts to classify
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Focus timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Journal entries, streak, and weekly summary
    Journal {
        #[command(subcommand)]
        action: commands::journal::JournalAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("CLARITYCOACH_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Chat(args) => commands::chat::run(args),
        Commands::Classify { texts } => commands::classify::run(&texts),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Journal { action } => commands::journal::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "claritycoach", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
