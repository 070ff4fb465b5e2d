use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "routinely", version, about = "Morning routine planner CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Routine step management
    Step {
        #[command(subcommand)]
        action: commands::step::StepAction,
    },
    /// Wake-up time
    Wakeup {
        #[command(subcommand)]
        action: commands::wakeup::WakeupAction,
    },
    /// Print today's progress summary as JSON
    Progress,
    /// Completion calendar and streaks
    Calendar {
        #[command(subcommand)]
        action: commands::calendar::CalendarAction,
    },
    /// Built-in routine templates
    Template {
        #[command(subcommand)]
        action: commands::template::TemplateAction,
    },
    /// Step countdown timer
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Export, share and clear routine data
    Data {
        #[command(subcommand)]
        action: commands::data::DataAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("ROUTINELY_LOG")
        .unwrap_or_else(|_| EnvFilter::new("warn,routinely::notify=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Step { action } => commands::step::run(action),
        Commands::Wakeup { action } => commands::wakeup::run(action),
        Commands::Progress => commands::progress::run(),
        Commands::Calendar { action } => commands::calendar::run(action),
        Commands::Template { action } => commands::template::run(action),
        Commands::Timer { action } => commands::timer::run(action),
        Commands::Data { action } => commands::data::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
