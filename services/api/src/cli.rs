use crate::commands::{
    run_find, run_latest, run_list, run_show, FindArgs, LatestArgs, ListArgs, ShowArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use speech_report::config::AppConfig;
use speech_report::error::AppError;
use speech_report::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "speech-report",
    about = "Report the latest speech of each politician in a parliamentary export",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect speeches held in a politician export
    Speeches {
        #[command(subcommand)]
        command: SpeechesCommand,
    },
    /// Look up politicians in an export
    Politicians {
        #[command(subcommand)]
        command: PoliticiansCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SpeechesCommand {
    /// Show the date of the most recent speech per politician
    Latest(LatestArgs),
    /// List speeches with their authors
    List(ListArgs),
    /// Show a single speech by hash
    Show(ShowArgs),
}

#[derive(Subcommand, Debug)]
enum PoliticiansCommand {
    /// Find a politician by name, retrying with name and surname swapped
    Find(FindArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args, config).await,
        Command::Speeches { command } => match command {
            SpeechesCommand::Latest(args) => run_latest(args, &config),
            SpeechesCommand::List(args) => run_list(args, &config),
            SpeechesCommand::Show(args) => run_show(args, &config),
        },
        Command::Politicians {
            command: PoliticiansCommand::Find(args),
        } => run_find(args, &config),
    }
}
