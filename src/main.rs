use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use raffle_cog::{
    collaborators::{ParticipantRef, RaffleUpload},
    process_command,
    raffle_instruction::RaffleCommand,
    settings::Settings,
    terminal::TerminalHost,
};
use tracing::{info_span, Instrument};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional configuration file to use. If present the toml file at the
    /// given path will be loaded. Environment variables can override the
    /// settings in the given file.
    #[arg(short = 'c')]
    pub config: Option<PathBuf>,

    /// Directory updated raffle files are written to
    #[arg(long, env = "RAFFLE_OUT_DIR", default_value = ".")]
    pub out_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a raffle.
    Create {
        /// The prize of the raffle.
        #[arg(long)]
        prize: String,
        /// The number of winners.
        #[arg(long, allow_negative_numbers = true)]
        winners: i64,
    },
    /// Add a participant to a raffle.
    AddParticipant {
        /// The raffle file.
        #[arg(long)]
        raffle: PathBuf,
        /// The participant to add.
        #[arg(long)]
        participant: String,
        /// The amount of entries.
        #[arg(long, allow_negative_numbers = true)]
        amount: i64,
    },
    /// Remove a participant from a raffle.
    RemoveParticipant {
        /// The raffle file.
        #[arg(long)]
        raffle: PathBuf,
        /// The participant to remove.
        #[arg(long)]
        participant: String,
    },
    /// Draw the winners of a raffle.
    Draw {
        /// The raffle file.
        #[arg(long)]
        raffle: PathBuf,
    },
}

fn upload(path: PathBuf) -> RaffleUpload {
    RaffleUpload(path.to_string_lossy().into_owned())
}

impl From<Command> for RaffleCommand {
    fn from(command: Command) -> Self {
        match command {
            Command::Create { prize, winners } => RaffleCommand::Create { prize, winners },
            Command::AddParticipant {
                raffle,
                participant,
                amount,
            } => RaffleCommand::AddParticipant {
                raffle: upload(raffle),
                participant: ParticipantRef(participant),
                amount,
            },
            Command::RemoveParticipant {
                raffle,
                participant,
            } => RaffleCommand::RemoveParticipant {
                raffle: upload(raffle),
                participant: ParticipantRef(participant),
            },
            Command::Draw { raffle } => RaffleCommand::Draw {
                raffle: upload(raffle),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new(cli.config.as_ref())?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&settings.log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let host = TerminalHost::new(cli.out_dir, settings.create_command_id);
    let command = RaffleCommand::from(cli.command);

    let span = info_span!("raffle", command = command.name());
    process_command(&host, &settings, command)
        .instrument(span)
        .await?;
    Ok(())
}
