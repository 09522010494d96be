// Raffle commands for chat bots
// The raffle lives in a JSON file the users pass back with every command

// Raffle modules
pub mod raffle_error;
pub mod raffle_instruction;
pub mod raffle_processor;
pub mod raffle_state;

// Weighted draw and its reveal
pub mod announcement;
pub mod draw;

// Host side
pub mod collaborators;
pub mod settings;
pub mod terminal;

use settings::Settings;
use raffle_error::RaffleResult;
use raffle_instruction::RaffleCommand;
use raffle_processor::{Processor, RaffleHost};

/// Entry point for hosts: run one `/raffle` command against `host`
pub async fn process_command<H: RaffleHost>(
    host: &H,
    settings: &Settings,
    command: RaffleCommand,
) -> RaffleResult<()> {
    Processor::new(host, settings).process(command).await
}
