use crate::collaborators::{ParticipantRef, RaffleUpload};
use crate::raffle_error::{RaffleError, RaffleResult};

/// Smallest number of winners a raffle can be created with
pub const MIN_WINNERS: u32 = 1;
/// Largest number of winners a raffle can be created with
pub const MAX_WINNERS: u32 = 10;

/// The `/raffle` command group
///
/// Integer options arrive as the host parsed them and are checked by the
/// processor before anything else happens.
#[derive(Clone, Debug, PartialEq)]
pub enum RaffleCommand {
    /// Create a raffle
    ///
    /// Options:
    /// 0. `prize` The prize of the raffle
    /// 1. `winners` The number of winners, 1 to 10
    Create { prize: String, winners: i64 },

    /// Add a participant to a raffle, or change their entries
    ///
    /// Options:
    /// 0. `raffle` The raffle file
    /// 1. `participant` The member to add
    /// 2. `amount` The amount of entries
    AddParticipant {
        raffle: RaffleUpload,
        participant: ParticipantRef,
        amount: i64,
    },

    /// Remove a participant from a raffle
    ///
    /// Options:
    /// 0. `raffle` The raffle file
    /// 1. `participant` The member to remove
    RemoveParticipant {
        raffle: RaffleUpload,
        participant: ParticipantRef,
    },

    /// Draw the winners of a raffle
    ///
    /// Options:
    /// 0. `raffle` The raffle file
    Draw { raffle: RaffleUpload },
}

impl RaffleCommand {
    /// Subcommand name as registered with the host
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::AddParticipant { .. } => "add_participant",
            Self::RemoveParticipant { .. } => "remove_participant",
            Self::Draw { .. } => "draw",
        }
    }

    /// Description shown by the host next to the subcommand
    pub fn description(&self) -> &'static str {
        match self {
            Self::Create { .. } => "Create a raffle.",
            Self::AddParticipant { .. } => "Add a participant to a raffle.",
            Self::RemoveParticipant { .. } => "Remove a participant from a raffle.",
            Self::Draw { .. } => "Draw the winners of a raffle.",
        }
    }
}

pub fn validate_winners(winners: i64) -> RaffleResult<u32> {
    match u32::try_from(winners) {
        Ok(count) if (MIN_WINNERS..=MAX_WINNERS).contains(&count) => Ok(count),
        _ => Err(RaffleError::InvalidWinnerCount {
            got: winners,
            min: MIN_WINNERS,
            max: MAX_WINNERS,
        }),
    }
}

/// Entry amounts must be at least one ticket
pub fn validate_amount(amount: i64) -> RaffleResult<u64> {
    match u64::try_from(amount) {
        Ok(entries) if entries > 0 => Ok(entries),
        _ => Err(RaffleError::InvalidEntryAmount(amount)),
    }
}
