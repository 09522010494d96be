use thiserror::Error;

/// Errors that may be returned by the raffle commands
#[derive(Error, Debug)]
pub enum RaffleError {
    /// The uploaded blob is not a raffle record
    #[error("Malformed raffle record: {0}")]
    MalformedRecord(#[from] serde_json::Error),

    /// The record could not be encoded for hand-back
    #[error("Could not encode raffle record: {0}")]
    EncodeRecord(serde_json::Error),

    /// Remove target is not in the raffle
    #[error("Participant {0} is not in the raffle")]
    ParticipantNotFound(String),

    /// Draw requested on a raffle with nobody in it
    #[error("There are no participants in the raffle")]
    EmptyParticipants,

    /// Fewer distinct participants than winner slots
    #[error("Not enough participants: {participants} for {winners} winners")]
    InsufficientParticipants { participants: usize, winners: u32 },

    /// Every participant holds zero entries
    #[error("No entries to draw from")]
    NoEntries,

    /// Winner count outside of 1..=10
    #[error("Winner count must be between {min} and {max}, got {got}")]
    InvalidWinnerCount { got: i64, min: u32, max: u32 },

    /// Entry amount is not a positive integer
    #[error("Entry amount must be a positive integer, got {0}")]
    InvalidEntryAmount(i64),

    /// Reading the upload or writing the response failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The chat host rejected a send or edit
    #[error("Transport error: {0}")]
    Transport(String),
}

impl RaffleError {
    /// Errors that are shown to the user as a plain notice rather than aborting the command
    pub fn is_user_facing(&self) -> bool {
        !matches!(
            self,
            RaffleError::EncodeRecord(_) | RaffleError::Io(_) | RaffleError::Transport(_)
        )
    }
}

pub type RaffleResult<T> = Result<T, RaffleError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error() -> serde_json::Error {
        serde_json::from_str::<u32>("not a number").unwrap_err()
    }

    #[test]
    fn test_encode_failure_is_not_a_malformed_file() {
        let parse: RaffleError = json_error().into();
        assert!(matches!(parse, RaffleError::MalformedRecord(_)));
        assert!(parse.is_user_facing());

        let encode = RaffleError::EncodeRecord(json_error());
        assert!(!encode.is_user_facing());
    }
}
