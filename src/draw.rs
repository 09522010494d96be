// Weighted winner selection for raffle draws
use rand::Rng;
use tracing::debug;

use crate::raffle_error::{RaffleError, RaffleResult};
use crate::raffle_state::RaffleRecord;

/// Check the draw preconditions, in the order they are reported to the user
pub fn check_drawable(raffle: &RaffleRecord) -> RaffleResult<()> {
    if raffle.participants.is_empty() {
        return Err(RaffleError::EmptyParticipants);
    }

    if raffle.participant_count() < raffle.winners as usize {
        return Err(RaffleError::InsufficientParticipants {
            participants: raffle.participant_count(),
            winners: raffle.winners,
        });
    }

    if raffle.total_entries() == 0 {
        return Err(RaffleError::NoEntries);
    }

    Ok(())
}

/// Find who holds a ticket. Tickets are numbered in participant key order,
/// each participant owning a run as long as their entry count.
pub fn get_ticket_owner(raffle: &RaffleRecord, ticket: u128) -> Option<&str> {
    let mut upper = 0u128;
    for (participant, entries) in &raffle.participants {
        upper += u128::from(*entries);
        if ticket < upper {
            return Some(participant.as_str());
        }
    }
    None
}

/// Draw `raffle.winners` participants, weighted by entries.
///
/// Every slot is an independent draw over the full pool, so the same
/// participant can fill more than one slot. The result is in draw order.
pub fn draw<R: Rng>(raffle: &RaffleRecord, rng: &mut R) -> RaffleResult<Vec<String>> {
    check_drawable(raffle)?;

    let total_tickets = raffle.total_entries();
    let mut winners = Vec::with_capacity(raffle.winners as usize);

    for _ in 0..raffle.winners {
        let ticket = rng.random_range(0..total_tickets);
        let owner = get_ticket_owner(raffle, ticket).ok_or(RaffleError::NoEntries)?;
        debug!("Ticket {} of {} drawn, owner {}", ticket, total_tickets, owner);
        winners.push(owner.to_string());
    }

    Ok(winners)
}

/// Draw with the thread-local generator
pub fn draw_winners(raffle: &RaffleRecord) -> RaffleResult<Vec<String>> {
    draw(raffle, &mut rand::rng())
}
