use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::raffle_error::{RaffleError, RaffleResult};

/// Raffle record, the whole state of a raffle between two commands
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct RaffleRecord {
    /// What the winners get
    pub prize: String,
    /// Number of winner slots filled by a draw
    pub winners: u32,
    /// Participant ID to number of entries held
    pub participants: BTreeMap<String, u64>,
}

impl RaffleRecord {
    /// Create a new raffle with nobody in it
    pub fn create(prize: impl Into<String>, winners: u32) -> Self {
        Self {
            prize: prize.into(),
            winners,
            participants: BTreeMap::new(),
        }
    }

    /// Parse an uploaded blob. Any shape other than the exact record is rejected.
    pub fn deserialize(src: &[u8]) -> RaffleResult<Self> {
        Ok(serde_json::from_slice(src)?)
    }

    /// Encode the record back to the bytes `deserialize` reads
    pub fn serialize(&self) -> RaffleResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(RaffleError::EncodeRecord)
    }

    /// Set the entries of a participant, replacing whatever they held before
    pub fn add_participant(mut self, participant_id: impl Into<String>, amount: u64) -> Self {
        self.participants.insert(participant_id.into(), amount);
        self
    }

    /// Drop a participant and all their entries
    pub fn remove_participant(mut self, participant_id: &str) -> RaffleResult<Self> {
        if self.participants.remove(participant_id).is_none() {
            return Err(RaffleError::ParticipantNotFound(participant_id.to_string()));
        }
        Ok(self)
    }

    /// Number of distinct participants, regardless of entries
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Total tickets in the pool, summed in u128
    pub fn total_entries(&self) -> u128 {
        self.participants
            .values()
            .map(|entries| u128::from(*entries))
            .sum()
    }

    /// Entries held by a participant, `None` if they are not in the raffle
    pub fn entries_for(&self, participant_id: &str) -> Option<u64> {
        self.participants.get(participant_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_has_no_participants() {
        let raffle = RaffleRecord::create("Gift Card", 3);
        assert_eq!(raffle.prize, "Gift Card");
        assert_eq!(raffle.winners, 3);
        assert!(raffle.participants.is_empty());
    }

    #[test]
    fn test_round_trip() {
        let raffle = RaffleRecord::create("Gift Card", 2)
            .add_participant("1234", 5)
            .add_participant("5678", 1);

        let bytes = raffle.serialize().unwrap();
        assert_eq!(RaffleRecord::deserialize(&bytes).unwrap(), raffle);
    }

    #[test]
    fn test_serialize_layout() {
        let raffle = RaffleRecord::create("Mug", 1).add_participant("42", 3);
        let bytes = raffle.serialize().unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            r#"{"prize":"Mug","winners":1,"participants":{"42":3}}"#
        );
    }

    #[test]
    fn test_deserialize_rejects_bad_shapes() {
        let cases: [&[u8]; 7] = [
            b"not json",
            b"[]",
            br#"{"prize":"Mug","winners":1}"#,
            br#"{"prize":"Mug","participants":{}}"#,
            br#"{"prize":"Mug","winners":1,"participants":{},"extra":true}"#,
            br#"{"prize":"Mug","winners":1,"participants":{"42":-1}}"#,
            br#"{"prize":"Mug","winners":1,"participants":{"42":1.5}}"#,
        ];

        for case in cases {
            assert!(matches!(
                RaffleRecord::deserialize(case),
                Err(RaffleError::MalformedRecord(_))
            ));
        }
    }

    #[test]
    fn test_add_participant_overwrites() {
        let raffle = RaffleRecord::create("Mug", 1)
            .add_participant("42", 3)
            .add_participant("42", 7);

        assert_eq!(raffle.participant_count(), 1);
        assert_eq!(raffle.entries_for("42"), Some(7));
    }

    #[test]
    fn test_add_participant_idempotent() {
        let once = RaffleRecord::create("Mug", 1).add_participant("42", 3);
        let twice = once.clone().add_participant("42", 3);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove_participant_twice() {
        let raffle = RaffleRecord::create("Mug", 1).add_participant("42", 3);
        let raffle = raffle.remove_participant("42").unwrap();
        assert!(raffle.participants.is_empty());

        match raffle.remove_participant("42") {
            Err(RaffleError::ParticipantNotFound(id)) => assert_eq!(id, "42"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_total_entries_past_u64() {
        let raffle = RaffleRecord::create("Mug", 1)
            .add_participant("a", u64::MAX)
            .add_participant("b", u64::MAX)
            .add_participant("c", 10);
        assert_eq!(raffle.total_entries(), 2 * u128::from(u64::MAX) + 10);
    }
}
