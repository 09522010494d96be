use std::time::Duration;

use tracing::{info, warn};

use crate::announcement;
use crate::collaborators::{
    Attachment, CommandResolver, IdentityResolver, ParticipantRef, RaffleUpload, Response,
    ResponseSink, UploadSource,
};
use crate::draw;
use crate::raffle_error::{RaffleError, RaffleResult};
use crate::raffle_instruction::{validate_amount, validate_winners, RaffleCommand};
use crate::raffle_state::RaffleRecord;
use crate::settings::Settings;

/// Everything a chat host has to provide to run the raffle commands
pub trait RaffleHost: UploadSource + ResponseSink + IdentityResolver + CommandResolver {}

impl<T> RaffleHost for T where T: UploadSource + ResponseSink + IdentityResolver + CommandResolver {}

pub struct Processor<'a, H> {
    host: &'a H,
    animation_delay: Duration,
    attachment_name: String,
}

impl<'a, H: RaffleHost> Processor<'a, H> {
    pub fn new(host: &'a H, settings: &Settings) -> Self {
        Self {
            host,
            animation_delay: settings.animation_delay(),
            attachment_name: settings.attachment_name.clone(),
        }
    }

    /// Run one command. Raffle errors become a notice to the user; only host
    /// failures are returned.
    pub async fn process(&self, command: RaffleCommand) -> RaffleResult<()> {
        let result = match command {
            RaffleCommand::Create { prize, winners } => {
                info!("Command: Create");
                self.process_create(prize, winners).await
            }
            RaffleCommand::AddParticipant {
                raffle,
                participant,
                amount,
            } => {
                info!("Command: Add Participant");
                self.process_add_participant(&raffle, &participant, amount)
                    .await
            }
            RaffleCommand::RemoveParticipant {
                raffle,
                participant,
            } => {
                info!("Command: Remove Participant");
                self.process_remove_participant(&raffle, &participant)
                    .await
            }
            RaffleCommand::Draw { raffle } => {
                info!("Command: Draw");
                self.process_draw(&raffle).await
            }
        };

        match result {
            Err(err) if err.is_user_facing() => {
                warn!("Command rejected: {}", err);
                self.host.respond(Response::notice(self.notice_for(&err))).await
            }
            other => other,
        }
    }

    async fn process_create(&self, prize: String, winners: i64) -> RaffleResult<()> {
        let winners = validate_winners(winners)?;
        let raffle = RaffleRecord::create(prize, winners);

        info!("Raffle created: Prize={}, Winners={}", raffle.prize, raffle.winners);

        let file = self.attach(&raffle)?;
        self.host
            .respond(Response::with_attachment("Here is the raffle file.", file))
            .await
    }

    async fn process_add_participant(
        &self,
        upload: &RaffleUpload,
        participant: &ParticipantRef,
        amount: i64,
    ) -> RaffleResult<()> {
        let raffle = self.load(upload).await?;
        let identity = self.host.resolve(participant).await?;
        let amount = validate_amount(amount)?;

        let raffle = raffle.add_participant(identity.id.clone(), amount);
        info!("Participant {} now holds {} entries", identity.id, amount);

        let file = self.attach(&raffle)?;
        let content = format!(
            "Here is the updated raffle file. {} now have {} entries.",
            identity.mention, amount
        );
        self.host
            .respond(Response::with_attachment(content, file))
            .await
    }

    async fn process_remove_participant(
        &self,
        upload: &RaffleUpload,
        participant: &ParticipantRef,
    ) -> RaffleResult<()> {
        let raffle = self.load(upload).await?;
        let identity = self.host.resolve(participant).await?;

        let raffle = raffle.remove_participant(&identity.id)?;
        info!("Participant {} removed", identity.id);

        let file = self.attach(&raffle)?;
        let content = format!(
            "Here is the updated raffle file. {} was removed.",
            identity.mention
        );
        self.host
            .respond(Response::with_attachment(content, file))
            .await
    }

    async fn process_draw(&self, upload: &RaffleUpload) -> RaffleResult<()> {
        let raffle = self.load(upload).await?;
        let winners = draw::draw_winners(&raffle)?;

        info!("Raffle drawn: Prize={}, Winners={:?}", raffle.prize, winners);

        self.host
            .respond(Response::notice("Starting the raffle..."))
            .await?;

        let mentions: Vec<String> = winners.iter().map(|id| self.host.mention_id(id)).collect();
        announcement::announce(self.host, &raffle.prize, &mentions, self.animation_delay).await
    }

    async fn load(&self, upload: &RaffleUpload) -> RaffleResult<RaffleRecord> {
        let bytes = self.host.read(upload).await?;
        RaffleRecord::deserialize(&bytes)
    }

    fn attach(&self, raffle: &RaffleRecord) -> RaffleResult<Attachment> {
        Ok(Attachment {
            filename: self.attachment_name.clone(),
            data: raffle.serialize()?,
        })
    }

    fn notice_for(&self, err: &RaffleError) -> String {
        match err {
            RaffleError::MalformedRecord(_) => format!(
                "The raffle file is invalid. You can create a new one with {}.",
                self.host.create_command_reference()
            ),
            RaffleError::ParticipantNotFound(id) => format!(
                "{} is not a participant in this raffle.",
                self.host.mention_id(id)
            ),
            RaffleError::EmptyParticipants => "There are no participants in this raffle.".into(),
            RaffleError::InsufficientParticipants { .. } => {
                "There are not enough participants in this raffle.".into()
            }
            RaffleError::NoEntries => "There are no entries in this raffle.".into(),
            RaffleError::InvalidWinnerCount { min, max, .. } => {
                format!("The number of winners must be between {min} and {max}.")
            }
            RaffleError::InvalidEntryAmount(_) => {
                "The amount of entries must be at least 1.".into()
            }
            RaffleError::EncodeRecord(_) | RaffleError::Io(_) | RaffleError::Transport(_) => {
                err.to_string()
            }
        }
    }
}
