//! Capabilities the raffle commands need from the chat host.
//!
//! The processor never talks to a platform directly. A host implements these
//! traits over its own attachment storage, message API and member lookup.

use crate::announcement::Embed;
use crate::raffle_error::RaffleResult;

/// Opaque reference to an uploaded raffle file, as handed over by the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaffleUpload(pub String);

/// Opaque reference to a member picked as a command argument
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParticipantRef(pub String);

/// A resolved member
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    /// Stable textual ID, used as the participant key in the record
    pub id: String,
    /// How the host renders a mention of this member
    pub mention: String,
}

/// File attached to a response
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Reply to the user who ran the command
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub content: String,
    pub attachment: Option<Attachment>,
    /// Only visible to the invoking user
    pub ephemeral: bool,
}

impl Response {
    pub fn notice(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            attachment: None,
            ephemeral: true,
        }
    }

    pub fn with_attachment(content: impl Into<String>, attachment: Attachment) -> Self {
        Self {
            content: content.into(),
            attachment: Some(attachment),
            ephemeral: true,
        }
    }
}

/// Host-side handle of a message that can be edited later
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageHandle(pub String);

#[allow(async_fn_in_trait)]
pub trait UploadSource {
    /// Raw bytes of a previously issued raffle file
    async fn read(&self, upload: &RaffleUpload) -> RaffleResult<Vec<u8>>;
}

#[allow(async_fn_in_trait)]
pub trait ResponseSink {
    async fn respond(&self, response: Response) -> RaffleResult<()>;

    /// Post an embed to the channel the command was run in
    async fn send(&self, embed: Embed) -> RaffleResult<MessageHandle>;

    async fn edit(&self, message: &MessageHandle, embed: Embed) -> RaffleResult<()>;
}

#[allow(async_fn_in_trait)]
pub trait IdentityResolver {
    async fn resolve(&self, participant: &ParticipantRef) -> RaffleResult<Identity>;

    /// Mention for a participant key already stored in a record
    fn mention_id(&self, id: &str) -> String;
}

pub trait CommandResolver {
    /// How to point a user at the create command, e.g. `</raffle create:123>`
    fn create_command_reference(&self) -> String;
}
