//! Host that runs the raffle commands from a shell.
//!
//! Uploads are local file paths, participants are given by their user ID,
//! responses go to stdout and attachments are written to an output directory.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::announcement::Embed;
use crate::collaborators::{
    CommandResolver, Identity, IdentityResolver, MessageHandle, ParticipantRef, RaffleUpload,
    Response, ResponseSink, UploadSource,
};
use crate::raffle_error::{RaffleError, RaffleResult};

pub struct TerminalHost {
    out_dir: PathBuf,
    create_command_id: Option<u64>,
    next_message: AtomicU64,
}

impl TerminalHost {
    pub fn new(out_dir: impl Into<PathBuf>, create_command_id: Option<u64>) -> Self {
        Self {
            out_dir: out_dir.into(),
            create_command_id,
            next_message: AtomicU64::new(1),
        }
    }

    async fn print(&self, text: &str) -> RaffleResult<()> {
        let mut stdout = tokio::io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}

pub fn render_embed(embed: &Embed) -> String {
    let mut out = format!("== {} ==", embed.title);
    for field in &embed.fields {
        out.push_str(&format!("\n{}:\n{}", field.name, field.value));
    }
    out
}

impl UploadSource for TerminalHost {
    async fn read(&self, upload: &RaffleUpload) -> RaffleResult<Vec<u8>> {
        debug!("Reading raffle file {}", upload.0);
        Ok(tokio::fs::read(&upload.0).await?)
    }
}

impl ResponseSink for TerminalHost {
    async fn respond(&self, response: Response) -> RaffleResult<()> {
        self.print(&response.content).await?;

        if let Some(attachment) = response.attachment {
            tokio::fs::create_dir_all(&self.out_dir).await?;
            let path = self.out_dir.join(&attachment.filename);
            tokio::fs::write(&path, &attachment.data).await?;
            self.print(&format!("[attached {}]", path.display())).await?;
        }
        Ok(())
    }

    async fn send(&self, embed: Embed) -> RaffleResult<MessageHandle> {
        let id = self.next_message.fetch_add(1, Ordering::Relaxed);
        self.print(&render_embed(&embed)).await?;
        Ok(MessageHandle(id.to_string()))
    }

    async fn edit(&self, message: &MessageHandle, embed: Embed) -> RaffleResult<()> {
        let id: u64 = message
            .0
            .parse()
            .map_err(|_| RaffleError::Transport(format!("unknown message {}", message.0)))?;
        if id >= self.next_message.load(Ordering::Relaxed) {
            return Err(RaffleError::Transport(format!("unknown message {}", message.0)));
        }
        self.print(&render_embed(&embed)).await
    }
}

impl IdentityResolver for TerminalHost {
    async fn resolve(&self, participant: &ParticipantRef) -> RaffleResult<Identity> {
        let id = participant.0.trim().to_string();
        Ok(Identity {
            mention: self.mention_id(&id),
            id,
        })
    }

    fn mention_id(&self, id: &str) -> String {
        format!("<@{id}>")
    }
}

impl CommandResolver for TerminalHost {
    fn create_command_reference(&self) -> String {
        match self.create_command_id {
            Some(id) => format!("</raffle create:{id}>"),
            None => "/raffle create".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_command_reference() {
        assert_eq!(
            TerminalHost::new("out", Some(99)).create_command_reference(),
            "</raffle create:99>"
        );
        assert_eq!(
            TerminalHost::new("out", None).create_command_reference(),
            "/raffle create"
        );
    }

    #[test]
    fn test_render_embed() {
        let embed = Embed::new("Winner!").field("Prize", "Mug");
        assert_eq!(render_embed(&embed), "== Winner! ==\nPrize:\nMug");
    }

    #[tokio::test]
    async fn test_edit_unknown_message() {
        let host = TerminalHost::new("out", None);
        let result = host
            .edit(&MessageHandle("7".into()), Embed::new("Winner!"))
            .await;
        assert!(matches!(result, Err(RaffleError::Transport(_))));
    }
}
