// Animated reveal of a raffle draw
use std::time::Duration;

use tracing::debug;

use crate::collaborators::ResponseSink;
use crate::raffle_error::RaffleResult;

pub const ANNOUNCEMENT_COLOUR: u32 = 0x00ff00;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// Rich message body, rendered by the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Embed {
    pub title: String,
    pub colour: u32,
    pub fields: Vec<EmbedField>,
}

impl Embed {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            colour: ANNOUNCEMENT_COLOUR,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: false,
        });
        self
    }
}

/// Frames of the reveal. The first is sent, every later one replaces it.
pub fn frames(prize: &str, winner_mentions: &[String]) -> Vec<Embed> {
    let mut frames = vec![Embed::new("Preparing the raffle")];
    for dots in 0..4 {
        let title = format!("Picking a winner{}", ".".repeat(dots));
        frames.push(Embed::new(title).field("Prize", prize));
    }
    frames.push(
        Embed::new("Winner!")
            .field("Prize", prize)
            .field("Winners", winner_mentions.join("\n")),
    );
    frames
}

/// Play the reveal on `sink`, waiting `delay` before each edit
pub async fn announce<S: ResponseSink>(
    sink: &S,
    prize: &str,
    winner_mentions: &[String],
    delay: Duration,
) -> RaffleResult<()> {
    let mut frames = frames(prize, winner_mentions).into_iter();
    let Some(first) = frames.next() else {
        return Ok(());
    };

    let message = sink.send(first).await?;
    for frame in frames {
        tokio::time::sleep(delay).await;
        debug!("Editing announcement {:?}: {}", message, frame.title);
        sink.edit(&message, frame).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_sequence() {
        let winners = vec!["<@1>".to_string(), "<@2>".to_string()];
        let frames = frames("Gift Card", &winners);

        let titles: Vec<_> = frames.iter().map(|f| f.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Preparing the raffle",
                "Picking a winner",
                "Picking a winner.",
                "Picking a winner..",
                "Picking a winner...",
                "Winner!",
            ]
        );

        assert!(frames[0].fields.is_empty());
        for frame in &frames[1..5] {
            assert_eq!(frame.fields.len(), 1);
            assert_eq!(frame.fields[0].name, "Prize");
            assert_eq!(frame.fields[0].value, "Gift Card");
        }

        let reveal = &frames[5];
        assert_eq!(reveal.fields[1].name, "Winners");
        assert_eq!(reveal.fields[1].value, "<@1>\n<@2>");
        assert!(frames.iter().all(|f| f.colour == ANNOUNCEMENT_COLOUR));
    }
}
