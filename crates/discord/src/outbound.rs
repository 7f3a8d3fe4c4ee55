//! Sending replies back to Discord.

use {
    fenbot_common::ReplyPayload,
    serenity::all::{
        CommandInteraction, Context, CreateAttachment, CreateInteractionResponse,
        CreateInteractionResponseMessage, CreateMessage, Message,
    },
    tracing::debug,
};

use crate::error::Result;

fn attachment(payload: &ReplyPayload) -> Option<CreateAttachment> {
    payload
        .attachment
        .as_ref()
        .map(|a| CreateAttachment::bytes(a.data.clone(), a.filename.clone()))
}

/// Message builder answering `reply_to`.
pub fn reply_message(payload: &ReplyPayload, reply_to: &Message) -> CreateMessage {
    let mut builder = CreateMessage::new()
        .content(&payload.text)
        .reference_message(reply_to);
    if let Some(file) = attachment(payload) {
        builder = builder.add_file(file);
    }
    builder
}

/// Response to a slash command.
pub fn interaction_response(payload: &ReplyPayload) -> CreateInteractionResponse {
    let mut message = CreateInteractionResponseMessage::new().content(&payload.text);
    if let Some(file) = attachment(payload) {
        message = message.add_file(file);
    }
    CreateInteractionResponse::Message(message)
}

pub async fn send_reply(ctx: &Context, reply_to: &Message, payload: &ReplyPayload) -> Result<()> {
    let sent = reply_to
        .channel_id
        .send_message(&ctx.http, reply_message(payload, reply_to))
        .await?;
    debug!(
        channel_id = %sent.channel_id,
        message_id = %sent.id,
        attachments = sent.attachments.len(),
        "reply sent"
    );
    Ok(())
}

pub async fn respond_to_command(
    ctx: &Context,
    command: &CommandInteraction,
    payload: &ReplyPayload,
) -> Result<()> {
    command
        .create_response(&ctx.http, interaction_response(payload))
        .await?;
    debug!(command = %command.data.name, "interaction answered");
    Ok(())
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use fenbot_common::Attachment;

    use super::*;

    #[test]
    fn attachment_carries_bytes_and_name() {
        let payload =
            ReplyPayload::text("**Status**").with_attachment(Attachment::png("position.png", vec![1, 2, 3]));
        let file = attachment(&payload).unwrap();
        assert_eq!(file.filename, "position.png");
        assert_eq!(file.data, vec![1, 2, 3]);
    }

    #[test]
    fn text_only_reply_has_no_file() {
        assert!(attachment(&ReplyPayload::text("**Invalid FEN**\n`x`")).is_none());
    }
}
