//! Finding the message a command answers.
//!
//! An explicit reply wins. Otherwise, in a thread, a command sent as the
//! first message after the thread's starter answers the message the thread
//! was started from.

use {
    fenbot_game::ChatMessage,
    serenity::all::{
        Channel, ChannelId, ChannelType, Context, GetMessages, Message, MessageReference,
        MessageType,
    },
    tracing::debug,
};

use crate::error::Result;

fn is_thread(kind: ChannelType) -> bool {
    matches!(kind, ChannelType::PublicThread | ChannelType::PrivateThread)
}

/// Parent of a thread channel; `None` for anything else.
pub fn thread_parent_id(kind: ChannelType, parent_id: Option<ChannelId>) -> Option<ChannelId> {
    parent_id.filter(|_| is_thread(kind))
}

/// Look up the channel a thread was opened in.
pub async fn thread_parent(ctx: &Context, channel_id: ChannelId) -> Result<Option<ChannelId>> {
    let Channel::Guild(channel) = channel_id.to_channel(ctx).await? else {
        return Ok(None);
    };
    Ok(thread_parent_id(channel.kind, channel.parent_id))
}

/// Whether a newest-first `history` of a thread is exactly the command
/// followed by the thread starter.
fn is_first_after_starter(history: &[MessageType]) -> bool {
    matches!(history, [_, MessageType::ThreadStarterMessage])
}

fn to_chat(message: &Message) -> ChatMessage {
    ChatMessage::new(message.author.id.get(), message.content.clone())
}

/// Fetch the message behind a reference, using the copy Discord embeds
/// when there is one.
async fn dereference(
    ctx: &Context,
    embedded: Option<&Message>,
    reference: Option<&MessageReference>,
) -> Result<Option<Message>> {
    if let Some(message) = embedded {
        return Ok(Some(message.clone()));
    }
    let Some(reference) = reference else {
        return Ok(None);
    };
    let Some(message_id) = reference.message_id else {
        return Ok(None);
    };
    let message = reference
        .channel_id
        .message(&ctx.http, message_id)
        .await?;
    Ok(Some(message))
}

/// The message `msg` answers, if any.
pub async fn anchor_candidate(ctx: &Context, msg: &Message) -> Result<Option<ChatMessage>> {
    if msg.message_reference.is_some() {
        let target = dereference(
            ctx,
            msg.referenced_message.as_deref(),
            msg.message_reference.as_ref(),
        )
        .await?;
        return Ok(target.as_ref().map(to_chat));
    }

    let Channel::Guild(channel) = msg.channel(ctx).await? else {
        return Ok(None);
    };
    if !is_thread(channel.kind) {
        return Ok(None);
    }

    let history = msg
        .channel_id
        .messages(&ctx.http, GetMessages::new().limit(2))
        .await?;
    let kinds: Vec<MessageType> = history.iter().map(|m| m.kind).collect();
    if !is_first_after_starter(&kinds) {
        debug!(
            channel_id = %msg.channel_id,
            seen = history.len(),
            "command is not the first message in the thread"
        );
        return Ok(None);
    }

    let starter = &history[1];
    let target = dereference(
        ctx,
        starter.referenced_message.as_deref(),
        starter.message_reference.as_ref(),
    )
    .await?;
    Ok(target.as_ref().map(to_chat))
}
