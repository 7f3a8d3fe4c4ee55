/// A file sent alongside a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub data: Vec<u8>,
}

impl Attachment {
    #[must_use]
    pub fn png(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }
}

/// Platform-neutral outbound message: text plus an optional attachment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyPayload {
    pub text: String,
    pub attachment: Option<Attachment>,
}

impl ReplyPayload {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attachment: None,
        }
    }

    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    /// First line of the text, which carries the machine-readable anchor
    /// for board replies.
    #[must_use]
    pub fn first_line(&self) -> &str {
        self.text.lines().next().unwrap_or("")
    }
}
