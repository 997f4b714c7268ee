use std::result;

use mail_builder::headers::{address::Address, raw::Raw};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    builder::{Headers, MessageBuilder},
    error::{err, Error, ErrorKind, Result},
    types::{Content, Recipient},
    validate::validate_recipient,
};

/// A message whose sender and recipients have passed validation.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SendableMessage {
    from: Recipient,
    to: Vec<Recipient>,
    cc: Vec<Recipient>,
    bcc: Vec<Recipient>,
    subject: String,
    headers: Headers,
    content: Content,
}

impl SendableMessage {
    pub fn from(&self) -> &Recipient {
        &self.from
    }

    pub fn to(&self) -> &[Recipient] {
        &self.to
    }

    pub fn cc(&self) -> &[Recipient] {
        &self.cc
    }

    pub fn bcc(&self) -> &[Recipient] {
        &self.bcc
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Every recipient of the message, in `To`, `Cc`, `Bcc` order.
    pub fn recipients(&self) -> impl Iterator<Item = &Recipient> {
        self.to.iter().chain(self.cc.iter()).chain(self.bcc.iter())
    }

    /// Renders the message as RFC 5322 text.
    pub fn write_to_string(&self) -> Result<String> {
        let mut builder = mail_builder::MessageBuilder::new()
            .from(mailbox(&self.from))
            .subject(self.subject.as_str());

        if !self.to.is_empty() {
            builder = builder.to(mailbox_list(&self.to));
        }

        if !self.cc.is_empty() {
            builder = builder.cc(mailbox_list(&self.cc));
        }

        if !self.bcc.is_empty() {
            builder = builder.bcc(mailbox_list(&self.bcc));
        }

        for (name, value) in &self.headers {
            builder = builder.header(name.as_str(), Raw::new(value.as_str()));
        }

        if let Some(text) = self.content.text() {
            builder = builder.text_body(text);
        }

        if let Some(html) = self.content.html() {
            builder = builder.html_body(html);
        }

        Ok(builder.write_to_string()?)
    }
}

fn mailbox(recipient: &Recipient) -> Address<'_> {
    Address::new_address(recipient.name(), recipient.address())
}

fn mailbox_list(recipients: &[Recipient]) -> Address<'_> {
    Address::new_list(recipients.iter().map(mailbox).collect())
}

impl TryFrom<SendableMessage> for String {
    type Error = Error;

    fn try_from(message: SendableMessage) -> result::Result<Self, Self::Error> {
        message.write_to_string()
    }
}

impl TryFrom<MessageBuilder> for SendableMessage {
    type Error = Error;

    fn try_from(builder: MessageBuilder) -> result::Result<Self, Self::Error> {
        let from = match builder.from {
            Some(from) => from,
            None => {
                err!(ErrorKind::InvalidMessage, "Missing message sender");
            }
        };

        if builder.to.is_empty() && builder.cc.is_empty() && builder.bcc.is_empty() {
            err!(ErrorKind::InvalidMessage, "Missing message receiver");
        }

        let sendable = Self {
            from,
            to: builder.to,
            cc: builder.cc,
            bcc: builder.bcc,
            subject: builder.subject.unwrap_or_default(),
            headers: builder.headers.unwrap_or_default(),
            content: builder.content,
        };

        validate_recipient(&sendable.from)?;

        for recipient in sendable.recipients() {
            validate_recipient(recipient)?;
        }

        Ok(sendable)
    }
}
