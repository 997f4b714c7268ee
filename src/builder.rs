use std::{collections::HashMap, fmt::Display};

use crate::{
    config::RecipientParser,
    error::{Error, Result},
    types::{Content, Recipient, RecipientType},
};

pub type Headers = HashMap<String, String>;

/// Collects everything needed to compose a message.
///
/// Recipients can be added one by one or as free-form address lists, which are resolved with
/// the builder's [`RecipientParser`].
#[derive(Debug, Default)]
pub struct MessageBuilder {
    pub(crate) from: Option<Recipient>,
    pub(crate) to: Vec<Recipient>,
    pub(crate) cc: Vec<Recipient>,
    pub(crate) bcc: Vec<Recipient>,
    pub(crate) subject: Option<String>,
    pub(crate) headers: Option<Headers>,
    pub(crate) content: Content,
    parser: RecipientParser,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a differently configured parser for the `*_list` methods.
    pub fn parser(mut self, parser: RecipientParser) -> Self {
        self.parser = parser;

        self
    }

    pub fn from<C: Into<Recipient>>(mut self, sender: C) -> Self {
        self.from = Some(sender.into());

        self
    }

    pub fn to<C: Into<Recipient>>(self, recipient: C) -> Self {
        self.recipient(recipient.into(), RecipientType::To)
    }

    pub fn cc<C: Into<Recipient>>(self, cc: C) -> Self {
        self.recipient(cc.into(), RecipientType::Cc)
    }

    pub fn bcc<C: Into<Recipient>>(self, bcc: C) -> Self {
        self.recipient(bcc.into(), RecipientType::Bcc)
    }

    /// Resolves an address list like `Jane <jane@example.com>; john@example.com` into `To` recipients.
    pub fn to_list<L: AsRef<str>>(self, list: L) -> Result<Self> {
        self.recipient_list(list, RecipientType::To)
    }

    pub fn cc_list<L: AsRef<str>>(self, list: L) -> Result<Self> {
        self.recipient_list(list, RecipientType::Cc)
    }

    pub fn bcc_list<L: AsRef<str>>(self, list: L) -> Result<Self> {
        self.recipient_list(list, RecipientType::Bcc)
    }

    /// Adds already resolved recipients, sorted by their type. Recipients without one become `To`.
    pub fn recipients<C: IntoIterator<Item = Recipient>>(mut self, recipients: C) -> Self {
        for recipient in recipients {
            let kind = recipient.kind().unwrap_or(RecipientType::To);

            self = self.recipient(recipient, kind);
        }

        self
    }

    pub fn subject<S: Display>(mut self, subject: S) -> Self {
        self.subject = Some(subject.to_string());

        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);

        self
    }

    pub fn header<H: Into<String>, V: Display>(mut self, header: H, value: V) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(header.into(), value.to_string());

        self
    }

    pub fn html<H: Into<String>>(mut self, html: H) -> Self {
        self.content.set_html(html);

        self
    }

    pub fn text<H: Into<String>>(mut self, text: H) -> Self {
        self.content.set_text(text);

        self
    }

    pub fn build<T: TryFrom<Self, Error = Error>>(self) -> Result<T> {
        self.try_into()
    }

    fn recipient(mut self, recipient: Recipient, kind: RecipientType) -> Self {
        let recipient = recipient.with_kind(Some(kind));

        match kind {
            RecipientType::To => self.to.push(recipient),
            RecipientType::Cc => self.cc.push(recipient),
            RecipientType::Bcc => self.bcc.push(recipient),
        }

        self
    }

    fn recipient_list<L: AsRef<str>>(self, list: L, kind: RecipientType) -> Result<Self> {
        let recipients = self.parser.parse(list, Some(kind))?;

        Ok(self.recipients(recipients))
    }
}
