#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::Result,
    parser::{resolve_recipient, split_address_list_with, SplitStrategy},
    types::{Recipient, RecipientType},
};

/// Settings for turning address lists into recipients.
///
/// ```
/// use mail_recipients::{RecipientParser, RecipientType};
///
/// let parser = RecipientParser::new().default_name("Support").fixed_name(true);
///
/// let recipients = parser
///     .parse("Jane <jane@example.com>, john@example.com", Some(RecipientType::To))
///     .unwrap();
///
/// assert_eq!(recipients[0].name(), Some("Support"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RecipientParser {
    strategy: SplitStrategy,
    default_name: Option<String>,
    fixed_name: bool,
}

impl RecipientParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(mut self, strategy: SplitStrategy) -> Self {
        self.strategy = strategy;

        self
    }

    /// The name given to recipients, either as a fallback or, with [`Self::fixed_name`], as an override.
    pub fn default_name<N: Into<String>>(mut self, name: N) -> Self {
        self.default_name = Some(name.into());

        self
    }

    pub fn fixed_name(mut self, fixed_name: bool) -> Self {
        self.fixed_name = fixed_name;

        self
    }

    pub fn parse<L: AsRef<str>>(
        &self,
        list: L,
        kind: Option<RecipientType>,
    ) -> Result<Vec<Recipient>> {
        let entries = split_address_list_with(list, self.strategy)?;

        Ok(entries
            .iter()
            .map(|entry| self.resolve(entry, kind))
            .collect())
    }

    pub fn resolve(&self, entry: &str, kind: Option<RecipientType>) -> Recipient {
        resolve_recipient(self.default_name.as_deref(), self.fixed_name, entry, kind)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let recipients = RecipientParser::new()
            .parse("Jane <jane@x.com>, john@y.com", None)
            .unwrap();

        assert_eq!(recipients[0].full(), "Jane <jane@x.com>");
        assert_eq!(recipients[1].full(), "john@y.com");
    }

    #[test]
    fn fixed_default_name() {
        let recipients = RecipientParser::new()
            .default_name("Support")
            .fixed_name(true)
            .parse("Jane <jane@x.com>; john@y.com", Some(RecipientType::Bcc))
            .unwrap();

        assert!(recipients
            .iter()
            .all(|recipient| recipient.name() == Some("Support")
                && recipient.kind() == Some(RecipientType::Bcc)));
    }

    #[test]
    fn scanner_strategy() {
        let parser = RecipientParser::new().strategy(SplitStrategy::Scanner);

        let recipients = parser
            .parse(r#""a@b.com, Jane" <jane@x.com>, john@y.com"#, None)
            .unwrap();

        assert_eq!(recipients.len(), 2);
        assert_eq!(recipients[0].name(), Some("a@b.com, Jane"));
        assert_eq!(recipients[0].address(), "jane@x.com");
    }

    #[cfg(feature = "json")]
    #[test]
    fn deserialize_partial_config() {
        let parser: RecipientParser =
            serde_json::from_str(r#"{ "strategy": "Scanner", "fixed_name": true }"#).unwrap();

        assert_eq!(
            parser,
            RecipientParser::new()
                .strategy(SplitStrategy::Scanner)
                .fixed_name(true)
        );
    }
}
