use std::borrow::Cow;

use log::debug;
use mailparse::{addrparse, MailAddr};

use crate::{
    error::Result,
    types::{Recipient, RecipientType},
};

use super::split::split_address_list;

/// Picks the display name of a recipient.
///
/// With `fixed_name` the supplied name wins over the one embedded in the address text,
/// otherwise the embedded name wins. Whichever source is preferred, an absent name falls
/// back to the other source.
pub fn select_name(
    embedded: Option<&str>,
    supplied: Option<&str>,
    fixed_name: bool,
) -> Option<String> {
    let selected = if fixed_name || embedded.is_none() {
        supplied.or(embedded)
    } else {
        embedded.or(supplied)
    };

    selected.map(str::to_string)
}

/// Resolves a single address entry, like `Jane Doe <jane@example.com>` or `jane@example.com`,
/// into a [`Recipient`].
///
/// This never fails. When the entry cannot be parsed, even leniently, the recipient carries the
/// entry verbatim as its address and `supplied_name` as its name, leaving the rejection to
/// validation further down the line. An empty `entry` therefore yields an empty address; lists
/// split by [`split_address_list`] never contain one.
///
/// RFC 2047 encoded words in a display name (`=?utf-8?q?J=C3=A9?=`) are kept as written.
pub fn resolve_recipient(
    supplied_name: Option<&str>,
    fixed_name: bool,
    entry: &str,
    kind: Option<RecipientType>,
) -> Recipient {
    match parse_first_mailbox(entry) {
        Some((embedded, address)) => {
            let name = select_name(embedded.as_deref(), supplied_name, fixed_name);

            Recipient::new(name, address, kind)
        }
        None => Recipient::new(
            supplied_name.map(str::to_string),
            entry.to_string(),
            kind,
        ),
    }
}

/// Splits `list` and resolves every entry with the same naming hints and role.
pub fn resolve_recipients<L: AsRef<str>>(
    list: L,
    supplied_name: Option<&str>,
    fixed_name: bool,
    kind: Option<RecipientType>,
) -> Result<Vec<Recipient>> {
    let entries = split_address_list(list)?;

    Ok(entries
        .iter()
        .map(|entry| resolve_recipient(supplied_name, fixed_name, entry, kind))
        .collect())
}

/// The display name and address of the first mailbox in `entry`, if it parses at all.
fn parse_first_mailbox(entry: &str) -> Option<(Option<String>, String)> {
    let prepared = quote_display_name(entry);

    let parsed = match addrparse(&prepared) {
        Ok(parsed) => parsed,
        Err(err) => {
            debug!("Keeping unparsable address entry '{}' as is: {}", entry, err);
            return None;
        }
    };

    let first = match parsed.first()? {
        MailAddr::Single(info) => info,
        MailAddr::Group(group) => group.addrs.first()?,
    };

    let name = first
        .display_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    Some((name, first.addr.clone()))
}

/// Quotes an unquoted display name containing a list separator, so that
/// `Doe, Jane <jane@x.com>` reads as one mailbox: `"Doe, Jane" <jane@x.com>`.
/// A prefix holding an `@` is an address of its own and is left to the parser.
fn quote_display_name(entry: &str) -> Cow<'_, str> {
    let trimmed = entry.trim();

    let open = match trimmed.rfind('<') {
        Some(open) if trimmed.ends_with('>') => open,
        _ => return Cow::Borrowed(entry),
    };

    let name = trimmed[..open].trim();

    if name.starts_with('"')
        || name.contains('@')
        || !name.contains(|c: char| c == ',' || c == ';')
    {
        return Cow::Borrowed(entry);
    }

    let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");

    Cow::Owned(format!("\"{}\" {}", escaped, &trimmed[open..]))
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::error::ErrorKind;

    #[test]
    fn fixed_name_overrides_embedded_name() {
        let recipient = resolve_recipient(
            Some("Override"),
            true,
            "Embedded <e@x.com>",
            Some(RecipientType::To),
        );

        assert_eq!(
            recipient,
            Recipient::new(
                Some("Override".into()),
                "e@x.com".into(),
                Some(RecipientType::To)
            )
        );
    }

    #[test]
    fn embedded_name_wins_when_not_fixed() {
        let recipient = resolve_recipient(
            Some("Fallback"),
            false,
            "Embedded <e@x.com>",
            Some(RecipientType::To),
        );

        assert_eq!(recipient.name(), Some("Embedded"));
        assert_eq!(recipient.address(), "e@x.com");
        assert_eq!(recipient.kind(), Some(RecipientType::To));
    }

    #[test]
    fn supplied_name_is_fallback_for_bare_address() {
        let recipient = resolve_recipient(
            Some("Fallback"),
            false,
            "e@x.com",
            Some(RecipientType::Cc),
        );

        assert_eq!(
            recipient,
            Recipient::new(
                Some("Fallback".into()),
                "e@x.com".into(),
                Some(RecipientType::Cc)
            )
        );
    }

    #[test]
    fn fixed_name_falls_back_to_embedded_name() {
        let recipient = resolve_recipient(None, true, "Embedded <e@x.com>", None);

        assert_eq!(recipient.name(), Some("Embedded"));
        assert_eq!(recipient.kind(), None);
    }

    #[test]
    fn no_name_anywhere() {
        let recipient = resolve_recipient(None, false, "<e@x.com>", Some(RecipientType::Bcc));

        assert_eq!(recipient.name(), None);
        assert_eq!(recipient.address(), "e@x.com");
    }

    #[test]
    fn malformed_entry_is_kept_verbatim() {
        let recipient = resolve_recipient(
            Some("Name"),
            true,
            "not-an-address!!",
            Some(RecipientType::To),
        );

        assert_eq!(
            recipient,
            Recipient::new(
                Some("Name".into()),
                "not-an-address!!".into(),
                Some(RecipientType::To)
            )
        );
    }

    #[test]
    fn unterminated_quote_is_kept_verbatim() {
        let entry = "\"Jane <jane@x.com>";
        let recipient = resolve_recipient(Some("Jane"), false, entry, None);

        assert_eq!(recipient.name(), Some("Jane"));
        assert_eq!(recipient.address(), entry);
    }

    #[test]
    fn names_with_separators_resolve() {
        let recipient = resolve_recipient(None, false, "Doe, Jane <jane@x.com>", None);

        assert_eq!(recipient.name(), Some("Doe, Jane"));
        assert_eq!(recipient.address(), "jane@x.com");

        let recipient = resolve_recipient(None, false, r#"Doe; "J" <jane@x.com>"#, None);

        assert_eq!(recipient.name(), Some(r#"Doe; "J""#));
        assert_eq!(recipient.address(), "jane@x.com");
    }

    #[test]
    fn leading_address_is_the_first_result() {
        let recipient = resolve_recipient(None, false, "a@b.com, Jane <j@x.com>", None);

        assert_eq!(recipient.name(), None);
        assert_eq!(recipient.address(), "a@b.com");
    }

    #[test]
    fn empty_entry_is_kept_verbatim() {
        let recipient = resolve_recipient(Some("Name"), false, "", None);

        assert_eq!(recipient.name(), Some("Name"));
        assert_eq!(recipient.address(), "");
    }

    #[test]
    fn encoded_words_stay_encoded() {
        let recipient = resolve_recipient(None, false, "=?utf-8?q?J=C3=A9?= <j@x.com>", None);

        assert_eq!(recipient.name(), Some("=?utf-8?q?J=C3=A9?="));
        assert_eq!(recipient.address(), "j@x.com");
    }

    #[test]
    fn resolving_twice_keeps_the_address() {
        for entry in ["Jane Doe <jane@x.com>", "jane@x.com", "not-an-address!!"] {
            let first = resolve_recipient(None, false, entry, None);
            let second = resolve_recipient(None, false, first.address(), None);

            assert_eq!(first.address(), second.address());
        }
    }

    #[test]
    fn select_name_priorities() {
        assert_eq!(
            select_name(Some("embedded"), Some("supplied"), true).as_deref(),
            Some("supplied")
        );
        assert_eq!(
            select_name(Some("embedded"), Some("supplied"), false).as_deref(),
            Some("embedded")
        );
        assert_eq!(
            select_name(Some("embedded"), None, true).as_deref(),
            Some("embedded")
        );
        assert_eq!(
            select_name(None, Some("supplied"), false).as_deref(),
            Some("supplied")
        );
        assert_eq!(select_name(None, None, true), None);
        assert_eq!(select_name(None, None, false), None);
    }

    #[test]
    fn resolve_whole_list() {
        let recipients = resolve_recipients(
            "Doe, Jane <jane@x.com>; john@y.com",
            Some("Team"),
            false,
            Some(RecipientType::Cc),
        )
        .unwrap();

        assert_eq!(
            recipients,
            vec![
                Recipient::new(
                    Some("Doe, Jane".into()),
                    "jane@x.com".into(),
                    Some(RecipientType::Cc)
                ),
                Recipient::new(
                    Some("Team".into()),
                    "john@y.com".into(),
                    Some(RecipientType::Cc)
                ),
            ]
        );
    }

    #[test]
    fn resolve_blank_list_fails() {
        let error = resolve_recipients("  ", None, false, None).unwrap_err();

        assert!(matches!(error.kind(), ErrorKind::InvalidArgument));
    }
}
