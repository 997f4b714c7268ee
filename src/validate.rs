use log::warn;
use validator::validate_email;

use crate::{
    error::{err, ErrorKind, Result},
    types::Recipient,
};

/// Strict check of a resolved recipient, run before a message is handed out for sending.
///
/// The resolver keeps entries it cannot parse verbatim, this is where they get rejected.
pub fn validate_recipient(recipient: &Recipient) -> Result<()> {
    if validate_email(recipient.address()) {
        return Ok(());
    }

    let role = recipient
        .kind()
        .map(|kind| kind.to_string())
        .unwrap_or_else(|| String::from("recipient"));

    warn!("Rejecting {} address '{}'", role, recipient.address());

    err!(
        ErrorKind::InvalidAddress,
        "Invalid {} address: '{}'",
        role,
        recipient.address()
    )
}

#[cfg(test)]
mod test {
    use super::*;

    use crate::{parser::resolve_recipient, types::RecipientType};

    #[test]
    fn accepts_resolved_addresses() {
        let recipient = resolve_recipient(None, false, "Jane <jane@example.com>", None);

        assert!(validate_recipient(&recipient).is_ok());
    }

    #[test]
    fn rejects_verbatim_fallback() {
        let recipient = resolve_recipient(
            Some("Name"),
            true,
            "not-an-address!!",
            Some(RecipientType::Cc),
        );

        let error = validate_recipient(&recipient).unwrap_err();

        assert!(matches!(error.kind(), ErrorKind::InvalidAddress));
        assert_eq!(
            error.to_string(),
            "Invalid Cc address: 'not-an-address!!'"
        );
    }
}
