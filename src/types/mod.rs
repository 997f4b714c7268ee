mod content;
mod recipient;

pub use content::Content;
pub use recipient::{Recipient, RecipientType};

pub use crate::error::{Error, ErrorKind, Result};
