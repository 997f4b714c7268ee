//! Turn free-form email address lists into structured recipients.
//!
//! ```
//! use mail_recipients::{parser, RecipientType};
//!
//! let recipients = parser::resolve_recipients(
//!     "Doe, Jane <jane@example.com>; john@example.com",
//!     None,
//!     false,
//!     Some(RecipientType::To),
//! )
//! .unwrap();
//!
//! assert_eq!(recipients[0].name(), Some("Doe, Jane"));
//! assert_eq!(recipients[1].address(), "john@example.com");
//! ```

mod builder;
mod config;
mod error;
mod sendable;

pub mod parser;
pub mod types;
pub mod utils;
pub mod validate;

pub use builder::{Headers, MessageBuilder};
pub use config::RecipientParser;
pub use sendable::SendableMessage;
pub use types::{Content, Error, ErrorKind, Recipient, RecipientType, Result};
