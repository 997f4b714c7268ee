//! Turning free-form address lists into [`Recipient`](crate::types::Recipient)s.
//!
//! An address list is first cut into entries by [`split_address_list`], after which every
//! entry is resolved on its own by [`resolve_recipient`]. Both steps are pure functions.

mod recipient;
mod split;

pub use recipient::{resolve_recipient, resolve_recipients, select_name};
pub use split::{split_address_list, split_address_list_with, SplitStrategy};
