//! Ownership checks for contacts.

use crate::auth::Principal;
use crate::model::Contact;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// A principal may act on a contact only if it created it.
pub fn authorize(contact: &Contact, principal: &Principal) -> Access {
    if contact.owner == principal.id() {
        Access::Allow
    } else {
        Access::Deny
    }
}
