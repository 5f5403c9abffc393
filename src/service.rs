//! Contact use cases.
//!
//! Every operation is independent of the others and keeps no state between
//! calls beyond the shared store handle. Storage failures are logged here and
//! surfaced as [`ContactError::Storage`], whose response never carries the
//! underlying error text.

use std::sync::Arc;

use tracing::{error, info};

use crate::auth::Principal;
use crate::error::{ContactError, ContactResult};
use crate::guard::{authorize, Access};
use crate::model::{Contact, ContactId, ContactInput, ContactPatch};
use crate::store::{ContactStore, StorageError};
use crate::validation::validate_new_contact;

/// Fixed body returned by the delete endpoint, which does not delete yet.
pub const DELETE_PLACEHOLDER: &str = "Delete contact";

#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStore>,
}

impl ContactService {
    pub fn new(store: Arc<dyn ContactStore>) -> Self {
        Self { store }
    }

    /// All contacts of `principal`, newest first.
    pub async fn list(&self, principal: &Principal) -> ContactResult<Vec<Contact>> {
        self.store
            .list_by_owner(principal.id())
            .await
            .map_err(|err| storage_failure("list", err))
    }

    /// Validates `input` and stores it as a contact owned by `principal`.
    pub async fn create(
        &self,
        principal: &Principal,
        input: ContactInput,
    ) -> ContactResult<Contact> {
        let fields = validate_new_contact(input).map_err(ContactError::Validation)?;

        let contact = self
            .store
            .create(fields, principal.id())
            .await
            .map_err(|err| storage_failure("create", err))?;

        info!(contact_id = %contact.id, owner = %contact.owner, "contact created");
        Ok(contact)
    }

    /// Merges the non-empty fields of `input` into the contact `id`.
    ///
    /// The ownership check and the write are two separate store calls; a
    /// concurrent update landing between them is not detected.
    pub async fn update(
        &self,
        principal: &Principal,
        id: ContactId,
        input: ContactInput,
    ) -> ContactResult<Contact> {
        let existing = self.owned_contact(principal, id).await?;
        self.merge(existing, input).await
    }

    /// Fetches contact `id` and checks that `principal` owns it.
    pub async fn owned_contact(
        &self,
        principal: &Principal,
        id: ContactId,
    ) -> ContactResult<Contact> {
        let existing = self
            .store
            .find_by_id(id)
            .await
            .map_err(|err| storage_failure("update", err))?
            .ok_or(ContactError::NotFound)?;

        if authorize(&existing, principal) == Access::Deny {
            info!(contact_id = %id, principal = principal.id(), "update denied");
            return Err(ContactError::NotAuthorized);
        }

        Ok(existing)
    }

    /// Writes the non-empty fields of `input` onto a contact returned by
    /// [`ContactService::owned_contact`].
    pub async fn merge(&self, existing: Contact, input: ContactInput) -> ContactResult<Contact> {
        let patch = ContactPatch::from_input(input);
        if patch.is_empty() {
            return Ok(existing);
        }

        self.store
            .update_fields(existing.id, &patch)
            .await
            .map_err(|err| storage_failure("update", err))?
            .ok_or(ContactError::NotFound)
    }

    /// Unimplemented: performs no ownership check and touches no storage.
    pub async fn delete(&self, _id: &str) -> &'static str {
        DELETE_PLACEHOLDER
    }
}

fn storage_failure(operation: &'static str, err: StorageError) -> ContactError {
    error!(operation, error = %err, "contact storage failure");
    ContactError::Storage(err)
}
