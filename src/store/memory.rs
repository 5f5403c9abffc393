use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ContactStore, StorageResult};
use crate::model::{Contact, ContactId, ContactPatch, NewContact};

/// Process-local store. Used by tests and `STORAGE=memory` runs.
#[derive(Default)]
pub struct MemoryStore {
    contacts: RwLock<HashMap<ContactId, Stored>>,
}

struct Stored {
    seq: u64,
    contact: Contact,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.contacts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.contacts.read().await.is_empty()
    }

    /// Every stored contact regardless of owner, newest first.
    pub async fn snapshot(&self) -> Vec<Contact> {
        let contacts = self.contacts.read().await;
        newest_first(contacts.values())
    }
}

// Ties on `created_at` fall back to insertion order.
fn newest_first<'a>(stored: impl Iterator<Item = &'a Stored>) -> Vec<Contact> {
    let mut stored: Vec<&Stored> = stored.collect();
    stored.sort_by(|a, b| {
        b.contact
            .created_at
            .cmp(&a.contact.created_at)
            .then(b.seq.cmp(&a.seq))
    });
    stored.into_iter().map(|s| s.contact.clone()).collect()
}

#[async_trait]
impl ContactStore for MemoryStore {
    async fn list_by_owner(&self, owner: &str) -> StorageResult<Vec<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(newest_first(
            contacts.values().filter(|s| s.contact.owner == owner),
        ))
    }

    async fn create(&self, fields: NewContact, owner: &str) -> StorageResult<Contact> {
        let contact = Contact {
            id: Uuid::new_v4(),
            owner: owner.to_string(),
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            kind: fields.kind,
            created_at: Utc::now(),
        };

        let mut contacts = self.contacts.write().await;
        let seq = contacts.len() as u64;
        contacts.insert(
            contact.id,
            Stored {
                seq,
                contact: contact.clone(),
            },
        );
        Ok(contact)
    }

    async fn find_by_id(&self, id: ContactId) -> StorageResult<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.get(&id).map(|s| s.contact.clone()))
    }

    async fn update_fields(
        &self,
        id: ContactId,
        patch: &ContactPatch,
    ) -> StorageResult<Option<Contact>> {
        let mut contacts = self.contacts.write().await;
        Ok(contacts.get_mut(&id).map(|stored| {
            patch.apply_to(&mut stored.contact);
            stored.contact.clone()
        }))
    }
}
