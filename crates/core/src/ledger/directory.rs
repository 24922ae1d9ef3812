//! User directory: identity to renter record mapping.
//!
//! Records are created once at registration and never deleted. Balance
//! and debt live here; the engine facade is the only writer.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rentra_shared::{Amount, ItemId, RenterId};
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// A registered renter.
///
/// Invariant: `checkout_started_at` is `Some` iff `active_checkout`
/// is `Some`. The session fields are only written together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Renter {
    /// The renter's identity.
    pub id: RenterId,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Pre-funded balance in the smallest fee unit.
    pub balance: Amount,
    /// Outstanding fee debt in the smallest fee unit.
    pub debt: Amount,
    /// The item currently checked out, if any.
    pub active_checkout: Option<ItemId>,
    /// When the active checkout started; valid only while one is active.
    pub checkout_started_at: Option<DateTime<Utc>>,
}

impl Renter {
    fn new(id: RenterId, first_name: String, last_name: String) -> Self {
        Self {
            id,
            first_name,
            last_name,
            balance: Amount::ZERO,
            debt: Amount::ZERO,
            active_checkout: None,
            checkout_started_at: None,
        }
    }

    /// Returns true if the renter currently holds an item.
    #[must_use]
    pub fn has_active_checkout(&self) -> bool {
        self.active_checkout.is_some()
    }

    /// Records the start of a checkout session.
    pub(super) fn open_session(&mut self, item: ItemId, started_at: DateTime<Utc>) {
        self.active_checkout = Some(item);
        self.checkout_started_at = Some(started_at);
    }

    /// Clears the session fields, returning the item and start time.
    pub(super) fn close_session(&mut self) -> Option<(ItemId, DateTime<Utc>)> {
        let item = self.active_checkout.take()?;
        let started_at = self.checkout_started_at.take()?;
        Some((item, started_at))
    }
}

/// Mapping of identity to renter record.
#[derive(Debug, Default)]
pub struct Directory {
    renters: HashMap<RenterId, Renter>,
}

impl Directory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a renter record for a previously unseen identity.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyRegistered` if the identity already has a record;
    /// re-registration must never silently overwrite balance or debt.
    pub fn register(
        &mut self,
        id: RenterId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Result<(), LedgerError> {
        if self.renters.contains_key(&id) {
            return Err(LedgerError::AlreadyRegistered(id));
        }
        self.renters
            .insert(id, Renter::new(id, first_name.into(), last_name.into()));
        Ok(())
    }

    /// Looks up a renter record.
    ///
    /// # Errors
    ///
    /// Returns `RenterNotFound` for unregistered identities.
    pub fn get(&self, id: RenterId) -> Result<&Renter, LedgerError> {
        self.renters.get(&id).ok_or(LedgerError::RenterNotFound(id))
    }

    /// Looks up a renter record for mutation.
    pub(super) fn get_mut(&mut self, id: RenterId) -> Result<&mut Renter, LedgerError> {
        self.renters
            .get_mut(&id)
            .ok_or(LedgerError::RenterNotFound(id))
    }

    /// Number of registered renters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.renters.len()
    }

    /// Returns true if no renter has registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut directory = Directory::new();
        let id = RenterId::new();
        directory.register(id, "David", "Jhonson").unwrap();

        let renter = directory.get(id).unwrap();
        assert_eq!(renter.first_name, "David");
        assert_eq!(renter.last_name, "Jhonson");
        assert_eq!(renter.balance, Amount::ZERO);
        assert_eq!(renter.debt, Amount::ZERO);
        assert!(!renter.has_active_checkout());
    }

    #[test]
    fn test_reregistration_rejected() {
        let mut directory = Directory::new();
        let id = RenterId::new();
        directory.register(id, "David", "Jhonson").unwrap();

        let result = directory.register(id, "Other", "Name");
        assert!(matches!(result, Err(LedgerError::AlreadyRegistered(got)) if got == id));

        // Original record untouched.
        assert_eq!(directory.get(id).unwrap().first_name, "David");
    }

    #[test]
    fn test_unknown_identity() {
        let directory = Directory::new();
        assert!(matches!(
            directory.get(RenterId::new()),
            Err(LedgerError::RenterNotFound(_))
        ));
    }

    #[test]
    fn test_session_fields_move_together() {
        let mut directory = Directory::new();
        let id = RenterId::new();
        directory.register(id, "David", "Jhonson").unwrap();

        let renter = directory.get_mut(id).unwrap();
        assert!(renter.close_session().is_none());

        let started = Utc::now();
        renter.open_session(ItemId::FIRST, started);
        assert!(renter.has_active_checkout());
        assert_eq!(renter.checkout_started_at, Some(started));

        let (item, at) = renter.close_session().unwrap();
        assert_eq!(item, ItemId::FIRST);
        assert_eq!(at, started);
        assert!(renter.active_checkout.is_none());
        assert!(renter.checkout_started_at.is_none());
    }
}
