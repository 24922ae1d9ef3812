//! Asset registry: sequential item ids and item records.
//!
//! Items are never deleted; retirement is a status. Ids ascend from 1
//! and are never reused, so a `BTreeMap` gives listings in id order
//! for free.

use std::collections::BTreeMap;

use rentra_shared::{Amount, ItemId};
use serde::{Deserialize, Serialize};

use super::error::LedgerError;

/// Availability status of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Withdrawn from circulation; not rentable.
    Retired,
    /// Currently held by exactly one renter.
    InUse,
    /// Rentable.
    Available,
}

/// Metadata supplied when creating or editing an item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSpec {
    /// Display name.
    pub name: String,
    /// Opaque image reference.
    pub image_url: String,
    /// Per-use fee in the smallest fee unit.
    pub per_use_fee: Amount,
    /// Informational sale price; no on-ledger sale is implemented.
    pub sale_price: Amount,
}

/// A listed item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Sequential id, assigned at listing time.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Opaque image reference.
    pub image_url: String,
    /// Per-use fee in the smallest fee unit.
    pub per_use_fee: Amount,
    /// Informational sale price.
    pub sale_price: Amount,
    /// Current availability status.
    pub status: ItemStatus,
}

/// Mapping of item id to item record.
#[derive(Debug)]
pub struct Registry {
    items: BTreeMap<ItemId, Item>,
    next_id: ItemId,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            next_id: ItemId::FIRST,
        }
    }
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lists a new item as Available and returns its id.
    pub fn add(&mut self, spec: ItemSpec) -> ItemId {
        let id = self.next_id;
        self.next_id = id.next();
        self.items.insert(
            id,
            Item {
                id,
                name: spec.name,
                image_url: spec.image_url,
                per_use_fee: spec.per_use_fee,
                sale_price: spec.sale_price,
                status: ItemStatus::Available,
            },
        );
        id
    }

    /// Looks up an item.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` for unknown ids.
    pub fn get(&self, id: ItemId) -> Result<&Item, LedgerError> {
        self.items.get(&id).ok_or(LedgerError::ItemNotFound(id))
    }

    /// All items with the given status, in ascending id order.
    #[must_use]
    pub fn by_status(&self, status: ItemStatus) -> Vec<&Item> {
        self.items
            .values()
            .filter(|item| item.status == status)
            .collect()
    }

    /// Replaces an item's metadata.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` for unknown ids.
    pub fn edit_metadata(&mut self, id: ItemId, spec: ItemSpec) -> Result<(), LedgerError> {
        let item = self.get_mut(id)?;
        item.name = spec.name;
        item.image_url = spec.image_url;
        item.per_use_fee = spec.per_use_fee;
        item.sale_price = spec.sale_price;
        Ok(())
    }

    /// Moves an item between Available and Retired.
    ///
    /// Transitions involving `InUse` are reserved to the checkout state
    /// machine: a held item cannot be edited away from `InUse`, and the
    /// operator cannot mark an item `InUse` by hand. This keeps the
    /// "InUse iff held" invariant intact by construction.
    ///
    /// # Errors
    ///
    /// Returns `ItemNotFound` for unknown ids and `InvalidStatusChange`
    /// for transitions involving `InUse`.
    pub fn edit_status(&mut self, id: ItemId, status: ItemStatus) -> Result<(), LedgerError> {
        let item = self.get_mut(id)?;
        if status == ItemStatus::InUse || item.status == ItemStatus::InUse {
            return Err(LedgerError::InvalidStatusChange(id));
        }
        item.status = status;
        Ok(())
    }

    /// Sets the status from the checkout state machine.
    pub(super) fn set_status(&mut self, id: ItemId, status: ItemStatus) -> Result<(), LedgerError> {
        self.get_mut(id)?.status = status;
        Ok(())
    }

    fn get_mut(&mut self, id: ItemId) -> Result<&mut Item, LedgerError> {
        self.items.get_mut(&id).ok_or(LedgerError::ItemNotFound(id))
    }

    /// Number of listed items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if no item has been listed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
