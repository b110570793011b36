//! Cart snapshot persistence in a single key-value slot.
//!
//! Persistence never fails the caller: a slot that cannot be read or holds
//! garbage restores as an empty cart, and a failed write leaves the
//! in-memory cart as the source of truth for the rest of the session.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::cart::{Cart, CartError, ItemAdded, LineKey};
use crate::products::Product;

/// Slot key the cart snapshot is stored under.
pub const CART_SLOT_KEY: &str = "bcb-cart";

#[derive(Debug, Error)]
pub enum SlotError {
    #[error("I/O error on slot \"{key}\": {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid slot key \"{0}\"")]
    InvalidKey(String),
}

/// A string-keyed text store with overwrite semantics.
pub trait CartSlot {
    /// Returns the stored value, or `None` if nothing was ever written.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, SlotError>;

    /// Overwrites the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SlotError`] if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SlotError>;
}

/// In-process slot, used by tests and by callers that opt out of persistence.
#[derive(Debug, Default, Clone)]
pub struct MemorySlot {
    values: HashMap<String, String>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartSlot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Slot backed by one `<key>.json` file per key under a directory.
///
/// Writes go to a temporary sibling file first and are renamed into place so
/// a crash mid-write never leaves a truncated snapshot behind.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, SlotError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(SlotError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl CartSlot for FileSlot {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SlotError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SlotError> {
        let path = self.path_for(key)?;
        let io_err = |source| SlotError::Io {
            key: key.to_owned(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(io_err)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(io_err)?;
        std::fs::rename(&tmp, &path).map_err(io_err)
    }
}

/// Reads the persisted cart snapshot.
///
/// Missing, unreadable, or unparsable data yields an empty cart.
pub fn restore_cart<S: CartSlot + ?Sized>(slot: &S) -> Cart {
    let raw = match slot.get(CART_SLOT_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            tracing::warn!(error = %e, "cart slot unreadable; starting with an empty cart");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Cart>(&raw) {
        Ok(cart) => {
            tracing::debug!(lines = cart.len(), "cart restored from slot");
            cart
        }
        Err(e) => {
            tracing::warn!(error = %e, "stored cart snapshot is corrupt; starting with an empty cart");
            Cart::new()
        }
    }
}

/// Writes `cart` to the slot. Failures are logged and swallowed.
///
/// Returns `true` if the snapshot was written.
pub fn persist_cart<S: CartSlot + ?Sized>(slot: &mut S, cart: &Cart) -> bool {
    let json = match serde_json::to_string(cart) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize cart snapshot");
            return false;
        }
    };
    match slot.set(CART_SLOT_KEY, &json) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "failed to persist cart snapshot; keeping in-memory cart");
            false
        }
    }
}

/// Owns the current cart snapshot and the slot it is persisted to.
///
/// Each operation runs the matching [`Cart`] operation, swaps in the new
/// snapshot, and persists it.
#[derive(Debug)]
pub struct CartSession<S: CartSlot> {
    cart: Cart,
    slot: S,
}

impl<S: CartSlot> CartSession<S> {
    /// Opens a session, restoring whatever snapshot the slot holds.
    #[must_use]
    pub fn open(slot: S) -> Self {
        let cart = restore_cart(&slot);
        Self { cart, slot }
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// # Errors
    ///
    /// Propagates [`CartError`] from [`Cart::add_item`]; the session is
    /// unchanged and nothing is persisted.
    pub fn add_item(
        &mut self,
        product: &Product,
        size: &str,
        color: &str,
        quantity: u32,
    ) -> Result<ItemAdded, CartError> {
        let (cart, added) = self.cart.add_item(product, size, color, quantity)?;
        self.replace(cart);
        Ok(added)
    }

    pub fn update_quantity(&mut self, key: &LineKey, delta: i64) {
        let cart = self.cart.update_quantity(key, delta);
        self.replace(cart);
    }

    pub fn remove_line(&mut self, key: &LineKey) {
        let cart = self.cart.remove_line(key);
        self.replace(cart);
    }

    pub fn clear(&mut self) {
        self.replace(Cart::new());
    }

    fn replace(&mut self, cart: Cart) {
        self.cart = cart;
        persist_cart(&mut self.slot, &self.cart);
    }
}
