/// Selection basket operations
///
/// Adding an image materializes a self-contained basket entry: the image
/// bytes are fetched from the image root, checked for a known image
/// signature, base64-encoded and persisted alongside the image's fields.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::{debug, warn};

use super::{Gallery, StateChange};
use crate::error::{CatalogError, Result};
use crate::store::data::CartItem;

impl Gallery {
    /// Add an image to the basket.
    ///
    /// The fetch-and-encode step runs before any state changes, so a
    /// missing or non-image file aborts the add cleanly. A store failure
    /// after the in-memory append is logged and returned without rolling
    /// the append back; the next [`Gallery::mount`] reconverges.
    pub fn add_to_cart(&mut self, image_id: i64) -> Result<()> {
        let image = match self.images.iter().find(|image| image.id == image_id) {
            Some(image) => image.clone(),
            // The displayed list may be filtered; fall back to the store.
            None => self.catalog.image(image_id)?,
        };

        let path = self.config.image_root.join(&image.url);
        let bytes = std::fs::read(&path).map_err(|e| {
            warn!(url = %image.url, "image fetch failed: {e}");
            CatalogError::Io(e)
        })?;
        if image::guess_format(&bytes).is_err() {
            warn!(url = %image.url, "payload has no known image signature");
            return Err(CatalogError::NotAnImage(image.url));
        }

        let item = CartItem {
            id: self.next_cart_id,
            image_id: image.id,
            title: image.title,
            url: image.url,
            weight: image.weight,
            file_size: bytes.len() as u64,
            image_data: BASE64.encode(&bytes),
            added_at: chrono::Utc::now().timestamp(),
        };
        self.next_cart_id += 1;

        self.cart.push(item.clone());
        self.notify(StateChange::Cart);
        debug!(image_id, cart_id = item.id, "added to basket");

        if let Err(e) = self.catalog.put_cart_item(&item) {
            warn!(cart_id = item.id, "basket persist failed: {e}");
            return Err(e);
        }
        Ok(())
    }

    /// Remove a basket entry by its basket-local id.
    pub fn remove_from_cart(&mut self, cart_id: i64) -> Result<()> {
        self.cart.retain(|item| item.id != cart_id);
        self.notify(StateChange::Cart);
        debug!(cart_id, "removed from basket");

        if let Err(e) = self.catalog.delete_cart_item(cart_id) {
            warn!(cart_id, "basket delete failed: {e}");
            return Err(e);
        }
        Ok(())
    }

    /// Whether the basket already holds an entry for this image.
    pub fn is_in_cart(&self, image_id: i64) -> bool {
        self.cart.iter().any(|item| item.image_id == image_id)
    }

    /// Remove the image's basket entry if present, add one otherwise.
    pub fn toggle_selection(&mut self, image_id: i64) -> Result<()> {
        let existing = self
            .cart
            .iter()
            .find(|item| item.image_id == image_id)
            .map(|item| item.id);

        match existing {
            Some(cart_id) => self.remove_from_cart(cart_id),
            None => self.add_to_cart(image_id),
        }
    }
}
