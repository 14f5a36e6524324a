/// Gallery state and view binding
///
/// The `Gallery` is what a presentation layer talks to: it holds the
/// displayed image list, the selection basket and the current search query,
/// keeps them converged with the catalog database, and notifies registered
/// listeners whenever any of the three changes.
///
/// - Basket operations (cart.rs)
/// - Title search (search.rs)

pub mod cart;
pub mod search;

use std::path::PathBuf;

use crate::error::Result;
use crate::store::catalog::Catalog;
use crate::store::data::{CartItem, ImageRecord};

/// Which piece of observable state changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    Images,
    Cart,
    SearchQuery,
}

/// Gallery configuration supplied by the embedding application.
#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// Base directory that image `url` fragments are resolved against
    pub image_root: PathBuf,
}

/// In-memory reactive view over the catalog.
///
/// The catalog handle is injected at construction and owned for the
/// gallery's whole lifetime; all mutation goes through `&mut self`, which
/// serializes basket operations and closes the memory/store race window
/// a callback-driven design would have.
pub struct Gallery {
    catalog: Catalog,
    config: GalleryConfig,
    images: Vec<ImageRecord>,
    cart: Vec<CartItem>,
    search_query: String,
    next_cart_id: i64,
    listeners: Vec<Box<dyn Fn(StateChange)>>,
}

impl Gallery {
    /// Create a gallery over an already-opened catalog. Call [`Gallery::mount`]
    /// before reading any state.
    pub fn new(catalog: Catalog, config: GalleryConfig) -> Self {
        Gallery {
            catalog,
            config,
            images: Vec::new(),
            cart: Vec::new(),
            search_query: String::new(),
            next_cart_id: 1,
            listeners: Vec::new(),
        }
    }

    /// Load both collections from the catalog, replacing the in-memory
    /// state. Safe to call more than once; a second mount refreshes the
    /// view instead of duplicating it.
    pub fn mount(&mut self) -> Result<()> {
        self.images = self.catalog.all_images()?;
        self.cart = self.catalog.all_cart_items()?;
        self.next_cart_id = self.catalog.next_cart_id()?;
        self.notify(StateChange::Images);
        self.notify(StateChange::Cart);
        Ok(())
    }

    /// Register a listener invoked after every state change.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: Fn(StateChange) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Currently displayed images (full collection or search results)
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    /// Current basket contents
    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    /// Last query passed to [`Gallery::perform_search`]
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Underlying catalog, for read-only queries from the embedding app
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn notify(&self, change: StateChange) {
        for listener in &self.listeners {
            listener(change);
        }
    }
}

impl std::fmt::Debug for Gallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("catalog", &self.catalog)
            .field("images", &self.images.len())
            .field("cart", &self.cart.len())
            .field("search_query", &self.search_query)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_mount_replaces_instead_of_appending() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::open(dir.path().join("test.db")).unwrap();
        catalog
            .bulk_insert_images(&[crate::store::seed::SeedRecord {
                title: "A".to_string(),
                url: "a.png".to_string(),
                weight: None,
            }])
            .unwrap();

        let mut gallery = Gallery::new(
            catalog,
            GalleryConfig {
                image_root: dir.path().to_path_buf(),
            },
        );
        gallery.mount().unwrap();
        gallery.mount().unwrap();
        assert_eq!(gallery.images().len(), 1);
    }

    #[test]
    fn test_listeners_observe_mount() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = Catalog::open(dir.path().join("test.db")).unwrap();
        let mut gallery = Gallery::new(
            catalog,
            GalleryConfig {
                image_root: dir.path().to_path_buf(),
            },
        );

        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        gallery.subscribe(move |change| sink.borrow_mut().push(change));

        gallery.mount().unwrap();
        assert_eq!(
            *seen.borrow(),
            vec![StateChange::Images, StateChange::Cart]
        );
    }
}
