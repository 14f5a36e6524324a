/// Title search over the displayed image collection
///
/// Queries shorter than the minimum gate drop the filter entirely and
/// reload the full collection, so clearing the search box restores the
/// unfiltered gallery. The catalog itself is never mutated by a search.

use tracing::debug;

use super::{Gallery, StateChange};
use crate::error::Result;

/// Queries below this length reload the full collection instead of filtering.
const MIN_QUERY_LEN: usize = 3;

impl Gallery {
    /// Filter the displayed images by a case-insensitive title substring.
    pub fn perform_search(&mut self, query: &str) -> Result<()> {
        self.search_query = query.to_string();
        self.notify(StateChange::SearchQuery);

        let needle = query.trim().to_lowercase();
        if needle.len() < MIN_QUERY_LEN {
            self.images = self.catalog.all_images()?;
        } else {
            self.images = self
                .catalog
                .filter_images(|image| image.title.to_lowercase().contains(&needle))?;
        }

        debug!(query = %needle, hits = self.images.len(), "search applied");
        self.notify(StateChange::Images);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::GalleryConfig;
    use crate::store::catalog::Catalog;
    use crate::store::seed::SeedRecord;

    fn gallery() -> (tempfile::TempDir, Gallery) {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = Catalog::open(dir.path().join("test.db")).unwrap();
        let records: Vec<SeedRecord> = [
            ("Tabby Cat", "tabby.png"),
            ("Catnip Field", "catnip.png"),
            ("Beagle", "beagle.png"),
        ]
        .iter()
        .map(|(title, url)| SeedRecord {
            title: title.to_string(),
            url: url.to_string(),
            weight: None,
        })
        .collect();
        catalog.bulk_insert_images(&records).unwrap();

        let mut gallery = Gallery::new(
            catalog,
            GalleryConfig {
                image_root: dir.path().to_path_buf(),
            },
        );
        gallery.mount().unwrap();
        (dir, gallery)
    }

    #[test]
    fn test_search_filters_case_insensitively() {
        let (_dir, mut gallery) = gallery();
        gallery.perform_search("CAT").unwrap();

        let titles: Vec<&str> = gallery
            .images()
            .iter()
            .map(|image| image.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Tabby Cat", "Catnip Field"]);
        assert_eq!(gallery.search_query(), "CAT");
    }

    #[test]
    fn test_short_query_restores_full_collection() {
        let (_dir, mut gallery) = gallery();
        gallery.perform_search("cat").unwrap();
        assert_eq!(gallery.images().len(), 2);

        gallery.perform_search("ab").unwrap();
        assert_eq!(gallery.images().len(), 3);

        gallery.perform_search("").unwrap();
        assert_eq!(gallery.images().len(), 3);
    }

    #[test]
    fn test_query_is_trimmed_before_the_gate() {
        let (_dir, mut gallery) = gallery();
        // Three characters of padding around a two-letter query is still
        // below the gate once trimmed.
        gallery.perform_search("  ca  ").unwrap();
        assert_eq!(gallery.images().len(), 3);

        gallery.perform_search(" cat ").unwrap();
        assert_eq!(gallery.images().len(), 2);
    }

    #[test]
    fn test_no_match_yields_empty_view() {
        let (_dir, mut gallery) = gallery();
        gallery.perform_search("zebra").unwrap();
        assert!(gallery.images().is_empty());
        // Store untouched
        assert_eq!(gallery.catalog().image_count().unwrap(), 3);
    }
}
