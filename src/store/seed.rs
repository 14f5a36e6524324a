/// Bulk manifest loader
///
/// Parses the comma-separated manifest that seeds a brand-new catalog:
/// line 0 names the columns, every later line is one image. The format is
/// deliberately naive — values are not unescaped, so a comma inside a value
/// shifts the row and surfaces as an arity error.

use std::path::Path;
use tracing::{debug, warn};

use super::catalog::Catalog;
use crate::error::{CatalogError, Result};

/// Columns the manifest may name. `title` and `url` are required,
/// `weight` is optional; anything else is a load error.
const KNOWN_COLUMNS: [&str; 3] = ["title", "url", "weight"];
const REQUIRED_COLUMNS: [&str; 2] = ["title", "url"];

/// One validated manifest row, ready for insertion.
/// The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedRecord {
    pub title: String,
    pub url: String,
    pub weight: Option<f64>,
}

/// Parse manifest text into validated records.
///
/// Header columns are matched against the known set; rows are mapped
/// positionally with each value trimmed. A trailing blank line is ignored
/// rather than producing a spurious empty record.
pub fn parse_manifest(text: &str) -> Result<Vec<SeedRecord>> {
    let mut lines = text.lines();
    let header_line = lines.next().ok_or(CatalogError::EmptyManifest)?;

    let header: Vec<&str> = header_line.split(',').map(str::trim).collect();
    for column in &header {
        if !KNOWN_COLUMNS.contains(column) {
            return Err(CatalogError::UnknownColumn(column.to_string()));
        }
    }
    for required in REQUIRED_COLUMNS {
        if !header.contains(&required) {
            return Err(CatalogError::MissingColumn(required.to_string()));
        }
    }

    let title_at = position(&header, "title");
    let url_at = position(&header, "url");
    let weight_at = header.iter().position(|c| *c == "weight");

    let mut records = Vec::new();
    for (index, line) in lines.enumerate() {
        // Source files commonly end with a newline; skip the blank tail.
        if line.trim().is_empty() {
            continue;
        }

        let values: Vec<&str> = line.split(',').map(str::trim).collect();
        if values.len() != header.len() {
            return Err(CatalogError::RowArity {
                line: index + 2,
                expected: header.len(),
                found: values.len(),
            });
        }

        let weight = weight_at.and_then(|at| {
            let raw = values[at];
            match raw.parse::<f64>() {
                Ok(w) => Some(w),
                Err(_) => {
                    if !raw.is_empty() {
                        debug!(value = raw, "non-numeric weight, treating as absent");
                    }
                    None
                }
            }
        });

        records.push(SeedRecord {
            title: values[title_at].to_string(),
            url: values[url_at].to_string(),
            weight,
        });
    }

    Ok(records)
}

fn position(header: &[&str], column: &str) -> usize {
    // Presence was validated above
    header.iter().position(|c| *c == column).unwrap_or(0)
}

/// Read a manifest file and bulk-insert its records into the catalog.
///
/// Intended as the populate-once seeder: any failure is logged and
/// swallowed, leaving the store empty instead of crashing startup.
pub fn seed_catalog(catalog: &mut Catalog, manifest: &Path) -> Result<usize> {
    let text = std::fs::read_to_string(manifest)?;
    let records = parse_manifest(&text)?;
    let count = catalog.bulk_insert_images(&records)?;
    debug!(count, manifest = %manifest.display(), "manifest loaded");
    Ok(count)
}

/// Wrapper around [`seed_catalog`] with the swallow-and-log policy applied,
/// for use directly as an `open_with_seed` callback.
pub fn seed_catalog_logged(catalog: &mut Catalog, manifest: &Path) -> Result<usize> {
    match seed_catalog(catalog, manifest) {
        Ok(count) => Ok(count),
        Err(e) => {
            warn!(manifest = %manifest.display(), "bulk load failed: {e}");
            Ok(0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_manifest() {
        let records = parse_manifest("title,url\nWhiskers,cats/whiskers.png\nRex,dogs/rex.png").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Whiskers");
        assert_eq!(records[0].url, "cats/whiskers.png");
        assert_eq!(records[0].weight, None);
    }

    #[test]
    fn test_values_are_trimmed() {
        let records = parse_manifest("title, url ,weight\n Whiskers , whiskers.png , 2.5 ").unwrap();
        assert_eq!(records[0].title, "Whiskers");
        assert_eq!(records[0].url, "whiskers.png");
        assert_eq!(records[0].weight, Some(2.5));
    }

    #[test]
    fn test_trailing_blank_line_is_ignored() {
        let records = parse_manifest("title,url\nWhiskers,whiskers.png\n").unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_column_order_does_not_matter() {
        let records = parse_manifest("url,weight,title\nwhiskers.png,1.25,Whiskers").unwrap();
        assert_eq!(records[0].title, "Whiskers");
        assert_eq!(records[0].weight, Some(1.25));
    }

    #[test]
    fn test_unknown_column_is_an_error() {
        let result = parse_manifest("title,url,price\nA,a.png,10");
        assert!(matches!(result, Err(CatalogError::UnknownColumn(c)) if c == "price"));
    }

    #[test]
    fn test_missing_required_column_is_an_error() {
        let result = parse_manifest("title,weight\nA,1.0");
        assert!(matches!(result, Err(CatalogError::MissingColumn(c)) if c == "url"));
    }

    #[test]
    fn test_embedded_comma_shifts_the_row() {
        // Naive splitting is the documented format limitation: the extra
        // comma shows up as an arity error, never as silently shifted fields.
        let result = parse_manifest("title,url\nWhiskers, the cat,whiskers.png");
        assert!(matches!(
            result,
            Err(CatalogError::RowArity { line: 2, expected: 2, found: 3 })
        ));
    }

    #[test]
    fn test_non_numeric_weight_is_absent() {
        let records = parse_manifest("title,url,weight\nA,a.png,heavy").unwrap();
        assert_eq!(records[0].weight, None);
    }

    #[test]
    fn test_empty_manifest_is_an_error() {
        assert!(matches!(parse_manifest(""), Err(CatalogError::EmptyManifest)));
    }
}
