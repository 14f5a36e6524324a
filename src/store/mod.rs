/// Persistence module
///
/// Everything that touches the SQLite database lives here:
/// - Database connection, schema and queries (catalog.rs)
/// - Shared data structures (data.rs)
/// - Bulk manifest loading for first-run seeding (seed.rs)

pub mod catalog;
pub mod data;
pub mod seed;
