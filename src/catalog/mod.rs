// Catalog: validated, immutable item snapshots and the ingestion that builds them.

pub mod ingest;
pub mod models;
