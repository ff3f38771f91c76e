/// All metadata-store primary keys are SQLite INTEGER rowids.
pub type DbId = i64;
