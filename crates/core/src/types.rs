/// Integer keys for clinics, patients, doctors, rooms and appointment types.
pub type DbId = i64;

/// Aggregate and entity identity (schedules, appointments).
pub type EntityId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
