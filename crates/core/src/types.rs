/// Cuts, frames, messages and history records are keyed by opaque strings.
///
/// Seed data uses short human ids (`"1"`, `"1-2"`); ids minted at runtime
/// are UUID v4 based. See [`new_id`].
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Mint a fresh, globally unique entity id.
pub fn new_id() -> EntityId {
    uuid::Uuid::new_v4().to_string()
}

/// Mint a frame id scoped under its owning cut, e.g. `"3-5f0c..."`.
pub fn new_frame_id(cut_id: &str) -> EntityId {
    format!("{cut_id}-{}", uuid::Uuid::new_v4().simple())
}
