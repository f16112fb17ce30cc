/// Identifier assigned by the store to every persisted record
pub type RecordId = i32;

/// Page index used when listing paginated records
pub type PageIndex = u64;
