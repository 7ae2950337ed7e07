//! Domain constants shared by every layer

/// Qualifier of the object-storage backup repository binding
pub const S3_REPOSITORY_QUALIFIER: &str = "s3";

/// Repository type reported by the object-storage backup repository
pub const S3_REPOSITORY_TYPE: &str = "s3";

/// Status string a discovery service reports for serving instances
pub const DISCOVERY_STATUS_UP: &str = "UP";

/// Prefix used when naming snapshots
pub const SNAPSHOT_NAME_PREFIX: &str = "snapshot";

/// Timestamp layout embedded in snapshot names
pub const SNAPSHOT_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M";
