//! Time helpers

/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Current UTC timestamp as an RFC 3339 string
///
/// Order creation times are stored in this form so exported rows stay
/// human-readable and sortable as text.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
