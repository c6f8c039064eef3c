//! Tenant namespacing
//!
//! All persisted collections are scoped under a key derived from the tenant
//! display name. Changing the tenant name does not migrate data; it switches
//! to a different (possibly empty) namespace.

/// Derive the storage namespace key for a tenant name.
///
/// Deterministic and total: lowercases the name and joins whitespace runs
/// with hyphens. Two tenants normalizing to the same key share a namespace,
/// which is accepted behavior, not a collision to detect.
pub fn namespace_key(tenant_name: &str) -> String {
    tenant_name
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Storage key for the Model collection of a namespace
pub fn models_key(namespace: &str) -> String {
    format!("{namespace}.models")
}

/// Storage key for the Order collection of a namespace
pub fn orders_key(namespace: &str) -> String {
    format!("{namespace}.orders")
}

/// Global (non-namespaced) key remembering the active tenant name
pub const TENANT_NAME_KEY: &str = "tenantName";
