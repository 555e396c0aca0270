//! Credential fingerprints for namespacing cache keys.

/// Number of trailing token characters kept in a fingerprint.
pub const FINGERPRINT_LEN: usize = 6;

/// Returns the last [`FINGERPRINT_LEN`] characters of `token`.
///
/// Tokens shorter than that are used whole.
pub fn credential_fingerprint(token: &str) -> String {
    let len = token.chars().count();
    token.chars().skip(len.saturating_sub(FINGERPRINT_LEN)).collect()
}

/// Builds the cache key `"{logical_key}_{fingerprint}"`.
pub fn cache_key(logical_key: &str, token: &str) -> String {
    format!("{}_{}", logical_key, credential_fingerprint(token))
}
