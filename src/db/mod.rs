pub mod appointments;
pub mod clients;
pub mod invitations;
pub mod refresh_tokens;
pub mod services;
pub mod stylists;
pub mod users;

/// Translate an `ordering` query parameter (e.g. "-created_at") into an
/// ORDER BY fragment. Only whitelisted column names are interpolated;
/// anything else falls back to the default.
pub(crate) fn ordering_clause(ordering: Option<&str>, allowed: &[&str], default: &str) -> String {
    let Some(raw) = ordering else {
        return default.to_string();
    };
    let (column, direction) = match raw.strip_prefix('-') {
        Some(column) => (column, "DESC"),
        None => (raw, "ASC"),
    };
    if allowed.contains(&column) {
        format!("{column} {direction}")
    } else {
        default.to_string()
    }
}
