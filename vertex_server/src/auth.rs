//! The admin gate.
//!
//! A stateless allowlist check driven by the `x-telegram-user-id` header the mini-app sends.
//! The header is caller-supplied and unauthenticated; this is a known trust-boundary weakness
//! carried over from the original design (see DESIGN.md). A real deployment should verify the
//! signed Telegram `initData` payload instead.

use std::collections::HashSet;

use crate::errors::AuthError;

pub const ADMIN_ID_HEADER: &str = "x-telegram-user-id";

/// Check a caller-supplied id against the static allowlist. Returns the parsed id on success.
pub fn check_admin(header: Option<&str>, allowlist: &HashSet<i64>) -> Result<i64, AuthError> {
    let raw = header.ok_or(AuthError::Required)?;
    let id = raw.trim().parse::<i64>().map_err(|_| AuthError::Denied)?;
    if allowlist.contains(&id) {
        Ok(id)
    } else {
        Err(AuthError::Denied)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn allowlist() -> HashSet<i64> {
        [5124192112, 42].into_iter().collect()
    }

    #[test]
    fn allowlisted_ids_are_granted() {
        assert_eq!(check_admin(Some("5124192112"), &allowlist()).unwrap(), 5124192112);
        assert_eq!(check_admin(Some(" 42 "), &allowlist()).unwrap(), 42);
    }

    #[test]
    fn missing_header_requires_auth() {
        assert!(matches!(check_admin(None, &allowlist()), Err(AuthError::Required)));
    }

    #[test]
    fn unknown_and_malformed_ids_are_denied() {
        assert!(matches!(check_admin(Some("7"), &allowlist()), Err(AuthError::Denied)));
        assert!(matches!(check_admin(Some("not-a-number"), &allowlist()), Err(AuthError::Denied)));
        assert!(matches!(check_admin(Some(""), &allowlist()), Err(AuthError::Denied)));
    }
}
