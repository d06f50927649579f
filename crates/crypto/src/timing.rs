//! Constant-time comparison for request hashes.

use subtle::ConstantTimeEq;

/// Compare two byte slices in constant time.
///
/// Only the length check short-circuits; equal-length inputs are compared
/// without early exit so a hash mismatch leaks no prefix information.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_digests() {
        let digest = "af45d2e376484031617f78d2b58a6b1b";
        assert!(constant_time_compare(digest.as_bytes(), digest.as_bytes()));
    }

    #[test]
    fn test_last_byte_differs() {
        assert!(!constant_time_compare(b"af45d2e3", b"af45d2e4"));
    }

    #[test]
    fn test_different_lengths() {
        assert!(!constant_time_compare(b"af45", b"af45d2"));
    }

    #[test]
    fn test_empty_slices() {
        assert!(constant_time_compare(b"", b""));
    }
}
