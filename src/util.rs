use sha2::{Digest, Sha256};

/// SHA-256 over length-prefixed parts, hex encoded. Parts may contain any
/// text, separators included.
pub fn fingerprint(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// `part / total` as a percentage, 0 when `total` is 0.
pub fn percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_separates_parts() {
        assert_ne!(fingerprint(&["ab", "c"]), fingerprint(&["a", "bc"]));
        assert_ne!(fingerprint(&["x|", "y"]), fingerprint(&["x", "|y"]));
        assert_ne!(fingerprint(&["", "a"]), fingerprint(&["a", ""]));
        assert_eq!(fingerprint(&["x"]).len(), 64);
    }

    #[test]
    fn test_percentage_guards_zero_total() {
        assert_eq!(percentage(3, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
    }

    #[test]
    fn test_contains_ci() {
        assert!(contains_ci("Hanoi Metro", "metro"));
        assert!(contains_ci("anything", ""));
        assert!(!contains_ci("Saigon", "hue"));
    }
}
