//! Result truncation and limit parsing

/// Limit used when the caller gives none or an unusable one
pub const DEFAULT_LIMIT: usize = 50;

/// Keep at most `limit` items, preserving order
pub fn paginate<T>(mut ordered: Vec<T>, limit: usize) -> Vec<T> {
    ordered.truncate(limit);
    ordered
}

/// Parse a raw `limit` parameter, falling back to [`DEFAULT_LIMIT`]
pub fn parse_limit(raw: Option<&str>) -> usize {
    parse_limit_or(raw, DEFAULT_LIMIT)
}

/// Parse a raw `limit` parameter, falling back to `default`
pub fn parse_limit_or(raw: Option<&str>, default: usize) -> usize {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return default;
    };

    match raw.parse::<usize>() {
        Ok(limit) => limit,
        Err(_) => {
            tracing::debug!(value = raw, default, "invalid limit parameter, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_truncates_in_order() {
        assert_eq!(paginate(vec![1, 2, 3, 4, 5], 2), vec![1, 2]);
        assert_eq!(paginate(vec![1, 2], 10), vec![1, 2]);
        assert!(paginate(vec![1, 2], 0).is_empty());
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(None), 50);
        assert_eq!(parse_limit(Some("")), 50);
        assert_eq!(parse_limit(Some("10")), 10);
        assert_eq!(parse_limit(Some(" 7 ")), 7);
        assert_eq!(parse_limit(Some("ten")), 50);
        assert_eq!(parse_limit(Some("-3")), 50);
        assert_eq!(parse_limit(Some("0")), 0);
        assert_eq!(parse_limit_or(Some("x"), 20), 20);
    }
}
