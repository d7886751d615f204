//! Input validation helpers for the query facade
//!
//! Each helper either normalizes a parameter to a usable value or fails
//! with a `Validation` error carrying a corrective suggestion.

use radar_core::{RadarError, RadarResult};

/// Reject empty or whitespace-only keywords
pub fn validate_keyword(keyword: &str) -> RadarResult<String> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return Err(RadarError::validation_with(
            "keyword must not be empty",
            "pass a non-empty search keyword",
        ));
    }
    Ok(keyword.to_string())
}

/// Normalize a limit: missing or zero falls back to `default`, everything
/// above `max` is capped
pub fn validate_limit(limit: Option<usize>, default: usize, max: usize) -> usize {
    match limit {
        None | Some(0) => default,
        Some(n) => n.min(max),
    }
}

/// Normalize a top-N count, same policy as limits
pub fn validate_top_n(top_n: Option<usize>, default: usize, max: usize) -> usize {
    validate_limit(top_n, default, max)
}

/// Normalize a platform filter: trim, drop empties, de-duplicate keeping
/// order, and reject ids outside the whitelist (when one is configured)
pub fn validate_platforms(
    platforms: Option<Vec<String>>,
    allowed: &[String],
) -> RadarResult<Option<Vec<String>>> {
    let Some(platforms) = platforms else {
        return Ok(None);
    };

    let mut cleaned: Vec<String> = Vec::new();
    for platform in platforms {
        let platform = platform.trim();
        if platform.is_empty() || cleaned.iter().any(|p| p == platform) {
            continue;
        }
        if !allowed.is_empty() && !allowed.iter().any(|a| a == platform) {
            return Err(RadarError::validation_with(
                format!("unknown platform id: {platform:?}"),
                format!("known platforms: {}", allowed.join(", ")),
            ));
        }
        cleaned.push(platform.to_string());
    }

    if cleaned.is_empty() {
        Ok(None)
    } else {
        Ok(Some(cleaned))
    }
}

/// Check a mode string against the supported set, defaulting when absent
pub fn validate_mode<'a>(
    mode: Option<&str>,
    valid: &[&'a str],
    default: &'a str,
) -> RadarResult<&'a str> {
    let Some(mode) = mode else {
        return Ok(default);
    };
    valid
        .iter()
        .find(|candidate| **candidate == mode)
        .copied()
        .ok_or_else(|| {
            RadarError::validation_with(
                format!("unsupported mode: {mode:?}"),
                format!("supported modes: {}", valid.join(", ")),
            )
        })
}

/// Clamp the RSS search window into [1, 30] days, defaulting to 7
pub fn clamp_days(days: Option<i64>) -> i64 {
    days.unwrap_or(7).clamp(1, 30)
}
