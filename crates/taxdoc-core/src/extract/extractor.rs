//! Keyword-driven numeric field extractor.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::trace;

use super::patterns::keyword_patterns;

/// Extract a numeric value for a field named by `keywords`.
///
/// Keywords are tried in order; for each, the four pattern templates
/// are tried in priority order. The first capture that parses as a
/// number wins immediately. A capture that fails to parse (for
/// example an overlong digit run) is treated as a non-match and the
/// search continues. Returns `default` when nothing matches.
pub fn extract_field(text: &str, keywords: &[&str], default: Decimal) -> Decimal {
    for kw in keywords {
        for (i, pattern) in keyword_patterns(kw).iter().enumerate() {
            let Some(caps) = pattern.captures(text) else {
                continue;
            };
            let raw = &caps[1];
            // Strip grouping commas ("10,00,000") before parsing.
            let cleaned = raw.replace(',', "");
            match Decimal::from_str(&cleaned) {
                Ok(value) => {
                    trace!("matched {:?} via pattern {} -> {}", kw, i + 1, value);
                    return value;
                }
                Err(_) => {
                    trace!("capture {:?} for {:?} is not numeric, continuing", raw, kw);
                    continue;
                }
            }
        }
    }

    default
}
