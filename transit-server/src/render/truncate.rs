//! Size bound for text responses.

/// Most characters a text response may carry before it is cut.
pub const CHARACTER_LIMIT: usize = 25_000;

/// Characters kept from an over-long body, leaving room for the notice.
pub const TRUNCATED_LENGTH: usize = CHARACTER_LIMIT - 100;

/// Format a count with comma thousands separators.
///
/// # Examples
///
/// ```
/// use transit_server::render::format_thousands;
///
/// assert_eq!(format_thousands(25_000), "25,000");
/// assert_eq!(format_thousands(999), "999");
/// assert_eq!(format_thousands(1_234_567), "1,234,567");
/// ```
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// The notice appended to a cut body.
pub fn truncation_notice() -> String {
    format!(
        "\n\n---\n⚠️ 응답이 {}자 제한을 초과하여 잘렸습니다. 결과 수(limit)를 줄여 다시 요청하세요.",
        format_thousands(CHARACTER_LIMIT)
    )
}

/// Cut `body` to the character limit.
///
/// Bodies within the limit come back unchanged. Longer bodies keep their
/// first `TRUNCATED_LENGTH` characters followed by the notice. Returns the
/// body and whether it was cut.
pub fn enforce_limit(body: String) -> (String, bool) {
    if body.chars().count() <= CHARACTER_LIMIT {
        return (body, false);
    }

    let mut cut: String = body.chars().take(TRUNCATED_LENGTH).collect();
    cut.push_str(&truncation_notice());
    (cut, true)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn output_length_is_bounded(extra in 1usize..5000, c in prop::sample::select(vec!['a', '가', '🚇'])) {
            let body: String = std::iter::repeat_n(c, CHARACTER_LIMIT + extra).collect();
            let (out, cut) = enforce_limit(body);

            prop_assert!(cut);
            prop_assert_eq!(
                out.chars().count(),
                TRUNCATED_LENGTH + truncation_notice().chars().count()
            );
        }

        #[test]
        fn within_limit_is_identity(len in 0usize..=CHARACTER_LIMIT) {
            let body = "x".repeat(len);
            let (out, cut) = enforce_limit(body.clone());
            prop_assert!(!cut);
            prop_assert_eq!(out, body);
        }
    }
}
