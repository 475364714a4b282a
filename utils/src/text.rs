//! Text shortening for long ledger addresses.

/// Shorten `s` to its first `head` and last `tail` characters joined by `...`.
///
/// Strings no longer than `head + tail` characters are returned untouched.
/// Counts characters, not bytes, so multi-byte input never splits.
pub fn truncate_middle(s: &str, head: usize, tail: usize) -> String {
    let count = s.chars().count();
    if count <= head + tail {
        return s.to_string();
    }
    let start: String = s.chars().take(head).collect();
    let end: String = s.chars().skip(count - tail).collect();
    format!("{start}...{end}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn shortens_stellar_address() {
        assert_eq!(
            truncate_middle("GABCDEFGHIJKLMNOPQRSTUVWX", 10, 5),
            "GABCDEFGHI...TUVWX"
        );
    }

    #[test]
    fn short_strings_pass_through() {
        assert_eq!(truncate_middle("GXYZ", 10, 5), "GXYZ");
        assert_eq!(truncate_middle("GXYZ1234567890A", 10, 5), "GXYZ1234567890A");
    }

    #[test]
    fn multibyte_input_is_not_split() {
        assert_eq!(truncate_middle("ääääääääääääääääää", 2, 2), "ää...ää");
    }

    proptest! {
        #[test]
        fn long_input_keeps_head_and_tail(s in "[A-Z0-9]{16,64}") {
            let out = truncate_middle(&s, 10, 5);
            prop_assert!(out.starts_with(&s[..10]));
            prop_assert!(out.ends_with(&s[s.len() - 5..]));
            prop_assert_eq!(out.len(), 18);
        }
    }
}
