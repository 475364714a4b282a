use proptest::prelude::*;

use legit_types::{ProductId, Timestamp, TypesError};

proptest! {
    /// ProductId::parse succeeds exactly when the trimmed input is non-empty.
    #[test]
    fn product_id_parse_matches_trim(raw in "\\PC{0,24}") {
        let result = ProductId::parse(&raw);
        if raw.trim().is_empty() {
            prop_assert_eq!(result, Err(TypesError::EmptyProductId));
        } else {
            let id = result.unwrap();
            prop_assert_eq!(id.as_str(), raw.trim());
        }
    }

    /// Whitespace-only input never yields an id.
    #[test]
    fn whitespace_only_is_rejected(raw in "[ \\t\\r\\n]{0,16}") {
        prop_assert!(ProductId::parse(&raw).is_err());
    }

    /// Surrounding whitespace does not change the parsed id.
    #[test]
    fn padding_is_ignored(core in "[A-Z0-9-]{1,20}", left in " {0,4}", right in " {0,4}") {
        let padded = format!("{left}{core}{right}");
        prop_assert_eq!(ProductId::parse(&padded).unwrap(), ProductId::parse(&core).unwrap());
    }

    /// Timestamp ordering: new(a) <= new(b) iff a <= b.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }
}
