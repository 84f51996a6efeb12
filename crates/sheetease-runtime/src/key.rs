use thiserror::Error as ThisError;

/// Multiplier of the composite key scheme. `46340² < i32::MAX`, so any
/// pair of sub-keys in `[0, 46340)` combines into a distinct `i32`.
pub const COMPOSITE_MULTIPLIER: i32 = 46340;

///
/// KeyRangeError
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum KeyRangeError {
    #[error("composite sub-key {position} is {value}, expected 0..{COMPOSITE_MULTIPLIER}")]
    SubKey { position: u8, value: i32 },

    #[error("composite key {0} is negative")]
    Negative(i32),

    #[error("composite key {0} is beyond the largest combinable key")]
    TooLarge(i32),
}

/// `key1 * 46340 + key2`, with both sub-keys range checked.
pub const fn combine_key(key1: i32, key2: i32) -> Result<i32, KeyRangeError> {
    if key1 < 0 || key1 >= COMPOSITE_MULTIPLIER {
        return Err(KeyRangeError::SubKey {
            position: 1,
            value: key1,
        });
    }
    if key2 < 0 || key2 >= COMPOSITE_MULTIPLIER {
        return Err(KeyRangeError::SubKey {
            position: 2,
            value: key2,
        });
    }

    Ok(key1 * COMPOSITE_MULTIPLIER + key2)
}

/// Inverse of [`combine_key`].
pub const fn split_key(key: i32) -> Result<(i32, i32), KeyRangeError> {
    if key < 0 {
        return Err(KeyRangeError::Negative(key));
    }
    if key / COMPOSITE_MULTIPLIER >= COMPOSITE_MULTIPLIER {
        return Err(KeyRangeError::TooLarge(key));
    }

    Ok((key / COMPOSITE_MULTIPLIER, key % COMPOSITE_MULTIPLIER))
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bounds_are_enforced() {
        assert_eq!(combine_key(0, 0), Ok(0));
        assert_eq!(combine_key(1, 2), Ok(46342));
        assert_eq!(combine_key(46339, 46339), Ok(2_147_395_599));
        assert_eq!(
            combine_key(46340, 0),
            Err(KeyRangeError::SubKey {
                position: 1,
                value: 46340
            })
        );
        assert_eq!(
            combine_key(0, -1),
            Err(KeyRangeError::SubKey {
                position: 2,
                value: -1
            })
        );
        assert_eq!(split_key(-5), Err(KeyRangeError::Negative(-5)));
    }

    #[test]
    fn split_rejects_keys_combine_cannot_produce() {
        assert_eq!(split_key(2_147_395_599), Ok((46339, 46339)));
        assert_eq!(split_key(2_147_395_600), Err(KeyRangeError::TooLarge(2_147_395_600)));
        assert_eq!(split_key(i32::MAX), Err(KeyRangeError::TooLarge(i32::MAX)));
    }

    proptest! {
        #[test]
        fn split_inverts_combine(a in 0..COMPOSITE_MULTIPLIER, b in 0..COMPOSITE_MULTIPLIER) {
            let key = combine_key(a, b).unwrap();
            prop_assert_eq!(split_key(key), Ok((a, b)));
        }

        #[test]
        fn distinct_pairs_never_collide(
            a in 0..COMPOSITE_MULTIPLIER,
            b in 0..COMPOSITE_MULTIPLIER,
            c in 0..COMPOSITE_MULTIPLIER,
            d in 0..COMPOSITE_MULTIPLIER,
        ) {
            prop_assume!((a, b) != (c, d));
            prop_assert_ne!(combine_key(a, b), combine_key(c, d));
        }
    }
}
