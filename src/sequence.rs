//! Legal fragment-type transitions.
//!
//! A user record is either a lone FULL fragment, or FIRST, any number of
//! MIDDLE, then LAST.

use crate::error::{LogError, Result};
use crate::wal_format::RecordType;

/// Checks that `curr` may follow `prev` within one user record.
///
/// Returns `Ok(true)` when more fragments must follow, `Ok(false)` when
/// `curr` completes the record.
pub fn next_is_expected(prev: RecordType, curr: RecordType) -> Result<bool> {
    use RecordType::*;

    match (prev, curr) {
        (None, Full) => Ok(false),
        (None, First) => Ok(true),
        (First | Middle, Middle) => Ok(true),
        (First | Middle, Last) => Ok(false),
        _ => Err(LogError::FragmentSequenceMismatch { prev, curr }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use RecordType::*;

    const ALL: [RecordType; 5] = [None, Full, First, Middle, Last];

    #[test]
    fn legal_transitions() {
        assert!(!next_is_expected(None, Full).unwrap());
        assert!(next_is_expected(None, First).unwrap());
        assert!(next_is_expected(First, Middle).unwrap());
        assert!(!next_is_expected(First, Last).unwrap());
        assert!(next_is_expected(Middle, Middle).unwrap());
        assert!(!next_is_expected(Middle, Last).unwrap());
    }

    #[test]
    fn everything_else_is_rejected_with_both_types() {
        let legal = [
            (None, Full),
            (None, First),
            (First, Middle),
            (First, Last),
            (Middle, Middle),
            (Middle, Last),
        ];
        for prev in ALL {
            for curr in ALL {
                if legal.contains(&(prev, curr)) {
                    continue;
                }
                match next_is_expected(prev, curr) {
                    Err(LogError::FragmentSequenceMismatch { prev: p, curr: c }) => {
                        assert_eq!((p, c), (prev, curr));
                    }
                    other => panic!("{prev} -> {curr} should fail, got {other:?}"),
                }
            }
        }
    }

    #[test]
    fn sentinel_is_never_a_valid_current_type() {
        for prev in ALL {
            assert!(next_is_expected(prev, None).is_err());
        }
    }
}
