// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::buf::{rejected, require_no_nul, require_non_empty};
use crate::{Error, Result, StrBuf};

/// Padding requested from [`StrBuf::new_padded_from()`] may be at most this many times the
/// length of the source.
///
/// Anything larger almost certainly comes from a negative number converted to `usize`.
pub const MAX_PADDING_FACTOR: usize = 1000;

impl StrBuf {
    /// Allocates a buffer holding a copy of `source` plus `padding` bytes of room.
    ///
    /// The allocation is exactly `source.len() + padding` bytes. The terminator occupies the
    /// first padding byte, so the content can grow in place by `padding - 1` bytes.
    ///
    /// A padding of zero would leave the terminator without a slot in the allocation, so it is
    /// rejected rather than producing a buffer with no room to grow. Ask for a padding of 1 to
    /// get a buffer that exactly fits the source.
    ///
    /// # Example
    ///
    /// ```
    /// use strbuf::StrBuf;
    ///
    /// let buf = StrBuf::new_padded_from(b"hello", 3)?;
    ///
    /// assert_eq!(buf, "hello");
    /// assert_eq!(buf.len(), 5);
    /// assert_eq!(buf.capacity(), 8);
    /// # Ok::<(), strbuf::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// * [`Error::Empty`] if `source` is empty.
    /// * [`Error::InteriorNul`] if `source` contains a NUL byte.
    /// * [`Error::PaddingOutOfRange`] if `padding` exceeds [`MAX_PADDING_FACTOR`] times the
    ///   source length.
    /// * [`Error::NoRoomForTerminator`] if `padding` is zero.
    /// * [`Error::AllocationFailed`] if the memory cannot be allocated.
    pub fn new_padded_from(source: &[u8], padding: usize) -> Result<Self> {
        require_non_empty("source", source)?;
        require_no_nul("source", source)?;

        let limit = source.len().saturating_mul(MAX_PADDING_FACTOR);

        if padding > limit {
            return Err(rejected(Error::PaddingOutOfRange {
                padding,
                limit,
                source_len: source.len(),
            }));
        }

        if padding == 0 {
            return Err(rejected(Error::NoRoomForTerminator));
        }

        // `limit` saturates, so the sum can still overflow for absurdly long sources.
        let Some(capacity) = source.len().checked_add(padding) else {
            return Err(rejected(Error::PaddingOutOfRange {
                padding,
                limit,
                source_len: source.len(),
            }));
        };

        Self::from_parts(&[source], capacity)
    }

    /// Allocates a buffer holding `first` immediately followed by `second`.
    ///
    /// The allocation is exactly large enough for both and the terminator, so the result has
    /// no room to grow in place.
    ///
    /// # Example
    ///
    /// ```
    /// use strbuf::StrBuf;
    ///
    /// let buf = StrBuf::new_concatenated(b"foo", b"bar")?;
    ///
    /// assert_eq!(buf, "foobar");
    /// assert_eq!(buf.capacity(), 7);
    /// # Ok::<(), strbuf::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// * [`Error::Empty`] if either input is empty.
    /// * [`Error::InteriorNul`] if either input contains a NUL byte.
    /// * [`Error::AllocationFailed`] if the memory cannot be allocated.
    pub fn new_concatenated(first: &[u8], second: &[u8]) -> Result<Self> {
        require_non_empty("first", first)?;
        require_non_empty("second", second)?;
        require_no_nul("first", first)?;
        require_no_nul("second", second)?;

        // Will not overflow - two slices of at most `isize::MAX` bytes each, plus one.
        let capacity = first.len().wrapping_add(second.len()).wrapping_add(1);

        Self::from_parts(&[first, second], capacity)
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::LogCapture;

    #[test]
    fn padded_copy() {
        let buf = StrBuf::new_padded_from(b"hello", 3).unwrap();

        assert_eq!(buf, "hello");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.capacity(), 8);
        assert_eq!(buf.remaining_capacity(), 2);
        assert_eq!(buf.as_bytes_with_nul(), b"hello\0");
    }

    #[test]
    fn padding_of_one_leaves_no_room_to_grow() {
        let buf = StrBuf::new_padded_from(b"x", 1).unwrap();

        assert_eq!(buf.capacity(), 2);
        assert_eq!(buf.remaining_capacity(), 0);
    }

    #[test]
    fn padding_at_limit_is_accepted() {
        let buf = StrBuf::new_padded_from(b"ab", 2 * MAX_PADDING_FACTOR).unwrap();

        assert_eq!(buf.capacity(), 2 + 2000);
        assert_eq!(buf, "ab");
    }

    #[test]
    fn padding_over_limit_is_rejected() {
        let error = StrBuf::new_padded_from(b"ab", 2001).unwrap_err();

        assert!(matches!(
            error,
            Error::PaddingOutOfRange {
                padding: 2001,
                limit: 2000,
                source_len: 2
            }
        ));
    }

    #[test]
    fn negative_looking_padding_is_rejected() {
        #[expect(clippy::cast_sign_loss, reason = "simulating a caller bug")]
        let padding = -1_isize as usize;

        let error = StrBuf::new_padded_from(b"hello", padding).unwrap_err();

        assert!(matches!(error, Error::PaddingOutOfRange { .. }));
    }

    #[test]
    fn zero_padding_is_rejected() {
        let error = StrBuf::new_padded_from(b"hello", 0).unwrap_err();

        assert!(matches!(error, Error::NoRoomForTerminator));
        assert!(error.is_contract_violation());
    }

    #[test]
    fn empty_or_nul_source_is_rejected() {
        assert!(matches!(StrBuf::new_padded_from(b"", 3), Err(Error::Empty("source"))));
        assert!(matches!(
            StrBuf::new_padded_from(b"a\0b", 3),
            Err(Error::InteriorNul { what: "source", offset: 1 })
        ));
    }

    #[test]
    fn concatenation() {
        let buf = StrBuf::new_concatenated(b"foo", b"bar").unwrap();

        assert_eq!(buf, "foobar");
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.capacity(), 7);
        assert_eq!(buf.remaining_capacity(), 0);
        assert_eq!(buf.as_c_str(), c"foobar");
    }

    #[test]
    fn concatenation_rejects_empty_inputs() {
        assert!(matches!(StrBuf::new_concatenated(b"", b"bar"), Err(Error::Empty("first"))));
        assert!(matches!(StrBuf::new_concatenated(b"foo", b""), Err(Error::Empty("second"))));
        assert!(matches!(
            StrBuf::new_concatenated(b"foo", b"\0"),
            Err(Error::InteriorNul { what: "second", offset: 0 })
        ));
    }

    #[test]
    fn allocation_and_rejection_are_logged() {
        let capture = LogCapture::new();

        tracing::subscriber::with_default(capture.subscriber(), || {
            StrBuf::new_concatenated(b"foo", b"bar").unwrap();
            StrBuf::new_padded_from(b"foo", 0).unwrap_err();
        });

        capture.assert_contains("allocated len=6 capacity=7");
        capture.assert_contains("rejected error=contract violation: zero padding");
    }
}
