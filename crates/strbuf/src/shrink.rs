// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use tracing::{Level, event};

use crate::buf::{rejected, require_non_empty};
use crate::{Error, Result, StrBuf};

impl StrBuf {
    /// Replaces the first occurrence of `longer` with the strictly shorter `shorter`.
    ///
    /// Passing an empty `shorter` deletes the occurrence.
    ///
    /// Because the content can only shrink, this is always safe and never needs spare capacity.
    /// When the content is shorter than `longer` it cannot contain it, and the buffer is left
    /// unchanged.
    ///
    /// Returns whether an occurrence was found and replaced.
    ///
    /// # Example
    ///
    /// ```
    /// use strbuf::StrBuf;
    ///
    /// let mut buf = StrBuf::new_padded_from(b"hello world", 1)?;
    ///
    /// assert!(buf.replace_shorter(b"world", b"")?);
    /// assert_eq!(buf, "hello ");
    /// # Ok::<(), strbuf::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// * [`Error::Empty`] if the buffer or `longer` is empty.
    /// * [`Error::NotShorter`] if `shorter` is not strictly shorter than `longer`.
    /// * [`Error::InteriorNul`] if `longer` or `shorter` contains a NUL byte.
    pub fn replace_shorter(&mut self, longer: &[u8], shorter: &[u8]) -> Result<bool> {
        require_non_empty("buffer", self.as_bytes())?;
        require_non_empty("longer", longer)?;

        if shorter.len() >= longer.len() {
            return Err(rejected(Error::NotShorter {
                shorter: shorter.len(),
                longer: longer.len(),
            }));
        }

        if self.len() < longer.len() {
            event!(Level::TRACE, message = "replace_shorter skipped", len = self.len(), longer = longer.len());
            return Ok(false);
        }

        // SAFETY: `shorter` is strictly shorter than `longer`, so the content can only shrink.
        unsafe { self.dangerous_replace(longer, shorter) }
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletes_occurrence() {
        let mut buf = StrBuf::new_padded_from(b"hello world", 1).unwrap();

        assert!(buf.replace_shorter(b"world", b"").unwrap());

        assert_eq!(buf, "hello ");
        assert_eq!(buf.len(), 6);
        assert_eq!(buf.capacity(), 12);
        assert_eq!(buf.as_bytes_with_nul(), b"hello \0");
    }

    #[test]
    fn shrinks_tight_buffer() {
        // No spare capacity at all, which is fine when shrinking.
        let mut buf = StrBuf::new_concatenated(b"Mississippi", b" river").unwrap();
        assert_eq!(buf.remaining_capacity(), 0);

        assert!(buf.replace_shorter(b"ssi", b"s").unwrap());

        assert_eq!(buf, "Misssippi river");
        assert_eq!(buf.capacity(), 18);
    }

    #[test]
    fn content_shorter_than_longer_is_noop() {
        let mut buf = StrBuf::new_padded_from(b"abc", 1).unwrap();

        assert!(!buf.replace_shorter(b"abcd", b"x").unwrap());
        assert_eq!(buf, "abc");
    }

    #[test]
    fn absent_is_noop() {
        let mut buf = StrBuf::new_padded_from(b"abcdef", 1).unwrap();

        assert!(!buf.replace_shorter(b"xyz", b"q").unwrap());
        assert_eq!(buf, "abcdef");
    }

    #[test]
    fn rejects_equal_or_longer_replacement() {
        let mut buf = StrBuf::new_padded_from(b"hello world", 1).unwrap();

        assert!(matches!(
            buf.replace_shorter(b"world", b"there"),
            Err(Error::NotShorter { shorter: 5, longer: 5 })
        ));
        assert!(matches!(
            buf.replace_shorter(b"world", b"everyone"),
            Err(Error::NotShorter { shorter: 8, longer: 5 })
        ));
        assert_eq!(buf, "hello world");
    }

    #[test]
    fn rejects_empty_inputs() {
        let mut buf = StrBuf::new_padded_from(b"a", 1).unwrap();

        assert!(matches!(buf.replace_shorter(b"", b""), Err(Error::Empty("longer"))));

        buf.delete_char_once(b'a');
        assert!(matches!(buf.replace_shorter(b"a", b""), Err(Error::Empty("buffer"))));
    }

    #[test]
    fn matches_dangerous_replace() {
        let cases: &[(&[u8], &[u8], &[u8])] = &[
            (b"hello world", b"world", b""),
            (b"aaaa", b"aa", b"a"),
            (b"xyz", b"xyz", b"x"),
            (b"xyz", b"nope", b""),
        ];

        for &(content, longer, shorter) in cases {
            let mut wrapped = StrBuf::new_padded_from(content, 1).unwrap();
            let mut direct = wrapped.clone();

            let wrapped_found = wrapped.replace_shorter(longer, shorter).unwrap();

            // SAFETY: Every case shrinks.
            let direct_found = unsafe { direct.dangerous_replace(longer, shorter) }.unwrap();

            assert_eq!(wrapped_found, direct_found);
            assert_eq!(wrapped, direct);
        }
    }
}
