// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-place editing of the content of a [`StrBuf`].
//!
//! Nothing here allocates or frees; every edit rewrites bytes inside the existing allocation.

use std::ptr;

use tracing::{Level, event};

use crate::buf::{rejected, require_no_nul, require_non_empty};
use crate::{Error, Result, StrBuf};

/// How the bytes after a replaced span move when the span changes size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Shift {
    /// The replacement is shorter; the tail moves towards the start by this many bytes.
    Left(usize),
    /// The replacement has the same length; the tail stays put.
    Stay,
    /// The replacement is longer; the tail moves towards the end by this many bytes.
    Right(usize),
}

impl Shift {
    fn between(removed: usize, inserted: usize) -> Self {
        match removed.cmp(&inserted) {
            std::cmp::Ordering::Greater => Self::Left(removed - inserted),
            std::cmp::Ordering::Equal => Self::Stay,
            std::cmp::Ordering::Less => Self::Right(inserted - removed),
        }
    }

    /// Content length after the shift. A left shift never exceeds the old length, because the
    /// removed span is part of the content.
    fn apply_to(self, len: usize) -> usize {
        match self {
            Self::Left(distance) => len - distance,
            Self::Stay => len,
            Self::Right(distance) => len + distance,
        }
    }
}

/// Offset of the first occurrence of `needle` in `haystack`. `needle` must not be empty.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    debug_assert!(!needle.is_empty());

    if needle.len() > haystack.len() {
        return None;
    }

    haystack.windows(needle.len()).position(|window| window == needle)
}

impl StrBuf {
    /// Removes the first occurrence of `target` from the content, closing the gap.
    ///
    /// Returns whether an occurrence was found. When it was not, the buffer is unchanged.
    /// The terminator is not part of the content, so deleting NUL always finds nothing.
    ///
    /// # Example
    ///
    /// ```
    /// use strbuf::StrBuf;
    ///
    /// let mut buf = StrBuf::new_padded_from(b"banana", 1)?;
    ///
    /// assert!(buf.delete_char_once(b'a'));
    /// assert_eq!(buf, "bnana");
    ///
    /// assert!(!buf.delete_char_once(b'q'));
    /// assert_eq!(buf, "bnana");
    /// # Ok::<(), strbuf::Error>(())
    /// ```
    pub fn delete_char_once(&mut self, target: u8) -> bool {
        let Some(index) = self.as_bytes().iter().position(|&b| b == target) else {
            event!(Level::TRACE, message = "delete_char_once", found = false, len = self.len);
            return false;
        };

        let old_len = self.len;

        // The moved range includes the terminator, which lands at the new end of the content.
        self.storage.copy_within(index + 1..=old_len, index);
        self.len = old_len - 1;

        self.debug_check_invariants();
        event!(Level::TRACE, message = "delete_char_once", found = true, index, old_len, len = self.len);

        true
    }

    /// Replaces the first occurrence of `needle` with `replacement`, shifting the rest of the
    /// content as needed.
    ///
    /// Returns whether an occurrence was found. When it was not, the buffer is unchanged.
    ///
    /// This is the checked counterpart of [`dangerous_replace()`][Self::dangerous_replace]: if
    /// the edited content would not fit in the allocation, an error is returned instead.
    ///
    /// # Example
    ///
    /// ```
    /// use strbuf::{Error, StrBuf};
    ///
    /// let mut buf = StrBuf::new_padded_from(b"a-b", 3)?;
    ///
    /// assert!(buf.replace(b"-", b" + ")?);
    /// assert_eq!(buf, "a + b");
    ///
    /// // The allocation is now full, so growing by three more bytes is rejected.
    /// assert!(matches!(buf.replace(b"+", b"plus"), Err(Error::CapacityExceeded { .. })));
    /// assert_eq!(buf, "a + b");
    /// # Ok::<(), strbuf::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// * [`Error::Empty`] if `needle` is empty.
    /// * [`Error::InteriorNul`] if `needle` or `replacement` contains a NUL byte.
    /// * [`Error::CapacityExceeded`] if the needle occurs and the result does not fit.
    pub fn replace(&mut self, needle: &[u8], replacement: &[u8]) -> Result<bool> {
        validate_replace_args(needle, replacement)?;

        let Some(index) = find(self.as_bytes(), needle) else {
            event!(Level::TRACE, message = "replace", found = false, len = self.len);
            return Ok(false);
        };

        let new_len = Shift::between(needle.len(), replacement.len()).apply_to(self.len);

        if new_len >= self.capacity() {
            return Err(rejected(Error::CapacityExceeded {
                required: new_len.saturating_add(1),
                capacity: self.capacity(),
            }));
        }

        // SAFETY: We just checked that the edited content and its terminator fit.
        unsafe {
            self.splice_unchecked(index, needle.len(), replacement);
        }

        Ok(true)
    }

    /// Replaces the first occurrence of `needle` with `replacement` without checking that the
    /// result fits in the allocation.
    ///
    /// Returns whether an occurrence was found. When it was not, the buffer is unchanged.
    ///
    /// Prefer [`replace()`][Self::replace], or [`replace_shorter()`][Self::replace_shorter] when
    /// the replacement is known to be shorter. This variant exists for callers that have already
    /// established that the result fits.
    ///
    /// # Example
    ///
    /// ```
    /// use strbuf::StrBuf;
    ///
    /// let mut buf = StrBuf::new_padded_from(b"hello world", 1)?;
    ///
    /// // SAFETY: The replacement is no longer than the needle, so the content cannot grow.
    /// let found = unsafe { buf.dangerous_replace(b"world", b"there")? };
    ///
    /// assert!(found);
    /// assert_eq!(buf, "hello there");
    /// # Ok::<(), strbuf::Error>(())
    /// ```
    ///
    /// # Errors
    ///
    /// * [`Error::Empty`] if `needle` is empty.
    /// * [`Error::InteriorNul`] if `needle` or `replacement` contains a NUL byte.
    ///
    /// The capacity is never checked, so [`Error::CapacityExceeded`] is never returned.
    ///
    /// # Safety
    ///
    /// If `needle` occurs in the content, the caller must guarantee that
    /// `len() - needle.len() + replacement.len()` is less than [`capacity()`][Self::capacity].
    ///
    /// This always holds when `replacement.len() <= needle.len()`.
    pub unsafe fn dangerous_replace(&mut self, needle: &[u8], replacement: &[u8]) -> Result<bool> {
        validate_replace_args(needle, replacement)?;

        let Some(index) = find(self.as_bytes(), needle) else {
            event!(Level::TRACE, message = "dangerous_replace", found = false, len = self.len);
            return Ok(false);
        };

        // SAFETY: Forwarding the caller's guarantee that the edited content fits.
        unsafe {
            self.splice_unchecked(index, needle.len(), replacement);
        }

        Ok(true)
    }

    /// Replaces `removed` bytes at `index` with `inserted`, moving the tail of the content
    /// (terminator included) to follow the inserted bytes.
    ///
    /// # Safety
    ///
    /// `index + removed` must not exceed `len()` and the content length after the edit must be
    /// less than `capacity()`.
    unsafe fn splice_unchecked(&mut self, index: usize, removed: usize, inserted: &[u8]) {
        debug_assert!(index + removed <= self.len);

        let shift = Shift::between(removed, inserted.len());
        let old_len = self.len;
        let new_len = shift.apply_to(old_len);

        debug_assert!(new_len < self.capacity(), "caller promised that the edited content fits");

        let tail_from = index + removed;
        let tail_to = index + inserted.len();

        // The tail is everything after the removed span, plus the terminator.
        let tail_len = old_len - tail_from + 1;

        let base = self.storage.as_mut_ptr();

        if shift != Shift::Stay {
            // SAFETY: `tail_from + tail_len == old_len + 1 <= capacity`, so the source is in bounds.
            // The destination ends at `new_len + 1`, which the caller guarantees is at most the
            // capacity. `ptr::copy` tolerates the ranges overlapping.
            unsafe {
                ptr::copy(base.wrapping_add(tail_from), base.wrapping_add(tail_to), tail_len);
            }
        }

        // SAFETY: The destination ends at `index + inserted.len()`, which is the start of the moved tail
        // and so within the allocation. `inserted` is borrowed separately from `self`, so it cannot overlap.
        unsafe {
            ptr::copy_nonoverlapping(inserted.as_ptr(), base.wrapping_add(index), inserted.len());
        }

        self.len = new_len;

        self.debug_check_invariants();
        event!(
            Level::TRACE,
            message = "replaced",
            index,
            removed,
            inserted = inserted.len(),
            old_len,
            len = new_len
        );
    }
}

fn validate_replace_args(needle: &[u8], replacement: &[u8]) -> Result<()> {
    require_non_empty("needle", needle)?;
    require_no_nul("needle", needle)?;
    require_no_nul("replacement", replacement)
}
