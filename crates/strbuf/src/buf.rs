// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::ffi::{CStr, CString};
use std::fmt;

use tracing::{Level, event};

use crate::{Error, Result};

/// An owned, null-terminated byte string with a fixed-size allocation.
///
/// The buffer tracks two sizes:
///
/// * [`capacity()`][Self::capacity] is the size of the allocation in bytes, including the slot
///   taken by the NUL terminator. It never changes after construction.
/// * [`len()`][Self::len] is the number of content bytes before the terminator. It is always
///   less than the capacity.
///
/// The content never contains a NUL byte, so it can always be handed out as a [`CStr`].
///
/// Buffers are created via [`new_padded_from()`][Self::new_padded_from] or
/// [`new_concatenated()`][Self::new_concatenated] and edited in place by
/// [`delete_char_once()`][Self::delete_char_once], [`replace()`][Self::replace],
/// [`replace_shorter()`][Self::replace_shorter] and
/// [`dangerous_replace()`][Self::dangerous_replace]. Editing never reallocates: if a longer
/// result is needed, reserve padding up front.
///
/// # Example
///
/// ```
/// use strbuf::StrBuf;
///
/// let mut buf = StrBuf::new_padded_from(b"hello", 8)?;
/// assert_eq!(buf.capacity(), 13);
///
/// buf.replace(b"hello", b"hello, world")?;
/// assert_eq!(buf, "hello, world");
/// assert_eq!(buf.remaining_capacity(), 0);
/// # Ok::<(), strbuf::Error>(())
/// ```
///
/// # Thread safety
///
/// This type is thread-safe. Editing requires exclusive access (`&mut self`), so a buffer cannot
/// be mutated from two threads at the same time.
#[derive(Clone)]
pub struct StrBuf {
    // Invariants: `len < storage.len()`, `storage[len] == 0` and `storage[..len]` has no NUL.
    pub(crate) storage: Box<[u8]>,
    pub(crate) len: usize,
}

impl StrBuf {
    /// Allocates exactly `capacity` bytes and fills them with `parts` laid end to end, followed
    /// by zeroes. The terminator is one of those zeroes.
    ///
    /// The caller must have validated that the parts are NUL-free and that their total length
    /// is less than `capacity`.
    pub(crate) fn from_parts(parts: &[&[u8]], capacity: usize) -> Result<Self> {
        let mut storage = Vec::new();

        storage
            .try_reserve_exact(capacity)
            .map_err(|source| Error::AllocationFailed { requested: capacity, source })?;

        for part in parts {
            storage.extend_from_slice(part);
        }

        let len = storage.len();
        debug_assert!(len < capacity, "caller must leave a slot for the terminator");

        storage.resize(capacity, 0);

        event!(Level::TRACE, message = "allocated", len, capacity);

        Ok(Self {
            storage: storage.into_boxed_slice(),
            len,
        })
    }

    /// Number of content bytes, not counting the NUL terminator.
    ///
    /// # Example
    ///
    /// ```
    /// use strbuf::StrBuf;
    ///
    /// let mut buf = StrBuf::new_padded_from(b"banana", 1)?;
    /// assert_eq!(buf.len(), 6);
    ///
    /// buf.delete_char_once(b'a');
    /// assert_eq!(buf.len(), 5);
    /// # Ok::<(), strbuf::Error>(())
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer has no content bytes.
    ///
    /// An empty buffer still owns its allocation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Size of the allocation in bytes, including the slot for the NUL terminator.
    ///
    /// This never changes during the lifetime of the buffer.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// How many more content bytes fit in the allocation without displacing the terminator.
    #[must_use]
    #[cfg_attr(test, mutants::skip)] // Lying about capacity turns into out-of-bounds writes in `dangerous_replace()`.
    pub fn remaining_capacity(&self) -> usize {
        // Will not underflow - `len < capacity` is a type invariant.
        self.capacity().wrapping_sub(self.len).wrapping_sub(1)
    }

    /// The content bytes, without the terminator.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// The content bytes followed by the NUL terminator.
    #[must_use]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.storage[..=self.len]
    }

    /// The content as a C string.
    #[must_use]
    pub fn as_c_str(&self) -> &CStr {
        // SAFETY: The content ends with the terminator and has no other NUL byte. Both are type invariants.
        unsafe { CStr::from_bytes_with_nul_unchecked(self.as_bytes_with_nul()) }
    }

    /// Checks the type invariants. Every mutation calls this before returning.
    #[cfg_attr(test, mutants::skip)] // Only active in debug builds and never expected to fire.
    pub(crate) fn debug_check_invariants(&self) {
        debug_assert!(self.len < self.storage.len(), "length must leave room for the terminator");
        debug_assert_eq!(self.storage[self.len], 0, "content must be null-terminated at its length");
        debug_assert!(!self.as_bytes().contains(&0), "content must not contain NUL");
    }
}

/// Rejects an empty input.
pub(crate) fn require_non_empty(what: &'static str, bytes: &[u8]) -> Result<()> {
    if bytes.is_empty() {
        return Err(rejected(Error::Empty(what)));
    }

    Ok(())
}

/// Rejects an input that would put a NUL byte into the content.
pub(crate) fn require_no_nul(what: &'static str, bytes: &[u8]) -> Result<()> {
    match bytes.iter().position(|&b| b == 0) {
        Some(offset) => Err(rejected(Error::InteriorNul { what, offset })),
        None => Ok(()),
    }
}

/// Records a contract violation before it is returned to the caller.
pub(crate) fn rejected(error: Error) -> Error {
    event!(Level::DEBUG, message = "rejected", error = %error);
    error
}

impl fmt::Debug for StrBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrBuf")
            .field("content", &format_args!("\"{}\"", self.as_bytes().escape_ascii()))
            .field("len", &self.len)
            .field("capacity", &self.capacity())
            .finish()
    }
}

impl AsRef<[u8]> for StrBuf {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<CStr> for StrBuf {
    fn as_ref(&self) -> &CStr {
        self.as_c_str()
    }
}

// Equality compares content only; two buffers with the same bytes but different capacity are equal.
impl PartialEq for StrBuf {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for StrBuf {}

impl PartialEq<[u8]> for StrBuf {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl PartialEq<&[u8]> for StrBuf {
    fn eq(&self, other: &&[u8]) -> bool {
        self.as_bytes() == *other
    }
}

impl<const LEN: usize> PartialEq<[u8; LEN]> for StrBuf {
    fn eq(&self, other: &[u8; LEN]) -> bool {
        self.as_bytes() == other.as_slice()
    }
}

impl<const LEN: usize> PartialEq<&[u8; LEN]> for StrBuf {
    fn eq(&self, other: &&[u8; LEN]) -> bool {
        self.as_bytes() == other.as_slice()
    }
}

impl PartialEq<str> for StrBuf {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for StrBuf {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl From<StrBuf> for Vec<u8> {
    /// Takes the content without the terminator. The padding is released.
    fn from(value: StrBuf) -> Self {
        let mut bytes = value.storage.into_vec();
        bytes.truncate(value.len);
        bytes.shrink_to_fit();
        bytes
    }
}

impl From<StrBuf> for CString {
    fn from(value: StrBuf) -> Self {
        let content: Vec<u8> = value.into();

        // SAFETY: The content has no NUL byte - this is a type invariant.
        unsafe { Self::from_vec_unchecked(content) }
    }
}
