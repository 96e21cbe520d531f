// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Null-terminated byte strings with explicit capacity and in-place editing.
//!
//! A [`StrBuf`] owns one fixed-size heap allocation holding a byte string followed by a NUL
//! terminator. The caller decides the size of the allocation up front and every later edit
//! happens inside it. The buffer never grows or reallocates behind your back.
//!
//! All operations are byte-oriented and act on the first occurrence only.
//!
//! # Allocating
//!
//! * [`StrBuf::new_padded_from()`] copies a source string into an allocation with extra room
//!   for later growth.
//! * [`StrBuf::new_concatenated()`] joins two strings into an allocation that fits them exactly.
//!
//! ```
//! use strbuf::StrBuf;
//!
//! let greeting = StrBuf::new_padded_from(b"hello", 3)?;
//! assert_eq!(greeting.len(), 5);
//! assert_eq!(greeting.capacity(), 8);
//!
//! let joined = StrBuf::new_concatenated(b"foo", b"bar")?;
//! assert_eq!(joined, "foobar");
//! # Ok::<(), strbuf::Error>(())
//! ```
//!
//! # Editing in place
//!
//! * [`StrBuf::delete_char_once()`] removes the first occurrence of a byte.
//! * [`StrBuf::replace_shorter()`] replaces a substring with a strictly shorter one. This can
//!   never run out of room.
//! * [`StrBuf::replace()`] replaces a substring with one of any length, failing with
//!   [`Error::CapacityExceeded`] if the result does not fit.
//! * [`StrBuf::dangerous_replace()`] is the `unsafe` primitive underneath: it trusts the caller
//!   that the result fits and performs no capacity check.
//!
//! ```
//! use strbuf::StrBuf;
//!
//! let mut buf = StrBuf::new_padded_from(b"banana split", 4)?;
//!
//! buf.delete_char_once(b'a');
//! assert_eq!(buf, "bnana split");
//!
//! buf.replace_shorter(b"split", b"")?;
//! assert_eq!(buf, "bnana ");
//!
//! buf.replace(b"bnana", b"banana!")?;
//! assert_eq!(buf, "banana! ");
//! # Ok::<(), strbuf::Error>(())
//! ```
//!
//! Looking for something that is not there is not an error: the edit returns `false` and leaves
//! the buffer unchanged.
//!
//! # Contract violations
//!
//! Arguments that an operation is documented to reject (empty inputs, NUL bytes inside the
//! content, absurd padding, a "shorter" replacement that is not shorter) produce an [`Error`]
//! instead of a partially built or corrupted buffer. See [`Error::is_contract_violation()`].
//!
//! # C interop
//!
//! The content never contains NUL, so [`StrBuf::as_c_str()`] is always available and a buffer
//! can be handed to C code that expects a null-terminated string.
//!
//! # Compatibility with the `bytes` Crate
//!
//! With the `bytes-compat` feature, a [`StrBuf`] converts into a `bytes::Bytes` holding its
//! content.

mod allocator;
mod buf;
#[cfg(feature = "bytes-compat")]
mod bytes_compat;
mod error;
mod mutate;
mod shrink;

pub use allocator::MAX_PADDING_FACTOR;
pub use buf::StrBuf;
pub use error::{Error, Result};

#[cfg(test)]
mod testing;
