// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::collections::TryReserveError;

use thiserror::Error;

/// An error raised by the buffer operations in this crate.
///
/// Apart from [`AllocationFailed`][Error::AllocationFailed], every variant is a contract
/// violation: the caller supplied arguments that the operation is documented to reject.
/// These represent programmer errors at the call site and are not expected in correct code.
///
/// An operation that returns an error leaves no partially constructed buffer behind and does
/// not modify the buffer it was called on.
///
/// Not finding a byte or substring is never an error.
///
/// # Thread safety
///
/// This type is thread-safe.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// An input that must contain at least one byte was empty.
    #[error("contract violation: {0} must not be empty")]
    Empty(&'static str),

    /// An input contained a NUL byte, which would cut the null-terminated content short.
    #[error("contract violation: {what} contains a NUL byte at offset {offset}")]
    InteriorNul {
        /// Names the offending input.
        what: &'static str,
        /// Offset of the first NUL byte in the input.
        offset: usize,
    },

    /// The requested padding is larger than the sanity limit for the source length.
    ///
    /// This guards against a negative number having been converted into a huge unsigned one.
    #[error("contract violation: padding of {padding} bytes exceeds the limit of {limit} bytes for a {source_len}-byte source")]
    PaddingOutOfRange {
        /// The requested padding.
        padding: usize,
        /// The largest accepted padding for this source.
        limit: usize,
        /// Length of the source being copied.
        source_len: usize,
    },

    /// The requested padding leaves no slot for the NUL terminator.
    #[error("contract violation: zero padding leaves no room for the NUL terminator")]
    NoRoomForTerminator,

    /// The replacement passed to a shrink-only operation is not strictly shorter than the text
    /// it replaces.
    #[error("contract violation: replacement of {shorter} bytes is not shorter than the {longer}-byte text it replaces")]
    NotShorter {
        /// Length of the replacement.
        shorter: usize,
        /// Length of the text being replaced.
        longer: usize,
    },

    /// The result of an in-place edit would not fit in the buffer's allocation.
    #[error("contract violation: result of {required} bytes (terminator included) does not fit in a capacity of {capacity} bytes")]
    CapacityExceeded {
        /// Bytes needed for the edited content plus its terminator.
        required: usize,
        /// Bytes available in the allocation.
        capacity: usize,
    },

    /// The global allocator could not provide the requested memory.
    #[error("allocation of {requested} bytes failed")]
    AllocationFailed {
        /// Size of the failed allocation.
        requested: usize,
        /// The error reported by the allocator.
        #[source]
        source: TryReserveError,
    },
}

impl Error {
    /// Whether the error signals a programmer error at the call site, as opposed to the
    /// runtime condition of running out of memory.
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        !matches!(self, Self::AllocationFailed { .. })
    }
}

/// A specialized `Result` for buffer operations.
pub type Result<T> = std::result::Result<T, Error>;
