// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Compatibility with types from the `bytes` crate.

use bytes::Bytes;

use crate::StrBuf;

impl From<StrBuf> for Bytes {
    /// Takes the content without the terminator. The padding is released.
    fn from(value: StrBuf) -> Self {
        Vec::<u8>::from(value).into()
    }
}
