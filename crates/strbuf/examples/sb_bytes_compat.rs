// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Turning a finished `StrBuf` into `bytes::Bytes` for APIs that expect the latter.

use bytes::Bytes;
use strbuf::{Error, StrBuf};

fn main() -> Result<(), Error> {
    let mut header = StrBuf::new_concatenated(b"Content-Type: ", b"text/plain; charset=ascii")?;

    header.replace_shorter(b"; charset=ascii", b"")?;

    // The terminator and any spare capacity are left behind.
    let bytes = Bytes::from(header);

    println!("{} bytes: {:?}", bytes.len(), bytes);

    Ok(())
}
