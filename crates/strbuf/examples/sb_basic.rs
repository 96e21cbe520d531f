// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Basics of working with `StrBuf`.
//!
//! 1. We copy a template into a buffer with some padding to grow into.
//! 2. We fill in the template in place, never reallocating.
//! 3. We hand the finished string to code that wants a C string.

use std::ffi::CStr;

use strbuf::{Error, StrBuf};

fn main() -> Result<(), Error> {
    // The padding bounds how much the content may grow later. One byte goes to the terminator.
    let mut greeting = StrBuf::new_padded_from(b"Hello, NAME! You have COUNT new messages.", 16)?;

    println!("{greeting:?}");

    greeting.replace(b"NAME", b"Ferris")?;
    greeting.replace(b"COUNT", b"3")?;

    println!("{greeting:?}, {} bytes of room left", greeting.remaining_capacity());

    // Growing past the allocation is rejected rather than reallocating.
    match greeting.replace(b"Ferris", b"Ferris the Rustacean, Crab of Crabs") {
        Err(Error::CapacityExceeded { required, capacity }) => {
            println!("Refused to grow to {required} bytes in a {capacity}-byte buffer.");
        }
        other => println!("Unexpected outcome: {other:?}"),
    }

    // Shrinking never needs spare room.
    greeting.replace_shorter(b" new", b"")?;

    print_c_string(greeting.as_c_str());

    Ok(())
}

fn print_c_string(value: &CStr) {
    println!("{}", value.to_string_lossy());
}
