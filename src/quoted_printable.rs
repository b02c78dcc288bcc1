// dkimlint – diagnostics for DKIM tag-lists and key records
// Copyright © 2022–2023 David Bürgin <dbuergin@gluet.ch>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.

//! Quoted-Printable decoding of *qp-section* tag values.
//!
//! The notes tag `n=` of a DKIM key record is a *qp-section* (RFC 6376,
//! section 3.6.1, referring to RFC 2045, section 6.7).

use crate::parse::is_wsp;
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct QuotedPrintableError;

impl Display for QuotedPrintableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "failed to decode Quoted-Printable data")
    }
}

impl Error for QuotedPrintableError {}

// This is slightly modified from RFC 2045, section 6.7: It uses RFC 6376’s
// *dkim-safe-char*. Linear whitespace between tokens and at the beginning and
// end is accepted.

/// Decodes the bytes in an RFC 2045 *qp-section*.
pub fn decode_qp_section(s: &str) -> Result<Vec<u8>, QuotedPrintableError> {
    let mut result = Vec::with_capacity(s.len());

    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '=' {
            let hi = chars.next().and_then(hex_value).ok_or(QuotedPrintableError)?;
            let lo = chars.next().and_then(hex_value).ok_or(QuotedPrintableError)?;

            result.push(hi * 0x10 + lo);
        } else if is_dkim_safe_char(c) || is_wsp(c) {
            // dkim-safe-char and WSP are ASCII
            result.push(c as u8);
        } else {
            return Err(QuotedPrintableError);
        }
    }

    Ok(result)
}

// Strictly speaking, only uppercase hex digits are allowed in (DKIM-)
// Quoted-Printable, but there is no harm in accepting lowercase, too.
fn hex_value(c: char) -> Option<u8> {
    c.to_digit(16).and_then(|d| u8::try_from(d).ok())
}

fn is_dkim_safe_char(c: char) -> bool {
    // printable ASCII without ; and =
    matches!(c, '!'..=':' | '<' | '>'..='~')
}
