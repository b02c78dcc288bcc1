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

//! Tag-list parser.
//!
//! The *tag-list* syntax of RFC 6376, section 3.2 is shared by the
//! DKIM-Signature header field and by DKIM public key records:
//!
//! ```text
//! tag-list  =  tag-spec *( ";" tag-spec ) [ ";" ]
//! tag-spec  =  [FWS] tag-name [FWS] "=" [FWS] tag-value [FWS]
//! ```
//!
//! Folding whitespace may occur between the elements of a tag-spec and also
//! *inside* a tag value, where it is preserved verbatim. Only trailing FWS is
//! trimmed from a value. Characters outside the *tval* set are kept as part
//! of the value; judging them is up to the consumer of that tag.

use crate::{
    parse::{is_alpha, is_alphanum, is_valchar, is_wsp, trim_fws, CRLF},
    quoted_printable::{self, QuotedPrintableError},
    scanner::Scanner,
    util::{self, Base64Error},
};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};
use tracing::trace;

/// A tag-spec as it was encountered in the input.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Item<'a> {
    pub tag: &'a str,
    pub value: &'a str,
    /// Byte offset of the tag name.
    pub tag_pos: usize,
    /// Byte offset of the tag value.
    pub value_pos: usize,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ParseErrorKind {
    ExpectedAlpha,
    ExpectedEquals,
    MalformedFws,
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExpectedAlpha => write!(f, "expecting alpha character in tag"),
            Self::ExpectedEquals => write!(f, "expecting '='"),
            Self::MalformedFws => write!(f, "malformed folding whitespace"),
        }
    }
}

/// A structural error in a tag-list, with the byte offset where it occurred.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize) -> Self {
        trace!(position, "tag-list parse error: {kind}");
        Self { kind, position }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} at offset {}", self.kind, self.position)
    }
}

impl Error for ParseError {}

/// An ordered list of tag-specs.
///
/// Unlike a strict DKIM tag-list, duplicate tag names are allowed here. They
/// are reported later, see [`FieldMap`][crate::field::FieldMap].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TagList<'a>(Vec<Item<'a>>);

impl<'a> AsRef<[Item<'a>]> for TagList<'a> {
    fn as_ref(&self) -> &[Item<'a>] {
        &self.0
    }
}

impl<'a> From<TagList<'a>> for Vec<Item<'a>> {
    fn from(tag_list: TagList<'a>) -> Self {
        tag_list.0
    }
}

impl<'a> TagList<'a> {
    pub fn parse(input: &'a str) -> Result<Self, ParseError> {
        parse_tag_list(input).map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parses an RFC 6376 tag-list into its tag-specs, in input order.
///
/// Empty input, or input consisting only of whitespace, is a valid empty
/// tag-list. The first syntax error aborts parsing.
pub fn parse_tag_list(input: &str) -> Result<Vec<Item<'_>>, ParseError> {
    let mut s = Scanner::new(input);
    let mut items = vec![];

    loop {
        skip_fws(&mut s)?;

        // tag-name
        match s.next() {
            None => return Ok(items),
            Some(c) if is_alpha(c) => {}
            Some(_) => {
                s.backup();
                return Err(ParseError::new(ParseErrorKind::ExpectedAlpha, s.pos()));
            }
        }
        s.accept_run(is_alphanum);
        let tag = s.pending();
        let tag_pos = s.start();

        skip_fws(&mut s)?;

        if s.next() != Some('=') {
            s.backup();
            return Err(ParseError::new(ParseErrorKind::ExpectedEquals, s.pos()));
        }

        skip_fws(&mut s)?;

        // tag-value
        let value_pos = s.start();
        let mut value_end = value_pos;
        loop {
            if s.accept_run(is_valchar) {
                value_end = s.pos();
            }

            let folded = accept_fws(&mut s)?;

            match s.next() {
                None => {
                    items.push(Item { tag, value: s.slice(value_pos, value_end), tag_pos, value_pos });
                    return Ok(items);
                }
                Some(';') => {
                    items.push(Item { tag, value: s.slice(value_pos, value_end), tag_pos, value_pos });
                    break;
                }
                // FWS was inside the value, or more FWS follows
                Some(_) if folded => s.backup(),
                // anything else outside VALCHAR is kept as value text
                Some(_) => value_end = s.pos(),
            }
        }
    }
}

// FWS = [*WSP CRLF] 1*WSP, but also accepting the empty string: a CRLF that
// is not followed by WSP is an error. Returns whether any FWS was consumed.
fn accept_fws(s: &mut Scanner<'_>) -> Result<bool, ParseError> {
    let start = s.pos();

    s.accept_run(is_wsp);

    let crlf_pos = s.pos();
    if s.accept_str(CRLF) && !s.accept_run(is_wsp) {
        return Err(ParseError::new(ParseErrorKind::MalformedFws, crlf_pos));
    }

    Ok(s.pos() > start)
}

fn skip_fws(s: &mut Scanner<'_>) -> Result<(), ParseError> {
    while accept_fws(s)? {}
    s.ignore();
    Ok(())
}

/// Splits a colon-separated tag value, trimming FWS around the elements.
pub fn parse_colon_separated_tag_value(value: &str) -> Vec<&str> {
    value.split(':').map(trim_fws).collect()
}

pub fn strip_fws_from_tag_value(value: &str) -> String {
    // assume only well-formed FWS
    value
        .chars()
        .filter(|c| !matches!(c, ' ' | '\t' | '\r' | '\n'))
        .collect()
}

pub fn parse_base64_tag_value(value: &str) -> Result<Vec<u8>, Base64Error> {
    let value = strip_fws_from_tag_value(value);
    util::decode_base64(&value)
}

/// Decodes a *qp-section* tag value, unfolding any FWS line breaks first.
pub fn parse_qp_section_tag_value(value: &str) -> Result<Vec<u8>, QuotedPrintableError> {
    let value = value.replace(CRLF, "");
    quoted_printable::decode_qp_section(&value)
}
