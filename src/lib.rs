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

//! A library for parsing and checking DKIM tag-lists and DKIM public key
//! records.
//!
//! The *tag-list* syntax of [RFC 6376] (`tag=value; tag=value; …`) is used
//! both by the DKIM-Signature header field and by DKIM public key records in
//! DNS. This library parses it faithfully, including folding whitespace inside
//! values, and reports the byte offset of any syntax error.
//!
//! On top of the parser sits a diagnostic layer for key records. It does not
//! reject records that a verifier might reject; instead it annotates each tag
//! with human-readable findings of a given [`Severity`], with references to
//! [RFC 6376], [RFC 8301] and [RFC 8463] where appropriate. Signature
//! verification is not done.
//!
//! # Usage
//!
//! The type [`DkimKey`] is the entry point for key records. The low-level
//! building blocks are available as [`parse_tag_list`] (tag-specs in input
//! order) and [`parse_field_map`] (tag-specs keyed by tag name).
//!
//! ```
//! use dkimlint::{DkimKey, Severity};
//!
//! let key = DkimKey::new("v=DKIM1; g=*; p=");
//!
//! assert_eq!(key.g.annotations()[0].severity, Severity::Warning);
//! ```
//!
//! Fetching the record from DNS, and concatenating the character strings of
//! a TXT record, is left to the caller.
//!
//! # Cargo features
//!
//! The feature **`pre-rfc8301`** lowers the minimum RSA key size accepted
//! without error back to 512 bits, as before [RFC 8301].
//!
//! [RFC 6376]: https://www.rfc-editor.org/rfc/rfc6376
//! [RFC 8301]: https://www.rfc-editor.org/rfc/rfc8301
//! [RFC 8463]: https://www.rfc-editor.org/rfc/rfc8463

pub mod annotation;
pub mod crypto;
pub mod field;
mod parse;
pub mod quoted_printable;
pub mod record;
pub mod scanner;
pub mod tag_list;
mod util;

pub use crate::{
    annotation::{Annotation, Message, Severity},
    field::{field_map, parse_field_map, Field, FieldMap},
    record::{Config, DkimKey},
    tag_list::{parse_tag_list, Item, ParseError, ParseErrorKind, TagList},
    util::{decode_base64, Base64Error, CanonicalStr},
};
