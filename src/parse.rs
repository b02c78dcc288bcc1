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

//! Common parsing utilities.

/*
From RFC 6376:

   tag-list  =  tag-spec *( ";" tag-spec ) [ ";" ]
   tag-spec  =  [FWS] tag-name [FWS] "=" [FWS] tag-value [FWS]
   tag-name  =  ALPHA *ALNUMPUNC
   tag-value =  [ tval *( 1*(WSP / FWS) tval ) ]
   tval      =  1*VALCHAR
   VALCHAR   =  %x21-3A / %x3C-7E
   ALNUMPUNC =  ALPHA / DIGIT / "_"
*/

pub const CRLF: &str = "\r\n";

pub fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_alphanum(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// VALCHAR: printable ASCII without `;`.
pub fn is_valchar(c: char) -> bool {
    matches!(c, '!'..=':' | '<'..='~')
}

// RFC 5234, appendix B.1

pub fn is_wsp(c: char) -> bool {
    matches!(c, ' ' | '\t')
}

/// Trims leading and trailing WSP and CRLF, assuming well-formed FWS.
pub fn trim_fws(s: &str) -> &str {
    s.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'))
}
