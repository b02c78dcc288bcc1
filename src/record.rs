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

//! DKIM public key record diagnostics.
//!
//! [`DkimKey`] takes the text of a DKIM public key record, as published in DNS
//! (RFC 6376, section 3.6.1), and checks it against RFC 6376, RFC 8301 and
//! RFC 8463. Problems are never reported as errors; they are attached as
//! [`Annotation`]s to the field they concern. Only a tag-list that cannot be
//! parsed at all is reported as a [`ParseError`].

use crate::{
    annotation::{Annotation, Message, Severity},
    crypto::{read_key_data, HashAlgorithm, KeyData, KeyDataError, KeyFormat, KeyType},
    field::{parse_field_map, Field, FieldMap},
    tag_list::{
        parse_base64_tag_value, parse_colon_separated_tag_value, parse_qp_section_tag_value,
        ParseError,
    },
    util::CanonicalStr,
};
use std::str::FromStr;
use tracing::trace;

/// The tags defined for DKIM key records.
pub const KEY_TAGS: [&str; 8] = ["v", "g", "h", "k", "n", "p", "s", "t"];

/// Configuration for key record checks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// RSA keys shorter than this are flagged as errors.
    pub min_key_bits: usize,
    /// RSA keys shorter than this are flagged with a warning.
    pub recommended_key_bits: usize,
    /// RSA keys longer than this are flagged with a warning.
    pub max_key_bits: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_key_bits: if cfg!(feature = "pre-rfc8301") { 512 } else { 1024 },
            recommended_key_bits: 2048,
            max_key_bits: 4096,
        }
    }
}

/// A DKIM public key record, annotated for display.
///
/// The default value has all fields undefined.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DkimKey {
    pub v: Field,
    pub g: Field,
    pub h: Field,
    pub k: Field,
    pub n: Field,
    pub p: Field,
    pub s: Field,
    pub t: Field,
    /// Tags other than the ones in [`KEY_TAGS`].
    pub unrecognized: FieldMap,
    /// Set if the record could not be parsed; all fields are then undefined.
    pub parse_error: Option<ParseError>,
}

impl DkimKey {
    pub fn new(input: &str) -> Self {
        Self::with_config(input, &Config::default())
    }

    pub fn with_config(input: &str, config: &Config) -> Self {
        match parse_field_map(input) {
            Ok(fields) => Self::from_field_map(fields, config),
            Err(e) => Self {
                parse_error: Some(e),
                ..Default::default()
            },
        }
    }

    pub fn from_field_map(mut fields: FieldMap, config: &Config) -> Self {
        let mut key = Self {
            v: take_field(&mut fields, "v"),
            g: take_field(&mut fields, "g"),
            h: take_field(&mut fields, "h"),
            k: take_field(&mut fields, "k"),
            n: take_field(&mut fields, "n"),
            p: take_field(&mut fields, "p"),
            s: take_field(&mut fields, "s"),
            t: take_field(&mut fields, "t"),
            unrecognized: fields,
            parse_error: None,
        };

        key.validate(config);

        trace!(
            unrecognized = key.unrecognized.len(),
            worst = ?key.worst_severity(),
            "validated DKIM key record"
        );

        key
    }

    /// The known key tags with their fields, in the order of [`KEY_TAGS`].
    pub fn fields(&self) -> [(&'static str, &Field); 8] {
        [
            ("v", &self.v),
            ("g", &self.g),
            ("h", &self.h),
            ("k", &self.k),
            ("n", &self.n),
            ("p", &self.p),
            ("s", &self.s),
            ("t", &self.t),
        ]
    }

    /// The unrecognized fields, in input order.
    pub fn unrecognized_in_order(&self) -> Vec<&Field> {
        let mut fields: Vec<_> = self.unrecognized.values().collect();
        fields.sort_by_key(|f| f.index);
        fields
    }

    /// All annotations with the tag they are attached to.
    pub fn annotations(&self) -> Vec<(&str, &Annotation)> {
        let mut result = vec![];
        for (tag, field) in self.fields() {
            result.extend(field.annotations().iter().map(|a| (tag, a)));
        }
        for field in self.unrecognized_in_order() {
            result.extend(field.annotations().iter().map(|a| (field.tag.as_str(), a)));
        }
        result
    }

    pub fn worst_severity(&self) -> Option<Severity> {
        self.annotations().into_iter().map(|(_, a)| a.severity).max()
    }

    /// Whether the record parsed and has no annotation of severity danger.
    pub fn is_ok(&self) -> bool {
        self.parse_error.is_none() && self.worst_severity() < Some(Severity::Danger)
    }

    fn validate(&mut self, config: &Config) {
        for field in self.fields_mut() {
            check_duplicate(field);
        }
        for field in self.unrecognized.values_mut() {
            check_duplicate(field);
        }

        check_version(&mut self.v);
        check_granularity(&mut self.g);
        check_hash_algorithms(&mut self.h);
        self.check_key(config);
        check_notes(&mut self.n);
        check_service_types(&mut self.s);
        check_flags(&mut self.t);

        for field in self.unrecognized.values_mut() {
            field.add_info(Message::markup(format!(
                "Unrecognized tag, {}",
                cite("verifiers will ignore it", 6376, "section-3.6.1")
            )));
        }
    }

    fn fields_mut(&mut self) -> [&mut Field; 8] {
        [
            &mut self.v,
            &mut self.g,
            &mut self.h,
            &mut self.k,
            &mut self.n,
            &mut self.p,
            &mut self.s,
            &mut self.t,
        ]
    }

    // The key type selects the rules that apply to the key data.
    fn check_key(&mut self, config: &Config) {
        let key_type = if self.k.defined {
            let key_type = KeyType::from_tag_value(&self.k.value);
            if key_type.is_none() {
                self.k.add_warning(Message::template(
                    "'{}' isn't a key type I recognize",
                    &[self.k.value.as_str()],
                ));
            }
            key_type
        } else {
            Some(KeyType::Rsa)
        };

        if key_type == Some(KeyType::Ed25519) && self.h.defined {
            let sha256 = parse_colon_separated_tag_value(&self.h.value)
                .into_iter()
                .any(|s| HashAlgorithm::from_tag_value(s) == Some(HashAlgorithm::Sha256));
            if !sha256 {
                self.h.add_error(Message::markup(format!(
                    "Ed25519 keys are {}, but this key doesn't allow sha256",
                    cite("only used with SHA-256", 8463, "section-3")
                )));
            }
        }

        let Some(key_data) = read_public_key(&mut self.p) else {
            return;
        };

        let Some(key_type) = key_type else {
            return;
        };

        match read_key_data(key_type, &key_data) {
            Ok(key_data) => match key_type {
                KeyType::Rsa => check_rsa_key(&mut self.p, &key_data, config),
                KeyType::Ed25519 => check_ed25519_key(&mut self.p, &key_data),
            },
            Err(KeyDataError::KeyTypeMismatch(actual)) => {
                self.p.add_error(Message::template(
                    "This is {} key data, but the key type is {}",
                    &[actual.canonical_str(), key_type.canonical_str()],
                ));
            }
            Err(KeyDataError::UnknownAlgorithm) => {
                self.p.add_error("This public key is for an algorithm DKIM doesn't use");
            }
            Err(KeyDataError::InvalidKey) => {
                self.p.add_error(Message::template(
                    "This isn't a valid {} public key",
                    &[key_type.canonical_str()],
                ));
            }
        }
    }
}

impl FromStr for DkimKey {
    type Err = ParseError;

    /// Like [`DkimKey::new`], but returns a parse error as `Err`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = Self::new(s);
        match key.parse_error {
            Some(e) => Err(e),
            None => Ok(key),
        }
    }
}

fn take_field(fields: &mut FieldMap, tag: &str) -> Field {
    fields.remove(tag).unwrap_or_default()
}

fn cite(text: &str, rfc: u32, anchor: &str) -> String {
    format!(r#"<a href="https://www.rfc-editor.org/rfc/rfc{rfc}#{anchor}">{text}</a>"#)
}

fn check_duplicate(field: &mut Field) {
    if field.duplicate {
        field.add_error(Message::markup(format!(
            "This tag appears more than once, {}",
            cite("which makes the whole record invalid", 6376, "section-3.2")
        )));
    }
}

fn check_version(v: &mut Field) {
    if v.defined {
        if v.value != "DKIM1" {
            v.add_error(Message::markup(format!(
                "The version field must be {}",
                cite("DKIM1", 6376, "section-3.6.1")
            )));
        }
        if v.index != 0 {
            v.add_error(Message::markup(format!(
                "The version tag must be the {}",
                cite("first tag in the record", 6376, "section-3.6.1")
            )));
        }
    } else {
        v.add_warning("DKIM key records should ideally have a version field");
    }
}

fn check_granularity(g: &mut Field) {
    if !g.defined {
        return;
    }

    if g.value == "*" {
        g.add_warning(Message::markup(format!(
            r#"The granularity field ("g=*") is deprecated in {}"#,
            cite("RFC 6376", 6376, "appendix-C.2")
        )));
    } else {
        g.add_error(Message::markup(format!(
            r#"The granularity field ("g=") is deprecated in {} and this value will be treated differently by pre-6376 and post-6376 validators"#,
            cite("RFC 6376", 6376, "appendix-C.2")
        )));
    }
}

fn check_hash_algorithms(h: &mut Field) {
    if !h.defined {
        return;
    }

    let algs: Vec<String> = parse_colon_separated_tag_value(&h.value)
        .into_iter()
        .map(Into::into)
        .collect();

    for alg in algs {
        match HashAlgorithm::from_tag_value(&alg) {
            Some(HashAlgorithm::Sha256) => {}
            Some(HashAlgorithm::Sha1) => {
                h.add_warning(Message::markup(format!(
                    "SHA1 is {}, mail using it may fail DKIM now or in the future",
                    cite("not a trusted hash", 8301, "section-3.1")
                )));
            }
            None => {
                h.add_warning(Message::template("'{}' isn't a hash type I recognize", &[alg.as_str()]));
            }
        }
    }
}

// Returns the decoded key data, unless the key is missing, revoked or broken.
fn read_public_key(p: &mut Field) -> Option<Vec<u8>> {
    if !p.defined {
        p.add_error(Message::markup(format!(
            "The public key field (p=) is {}",
            cite("required", 6376, "section-3.6.1")
        )));
        return None;
    }

    if p.value.is_empty() {
        p.add_info(Message::markup(format!(
            "An empty public key field means {}",
            cite("this key has been revoked", 6376, "section-3.6.1")
        )));
        return None;
    }

    match parse_base64_tag_value(&p.value) {
        Ok(key_data) => Some(key_data),
        Err(_) => {
            p.add_error("The public key isn't valid base64");
            None
        }
    }
}

fn check_rsa_key(p: &mut Field, key_data: &KeyData, config: &Config) {
    if let Some(bits) = key_data.key_size {
        if bits < config.min_key_bits {
            p.add_error(Message::markup(format!(
                "This is a {bits} bit RSA key, verifiers {} shorter than {} bits",
                cite("will reject keys", 8301, "section-3.2"),
                config.min_key_bits
            )));
        } else if bits < config.recommended_key_bits {
            p.add_warning(Message::markup(format!(
                "This is a {bits} bit RSA key, signers {} at least {} bits long",
                cite("should use keys", 8301, "section-3.2"),
                config.recommended_key_bits
            )));
        }

        if bits > config.max_key_bits {
            p.add_warning(Message::markup(format!(
                "This is a {bits} bit RSA key, verifiers {} longer than {} bits",
                cite("aren't required to validate keys", 8301, "section-3.2"),
                config.max_key_bits
            )));
        }
    }

    if key_data.format == KeyFormat::RsaPublicKey {
        p.add_info(Message::markup(format!(
            "This key is in RSAPublicKey format, as {}; most signers publish SubjectPublicKeyInfo instead",
            cite("RFC 6376 specifies", 6376, "section-3.6.1")
        )));
    }
}

fn check_ed25519_key(p: &mut Field, key_data: &KeyData) {
    if key_data.format == KeyFormat::SubjectPublicKeyInfo {
        p.add_warning(Message::markup(format!(
            "This Ed25519 key is wrapped in SubjectPublicKeyInfo, but {}",
            cite("only the bare 32 byte key should be published", 8463, "section-4")
        )));
    }
}

fn check_notes(n: &mut Field) {
    if n.defined && parse_qp_section_tag_value(&n.value).is_err() {
        n.add_warning(Message::markup(format!(
            "The notes field (n=) must be {}",
            cite("quoted-printable", 6376, "section-3.6.1")
        )));
    }
}

fn check_service_types(s: &mut Field) {
    if !s.defined {
        return;
    }

    if s.value.is_empty() {
        s.add_warning("The service type field (s=) is empty, so the key can't be used for anything");
        return;
    }

    let service_types: Vec<String> = parse_colon_separated_tag_value(&s.value)
        .into_iter()
        .filter(|st| !st.is_empty())
        .map(Into::into)
        .collect();

    for st in service_types {
        if st != "*" && st != "email" {
            s.add_warning(Message::template("'{}' isn't a service type I recognize", &[st.as_str()]));
        }
    }
}

fn check_flags(t: &mut Field) {
    if !t.defined {
        return;
    }

    let flags: Vec<String> = parse_colon_separated_tag_value(&t.value)
        .into_iter()
        .filter(|f| !f.is_empty())
        .map(Into::into)
        .collect();

    for flag in flags {
        match flag.as_str() {
            "y" => {
                t.add_info(Message::markup(format!(
                    "This key is in {}, verifiers may treat its signatures as unsigned mail",
                    cite("testing mode", 6376, "section-3.6.1")
                )));
            }
            "s" => {}
            _ => {
                t.add_info(Message::template(
                    "'{}' isn't a flag I recognize, verifiers will ignore it",
                    &[flag.as_str()],
                ));
            }
        }
    }
}
