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

//! Inspection of DKIM public key data.
//!
//! # Pitfalls of DKIM public keys in DNS
//!
//! In RFC 6376 a bad mistake was made in the description of the public key
//! creation. Section 3.6.1 states that the p= tag contains an RSA public key in
//! format RSAPublicKey (RFC 3447). However, the example in appendix C shows how
//! to install an RSA public key in format SubjectPublicKeyInfo (RFC 5280) in
//! the DNS. The second format has become the de facto standard; both are
//! accepted here, and the format found is reported.
//!
//! RFC 8463 mandates that the 32 bytes of an Ed25519 public key be installed
//! (in Base64) in DNS. OpenSSL however produces SubjectPublicKeyInfo output
//! for Ed25519 keys, and such keys do show up in DNS. They are recognised, and
//! reported as such.

mod ed25519;
mod rsa;

pub use self::{ed25519::read_ed25519_key_data, rsa::read_rsa_key_data};

use crate::util::CanonicalStr;
use pkcs8::{ObjectIdentifier, SubjectPublicKeyInfoRef};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");
const ED25519_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.101.112");

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KeyType {
    Rsa,
    Ed25519,
}

impl KeyType {
    pub fn from_tag_value(s: &str) -> Option<Self> {
        match s {
            "rsa" => Some(Self::Rsa),
            "ed25519" => Some(Self::Ed25519),
            _ => None,
        }
    }

    fn from_oid(oid: ObjectIdentifier) -> Option<Self> {
        if oid == RSA_ENCRYPTION_OID {
            Some(Self::Rsa)
        } else if oid == ED25519_OID {
            Some(Self::Ed25519)
        } else {
            None
        }
    }
}

impl CanonicalStr for KeyType {
    fn canonical_str(&self) -> &'static str {
        match self {
            Self::Rsa => "rsa",
            Self::Ed25519 => "ed25519",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    pub fn from_tag_value(s: &str) -> Option<Self> {
        match s {
            "sha1" => Some(Self::Sha1),
            "sha256" => Some(Self::Sha256),
            _ => None,
        }
    }
}

impl CanonicalStr for HashAlgorithm {
    fn canonical_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
        }
    }
}

/// The encoding in which public key data was found.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KeyFormat {
    /// DER SubjectPublicKeyInfo (RFC 5280).
    SubjectPublicKeyInfo,
    /// DER RSAPublicKey (RFC 3447).
    RsaPublicKey,
    /// The bare key bytes, as for Ed25519 keys per RFC 8463.
    Raw,
}

/// Properties of successfully read public key data.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct KeyData {
    pub key_type: KeyType,
    pub format: KeyFormat,
    /// Size of the RSA modulus in bits.
    pub key_size: Option<usize>,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KeyDataError {
    InvalidKey,
    /// The data is a SubjectPublicKeyInfo for a different key type.
    KeyTypeMismatch(KeyType),
    /// The data is a SubjectPublicKeyInfo for an unknown algorithm.
    UnknownAlgorithm,
}

impl Display for KeyDataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKey => write!(f, "invalid key data"),
            Self::KeyTypeMismatch(actual) => {
                write!(f, "key data is for key type {}", actual.canonical_str())
            }
            Self::UnknownAlgorithm => write!(f, "key data is for an unknown algorithm"),
        }
    }
}

impl Error for KeyDataError {}

/// Reads public key data of the given key type.
pub fn read_key_data(key_type: KeyType, key_data: &[u8]) -> Result<KeyData, KeyDataError> {
    match key_type {
        KeyType::Rsa => read_rsa_key_data(key_data),
        KeyType::Ed25519 => read_ed25519_key_data(key_data),
    }
}

// Decodes a SubjectPublicKeyInfo, returning `None` if the data is not one.
fn read_spki(key_data: &[u8]) -> Option<SubjectPublicKeyInfoRef<'_>> {
    SubjectPublicKeyInfoRef::try_from(key_data).ok()
}

fn mismatch_error(spki: &SubjectPublicKeyInfoRef<'_>) -> KeyDataError {
    match KeyType::from_oid(spki.algorithm.oid) {
        Some(key_type) => KeyDataError::KeyTypeMismatch(key_type),
        None => KeyDataError::UnknownAlgorithm,
    }
}
