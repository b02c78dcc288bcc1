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

use crate::crypto::{mismatch_error, read_spki, KeyData, KeyDataError, KeyFormat, KeyType};
use ::rsa::{
    pkcs1::{DecodeRsaPublicKey, RsaPublicKey as RsaPublicKeyDer},
    RsaPublicKey,
};

// Keys larger than this are not loaded by the rsa crate, they are only
// measured.
const MAX_LOADABLE_KEY_SIZE: usize = 4096;

pub fn read_rsa_key_data(key_data: &[u8]) -> Result<KeyData, KeyDataError> {
    // first try reading data as SubjectPublicKeyInfo
    // (*de facto* procedure, as shown in examples in appendix of RFC)
    // then try reading data as RSAPublicKey
    // (what was actually specified in RFC, but not what is in appendix)
    let (der, format) = match read_spki(key_data) {
        Some(spki) => {
            if spki.algorithm.oid != super::RSA_ENCRYPTION_OID {
                return Err(mismatch_error(&spki));
            }
            let der = spki.subject_public_key.as_bytes().ok_or(KeyDataError::InvalidKey)?;
            (der, KeyFormat::SubjectPublicKeyInfo)
        }
        None => (key_data, KeyFormat::RsaPublicKey),
    };

    let public_key = RsaPublicKeyDer::try_from(der).map_err(|_| KeyDataError::InvalidKey)?;
    let key_size = modulus_size(public_key.modulus.as_bytes());

    if key_size == 0 {
        return Err(KeyDataError::InvalidKey);
    }

    // exponent sanity checks
    if key_size <= MAX_LOADABLE_KEY_SIZE {
        RsaPublicKey::from_pkcs1_der(der).map_err(|_| KeyDataError::InvalidKey)?;
    }

    Ok(KeyData {
        key_type: KeyType::Rsa,
        format,
        key_size: Some(key_size),
    })
}

// Size in bits of a big-endian unsigned integer without leading zero bytes.
fn modulus_size(modulus: &[u8]) -> usize {
    match modulus.first() {
        Some(&first) => (modulus.len() - 1) * 8 + (8 - first.leading_zeros() as usize),
        None => 0,
    }
}
