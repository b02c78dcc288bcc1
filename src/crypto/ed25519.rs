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
use ed25519_dalek::{pkcs8::DecodePublicKey, VerifyingKey, PUBLIC_KEY_LENGTH};

pub fn read_ed25519_key_data(key_data: &[u8]) -> Result<KeyData, KeyDataError> {
    // RFC 8463: the bare 32 bytes of the public key
    if key_data.len() == PUBLIC_KEY_LENGTH {
        VerifyingKey::try_from(key_data).map_err(|_| KeyDataError::InvalidKey)?;
        return Ok(KeyData {
            key_type: KeyType::Ed25519,
            format: KeyFormat::Raw,
            key_size: None,
        });
    }

    let spki = read_spki(key_data).ok_or(KeyDataError::InvalidKey)?;
    if spki.algorithm.oid != super::ED25519_OID {
        return Err(mismatch_error(&spki));
    }

    VerifyingKey::from_public_key_der(key_data).map_err(|_| KeyDataError::InvalidKey)?;

    Ok(KeyData {
        key_type: KeyType::Ed25519,
        format: KeyFormat::SubjectPublicKeyInfo,
        key_size: None,
    })
}
