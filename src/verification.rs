use std::fmt;
use std::str::FromStr;

use hmac::{digest::KeyInit, Hmac, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512, Sha512_224, Sha512_256};

use crate::error::WebhookError;

/// Keyed hashes this build can compute for the signature header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    Md5,
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
}

impl HashAlgorithm {
    pub const ALL: [HashAlgorithm; 8] = [
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha512_224,
        Self::Sha512_256,
    ];

    /// The name used in the signature header.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha224 => "sha224",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
            Self::Sha512_224 => "sha512/224",
            Self::Sha512_256 => "sha512/256",
        }
    }

    /// HMAC of `body` keyed with `secret`.
    pub fn mac(self, secret: &[u8], body: &[u8]) -> Vec<u8> {
        match self {
            Self::Md5 => compute_mac::<Hmac<Md5>>(secret, body),
            Self::Sha1 => compute_mac::<Hmac<Sha1>>(secret, body),
            Self::Sha224 => compute_mac::<Hmac<Sha224>>(secret, body),
            Self::Sha256 => compute_mac::<Hmac<Sha256>>(secret, body),
            Self::Sha384 => compute_mac::<Hmac<Sha384>>(secret, body),
            Self::Sha512 => compute_mac::<Hmac<Sha512>>(secret, body),
            Self::Sha512_224 => compute_mac::<Hmac<Sha512_224>>(secret, body),
            Self::Sha512_256 => compute_mac::<Hmac<Sha512_256>>(secret, body),
        }
    }

    /// Check `expected` against the HMAC of `body` in constant time.
    pub fn verify(self, secret: &[u8], body: &[u8], expected: &[u8]) -> bool {
        match self {
            Self::Md5 => verify_mac::<Hmac<Md5>>(secret, body, expected),
            Self::Sha1 => verify_mac::<Hmac<Sha1>>(secret, body, expected),
            Self::Sha224 => verify_mac::<Hmac<Sha224>>(secret, body, expected),
            Self::Sha256 => verify_mac::<Hmac<Sha256>>(secret, body, expected),
            Self::Sha384 => verify_mac::<Hmac<Sha384>>(secret, body, expected),
            Self::Sha512 => verify_mac::<Hmac<Sha512>>(secret, body, expected),
            Self::Sha512_224 => verify_mac::<Hmac<Sha512_224>>(secret, body, expected),
            Self::Sha512_256 => verify_mac::<Hmac<Sha512_256>>(secret, body, expected),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashAlgorithm {
    type Err = WebhookError;

    /// Names are case-sensitive, as the sender spells them.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == name)
            .ok_or_else(|| WebhookError::UnsupportedAlgorithm(name.to_string()))
    }
}

fn compute_mac<M: Mac + KeyInit>(secret: &[u8], body: &[u8]) -> Vec<u8> {
    // HMAC accepts keys of any length.
    let mut mac = match <M as KeyInit>::new_from_slice(secret) {
        Ok(m) => m,
        Err(_) => return Vec::new(),
    };
    mac.update(body);
    mac.finalize().into_bytes().to_vec()
}

fn verify_mac<M: Mac + KeyInit>(secret: &[u8], body: &[u8], expected: &[u8]) -> bool {
    let mut mac = match <M as KeyInit>::new_from_slice(secret) {
        Ok(m) => m,
        Err(_) => return false,
    };
    mac.update(body);
    mac.verify_slice(expected).is_ok()
}

/// Split a signature header of the form `<algorithm>=<hexdigest>`.
///
/// A header without `=`, or with either side empty, names no algorithm this
/// build supports and fails the same way an unknown name does.
pub fn parse_signature(header: &str) -> Result<(HashAlgorithm, &str), WebhookError> {
    let (name, digest) = header.split_once('=').unwrap_or(("", ""));
    if name.is_empty() || digest.is_empty() {
        return Err(WebhookError::UnsupportedAlgorithm(name.to_string()));
    }
    Ok((name.parse()?, digest))
}

/// Verify a signature header against `body` keyed with `secret`.
///
/// A digest that is not valid hex can never match and is reported as a
/// secret mismatch.
pub fn verify_signature(secret: &[u8], body: &[u8], header: &str) -> Result<(), WebhookError> {
    let (algorithm, digest) = parse_signature(header)?;
    let expected = hex::decode(digest).map_err(|_| WebhookError::InvalidSecret)?;

    if algorithm.verify(secret, body, &expected) {
        Ok(())
    } else {
        Err(WebhookError::InvalidSecret)
    }
}

/// Build a signature header value, `<algorithm>=<hexdigest>`.
pub fn sign(algorithm: HashAlgorithm, secret: &[u8], body: &[u8]) -> String {
    format!("{algorithm}={}", hex::encode(algorithm.mac(secret, body)))
}
