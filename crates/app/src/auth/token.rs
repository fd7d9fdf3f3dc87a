//! Bearer token format and verifier derivation.
//!
//! Tokens look like `hp_v1_<token uuid, simple>.<64 hex chars>`. Only a
//! SHA-256 verifier of the secret, bound to the token and user ids, is stored.

use std::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

use rand::{RngCore, rngs::OsRng};
use sha2::{Digest, Sha256};
use thiserror::Error;
use uuid::Uuid;
use zeroize::Zeroize;

use crate::{auth::models::ApiTokenUuid, domain::users::UserUuid};

pub const TOKEN_PREFIX: &str = "hp";

pub const SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVersion {
    V1,
}

impl TokenVersion {
    #[must_use]
    pub const fn as_i16(self) -> i16 {
        match self {
            Self::V1 => 1,
        }
    }

    const fn segment(self) -> &'static str {
        match self {
            Self::V1 => "v1",
        }
    }
}

impl TryFrom<i16> for TokenVersion {
    type Error = TokenError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::V1),
            _ => Err(TokenError::UnsupportedVersion),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token format is invalid")]
    InvalidFormat,

    #[error("token version is not supported")]
    UnsupportedVersion,

    #[error("token secret is not valid hex")]
    InvalidSecret,
}

/// Secret half of a token; wiped on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret([u8; SECRET_BYTES]);

impl TokenSecret {
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0_u8; SECRET_BYTES];

        OsRng.fill_bytes(&mut bytes);

        Self(bytes)
    }

    #[must_use]
    pub const fn from_bytes(bytes: [u8; SECRET_BYTES]) -> Self {
        Self(bytes)
    }

    fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{byte:02x}")).collect()
    }

    fn from_hex(hex: &str) -> Result<Self, TokenError> {
        if hex.len() != SECRET_BYTES * 2 || !hex.is_ascii() {
            return Err(TokenError::InvalidSecret);
        }

        let mut bytes = [0_u8; SECRET_BYTES];

        for (byte, pair) in bytes.iter_mut().zip(hex.as_bytes().chunks_exact(2)) {
            let pair = std::str::from_utf8(pair).map_err(|_utf8| TokenError::InvalidSecret)?;

            *byte = u8::from_str_radix(pair, 16).map_err(|_digit| TokenError::InvalidSecret)?;
        }

        Ok(Self(bytes))
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret(**redacted**)")
    }
}

impl Drop for TokenSecret {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// A bearer token as presented by a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BearerToken {
    pub token_uuid: ApiTokenUuid,
    pub version: TokenVersion,
    pub secret: TokenSecret,
}

impl BearerToken {
    /// Mint a fresh token with a random secret.
    #[must_use]
    pub fn generate() -> Self {
        Self {
            token_uuid: ApiTokenUuid::new(),
            version: TokenVersion::V1,
            secret: TokenSecret::generate(),
        }
    }

    /// Hex SHA-256 of `{token uuid}:{version}:{user uuid}:{secret hex}`.
    #[must_use]
    pub fn verifier(&self, user: UserUuid) -> String {
        let mut input = format!(
            "{}:{}:{}:{}",
            self.token_uuid.into_uuid().simple(),
            self.version.as_i16(),
            user.into_uuid().simple(),
            self.secret.to_hex(),
        );

        let digest = Sha256::digest(input.as_bytes());

        input.zeroize();

        format!("{digest:x}")
    }

    /// Compare against a stored verifier without short-circuiting.
    #[must_use]
    pub fn matches(&self, user: UserUuid, stored: &str) -> bool {
        let computed = self.verifier(user);

        computed.len() == stored.len()
            && computed
                .bytes()
                .zip(stored.bytes())
                .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

impl Display for BearerToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{TOKEN_PREFIX}_{}_{}.{}",
            self.version.segment(),
            self.token_uuid.into_uuid().simple(),
            self.secret.to_hex()
        )
    }
}

impl FromStr for BearerToken {
    type Err = TokenError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let (head, secret) = token.split_once('.').ok_or(TokenError::InvalidFormat)?;

        let mut segments = head.splitn(3, '_');

        let (Some(TOKEN_PREFIX), Some(version), Some(uuid)) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(TokenError::InvalidFormat);
        };

        let version = match version {
            "v1" => TokenVersion::V1,
            _ => return Err(TokenError::UnsupportedVersion),
        };

        let token_uuid = Uuid::try_parse(uuid).map_err(|_uuid| TokenError::InvalidFormat)?;

        Ok(Self {
            token_uuid: ApiTokenUuid::from_uuid(token_uuid),
            version,
            secret: TokenSecret::from_hex(secret)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_token() -> BearerToken {
        BearerToken {
            token_uuid: ApiTokenUuid::from_uuid(Uuid::nil()),
            version: TokenVersion::V1,
            secret: TokenSecret::from_bytes([0xab; SECRET_BYTES]),
        }
    }

    #[test]
    fn formats_with_prefix_version_and_hex_secret() {
        let token = fixed_token().to_string();

        assert_eq!(
            token,
            format!("hp_v1_{}.{}", "0".repeat(32), "ab".repeat(SECRET_BYTES))
        );
    }

    #[test]
    fn parses_its_own_output() {
        let token = BearerToken::generate();
        let parsed: BearerToken = token.to_string().parse().expect("token should parse");

        assert_eq!(parsed, token);
    }

    #[test]
    fn parse_accepts_uppercase_hex() {
        let raw = format!("hp_v1_{}.{}", "0".repeat(32), "AB".repeat(SECRET_BYTES));

        assert_eq!(raw.parse::<BearerToken>(), Ok(fixed_token()));
    }

    #[test]
    fn parse_rejects_malformed_tokens() {
        let uuid = "0".repeat(32);
        let secret = "ab".repeat(SECRET_BYTES);

        assert_eq!(
            format!("lt_v1_{uuid}.{secret}").parse::<BearerToken>(),
            Err(TokenError::InvalidFormat)
        );
        assert_eq!(
            format!("hp_v9_{uuid}.{secret}").parse::<BearerToken>(),
            Err(TokenError::UnsupportedVersion)
        );
        assert_eq!(
            format!("hp_v1_{uuid}.{}", "zz".repeat(SECRET_BYTES)).parse::<BearerToken>(),
            Err(TokenError::InvalidSecret)
        );
        assert_eq!(
            format!("hp_v1_{uuid}.abc").parse::<BearerToken>(),
            Err(TokenError::InvalidSecret)
        );
        assert_eq!(
            format!("hp_v1_{uuid}").parse::<BearerToken>(),
            Err(TokenError::InvalidFormat)
        );
    }

    #[test]
    fn verifier_is_bound_to_user() {
        let token = fixed_token();
        let alice = UserUuid::from_uuid(Uuid::nil());
        let bob = UserUuid::from_uuid(Uuid::max());

        let stored = token.verifier(alice);

        assert_eq!(stored.len(), 64, "hex sha-256");
        assert!(token.matches(alice, &stored));
        assert!(!token.matches(bob, &stored));
    }

    #[test]
    fn debug_never_prints_secret() {
        let rendered = format!("{:?}", fixed_token());

        assert!(!rendered.contains("ab"), "secret leaked: {rendered}");
    }
}
