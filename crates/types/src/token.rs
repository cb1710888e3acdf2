use std::{fmt, str::FromStr};

pub use near_primitives::types::Gas;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

pub const TGAS: Gas = 1_000_000_000_000;
/// Maximum prepaid gas of a single function call.
pub const MAX_GAS: Gas = 300 * TGAS;
pub const DEFAULT_GAS: Gas = 200 * TGAS;

pub const ONE_YOCTO: u128 = 1;
pub const ONE_NEAR: u128 = 1_000_000_000_000_000_000_000_000;
const NEAR_DECIMALS: usize = 24;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseTokenError {
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
    #[error("decimal part too long: {0}")]
    TooPrecise(usize),
    #[error("amount {0:?} overflows")]
    Overflow(String),
}

/// Amount of NEAR, stored in yocto.
///
/// Parses and displays in NEAR units (`"0.5"`), serializes as a yocto
/// decimal string the way contracts and the RPC expect.
#[derive(Default, Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NearToken(u128);

impl NearToken {
    pub const fn from_yocto(yocto: u128) -> Self {
        NearToken(yocto)
    }

    pub const fn from_near(near: u128) -> Self {
        NearToken(near * ONE_NEAR)
    }

    /// `from_milli(500)` is 0.5 NEAR.
    pub const fn from_milli(milli: u128) -> Self {
        NearToken(milli * (ONE_NEAR / 1_000))
    }

    pub const fn as_yocto(self) -> u128 {
        self.0
    }
}

impl From<u128> for NearToken {
    fn from(yocto: u128) -> Self {
        NearToken(yocto)
    }
}

impl FromStr for NearToken {
    type Err = ParseTokenError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        let invalid = || ParseTokenError::InvalidAmount(input.to_owned());
        let (whole, fraction) = match input.split_once('.') {
            Some((whole, fraction)) => (whole, Some(fraction)),
            None => (input, None),
        };
        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let whole: u128 = whole.parse().map_err(|_| invalid())?;
        let mut yocto = whole
            .checked_mul(ONE_NEAR)
            .ok_or_else(|| ParseTokenError::Overflow(input.to_owned()))?;

        if let Some(fraction) = fraction {
            if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            if fraction.len() > NEAR_DECIMALS {
                return Err(ParseTokenError::TooPrecise(fraction.len()));
            }
            let scale = 10u128.pow((NEAR_DECIMALS - fraction.len()) as u32);
            let fraction: u128 = fraction.parse().map_err(|_| invalid())?;
            yocto = yocto
                .checked_add(fraction * scale)
                .ok_or_else(|| ParseTokenError::Overflow(input.to_owned()))?;
        }
        Ok(NearToken(yocto))
    }
}

impl fmt::Display for NearToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / ONE_NEAR;
        let fraction = self.0 % ONE_NEAR;
        if fraction == 0 {
            return write!(f, "{}", whole);
        }
        let fraction = format!("{:0>width$}", fraction, width = NEAR_DECIMALS);
        write!(f, "{}.{}", whole, fraction.trim_end_matches('0'))
    }
}

impl Serialize for NearToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for NearToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse::<u128>()
            .map(NearToken)
            .map_err(|err| de::Error::custom(format!("invalid yocto amount {:?}: {}", s, err)))
    }
}
