//! Encoding of constructor & function arguments into Cairo calldata

use starknet::core::{types::Felt, utils::cairo_short_string_to_felt};
use tracing::warn;

use crate::{constants::MAX_SHORT_STRING_LEN, errors::ScriptError};

/// A value with a Cairo serialization
pub trait CairoSerialize {
    /// Append the serialized value to `out`
    fn encode(&self, out: &mut Vec<Felt>);
}

impl CairoSerialize for Felt {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(*self);
    }
}

impl CairoSerialize for bool {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(if *self { Felt::ONE } else { Felt::ZERO });
    }
}

impl CairoSerialize for u32 {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(Felt::from(*self));
    }
}

impl CairoSerialize for u64 {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(Felt::from(*self));
    }
}

/// Arrays are length-prefixed
impl<T: CairoSerialize> CairoSerialize for [T] {
    fn encode(&self, out: &mut Vec<Felt>) {
        out.push(Felt::from(self.len()));
        for item in self {
            item.encode(out);
        }
    }
}

impl<T: CairoSerialize> CairoSerialize for Vec<T> {
    fn encode(&self, out: &mut Vec<Felt>) {
        self.as_slice().encode(out)
    }
}

/// Builds a calldata vector argument by argument
#[derive(Clone, Debug, Default)]
pub struct Calldata(Vec<Felt>);

impl Calldata {
    /// Start an empty calldata vector
    pub fn new() -> Self {
        Calldata::default()
    }

    /// Append an argument
    pub fn arg<T: CairoSerialize + ?Sized>(mut self, value: &T) -> Self {
        value.encode(&mut self.0);
        self
    }

    /// The encoded calldata
    pub fn into_inner(self) -> Vec<Felt> {
        self.0
    }
}

/// Encode a Cairo short string.
///
/// Identifiers are stored uppercase on-chain, so lowercase input is
/// uppercased with a warning.
pub fn short_string(text: &str) -> Result<Felt, ScriptError> {
    let upper = text.to_uppercase();
    if upper != text {
        warn!("Converting lower to uppercase for short string: {text}");
    }
    if upper.len() > MAX_SHORT_STRING_LEN {
        return Err(ScriptError::CalldataConstruction(format!(
            "`{upper}` is longer than {MAX_SHORT_STRING_LEN} bytes"
        )));
    }

    cairo_short_string_to_felt(&upper)
        .map_err(|e| ScriptError::CalldataConstruction(format!("`{upper}`: {e}")))
}

/// A currency as registered in the oracle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Currency {
    /// The currency ticker, as a short string
    pub id: Felt,
    /// The number of decimals prices in this currency carry
    pub decimals: u32,
    /// Whether the currency has no on-chain token (e.g. USD)
    pub is_abstract_currency: bool,
    /// The address of the token on Starknet
    pub starknet_address: Felt,
    /// The address of the token on Ethereum
    pub ethereum_address: Felt,
}

impl CairoSerialize for Currency {
    fn encode(&self, out: &mut Vec<Felt>) {
        self.id.encode(out);
        self.decimals.encode(out);
        self.is_abstract_currency.encode(out);
        self.starknet_address.encode(out);
        self.ethereum_address.encode(out);
    }
}

/// A pair as registered in the oracle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pair {
    /// The pair identifier, e.g. `ETH/USD`, as a short string
    pub id: Felt,
    /// The first currency of the pair
    pub quote_currency_id: Felt,
    /// The second currency of the pair
    pub base_currency_id: Felt,
}

impl CairoSerialize for Pair {
    fn encode(&self, out: &mut Vec<Felt>) {
        self.id.encode(out);
        self.quote_currency_id.encode(out);
        self.base_currency_id.encode(out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_strings_are_uppercased() {
        assert_eq!(short_string("eth").unwrap(), short_string("ETH").unwrap());
        // "ETH" = 0x455448
        assert_eq!(short_string("ETH").unwrap(), Felt::from(0x455448u64));
    }

    #[test]
    fn long_short_strings_are_rejected() {
        let too_long = "A".repeat(MAX_SHORT_STRING_LEN + 1);
        assert!(short_string(&too_long).is_err());
    }

    #[test]
    fn arrays_are_length_prefixed() {
        let calldata = Calldata::new()
            .arg(&Felt::from(7u64))
            .arg(&vec![Felt::ONE, Felt::TWO])
            .into_inner();
        assert_eq!(calldata, vec![Felt::from(7u64), Felt::TWO, Felt::ONE, Felt::TWO]);
    }

    #[test]
    fn currency_encodes_in_field_order() {
        let currency = Currency {
            id: short_string("USD").unwrap(),
            decimals: 8,
            is_abstract_currency: true,
            starknet_address: Felt::ZERO,
            ethereum_address: Felt::ZERO,
        };

        let calldata = Calldata::new().arg(&currency).into_inner();
        assert_eq!(
            calldata,
            vec![
                short_string("USD").unwrap(),
                Felt::from(8u64),
                Felt::ONE,
                Felt::ZERO,
                Felt::ZERO,
            ]
        );
    }
}
