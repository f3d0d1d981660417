// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Wei-to-ether conversion.
//!
//! Balances arrive from the node as integer wei quantities (hex or plain
//! decimal strings) and leave the gateway as decimal ether strings. The
//! scaling is exact integer arithmetic; the magnitude never goes through a
//! float.

use num_bigint::BigUint;

use crate::rpc::error::Error;

/// Decimal places separating wei from ether.
const WEI_DECIMALS: usize = 18;

/// Minimum fractional digits kept in a formatted amount.
const MIN_FRACTION_DIGITS: usize = 10;

/// Converts an integer wei amount (`0x`-prefixed hex or plain decimal) into
/// a decimal ether string.
///
/// The fractional part keeps at least [`MIN_FRACTION_DIGITS`] digits and
/// never drops a significant one, so scaling the output back up by 10^18
/// reproduces the input exactly.
///
/// # Errors
///
/// Fails with [`Error::Conversion`] when the input is not a well-formed
/// non-negative integer.
pub fn wei_to_ether(wei: &str) -> Result<String, Error> {
    let amount = parse_wei(wei)?;
    let divisor = BigUint::from(10u8).pow(WEI_DECIMALS as u32);
    let ether = &amount / &divisor;
    let remainder = &amount % &divisor;

    let digits = remainder.to_string();
    let mut fraction = "0".repeat(WEI_DECIMALS - digits.len());
    fraction.push_str(&digits);

    let significant = fraction.trim_end_matches('0').len();
    fraction.truncate(significant.max(MIN_FRACTION_DIGITS));

    Ok(format!("{ether}.{fraction}"))
}

fn parse_wei(wei: &str) -> Result<BigUint, Error> {
    let (digits, radix) = match wei
        .strip_prefix("0x")
        .or_else(|| wei.strip_prefix("0X"))
    {
        Some(hex) => (hex, 16),
        None => (wei, 10),
    };

    if digits.is_empty() {
        return Err(Error::Conversion(wei.to_string()));
    }

    BigUint::parse_bytes(digits.as_bytes(), radix)
        .ok_or_else(|| Error::Conversion(wei.to_string()))
}
