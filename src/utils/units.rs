use {
    crate::errors::MarketError,
    alloy::primitives::{
        utils::{format_ether, parse_ether},
        U256,
    },
    std::str::FromStr,
};

const ETHER_DECIMALS: usize = 18;

/// Converts a decimal wei string (e.g. `"500000000000000000"`) into whole ether.
pub fn wei_str_to_ether(wei: &str) -> Result<f64, MarketError> {
    let value = U256::from_str(wei.trim())
        .map_err(|e| MarketError::invalid_amount(wei, e))?;
    Ok(wei_to_ether(value))
}

/// Divides by 10^18 through the fixed-point formatter so large values don't
/// lose precision before the final float conversion.
pub fn wei_to_ether(wei: U256) -> f64 {
    // format_ether always yields a plain decimal, so the parse can't fail
    format_ether(wei).parse::<f64>().unwrap_or(f64::NAN)
}

/// Converts an ether amount back into wei for transaction values.
pub fn ether_to_wei(ether: f64) -> Result<U256, MarketError> {
    if !ether.is_finite() {
        return Err(MarketError::invalid_amount(ether, "amount is not a finite number"));
    }
    if ether < 0.0 {
        return Err(MarketError::invalid_amount(ether, "amount is negative"));
    }
    // Display prints the shortest decimal that reads back as the same f64, never
    // in exponent form, so 0.1 stays "0.1" instead of picking up binary noise.
    let text = ether.to_string();
    parse_decimal_ether(&text).map_err(|reason| MarketError::invalid_amount(ether, reason))
}

fn parse_decimal_ether(text: &str) -> Result<U256, String> {
    let places = text.split_once('.').map_or(0, |(_, frac)| frac.len());
    if places > ETHER_DECIMALS {
        return Err(format!("more than {} decimal places", ETHER_DECIMALS));
    }
    parse_ether(text).map_err(|e| e.to_string())
}

/// Parses an ether amount given as text, e.g. `LISTING_FEE=0.025`.
pub fn parse_ether_str(ether: &str) -> Result<U256, MarketError> {
    parse_ether(ether.trim()).map_err(|e| MarketError::invalid_amount(ether, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_ether_in_wei_is_one() {
        assert_eq!(wei_str_to_ether("1000000000000000000").unwrap(), 1.0);
        assert_eq!(wei_str_to_ether("500000000000000000").unwrap(), 0.5);
        assert_eq!(wei_str_to_ether("0").unwrap(), 0.0);
    }

    #[test]
    fn price_survives_a_trip_through_wei() {
        for price in [0.01, 0.1, 1.0, 2.5] {
            let wei = ether_to_wei(price).unwrap();
            let back = wei_to_ether(wei);
            assert!((back - price).abs() < 1e-12, "{price} came back as {back}");
        }
    }

    #[test]
    fn exact_wei_for_common_prices() {
        assert_eq!(ether_to_wei(1.0).unwrap(), U256::from(10u64).pow(U256::from(18)));
        assert_eq!(ether_to_wei(0.5).unwrap(), U256::from(500_000_000_000_000_000u64));
    }

    #[test]
    fn rejects_garbage() {
        assert!(wei_str_to_ether("not a number").is_err());
        assert!(ether_to_wei(-1.0).is_err());
        assert!(ether_to_wei(f64::NAN).is_err());
        assert!(ether_to_wei(f64::INFINITY).is_err());
        assert!(matches!(
            ether_to_wei(1e-19),
            Err(MarketError::InvalidAmount { .. })
        ));
    }

    #[test]
    fn decimal_prices_convert_to_exact_wei() {
        let tenth = U256::from(100_000_000_000_000_000u64);
        assert_eq!(ether_to_wei(0.1).unwrap(), tenth);
        assert_eq!(ether_to_wei(0.3).unwrap(), U256::from(300_000_000_000_000_000u64));
        assert_eq!(ether_to_wei(0.7).unwrap(), U256::from(700_000_000_000_000_000u64));
        assert_eq!(ether_to_wei(1e-18).unwrap(), U256::from(1u64));
    }

    #[test]
    fn contract_prices_come_back_to_the_same_wei() {
        for wei in ["100000000000000000", "300000000000000000", "700000000000000000", "10000000000000000"] {
            let ether = wei_str_to_ether(wei).unwrap();
            assert_eq!(ether_to_wei(ether).unwrap(), U256::from_str(wei).unwrap());
        }
    }

    #[test]
    fn listing_fee_text() {
        assert_eq!(
            parse_ether_str("0.025").unwrap(),
            U256::from(25_000_000_000_000_000u64)
        );
    }
}
