use {
    crate::{errors::MarketError, utils::units::wei_str_to_ether},
    alloy::primitives::U256,
    serde::{Deserialize, Deserializer, Serialize},
    serde_json::Value,
    std::{fmt, str::FromStr},
};

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.png";
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available for this NFT.";

/// An integer as it comes off the wire: a plain integer, a 256-bit word
/// from the contract ABI, or a decimal string from a JSON source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "NumericRepr")]
pub enum Numeric {
    Native(u64),
    Wide(U256),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumericRepr {
    Native(u64),
    Text(String),
}

impl From<NumericRepr> for Numeric {
    fn from(repr: NumericRepr) -> Self {
        match repr {
            NumericRepr::Native(n) => Numeric::Native(n),
            NumericRepr::Text(s) => Numeric::Text(s),
        }
    }
}

impl From<u64> for Numeric {
    fn from(n: u64) -> Self {
        Numeric::Native(n)
    }
}

impl From<U256> for Numeric {
    fn from(n: U256) -> Self {
        Numeric::Wide(n)
    }
}

impl From<&str> for Numeric {
    fn from(s: &str) -> Self {
        Numeric::Text(s.to_string())
    }
}

impl Numeric {
    /// Plain integer form. Wrappers use their own conversion, everything
    /// else is coerced from its decimal text.
    pub fn to_plain_integer(&self) -> Result<u64, MarketError> {
        match self {
            Numeric::Native(n) => Ok(*n),
            Numeric::Wide(n) => u64::try_from(*n)
                .map_err(|_| MarketError::invalid_amount(n, "does not fit in 64 bits")),
            Numeric::Text(s) => {
                let wide = U256::from_str(s.trim()).map_err(|e| MarketError::invalid_amount(s, e))?;
                Numeric::Wide(wide).to_plain_integer()
            }
        }
    }

    pub fn to_decimal_string(&self) -> String {
        match self {
            Numeric::Native(n) => n.to_string(),
            Numeric::Wide(n) => n.to_string(),
            Numeric::Text(s) => s.trim().to_string(),
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

/// One record as returned by `getAllNftsOnSale` / `getOwnedNfts`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNftRecord {
    pub token_id: Numeric,
    /// Price in wei.
    pub price: Numeric,
    pub creator: String,
    pub is_listed: bool,
}

impl RawNftRecord {
    pub fn price_in_ether(&self) -> Result<f64, MarketError> {
        wei_str_to_ether(&self.price.to_decimal_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl NftMetadata {
    /// Stand-in used when the metadata document can't be fetched.
    pub fn placeholder(token_id: u64) -> Self {
        NftMetadata {
            name: format!("NFT #{}", token_id),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
            attributes: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    #[serde(deserialize_with = "value_as_string")]
    pub value: String,
}

// Plenty of collections publish numeric traits ("level": 3).
fn value_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedNft {
    /// Price in ether.
    pub price: f64,
    pub token_id: u64,
    pub creator: String,
    pub is_listed: bool,
    pub meta: NftMetadata,
}
