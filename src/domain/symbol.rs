use {
    crate::config::QUOTE_ASSETS,
    serde::{Deserialize, Serialize},
};

/// A trading pair in its canonical (Binance-style) form, e.g. "BTCUSDT".
/// The OKX form inserts a dash before the quote asset: "BTC-USDT".
#[derive(Serialize, Deserialize, Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct SymbolPair(String);

impl SymbolPair {
    pub fn new(name: impl Into<String>) -> Self {
        SymbolPair(name.into().to_uppercase())
    }

    /// Parses the dashed OKX instrument id back to canonical form.
    /// "ETH-USDT" -> "ETHUSDT".
    pub fn from_okx_inst_id(inst_id: &str) -> Self {
        SymbolPair(inst_id.replace('-', "").to_uppercase())
    }

    pub(crate) fn get_quote(text: &str) -> Option<&str> {
        QUOTE_ASSETS
            .iter()
            .find(|&&ext| text.ends_with(ext))
            .copied()
    }

    pub(crate) fn get_base(text: &str) -> Option<&str> {
        let quote = Self::get_quote(text)?;
        text.strip_suffix(quote)
    }

    /// The name we pass into the Binance API.
    pub fn bn_name(&self) -> &str {
        &self.0
    }

    /// The instrument id OKX expects, e.g. "BTC-USDT". Pairs whose quote
    /// asset we cannot split fall back to the undashed name (OKX will reject
    /// it and the failover surfaces that as a source error).
    pub fn okx_inst_id(&self) -> String {
        match (Self::get_base(&self.0), Self::get_quote(&self.0)) {
            (Some(base), Some(quote)) if !base.is_empty() => format!("{}-{}", base, quote),
            _ => self.0.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SymbolPair {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
