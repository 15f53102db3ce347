// Symbol discovery: the union of live USDT spot pairs on both exchanges.

use {
    crate::{
        config::{BINANCE_EXCHANGE_INFO_URL, OKX},
        data::source::SourceError,
        domain::SymbolPair,
    },
    serde::Deserialize,
    std::collections::BTreeSet,
};

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<ExchangeSymbol>,
}

#[derive(Debug, Deserialize)]
struct ExchangeSymbol {
    symbol: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct InstrumentsEnvelope {
    #[serde(default)]
    data: Vec<Instrument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Instrument {
    inst_id: String,
    state: String,
}

async fn binance_usdt_pairs(client: &reqwest::Client) -> Result<Vec<SymbolPair>, SourceError> {
    let info: ExchangeInfo = client
        .get(BINANCE_EXCHANGE_INFO_URL)
        .send()
        .await
        .map_err(SourceError::from)?
        .error_for_status()
        .map_err(SourceError::from)?
        .json()
        .await
        .map_err(|e| SourceError::Malformed(e.to_string()))?;

    Ok(info
        .symbols
        .into_iter()
        .filter(|s| s.symbol.ends_with("USDT") && s.status == "TRADING")
        .map(|s| SymbolPair::new(s.symbol))
        .collect())
}

async fn okx_usdt_pairs(client: &reqwest::Client) -> Result<Vec<SymbolPair>, SourceError> {
    let envelope: InstrumentsEnvelope = client
        .get(OKX.instruments_url)
        .send()
        .await
        .map_err(SourceError::from)?
        .error_for_status()
        .map_err(SourceError::from)?
        .json()
        .await
        .map_err(|e| SourceError::Malformed(e.to_string()))?;

    Ok(envelope
        .data
        .into_iter()
        .filter(|i| i.inst_id.ends_with("-USDT") && i.state == "live")
        .map(|i| SymbolPair::from_okx_inst_id(&i.inst_id))
        .collect())
}

/// Deduplicated, sorted union of both exchanges' listings, capped at
/// `max_pairs`. Either exchange failing is tolerated as long as the other
/// answers; both failing surfaces the primary's error.
pub async fn discover_usdt_pairs(max_pairs: usize) -> Result<Vec<SymbolPair>, SourceError> {
    let client = reqwest::Client::new();
    let (binance, okx) = tokio::join!(binance_usdt_pairs(&client), okx_usdt_pairs(&client));

    let mut union: BTreeSet<SymbolPair> = BTreeSet::new();
    let mut first_err = None;
    match binance {
        Ok(pairs) => union.extend(pairs),
        Err(e) => first_err = Some(e),
    }
    match okx {
        Ok(pairs) => union.extend(pairs),
        Err(e) => {
            if union.is_empty() {
                return Err(first_err.unwrap_or(e));
            }
        }
    }
    if union.is_empty() {
        return Err(first_err
            .unwrap_or_else(|| SourceError::Malformed("no tradable USDT pairs listed".into())));
    }

    Ok(union.into_iter().take(max_pairs).collect())
}
