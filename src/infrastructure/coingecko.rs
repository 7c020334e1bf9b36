//! # CoinGecko Market Data
//!
//! `MarketData` over the public CoinGecko v3 API.
//! Quotes come from `/coins/markets`, price history from `/coins/{id}/market_chart`.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::domain::traits::MarketData;
use crate::domain::types::CoinQuote;

#[derive(Debug, Deserialize)]
struct MarketEntry {
    id: String,
    symbol: String,
    name: String,
    current_price: Option<f64>,
    market_cap: Option<f64>,
    market_cap_rank: Option<u32>,
    total_volume: Option<f64>,
    price_change_percentage_24h: Option<f64>,
}

impl MarketEntry {
    fn into_quote(self, vs_currency: &str) -> Option<CoinQuote> {
        Some(CoinQuote {
            price: self.current_price?,
            id: self.id,
            symbol: self.symbol,
            name: self.name,
            vs_currency: vs_currency.to_string(),
            change_24h_pct: self.price_change_percentage_24h,
            market_cap: self.market_cap,
            volume_24h: self.total_volume,
            rank: self.market_cap_rank,
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    prices: Vec<(f64, f64)>,
}

/// Several coins can share a ticker; the best ranked one wins, unranked ones last.
fn pick_symbol(entries: Vec<MarketEntry>, symbol: &str, vs_currency: &str) -> Option<CoinQuote> {
    entries
        .into_iter()
        .filter(|e| e.symbol.eq_ignore_ascii_case(symbol))
        .filter_map(|e| e.into_quote(vs_currency))
        .min_by_key(|q| q.rank.unwrap_or(u32::MAX))
}

pub struct CoinGecko {
    client: Client,
    base_url: String,
}

impl CoinGecko {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn markets(&self, query: &[(&str, String)]) -> Result<Vec<MarketEntry>> {
        let url = format!("{}/coins/markets", self.base_url);
        self.client
            .get(&url)
            .query(query)
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()?
            .json()
            .await
            .context("Failed to decode /coins/markets response")
    }
}

#[async_trait]
impl MarketData for CoinGecko {
    async fn quote(&self, symbol: &str, vs_currency: &str) -> Result<Option<CoinQuote>> {
        let entries = self
            .markets(&[
                ("vs_currency", vs_currency.to_string()),
                ("symbols", symbol.to_lowercase()),
            ])
            .await?;
        Ok(pick_symbol(entries, symbol, vs_currency))
    }

    async fn top(&self, limit: usize, vs_currency: &str) -> Result<Vec<CoinQuote>> {
        let entries = self
            .markets(&[
                ("vs_currency", vs_currency.to_string()),
                ("order", "market_cap_desc".to_string()),
                ("per_page", limit.to_string()),
                ("page", "1".to_string()),
            ])
            .await?;
        Ok(entries
            .into_iter()
            .filter_map(|e| e.into_quote(vs_currency))
            .take(limit)
            .collect())
    }

    async fn history(&self, coin_id: &str, vs_currency: &str, days: u32) -> Result<Vec<f64>> {
        let url = format!("{}/coins/{coin_id}/market_chart", self.base_url);
        let chart: ChartResponse = self
            .client
            .get(&url)
            .query(&[("vs_currency", vs_currency.to_string()), ("days", days.to_string())])
            .send()
            .await
            .with_context(|| format!("GET {url}"))?
            .error_for_status()?
            .json()
            .await
            .context("Failed to decode market_chart response")?;
        Ok(chart.prices.into_iter().map(|(_, price)| price).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MARKETS: &str = r#"[
        {"id":"bitcoin","symbol":"btc","name":"Bitcoin","current_price":64231.5,
         "market_cap":1265000000000,"market_cap_rank":1,"total_volume":31000000000,
         "price_change_percentage_24h":-1.25},
        {"id":"batcat","symbol":"btc","name":"BatCat","current_price":0.0001,
         "market_cap":1000,"market_cap_rank":null,"total_volume":12,
         "price_change_percentage_24h":null},
        {"id":"ghost","symbol":"btc","name":"Ghost","current_price":null,
         "market_cap":null,"market_cap_rank":null,"total_volume":null,
         "price_change_percentage_24h":null}
    ]"#;

    #[test]
    fn test_pick_symbol_prefers_ranked_coin() {
        let entries: Vec<MarketEntry> = serde_json::from_str(MARKETS).unwrap();
        let quote = pick_symbol(entries, "BTC", "usd").unwrap();
        assert_eq!(quote.id, "bitcoin");
        assert_eq!(quote.price, 64231.5);
        assert_eq!(quote.rank, Some(1));
        assert_eq!(quote.change_24h_pct, Some(-1.25));
        assert_eq!(quote.vs_currency, "usd");
    }

    #[test]
    fn test_pick_symbol_unknown() {
        let entries: Vec<MarketEntry> = serde_json::from_str(MARKETS).unwrap();
        assert!(pick_symbol(entries, "eth", "usd").is_none());
        assert!(pick_symbol(Vec::new(), "btc", "usd").is_none());
    }

    #[test]
    fn test_chart_prices() {
        let chart: ChartResponse =
            serde_json::from_str(r#"{"prices":[[1717200000000,100.5],[1717286400000,101.0]],"market_caps":[],"total_volumes":[]}"#)
                .unwrap();
        let points: Vec<f64> = chart.prices.into_iter().map(|(_, p)| p).collect();
        assert_eq!(points, vec![100.5, 101.0]);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let gecko = CoinGecko::new(Client::new(), "https://api.coingecko.com/api/v3/");
        assert_eq!(gecko.base_url, "https://api.coingecko.com/api/v3");
    }
}
