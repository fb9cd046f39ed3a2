use std::str::FromStr;

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde::Deserialize;

use crate::external::quote_provider::{ExternalQuote, QuoteProvider, QuoteProviderError};

pub struct AlphaVantageProvider {
    client: reqwest::Client,
    api_key: String,
}

impl AlphaVantageProvider {
    pub fn from_env() -> Result<Self, QuoteProviderError> {
        let api_key = std::env::var("ALPHAVANTAGE_API_KEY")
            .map_err(|_| QuoteProviderError::BadResponse("ALPHAVANTAGE_API_KEY not set".into()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
        })
    }
}

#[derive(Debug, Deserialize)]
struct AvQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<AvGlobalQuote>,

    // When rate-limited Alpha Vantage returns:
    // { "Note": "Thank you for using Alpha Vantage! ... 5 calls per minute ..." }
    #[serde(rename = "Note")]
    note: Option<String>,

    // When invalid:
    // { "Error Message": "Invalid API call. ..." }
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AvGlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
}

fn quote_from_response(
    symbol: &str,
    body: AvQuoteResponse,
) -> Result<ExternalQuote, QuoteProviderError> {
    if body.note.is_some() {
        // This is the throttle response
        return Err(QuoteProviderError::RateLimited);
    }

    if let Some(msg) = body.error_message {
        return Err(QuoteProviderError::BadResponse(msg));
    }

    let quote = body
        .global_quote
        .ok_or_else(|| QuoteProviderError::BadResponse("missing Global Quote".into()))?;

    // An unknown symbol comes back as an empty Global Quote object.
    let price_str = match quote.price {
        Some(p) if !p.is_empty() => p,
        _ => return Err(QuoteProviderError::NotFound(symbol.to_string())),
    };

    let price = BigDecimal::from_str(&price_str)
        .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;

    if price <= BigDecimal::from(0) {
        return Err(QuoteProviderError::BadResponse(format!(
            "non-positive price {} for {}",
            price,
            quote.symbol.as_deref().unwrap_or(symbol)
        )));
    }

    Ok(ExternalQuote {
        price,
        timestamp: chrono::Utc::now(),
    })
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    async fn fetch_quote(&self, symbol: &str) -> Result<ExternalQuote, QuoteProviderError> {
        let url = "https://www.alphavantage.co/query";

        let resp = self
            .client
            .get(url)
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| QuoteProviderError::Network(e.to_string()))?;

        let body = resp
            .json::<AvQuoteResponse>()
            .await
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;

        quote_from_response(symbol, body)
    }
}
