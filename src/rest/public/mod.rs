//! Public REST API endpoints (no authentication required).

mod types;

pub use types::*;

use serde_json::Value;

use crate::error::{ApiError, SxcError, messages};
use crate::rest::SxcRestClient;
use crate::rest::client::decode_value;
use crate::rest::endpoints::public;
use crate::rest::request::{ApiRequest, market_path};
use crate::rest::transport::Transport;

const MILLISECONDS_IN_SECOND: i64 = 1_000;

impl<T: Transport> SxcRestClient<T> {
    /// List all markets.
    pub async fn list_markets(&self) -> Result<Vec<Market>, SxcError> {
        self.call_typed(ApiRequest::public_get(public::MARKETS))
            .await
    }

    /// Get the price of a market.
    ///
    /// Fails with an [`ApiError`] of kind `InvalidMarket` if the market does not exist.
    pub async fn get_price(
        &self,
        target_currency: &str,
        reference_currency: &str,
    ) -> Result<Price, SxcError> {
        let endpoint = market_path(public::PRICE, target_currency, reference_currency)?;
        let value = self.call(ApiRequest::public_get(&endpoint)).await?;
        decode_value(&endpoint, require_market(value)?)
    }

    /// List market history between two timestamps.
    ///
    /// Timestamps are Unix seconds. `(end_ts - start_ts) / periods` should be
    /// one of the native [`MarketHistoryInterval`](crate::types::MarketHistoryInterval)
    /// values, otherwise the exchange may return buckets of a different width
    /// without warning. `periods` above
    /// [`MAX_MARKET_HISTORY_PERIODS`](crate::types::MAX_MARKET_HISTORY_PERIODS)
    /// is silently capped by the exchange.
    ///
    /// See [`SxcRestClient::market_history_by_granularity`] for a checked
    /// variant.
    pub async fn list_market_history(
        &self,
        target_currency: &str,
        reference_currency: &str,
        start_ts: i64,
        end_ts: i64,
        periods: u32,
    ) -> Result<Vec<Candle>, SxcError> {
        let to_millis = |ts: i64| {
            ts.checked_mul(MILLISECONDS_IN_SECOND)
                .ok_or_else(|| SxcError::Validation(format!("Timestamp out of range: {ts}")))
        };
        let endpoint = format!(
            "{}/{}/{}/{}",
            market_path(public::HISTORY, target_currency, reference_currency)?,
            to_millis(start_ts)?,
            to_millis(end_ts)?,
            periods
        );
        let candles: Option<Vec<Candle>> = self.call_typed(ApiRequest::public_get(endpoint)).await?;
        Ok(candles.unwrap_or_default())
    }

    /// List the order book of a market.
    ///
    /// Fails with an [`ApiError`] of kind `InvalidMarket` if the market does not exist.
    pub async fn list_order_book(
        &self,
        target_currency: &str,
        reference_currency: &str,
    ) -> Result<OrderBook, SxcError> {
        let endpoint = market_path(public::BOOK, target_currency, reference_currency)?;
        let value = self.call(ApiRequest::public_get(&endpoint)).await?;
        decode_value(&endpoint, require_market(value)?)
    }

    /// List the latest trades of a market.
    pub async fn list_trades(
        &self,
        target_currency: &str,
        reference_currency: &str,
    ) -> Result<Vec<Trade>, SxcError> {
        let endpoint = market_path(public::TRADES, target_currency, reference_currency)?;
        let trades: Option<Vec<Trade>> = self.call_typed(ApiRequest::public_get(endpoint)).await?;
        Ok(trades.unwrap_or_default())
    }

    /// Get currencies, markets and trader levels with their fees.
    pub async fn list_fees(&self) -> Result<Fees, SxcError> {
        self.call_typed(ApiRequest::public_get(public::FEES)).await
    }
}

/// The exchange answers an unknown market with an empty success body.
fn require_market(value: Value) -> Result<Value, SxcError> {
    let empty = match &value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    };
    if empty {
        return Err(SxcError::Api(ApiError::new(
            "InvalidMarket",
            messages::MARKET_DOES_NOT_EXIST,
            200,
        )));
    }
    Ok(value)
}
