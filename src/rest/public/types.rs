//! Types for public REST API endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use time::OffsetDateTime;

use crate::types::serde_helpers::{optional_sxc_datetime, sxc_datetime};

/// A tradable market, listed as `[listing, reference, id]`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Value>")]
pub struct Market {
    /// Listing (target) currency code.
    pub listing_currency: String,
    /// Reference (quote) currency code.
    pub reference_currency: String,
    /// Exchange market identifier, when reported.
    pub market_id: Option<u64>,
}

impl TryFrom<Vec<Value>> for Market {
    type Error = String;

    fn try_from(value: Vec<Value>) -> Result<Self, Self::Error> {
        let mut items = value.into_iter();
        let mut next_code = |what: &str| match items.next() {
            Some(Value::String(code)) => Ok(code),
            other => Err(format!("Expected {what} currency code, got {other:?}")),
        };
        let listing_currency = next_code("listing")?;
        let reference_currency = next_code("reference")?;
        let market_id = match items.next() {
            None | Some(Value::Null) => None,
            Some(Value::Number(n)) => Some(
                n.as_u64()
                    .ok_or_else(|| format!("Invalid market id: {n}"))?,
            ),
            Some(other) => return Err(format!("Invalid market id: {other}")),
        };
        Ok(Self {
            listing_currency,
            reference_currency,
            market_id,
        })
    }
}

/// Price summary of a single market.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Price {
    /// Best bid.
    #[serde(rename = "Bid")]
    pub bid: Option<Decimal>,
    /// Best ask.
    #[serde(rename = "Ask")]
    pub ask: Option<Decimal>,
    /// Last traded price.
    #[serde(rename = "Last")]
    pub last: Option<Decimal>,
    /// Price variation over 24 hours, in percent.
    #[serde(rename = "Variation24Hr")]
    pub variation_24hr: Option<Decimal>,
    /// Traded volume over 24 hours.
    #[serde(rename = "Volume24Hr")]
    pub volume_24hr: Option<Decimal>,
}

/// Price summary of a market, as returned by the all-markets listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketPrice {
    /// Market name, e.g. `DASH/BTC`.
    #[serde(rename = "Market")]
    pub market: String,
    /// Best bid.
    #[serde(rename = "Bid")]
    pub bid: Option<Decimal>,
    /// Best ask.
    #[serde(rename = "Ask")]
    pub ask: Option<Decimal>,
    /// Last traded price.
    #[serde(rename = "Last")]
    pub last: Option<Decimal>,
    /// Price variation over 24 hours, in percent.
    #[serde(rename = "Variation24Hr")]
    pub variation_24hr: Option<Decimal>,
    /// Traded volume over 24 hours.
    #[serde(rename = "Volume24Hr")]
    pub volume_24hr: Option<Decimal>,
    /// Last update time.
    #[serde(rename = "LastUpdate", with = "optional_sxc_datetime", default)]
    pub last_update: Option<OffsetDateTime>,
}

/// One OHLCV market history bucket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candle {
    /// Start of the period, UTC.
    #[serde(rename = "Date", with = "sxc_datetime")]
    pub date: OffsetDateTime,
    /// Opening price.
    #[serde(rename = "PriceOpen")]
    pub open: Decimal,
    /// Highest price.
    #[serde(rename = "PriceHigh")]
    pub high: Decimal,
    /// Lowest price.
    #[serde(rename = "PriceLow")]
    pub low: Decimal,
    /// Closing price.
    #[serde(rename = "PriceClose")]
    pub close: Decimal,
    /// Traded volume.
    #[serde(rename = "Volume")]
    pub volume: Decimal,
}

impl Candle {
    /// Start of the period as Unix seconds.
    pub fn timestamp(&self) -> i64 {
        self.date.unix_timestamp()
    }
}

/// Order book of a market.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OrderBook {
    /// Bids, best first.
    pub buy_orders: Vec<BookEntry>,
    /// Asks, best first.
    pub sell_orders: Vec<BookEntry>,
}

/// Order book level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BookEntry {
    /// Position in the book.
    pub index: u32,
    /// Amount at this level.
    pub amount: Decimal,
    /// Price of this level.
    pub price: Decimal,
}

/// A public trade.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Trade {
    /// Execution time as Unix seconds.
    pub at: i64,
    /// Traded amount.
    pub amount: Decimal,
    /// Execution price.
    pub price: Decimal,
    /// Taker side (`buy` or `sell`).
    #[serde(rename = "Type")]
    pub side: String,
}

/// Currencies, markets and trader level fees.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Fees {
    pub currencies: Vec<CurrencyFees>,
    pub markets: Vec<MarketFees>,
    pub trader_levels: Vec<TraderLevel>,
}

/// Deposit and withdrawal limits of a currency.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrencyFees {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub min_deposit: Option<Decimal>,
    #[serde(default)]
    pub deposit_fee_min: Option<Decimal>,
    #[serde(default)]
    pub min_withdraw: Option<Decimal>,
    #[serde(default)]
    pub withdraw_fee: Option<Decimal>,
    #[serde(default)]
    pub withdraw_fee_min: Option<Decimal>,
    #[serde(default)]
    pub min_amount: Option<Decimal>,
}

/// Maker and taker fees of a market.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MarketFees {
    pub listing_currency_code: String,
    pub reference_currency_code: String,
    pub maker_fee: Decimal,
    pub taker_fee: Decimal,
    #[serde(default)]
    pub min_order_listing_currency: Option<Decimal>,
    #[serde(default)]
    pub price_precision: Option<u32>,
}

/// Fee rebates of a trader level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TraderLevel {
    pub name: String,
    pub min_volume_amount: Decimal,
    pub min_volume_currency: String,
    pub maker_fee_rebate: Decimal,
    pub taker_fee_rebate: Decimal,
}
