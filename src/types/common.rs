//! Common domain types for the SouthXchange API.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum number of periods the market history endpoint returns per request.
///
/// Larger values are silently reduced to this cap by the exchange.
pub const MAX_MARKET_HISTORY_PERIODS: u32 = 500;

/// Maximum page size accepted by paged listing endpoints.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Order side accepted by `placeOrder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderType::Buy => write!(f, "buy"),
            OrderType::Sell => write!(f, "sell"),
        }
    }
}

/// Transaction filter for `listTransactions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Trade transactions and buy fees
    #[default]
    Transactions,
    /// Deposits only
    Deposits,
    /// Withdrawals only
    Withdrawals,
    /// Deposits and withdrawals
    #[serde(rename = "depositswithdrawals")]
    DepositsWithdrawals,
    /// Trades of one order, including buy and sell fees (filter: order code)
    #[serde(rename = "tradesbyordercode")]
    TradesByOrderCode,
    /// Deposits to one address (filter: address id)
    #[serde(rename = "depositsbyaddressid")]
    DepositsByAddressId,
}

impl TransactionType {
    /// Whether this transaction type takes an `optionalFilter` value.
    pub fn takes_filter(self) -> bool {
        matches!(
            self,
            TransactionType::TradesByOrderCode | TransactionType::DepositsByAddressId
        )
    }
}

/// Destination type for withdrawals. Sent as an integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WithdrawalDestinationType {
    /// A cryptocurrency address
    CryptoAddress = 0,
    /// A Lightning Network invoice
    LightningNetworkInvoice = 1,
    /// The email address of another SouthXchange user
    UserEmailAddress = 2,
}

impl Serialize for WithdrawalDestinationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for WithdrawalDestinationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(WithdrawalDestinationType::CryptoAddress),
            1 => Ok(WithdrawalDestinationType::LightningNetworkInvoice),
            2 => Ok(WithdrawalDestinationType::UserEmailAddress),
            other => Err(serde::de::Error::custom(format!(
                "Invalid withdrawal destination type: {other}"
            ))),
        }
    }
}

/// Native market history intervals, in seconds.
///
/// Granularities that are not one of these values are not guaranteed to be
/// honoured by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarketHistoryInterval {
    /// 1 minute
    Min1,
    /// 5 minutes
    Min5,
    /// 30 minutes
    Min30,
    /// 1 hour
    Hour1,
    /// 6 hours
    Hour6,
    /// 12 hours
    Hour12,
    /// 1 day
    Day1,
    /// 3 days
    Day3,
    /// 1 week
    Week1,
}

impl MarketHistoryInterval {
    /// All native intervals, shortest first.
    pub const ALL: [MarketHistoryInterval; 9] = [
        MarketHistoryInterval::Min1,
        MarketHistoryInterval::Min5,
        MarketHistoryInterval::Min30,
        MarketHistoryInterval::Hour1,
        MarketHistoryInterval::Hour6,
        MarketHistoryInterval::Hour12,
        MarketHistoryInterval::Day1,
        MarketHistoryInterval::Day3,
        MarketHistoryInterval::Week1,
    ];

    /// Interval width in seconds.
    pub fn seconds(self) -> i64 {
        i64::from(self)
    }
}

impl From<MarketHistoryInterval> for i64 {
    fn from(interval: MarketHistoryInterval) -> i64 {
        match interval {
            MarketHistoryInterval::Min1 => 60,
            MarketHistoryInterval::Min5 => 300,
            MarketHistoryInterval::Min30 => 1_800,
            MarketHistoryInterval::Hour1 => 3_600,
            MarketHistoryInterval::Hour6 => 21_600,
            MarketHistoryInterval::Hour12 => 43_200,
            MarketHistoryInterval::Day1 => 86_400,
            MarketHistoryInterval::Day3 => 259_200,
            MarketHistoryInterval::Week1 => 604_800,
        }
    }
}

impl TryFrom<i64> for MarketHistoryInterval {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|interval| interval.seconds() == value)
            .ok_or_else(|| format!("Invalid market history interval: {}", value))
    }
}

/// One page of a paged listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PagedResult<T> {
    /// Total number of elements across all pages.
    #[serde(rename = "TotalElements")]
    pub total_elements: u64,
    /// Elements on this page.
    #[serde(rename = "Result")]
    pub result: Vec<T>,
}
