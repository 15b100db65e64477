//! Types for private REST API endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::types::serde_helpers::{optional_sxc_datetime, sxc_datetime};
use crate::types::{MAX_PAGE_SIZE, OrderType, TransactionType};

/// Status of a currency wallet on the exchange.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Wallet {
    /// Currency code
    pub currency: String,
    /// Currency display name
    pub currency_name: String,
    /// Last status update
    #[serde(with = "optional_sxc_datetime", default)]
    pub last_update: Option<OffsetDateTime>,
    /// Wallet health, e.g. `Good`
    pub status: String,
    /// Wallet kind, e.g. `Crypto`
    #[serde(rename = "Type")]
    pub wallet_type: String,
    #[serde(default)]
    pub last_block: Option<u64>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub connections: Option<u32>,
    #[serde(default)]
    pub required_confirmations: Option<u32>,
}

/// Account information.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UserInfo {
    /// Trader level name; see [`Fees::trader_levels`](crate::rest::public::Fees).
    pub trader_level: String,
}

/// Balance of one currency.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Balance {
    pub currency: String,
    pub deposited: Decimal,
    pub available: Decimal,
    pub unconfirmed: Decimal,
}

/// A pending or historical order.
///
/// Pending order listings report `original_amount`; single order and
/// multi-order lookups report `pending_amount` and `status` instead.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Order {
    /// Order code
    pub code: String,
    /// Order side
    #[serde(rename = "Type")]
    pub order_type: OrderType,
    /// Order amount
    pub amount: Decimal,
    #[serde(default)]
    pub original_amount: Option<Decimal>,
    #[serde(default)]
    pub pending_amount: Option<Decimal>,
    /// Limit price; absent for market orders
    #[serde(default)]
    pub limit_price: Option<Decimal>,
    pub listing_currency: String,
    pub reference_currency: String,
    /// Order status, e.g. `booked` or `executed`
    #[serde(default)]
    pub status: Option<String>,
    /// Creation time, UTC
    #[serde(with = "sxc_datetime")]
    pub date_added: OffsetDateTime,
}

/// A deposit address.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Address {
    /// Address identifier, usable as a `depositsbyaddressid` filter
    pub id: u64,
    pub address: String,
}

/// Result of a withdrawal request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Withdrawal {
    /// Withdrawal status, e.g. `ok`
    pub status: String,
    /// Maximum amount for a single withdrawal
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Maximum amount per day
    #[serde(default)]
    pub max_daily: Option<Decimal>,
    /// Movement identifier of the withdrawal
    #[serde(default)]
    pub movement_id: Option<u64>,
}

/// An account transaction.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    #[serde(with = "sxc_datetime")]
    pub date: OffsetDateTime,
    pub currency_code: String,
    pub amount: Decimal,
    #[serde(default)]
    pub total_balance: Option<Decimal>,
    /// Transaction kind, e.g. `trade`, `tradefee` or `deposit`
    #[serde(rename = "Type")]
    pub transaction_type: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub other_amount: Option<Decimal>,
    #[serde(default)]
    pub other_currency: Option<String>,
    #[serde(default)]
    pub order_code: Option<String>,
    #[serde(default)]
    pub trade_id: Option<u64>,
    #[serde(default)]
    pub movement_id: Option<u64>,
    #[serde(default)]
    pub transaction_id: Option<u64>,
}

/// Place order request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    /// Market listing currency
    pub listing_currency: String,
    /// Market reference currency
    pub reference_currency: String,
    /// Order side
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Order amount, in listing currency unless `amount_in_reference_currency`
    pub amount: Decimal,
    /// Limit price in reference currency; market order when `None`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_price: Option<Decimal>,
    pub amount_in_reference_currency: bool,
}

impl PlaceOrderRequest {
    /// Create a limit order request.
    pub fn limit(
        listing_currency: impl Into<String>,
        reference_currency: impl Into<String>,
        order_type: OrderType,
        amount: Decimal,
        limit_price: Decimal,
    ) -> Self {
        Self::market(listing_currency, reference_currency, order_type, amount)
            .limit_price(limit_price)
    }

    /// Create a market order request.
    pub fn market(
        listing_currency: impl Into<String>,
        reference_currency: impl Into<String>,
        order_type: OrderType,
        amount: Decimal,
    ) -> Self {
        Self {
            listing_currency: listing_currency.into(),
            reference_currency: reference_currency.into(),
            order_type,
            amount,
            limit_price: None,
            amount_in_reference_currency: false,
        }
    }

    /// Set the limit price.
    pub fn limit_price(mut self, price: Decimal) -> Self {
        self.limit_price = Some(price);
        self
    }

    /// Express `amount` in the reference currency.
    pub fn amount_in_reference_currency(mut self, enabled: bool) -> Self {
        self.amount_in_reference_currency = enabled;
        self
    }
}

/// Value of the `optionalFilter` field of a transaction listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TransactionFilter {
    /// Order code, for [`TransactionType::TradesByOrderCode`]
    OrderCode(String),
    /// Address id, for [`TransactionType::DepositsByAddressId`]
    AddressId(u64),
}

impl TransactionFilter {
    fn matches(&self, transaction_type: TransactionType) -> bool {
        matches!(
            (self, transaction_type),
            (TransactionFilter::OrderCode(_), TransactionType::TradesByOrderCode)
                | (TransactionFilter::AddressId(_), TransactionType::DepositsByAddressId)
        )
    }
}

/// List transactions request.
///
/// Results are always sorted by date, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListTransactionsRequest {
    /// Restrict to one currency
    pub currency: Option<String>,
    pub transaction_type: TransactionType,
    /// Required by, and only accepted with, the filtered transaction types
    pub filter: Option<TransactionFilter>,
    pub page_index: u32,
    pub page_size: u32,
}

impl Default for ListTransactionsRequest {
    fn default() -> Self {
        Self::new(TransactionType::default())
    }
}

impl ListTransactionsRequest {
    /// Create a request for the first page of a transaction type.
    pub fn new(transaction_type: TransactionType) -> Self {
        Self {
            currency: None,
            transaction_type,
            filter: None,
            page_index: 0,
            page_size: MAX_PAGE_SIZE,
        }
    }

    /// Trades of one order, including buy and sell fees.
    pub fn trades_by_order_code(order_code: impl Into<String>) -> Self {
        Self::new(TransactionType::TradesByOrderCode)
            .filter(TransactionFilter::OrderCode(order_code.into()))
    }

    /// Deposits to one address.
    pub fn deposits_by_address_id(address_id: u64) -> Self {
        Self::new(TransactionType::DepositsByAddressId)
            .filter(TransactionFilter::AddressId(address_id))
    }

    /// Restrict to one currency.
    pub fn currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    /// Set the filter value.
    pub fn filter(mut self, filter: TransactionFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Select a page.
    pub fn page(mut self, page_index: u32, page_size: u32) -> Self {
        self.page_index = page_index;
        self.page_size = page_size;
        self
    }

    /// Check the filter against the transaction type.
    pub(crate) fn checked_filter(&self) -> Result<Option<&TransactionFilter>, String> {
        match (&self.filter, self.transaction_type.takes_filter()) {
            (None, false) => Ok(None),
            (Some(filter), true) if filter.matches(self.transaction_type) => Ok(Some(filter)),
            (Some(filter), true) => Err(format!(
                "Filter {filter:?} does not apply to transaction type {:?}",
                self.transaction_type
            )),
            (None, true) => Err(format!(
                "Transaction type {:?} requires a filter",
                self.transaction_type
            )),
            (Some(_), false) => Err(format!(
                "Transaction type {:?} does not take a filter",
                self.transaction_type
            )),
        }
    }
}
