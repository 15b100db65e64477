//! SouthXchange REST API endpoint constants.

/// Base URL for the SouthXchange REST API v4.
pub const SXC_BASE_URL: &str = "https://www.southxchange.com/api/v4";

/// Public endpoints (no authentication required).
///
/// Market endpoints take `/{listing}/{reference}` path segments.
pub mod public {
    /// List markets.
    pub const MARKETS: &str = "/markets";
    /// Get the price of a market.
    pub const PRICE: &str = "/price";
    /// List market history.
    pub const HISTORY: &str = "/history";
    /// List the order book of a market.
    pub const BOOK: &str = "/book";
    /// List latest trades of a market.
    pub const TRADES: &str = "/trades";
    /// List currencies, markets and trader level fees.
    pub const FEES: &str = "/fees";
}

/// Private endpoints (authentication required).
pub mod private {
    // Market data that still requires a key
    /// List prices of all markets.
    pub const PRICES: &str = "/prices";
    /// List wallet statuses.
    pub const WALLETS: &str = "/wallets";

    // Account endpoints
    /// Get user info.
    pub const GET_USER_INFO: &str = "/getUserInfo";
    /// List non-zero balances.
    pub const LIST_BALANCES: &str = "/listBalances";
    /// List transactions.
    pub const LIST_TRANSACTIONS: &str = "/listTransactions";

    // Trading endpoints
    /// Place order.
    pub const PLACE_ORDER: &str = "/placeOrder";
    /// Cancel order.
    pub const CANCEL_ORDER: &str = "/cancelOrder";
    /// Cancel all orders in a market.
    pub const CANCEL_MARKET_ORDERS: &str = "/cancelMarketOrders";
    /// List pending orders.
    pub const LIST_ORDERS: &str = "/listOrders";
    /// Get a single order.
    pub const GET_ORDER: &str = "/getOrder";
    /// Get orders by codes.
    pub const GET_ORDERS: &str = "/getOrders";

    // Funding endpoints
    /// Generate a new deposit address.
    pub const GENERATE_NEW_ADDRESS: &str = "/generateNewAddress";
    /// List deposit addresses.
    pub const LIST_ADDRESSES: &str = "/listAddresses";
    /// Generate a Lightning Network invoice.
    pub const GET_LN_INVOICE: &str = "/getLNInvoice";
    /// Withdraw funds.
    pub const WITHDRAW: &str = "/withdraw";
}
