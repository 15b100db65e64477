//! Private REST API endpoints (authentication required).
//!
//! These endpoints require API credentials to be configured on the client.
//! Calling one without them fails with
//! [`SxcError::MissingCredentials`] before any request is sent.

mod types;

pub use types::*;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;

use crate::error::SxcError;
use crate::rest::SxcRestClient;
use crate::rest::client::decode_value;
use crate::rest::endpoints::private;
use crate::rest::public::MarketPrice;
use crate::rest::request::ApiRequest;
use crate::rest::transport::Transport;
use crate::types::{MAX_PAGE_SIZE, PagedResult, TransactionType, WithdrawalDestinationType};

impl<T: Transport> SxcRestClient<T> {
    /// List prices of all markets.
    pub async fn list_prices(&self) -> Result<Vec<MarketPrice>, SxcError> {
        self.call_typed(ApiRequest::private_get(private::PRICES))
            .await
    }

    /// Get the status of all wallets.
    pub async fn list_wallets(&self) -> Result<Vec<Wallet>, SxcError> {
        self.call_typed(ApiRequest::private_get(private::WALLETS))
            .await
    }

    /// Get the trader level of the account.
    ///
    /// Use [`SxcRestClient::list_fees`] for the fees applicable to that level.
    pub async fn get_user_info(&self) -> Result<UserInfo, SxcError> {
        self.call_typed(ApiRequest::private_post(private::GET_USER_INFO))
            .await
    }

    /// Place an order and return its code.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use rust_decimal::Decimal;
    /// use southxchange_api_client::auth::StaticCredentials;
    /// use southxchange_api_client::rest::SxcRestClient;
    /// use southxchange_api_client::rest::private::PlaceOrderRequest;
    /// use southxchange_api_client::types::OrderType;
    /// use std::str::FromStr;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let credentials = Arc::new(StaticCredentials::new("key", "secret"));
    ///     let client = SxcRestClient::builder().credentials(credentials).build()?;
    ///
    ///     let request = PlaceOrderRequest::limit(
    ///         "ETH",
    ///         "BTC",
    ///         OrderType::Buy,
    ///         Decimal::from_str("0.01")?,
    ///         Decimal::from_str("0.0683446")?,
    ///     );
    ///     let code = client.place_order(&request).await?;
    ///     println!("Placed order {}", code);
    ///     Ok(())
    /// }
    /// ```
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> Result<String, SxcError> {
        let value = self
            .call(ApiRequest::private_post(private::PLACE_ORDER).with_params(request)?)
            .await?;
        order_code(value)
    }

    /// Cancel an order.
    pub async fn cancel_order(&self, order_code: &str) -> Result<(), SxcError> {
        self.call(ApiRequest::private_post(private::CANCEL_ORDER).param("orderCode", order_code))
            .await?;
        Ok(())
    }

    /// Cancel all orders in a market.
    pub async fn cancel_market_orders(
        &self,
        listing_currency: &str,
        reference_currency: &str,
    ) -> Result<(), SxcError> {
        let request = ApiRequest::private_post(private::CANCEL_MARKET_ORDERS)
            .param("listingCurrency", listing_currency)
            .param("referenceCurrency", reference_currency);
        self.call(request).await?;
        Ok(())
    }

    /// List all pending orders.
    pub async fn list_pending_orders(&self) -> Result<Vec<Order>, SxcError> {
        let orders: Option<Vec<Order>> = self
            .call_typed(ApiRequest::private_post(private::LIST_ORDERS))
            .await?;
        Ok(orders.unwrap_or_default())
    }

    /// Get an order by code.
    ///
    /// Returns `None` if the exchange does not know the order.
    pub async fn get_order(&self, code: &str) -> Result<Option<Order>, SxcError> {
        self.call_typed(ApiRequest::private_post(private::GET_ORDER).param("code", code))
            .await
    }

    /// Get a page of orders by their codes.
    pub async fn list_orders_by_codes(
        &self,
        codes: &[&str],
        page_index: u32,
        page_size: u32,
    ) -> Result<PagedResult<Order>, SxcError> {
        if codes.is_empty() {
            return Err(SxcError::Validation("At least one order code is required".into()));
        }
        check_page_size(page_size)?;

        let request = ApiRequest::private_post(private::GET_ORDERS)
            .param("code", codes)
            .param("pageIndex", page_index)
            .param("pageSize", page_size);
        self.call_typed(request).await
    }

    /// Generate a new deposit address for a currency.
    pub async fn generate_new_address(&self, currency: &str) -> Result<Address, SxcError> {
        self.call_typed(
            ApiRequest::private_post(private::GENERATE_NEW_ADDRESS).param("currency", currency),
        )
        .await
    }

    /// List a page of deposit addresses of a currency.
    pub async fn list_addresses(
        &self,
        currency: &str,
        page_index: u32,
        page_size: u32,
    ) -> Result<PagedResult<Address>, SxcError> {
        check_page_size(page_size)?;

        let request = ApiRequest::private_post(private::LIST_ADDRESSES)
            .param("currency", currency)
            .param("pageIndex", page_index)
            .param("pageSize", page_size);
        self.call_typed(request).await
    }

    /// Generate a Lightning Network invoice and return the payment request.
    ///
    /// Requires the "Generate New Address" permission.
    pub async fn generate_ln_invoice(
        &self,
        currency: &str,
        amount: Decimal,
    ) -> Result<String, SxcError> {
        let request = ApiRequest::private_post(private::GET_LN_INVOICE).with_params(&InvoiceParams {
            currency,
            amount,
        })?;
        self.call_typed(request).await
    }

    /// Withdraw funds. The destination receives `amount` minus fees.
    ///
    /// Requires the "Withdraw" permission.
    pub async fn withdraw(
        &self,
        currency: &str,
        destination: &str,
        destination_type: WithdrawalDestinationType,
        amount: Decimal,
    ) -> Result<Withdrawal, SxcError> {
        let request = ApiRequest::private_post(private::WITHDRAW).with_params(&WithdrawParams {
            currency,
            destination,
            destination_type,
            amount,
        })?;
        self.call_typed(request).await
    }

    /// List non-zero balances.
    pub async fn list_balances(&self) -> Result<Vec<Balance>, SxcError> {
        let balances: Option<Vec<Balance>> = self
            .call_typed(ApiRequest::private_post(private::LIST_BALANCES))
            .await?;
        Ok(balances.unwrap_or_default())
    }

    /// List a page of transactions, newest first.
    ///
    /// Requires the "List Balances" permission.
    pub async fn list_transactions(
        &self,
        request: &ListTransactionsRequest,
    ) -> Result<PagedResult<Transaction>, SxcError> {
        check_page_size(request.page_size)?;
        let optional_filter = request.checked_filter().map_err(SxcError::Validation)?;

        let params = TransactionsQuery {
            currency: request.currency.as_deref(),
            transaction_type: request.transaction_type,
            optional_filter,
            page_index: request.page_index,
            page_size: request.page_size,
            sort_field: "Date",
            descending: true,
        };
        self.call_typed(ApiRequest::private_post(private::LIST_TRANSACTIONS).with_params(&params)?)
            .await
    }
}

#[derive(Serialize)]
struct InvoiceParams<'a> {
    currency: &'a str,
    amount: Decimal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WithdrawParams<'a> {
    currency: &'a str,
    destination: &'a str,
    destination_type: WithdrawalDestinationType,
    amount: Decimal,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionsQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    currency: Option<&'a str>,
    transaction_type: TransactionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    optional_filter: Option<&'a TransactionFilter>,
    page_index: u32,
    page_size: u32,
    sort_field: &'static str,
    descending: bool,
}

fn check_page_size(page_size: u32) -> Result<(), SxcError> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(SxcError::Validation(format!(
            "Page size must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
        )));
    }
    Ok(())
}

/// Order codes come back as JSON strings, occasionally as bare numbers.
fn order_code(value: Value) -> Result<String, SxcError> {
    match value {
        Value::String(code) => Ok(code),
        Value::Number(code) => Ok(code.to_string()),
        other => decode_value(private::PLACE_ORDER, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::rest::mock::{BASE_URL, MockTransport, private_client, public_client};
    use crate::types::OrderType;
    use reqwest::Method;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn sent_body(transport: &MockTransport, index: usize) -> Value {
        let request = &transport.requests()[index];
        serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_place_order() {
        let transport = MockTransport::new();
        transport.push_json(json!("64065725"));
        let client = private_client(&transport);

        let request = PlaceOrderRequest::limit("ETH", "BTC", OrderType::Buy, dec!(0.01), dec!(0.0683446));
        let code = client.place_order(&request).await.unwrap();
        assert_eq!(code, "64065725");

        let body = sent_body(&transport, 0);
        assert_eq!(body["key"], "access");
        assert_eq!(body["nonce"], 1_000);
        assert_eq!(body["listingCurrency"], "ETH");
        assert_eq!(body["referenceCurrency"], "BTC");
        assert_eq!(body["type"], "buy");
        assert!(body.get("limitPrice").is_some());
        assert_eq!(body["amountInReferenceCurrency"], false);
        assert_eq!(transport.requests()[0].url, format!("{BASE_URL}/placeOrder"));
    }

    #[tokio::test]
    async fn test_place_order_numeric_code() {
        let transport = MockTransport::new();
        transport.push_status(200, "64065725");
        let client = private_client(&transport);

        let request = PlaceOrderRequest::market("ETH", "BTC", OrderType::Sell, dec!(1));
        assert_eq!(client.place_order(&request).await.unwrap(), "64065725");
        assert!(sent_body(&transport, 0).get("limitPrice").is_none());
    }

    #[tokio::test]
    async fn test_place_order_without_credentials_sends_nothing() {
        let transport = MockTransport::new();
        let client = public_client(&transport);

        let request = PlaceOrderRequest::market("ETH", "BTC", OrderType::Sell, dec!(1));
        let err = client.place_order(&request).await.unwrap_err();
        assert!(matches!(err, SxcError::MissingCredentials));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_cancel_order_accepts_empty_response() {
        let transport = MockTransport::new();
        transport.push_status(204, "");
        let client = private_client(&transport);

        client.cancel_order("60000000").await.unwrap();
        assert_eq!(sent_body(&transport, 0)["orderCode"], "60000000");
    }

    #[tokio::test]
    async fn test_get_order_unknown_is_none() {
        let transport = MockTransport::new();
        transport.push_status(200, "null");
        let client = private_client(&transport);

        assert!(client.get_order("1").await.unwrap().is_none());
        assert_eq!(sent_body(&transport, 0)["code"], "1");
    }

    #[tokio::test]
    async fn test_list_orders_by_codes() {
        let transport = MockTransport::new();
        transport.push_json(json!({
            "TotalElements": 1,
            "Result": [{
                "Code": "203587899",
                "Type": "buy",
                "Amount": 1115.3285116,
                "PendingAmount": 1115.3285116,
                "LimitPrice": 0.000000261,
                "ListingCurrency": "GRC",
                "ReferenceCurrency": "BTC",
                "Status": "booked",
                "DateAdded": "2022-11-06T12:00:09.107"
            }]
        }));
        let client = private_client(&transport);

        let page = client
            .list_orders_by_codes(&["203587899"], 0, MAX_PAGE_SIZE)
            .await
            .unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.result[0].status.as_deref(), Some("booked"));

        let body = sent_body(&transport, 0);
        assert_eq!(body["code"], json!(["203587899"]));
        assert_eq!(body["pageSize"], 50);
    }

    #[tokio::test]
    async fn test_page_size_out_of_range_sends_nothing() {
        let transport = MockTransport::new();
        let client = private_client(&transport);

        for page_size in [0, MAX_PAGE_SIZE + 1] {
            let err = client.list_addresses("ETH", 0, page_size).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
        }
        let err = client.list_orders_by_codes(&[], 0, 10).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_list_transactions_body() {
        let transport = MockTransport::new();
        transport.push_json(json!({"TotalElements": 0, "Result": []}));
        transport.push_json(json!({"TotalElements": 0, "Result": []}));
        let client = private_client(&transport);

        let request = ListTransactionsRequest::trades_by_order_code("199077234").page(2, 10);
        client.list_transactions(&request).await.unwrap();
        let body = sent_body(&transport, 0);
        assert_eq!(body["transactionType"], "tradesbyordercode");
        assert_eq!(body["optionalFilter"], "199077234");
        assert_eq!(body["pageIndex"], 2);
        assert_eq!(body["pageSize"], 10);
        assert_eq!(body["sortField"], "Date");
        assert_eq!(body["descending"], true);
        assert!(body.get("currency").is_none());

        let request = ListTransactionsRequest::new(TransactionType::Deposits).currency("LTC");
        client.list_transactions(&request).await.unwrap();
        let body = sent_body(&transport, 1);
        assert_eq!(body["currency"], "LTC");
        assert!(body.get("optionalFilter").is_none());
    }

    #[tokio::test]
    async fn test_list_transactions_missing_filter_sends_nothing() {
        let transport = MockTransport::new();
        let client = private_client(&transport);

        let request = ListTransactionsRequest::new(TransactionType::DepositsByAddressId);
        let err = client.list_transactions(&request).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_withdraw_sends_integer_destination_type() {
        let transport = MockTransport::new();
        transport.push_json(json!({"Status": "ok", "Max": 0.29, "MaxDaily": 1.0, "MovementId": 9876543210u64}));
        let client = private_client(&transport);

        let withdrawal = client
            .withdraw(
                "LTC",
                "SOME_ADDRESS",
                WithdrawalDestinationType::CryptoAddress,
                dec!(0.5),
            )
            .await
            .unwrap();
        assert_eq!(withdrawal.status, "ok");
        assert_eq!(withdrawal.movement_id, Some(9_876_543_210));

        let body = sent_body(&transport, 0);
        assert_eq!(body["destinationType"], 0);
        assert_eq!(body["destination"], "SOME_ADDRESS");
    }

    #[tokio::test]
    async fn test_list_prices_is_signed_get() {
        let transport = MockTransport::new();
        transport.push_json(json!([{
            "Market": "DASH/BTC",
            "Bid": 0.002117966,
            "Ask": 0.002131398,
            "Last": 0.002142643,
            "Variation24Hr": 0.25,
            "Volume24Hr": 5.6542005
        }]));
        let client = private_client(&transport);

        let prices = client.list_prices().await.unwrap();
        assert_eq!(prices[0].market, "DASH/BTC");

        let sent = &transport.requests()[0];
        assert_eq!(sent.method, Method::GET);
        assert!(sent.headers.contains_key(crate::rest::HASH_HEADER));
    }

    #[tokio::test]
    async fn test_generate_ln_invoice() {
        let transport = MockTransport::new();
        transport.push_json(json!("lnbc20m1pvjluezpp5qqqsyqcyq5rqwzqfqqqsyqcyq5rqwzqfqqq"));
        let client = private_client(&transport);

        let invoice = client.generate_ln_invoice("LTC", dec!(1)).await.unwrap();
        assert!(invoice.starts_with("lnbc"));
        assert_eq!(sent_body(&transport, 0)["currency"], "LTC");
    }

    #[tokio::test]
    async fn test_list_balances_and_user_info() {
        let transport = MockTransport::new();
        transport.push_json(json!([
            {"Currency": "BTC", "Deposited": 0.1, "Available": 0.05, "Unconfirmed": 0.0}
        ]));
        transport.push_json(json!({"TraderLevel": "TraderLevel1"}));
        let client = private_client(&transport);

        let balances = client.list_balances().await.unwrap();
        assert_eq!(balances[0].available, dec!(0.05));
        let info = client.get_user_info().await.unwrap();
        assert_eq!(info.trader_level, "TraderLevel1");
    }
}
