use futures_util::TryStreamExt;
use rust_decimal_macros::dec;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use southxchange_api_client::error::{ApiErrorKind, ErrorKind, SxcError};
use southxchange_api_client::rest::{HistoryRequest, SxcRestClient};
use southxchange_api_client::types::MarketHistoryInterval;

fn build_client(server: &MockServer) -> SxcRestClient {
    SxcRestClient::builder()
        .base_url(server.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_list_markets() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/markets"))
        .and(header("cache-control", "no-cache"))
        .and(header("pragma", "no-cache"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([["DASH", "BTC", 5], ["LTC", "BTC", 7]])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let markets = client.list_markets().await.unwrap();

    assert_eq!(markets.len(), 2);
    assert_eq!(markets[0].listing_currency, "DASH");
    assert_eq!(markets[1].market_id, Some(7));
}

#[tokio::test]
async fn test_get_price() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/price/ETH/BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"Bid":0.068344600,"Ask":0.068541940,"Last":0.068379352,"Variation24Hr":1.52,"Volume24Hr":10.29581376}"#,
        ))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let price = client.get_price("ETH", "BTC").await.unwrap();

    assert_eq!(price.bid, Some(dec!(0.0683446)));
    assert_eq!(price.volume_24hr, Some(dec!(10.29581376)));
}

#[tokio::test]
async fn test_get_price_unknown_market() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/price/FOO/BAR"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_price("FOO", "BAR").await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.api_error().unwrap().kind(), ApiErrorKind::InvalidMarket);
}

#[tokio::test]
async fn test_list_order_book() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "BuyOrders": [
            {"Index": 0, "Amount": 0.00147298, "Price": 0.067889252},
            {"Index": 1, "Amount": 0.1, "Price": 0.0678}
        ],
        "SellOrders": [
            {"Index": 0, "Amount": 2.5, "Price": 0.068541940}
        ]
    });

    Mock::given(method("GET"))
        .and(path("/book/ETH/BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let book = client.list_order_book("ETH", "BTC").await.unwrap();

    assert_eq!(book.buy_orders.len(), 2);
    assert_eq!(book.sell_orders[0].amount, dec!(2.5));
}

#[tokio::test]
async fn test_list_trades() {
    let server = MockServer::start().await;
    let response = serde_json::json!([
        {"At": 1668012323, "Amount": 0.38359823, "Price": 0.068379352, "Type": "buy"},
        {"At": 1668012304, "Amount": 0.45140177, "Price": 0.068379352, "Type": "sell"}
    ]);

    Mock::given(method("GET"))
        .and(path("/trades/ETH/BTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let trades = client.list_trades("ETH", "BTC").await.unwrap();

    assert_eq!(trades.len(), 2);
    assert_eq!(trades[0].at, 1_668_012_323);
    assert_eq!(trades[1].side, "sell");
}

#[tokio::test]
async fn test_list_fees() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "Currencies": [{
            "Code": "BTC",
            "Name": "Bitcoin",
            "Precision": 9,
            "MinDeposit": 0.00005,
            "DepositFeeMin": 0.0,
            "MinWithdraw": 0.0002,
            "WithdrawFee": 0.0,
            "WithdrawFeeMin": 0.00015,
            "MinAmount": 0.000000001
        }],
        "Markets": [{
            "ListingCurrencyCode": "ETH",
            "ReferenceCurrencyCode": "BTC",
            "MakerFee": 0.001,
            "TakerFee": 0.003,
            "MinOrderListingCurrency": null,
            "PricePrecision": null
        }],
        "TraderLevels": [{
            "Name": "TraderLevel1",
            "MinVolumeAmount": 0.1,
            "MinVolumeCurrency": "BTC",
            "MakerFeeRebate": 0.2,
            "TakerFeeRebate": 0.2
        }]
    });

    Mock::given(method("GET"))
        .and(path("/fees"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let fees = client.list_fees().await.unwrap();

    assert_eq!(fees.currencies[0].precision, Some(9));
    assert_eq!(fees.markets[0].taker_fee, dec!(0.003));
    assert!(fees.markets[0].price_precision.is_none());
    assert_eq!(fees.trader_levels[0].name, "TraderLevel1");
}

#[tokio::test]
async fn test_market_history_by_granularity() {
    let server = MockServer::start().await;
    let response = serde_json::json!([
        {
            "Date": "2022-01-01T00:00:00",
            "PriceHigh": 0.079624402,
            "PriceLow": 0.077018168,
            "PriceOpen": 0.079384817,
            "PriceClose": 0.077232438,
            "Volume": 0.70592287
        },
        {
            "Date": "2022-01-02T00:00:00",
            "PriceHigh": 0.080658164,
            "PriceLow": 0.077179415,
            "PriceOpen": 0.077232438,
            "PriceClose": 0.079098818,
            "Volume": 0.59452678
        },
        {
            "Date": "2022-01-03T00:00:00",
            "PriceHigh": 0.080598789,
            "PriceLow": 0.067001496,
            "PriceOpen": 0.079098818,
            "PriceClose": 0.079553838,
            "Volume": 2.18225486
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/history/ETH/BTC/1640995200000/1641168000000/2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = HistoryRequest::new(
        "ETH",
        "BTC",
        1_640_995_200,
        1_641_168_000,
        MarketHistoryInterval::Day1,
    );
    let series = client.market_history_by_granularity(&request).await.unwrap();

    assert!(series.uniform);
    assert_eq!(series.candles.len(), 3);
    assert_eq!(series.candles[0].timestamp(), 1_640_995_200);
    assert_eq!(series.candles[2].close, dec!(0.079553838));
}

#[tokio::test]
async fn test_market_history_granularity_mismatch() {
    let server = MockServer::start().await;
    let response = serde_json::json!([
        {"Date": "2022-01-01T00:00:00", "PriceHigh": 1, "PriceLow": 1, "PriceOpen": 1, "PriceClose": 1, "Volume": 0},
        {"Date": "2022-01-02T00:00:00", "PriceHigh": 1, "PriceLow": 1, "PriceOpen": 1, "PriceClose": 1, "Volume": 0},
        {"Date": "2022-01-03T00:00:00", "PriceHigh": 1, "PriceLow": 1, "PriceOpen": 1, "PriceClose": 1, "Volume": 0},
        {"Date": "2022-01-05T00:00:00", "PriceHigh": 1, "PriceLow": 1, "PriceOpen": 1, "PriceClose": 1, "Volume": 0}
    ]);

    Mock::given(method("GET"))
        .and(path("/history/ETH/BTC/1640995200000/1641340800000/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(2)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = HistoryRequest::new("ETH", "BTC", 1_640_995_200, 1_641_340_800, 86_400);

    let err = client.market_history_by_granularity(&request).await.unwrap_err();
    assert!(matches!(
        err,
        SxcError::GranularityMismatch {
            requested: 86_400,
            observed: 172_800
        }
    ));

    let series = client
        .market_history_by_granularity(&request.clone().lenient())
        .await
        .unwrap();
    assert!(!series.uniform);
    assert_eq!(series.candles.len(), 4);
}

#[tokio::test]
async fn test_scroll_market_history() {
    let server = MockServer::start().await;
    let start = 1_640_995_200_i64;
    let granularity = 60_i64;
    let second_start = start + 500 * granularity + granularity;

    Mock::given(method("GET"))
        .and(path(format!(
            "/history/ETH/BTC/{}/{}/500",
            start * 1000,
            (start + 500 * granularity) * 1000
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!(
            "/history/ETH/BTC/{}/{}/99",
            second_start * 1000,
            (second_start + 99 * granularity) * 1000
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = HistoryRequest::new("ETH", "BTC", start, start + 600 * granularity, granularity);
    let windows: Vec<_> = client
        .scroll_market_history_by_granularity(request)
        .unwrap()
        .try_collect()
        .await
        .unwrap();

    assert_eq!(windows.len(), 2);
}

#[tokio::test]
async fn test_invalid_history_range_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = HistoryRequest::new("ETH", "BTC", 1_640_995_200, 1_640_995_200, 86_400);
    let err = client.market_history_by_granularity(&request).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_server_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/markets"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.list_markets().await.unwrap_err();

    let api_error = err.api_error().unwrap();
    assert_eq!(api_error.status, 500);
    assert_eq!(api_error.message, "Internal Server Error");
}
