//! Example: Fetching SouthXchange public market data.
//!
//! Run with: cargo run --example public_data

use std::time::{SystemTime, UNIX_EPOCH};

use southxchange_api_client::rest::{HistoryRequest, SxcRestClient};
use southxchange_api_client::types::MarketHistoryInterval;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = SxcRestClient::new()?;

    println!("=== Markets (first 5) ===");
    let markets = client.list_markets().await?;
    for market in markets.iter().take(5) {
        println!("{}/{}", market.listing_currency, market.reference_currency);
    }

    println!("\n=== Price (ETH/BTC) ===");
    let price = client.get_price("ETH", "BTC").await?;
    println!(
        "bid={:?}, ask={:?}, last={:?}",
        price.bid, price.ask, price.last
    );

    println!("\n=== Order Book (ETH/BTC) ===");
    let book = client.list_order_book("ETH", "BTC").await?;
    println!("Bids: {}, Asks: {}", book.buy_orders.len(), book.sell_orders.len());

    println!("\n=== Trades (ETH/BTC) ===");
    let trades = client.list_trades("ETH", "BTC").await?;
    println!("Trades: {}", trades.len());

    println!("\n=== Daily Candles, last 30 days (ETH/BTC) ===");
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs() as i64;
    let day = i64::from(MarketHistoryInterval::Day1);
    let request = HistoryRequest::new("ETH", "BTC", now - 30 * day, now, day).lenient();
    let series = client.market_history_by_granularity(&request).await?;
    println!(
        "Candles: {}, uniform spacing: {}",
        series.candles.len(),
        series.uniform
    );
    if let Some(candle) = series.candles.last() {
        println!("Latest close: {}", candle.close);
    }

    Ok(())
}
