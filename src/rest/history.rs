//! Market history by granularity.
//!
//! The raw history endpoint takes a time range and a number of periods and
//! derives the bucket width itself. When the width it picks differs from the
//! one the caller had in mind (an unsupported granularity, a market listed
//! after the start of the range, an end far in the future) nothing in the
//! response says so. [`HistoryReconciler`] computes the period count from a
//! granularity and checks the spacing of the returned candles against it.

use futures_util::Stream;
use futures_util::stream;
use time::Duration;
use tracing::{debug, warn};

use crate::error::SxcError;
use crate::rest::SxcRestClient;
use crate::rest::public::Candle;
use crate::rest::transport::Transport;
use crate::types::MAX_MARKET_HISTORY_PERIODS;

/// A granularity based market history query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRequest {
    /// Listing currency code
    pub target_currency: String,
    /// Reference currency code
    pub reference_currency: String,
    /// Start of the range, Unix seconds
    pub start_ts: i64,
    /// End of the range, Unix seconds
    pub end_ts: i64,
    /// Bucket width in seconds
    pub granularity: i64,
    /// Fail on a spacing mismatch instead of flagging it
    pub strict: bool,
}

impl HistoryRequest {
    /// Create a strict request.
    ///
    /// Use one of the [`MarketHistoryInterval`](crate::types::MarketHistoryInterval)
    /// values as `granularity` to get buckets of exactly that width.
    pub fn new(
        target_currency: impl Into<String>,
        reference_currency: impl Into<String>,
        start_ts: i64,
        end_ts: i64,
        granularity: impl Into<i64>,
    ) -> Self {
        Self {
            target_currency: target_currency.into(),
            reference_currency: reference_currency.into(),
            start_ts,
            end_ts,
            granularity: granularity.into(),
            strict: true,
        }
    }

    /// Set the spacing policy.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Accept candles with unexpected spacing and flag them instead.
    pub fn lenient(self) -> Self {
        self.strict(false)
    }

    fn validate(&self) -> Result<(), SxcError> {
        if self.start_ts >= self.end_ts {
            return Err(SxcError::Validation(format!(
                "Start timestamp {} must be before end timestamp {}",
                self.start_ts, self.end_ts
            )));
        }
        if self.granularity <= 0 {
            return Err(SxcError::Validation(format!(
                "Granularity must be positive, got {}",
                self.granularity
            )));
        }
        // Both ends must survive the conversion to milliseconds on the wire.
        for ts in [self.start_ts, self.end_ts] {
            if ts.checked_mul(1_000).is_none() {
                return Err(out_of_range(ts));
            }
        }
        Ok(())
    }

    fn span(&self) -> Result<i64, SxcError> {
        self.end_ts
            .checked_sub(self.start_ts)
            .ok_or_else(|| out_of_range(self.end_ts))
    }
}

fn out_of_range(ts: i64) -> SxcError {
    SxcError::Validation(format!("Timestamp out of range: {ts}"))
}

/// Candles returned for a [`HistoryRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    /// Candles exactly as returned by the exchange
    pub candles: Vec<Candle>,
    /// Requested bucket width in seconds
    pub granularity: i64,
    /// `false` when a lenient request received candles with a different spacing
    pub uniform: bool,
}

/// Number of periods covering `span` seconds, rounded to the nearest whole
/// period and kept within `1..=MAX_MARKET_HISTORY_PERIODS`.
fn periods_for(span: i64, granularity: i64) -> u32 {
    let round_up = span % granularity >= granularity - granularity / 2;
    let periods = span / granularity + i64::from(round_up);
    periods.clamp(1, i64::from(MAX_MARKET_HISTORY_PERIODS)) as u32
}

/// First spacing between consecutive candles that differs from `granularity`.
///
/// Bucket dates are compared with their fractional seconds.
fn spacing_mismatch(candles: &[Candle], granularity: i64) -> Option<Duration> {
    let expected = Duration::seconds(granularity);
    candles
        .windows(2)
        .map(|pair| pair[1].date - pair[0].date)
        .find(|&observed| observed != expected)
}

/// Returns whether the spacing is uniform, or fails in strict mode.
fn check_spacing(request: &HistoryRequest, candles: &[Candle]) -> Result<bool, SxcError> {
    let Some(observed) = spacing_mismatch(candles, request.granularity) else {
        return Ok(true);
    };

    warn!(
        target_currency = %request.target_currency,
        reference_currency = %request.reference_currency,
        requested = request.granularity,
        %observed,
        strict = request.strict,
        "market history spacing does not match granularity"
    );
    if request.strict {
        return Err(SxcError::GranularityMismatch {
            requested: request.granularity,
            observed: observed.whole_seconds(),
        });
    }
    Ok(false)
}

/// Fetches market history for a granularity and validates the result.
#[derive(Debug)]
pub struct HistoryReconciler<'a, T> {
    client: &'a SxcRestClient<T>,
}

impl<'a, T: Transport> HistoryReconciler<'a, T> {
    /// Create a reconciler on top of a client.
    pub fn new(client: &'a SxcRestClient<T>) -> Self {
        Self { client }
    }

    /// Fetch one window of history.
    ///
    /// At most [`MAX_MARKET_HISTORY_PERIODS`] buckets are requested; use
    /// [`HistoryReconciler::scroll`] for longer ranges.
    pub async fn fetch(&self, request: &HistoryRequest) -> Result<CandleSeries, SxcError> {
        request.validate()?;

        let periods = periods_for(request.span()?, request.granularity);
        let candles = self
            .client
            .list_market_history(
                &request.target_currency,
                &request.reference_currency,
                request.start_ts,
                request.end_ts,
                periods,
            )
            .await?;

        let uniform = check_spacing(request, &candles)?;
        Ok(CandleSeries {
            candles,
            granularity: request.granularity,
            uniform,
        })
    }

    /// Walk a range of any length in windows of at most
    /// [`MAX_MARKET_HISTORY_PERIODS`] periods.
    ///
    /// The exchange treats both ends of a window as inclusive, so each window
    /// starts one period after the end of the previous one. Each item is one
    /// window; requests are made lazily as the stream is polled. In strict mode
    /// the stream ends with [`SxcError::GranularityMismatch`] at the first
    /// window with unexpected spacing.
    pub fn scroll(
        &self,
        request: HistoryRequest,
    ) -> Result<impl Stream<Item = Result<Vec<Candle>, SxcError>> + use<'a, T>, SxcError> {
        request.validate()?;

        let granularity = request.granularity;
        let span = request.span()?;
        let total = span / granularity + i64::from(span % granularity != 0);
        let client = self.client;

        Ok(stream::try_unfold(
            (request.start_ts, total),
            move |(start, remaining)| {
                let request = request.clone();
                async move {
                    if remaining <= 0 {
                        return Ok::<_, SxcError>(None);
                    }
                    let periods = remaining.min(i64::from(MAX_MARKET_HISTORY_PERIODS));
                    let end = granularity
                        .checked_mul(periods)
                        .and_then(|width| start.checked_add(width))
                        .ok_or_else(|| out_of_range(start))?;
                    debug!(
                        target_currency = %request.target_currency,
                        reference_currency = %request.reference_currency,
                        start,
                        end,
                        periods,
                        "fetching market history window"
                    );

                    let candles = client
                        .list_market_history(
                            &request.target_currency,
                            &request.reference_currency,
                            start,
                            end,
                            periods as u32,
                        )
                        .await?;
                    check_spacing(&request, &candles)?;

                    let remaining = remaining - periods - 1;
                    let next_start = if remaining > 0 {
                        end.checked_add(granularity).ok_or_else(|| out_of_range(end))?
                    } else {
                        end
                    };
                    Ok(Some((candles, (next_start, remaining))))
                }
            },
        ))
    }
}

impl<T: Transport> SxcRestClient<T> {
    /// List market history with a fixed bucket width.
    ///
    /// See [`HistoryReconciler::fetch`].
    pub async fn market_history_by_granularity(
        &self,
        request: &HistoryRequest,
    ) -> Result<CandleSeries, SxcError> {
        HistoryReconciler::new(self).fetch(request).await
    }

    /// Stream market history with a fixed bucket width over a range of any
    /// length.
    ///
    /// See [`HistoryReconciler::scroll`].
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use futures_util::TryStreamExt;
    /// use southxchange_api_client::rest::{HistoryRequest, SxcRestClient};
    /// use southxchange_api_client::types::MarketHistoryInterval;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = SxcRestClient::new()?;
    ///     let request = HistoryRequest::new(
    ///         "ETH",
    ///         "BTC",
    ///         1_609_459_200,
    ///         1_640_995_200,
    ///         MarketHistoryInterval::Hour1,
    ///     );
    ///
    ///     let windows = client.scroll_market_history_by_granularity(request)?;
    ///     let mut windows = std::pin::pin!(windows);
    ///     while let Some(candles) = windows.try_next().await? {
    ///         println!("{} candles", candles.len());
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub fn scroll_market_history_by_granularity(
        &self,
        request: HistoryRequest,
    ) -> Result<impl Stream<Item = Result<Vec<Candle>, SxcError>> + '_, SxcError> {
        HistoryReconciler::new(self).scroll(request)
    }
}
