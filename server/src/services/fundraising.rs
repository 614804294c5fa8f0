//! Fundraising progress scraped from the public campaign page.
//!
//! The page is third-party markup with no stable structure, so the figures
//! are located with two tolerant text patterns. Every failure along the way
//! (transport, status, no match, bad number) ends in
//! [`FundraisingSnapshot::FALLBACK`]; callers of [`FundraisingService::snapshot`]
//! never see an error.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::FundraisingSnapshot;

lazy_static! {
    // "€1,631 raised"
    static ref RAISED_REGEX: Regex =
        Regex::new(r"(?i)[€$£]\s?([0-9][0-9,]*)\s+raised").unwrap();

    // "of €1.8K", "of €1,800", "of €1000"
    static ref GOAL_REGEX: Regex =
        Regex::new(r"(?i)\bof\s+[€$£]\s?([0-9][0-9,]*(?:\.[0-9]+)?k?)").unwrap();
}

#[derive(Debug, Error)]
pub enum UpstreamFetchError {
    #[error("request to fundraising source failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("fundraising source answered with status {0}")]
    Status(u16),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("progress figures not found in page")]
    PatternNotFound,
    #[error("unparseable amount '{0}'")]
    InvalidNumber(String),
    #[error("fundraising goal is zero")]
    ZeroGoal,
}

#[derive(Debug, Error)]
pub enum FundraisingError {
    #[error(transparent)]
    Upstream(#[from] UpstreamFetchError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}

/// Raw figures as they appear in the page text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction<'a> {
    Found { raised: &'a str, goal: &'a str },
    NotFound,
}

/// First case-insensitive raised figure in `html`, then the first goal
/// figure after it. Goal-like text ahead of the raised figure is ignored.
pub fn extract(html: &str) -> Extraction<'_> {
    let Some(raised) = RAISED_REGEX.captures(html).and_then(|caps| caps.get(1)) else {
        return Extraction::NotFound;
    };
    let goal = GOAL_REGEX
        .captures(&html[raised.end()..])
        .and_then(|caps| caps.get(1));

    match goal {
        Some(goal) => Extraction::Found {
            raised: raised.as_str(),
            goal: goal.as_str(),
        },
        None => Extraction::NotFound,
    }
}

fn strip_separators(raw: &str) -> String {
    raw.chars().filter(|c| *c != ',').collect()
}

pub fn parse_raised(raw: &str) -> Result<u64, ExtractionError> {
    strip_separators(raw)
        .parse::<u64>()
        .map_err(|_| ExtractionError::InvalidNumber(raw.to_string()))
}

/// A decimal goal is always thousands shorthand ("1.8" and "1.8K" are 1800).
/// Without a decimal point only an explicit K suffix scales the value.
pub fn parse_goal(raw: &str) -> Result<u64, ExtractionError> {
    let invalid = || ExtractionError::InvalidNumber(raw.to_string());

    let cleaned = strip_separators(raw);
    let suffixed = cleaned.strip_suffix(|c: char| c.eq_ignore_ascii_case(&'k'));
    let (digits, thousands_suffix) = match suffixed {
        Some(digits) => (digits, true),
        None => (cleaned.as_str(), false),
    };

    if digits.contains('.') {
        let value = Decimal::from_str(digits).map_err(|_| invalid())?;
        value
            .checked_mul(Decimal::ONE_THOUSAND)
            .ok_or_else(invalid)?
            .trunc()
            .to_u64()
            .ok_or_else(invalid)
    } else if thousands_suffix {
        digits
            .parse::<u64>()
            .ok()
            .and_then(|v| v.checked_mul(1000))
            .ok_or_else(invalid)
    } else {
        digits.parse::<u64>().map_err(|_| invalid())
    }
}

/// `raised / goal * 100`, rounded half away from zero. Not clamped: an
/// overfunded campaign reports more than 100.
pub fn percentage(raised: u64, goal: u64) -> Result<u64, ExtractionError> {
    if goal == 0 {
        return Err(ExtractionError::ZeroGoal);
    }

    let invalid = || ExtractionError::InvalidNumber(format!("{}/{}", raised, goal));

    Decimal::from(raised)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(Decimal::from(goal)))
        .ok_or_else(invalid)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
        .ok_or_else(invalid)
}

pub fn snapshot_from_html(html: &str) -> Result<FundraisingSnapshot, ExtractionError> {
    let (raw_raised, raw_goal) = match extract(html) {
        Extraction::Found { raised, goal } => (raised, goal),
        Extraction::NotFound => return Err(ExtractionError::PatternNotFound),
    };

    let raised = parse_raised(raw_raised)?;
    let goal = parse_goal(raw_goal)?;
    let percentage = percentage(raised, goal)?;

    Ok(FundraisingSnapshot {
        raised,
        goal,
        percentage,
    })
}

#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Single GET, no retry. Non-2xx is an error regardless of class.
    async fn fetch(&self, url: &str) -> Result<String, UpstreamFetchError>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpSourceFetcher {
    client: reqwest::Client,
}

impl HttpSourceFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SourceFetcher for HttpSourceFetcher {
    async fn fetch(&self, url: &str) -> Result<String, UpstreamFetchError> {
        info!(url = %url, "Fetching fundraising source");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamFetchError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

#[derive(Clone)]
pub struct FundraisingService {
    fetcher: Arc<dyn SourceFetcher>,
    source_url: String,
}

impl FundraisingService {
    pub fn new(fetcher: Arc<dyn SourceFetcher>, source_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            source_url: source_url.into(),
        }
    }

    pub async fn snapshot(&self) -> FundraisingSnapshot {
        match self.live_snapshot().await {
            Ok(snapshot) => {
                info!(
                    raised = snapshot.raised,
                    goal = snapshot.goal,
                    percentage = snapshot.percentage,
                    "Parsed fundraising progress"
                );
                snapshot
            }
            Err(e) => {
                warn!(error = %e, "Serving fallback fundraising snapshot");
                FundraisingSnapshot::FALLBACK
            }
        }
    }

    async fn live_snapshot(&self) -> Result<FundraisingSnapshot, FundraisingError> {
        let html = self.fetcher.fetch(&self.source_url).await?;
        Ok(snapshot_from_html(&html)?)
    }
}
