//! Threshold evaluation — turns a live price plus configured rules into
//! fired alerts.

use crate::domain::{alert_id, Alert, Direction, ThresholdRule};
use chrono::{DateTime, Utc};

/// Caution appended to alerts from deferred rules.
const DEFERRED_SUFFIX: &str = " - Watch how price closes the week before buying";

/// Evaluate a ticker's rules against its current price.
///
/// A missing price is not an error at this layer: the provider could not
/// supply a value, so the ticker contributes no alerts this round. Each
/// rule fires independently on strict inequality (equality never fires)
/// and the output preserves rule order.
pub fn evaluate(
    ticker: &str,
    price: Option<f64>,
    rules: &[ThresholdRule],
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let Some(price) = price else {
        return Vec::new();
    };

    rules
        .iter()
        .filter(|rule| fires(rule, price))
        .map(|rule| build_alert(ticker, rule, price, now))
        .collect()
}

fn fires(rule: &ThresholdRule, price: f64) -> bool {
    match rule.direction {
        Direction::Above => price > rule.price,
        Direction::Below => price < rule.price,
    }
}

fn build_alert(ticker: &str, rule: &ThresholdRule, price: f64, now: DateTime<Utc>) -> Alert {
    let mut message = format!(
        "{ticker} is {} ${:.2} (current: ${price:.2})",
        rule.direction, rule.price
    );
    if rule.deferred {
        message.push_str(DEFERRED_SUFFIX);
    }

    Alert {
        id: alert_id(ticker, rule.direction, rule.price),
        ticker: ticker.to_string(),
        direction: rule.direction,
        target_price: rule.price,
        current_price: price,
        message,
        timestamp: now,
    }
}
