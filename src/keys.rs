//! Cache key namespace
//!
//! Keys are composed deterministically from logical identity. The cache
//! layers never parse keys back apart; they only build them.

use chrono::NaiveDate;

/// Key for one conversation session
pub fn session(session_id: &str) -> String {
    format!("session:{}", session_id)
}

/// Day-scoped key for a sentiment verdict
pub fn verdict(token: &str, timeframe: &str, date: NaiveDate) -> String {
    format!("sentiment:{}:{}:{}", token, timeframe, date.format("%Y-%m-%d"))
}

/// Key for the fetched-article bundle of one token and timeframe
pub fn articles(token: &str, timeframe: &str) -> String {
    format!("articles:{}:{}", token, timeframe)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key() {
        assert_eq!(session("abc-123"), "session:abc-123");
    }

    #[test]
    fn test_verdict_key_includes_day() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(verdict("BTC", "7d", date), "sentiment:BTC:7d:2024-03-05");
    }

    #[test]
    fn test_article_key() {
        assert_eq!(articles("ETH", "1d"), "articles:ETH:1d");
    }
}
