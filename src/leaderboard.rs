//! High score submission and the per-level leaderboard query.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::{
    accounts::truthy,
    error::Error,
    store::{ScoreEntry, ScoreStore},
};

/// Entries per leaderboard page.
pub const PAGE_SIZE: usize = 20;

const MISSING_FIELDS: &str = "Missing required fields: level, userHandle, score, timestamp";
const INVALID_TYPES: &str =
    "Invalid field types: level and userHandle must be strings, score must be a number";
const INVALID_LEVEL: &str = "Missing or invalid required query parameter: level";

pub struct Leaderboard {
    store: Arc<dyn ScoreStore>,
}

impl Leaderboard {
    #[must_use]
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self { store }
    }

    /// Record a score from a `{level, userHandle, score, timestamp}` body.
    ///
    /// Callers must already have authenticated the request. The submitted
    /// `userHandle` is taken as is; it is not matched against the token.
    ///
    /// # Errors
    /// [`Error::Validation`] when a field is missing, falsy or of the wrong
    /// type, [`Error::Internal`] if the store is unusable.
    #[instrument(skip_all)]
    pub fn submit(&self, body: &Map<String, Value>) -> Result<ScoreEntry, Error> {
        let field = |name: &str| body.get(name).filter(|value| truthy(value));

        let (Some(level), Some(user_handle), Some(score), Some(timestamp)) = (
            field("level"),
            field("userHandle"),
            field("score"),
            field("timestamp"),
        ) else {
            return Err(Error::validation(MISSING_FIELDS));
        };

        let (Value::String(level), Value::String(user_handle), Value::Number(score)) =
            (level, user_handle, score)
        else {
            return Err(Error::validation(INVALID_TYPES));
        };

        let entry = ScoreEntry {
            level: level.clone(),
            user_handle: user_handle.clone(),
            score: score.clone(),
            timestamp: timestamp.clone(),
        };
        self.store.append(entry.clone())?;

        debug!(level = %entry.level, score = %entry.score, "high score recorded");

        Ok(entry)
    }

    /// One page of the leaderboard for `level`, best score first.
    ///
    /// Equal scores keep their submission order. Pages are 1-based; a page
    /// past the end is empty rather than an error.
    ///
    /// # Errors
    /// [`Error::Validation`] when `level` is missing or empty,
    /// [`Error::Internal`] if the store is unusable.
    #[instrument(skip(self))]
    pub fn query(&self, level: Option<&str>, page: usize) -> Result<Vec<ScoreEntry>, Error> {
        let level = level
            .filter(|level| !level.is_empty())
            .ok_or_else(|| Error::validation(INVALID_LEVEL))?;

        let mut scores = self.store.by_level(level)?;
        if scores.is_empty() {
            return Ok(scores);
        }

        // stable: ties stay in insertion order
        scores.sort_by(|a, b| b.score_value().total_cmp(&a.score_value()));

        let start = page.max(1).saturating_sub(1).saturating_mul(PAGE_SIZE);
        let page: Vec<ScoreEntry> = scores.into_iter().skip(start).take(PAGE_SIZE).collect();

        debug!(returned = page.len(), "leaderboard page");

        Ok(page)
    }
}

/// Page number from the raw `page` query parameter.
///
/// Only the leading digits count, so `"2abc"` and `"2.5"` are page 2. Values
/// too large for `usize` saturate and land past the last page. Absent,
/// non-numeric, zero or negative values fall back to the first page.
#[must_use]
pub fn parse_page(raw: Option<&str>) -> usize {
    let Some(raw) = raw.map(str::trim_start) else {
        return 1;
    };
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end]
        .bytes()
        .try_fold(0usize, |page, digit| {
            page.checked_mul(10)?.checked_add(usize::from(digit - b'0'))
        })
        .unwrap_or(usize::MAX)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryScoreStore, StoreError};
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    fn leaderboard() -> (Leaderboard, Arc<MemoryScoreStore>) {
        let store = Arc::new(MemoryScoreStore::new());
        (Leaderboard::new(store.clone()), store)
    }

    fn submit(board: &Leaderboard, level: &str, handle: &str, score: Value) -> anyhow::Result<()> {
        board.submit(&body(json!({
            "level": level,
            "userHandle": handle,
            "score": score,
            "timestamp": "2024-01-01T00:00:00Z",
        })))?;
        Ok(())
    }

    fn scores(entries: &[ScoreEntry]) -> Vec<f64> {
        entries.iter().map(ScoreEntry::score_value).collect()
    }

    #[test]
    fn test_submit_echoes_entry() -> anyhow::Result<()> {
        let (board, store) = leaderboard();
        let entry = board.submit(&body(json!({
            "level": "L1",
            "userHandle": "alice1",
            "score": 42,
            "timestamp": 1_700_000_000,
        })))?;

        assert_eq!(entry.level, "L1");
        assert_eq!(entry.score.as_i64(), Some(42));
        assert_eq!(entry.timestamp, json!(1_700_000_000));
        assert_eq!(store.len()?, 1);
        Ok(())
    }

    #[test]
    fn test_submit_rejects_missing_and_falsy() -> anyhow::Result<()> {
        let (board, store) = leaderboard();
        let complete = json!({"level": "L1", "userHandle": "alice1", "score": 5, "timestamp": "t"});

        for field in ["level", "userHandle", "score", "timestamp"] {
            let mut missing = body(complete.clone());
            missing.remove(field);
            assert_eq!(board.submit(&missing), Err(Error::validation(MISSING_FIELDS)));
        }

        for (field, falsy) in [
            ("score", json!(0)),
            ("level", json!("")),
            ("timestamp", json!(null)),
            ("userHandle", json!(false)),
        ] {
            let mut input = body(complete.clone());
            input.insert(field.to_string(), falsy);
            assert_eq!(board.submit(&input), Err(Error::validation(MISSING_FIELDS)));
        }

        assert!(store.is_empty()?);
        Ok(())
    }

    #[test]
    fn test_submit_rejects_wrong_types() -> anyhow::Result<()> {
        let (board, store) = leaderboard();
        for input in [
            json!({"level": 1, "userHandle": "alice1", "score": 5, "timestamp": "t"}),
            json!({"level": "L1", "userHandle": ["alice1"], "score": 5, "timestamp": "t"}),
            json!({"level": "L1", "userHandle": "alice1", "score": "5", "timestamp": "t"}),
        ] {
            assert_eq!(
                board.submit(&body(input)),
                Err(Error::validation(INVALID_TYPES))
            );
        }
        assert!(store.is_empty()?);
        Ok(())
    }

    #[test]
    fn test_query_requires_level() {
        let (board, _) = leaderboard();
        assert_eq!(board.query(None, 1), Err(Error::validation(INVALID_LEVEL)));
        assert_eq!(board.query(Some(""), 1), Err(Error::validation(INVALID_LEVEL)));
    }

    #[test]
    fn test_query_unknown_level_is_empty() -> anyhow::Result<()> {
        let (board, _) = leaderboard();
        submit(&board, "L1", "alice1", json!(10))?;
        assert!(board.query(Some("unknown"), 1)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_query_pages() -> anyhow::Result<()> {
        let (board, _) = leaderboard();
        for score in 1..=25 {
            submit(&board, "L1", "alice1", json!(score))?;
        }
        submit(&board, "L2", "alice1", json!(100))?;

        let first = board.query(Some("L1"), 1)?;
        assert_eq!(scores(&first), (6..=25).rev().map(f64::from).collect::<Vec<_>>());

        let second = board.query(Some("L1"), 2)?;
        assert_eq!(scores(&second), vec![5.0, 4.0, 3.0, 2.0, 1.0]);

        assert!(board.query(Some("L1"), 3)?.is_empty());
        assert!(first.iter().chain(&second).all(|entry| entry.level == "L1"));
        Ok(())
    }

    #[test]
    fn test_query_ties_keep_submission_order() -> anyhow::Result<()> {
        let (board, _) = leaderboard();
        submit(&board, "L1", "first1", json!(10))?;
        submit(&board, "L1", "second", json!(30))?;
        submit(&board, "L1", "third1", json!(10))?;
        submit(&board, "L1", "fourth", json!(10.0))?;

        let handles: Vec<String> = board
            .query(Some("L1"), 1)?
            .into_iter()
            .map(|entry| entry.user_handle)
            .collect();
        assert_eq!(handles, vec!["second", "first1", "third1", "fourth"]);
        Ok(())
    }

    #[test]
    fn test_query_mixed_numbers_and_negatives() -> anyhow::Result<()> {
        let (board, _) = leaderboard();
        for score in [json!(-3), json!(2.5), json!(7), json!(-0.5)] {
            submit(&board, "L1", "alice1", score)?;
        }
        assert_eq!(scores(&board.query(Some("L1"), 1)?), vec![7.0, 2.5, -0.5, -3.0]);
        Ok(())
    }

    #[test]
    fn test_query_is_repeatable() -> anyhow::Result<()> {
        let (board, _) = leaderboard();
        for (i, score) in [3, 9, 3, 1, 9].into_iter().enumerate() {
            submit(&board, "L1", &format!("player{i}"), json!(score))?;
        }
        assert_eq!(board.query(Some("L1"), 1)?, board.query(Some("L1"), 1)?);
        Ok(())
    }

    #[test]
    fn test_parse_page() {
        assert_eq!(parse_page(None), 1);
        assert_eq!(parse_page(Some("")), 1);
        assert_eq!(parse_page(Some("abc")), 1);
        assert_eq!(parse_page(Some("0")), 1);
        assert_eq!(parse_page(Some("-2")), 1);
        assert_eq!(parse_page(Some("3")), 3);
        assert_eq!(parse_page(Some(" 2 ")), 2);
        assert_eq!(parse_page(Some("+4")), 4);
    }

    #[test]
    fn test_parse_page_leading_digits() {
        assert_eq!(parse_page(Some("2abc")), 2);
        assert_eq!(parse_page(Some("2.5")), 2);
        assert_eq!(parse_page(Some("1,2")), 1);
        assert_eq!(parse_page(Some("007")), 7);
    }

    #[test]
    fn test_parse_page_overflow_is_past_the_end() -> anyhow::Result<()> {
        assert_eq!(parse_page(Some("18446744073709551616")), usize::MAX);
        assert_eq!(parse_page(Some("99999999999999999999999999")), usize::MAX);

        let (board, _) = leaderboard();
        for score in 1..=25 {
            submit(&board, "L1", "alice1", json!(score))?;
        }
        assert!(board.query(Some("L1"), usize::MAX)?.is_empty());
        Ok(())
    }

    struct UnavailableScores;

    impl ScoreStore for UnavailableScores {
        fn append(&self, _entry: ScoreEntry) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("highScores"))
        }

        fn by_level(&self, _level: &str) -> Result<Vec<ScoreEntry>, StoreError> {
            Err(StoreError::Unavailable("highScores"))
        }

        fn len(&self) -> Result<usize, StoreError> {
            Err(StoreError::Unavailable("highScores"))
        }
    }

    #[test]
    fn test_unavailable_store_is_internal_error() {
        let board = Leaderboard::new(Arc::new(UnavailableScores));
        let unavailable = Err(Error::Internal(
            "Server error: highScores data is missing.".to_string(),
        ));

        assert_eq!(board.query(Some("L1"), 1), unavailable);

        let entry = json!({"level": "L1", "userHandle": "alice1", "score": 5, "timestamp": "t"});
        assert_eq!(board.submit(&body(entry)).map(|_| Vec::new()), unavailable);
        // level is validated before the store is touched
        assert_eq!(board.query(None, 1), Err(Error::validation(INVALID_LEVEL)));
    }
}
