//! Argument-shape repair for malformed upstream clients.
//!
//! One known agent client collapses the structured arguments of
//! `zoom_refresh_token` into a single map key shaped like
//!
//! ```text
//! `zoom_refresh_token`: `abc`, `zoom_client_id`: `id1`, `zoom_client_secret`: `sec1`
//! ```
//!
//! Repair strategies run between argument validation and dispatch and
//! can rebuild a usable argument map from such shapes. They are kept
//! separate from the dispatch path so the heuristic can be deleted
//! outright once the calling convention is fixed upstream.

use crate::tools::ZoomTool;
use regex::Regex;
use serde_json::{Map, Value};
use tracing::debug;

/// A recovery strategy for argument maps that failed to arrive in
/// their documented shape.
pub trait ArgShapeRepair: Send + Sync {
    /// Attempt to rebuild the argument map for `tool`. `None` means
    /// the strategy does not apply; the original arguments proceed
    /// (and will fail validation on their own terms).
    fn repair(&self, tool: ZoomTool, args: &Map<String, Value>) -> Option<Map<String, Value>>;
}

/// Extracts backtick-delimited `` `field`: `value` `` pairs from a
/// single collapsed key.
pub struct BacktickKeyRepair {
    refresh_token: Regex,
    client_id: Regex,
    client_secret: Regex,
}

impl BacktickKeyRepair {
    pub fn new() -> Self {
        Self {
            refresh_token: Regex::new(r"`zoom_refresh_token`:\s*`([^`]+)`").unwrap(),
            client_id: Regex::new(r"`zoom_client_id`:\s*`([^`]+)`").unwrap(),
            client_secret: Regex::new(r"`zoom_client_secret`:\s*`([^`]+)`").unwrap(),
        }
    }

    fn capture(regex: &Regex, key: &str) -> Option<String> {
        regex
            .captures(key)
            .map(|captures| captures[1].to_string())
    }
}

impl Default for BacktickKeyRepair {
    fn default() -> Self {
        Self::new()
    }
}

impl ArgShapeRepair for BacktickKeyRepair {
    fn repair(&self, tool: ZoomTool, args: &Map<String, Value>) -> Option<Map<String, Value>> {
        if tool != ZoomTool::RefreshToken || args.len() != 1 {
            return None;
        }

        let key = args.keys().next()?;
        let refresh_token = Self::capture(&self.refresh_token, key)?;
        let client_id = Self::capture(&self.client_id, key)?;
        let client_secret = Self::capture(&self.client_secret, key)?;

        debug!("repaired collapsed zoom_refresh_token arguments");

        let mut repaired = Map::new();
        repaired.insert("zoom_refresh_token".to_string(), Value::String(refresh_token));
        repaired.insert("zoom_client_id".to_string(), Value::String(client_id));
        repaired.insert("zoom_client_secret".to_string(), Value::String(client_secret));
        Some(repaired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_key_args(key: &str) -> Map<String, Value> {
        let mut args = Map::new();
        args.insert(key.to_string(), Value::Null);
        args
    }

    #[test]
    fn test_extracts_all_three_fields() {
        let repair = BacktickKeyRepair::new();
        let args = single_key_args(
            "`zoom_refresh_token`: `abc`, `zoom_client_id`: `id1`, `zoom_client_secret`: `sec1`",
        );

        let repaired = repair.repair(ZoomTool::RefreshToken, &args).unwrap();

        assert_eq!(repaired["zoom_refresh_token"], "abc");
        assert_eq!(repaired["zoom_client_id"], "id1");
        assert_eq!(repaired["zoom_client_secret"], "sec1");
    }

    #[test]
    fn test_ignores_other_tools() {
        let repair = BacktickKeyRepair::new();
        let args = single_key_args(
            "`zoom_refresh_token`: `abc`, `zoom_client_id`: `id1`, `zoom_client_secret`: `sec1`",
        );

        assert!(repair.repair(ZoomTool::ListRecordings, &args).is_none());
    }

    #[test]
    fn test_ignores_multi_key_maps() {
        let repair = BacktickKeyRepair::new();
        let mut args = single_key_args("`zoom_refresh_token`: `abc`");
        args.insert("other".to_string(), Value::Null);

        assert!(repair.repair(ZoomTool::RefreshToken, &args).is_none());
    }

    #[test]
    fn test_partial_extraction_fails_whole_repair() {
        let repair = BacktickKeyRepair::new();
        // client_secret missing: the original arguments must proceed
        // untouched and fail the required-field check downstream.
        let args =
            single_key_args("`zoom_refresh_token`: `abc`, `zoom_client_id`: `id1`");

        assert!(repair.repair(ZoomTool::RefreshToken, &args).is_none());
    }
}
