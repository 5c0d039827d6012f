//! Version-guarded conversion of segment source (LaTeX) to display markup
//!
//! Converters run outside the core and finish in any order. Each `begin`
//! bumps the segment's version and hands out a ticket; a completion is applied
//! only if its ticket carries the latest version issued for that segment.
//! Older completions are dropped.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::SegmentId;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ConversionTicket {
    pub segment_id: SegmentId,
    pub version: u64,
}

/// What the renderer should show for a segment
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum ConversionState {
    Pending { version: u64, source: String },
    Rendered { markup: String },
    /// Conversion failed; show the raw source
    Fallback { source: String },
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConversionApplied {
    Applied,
    FellBack,
    Stale,
}

#[derive(Clone, Debug, Default)]
pub struct ConversionGuard {
    versions: HashMap<SegmentId, u64>,
    states: HashMap<SegmentId, ConversionState>,
}

impl ConversionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start converting `source` for `segment_id`
    pub fn begin(&mut self, segment_id: &str, source: &str) -> ConversionTicket {
        let version = self.versions.entry(segment_id.to_string()).or_insert(0);
        *version += 1;
        let version = *version;
        self.states.insert(
            segment_id.to_string(),
            ConversionState::Pending {
                version,
                source: source.to_string(),
            },
        );
        ConversionTicket {
            segment_id: segment_id.to_string(),
            version,
        }
    }

    /// Deliver a converter result (`None` when conversion failed)
    pub fn complete(&mut self, ticket: &ConversionTicket, markup: Option<String>) -> ConversionApplied {
        if !self.is_current(ticket) {
            log::debug!(
                "dropping stale conversion for {} (v{}, latest v{})",
                ticket.segment_id,
                ticket.version,
                self.latest_version(&ticket.segment_id)
            );
            return ConversionApplied::Stale;
        }
        let source = match self.states.get(&ticket.segment_id) {
            Some(ConversionState::Pending { source, .. }) => source.clone(),
            // already completed with this version
            _ => return ConversionApplied::Stale,
        };
        let (state, applied) = match markup {
            Some(markup) => (ConversionState::Rendered { markup }, ConversionApplied::Applied),
            None => {
                log::warn!("conversion failed for {}, showing source", ticket.segment_id);
                (ConversionState::Fallback { source }, ConversionApplied::FellBack)
            }
        };
        self.states.insert(ticket.segment_id.clone(), state);
        applied
    }

    /// Whether `ticket` still carries the latest version for its segment
    pub fn is_current(&self, ticket: &ConversionTicket) -> bool {
        ticket.version == self.latest_version(&ticket.segment_id)
    }

    pub fn state(&self, segment_id: &str) -> Option<&ConversionState> {
        self.states.get(segment_id)
    }

    pub fn latest_version(&self, segment_id: &str) -> u64 {
        self.versions.get(segment_id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_wins() {
        let mut guard = ConversionGuard::new();
        let first = guard.begin("s", "x^2");
        let second = guard.begin("s", "x^3");

        assert_eq!(
            guard.complete(&second, Some("<m>x3</m>".to_string())),
            ConversionApplied::Applied
        );
        // the older conversion finishes late and is ignored
        assert_eq!(
            guard.complete(&first, Some("<m>x2</m>".to_string())),
            ConversionApplied::Stale
        );
        assert_eq!(
            guard.state("s"),
            Some(&ConversionState::Rendered {
                markup: "<m>x3</m>".to_string()
            })
        );
    }

    #[test]
    fn test_failure_falls_back_to_source() {
        let mut guard = ConversionGuard::new();
        let ticket = guard.begin("s", "\\frac{");
        assert_eq!(guard.complete(&ticket, None), ConversionApplied::FellBack);
        assert_eq!(
            guard.state("s"),
            Some(&ConversionState::Fallback {
                source: "\\frac{".to_string()
            })
        );
        // a duplicate delivery of the same ticket changes nothing
        assert_eq!(
            guard.complete(&ticket, Some("late".to_string())),
            ConversionApplied::Stale
        );
    }
}
