//! Run summary
//!
//! Collected while the run progresses, logged once at the end.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// How a processed file relates to albums
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AlbumAction {
    Standalone,
    Founded { album_id: String },
    Joined { album_id: String },
}

/// Per-file result of the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RecordOutcome {
    Processed {
        file_id: String,
        album: AlbumAction,
        size_bytes: u64,
    },
    SkippedMissingSource {
        file_id: String,
        pattern: String,
    },
}

impl RecordOutcome {
    pub fn file_id(&self) -> &str {
        match self {
            RecordOutcome::Processed { file_id, .. } => file_id,
            RecordOutcome::SkippedMissingSource { file_id, .. } => file_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MigrationReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub accounts_created: usize,
    pub containers_created: usize,
    pub albums_created: usize,
    pub files_joined: usize,
    pub outcomes: Vec<RecordOutcome>,
}

impl MigrationReport {
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            accounts_created: 0,
            containers_created: 0,
            albums_created: 0,
            files_joined: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: RecordOutcome) {
        if let RecordOutcome::Processed { album, .. } = &outcome {
            match album {
                AlbumAction::Founded { .. } => self.albums_created += 1,
                AlbumAction::Joined { .. } => self.files_joined += 1,
                AlbumAction::Standalone => {}
            }
        }
        self.outcomes.push(outcome);
    }

    pub fn processed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::Processed { .. }))
            .count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.processed()
    }

    pub fn skipped_ids(&self) -> impl Iterator<Item = &str> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, RecordOutcome::SkippedMissingSource { .. }))
            .map(RecordOutcome::file_id)
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn duration_ms(&self) -> Option<i64> {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds())
    }
}
