use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use pairup_core::{OutcomeEvent, OutcomeReporter, ReportResult};
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::*;

pub const DEFAULT_SCORE_FILE: &str = "game_scores.txt";

/// Append-only text file of [`ScoreEntry`] lines.
///
/// Timestamps are wall-clock time in the offset resolved when the log is opened, local time when the platform
/// can tell, UTC otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreLog {
    path: PathBuf,
    offset: UtcOffset,
}

impl ScoreLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let offset = UtcOffset::current_local_offset().unwrap_or_else(|err| {
            log::debug!("Local offset unavailable, stamping scores in UTC: {}", err);
            UtcOffset::UTC
        });
        Self::with_offset(path, offset)
    }

    pub fn with_offset(path: impl Into<PathBuf>, offset: UtcOffset) -> Self {
        Self {
            path: path.into(),
            offset,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    fn now(&self) -> PrimitiveDateTime {
        let now = OffsetDateTime::now_utc().to_offset(self.offset);
        PrimitiveDateTime::new(now.date(), now.time())
    }

    pub fn append(&self, entry: &ScoreEntry) -> Result<()> {
        let line = entry.to_line()?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", line)?;
        log::debug!("Appended to {}: {}", self.path.display(), line);
        Ok(())
    }

    pub fn record_at(&self, event: &OutcomeEvent, recorded_at: PrimitiveDateTime) -> Result<()> {
        self.append(&ScoreEntry::from_event(event, recorded_at))
    }

    /// Every line in the file, oldest first. A missing file has no lines.
    pub fn lines(&self) -> Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(contents.lines().map(str::to_owned).collect()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    /// Parsed lines, skipping any that do not follow the score format.
    pub fn entries(&self) -> Result<Vec<ScoreEntry>> {
        Ok(self
            .lines()?
            .iter()
            .filter_map(|line| match line.parse() {
                Ok(entry) => Some(entry),
                Err(err) => {
                    log::warn!("Skipping line in {}: {}", self.path.display(), err);
                    None
                }
            })
            .collect())
    }
}

impl Default for ScoreLog {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_FILE)
    }
}

impl OutcomeReporter for ScoreLog {
    fn record(&mut self, event: &OutcomeEvent) -> ReportResult {
        self.record_at(event, self.now()).map_err(Into::into)
    }

    fn history(&self) -> ReportResult<Vec<String>> {
        self.lines().map_err(Into::into)
    }
}
