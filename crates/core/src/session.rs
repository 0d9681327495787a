//! The labeling session: an ordered record set, a cursor and a dirty flag.
//!
//! All operations are synchronous. Only [`LabelingSession::flush`] touches the
//! disk, and it always rewrites the whole set into a new timestamped file.

use crate::keymap::Binding;
use crate::models::{Direction, Progress, Record, COMMENT_SEPARATOR};
use crate::records::{self, RecordsError};
use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("record set is empty")]
    EmptyRecordSet,
    #[error("record {index} is out of range 1..={len}")]
    OutOfRange { index: usize, len: usize },
    #[error("backup to {} failed: {source}", .path.display())]
    Flush {
        path: PathBuf,
        #[source]
        source: RecordsError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlushReport {
    pub path: PathBuf,
    pub records: usize,
    pub at: NaiveDateTime,
}

/// What the host should do after a binding was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
    NeedsComment,
    NeedsGoto,
    SaveRequested,
    ViewRequested,
}

#[derive(Debug, Clone)]
pub struct LabelingSession {
    records: Vec<Record>,
    cursor: usize,
    dirty: bool,
    root_name: String,
    storage_dir: PathBuf,
}

impl LabelingSession {
    /// Starts at the first unclassified record, or the first record when
    /// everything is already classified.
    pub fn load(
        records: Vec<Record>,
        root_name: impl Into<String>,
        storage_dir: impl Into<PathBuf>,
    ) -> Result<Self, SessionError> {
        if records.is_empty() {
            return Err(SessionError::EmptyRecordSet);
        }
        let cursor = first_unclassified(&records, 0).unwrap_or(0);
        Ok(Self {
            records,
            cursor,
            dirty: false,
            root_name: root_name.into(),
            storage_dir: storage_dir.into(),
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn current(&self) -> &Record {
        &self.records[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn root_name(&self) -> &str {
        &self.root_name
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn has_previous(&self) -> bool {
        self.cursor > 0
    }

    pub fn has_next(&self) -> bool {
        self.cursor + 1 < self.records.len()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            classified: self.records.iter().filter(|r| r.is_classified()).count(),
            total: self.records.len(),
        }
    }

    /// Labels the current record and moves to the next unclassified record at
    /// or after it. Returns the new cursor when such a record exists.
    pub fn categorize(&mut self, label: &str) -> Option<usize> {
        self.records[self.cursor].category = label.to_string();
        self.dirty = true;
        let next = first_unclassified(&self.records, self.cursor);
        if let Some(index) = next {
            self.cursor = index;
        }
        debug!(label, cursor = self.cursor, "categorized");
        next
    }

    /// `None` means the operator cancelled; nothing changes.
    pub fn append_comment(&mut self, text: Option<&str>) -> bool {
        let Some(text) = text else {
            return false;
        };
        let record = &mut self.records[self.cursor];
        if record.category.is_empty() {
            record.category = text.to_string();
        } else {
            record.category.push_str(COMMENT_SEPARATOR);
            record.category.push_str(text);
        }
        self.dirty = true;
        true
    }

    pub fn step(&mut self, direction: Direction) -> bool {
        let moved = match direction {
            Direction::Backward if self.has_previous() => {
                self.cursor -= 1;
                true
            }
            Direction::Forward if self.has_next() => {
                self.cursor += 1;
                true
            }
            _ => false,
        };
        if moved {
            debug!(cursor = self.cursor, "stepped");
        }
        moved
    }

    /// Forward looks at the current record and everything after it; backward
    /// looks at everything strictly before it and picks the nearest.
    pub fn jump_to_unclassified(&mut self, direction: Direction) -> Option<usize> {
        let target = match direction {
            Direction::Forward => first_unclassified(&self.records, self.cursor),
            Direction::Backward => self.records[..self.cursor]
                .iter()
                .rposition(|r| !r.is_classified()),
        }?;
        self.cursor = target;
        debug!(cursor = target, "jumped to unclassified");
        Some(target)
    }

    /// Moves to a 1-based record number.
    pub fn goto(&mut self, index: usize) -> Result<(), SessionError> {
        if index == 0 || index > self.records.len() {
            return Err(SessionError::OutOfRange {
                index,
                len: self.records.len(),
            });
        }
        self.cursor = index - 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<Option<FlushReport>, SessionError> {
        self.flush_at(Local::now().naive_local())
    }

    /// Writes the whole set to `<root>_<YYYYMMDD>_<HHMMSS>.csv` when dirty.
    /// A failed write keeps the session dirty so the next flush retries.
    pub fn flush_at(&mut self, at: NaiveDateTime) -> Result<Option<FlushReport>, SessionError> {
        if !self.dirty {
            return Ok(None);
        }
        let path = self
            .storage_dir
            .join(records::backup_file_name(&self.root_name, &at));
        records::write_records(&path, &self.records).map_err(|source| SessionError::Flush {
            path: path.clone(),
            source,
        })?;
        self.dirty = false;
        debug!(records = self.records.len(), path = %path.display(), "record set written");
        Ok(Some(FlushReport {
            path,
            records: self.records.len(),
            at,
        }))
    }

    /// Applies a binding that needs no further input. Prompting bindings,
    /// saving and viewing are handed back to the host.
    pub fn apply(&mut self, binding: &Binding) -> Outcome {
        match binding {
            Binding::Quit => Outcome::Quit,
            Binding::Label(label) => {
                self.categorize(label);
                Outcome::Continue
            }
            Binding::Comment => Outcome::NeedsComment,
            Binding::Goto => Outcome::NeedsGoto,
            Binding::Step(direction) => {
                self.step(*direction);
                Outcome::Continue
            }
            Binding::Jump(direction) => {
                self.jump_to_unclassified(*direction);
                Outcome::Continue
            }
            Binding::Save => Outcome::SaveRequested,
            Binding::View => Outcome::ViewRequested,
        }
    }
}

fn first_unclassified(records: &[Record], from: usize) -> Option<usize> {
    records
        .iter()
        .skip(from)
        .position(|r| !r.is_classified())
        .map(|offset| from + offset)
}
