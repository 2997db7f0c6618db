//! Session coordinator: the glue between the timer engine and the record
//! store.
//!
//! Owns both collaborators outright (explicit dependency passing, no
//! globals) plus the post-session review form. Two paths write to the
//! store: the mid-session memo autosave and the review finalize.

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::storage::{RecordStore, SessionRecord};
use crate::timer::{PendingRecord, TimerEngine};

/// Post-session review form state.
///
/// Populated by `complete_session`, consumed by `save_record` /
/// `skip_record`.
#[derive(Debug, Clone)]
pub struct ReviewForm {
    /// 1-5, defaults to the middle.
    pub focus_level: u8,
    pub goal: String,
    pub reflection: String,
    pub memo: String,
    pending: Option<PendingRecord>,
    existing_record_id: Option<Uuid>,
}

impl Default for ReviewForm {
    fn default() -> Self {
        Self {
            focus_level: 3,
            goal: String::new(),
            reflection: String::new(),
            memo: String::new(),
            pending: None,
            existing_record_id: None,
        }
    }
}

impl ReviewForm {
    pub fn pending(&self) -> Option<&PendingRecord> {
        self.pending.as_ref()
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

pub struct SessionCoordinator {
    engine: TimerEngine,
    store: RecordStore,
    review: ReviewForm,
}

impl SessionCoordinator {
    pub fn new(engine: TimerEngine, store: RecordStore) -> Self {
        Self {
            engine,
            store,
            review: ReviewForm::default(),
        }
    }

    pub fn engine(&self) -> &TimerEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut TimerEngine {
        &mut self.engine
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn review(&self) -> &ReviewForm {
        &self.review
    }

    pub fn review_mut(&mut self) -> &mut ReviewForm {
        &mut self.review
    }

    // ── Autosave ─────────────────────────────────────────────────────

    /// Persist the in-progress memo before the session ends.
    ///
    /// A blank memo is a no-op. The first autosave appends a partial
    /// record (`actual_duration` absent) and associates its id with the
    /// session; later autosaves patch only that record's memo.
    pub fn save_memo_record(&mut self) {
        let memo = self.engine.memo().trim().to_string();
        if memo.is_empty() {
            return;
        }

        if let Some(id) = self.engine.record_id() {
            let mut records = self.store.load();
            if let Some(record) = records.iter_mut().find(|r| r.id == id) {
                record.memo = Some(memo);
                self.store.save(&records);
                debug!(%id, "memo autosave updated record");
            }
        } else {
            let record = self.partial_record(memo);
            let id = record.id;
            self.store.append(record);
            self.engine.set_record_id(id);
            debug!(%id, "memo autosave created record");
        }
    }

    // ── Review ───────────────────────────────────────────────────────

    /// Move the finished session into the review form.
    ///
    /// If a memo autosave created a record, its `actual_duration` is
    /// patched now so the record is complete even if the review is
    /// abandoned, and the form's memo is seeded from the stored text.
    /// The form's goal is seeded from the session goal.
    pub fn complete_session(&mut self) {
        if let Some(id) = self.engine.record_id() {
            let mut records = self.store.load();
            if let Some(record) = records.iter_mut().find(|r| r.id == id) {
                record.actual_duration =
                    Some(self.engine.planned_secs().saturating_add(self.engine.over_secs()));
                self.review.memo = record.memo.clone().unwrap_or_default();
                self.store.save(&records);
            }
            self.review.existing_record_id = Some(id);
        }
        self.review.pending = self.engine.create_pending_record();
        if let Some(goal) = self.review.pending.as_ref().and_then(|p| p.goal.clone()) {
            self.review.goal = goal;
        }
    }

    /// Finalize the review: update the autosaved record in place, or
    /// append a brand-new one. Clears the form either way.
    pub fn save_record(&mut self) {
        let Some(pending) = self.review.pending.take() else {
            self.review.reset();
            return;
        };

        if let Some(id) = self.review.existing_record_id {
            let mut records = self.store.load();
            if let Some(record) = records.iter_mut().find(|r| r.id == id) {
                record.actual_duration = Some(pending.actual_duration);
                record.goal = none_if_empty(&self.review.goal);
                record.focus_level = Some(self.review.focus_level);
                record.reflection = none_if_empty(&self.review.reflection);
                if !self.review.memo.is_empty() {
                    record.memo = Some(self.review.memo.clone());
                }
                if pending.meditation_count.is_some() {
                    record.meditation_count = pending.meditation_count;
                }
                if pending.meditation_seconds.is_some() {
                    record.meditation_seconds = pending.meditation_seconds;
                }
                self.store.save(&records);
                debug!(%id, "review finalized existing record");
            }
        } else {
            let record = SessionRecord {
                id: Uuid::new_v4(),
                start_time: pending.start_time,
                planned_duration: pending.planned_duration,
                actual_duration: Some(pending.actual_duration),
                goal: none_if_empty(&self.review.goal),
                focus_level: Some(self.review.focus_level),
                reflection: none_if_empty(&self.review.reflection),
                memo: none_if_empty(&self.review.memo),
                meditation_count: pending.meditation_count,
                meditation_seconds: pending.meditation_seconds,
            };
            debug!(id = %record.id, "review appended new record");
            self.store.append(record);
        }

        self.review.reset();
    }

    /// Discard the pending record without writing.
    pub fn skip_record(&mut self) {
        self.review.reset();
    }

    /// Dismiss the session after save or skip: back to a clean idle dial.
    pub fn finish_session(&mut self) {
        self.engine.clear_record_id();
        self.engine.reset();
    }

    // ── History ──────────────────────────────────────────────────────

    /// All records, newest first.
    pub fn history(&self) -> Vec<SessionRecord> {
        let mut records = self.store.load();
        records.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        records
    }

    pub fn record(&self, id: Uuid) -> Option<SessionRecord> {
        self.store.load().into_iter().find(|r| r.id == id)
    }

    pub fn update_record(&self, record: SessionRecord) {
        self.store.update(record);
    }

    pub fn delete_record(&self, id: Uuid) {
        self.store.delete(id);
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn partial_record(&self, memo: String) -> SessionRecord {
        let mut record = SessionRecord::new(
            self.engine.started_at().unwrap_or_else(Utc::now),
            self.engine.planned_secs(),
        );
        record.goal = none_if_empty(self.engine.goal());
        record.memo = Some(memo);
        let count = self.engine.meditation_count();
        let secs = self.engine.meditation_secs();
        record.meditation_count = (count > 0).then_some(count);
        record.meditation_seconds = (secs > 0).then_some(secs);
        record
    }
}

fn none_if_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
