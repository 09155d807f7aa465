use rand::Rng;

use crate::core::parser::{join_names, parse_participants};
use crate::core::partition::partition_with_rng;
use crate::core::reconcile::reconcile;
use crate::domain::model::{GroupPartition, SizingMode};
use crate::domain::ports::ConfigProvider;
use crate::domain::records::{
    HistoryRecord, LastUsedSettings, NewHistoryEntry, SavedList, Theme, DEFAULT_GROUP_COUNT,
    DEFAULT_GROUP_SIZE,
};
use crate::utils::error::Result;

/// Editable state behind one grouping form.
///
/// Every edit that can change the participant count, the mode or the
/// authoritative sizing field re-runs [`reconcile`], so `group_count` and
/// `group_size` always agree.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingSession {
    title: String,
    participant_text: String,
    participants: Vec<String>,
    mode: SizingMode,
    group_count: usize,
    group_size: usize,
    assign_leader: bool,
    theme: Theme,
}

impl Default for GroupingSession {
    fn default() -> Self {
        Self {
            title: String::new(),
            participant_text: String::new(),
            participants: Vec::new(),
            mode: SizingMode::ByGroupCount,
            group_count: DEFAULT_GROUP_COUNT,
            group_size: DEFAULT_GROUP_SIZE,
            assign_leader: true,
            theme: Theme::default(),
        }
    }
}

impl GroupingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults<C: ConfigProvider>(config: &C) -> Self {
        let mut session = Self {
            mode: config.default_mode(),
            group_count: config.default_group_count().max(1),
            group_size: config.default_group_size().max(1),
            assign_leader: config.assign_leader(),
            theme: config.default_theme(),
            ..Self::default()
        };
        session.reconcile_fields();
        session
    }

    /// Restores title, sizing and theme from a past session.
    pub fn from_history(record: &HistoryRecord) -> Self {
        let group_count = if record.group_count == 0 {
            DEFAULT_GROUP_COUNT
        } else {
            record.group_count
        };
        let group_size = if record.group_size == 0 {
            DEFAULT_GROUP_SIZE
        } else {
            record.group_size
        };

        let mut session = Self {
            title: record.title.clone(),
            mode: record.mode,
            group_count,
            group_size,
            assign_leader: record.groups.leader_count() > 0,
            theme: record.theme,
            ..Self::default()
        };
        session.reconcile_fields();
        session
    }

    /// [`from_history`](Self::from_history) plus the participants that were
    /// grouped, one per line, ready to be shuffled again.
    pub fn replay(record: &HistoryRecord) -> Self {
        let mut session = Self::from_history(record);
        session.set_participant_text(join_names(&record.groups.member_names()));
        session
    }

    pub fn load_saved_list(&mut self, list: &SavedList) {
        self.title = list.title.clone();
        self.set_participant_text(&list.participant_text);
    }

    pub fn apply_last_used(&mut self, settings: &LastUsedSettings) {
        self.mode = settings.mode;
        self.group_count = settings.group_count.max(1);
        self.group_size = settings.group_size.max(1);
        self.assign_leader = settings.assign_leader;
        self.reconcile_fields();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn participant_text(&self) -> &str {
        &self.participant_text
    }

    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    pub fn mode(&self) -> SizingMode {
        self.mode
    }

    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn assign_leader(&self) -> bool {
        self.assign_leader
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_participant_text(&mut self, text: impl Into<String>) {
        self.participant_text = text.into();
        self.participants = parse_participants(&self.participant_text);
        self.reconcile_fields();
    }

    pub fn set_mode(&mut self, mode: SizingMode) {
        self.mode = mode;
        self.reconcile_fields();
    }

    /// Ignored unless the session is sized by group count.
    pub fn set_group_count(&mut self, group_count: usize) {
        if self.mode != SizingMode::ByGroupCount {
            tracing::debug!("Group count is derived in '{}' mode; ignoring edit", self.mode);
            return;
        }
        self.group_count = group_count;
        self.reconcile_fields();
    }

    /// Ignored unless the session is sized by group size.
    pub fn set_group_size(&mut self, group_size: usize) {
        if self.mode != SizingMode::ByGroupSize {
            tracing::debug!("Group size is derived in '{}' mode; ignoring edit", self.mode);
            return;
        }
        self.group_size = group_size;
        self.reconcile_fields();
    }

    pub fn set_assign_leader(&mut self, assign_leader: bool) {
        self.assign_leader = assign_leader;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// The sizing value the partitioner is called with.
    pub fn sizing_value(&self) -> usize {
        match self.mode {
            SizingMode::ByGroupCount => self.group_count,
            SizingMode::ByGroupSize => self.group_size,
        }
    }

    /// `Ok(None)` when there is nobody to group.
    pub fn create_groups<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Option<GroupPartition>> {
        if self.participants.is_empty() {
            tracing::debug!("No participants; skipping partition");
            return Ok(None);
        }

        partition_with_rng(
            &self.participants,
            self.mode,
            self.sizing_value(),
            self.assign_leader,
            rng,
        )
        .map(Some)
    }

    pub fn history_entry(&self, groups: &GroupPartition) -> NewHistoryEntry {
        NewHistoryEntry {
            title: self.title.clone(),
            groups: groups.clone(),
            participant_count: self.participants.len(),
            mode: self.mode,
            group_count: match self.mode {
                SizingMode::ByGroupCount => self.group_count,
                SizingMode::ByGroupSize => groups.len(),
            },
            group_size: self.group_size,
            theme: self.theme,
        }
    }

    pub fn last_used(&self) -> LastUsedSettings {
        LastUsedSettings {
            mode: self.mode,
            group_count: self.group_count,
            group_size: self.group_size,
            assign_leader: self.assign_leader,
        }
    }

    fn reconcile_fields(&mut self) {
        match reconcile(
            self.participants.len(),
            self.mode,
            self.group_count,
            self.group_size,
        ) {
            Ok(sizing) => {
                self.group_count = sizing.group_count;
                self.group_size = sizing.group_size;
            }
            Err(e) => tracing::warn!("Keeping previous sizing: {}", e),
        }
    }
}
