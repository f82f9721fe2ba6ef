//! Filter, sort and paginate the calendar.
//!
//! Everything here is pure: a [`ViewState`] applied to the loaded rows yields a
//! [`Page`] of borrowed rows. Disabled instances never pass the filter.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDate;
use hito_core::calendar::effective_deadline_time;
use hito_core::entities::MilestoneTemplateId;
use hito_core::enums::{DisplayStatus, MilestoneKind};
use serde::Serialize;

use crate::row::CalendarRow;
use crate::text::{collate, contains_folded, fold};

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Conjunction of optional criteria. Empty sets mean "no restriction".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarFilter {
    /// Substring of the process or milestone name, accent and case insensitive.
    pub text: Option<String>,
    pub milestone_template_id: Option<MilestoneTemplateId>,
    /// Exact process name, accent and case insensitive.
    pub process_name: Option<String>,
    pub statuses: BTreeSet<DisplayStatus>,
    pub kinds: BTreeSet<MilestoneKind>,
    /// Inclusive lower bound on the deadline date.
    pub deadline_from: Option<NaiveDate>,
    /// Inclusive upper bound on the deadline date.
    pub deadline_to: Option<NaiveDate>,
}

impl CalendarFilter {
    #[must_use]
    pub fn matches(&self, row: &CalendarRow, today: NaiveDate) -> bool {
        let text = folded_query(self.text.as_deref());
        let process = self.process_name.as_deref().map(fold);
        self.matches_folded(row, today, &text, process.as_deref())
    }

    fn matches_folded(
        &self,
        row: &CalendarRow,
        today: NaiveDate,
        text: &str,
        process: Option<&str>,
    ) -> bool {
        let instance = &row.instance;
        if !instance.enabled {
            return false;
        }
        if !text.is_empty()
            && !contains_folded(&row.process_name, text)
            && !contains_folded(&row.milestone_name, text)
        {
            return false;
        }
        if self
            .milestone_template_id
            .is_some_and(|id| id != instance.milestone_template_id)
        {
            return false;
        }
        if process.is_some_and(|p| fold(&row.process_name) != p) {
            return false;
        }
        if !self.kinds.is_empty() && !self.kinds.contains(&instance.kind) {
            return false;
        }
        if self.deadline_from.is_some_and(|from| instance.deadline_date < from)
            || self.deadline_to.is_some_and(|to| instance.deadline_date > to)
        {
            return false;
        }
        self.statuses.is_empty() || self.statuses.contains(&row.display_status(today))
    }
}

/// Surrounding whitespace is ignored; a blank query matches everything.
fn folded_query(text: Option<&str>) -> String {
    text.map(|t| fold(t.trim())).unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Sort
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    ProcessName,
    MilestoneName,
    Status,
    DeadlineDate,
    DeadlineTime,
    StatusChangedAt,
    Kind,
}

impl SortKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ProcessName => "process_name",
            Self::MilestoneName => "milestone_name",
            Self::Status => "status",
            Self::DeadlineDate => "deadline_date",
            Self::DeadlineTime => "deadline_time",
            Self::StatusChangedAt => "status_changed_at",
            Self::Kind => "kind",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub const fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::ascending(SortKey::DeadlineDate)
    }
}

/// Total order over rows for `sort`. Ties end on the instance id.
#[must_use]
pub fn compare_rows(a: &CalendarRow, b: &CalendarRow, sort: SortSpec, today: NaiveDate) -> Ordering {
    let by_date = || a.instance.deadline_date.cmp(&b.instance.deadline_date);
    let by_time = || {
        effective_deadline_time(a.instance.deadline_time)
            .cmp(&effective_deadline_time(b.instance.deadline_time))
    };

    let ordering = match sort.key {
        SortKey::ProcessName => collate(&a.process_name, &b.process_name),
        SortKey::MilestoneName => collate(&a.milestone_name, &b.milestone_name),
        SortKey::Status => a.display_status(today).cmp(&b.display_status(today)),
        SortKey::DeadlineDate => by_date().then_with(by_time),
        SortKey::DeadlineTime => by_time().then_with(by_date),
        SortKey::StatusChangedAt => a
            .instance
            .status_changed_at
            .cmp(&b.instance.status_changed_at),
        SortKey::Kind => a.instance.kind.cmp(&b.instance.kind),
    }
    .then_with(|| a.id().cmp(&b.id()));

    match sort.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// Filter, sort and page position of one calendar view.
///
/// Any change to the filter or the sort sends the view back to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    filter: CalendarFilter,
    sort: SortSpec,
    page: usize,
    page_size: usize,
}

impl ViewState {
    /// A page size of zero is treated as one.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            filter: CalendarFilter::default(),
            sort: SortSpec::default(),
            page: 0,
            page_size: page_size.max(1),
        }
    }

    #[must_use]
    pub const fn filter(&self) -> &CalendarFilter {
        &self.filter
    }

    #[must_use]
    pub const fn sort(&self) -> SortSpec {
        self.sort
    }

    /// Requested page index, zero-based. [`ViewState::apply`] clamps it.
    #[must_use]
    pub const fn page(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_filter(&mut self, filter: CalendarFilter) {
        self.filter = filter;
        self.page = 0;
    }

    pub fn update_filter(&mut self, update: impl FnOnce(&mut CalendarFilter)) {
        update(&mut self.filter);
        self.page = 0;
    }

    /// Selecting the current key toggles its direction; a new key sorts ascending.
    pub fn sort_by(&mut self, key: SortKey) {
        self.sort = if self.sort.key == key {
            SortSpec {
                key,
                direction: self.sort.direction.toggled(),
            }
        } else {
            SortSpec::ascending(key)
        };
        self.page = 0;
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
        self.page = 0;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 0;
    }

    /// Filter and sort `rows`, then cut out the current page.
    #[must_use]
    pub fn apply<'a>(&self, rows: &'a [CalendarRow], today: NaiveDate) -> Page<'a> {
        let text = folded_query(self.filter.text.as_deref());
        let process = self.filter.process_name.as_deref().map(fold);

        let mut matching: Vec<&CalendarRow> = rows
            .iter()
            .filter(|row| {
                self.filter
                    .matches_folded(row, today, &text, process.as_deref())
            })
            .collect();
        matching.sort_by(|a, b| compare_rows(a, b, self.sort, today));

        let total = matching.len();
        let page_count = total.div_ceil(self.page_size).max(1);
        let page = self.page.min(page_count - 1);
        let items = matching
            .into_iter()
            .skip(page * self.page_size)
            .take(self.page_size)
            .collect();

        Page {
            items,
            total,
            page,
            page_count,
            page_size: self.page_size,
        }
    }
}

/// One slice of the filtered and sorted calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<'a> {
    pub items: Vec<&'a CalendarRow>,
    /// Rows matching the filter across all pages.
    pub total: usize,
    pub page: usize,
    /// At least one, even when nothing matches.
    pub page_count: usize,
    pub page_size: usize,
}

/// Number of enabled rows per display category.
#[must_use]
pub fn status_counts(rows: &[CalendarRow], today: NaiveDate) -> BTreeMap<DisplayStatus, usize> {
    let mut counts = BTreeMap::new();
    for row in rows.iter().filter(|r| r.instance.enabled) {
        *counts.entry(row.display_status(today)).or_insert(0) += 1;
    }
    counts
}
