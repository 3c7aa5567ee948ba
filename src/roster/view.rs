//! # View Pipeline
//!
//! The pure computation that turns the full fetched record set plus the
//! current [`ViewState`] into the page of users actually on screen.
//!
//! The pipeline runs in three steps, in order:
//!
//! 1. **Filter**: free-text search over name/username/email/company AND'd
//!    with the per-field criteria. All constraints are case-insensitive
//!    substring matches, and all active constraints must hold.
//! 2. **Sort**: stable sort by the selected field's string value,
//!    case-folded; descending reverses the comparison.
//! 3. **Paginate**: slice out the requested 1-based page, clamped to the
//!    available records.
//!
//! `build_view` never mutates its input and never suspends; it is safe to
//! recompute on every records/state change.
//!
//! [`ViewState`] keeps its fields private so the page-reset rule cannot be
//! bypassed: changing the search term, the filters, or the page size always
//! snaps back to page 1. A stale page number must never be applied to a
//! changed result set. Changing the sort does not touch the page.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::model::UserRecord;

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Field the visible list is sorted by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    Name,
    Username,
    Email,
    Company,
}

impl SortField {
    /// The string sort key this field selects from a record. A missing
    /// company name is the empty string.
    fn key<'a>(&self, user: &'a UserRecord) -> &'a str {
        match self {
            SortField::Name => &user.name,
            SortField::Username => &user.username,
            SortField::Email => &user.email,
            SortField::Company => &user.company.name,
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "username" => Ok(SortField::Username),
            "email" => Ok(SortField::Email),
            "company" => Ok(SortField::Company),
            other => Err(format!(
                "Unknown sort field '{}' (expected name, username, email or company)",
                other
            )),
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortField::Name => write!(f, "name"),
            SortField::Username => write!(f, "username"),
            SortField::Email => write!(f, "email"),
            SortField::Company => write!(f, "company"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// Per-field substring filters. A `None`, empty, or whitespace-only entry
/// imposes no constraint on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
}

impl FilterCriteria {
    fn active(value: &Option<String>) -> Option<&str> {
        value.as_deref().filter(|v| !v.trim().is_empty())
    }

    pub fn is_empty(&self) -> bool {
        Self::active(&self.name).is_none()
            && Self::active(&self.username).is_none()
            && Self::active(&self.email).is_none()
            && Self::active(&self.company).is_none()
    }

    /// True iff every active criterion is a case-insensitive substring of
    /// the corresponding record field.
    pub fn matches(&self, user: &UserRecord) -> bool {
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };

        Self::active(&self.name).map_or(true, |v| contains(&user.name, v))
            && Self::active(&self.username).map_or(true, |v| contains(&user.username, v))
            && Self::active(&self.email).map_or(true, |v| contains(&user.email, v))
            && Self::active(&self.company).map_or(true, |v| contains(&user.company.name, v))
    }
}

/// Ephemeral search/filter/sort/page selection for the user list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    search: String,
    filters: FilterCriteria,
    sort_field: SortField,
    sort_order: SortOrder,
    page: usize,
    page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search: String::new(),
            filters: FilterCriteria::default(),
            sort_field: SortField::default(),
            sort_order: SortOrder::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn sort_field(&self) -> SortField {
        self.sort_field
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Replace the free-text search term. Resets to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
        self.page = 1;
    }

    /// Replace the per-field filters. Resets to page 1.
    pub fn set_filters(&mut self, filters: FilterCriteria) {
        self.filters = filters;
        self.page = 1;
    }

    /// Select a sort field directly. Does not touch the page.
    pub fn set_sort(&mut self, field: SortField, order: SortOrder) {
        self.sort_field = field;
        self.sort_order = order;
    }

    /// Header-click behavior: selecting the current field flips the order,
    /// a new field starts ascending. Does not touch the page.
    pub fn toggle_sort(&mut self, field: SortField) {
        if self.sort_field == field {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_field = field;
            self.sort_order = SortOrder::Ascending;
        }
    }

    /// Request a page (1-based). Not clamped against the result set; an
    /// out-of-range page simply renders empty.
    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Change how many users are shown per page. Resets to page 1.
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.page = 1;
    }
}

/// One derived page of the user list plus its pagination metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewPage {
    pub records: Vec<UserRecord>,
    pub total_matching: usize,
    pub total_pages: usize,
}

fn matches_search(user: &UserRecord, term: &str) -> bool {
    if term.trim().is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    user.name.to_lowercase().contains(&term)
        || user.username.to_lowercase().contains(&term)
        || user.email.to_lowercase().contains(&term)
        || user.company.name.to_lowercase().contains(&term)
}

fn compare_by(a: &UserRecord, b: &UserRecord, field: SortField) -> Ordering {
    field.key(a).to_lowercase().cmp(&field.key(b).to_lowercase())
}

/// Derive the visible page from the full record set and the current state.
pub fn build_view(records: &[UserRecord], state: &ViewState) -> ViewPage {
    let mut filtered: Vec<&UserRecord> = records
        .iter()
        .filter(|u| matches_search(u, &state.search) && state.filters.matches(u))
        .collect();

    // Vec::sort_by is stable: equal keys keep their filtered order
    filtered.sort_by(|a, b| {
        let ord = compare_by(a, b, state.sort_field);
        match state.sort_order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });

    let total_matching = filtered.len();
    let total_pages = total_matching.div_ceil(state.page_size);
    let start = (state.page - 1) * state.page_size;

    let records = filtered
        .into_iter()
        .skip(start)
        .take(state.page_size)
        .cloned()
        .collect();

    ViewPage {
        records,
        total_matching,
        total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, name: &str, username: &str, email: &str, company: &str) -> UserRecord {
        let mut u = UserRecord {
            id,
            name: name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            phone: String::new(),
            website: String::new(),
            address: Default::default(),
            company: Default::default(),
        };
        u.company.name = company.to_string();
        u
    }

    fn sample() -> Vec<UserRecord> {
        vec![
            user(1, "Alice", "alice1", "alice@corp.com", "Initech"),
            user(2, "Bob", "bobby", "bob@corp.com", "Globex"),
            user(3, "Alicia", "ali", "alicia@other.org", "Initech"),
        ]
    }

    fn names(page: &ViewPage) -> Vec<&str> {
        page.records.iter().map(|u| u.name.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let mut state = ViewState::new();
        state.set_search("ali");

        let page = build_view(&sample(), &state);
        assert_eq!(names(&page), vec!["Alice", "Alicia"]);
        assert_eq!(page.total_matching, 2);
    }

    #[test]
    fn search_covers_username_email_and_company() {
        let records = sample();
        let mut state = ViewState::new();

        state.set_search("BOBBY");
        assert_eq!(names(&build_view(&records, &state)), vec!["Bob"]);

        state.set_search("other.org");
        assert_eq!(names(&build_view(&records, &state)), vec!["Alicia"]);

        state.set_search("globex");
        assert_eq!(names(&build_view(&records, &state)), vec!["Bob"]);
    }

    #[test]
    fn filters_and_search_are_conjunctive() {
        let records = sample();
        let mut state = ViewState::new();

        // Filter alone matches both Initech users
        state.set_filters(FilterCriteria {
            company: Some("initech".into()),
            ..Default::default()
        });
        assert_eq!(names(&build_view(&records, &state)), vec!["Alice", "Alicia"]);

        // Search narrows it further; both constraints must hold
        state.set_search("alicia");
        assert_eq!(names(&build_view(&records, &state)), vec!["Alicia"]);

        // A search that matches nothing in the filtered set yields nothing,
        // even though it matches an unfiltered record
        state.set_search("bob");
        assert_eq!(build_view(&records, &state).total_matching, 0);
    }

    #[test]
    fn every_active_filter_field_must_hold() {
        let records = sample();
        let mut state = ViewState::new();
        state.set_filters(FilterCriteria {
            name: Some("ali".into()),
            username: Some("alice".into()),
            ..Default::default()
        });

        // Alicia matches name but not username
        assert_eq!(names(&build_view(&records, &state)), vec!["Alice"]);
    }

    #[test]
    fn blank_filter_values_impose_no_constraint() {
        let records = sample();
        let mut state = ViewState::new();
        state.set_filters(FilterCriteria {
            name: Some("   ".into()),
            email: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(build_view(&records, &state).total_matching, 3);
    }

    #[test]
    fn sorts_by_each_field_case_folded() {
        let records = vec![
            user(1, "bob", "zed", "z@z.z", "beta"),
            user(2, "Alice", "Ann", "a@a.a", "Alpha"),
        ];
        let mut state = ViewState::new();

        state.set_sort(SortField::Name, SortOrder::Ascending);
        assert_eq!(names(&build_view(&records, &state)), vec!["Alice", "bob"]);

        state.set_sort(SortField::Username, SortOrder::Ascending);
        assert_eq!(names(&build_view(&records, &state)), vec!["Alice", "bob"]);

        state.set_sort(SortField::Email, SortOrder::Descending);
        assert_eq!(names(&build_view(&records, &state)), vec!["bob", "Alice"]);

        state.set_sort(SortField::Company, SortOrder::Ascending);
        assert_eq!(names(&build_view(&records, &state)), vec!["Alice", "bob"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        // Three Initech users in fetch order 5, 9, 2; company sort must not
        // reorder them relative to each other.
        let records = vec![
            user(5, "Eve", "eve", "e@x.co", "Initech"),
            user(9, "Mallory", "mal", "m@x.co", "Initech"),
            user(2, "Trent", "trent", "t@x.co", "Initech"),
        ];
        let mut state = ViewState::new();
        state.set_sort(SortField::Company, SortOrder::Ascending);

        let ids: Vec<i64> = build_view(&records, &state)
            .records
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![5, 9, 2]);

        // Stability holds in descending order too
        state.set_sort(SortField::Company, SortOrder::Descending);
        let ids: Vec<i64> = build_view(&records, &state)
            .records
            .iter()
            .map(|u| u.id)
            .collect();
        assert_eq!(ids, vec![5, 9, 2]);
    }

    #[test]
    fn toggling_order_reverses_distinct_keys() {
        let records = sample();
        let mut state = ViewState::new();
        state.set_page_size(100);
        state.set_sort(SortField::Name, SortOrder::Ascending);
        let ascending_view = build_view(&records, &state);
        let ascending = names(&ascending_view);

        state.set_sort(SortField::Name, SortOrder::Descending);
        let descending_view = build_view(&records, &state);
        let mut descending = names(&descending_view);
        descending.reverse();

        assert_eq!(ascending, descending);
    }

    #[test]
    fn missing_company_sorts_as_empty_string() {
        let records = vec![
            user(1, "Zoe", "z", "z@z.z", "Acme"),
            user(2, "Amy", "a", "a@a.a", ""),
        ];
        let mut state = ViewState::new();
        state.set_sort(SortField::Company, SortOrder::Ascending);

        assert_eq!(names(&build_view(&records, &state)), vec!["Amy", "Zoe"]);
    }

    #[test]
    fn pagination_slices_and_counts() {
        let records: Vec<UserRecord> = (1..=25)
            .map(|i| user(i, &format!("User {:02}", i), "u", "u@u.co", ""))
            .collect();
        let mut state = ViewState::new();
        state.set_page_size(10);

        let page1 = build_view(&records, &state);
        assert_eq!(page1.total_matching, 25);
        assert_eq!(page1.total_pages, 3);
        assert_eq!(page1.records.len(), 10);

        state.set_page(3);
        let page3 = build_view(&records, &state);
        assert_eq!(page3.records.len(), 5);
        assert_eq!(page3.records[0].name, "User 21");
    }

    #[test]
    fn out_of_range_page_is_empty_not_clamped() {
        let records = sample();
        let mut state = ViewState::new();
        state.set_page(7);

        let page = build_view(&records, &state);
        assert!(page.records.is_empty());
        assert_eq!(page.total_matching, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn empty_result_has_zero_pages() {
        let mut state = ViewState::new();
        state.set_search("no such user");

        let page = build_view(&sample(), &state);
        assert_eq!(page.total_matching, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.records.is_empty());
    }

    #[test]
    fn search_filter_and_page_size_reset_the_page() {
        let mut state = ViewState::new();

        state.set_page(4);
        state.set_search("x");
        assert_eq!(state.page(), 1);

        state.set_page(4);
        state.set_filters(FilterCriteria::default());
        assert_eq!(state.page(), 1);

        state.set_page(4);
        state.set_page_size(25);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn sorting_does_not_reset_the_page() {
        let mut state = ViewState::new();
        state.set_page(3);
        state.toggle_sort(SortField::Email);
        assert_eq!(state.page(), 3);
    }

    #[test]
    fn toggle_sort_flips_order_on_same_field() {
        let mut state = ViewState::new();
        assert_eq!(state.sort_field(), SortField::Name);
        assert_eq!(state.sort_order(), SortOrder::Ascending);

        state.toggle_sort(SortField::Name);
        assert_eq!(state.sort_order(), SortOrder::Descending);

        state.toggle_sort(SortField::Company);
        assert_eq!(state.sort_field(), SortField::Company);
        assert_eq!(state.sort_order(), SortOrder::Ascending);
    }

    #[test]
    fn sort_field_parses_from_cli_names() {
        assert_eq!("name".parse::<SortField>().unwrap(), SortField::Name);
        assert_eq!("company".parse::<SortField>().unwrap(), SortField::Company);
        assert!("created".parse::<SortField>().is_err());

        // Display round-trips through FromStr
        assert_eq!(
            SortField::Username.to_string().parse::<SortField>().unwrap(),
            SortField::Username
        );
    }

    #[test]
    fn criteria_with_only_blank_values_count_as_empty() {
        assert!(FilterCriteria::default().is_empty());
        assert!(FilterCriteria {
            name: Some("  ".into()),
            ..Default::default()
        }
        .is_empty());
        assert!(!FilterCriteria {
            company: Some("acme".into()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn build_view_leaves_the_source_untouched() {
        let records = sample();
        let before = records.clone();
        let mut state = ViewState::new();
        state.set_sort(SortField::Name, SortOrder::Descending);
        let _ = build_view(&records, &state);
        assert_eq!(records, before);
    }
}
