use ratatui::widgets::ListState;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::parser::{FeedSnapshot, Match, MatchStatus};
use crate::preprocessing;
use crate::session::PlaybackSession;

/// Results delivered from background tasks into the draw loop.
#[derive(Debug, Clone)]
pub enum AsyncAction {
    /// Generation counter + the normalized snapshot
    FeedLoaded(u64, FeedSnapshot),
    FeedFailed(u64, String),
    PlayerStarted(String),
    PlayerFailed(String),
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Pane {
    Categories,
    Matches,
}

/// UI-level status filter on top of the actionable set.
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Live,
    Upcoming,
}

impl StatusFilter {
    pub fn next(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Live,
            StatusFilter::Live => StatusFilter::Upcoming,
            StatusFilter::Upcoming => StatusFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All Matches",
            StatusFilter::Live => "LIVE Now",
            StatusFilter::Upcoming => "Upcoming",
        }
    }

    pub fn admits(&self, status: &MatchStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Live => *status == MatchStatus::Live,
            StatusFilter::Upcoming => *status == MatchStatus::Upcoming,
        }
    }
}

pub struct App {
    pub config: AppConfig,
    pub show_help: bool,

    // Feed state
    pub loading: bool,
    pub loading_tick: u64,
    pub feed_error: Option<String>,
    /// Bumped per fetch; stale results are dropped on arrival
    pub fetch_generation: u64,
    pub snapshot: Option<FeedSnapshot>,

    // Derived views
    /// Actionable matches in display order (live-first, chronological)
    pub selected: Vec<Arc<Match>>,
    /// `selected` after the UI status/category filters
    pub visible: Vec<Arc<Match>>,
    pub categories: Vec<String>,

    // Filters + navigation
    pub status_filter: StatusFilter,
    pub active_pane: Pane,
    /// 0 = "All Categories", 1.. = categories[i - 1]
    pub selected_category_index: usize,
    pub category_list_state: ListState,
    pub selected_match_index: usize,
    pub match_list_state: ListState,

    // Playback
    pub session: PlaybackSession,
    pub player_available: bool,
    pub player_error: Option<String>,
    pub now_playing: Option<String>,
}

impl App {
    pub fn new(config: AppConfig, player_available: bool) -> Self {
        let mut category_list_state = ListState::default();
        category_list_state.select(Some(0));
        Self {
            config,
            show_help: false,
            loading: false,
            loading_tick: 0,
            feed_error: None,
            fetch_generation: 0,
            snapshot: None,
            selected: Vec::new(),
            visible: Vec::new(),
            categories: Vec::new(),
            status_filter: StatusFilter::default(),
            active_pane: Pane::Matches,
            selected_category_index: 0,
            category_list_state,
            selected_match_index: 0,
            match_list_state: ListState::default(),
            session: PlaybackSession::new(),
            player_available,
            player_error: None,
            now_playing: None,
        }
    }

    /// Installs a fresh snapshot, replacing the previous one wholesale, and
    /// recomputes every derived view.
    pub fn apply_snapshot(&mut self, snapshot: FeedSnapshot) {
        self.selected = preprocessing::select_matches(&snapshot.matches);
        self.categories =
            preprocessing::category_facet(&snapshot.matches, self.config.category_scope);
        self.snapshot = Some(snapshot);
        self.feed_error = None;
        self.rebuild_view();
    }

    /// Recomputes the visible list from the current filters and clamps the
    /// cursor. Pure function of `selected` + filter state.
    pub fn rebuild_view(&mut self) {
        let category = self.active_category().map(str::to_string);
        self.visible = self
            .selected
            .iter()
            .filter(|m| self.status_filter.admits(&m.status))
            .filter(|m| match &category {
                Some(c) => m.category.as_deref() == Some(c.as_str()),
                None => true,
            })
            .cloned()
            .collect();

        if self.selected_match_index >= self.visible.len() {
            self.selected_match_index = self.visible.len().saturating_sub(1);
        }
        if self.visible.is_empty() {
            self.match_list_state.select(None);
        } else {
            self.match_list_state.select(Some(self.selected_match_index));
        }

        // Category cursor can dangle after a refresh shrinks the facet
        if self.selected_category_index > self.categories.len() {
            self.selected_category_index = 0;
        }
        self.category_list_state
            .select(Some(self.selected_category_index));
    }

    /// Active category filter; `None` means "All Categories".
    pub fn active_category(&self) -> Option<&str> {
        if self.selected_category_index == 0 {
            None
        } else {
            self.categories
                .get(self.selected_category_index - 1)
                .map(String::as_str)
        }
    }

    pub fn selected_match(&self) -> Option<&Arc<Match>> {
        self.visible.get(self.selected_match_index)
    }

    pub fn cycle_status_filter(&mut self) {
        self.status_filter = self.status_filter.next();
        self.rebuild_view();
    }

    pub fn next_match(&mut self) {
        if !self.visible.is_empty() {
            self.selected_match_index =
                (self.selected_match_index + 1).min(self.visible.len() - 1);
            self.match_list_state.select(Some(self.selected_match_index));
        }
    }

    pub fn previous_match(&mut self) {
        self.selected_match_index = self.selected_match_index.saturating_sub(1);
        if !self.visible.is_empty() {
            self.match_list_state.select(Some(self.selected_match_index));
        }
    }

    pub fn next_category(&mut self) {
        // Index space includes the synthetic "All Categories" entry at 0
        if self.selected_category_index < self.categories.len() {
            self.selected_category_index += 1;
            self.category_list_state
                .select(Some(self.selected_category_index));
            self.rebuild_view();
        }
    }

    pub fn previous_category(&mut self) {
        if self.selected_category_index > 0 {
            self.selected_category_index -= 1;
            self.category_list_state
                .select(Some(self.selected_category_index));
            self.rebuild_view();
        }
    }
}
