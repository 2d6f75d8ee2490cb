//! Headless commander autocomplete.
//!
//! [`Autocomplete::update`] consumes an [`Event`] and returns the [`Action`]
//! the host must perform (sleep for a debounce, run a lookup, fetch
//! thumbnails, or deliver a committed selection). All state changes happen on
//! the caller's thread; async work only ever re-enters through new events.

pub mod debounce;
pub mod navigation;
pub mod pointer;
pub mod requests;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use iced::widget::image;
use iced::Point;

use crate::config::Config;
use crate::search::{Candidate, LookupError};
use debounce::{Debouncer, TimerHandle};
use navigation::SelectionIndex;
use pointer::{Hit, ListenerId, PointerHub};
use requests::{RequestId, RequestSequence};

#[derive(Debug, Clone)]
pub struct Settings {
    pub placeholder: String,
    pub debounce: Duration,
    pub min_query_len: usize,
    pub max_results: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            placeholder: config.input.placeholder.clone(),
            debounce: config.search.debounce(),
            min_query_len: config.search.min_query_len,
            max_results: config.search.max_results,
        }
    }
}

/// Navigation keys understood by the suggestion list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Escape,
}

#[derive(Debug, Clone)]
pub enum Event {
    InputChanged(String),
    DebounceElapsed(TimerHandle),
    LookupFinished {
        request: RequestId,
        result: Result<Vec<Candidate>, Arc<LookupError>>,
    },
    ThumbnailLoaded {
        request: RequestId,
        card_id: String,
        image: image::Handle,
    },
    Key(NavKey),
    /// Mouse activation of the row at this index
    CandidatePressed(usize),
    PointerPressed(Hit),
    /// External reset from the host
    Clear,
}

/// A lookup the host must run and report back via [`Event::LookupFinished`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub id: RequestId,
    pub query: String,
}

/// What the host receives on commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    /// Concatenated color symbols, empty for colorless
    pub color_identity: String,
}

#[derive(Debug)]
pub enum Action {
    None,
    /// Sleep for the handle's delay, then send [`Event::DebounceElapsed`]
    Schedule(TimerHandle),
    Lookup(LookupRequest),
    /// Fetch `(card_id, url)` pairs, then send [`Event::ThumbnailLoaded`] for each
    LoadThumbnails {
        request: RequestId,
        thumbnails: Vec<(String, String)>,
    },
    Committed(Selection),
}

/// What the dropdown area should render
#[derive(Debug, PartialEq)]
pub enum Dropdown<'a> {
    Hidden,
    Suggestions {
        candidates: &'a [Candidate],
        selected: Option<usize>,
    },
    NoResults,
}

#[derive(Debug)]
pub struct Autocomplete {
    settings: Settings,
    query: String,
    candidates: Vec<Candidate>,
    /// Lookup that produced `candidates`
    candidates_from: Option<RequestId>,
    thumbnails: HashMap<String, image::Handle>,
    selection: SelectionIndex,
    open: bool,
    debouncer: Debouncer,
    requests: RequestSequence,
    pointer: Option<pointer::PointerGuard>,
    disposed: bool,
}

impl Autocomplete {
    pub fn new(settings: Settings) -> Self {
        let debouncer = Debouncer::new(settings.debounce);
        Self {
            settings,
            query: String::new(),
            candidates: Vec::new(),
            candidates_from: None,
            thumbnails: HashMap::new(),
            selection: SelectionIndex::default(),
            open: false,
            debouncer,
            requests: RequestSequence::new(),
            pointer: None,
            disposed: false,
        }
    }

    /// Register this component's bounds with the host pointer source.
    /// Replaces any earlier registration.
    pub fn attach_pointer(&mut self, hub: &PointerHub, hit_test: impl Fn(Point) -> bool + 'static) {
        self.pointer = Some(hub.register(hit_test));
    }

    pub fn pointer_id(&self) -> Option<ListenerId> {
        self.pointer.as_ref().map(|guard| guard.id())
    }

    pub fn update(&mut self, event: Event) -> Action {
        if self.disposed {
            return Action::None;
        }

        match event {
            Event::InputChanged(value) => {
                self.query = value;
                Action::Schedule(self.debouncer.schedule())
            }
            Event::DebounceElapsed(handle) => {
                if !self.debouncer.fire(handle) {
                    return Action::None;
                }
                self.start_lookup()
            }
            Event::LookupFinished { request, result } => self.finish_lookup(request, result),
            Event::ThumbnailLoaded {
                request,
                card_id,
                image,
            } => {
                let belongs = self.candidates_from == Some(request)
                    && self.candidates.iter().any(|c| c.id == card_id);
                if belongs {
                    self.thumbnails.insert(card_id, image);
                }
                Action::None
            }
            Event::Key(key) => self.navigate(key),
            Event::CandidatePressed(index) => {
                if self.open && index < self.candidates.len() {
                    self.commit(index)
                } else {
                    Action::None
                }
            }
            Event::PointerPressed(Hit::Outside) => {
                self.dismiss();
                Action::None
            }
            Event::PointerPressed(Hit::Inside) => {
                if !self.open && self.query_qualifies() {
                    self.open = true;
                }
                Action::None
            }
            Event::Clear => {
                self.query.clear();
                self.debouncer.cancel_pending();
                self.requests.invalidate();
                self.clear_candidates();
                self.dismiss();
                Action::None
            }
        }
    }

    /// Tear down: cancel the timer, orphan in-flight lookups and release the
    /// pointer registration. Every later event is ignored.
    pub fn dispose(&mut self) {
        self.debouncer.cancel_pending();
        self.requests.invalidate();
        self.pointer = None;
        self.disposed = true;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn placeholder(&self) -> &str {
        &self.settings.placeholder
    }

    pub fn is_loading(&self) -> bool {
        self.requests.in_flight()
    }

    pub fn timer_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn selected(&self) -> Option<usize> {
        self.selection.get()
    }

    pub fn thumbnail(&self, card_id: &str) -> Option<&image::Handle> {
        self.thumbnails.get(card_id)
    }

    pub fn dropdown(&self) -> Dropdown<'_> {
        if !self.open {
            Dropdown::Hidden
        } else if !self.candidates.is_empty() {
            Dropdown::Suggestions {
                candidates: &self.candidates,
                selected: self.selection.get(),
            }
        } else if !self.is_loading() && self.query_qualifies() {
            Dropdown::NoResults
        } else {
            Dropdown::Hidden
        }
    }

    // ---- Lookup lifecycle ----

    fn start_lookup(&mut self) -> Action {
        if !self.query_qualifies() {
            // Too short: never touches the network, and anything still in
            // flight must not repopulate the list.
            self.requests.invalidate();
            self.clear_candidates();
            self.open = false;
            return Action::None;
        }

        let query = self.query.trim().to_string();
        let id = self.requests.issue();
        tracing::debug!("Lookup issued: id={:?}, query='{}'", id, query);
        Action::Lookup(LookupRequest { id, query })
    }

    fn finish_lookup(
        &mut self,
        request: RequestId,
        result: Result<Vec<Candidate>, Arc<LookupError>>,
    ) -> Action {
        if !self.requests.complete(request) {
            tracing::debug!("Dropping stale lookup response: id={:?}", request);
            return Action::None;
        }

        match result {
            Ok(mut candidates) => {
                candidates.truncate(self.settings.max_results);
                tracing::debug!("Lookup {:?} applied: {} candidates", request, candidates.len());

                let thumbnails: Vec<(String, String)> = candidates
                    .iter()
                    .filter_map(|c| Some((c.id.clone(), c.thumbnail_uri()?.to_string())))
                    .collect();

                self.candidates = candidates;
                self.candidates_from = Some(request);
                self.thumbnails.clear();
                self.selection.reset();
                self.open = true;

                if thumbnails.is_empty() {
                    Action::None
                } else {
                    Action::LoadThumbnails {
                        request,
                        thumbnails,
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Commander lookup failed: {}", e);
                self.clear_candidates();
                self.open = false;
                Action::None
            }
        }
    }

    // ---- Selection ----

    fn navigate(&mut self, key: NavKey) -> Action {
        if !self.open || self.candidates.is_empty() {
            return Action::None;
        }

        match key {
            NavKey::Down => {
                self.selection.down(self.candidates.len());
                Action::None
            }
            NavKey::Up => {
                self.selection.up();
                Action::None
            }
            NavKey::Enter => match self.selection.get() {
                Some(index) => self.commit(index),
                None => Action::None,
            },
            NavKey::Escape => {
                self.dismiss();
                Action::None
            }
        }
    }

    fn commit(&mut self, index: usize) -> Action {
        let Some(candidate) = self.candidates.get(index) else {
            return Action::None;
        };
        let selection = Selection {
            name: candidate.name.clone(),
            color_identity: candidate.color_identity.to_string(),
        };

        self.query = selection.name.clone();
        self.debouncer.cancel_pending();
        self.requests.invalidate();
        self.dismiss();

        tracing::debug!(
            "Committed '{}' ({})",
            selection.name,
            selection.color_identity
        );
        Action::Committed(selection)
    }

    fn dismiss(&mut self) {
        self.open = false;
        self.selection.reset();
    }

    fn clear_candidates(&mut self) {
        self.candidates.clear();
        self.candidates_from = None;
        self.thumbnails.clear();
        self.selection.reset();
    }

    fn query_qualifies(&self) -> bool {
        self.query.trim().chars().count() >= self.settings.min_query_len
    }
}
