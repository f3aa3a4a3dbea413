use crate::error::SearchError;
use crate::models::{build_cards, FlightCard, SearchResponse};
use crate::search::{SearchCriteria, SearchQuery};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, info, warn};

pub const LOADING_MESSAGE: &str = "Searching for flights...";
pub const EMPTY_MESSAGE: &str = "No flights found for this route.";
pub const FAILURE_MESSAGE: &str = "Something went wrong while fetching flights. Please try again.";
pub const IDLE_MESSAGE: &str = "Fill in the form and press Enter to search.";

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Field {
    #[default]
    Origin,
    Destination,
    DepartureDate,
    ReturnDate,
    RoundTrip,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Origin,
        Field::Destination,
        Field::DepartureDate,
        Field::ReturnDate,
        Field::RoundTrip,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Origin => "Origin",
            Field::Destination => "Destination",
            Field::DepartureDate => "Departure",
            Field::ReturnDate => "Return",
            Field::RoundTrip => "Round trip",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// What the results pane currently shows. Each state replaces the previous one entirely.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ResultsView {
    #[default]
    Idle,
    Loading,
    Invalid(String),
    Empty,
    Failed,
    Cards(Vec<FlightCard>),
}

impl ResultsView {
    /// Status line for every state except a list of cards.
    pub fn message(&self) -> Option<&str> {
        match self {
            ResultsView::Idle => Some(IDLE_MESSAGE),
            ResultsView::Loading => Some(LOADING_MESSAGE),
            ResultsView::Invalid(msg) => Some(msg.as_str()),
            ResultsView::Empty => Some(EMPTY_MESSAGE),
            ResultsView::Failed => Some(FAILURE_MESSAGE),
            ResultsView::Cards(_) => None,
        }
    }
}

/// A validated search tagged with the sequence number it must answer to.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub id: u64,
    pub query: SearchQuery,
}

#[derive(Debug, Default)]
pub struct App {
    pub form: SearchCriteria,
    pub focus: Field,
    pub results: ResultsView,
    pub scroll: usize,
    pub should_quit: bool,
    pub tick_count: usize,

    // Only the completion carrying this id may touch `results`.
    latest_request: u64,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    pub fn latest_request(&self) -> u64 {
        self.latest_request
    }

    /// Validates the form. On success the pane switches to loading and the
    /// caller is handed a request to send; on failure nothing is sent.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        self.scroll = 0;
        // Every submission supersedes whatever is still in flight, even a rejected one.
        self.latest_request += 1;
        match self.form.validate() {
            Ok(query) => {
                self.results = ResultsView::Loading;
                info!(
                    "Submitting search #{}: {} -> {}",
                    self.latest_request, query.origin, query.destination
                );
                Some(SearchRequest {
                    id: self.latest_request,
                    query,
                })
            }
            Err(e) => {
                debug!("Form rejected: {}", e);
                self.results = ResultsView::Invalid(e.to_string());
                None
            }
        }
    }

    pub fn on_search_complete(&mut self, request_id: u64, outcome: Result<SearchResponse, SearchError>) {
        if request_id != self.latest_request {
            debug!(
                "Dropping stale search #{} (latest is #{})",
                request_id, self.latest_request
            );
            return;
        }

        self.scroll = 0;
        self.results = match outcome {
            Ok(response) => {
                let cards = build_cards(&response);
                if cards.is_empty() {
                    ResultsView::Empty
                } else {
                    ResultsView::Cards(cards)
                }
            }
            Err(e) => {
                warn!("Search #{} failed: {}", request_id, e);
                ResultsView::Failed
            }
        };
    }

    /// Handles a key press. Returns a request when the key submitted the form.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<SearchRequest> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => return self.submit(),
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),
            KeyCode::PageDown => self.scroll_down(),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::Char(' ') if self.focus == Field::RoundTrip => {
                self.form.round_trip = !self.form.round_trip;
            }
            KeyCode::Char(c) => {
                if let Some(text) = self.focused_text_mut() {
                    text.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(text) = self.focused_text_mut() {
                    text.pop();
                }
            }
            _ => {}
        }
        None
    }

    pub fn field_value(&self, field: Field) -> &str {
        match field {
            Field::Origin => &self.form.origin,
            Field::Destination => &self.form.destination,
            Field::DepartureDate => &self.form.departure_date,
            Field::ReturnDate => &self.form.return_date,
            Field::RoundTrip => "",
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Field::Origin => Some(&mut self.form.origin),
            Field::Destination => Some(&mut self.form.destination),
            Field::DepartureDate => Some(&mut self.form.departure_date),
            Field::ReturnDate => Some(&mut self.form.return_date),
            Field::RoundTrip => None,
        }
    }

    fn scroll_down(&mut self) {
        if let ResultsView::Cards(cards) = &self.results {
            if self.scroll + 1 < cards.len() {
                self.scroll += 1;
            }
        }
    }
}
