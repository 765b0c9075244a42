use crate::airlines::AirlineDirectory;
use crate::config::Config;
use crate::coords::{parse_query, GeoPoint};
use crate::errors::FetchError;
use crate::location::prefill_text;
use crate::report::{Report, ReportFormatter};
use crate::search::SearchOutcome;
use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{error, info};

/// Work the main loop has to start on behalf of the app.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Search(GeoPoint),
    Locate,
}

/// One-line status shown under the input field.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Idle,
    Busy(String),
    Info(String),
    Error(String),
}

pub struct App {
    pub config: Config,
    pub airlines: AirlineDirectory,
    pub input: String,
    pub status: Status,
    pub tick_count: usize,
    pub should_quit: bool,

    // Last finished search
    pub origin: Option<GeoPoint>,
    pub nearest: Option<Report>,
    pub alerts: Vec<Report>,
    pub last_update: Option<DateTime<Local>>,

    formatter: ReportFormatter,
    in_flight: bool,
}

impl App {
    pub fn new(config: Config, airlines: AirlineDirectory) -> Self {
        Self {
            config,
            airlines,
            input: String::new(),
            status: Status::Idle,
            tick_count: 0,
            should_quit: false,
            origin: None,
            nearest: None,
            alerts: Vec::new(),
            last_update: None,
            formatter: ReportFormatter::new(),
            in_flight: false,
        }
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight
    }

    pub fn on_tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    pub fn begin_locate(&mut self) -> Action {
        self.status = Status::Busy("Locating via IP geolocation...".to_string());
        Action::Locate
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('l') if ctrl => return Some(self.begin_locate()),
            KeyCode::Enter => return self.submit(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            _ => {}
        }
        None
    }

    /// Parses the input field and starts a search, unless one is still running.
    fn submit(&mut self) -> Option<Action> {
        if self.in_flight {
            self.status = Status::Info("A search is already running, please wait.".to_string());
            return None;
        }

        match parse_query(&self.input, self.config.parsing.sign_policy) {
            Ok(origin) => {
                info!("Starting search around {}", origin);
                self.in_flight = true;
                self.status = Status::Busy(format!("Searching around {}", origin));
                Some(Action::Search(origin))
            }
            Err(e) => {
                self.status = Status::Error(format!("{}. Please re-enter the coordinates.", e));
                None
            }
        }
    }

    pub fn on_search_finished(
        &mut self,
        origin: GeoPoint,
        result: Result<SearchOutcome, FetchError>,
        finished_at: DateTime<Local>,
    ) {
        self.in_flight = false;

        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Search around {} failed: {}", origin, e);
                self.status = Status::Error(format!("Search failed: {}", e));
                return;
            }
        };

        self.origin = Some(origin);
        self.last_update = Some(finished_at);
        self.alerts = outcome
            .alerts()
            .iter()
            .map(|alert| self.formatter.format_alert(alert))
            .collect();

        match &outcome {
            SearchOutcome::Found {
                nearest,
                aircraft_count,
                radius_deg,
                attempts,
                ..
            } => {
                self.nearest = Some(self.formatter.format_nearest(nearest, &self.airlines));
                self.status = Status::Info(format!(
                    "Nearest of {} aircraft within {}° ({} attempt(s))",
                    aircraft_count, radius_deg, attempts
                ));
            }
            SearchOutcome::NoEligibleAircraft { aircraft_count, .. } => {
                self.nearest = None;
                self.status = Status::Error(format!(
                    "{} aircraft found, but none reported a position",
                    aircraft_count
                ));
            }
            SearchOutcome::Exhausted {
                attempts,
                last_radius_deg,
            } => {
                self.nearest = None;
                self.status = Status::Error(format!(
                    "No aircraft found within {}° after {} attempt(s)",
                    last_radius_deg, attempts
                ));
            }
        }
    }

    pub fn on_located(&mut self, point: Option<GeoPoint>) {
        match point {
            Some(p) => {
                self.input = prefill_text(p);
                self.status = Status::Info("Location filled in, press Enter to search.".to_string());
            }
            None => {
                self.status = Status::Error("Could not determine your location.".to_string());
            }
        }
    }
}
