// src/services/guide.rs
//! Per-session guide state: which guide is mounted, its transcript, the
//! highlighted catalog ids and the in-flight completion flag.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Instant,
};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{
    catalog::{self, DISHES, Dish, EVENTS, Event, LANDMARKS, Landmark, RESTAURANTS, Restaurant},
    classifier::{FoodIntent, TourRoute, classify_food, route_tour},
    composer::Composed,
    lookup::{Selection, landmark_selection, restaurant_selection},
    transcript::{Transcript, TranscriptEntry},
};
use crate::error::AppError;

pub const TOUR_GREETING: &str =
    "¡Hola! Ask me anything about Barcelona or get a custom walking tour.";
pub const FOOD_GREETING: &str = "¡Hola! I can help you discover Barcelona's amazing food. Ask me about restaurants, local dishes, or specific cuisines!";
pub const LOADING_PLACEHOLDER: &str = "Loading suggested landmarks...";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuideMode {
    #[default]
    Tour,
    Food,
}

impl GuideMode {
    pub fn greeting(self) -> &'static str {
        match self {
            GuideMode::Tour => TOUR_GREETING,
            GuideMode::Food => FOOD_GREETING,
        }
    }
}

/// Holds the loading flag up while a completion call is outstanding.
/// Dropping it clears the flag, whichever way the call ends.
#[derive(Debug)]
pub struct LoadingGuard {
    flag: Arc<AtomicBool>,
}

impl LoadingGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: Arc::clone(flag) })
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnKind {
    Tour(TourRoute),
    Food(FoodIntent),
}

/// A submitted message whose assistant reply has not been appended yet.
#[derive(Debug)]
pub struct PendingTurn {
    pub text: String,
    pub kind: TurnKind,
    epoch: u64,
    _loading: Option<LoadingGuard>,
}

impl PendingTurn {
    pub fn needs_completion(&self) -> bool {
        matches!(self.kind, TurnKind::Tour(TourRoute::Landmarks(_)))
    }
}

/// Mode and selection once a turn has been applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    pub mode: GuideMode,
    pub selection: Selection,
    pub appended: bool,
}

#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Listing<T: 'static> {
    Loading { message: &'static str },
    Ready { items: Vec<&'static T> },
}

#[derive(Debug, Serialize)]
#[serde(tag = "guide", rename_all = "snake_case")]
pub enum CatalogPanel {
    Tour {
        landmarks: Listing<Landmark>,
        events: &'static [Event],
    },
    Food {
        restaurants: Listing<Restaurant>,
        dishes: &'static [Dish],
    },
}

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub session_id: String,
    pub mode: GuideMode,
    pub loading: bool,
    pub transcript: Transcript,
    pub selection: Selection,
    pub panel: CatalogPanel,
}

#[derive(Debug)]
pub struct GuideSession {
    pub id: String,
    mode: GuideMode,
    transcript: Transcript,
    // Outlives guide switches; the food selection does not.
    tour_selection: Selection,
    food_selection: Selection,
    loading: Arc<AtomicBool>,
    epoch: u64,
    pub last_active: Instant,
}

impl GuideSession {
    pub fn new(id: impl Into<String>) -> Self {
        let mode = GuideMode::default();
        Self {
            id: id.into(),
            mode,
            transcript: Transcript::greeted(mode.greeting()),
            tour_selection: Selection::empty(),
            food_selection: Selection::empty(),
            loading: Arc::new(AtomicBool::new(false)),
            epoch: 0,
            last_active: Instant::now(),
        }
    }

    pub fn mode(&self) -> GuideMode {
        self.mode
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub fn selection(&self) -> &Selection {
        match self.mode {
            GuideMode::Tour => &self.tour_selection,
            GuideMode::Food => &self.food_selection,
        }
    }

    /// Records the user's message, routes it and updates the selection.
    /// Tour messages are refused while a completion is still outstanding.
    pub fn begin_turn(&mut self, text: &str) -> Result<PendingTurn, AppError> {
        if text.trim().is_empty() {
            return Err(AppError::BadRequest("Message cannot be empty".to_string()));
        }

        let kind = match self.mode {
            GuideMode::Tour => TurnKind::Tour(route_tour(text)),
            GuideMode::Food => TurnKind::Food(classify_food(text)),
        };

        let loading = match kind {
            TurnKind::Tour(TourRoute::Landmarks(_)) => {
                Some(LoadingGuard::acquire(&self.loading).ok_or(AppError::Busy)?)
            }
            TurnKind::Tour(TourRoute::SwitchToFood) if self.is_loading() => {
                return Err(AppError::Busy);
            }
            _ => None,
        };

        self.transcript.append(TranscriptEntry::user(text));
        self.last_active = Instant::now();

        match kind {
            TurnKind::Tour(TourRoute::Landmarks(intent)) => {
                self.tour_selection = landmark_selection(intent);
            }
            TurnKind::Tour(TourRoute::SwitchToFood) => {}
            TurnKind::Food(intent) => {
                self.food_selection = restaurant_selection(intent);
            }
        }
        debug!(session = %self.id, ?kind, "routed message");

        Ok(PendingTurn {
            text: text.to_string(),
            kind,
            epoch: self.epoch,
            _loading: loading,
        })
    }

    /// Appends the assistant reply and applies any requested guide switch.
    /// A reply for a guide that has since been unmounted is dropped.
    pub fn finish_turn(&mut self, turn: PendingTurn, composed: Composed) -> TurnOutcome {
        let appended = turn.epoch == self.epoch;
        if appended {
            self.transcript.append(TranscriptEntry::assistant(composed.reply));
        } else {
            debug!(session = %self.id, "guide remounted while reply was pending; dropping it");
        }
        self.last_active = Instant::now();
        drop(turn);

        if let (true, Some(mode)) = (appended, composed.switch_to) {
            self.navigate(mode);
        }

        TurnOutcome {
            mode: self.mode,
            selection: self.selection().clone(),
            appended,
        }
    }

    /// Mounts `mode`. The previous transcript is discarded; returns false if already active.
    pub fn navigate(&mut self, mode: GuideMode) -> bool {
        self.last_active = Instant::now();
        if mode == self.mode {
            return false;
        }
        info!(session = %self.id, from = ?self.mode, to = ?mode, "switching guide");
        self.mode = mode;
        self.epoch += 1;
        self.transcript = Transcript::greeted(mode.greeting());
        if mode == GuideMode::Food {
            self.food_selection = Selection::empty();
        }
        true
    }

    pub fn view(&self) -> SessionView {
        let loading = self.is_loading();
        let panel = match self.mode {
            GuideMode::Tour => CatalogPanel::Tour {
                landmarks: if loading {
                    Listing::Loading { message: LOADING_PLACEHOLDER }
                } else {
                    Listing::Ready { items: catalog::select(LANDMARKS, &self.tour_selection) }
                },
                events: EVENTS,
            },
            GuideMode::Food => CatalogPanel::Food {
                restaurants: Listing::Ready {
                    items: catalog::select(RESTAURANTS, &self.food_selection),
                },
                dishes: DISHES,
            },
        };

        SessionView {
            session_id: self.id.clone(),
            mode: self.mode,
            loading,
            transcript: self.transcript.clone(),
            selection: self.selection().clone(),
            panel,
        }
    }
}
