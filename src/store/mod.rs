//! Game state history store.
//!
//! Maps each game title to its observed state history:
//! - A state records timestamp, price, and stock availability
//! - Consecutive states always differ in price or stock; a run that
//!   observes nothing new leaves the history untouched
//! - The latest state is the game's current state

pub mod persist;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One observed state of a game at one scrape run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Unix seconds of the run that recorded this state.
    pub timestamp: i64,
    /// Listed price in forints; `None` when the price text was unreadable.
    pub price: Option<u32>,
    pub in_stock: bool,
}

impl GameState {
    /// Field-wise equality with the timestamp left out. Two states that
    /// agree here describe the same listing, whenever they were observed.
    pub fn same_listing(&self, other: &GameState) -> bool {
        self.price == other.price && self.in_stock == other.in_stock
    }
}

/// A tracked game and its state history, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub title: String,
    states: Vec<GameState>,
}

impl Game {
    pub fn new(title: String, first_state: GameState) -> Self {
        Game {
            title,
            states: vec![first_state],
        }
    }

    /// The current state. The history is never empty: a game only exists
    /// because some run observed it.
    pub fn state(&self) -> &GameState {
        self.states.last().expect("game history is never empty")
    }

    pub fn states(&self) -> &[GameState] {
        &self.states
    }

    /// Timestamp of the run that first saw this game.
    pub fn creation_date(&self) -> i64 {
        self.states[0].timestamp
    }

    /// Append a newly observed state unless it matches the current one in
    /// every field but the timestamp. Returns whether anything was appended.
    ///
    /// This is what keeps the current state's timestamp meaningful: it is
    /// always the most recent run in which the listing actually changed,
    /// which the change report depends on.
    pub fn add_state(&mut self, new_state: GameState) -> bool {
        if self.state().same_listing(&new_state) {
            return false;
        }
        self.states.push(new_state);
        true
    }
}

/// All tracked games, keyed by title. The ordered map gives title-sorted
/// iteration, which is the order every report wants, and a stable persisted
/// document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    games: BTreeMap<String, Game>,
}

impl Store {
    pub fn new() -> Self {
        Store {
            games: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&Game> {
        self.games.get(title)
    }

    /// All games in title order.
    pub fn games(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    /// Merge one observation into the store: unknown titles create a new
    /// game, known titles defer to [`Game::add_state`]. Returns whether the
    /// store changed.
    pub fn record(&mut self, title: &str, state: GameState) -> bool {
        match self.games.get_mut(title) {
            Some(game) => game.add_state(state),
            None => {
                self.games
                    .insert(title.to_string(), Game::new(title.to_string(), state));
                true
            }
        }
    }
}
