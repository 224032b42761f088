//! Last-changes report.
//!
//! Shows what the most recent recorded run changed: games that appeared
//! for the first time, price moves, and stock flips. A store holding a
//! single run's worth of data has no earlier run to compare against and
//! produces no report at all.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::store::{Game, Store};
use crate::util::format_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceChange {
    pub from: Option<u32>,
    pub to: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ChangedGame {
    pub title: String,
    pub added: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_change: Option<PriceChange>,
    /// New availability, present when the stock flag flipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_change: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct LastChanges {
    /// Timestamp of the run being reported on.
    pub timestamp: i64,
    pub games: Vec<ChangedGame>,
}

/// What the most recent recorded run changed, or `None` when the store
/// holds at most one distinct timestamp (nothing before it to compare
/// against).
pub fn collect(store: &Store) -> Option<LastChanges> {
    let timestamps: BTreeSet<i64> = store
        .games()
        .flat_map(|game| game.states().iter().map(|s| s.timestamp))
        .collect();
    if timestamps.len() <= 1 {
        return None;
    }

    let last_date = store.games().map(|game| game.state().timestamp).max()?;

    let games = store
        .games()
        .filter(|game| game.state().timestamp == last_date)
        .map(classify)
        .collect();

    Some(LastChanges {
        timestamp: last_date,
        games,
    })
}

fn classify(game: &Game) -> ChangedGame {
    let states = game.states();
    if states.len() == 1 {
        return ChangedGame {
            title: game.title.clone(),
            added: true,
            price_change: None,
            stock_change: None,
        };
    }

    // a state past the first only exists because something differed from
    // the one before it, so at least one of these is present
    let previous = &states[states.len() - 2];
    let current = &states[states.len() - 1];

    let price_change = (previous.price != current.price).then_some(PriceChange {
        from: previous.price,
        to: current.price,
    });
    let stock_change = (previous.in_stock != current.in_stock).then_some(current.in_stock);

    ChangedGame {
        title: game.title.clone(),
        added: false,
        price_change,
        stock_change,
    }
}

pub fn render(changes: &LastChanges) -> String {
    let mut output = format!("\nLast changes [{}]:\n", format_timestamp(changes.timestamp));

    let title_width = changes
        .games
        .iter()
        .map(|game| game.title.chars().count())
        .max()
        .unwrap_or(0);

    for game in &changes.games {
        let mut detail = String::new();
        if game.added {
            detail.push_str("Added.");
        }
        if let Some(in_stock) = game.stock_change {
            detail.push_str(if in_stock {
                "Now available. "
            } else {
                "Now unavailable. "
            });
        }
        if let Some(change) = game.price_change {
            detail.push_str(&format!(
                "{} => {} Ft",
                price_text(change.from),
                price_text(change.to)
            ));
        }

        output.push_str(&format!(
            "{:<title_width$} - {}\n",
            game.title,
            detail.trim_end()
        ));
    }

    output
}

fn price_text(price: Option<u32>) -> String {
    match price {
        Some(price) => price.to_string(),
        None => String::from("?"),
    }
}
