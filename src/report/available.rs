//! Availability report.
//!
//! Lists every game whose current state has a known price and is in stock,
//! in title order, with a trend annotation against the nearest earlier
//! state that had a different price.

use serde::Serialize;

use crate::store::Store;
use crate::util::format_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

#[derive(Debug, Serialize)]
pub struct AvailableGame {
    pub title: String,
    pub price: u32,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_price: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
}

/// Rows of the availability report, title order.
pub fn collect(store: &Store) -> Vec<AvailableGame> {
    let mut rows = Vec::new();

    for game in store.games() {
        let current = game.state();
        let Some(price) = current.price else { continue };
        if !current.in_stock {
            continue;
        }

        // nearest earlier state with a different price, newest first; an
        // unknown price there suppresses the annotation
        let previous_price = game
            .states()
            .iter()
            .rev()
            .find(|s| s.price != current.price)
            .and_then(|s| s.price);
        let trend = previous_price.map(|previous| {
            if price > previous {
                Trend::Up
            } else {
                Trend::Down
            }
        });

        rows.push(AvailableGame {
            title: game.title.clone(),
            price,
            timestamp: current.timestamp,
            previous_price,
            trend,
        });
    }

    rows
}

pub fn render(store: &Store) -> String {
    let rows = collect(store);

    let mut output = format!("\nGames: {}, available: {}.\n", store.len(), rows.len());

    // column widths come from the rendered set only; an empty set has no
    // rows to align, so the summary line is the whole report
    let title_width = rows.iter().map(|r| r.title.chars().count()).max().unwrap_or(0);
    let price_width = rows.iter().map(|r| r.price.to_string().len()).max().unwrap_or(0);

    for row in &rows {
        let annotation = match (row.trend, row.previous_price) {
            (Some(Trend::Up), Some(previous)) => format!(" ↑↑ from {previous} Ft"),
            (Some(Trend::Down), Some(previous)) => format!(" ↓↓ from {previous} Ft"),
            _ => String::new(),
        };

        output.push_str(&format!(
            "{:<title_width$} - {:>price_width$} Ft [{}]{}\n",
            row.title,
            row.price,
            format_timestamp(row.timestamp),
            annotation
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::GameState;

    fn state(timestamp: i64, price: Option<u32>, in_stock: bool) -> GameState {
        GameState {
            timestamp,
            price,
            in_stock,
        }
    }

    #[test]
    fn only_priced_in_stock_games_appear() {
        let mut store = Store::new();
        store.record("In stock", state(100, Some(9990), true));
        store.record("Out of stock", state(100, Some(9990), false));
        store.record("No price", state(100, None, true));

        let rows = collect(&store);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "In stock");
    }

    #[test]
    fn rows_are_sorted_by_title_regardless_of_insertion_order() {
        let mut store = Store::new();
        store.record("Zelda", state(100, Some(19990), true));
        store.record("Animal Crossing", state(100, Some(15990), true));
        store.record("Mario Kart", state(100, Some(17990), true));

        let rows = collect(&store);
        let titles: Vec<&str> = rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["Animal Crossing", "Mario Kart", "Zelda"]);
    }

    #[test]
    fn trend_points_at_nearest_differing_price() {
        // dedup means a history can hold the same price twice only with a
        // stock flip in between; build exactly that shape
        let mut store = Store::new();
        store.record("Celeste", state(100, Some(1000), true));
        store.record("Celeste", state(200, Some(1000), false));
        store.record("Celeste", state(300, Some(1200), false));
        store.record("Celeste", state(400, Some(1200), true));

        let rows = collect(&store);
        assert_eq!(rows[0].price, 1200);
        assert_eq!(rows[0].previous_price, Some(1000));
        assert_eq!(rows[0].trend, Some(Trend::Up));
    }

    #[test]
    fn price_drop_annotates_down() {
        let mut store = Store::new();
        store.record("Hades", state(100, Some(8990), true));
        store.record("Hades", state(200, Some(6990), true));

        let rows = collect(&store);
        assert_eq!(rows[0].previous_price, Some(8990));
        assert_eq!(rows[0].trend, Some(Trend::Down));
    }

    #[test]
    fn unknown_previous_price_suppresses_annotation() {
        let mut store = Store::new();
        store.record("Hades", state(100, None, true));
        store.record("Hades", state(200, Some(6990), true));

        let rows = collect(&store);
        assert_eq!(rows[0].previous_price, None);
        assert_eq!(rows[0].trend, None);
    }

    #[test]
    fn single_state_has_no_annotation() {
        let mut store = Store::new();
        store.record("Hades", state(100, Some(6990), true));

        let rows = collect(&store);
        assert_eq!(rows[0].previous_price, None);
        assert_eq!(rows[0].trend, None);
    }

    #[test]
    fn empty_store_renders_summary_without_panicking() {
        let output = render(&Store::new());
        assert_eq!(output, "\nGames: 0, available: 0.\n");
    }

    #[test]
    fn nothing_available_renders_summary_only() {
        let mut store = Store::new();
        store.record("Out of stock", state(100, Some(9990), false));

        let output = render(&store);
        assert_eq!(output, "\nGames: 1, available: 0.\n");
    }

    #[test]
    fn render_aligns_titles_and_prices() {
        let mut store = Store::new();
        store.record("Ori", state(100, Some(990), true));
        store.record("Xenoblade Chronicles 3", state(100, Some(21990), true));

        let output = render(&store);
        let lines: Vec<&str> = output.lines().filter(|l| !l.is_empty()).collect();
        assert_eq!(lines[0], "Games: 2, available: 2.");
        assert!(lines[1].starts_with("Ori                    -   990 Ft ["));
        assert!(lines[2].starts_with("Xenoblade Chronicles 3 - 21990 Ft ["));
    }
}
