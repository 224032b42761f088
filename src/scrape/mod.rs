//! Pagination driver.
//!
//! Walks the listing page by page, merges every observation into the
//! store, and stops on the first card-less page. All observations of one
//! run share a single timestamp captured before the loop, so states
//! recorded by the same run are mutually comparable as one point in time.

pub mod extract;

use crate::config::Config;
use crate::fetch::PageSource;
use crate::store::{GameState, Store};
use extract::CardExtractor;

/// Summary of one scrape run.
pub struct ScrapeOutcome {
    /// Pages that yielded at least one card.
    pub pages: u32,
    /// Observations extracted across all pages.
    pub observed: usize,
    /// Observations that actually changed the store.
    pub recorded: usize,
    pub fetch_errors: u32,
    /// True when the retry budget ran out before the end of the catalog.
    /// Whatever was collected up to that point is still in the store.
    pub aborted: bool,
    pub duration_ms: Option<u128>,
}

impl ScrapeOutcome {
    fn empty() -> Self {
        ScrapeOutcome {
            pages: 0,
            observed: 0,
            recorded: 0,
            fetch_errors: 0,
            aborted: false,
            duration_ms: None,
        }
    }
}

/// Address of listing page `index`, counted from 1.
pub fn page_url(base_url: &str, index: u32) -> String {
    format!("{}/oldal-{}", base_url.trim_end_matches('/'), index)
}

pub fn run(config: &Config, source: &dyn PageSource, store: &mut Store) -> ScrapeOutcome {
    let start = std::time::Instant::now();
    let run_timestamp = chrono::Utc::now().timestamp();
    let extractor = CardExtractor::new();

    let mut outcome = ScrapeOutcome::empty();
    let mut page_index: u32 = 1;
    let mut error_count: u32 = 0;

    loop {
        let url = page_url(&config.base_url, page_index);
        if config.verbose {
            eprintln!("Loading page: {url}");
        }

        let body = match source.fetch(&url) {
            Ok(body) => body,
            Err(e) => {
                error_count += 1;
                outcome.fetch_errors = error_count;
                if error_count > config.retry_limit {
                    if config.verbose {
                        eprintln!("Giving up after {} errors.", error_count);
                    }
                    outcome.aborted = true;
                    break;
                }
                if config.verbose {
                    eprintln!("Error #{error_count}: {e}. Retrying....");
                }
                // same page index again
                continue;
            }
        };

        let observations = extractor.extract(&body);
        if observations.is_empty() {
            // natural end of the catalog
            if config.verbose {
                eprintln!("Done.");
            }
            break;
        }
        if config.verbose {
            eprintln!("Found {} games.", observations.len());
        }

        outcome.pages += 1;
        outcome.observed += observations.len();

        for observation in observations {
            let state = GameState {
                timestamp: run_timestamp,
                price: observation.price,
                in_stock: observation.in_stock,
            };
            if store.record(&observation.title, state) {
                outcome.recorded += 1;
            }
        }

        page_index += 1;
    }

    outcome.duration_ms = Some(start.elapsed().as_millis());
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::{FetchError, PageSource};

    /// Serves canned page bodies by 1-based page index; anything past the
    /// end is a card-less page.
    struct CannedPages {
        pages: Vec<String>,
    }

    impl PageSource for CannedPages {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            let index: usize = url
                .rsplit('-')
                .next()
                .and_then(|n| n.parse().ok())
                .expect("page url ends in an index");
            Ok(self
                .pages
                .get(index - 1)
                .cloned()
                .unwrap_or_else(|| String::from("<html><body></body></html>")))
        }
    }

    struct AlwaysFails;

    impl PageSource for AlwaysFails {
        fn fetch(&self, _url: &str) -> Result<String, FetchError> {
            Err(FetchError::Status(503))
        }
    }

    /// Fails a fixed number of times, then serves a single page of games.
    struct FlakyPages {
        failures: std::cell::Cell<u32>,
        page: String,
    }

    impl PageSource for FlakyPages {
        fn fetch(&self, url: &str) -> Result<String, FetchError> {
            if self.failures.get() > 0 {
                self.failures.set(self.failures.get() - 1);
                return Err(FetchError::Status(503));
            }
            CannedPages {
                pages: vec![self.page.clone()],
            }
            .fetch(url)
        }
    }

    fn page_with(titles: &[&str]) -> String {
        let cards: String = titles
            .iter()
            .map(|title| {
                format!(
                    "<article class=\"card\">\
                       <h3 class=\"product-title\"><a href=\"#\">{title}</a></h3>\
                       <div class=\"price\"><div class=\"now\">9 990</div></div>\
                       <ul><li class=\"stock-info\">Készleten</li></ul>\
                     </article>"
                )
            })
            .collect();
        format!("<html><body><div class=\"content\">{cards}</div></body></html>")
    }

    #[test]
    fn page_url_appends_index_to_base() {
        assert_eq!(page_url("https://example.hu/switch", 3), "https://example.hu/switch/oldal-3");
        // trailing slash on the configured base does not double up
        assert_eq!(page_url("https://example.hu/switch/", 1), "https://example.hu/switch/oldal-1");
    }

    #[test]
    fn stops_on_first_empty_page() {
        let source = CannedPages {
            pages: vec![
                page_with(&["Zelda", "Mario Kart"]),
                page_with(&["Celeste"]),
                page_with(&["Hades"]),
            ],
        };
        let mut store = Store::new();
        let outcome = run(&Config::default(), &source, &mut store);

        assert_eq!(outcome.pages, 3);
        assert_eq!(outcome.observed, 4);
        assert_eq!(outcome.recorded, 4);
        assert!(!outcome.aborted);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn all_states_of_one_run_share_a_timestamp() {
        let source = CannedPages {
            pages: vec![page_with(&["Zelda"]), page_with(&["Hades"])],
        };
        let mut store = Store::new();
        run(&Config::default(), &source, &mut store);

        let zelda = store.get("Zelda").unwrap().state().timestamp;
        let hades = store.get("Hades").unwrap().state().timestamp;
        assert_eq!(zelda, hades);
    }

    #[test]
    fn persistent_failure_exhausts_retry_budget_and_aborts() {
        let config = Config::default();
        let mut store = Store::new();
        let outcome = run(&config, &AlwaysFails, &mut store);

        assert!(outcome.aborted);
        assert_eq!(outcome.fetch_errors, config.retry_limit + 1);
        assert_eq!(outcome.pages, 0);
        assert!(store.is_empty());
    }

    #[test]
    fn transient_failures_retry_the_same_page() {
        let source = FlakyPages {
            failures: std::cell::Cell::new(3),
            page: page_with(&["Zelda"]),
        };
        let mut store = Store::new();
        let outcome = run(&Config::default(), &source, &mut store);

        assert!(!outcome.aborted);
        assert_eq!(outcome.fetch_errors, 3);
        assert_eq!(outcome.pages, 1);
        assert!(store.get("Zelda").is_some());
    }

    #[test]
    fn rescraping_unchanged_listing_records_nothing() {
        let source = CannedPages {
            pages: vec![page_with(&["Zelda"])],
        };
        let mut store = Store::new();
        run(&Config::default(), &source, &mut store);
        let outcome = run(&Config::default(), &source, &mut store);

        assert_eq!(outcome.observed, 1);
        assert_eq!(outcome.recorded, 0);
        assert_eq!(store.get("Zelda").unwrap().states().len(), 1);
    }
}
