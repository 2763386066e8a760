//! Recent-donors feed.
//!
//! A read-only, paginated feed of recent donations shown on the public site.
//! There is no write side; the dataset is generated at startup in the same
//! shape the site has always displayed (name, amount, cause, relative time,
//! message) and paged out on request.

use rand::Rng;
use serde::Serialize;

/// Total generated donors.
const FEED_SIZE: usize = 100;

/// Default page size when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: usize = 6;

/// Hard cap on the page size.
pub const MAX_PAGE_SIZE: usize = 50;

const CAUSES: [&str; 6] = [
    "Medical Care",
    "Food & Nutrition",
    "Emergency Fund",
    "Winter Care",
    "Shelter & Housing",
    "Toys & Enrichment",
];

const MESSAGES: [&str; 6] = [
    "Hope this helps our furry friends get better!",
    "Every dog deserves a good meal.",
    "For emergency care when they need it most.",
    "Stay warm, little ones!",
    "A safe home for every dog.",
    "Happiness is important too!",
];

/// A single donor entry in the feed.
#[derive(Debug, Clone, Serialize)]
pub struct Donor {
    pub id: String,
    pub name: String,
    pub amount: String,
    pub cause: &'static str,
    pub time: String,
    pub avatar: &'static str,
    pub message: &'static str,
}

/// One page of the feed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorPage {
    pub donors: Vec<Donor>,
    pub has_more: bool,
    pub total: usize,
    pub page: usize,
    pub limit: usize,
}

/// The full in-memory feed, generated once at startup.
#[derive(Debug, Clone)]
pub struct DonorFeed {
    donors: Vec<Donor>,
}

impl DonorFeed {
    /// Generate the sample feed.
    #[must_use]
    pub fn sample() -> Self {
        let mut rng = rand::rng();

        let donors = (0..FEED_SIZE)
            .map(|i| {
                let cause_idx = rng.random_range(0..CAUSES.len());
                let message_idx = rng.random_range(0..MESSAGES.len());
                Donor {
                    id: format!("donor_{i}"),
                    name: format!("Donor {}", i + 1),
                    amount: format!("\u{20b9}{}", rng.random_range(0..10_000)),
                    cause: CAUSES[cause_idx % CAUSES.len()],
                    time: format!("{} hours ago", rng.random_range(0..24)),
                    avatar: "/placeholder.svg?height=40&width=40",
                    message: MESSAGES[message_idx % MESSAGES.len()],
                }
            })
            .collect();

        Self { donors }
    }

    /// Number of donors in the feed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.donors.len()
    }

    /// Fetch one page.
    ///
    /// `page` is clamped to at least 1 and `limit` to `1..=50`; a page past
    /// the end returns an empty donor list with `has_more = false`.
    #[must_use]
    pub fn page(&self, page: usize, limit: usize) -> DonorPage {
        let page = page.max(1);
        let limit = limit.clamp(1, MAX_PAGE_SIZE);

        let start = (page - 1) * limit;
        let donors: Vec<Donor> = self.donors.iter().skip(start).take(limit).cloned().collect();
        let has_more = start + donors.len() < self.donors.len();

        DonorPage {
            donors,
            has_more,
            total: self.donors.len(),
            page,
            limit,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_has_hundred_donors() {
        let feed = DonorFeed::sample();
        assert_eq!(feed.total(), 100);
    }

    #[test]
    fn test_first_page_defaults() {
        let feed = DonorFeed::sample();
        let page = feed.page(1, DEFAULT_PAGE_SIZE);
        assert_eq!(page.donors.len(), 6);
        assert!(page.has_more);
        assert_eq!(page.total, 100);
        assert_eq!(page.donors.first().unwrap().id, "donor_0");
    }

    #[test]
    fn test_zero_page_clamps_to_first() {
        let feed = DonorFeed::sample();
        let page = feed.page(0, 6);
        assert_eq!(page.page, 1);
        assert_eq!(page.donors.first().unwrap().id, "donor_0");
    }

    #[test]
    fn test_limit_clamped_to_fifty() {
        let feed = DonorFeed::sample();
        let page = feed.page(1, 500);
        assert_eq!(page.limit, 50);
        assert_eq!(page.donors.len(), 50);
    }

    #[test]
    fn test_last_page_has_no_more() {
        let feed = DonorFeed::sample();
        let page = feed.page(2, 50);
        assert_eq!(page.donors.len(), 50);
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let feed = DonorFeed::sample();
        let page = feed.page(100, 6);
        assert!(page.donors.is_empty());
        assert!(!page.has_more);
        assert_eq!(page.total, 100);
    }

    #[test]
    fn test_pages_do_not_overlap() {
        let feed = DonorFeed::sample();
        let first = feed.page(1, 6);
        let second = feed.page(2, 6);
        assert_eq!(second.donors.first().unwrap().id, "donor_6");
        assert_ne!(
            first.donors.last().unwrap().id,
            second.donors.first().unwrap().id
        );
    }
}
