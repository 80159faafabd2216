use std::collections::HashMap;

/// Scanning state for one query's walk over paginated search results.
///
/// A 1-based rank counter advances per citation snippet examined. A domain
/// matches a citation by substring containment; the earliest match per domain
/// is kept and never overwritten. Containment is a deliberate heuristic: a
/// tracked domain whose string appears inside another site's citation text
/// produces a false positive.
pub struct RankScan {
    domains: Vec<String>,
    found: HashMap<String, u32>,
    next_rank: u32,
    max_rank_depth: u32,
}

impl RankScan {
    pub fn new(domains: &[String], max_rank_depth: u32) -> Self {
        RankScan {
            domains: domains.to_vec(),
            found: HashMap::new(),
            next_rank: 1,
            max_rank_depth,
        }
    }

    /// True once every tracked domain has a rank or the scan depth is
    /// exhausted. Checked between pages, so a page is always scanned whole.
    pub fn is_complete(&self) -> bool {
        self.found.len() == self.domains.len() || self.next_rank >= self.max_rank_depth
    }

    /// Scan one results page worth of citation snippets, in page order.
    pub fn scan_page<S: AsRef<str>>(&mut self, citations: &[S]) {
        for citation in citations {
            for domain in &self.domains {
                if citation.as_ref().contains(domain.as_str()) && !self.found.contains_key(domain) {
                    self.found.insert(domain.clone(), self.next_rank);
                }
            }
            self.next_rank += 1;
        }
    }

    /// Per-domain ranks for this query. Domains never cited within the scan
    /// take the counter's final value, a worst-observed fallback rather than
    /// a true rank.
    pub fn finish(self) -> HashMap<String, u32> {
        let RankScan {
            domains,
            found,
            next_rank,
            ..
        } = self;

        domains
            .into_iter()
            .map(|domain| {
                let rank = found.get(&domain).copied().unwrap_or(next_rank);
                (domain, rank)
            })
            .collect()
    }
}

/// Arithmetic mean of each domain's ranks across all query vectors.
pub fn mean_ranks(domains: &[String], per_query: &[HashMap<String, u32>]) -> HashMap<String, f64> {
    domains
        .iter()
        .map(|domain| {
            let total: u32 = per_query.iter().filter_map(|ranks| ranks.get(domain)).sum();
            (domain.clone(), f64::from(total) / per_query.len() as f64)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::{mean_ranks, RankScan};

    fn domains(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn fourth_citation_scores_rank_four() {
        let mut scan = RankScan::new(&domains(&["seo.co.uk"]), 50);
        scan.scan_page(&[
            "https://www.example.com",
            "https://other.example.org",
            "https://www.agency.co.uk",
            "https://www.seo.co.uk › services",
        ]);

        assert!(scan.is_complete());
        assert_eq!(scan.finish()["seo.co.uk"], 4);
    }

    #[test]
    fn earliest_match_is_kept() {
        let mut scan = RankScan::new(&domains(&["novi.digital"]), 50);
        scan.scan_page(&["https://novi.digital", "https://novi.digital/about"]);

        assert_eq!(scan.finish()["novi.digital"], 1);
    }

    #[test]
    fn unfound_domain_takes_last_counter_value() {
        let mut scan = RankScan::new(&domains(&["seo.co.uk", "missing.io"]), 50);
        scan.scan_page(&["https://www.seo.co.uk", "https://unrelated.com"]);
        scan.scan_page(&["https://another.com"]);

        let ranks = scan.finish();
        assert_eq!(ranks["seo.co.uk"], 1);
        assert_eq!(ranks["missing.io"], 4);
    }

    #[test]
    fn scan_stops_at_configured_depth() {
        let mut scan = RankScan::new(&domains(&["missing.io"]), 5);
        assert!(!scan.is_complete());

        scan.scan_page(&["a.com", "b.com", "c.com", "d.com", "e.com", "f.com"]);

        // Depth is page-granular, so the sixth snippet was still examined.
        assert!(scan.is_complete());
        assert_eq!(scan.finish()["missing.io"], 7);
    }

    #[test]
    fn mean_rank_is_arithmetic_mean_across_queries() {
        let tracked = domains(&["seo.co.uk"]);
        let per_query: Vec<HashMap<String, u32>> = [1, 3, 2, 5, 4, 2]
            .iter()
            .map(|&rank| HashMap::from([("seo.co.uk".to_string(), rank)]))
            .collect();

        let means = mean_ranks(&tracked, &per_query);
        assert!((means["seo.co.uk"] - 17.0 / 6.0).abs() < f64::EPSILON);
    }
}
