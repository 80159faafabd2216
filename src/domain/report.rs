/// One finished line of the report: a site only reaches the CSV once its
/// whole pipeline (scrape, score, rank lookup) has succeeded.
pub struct ReportRow {
    pub domain: String,
    pub word_count: usize,
    pub score: String,
    pub mean_rank: f64,
}

impl ReportRow {
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{}\n",
            self.domain, self.word_count, self.score, self.mean_rank
        )
    }
}

#[cfg(test)]
mod tests {
    use super::ReportRow;

    #[test]
    fn csv_line_is_comma_joined_and_newline_terminated() {
        let row = ReportRow {
            domain: "seo.co.uk".to_string(),
            word_count: 431,
            score: "64.2".to_string(),
            mean_rank: 17.0 / 6.0,
        };

        assert_eq!(row.to_csv_line(), "seo.co.uk,431,64.2,2.8333333333333335\n");
    }
}
