use serde::Deserialize;

/// One competitor webpage being measured. The list of target sites is fixed
/// at process start and immutable for the run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TargetSite {
    pub domain: String,
    pub url: String,
}

impl TargetSite {
    /// First label of the domain, used to name the per-site text artifact
    /// ("seo.co.uk" scrapes into "seo.txt").
    pub fn artifact_stem(&self) -> &str {
        self.domain.split('.').next().unwrap_or(&self.domain)
    }

    pub fn artifact_filename(&self) -> String {
        format!("{}.txt", self.artifact_stem())
    }
}
