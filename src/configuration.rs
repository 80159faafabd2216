use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::target_site::TargetSite;

#[derive(serde::Deserialize, Clone)]
pub struct Settings {
    pub webdriver: WebdriverSettings,
    pub search: SearchSettings,
    pub readability: ReadabilitySettings,
    pub report: ReportSettings,
}

#[derive(serde::Deserialize, Clone)]
pub struct WebdriverSettings {
    pub driver_dir: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub headless: bool,
    pub startup_timeout_secs: u64,
}

impl WebdriverSettings {
    pub fn server_url(&self) -> String {
        format!("http://localhost:{}", self.port)
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct SearchSettings {
    pub max_rank_depth: u32,
    pub page_load_timeout_secs: u64,
    pub queries: Vec<String>,
}

#[derive(serde::Deserialize, Clone)]
pub struct ReadabilitySettings {
    pub startup_delay_secs: u64,
    pub score_timeout_secs: u64,
}

#[derive(serde::Deserialize, Clone)]
pub struct ReportSettings {
    pub output_path: String,
    pub targets: Vec<TargetSite>,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let settings = config::Config::builder()
        .add_source(config::File::from(base_path.join("configuration.yaml")))
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::get_configuration;

    #[test]
    fn shipped_configuration_parses() {
        let settings = get_configuration().expect("Failed to read configuration.");

        assert_eq!(settings.report.targets.len(), 10);
        assert_eq!(settings.search.queries.len(), 6);
        assert_eq!(settings.search.max_rank_depth, 50);
        assert_eq!(settings.report.targets[0].domain, "novi.digital");
    }
}
