use serde::Deserialize;

use crate::args::OutputFormat;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(alias = "fps_metrics")]
    pub metrics: Option<Vec<String>>,
    pub format: Option<OutputFormat>,
    pub output: Option<String>,
    pub replay: Option<ReplayConfig>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayConfig {
    pub trigger_every: Option<u64>,
    pub report_every_ms: Option<u64>,
}
