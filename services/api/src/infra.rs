use metrics_exporter_prometheus::PrometheusHandle;
use speech_report::sources::{PoliticianSource, SourceFormat};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) source: Option<Arc<dyn PoliticianSource>>,
}

pub(crate) fn parse_format(raw: &str) -> Result<SourceFormat, String> {
    SourceFormat::parse(raw).ok_or_else(|| format!("unknown format '{raw}', expected json or csv"))
}
