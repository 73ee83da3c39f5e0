//! View model for the GEO visibility dashboard.

use brandpulse_core::{aggregate, AggregatedStats, AnalysisRecord};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub brand: String,
    pub keyword: String,
    pub records: Vec<AnalysisRecord>,
    /// Always derived from `records`; recomputed on every completed run.
    pub stats: AggregatedStats,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum DashboardAction {
    Started { brand: String, keyword: String },
    Completed(Vec<AnalysisRecord>),
    Failed(String),
    Reset,
}

impl DashboardState {
    #[must_use]
    pub fn reduce(self, action: DashboardAction) -> Self {
        match action {
            DashboardAction::Started { brand, keyword } => Self {
                brand,
                keyword,
                loading: true,
                ..Self::default()
            },
            DashboardAction::Completed(records) => {
                let stats = aggregate(&records, &self.brand);
                Self {
                    records,
                    stats,
                    loading: false,
                    error: None,
                    ..self
                }
            }
            // Back to the input form: query kept, results dropped.
            DashboardAction::Failed(message) => Self {
                brand: self.brand,
                keyword: self.keyword,
                error: Some(message),
                ..Self::default()
            },
            DashboardAction::Reset => Self::default(),
        }
    }

    /// Records whose persona call failed outright.
    #[must_use]
    pub fn failed_records(&self) -> usize {
        self.records.iter().filter(|r| r.is_failed()).count()
    }
}
