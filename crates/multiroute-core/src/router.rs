//! Static task → model routing table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The analysis operations the service can route.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    #[strum(serialize = "classify")]
    Classify,
    #[strum(serialize = "sentiment")]
    Sentiment,
    #[strum(serialize = "summarize")]
    Summarize,
    #[strum(serialize = "intent")]
    Intent,
}

impl TaskType {
    pub const ALL: [TaskType; 4] = [
        TaskType::Classify,
        TaskType::Sentiment,
        TaskType::Summarize,
        TaskType::Intent,
    ];
}

/// One model name per task. Having a field per task keeps the table total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRoutes {
    pub classify: String,
    pub sentiment: String,
    pub summarize: String,
    pub intent: String,
}

/// Read-only routing table, built once at startup.
#[derive(Debug, Clone)]
pub struct ModelRouter {
    routes: ModelRoutes,
}

impl ModelRouter {
    pub fn new(routes: ModelRoutes) -> Self {
        Self { routes }
    }

    /// Model configured for `task`.
    pub fn get_model(&self, task: TaskType) -> &str {
        match task {
            TaskType::Classify => &self.routes.classify,
            TaskType::Sentiment => &self.routes.sentiment,
            TaskType::Summarize => &self.routes.summarize,
            TaskType::Intent => &self.routes.intent,
        }
    }

    /// Snapshot of the table keyed by task name.
    pub fn get_routes(&self) -> BTreeMap<String, String> {
        TaskType::ALL
            .iter()
            .map(|task| (task.to_string(), self.get_model(*task).to_owned()))
            .collect()
    }
}
