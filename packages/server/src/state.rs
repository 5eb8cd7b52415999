use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::AppConfig;
use crate::execution::ExecutionService;
use crate::judging::ScoringPolicy;
use crate::problems::ProblemStore;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<AppConfig>,
    pub execution: Arc<dyn ExecutionService>,
    pub problems: Arc<dyn ProblemStore>,
    pub scoring: Arc<dyn ScoringPolicy>,
}
