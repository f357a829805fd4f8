use metrics_exporter_prometheus::PrometheusHandle;
use pathway_planner::config::PlannerConfig;
use pathway_planner::error::AppError;
use pathway_planner::planning::{CostCatalog, PlannerService, PlanningError, UserSelection};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Builds the service from the configured catalog; `catalog_override` wins over config.
pub(crate) fn build_planner_service(
    config: &PlannerConfig,
    catalog_override: Option<PathBuf>,
) -> Result<PlannerService, AppError> {
    let catalog = match catalog_override.or_else(|| config.catalog_path.clone()) {
        Some(path) => {
            info!(path = %path.display(), "loading cost catalog");
            CostCatalog::from_path(&path)?
        }
        None => CostCatalog::standard(),
    };

    Ok(PlannerService::new(Arc::new(catalog), config.recommendation))
}

pub(crate) fn read_selection(path: &Path) -> Result<UserSelection, AppError> {
    let file = File::open(path)?;
    let selection = serde_json::from_reader(BufReader::new(file)).map_err(PlanningError::from)?;
    Ok(selection)
}

/// clap value parser for the planner's named choices.
pub(crate) fn parse_choice<T>(raw: &str) -> Result<T, String>
where
    T: FromStr<Err = PlanningError>,
{
    raw.parse::<T>().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_planner::planning::{Area, PlanChoice, RecommendationConfig};
    use std::fs;

    #[test]
    fn parse_choice_reports_unknown_names() {
        assert_eq!(parse_choice::<Area>("kowloon"), Ok(Area::Kowloon));
        let err = parse_choice::<Area>("lantau").expect_err("unknown area");
        assert!(err.contains("lantau"));
    }

    #[test]
    fn builds_standard_service_without_catalog_path() {
        let config = PlannerConfig {
            catalog_path: None,
            recommendation: RecommendationConfig::default(),
        };
        let service = build_planner_service(&config, None).expect("service builds");
        assert_eq!(service.catalog(), &CostCatalog::standard());
    }

    #[test]
    fn missing_catalog_override_fails() {
        let config = PlannerConfig::default();
        let result =
            build_planner_service(&config, Some(PathBuf::from("/nonexistent/catalog.json")));
        assert!(result.is_err());
    }

    #[test]
    fn reads_selection_from_json_file() {
        let selection = UserSelection {
            plan: PlanChoice::A,
            ..UserSelection::default()
        };
        let path = std::env::temp_dir().join(format!(
            "pathway-planner-selection-{}.json",
            std::process::id()
        ));
        fs::write(&path, serde_json::to_vec(&selection).unwrap()).expect("selection written");

        let loaded = read_selection(&path).expect("selection loads");
        fs::remove_file(&path).ok();

        assert_eq!(loaded, selection);
    }
}
