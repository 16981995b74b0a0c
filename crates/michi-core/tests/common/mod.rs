use michi_core::{params::CreateTrip, Planner, PlannerBuilder, Trip};
use tempfile::TempDir;

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// A three-day trip starting 2024-01-01 on the given track.
pub fn kyoto_params(track: Option<&str>, weekly_hours: Option<f64>) -> CreateTrip {
    CreateTrip {
        title: "Kyoto".to_string(),
        start_date: "2024-01-01".to_string(),
        end_date: "2024-01-03".to_string(),
        base_location: "Gion".to_string(),
        track: track.map(str::to_string),
        weekly_hours,
    }
}

pub async fn create_kyoto(planner: &Planner, track: Option<&str>) -> Trip {
    planner
        .create_trip(&kyoto_params(track, None))
        .await
        .expect("Failed to create trip")
}
