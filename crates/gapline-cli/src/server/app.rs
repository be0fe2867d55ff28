//! Axum application setup.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use super::state::AppState;

/// Create the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Any origin, so a dashboard frontend can run on its own port
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Catalogue
        .route("/summary", get(handlers::get_summary))
        .route("/years", get(handlers::get_years))
        .route("/countries", get(handlers::get_countries))
        // Views
        .route("/overview", get(handlers::get_overview))
        .route("/overview/export", get(handlers::export_overview))
        .route("/compare", get(handlers::get_comparison))
        .route("/rankings", get(handlers::get_rankings))
        // Reload
        .route("/refresh", post(handlers::refresh));

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(state)
}

/// Start the web server.
pub async fn run_server(state: AppState, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));

    tracing::info!(%addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use gapline::{DatasetPaths, Pipeline, PipelineCache};
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn fixture() -> (TempDir, Router) {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("gdp_pcap.csv"),
            "country,1999,2000\nCountry A,1k,1.2k\nCountry B,500,600\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("life_expectancy.csv"),
            "country,1999,2000\nCountry A,50,51\nCountry B,,60\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("population.csv"),
            "country,1999,2000\nCountry A,1M,1.1M\nCountry B,2M,2.1M\n",
        )
        .unwrap();

        let cache = PipelineCache::new(Pipeline::new(), DatasetPaths::from_dir(dir.path()));
        let router = create_router(AppState::new(cache));
        (dir, router)
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_years() {
        let (_dir, router) = fixture();
        let (status, body) = get_json(router, "/api/years").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["years"], serde_json::json!([1999, 2000]));
        assert_eq!(body["default"], 2000);
    }

    #[tokio::test]
    async fn test_overview_slice() {
        let (_dir, router) = fixture();
        let (status, body) = get_json(router, "/api/overview?year=2000").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"].as_array().unwrap().len(), 1);
        assert_eq!(body["rows"][0]["gdp_per_cap"], 1200.0);
        assert_eq!(body["excluded"], 1);
    }

    #[tokio::test]
    async fn test_compare_requires_countries() {
        let (_dir, router) = fixture();
        let (status, body) = get_json(router, "/api/compare").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_compare_reports_unknown() {
        let (_dir, router) = fixture();
        let (_, body) = get_json(router, "/api/compare?countries=Country%20A,Atlantis").await;
        assert_eq!(body["series"][0]["country"], "Country A");
        assert_eq!(body["unknown"], serde_json::json!(["Atlantis"]));
    }

    #[tokio::test]
    async fn test_compare_defaults_to_present_countries() {
        let dir = TempDir::new().unwrap();
        let rows = "country,2000\nChina,1\nIndia,1\nPeru,1\n";
        for name in ["gdp_pcap.csv", "life_expectancy.csv", "population.csv"] {
            fs::write(dir.path().join(name), rows).unwrap();
        }
        let cache = PipelineCache::new(Pipeline::new(), DatasetPaths::from_dir(dir.path()));
        let router = create_router(AppState::new(cache));

        let (status, body) = get_json(router, "/api/compare").await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["series"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["country"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["India", "China"]);
        assert!(body.get("unknown").is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_reports_schema_error() {
        let (dir, router) = fixture();
        let (status, _) = get_json(router.clone(), "/api/summary").await;
        assert_eq!(status, StatusCode::OK);

        fs::write(dir.path().join("gdp_pcap.csv"), "country,notes\nCountry A,1\n").unwrap();
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "schema_error");
    }

    #[tokio::test]
    async fn test_export_is_csv_attachment() {
        let (_dir, router) = fixture();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/overview/export?year=2000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.contains("gdp_life_pop_2000.csv"));
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("country,year,gdp_per_cap,life_exp,population\n"));
    }

    #[tokio::test]
    async fn test_missing_input_is_unavailable() {
        let (dir, router) = fixture();
        fs::remove_file(dir.path().join("population.csv")).unwrap();
        let (status, body) = get_json(router, "/api/summary").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "data_error");
    }

    #[tokio::test]
    async fn test_rankings_limit_validated() {
        let (_dir, router) = fixture();
        let (status, _) = get_json(router, "/api/rankings?limit=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
