//! Tests for the catalog client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a connection to the real catalog.

use melody_catalog::{CatalogClient, CatalogConfig, CatalogError, CatalogQuery, TrackCatalog};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> CatalogClient {
    let config = CatalogConfig::new("test-client").with_base_url(server.uri());
    CatalogClient::new(config).unwrap()
}

fn api_track(id: u64, name: &str) -> serde_json::Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "artist_name": "Artist",
        "album_name": "Album",
        "duration": 200,
        "image": "https://img.example.com/cover.jpg",
        "audio": "https://audio.example.com/track.mp3",
        "musicinfo": { "tags": { "genres": ["jazz"] } }
    })
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_default_points_at_jamendo() {
        let client = CatalogClient::new(CatalogConfig::new("id")).unwrap();
        assert_eq!(client.base_url(), "https://api.jamendo.com/v3.0");
    }

    #[test]
    fn test_empty_url_rejected() {
        let result = CatalogClient::new(CatalogConfig::new("id").with_base_url(""));
        match result {
            Err(CatalogError::InvalidUrl(msg)) => assert!(msg.contains("empty")),
            _ => panic!("Expected InvalidUrl error"),
        }
    }

    #[test]
    fn test_ftp_scheme_rejected() {
        let result = CatalogClient::new(CatalogConfig::new("id").with_base_url("ftp://example.com"));
        assert!(matches!(result, Err(CatalogError::InvalidUrl(_))));
    }

    #[test]
    fn test_trailing_slash_removed() {
        let client =
            CatalogClient::new(CatalogConfig::new("id").with_base_url("https://example.com/v3.0/"))
                .unwrap();
        assert_eq!(client.base_url(), "https://example.com/v3.0");
    }
}

// =============================================================================
// Track Listing Tests
// =============================================================================

mod track_listings {
    use super::*;

    #[tokio::test]
    async fn test_featured_tracks_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tracks/"))
            .and(query_param("client_id", "test-client"))
            .and(query_param("format", "json"))
            .and(query_param("boost", "popularity_total"))
            .and(query_param("include", "musicinfo"))
            .and(query_param("audioformat", "mp32"))
            .and(query_param("limit", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "headers": { "status": "success" },
                "results": [api_track(1, "One"), api_track(2, "Two")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tracks = client_for(&mock_server).try_featured_tracks(2).await.unwrap();

        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].id, "1");
        assert_eq!(tracks[0].title, "One");
        assert_eq!(tracks[0].genre, "jazz");
        assert_eq!(tracks[1].url, "https://audio.example.com/track.mp3");
    }

    #[tokio::test]
    async fn test_new_releases_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tracks/"))
            .and(query_param("order", "releasedate_desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [api_track(9, "Fresh")]
            })))
            .mount(&mock_server)
            .await;

        let tracks = client_for(&mock_server).get_new_releases(20).await;
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].title, "Fresh");
    }

    #[tokio::test]
    async fn test_search_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tracks/search"))
            .and(query_param("search", "night drive"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [api_track(5, "Night Drive")]
            })))
            .mount(&mock_server)
            .await;

        let tracks = client_for(&mock_server)
            .search_tracks("night drive", 10)
            .await;
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "5");
    }

    #[tokio::test]
    async fn test_tracks_by_genre_default_limit() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tracks/"))
            .and(query_param("tags", "jazz"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [api_track(3, "Blue")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tracks = client_for(&mock_server).get_tracks_by_genre("jazz", None).await;
        assert_eq!(tracks.len(), 1);
    }
}

// =============================================================================
// Genre Tests
// =============================================================================

mod genres {
    use super::*;

    #[tokio::test]
    async fn test_genres_mapped() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tags"))
            .and(query_param("type", "genre"))
            .and(query_param("order", "count_desc"))
            .and(query_param("limit", "20"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    { "id": 12, "name": "pop", "count": 900 },
                    { "id": "rock", "name": "rock", "count": 700 }
                ]
            })))
            .mount(&mock_server)
            .await;

        let genres = client_for(&mock_server).get_genres().await;
        assert_eq!(genres.len(), 2);
        assert_eq!(genres[0].id, "12");
        assert_eq!(genres[0].cover, "https://picsum.photos/seed/pop/400/400");
        assert_eq!(genres[1].track_count, 700);
    }

    #[tokio::test]
    async fn test_genres_fallback_on_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tags"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&mock_server)
            .await;

        let genres = client_for(&mock_server).get_genres().await;
        assert_eq!(genres.len(), 6);
        assert_eq!(genres[0].id, "electronic");
    }
}

// =============================================================================
// Fallback Tests
// =============================================================================

mod fallback {
    use super::*;

    #[tokio::test]
    async fn test_server_error_reported_by_try() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tracks/"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&mock_server)
            .await;

        let result = client_for(&mock_server).try_featured_tracks(20).await;
        match result {
            Err(CatalogError::ServerError { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("Expected ServerError, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_results_falls_back_to_local() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tracks/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "headers": { "status": "failed", "error_message": "bad client id" }
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert!(matches!(
            client.try_featured_tracks(20).await,
            Err(CatalogError::MissingResults)
        ));

        let tracks = client.get_featured_tracks(20).await;
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].id, "local-1");

        // Fallback honours the limit
        assert!(client.get_new_releases(0).await.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json_falls_back() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tracks/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert!(matches!(
            client.try_new_releases(5).await,
            Err(CatalogError::ParseError(_))
        ));

        let electronic = client.get_tracks_by_genre("ELECTRONIC", None).await;
        assert_eq!(electronic.len(), 1);
        assert!(client.get_tracks_by_genre("jazz", None).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_failure_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tracks/search"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        assert!(client_for(&mock_server)
            .search_tracks("anything", 20)
            .await
            .is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_server_falls_back() {
        let config = CatalogConfig::new("id").with_base_url("http://127.0.0.1:9");
        let client = CatalogClient::new(config).unwrap();

        assert!(matches!(
            client.try_genres().await,
            Err(CatalogError::Request(_))
        ));
        assert_eq!(client.get_genres().await.len(), 6);
    }
}

// =============================================================================
// Trait & Audio Tests
// =============================================================================

mod catalog_trait {
    use super::*;

    #[tokio::test]
    async fn test_fetch_tracks_dispatches_query() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/tracks/search"))
            .and(query_param("search", "blue"))
            .and(query_param("limit", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [api_track(4, "Blue")]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let catalog: Box<dyn TrackCatalog> = Box::new(client_for(&mock_server));
        let tracks = catalog
            .fetch_tracks(&CatalogQuery::Search("blue".to_string()), 7)
            .await;
        assert_eq!(tracks[0].title, "Blue");
    }

    #[tokio::test]
    async fn test_verify_audio_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/ok.mp3"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;
        Mock::given(method("HEAD"))
            .and(path("/gone.mp3"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        assert!(client.verify_audio_url(&format!("{}/ok.mp3", mock_server.uri())).await);
        assert!(!client.verify_audio_url(&format!("{}/gone.mp3", mock_server.uri())).await);
        assert!(!client.verify_audio_url("").await);
        assert!(!client.verify_audio_url("not a url").await);
    }
}
