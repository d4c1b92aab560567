//! Tests for the Nebula API client.
//!
//! These tests use mock servers to verify client behavior without
//! requiring a running backend.

use nebula_api_client::{ApiClientError, ApiConfig, NebulaClient};
use nebula_core::{MusicBackend, NebulaError, PlaylistId, Track, TrackId};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> NebulaClient {
    NebulaClient::new(ApiConfig::new(server.uri())).unwrap()
}

// =============================================================================
// Client Creation Tests
// =============================================================================

mod client_creation {
    use super::*;

    #[test]
    fn test_default_config_points_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, nebula_api_client::DEFAULT_BASE_URL);
        assert!(NebulaClient::new(config).is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        match NebulaClient::new(ApiConfig::new("  ")).unwrap_err() {
            ApiClientError::InvalidUrl(msg) => assert!(msg.contains("empty")),
            e => panic!("Expected InvalidUrl error, got: {:?}", e),
        }
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        match NebulaClient::new(ApiConfig::new("127.0.0.1:8000")).unwrap_err() {
            ApiClientError::InvalidUrl(msg) => {
                assert!(msg.contains("http://") || msg.contains("https://"));
            }
            e => panic!("Expected InvalidUrl error, got: {:?}", e),
        }
    }
}

// =============================================================================
// Catalog Tests
// =============================================================================

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_search_normalizes_titles() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "one dance"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "videoId": "abc",
                    "title": "Drake - One Dance (Official Video)",
                    "channel": "DrakeVEVO",
                    "thumbnail": "https://img/abc.jpg"
                },
                {
                    "videoId": "def",
                    "title": "One Dance | Lyrics",
                    "channel": "Lyric Channel",
                    "thumbnail": "https://img/def.jpg"
                }
            ])))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let results = client.catalog().search("one dance").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id.as_str(), "abc");
        assert_eq!(results[0].title, "One Dance");
        assert_eq!(results[0].artist, "Drake");
        assert_eq!(results[1].title, "One Dance");
        assert_eq!(results[1].artist, "Lyric Channel");
    }

    #[tokio::test]
    async fn test_search_null_body_is_empty() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        assert!(client.catalog().search("x").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_stream_sends_watch_url() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stream"))
            .and(query_param("url", "https://www.youtube.com/watch?v=abc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"url": "https://cdn.example/abc.m4a"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let url = client
            .catalog()
            .resolve_stream(&TrackId::new("abc"))
            .await
            .unwrap();

        assert_eq!(url.as_deref(), Some("https://cdn.example/abc.m4a"));
    }

    #[tokio::test]
    async fn test_resolve_stream_without_url_field() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/stream"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "blocked"})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let url = client
            .catalog()
            .resolve_stream(&TrackId::new("abc"))
            .await
            .unwrap();

        assert!(url.is_none());
    }

    #[tokio::test]
    async fn test_track_info_duration() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/track_info"))
            .and(query_param("video_id", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"duration": 212})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let info = client.track_info(&TrackId::new("abc")).await.unwrap();

        assert_eq!(info.duration().map(|d| d.as_secs()), Some(212));
    }

    #[tokio::test]
    async fn test_autoplay_drops_seed_from_continuation() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/autoplay/upnext"))
            .and(query_param("videoId", "seed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "upnext": [
                    {"videoId": "seed", "title": "Seed", "artist": "A"},
                    {"videoId": "y", "title": "Y", "artist": "B"},
                    {"videoId": "z", "title": "Z", "artist": "C"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let upnext = client.autoplay_upnext(&TrackId::new("seed")).await.unwrap();

        let ids: Vec<&str> = upnext.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["y", "z"]);
    }
}

// =============================================================================
// Likes Tests
// =============================================================================

mod likes {
    use super::*;

    #[tokio::test]
    async fn test_toggle_returns_server_flag() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/like"))
            .and(query_param("videoId", "abc"))
            .and(query_param("title", "One Dance"))
            .and(query_param("artist", "Drake"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"liked": false})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let liked = client
            .like(&Track::new("abc", "One Dance", "Drake"))
            .await
            .unwrap();

        assert!(!liked);
    }

    #[tokio::test]
    async fn test_toggle_without_flag_is_an_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/like"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let result = client.likes().toggle(&Track::new("abc", "t", "a")).await;

        assert!(matches!(result, Err(ApiClientError::MissingField(_))));
    }

    #[tokio::test]
    async fn test_liked_list() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/liked/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "liked": [
                    {"videoId": "a", "title": "A", "artist": "X", "thumbnail": "t"},
                    {"videoId": "b", "title": "B", "artist": "Y"}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let liked = client.liked().await.unwrap();

        assert_eq!(liked.len(), 2);
        assert_eq!(liked[1].title, "B");
    }

    #[tokio::test]
    async fn test_unlike_server_error_maps_to_api_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/unlike"))
            .and(query_param("videoId", "a"))
            .respond_with(ResponseTemplate::new(500).set_body_string("db locked"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.unlike(&TrackId::new("a")).await.unwrap_err();

        match err {
            NebulaError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "db locked");
            }
            e => panic!("Expected Api error, got: {:?}", e),
        }
    }
}

// =============================================================================
// Playlist Tests
// =============================================================================

mod playlists {
    use super::*;

    #[tokio::test]
    async fn test_list_playlists() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/playlist/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "playlists": [
                    {"id": 1, "name": "Chill", "songs": [
                        {"videoId": "a", "title": "A", "artist": "X"}
                    ]},
                    {"id": 2, "name": "Empty", "songs": []}
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let playlists = client.playlist().list().await.unwrap();

        assert_eq!(playlists.len(), 2);
        assert_eq!(playlists[0].id, PlaylistId::new("1"));
        assert_eq!(playlists[0].tracks[0].id.as_str(), "a");
        assert!(playlists[1].is_empty());
    }

    #[tokio::test]
    async fn test_create_accepts_nested_id() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/playlist/create"))
            .and(body_json(json!({"name": "Gym"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"playlist": {"id": 9, "name": "Gym"}})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let id = client.create_playlist("Gym").await.unwrap();

        assert_eq!(id, PlaylistId::new("9"));
    }

    #[tokio::test]
    async fn test_create_without_id_fails() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/playlist/create"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "created"})))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let err = client.create_playlist("Gym").await.unwrap_err();

        assert!(matches!(err, NebulaError::Parse(_)));
    }

    #[tokio::test]
    async fn test_add_posts_full_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/playlist/add"))
            .and(body_json(json!({
                "playlist_id": 4,
                "videoId": "abc",
                "title": "One Dance",
                "artist": "Drake",
                "thumbnail": "https://img/abc.jpg"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        let track = Track::new("abc", "One Dance", "Drake").with_thumbnail("https://img/abc.jpg");
        client
            .add_to_playlist(&PlaylistId::new("4"), &track)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_uses_query_param() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/playlist/delete"))
            .and(query_param("playlist_id", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "deleted"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server).await;
        client.delete_playlist(&PlaylistId::new("4")).await.unwrap();
    }
}

// =============================================================================
// Connection Failure Tests
// =============================================================================

mod connection {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_backend_is_transient() {
        // Nothing listens on port 9 (discard) in the test environment
        let client = NebulaClient::new(ApiConfig::new("http://127.0.0.1:9")).unwrap();

        let err = client.search("anything").await.unwrap_err();
        assert!(err.is_transient(), "expected network error, got {:?}", err);
    }
}
