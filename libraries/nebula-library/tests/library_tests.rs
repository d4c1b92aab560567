//! Tests for the library controllers.
//!
//! The backend is a mockall mock, so every test states exactly which calls
//! it expects.

use async_trait::async_trait;
use mockall::{mock, Sequence};
use nebula_core::{
    KeyValueStore, MemoryStore, MusicBackend, NebulaError, Playlist, PlaylistId, Result, Track,
    TrackId, TrackInfo,
};
use nebula_library::{
    default_themes, DiscoverFeed, LikedSetController, MixCache, MixTheme,
    PlaylistMembershipController, DISCOVER_MOODS, DISCOVER_SIZE, MIXES_KEY, MIX_SIZE,
    TOP_TRACKS_QUERY, TOP_TRACKS_SIZE,
};
use std::sync::Arc;

mock! {
    pub Backend {}

    #[async_trait]
    impl MusicBackend for Backend {
        async fn search(&self, query: &str) -> Result<Vec<Track>>;
        async fn resolve_stream(&self, track_id: &TrackId) -> Result<Option<String>>;
        async fn track_info(&self, track_id: &TrackId) -> Result<TrackInfo>;
        async fn autoplay_upnext(&self, seed: &TrackId) -> Result<Vec<Track>>;
        async fn like(&self, track: &Track) -> Result<bool>;
        async fn unlike(&self, track_id: &TrackId) -> Result<()>;
        async fn liked(&self) -> Result<Vec<Track>>;
        async fn playlists(&self) -> Result<Vec<Playlist>>;
        async fn create_playlist(&self, name: &str) -> Result<PlaylistId>;
        async fn add_to_playlist(&self, playlist_id: &PlaylistId, track: &Track) -> Result<()>;
        async fn delete_playlist(&self, playlist_id: &PlaylistId) -> Result<()>;
    }
}

fn track(id: &str) -> Track {
    Track::new(id, format!("Track {id}"), "Test Artist")
}

fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id)).collect()
}

// =============================================================================
// Liked Songs Tests
// =============================================================================

mod liked {
    use super::*;

    #[tokio::test]
    async fn test_refresh_replaces_local_set() {
        let mut backend = MockBackend::new();
        let mut seq = Sequence::new();
        backend
            .expect_liked()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(tracks(&["a", "b"])));
        backend
            .expect_liked()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(tracks(&["c"])));

        let liked = LikedSetController::new(Arc::new(backend));

        liked.refresh().await.unwrap();
        assert_eq!(liked.len().await, 2);
        assert!(liked.is_liked(&TrackId::new("a")).await);

        let tracks = liked.refresh().await.unwrap();
        assert_eq!(tracks.len(), 1);
        assert!(!liked.is_liked(&TrackId::new("a")).await);
        assert!(liked.is_liked(&TrackId::new("c")).await);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_membership() {
        let mut backend = MockBackend::new();
        let mut seq = Sequence::new();
        backend
            .expect_like()
            .withf(|t| t.id.as_str() == "a")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        backend
            .expect_like()
            .withf(|t| t.id.as_str() == "a")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));

        let liked = LikedSetController::new(Arc::new(backend));
        let a = track("a");

        assert!(liked.toggle(&a).await.unwrap());
        assert!(liked.is_liked(&a.id).await);
        assert_eq!(liked.tracks().await, vec![a.clone()]);

        assert!(!liked.toggle(&a).await.unwrap());
        assert!(!liked.is_liked(&a.id).await);
        assert!(liked.is_empty().await);
    }

    #[tokio::test]
    async fn test_toggle_follows_server_not_local_guess() {
        // Already liked server-side: the toggle reports "liked" again
        let mut backend = MockBackend::new();
        backend
            .expect_liked()
            .returning(|| Ok(tracks(&["a"])));
        backend.expect_like().returning(|_| Ok(true));

        let liked = LikedSetController::new(Arc::new(backend));
        liked.refresh().await.unwrap();

        assert!(liked.toggle(&track("a")).await.unwrap());
        assert!(liked.is_liked(&TrackId::new("a")).await);
        assert_eq!(liked.len().await, 1);
    }

    #[tokio::test]
    async fn test_toggle_failure_leaves_set_unchanged() {
        let mut backend = MockBackend::new();
        backend
            .expect_like()
            .returning(|_| Err(NebulaError::network("connection refused")));

        let liked = LikedSetController::new(Arc::new(backend));

        let err = liked.toggle(&track("a")).await.unwrap_err();
        assert!(err.is_transient());
        assert!(liked.is_empty().await);
    }

    #[tokio::test]
    async fn test_unlike_removes_locally_after_server_confirms() {
        let mut backend = MockBackend::new();
        backend
            .expect_liked()
            .returning(|| Ok(tracks(&["a", "b"])));
        backend
            .expect_unlike()
            .withf(|id| id.as_str() == "a")
            .times(1)
            .returning(|_| Ok(()));

        let liked = LikedSetController::new(Arc::new(backend));
        liked.refresh().await.unwrap();
        liked.unlike(&TrackId::new("a")).await.unwrap();

        let ids = liked.ids().await;
        assert_eq!(ids.len(), 1);
        assert!(ids.contains(&TrackId::new("b")));
    }

    #[tokio::test]
    async fn test_unlike_failure_keeps_track() {
        let mut backend = MockBackend::new();
        backend
            .expect_liked()
            .returning(|| Ok(tracks(&["a"])));
        backend.expect_unlike().returning(|_| {
            Err(NebulaError::Api {
                status: 500,
                message: "db locked".into(),
            })
        });

        let liked = LikedSetController::new(Arc::new(backend));
        liked.refresh().await.unwrap();

        assert!(liked.unlike(&TrackId::new("a")).await.is_err());
        assert!(liked.is_liked(&TrackId::new("a")).await);
    }
}

// =============================================================================
// Playlist Tests
// =============================================================================

mod playlists {
    use super::*;

    #[tokio::test]
    async fn test_list_all_refreshes_cache() {
        let mut backend = MockBackend::new();
        backend.expect_playlists().times(1).returning(|| {
            let mut chill = Playlist::new("1", "Chill");
            chill.tracks = tracks(&["a"]);
            Ok(vec![chill, Playlist::new("2", "Empty")])
        });

        let playlists = PlaylistMembershipController::new(Arc::new(backend));
        assert!(playlists.cached().await.is_empty());

        let fetched = playlists.list_all().await.unwrap();
        assert_eq!(fetched.len(), 2);
        assert_eq!(playlists.cached().await, fetched);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name_locally() {
        let mut backend = MockBackend::new();
        backend.expect_create_playlist().never();

        let playlists = PlaylistMembershipController::new(Arc::new(backend));

        let err = playlists.create("   ").await.unwrap_err();
        assert!(matches!(err, NebulaError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_create_trims_name_and_caches() {
        let mut backend = MockBackend::new();
        backend
            .expect_create_playlist()
            .withf(|name| name == "Road Trip")
            .times(1)
            .returning(|_| Ok(PlaylistId::new("7")));

        let playlists = PlaylistMembershipController::new(Arc::new(backend));
        let id = playlists.create("  Road Trip ").await.unwrap();

        assert_eq!(id, PlaylistId::new("7"));
        let cached = playlists.cached().await;
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].name, "Road Trip");
    }

    #[tokio::test]
    async fn test_create_failure_is_surfaced() {
        let mut backend = MockBackend::new();
        backend
            .expect_create_playlist()
            .returning(|_| Err(NebulaError::parse("response is missing playlist id")));

        let playlists = PlaylistMembershipController::new(Arc::new(backend));

        assert!(matches!(
            playlists.create("Gym").await,
            Err(NebulaError::Parse(_))
        ));
        assert!(playlists.cached().await.is_empty());
    }

    #[tokio::test]
    async fn test_add_track_fills_missing_thumbnail() {
        let mut backend = MockBackend::new();
        backend
            .expect_add_to_playlist()
            .withf(|id, track| {
                id.as_str() == "4"
                    && track.thumbnail.as_deref()
                        == Some("https://img.youtube.com/vi/abc/mqdefault.jpg")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let playlists = PlaylistMembershipController::new(Arc::new(backend));
        playlists
            .add_track(&PlaylistId::new("4"), &track("abc"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_add_track_failure_is_not_retried() {
        let mut backend = MockBackend::new();
        backend
            .expect_add_to_playlist()
            .times(1)
            .returning(|_, _| Err(NebulaError::network("timeout")));

        let playlists = PlaylistMembershipController::new(Arc::new(backend));

        assert!(playlists
            .add_track(&PlaylistId::new("4"), &track("abc"))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_create_and_add() {
        let mut backend = MockBackend::new();
        let mut seq = Sequence::new();
        backend
            .expect_create_playlist()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(PlaylistId::new("9")));
        backend
            .expect_add_to_playlist()
            .withf(|id, track| id.as_str() == "9" && track.id.as_str() == "abc")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let playlists = PlaylistMembershipController::new(Arc::new(backend));
        let id = playlists.create_and_add("Gym", &track("abc")).await.unwrap();

        assert_eq!(id, PlaylistId::new("9"));
        let cached = playlists.cached().await;
        assert!(cached[0].contains(&TrackId::new("abc")));
    }

    #[tokio::test]
    async fn test_delete_removes_from_cache() {
        let mut backend = MockBackend::new();
        backend
            .expect_playlists()
            .returning(|| Ok(vec![Playlist::new("1", "A"), Playlist::new("2", "B")]));
        backend
            .expect_delete_playlist()
            .withf(|id| id.as_str() == "1")
            .times(1)
            .returning(|_| Ok(()));

        let playlists = PlaylistMembershipController::new(Arc::new(backend));
        playlists.list_all().await.unwrap();
        playlists.delete(&PlaylistId::new("1")).await.unwrap();

        let cached = playlists.cached().await;
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, PlaylistId::new("2"));
    }
}

// =============================================================================
// Mix Tests
// =============================================================================

mod mixes {
    use super::*;

    fn many(prefix: &str, n: usize) -> Vec<Track> {
        (0..n).map(|i| track(&format!("{prefix}{i}"))).collect()
    }

    #[tokio::test]
    async fn test_build_keeps_first_six_and_caches() {
        let mut backend = MockBackend::new();
        backend
            .expect_search()
            .times(4)
            .returning(|query| Ok(many(&query[..3], 10)));

        let store = Arc::new(MemoryStore::new());
        let cache = MixCache::new(Arc::new(backend), store.clone());

        let mixes = cache.load_or_build(&default_themes()).await;
        assert_eq!(mixes.len(), 4);
        assert!(mixes.iter().all(|m| m.tracks.len() == MIX_SIZE));
        assert_eq!(mixes[0].name, "Lofi Chill Mix");

        assert!(store.get(MIXES_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_cached_mixes_served_without_network() {
        let mut backend = MockBackend::new();
        backend.expect_search().never();

        let store = Arc::new(MemoryStore::new());
        store
            .set(
                MIXES_KEY,
                r#"[{"name":"Evening Vibes","query":"q","songs":[{"videoId":"a","title":"A","artist":"X"}]}]"#,
            )
            .unwrap();

        let cache = MixCache::new(Arc::new(backend), store);
        let mixes = cache.load_or_build(&default_themes()).await;

        assert_eq!(mixes.len(), 1);
        assert_eq!(mixes[0].tracks[0].id.as_str(), "a");
    }

    #[tokio::test]
    async fn test_failing_theme_yields_empty_mix() {
        let mut backend = MockBackend::new();
        backend
            .expect_search()
            .withf(|q| q == "good")
            .returning(|_| Ok(many("g", 3)));
        backend
            .expect_search()
            .withf(|q| q == "bad")
            .returning(|_| Err(NebulaError::network("reset")));

        let themes = vec![MixTheme::new("Good", "good"), MixTheme::new("Bad", "bad")];
        let cache = MixCache::new(Arc::new(backend), Arc::new(MemoryStore::new()));

        let mixes = cache.load_or_build(&themes).await;
        assert_eq!(mixes[0].tracks.len(), 3);
        assert!(mixes[1].tracks.is_empty());
        assert!(cache.cached().is_some());
    }

    #[tokio::test]
    async fn test_all_empty_is_not_cached() {
        let mut backend = MockBackend::new();
        backend
            .expect_search()
            .returning(|_| Err(NebulaError::network("backend down")));

        let cache = MixCache::new(Arc::new(backend), Arc::new(MemoryStore::new()));

        let mixes = cache.load_or_build(&default_themes()).await;
        assert_eq!(mixes.len(), 4);
        assert!(cache.cached().is_none());
    }

    #[tokio::test]
    async fn test_clear_forces_rebuild() {
        let mut backend = MockBackend::new();
        backend
            .expect_search()
            .times(2)
            .returning(|_| Ok(many("t", 2)));

        let themes = vec![MixTheme::new("Only", "only")];
        let cache = MixCache::new(Arc::new(backend), Arc::new(MemoryStore::new()));

        cache.load_or_build(&themes).await;
        cache.load_or_build(&themes).await;
        cache.clear().unwrap();
        cache.load_or_build(&themes).await;
    }

    #[tokio::test]
    async fn test_malformed_cache_is_rebuilt() {
        let mut backend = MockBackend::new();
        backend
            .expect_search()
            .times(1)
            .returning(|_| Ok(many("t", 1)));

        let store = Arc::new(MemoryStore::new());
        store.set(MIXES_KEY, "not json").unwrap();

        let cache = MixCache::new(Arc::new(backend), store);
        let mixes = cache
            .load_or_build(&[MixTheme::new("Only", "only")])
            .await;

        assert_eq!(mixes[0].tracks.len(), 1);
    }
}

// =============================================================================
// Discover Tests
// =============================================================================

mod discover {
    use super::*;

    fn many(prefix: &str, n: usize) -> Vec<Track> {
        (0..n).map(|i| track(&format!("{prefix}{i}"))).collect()
    }

    #[tokio::test]
    async fn test_top_tracks_keeps_first_six() {
        let mut backend = MockBackend::new();
        backend
            .expect_search()
            .withf(|q| q == TOP_TRACKS_QUERY)
            .times(1)
            .returning(|_| Ok(many("top", 10)));

        let feed = DiscoverFeed::new(Arc::new(backend));
        let tracks = feed.top_tracks().await.unwrap();

        assert_eq!(tracks.len(), TOP_TRACKS_SIZE);
        assert_eq!(tracks[0].id.as_str(), "top0");
        assert_eq!(tracks[5].id.as_str(), "top5");
    }

    #[tokio::test]
    async fn test_top_tracks_failure_is_returned() {
        let mut backend = MockBackend::new();
        backend
            .expect_search()
            .returning(|_| Err(NebulaError::network("timed out")));

        let feed = DiscoverFeed::new(Arc::new(backend));
        assert!(feed.top_tracks().await.unwrap_err().is_transient());
    }

    #[tokio::test]
    async fn test_discover_mood_keeps_first_twenty() {
        let mut backend = MockBackend::new();
        backend
            .expect_search()
            .withf(|q| q == "indie")
            .times(1)
            .returning(|_| Ok(many("i", 30)));

        let feed = DiscoverFeed::new(Arc::new(backend));
        let discovery = feed.discover_mood("indie").await.unwrap();

        assert_eq!(discovery.mood, "indie");
        assert_eq!(discovery.tracks.len(), DISCOVER_SIZE);
    }

    #[tokio::test]
    async fn test_random_discover_searches_a_known_mood() {
        let mut backend = MockBackend::new();
        backend
            .expect_search()
            .withf(|q| DISCOVER_MOODS.contains(&q))
            .times(1)
            .returning(|_| Ok(many("m", 3)));

        let feed = DiscoverFeed::new(Arc::new(backend));
        let discovery = feed.discover().await.unwrap();

        assert!(DISCOVER_MOODS.contains(&discovery.mood.as_str()));
        assert_eq!(discovery.tracks.len(), 3);
    }
}
