//! End-to-end shell sessions against an in-memory catalog and store

use async_trait::async_trait;
use melody_catalog::{CatalogQuery, TrackCatalog};
use melody_cli::{FileStore, Flow, Shell, ShellCommand};
use melody_core::{keys, Genre, KeyValueStore, MemoryStore, Track};
use melody_playback::{PlaybackConfig, PlaybackQueueManager};
use melody_session::UserSession;
use std::rc::Rc;

// ===== Test Helpers =====

struct StaticCatalog {
    tracks: Vec<Track>,
}

#[async_trait]
impl TrackCatalog for StaticCatalog {
    async fn fetch_tracks(&self, query: &CatalogQuery, limit: u32) -> Vec<Track> {
        let matching = self.tracks.iter().filter(|t| match query {
            CatalogQuery::Featured | CatalogQuery::NewReleases => true,
            CatalogQuery::Search(text) => t.title.to_lowercase().contains(&text.to_lowercase()),
            CatalogQuery::Genre(id) => t.genre == *id,
        });
        matching.take(limit as usize).cloned().collect()
    }

    async fn fetch_genres(&self) -> Vec<Genre> {
        vec![Genre {
            id: "jazz".to_string(),
            name: "Jazz".to_string(),
            cover: String::new(),
            track_count: 2,
        }]
    }
}

fn catalog() -> StaticCatalog {
    let track = |id: &str, title: &str, genre: &str| Track {
        id: id.to_string(),
        title: title.to_string(),
        artist: "Band".to_string(),
        album: "Single".to_string(),
        genre: genre.to_string(),
        duration: 200,
        ..Default::default()
    };

    StaticCatalog {
        tracks: vec![
            track("1", "Blue Train", "jazz"),
            track("2", "Night Drive", "electronic"),
            track("3", "So What", "jazz"),
        ],
    }
}

fn player_for(store: Rc<dyn KeyValueStore>, session: Rc<UserSession>) -> PlaybackQueueManager {
    let config = PlaybackConfig {
        shuffle_seed: Some(7),
        ..Default::default()
    };
    PlaybackQueueManager::with_config(config, store, session)
}

async fn run_script(store: Rc<dyn KeyValueStore>, script: &str) -> (String, Vec<String>) {
    let catalog = catalog();
    let session = Rc::new(UserSession::load(Rc::clone(&store)));
    let player = player_for(Rc::clone(&store), Rc::clone(&session));
    let mut shell = Shell::new(player, session, &catalog, 20);

    let mut out = Vec::new();
    shell
        .run(tokio::io::BufReader::new(script.as_bytes()), &mut out)
        .await
        .unwrap();

    let queue = shell.player().queue().iter().map(|t| t.id.clone()).collect();
    (String::from_utf8(out).unwrap(), queue)
}

// ===== Tests =====

#[tokio::test]
async fn load_and_navigate() {
    let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
    let (output, queue) = run_script(
        store,
        "load featured 2\nnext\nnext\nloop all\nnext\nstatus\nquit\nnext\n",
    )
    .await;

    assert_eq!(queue, vec!["1", "2", "3"]);
    assert!(output.contains("Queue: 3 tracks"));
    assert!(output.contains("Now playing   2. Night Drive"));
    assert!(output.contains("Now playing   3. So What"));
    assert!(output.contains("End of queue"));
    assert!(output.contains("Loop all"));
    assert!(output.contains("Now playing   1. Blue Train"));
    assert!(output.contains("Playing:   1. Blue Train"));
}

#[tokio::test]
async fn search_and_genre_queries() {
    let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
    let (_, queue) = run_script(Rc::clone(&store), "load genre jazz\n").await;
    assert_eq!(queue, vec!["1", "3"]);

    let (output, queue) = run_script(store, "load search night\nload search nothing\n").await;
    assert_eq!(queue, vec!["2"]);
    assert!(output.contains("No tracks found"));
}

#[tokio::test]
async fn favorites_need_login() {
    let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
    let (output, _) = run_script(
        Rc::clone(&store),
        "load featured\nfav\nlogin ana\nfav 3\nfavorites\nlogout\n",
    )
    .await;

    assert!(output.contains("! You must be logged in to add favorites"));
    assert!(output.contains("Logged in as ana"));
    assert!(output.contains("Added 3 to favorites"));
    assert!(output.contains("So What"));

    let stored: Vec<Track> =
        serde_json::from_str(&store.get(keys::FAVORITES).unwrap().unwrap()).unwrap();
    assert_eq!(stored.len(), 1);
    assert!(store.get(keys::IS_LOGGED_IN).unwrap().is_none());
}

#[tokio::test]
async fn errors_keep_the_shell_running() {
    let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
    let (output, queue) = run_script(store, "dance\nplay 9\nload featured\nplay 9\nplay 2\n").await;

    assert!(output.contains("error: Invalid command: dance"));
    assert!(output.contains("error: Playback error: Index out of bounds"));
    assert_eq!(queue.len(), 3);
    assert!(output.contains("Now playing   2. Night Drive"));
}

#[tokio::test]
async fn shuffle_round_trip_in_shell() {
    let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
    let (output, queue) = run_script(store, "load featured 2\nshuffle on\nshuffle off\n").await;

    assert!(output.contains("Shuffle on"));
    assert!(output.contains("Shuffle off"));
    assert_eq!(queue, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn state_survives_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");

    {
        let store: Rc<dyn KeyValueStore> = Rc::new(FileStore::open(&path).unwrap());
        run_script(store, "login ana\nload featured\nplay 3\nfav\n").await;
    }

    let store: Rc<dyn KeyValueStore> = Rc::new(FileStore::open(&path).unwrap());
    let (output, _) = run_script(store, "status\nrecent\nfavorites\n").await;

    assert!(output.contains("User: ana"));
    let recent_at = output.find(" 1. So What").unwrap();
    assert!(output[recent_at..].contains(" 2. Blue Train"));
}

#[tokio::test]
async fn execute_reports_quit() {
    let catalog = catalog();
    let store: Rc<dyn KeyValueStore> = Rc::new(MemoryStore::new());
    let session = Rc::new(UserSession::load(Rc::clone(&store)));
    let player = player_for(store, Rc::clone(&session));
    let mut shell = Shell::new(player, session, &catalog, 20);

    let mut out = Vec::new();
    assert_eq!(
        shell.execute(ShellCommand::Genres, &mut out).await.unwrap(),
        Flow::Continue
    );
    assert_eq!(
        shell.execute(ShellCommand::Quit, &mut out).await.unwrap(),
        Flow::Quit
    );
    assert!(String::from_utf8(out).unwrap().contains("jazz"));
}
