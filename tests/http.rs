use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TodayResponse {
    date: String,
    mood: String,
    note: String,
    dirty: bool,
    status: String,
    history: Vec<EntryResponse>,
    summary: SummaryResponse,
}

#[derive(Debug, Deserialize)]
struct SummaryResponse {
    total_entries: usize,
    weeks_tracked: usize,
}

#[derive(Debug, Deserialize)]
struct EntryResponse {
    date: String,
    mood: String,
    note: String,
    timestamp: i64,
    display_date: String,
    is_today: bool,
}

#[derive(Debug, Deserialize)]
struct FlushResponse {
    saved: bool,
}

#[derive(Debug, Deserialize)]
struct CalendarDay {
    date: String,
    in_month: bool,
}

#[derive(Debug, Deserialize)]
struct CalendarResponse {
    year: i32,
    month: u32,
    title: String,
    days: Vec<CalendarDay>,
}

const SAVE_DELAY_MS: u64 = 50;

struct TestServer {
    base_url: String,
    child: Child,
    data_dir: TempDir,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::{Once, OnceLock};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);
    // The shared server lives in a static and is never dropped, so its data
    // dir is removed here instead.
    static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

    pub fn register(pid: u32, data_dir: &Path) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            let _ = DATA_DIR.set(data_dir.to_path_buf());
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
        if let Some(dir) = DATA_DIR.get() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/today")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_dir = tempfile::Builder::new()
        .prefix("mood_journal_http_")
        .tempdir()
        .expect("create data dir");
    let child = Command::new(env!("CARGO_BIN_EXE_mood_journal"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_dir.path())
        .env("MOOD_SAVE_DELAY_MS", SAVE_DELAY_MS.to_string())
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id(), data_dir.path());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer {
        base_url,
        child,
        data_dir,
    }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn today(client: &Client, server: &TestServer) -> TodayResponse {
    client
        .get(format!("{}/api/today", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn post_json(
    client: &Client,
    server: &TestServer,
    path: &str,
    body: serde_json::Value,
) -> TodayResponse {
    let response = client
        .post(format!("{}{path}", server.base_url))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

async fn flush(client: &Client, server: &TestServer) -> bool {
    let response: FlushResponse = client
        .post(format!("{}/api/today/flush", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    response.saved
}

#[tokio::test]
async fn http_mood_and_note_autosave_after_quiet_period() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let mood = serde_json::json!({ "mood": "😊" });
    let edited = post_json(&client, &server, "/api/today/mood", mood).await;
    assert_eq!(edited.mood, "😊");
    assert!(edited.dirty);
    assert_eq!(edited.status, "saving");

    let note = serde_json::json!({ "note": "sunny walk" });
    post_json(&client, &server, "/api/today/note", note).await;
    sleep(Duration::from_millis(SAVE_DELAY_MS * 8)).await;

    let current = today(&client, &server).await;
    assert!(!current.dirty);
    assert_eq!(current.status, "saved");
    assert_eq!(current.note, "sunny walk");
    let row = current
        .history
        .iter()
        .find(|entry| entry.date == current.date)
        .expect("today in history");
    assert!(row.is_today);
    assert_eq!(row.mood, "😊");
    assert_eq!(current.summary.total_entries, current.history.len());
    assert!(current.summary.weeks_tracked >= 1);

    let stored: EntryResponse = client
        .get(format!("{}/api/entries/{}", server.base_url, current.date))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stored.note, "sunny walk");
    assert!(stored.timestamp > 0);
    assert!(!stored.display_date.is_empty());
    assert!(server.data_dir.path().join("mood-journal-data.json").exists());
}

#[tokio::test]
async fn http_clear_today_leaves_stored_entry() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let mood = serde_json::json!({ "mood": "😡" });
    post_json(&client, &server, "/api/today/mood", mood).await;
    assert!(flush(&client, &server).await);

    let cleared = post_json(&client, &server, "/api/today/clear", serde_json::json!({})).await;
    assert_eq!(cleared.mood, "");
    assert!(!flush(&client, &server).await);

    let current = today(&client, &server).await;
    assert!(current.dirty);
    let response = client
        .get(format!("{}/api/entries/{}", server.base_url, current.date))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let stored: EntryResponse = response.json().await.unwrap();
    assert_eq!(stored.mood, "😡");
}

#[tokio::test]
async fn http_delete_and_reset_remove_entries() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let mood = serde_json::json!({ "mood": "😴" });
    post_json(&client, &server, "/api/today/mood", mood).await;
    assert!(flush(&client, &server).await);
    let date = today(&client, &server).await.date;

    let deleted = client
        .delete(format!("{}/api/entries/{date}", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(deleted.status().is_success());
    let missing = client
        .get(format!("{}/api/entries/{date}", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
    assert!(today(&client, &server).await.history.iter().all(|entry| entry.date != date));

    assert!(flush(&client, &server).await);
    let reset = client
        .post(format!("{}/api/reset", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(reset.status().is_success());
    let entries: Vec<EntryResponse> = client
        .get(format!("{}/api/entries", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(entries.is_empty());
    let summary = today(&client, &server).await.summary;
    assert_eq!(summary.total_entries, 0);
    assert_eq!(summary.weeks_tracked, 1);
}

#[tokio::test]
async fn http_rejects_bad_input() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let bad_date = client
        .delete(format!("{}/api/entries/last-tuesday", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_date.status().as_u16(), 400);

    let long_mood = client
        .post(format!("{}/api/today/mood", server.base_url))
        .json(&serde_json::json!({ "mood": "x".repeat(64) }))
        .send()
        .await
        .unwrap();
    assert_eq!(long_mood.status().as_u16(), 400);

    let bad_month = client
        .get(format!("{}/api/calendar?year=2024&month=13", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(bad_month.status().as_u16(), 400);

    for query in ["year=262142&month=12", "year=-262143&month=1"] {
        let edge = client
            .get(format!("{}/api/calendar?{query}", server.base_url))
            .send()
            .await
            .unwrap();
        assert_eq!(edge.status().as_u16(), 400);
    }
}

#[tokio::test]
async fn http_calendar_has_six_weeks() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let calendar: CalendarResponse = client
        .get(format!("{}/api/calendar?year=2024&month=3", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!((calendar.year, calendar.month), (2024, 3));
    assert_eq!(calendar.title, "March 2024");
    assert_eq!(calendar.days.len(), 42);
    assert_eq!(calendar.days[0].date, "2024-02-25");
    assert_eq!(calendar.days.iter().filter(|day| day.in_month).count(), 31);
}

#[tokio::test]
async fn http_index_serves_page() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let body = Client::new()
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Mood Journal"));
    assert!(body.contains("data-mood=\"😢\""));
}
