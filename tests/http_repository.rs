//! Integration tests for the HTTP repository against an in-process fake API.
//!
//! The fake is a small axum router bound to an ephemeral local port. It
//! keeps users in memory and answers failures with `{code, message}`
//! bodies the way the real directory service does.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use userdesk::config::ApiConfig;
use userdesk::console::{PromptKind, PromptOutcome, SubmitOutcome, UserConsole};
use userdesk::forms::FormAction;
use userdesk::models::{User, UserDraft, UserId};
use userdesk::notify::{Notification, Notifier};
use userdesk::repository::{HttpUserRepository, RepositoryError, UserRepository};

// ---------------------------------------------------------------------------
// Fake API
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Directory {
    users: Vec<User>,
    next_id: u64,
    last_auth: Option<String>,
}

type Db = Arc<Mutex<Directory>>;

type ApiError = (StatusCode, Json<Value>);

fn not_found(id: &str) -> ApiError {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"code": 404, "message": format!("No user with id {id}")})),
    )
}

async fn list(State(db): State<Db>, headers: HeaderMap) -> Json<Value> {
    let mut dir = db.lock().unwrap();
    dir.last_auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    Json(json!({ "all": dir.users }))
}

async fn create(State(db): State<Db>, Json(draft): Json<UserDraft>) -> Result<Json<User>, ApiError> {
    if draft.first_name.is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"message": "fName is required"})),
        ));
    }
    let mut dir = db.lock().unwrap();
    dir.next_id += 1;
    let user = User::from_draft(UserId::Number(dir.next_id), draft);
    dir.users.push(user.clone());
    Ok(Json(user))
}

/// Path ids are matched on their text form, so `007` and `7` differ.
fn has_id(user: &User, id: &str) -> bool {
    user.id.to_string() == id
}

async fn find(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<User>, ApiError> {
    let dir = db.lock().unwrap();
    dir.users
        .iter()
        .find(|u| has_id(u, &id))
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found(&id))
}

async fn update(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(draft): Json<UserDraft>,
) -> Result<Json<User>, ApiError> {
    let mut dir = db.lock().unwrap();
    let slot = dir
        .users
        .iter_mut()
        .find(|u| has_id(u, &id))
        .ok_or_else(|| not_found(&id))?;
    *slot = User::from_draft(slot.id.clone(), draft);
    Ok(Json(slot.clone()))
}

async fn remove(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<User>, ApiError> {
    let mut dir = db.lock().unwrap();
    let index = dir
        .users
        .iter()
        .position(|u| has_id(u, &id))
        .ok_or_else(|| not_found(&id))?;
    Ok(Json(dir.users.remove(index)))
}

/// Start the fake API and return its base URL and state.
async fn spawn_directory(seed: Vec<User>) -> (String, Db) {
    let next_id = seed.len() as u64;
    let db: Db = Arc::new(Mutex::new(Directory {
        users: seed,
        next_id,
        last_auth: None,
    }));

    let app = Router::new()
        .route("/api/users", get(list).post(create))
        .route("/api/users/{id}", get(find).put(update).delete(remove))
        .with_state(Arc::clone(&db));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), db)
}

/// Start a server that answers every request with the given status and body.
async fn spawn_failing(status: StatusCode, body: &'static str) -> String {
    let app = Router::new().fallback(move || async move { (status, body) });
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn repo(base_url: &str, token: Option<&str>) -> HttpUserRepository {
    HttpUserRepository::new(&ApiConfig {
        base_url: base_url.to_string(),
        token: token.map(String::from),
        timeout_secs: 5,
    })
    .unwrap()
}

fn draft(first: &str, last: &str) -> UserDraft {
    UserDraft {
        first_name: first.into(),
        last_name: last.into(),
        phone: "555-0199".into(),
        street: "2 Side St".into(),
        city: "Shelbyville".into(),
        zip: "54321".into(),
    }
}

fn seed() -> Vec<User> {
    vec![User::from_draft(UserId::Number(1), draft("Ada", "Lovelace"))]
}

// ---------------------------------------------------------------------------
// Repository round trips
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_and_find() {
    let (url, _db) = spawn_directory(seed()).await;
    let repo = repo(&url, None);

    let list = repo.list_users().await.unwrap();
    assert_eq!(list.all.len(), 1);
    assert_eq!(list.all[0].first_name, "Ada");

    let user = repo.find_user(&UserId::Number(1)).await.unwrap();
    assert_eq!(user.city, "Shelbyville");
}

#[tokio::test]
async fn find_missing_user_returns_structured_error() {
    let (url, _db) = spawn_directory(seed()).await;
    let err = repo(&url, None)
        .find_user(&UserId::Number(42))
        .await
        .unwrap_err();
    assert_eq!(err, RepositoryError::new(Some(404), "No user with id 42"));
}

#[tokio::test]
async fn add_edit_delete_round_trip() {
    let (url, db) = spawn_directory(seed()).await;
    let repo = repo(&url, None);

    let created = repo.add_user(&draft("Alan", "Turing")).await.unwrap();
    assert_eq!(created.id, UserId::Number(2));

    let mut changed = draft("Alan", "Turing");
    changed.city = "Manchester".into();
    let edited = repo.edit_user(&created.id, &changed).await.unwrap();
    assert_eq!(edited.city, "Manchester");

    let deleted = repo.delete_user(&created.id).await.unwrap();
    assert_eq!(deleted.city, "Manchester");
    assert_eq!(db.lock().unwrap().users.len(), 1);
}

#[tokio::test]
async fn error_without_code_uses_http_status() {
    let (url, _db) = spawn_directory(vec![]).await;
    let err = repo(&url, None).add_user(&UserDraft::default()).await.unwrap_err();
    assert_eq!(err.code, Some(422));
    assert_eq!(err.message, "fName is required");
}

fn text_seed() -> Vec<User> {
    vec![
        User::from_draft(UserId::Number(7), draft("Seven", "Numeric")),
        User::from_draft(UserId::Text("007".into()), draft("James", "Bond")),
    ]
}

#[tokio::test]
async fn text_ids_round_trip_through_the_path() {
    let (url, db) = spawn_directory(text_seed()).await;
    let repo = repo(&url, None);
    let id = UserId::Text("007".into());

    let found = repo.find_user(&id).await.unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.last_name, "Bond");

    let mut changed = found.draft();
    changed.city = "London".into();
    let edited = repo.edit_user(&id, &changed).await.unwrap();
    assert_eq!(edited.id, id);

    repo.delete_user(&id).await.unwrap();
    let left = db.lock().unwrap().users.clone();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, UserId::Number(7));
    assert_eq!(left[0].city, "Shelbyville");

    let err = repo.find_user(&UserId::Text("abc".into())).await.unwrap_err();
    assert_eq!(err, RepositoryError::new(Some(404), "No user with id abc"));
}

#[tokio::test]
async fn bearer_token_is_sent() {
    let (url, db) = spawn_directory(vec![]).await;
    repo(&url, Some("s3cret")).list_users().await.unwrap();
    assert_eq!(db.lock().unwrap().last_auth.as_deref(), Some("Bearer s3cret"));

    repo(&url, None).list_users().await.unwrap();
    assert_eq!(db.lock().unwrap().last_auth, None);
}

#[tokio::test]
async fn plain_text_failure_body_becomes_message() {
    let url = spawn_failing(StatusCode::SERVICE_UNAVAILABLE, "maintenance window").await;
    let err = repo(&url, None).list_users().await.unwrap_err();
    assert_eq!(err, RepositoryError::new(Some(503), "maintenance window"));
}

#[tokio::test]
async fn list_without_array_reads_as_empty() {
    let app = Router::new().route("/users", get(|| async { Json(json!({"all": "none"})) }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let list = repo(&format!("http://{addr}"), None).list_users().await.unwrap();
    assert!(list.all.is_empty());
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    // Bind then drop to get a port nobody listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = repo(&format!("http://{addr}"), None).list_users().await.unwrap_err();
    assert_eq!(err.code, None);
    assert!(err.message.contains("list users request failed"), "got: {}", err.message);
}

// ---------------------------------------------------------------------------
// Console over HTTP
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Collect(Mutex<Vec<Notification>>);

impl Notifier for Collect {
    fn notify(&self, notification: Notification) {
        self.0.lock().unwrap().push(notification);
    }
}

#[tokio::test]
async fn console_edits_a_user_end_to_end() {
    let (url, db) = spawn_directory(seed()).await;
    let console = UserConsole::new(repo(&url, None), Collect::default());

    let opened = console.prompt(PromptKind::Edit, &UserId::Number(1)).await;
    assert!(matches!(opened, PromptOutcome::Opened(_)));

    console.enter(FormAction::Edit, "phone", "555-0000").unwrap();
    let outcome = console.submit(FormAction::Edit).await;

    assert!(matches!(outcome, SubmitOutcome::Completed(ref u) if u.phone == "555-0000"));
    assert_eq!(db.lock().unwrap().users[0].phone, "555-0000");
    assert_eq!(console.users()[0].phone, "555-0000");

    let notes = console.notifier().0.lock().unwrap().clone();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].content, "User #1 Ada Lovelace was successfully edited.");
}

#[tokio::test]
async fn console_prompt_for_deleted_user_resyncs() {
    let (url, db) = spawn_directory(seed()).await;
    let console = UserConsole::new(repo(&url, None), Collect::default());
    console.refresh().await;

    // Someone else removes the record.
    db.lock().unwrap().users.clear();

    let outcome = console.prompt(PromptKind::Delete, &UserId::Number(1)).await;
    assert!(matches!(outcome, PromptOutcome::Resynced(_)));
    assert!(console.users().is_empty());
    assert_eq!(console.list_generation(), 2);

    let notes = console.notifier().0.lock().unwrap().clone();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].title, "Error - 404");
}

#[tokio::test]
async fn console_edits_and_deletes_a_text_id_user() {
    let (url, db) = spawn_directory(text_seed()).await;
    let console = UserConsole::new(repo(&url, None), Collect::default());
    let id = UserId::Text("007".into());

    console.prompt(PromptKind::Edit, &id).await;
    console.enter(FormAction::Edit, "city", "London").unwrap();
    let edited = console.submit(FormAction::Edit).await;
    assert!(matches!(edited, SubmitOutcome::Completed(ref u) if u.id == id), "{edited:?}");

    console.prompt(PromptKind::Delete, &id).await;
    let deleted = console.submit(FormAction::Delete).await;
    assert!(matches!(deleted, SubmitOutcome::Completed(ref u) if u.city == "London"), "{deleted:?}");

    let left = db.lock().unwrap().users.clone();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].id, UserId::Number(7));
    assert_eq!(left[0].city, "Shelbyville");

    let notes = console.notifier().0.lock().unwrap().clone();
    assert!(notes.iter().all(|n| !n.is_error()), "{notes:?}");
    assert_eq!(notes.len(), 2);
}
