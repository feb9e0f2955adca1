use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tour_of_heroes::route::{History, RouteSnapshot};
use tour_of_heroes::{
    ErrorReporter, Hero, HeroDetail, HeroError, HeroService, Lookup, MessageService, NewHero,
    RemoteHeroService,
};

/// A stand-in for the collection endpoint. Like mockapi.io it hands out
/// string ids on create.
struct MockApi {
    heroes: Mutex<Vec<Hero>>,
    hits: AtomicUsize,
}

type Api = Arc<MockApi>;

async fn list(State(api): State<Api>) -> Json<Vec<Hero>> {
    api.hits.fetch_add(1, Ordering::SeqCst);
    Json(api.heroes.lock().clone())
}

async fn fetch(State(api): State<Api>, Path(id): Path<i64>) -> Result<Json<Hero>, StatusCode> {
    api.hits.fetch_add(1, Ordering::SeqCst);
    let heroes = api.heroes.lock();
    let hero = heroes.iter().find(|hero| hero.id == id).cloned();
    hero.map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update(
    State(api): State<Api>,
    Path(id): Path<i64>,
    Json(hero): Json<Hero>,
) -> Result<Json<Hero>, StatusCode> {
    api.hits.fetch_add(1, Ordering::SeqCst);
    let mut heroes = api.heroes.lock();
    let slot = heroes
        .iter_mut()
        .find(|stored| stored.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = hero.clone();
    Ok(Json(hero))
}

async fn create(State(api): State<Api>, Json(hero): Json<NewHero>) -> (StatusCode, Json<Value>) {
    api.hits.fetch_add(1, Ordering::SeqCst);
    let mut heroes = api.heroes.lock();
    let id = heroes.iter().map(|hero| hero.id).max().unwrap_or(0) + 1;
    heroes.push(Hero::new(id, hero.name.clone()));
    (
        StatusCode::CREATED,
        Json(json!({ "id": id.to_string(), "name": hero.name })),
    )
}

async fn remove(State(api): State<Api>, Path(id): Path<i64>) -> Result<Json<Hero>, StatusCode> {
    api.hits.fetch_add(1, Ordering::SeqCst);
    let mut heroes = api.heroes.lock();
    let index = heroes
        .iter()
        .position(|hero| hero.id == id)
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(heroes.remove(index)))
}

async fn broken() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/heroes")
}

async fn start(heroes: Vec<Hero>) -> (String, Api) {
    let api = Arc::new(MockApi {
        heroes: Mutex::new(heroes),
        hits: AtomicUsize::new(0),
    });
    let router = Router::new()
        .route("/heroes", get(list).post(create))
        .route("/heroes/{id}", get(fetch).put(update).delete(remove))
        .with_state(api.clone());
    (serve(router).await, api)
}

async fn start_broken() -> String {
    let router = Router::new()
        .route("/heroes", get(broken).post(broken))
        .route("/heroes/{id}", get(broken).put(broken).delete(broken));
    serve(router).await
}

fn two_heroes() -> Vec<Hero> {
    vec![Hero::new(1, "Mr. Nice"), Hero::new(2, "Magneta")]
}

fn service(base: &str) -> (RemoteHeroService, Arc<MessageService>) {
    let messages = Arc::new(MessageService::new());
    let service = RemoteHeroService::new(reqwest::Client::new(), base, messages.clone());
    (service, messages)
}

#[derive(Default)]
struct CountingReporter {
    records: AtomicUsize,
}

impl ErrorReporter for CountingReporter {
    fn report(&self, _operation: &str, _error: &HeroError) {
        self.records.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn get_hero_returns_requested_id() {
    let (base, _) = start(two_heroes()).await;
    let (service, messages) = service(&base);

    for hero in two_heroes() {
        assert_eq!(service.get_hero(hero.id).await, Lookup::Found(hero.clone()));
    }
    assert_eq!(
        messages.messages(),
        vec![
            "HeroService: Fetched hero with id 1",
            "HeroService: Fetched hero with id 2",
        ]
    );
}

#[tokio::test]
async fn get_hero_absent_id_is_not_found() {
    let (base, _) = start(two_heroes()).await;
    let (service, _) = service(&base);
    assert_eq!(service.get_hero(42).await, Lookup::NotFound);
}

#[tokio::test]
async fn blank_search_sends_no_request() {
    let (base, api) = start(two_heroes()).await;
    let (service, messages) = service(&base);

    assert!(service.search_heroes("").await.is_empty());
    assert!(service.search_heroes("   ").await.is_empty());
    assert_eq!(api.hits.load(Ordering::SeqCst), 0);
    assert!(messages.is_empty());
}

#[tokio::test]
async fn search_filters_by_name() {
    let (base, _) = start(two_heroes()).await;
    let (service, messages) = service(&base);

    assert_eq!(service.search_heroes("mag").await, vec![Hero::new(2, "Magneta")]);
    assert_eq!(
        messages.messages(),
        vec![r#"HeroService: found heroes matching "mag""#]
    );
}

#[tokio::test]
async fn added_hero_is_listed_with_fresh_id() {
    let (base, _) = start(two_heroes()).await;
    let (service, messages) = service(&base);

    let zorro = service.add_hero(NewHero::new("Zorro")).await.unwrap();
    assert_eq!(zorro, Hero::new(3, "Zorro"));

    let heroes = service.get_heroes().await;
    assert!(heroes.contains(&zorro));
    assert_eq!(heroes.iter().filter(|hero| hero.id == zorro.id).count(), 1);
    assert_eq!(
        messages.messages(),
        vec!["HeroService: Added hero with id 3", "HeroService: Fetched heroes"]
    );
}

#[tokio::test]
async fn deleted_hero_is_not_found() {
    let (base, _) = start(two_heroes()).await;
    let (service, messages) = service(&base);
    let hero = Hero::new(1, "Mr. Nice");

    assert_eq!(service.delete_hero(&hero).await, Some(()));
    assert_eq!(service.get_hero(hero.id).await, Lookup::NotFound);
    assert_eq!(messages.messages()[0], "HeroService: deleted hero id=1");
}

#[tokio::test]
async fn update_replaces_remote_hero() {
    let (base, api) = start(two_heroes()).await;
    let (service, _) = service(&base);
    let renamed = Hero::new(2, "Magnetar");

    assert_eq!(service.update_hero(&renamed).await, Some(renamed.clone()));
    assert!(api.heroes.lock().contains(&renamed));
}

#[tokio::test]
async fn server_errors_fall_back_on_every_operation() {
    let base = start_broken().await;
    let messages = Arc::new(MessageService::new());
    let reporter = Arc::new(CountingReporter::default());
    let service = RemoteHeroService::new(reqwest::Client::new(), base, messages.clone())
        .with_reporter(reporter.clone());
    let hero = Hero::new(1, "Mr. Nice");

    assert!(service.get_heroes().await.is_empty());
    assert_eq!(service.get_hero(1).await, Lookup::NotFound);
    assert_eq!(service.update_hero(&hero).await, None);
    assert_eq!(service.add_hero(NewHero::new("Zorro")).await, None);
    assert_eq!(service.delete_hero(&hero).await, None);
    assert!(service.search_heroes("nice").await.is_empty());

    assert_eq!(reporter.records.load(Ordering::SeqCst), 6);
    let log = messages.messages();
    let operations = [
        "get_heroes",
        "get_hero",
        "update_hero",
        "add_hero",
        "delete_hero",
        "search_heroes",
    ];
    assert_eq!(log.len(), operations.len());
    for (message, operation) in log.iter().zip(operations) {
        assert!(
            message.starts_with(&format!("HeroService: {operation} failed: ")),
            "unexpected message: {message}"
        );
    }
}

#[tokio::test]
async fn detail_view_loads_and_saves_over_http() {
    let (base, api) = start(two_heroes()).await;
    let (service, _) = service(&base);
    let history = Arc::new(History::new());
    history.push("heroes");
    history.push("detail/2");

    let route = RouteSnapshot::from_path("detail/:id", "detail/2").unwrap();
    let mut detail = HeroDetail::new(route, Arc::new(service), history.clone());
    detail.load().await;
    assert_eq!(detail.hero(), Some(&Hero::new(2, "Magneta")));

    detail.set_name("Magnetar");
    detail.save().await;
    assert!(api.heroes.lock().contains(&Hero::new(2, "Magnetar")));
    assert_eq!(history.current().as_deref(), Some("heroes"));
}

#[tokio::test]
async fn failed_load_keeps_view_empty() {
    let base = start_broken().await;
    let (service, messages) = service(&base);
    let route = RouteSnapshot::new().with_param("id", "1");
    let mut detail = HeroDetail::new(route, Arc::new(service), Arc::new(History::new()));

    detail.load().await;
    assert!(detail.hero().is_none());
    assert_eq!(messages.len(), 1);
}

/// Stores whole JSON records and replaces them wholesale on PUT, so any
/// field the client leaves out of the body is lost.
type Records = Arc<Mutex<Vec<Value>>>;

fn record_id(record: &Value) -> Option<i64> {
    match &record["id"] {
        Value::String(text) => text.parse().ok(),
        other => other.as_i64(),
    }
}

async fn fetch_record(
    State(records): State<Records>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let records = records.lock();
    let record = records.iter().find(|record| record_id(record) == Some(id));
    record.cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_record(
    State(records): State<Records>,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut records = records.lock();
    let slot = records
        .iter_mut()
        .find(|record| record_id(record) == Some(id))
        .ok_or(StatusCode::NOT_FOUND)?;
    *slot = body.clone();
    Ok(Json(body))
}

#[tokio::test]
async fn saving_from_detail_view_keeps_descriptive_fields() {
    let records: Records = Arc::new(Mutex::new(vec![json!({
        "id": "7",
        "name": "Magneta",
        "power": "magnetism",
        "avatar": "a.png",
    })]));
    let router = Router::new()
        .route("/heroes/{id}", get(fetch_record).put(replace_record))
        .with_state(records.clone());
    let base = serve(router).await;
    let (service, _) = service(&base);

    let route = RouteSnapshot::new().with_param("id", "7");
    let mut detail = HeroDetail::new(route, Arc::new(service), Arc::new(History::new()));
    detail.load().await;
    detail.set_name("Magnetar");
    detail.save().await;

    let stored = records.lock()[0].clone();
    assert_eq!(stored["name"], "Magnetar");
    assert_eq!(stored["power"], "magnetism");
    assert_eq!(stored["avatar"], "a.png");
    assert_eq!(record_id(&stored), Some(7));
}
