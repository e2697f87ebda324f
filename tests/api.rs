use std::sync::Arc;

use async_trait::async_trait;
use rocket::http::Status;
use rocket::local::asynchronous::Client;
use serde_json::Value;

use racing_laptimes_analytics::build_rocket;
use racing_laptimes_analytics::errors::{CustomResult, Error};
use racing_laptimes_analytics::modules::board::LapBoard;
use racing_laptimes_analytics::modules::config::Config;
use racing_laptimes_analytics::modules::laptimes_api::{parse_laps, LapRecord, LapSource};

const PAYLOAD: &str = r#"[
    {"driver": "A", "car": "abarth500", "track": "T1", "lap_time_ms": 90000, "valid": true, "cuts": 0,
     "date": "2024-05-01T12:00:00Z", "s0": 30000, "s1": 30000, "s2": 30000},
    {"driver": "B", "car": "abarth500", "track": "T1", "lap_time_ms": 88000, "valid": true, "cuts": 0,
     "date": "2024-05-01T12:05:00Z", "s0": 29000, "s1": 29500, "s2": 29500},
    {"driver": "C", "car": "abarth500", "track": "T2", "lap_time_ms": 70000, "valid": false, "cuts": 2,
     "date": "not a date", "s0": 35000}
]"#;

struct FixedSource(&'static str);

#[async_trait]
impl LapSource for FixedSource {
    async fn fetch_laps(&self) -> CustomResult<Vec<LapRecord>> {
        parse_laps(self.0)
    }

    fn describe(&self) -> String {
        "fixed".to_string()
    }
}

struct FailingSource;

#[async_trait]
impl LapSource for FailingSource {
    async fn fetch_laps(&self) -> CustomResult<Vec<LapRecord>> {
        Err(Error::StatusError { url: "http://laps".to_string(), status: 503 })
    }

    fn describe(&self) -> String {
        "failing".to_string()
    }
}

fn config(default_track: Option<&str>) -> Config {
    let default_track = default_track.map(str::to_string);
    Config::from_lookup(|key| match key {
        "DEFAULT_TRACK" => default_track.clone(),
        _ => None,
    })
    .unwrap()
}

async fn client(default_track: Option<&str>) -> (Client, Arc<LapBoard>) {
    let board = Arc::new(LapBoard::new());
    board.refresh(&FixedSource(PAYLOAD)).await.unwrap();

    let client = Client::tracked(build_rocket(board.clone(), config(default_track)))
        .await
        .expect("valid rocket instance");
    (client, board)
}

async fn get_json(client: &Client, uri: &str) -> (Status, Option<Value>) {
    let response = client.get(uri).dispatch().await;
    let status = response.status();
    (status, response.into_json::<Value>().await)
}

#[rocket::async_test]
async fn lists_classified_rows() {
    let (client, _) = client(None).await;
    let (status, body) = get_json(&client, "/api/laps?track=T1&sort=lap_time_ms").await;
    let body = body.unwrap();

    assert_eq!(status, Status::Ok);
    assert_eq!(body["rows"][0]["driver"], "B");
    assert_eq!(body["rows"][0]["lap_status"], "record");
    assert_eq!(body["rows"][1]["lap_status"], "personal-best");
    assert_eq!(body["rows"][1]["sectors"][0]["status"], "personal-best");
    assert_eq!(body["driver_options"], serde_json::json!(["A", "B"]));
    assert_eq!(body["sort"]["field"], "lap_time_ms");
    assert_eq!(body["stale"], false);
}

#[rocket::async_test]
async fn resets_a_driver_without_laps() {
    let (client, _) = client(None).await;
    let (status, body) = get_json(&client, "/api/laps?track=T1&validity=valid&driver=C").await;
    let body = body.unwrap();

    assert_eq!(status, Status::Ok);
    assert_eq!(body["driver"], "all");
    assert_eq!(body["rows"].as_array().unwrap().len(), 2);
}

#[rocket::async_test]
async fn uses_the_default_track() {
    let (client, _) = client(Some("T2")).await;
    let (_, body) = get_json(&client, "/api/laps").await;
    let body = body.unwrap();

    assert_eq!(body["track"], "T2");
    assert_eq!(body["rows"][0]["driver"], "C");
    assert_eq!(body["rows"][0]["row_class"], "invalid");

    let (_, body) = get_json(&client, "/api/laps?track=all").await;
    assert_eq!(body.unwrap()["rows"].as_array().unwrap().len(), 3);
}

#[rocket::async_test]
async fn rejects_bad_selectors() {
    let (client, _) = client(None).await;

    let (status, _) = get_json(&client, "/api/laps?validity=sometimes").await;
    assert_eq!(status, Status::BadRequest);

    let (status, _) = get_json(&client, "/api/laps?sort=speed").await;
    assert_eq!(status, Status::BadRequest);
}

#[rocket::async_test]
async fn unparsable_date_fails_the_sort() {
    let (client, _) = client(None).await;

    let (status, _) = get_json(&client, "/api/laps?sort=date").await;
    assert_eq!(status, Status::UnprocessableEntity);

    let (status, _) = get_json(&client, "/api/laps?track=T1&sort=date&direction=desc").await;
    assert_eq!(status, Status::Ok);
}

#[rocket::async_test]
async fn fastest_and_tracks() {
    let (client, _) = client(None).await;

    let (_, fastest) = get_json(&client, "/api/laps/fastest").await;
    let fastest = fastest.unwrap();
    assert_eq!(fastest.as_array().unwrap().len(), 2);
    assert_eq!(fastest[0]["driver"], "B");
    assert_eq!(fastest[0]["lap_time"], "1:28.000");

    let (_, tracks) = get_json(&client, "/api/tracks").await;
    assert_eq!(
        tracks.unwrap(),
        serde_json::json!([{"id": "T1", "name": "T1"}, {"id": "T2", "name": "T2"}])
    );
}

#[rocket::async_test]
async fn failed_refresh_marks_the_board_stale() {
    let (client, board) = client(None).await;
    assert!(board.refresh(&FailingSource).await.is_err());

    let (_, status) = get_json(&client, "/api/status").await;
    let status = status.unwrap();
    assert_eq!(status["stale"], true);
    assert!(status["last_error"].as_str().unwrap().contains("503"));

    // the previous laps are still served
    let (_, body) = get_json(&client, "/api/laps").await;
    let body = body.unwrap();
    assert_eq!(body["stale"], true);
    assert_eq!(body["rows"].as_array().unwrap().len(), 3);
}
