//! Integration tests for the node's HTTP surface: chain retrieval, transaction
//! submission, mining, peer registration and consensus resolution.

use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use nanochain::api::{self, AppState};

macro_rules! spawn_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(api::init_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn health_responds() {
    let state = web::Data::new(AppState::default());
    let app = spawn_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn chain_starts_with_the_genesis_block() {
    let state = web::Data::new(AppState::default());
    let app = spawn_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/chain").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["length"], 1);
    assert_eq!(body["chain"][0]["index"], 1);
    assert_eq!(body["chain"][0]["proof"], 100);
    assert_eq!(body["chain"][0]["previous_hash"], "1");
    assert!(body["chain"][0]["transactions"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn submitted_transaction_is_mined_into_the_promised_block() {
    let state = web::Data::new(AppState::default());
    let app = spawn_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/transactions/new")
            .set_json(json!({"sender": "a", "recipient": "b", "amount": 10}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["index"], 2);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/transactions/pending").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["size"], 1);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/mine").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["block"]["index"], 2);
    let txs = body["block"]["transactions"].as_array().unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0]["sender"], "a");
    assert_eq!(txs[0]["amount"], 10);

    // Pool drained, chain grown and still valid.
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/transactions/pending").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["size"], 0);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/chain/valid").to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["length"], 2);
}

#[actix_web::test]
async fn mining_rewards_the_requested_recipient() {
    let state = web::Data::new(AppState::default());
    let app = spawn_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/mine?recipient=miner-1")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let reward = &body["block"]["transactions"][0];
    assert_eq!(reward["sender"], "0");
    assert_eq!(reward["recipient"], "miner-1");
    assert_eq!(reward["amount"], 1);
}

#[actix_web::test]
async fn structurally_malformed_transaction_is_rejected() {
    let state = web::Data::new(AppState::default());
    let app = spawn_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/transactions/new")
            .set_json(json!({"sender": "a", "recipient": "b"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn peers_register_once_and_list_in_order() {
    let state = web::Data::new(AppState::default());
    let app = spawn_app!(state);

    for address in [
        "http://10.0.0.2:8080/",
        "10.0.0.1:8080",
        "10.0.0.2:8080", // duplicate of the first after normalization
    ] {
        let resp = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/nodes/register")
                .set_json(json!({"address": address}))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let resp = test::call_service(&app, test::TestRequest::get().uri("/nodes").to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["peers"][0], "10.0.0.2:8080");
    assert_eq!(body["peers"][1], "10.0.0.1:8080");
}

#[actix_web::test]
async fn blank_peer_address_is_rejected() {
    let state = web::Data::new(AppState::default());
    let app = spawn_app!(state);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/nodes/register")
            .set_json(json!({"address": "  "}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn resolution_without_usable_peers_keeps_the_local_chain() {
    let state = web::Data::new(AppState::new(Duration::from_millis(250)));
    let app = spawn_app!(state);

    // No peers at all.
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/nodes/resolve").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["replaced"], false);
    assert_eq!(body["length"], 1);

    // An unreachable peer is skipped, not fatal.
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/nodes/register")
            .set_json(json!({"address": "127.0.0.1:1"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/nodes/resolve").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["replaced"], false);
    assert_eq!(body["length"], 1);
}
