// Copyright (C) 2025 Category Labs, Inc.
// SPDX-License-Identifier: GPL-3.0-or-later

mod common;

use axum::http::StatusCode;
use cardinal_topup::config::Messages;
use cardinal_topup::handlers::ApiTopUpHandler;
use cardinal_topup::provider::{ProviderClient, TopUpProvider};
use cardinal_topup::telegram::TelegramNotifier;
use cardinal_topup::{OrderId, OrderStatus, Plugin, TopUpError};
use common::{api_config, spawn_provider, steam_order, MockReply, RecordingHost};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn handler(client: ProviderClient) -> ApiTopUpHandler {
    ApiTopUpHandler::new("Пополнение Steam", Arc::new(client), Messages::default(), Arc::new(TelegramNotifier::disabled()))
}

#[tokio::test]
async fn paid_order_posts_expected_payload_and_confirms() {
    let (addr, received) = spawn_provider(MockReply::json(StatusCode::OK, json!({"success": true}))).await;
    let client = ProviderClient::new(&api_config(addr, Duration::from_secs(10))).unwrap();
    let host = RecordingHost::default();

    handler(client).on_order_status_changed(&host, &steam_order("player77"), OrderStatus(0)).await;

    assert_eq!(
        *received.lock().unwrap(),
        vec![json!({"api_key": "test-key", "account": "player77", "amount": 500, "order_id": 42})]
    );
    assert_eq!(
        host.messages(),
        vec![(OrderId::Numeric(42), "Баланс player77 успешно пополнен. Пожалуйста, подтвердите заказ!".to_string())]
    );
}

#[tokio::test]
async fn text_order_ids_are_echoed_as_strings() {
    let (addr, received) = spawn_provider(MockReply::json(StatusCode::OK, json!({"success": true}))).await;
    let client = ProviderClient::new(&api_config(addr, Duration::from_secs(10))).unwrap();
    let mut order = steam_order("player77");
    order.id = OrderId::from("ABCD1234");
    order.price = 99.5;

    client.top_up("player77", &order).await.unwrap();

    let body = received.lock().unwrap()[0].clone();
    assert_eq!(body["order_id"], json!("ABCD1234"));
    assert_eq!(body["amount"], json!(99.5));
}

#[tokio::test]
async fn structured_refusal_reports_provider_message() {
    let (addr, received) =
        spawn_provider(MockReply::json(StatusCode::OK, json!({"success": false, "error": "account not found"}))).await;
    let client = ProviderClient::new(&api_config(addr, Duration::from_secs(10))).unwrap();

    let err = client.top_up("player77", &steam_order("player77")).await.unwrap_err();
    assert!(matches!(err, TopUpError::Rejected { status: 200, ref message } if message == "account not found"));

    let host = RecordingHost::default();
    handler(client).on_order_status_changed(&host, &steam_order("player77"), OrderStatus(0)).await;
    assert_eq!(received.lock().unwrap().len(), 2);
    assert_eq!(host.messages(), vec![(OrderId::Numeric(42), Messages::default().api_failure)]);
}

#[tokio::test]
async fn non_200_status_is_a_refusal_even_with_success_flag() {
    let (addr, _) = spawn_provider(MockReply::json(StatusCode::INTERNAL_SERVER_ERROR, json!({"success": true}))).await;
    let client = ProviderClient::new(&api_config(addr, Duration::from_secs(10))).unwrap();
    let host = RecordingHost::default();

    handler(client).on_order_status_changed(&host, &steam_order("player77"), OrderStatus(0)).await;
    assert_eq!(host.messages(), vec![(OrderId::Numeric(42), Messages::default().api_failure)]);
}

#[tokio::test]
async fn malformed_body_is_classified() {
    let reply = MockReply { status: StatusCode::OK, body: "not json".to_string(), delay: Duration::ZERO };
    let (addr, _) = spawn_provider(reply).await;
    let client = ProviderClient::new(&api_config(addr, Duration::from_secs(10))).unwrap();

    let err = client.top_up("player77", &steam_order("player77")).await.unwrap_err();
    assert!(matches!(err, TopUpError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn slow_provider_times_out_and_buyer_hears_from_us() {
    let reply = MockReply {
        status: StatusCode::OK,
        body: json!({"success": true}).to_string(),
        delay: Duration::from_secs(5),
    };
    let (addr, _) = spawn_provider(reply).await;
    let client = ProviderClient::new(&api_config(addr, Duration::from_millis(200))).unwrap();

    let err = client.top_up("player77", &steam_order("player77")).await.unwrap_err();
    assert!(matches!(err, TopUpError::Timeout(_)), "{err:?}");

    let host = RecordingHost::default();
    handler(client).on_order_status_changed(&host, &steam_order("player77"), OrderStatus(0)).await;
    assert_eq!(host.messages(), vec![(OrderId::Numeric(42), Messages::default().operator_follow_up)]);
}

#[tokio::test]
async fn unreachable_provider_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = ProviderClient::new(&api_config(addr, Duration::from_secs(2))).unwrap();

    let err = client.top_up("player77", &steam_order("player77")).await.unwrap_err();
    assert!(matches!(err, TopUpError::Network(_)), "{err:?}");
}

#[tokio::test]
async fn blank_description_never_reaches_provider() {
    let (addr, received) = spawn_provider(MockReply::json(StatusCode::OK, json!({"success": true}))).await;
    let client = ProviderClient::new(&api_config(addr, Duration::from_secs(10))).unwrap();
    let host = RecordingHost::default();

    handler(client).on_order_status_changed(&host, &steam_order(" \n "), OrderStatus(0)).await;

    assert!(received.lock().unwrap().is_empty());
    assert_eq!(host.messages(), vec![(OrderId::Numeric(42), Messages::default().missing_player_id)]);
}
