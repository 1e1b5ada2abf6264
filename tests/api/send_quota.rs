use crate::helpers::spawn_app;

#[tokio::test]
async fn the_send_quota_is_relayed_for_display() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.get_send_quota().await;

    // assert
    assert_eq!(response.status().as_u16(), 200);
    let quota: serde_json::Value = response.json().await.unwrap();
    assert_eq!(quota["max_24_hour"], 50000.0);
    assert_eq!(quota["max_send_rate"], 14.0);
    assert_eq!(quota["sent_last_24_hours"], 123.0);
}

#[tokio::test]
async fn the_send_quota_requires_authorization() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = reqwest::Client::new()
        .get(&format!("{}/send_quota", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    // assert
    assert_eq!(response.status().as_u16(), 401);
}
