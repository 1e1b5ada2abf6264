use crate::helpers::{spawn_app, valid_campaign_body};
use campaigner::campaign::CampaignSummary;
use campaigner::domain::SendStatus;

#[tokio::test]
async fn a_valid_campaign_is_sent_to_every_recipient() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = app.post_campaigns(&valid_campaign_body()).await;

    // assert
    assert_eq!(response.status().as_u16(), 200);
    let summary: CampaignSummary = response.json().await.unwrap();
    assert_eq!(summary.sent, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.total, 3);
    assert!(summary.errors.is_empty());

    let emails = app.transport.sent_emails.lock().unwrap();
    assert_eq!(
        emails.len(),
        3,
        "Expected 3 emails, {} were sent",
        emails.len()
    );
    assert_eq!(app.history.records().len(), 3);
}

#[tokio::test]
async fn templates_are_personalized_per_recipient() {
    // arrange
    let app = spawn_app().await;

    // act
    app.post_campaigns(&valid_campaign_body()).await;

    // assert
    let emails = app.transport.sent_emails.lock().unwrap();
    assert_eq!(emails[0].subject, "Hi Ada Lovelace");
    assert_eq!(emails[0].text_content, "Ada Lovelace at Analytical Engines");
    assert_eq!(
        emails[0].html_content,
        "<p>Ada Lovelace at Analytical Engines</p>"
    );
    // No company on the second recipient: empty string, not the token.
    assert_eq!(emails[1].text_content, "Cher at ");
    assert_eq!(emails[0].from, "\"Grace Hopper\" <grace@navy.mil>");
}

#[tokio::test]
async fn a_rejected_recipient_is_reported_without_stopping_the_run() {
    // arrange
    let app = spawn_app().await;
    app.transport.fail_sends_to("cher@x.com");

    // act
    let response = app.post_campaigns(&valid_campaign_body()).await;

    // assert
    assert_eq!(response.status().as_u16(), 200);
    let summary: CampaignSummary = response.json().await.unwrap();
    assert_eq!(summary.sent, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].starts_with("cher@x.com: "));

    let records = app.history.records();
    assert_eq!(records.len(), 3);
    assert_eq!(records[1].status, SendStatus::Failed);
    assert_eq!(records[2].status, SendStatus::Sent);
}

#[tokio::test]
async fn campaigns_with_missing_fields_are_rejected_with_a_400() {
    // arrange
    let app = spawn_app().await;
    let mut without_template = valid_campaign_body();
    without_template.as_object_mut().unwrap().remove("template");
    let mut without_sender = valid_campaign_body();
    without_sender.as_object_mut().unwrap().remove("sender");
    let mut without_recipients = valid_campaign_body();
    without_recipients
        .as_object_mut()
        .unwrap()
        .remove("recipients");

    let test_cases = vec![
        (without_template, "missing the template"),
        (without_sender, "missing the sender"),
        (without_recipients, "missing the recipients"),
    ];

    for (invalid_body, error_message) in test_cases {
        // act
        let response = app.post_campaigns(&invalid_body).await;

        // assert
        assert_eq!(
            response.status().as_u16(),
            400,
            "The API did not return a 400 when the payload was {}.",
            error_message
        );
    }
    assert_eq!(app.history.records().len(), 0);
}

#[tokio::test]
async fn an_empty_recipient_list_is_refused_before_any_attempt() {
    // arrange
    let app = spawn_app().await;
    let mut body = valid_campaign_body();
    body["recipients"] = serde_json::json!([]);

    // act
    let response = app.post_campaigns(&body).await;

    // assert
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(app.transport.sent_emails.lock().unwrap().len(), 0);
    assert_eq!(app.history.records().len(), 0);
}

#[tokio::test]
async fn an_invalid_recipient_email_is_refused_before_any_attempt() {
    // arrange
    let app = spawn_app().await;
    let mut body = valid_campaign_body();
    body["recipients"] = serde_json::json!([
        { "name": "Ada Lovelace", "email": "definitely-not-an-email" }
    ]);

    // act
    let response = app.post_campaigns(&body).await;

    // assert
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(app.transport.sent_emails.lock().unwrap().len(), 0);
}

#[tokio::test]
async fn requests_without_authorization_are_rejected_with_a_401() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = reqwest::Client::new()
        .post(&format!("{}/campaigns", &app.address))
        .json(&valid_campaign_body())
        .send()
        .await
        .expect("Failed to execute request.");

    // assert
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(
        response.headers()["WWW-Authenticate"],
        r#"Basic realm="campaigns""#
    );
    assert_eq!(app.transport.sent_emails.lock().unwrap().len(), 0);
}

#[tokio::test]
async fn requests_with_a_wrong_password_are_rejected_with_a_401() {
    // arrange
    let app = spawn_app().await;

    // act
    let response = reqwest::Client::new()
        .post(&format!("{}/campaigns", &app.address))
        .basic_auth(&app.username, Some("not-the-password"))
        .json(&valid_campaign_body())
        .send()
        .await
        .expect("Failed to execute request.");

    // assert
    assert_eq!(response.status().as_u16(), 401);
    assert_eq!(app.transport.sent_emails.lock().unwrap().len(), 0);
}
