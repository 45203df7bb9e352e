use super::*;

#[test]
fn parses_settings_command() {
    let cli = Cli::try_parse_from(["uptogo-cli", "settings", "--api-key", "abc"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Settings { ref api_key }) if api_key == "abc"
    ));
}

#[test]
fn settings_requires_api_key() {
    assert!(Cli::try_parse_from(["uptogo-cli", "settings"]).is_err());
}

#[test]
fn parses_quote_without_selection() {
    let cli = Cli::try_parse_from(["uptogo-cli", "quote", "--order", "order.json"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Quote { select: None, .. })
    ));
}

#[test]
fn parses_quote_with_selection() {
    let cli = Cli::try_parse_from([
        "uptogo-cli",
        "quote",
        "--order",
        "order.json",
        "--select",
        "1",
    ])
    .expect("expected valid cli args");

    match cli.command {
        Some(Commands::Quote { order, select }) => {
            assert_eq!(order, PathBuf::from("order.json"));
            assert_eq!(select, Some(1));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn quote_rejects_negative_selection() {
    assert!(Cli::try_parse_from([
        "uptogo-cli",
        "quote",
        "--order",
        "order.json",
        "--select",
        "-1",
    ])
    .is_err());
}

#[test]
fn parses_deliver_and_cancel() {
    let deliver = Cli::try_parse_from(["uptogo-cli", "deliver", "--order", "a.json"]).unwrap();
    assert!(matches!(deliver.command, Some(Commands::Deliver { .. })));

    let cancel = Cli::try_parse_from(["uptogo-cli", "cancel", "--order", "a.json"]).unwrap();
    assert!(matches!(cancel.command, Some(Commands::Cancel { .. })));
}

#[test]
fn parses_actions_command() {
    let cli = Cli::try_parse_from(["uptogo-cli", "actions", "--order", "a.json"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Actions { .. })));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["uptogo-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn order_file_fills_defaults() {
    let file: order_file::OrderFile = serde_json::from_str(
        r#"{ "order": { "id": "1001", "shipping_postcode": "01310-100" } }"#,
    )
    .unwrap();
    assert!(file.shipping_methods.is_empty());
    assert_eq!(file.package().destination_postcode, "01310-100");
}

#[test]
fn uptogo_line_is_added_once() {
    let mut file = order_file::OrderFile::default();
    file.uptogo_line();
    file.uptogo_line();
    assert_eq!(file.shipping_methods.len(), 1);
    assert_eq!(file.shipping_methods[0].method_id, "uptogo");
}

fn config_with_stored_key(api_base_url: &str) -> uptogo_core::AppConfig {
    uptogo_core::AppConfig {
        env: uptogo_core::Environment::Development,
        api_base_url: api_base_url.to_owned(),
        app_base_url: "http://localhost:3000".to_owned(),
        log_level: "info".to_owned(),
        request_timeout_secs: 5,
        settings: uptogo_core::Settings {
            api_key: "stored-key".to_owned(),
            ..uptogo_core::Settings::default()
        },
    }
}

#[tokio::test]
async fn settings_lookup_authenticates_with_stored_key() {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/Cliente.php/by_api_key"))
        .and(header("authorization", "Basic stored-key"))
        .and(query_param("api_key", "candidate-key"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "Id": 77, "Location": "-23.55,-46.63" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let settings = commands::resolve_settings(&config_with_stored_key(&server.uri()), "candidate-key")
        .await
        .expect("candidate key should resolve");
    assert_eq!(settings.api_key, "candidate-key");
    assert_eq!(settings.store_id, "77");
}
