use super::*;

fn test_client(base_url: &str) -> UptogoClient {
    UptogoClient::with_base_url("test-key", 30, base_url)
        .expect("client construction should not fail")
}

#[test]
fn build_url_appends_segments_and_query() {
    let client = test_client("https://api.uptogo.com.br");
    let url = client.build_url(&["placeautocompletes"], &[("input", "01310-100")]);
    assert_eq!(
        url.as_str(),
        "https://api.uptogo.com.br/placeautocompletes?input=01310-100"
    );
}

#[test]
fn build_url_keeps_base_path() {
    let client = test_client("http://localhost/uptogo/api/");
    let url = client.build_url(&["Cliente.php", "by_api_key"], &[("api_key", "abc")]);
    assert_eq!(
        url.as_str(),
        "http://localhost/uptogo/api/Cliente.php/by_api_key?api_key=abc"
    );
}

#[test]
fn build_url_without_query_has_no_question_mark() {
    let client = test_client("https://api.uptogo.com.br");
    let url = client.build_url(&["solicitacaoentregas", "12", "cotacaos"], &[]);
    assert_eq!(
        url.as_str(),
        "https://api.uptogo.com.br/solicitacaoentregas/12/cotacaos"
    );
}

#[test]
fn build_url_encodes_identifiers() {
    let client = test_client("https://api.uptogo.com.br");
    let url = client.build_url(&["solicitacaoentregas", "a/b c"], &[]);
    assert!(
        url.as_str().ends_with("/solicitacaoentregas/a%2Fb%20c"),
        "segment should be percent-encoded: {url}"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = UptogoClient::with_base_url("k", 30, "not a url");
    assert!(matches!(result, Err(UptogoError::InvalidBaseUrl { .. })));
}

#[test]
fn empty_results_are_detected() {
    assert!(is_empty_result(&Value::Null));
    assert!(is_empty_result(&serde_json::json!([])));
    assert!(is_empty_result(&serde_json::json!({})));
    assert!(!is_empty_result(&serde_json::json!([1])));
    assert!(!is_empty_result(&serde_json::json!(false)));
}

#[test]
fn new_targets_production_api() {
    let client = UptogoClient::new("test-key", 30).expect("client construction should not fail");
    let url = client.build_url(&["directions"], &[]);
    assert_eq!(
        url.as_str(),
        format!("{}/directions", Environment::Production.api_base_url())
    );
}
