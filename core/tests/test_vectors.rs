//! Verify `build`/`parse` against the JSON test vectors in `test-vectors/`.
//!
//! Each vector file lists cases with the command input, the request the
//! client must produce (compared as a decoded parameter map so ordering does
//! not matter), a simulated response and the expected result or error.

use namecheap_core::domains::{DomainGetInfo, DomainsCheck, DomainsGetList};
use namecheap_core::{
    ApiError, ClientConfig, HttpMethod, HttpRequest, HttpResponse, NamecheapClient,
};
use serde_json::Value;

const ENDPOINT: &str = "https://api.namecheap.com/xml.response";

fn client() -> NamecheapClient {
    NamecheapClient::new(ClientConfig::new("apiuser", "apikey", "10.0.0.1")).unwrap()
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.path, ENDPOINT, "{name}: path");
    assert_eq!(
        req.headers,
        vec![(
            "content-type".to_string(),
            "application/x-www-form-urlencoded".to_string()
        )],
        "{name}: headers"
    );

    let actual: serde_json::Map<String, Value> = req
        .params()
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect();
    assert_eq!(Value::Object(actual), expected["params"], "{name}: params");
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

// ---------------------------------------------------------------------------
// check
// ---------------------------------------------------------------------------

#[test]
fn domains_check_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/domains_check.json")) {
        let name = case["name"].as_str().unwrap();
        let domains: Vec<String> = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build(&DomainsCheck { domains }).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let results = c.parse::<DomainsCheck>(simulated_response(&case)).unwrap();
        let expected = case["expected_result"].as_array().unwrap();
        assert_eq!(results.len(), expected.len(), "{name}: result count");
        for (got, want) in results.iter().zip(expected) {
            assert_eq!(got.domain, want["domain"].as_str().unwrap(), "{name}: domain");
            assert_eq!(got.available, want["available"].as_bool().unwrap(), "{name}: available");
            assert_eq!(
                got.is_premium_name,
                want["is_premium_name"].as_bool().unwrap(),
                "{name}: is_premium_name"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// getList
// ---------------------------------------------------------------------------

#[test]
fn domains_get_list_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/domains_get_list.json")) {
        let name = case["name"].as_str().unwrap();
        let input = &case["input"];
        let command = DomainsGetList::new(
            input["page"].as_u64().unwrap() as u32,
            input["page_size"].as_u64().unwrap() as u32,
        );

        let req = c.build(&command).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let (domains, paging) = c.parse::<DomainsGetList>(simulated_response(&case)).unwrap();
        let expected = &case["expected_result"];

        let want_paging = &expected["paging"];
        assert_eq!(paging.total_items as u64, want_paging["total_items"].as_u64().unwrap(), "{name}: total");
        assert_eq!(paging.current_page as u64, want_paging["current_page"].as_u64().unwrap(), "{name}: page");
        assert_eq!(paging.page_size as u64, want_paging["page_size"].as_u64().unwrap(), "{name}: page size");

        let want_domains = expected["domains"].as_array().unwrap();
        assert_eq!(domains.len(), want_domains.len(), "{name}: domain count");
        for (got, want) in domains.iter().zip(want_domains) {
            assert_eq!(got.id, want["id"].as_u64().unwrap(), "{name}: id");
            assert_eq!(got.name, want["name"].as_str().unwrap(), "{name}: name");
            assert_eq!(got.user, want["user"].as_str().unwrap(), "{name}: user");
            assert_eq!(got.created, want["created"].as_str().unwrap(), "{name}: created");
            assert_eq!(got.expires, want["expires"].as_str().unwrap(), "{name}: expires");
            assert_eq!(got.is_expired, want["is_expired"].as_bool().unwrap(), "{name}: is_expired");
            assert_eq!(got.is_locked, want["is_locked"].as_bool().unwrap(), "{name}: is_locked");
            assert_eq!(got.auto_renew, want["auto_renew"].as_bool().unwrap(), "{name}: auto_renew");
            assert_eq!(got.whois_guard, want["whois_guard"].as_str().unwrap(), "{name}: whois_guard");
            assert_eq!(got.is_premium, want["is_premium"].as_bool().unwrap(), "{name}: is_premium");
            assert_eq!(got.is_our_dns, want["is_our_dns"].as_bool().unwrap(), "{name}: is_our_dns");
        }
    }
}

// ---------------------------------------------------------------------------
// Failures
// ---------------------------------------------------------------------------

#[test]
fn api_error_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/api_errors.json")) {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_error"];

        let err = c
            .parse::<DomainGetInfo>(simulated_response(&case))
            .unwrap_err();

        match (expected["kind"].as_str().unwrap(), err) {
            ("Api", ApiError::Api { code, message, errors }) => {
                assert_eq!(code, expected["code"].as_str().unwrap(), "{name}: code");
                if let Some(want) = expected.get("message") {
                    assert_eq!(message, want.as_str().unwrap(), "{name}: message");
                }
                assert_eq!(errors.len() as u64, expected["count"].as_u64().unwrap(), "{name}: count");
            }
            ("HttpError", ApiError::HttpError { status, .. }) => {
                assert_eq!(status as u64, expected["status"].as_u64().unwrap(), "{name}: status");
            }
            ("Decode", ApiError::Decode(_)) => {}
            (kind, other) => panic!("{name}: expected {kind}, got {other:?}"),
        }
    }
}
