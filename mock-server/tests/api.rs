use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with, Credentials, ENDPOINT_PATH};
use tower::ServiceExt;

const AUTH: &str = "ApiUser=mockuser&ApiKey=mockkey&UserName=mockuser&ClientIp=127.0.0.1";

async fn body_text(response: axum::response::Response) -> String {
    let bytes: bytes::Bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn form_request(body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(ENDPOINT_PATH)
        .header(http::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body.to_string())
        .unwrap()
}

fn command(name: &str, extra: &str) -> Request<String> {
    let mut body = format!("{AUTH}&Command={name}");
    if !extra.is_empty() {
        body.push('&');
        body.push_str(extra);
    }
    form_request(&body)
}

fn contacts() -> String {
    let mut parts = Vec::new();
    for role in ["Registrant", "Tech", "Admin", "AuxBilling"] {
        for (field, value) in [
            ("FirstName", "John"),
            ("LastName", "Smith"),
            ("Address1", "8939"),
            ("City", "LA"),
            ("StateProvince", "CA"),
            ("PostalCode", "90045"),
            ("Country", "US"),
            ("Phone", "1.6613102107"),
            ("EmailAddress", "john@gmail.com"),
        ] {
            parts.push(format!("{role}{field}={value}"));
        }
    }
    parts.join("&")
}

// --- envelope ---

#[tokio::test]
async fn responses_are_xml() {
    let resp = app()
        .oneshot(command("namecheap.domains.getList", ""))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()[http::header::CONTENT_TYPE],
        "text/xml; charset=utf-8"
    );
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"<ApiResponse Status="OK""#));
    assert!(xml.contains(r#"<CommandResponse Type="namecheap.domains.getList">"#));
    assert!(xml.contains("<TotalItems>0</TotalItems>"));
}

#[tokio::test]
async fn get_with_query_string_is_accepted() {
    let uri = format!("{ENDPOINT_PATH}?{AUTH}&Command=namecheap.users.address.getList");
    let resp = app()
        .oneshot(Request::builder().uri(uri).body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"AddressName="Primary Address""#));
}

// --- auth ---

#[tokio::test]
async fn wrong_api_key_is_an_api_error() {
    let resp = app()
        .oneshot(form_request(
            "ApiUser=mockuser&ApiKey=nope&UserName=mockuser&ClientIp=127.0.0.1&Command=namecheap.domains.getList",
        ))
        .await
        .unwrap();

    // vendor errors still travel in a 200 response
    assert_eq!(resp.status(), StatusCode::OK);
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"Status="ERROR""#));
    assert!(xml.contains(r#"<Error Number="1011102">"#));
    assert!(!xml.contains("<CommandResponse"));
}

#[tokio::test]
async fn custom_credentials_are_enforced() {
    let creds = Credentials {
        api_user: "alice".to_string(),
        api_key: "k3y".to_string(),
        user_name: "alice".to_string(),
        client_ip: "10.1.1.1".to_string(),
    };
    let resp = app_with(creds)
        .oneshot(command("namecheap.domains.getList", ""))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"<Error Number="1011102">"#));
}

#[tokio::test]
async fn unknown_command_is_rejected() {
    let resp = app()
        .oneshot(command("namecheap.domains.explode", ""))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"<Error Number="1010101">"#));
}

#[tokio::test]
async fn non_form_post_is_rejected() {
    let resp = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(ENDPOINT_PATH)
                .header(http::header::CONTENT_TYPE, "application/json")
                .body("{}".to_string())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// --- domains ---

#[tokio::test]
async fn get_info_for_unknown_domain() {
    let resp = app()
        .oneshot(command("namecheap.domains.getInfo", "DomainName=missing.com"))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"<Error Number="2019166">"#));
}

#[tokio::test]
async fn create_without_contacts_fails() {
    let resp = app()
        .oneshot(command("namecheap.domains.create", "DomainName=a.com&Years=1"))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"<Error Number="2011170">"#));
    assert!(xml.contains("RegistrantFirstName"));
}

// --- full registration lifecycle ---

#[tokio::test]
async fn registration_lifecycle() {
    use tower::Service;

    let mut app = app().into_service();

    // check: available
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(command("namecheap.domains.check", "DomainList=shop.com,other.com"))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"Domain="shop.com" Available="true""#));

    // create
    let extra = format!("DomainName=shop.com&Years=2&WGEnabled=yes&{}", contacts());
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(command("namecheap.domains.create", &extra))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"Registered="true""#));
    assert!(xml.contains(r#"WhoisguardEnable="true""#));

    // check: taken
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(command("namecheap.domains.check", "DomainList=shop.com"))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"Domain="shop.com" Available="false""#));

    // list
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(command("namecheap.domains.getList", "Page=1&PageSize=10"))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"Name="shop.com""#));
    assert!(xml.contains("<TotalItems>1</TotalItems>"));

    // set custom nameservers, then read them back
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(command(
            "namecheap.domains.dns.setCustom",
            "SLD=shop&TLD=com&Nameservers=ns1.example.net,ns2.example.net",
        ))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"Updated="true""#));

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(command("namecheap.domains.dns.getList", "SLD=shop&TLD=com"))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains(r#"IsUsingOurDNS="false""#));
    assert!(xml.contains("<Nameserver>ns2.example.net</Nameserver>"));

    // contacts round-trip through the registry
    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(command("namecheap.domains.getContacts", "DomainName=shop.com"))
        .await
        .unwrap();
    let xml = body_text(resp).await;
    assert!(xml.contains("<FirstName>John</FirstName>"));
    assert!(xml.contains("<Address2 />"));
}
