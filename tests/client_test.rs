use std::sync::Arc;
use std::time::Duration;

use mockito::Matcher;
use pretty_assertions::assert_eq;
use serde_json::json;

use regions_of_indonesia::{
    AbortController, BaseUrl, CacheDriver, CacheMiddleware, ClientOptions, DelayMiddleware,
    MemoryDriver, Options, Region, RegionsClient, RegionsError,
};

fn client_for(server: &mockito::ServerGuard, mut options: ClientOptions) -> RegionsClient {
    options.base_url = BaseUrl {
        dynamic: server.url(),
        static_: server.url(),
    };
    options.logger = false;
    if options.middlewares.is_none() {
        options.middlewares = Some(Vec::new());
    }
    RegionsClient::new(options).unwrap()
}

#[tokio::test]
async fn find_provinces_dynamic() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/provinces")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"code":"11","name":"ACEH"},{"code":"12","name":"SUMATERA UTARA"}]"#)
        .create_async()
        .await;

    let client = client_for(&server, ClientOptions::default());
    let provinces = client.province.find(&Options::default()).await.unwrap();

    assert_eq!(provinces.len(), 2);
    assert_eq!(
        provinces[0],
        Region {
            code: "11".to_string(),
            name: "ACEH".to_string(),
        }
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn static_mode_requests_prerendered_json() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/districts/11.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"code":"11.01","name":"ACEH SELATAN"}]"#)
        .create_async()
        .await;

    let client = client_for(
        &server,
        ClientOptions {
            static_mode: true,
            ..Default::default()
        },
    );
    let districts = client.district.find("11", &Options::default()).await.unwrap();

    assert_eq!(districts[0].code, "11.01");
    mock.assert_async().await;
}

#[tokio::test]
async fn per_call_static_override() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/provinces.json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create_async()
        .await;

    // Client defaults to dynamic; the call overrides to static.
    let client = client_for(&server, ClientOptions::default());
    let provinces = client
        .province
        .find(&Options::new().with_static(true))
        .await
        .unwrap();

    assert!(provinces.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn find_by_missing_code_surfaces_upstream_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/province/99")
        .with_status(404)
        .create_async()
        .await;

    let client = client_for(&server, ClientOptions::default());
    let err = client
        .province
        .find_by("99", &Options::default())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Oops");
}

#[tokio::test]
async fn blank_code_fails_without_network_activity() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server, ClientOptions::default());
    let err = client
        .village
        .find_by("", &Options::default())
        .await
        .unwrap_err();

    assert!(matches!(err, RegionsError::RequireCode));
    mock.assert_async().await;
}

#[tokio::test]
async fn cache_middleware_fetches_once() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/province/11")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":"11","name":"ACEH"}"#)
        .expect(1)
        .create_async()
        .await;

    let driver = Arc::new(MemoryDriver::new());
    let client = client_for(
        &server,
        ClientOptions {
            middlewares: Some(vec![Arc::new(CacheMiddleware::with_driver(
                driver.clone(),
            ))]),
            ..Default::default()
        },
    );

    let first = client
        .province
        .find_by("11", &Options::default())
        .await
        .unwrap();
    let second = client
        .province
        .find_by("11", &Options::default())
        .await
        .unwrap();

    assert_eq!(first, second);
    assert_eq!(
        driver.get("province/11").await.unwrap(),
        Some(serde_json::to_value(&first).unwrap())
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn static_search_resolves_empty_without_requests() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(
        &server,
        ClientOptions {
            static_mode: true,
            ..Default::default()
        },
    );

    let districts = client
        .district
        .search("bandung", &Options::default())
        .await
        .unwrap();
    assert!(districts.is_empty());

    let composite = client.search("bandung", &Options::default()).await.unwrap();
    assert_eq!(composite.provinces, Vec::new());
    assert_eq!(composite.districts, Vec::new());
    assert_eq!(composite.subdistricts, Vec::new());
    assert_eq!(composite.villages, Vec::new());

    mock.assert_async().await;
}

#[tokio::test]
async fn dynamic_search_returns_grouped_result() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::UrlEncoded("name".to_string(), "aceh".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "provinces": [{"code": "11", "name": "ACEH"}],
                "districts": [],
                "subdistricts": [],
                "villages": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server, ClientOptions::default());
    let result = client.search("aceh", &Options::default()).await.unwrap();

    assert_eq!(result.provinces.len(), 1);
    assert!(result.districts.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn region_infers_kind_from_segment_count() {
    let mut server = mockito::Server::new_async().await;
    let district_mock = server
        .mock("GET", "/district/11.01")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":"11.01","name":"ACEH SELATAN"}"#)
        .create_async()
        .await;
    let village_mock = server
        .mock("GET", "/village/11.01.01.2001")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code":"11.01.01.2001","name":"Keude Bakongan"}"#)
        .create_async()
        .await;

    let client = client_for(&server, ClientOptions::default());

    let district = client.region("11.01", &Options::default()).await.unwrap();
    assert_eq!(district.code, "11.01");

    let village = client
        .region("11.01.01.2001", &Options::default())
        .await
        .unwrap();
    assert_eq!(village.code, "11.01.01.2001");

    let err = client
        .region("1.2.3.4.5", &Options::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RegionsError::InvalidCode(_)));

    district_mock.assert_async().await;
    village_mock.assert_async().await;
}

#[tokio::test]
async fn pre_aborted_signal_rejects_without_network_activity() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let controller = AbortController::new();
    controller.abort();

    let client = client_for(&server, ClientOptions::default());
    let err = client
        .province
        .find(&Options::new().with_signal(controller.signal()))
        .await
        .unwrap_err();

    assert!(err.is_aborted());
    mock.assert_async().await;
}

#[tokio::test]
async fn mid_flight_abort_rejects_with_aborted() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    // The delay middleware holds the chain long enough for the abort to win
    // before the fallback ever issues a request.
    let client = client_for(
        &server,
        ClientOptions {
            middlewares: Some(vec![Arc::new(DelayMiddleware::new(Duration::from_secs(
                5,
            )))]),
            ..Default::default()
        },
    );

    let controller = AbortController::new();
    let signal = controller.signal();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.abort();
    });

    let err = client
        .province
        .find(&Options::new().with_signal(signal))
        .await
        .unwrap_err();

    assert!(err.is_aborted());
    mock.assert_async().await;
}
