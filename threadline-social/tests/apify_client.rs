mod common;

use serde_json::json;
use threadline_http::HttpError;
use threadline_social::apify::ApifyClient;
use threadline_social::pipeline::full_result;
use threadline_social::{CommentSet, Platform, PostUrl, ProviderError};
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn run(id: &str, status: &str, dataset: &str) -> serde_json::Value {
    json!({ "data": { "id": id, "status": status, "defaultDatasetId": dataset } })
}

async fn mount_run(server: &MockServer, actor: &str, run_id: &str, dataset: &str) {
    Mock::given(method("POST"))
        .and(path(format!("/acts/{actor}/runs")))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(run(run_id, "READY", dataset)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/actor-runs/{run_id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(run(run_id, "SUCCEEDED", dataset)))
        .mount(server)
        .await;
}

async fn mount_dataset(server: &MockServer, dataset: &str, pages: &[serde_json::Value], total: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/datasets/{dataset}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "data": { "itemCount": total } })),
        )
        .mount(server)
        .await;
    let mut offset = 0usize;
    for page in pages {
        Mock::given(method("GET"))
            .and(path(format!("/datasets/{dataset}/items")))
            .and(query_param("offset", offset.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page.clone()))
            .mount(server)
            .await;
        offset += page.as_array().map(Vec::len).unwrap_or(0);
    }
}

#[tokio::test]
async fn dataset_is_paged_until_item_count() -> anyhow::Result<()> {
    common::init_test_tracing();
    let server = MockServer::start().await;
    mount_dataset(
        &server,
        "ds-1",
        &[json!([{ "n": 1 }, { "n": 2 }]), json!([{ "n": 3 }])],
        3,
    )
    .await;

    let client = ApifyClient::new(&common::apify_config(&server.uri(), 2, 30));
    let items = client
        .dataset_items(&common::session(&server.uri()), "ds-1")
        .await?;

    let ns: Vec<_> = items.iter().map(|i| i["n"].as_u64().unwrap()).collect();
    assert_eq!(ns, vec![1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn empty_page_ends_a_short_dataset() -> anyhow::Result<()> {
    common::init_test_tracing();
    let server = MockServer::start().await;
    mount_dataset(&server, "ds-short", &[json!([{ "n": 1 }, { "n": 2 }]), json!([])], 5).await;

    let client = ApifyClient::new(&common::apify_config(&server.uri(), 2, 30));
    let items = client
        .dataset_items(&common::session(&server.uri()), "ds-short")
        .await?;
    assert_eq!(items.len(), 2);
    Ok(())
}

#[tokio::test]
async fn pending_run_is_polled_until_success() -> anyhow::Result<()> {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actor-runs/run-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run("run-9", "RUNNING", "ds-9")))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/actor-runs/run-9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run("run-9", "SUCCEEDED", "ds-9")))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApifyClient::new(&common::apify_config(&server.uri(), 100, 30));
    let done = client
        .wait_for_run(&common::session(&server.uri()), "run-9")
        .await?;
    assert_eq!(done.status, "SUCCEEDED");
    assert_eq!(done.default_dataset_id, "ds-9");
    Ok(())
}

#[tokio::test]
async fn failed_run_is_reported_with_its_status() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/acts/scrapers~li-post/runs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(run("run-f", "READY", "ds-f")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/actor-runs/run-f"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run("run-f", "ABORTED", "ds-f")))
        .mount(&server)
        .await;

    let client = ApifyClient::new(&common::apify_config(&server.uri(), 100, 30));
    let err = client
        .run_actor(&common::session(&server.uri()), "scrapers/li-post", &json!({}))
        .await
        .unwrap_err();
    match err {
        ProviderError::RunFailed { run_id, status } => {
            assert_eq!(run_id, "run-f");
            assert_eq!(status, "ABORTED");
        }
        other => panic!("expected RunFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn exhausted_run_budget_is_a_timeout() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    mount_run(&server, "scrapers~li-post", "run-t", "ds-t").await;

    let client = ApifyClient::new(&common::apify_config(&server.uri(), 100, 0));
    let err = client
        .run_actor(&common::session(&server.uri()), "scrapers/li-post", &json!({}))
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "got {err:?}");
}

#[tokio::test]
async fn api_errors_surface_without_retry() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/acts/scrapers~li-post/runs"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "type": "token-not-valid", "message": "Authentication token is not valid." }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApifyClient::new(&common::apify_config(&server.uri(), 100, 30));
    let err = client
        .run_actor(&common::session(&server.uri()), "scrapers/li-post", &json!({}))
        .await
        .unwrap_err();
    match err {
        ProviderError::Http(HttpError::Api { status, .. }) => assert_eq!(status.as_u16(), 401),
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn full_linkedin_result_through_apify() -> anyhow::Result<()> {
    common::init_test_tracing();
    let server = MockServer::start().await;
    let url = "https://www.linkedin.com/posts/johndoe_activity-1";

    Mock::given(method("POST"))
        .and(path("/acts/scrapers~li-post/runs"))
        .and(body_partial_json(json!({ "urls": [url] })))
        .respond_with(ResponseTemplate::new(201).set_body_json(run("run-p", "READY", "ds-p")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/actor-runs/run-p"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run("run-p", "SUCCEEDED", "ds-p")))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/acts/scrapers~li-comments/runs"))
        .and(body_partial_json(json!({
            "postIds": [url],
            "sortOrder": "most recent",
            "limit": common::COMMENT_LIMIT,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(run("run-c", "READY", "ds-c")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/actor-runs/run-c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(run("run-c", "SUCCEEDED", "ds-c")))
        .mount(&server)
        .await;

    mount_dataset(
        &server,
        "ds-p",
        &[json!([{
            "urn": "urn:li:share:1",
            "author": { "firstName": "John", "lastName": "Doe", "publicId": "johndoe" },
            "postedAtTimestamp": 1678886400000u64,
            "numLikes": "9"
        }])],
        1,
    )
    .await;
    mount_dataset(
        &server,
        "ds-c",
        &[
            json!([
                { "comment_id": "c1", "author": { "name": "A" }, "text": "hi" },
                { "summary": true }
            ]),
            json!([{ "comment_id": "c2", "author": { "name": "B" }, "stats": { "total_reactions": 4 } }]),
        ],
        3,
    )
    .await;

    let client = ApifyClient::new(&common::apify_config(&server.uri(), 2, 30));
    let target = PostUrl::parse(url, Platform::LinkedIn)?;
    let env = full_result(&common::session(&server.uri()), &client, &target).await?;

    let post = env.post.expect("post");
    assert_eq!(post.author, "John Doe");
    assert_eq!(post.likes, 9);
    let CommentSet::Flat(comments) = env.comments else {
        panic!("flat comments expected");
    };
    let ids: Vec<_> = comments.iter().map(|c| c.id.as_deref()).collect();
    assert_eq!(ids, vec![Some("c1"), Some("c2")]);
    assert_eq!(comments[1].likes, 4);
    Ok(())
}

#[tokio::test]
async fn empty_post_dataset_is_a_decode_error() {
    common::init_test_tracing();
    let server = MockServer::start().await;
    mount_run(&server, "scrapers~ig-post", "run-e", "ds-e").await;
    mount_dataset(&server, "ds-e", &[], 0).await;

    let client = ApifyClient::new(&common::apify_config(&server.uri(), 100, 30));
    let target = PostUrl::parse("https://www.instagram.com/p/abc/", Platform::Instagram).unwrap();
    let err = full_result(&common::session(&server.uri()), &client, &target)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Decode(_)), "got {err:?}");
}
