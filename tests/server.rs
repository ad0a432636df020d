//! End-to-end tests over a real socket.

use std::time::Duration;

use nested_router::config::SiteConfig;

mod common;

#[tokio::test]
async fn test_serves_all_pages() {
    let site = common::start_site(SiteConfig::default()).await;
    let client = common::client();

    for (path, marker) in [
        ("/", "<h3 class=\"text-xl font-bold\">Home</h3>"),
        ("/about", "<h3 class=\"text-xl font-bold\">About</h3>"),
        ("/payment", "Hello \"/settings/payment\"!"),
        ("/profile", "Hello \"/settings/profile\"!"),
    ] {
        let res = client.get(site.url(path)).send().await.expect("site unreachable");
        assert_eq!(res.status(), 200, "{path}");
        assert!(res.headers().contains_key("x-request-id"));
        let body = res.text().await.unwrap();
        assert!(body.contains("<h1 class=\"text-2xl font-bold\">Root Route</h1>"), "{path}");
        assert!(body.contains(marker), "{path}");
    }

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_not_found_and_request_id_propagation() {
    let site = common::start_site(SiteConfig::default()).await;
    let client = common::client();

    let res = client
        .get(site.url("/settings"))
        .header("x-request-id", "test-req-1")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert_eq!(res.headers()["x-request-id"], "test-req-1");
    let body = res.text().await.unwrap();
    assert!(body.contains("Not Found"));
    assert!(!body.contains("_settingsLayout"));

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_config_update_applies_render_options() {
    let site = common::start_site(SiteConfig::default()).await;
    let client = common::client();

    let body = client.get(site.url("/")).send().await.unwrap().text().await.unwrap();
    assert!(body.contains("<title>nested-router</title>"));
    assert!(body.contains("router-devtools"));

    let mut next = SiteConfig::default();
    next.render.title = "Reloaded".into();
    next.render.devtools = false;
    site.config_tx.send(next).unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let body = client.get(site.url("/")).send().await.unwrap().text().await.unwrap();
    assert!(body.contains("<title>Reloaded</title>"));
    assert!(!body.contains("router-devtools"));

    site.shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown() {
    let mut site = common::start_site(SiteConfig::default()).await;
    site.shutdown.trigger();

    tokio::time::timeout(Duration::from_secs(5), &mut site.handle)
        .await
        .expect("server did not stop")
        .unwrap();

    let res = common::client().get(site.url("/")).send().await;
    assert!(res.is_err());
}
