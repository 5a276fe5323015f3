//! End-to-end tests over a real listener.

use ssrf_monitor::CaptureEntry;

mod common;

#[tokio::test]
async fn capture_is_visible_once_the_response_arrives() {
    let (addr, _store, shutdown) = common::start_monitor(common::test_config(10)).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/log?x=1", addr))
        .header("X-Probe", "ssrf")
        .send()
        .await
        .expect("monitor unreachable");
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "Logged");

    let entries: Vec<CaptureEntry> = client
        .get(format!("http://{}/admin/logs.json", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(entries.len(), 1);
    let entry = &entries[0];
    assert!(entry.raw_request().starts_with("GET /log?x=1 HTTP/1.1\r\n"));
    assert!(entry.raw_request().contains(&format!("\r\nHost: {}\r\n", addr)));
    assert!(entry.raw_request().contains("\r\nX-Probe: ssrf\r\n"));
    assert_eq!(entry.source_ip(), "127.0.0.1");

    shutdown.trigger();
}

#[tokio::test]
async fn favicon_gets_404_without_capture() {
    let (addr, store, shutdown) = common::start_monitor(common::test_config(10)).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/favicon.ico", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    assert!(store.is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn concurrent_captures_stay_bounded_and_ordered() {
    let (addr, store, shutdown) = common::start_monitor(common::test_config(25)).await;
    let client = common::client();

    let concurrency = 10;
    let requests_per_task = 10;

    let mut tasks = Vec::new();
    for t in 0..concurrency {
        let client = client.clone();
        let base = format!("http://{}", addr);
        tasks.push(tokio::spawn(async move {
            let mut ok = 0;
            for n in 0..requests_per_task {
                let res = client
                    .post(format!("{}/log?task={}&n={}", base, t, n))
                    .body(format!("payload-{}-{}", t, n))
                    .send()
                    .await;
                if matches!(res, Ok(ref r) if r.status().is_success()) {
                    ok += 1;
                }
            }
            ok
        }));
    }

    let mut successes = 0;
    for task in tasks {
        successes += task.await.unwrap();
    }
    assert_eq!(successes, concurrency * requests_per_task);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 25);
    assert!(snapshot.windows(2).all(|w| w[0].id() > w[1].id()));

    shutdown.trigger();
}

#[tokio::test]
async fn clear_over_http() {
    let (addr, store, shutdown) = common::start_monitor(common::test_config(10)).await;
    let client = common::client();

    client.get(format!("http://{}/", addr)).send().await.unwrap();
    assert_eq!(store.len(), 1);

    let res = client
        .post(format!("http://{}/admin/clear", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "ok");
    assert!(store.is_empty());

    shutdown.trigger();
}
