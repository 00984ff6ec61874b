//! Async loader tests: racing loads resolve to the most recently started one.

use std::io::Write;

use tokio::sync::oneshot;

use gapscope::{DatasetHandle, Gapscope, GapscopeError, LoadStatus, Metric};

const FIRST: &str = "country,year,econ score\nFRA,2020,10\n";
const SECOND: &str = "country,year,econ score\nFRA,2020,20\nDEU,2020,30\n";

fn fetch(rx: oneshot::Receiver<String>) -> impl std::future::Future<Output = gapscope::Result<String>> {
    async move {
        rx.await
            .map_err(|_| GapscopeError::Load("sender dropped".to_string()))
    }
}

async fn econ(handle: &DatasetHandle) -> Option<f64> {
    handle
        .snapshot()
        .await
        .and_then(|s| s.index.get("FRA", 2020).and_then(|r| r.value(Metric::Econ)))
}

#[tokio::test]
async fn test_newer_load_wins_when_older_resolves_last() {
    let handle = DatasetHandle::new(Gapscope::new());
    let (tx_a, rx_a) = oneshot::channel();
    let (tx_b, rx_b) = oneshot::channel();

    let load_a = handle.load_with("a.csv", None, fetch(rx_a));
    let load_b = handle.load_with("b.csv", None, fetch(rx_b));

    tx_b.send(SECOND.to_string()).unwrap();
    let b = load_b.await.expect("newest load publishes");
    assert_eq!(b.sequence, 2);

    tx_a.send(FIRST.to_string()).unwrap();
    let a = load_a.await;
    assert!(matches!(a, Err(GapscopeError::Superseded { sequence: 1 })));

    assert_eq!(econ(&handle).await, Some(20.0));
    assert!(matches!(handle.status().await, LoadStatus::Ready(s) if s.sequence == 2));
}

#[tokio::test]
async fn test_older_load_resolving_first_is_not_applied() {
    let handle = DatasetHandle::new(Gapscope::new());
    let (tx_a, rx_a) = oneshot::channel();
    let (tx_b, rx_b) = oneshot::channel();

    let load_a = handle.load_with("a.csv", None, fetch(rx_a));
    let load_b = handle.load_with("b.csv", None, fetch(rx_b));

    tx_a.send(FIRST.to_string()).unwrap();
    assert!(load_a.await.is_err());

    // Still waiting on the newest load: no data rather than stale data
    assert!(matches!(handle.status().await, LoadStatus::Loading));
    assert!(handle.snapshot().await.is_none());

    tx_b.send(SECOND.to_string()).unwrap();
    load_b.await.expect("newest load publishes");
    assert_eq!(econ(&handle).await, Some(20.0));
}

#[tokio::test]
async fn test_reload_in_flight_exposes_no_snapshot() {
    let handle = DatasetHandle::new(Gapscope::new());
    handle
        .load_with("a.csv", None, async { Ok(FIRST.to_string()) })
        .await
        .expect("first");
    assert_eq!(econ(&handle).await, Some(10.0));

    let (tx_b, rx_b) = oneshot::channel();
    let load_b = handle.load_with("b.csv", None, fetch(rx_b));

    assert!(matches!(handle.status().await, LoadStatus::Loading));
    assert!(handle.snapshot().await.is_none());

    tx_b.send(SECOND.to_string()).unwrap();
    let b = load_b.await.expect("reload publishes");
    assert_eq!(b.sequence, 2);
    assert_eq!(econ(&handle).await, Some(20.0));
}

#[tokio::test]
async fn test_concurrent_loads_joined() {
    let handle = DatasetHandle::new(Gapscope::new());
    let (tx_a, rx_a) = oneshot::channel();
    let (tx_b, rx_b) = oneshot::channel();

    let load_a = handle.load_with("a.csv", None, fetch(rx_a));
    let load_b = handle.load_with("b.csv", None, fetch(rx_b));
    tx_b.send(SECOND.to_string()).unwrap();
    tx_a.send(FIRST.to_string()).unwrap();

    let (a, b) = tokio::join!(load_a, load_b);
    assert!(a.is_err());
    assert!(b.is_ok());
    assert_eq!(handle.snapshot().await.map(|s| s.report.entities), Some(2));
}

#[tokio::test]
async fn test_newer_failure_beats_older_success() {
    let handle = DatasetHandle::new(Gapscope::new());
    let (tx_a, rx_a) = oneshot::channel();
    let (tx_b, rx_b) = oneshot::channel::<String>();

    let load_a = handle.load_with("a.csv", None, fetch(rx_a));
    let load_b = handle.load_with("b.csv", None, fetch(rx_b));

    drop(tx_b);
    assert!(matches!(load_b.await, Err(GapscopeError::Load(_))));
    tx_a.send(FIRST.to_string()).unwrap();
    assert!(load_a.await.is_err());

    assert!(matches!(handle.status().await, LoadStatus::Failed(_)));
    assert!(handle.snapshot().await.is_none());
}

#[tokio::test]
async fn test_load_from_path() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(SECOND.as_bytes()).expect("write");

    let handle = DatasetHandle::new(Gapscope::new());
    let snapshot = handle.load_from_path(file.path()).await.expect("load");

    assert_eq!(snapshot.report.rows_indexed, 2);
    assert_eq!(snapshot.source.path.as_deref(), Some(file.path()));
}

#[tokio::test]
async fn test_reload_replaces_snapshot() {
    let handle = DatasetHandle::new(Gapscope::new());
    handle
        .load_with("a.csv", None, async { Ok(FIRST.to_string()) })
        .await
        .expect("first");
    assert_eq!(econ(&handle).await, Some(10.0));

    handle
        .load_with("b.csv", None, async { Ok(SECOND.to_string()) })
        .await
        .expect("second");
    assert_eq!(econ(&handle).await, Some(20.0));
}
