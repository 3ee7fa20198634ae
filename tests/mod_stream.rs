use parking_lot::Mutex;
use rosquery::transport::StreamState;
use rosquery::{MemoryTransport, MenuQuery, QueryError, Row, StreamControl};
use std::sync::Arc;
use std::time::Duration;

fn named(name: &str) -> Row {
    [("name".to_string(), name.to_string())].into_iter().collect()
}

fn transport_with(names: &[&str]) -> Arc<MemoryTransport> {
    let t = Arc::new(MemoryTransport::new());
    t.set_stream_rows(names.iter().map(|n| named(n)).collect());
    t
}

#[tokio::test]
async fn stream_uses_action_and_filters() {
    let t = transport_with(&["a"]);
    let _h = MenuQuery::new(Arc::clone(&t), "/interface")
        .select("name")
        .where_(("type", "ether"))
        .stream("/listen")
        .unwrap();
    assert_eq!(t.streamed(), vec![vec!["/interface/listen", "=.proplist=name", "?type=ether"]]);
    assert!(t.written().is_empty());
}

#[tokio::test]
async fn callback_only_form_has_empty_action() {
    let t = transport_with(&["a", "b"]);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let h = MenuQuery::new(Arc::clone(&t), "/tool/torch")
        .subscribe(move |r: rosquery::Result<Row>| {
            if let Ok(row) = r {
                sink.lock().push(row["name"].clone());
            }
        })
        .unwrap();
    assert_eq!(t.streamed(), vec![vec!["/tool/torch"]]);
    for _ in 0..50 {
        if h.is_finished() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(*seen.lock(), vec!["a", "b"]);
}

#[tokio::test]
async fn pause_holds_rows_until_resume() {
    let t = transport_with(&["a", "b", "c"]);
    let mut h = MenuQuery::new(Arc::clone(&t), "/interface").stream("/listen").unwrap();
    h.pause().await.unwrap();
    assert_eq!(h.state(), StreamState::Paused);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!h.is_finished());

    h.resume().await.unwrap();
    let mut got = Vec::new();
    while let Some(row) = h.recv().await {
        got.push(row["name"].clone());
    }
    assert_eq!(got, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn stopped_stream_rejects_control() {
    let t = transport_with(&["a", "b"]);
    let mut h = MenuQuery::new(Arc::clone(&t), "/interface").stream("").unwrap();
    h.stop().await.unwrap();
    assert_eq!(h.state(), StreamState::Stopped);
    assert!(h.recv().await.is_none());
    assert!(matches!(h.resume().await, Err(QueryError::StreamClosed)));
    assert!(h.stop().await.is_ok());
}

#[test]
fn stream_without_runtime_is_a_transport_error() {
    let t = transport_with(&[]);
    let res = MenuQuery::new(Arc::clone(&t), "/interface").stream("/listen");
    assert!(matches!(res, Err(QueryError::Transport(_))));
}
