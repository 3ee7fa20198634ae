use rosquery::{MemoryTransport, MenuQuery, QueryError, Row};
use std::sync::Arc;

fn id_row(id: &str) -> Row {
    [(".id".to_string(), id.to_string())].into_iter().collect()
}

#[tokio::test]
async fn purge_prints_ids_then_removes_them() {
    let t = Arc::new(MemoryTransport::new());
    t.push_rows(vec![id_row("*1"), id_row("*A"), id_row("*B")]);
    MenuQuery::new(Arc::clone(&t), "/ip/firewall/address-list")
        .where_(("list", "ignored"))
        .purge()
        .await
        .unwrap();
    assert_eq!(
        t.written(),
        vec![
            vec!["/ip/firewall/address-list/print", "=.proplist=.id"],
            vec!["/ip/firewall/address-list/remove", "=numbers=*1,*A,*B"],
        ]
    );
}

#[tokio::test]
async fn purge_stops_when_print_fails() {
    let t = Arc::new(MemoryTransport::new());
    t.push_error(QueryError::Remote("not permitted".into()));
    let err = MenuQuery::new(Arc::clone(&t), "/ip/dns/static").purge().await.unwrap_err();
    assert!(matches!(err, QueryError::Remote(_)));
    assert_eq!(t.written().len(), 1);
}

#[tokio::test]
async fn purge_of_empty_menu_sends_empty_remove() {
    let t = Arc::new(MemoryTransport::new());
    t.push_rows(vec![]);
    MenuQuery::new(Arc::clone(&t), "/ip/dns/static").purge().await.unwrap();
    assert_eq!(t.written()[1], vec!["/ip/dns/static/remove", "=numbers="]);
}

#[tokio::test]
async fn purge_propagates_remove_failure() {
    let t = Arc::new(MemoryTransport::new());
    t.push_rows(vec![id_row("*1")]);
    t.push_error(QueryError::Remote("item is in use".into()));
    let err = MenuQuery::new(Arc::clone(&t), "/interface/vlan").purge().await.unwrap_err();
    assert_eq!(err.to_string(), "Device error: item is in use");
}
