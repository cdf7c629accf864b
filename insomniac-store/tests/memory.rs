use insomniac_core::{Environment, Request, RequestBody, RequestGroup, Workspace};
use insomniac_store::{
    find_environments_by_name, Catalog, MemoryCatalog, MemoryResponseStore, ResponsePatch,
    ResponseStore,
};

fn env(id: &str, parent: &str, name: &str) -> Environment {
    Environment {
        id: id.to_string(),
        parent_id: parent.to_string(),
        name: name.to_string(),
        data: serde_json::json!({}),
    }
}

fn request(id: &str, parent: &str, sort: Option<f64>) -> Request {
    Request {
        id: id.to_string(),
        parent_id: parent.to_string(),
        name: id.to_string(),
        method: "GET".to_string(),
        url: "http://localhost".to_string(),
        description: None,
        body: RequestBody::default(),
        headers: Vec::new(),
        parameters: Vec::new(),
        meta_sort_key: sort,
        dependency_ids: Vec::new(),
    }
}

fn catalog() -> MemoryCatalog {
    MemoryCatalog::new(
        Workspace {
            id: "wrk_1".to_string(),
            name: "w".to_string(),
            description: None,
        },
        vec![
            env("env_base", "wrk_1", "Base Environment"),
            env("env_dev", "env_base", "dev"),
            env("env_prod", "env_base", "prod"),
            env("env_dev_nested", "env_prod", "dev"),
            env("env_other_ws", "wrk_2", "staging"),
        ],
        vec![
            RequestGroup {
                id: "fld_1".to_string(),
                parent_id: "wrk_1".to_string(),
                name: "checkout".to_string(),
                meta_sort_key: None,
            },
            RequestGroup {
                id: "fld_2".to_string(),
                parent_id: "wrk_1".to_string(),
                name: "checkout".to_string(),
                meta_sort_key: None,
            },
        ],
        vec![
            request("req_c", "fld_1", None),
            request("req_b", "fld_1", Some(5.0)),
            request("req_a", "fld_1", Some(-1.0)),
            request("req_z", "fld_2", None),
        ],
    )
}

#[tokio::test]
async fn finds_environments_at_any_depth() {
    let catalog = catalog();

    let dev = find_environments_by_name(&catalog, "wrk_1", "dev").await.unwrap();
    let ids: Vec<&str> = dev.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["env_dev", "env_dev_nested"]);

    let prod = find_environments_by_name(&catalog, "wrk_1", "prod").await.unwrap();
    assert_eq!(prod.len(), 1);

    let base = find_environments_by_name(&catalog, "wrk_1", "Base Environment")
        .await
        .unwrap();
    assert_eq!(base.len(), 1);
}

#[tokio::test]
async fn environment_lookup_is_scoped_to_root_and_exact() {
    let catalog = catalog();
    assert!(find_environments_by_name(&catalog, "wrk_1", "staging")
        .await
        .unwrap()
        .is_empty());
    assert!(find_environments_by_name(&catalog, "wrk_1", "Dev")
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn group_lookup_returns_first_match() {
    let catalog = catalog();
    let group = catalog.request_group_by_name("checkout").await.unwrap().unwrap();
    assert_eq!(group.id, "fld_1");
    assert!(catalog.request_group_by_name("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn requests_are_ordered_by_sort_key_then_import_order() {
    let catalog = catalog();
    let reqs = catalog.requests_by_parent("fld_1").await.unwrap();
    let ids: Vec<&str> = reqs.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["req_a", "req_b", "req_c"]);
}

#[tokio::test]
async fn response_store_assigns_ids_and_indexes_by_request() {
    let store = MemoryResponseStore::new();
    let patch = ResponsePatch {
        request_id: "req_a".to_string(),
        environment_id: "env_dev".to_string(),
        url: "http://localhost".to_string(),
        status_code: 201,
        status_message: "Created".to_string(),
        headers: Vec::new(),
        body: "{}".to_string(),
        body_size: 2,
        elapsed_ms: 3,
    };

    let first = store.create(patch.clone()).await.unwrap();
    let second = store.create(patch).await.unwrap();

    assert!(first.id.starts_with("res_"));
    assert_ne!(first.id, second.id);
    assert_eq!(first.status_code(), 201);
    assert_eq!(store.len().await, 2);
    assert_eq!(store.find_by_request("req_a").await.unwrap().len(), 2);
    assert!(store.find_by_request("req_b").await.unwrap().is_empty());
}
