//! HTTP tests for the category tree, name checks, object counts and
//! permission-gated views.

use cmdb_client::{ClientConfig, CmdbClient, SidebarTypeEntry};
use cmdb_framework::CmdbType;
use cmdb_rights::{GateDecision, PermissionGate, RightSet, SessionRights};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Test fixture providing a mock backend and a client pointed at it.
struct TestFixture {
    /// Mock CMDB backend.
    server: MockServer,
    /// Client configured for the mock backend.
    client: CmdbClient,
}

impl TestFixture {
    /// Create a new test fixture with a mock server.
    async fn new() -> Self {
        let server = MockServer::start().await;
        let client = CmdbClient::new(&ClientConfig::for_url(server.uri())).expect("Should build client");

        Self { server, client }
    }

    /// A sidebar entry for type 3.
    fn sidebar_entry(&self) -> SidebarTypeEntry {
        let mut ty = CmdbType::new();
        ty.public_id = 3;
        ty.name = "server".to_string();
        SidebarTypeEntry::new(ty, self.client.objects().clone())
    }

    /// Mount the object count endpoint for type 3.
    async fn mock_count(&self, count: u64, delay: Duration, expected: u64) {
        Mock::given(method("GET"))
            .and(path("/object/count/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(count)).set_delay(delay))
            .expect(expected)
            .mount(&self.server)
            .await;
    }
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn test_category_tree() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/category/tree/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "category": {"public_id": 1, "name": "infrastructure", "label": "Infrastructure"},
                "children": [
                    {
                        "category": {"public_id": 2, "name": "network", "label": "Network", "parent": 1},
                        "children": [],
                        "types": [{"public_id": 5, "name": "switch", "label": "Switch"}]
                    }
                ],
                "types": []
            }
        ])))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let tree = fixture
        .client
        .categories()
        .tree()
        .await
        .unwrap()
        .expect("Tree should be present");

    assert_eq!(tree.len(), 2);
    assert_eq!(tree.find(2).unwrap().types[0].name, "switch");
}

#[tokio::test]
async fn test_category_tree_no_content() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/category/tree/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&fixture.server)
        .await;

    assert!(fixture.client.categories().tree().await.unwrap().is_none());
}

#[tokio::test]
async fn test_category_exists() {
    let fixture = TestFixture::new().await;

    Mock::given(method("GET"))
        .and(path("/category/network"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "public_id": 2,
            "name": "network"
        })))
        .mount(&fixture.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/category/storage"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&fixture.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/category/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&fixture.server)
        .await;

    let categories = fixture.client.categories();
    assert!(categories.category_exists("network", Duration::from_millis(10)).await);
    assert!(!categories.category_exists("storage", Duration::ZERO).await);
    assert!(!categories.category_exists("broken", Duration::ZERO).await);
}

// =============================================================================
// Object counts and sidebar entries
// =============================================================================

#[tokio::test]
async fn test_count_by_type() {
    let fixture = TestFixture::new().await;
    fixture.mock_count(42, Duration::ZERO, 1).await;

    assert_eq!(fixture.client.objects().count_by_type(3).await.unwrap(), 42);
}

#[tokio::test]
async fn test_sidebar_entry_publishes_count() {
    let fixture = TestFixture::new().await;
    fixture.mock_count(42, Duration::ZERO, 1).await;

    let mut entry = fixture.sidebar_entry();
    let mut counter = entry.subscribe();
    assert_eq!(entry.object_counter(), 0);

    entry.init();
    tokio::time::timeout(Duration::from_secs(5), counter.changed())
        .await
        .expect("Count should arrive")
        .expect("Sender should be alive");

    assert_eq!(entry.object_counter(), 42);
    assert_eq!(*counter.borrow(), 42);
}

#[tokio::test]
async fn test_sidebar_teardown_discards_late_response() {
    let fixture = TestFixture::new().await;
    fixture.mock_count(42, Duration::from_millis(300), 1).await;

    let mut entry = fixture.sidebar_entry();
    entry.init();

    // Let the request reach the server before tearing down.
    tokio::time::sleep(Duration::from_millis(100)).await;
    entry.teardown();
    assert_eq!(entry.pending(), 0);

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(entry.object_counter(), 0);
}

// =============================================================================
// Permission-gated views
// =============================================================================

#[tokio::test]
async fn test_gate_mounts_view_and_starts_fetch() {
    let fixture = TestFixture::new().await;
    fixture.mock_count(5, Duration::ZERO, 1).await;

    let session = SessionRights::new("admin", RightSet::from_strings(&["base.framework.*"]));
    let entry = fixture.sidebar_entry();
    let mut counter = entry.subscribe();
    let mut gate = PermissionGate::new(session, entry);

    let decision = gate.set_required_rights(Some("base.framework.object.view".into()));
    assert_eq!(decision, GateDecision::Mounted);

    tokio::time::timeout(Duration::from_secs(5), counter.changed())
        .await
        .expect("Count should arrive")
        .expect("Sender should be alive");
    assert_eq!(gate.container().object_counter(), 5);
}

#[tokio::test]
async fn test_gate_without_right_never_fetches() {
    let fixture = TestFixture::new().await;
    fixture.mock_count(5, Duration::ZERO, 0).await;

    let session = SessionRights::new("guest", RightSet::from_strings(&["base.framework.type.view"]));
    let mut gate = PermissionGate::new(session, fixture.sidebar_entry());

    let decision = gate.set_required_rights(Some("base.framework.object.view".into()));
    assert_eq!(decision, GateDecision::Cleared);

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(gate.container().object_counter(), 0);
}
