//! Rule resolution against a directory-backed store.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use engineering_rules_mcp::diagnostics::NullDiagnostics;
use engineering_rules_mcp::rules::{
    Catalog, Rule, RuleError, RuleResolver, RuleStore, StoreError,
};

#[tokio::test]
async fn every_catalog_pair_fetches_with_content() {
    let tmp = tempfile::tempdir().unwrap();
    common::populate_catalog(tmp.path());
    let resolver = common::resolver(tmp.path());

    for entry in Catalog::default().entries() {
        let rule = resolver
            .fetch_rule(entry.category.as_str(), entry.topic)
            .await
            .unwrap_or_else(|e| panic!("{}/{} failed: {e}", entry.category, entry.topic));
        assert!(!rule.content.is_empty());
        assert_eq!(rule.category, entry.category.as_str());
        assert_eq!(rule.topic, entry.topic);
    }
}

#[tokio::test]
async fn unknown_pair_is_reported_with_both_inputs() {
    let tmp = tempfile::tempdir().unwrap();
    common::populate_catalog(tmp.path());
    let resolver = common::resolver(tmp.path());

    let err = resolver.fetch_rule("languages", "cobol").await.unwrap_err();
    match err {
        RuleError::UnknownRule { category, topic } => {
            assert_eq!(category, "languages");
            assert_eq!(topic, "cobol");
        }
        other => panic!("expected UnknownRule, got {other:?}"),
    }

    let err = resolver.fetch_rule("mainframes", "python").await.unwrap_err();
    assert_eq!(err.to_string(), "Unknown rule: mainframes/python");
}

#[tokio::test]
async fn document_without_header_gets_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    common::write_document(tmp.path(), "050-workflow.mdc", "# Workflow\n\nPlan first.\n");
    let resolver = common::resolver(tmp.path());

    let rule = resolver.fetch_rule("core", "workflow").await.unwrap();
    assert_eq!(rule.title, "core: workflow");
    assert_eq!(rule.description, "");
    assert_eq!(rule.priority, 0);
    assert_eq!(rule.content, "# Workflow\n\nPlan first.\n");
}

#[tokio::test]
async fn priority_only_header() {
    let tmp = tempfile::tempdir().unwrap();
    common::write_document(tmp.path(), "110-git.mdc", "---\npriority: 110\n---\nCommit often.\n");
    let resolver = common::resolver(tmp.path());

    let rule = resolver.fetch_rule("core", "git").await.unwrap();
    assert_eq!(rule.priority, 110);
    assert_eq!(rule.title, "core: git");
    assert_eq!(rule.description, "");
}

#[tokio::test]
async fn header_is_kept_in_content() {
    let tmp = tempfile::tempdir().unwrap();
    let text = "---\ntitle: Python\npriority: 160\n---\nBODY";
    common::write_document(tmp.path(), "160-python.mdc", text);
    let resolver = common::resolver(tmp.path());

    let rule = resolver.fetch_rule("languages", "python").await.unwrap();
    assert_eq!(
        rule,
        Rule {
            category: "languages".into(),
            topic: "python".into(),
            title: "Python".into(),
            description: "".into(),
            priority: 160,
            content: text.into(),
        }
    );
}

#[tokio::test]
async fn malformed_priority_degrades_to_zero() {
    let tmp = tempfile::tempdir().unwrap();
    common::write_document(
        tmp.path(),
        "185-rust.mdc",
        "---\ntitle: Rust\ndescription: Ownership first\npriority: urgent\n---\nBody",
    );
    let resolver = common::resolver(tmp.path());

    let rule = resolver.fetch_rule("languages", "rust").await.unwrap();
    assert_eq!(rule.title, "Rust");
    assert_eq!(rule.description, "Ownership first");
    assert_eq!(rule.priority, 0);
}

#[tokio::test]
async fn priority_wider_than_u32_is_kept() {
    let tmp = tempfile::tempdir().unwrap();
    common::write_document(tmp.path(), "160-python.mdc", "---\npriority: 4294967296\n---\nBODY");
    let resolver = common::resolver(tmp.path());

    let rule = resolver.fetch_rule("languages", "python").await.unwrap();
    assert_eq!(rule.priority, 4_294_967_296);
}

#[tokio::test]
async fn signed_priority_degrades_to_zero() {
    let tmp = tempfile::tempdir().unwrap();
    common::write_document(tmp.path(), "180-go.mdc", "---\npriority: +5\n---\nBODY");
    let resolver = common::resolver(tmp.path());

    assert_eq!(resolver.fetch_rule("languages", "go").await.unwrap().priority, 0);
}

#[tokio::test]
async fn missing_document_is_a_read_error() {
    let tmp = tempfile::tempdir().unwrap();
    let resolver = common::resolver(tmp.path());

    let err = resolver.fetch_rule("cloud", "aws").await.unwrap_err();
    assert!(
        matches!(err, RuleError::DocumentRead(StoreError::NotFound(ref d)) if d == "280-aws.mdc"),
        "{err:?}"
    );
}

#[tokio::test]
async fn main_guide_has_fixed_metadata() {
    let tmp = tempfile::tempdir().unwrap();
    common::write_document(
        tmp.path(),
        "050-workflow.mdc",
        "---\ntitle: Ignored\npriority: 999\n---\nGolden rules.\n",
    );
    let resolver = common::resolver(tmp.path());

    let rule = resolver.fetch_main_guide().await.unwrap();
    assert_eq!(rule.category, "core");
    assert_eq!(rule.topic, "workflow");
    assert_eq!(rule.title, "Development Workflow - Plan/Implement/Review");
    assert_eq!(rule.description, "Core workflow philosophy with Golden Rules for AI agents");
    assert_eq!(rule.priority, 50);
    assert!(rule.content.ends_with("Golden rules.\n"));
}

#[tokio::test]
async fn main_guide_missing_is_a_read_error() {
    let tmp = tempfile::tempdir().unwrap();
    let resolver = common::resolver(tmp.path());

    assert!(matches!(
        resolver.fetch_main_guide().await,
        Err(RuleError::DocumentRead(StoreError::NotFound(_)))
    ));
}

/// Store that counts reads and never finds anything.
struct CountingStore {
    reads: Arc<AtomicUsize>,
}

impl RuleStore for CountingStore {
    async fn read(&self, document: &str) -> Result<String, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::NotFound(document.to_string()))
    }
}

#[test]
fn listing_never_touches_the_store() {
    let reads = Arc::new(AtomicUsize::new(0));
    let store = CountingStore { reads: reads.clone() };
    let resolver = RuleResolver::new(Catalog::default(), store, Arc::new(NullDiagnostics));

    let rules = resolver.list_available_rules();
    assert_eq!(reads.load(Ordering::SeqCst), 0);
    assert_eq!(rules.len(), Catalog::default().entries().len());
    for rule in &rules {
        assert!(rule.content.is_empty());
        assert!(Catalog::default().resolve_document(&rule.category, &rule.topic).is_ok());
    }
    assert_eq!(rules[0].topic, "workflow");
    assert_eq!(rules[0].priority, 50);
}

#[test]
fn listing_logs_rule_count() {
    let tmp = tempfile::tempdir().unwrap();
    let recorder = Arc::new(common::RecordingDiagnostics::default());
    let resolver = RuleResolver::new(
        Catalog::default(),
        engineering_rules_mcp::rules::DirectoryStore::new(tmp.path()),
        recorder.clone(),
    );

    let rules = resolver.list_available_rules();
    let expected = format!("INFO resolver: Listing complete ({} rules found)", rules.len());
    assert!(recorder.lines().contains(&expected), "{:?}", recorder.lines());
}

#[tokio::test]
async fn read_failure_is_not_retried() {
    let reads = Arc::new(AtomicUsize::new(0));
    let store = CountingStore { reads: reads.clone() };
    let resolver = RuleResolver::new(Catalog::default(), store, Arc::new(NullDiagnostics));

    assert!(resolver.fetch_rule("databases", "postgresql").await.is_err());
    assert_eq!(reads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn fetch_builds_a_fresh_rule_each_time() {
    let tmp = tempfile::tempdir().unwrap();
    common::write_document(tmp.path(), "155-docker.mdc", "---\ntitle: Docker v1\n---\nOld");
    let resolver = common::resolver(tmp.path());

    let first = resolver.fetch_rule("infrastructure", "docker").await.unwrap();
    common::write_document(tmp.path(), "155-docker.mdc", "---\ntitle: Docker v2\n---\nNew");
    let second = resolver.fetch_rule("infrastructure", "docker").await.unwrap();

    assert_eq!(first.title, "Docker v1");
    assert_eq!(second.title, "Docker v2");
    assert_eq!(second.content, "---\ntitle: Docker v2\n---\nNew");
}
