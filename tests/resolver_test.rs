mod helpers;

use helpers::{api_concept, draft, FakeRemote};
use std::sync::atomic::Ordering;
use std::sync::Arc;

use conceptfeed::content::authored::AuthoredStore;
use conceptfeed::content::store::ContentStore;
use conceptfeed::content::types::Level;
use conceptfeed::db::documents::MemoryDocumentStore;
use conceptfeed::resolver::{ConceptResolver, Resolution, Source};

async fn setup(remote: Arc<FakeRemote>) -> (ConceptResolver, Arc<ContentStore>, Arc<AuthoredStore>) {
    let content = Arc::new(ContentStore::new(remote.clone()));
    content.load().await;
    let authored =
        Arc::new(AuthoredStore::open(Arc::new(MemoryDocumentStore::new()), "authored").await);
    let resolver = ConceptResolver::standard(remote, Arc::clone(&content), Arc::clone(&authored));
    (resolver, content, authored)
}

#[tokio::test]
async fn remote_tier_answers_when_reachable() {
    let remote = FakeRemote::with_catalog(vec![api_concept("x", 1)]);
    let (resolver, _, _) = setup(remote.clone()).await;

    let (concept, source) = resolver.resolve("x-repeat-7").await.into_result().unwrap();
    assert_eq!(concept.id, "x");
    assert_eq!(source, Source::Remote);
    assert_eq!(remote.fetch_by_id_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn catalog_tier_covers_network_failure() {
    let remote = FakeRemote::with_catalog(vec![api_concept("x", 1), api_concept("y", 2)]);
    let (resolver, _, _) = setup(remote.clone()).await;
    remote.set_offline(true);

    match resolver.resolve("x-repeat-2").await {
        Resolution::Found { concept, source } => {
            assert_eq!(concept.id, "x");
            assert_eq!(concept.title, "Title x");
            assert_eq!(source, Source::Catalog);
        }
        other => panic!("expected catalog hit, got {other:?}"),
    }
}

#[tokio::test]
async fn authored_tier_resolves_offline_content() {
    let remote = FakeRemote::with_catalog(vec![api_concept("x", 1)]);
    let (resolver, _, authored) = setup(remote.clone()).await;
    let mine = authored.add(draft("Lifetimes", Level::Advanced)).await;
    remote.set_offline(true);

    let slot = format!("{}-repeat-3", mine.id);
    let (concept, source) = resolver.resolve(&slot).await.into_result().unwrap();
    assert_eq!(source, Source::Authored);
    assert_eq!(concept.id, mine.id);
    assert_eq!(concept.description, "Lifetimes in one line");
    assert_eq!(concept.difficulty_level, 3);
}

#[tokio::test]
async fn remote_404_falls_through_to_catalog() {
    let remote = FakeRemote::with_catalog(vec![api_concept("x", 1)]);
    let (resolver, content, _) = setup(remote.clone()).await;
    content.add_local(conceptfeed::content::types::Concept::from(api_concept("local", 1)));

    let (concept, source) = resolver.resolve("local-repeat-0").await.into_result().unwrap();
    assert_eq!(concept.id, "local");
    assert_eq!(source, Source::Catalog);
}

#[tokio::test]
async fn exhausted_chain_is_terminal_not_found() {
    let remote = FakeRemote::with_catalog(vec![api_concept("x", 1)]);
    let (resolver, _, _) = setup(remote.clone()).await;

    let resolution = resolver.resolve("ghost-repeat-4").await;
    assert_eq!(
        resolution,
        Resolution::NotFound {
            canonical_id: "ghost".into()
        }
    );
    // One remote attempt, no retries.
    assert_eq!(remote.fetch_by_id_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn duplicate_slots_resolve_to_same_concept() {
    let remote = FakeRemote::with_catalog(vec![api_concept("x", 1)]);
    let (resolver, _, _) = setup(remote).await;

    let a = resolver.resolve("x-repeat-0").await;
    let b = resolver.resolve("x-repeat-7").await;
    assert_eq!(a.concept().map(|c| c.id.clone()), Some("x".to_string()));
    assert_eq!(a, b);
}
