use entity_actor::{ActorEntity, FrameworkError, ResourceActor};

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Ledger {
    id: String,
    owner: String,
    revision: u64,
}

impl ActorEntity for Ledger {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }

    fn on_save(&mut self) {
        self.revision += 1;
    }
}

fn ledger(id: &str, owner: &str) -> Ledger {
    Ledger {
        id: id.to_string(),
        owner: owner.to_string(),
        revision: 0,
    }
}

// --- Test ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::new(10);
    let handle = tokio::spawn(actor.run());

    // 1. Save (insert)
    let stored = client.save(ledger("l1", "alice")).await.unwrap();
    assert_eq!(stored.revision, 1);

    // 2. Save (overwrite)
    let mut changed = stored.clone();
    changed.owner = "bob".into();
    let stored = client.save(changed).await.unwrap();
    assert_eq!(stored.owner, "bob");
    assert_eq!(stored.revision, 2);

    // 3. Read back
    let fetched: Ledger = client.get("l1".into()).await.unwrap().unwrap();
    assert_eq!(fetched, stored);
    assert_eq!(client.count().await.unwrap(), 1);

    // 4. Delete
    client.delete("l1".into()).await.unwrap();
    assert!(client.get("l1".into()).await.unwrap().is_none());
    assert_eq!(
        client.delete("l1".into()).await,
        Err(FrameworkError::NotFound("l1".into()))
    );

    // 5. Shutdown once the last client is gone
    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_concurrent_saves_are_serialized() {
    let (actor, client) = ResourceActor::<Ledger>::new(4);
    tokio::spawn(actor.run());

    let mut handles = vec![];
    for i in 0..50 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.save(ledger(&format!("l{i}"), "shared")).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(client.count().await.unwrap(), 50);
    assert_eq!(client.all().await.unwrap().len(), 50);
}

#[tokio::test]
async fn test_client_sees_closed_actor() {
    let (actor, client) = ResourceActor::<Ledger>::new(4);
    drop(actor);

    assert_eq!(client.count().await, Err(FrameworkError::ActorClosed));
}
