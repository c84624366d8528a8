//! Property-based tests for record locking through the contact service

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::Duration;
use contacthub::backend::contacts::{Clock, ContactService, LockError, LockManager, ManualClock, MemoryContactStore};
use contacthub::backend::realtime::NotificationBus;
use contacthub::backend::BackendError;
use contacthub::shared::{ContactDraft, EventType};
use proptest::prelude::*;

const PRINCIPALS: [&str; 3] = ["alice", "bob", "carol"];

#[derive(Debug, Clone)]
enum Op {
    Lock(usize),
    Unlock(usize),
    Update(usize),
    Wait(i64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..3).prop_map(Op::Lock),
        (0usize..3).prop_map(Op::Unlock),
        (0usize..3).prop_map(Op::Update),
        (0i64..400).prop_map(Op::Wait),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_lock_rules_hold_for_any_sequence(ops in proptest::collection::vec(op(), 1..30)) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        runtime.block_on(async move {
            let clock = ManualClock::default();
            let store = Arc::new(MemoryContactStore::with_clock(Arc::new(clock.clone())));
            let bus = NotificationBus::new(256);
            let mut events = bus.subscribe();
            let service = ContactService::new(store, LockManager::default(), bus)
                .with_clock(Arc::new(clock.clone()));

            let draft = ContactDraft::new("Al Pine", "+1 555-0100", "1 Rd");
            let id = service.create(&draft, "alice").await.unwrap().id;
            assert_eq!(events.try_recv().map(|e| e.event_type), Some(EventType::ContactAdded));

            for op in ops {
                let before = service.get(id).await.unwrap();
                match op {
                    Op::Lock(who) => {
                        let who = PRINCIPALS[who];
                        match service.lock(id, who).await {
                            Ok(contact) => {
                                prop_assert_eq!(contact.locked_by(), Some(who));
                                prop_assert_eq!(contact.locked_at(), Some(clock.now()));
                                prop_assert_eq!(events.try_recv().map(|e| e.event_type), Some(EventType::ContactLocked));
                            }
                            Err(BackendError::Lock(LockError::Conflict { locked_by })) => {
                                let held = before.lock.clone().unwrap();
                                prop_assert_ne!(held.holder.as_str(), who);
                                prop_assert_eq!(locked_by, held.holder);
                                prop_assert!(events.try_recv().is_none());
                            }
                            Err(other) => prop_assert!(false, "unexpected {:?}", other),
                        }
                    }
                    Op::Unlock(who) => {
                        let contact = service.unlock(id, PRINCIPALS[who]).await.unwrap();
                        prop_assert!(contact.lock.is_none());
                        prop_assert_eq!(events.try_recv().map(|e| e.event_type), Some(EventType::ContactUnlocked));
                    }
                    Op::Update(who) => {
                        let who = PRINCIPALS[who];
                        let result = service.update(id, &draft, who).await;
                        if before.locked_by() == Some(who) {
                            let contact = result.unwrap();
                            prop_assert!(contact.lock.is_none());
                            prop_assert_eq!(events.try_recv().map(|e| e.event_type), Some(EventType::ContactUpdated));
                            prop_assert_eq!(events.try_recv().map(|e| e.event_type), Some(EventType::ContactUnlocked));
                        } else {
                            assert_matches!(result, Err(BackendError::Lock(LockError::EditNotLocked)));
                            prop_assert!(events.try_recv().is_none());
                        }
                    }
                    Op::Wait(secs) => clock.advance(Duration::seconds(secs)),
                }

                let after = service.get(id).await.unwrap();
                prop_assert_eq!(after.locked_by().is_some(), after.locked_at().is_some());
                let json = serde_json::to_value(&after).unwrap();
                prop_assert_eq!(json["lockedBy"].is_null(), json["lockedAt"].is_null());
            }
            Ok::<(), TestCaseError>(())
        })?;
    }
}
