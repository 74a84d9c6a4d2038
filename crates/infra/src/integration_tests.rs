//! Integration tests for the assignment engine, read model and roster
//! service running against one shared document store.
//!
//! Verifies:
//! - Item status and assignee stay paired after every successful write
//! - Athlete uniform fields follow the item's assignee
//! - Failed checks write nothing; failed writes are not rolled back

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use trackhub_core::{AthleteId, InventoryItemId};
    use trackhub_inventory::ItemStatus;
    use trackhub_roster::{Athlete, AthleteInput};

    use crate::store::{Collection, DocumentStore, codec};
    use crate::testing::{OpKind, RecordingStore, item_input, object, seed_athlete};
    use crate::{AssignmentEngine, AthleteService, ReadModel, ServiceError};

    type Store = Arc<RecordingStore>;

    struct Harness {
        store: Store,
        engine: AssignmentEngine<Store>,
        reads: ReadModel<Store>,
        roster: AthleteService<Store>,
    }

    fn setup() -> Harness {
        let store = RecordingStore::new();
        Harness {
            engine: AssignmentEngine::new(store.clone()),
            reads: ReadModel::new(store.clone()),
            roster: AthleteService::new(store.clone()),
            store,
        }
    }

    async fn athlete(store: &Store, id: &AthleteId) -> Athlete {
        codec::fetch(store, Collection::Athletes, id.as_str())
            .await
            .unwrap()
            .expect("athlete exists")
    }

    fn assert_holds(athlete: &Athlete, item_code: &str) {
        assert!(athlete.has_uniform, "{} should hold {item_code}", athlete.name());
        assert_eq!(athlete.uniform_id.as_deref(), Some(item_code));
    }

    fn assert_empty_handed(athlete: &Athlete) {
        assert!(!athlete.has_uniform, "{} should hold nothing", athlete.name());
        assert_eq!(athlete.uniform_id, None);
    }

    async fn assert_pairing_holds(h: &Harness) {
        for view in h.reads.list_inventory().await.unwrap() {
            let checked_out = view.item.status == ItemStatus::CheckedOut;
            assert_eq!(
                checked_out,
                view.item.assigned_to.is_some(),
                "item {} breaks the status/assignee pairing",
                view.item.item_id
            );
        }
    }

    #[tokio::test]
    async fn create_available_item_has_no_assignee() {
        let h = setup();

        let view = h.engine.create(item_input("U1", "Available", None)).await.unwrap();
        assert_eq!(view.item.item_id, "U1");
        assert_eq!(view.item.status, ItemStatus::Available);
        assert_eq!(view.item.assigned_to, None);
        assert_eq!(view.assigned_to_name, None);

        let writes = h.store.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].kind, OpKind::Add);
        assert_eq!(writes[0].collection, Collection::Inventory);
    }

    #[tokio::test]
    async fn blank_assignee_counts_as_unassigned() {
        let h = setup();
        let view = h.engine.create(item_input("U1", "Available", Some("   "))).await.unwrap();
        assert_eq!(view.item.assigned_to, None);
    }

    #[tokio::test]
    async fn checked_out_without_assignee_is_rejected() {
        let h = setup();

        let err = h.engine.create(item_input("U2", "Checked Out", None)).await.unwrap_err();
        match err {
            ServiceError::Validation(msg) => assert!(msg.contains("an athlete must be assigned")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(h.store.writes().is_empty());
    }

    #[tokio::test]
    async fn assignee_on_non_checked_out_item_is_rejected() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        h.store.clear_writes();

        let err = h
            .engine
            .create(item_input("U2", "Available", Some(a1.as_str())))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(h.store.writes().is_empty());
    }

    #[tokio::test]
    async fn create_for_unknown_athlete_writes_nothing() {
        let h = setup();

        let err = h
            .engine
            .create(item_input("U3", "Checked Out", Some("athleteX")))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "selected athlete does not exist");
        assert!(h.store.writes().is_empty());
    }

    #[tokio::test]
    async fn create_checked_out_marks_athlete() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        h.store.clear_writes();

        let view = h
            .engine
            .create(item_input("U1", "Checked Out", Some(a1.as_str())))
            .await
            .unwrap();
        assert_eq!(view.item.assigned_to.as_ref(), Some(&a1));
        assert_holds(&athlete(&h.store, &a1).await, "U1");

        let order: Vec<(OpKind, Collection)> =
            h.store.writes().into_iter().map(|op| (op.kind, op.collection)).collect();
        assert_eq!(
            order,
            vec![
                (OpKind::Add, Collection::Inventory),
                (OpKind::Update, Collection::Athletes),
            ]
        );
    }

    #[tokio::test]
    async fn assign_reassign_then_delete() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        let a2 = seed_athlete(&h.store, "Grace", "Hopper").await;
        let u1 = h.engine.create(item_input("U1", "Available", None)).await.unwrap().item.id;

        let view = h.engine.assign(&u1, Some(a1.as_str())).await.unwrap();
        assert_eq!(view.item.status, ItemStatus::CheckedOut);
        assert_eq!(view.assigned_to_name.as_deref(), Some("Ada Lovelace"));
        assert_holds(&athlete(&h.store, &a1).await, "U1");

        let view = h.engine.assign(&u1, Some(a2.as_str())).await.unwrap();
        assert_eq!(view.item.assigned_to.as_ref(), Some(&a2));
        assert_eq!(view.assigned_to_name.as_deref(), Some("Grace Hopper"));
        assert_empty_handed(&athlete(&h.store, &a1).await);
        assert_holds(&athlete(&h.store, &a2).await, "U1");
        assert_pairing_holds(&h).await;

        h.store.clear_writes();
        h.engine.delete(&u1).await.unwrap();
        assert_empty_handed(&athlete(&h.store, &a2).await);

        let order: Vec<(OpKind, Collection, String)> = h
            .store
            .writes()
            .into_iter()
            .map(|op| (op.kind, op.collection, op.id))
            .collect();
        assert_eq!(
            order,
            vec![
                (OpKind::Update, Collection::Athletes, a2.to_string()),
                (OpKind::Delete, Collection::Inventory, u1.to_string()),
            ]
        );

        let err = h.reads.get_inventory(&u1).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn repeated_assign_does_not_touch_athlete_again() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        let u1 = h.engine.create(item_input("U1", "Available", None)).await.unwrap().item.id;

        let first = h.engine.assign(&u1, Some(a1.as_str())).await.unwrap();
        h.store.clear_writes();
        let second = h.engine.assign(&u1, Some(a1.as_str())).await.unwrap();

        assert!(h.store.writes_to(Collection::Athletes).is_empty());
        assert_eq!(second.item.assigned_to, first.item.assigned_to);
        assert_eq!(second.item.status, first.item.status);
        assert_holds(&athlete(&h.store, &a1).await, "U1");
    }

    #[tokio::test]
    async fn unassigned_item_must_be_available_to_assign() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        let u1 = h.engine.create(item_input("U1", "Maintenance", None)).await.unwrap().item.id;
        h.store.clear_writes();

        for target in [None, Some(a1.as_str())] {
            let err = h.engine.assign(&u1, target).await.unwrap_err();
            match err {
                ServiceError::Validation(msg) => assert_eq!(msg, "only available items can be assigned"),
                other => panic!("expected validation error, got {other:?}"),
            }
        }
        assert!(h.store.writes().is_empty());
    }

    #[tokio::test]
    async fn assigned_item_can_always_be_unassigned() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        let u1 = h
            .engine
            .create(item_input("U1", "Checked Out", Some(a1.as_str())))
            .await
            .unwrap()
            .item
            .id;

        let view = h.engine.assign(&u1, None).await.unwrap();
        assert_eq!(view.item.status, ItemStatus::Available);
        assert_eq!(view.item.assigned_to, None);
        assert_eq!(view.assigned_to_name, None);
        assert_empty_handed(&athlete(&h.store, &a1).await);
    }

    #[tokio::test]
    async fn assign_unknown_item_is_not_found() {
        let h = setup();
        let missing: InventoryItemId = "nope".parse().unwrap();

        assert!(matches!(h.engine.assign(&missing, None).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(
            h.engine.update(&missing, item_input("U1", "Available", None)).await,
            Err(ServiceError::NotFound(_))
        ));
        assert!(matches!(h.engine.delete(&missing).await, Err(ServiceError::NotFound(_))));
        assert!(h.store.writes().is_empty());
    }

    #[tokio::test]
    async fn update_with_same_fields_only_moves_updated_at() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        let input = item_input("U1", "Checked Out", Some(a1.as_str()));

        let created = h.engine.create(input.clone()).await.unwrap().item;
        h.store.clear_writes();
        let mut updated = h.engine.update(&created.id, input).await.unwrap();

        assert!(h.store.writes_to(Collection::Athletes).is_empty());
        assert_eq!(updated.assigned_to_name.as_deref(), Some("Ada Lovelace"));
        assert!(updated.item.updated_at >= created.updated_at);
        updated.item.updated_at = created.updated_at;
        assert_eq!(updated.item, created);
    }

    #[tokio::test]
    async fn update_moves_uniform_between_athletes() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        let a2 = seed_athlete(&h.store, "Grace", "Hopper").await;
        let u1 = h
            .engine
            .create(item_input("U1", "Checked Out", Some(a1.as_str())))
            .await
            .unwrap()
            .item
            .id;
        h.store.clear_writes();

        let view = h
            .engine
            .update(&u1, item_input("U1", "Checked Out", Some(a2.as_str())))
            .await
            .unwrap();
        assert_eq!(view.assigned_to_name.as_deref(), Some("Grace Hopper"));
        assert_empty_handed(&athlete(&h.store, &a1).await);
        assert_holds(&athlete(&h.store, &a2).await, "U1");

        let targets: Vec<(Collection, String)> = h
            .store
            .writes()
            .into_iter()
            .map(|op| (op.collection, op.id))
            .collect();
        assert_eq!(
            targets,
            vec![
                (Collection::Inventory, u1.to_string()),
                (Collection::Athletes, a1.to_string()),
                (Collection::Athletes, a2.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn update_to_retired_releases_athlete() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        let u1 = h
            .engine
            .create(item_input("U1", "Checked Out", Some(a1.as_str())))
            .await
            .unwrap()
            .item
            .id;

        let view = h.engine.update(&u1, item_input("U1", "Retired", None)).await.unwrap();
        assert_eq!(view.item.status, ItemStatus::Retired);
        assert_empty_handed(&athlete(&h.store, &a1).await);
        assert_pairing_holds(&h).await;
    }

    #[tokio::test]
    async fn update_to_unknown_athlete_writes_nothing() {
        let h = setup();
        let u1 = h.engine.create(item_input("U1", "Available", None)).await.unwrap().item.id;
        h.store.clear_writes();

        let err = h
            .engine
            .update(&u1, item_input("U1", "Checked Out", Some("ghost")))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::MissingReference(_)));
        assert!(h.store.writes().is_empty());

        let stored = h.reads.get_inventory(&u1).await.unwrap();
        assert_eq!(stored.item.status, ItemStatus::Available);
    }

    #[tokio::test]
    async fn update_keeps_omitted_details() {
        let h = setup();
        let mut input = item_input("U1", "Available", None);
        input.size = Some("M".into());
        input.notes = Some("new in 2024".into());
        let u1 = h.engine.create(input).await.unwrap().item.id;

        let mut patch = item_input("U1", "Maintenance", None);
        patch.notes = Some(String::new());
        let view = h.engine.update(&u1, patch).await.unwrap();

        assert_eq!(view.item.details.size.as_deref(), Some("M"));
        assert_eq!(view.item.details.notes, None);
    }

    #[tokio::test]
    async fn failed_athlete_write_leaves_item_written() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        let u1 = h.engine.create(item_input("U1", "Available", None)).await.unwrap().item.id;
        h.store.fail_updates_in(Collection::Athletes);

        let err = h.engine.assign(&u1, Some(a1.as_str())).await.unwrap_err();
        assert!(matches!(err, ServiceError::Dependency(_)));

        let stored = h.reads.get_inventory(&u1).await.unwrap();
        assert_eq!(stored.item.assigned_to.as_ref(), Some(&a1));
        assert_eq!(stored.item.status, ItemStatus::CheckedOut);
        assert_empty_handed(&athlete(&h.store, &a1).await);
    }

    #[tokio::test]
    async fn vanished_previous_assignee_is_skipped() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        let u1 = h
            .engine
            .create(item_input("U1", "Checked Out", Some(a1.as_str())))
            .await
            .unwrap()
            .item
            .id;
        h.store.delete(Collection::Athletes, a1.as_str()).await.unwrap();

        let listed = h.reads.list_inventory().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].item.assigned_to.as_ref(), Some(&a1));
        assert_eq!(listed[0].assigned_to_name, None);

        let view = h.engine.assign(&u1, None).await.unwrap();
        assert_eq!(view.item.status, ItemStatus::Available);
        h.engine.delete(&u1).await.unwrap();
    }

    #[tokio::test]
    async fn read_model_joins_names_and_held_items() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        let a2 = seed_athlete(&h.store, "Grace", "Hopper").await;
        h.engine.create(item_input("U1", "Checked Out", Some(a1.as_str()))).await.unwrap();
        h.engine.create(item_input("U2", "Available", None)).await.unwrap();
        h.engine.create(item_input("U3", "Checked Out", Some(a1.as_str()))).await.unwrap();

        let listed = h.reads.list_inventory().await.unwrap();
        let names: Vec<(&str, Option<&str>)> = listed
            .iter()
            .map(|v| (v.item.item_id.as_str(), v.assigned_to_name.as_deref()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("U1", Some("Ada Lovelace")),
                ("U2", None),
                ("U3", Some("Ada Lovelace")),
            ]
        );

        let held = h.reads.list_athlete_items(&a1).await.unwrap();
        assert_eq!(held.len(), 2);
        assert!(h.reads.list_athlete_items(&a2).await.unwrap().is_empty());

        // Single slot reflects the latest assignment.
        assert_holds(&athlete(&h.store, &a1).await, "U3");

        let roster = h.reads.list_athletes().await.unwrap();
        let order: Vec<&str> = roster.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(order, vec!["Grace Hopper", "Ada Lovelace"]);
        assert_eq!(roster[1].assigned_items.len(), 2);
        assert_eq!(roster[1].group_name, "Elite Sprinters");

        let one = h.reads.get_athlete(&a1).await.unwrap();
        let codes: Vec<&str> = one.assigned_items.iter().map(|i| i.item_id.as_str()).collect();
        assert_eq!(codes, vec!["U1", "U3"]);
    }

    #[tokio::test]
    async fn roster_edits_leave_uniform_fields_alone() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        h.engine.create(item_input("U1", "Checked Out", Some(a1.as_str()))).await.unwrap();

        let edited = h
            .roster
            .update(
                &a1,
                AthleteInput {
                    first_name: Some("Augusta".into()),
                    last_name: Some("King".into()),
                    group: Some("beginner jumpers".into()),
                    ..AthleteInput::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.name(), "Augusta King");
        assert_eq!(edited.group_id, 12);
        assert_holds(&edited, "U1");
        assert_holds(&athlete(&h.store, &a1).await, "U1");

        let listed = h.reads.list_inventory().await.unwrap();
        assert_eq!(listed[0].assigned_to_name.as_deref(), Some("Augusta King"));
    }

    #[tokio::test]
    async fn athlete_with_items_cannot_be_deleted() {
        let h = setup();
        let a1 = seed_athlete(&h.store, "Ada", "Lovelace").await;
        let u1 = h
            .engine
            .create(item_input("U1", "Checked Out", Some(a1.as_str())))
            .await
            .unwrap()
            .item
            .id;

        let err = h.roster.delete(&a1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(h.reads.get_athlete(&a1).await.is_ok());

        h.engine.assign(&u1, None).await.unwrap();
        h.roster.delete(&a1).await.unwrap();
        assert!(matches!(h.reads.get_athlete(&a1).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(h.roster.delete(&a1).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn roster_create_starts_without_uniform() {
        let h = setup();
        let created = h
            .roster
            .create(AthleteInput {
                first_name: Some(" Jesse ".into()),
                last_name: Some("Owens".into()),
                ..AthleteInput::default()
            })
            .await
            .unwrap();
        assert_eq!(created.first_name, "Jesse");
        assert_eq!(created.group_id, 1);
        assert_empty_handed(&created);
        assert_eq!(athlete(&h.store, &created.id).await, created);

        let err = h.roster.create(AthleteInput::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn legacy_item_stays_readable_after_update() {
        let h = setup();
        let raw = h
            .store
            .add(
                Collection::Inventory,
                object(json!({
                    "itemId": "SPIKE-3",
                    "type": "Spikes",
                    "status": "Available",
                    "lastUpdated": "2024-03-02T10:00:00Z",
                })),
            )
            .await
            .unwrap();
        let id = InventoryItemId::from(raw);

        let view = h.engine.update(&id, item_input("SPIKE-3", "Maintenance", None)).await.unwrap();
        assert_eq!(view.item.status, ItemStatus::Maintenance);

        let listed = h.reads.list_inventory().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].item.updated_at, view.item.updated_at);

        let fetched = h.reads.get_inventory(&id).await.unwrap();
        assert_eq!(fetched.item.status, ItemStatus::Maintenance);
        assert_eq!(fetched.item.created_at.to_rfc3339(), "2024-03-02T10:00:00+00:00");
    }
}
