use chrono::{TimeZone, Utc};
use rand::{rngs::StdRng, SeedableRng};
use shared::domain::SignoutStatus;
use std::collections::BTreeSet;
use storage::Storage;

#[tokio::test]
async fn seeded_batch_and_status_queries_acceptance() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let now = Utc.with_ymd_and_hms(2026, 5, 2, 18, 0, 0).unwrap();
    let mut rng = StdRng::seed_from_u64(99);

    let records = fixtures::generate(&mut rng, now, 12);
    for record in &records {
        storage.insert_signout(record).await.expect("insert record");
    }

    let stored = storage.list_signouts().await.expect("list all");
    assert_eq!(stored.len(), records.len());
    for record in &stored {
        assert!(record.is_consistent(), "inconsistent row {record:?}");
    }

    let groups: BTreeSet<&str> = stored.iter().map(|record| record.signout_id.as_str()).collect();
    assert_eq!(groups.len(), 12);

    let expected_out = records
        .iter()
        .filter(|record| record.status == SignoutStatus::Out)
        .count() as i64;
    let counts = storage.status_counts().await.expect("counts");
    assert_eq!(counts.out, expected_out);
    assert_eq!(counts.out + counts.signed_in, stored.len() as i64);

    let open = storage.open_signouts().await.expect("open rows");
    assert_eq!(open.len() as i64, counts.out);
    assert!(open
        .iter()
        .all(|record| record.status == SignoutStatus::Out));

    let sampled = storage
        .list_group(&open[0].signout_id)
        .await
        .expect("group lookup");
    assert!(sampled.len() >= 2);
    assert!(sampled
        .iter()
        .all(|record| record.location == sampled[0].location));
}
