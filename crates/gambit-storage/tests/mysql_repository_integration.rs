use std::time::Duration;

use gambit_core::{Fingerprint, Sequence};
use gambit_storage::{MySqlRepository, ReadRepository, Repository, StorageError, UrlRecord};
use gambit_test_infra::mysql::{MySqlServer, MysqlConfig};
use jiff::{SignedDuration, Timestamp};
use sqlx::mysql::MySqlPoolOptions;

struct Fixture {
    _mysql: MySqlServer,
    repo: MySqlRepository,
}

impl Fixture {
    async fn start() -> Self {
        let mysql = MySqlServer::new(MysqlConfig::builder().build())
            .await
            .expect("start mysql");
        let url = mysql.database_url().await.expect("mysql url");
        let pool = connect_with_retry(&url).await;

        let repo = MySqlRepository::new(pool);
        repo.ensure_schema().await.expect("create schema");

        Self {
            _mysql: mysql,
            repo,
        }
    }
}

async fn connect_with_retry(url: &str) -> sqlx::MySqlPool {
    let mut last_error = None;

    for _ in 0..20 {
        match MySqlPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
        {
            Ok(pool) => return pool,
            Err(err) => {
                last_error = Some(err);
                tokio::time::sleep(Duration::from_millis(500)).await;
            }
        }
    }

    panic!("failed to connect mysql: {last_error:?}");
}

fn seq(value: &str) -> Sequence {
    Sequence::new_unchecked(value)
}

fn record(url: &str, expire_at: Option<Timestamp>) -> UrlRecord {
    let mut record = UrlRecord::builder()
        .original_url(url)
        .fingerprint("16895961332096096428".parse::<Fingerprint>().unwrap())
        .title("a link")
        .build();
    record.expire_at = expire_at;
    record
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn insert_and_get_active_record() {
    let fixture = Fixture::start().await;
    let sequence = seq("Qxf7.Bd2.h3.fxe6.f5");

    fixture
        .repo
        .insert(&sequence, record("https://example.com", None))
        .await
        .unwrap();

    let got = fixture.repo.get(&sequence).await.unwrap().unwrap();
    assert_eq!(got.original_url, "https://example.com");
    assert_eq!(got.fingerprint.to_string(), "16895961332096096428");
    assert_eq!(got.title.as_deref(), Some("a link"));
    assert_eq!(got.expire_at, None);
    assert_eq!(got.visit_count, 0);
    assert!(!got.custom);
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn insert_conflicts_when_sequence_already_exists() {
    let fixture = Fixture::start().await;
    let sequence = seq("e4.e5.Nf3");

    fixture
        .repo
        .insert(&sequence, record("https://one.example", None))
        .await
        .unwrap();

    let err = fixture
        .repo
        .insert(&sequence, record("https://two.example", None))
        .await
        .unwrap_err();

    assert!(matches!(err, StorageError::Conflict(_)));
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn sequences_are_case_sensitive() {
    let fixture = Fixture::start().await;

    fixture
        .repo
        .insert(&seq("Bb5.a6.Ba4"), record("https://one.example", None))
        .await
        .unwrap();

    assert!(fixture.repo.exists(&seq("Bb5.a6.Ba4")).await.unwrap());
    assert!(!fixture.repo.exists(&seq("bb5.a6.ba4")).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn get_returns_none_for_expired_record() {
    let fixture = Fixture::start().await;
    let sequence = seq("d4.d5.c4");
    let expired = Timestamp::now() - SignedDuration::from_secs(1);

    fixture
        .repo
        .insert(&sequence, record("https://example.com", Some(expired)))
        .await
        .unwrap();

    let got = fixture.repo.get(&sequence).await.unwrap();
    assert!(got.is_none());
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn record_visit_respects_cap() {
    let fixture = Fixture::start().await;
    let sequence = seq("c4.e5.Nc3");
    let mut capped = record("https://example.com", None);
    capped.max_visits = Some(1);

    fixture.repo.insert(&sequence, capped).await.unwrap();

    let now = Timestamp::now();
    assert!(fixture.repo.record_visit(&sequence, now).await.unwrap());
    assert!(!fixture.repo.record_visit(&sequence, now).await.unwrap());

    let got = fixture.repo.get(&sequence).await.unwrap().unwrap();
    assert_eq!(got.visit_count, 1);
    assert_eq!(
        got.last_visited.map(|ts| ts.as_second()),
        Some(now.as_second())
    );
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn delete_marks_record_as_soft_deleted() {
    let fixture = Fixture::start().await;
    let sequence = seq("e4.c5.Nf3");

    fixture
        .repo
        .insert(&sequence, record("https://example.com", None))
        .await
        .unwrap();

    assert!(fixture.repo.delete(&sequence).await.unwrap());
    assert!(fixture.repo.get(&sequence).await.unwrap().is_none());
    assert!(!fixture.repo.delete(&sequence).await.unwrap());
}

#[tokio::test]
#[ignore = "requires a docker daemon"]
async fn exists_tracks_historical_sequences_for_no_reuse_policy() {
    let fixture = Fixture::start().await;
    let sequence = seq("e4.e6.d4");

    fixture
        .repo
        .insert(&sequence, record("https://example.com", None))
        .await
        .unwrap();
    fixture.repo.delete(&sequence).await.unwrap();

    assert!(fixture.repo.exists(&sequence).await.unwrap());
}
