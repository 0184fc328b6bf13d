mod common;

use attendance::db::init_db;
use attendance::service::recorder::{Outcome, submit};
use attendance::service::session::start_session;
use chrono::{Duration, Utc};
use common::{ai_session, submission};
use futures::future::join_all;
use tempfile::TempDir;

#[actix_web::test]
async fn racing_submissions_record_once() {
    let tmp = TempDir::new().expect("tmp");
    let url = format!("sqlite://{}", tmp.path().join("attendance.db").display());
    let pool = init_db(&url).await.expect("open sqlite");

    let now = Utc::now();
    let issued = start_session(&pool, &ai_session(), Duration::seconds(300), now)
        .await
        .expect("start session");

    let form = submission("A", "E1", &issued.code);
    let outcomes = join_all((0..8).map(|_| submit(&pool, &form, now))).await;

    let outcomes: Vec<Outcome> = outcomes.into_iter().map(|o| o.expect("submit")).collect();
    let recorded = outcomes.iter().filter(|o| **o == Outcome::Recorded).count();
    let duplicates = outcomes
        .iter()
        .filter(|o| **o == Outcome::AlreadyRecorded)
        .count();
    assert_eq!(recorded, 1);
    assert_eq!(duplicates, 7);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM attendance_events")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[actix_web::test]
async fn records_survive_reopening_the_store() {
    let tmp = TempDir::new().expect("tmp");
    let url = format!("sqlite://{}", tmp.path().join("attendance.db").display());

    let now = Utc::now();
    let code = {
        let pool = init_db(&url).await.expect("open sqlite");
        let issued = start_session(&pool, &ai_session(), Duration::seconds(300), now)
            .await
            .expect("start session");
        let outcome = submit(&pool, &submission("A", "E1", &issued.code), now)
            .await
            .expect("submit");
        assert_eq!(outcome, Outcome::Recorded);
        pool.close().await;
        issued.code
    };

    let pool = init_db(&url).await.expect("reopen");
    let outcome = submit(&pool, &submission("A", "E1", &code), now)
        .await
        .expect("submit");
    assert_eq!(outcome, Outcome::AlreadyRecorded);
}
