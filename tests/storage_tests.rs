use sheetdesk::DeskError;
use sheetdesk::db::{
    self, AnnotationStatus, AnnotationsStorage, CreateUserOutcome, NewAnnotation, Role,
    UsersStorage,
};

async fn open_memory() -> db::SqlitePool {
    db::open("sqlite::memory:")
        .await
        .expect("failed to open in-memory database")
}

fn note(file: &str, sheet: &str, row: u32, section: &str) -> NewAnnotation {
    NewAnnotation {
        file: file.to_string(),
        sheet: sheet.to_string(),
        row,
        column: "B".to_string(),
        text: "note".to_string(),
        status: AnnotationStatus::Pending,
        section: section.to_string(),
    }
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let pool = open_memory().await;
    let users = UsersStorage::new(pool);

    users.seed_defaults().await.expect("second seed failed");

    let all = users.list().await.expect("list users");
    let names: Vec<&str> = all.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["admin", "usuario"]);
    assert_eq!(all[0].role, Role::Admin);
    assert_eq!(all[1].role, Role::User);
}

#[tokio::test]
async fn authenticate_matches_exact_credentials() {
    let users = UsersStorage::new(open_memory().await);

    assert_eq!(
        users.authenticate("admin", "admin123").await.unwrap(),
        Some(Role::Admin)
    );
    assert_eq!(
        users.authenticate("usuario", "usuario123").await.unwrap(),
        Some(Role::User)
    );
    assert_eq!(users.authenticate("admin", "wrong").await.unwrap(), None);
    assert_eq!(users.authenticate("admin", "ADMIN123").await.unwrap(), None);
    assert_eq!(users.authenticate("nobody", "admin123").await.unwrap(), None);
}

#[tokio::test]
async fn create_user_rejects_taken_username() {
    let users = UsersStorage::new(open_memory().await);

    let outcome = users.create_user("admin", "x", Role::User).await.unwrap();
    assert_eq!(outcome, CreateUserOutcome::AlreadyExists);
    assert_eq!(users.list().await.unwrap().len(), 2);
    assert_eq!(
        users.authenticate("admin", "admin123").await.unwrap(),
        Some(Role::Admin)
    );

    let outcome = users
        .create_user("clerk", "clerk1", Role::User)
        .await
        .unwrap();
    assert_eq!(outcome, CreateUserOutcome::Created);
    assert_eq!(
        users.authenticate("clerk", "clerk1").await.unwrap(),
        Some(Role::User)
    );
}

#[tokio::test]
async fn added_annotation_is_listed_for_its_location() {
    let annotations = AnnotationsStorage::new(open_memory().await);

    let id = annotations
        .add(note("f.xlsx", "Sheet1", 3, "Civil"))
        .await
        .unwrap();

    let listed = annotations.list("f.xlsx", "Sheet1", "Civil").await.unwrap();
    assert_eq!(listed.len(), 1);
    let got = &listed[0];
    assert_eq!(got.id, id);
    assert_eq!(got.file, "f.xlsx");
    assert_eq!(got.sheet, "Sheet1");
    assert_eq!(got.row, 3);
    assert_eq!(got.column, "B");
    assert_eq!(got.text, "note");
    assert_eq!(got.status, AnnotationStatus::Pending);
    assert_eq!(got.section, "Civil");

    assert!(
        annotations
            .list("f.xlsx", "Sheet2", "Civil")
            .await
            .unwrap()
            .is_empty()
    );
    assert!(
        annotations
            .list("f.xlsx", "Sheet1", "Penal")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn duplicate_locations_are_kept() {
    let annotations = AnnotationsStorage::new(open_memory().await);

    let first = annotations.add(note("f.xlsx", "Sheet1", 0, "Civil")).await.unwrap();
    let second = annotations.add(note("f.xlsx", "Sheet1", 0, "Civil")).await.unwrap();
    assert_ne!(first, second);

    let ids: Vec<i64> = annotations
        .list("f.xlsx", "Sheet1", "Civil")
        .await
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn update_status_touches_only_the_target_row() {
    let annotations = AnnotationsStorage::new(open_memory().await);
    let a = annotations.add(note("f.xlsx", "Sheet1", 1, "Civil")).await.unwrap();
    let b = annotations.add(note("f.xlsx", "Sheet1", 2, "Civil")).await.unwrap();

    annotations
        .update_status(a, AnnotationStatus::Resolved)
        .await
        .unwrap();

    let listed = annotations.list("f.xlsx", "Sheet1", "Civil").await.unwrap();
    let status_of = |id: i64| listed.iter().find(|x| x.id == id).unwrap().status;
    assert_eq!(status_of(a), AnnotationStatus::Resolved);
    assert_eq!(status_of(b), AnnotationStatus::Pending);

    annotations
        .update_status(9_999, AnnotationStatus::InReview)
        .await
        .expect("unknown id must not be an error");
    let after = annotations.list("f.xlsx", "Sheet1", "Civil").await.unwrap();
    assert_eq!(after, listed);
}

#[tokio::test]
async fn delete_is_a_noop_when_repeated() {
    let annotations = AnnotationsStorage::new(open_memory().await);
    let a = annotations.add(note("f.xlsx", "Sheet1", 1, "Civil")).await.unwrap();
    let b = annotations.add(note("f.xlsx", "Sheet1", 2, "Civil")).await.unwrap();

    annotations.delete(a).await.unwrap();
    let ids: Vec<i64> = annotations
        .list("f.xlsx", "Sheet1", "Civil")
        .await
        .unwrap()
        .iter()
        .map(|x| x.id)
        .collect();
    assert_eq!(ids, vec![b]);

    annotations.delete(a).await.expect("repeat delete must not fail");
    assert_eq!(
        annotations.list("f.xlsx", "Sheet1", "Civil").await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn section_summary_spans_files_and_sheets() {
    let annotations = AnnotationsStorage::new(open_memory().await);
    annotations.add(note("a.xlsx", "Sheet1", 1, "Civil")).await.unwrap();
    annotations.add(note("b.xlsx", "Resumen", 4, "Civil")).await.unwrap();
    annotations.add(note("a.xlsx", "Sheet1", 1, "Penal")).await.unwrap();

    let civil = annotations.list_by_section("Civil").await.unwrap();
    assert_eq!(civil.len(), 2);
    assert!(civil.iter().all(|a| a.section == "Civil"));
    let files: Vec<&str> = civil.iter().map(|a| a.file.as_str()).collect();
    assert_eq!(files, vec!["a.xlsx", "b.xlsx"]);

    assert!(annotations.list_by_section("Laboral").await.unwrap().is_empty());
}

#[tokio::test]
async fn corrupt_stored_values_are_database_errors() {
    let pool = open_memory().await;
    sqlx::query(
        r#"INSERT INTO annotations (file, sheet, "row", "column", annotation, status, section)
           VALUES ('f.xlsx', 'Sheet1', 0, 'A', 'x', 'archived', 'Civil')"#,
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO users (username, password, role) VALUES ('root', 'pw', 'superuser')")
        .execute(&pool)
        .await
        .unwrap();

    let annotations = AnnotationsStorage::new(pool.clone());
    assert!(matches!(
        annotations.list_by_section("Civil").await,
        Err(DeskError::DatabaseError(_))
    ));

    let users = UsersStorage::new(pool);
    assert!(matches!(
        users.authenticate("root", "pw").await,
        Err(DeskError::DatabaseError(_))
    ));
    assert!(matches!(users.list().await, Err(DeskError::DatabaseError(_))));
}
