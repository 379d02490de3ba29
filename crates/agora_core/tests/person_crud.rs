use agora_core::db::open_db_in_memory;
use agora_core::{
    NewPerson, PersonService, ServiceError, SqlitePersonRepository, ValidationError,
};
use rusqlite::Connection;
use serde_json::json;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let service = person_service(&conn);

    service
        .create_person(&NewPerson::new("Ada", "ada", Some("S1".to_string())))
        .unwrap();

    let view = service.get_person("ada").unwrap();
    assert_eq!(view.name, "Ada");
    assert_eq!(view.username, "ada");
    assert_eq!(view.student_id.as_deref(), Some("S1"));
}

#[test]
fn registers_two_people_and_serves_lookups() {
    let conn = open_db_in_memory().unwrap();
    let service = person_service(&conn);

    service
        .create_person(&NewPerson::new("Ada", "ada", Some("S1".to_string())))
        .unwrap();
    service
        .create_person(&NewPerson::new("Bea", "bea", None))
        .unwrap();

    let users = service.list_users().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users.get("ada").map(String::as_str), Some("Ada"));
    assert_eq!(users.get("bea").map(String::as_str), Some("Bea"));

    let bea = service.get_person("bea").unwrap();
    assert_eq!(bea.student_id, None);
}

#[test]
fn duplicate_username_is_rejected_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let service = person_service(&conn);

    service
        .create_person(&NewPerson::new("Ada", "ada", Some("S1".to_string())))
        .unwrap();

    let err = service
        .create_person(&NewPerson::new("Bea", "ada", None))
        .unwrap_err();
    assert!(matches!(err, ServiceError::UsernameTaken(ref username) if username == "ada"));
    assert!(!err.is_fatal());
    assert!(err.to_string().contains("already exists"));

    assert_eq!(count_rows(&conn, "SELECT COUNT(1) FROM persons;"), 1);
    let kept = service.get_person("ada").unwrap();
    assert_eq!(kept.name, "Ada");
    assert_eq!(kept.student_id.as_deref(), Some("S1"));
}

#[test]
fn empty_fields_are_rejected_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let service = person_service(&conn);

    let err = service
        .create_person(&NewPerson::new("", "ada", None))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Empty { field: "name" })
    ));

    let err = service
        .create_person(&NewPerson::new("Ada", "", None))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Empty { field: "username" })
    ));

    let err = service
        .create_person(&NewPerson::new("Ada", "ada", Some(String::new())))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::EmptyOptional { field: "student id" })
    ));
    assert!(!err.is_fatal());

    assert_eq!(count_rows(&conn, "SELECT COUNT(1) FROM persons;"), 0);
}

#[test]
fn overlong_fields_are_rejected_before_any_write() {
    let conn = open_db_in_memory().unwrap();
    let service = person_service(&conn);

    let err = service
        .create_person(&NewPerson::new("N".repeat(101), "ada", None))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::TooLong {
            field: "name",
            max: 100,
            actual: 101
        })
    ));

    let err = service
        .create_person(&NewPerson::new("Ada", "a".repeat(11), None))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::TooLong {
            field: "username",
            max: 10,
            actual: 11
        })
    ));

    let err = service
        .create_person(&NewPerson::new("Ada", "ada", Some("S".repeat(11))))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::TooLong {
            field: "student id",
            max: 10,
            actual: 11
        })
    ));

    assert_eq!(count_rows(&conn, "SELECT COUNT(1) FROM persons;"), 0);
}

#[test]
fn lookup_with_empty_username_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let service = person_service(&conn);

    let err = service.get_person("").unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::Empty { field: "username" })
    ));
    assert!(!err.is_fatal());
}

#[test]
fn lookup_of_unknown_username_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = person_service(&conn);

    let err = service.get_person("ghost").unwrap_err();
    assert!(matches!(err, ServiceError::PersonNotFound(ref username) if username == "ghost"));
    assert!(!err.is_fatal());
}

#[test]
fn list_users_iterates_in_username_order() {
    let conn = open_db_in_memory().unwrap();
    let service = person_service(&conn);

    service
        .create_person(&NewPerson::new("Carol", "carol", None))
        .unwrap();
    service
        .create_person(&NewPerson::new("Ada", "ada", None))
        .unwrap();
    service
        .create_person(&NewPerson::new("Bea", "bea", None))
        .unwrap();

    let usernames: Vec<String> = service.list_users().unwrap().into_keys().collect();
    assert_eq!(usernames, vec!["ada", "bea", "carol"]);
}

#[test]
fn list_users_is_empty_before_anyone_registers() {
    let conn = open_db_in_memory().unwrap();
    let service = person_service(&conn);

    assert!(service.list_users().unwrap().is_empty());
}

#[test]
fn person_view_serializes_with_stable_keys() {
    let conn = open_db_in_memory().unwrap();
    let service = person_service(&conn);

    service
        .create_person(&NewPerson::new("Ada", "ada", Some("S1".to_string())))
        .unwrap();
    service
        .create_person(&NewPerson::new("Bea", "bea", None))
        .unwrap();

    let ada = serde_json::to_value(service.get_person("ada").unwrap()).unwrap();
    assert_eq!(
        ada,
        json!({ "name": "Ada", "username": "ada", "student_id": "S1" })
    );

    let bea = serde_json::to_value(service.get_person("bea").unwrap()).unwrap();
    assert_eq!(
        bea,
        json!({ "name": "Bea", "username": "bea", "student_id": null })
    );
}

fn person_service(conn: &Connection) -> PersonService<SqlitePersonRepository<'_>> {
    PersonService::new(SqlitePersonRepository::try_new(conn).unwrap())
}

fn count_rows(conn: &Connection, sql: &str) -> i64 {
    conn.query_row(sql, [], |row| row.get(0)).unwrap()
}
