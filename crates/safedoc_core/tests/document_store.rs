use chrono::{NaiveDate, Utc};
use rusqlite::Connection;
use safedoc_core::db::open_db_in_memory;
use safedoc_core::model::activity::ActivityRiskAnalysis;
use safedoc_core::model::checklist::Checklist;
use safedoc_core::model::employee::Employee;
use safedoc_core::model::lockout::LockoutMatrix;
use safedoc_core::{
    Collection, Document, DocumentRepository, EmergencyRiskAnalysis, RepoError,
    SqliteDocumentRepository, ValidationError,
};
use uuid::Uuid;

fn emergency(analysis: &str) -> EmergencyRiskAnalysis {
    let mut form = EmergencyRiskAnalysis::new();
    form.date = "2025-10-31".to_string();
    form.time = "08:15".to_string();
    form.analysis_360 = analysis.to_string();
    form
}

#[test]
fn each_record_type_round_trips() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let employee = Employee::new("Ana Souza", "81234", "Mecânica");
    repo.put(&employee).unwrap();
    assert_eq!(repo.get::<Employee>(employee.id).unwrap(), Some(employee.clone()));

    let mut form = emergency("pátio livre");
    form.set_risk_selected(8, true).unwrap();
    form.set_risk_control(8, "cones").unwrap();
    repo.put(&form).unwrap();
    assert_eq!(repo.get::<EmergencyRiskAnalysis>(form.id).unwrap(), Some(form));

    let mut activity = ActivityRiskAnalysis::new(Utc::now());
    activity.toggle_circumstantial_risk(4).unwrap();
    repo.put(&activity).unwrap();
    assert_eq!(repo.get::<ActivityRiskAnalysis>(activity.id).unwrap(), Some(activity));

    let at = NaiveDate::from_ymd_opt(2025, 10, 31)
        .unwrap()
        .and_hms_opt(7, 0, 0)
        .unwrap();
    let mut checklist = Checklist::new(at);
    checklist.asset = "CM-210".to_string();
    checklist.om = "OM-77".to_string();
    checklist.assign_technician(&employee);
    repo.put(&checklist).unwrap();
    assert_eq!(repo.get::<Checklist>(checklist.id).unwrap(), Some(checklist));

    let mut matrix = LockoutMatrix::new(Utc::now());
    matrix.executed_task = "Troca de pneu".to_string();
    matrix.art_code = "155574".to_string();
    matrix.om = "OM-78".to_string();
    matrix.tag = "CM-210".to_string();
    repo.put(&matrix).unwrap();
    assert_eq!(repo.get::<LockoutMatrix>(matrix.id).unwrap(), Some(matrix));
}

#[test]
fn put_twice_keeps_one_row_and_original_created_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let mut form = emergency("primeira versão");
    repo.put(&form).unwrap();
    let first = repo
        .timestamps(Collection::EmergencyAnalyses, form.id)
        .unwrap()
        .unwrap();

    form.analysis_360 = "segunda versão".to_string();
    repo.put(&form).unwrap();
    let second = repo
        .timestamps(Collection::EmergencyAnalyses, form.id)
        .unwrap()
        .unwrap();

    assert_eq!(repo.count(Collection::EmergencyAnalyses).unwrap(), 1);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at >= first.updated_at);
    let stored: EmergencyRiskAnalysis = repo.get(form.id).unwrap().unwrap();
    assert_eq!(stored.analysis_360, "segunda versão");
}

#[test]
fn list_follows_insertion_order_within_a_collection() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let names = ["Carla", "Bruno", "Ana"];
    for name in names {
        repo.put(&Employee::new(name, "1", "Elétrica")).unwrap();
    }
    repo.put(&emergency("outra coleção")).unwrap();

    let listed: Vec<String> = repo
        .list::<Employee>()
        .unwrap()
        .into_iter()
        .map(|employee| employee.name)
        .collect();
    assert_eq!(listed, names);
    assert_eq!(repo.count(Collection::Employees).unwrap(), 3);
}

#[test]
fn delete_missing_id_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let employee = Employee::new("Ana", "1", "Elétrica");
    repo.put(&employee).unwrap();
    repo.delete::<Employee>(employee.id).unwrap();
    assert_eq!(repo.get::<Employee>(employee.id).unwrap(), None);

    match repo.delete::<Employee>(employee.id) {
        Err(RepoError::NotFound { collection, id }) => {
            assert_eq!(collection, Collection::Employees);
            assert_eq!(id, employee.id);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn ids_are_scoped_by_collection() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let employee = Employee::new("Ana", "1", "Elétrica");
    repo.put(&employee).unwrap();

    assert_eq!(repo.get::<EmergencyRiskAnalysis>(employee.id).unwrap(), None);
    assert!(matches!(
        repo.delete::<EmergencyRiskAnalysis>(employee.id),
        Err(RepoError::NotFound { .. })
    ));
}

#[test]
fn put_rejects_invalid_documents_before_writing() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();

    let result = repo.put(&Employee::new("", "1", "Elétrica"));
    assert!(matches!(
        result,
        Err(RepoError::Validation(ValidationError::MissingField("name")))
    ));

    let mut nil = Employee::new("Ana", "1", "Elétrica");
    nil.id = Uuid::nil();
    assert!(matches!(
        repo.put(&nil),
        Err(RepoError::Validation(ValidationError::NilId))
    ));
    assert_eq!(repo.count(Collection::Employees).unwrap(), 0);
}

#[test]
fn corrupted_payload_is_reported_instead_of_skipped() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteDocumentRepository::try_new(&conn).unwrap();
    let id = Uuid::new_v4();

    conn.execute(
        "INSERT INTO documents (collection, id, payload, created_at, updated_at)
         VALUES (?1, ?2, '{\"name\": 3}', 1, 1);",
        [Employee::COLLECTION.as_str(), id.to_string().as_str()],
    )
    .unwrap();

    assert!(matches!(repo.get::<Employee>(id), Err(RepoError::InvalidData(_))));
    assert!(matches!(repo.list::<Employee>(), Err(RepoError::InvalidData(_))));
}

#[test]
fn try_new_requires_migrated_schema() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(matches!(
        SqliteDocumentRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("documents"))
    ));
}
