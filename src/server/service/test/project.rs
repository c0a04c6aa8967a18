use super::*;
use crate::server::service::project::ProjectService;
use entity::enums::UserRole;

/// Tests adding the same user to a project twice.
///
/// Expected: first add Ok, second Err(AppError::BadRequest), one membership stored
#[tokio::test]
async fn rejects_duplicate_user_membership() -> Result<(), AppError> {
    let test = TestBuilder::new().with_project_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let project = factory::create_project(db).await?;
    let engineer = factory::user::create_user_with_role(db, UserRole::Engineer).await?;
    let service = ProjectService::new(db);

    let member = service
        .add_user(project.id, engineer.id, UserRole::Engineer)
        .await?;
    assert_eq!(member.user_id, engineer.id);

    let again = service
        .add_user(project.id, engineer.id, UserRole::Engineer)
        .await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    assert_eq!(service.get_users(project.id).await?.len(), 1);

    Ok(())
}

/// Tests adding the same employee to a project twice.
///
/// Expected: first add Ok, second Err(AppError::BadRequest), one assignment stored
#[tokio::test]
async fn rejects_duplicate_employee_assignment() -> Result<(), AppError> {
    let test = TestBuilder::new().with_project_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let project = factory::create_project(db).await?;
    let employee = factory::create_employee(db).await?;
    let service = ProjectService::new(db);

    service
        .add_employee(project.id, employee.id, Some("Site chief".to_string()))
        .await?;

    let again = service.add_employee(project.id, employee.id, None).await;
    assert!(matches!(again, Err(AppError::BadRequest(_))));

    let assignments = service.get_employees(project.id).await?;
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].role.as_deref(), Some("Site chief"));

    Ok(())
}

/// Tests memberships referencing rows that do not exist.
///
/// Expected: Err(AppError::NotFound) for an unknown project, user and employee
#[tokio::test]
async fn membership_requires_existing_rows() -> Result<(), AppError> {
    let test = TestBuilder::new().with_project_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let project = factory::create_project(db).await?;
    let user = factory::create_user(db).await?;
    let service = ProjectService::new(db);

    let result = service.add_user(999, user.id, UserRole::Engineer).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = service.add_user(project.id, 999, UserRole::Engineer).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    let result = service.add_employee(project.id, 999, None).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
