use super::*;
use crate::server::{
    model::{
        employee::{CreateEmployeeParams, UpdateEmployeeParams},
        role::UpdateRoleParams,
    },
    service::{employee::EmployeeService, role::RoleService},
};
use entity::enums::RoleKind;

fn rename(name: &str) -> UpdateRoleParams {
    UpdateRoleParams {
        name: Some(name.to_string()),
        kind: None,
    }
}

/// Tests editing and deleting a system role.
///
/// Expected: Err(AppError::BadRequest) for both, and the role kept unchanged
#[tokio::test]
async fn system_roles_are_read_only() -> Result<(), AppError> {
    let test = TestBuilder::new().with_project_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::role::RoleFactory::new(db)
        .name("Administrator")
        .kind(RoleKind::User)
        .is_system(true)
        .build()
        .await?;
    let service = RoleService::new(db);

    let updated = service.update(role.id, rename("Renamed")).await;
    assert!(matches!(updated, Err(AppError::BadRequest(_))));

    let deleted = service.delete(role.id).await;
    assert!(matches!(deleted, Err(AppError::BadRequest(_))));

    assert_eq!(service.get_by_id(role.id).await?.name, "Administrator");

    Ok(())
}

/// Tests deleting a role that an employee still holds.
///
/// Expected: Err(AppError::BadRequest) until the employee is removed, then Ok
#[tokio::test]
async fn role_in_use_cannot_be_deleted() -> Result<(), AppError> {
    let test = TestBuilder::new().with_project_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db).await?;
    let employee = factory::employee::EmployeeFactory::new(db, role.id)
        .build()
        .await?;
    let service = RoleService::new(db);

    let result = service.delete(role.id).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));

    EmployeeService::new(db).delete(employee.id).await?;
    service.delete(role.id).await?;

    let gone = service.get_by_id(role.id).await;
    assert!(matches!(gone, Err(AppError::NotFound(_))));

    Ok(())
}

/// Tests renaming an ordinary role.
///
/// Expected: Ok with the new name
#[tokio::test]
async fn renames_custom_role() -> Result<(), AppError> {
    let test = TestBuilder::new().with_project_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let role = factory::create_role(db).await?;

    let updated = RoleService::new(db).update(role.id, rename("Foreman")).await?;

    assert_eq!(updated.name, "Foreman");

    Ok(())
}

/// Tests creating and re-assigning employees with roles of the wrong kind.
///
/// Expected: Err(AppError::Validation) on `role_id` for a user role and for an unknown id
#[tokio::test]
async fn employee_role_must_be_employee_kind() -> Result<(), AppError> {
    let test = TestBuilder::new().with_project_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let user_role = factory::role::RoleFactory::new(db)
        .kind(RoleKind::User)
        .build()
        .await?;
    let employee_role = factory::create_role(db).await?;
    let service = EmployeeService::new(db);

    let params = |role_id| CreateEmployeeParams {
        first_name: "Ayse".to_string(),
        last_name: None,
        phone: None,
        role_id,
    };

    let result = service.create(params(user_role.id)).await;
    assert!(matches!(&result, Err(AppError::Validation(errors)) if errors[0].field == "role_id"));

    let result = service.create(params(999)).await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let employee = service.create(params(employee_role.id)).await?;
    assert_eq!(employee.role_id, employee_role.id);

    let result = service
        .update(
            employee.id,
            UpdateEmployeeParams {
                role_id: Some(user_role.id),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    Ok(())
}
