use super::*;

/// Tests parsing of the `Authorization` header.
///
/// Expected: only `Bearer <token>` with a non-blank token is accepted
#[test]
fn parses_authorization_header() {
    assert_eq!(BearerToken::parse(None), BearerToken::Missing);
    assert_eq!(
        BearerToken::parse(Some("Bearer abc.def.ghi")),
        BearerToken::Present("abc.def.ghi".to_string())
    );
    assert_eq!(BearerToken::parse(Some("Basic dXNlcg==")), BearerToken::Malformed);
    assert_eq!(BearerToken::parse(Some("Bearer   ")), BearerToken::Malformed);
    assert_eq!(BearerToken::parse(Some("abc.def.ghi")), BearerToken::Malformed);
}

/// Tests the role matrix behind each permission.
///
/// Expected: contractors may only raise requests; admins pass everything
#[test]
fn maps_permissions_to_roles() {
    let all = [
        Permission::Admin,
        Permission::ManageStock,
        Permission::Engineering,
        Permission::RaiseRequest,
        Permission::ViewReports,
    ];

    assert!(all.iter().all(|p| p.allows(UserRole::Admin)));
    assert!(Permission::RaiseRequest.allows(UserRole::Contractor));
    assert!(!Permission::ViewReports.allows(UserRole::Contractor));
    assert!(Permission::ManageStock.allows(UserRole::Warehouse));
    assert!(!Permission::Engineering.allows(UserRole::Warehouse));
    assert!(!Permission::ManageStock.allows(UserRole::Engineer));
}
