//! Declaration Tests
//!
//! Declaring a polymorphic reference registers the allow-list, attaches the
//! inclusion rule and installs the accessors together, or not at all.

use crate::common::*;

// ============================================================================
// Allow-list registration
// ============================================================================

#[test]
fn test_types_of_keeps_declaration_order() {
    let schema = declared_library();
    assert_eq!(
        schema.types_of(&ty("Book"), "owner").unwrap(),
        vec![ty("Publisher"), ty("User")]
    );
    assert_eq!(
        schema.types_of(&ty("OtherThing"), "thing").unwrap(),
        vec![ty("User"), ty("Publisher")]
    );
}

#[test]
fn test_duplicate_designators_collapse() {
    let schema = library_schema();
    schema
        .declare_polymorphic_reference(
            &ty("Book"),
            "owner",
            &["user".into(), ty("User").into(), sym("users").into(), "publisher".into()],
            false,
        )
        .unwrap();
    assert_eq!(
        schema.types_of(&ty("Book"), "owner").unwrap(),
        vec![ty("User"), ty("Publisher")]
    );
    let model = schema.model(&ty("Book")).unwrap();
    assert_eq!(
        model.types_reader("owner_types").unwrap(),
        &[ty("User"), ty("Publisher")]
    );
}

#[test]
fn test_types_of_undeclared_reference() {
    let schema = declared_library();
    assert!(matches!(
        schema.types_of(&ty("Book"), "author"),
        Err(PolyrefError::UnknownReference { .. })
    ));
}

#[test]
fn test_registry_lists_declarations_per_host() {
    let schema = declared_library();
    let on_book = schema.registry().declarations_for(&ty("Book"));
    assert_eq!(on_book.len(), 1);
    assert_eq!(on_book[0].name(), "owner");
    assert!(!on_book[0].is_optional());
    assert_eq!(schema.registry().len(), 2);
}

// ============================================================================
// Plain references stay plain
// ============================================================================

#[test]
fn test_plain_reference_has_no_guard() {
    let schema = library_schema();
    schema.declare_reference(&ty("Book"), "publisher", false).unwrap();

    let model = schema.model(&ty("Book")).unwrap();
    assert!(model.has_reference("publisher"));
    assert!(!model.is_guarded("publisher"));
    assert!(model.operations().is_empty());
    assert!(schema.registry().is_empty());
}

#[test]
fn test_empty_allow_list_behaves_like_plain_reference() {
    let schema = library_schema();
    schema
        .declare_polymorphic_reference(&ty("Book"), "owner", &[], true)
        .unwrap();

    let model = schema.model(&ty("Book")).unwrap();
    assert!(model.has_reference("owner"));
    assert!(!model.is_guarded("owner"));
    assert!(!schema.registry().is_declared(&ty("Book"), "owner"));

    // Any tag goes through: no inclusion rule.
    let mut other = Record::new(ty("OtherThing"));
    other.assign_id(RecordId::new(3));
    let book = Record::new(ty("Book")).with_reference("owner", Some(&other));
    assert!(schema.is_valid(&book).unwrap());
}

// ============================================================================
// Atomicity
// ============================================================================

#[test]
fn test_unresolvable_designator_aborts_declaration() {
    let schema = library_schema();
    let err = schema
        .declare_polymorphic_reference(
            &ty("Book"),
            "owner",
            &[ty("User").into(), "magazine".into()],
            false,
        )
        .unwrap_err();

    assert!(err.is_declaration_error());
    let model = schema.model(&ty("Book")).unwrap();
    assert!(!model.has_reference("owner"));
    assert!(model.operations().is_empty());
    assert!(model.validators().is_empty());
    assert!(schema.registry().is_empty());
}

#[test]
fn test_unregistered_type_object_aborts_declaration() {
    let schema = library_schema();
    let err = schema
        .declare_polymorphic_reference(
            &ty("Book"),
            "owner",
            &[ty("Ghost").into(), ty("User").into()],
            false,
        )
        .unwrap_err();
    assert!(matches!(err, PolyrefError::UnresolvableType { .. }));
    assert!(!schema.registry().is_declared(&ty("Book"), "owner"));
    assert!(!schema.model(&ty("Book")).unwrap().has_reference("owner"));
}

#[test]
fn test_instance_of_unregistered_type_aborts_declaration() {
    let schema = library_schema();
    let phantom = Record::new(ty("Phantom"));
    let err = schema
        .declare_polymorphic_reference(&ty("OtherThing"), "thing", &[(&phantom).into()], true)
        .unwrap_err();
    assert!(matches!(err, PolyrefError::UnresolvableType { .. }));
    assert!(matches!(
        schema.types_of(&ty("OtherThing"), "thing"),
        Err(PolyrefError::UnknownReference { .. })
    ));
}

#[test]
fn test_accessor_collision_aborts_declaration() {
    let schema = library_schema();
    schema.define_model(ty("AdminUser")).unwrap();
    schema
        .declare_polymorphic_reference(&ty("Book"), "owner", &["admin_user".into()], false)
        .unwrap();

    // `owner_admin` + `User` generates `with_owner_admin_user` again.
    let err = schema
        .declare_polymorphic_reference(&ty("Book"), "owner_admin", &["user".into()], true)
        .unwrap_err();
    match &err {
        PolyrefError::AccessorNameCollision { accessor, .. } => {
            assert_eq!(accessor, "with_owner_admin_user");
        }
        other => panic!("unexpected error: {other}"),
    }

    let model = schema.model(&ty("Book")).unwrap();
    assert!(!model.has_reference("owner_admin"));
    assert!(!schema.registry().is_declared(&ty("Book"), "owner_admin"));
    assert_eq!(model.operations().len(), 4);
}

#[test]
fn test_declaring_on_undefined_host() {
    let schema = library_schema();
    assert!(matches!(
        schema.declare_polymorphic_reference(&ty("Magazine"), "owner", &["user".into()], false),
        Err(PolyrefError::UnknownModel(_))
    ));
}

// ============================================================================
// Re-declaration
// ============================================================================

#[test]
fn test_redeclaration_rejected_by_default() {
    let schema = declared_library();
    let err = schema
        .declare_polymorphic_reference(&ty("Book"), "owner", &["user".into()], true)
        .unwrap_err();
    assert!(matches!(err, PolyrefError::DuplicateDeclaration { .. }));

    // First declaration still in force.
    let model = schema.model(&ty("Book")).unwrap();
    assert_eq!(model.is_optional("owner"), Some(false));
    assert!(model.scope("with_owner_publisher").is_ok());
}

#[test]
fn test_redeclaration_replaces_under_replace_policy() {
    let schema = library_schema_with(PolyrefConfig {
        redeclaration: RedeclarationPolicy::Replace,
        ..PolyrefConfig::default()
    });
    let book = ty("Book");
    schema
        .declare_polymorphic_reference(&book, "owner", &["publisher".into()], false)
        .unwrap();
    schema
        .declare_polymorphic_reference(&book, "owner", &["user".into()], true)
        .unwrap();

    assert_eq!(schema.types_of(&book, "owner").unwrap(), vec![ty("User")]);
    let model = schema.model(&book).unwrap();
    assert_eq!(
        model.operations(),
        vec!["is_owner_user", "owner_types", "with_owner", "with_owner_user"]
    );
    assert_eq!(model.is_optional("owner"), Some(true));
}
