//! Accessor Tests
//!
//! Every polymorphic declaration `R` on a host produces:
//! - `R_types`: the allow-list
//! - `with_R(designator)`: records whose tag names the designated type
//! - `with_R_<t>()`: one scope per allowed type
//! - `is_R_<t>(record)`: one predicate per allowed type

use crate::common::*;

// ============================================================================
// Naming
// ============================================================================

#[test]
fn test_generated_names() {
    let library = Library::new();
    assert_eq!(
        library.book_model().operations(),
        vec![
            "is_owner_publisher",
            "is_owner_user",
            "owner_types",
            "with_owner",
            "with_owner_publisher",
            "with_owner_user",
        ]
    );
}

#[test]
fn test_multi_word_types_are_underscored() {
    let schema = library_schema();
    schema.define_model(ty("AdminUser")).unwrap();
    schema
        .declare_polymorphic_reference(&ty("Book"), "owner", &["admin_users".into()], false)
        .unwrap();
    let model = schema.model(&ty("Book")).unwrap();
    assert!(model.scope("with_owner_admin_user").is_ok());
    assert!(model.predicate("is_owner_admin_user").is_ok());
}

#[test]
fn test_accessors_are_per_host() {
    let library = Library::new();
    let other_thing = library.schema.model(&ty("OtherThing")).unwrap();
    assert!(other_thing.scope("with_owner_user").is_err());
    assert!(other_thing.scope("with_thing_user").is_ok());
    assert!(library.book_model().scope("with_thing_user").is_err());
}

// ============================================================================
// Typed lookup
// ============================================================================

#[test]
fn test_lookup_accepts_every_designator_form() {
    let library = Library::new();
    let user = library.create("User");
    let publisher = library.create("Publisher");
    let by_user = library.book_owned_by(&user);
    library.book_owned_by(&publisher);

    let model = library.book_model();
    let expected = vec![by_user.id().unwrap()];
    let forms: Vec<Designator> = vec![
        ty("User").into(),
        "User".into(),
        "users".into(),
        sym("user").into(),
        (&user).into(),
    ];
    for form in forms {
        let label = form.to_string();
        let found = model.find_with("with_owner", &library.store, form).unwrap();
        assert_eq!(found.ids(), expected, "lookup by {label}");
    }
}

#[test]
fn test_lookup_of_type_outside_allow_list_is_empty() {
    let library = Library::new();
    library.book_owned_by(&library.create("User"));
    let found = library
        .book_model()
        .find_with("with_owner", &library.store, "other_thing")
        .unwrap();
    assert!(found.is_empty());
}

#[test]
fn test_lookup_of_unknown_name_fails() {
    let library = Library::new();
    let err = library
        .book_model()
        .find_with("with_owner", &library.store, "magazine")
        .unwrap_err();
    assert!(matches!(err, PolyrefError::UnresolvableType { .. }));
}

// ============================================================================
// Scopes and predicates
// ============================================================================

#[test]
fn test_scopes_partition_by_tag() {
    let library = Library::new();
    let user = library.create("User");
    let publisher = library.create("Publisher");
    let a = library.book_owned_by(&user);
    let b = library.book_owned_by(&publisher);
    let c = library.book_owned_by(&user);

    let model = library.book_model();
    assert_eq!(
        model.query_scope("with_owner_user", &library.store).unwrap().ids(),
        vec![a.id().unwrap(), c.id().unwrap()]
    );
    assert_eq!(
        model.query_scope("with_owner_publisher", &library.store).unwrap().ids(),
        vec![b.id().unwrap()]
    );
}

#[test]
fn test_predicates_follow_the_tag() {
    let library = Library::new();
    let book = library.book_owned_by(&library.create("Publisher"));
    let model = library.book_model();
    assert!(model.check("is_owner_publisher", &book).unwrap());
    assert!(!model.check("is_owner_user", &book).unwrap());

    let untagged = Record::new(ty("Book"));
    assert!(!model.check("is_owner_publisher", &untagged).unwrap());
    assert!(!model.check("is_owner_user", &untagged).unwrap());
}

#[test]
fn test_types_reader() {
    let library = Library::new();
    assert_eq!(
        library.book_model().types_reader("owner_types").unwrap(),
        &[ty("Publisher"), ty("User")]
    );
    assert!(matches!(
        library.book_model().types_reader("author_types"),
        Err(PolyrefError::UnknownOperation { .. })
    ));
}

#[test]
fn test_optional_reference_scopes_skip_untagged_records() {
    let library = Library::new();
    let user = library.create("User");
    let tagged = library
        .store
        .create(
            &library.schema,
            Record::new(ty("OtherThing")).with_reference("thing", Some(&user)),
        )
        .unwrap();
    library.create("OtherThing");

    let model = library.schema.model(&ty("OtherThing")).unwrap();
    assert_eq!(
        model.query_scope("with_thing_user", &library.store).unwrap().ids(),
        vec![tagged.id().unwrap()]
    );
    assert!(model
        .query_scope("with_thing_publisher", &library.store)
        .unwrap()
        .is_empty());
    assert_eq!(library.store.all(&ty("OtherThing")).len(), 2);
}
