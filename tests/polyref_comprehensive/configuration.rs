//! Configuration Tests
//!
//! `polyref.toml` drives the re-declaration policy and message overrides.

use crate::common::*;
use strata_polyref::CONFIG_FILE_NAME;

fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, content).expect("Failed to write config");
    (dir, path)
}

fn define_library(schema: &Schema) {
    for name in ["User", "Publisher", "Book", "OtherThing"] {
        schema.define_model(ty(name)).unwrap();
    }
}

#[test]
fn test_schema_from_config_file() {
    let (_dir, path) = write_config(
        r#"
        redeclaration = "replace"

        [messages]
        "polyref.errors.messages.class_not_allowed" = "%{class} may not own a book"
        "#,
    );
    let schema = Schema::from_config_file(&path).unwrap();
    assert_eq!(schema.config().redeclaration, RedeclarationPolicy::Replace);
    define_library(&schema);

    let book = ty("Book");
    schema
        .declare_polymorphic_reference(&book, "owner", &["publisher".into()], false)
        .unwrap();
    schema
        .declare_polymorphic_reference(&book, "owner", &["user".into()], false)
        .unwrap();

    let mut publisher = Record::new(ty("Publisher"));
    publisher.assign_id(RecordId::new(1));
    let errors = schema
        .validate(&Record::new(book).with_reference("owner", Some(&publisher)))
        .unwrap();
    assert_eq!(errors.on("owner_type"), ["Publisher may not own a book"]);
}

#[test]
fn test_default_toml_round_trips_through_file() {
    let (_dir, path) = write_config(PolyrefConfig::default_toml());
    let schema = Schema::from_config_file(&path).unwrap();
    assert_eq!(schema.config(), &PolyrefConfig::default());
}

#[test]
fn test_bad_config_file_is_reported() {
    let (_dir, path) = write_config("redeclaration = 3\n");
    let err = Schema::from_config_file(&path).unwrap_err();
    assert!(matches!(err, PolyrefError::Config(_)));
    assert!(!err.is_declaration_error());
}
