use crate::integration::support::service;
use photo_portal::access::{AccessConfig, Role};
use photo_portal::commands::{SheetRequest, SheetTarget};
use photo_portal::error::ApiError;
use photo_portal::sheets::DEFAULT_SHEET_NAME;

fn request(brand: &str, person: &str, date: &str, sheet_id: &str) -> SheetRequest {
    SheetRequest {
        brand: brand.to_string(),
        person: person.to_string(),
        date: date.to_string(),
        sheet_id: sheet_id.to_string(),
        display_name: None,
    }
}

fn target(brand: &str, person: &str, date: &str) -> SheetTarget {
    SheetTarget {
        brand: brand.to_string(),
        person: person.to_string(),
        date: date.to_string(),
    }
}

#[test]
fn add_list_replace_and_remove() {
    let (service, _store) = service(AccessConfig::default());

    let added = service
        .add_sheet(Role::Admin, request("Acme", "J Smith", "2024-01-01", "abc"))
        .unwrap();
    assert_eq!(added.display_name, DEFAULT_SHEET_NAME);
    assert_eq!(
        added.embed_url,
        "https://docs.google.com/spreadsheets/d/abc/edit"
    );

    let mut renamed = request("Acme", "J Smith", "2024-01-01", "def");
    renamed.display_name = Some("Q1 Sales".to_string());
    service.add_sheet(Role::Admin, renamed).unwrap();

    let sheets = service.list_sheets(Role::Boss).unwrap();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].person, "J Smith");
    assert_eq!(sheets[0].sheet_id, "def");
    assert_eq!(sheets[0].display_name, "Q1 Sales");

    service
        .remove_sheet(Role::Admin, target("Acme", "J Smith", "2024-01-01"))
        .unwrap();
    assert!(service.list_sheets(Role::Boss).unwrap().is_empty());

    let doc = service.sheets().load().unwrap();
    assert!(doc.contains_key("Acme/J Smith/2024-01-01"));
}

#[test]
fn removing_unknown_link_succeeds() {
    let (service, _store) = service(AccessConfig::default());
    service
        .remove_sheet(Role::Admin, target("Nobody", "X", "1999"))
        .unwrap();
    assert!(service.list_sheets(Role::Admin).unwrap().is_empty());
}

#[test]
fn links_use_raw_keys() {
    let (service, _store) = service(AccessConfig::default());
    service
        .add_sheet(Role::Admin, request("Acme", "J Smith", "2024", "a"))
        .unwrap();
    service
        .add_sheet(Role::Admin, request("Acme", "J  Smith", "2024", "b"))
        .unwrap();
    assert_eq!(service.list_sheets(Role::Admin).unwrap().len(), 2);
}

#[test]
fn validation_and_authorization() {
    let (service, _store) = service(AccessConfig::default());

    let err = service
        .add_sheet(Role::Admin, request("Acme", "", "2024", "a"))
        .unwrap_err();
    match err {
        ApiError::ValidationError(msg) => assert!(msg.contains("person")),
        other => panic!("unexpected error: {}", other),
    }

    let err = service
        .add_sheet(Role::Boss, request("Acme", "J", "2024", "a"))
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
    assert!(matches!(
        service.remove_sheet(Role::Boss, target("Acme", "J", "2024")),
        Err(ApiError::Unauthorized(_))
    ));
}
