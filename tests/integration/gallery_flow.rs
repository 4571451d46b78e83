use crate::integration::support::{file, service, upload};
use photo_portal::access::{AccessConfig, Role, RoleAccess};
use photo_portal::commands::{DeleteRequest, RenameRequest, UploadRequest};
use photo_portal::error::ApiError;
use photo_portal::hierarchy::Category;
use photo_portal::views::{file_count, AssetFilter};

#[test]
fn upload_then_views_by_category() {
    let (service, store) = service(AccessConfig::default());

    service
        .upload(Role::Admin, upload("Acme", "J Smith", "2024-01-01", None, &["a.jpg", "b.png"]))
        .unwrap();
    service
        .upload(Role::Admin, upload("Acme", "J Smith", "2024-01-01", Some("sales"), &["c.jpg"]))
        .unwrap();
    service
        .upload(Role::Admin, upload("Globex", "K", "2024-02-02", Some("other2"), &["d.jpg"]))
        .unwrap();

    assert!(store.contains("photos/Acme/J-Smith/2024-01-01/1700000000000_a.jpg"));
    assert_eq!(
        store.content_type("photos/Acme/J-Smith/2024-01-01/1700000000001_b.png").as_deref(),
        Some("image/png")
    );

    let main = service.gallery(Role::Boss, AssetFilter::Main).unwrap();
    assert_eq!(file_count(&main.brands), 2);
    assert_eq!(main.brands.len(), 1);
    assert_eq!(main.brands[0].brand, "Acme");

    let sales = service.gallery(Role::Boss, AssetFilter::Sales).unwrap();
    assert_eq!(file_count(&sales.brands), 1);
    assert_eq!(
        sales.brands[0].persons[0].dates[0].files[0].name,
        "1700000000002_c.jpg"
    );

    let other = service.gallery(Role::Boss, AssetFilter::Other).unwrap();
    assert!(other.brands.is_empty());

    let all = service.gallery(Role::Admin, AssetFilter::All).unwrap();
    assert_eq!(file_count(&all.brands), 4);
    let brands: Vec<_> = all.brands.iter().map(|b| b.brand.as_str()).collect();
    assert_eq!(brands, vec!["Acme", "Globex"]);
}

#[test]
fn spellings_merge_into_one_leaf() {
    let (service, _store) = service(AccessConfig::default());
    service
        .upload(Role::Admin, upload("Acme  Corp", " J Smith", "2024-01-01", None, &["a.jpg"]))
        .unwrap();
    let result = service
        .upload(Role::Admin, upload("Acme Corp", "J   Smith ", "2024-01-01", None, &["b.jpg"]))
        .unwrap();
    assert_eq!(result.brand, "Acme-Corp");
    assert_eq!(result.person, "J-Smith");

    let doc = service.photos().load().unwrap();
    assert_eq!(doc.leaf("Acme-Corp", "J-Smith", "2024-01-01").unwrap().len(), 2);
}

#[test]
fn upload_defaults_missing_levels_and_category() {
    let (service, _store) = service(AccessConfig::default());
    let result = service
        .upload(
            Role::Admin,
            UploadRequest {
                brand: None,
                person: Some("   ".to_string()),
                date: None,
                category: Some("banner".to_string()),
                files: vec![file("x.jpg")],
            },
        )
        .unwrap();

    assert_eq!(
        (result.brand.as_str(), result.person.as_str(), result.date.as_str()),
        ("DefaultBrand", "DefaultPerson", "NoDate")
    );
    assert_eq!(result.stored[0].category, Some(Category::Main));
    assert_eq!(
        result.stored[0].url,
        "https://cdn.test/bucket/photos/DefaultBrand/DefaultPerson/NoDate/1700000000000_x.jpg"
    );
}

#[test]
fn upload_without_files_is_rejected_before_storage() {
    let (service, store) = service(AccessConfig::default());
    let err = service
        .upload(Role::Admin, upload("Acme", "J", "2024", None, &[]))
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
    assert!(store.is_empty());
}

#[test]
fn boss_cannot_write_or_open_full_view() {
    let (service, store) = service(AccessConfig::default());

    let err = service
        .upload(Role::Boss, upload("Acme", "J", "2024", None, &["a.jpg"]))
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
    assert!(store.is_empty());

    let err = service
        .delete(
            Role::Boss,
            DeleteRequest {
                brand: "Acme".to_string(),
                person: "J".to_string(),
                date: "2024".to_string(),
                name: "a.jpg".to_string(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));

    assert!(matches!(
        service.gallery(Role::Boss, AssetFilter::All),
        Err(ApiError::Unauthorized(_))
    ));
}

#[test]
fn excluded_brands_are_hidden_from_boss_only() {
    let access = AccessConfig {
        admin: RoleAccess::default(),
        boss: RoleAccess {
            excluded_brands: vec!["Internal  Tests".to_string()],
        },
    };
    let (service, _store) = service(access);
    service
        .upload(Role::Admin, upload("Internal Tests", "QA", "2024", None, &["a.jpg"]))
        .unwrap();
    service
        .upload(Role::Admin, upload("Acme", "J", "2024", None, &["b.jpg"]))
        .unwrap();

    let boss = service.gallery(Role::Boss, AssetFilter::Main).unwrap();
    let brands: Vec<_> = boss.brands.iter().map(|b| b.brand.as_str()).collect();
    assert_eq!(brands, vec!["Acme"]);

    let admin = service.gallery(Role::Admin, AssetFilter::Main).unwrap();
    assert_eq!(admin.brands.len(), 2);
}

#[test]
fn rename_keeps_extension_and_ignores_missing_targets() {
    let (service, _store) = service(AccessConfig::default());
    let stored = service
        .upload(Role::Admin, upload("Acme", "J", "2024", None, &["a.jpg"]))
        .unwrap()
        .stored;
    let old_name = stored[0].name.clone();

    let rename = |old: &str, new: &str, person: &str| RenameRequest {
        brand: "Acme".to_string(),
        person: person.to_string(),
        date: "2024".to_string(),
        old_name: old.to_string(),
        new_name: new.to_string(),
    };

    let result = service
        .rename(Role::Admin, rename(&old_name, "cover", "J"))
        .unwrap();
    assert_eq!(result.new_name.as_deref(), Some("cover.jpg"));

    let doc = service.photos().load().unwrap();
    let record = &doc.leaf("Acme", "J", "2024").unwrap()[0];
    assert_eq!(record.name, "cover.jpg");
    assert_eq!(record.storage_key, stored[0].storage_key);

    let missing = service
        .rename(Role::Admin, rename("nope.jpg", "x", "J"))
        .unwrap();
    assert_eq!(missing.new_name, None);
    let missing_path = service
        .rename(Role::Admin, rename("cover.jpg", "x", "Nobody"))
        .unwrap();
    assert_eq!(missing_path.new_name, None);

    let err = service
        .rename(Role::Admin, rename("cover.jpg", "  ", "J"))
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));
}

#[test]
fn delete_removes_object_and_record_but_keeps_empty_leaf() {
    let (service, store) = service(AccessConfig::default());
    let stored = service
        .upload(Role::Admin, upload("Acme", "J", "2024", None, &["a.jpg"]))
        .unwrap()
        .stored;

    let result = service
        .delete(
            Role::Admin,
            DeleteRequest {
                brand: "Acme".to_string(),
                person: "J".to_string(),
                date: "2024".to_string(),
                name: stored[0].name.clone(),
            },
        )
        .unwrap();
    assert_eq!(result.removed.as_ref(), Some(&stored[0]));
    assert!(!store.contains(&stored[0].storage_key));

    let doc = service.photos().load().unwrap();
    assert_eq!(doc.leaf("Acme", "J", "2024").map(Vec::len), Some(0));
    assert!(service
        .gallery(Role::Admin, AssetFilter::All)
        .unwrap()
        .brands
        .is_empty());

    let again = service
        .delete(
            Role::Admin,
            DeleteRequest {
                brand: "Acme".to_string(),
                person: "J".to_string(),
                date: "2024".to_string(),
                name: stored[0].name.clone(),
            },
        )
        .unwrap();
    assert!(again.removed.is_none());
}

#[test]
fn status_counts_every_document() {
    let (service, _store) = service(AccessConfig::default());
    service
        .upload(Role::Admin, upload("Acme", "J", "2024-01", None, &["a.jpg", "b.jpg"]))
        .unwrap();
    service
        .upload(Role::Admin, upload("Acme", "K", "2024-02", None, &["c.jpg"]))
        .unwrap();

    let status = service.status().unwrap();
    assert_eq!(status.brands, 1);
    assert_eq!(status.persons, 2);
    assert_eq!(status.dates, 2);
    assert_eq!(status.assets, 3);
    assert_eq!(status.active_sheets, 0);
    assert_eq!(status.purchases, 0);
}
