use crate::integration::support::{file, service};
use photo_portal::access::{AccessConfig, Role};
use photo_portal::commands::PurchaseRequest;
use photo_portal::error::ApiError;

fn request(date: &str, supplier: &str) -> PurchaseRequest {
    PurchaseRequest {
        date: date.to_string(),
        supplier: supplier.to_string(),
        purchase_ids_text: "PO-1, PO-2".to_string(),
        total_text: "$120".to_string(),
        ..Default::default()
    }
}

#[test]
fn add_purchase_stores_photos_in_order() {
    let (service, store) = service(AccessConfig::default());

    let mut req = request("2024-01-05", "Big Paper Co");
    req.invoice_photos = vec![file("inv.pdf"), file("inv2.jpg")];
    req.product_photos = vec![file("box.png")];
    let record = service.add_purchase(Role::Admin, req).unwrap();

    assert_eq!(record.id, "2024-01-05-Big-Paper-Co-1700000000000");
    assert_eq!(
        record.invoice_photo_urls,
        vec![
            "https://cdn.test/bucket/purchases/2024-01-05-Big-Paper-Co-1700000000000-invoice-0.pdf",
            "https://cdn.test/bucket/purchases/2024-01-05-Big-Paper-Co-1700000000000-invoice-1.jpg",
        ]
    );
    assert_eq!(record.product_photo_urls.len(), 1);
    assert!(store.contains("purchases/2024-01-05-Big-Paper-Co-1700000000000-product-0.png"));
    assert_eq!(record.total_text, "$120");

    let listed = service.list_purchases(Role::Boss).unwrap();
    assert_eq!(listed, vec![record]);
}

#[test]
fn list_is_newest_first() {
    let (service, _store) = service(AccessConfig::default());
    service
        .add_purchase(Role::Admin, request("2024-01-01", "A"))
        .unwrap();
    service
        .add_purchase(Role::Admin, request("2024-06-01", "B"))
        .unwrap();
    service
        .add_purchase(Role::Admin, request("2024-03-01", "C"))
        .unwrap();

    let suppliers: Vec<_> = service
        .list_purchases(Role::Admin)
        .unwrap()
        .into_iter()
        .map(|p| p.supplier)
        .collect();
    assert_eq!(suppliers, vec!["B", "C", "A"]);
}

#[test]
fn remove_purchase_deletes_its_photos() {
    let (service, store) = service(AccessConfig::default());
    let mut req = request("2024-01-05", "Acme");
    req.invoice_photos = vec![file("a.jpg")];
    req.product_photos = vec![file("b.jpg")];
    let record = service.add_purchase(Role::Admin, req).unwrap();
    assert!(store.keys().iter().any(|k| k.starts_with("purchases/")));

    let removed = service.remove_purchase(Role::Admin, &record.id).unwrap();
    assert_eq!(removed.map(|r| r.id), Some(record.id.clone()));
    assert!(!store.keys().iter().any(|k| k.starts_with("purchases/")));
    assert!(service.list_purchases(Role::Admin).unwrap().is_empty());

    assert!(service
        .remove_purchase(Role::Admin, &record.id)
        .unwrap()
        .is_none());
}

#[test]
fn remove_purchase_deletes_photos_when_supplier_has_slash() {
    let (service, store) = service(AccessConfig::default());
    let mut req = request("2024-01-05", "A/B Traders");
    req.invoice_photos = vec![file("a.jpg")];
    let record = service.add_purchase(Role::Admin, req).unwrap();

    assert_eq!(record.id, "2024-01-05-A/B-Traders-1700000000000");
    assert!(store.contains("purchases/2024-01-05-A/B-Traders-1700000000000-invoice-0.jpg"));

    service.remove_purchase(Role::Admin, &record.id).unwrap();
    assert!(!store.keys().iter().any(|k| k.starts_with("purchases/")));
}

#[test]
fn purchases_require_date_and_supplier_and_admin() {
    let (service, store) = service(AccessConfig::default());

    let err = service
        .add_purchase(Role::Admin, request(" ", "Acme"))
        .unwrap_err();
    assert!(matches!(err, ApiError::ValidationError(_)));

    let err = service
        .add_purchase(Role::Boss, request("2024-01-01", "Acme"))
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
    assert!(store.is_empty());

    assert!(matches!(
        service.remove_purchase(Role::Boss, "anything"),
        Err(ApiError::Unauthorized(_))
    ));
}
