use photo_portal::tooling::cli::{CliContext, Commands, PurchaseCommands, SheetCommands};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_config(dir: &Path) -> PathBuf {
    let path = dir.join("portal.toml");
    fs::write(
        &path,
        r#"
[storage]
objects_path = "objects"
public_url_base = "https://cdn.example.com/assets/"

[access.boss]
excluded_brands = ["Hidden"]
"#,
    )
    .unwrap();
    path
}

fn upload_command(dir: &Path, brand: &str, names: &[&str], category: Option<&str>) -> Commands {
    let files = names
        .iter()
        .map(|name| {
            let path = dir.join(name);
            fs::write(&path, name.as_bytes()).unwrap();
            path
        })
        .collect();
    Commands::Upload {
        files,
        brand: Some(brand.to_string()),
        person: Some("J Smith".to_string()),
        date: Some("2024-01-01".to_string()),
        category: category.map(str::to_string),
        format: "json".to_string(),
    }
}

#[test]
fn upload_json_contract_and_files_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    let config = write_config(&root);

    let admin = CliContext::new(root.clone(), Some(config), "admin").unwrap();
    let output = admin
        .execute(&upload_command(&root, "Acme", &["a.jpg"], None))
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["brand"], "Acme");
    assert_eq!(parsed["person"], "J-Smith");
    let stored = parsed["stored"].as_array().unwrap();
    assert_eq!(stored.len(), 1);
    let key = stored[0]["storageKey"].as_str().unwrap();
    assert!(key.starts_with("photos/Acme/J-Smith/2024-01-01/"));
    assert!(key.ends_with("_a.jpg"));
    assert_eq!(
        stored[0]["url"].as_str().unwrap(),
        format!("https://cdn.example.com/assets/{}", key)
    );
    assert_eq!(stored[0]["category"], "main");

    let objects = root.join("objects");
    assert_eq!(fs::read(objects.join(key)).unwrap(), b"a.jpg");
    assert!(objects.join("metadata/photos.json").is_file());
}

#[test]
fn boss_gallery_json_hides_excluded_brands() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    let config = write_config(&root);

    let admin = CliContext::new(root.clone(), Some(config.clone()), "admin").unwrap();
    admin
        .execute(&upload_command(&root, "Acme", &["a.jpg"], Some("sales")))
        .unwrap();
    admin
        .execute(&upload_command(&root, "Hidden", &["b.jpg"], Some("sales")))
        .unwrap();

    let boss = CliContext::new(root.clone(), Some(config), "boss").unwrap();
    let output = boss
        .execute(&Commands::Gallery {
            view: "sales".to_string(),
            format: "json".to_string(),
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed["role"], "boss");
    assert_eq!(parsed["view"], "sales");
    let brands = parsed["brands"].as_array().unwrap();
    assert_eq!(brands.len(), 1);
    assert_eq!(brands[0]["brand"], "Acme");

    let text = boss
        .execute(&Commands::Gallery {
            view: "main".to_string(),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(text.contains("No photos."));

    assert!(boss
        .execute(&upload_command(&root, "Acme", &["c.jpg"], None))
        .is_err());
}

#[test]
fn sheet_and_purchase_list_contracts() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    let config = write_config(&root);
    let admin = CliContext::new(root.clone(), Some(config), "admin").unwrap();

    admin
        .execute(&Commands::Sheet {
            command: SheetCommands::Add {
                brand: "Acme".to_string(),
                person: "J Smith".to_string(),
                date: "2024-01-01".to_string(),
                sheet_id: "abc".to_string(),
                name: None,
            },
        })
        .unwrap();
    let output = admin
        .execute(&Commands::Sheet {
            command: SheetCommands::List {
                format: "json".to_string(),
            },
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let sheets = parsed.as_array().unwrap();
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0]["person"], "J Smith");
    assert_eq!(sheets[0]["display_name"], "Sales Data");

    let invoice = root.join("invoice.jpg");
    fs::write(&invoice, b"invoice").unwrap();
    admin
        .execute(&Commands::Purchase {
            command: PurchaseCommands::Add {
                date: "2024-01-05".to_string(),
                supplier: "Paper Co".to_string(),
                purchase_ids: String::new(),
                total: "$5".to_string(),
                return_info: String::new(),
                invoices: vec![invoice],
                products: Vec::new(),
                format: "text".to_string(),
            },
        })
        .unwrap();
    let output = admin
        .execute(&Commands::Purchase {
            command: PurchaseCommands::List {
                format: "json".to_string(),
            },
        })
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    let purchases = parsed.as_array().unwrap();
    assert_eq!(purchases.len(), 1);
    assert_eq!(purchases[0]["supplier"], "Paper Co");
    assert_eq!(purchases[0]["totalText"], "$5");
    assert_eq!(purchases[0]["invoicePhotoUrls"].as_array().unwrap().len(), 1);

    let status = admin
        .execute(&Commands::Status {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(status.contains("Active sheets: 1"));
    assert!(status.contains("Purchases: 1"));
}

#[test]
fn missing_upload_file_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().to_path_buf();
    let config = write_config(&root);
    let admin = CliContext::new(root.clone(), Some(config), "admin").unwrap();

    let result = admin.execute(&Commands::Upload {
        files: vec![root.join("missing.jpg")],
        brand: None,
        person: None,
        date: None,
        category: None,
        format: "text".to_string(),
    });
    assert!(result.is_err());
}
