use bazaarapp::model::{store_clock, Document, Product, ProductInput, ProductStatus, Profile};
use bazaarapp::store::fs::FileStore;
use bazaarapp::{BazaarApi, BazaarError};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("db.json");
    (dir, path)
}

fn sample_document() -> Document {
    let mut doc = Document::empty().unwrap();
    let mut vase = ProductInput::new("Vase", "₹500", 10);
    vase.status = ProductStatus::Draft;
    vase.ai_hint = "blue pottery".into();
    doc.products.push(Product::from_input(vase, store_clock()));
    doc.products.push(Product::from_input(
        ProductInput::new("Bowl", "₹250", 0),
        "2023-01-02T03:04:05.678Z".parse().unwrap(),
    ));
    doc.profile = Profile {
        name: "A".into(),
        location: "B".into(),
        story: "C".into(),
        heritage: "D".into(),
        avatar: Some("data:image/png;base64,AAAA".into()),
        ..Default::default()
    };
    doc
}

fn tmp_files(dir: &TempDir) -> Vec<String> {
    fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".tmp"))
        .collect()
}

#[test]
fn test_open_initializes_missing_file_with_seed() {
    let (_dir, path) = setup();
    let store = FileStore::open_path(&path, Document::seed().unwrap()).unwrap();

    assert!(path.exists());
    assert_eq!(store.load().unwrap(), Document::seed().unwrap());
}

#[test]
fn test_blank_file_is_initialized() {
    let (_dir, path) = setup();
    fs::write(&path, "").unwrap();
    let store = FileStore::open_path(&path, Document::empty().unwrap()).unwrap();
    assert!(store.load().unwrap().products.is_empty());
    assert!(!fs::read_to_string(&path).unwrap().trim().is_empty());
}

#[test]
fn test_save_load_round_trip() {
    let (_dir, path) = setup();
    let store = FileStore::open_path(&path, Document::empty().unwrap()).unwrap();
    let doc = sample_document();

    store.save(&doc).unwrap();
    assert_eq!(store.load().unwrap(), doc);

    // And through a fresh engine, as after a restart.
    store.close().unwrap();
    let reopened = FileStore::open_path(&path, Document::seed().unwrap()).unwrap();
    assert_eq!(reopened.load().unwrap(), doc);
}

#[test]
fn test_document_is_pretty_printed_with_durable_names() {
    let (_dir, path) = setup();
    let store = FileStore::open_path(&path, Document::empty().unwrap()).unwrap();
    store.save(&sample_document()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"products\": ["));
    assert!(text.contains("\"aiHint\": \"blue pottery\""));
    assert!(text.contains("\"status\": \"Draft\""));
    assert!(text.contains("\"date\": \"2023-01-02T03:04:05.678Z\""));
    assert!(text.contains("\"profile\": {"));
    assert!(text.ends_with("}\n"));
}

#[test]
fn test_hand_edited_seed_style_dates_are_accepted() {
    let (_dir, path) = setup();
    fs::write(
        &path,
        r#"{
  "products": [
    {
      "name": "Tanjore Painting of Ganesha",
      "description": "Gold foil",
      "status": "Active",
      "price": "₹25,000",
      "stock": 3,
      "date": "2024-02-28T16:45:00Z",
      "image": "https://picsum.photos/seed/painting/800/800",
      "aiHint": "ganesha painting"
    }
  ],
  "profile": { "name": "A", "location": "B", "story": "C", "heritage": "D" }
}"#,
    )
    .unwrap();

    let store = FileStore::open_path(&path, Document::seed().unwrap()).unwrap();
    let doc = store.load().unwrap();
    assert_eq!(doc.products.len(), 1);
    assert_eq!(doc.products[0].stock, 3);
    assert_eq!(doc.profile.avatar, None);
}

#[test]
fn test_corrupt_file_is_reported_and_left_alone() {
    let (_dir, path) = setup();
    fs::write(&path, "{\"products\": [").unwrap();

    let result = FileStore::open_path(&path, Document::seed().unwrap());
    assert!(matches!(result, Err(BazaarError::Corruption { .. })));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"products\": [");
}

#[test]
fn test_wrong_shape_is_corruption() {
    let (_dir, path) = setup();
    fs::write(&path, "{\"products\": [], \"profile\": 7}").unwrap();
    assert!(matches!(
        FileStore::open_path(&path, Document::seed().unwrap()),
        Err(BazaarError::Corruption { .. })
    ));
}

#[test]
fn test_unreadable_location_is_io_error() {
    let (_dir, path) = setup();
    fs::create_dir(&path).unwrap();
    assert!(matches!(
        FileStore::open_path(&path, Document::seed().unwrap()),
        Err(BazaarError::Io { .. })
    ));
}

#[test]
fn test_interrupted_save_leaves_previous_document() {
    let (dir, path) = setup();
    let store = FileStore::open_path(&path, Document::empty().unwrap()).unwrap();
    let doc = sample_document();
    store.save(&doc).unwrap();

    // A crash between writing the temp file and renaming it leaves a partial
    // sibling behind; the document itself is untouched.
    fs::write(dir.path().join(".db.json-crashed.tmp"), "{\"products\": [{\"na").unwrap();

    assert_eq!(store.load().unwrap(), doc);
}

#[test]
fn test_saves_leave_no_tmp_files() {
    let (dir, path) = setup();
    let store = FileStore::open_path(&path, Document::seed().unwrap()).unwrap();
    for _ in 0..5 {
        store.save(&sample_document()).unwrap();
    }
    assert!(tmp_files(&dir).is_empty(), "leftover: {:?}", tmp_files(&dir));
}

#[test]
fn test_duplicate_names_are_corruption() {
    let (_dir, path) = setup();
    let mut doc = Document::empty().unwrap();
    let vase = Product::from_input(ProductInput::new("Vase", "₹500", 1), store_clock());
    doc.products.push(vase.clone());
    doc.products.push(vase);
    let text = serde_json::to_string_pretty(&doc).unwrap();
    fs::write(&path, &text).unwrap();

    match FileStore::open_path(&path, Document::seed().unwrap()) {
        Err(BazaarError::Corruption { source, .. }) => {
            assert!(source.to_string().contains("duplicate product name 'Vase'"))
        }
        Err(other) => panic!("expected corruption, got {}", other),
        Ok(_) => panic!("expected corruption, store opened"),
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), text);
}

#[test]
fn test_hand_added_fields_survive_unrelated_writes() {
    let (_dir, path) = setup();
    fs::write(
        &path,
        r#"{
  "products": [
    {
      "name": "Vase",
      "description": "",
      "status": "Active",
      "price": "₹500",
      "stock": 1,
      "date": "2024-05-01T14:00:00.000Z",
      "image": "",
      "aiHint": "",
      "category": "pottery"
    }
  ],
  "profile": { "name": "A", "location": "B", "story": "C", "heritage": "D", "badge": "gold" },
  "orders": [{ "id": 7, "items": ["Vase"] }]
}"#,
    )
    .unwrap();

    let api = BazaarApi::new(FileStore::open_path(&path, Document::seed().unwrap()).unwrap());
    api.add_product(ProductInput::new("Bowl", "₹250", 3)).unwrap();
    api.close().unwrap();

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(saved["products"][0]["name"], "Bowl");
    assert_eq!(saved["products"][1]["category"], "pottery");
    assert_eq!(saved["profile"]["badge"], "gold");
    assert_eq!(saved["orders"][0]["id"], 7);
    assert_eq!(saved["orders"][0]["items"][0], "Vase");
}
