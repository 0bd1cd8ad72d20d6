use pdf_nup::*;
use tempfile::NamedTempFile;

#[test]
fn test_builder_defaults() {
    let config = LayoutConfig::builder(ImposeMode::NUp, 4).build().unwrap();
    assert_eq!(config, LayoutConfig::pdf_nup(4, "").unwrap());
}

#[test]
fn test_builder_matches_descriptor() {
    let built = LayoutConfig::builder(ImposeMode::Booklet, 4)
        .paper(PaperSize::Ledger)
        .orientation(Orientation::Portrait)
        .guides(true)
        .margin(10.0)
        .background(Rgb::from_hex("#f7e6c7"))
        .build()
        .unwrap();

    let parsed = LayoutConfig::pdf_booklet(4, "p:LedgerP, g:on, ma:10, bgcol:#f7e6c7").unwrap();
    assert_eq!(built, parsed);
}

#[test]
fn test_paper_resets_orientation() {
    let config = LayoutConfig::builder(ImposeMode::NUp, 2)
        .orientation(Orientation::Landscape)
        .paper(PaperSize::Ledger)
        .build()
        .unwrap();
    assert_eq!(config.orientation(), Orientation::Landscape);

    let config = LayoutConfig::builder(ImposeMode::NUp, 2)
        .orientation(Orientation::Landscape)
        .paper(PaperSize::A5)
        .build()
        .unwrap();
    assert_eq!(config.orientation(), Orientation::Portrait);
}

#[test]
fn test_builder_validation() {
    let result = LayoutConfig::builder(ImposeMode::NUp, 4)
        .margins(Margins {
            top: 10.0,
            right: -1.0,
            bottom: 10.0,
            left: 10.0,
        })
        .build();
    assert!(matches!(result, Err(ImposeError::Config(_))));

    let result = LayoutConfig::builder(ImposeMode::NUp, 4)
        .paper(PaperSize::Custom {
            width_pt: 0.0,
            height_pt: 500.0,
        })
        .build();
    assert!(matches!(result, Err(ImposeError::Config(_))));

    let result = LayoutConfig::builder(ImposeMode::Booklet, 4)
        .order(TileOrder::DownRight)
        .build();
    assert!(matches!(result, Err(ImposeError::Config(_))));

    let result = LayoutConfig::builder(ImposeMode::Booklet, 6).build();
    assert!(result.is_ok());
}

#[test]
fn test_to_builder_preserves_everything() {
    let config = LayoutConfig::image_nup(6, "f:Tabloid, border:on, m:10, bgcol:#f7e6c7").unwrap();
    assert_eq!(config.to_builder().build().unwrap(), config);
}

#[tokio::test]
async fn test_save_and_load_config() {
    let config =
        LayoutConfig::pdf_booklet(8, "p:A3L, border:on, g:on, ma:5 10, bgcol:#beded9").unwrap();

    let temp_file = NamedTempFile::new().unwrap();
    config.save(temp_file.path()).await.unwrap();

    let loaded = LayoutConfig::load(temp_file.path()).await.unwrap();
    assert_eq!(config, loaded);
}

#[tokio::test]
async fn test_load_fills_defaults() {
    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), r#"{ "mode": "NUp", "n": 9 }"#)
        .await
        .unwrap();

    let loaded = LayoutConfig::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded, LayoutConfig::pdf_nup(9, "").unwrap());
}

#[tokio::test]
async fn test_load_rejects_invalid_config() {
    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), r#"{ "mode": "NUp", "n": 7 }"#)
        .await
        .unwrap();

    match LayoutConfig::load(temp_file.path()).await {
        Err(ImposeError::Config(msg)) => assert!(msg.contains("7")),
        other => panic!("Expected Config error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_load_rejects_malformed_json() {
    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), "not json").await.unwrap();

    assert!(matches!(
        LayoutConfig::load(temp_file.path()).await,
        Err(ImposeError::Config(_))
    ));
}
