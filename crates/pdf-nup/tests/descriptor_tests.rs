use pdf_nup::*;

#[test]
fn test_defaults_from_empty_descriptor() {
    let config = LayoutConfig::pdf_nup(4, "").unwrap();

    assert_eq!(config.mode(), ImposeMode::NUp);
    assert_eq!(config.n(), 4);
    assert_eq!(config.paper(), PaperSize::A4);
    assert_eq!(config.orientation(), Orientation::Portrait);
    assert_eq!(config.margins(), Margins::default());
    assert!(!config.border());
    assert!(!config.guides());
    assert_eq!(config.background(), None);
    assert_eq!(config.order(), TileOrder::RightDown);
    assert!(!config.is_image());
}

#[test]
fn test_booklet_descriptor() {
    let config =
        LayoutConfig::pdf_booklet(2, "p:A4, border:false, g:on, ma:25, bgcol:#beded9").unwrap();

    assert_eq!(config.mode(), ImposeMode::Booklet);
    assert_eq!(config.paper(), PaperSize::A4);
    assert_eq!(config.orientation(), Orientation::Portrait);
    assert!(!config.border());
    assert!(config.guides());
    assert_eq!(config.margins(), Margins::uniform(25.0));
    assert_eq!(config.background(), Some(Rgb::new(0xbe, 0xde, 0xd9)));
}

#[test]
fn test_long_key_names() {
    let config = LayoutConfig::pdf_booklet(
        4,
        "papersize:LetterP, border:on, guides:off, margin:10, backgroundcolor:#f7e6c7",
    )
    .unwrap();

    assert_eq!(config.paper(), PaperSize::Letter);
    assert!(config.border());
    assert!(!config.guides());
    assert_eq!(config.margins(), Margins::uniform(10.0));
    assert_eq!(config.background(), Some(Rgb::new(0xf7, 0xe6, 0xc7)));
}

#[test]
fn test_keys_are_case_insensitive() {
    let config = LayoutConfig::pdf_nup(9, "F:a5l, BORDER:On, M:10").unwrap();

    assert_eq!(config.paper(), PaperSize::A5);
    assert_eq!(config.orientation(), Orientation::Landscape);
    assert!(config.border());
}

#[test]
fn test_image_nup_descriptors() {
    let config = LayoutConfig::image_nup(2, "f:A5L, border:on, m:10, bgcol:#f7e6c7").unwrap();
    assert!(config.is_image());
    let (w, h) = config.sheet_size();
    assert!(w > h);

    let config = LayoutConfig::image_nup(16, "f:A3P, m:10, bgcol:#f7e6c7").unwrap();
    assert_eq!(config.paper(), PaperSize::A3);

    let config = LayoutConfig::image_nup(6, "f:Tabloid, border:on, m:10, bgcol:#f7e6c7").unwrap();
    assert_eq!(config.paper(), PaperSize::Tabloid);
    assert_eq!(config.orientation(), Orientation::Portrait);
}

#[test]
fn test_ledger_is_naturally_landscape() {
    let config = LayoutConfig::pdf_nup(4, "p:Ledger").unwrap();
    assert_eq!(config.orientation(), Orientation::Landscape);
    let (w, h) = config.sheet_size();
    assert!(w > h);

    let config = LayoutConfig::pdf_booklet(4, "p:LedgerP, g:on, ma:10, bgcol:#f7e6c7").unwrap();
    assert_eq!(config.orientation(), Orientation::Portrait);
    let (w, h) = config.sheet_size();
    assert!(w < h);
}

#[test]
fn test_legal_is_not_read_as_landscape_suffix() {
    let config = LayoutConfig::pdf_nup(2, "p:Legal").unwrap();
    assert_eq!(config.paper(), PaperSize::Legal);
    assert_eq!(config.orientation(), Orientation::Portrait);
}

#[test]
fn test_custom_paper_size() {
    let config = LayoutConfig::pdf_nup(4, "p:500x700").unwrap();
    assert_eq!(config.sheet_size(), (500.0, 700.0));
}

#[test]
fn test_margin_forms() {
    let config = LayoutConfig::pdf_nup(4, "ma:10 20").unwrap();
    let m = config.margins();
    assert_eq!((m.top, m.right, m.bottom, m.left), (10.0, 20.0, 10.0, 20.0));

    let config = LayoutConfig::pdf_nup(4, "ma:1 2 3 4").unwrap();
    let m = config.margins();
    assert_eq!((m.top, m.right, m.bottom, m.left), (1.0, 2.0, 3.0, 4.0));
}

#[test]
fn test_tile_order_option() {
    let config = LayoutConfig::pdf_nup(6, "o:dl").unwrap();
    assert_eq!(config.order(), TileOrder::DownLeft);
}

#[test]
fn test_empty_clauses_are_ignored() {
    let config = LayoutConfig::pdf_nup(4, " , border:on,, ").unwrap();
    assert!(config.border());
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn test_unrecognized_option() {
    match LayoutConfig::pdf_nup(4, "p:A4, colour:red") {
        Err(ImposeError::UnrecognizedOption(key)) => assert_eq!(key, "colour"),
        other => panic!("Expected UnrecognizedOption, got {:?}", other),
    }
}

#[test]
fn test_invalid_option_values() {
    for descriptor in [
        "border:maybe",
        "g:1",
        "ma:-5",
        "ma:1 2 3",
        "bgcol:beded9",
        "bgcol:#bedeXX",
        "p:B5",
        "p:0x100",
        "o:up",
        "border",
        "p:",
    ] {
        match LayoutConfig::pdf_nup(4, descriptor) {
            Err(ImposeError::InvalidOptionValue { .. }) => {}
            other => panic!("Expected InvalidOptionValue for {:?}, got {:?}", descriptor, other),
        }
    }
}

#[test]
fn test_invalid_value_reports_key_and_value() {
    match LayoutConfig::pdf_nup(4, "border:maybe") {
        Err(ImposeError::InvalidOptionValue { key, value }) => {
            assert_eq!(key, "border");
            assert_eq!(value, "maybe");
        }
        other => panic!("Expected InvalidOptionValue, got {:?}", other),
    }
}

#[test]
fn test_unsupported_tile_counts() {
    for n in [0, 1, 3, 5, 7, 10, 32] {
        match LayoutConfig::pdf_nup(n, "") {
            Err(ImposeError::UnsupportedTileCount { n: got, mode }) => {
                assert_eq!(got, n);
                assert_eq!(mode, ImposeMode::NUp);
            }
            other => panic!("Expected UnsupportedTileCount for {}, got {:?}", n, other),
        }
    }

    // Booklets need an even count
    match LayoutConfig::pdf_booklet(9, "") {
        Err(ImposeError::UnsupportedTileCount { mode, .. }) => {
            assert_eq!(mode, ImposeMode::Booklet)
        }
        other => panic!("Expected UnsupportedTileCount, got {:?}", other),
    }
}

#[test]
fn test_booklet_rejects_tile_order() {
    match LayoutConfig::pdf_booklet(4, "o:dr") {
        Err(ImposeError::Config(_)) => {}
        other => panic!("Expected Config error, got {:?}", other),
    }
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn test_display_format() {
    let config =
        LayoutConfig::pdf_booklet(2, "p:A4, border:false, g:on, ma:25, bgcol:#beded9").unwrap();
    assert_eq!(
        config.to_string(),
        "p:A4P, border:off, g:on, ma:25, bgcol:#beded9"
    );
}

#[test]
fn test_display_round_trip() {
    let cases = [
        (ImposeMode::NUp, 9, false, "m:10, bgcol:#f7e6c7"),
        (ImposeMode::NUp, 2, true, "f:A5L, border:on, m:10, bgcol:#f7e6c7"),
        (ImposeMode::NUp, 6, true, "f:Tabloid, border:on, m:10, bgcol:#f7e6c7"),
        (ImposeMode::NUp, 8, false, "p:500x700L, ma:1 2 3 4, o:ld"),
        (ImposeMode::Booklet, 4, false, "p:A4, border:off, guides:on, ma:10, bgcol:#beded9"),
        (ImposeMode::Booklet, 4, false, "p:LedgerP, g:on, ma:10, bgcol:#f7e6c7"),
        (ImposeMode::Booklet, 2, false, "p:LetterP, g:on, ma:10, bgcol:#f7e6c7"),
    ];

    for (mode, n, images, descriptor) in cases {
        let config = parse_descriptor(descriptor, n, mode, images).unwrap();
        let reparsed = parse_descriptor(&config.to_string(), n, mode, images).unwrap();
        assert_eq!(config, reparsed, "round trip of {:?}", descriptor);
    }
}
