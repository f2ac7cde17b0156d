//! Integration tests for collection assembly.

mod common;

use std::sync::Arc;

use common::{
    BUILTIN_WIDTH, FakeDiscovery, FakeFace, FakeLoader, builtin_faces, corrupt_font, fake_library,
};
use fontgrid_config::{Config, FontStyleSetting, MetricModifier, SyntheticStyle};
use fontgrid_fonts::collection::assemble;
use fontgrid_fonts::{
    BuiltinFaces, Collection, DerivedConfig, DesiredSize, Discover, FaceData, FaceIndex,
    FontError, Key, Layer, Library, Slot, Style, Synthesis,
};

fn key_for(config: &Config) -> Key {
    Key::new(
        &DerivedConfig::from_config(config),
        DesiredSize::with_dpi(12.0, 72, 72),
    )
}

fn iosevka_config() -> Config {
    Config::new().with_font_family("Iosevka")
}

fn full_family() -> Vec<FakeFace> {
    vec![
        FakeFace::new("Iosevka", 8),
        FakeFace::new("Iosevka", 9).bold(),
        FakeFace::new("Iosevka", 7).italic(),
        FakeFace::new("Iosevka", 6).bold().italic(),
    ]
}

fn layers(collection: &Collection, style: Style) -> Vec<Layer> {
    collection.faces(style).iter().map(|e| e.layer).collect()
}

fn assert_layers_ordered(collection: &Collection) {
    for style in Style::ALL {
        let chain = layers(collection, style);
        assert!(
            chain.windows(2).all(|w| w[0] <= w[1]),
            "{style} chain out of order: {chain:?}"
        );
        assert!(!chain.is_empty(), "{style} has no faces");
    }
}

// ============================================================================
// Layering
// ============================================================================

#[test]
fn test_discovered_faces_precede_builtins_and_emoji() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(full_family());
    let collection = assemble(
        &key_for(&iosevka_config()),
        &fake_library(loader.clone()),
        Some(&discovery),
    )
    .unwrap();

    assert_layers_ordered(&collection);
    assert_eq!(
        layers(&collection, Style::Regular),
        vec![Layer::Discovered, Layer::Builtin, Layer::Emoji, Layer::Emoji]
    );
    for style in [Style::Bold, Style::Italic, Style::BoldItalic] {
        assert_eq!(
            layers(&collection, style),
            vec![Layer::Discovered, Layer::Builtin]
        );
    }
}

#[test]
fn test_discovered_faces_are_deferred() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(full_family());
    let collection = assemble(
        &key_for(&iosevka_config()),
        &fake_library(loader.clone()),
        Some(&discovery),
    )
    .unwrap();

    // Only the primary regular face is loaded, for metrics.
    assert!(matches!(
        collection.faces(Style::Regular)[0].slot,
        Slot::Loaded(_)
    ));
    for style in [Style::Bold, Style::Italic, Style::BoldItalic] {
        assert!(matches!(collection.faces(style)[0].slot, Slot::Deferred(_)));
    }
    let loaded = loader.loaded();
    assert!(loaded.contains(&"Iosevka".to_string()));
    assert!(!loaded.iter().any(|name| name.starts_with("Iosevka ")));
}

#[test]
fn test_builtins_are_loaded_eagerly() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(full_family());
    let collection = assemble(
        &key_for(&iosevka_config()),
        &fake_library(loader.clone()),
        Some(&discovery),
    )
    .unwrap();

    for style in Style::ALL {
        let builtin = collection
            .faces(style)
            .iter()
            .find(|e| e.layer == Layer::Builtin)
            .unwrap();
        assert!(matches!(builtin.slot, Slot::Loaded(_)));
    }
    for name in ["builtin regular", "builtin bold-italic", "builtin emoji", "builtin emoji-text"] {
        assert!(loader.loaded().contains(&name.to_string()), "{name} not loaded");
    }
}

#[test]
fn test_no_discovery_uses_builtins_only() {
    let loader = Arc::new(FakeLoader::default());
    let mut collection =
        assemble(&key_for(&iosevka_config()), &fake_library(loader), None).unwrap();

    assert_layers_ordered(&collection);
    assert_eq!(
        layers(&collection, Style::Regular),
        vec![Layer::Builtin, Layer::Emoji, Layer::Emoji]
    );
    assert_eq!(layers(&collection, Style::Bold), vec![Layer::Builtin]);
    assert_eq!(collection.metrics().cell_width, u32::from(BUILTIN_WIDTH));

    let bold = collection
        .load_face(FaceIndex::new(Style::Bold, 0))
        .unwrap();
    assert_eq!(bold.name(), "builtin bold");
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_descriptor_order_is_preserved() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(vec![
        FakeFace::new("Iosevka", 8),
        FakeFace::new("Symbols", 9),
    ]);
    let config = Config::new().with_font_families(["Iosevka", "Missing", "Symbols"]);
    let mut collection =
        assemble(&key_for(&config), &fake_library(loader), Some(&discovery)).unwrap();

    let first = collection
        .load_face(FaceIndex::new(Style::Regular, 0))
        .unwrap();
    let second = collection
        .load_face(FaceIndex::new(Style::Regular, 1))
        .unwrap();
    assert_eq!(first.name(), "Iosevka");
    assert_eq!(second.name(), "Symbols");
    assert_eq!(collection.faces(Style::Regular)[2].layer, Layer::Builtin);
}

#[test]
fn test_variable_font_retry_without_style_flags() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(vec![FakeFace::new("Recursive", 8)]);
    let mut config = Config::new().with_font_family("Recursive");
    config.font_variation_bold = vec!["wght=700".parse().unwrap()];

    let collection =
        assemble(&key_for(&config), &fake_library(loader), Some(&discovery)).unwrap();

    let bold = &collection.faces(Style::Bold)[0];
    assert_eq!(bold.layer, Layer::Discovered);
    match &bold.slot {
        Slot::Deferred(face) => {
            assert_eq!(face.name, "Recursive");
            assert_eq!(face.variations[0].tag_str(), "wght");
        }
        other => panic!("expected deferred bold face, got {other:?}"),
    }

    let queries = discovery.queries();
    assert!(
        queries
            .iter()
            .any(|q| q.family == "Recursive" && !q.bold && !q.italic && !q.variations.is_empty())
    );

    // Italic has no variations, so it is synthesized rather than retried.
    assert_eq!(collection.faces(Style::Italic)[0].layer, Layer::Synthesized);
}

#[test]
fn test_named_style_is_queried_without_flags() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(vec![
        FakeFace::new("Iosevka", 8),
        FakeFace::new("Iosevka", 9).named("SemiBold"),
    ]);
    let mut config = iosevka_config();
    config.font_style_bold = FontStyleSetting::Named("SemiBold".to_string());

    let mut collection =
        assemble(&key_for(&config), &fake_library(loader), Some(&discovery)).unwrap();

    let bold = collection
        .load_face(FaceIndex::new(Style::Bold, 0))
        .unwrap();
    assert_eq!(bold.name(), "Iosevka SemiBold");
    assert!(
        discovery
            .queries()
            .iter()
            .any(|q| q.style.as_deref() == Some("SemiBold") && !q.bold && !q.italic)
    );
}

#[test]
fn test_discovery_failure_aborts_build() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::failing();
    let err = assemble(
        &key_for(&iosevka_config()),
        &fake_library(loader),
        Some(&discovery),
    )
    .unwrap_err();
    assert!(matches!(err, FontError::Discovery(_)));
}

// ============================================================================
// Style completion
// ============================================================================

#[test]
fn test_missing_styles_are_synthesized_from_regular() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(vec![FakeFace::new("Iosevka", 8)]);
    let collection = assemble(
        &key_for(&iosevka_config()),
        &fake_library(loader),
        Some(&discovery),
    )
    .unwrap();

    let regular = FaceIndex::new(Style::Regular, 0);
    let expected = [
        (Style::Bold, Synthesis::Bold),
        (Style::Italic, Synthesis::Italic),
        (Style::BoldItalic, Synthesis::BoldItalic),
    ];
    for (style, synthesis) in expected {
        let entry = &collection.faces(style)[0];
        assert_eq!(entry.layer, Layer::Synthesized);
        match entry.slot {
            Slot::Synthetic { base, synthesis: s } => {
                assert_eq!(base, regular);
                assert_eq!(s, synthesis);
            }
            ref other => panic!("expected synthetic {style}, got {other:?}"),
        }
    }
    assert_layers_ordered(&collection);
    // One query per style, no emoji lookup without a trusted system font.
    assert_eq!(discovery.queries().len(), 4);
}

#[test]
fn test_bold_italic_prefers_discovered_italic() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(vec![
        FakeFace::new("Iosevka", 8),
        FakeFace::new("Iosevka", 7).italic(),
    ]);
    let collection = assemble(
        &key_for(&iosevka_config()),
        &fake_library(loader),
        Some(&discovery),
    )
    .unwrap();

    match collection.faces(Style::BoldItalic)[0].slot {
        Slot::Synthetic { base, synthesis } => {
            assert_eq!(base, FaceIndex::new(Style::Italic, 0));
            assert_eq!(synthesis, Synthesis::Bold);
        }
        ref other => panic!("unexpected slot {other:?}"),
    }
}

#[test]
fn test_synthesis_disabled_aliases_regular() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(vec![FakeFace::new("Iosevka", 8)]);
    let mut config = iosevka_config();
    config.font_synthetic_style = SyntheticStyle::none();

    let mut collection =
        assemble(&key_for(&config), &fake_library(loader), Some(&discovery)).unwrap();

    for style in [Style::Bold, Style::Italic, Style::BoldItalic] {
        assert!(matches!(
            collection.faces(style)[0].slot,
            Slot::Alias(FaceIndex {
                style: Style::Regular,
                index: 0
            })
        ));
    }
    let italic = collection
        .load_face(FaceIndex::new(Style::Italic, 0))
        .unwrap();
    assert_eq!(italic.name(), "Iosevka");
}

#[test]
fn test_disabled_style_aliases_regular() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(full_family());
    let mut config = iosevka_config();
    config.font_style_bold = FontStyleSetting::Disabled;

    let collection =
        assemble(&key_for(&config), &fake_library(loader), Some(&discovery)).unwrap();

    assert!(matches!(collection.faces(Style::Bold)[0].slot, Slot::Alias(_)));
    assert!(
        !discovery
            .queries()
            .iter()
            .any(|q| q.bold && !q.italic),
        "disabled bold must not be queried"
    );
    assert_eq!(collection.faces(Style::Italic)[0].layer, Layer::Discovered);
}

// ============================================================================
// Emoji
// ============================================================================

#[test]
fn test_trusted_system_emoji_replaces_bundled() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(vec![
        FakeFace::new("Iosevka", 8),
        FakeFace::new("Test Emoji", 16),
    ]);
    let library =
        fake_library(loader.clone()).with_system_emoji(Some("Test Emoji".to_string()));

    let collection = assemble(&key_for(&iosevka_config()), &library, Some(&discovery)).unwrap();

    let last = collection.faces(Style::Regular).last().unwrap();
    assert_eq!(last.layer, Layer::Emoji);
    assert!(matches!(&last.slot, Slot::Deferred(face) if face.name == "Test Emoji"));
    assert_eq!(
        layers(&collection, Style::Regular),
        vec![Layer::Discovered, Layer::Builtin, Layer::Emoji]
    );
    assert!(!loader.loaded().contains(&"builtin emoji".to_string()));
}

#[test]
fn test_missing_system_emoji_falls_back_to_bundled() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(vec![FakeFace::new("Iosevka", 8)]);
    let library = fake_library(loader).with_system_emoji(Some("Test Emoji".to_string()));

    let mut collection =
        assemble(&key_for(&iosevka_config()), &library, Some(&discovery)).unwrap();

    let regular = collection.faces(Style::Regular).len();
    let emoji = collection
        .load_face(FaceIndex::new(Style::Regular, regular - 2))
        .unwrap();
    let emoji_text = collection
        .load_face(FaceIndex::new(Style::Regular, regular - 1))
        .unwrap();
    assert!(emoji.is_color());
    assert!(!emoji_text.is_color());
}

// ============================================================================
// Failures and metrics
// ============================================================================

#[test]
fn test_corrupt_builtin_aborts_build() {
    let loader = Arc::new(FakeLoader::default());
    let good = builtin_faces();
    let builtin = BuiltinFaces::new(
        [
            good.style(Style::Regular).clone(),
            FaceData::new(corrupt_font()),
            good.style(Style::Italic).clone(),
            good.style(Style::BoldItalic).clone(),
        ],
        good.emoji().clone(),
        good.emoji_text().clone(),
    );
    let library = Library::with_loader(builtin, loader).with_system_emoji(None);

    let err = assemble(&key_for(&iosevka_config()), &library, None).unwrap_err();
    match err {
        FontError::BuiltinFace { name, source } => {
            assert_eq!(name, "bold");
            assert!(matches!(*source, FontError::InvalidFontData { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unloadable_discovered_face_is_skipped_for_metrics() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(vec![
        FakeFace::new("Broken", 8).with_bytes(corrupt_font()),
    ]);
    let config = Config::new().with_font_family("Broken");

    let collection =
        assemble(&key_for(&config), &fake_library(loader), Some(&discovery)).unwrap();
    assert_eq!(collection.metrics().cell_width, u32::from(BUILTIN_WIDTH));
}

#[test]
fn test_metrics_come_from_primary_face_with_modifiers() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(full_family());
    let mut config = iosevka_config();
    config.adjust_cell_width = Some(MetricModifier::Absolute(2));
    config.adjust_cell_height = Some(MetricModifier::Percent(1.5));

    let collection =
        assemble(&key_for(&config), &fake_library(loader), Some(&discovery)).unwrap();
    let metrics = collection.metrics();
    assert_eq!(metrics.cell_width, 10);
    assert_eq!(metrics.original_cell_width, Some(8));
    // ascent 12, descent -4
    assert_eq!(metrics.cell_height, 24);
    assert_eq!(metrics.original_cell_height, Some(16));
}

#[test]
fn test_load_face_resolves_alias_in_place() {
    let loader = Arc::new(FakeLoader::default());
    let discovery = FakeDiscovery::new(vec![
        FakeFace::new("Iosevka", 8),
        FakeFace::new("Iosevka", 7).italic(),
    ]);
    let mut collection = assemble(
        &key_for(&iosevka_config()),
        &fake_library(loader.clone()),
        Some(&discovery),
    )
    .unwrap();

    let before = loader.load_count();
    let bold_italic = collection
        .load_face(FaceIndex::new(Style::BoldItalic, 0))
        .unwrap();
    assert_eq!(bold_italic.name(), "Iosevka Italic");
    assert!(matches!(
        collection.faces(Style::Italic)[0].slot,
        Slot::Loaded(_)
    ));
    assert_eq!(loader.load_count(), before + 1);

    // Already loaded: no second load.
    collection
        .load_face(FaceIndex::new(Style::Italic, 0))
        .unwrap();
    assert_eq!(loader.load_count(), before + 1);
}

#[test]
fn test_load_face_out_of_range() {
    let loader = Arc::new(FakeLoader::default());
    let mut collection =
        assemble(&key_for(&iosevka_config()), &fake_library(loader), None).unwrap();
    let err = collection
        .load_face(FaceIndex::new(Style::Italic, 99))
        .unwrap_err();
    assert!(matches!(
        err,
        FontError::MissingFace {
            style: Style::Italic,
            index: 99
        }
    ));
}

#[test]
fn test_discovery_trait_object_is_usable() {
    let discovery: Arc<dyn Discover> = Arc::new(FakeDiscovery::new(vec![FakeFace::new(
        "Iosevka", 8,
    )]));
    let loader = Arc::new(FakeLoader::default());
    let collection = assemble(
        &key_for(&iosevka_config()),
        &fake_library(loader),
        Some(discovery.as_ref()),
    )
    .unwrap();
    assert_eq!(collection.metrics().cell_width, 8);
}
