//! Integration tests for the keymap system

use proptest::prelude::*;

use super::*;

/// Embedded Android keymap for testing
const ANDROID_KEYMAP_JSON: &str = include_str!("../../keymaps/android.json");

fn android_table() -> BindingTable {
    let raw = RawBindingTable::from_json(ANDROID_KEYMAP_JSON)
        .expect("Embedded android.json should parse successfully");
    compile(&raw).expect("Embedded android.json should compile")
}

fn chord(text: &str) -> Chord {
    parse_chord(text).unwrap()
}

#[test]
fn test_embedded_json_compiles_without_overrides() {
    let table = android_table();
    assert_eq!(table.len(), 60);
    assert!(table.diagnostics().is_empty());
}

#[test]
fn test_android_navigation_bindings() {
    let table = android_table();

    assert_eq!(table.get(&chord("#17")).unwrap().command_name(), "stopSpeech");
    assert_eq!(table.get(&chord("#38")).unwrap().command_name(), "backward");
    assert_eq!(table.get(&chord("#40")).unwrap().command_name(), "forward");
    assert_eq!(table.get(&chord("Alt+#38")).unwrap().command_name(), "jumpToTop");
    assert_eq!(
        table.get(&chord("Alt+#40")).unwrap().command_name(),
        "readFromHere"
    );
    assert_eq!(
        table.get(&chord("#13")).unwrap().description,
        "Take action on current item"
    );
}

#[test]
fn test_android_swallowed_keys() {
    let table = android_table();
    for text in ["Shift+#37", "Shift+#39", "Shift+#16"] {
        let entry = table.get(&chord(text)).unwrap();
        assert!(entry.is_noop(), "{} should be swallowed", text);
        assert!(entry.description.is_empty());
    }
}

#[test]
fn test_android_tts_bindings() {
    let table = android_table();
    assert_eq!(
        table.get(&chord("Ctrl+Alt+#189")).unwrap().description,
        "Decreaste rate of speech"
    );
    assert_eq!(
        table.get(&chord("Ctrl+Alt+Shift+#187")).unwrap().command_name(),
        "increaseTtsPitch"
    );
    assert_eq!(
        table.get(&chord("Ctrl+Alt+#221")).unwrap().command_name(),
        "increaseTtsVolume"
    );
}

#[test]
fn test_android_jump_pairs() {
    let table = android_table();
    let pairs = [
        ("1", "Heading1"),
        ("6", "Heading6"),
        ("C", "Checkbox"),
        ("E", "EditText"),
        ("F", "FormField"),
        ("G", "Graphic"),
        ("H", "Heading"),
        ("I", "ListItem"),
        ("L", "Link"),
        ("O", "List"),
        ("Q", "Blockquote"),
        ("R", "Radio"),
        ("S", "Slider"),
        ("T", "Table"),
        ("U", "Button"),
        ("X", "ComboBox"),
    ];

    for (key, target) in pairs {
        let next = table.get(&chord(&format!("Ctrl+Alt+{}", key))).unwrap();
        let prev = table
            .get(&chord(&format!("Ctrl+Alt+Shift+{}", key)))
            .unwrap();
        assert_eq!(next.command_name(), format!("next{}", target));
        assert_eq!(prev.command_name(), format!("previous{}", target));
    }
}

#[test]
fn test_event_translation_hits_table() {
    let table = android_table();
    let event = KeyEvent::with_mods(72, Modifiers::CTRL | Modifiers::ALT);
    let entry = table.get(&chord_from_event(&event)).unwrap();
    assert_eq!(entry.command_name(), "nextHeading");
}

#[test]
fn test_every_entry_round_trips_through_its_display() {
    let table = android_table();
    for entry in table.iter() {
        let reparsed = chord(&entry.chord.to_string());
        assert_eq!(table.get(&reparsed), Some(entry));
    }
}

#[test]
fn test_user_layer_overrides_platform() {
    let platform = RawBindingTable::from_json(ANDROID_KEYMAP_JSON).unwrap();
    let user = RawBindingTable::from_yaml(
        r##"
"#38": [forward, Navigate forward]
"Ctrl+Alt+#9": [nextLandmark, Next landmark]
"##,
    )
    .unwrap();

    let table = compile(&platform.layer(user)).unwrap();
    assert_eq!(table.len(), 61);
    assert_eq!(table.get(&chord("#38")).unwrap().command_name(), "forward");
    assert_eq!(table.diagnostics().len(), 1);
}

#[test]
fn test_load_keymap_file_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("keymap.yaml");
    std::fs::write(&path, "\"Ctrl+Alt+B\": [showBookmarkManager, Bookmarks]\n").unwrap();

    let raw = load_raw_bindings(&path).unwrap();
    let table = compile(&raw).unwrap();
    assert_eq!(
        table.display_for("showBookmarkManager"),
        Some("Ctrl+Alt+B".to_string())
    );
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_raw_bindings(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, KeymapFileError::Io { .. }));
}

fn modifier_names() -> impl Strategy<Value = Vec<&'static str>> {
    proptest::sample::subsequence(vec!["Ctrl", "Alt", "Shift", "Meta"], 0..=4)
}

fn key_text() -> impl Strategy<Value = String> {
    prop_oneof![
        any::<u32>().prop_map(|code| format!("#{}", code)),
        "[A-Z0-9]".prop_map(|s| s.to_string()),
    ]
}

proptest! {
    #[test]
    fn prop_parse_is_deterministic(mods in modifier_names(), key in key_text()) {
        let mut parts: Vec<String> = mods.iter().map(|m| m.to_string()).collect();
        parts.push(key);
        let text = parts.join("+");
        prop_assert_eq!(parse_chord(&text), parse_chord(&text));
    }

    #[test]
    fn prop_modifier_order_is_irrelevant(
        mods in modifier_names().prop_shuffle(),
        key in key_text(),
    ) {
        let mut sorted = mods.clone();
        sorted.sort_unstable();

        let shuffled_text = mods.iter().copied().chain([key.as_str()]).collect::<Vec<_>>().join("+");
        let sorted_text = sorted.iter().copied().chain([key.as_str()]).collect::<Vec<_>>().join("+");

        prop_assert_eq!(parse_chord(&shuffled_text).unwrap(), parse_chord(&sorted_text).unwrap());
    }

    #[test]
    fn prop_display_reparses(mods in modifier_names(), key in key_text()) {
        let text = mods.iter().copied().chain([key.as_str()]).collect::<Vec<_>>().join("+");
        let parsed = parse_chord(&text).unwrap();
        prop_assert_eq!(parse_chord(&parsed.to_string()).unwrap(), parsed);
    }
}
