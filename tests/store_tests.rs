//! Store Tests
//!
//! Tests verify:
//! - Composed-key and explicit get/set
//! - Not-found returns the empty string
//! - Key validation and null values
//! - Unwritable names, keys, and values are refused
//! - Variable and section removal
//! - Section renaming, including moves between levels
//! - Key set, values, and variable snapshots

use std::collections::BTreeSet;

use gitcfg::{ConfigError, Store};

// =============================================================================
// Helper Functions
// =============================================================================

fn populated_store() -> Store {
    let mut store = Store::new();
    store.set("main.test1", "testValue1").unwrap();
    store.set("main.test2", "testValue2").unwrap();
    store.set("main.sub.test1", "testValue2").unwrap();
    store.set("main.sub.test2", "testValue2").unwrap();
    store.set("core.test1", "testValue3").unwrap();
    store.set("core.test2", "testValue4").unwrap();
    store.set("core.test3", "testValue5").unwrap();
    store.set("core.test4", "testValue6").unwrap();
    store
}

fn keys(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|k| k.to_string()).collect()
}

// =============================================================================
// Get / Set Tests
// =============================================================================

#[test]
fn test_set_and_get_composed() {
    let mut store = Store::new();
    store.set("main.testKey", "staticValue").unwrap();

    assert_eq!(store.get("main.testKey").unwrap(), "staticValue");
    assert_eq!(store.get_in("main", "testKey").unwrap(), "staticValue");
}

#[test]
fn test_get_from_other_root_is_empty() {
    let mut store = Store::new();
    store.set("main.testKey", "staticValue").unwrap();

    assert_eq!(store.get_in("core", "testKey").unwrap(), "");
}

#[test]
fn test_get_never_set_key_is_empty() {
    let store = Store::new();

    assert_eq!(store.get("user.name").unwrap(), "");
    assert_eq!(store.get("merge.tool.path").unwrap(), "");
    assert_eq!(store.get_sub("merge", "tool", "path"), "");
}

#[test]
fn test_missing_subsection_is_empty() {
    let mut store = Store::new();
    store.set("merge.tool.path", "/usr/bin").unwrap();

    assert_eq!(store.get("merge.other.path").unwrap(), "");
    assert_eq!(store.get("merge.path").unwrap(), "");
}

#[test]
fn test_set_subsection_explicit() {
    let mut store = Store::new();
    store.set_sub("main", "test", "testKey", "testValue").unwrap();

    assert_eq!(store.get("main.test.testKey").unwrap(), "testValue");
}

#[test]
fn test_set_in_dotted_section() {
    let mut store = Store::new();
    store.set_in("merge.tool", "command", "merge").unwrap();

    assert_eq!(store.get("merge.tool.command").unwrap(), "merge");
    assert_eq!(store.get_in("merge.tool", "command").unwrap(), "merge");
}

#[test]
fn test_set_overwrites() {
    let mut store = Store::new();
    store.set("user.name", "first").unwrap();
    store.set("user.name", "second").unwrap();

    assert_eq!(store.get("user.name").unwrap(), "second");
    assert_eq!(store.key_set().len(), 1);
}

#[test]
fn test_extra_segments_belong_to_key() {
    let mut store = Store::new();
    store.set("a.b.c.d", "deep").unwrap();

    assert_eq!(store.get("a.b.c.d").unwrap(), "deep");
    assert_eq!(store.get_sub("a", "b", "c.d"), "deep");
    assert_eq!(store.key_set(), keys(&["a.b.c.d"]));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_set_single_segment_is_invalid() {
    let mut store = Store::new();
    let result = store.set("main", "staticValue");

    assert!(matches!(result, Err(ConfigError::InvalidKey(_))));
    assert_eq!(store.section_count(), 0);
}

#[test]
fn test_get_single_segment_is_invalid() {
    let store = Store::new();

    assert!(matches!(store.get("main"), Err(ConfigError::InvalidKey(_))));
    assert!(matches!(store.get(""), Err(ConfigError::InvalidKey(_))));
}

#[test]
fn test_null_value_is_rejected() {
    let mut store = Store::new();
    store.set("user.name", "kept").unwrap();

    let result = store.try_set("user.name", None);

    assert!(matches!(result, Err(ConfigError::NullValue(k)) if k == "user.name"));
    assert_eq!(store.get("user.name").unwrap(), "kept");

    assert!(matches!(store.try_set("new.key", None), Err(ConfigError::NullValue(_))));
    assert_eq!(store.section_count(), 1);
}

#[test]
fn test_try_set_with_value() {
    let mut store = Store::new();
    store.try_set("user.name", Some("Timoteo Ponce")).unwrap();

    assert_eq!(store.get("user.name").unwrap(), "Timoteo Ponce");
}

#[test]
fn test_root_level_key_with_dot_is_invalid() {
    let mut store = Store::new();

    assert!(store.set_in("core", "a.b", "v").is_err());
    assert!(store.set_sub("core", "a.b", "k", "v").is_err());
    assert!(store.is_empty());
}

#[test]
fn test_set_rejects_unwritable_names() {
    let mut store = Store::new();

    for bad in ["my root.k", "it's.k", "a[b.k", "core.it's.k", "core. padded.k"] {
        assert!(
            matches!(store.set(bad, "v"), Err(ConfigError::InvalidKey(_))),
            "{bad:?} should be rejected"
        );
    }
    assert!(store.set_sub("core", "a\"b", "k", "v").is_err());
    assert!(store.set_sub("my root", "sub", "k", "v").is_err());
    assert!(store.set_in("core.it's", "k", "v").is_err());
    assert_eq!(store.section_count(), 0);
}

#[test]
fn test_set_rejects_unwritable_keys() {
    let mut store = Store::new();

    for bad in ["core.a=b", "core.[x", "core.#x", "core.;x", "core.sub.a\nb", "core. padded"] {
        assert!(
            matches!(store.set(bad, "v"), Err(ConfigError::InvalidKey(_))),
            "{bad:?} should be rejected"
        );
    }
    assert!(store.set_in("core", "a=b", "v").is_err());
    assert!(store.set_sub("core", "sub", "#x", "v").is_err());
    assert!(store.try_set("core.a=b", Some("v")).is_err());
    assert_eq!(store.section_count(), 0);
}

#[test]
fn test_set_rejects_unwritable_values() {
    let mut store = Store::new();
    store.set("user.name", "kept").unwrap();

    for bad in ["a\nb", "a\r\nb", " padded", "padded ", "\t"] {
        assert!(
            matches!(store.set("user.name", bad), Err(ConfigError::InvalidValue(k)) if k == "user.name"),
            "{bad:?} should be rejected"
        );
    }
    assert!(matches!(
        store.set_sub("core", "sub", "k", "x\n[evil]"),
        Err(ConfigError::InvalidValue(k)) if k == "core.sub.k"
    ));
    assert!(store.set_in("core", "k", " v").is_err());
    assert!(store.try_set("core.k", Some("v\n")).is_err());

    assert_eq!(store.get("user.name").unwrap(), "kept");
    assert_eq!(store.section_count(), 1);
}

#[test]
fn test_inner_whitespace_and_symbols_are_writable() {
    let mut store = Store::new();

    store.set("core.k", "a = b [c] #d ;e 'f'").unwrap();
    store.set_sub("remote", "my origin", "url", "x").unwrap();
    store.set("core.sub.a.b", "dotted").unwrap();

    assert_eq!(store.get("core.k").unwrap(), "a = b [c] #d ;e 'f'");
    assert_eq!(store.get_sub("remote", "my origin", "url"), "x");
}

#[test]
fn test_reads_tolerate_unwritable_addresses() {
    let mut store = Store::new();

    assert_eq!(store.get("my root.k").unwrap(), "");
    assert!(store.remove("core.a=b").is_ok());
    assert!(!store.contains_variable("core.#x"));
}

#[test]
fn test_contains_variable() {
    let mut store = Store::new();
    store.set("user.name", "Timoteo").unwrap();
    store.set("user.blank", "").unwrap();

    assert!(store.contains_variable("user.name"));
    assert!(!store.contains_variable("user.blank"));
    assert!(!store.contains_variable("user.email"));
    assert!(!store.contains_variable("user"));
}

// =============================================================================
// Removal Tests
// =============================================================================

#[test]
fn test_remove_variable() {
    let mut store = Store::new();
    store.set("main.test1", "testValue1").unwrap();
    store.set("main.sub.key", "testValue2").unwrap();
    store.set("main.sub.removeKey", "testValue2").unwrap();

    store.remove("main.test1").unwrap();
    store.remove_sub("main", "sub", "removeKey");

    assert_eq!(store.get("main.test1").unwrap(), "");
    assert_eq!(store.get("main.sub.removeKey").unwrap(), "");
    assert_eq!(store.get("main.sub.key").unwrap(), "testValue2");
}

#[test]
fn test_remove_in_dotted_section() {
    let mut store = populated_store();

    store.remove_in("main.sub", "test1").unwrap();

    assert_eq!(store.get("main.sub.test1").unwrap(), "");
    assert_eq!(store.get("main.test1").unwrap(), "testValue1");
}

#[test]
fn test_remove_missing_is_noop() {
    let mut store = populated_store();
    let before = store.variables();

    store.remove("nope.key").unwrap();
    store.remove("main.nope.key").unwrap();
    store.remove("main.nope").unwrap();
    store.remove_sub("core", "nope", "test1");

    assert_eq!(store.variables(), before);
}

#[test]
fn test_remove_section() {
    let mut store = populated_store();

    store.remove_section("core").unwrap();

    for key in ["core.test1", "core.test2", "core.test3", "core.test4"] {
        assert_eq!(store.get(key).unwrap(), "");
    }
    assert_eq!(store.get("main.test1").unwrap(), "testValue1");
    assert_eq!(store.get("main.test2").unwrap(), "testValue2");
}

#[test]
fn test_remove_subsection() {
    let mut store = populated_store();

    store.remove_section("main.sub").unwrap();

    assert_eq!(store.get("main.sub.test1").unwrap(), "");
    assert_eq!(store.get("main.test1").unwrap(), "testValue1");
}

#[test]
fn test_remove_missing_section_is_noop() {
    let mut store = populated_store();

    store.remove_section("nope").unwrap();
    store.remove_section("nope.sub").unwrap();
    store.remove_subsection("main", "nope");

    assert_eq!(store.key_set().len(), 8);
}

#[test]
fn test_clear() {
    let mut store = populated_store();
    store.clear();

    assert!(store.is_empty());
    assert_eq!(store.section_count(), 0);
}

// =============================================================================
// Rename Tests
// =============================================================================

#[test]
fn test_rename_root() {
    let mut store = populated_store();

    store.rename_section("core", "renamedCore").unwrap();

    for (i, value) in ["testValue3", "testValue4", "testValue5", "testValue6"].iter().enumerate() {
        let n = i + 1;
        assert_eq!(store.get(&format!("core.test{n}")).unwrap(), "");
        assert_eq!(store.get(&format!("renamedCore.test{n}")).unwrap(), *value);
    }
    assert_eq!(store.root("renamedCore").unwrap().name(), "renamedCore");
}

#[test]
fn test_rename_root_keeps_subsections() {
    let mut store = populated_store();

    store.rename_section("main", "primary").unwrap();

    assert_eq!(store.get("primary.sub.test1").unwrap(), "testValue2");
    assert_eq!(store.get("main.sub.test1").unwrap(), "");
}

#[test]
fn test_rename_subsection() {
    let mut store = Store::new();
    store.set("merge.tool.command", "merge").unwrap();

    store.rename_section("merge.tool", "externalTool").unwrap();

    assert_eq!(store.get("merge.externalTool.command").unwrap(), "merge");
    assert_eq!(store.get("merge.tool.command").unwrap(), "");
}

#[test]
fn test_rename_subsection_explicit() {
    let mut store = Store::new();
    store.set("merge.tool.command", "merge").unwrap();

    store.rename_subsection("merge", "tool", "externalTool").unwrap();

    assert_eq!(store.get("merge.externalTool.command").unwrap(), "merge");
}

#[test]
fn test_rename_root_into_subsection() {
    let mut store = Store::new();
    store.set("source.path", "/opt/projects").unwrap();
    store.set("source.owner", "Hugo Ponce").unwrap();

    store.rename_section("source", "project.config").unwrap();

    assert_eq!(store.get("project.config.path").unwrap(), "/opt/projects");
    assert_eq!(store.get("project.config.owner").unwrap(), "Hugo Ponce");
    assert!(store.root("source").is_none());
    assert_eq!(
        store.key_set(),
        keys(&["project.config.owner", "project.config.path"])
    );
}

#[test]
fn test_rename_root_with_subsections_into_subsection_fails() {
    let mut store = populated_store();
    let before = store.variables();

    let result = store.rename_section("main", "other.main");

    assert!(matches!(result, Err(ConfigError::NestedSubsection { .. })));
    assert_eq!(store.variables(), before);
}

#[test]
fn test_rename_root_with_only_empty_subsections_into_subsection() {
    let mut store = Store::parse("[a 'x']\n[a]\n  k = v\n").unwrap();

    store.rename_section("a", "b.a").unwrap();

    assert_eq!(store.get("b.a.k").unwrap(), "v");
    assert!(store.root("a").is_none());
    assert_eq!(store.root("b").unwrap().subsections().count(), 1);
}

#[test]
fn test_move_subsection_to_other_root() {
    let mut store = populated_store();

    store.rename_section("main.sub", "core.moved").unwrap();

    assert_eq!(store.get("core.moved.test1").unwrap(), "testValue2");
    assert_eq!(store.get("main.sub.test1").unwrap(), "");
}

#[test]
fn test_rename_onto_existing_merges() {
    let mut store = Store::new();
    store.set("a.shared", "from-a").unwrap();
    store.set("a.only_a", "1").unwrap();
    store.set("b.shared", "from-b").unwrap();
    store.set("b.only_b", "2").unwrap();

    store.rename_section("a", "b").unwrap();

    assert_eq!(store.get("b.shared").unwrap(), "from-a");
    assert_eq!(store.get("b.only_a").unwrap(), "1");
    assert_eq!(store.get("b.only_b").unwrap(), "2");
    assert_eq!(store.section_count(), 1);
}

#[test]
fn test_rename_missing_is_noop() {
    let mut store = populated_store();
    let before = store.variables();

    store.rename_section("nope", "other").unwrap();
    store.rename_section("main.nope", "other").unwrap();
    store.rename_section("main", "main").unwrap();

    assert_eq!(store.variables(), before);
}

#[test]
fn test_rename_to_invalid_name_fails() {
    let mut store = populated_store();

    assert!(store.rename_section("core", "").is_err());
    assert!(store.rename_section("core", "a.b.c").is_err());
    assert!(store.rename_section("main.sub", "").is_err());
    assert_eq!(store.get("core.test1").unwrap(), "testValue3");
}

#[test]
fn test_rename_to_unwritable_name_fails() {
    let mut store = populated_store();
    let before = store.variables();

    for bad in ["my core", "it's", "a[b", "x.it's", "x. padded"] {
        assert!(
            matches!(store.rename_section("core", bad), Err(ConfigError::InvalidKey(_))),
            "{bad:?} should be rejected"
        );
    }
    assert!(store.rename_section("main.sub", "it's").is_err());
    assert!(store.rename_section("main.sub", "a\nb").is_err());
    assert!(store.rename_subsection("main", "sub", "q\"x").is_err());

    assert_eq!(store.variables(), before);
}

#[test]
fn test_rename_subsection_to_spaced_name() {
    let mut store = populated_store();

    store.rename_section("main.sub", "my sub").unwrap();

    assert_eq!(store.get("main.my sub.test1").unwrap(), "testValue2");
}

// =============================================================================
// Snapshot Tests
// =============================================================================

#[test]
fn test_key_set() {
    let store = populated_store();

    assert_eq!(
        store.key_set(),
        keys(&[
            "core.test1",
            "core.test2",
            "core.test3",
            "core.test4",
            "main.sub.test1",
            "main.sub.test2",
            "main.test1",
            "main.test2",
        ])
    );
}

#[test]
fn test_values_keep_duplicates() {
    let store = populated_store();

    let values = store.values();
    assert_eq!(values.len(), 8);
    assert_eq!(values.iter().filter(|v| *v == "testValue2").count(), 3);
}

#[test]
fn test_values_in_prefix() {
    let store = populated_store();

    assert_eq!(store.values_in("main").len(), 4);
    assert_eq!(store.values_in("main.sub"), vec!["testValue2", "testValue2"]);
    assert!(store.values_in("nope").is_empty());
}

#[test]
fn test_filtered_variables() {
    let store = populated_store();

    let filtered = store.variables_in("main");

    assert!(filtered.contains_key("main.test1"));
    assert!(filtered.contains_key("main.test2"));
    assert!(filtered.contains_key("main.sub.test1"));
    assert!(filtered.contains_key("main.sub.test2"));
    assert!(!filtered.contains_key("core.test1"));
    assert_eq!(filtered.len(), 4);
}

#[test]
fn test_filtered_variables_subsection() {
    let store = populated_store();

    let filtered = store.variables_in("main.sub");

    assert_eq!(filtered.len(), 2);
    assert_eq!(filtered["main.sub.test1"], "testValue2");
    assert!(store.variables_in("").is_empty());
}

#[test]
fn test_filtered_subsection_excludes_prefix_siblings() {
    let mut store = Store::new();
    store.set("main.sub.a", "1").unwrap();
    store.set("main.subway.b", "2").unwrap();
    store.set("main.c", "3").unwrap();

    let filtered = store.variables_in("main.sub");

    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered["main.sub.a"], "1");
    assert!(store.variables_in("main.none").is_empty());
}

#[test]
fn test_variables_is_a_snapshot() {
    let mut store = populated_store();
    let mut snapshot = store.variables();

    snapshot.insert("main.injected".to_string(), "x".to_string());
    store.set("main.test1", "changed").unwrap();

    assert_eq!(store.get("main.injected").unwrap(), "");
    assert_eq!(snapshot["main.test1"], "testValue1");
}

#[test]
fn test_is_empty() {
    let mut store = Store::new();
    assert!(store.is_empty());

    store.set("main.key", "v").unwrap();
    assert!(!store.is_empty());

    store.remove("main.key").unwrap();
    assert!(store.is_empty());
    assert_eq!(store.section_count(), 1);
}

#[test]
fn test_one_empty_root_does_not_empty_store() {
    let mut store = Store::new();
    store.set("empty.key", "v").unwrap();
    store.remove("empty.key").unwrap();
    store.set("full.key", "v").unwrap();

    assert!(!store.is_empty());
}

#[test]
fn test_iter_snapshot() {
    let store = populated_store();

    let pairs: Vec<_> = (&store).into_iter().collect();
    assert_eq!(pairs.len(), 8);
    assert_eq!(pairs[0], ("core.test1".to_string(), "testValue3".to_string()));
}
