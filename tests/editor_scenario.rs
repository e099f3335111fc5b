//! End-to-end editor scenarios driven through key events.

use std::rc::Rc;

use makeshift_vet::primitives::WidgetId;
use makeshift_vet::{
    CatEditor, EditorAction, Frame, KeyboardEvent, MemoryReporter, Modifiers, default_cat,
    from_json, render_plain,
};

const MINIMAL_CAT: &str = r#"{
    "owner": { "firstName": "A", "lastName": "B" },
    "info": { "name": "Whiskers", "weight": "10" },
    "parts": [
        { "type": "leg", "attributes": [{ "placement": "front-left", "injured": false }] }
    ]
}"#;

fn key(name: &str) -> KeyboardEvent {
    KeyboardEvent::new(name)
}

#[test]
fn toggling_front_left_marks_it_injured() {
    let cat = from_json(MINIMAL_CAT, "inline").unwrap();
    let reporter = MemoryReporter::new();
    let editor = CatEditor::new(cat.clone(), reporter.clone());

    assert!(render_plain(&editor.render()).contains("Name: A B"));

    // weight editor -> front-left switch
    editor.handle_key(&key("Tab"));
    assert_eq!(
        editor.focused_id(),
        Some(WidgetId::new("parts{leg#0}.attributes[0].injured"))
    );
    editor.handle_key(&key(" "));

    let after = editor.cat();
    assert!(after.parts[0].attributes[0].injured);
    assert!(Rc::ptr_eq(&cat.owner, &after.owner));
    assert!(Rc::ptr_eq(&cat.info, &after.info));

    let reported = reporter.last().unwrap();
    assert!(reported.parts[0].attributes[0].injured);
    assert_eq!(reporter.len(), 1);
}

#[test]
fn weight_edit_then_quit_reports_each_settled_change() {
    let reporter = MemoryReporter::new();
    let editor = CatEditor::new(default_cat(), reporter.clone());

    editor.handle_key(&key("Backspace"));
    editor.handle_key(&key("Backspace"));
    editor.handle_key(&key("1"));
    editor.handle_key(&key("1"));
    editor.handle_key(&key("Enter"));
    assert_eq!(editor.cat().info.weight, "11");

    editor.handle_key(&key("2"));
    let action = editor.handle_key(&KeyboardEvent::with_modifiers("c", Modifiers::ctrl()));
    assert_eq!(action, EditorAction::Quit);

    let weights: Vec<String> = reporter
        .records()
        .iter()
        .map(|cat| cat.info.weight.clone())
        .collect();
    assert_eq!(weights, vec!["11", "112"]);
}

#[test]
fn serialized_record_renders_identically() {
    let editor = CatEditor::new(default_cat(), MemoryReporter::new());
    editor.handle_key(&KeyboardEvent::with_modifiers("Tab", Modifiers::shift()));
    editor.handle_key(&key("Enter"));

    let json = serde_json::to_string(&*editor.cat()).unwrap();
    let copy = CatEditor::new(from_json(&json, "round trip").unwrap(), MemoryReporter::new());

    let plain = |editor: &CatEditor| render_plain(&Frame::new(editor.tree()));
    assert_eq!(plain(&editor), plain(&copy));
    assert!(plain(&copy).contains("right-ear     [x]"));
}
