//! Integration tests for capturing accessor closures.

use keyof::{nn, CaptureError, Key, KeyPath, KeyPathError, KeyPathResult, Segment, SegmentKind, NN};

#[test]
fn test_attribute_chain_scenario() {
    let path = KeyPath::of(|u| u.attr("address").attr("city")).unwrap();

    let parts: Vec<&Key> = path.parts().collect();
    assert_eq!(parts, vec!["address", "city"]);
    assert_eq!(path.to_dot(), "address.city");
    assert_eq!(path.to_jsonpath(), "$.address.city");
    assert_eq!(path.to_xpath(), "/address/city");
}

#[test]
fn test_subscript_chain_scenario() {
    let path = KeyPath::of(|d| d.item("users").item(0).item("name")).unwrap();

    let parts: Vec<Key> = path.parts().cloned().collect();
    assert_eq!(
        parts,
        vec![Key::from("users"), Key::Int(0), Key::from("name")]
    );
    assert_eq!(path.to_bracket(), "['users'][0]['name']");
}

#[test]
fn test_segments_keep_their_kind() {
    let path = KeyPath::of(|u| u.attr("metadata").item("prefs")).unwrap();
    let kinds: Vec<SegmentKind> = path.segments().iter().map(Segment::kind).collect();
    assert_eq!(kinds, vec![SegmentKind::Attribute, SegmentKind::Index]);
}

#[test]
fn test_depth_root_leaf_follow_access_order() {
    let path = KeyPath::of(|u| u.attr("a").item("b").attr("c").item(3)).unwrap();
    assert_eq!(path.depth(), 4);
    assert_eq!(path.root(), "a");
    assert_eq!(path.leaf(), &Key::Int(3));
}

#[test]
fn test_dot_rendering_splits_back_into_parts() {
    let path = KeyPath::of(|u| u.attr("metadata").item("prefs").item("theme")).unwrap();
    let dot = path.to_dot();
    let split: Vec<&str> = dot.split('.').collect();
    let parts: Vec<String> = path.parts().map(|p| p.to_string()).collect();
    assert_eq!(split, parts);
}

#[test]
fn test_unwrap_marker_forms() {
    let plain = KeyPath::of(|u| u.attr("address").attr("city")).unwrap();
    let called = KeyPath::of(|u| nn(u.attr("address")).attr("city")).unwrap();
    let piped = KeyPath::of(|u| (u.attr("address") | NN).attr("city")).unwrap();

    assert_eq!(plain, called);
    assert_eq!(plain, piped);
    assert_eq!(called.depth(), 2);
}

#[test]
fn test_identity_capture_is_rejected() {
    assert_eq!(KeyPath::of(|u| u).unwrap_err(), CaptureError::Empty);
    assert_eq!(KeyPath::of(nn).unwrap_err(), CaptureError::Empty);
}

#[test]
fn test_invalid_attribute_is_rejected() {
    let err = KeyPath::of(|u| u.attr("user").attr("__class__")).unwrap_err();
    assert_eq!(
        err,
        CaptureError::InvalidAttribute {
            position: 1,
            name: "__class__".to_string()
        }
    );
    assert!(err.to_string().contains("__class__"));
}

#[test]
fn test_slice_is_unsupported() {
    let err = KeyPath::of(|u| u.attr("tags").item(1..)).unwrap_err();
    assert!(matches!(
        err,
        CaptureError::Unsupported {
            position: 1,
            operation: "slice"
        }
    ));
}

#[test]
fn test_capture_closure_runs_once() {
    let mut calls = 0;
    let path = KeyPath::of(|u| {
        calls += 1;
        u.attr("name")
    })
    .unwrap();
    assert_eq!(calls, 1);
    assert_eq!(path, "name");
}

#[test]
#[should_panic(expected = "boom")]
fn test_panic_in_accessor_propagates() {
    let _ = KeyPath::of(|u| {
        let _ = u.attr("name");
        panic!("boom")
    });
}

#[test]
fn test_from_segments_matches_capture() {
    let built = KeyPath::from_segments(vec![
        Segment::attribute("users"),
        Segment::index(0),
        Segment::attribute("name"),
    ])
    .unwrap();
    let captured = KeyPath::of(|u| u.attr("users").item(0).attr("name")).unwrap();
    assert_eq!(built, captured);
}

#[test]
fn test_paths_are_shareable_across_threads() {
    let path = KeyPath::of(|u| u.attr("address").attr("city")).unwrap();
    let handle = {
        let path = path.clone();
        std::thread::spawn(move || path.to_posix())
    };
    assert_eq!(handle.join().unwrap(), "address/city");
}

fn grandparent_of_city() -> KeyPathResult<KeyPath> {
    let city = KeyPath::of(|u| u.attr("user").attr("address").attr("city"))?;
    Ok(city.parent()?.parent()?)
}

fn parent_of_bad_capture() -> KeyPathResult<KeyPath> {
    let path = KeyPath::of(|u| u.attr("not valid"))?;
    Ok(path.parent()?)
}

#[test]
fn test_mixed_operations_share_one_error_type() {
    assert_eq!(grandparent_of_city().unwrap(), "user");

    let err = parent_of_bad_capture().unwrap_err();
    assert!(matches!(
        err,
        KeyPathError::Capture(CaptureError::InvalidAttribute { position: 0, .. })
    ));
}

#[test]
fn test_short_dunder_names_are_rejected() {
    for name in ["__", "___", "__init__"] {
        let err = KeyPath::of(|u| u.attr(name)).unwrap_err();
        assert!(matches!(err, CaptureError::InvalidAttribute { .. }), "{}", name);
    }
}
