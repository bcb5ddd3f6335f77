use super::*;
use std::io::Cursor;

const SCENE: &str = r#"{
  "viewport": { "width": 1280, "height": 800 },
  "containers": [
    {
      "id": "hero",
      "progress": { "start": "start start", "end": "end end" },
      "elements": [
        {
          "id": "title",
          "props": {
            "opacity": { "breakpoints": [0, 0.2, 0.8, 1], "values": [0, 1, 1, 0] },
            "offset": { "breakpoints": [0, 1], "values": [{ "x": 0, "y": 40 }, { "x": 0, "y": 0 }] }
          }
        }
      ],
      "carousel": { "item_count": 4 },
      "layers": { "count": 3, "floor_opacity": 0.3 }
    }
  ],
  "spy": { "regions": ["intro", "method"], "active_window_fraction": 0.25 }
}"#;

#[test]
fn parses_with_defaults() {
    let scene = Scene::from_reader(Cursor::new(SCENE)).unwrap();
    scene.validate().unwrap();

    let hero = scene.container("hero").unwrap();
    assert_eq!(hero.elements.len(), 1);
    assert_eq!(hero.layers.len(), 3);

    let carousel = hero.carousel.unwrap();
    assert_eq!(carousel.tail_reserve, DEFAULT_TAIL_RESERVE);
    assert_eq!(carousel.spring, SpringConfig::carousel());

    let spy = scene.spy().unwrap();
    assert_eq!(spy.regions, vec!["intro", "method"]);
    assert_eq!(spy.opts.active_window_fraction, 0.25);
    assert_eq!(spy.opts.visibility_bottom, 1.0);
}

#[test]
fn malformed_timeline_loads_as_identity_but_fails_validation() {
    let json = r#"{
      "viewport": { "width": 100, "height": 100 },
      "containers": [{
        "id": "c",
        "elements": [{ "id": "e", "props": { "opacity": { "breakpoints": [0, 0.5], "values": [1] } } }]
      }]
    }"#;
    let scene = Scene::from_reader(Cursor::new(json)).unwrap();
    let (_, timelines) = &scene.container("c").unwrap().elements[0];
    assert!(timelines.opacity.as_ref().unwrap().is_identity());

    let err = scene.validate().unwrap_err().to_string();
    assert!(err.contains("element 'e'"), "{err}");
    assert!(err.contains("opacity"), "{err}");
}

#[test]
fn invalid_layers_are_disabled_at_load() {
    let json = r#"{
      "viewport": { "width": 100, "height": 100 },
      "containers": [{ "id": "c", "layers": { "count": 2, "entry_frac": 0.9 } }]
    }"#;
    let scene = Scene::from_reader(Cursor::new(json)).unwrap();
    assert!(scene.container("c").unwrap().layers.is_empty());
    assert!(scene.validate().is_err());
}

#[test]
fn duplicate_container_ids_are_rejected() {
    let json = r#"{
      "viewport": { "width": 100, "height": 100 },
      "containers": [{ "id": "a" }, { "id": "a" }]
    }"#;
    let err = Scene::from_reader(Cursor::new(json))
        .unwrap()
        .validate()
        .unwrap_err();
    assert!(matches!(err, ScrollyteError::Validation(_)));
}

#[test]
fn bad_viewport_and_carousel_are_rejected() {
    let mut def = Scene::from_reader(Cursor::new(SCENE)).unwrap().def().clone();
    def.viewport.height = 0.0;
    assert!(Scene::from_def(def.clone()).validate().is_err());

    def.viewport.height = 800.0;
    if let Some(carousel) = def.containers[0].carousel.as_mut() {
        carousel.tail_reserve = 1.0;
    }
    let err = Scene::from_def(def).validate().unwrap_err().to_string();
    assert!(err.contains("carousel"), "{err}");
}

#[test]
fn unknown_element_properties_fail_to_parse() {
    let json = r#"{
      "viewport": { "width": 100, "height": 100 },
      "containers": [{ "id": "c", "elements": [{ "id": "e", "props": { "wobble": {} } }] }]
    }"#;
    assert!(Scene::from_reader(Cursor::new(json)).is_err());
}

#[test]
fn missing_file_reports_path() {
    let err = Scene::from_path("does/not/exist.json").unwrap_err().to_string();
    assert!(err.contains("does/not/exist.json"), "{err}");
}
