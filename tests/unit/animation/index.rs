use super::*;

fn sweep() -> impl Iterator<Item = f64> {
    (0..=1000).map(|i| i as f64 / 1000.0)
}

#[test]
fn index_is_always_in_range() {
    for count in 1..=12 {
        for p in sweep() {
            let idx = select_index(p, count, DEFAULT_TAIL_RESERVE);
            assert!(idx < count, "count={count} p={p} idx={idx}");
        }
    }
}

#[test]
fn tail_reserve_pins_last_item() {
    for p in sweep().filter(|p| *p >= 0.85) {
        assert_eq!(select_index(p, 5, 0.15), 4, "p={p}");
    }
}

#[test]
fn rounds_to_nearest_item() {
    // adjusted = p / 0.85, index = round(adjusted * 4)
    assert_eq!(select_index(0.0, 5, 0.15), 0);
    assert_eq!(select_index(0.1, 5, 0.15), 0);
    assert_eq!(select_index(0.11, 5, 0.15), 1);
    assert_eq!(select_index(0.425, 5, 0.15), 2);
    assert_eq!(select_index(0.7, 5, 0.15), 3);
}

#[test]
fn zero_and_single_item_select_zero() {
    for p in [0.0, 0.5, 1.0] {
        assert_eq!(select_index(p, 0, 0.15), 0);
        assert_eq!(select_index(p, 1, 0.15), 0);
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    assert_eq!(select_index(-2.0, 4, 0.15), 0);
    assert_eq!(select_index(9.0, 4, 0.15), 3);
    assert_eq!(select_index(f64::NAN, 4, 0.15), 0);
}

#[test]
fn index_is_monotonic_in_progress() {
    let mut last = 0;
    for p in sweep() {
        let idx = select_index(p, 7, 0.2);
        assert!(idx >= last);
        last = idx;
    }
    assert_eq!(last, 6);
}

#[test]
fn selector_validates_tail_reserve() {
    assert!(IndexSelector::new(3, 1.0).is_err());
    assert!(IndexSelector::new(3, -0.1).is_err());
    assert!(IndexSelector::new(3, f64::NAN).is_err());
    let sel = IndexSelector::new(3, 0.0).unwrap();
    assert_eq!(sel.select(1.0), 2);
    assert_eq!(sel.position(0.5), 1.0);
}

#[test]
fn selector_defaults_tail_reserve_from_json() {
    let sel: IndexSelector = serde_json::from_str(r#"{ "item_count": 5 }"#).unwrap();
    assert_eq!(sel.tail_reserve, DEFAULT_TAIL_RESERVE);
}

#[test]
fn carousel_state_is_recomputed_both_directions() {
    let sel = IndexSelector::new(5, 0.15).unwrap();
    let down = CarouselState::from_progress(&sel, 0.9);
    assert!(down.is_last());
    let up = CarouselState::from_progress(&sel, 0.05);
    assert!(up.is_first());
    assert_eq!(CarouselState::from_progress(&sel, 0.9), down);
}
