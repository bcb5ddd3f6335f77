use super::*;
use crate::animation::spring::{Spring, SpringConfig};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn advances_each_subscriber_once_per_frame() {
    let mut clock = FrameClock::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    let _sub = clock.subscribe(move |dt| s.borrow_mut().push(dt));

    clock.advance(0.016);
    clock.advance(f64::NAN);
    clock.advance(-1.0);

    assert_eq!(*seen.borrow(), vec![0.016, 0.0, 0.0]);
    assert_eq!(clock.frame(), 3);
    assert!((clock.elapsed_secs() - 0.016).abs() < 1e-12);
}

#[test]
fn spring_driven_by_clock_stops_after_teardown() {
    let mut clock = FrameClock::new();
    let spring = Rc::new(RefCell::new(
        Spring::new(0.0, SpringConfig::cursor()).unwrap(),
    ));
    spring.borrow_mut().set_target(10.0);

    let sp = spring.clone();
    let sub = clock.subscribe(move |dt| {
        sp.borrow_mut().tick(dt);
    });
    for _ in 0..5 {
        clock.advance(1.0 / 60.0);
    }
    let mid = spring.borrow().value();
    assert!(mid > 0.0);

    drop(sub);
    assert_eq!(clock.subscriber_count(), 0);
    clock.advance(1.0 / 60.0);
    assert_eq!(spring.borrow().value(), mid);
}
