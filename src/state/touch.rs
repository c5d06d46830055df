// Touch batch extraction from DOM touch events
use web_sys::{TouchEvent, TouchList};

use crate::model::TouchPoint;

/// Only the fingers that changed in this event, like the host's `changedTouches`.
pub fn changed_points(event: &TouchEvent) -> Vec<TouchPoint> {
    points_in(&event.changed_touches())
}

pub fn points_in(list: &TouchList) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| TouchPoint::new(t.identifier(), f64::from(t.page_x()), f64::from(t.page_y())))
        .collect()
}
