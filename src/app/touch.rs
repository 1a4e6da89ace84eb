use eframe::egui::{self, Rect};

use crate::gesture::{GestureEvent, TouchEvent};

/// Converts egui's input clock (seconds) to whole milliseconds.
pub fn timestamp_ms(time: f64) -> i64 {
    (time * 1000.0).round() as i64
}

/// Picks the primary button presses and releases inside `area` out of a
/// frame's input events. egui already turns touches into pointer events, so
/// raw touch events are skipped to avoid seeing every tap twice.
pub fn gesture_events(events: &[egui::Event], time: f64, area: Rect) -> Vec<GestureEvent> {
    let timestamp = timestamp_ms(time);
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::PointerButton {
                pos,
                button: egui::PointerButton::Primary,
                pressed,
                ..
            } if area.contains(*pos) => {
                let touch = TouchEvent::new(pos.x, pos.y, timestamp);
                Some(if *pressed {
                    GestureEvent::Start(touch)
                } else {
                    GestureEvent::End(touch)
                })
            }
            _ => None,
        })
        .collect()
}
