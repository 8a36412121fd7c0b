//! Mouse gesture state machine, independent of the windowing toolkit.
//!
//! The GUI translates its raw pointer input into [`PointerEvent`]s and feeds
//! them to a [`Gesture`], which answers with the [`GestureAction`] the editor
//! should perform.

use crate::utils::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Press { button: PointerButton, pos: Point },
    Motion { pos: Point },
    Release { button: PointerButton },
}

/// Which tool the left button currently drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeKind {
    Erase,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Stroke(StrokeKind),
    Resize { last: Point },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAction {
    /// Record a marker for the stroke and show its outline.
    Mark { kind: StrokeKind, pos: Point },
    /// Grow or shrink the image by the cursor delta.
    Resize { dx: i32, dy: i32 },
    /// The gesture finished.
    End,
}

impl Gesture {
    /// Advances the machine by one event.
    ///
    /// `tool` is the stroke kind selected by the eraser/draw toggles, `None`
    /// when neither is active.
    pub fn handle(&mut self, event: PointerEvent, tool: Option<StrokeKind>) -> Option<GestureAction> {
        match (*self, event) {
            (Gesture::Idle, PointerEvent::Press { button: PointerButton::Primary, pos }) => {
                let kind = tool?;
                *self = Gesture::Stroke(kind);
                match kind {
                    // the press point itself is part of a drawn stroke
                    StrokeKind::Draw => Some(GestureAction::Mark { kind, pos }),
                    StrokeKind::Erase => None,
                }
            }
            (Gesture::Idle, PointerEvent::Press { button: PointerButton::Secondary, pos }) => {
                *self = Gesture::Resize { last: pos };
                None
            }
            (Gesture::Stroke(kind), PointerEvent::Motion { pos }) => {
                Some(GestureAction::Mark { kind, pos })
            }
            (Gesture::Resize { last }, PointerEvent::Motion { pos }) => {
                let (dx, dy) = (pos.x() - last.x(), pos.y() - last.y());
                *self = Gesture::Resize { last: pos };
                if dx == 0 && dy == 0 {
                    None
                } else {
                    Some(GestureAction::Resize { dx, dy })
                }
            }
            (Gesture::Stroke(_), PointerEvent::Release { button: PointerButton::Primary })
            | (Gesture::Resize { .. }, PointerEvent::Release { button: PointerButton::Secondary }) => {
                *self = Gesture::Idle;
                Some(GestureAction::End)
            }
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: PointerButton, x: i32, y: i32) -> PointerEvent {
        PointerEvent::Press {
            button,
            pos: Point::new(x, y),
        }
    }

    fn motion(x: i32, y: i32) -> PointerEvent {
        PointerEvent::Motion {
            pos: Point::new(x, y),
        }
    }

    #[test]
    fn primary_press_without_a_tool_does_nothing() {
        let mut gesture = Gesture::default();
        assert_eq!(gesture.handle(press(PointerButton::Primary, 1, 1), None), None);
        assert_eq!(gesture.handle(motion(2, 2), None), None);
        assert!(!gesture.is_active());
    }

    #[test]
    fn draw_stroke_marks_press_and_every_motion() {
        let mut gesture = Gesture::default();
        let tool = Some(StrokeKind::Draw);
        assert_eq!(
            gesture.handle(press(PointerButton::Primary, 1, 1), tool),
            Some(GestureAction::Mark {
                kind: StrokeKind::Draw,
                pos: Point::new(1, 1)
            })
        );
        assert_eq!(
            gesture.handle(motion(2, 3), tool),
            Some(GestureAction::Mark {
                kind: StrokeKind::Draw,
                pos: Point::new(2, 3)
            })
        );
        assert_eq!(
            gesture.handle(PointerEvent::Release { button: PointerButton::Primary }, tool),
            Some(GestureAction::End)
        );
        assert_eq!(gesture, Gesture::Idle);
    }

    #[test]
    fn erase_stroke_starts_marking_on_motion() {
        let mut gesture = Gesture::default();
        let tool = Some(StrokeKind::Erase);
        assert_eq!(gesture.handle(press(PointerButton::Primary, 5, 5), tool), None);
        assert_eq!(gesture, Gesture::Stroke(StrokeKind::Erase));
        assert_eq!(
            gesture.handle(motion(6, 5), tool),
            Some(GestureAction::Mark {
                kind: StrokeKind::Erase,
                pos: Point::new(6, 5)
            })
        );
    }

    #[test]
    fn secondary_drag_reports_incremental_deltas() {
        let mut gesture = Gesture::default();
        assert_eq!(gesture.handle(press(PointerButton::Secondary, 10, 10), None), None);
        assert_eq!(
            gesture.handle(motion(15, 8), None),
            Some(GestureAction::Resize { dx: 5, dy: -2 })
        );
        assert_eq!(
            gesture.handle(motion(16, 8), None),
            Some(GestureAction::Resize { dx: 1, dy: 0 })
        );
        assert_eq!(gesture.handle(motion(16, 8), None), None);
        assert_eq!(
            gesture.handle(PointerEvent::Release { button: PointerButton::Secondary }, None),
            Some(GestureAction::End)
        );
        assert_eq!(gesture.handle(motion(30, 30), None), None);
    }

    #[test]
    fn releasing_the_other_button_keeps_the_gesture() {
        let mut gesture = Gesture::default();
        gesture.handle(press(PointerButton::Secondary, 0, 0), None);
        assert_eq!(
            gesture.handle(PointerEvent::Release { button: PointerButton::Primary }, None),
            None
        );
        assert!(gesture.is_active());
    }
}
