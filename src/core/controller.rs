/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Space,
    Escape,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    KeyA,
    KeyV,
    MouseLeft,
    MouseRight,
}

impl Button {
    /// Satellite number bound to a digit key (1-based)
    pub fn digit(self) -> Option<usize> {
        match self {
            Button::Digit1 => Some(1),
            Button::Digit2 => Some(2),
            Button::Digit3 => Some(3),
            Button::Digit4 => Some(4),
            Button::Digit5 => Some(5),
            _ => None,
        }
    }
}

/// Left-button drag in window pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragEvent {
    Begin { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    End,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_button_debug() {
        assert_eq!(format!("{:?}", Button::KeyV), "KeyV");
        assert_eq!(format!("{:?}", Button::MouseLeft), "MouseLeft");
    }

    #[test]
    fn test_digits() {
        let digits: Vec<_> = [
            Button::Digit1,
            Button::Digit2,
            Button::Digit3,
            Button::Digit4,
            Button::Digit5,
        ]
        .iter()
        .filter_map(|b| b.digit())
        .collect();
        assert_eq!(digits, vec![1, 2, 3, 4, 5]);
        assert_eq!(Button::Space.digit(), None);
    }

    #[test]
    fn test_button_hash_duplicates() {
        let mut set = HashSet::new();
        set.insert(Button::KeyA);
        set.insert(Button::KeyA);
        set.insert(Button::Escape);

        assert_eq!(set.len(), 2);
        assert!(set.contains(&Button::Escape));
    }

    #[test]
    fn test_drag_event_equality() {
        assert_eq!(DragEvent::Begin { x: 1.0, y: 2.0 }, DragEvent::Begin { x: 1.0, y: 2.0 });
        assert_ne!(DragEvent::End, DragEvent::Move { x: 0.0, y: 0.0 });
    }
}
