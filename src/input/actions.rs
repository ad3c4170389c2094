//! Game action definitions and their keyboard bindings

use macroquad::prelude::KeyCode;

/// Every logical input the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement (held)
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // Toggles (pressed edge)
    ToggleMusic,

    // System
    Quit,
}

impl Action {
    #[cfg(test)]
    pub const ALL: [Action; 6] = [
        Action::MoveUp,
        Action::MoveDown,
        Action::MoveLeft,
        Action::MoveRight,
        Action::ToggleMusic,
        Action::Quit,
    ];
}

/// Keys bound to an action. Any of them triggers it.
///
/// Escape is not bound; only `Q` or closing the window quits.
pub fn bindings(action: Action) -> &'static [KeyCode] {
    match action {
        Action::MoveUp => &[KeyCode::W, KeyCode::Up],
        Action::MoveDown => &[KeyCode::S, KeyCode::Down],
        Action::MoveLeft => &[KeyCode::A, KeyCode::Left],
        Action::MoveRight => &[KeyCode::D, KeyCode::Right],
        Action::ToggleMusic => &[KeyCode::P],
        Action::Quit => &[KeyCode::Q],
    }
}
