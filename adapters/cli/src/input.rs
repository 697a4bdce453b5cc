use cellular_sandbox_core::Command;
use cellular_sandbox_rendering::{FrameInput, GridPresentation};
use cellular_sandbox_system_editor::{PointerButton, PointerGesture};

/// Playback and grid commands requested through keyboard input.
pub(crate) fn commands(input: &FrameInput, running: bool) -> Vec<Command> {
    let mut commands = Vec::new();
    if input.toggle_playback {
        commands.push(Command::SetPlayback { running: !running });
    }
    if input.step_once {
        commands.push(Command::Step);
    }
    if input.clear {
        commands.push(Command::Clear);
    }
    commands
}

/// Pointer gestures expressed in grid coordinates.
///
/// A press takes priority over a held button; with no button down the stroke
/// is released regardless of where the cursor is.
pub(crate) fn gestures(input: &FrameInput, layout: &GridPresentation) -> Vec<PointerGesture> {
    let any_button = input.primary_held
        || input.secondary_held
        || input.primary_pressed
        || input.secondary_pressed;
    if !any_button {
        return vec![PointerGesture::Release];
    }

    let Some(cell) = input.cursor.and_then(|cursor| layout.cell_at(cursor)) else {
        return Vec::new();
    };

    let gesture = if input.primary_pressed {
        PointerGesture::Press {
            cell,
            button: PointerButton::Primary,
        }
    } else if input.secondary_pressed {
        PointerGesture::Press {
            cell,
            button: PointerButton::Secondary,
        }
    } else if input.primary_held {
        PointerGesture::Drag {
            cell,
            button: PointerButton::Primary,
        }
    } else {
        PointerGesture::Drag {
            cell,
            button: PointerButton::Secondary,
        }
    };
    vec![gesture]
}
