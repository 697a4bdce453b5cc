use std::time::Duration;

use cellular_sandbox_core::{Command, Event};
use cellular_sandbox_rendering::{FrameControl, FrameInput, GridPresentation, Scene};
use cellular_sandbox_system_cadence::Cadence;
use cellular_sandbox_system_editor::Editor;
use cellular_sandbox_world::{self as world, query, World};
use tracing::{debug, warn};

use crate::{config::Settings, input};

/// Drives a world with the cadence and editor systems, one frame at a time.
#[derive(Debug)]
pub(crate) struct Session {
    world: World,
    cadence: Cadence,
    editor: Editor,
    pending: Vec<Event>,
    target: Option<u64>,
}

impl Session {
    /// Creates a stopped session; `target` caps the number of generations.
    pub(crate) fn new(settings: &Settings, target: Option<u64>) -> Self {
        let mut session = Self {
            world: World::new(settings.automaton, settings.dimensions),
            cadence: Cadence::new(),
            editor: Editor::new(settings.automaton),
            pending: Vec::new(),
            target,
        };
        session.submit(Command::SetStepRate {
            rate: settings.rate,
        });
        session
    }

    /// Read-only access to the simulated world.
    pub(crate) fn world(&self) -> &World {
        &self.world
    }

    /// Applies a command and queues its events for the systems.
    pub(crate) fn submit(&mut self, command: Command) {
        let mut events = Vec::new();
        world::apply(&mut self.world, command, &mut events);
        for event in &events {
            if let Event::CellEditRejected {
                cell,
                state,
                reason,
            } = event
            {
                warn!(?cell, state = state.get(), ?reason, "cell edit rejected");
            }
        }
        self.pending.extend(events);
    }

    /// Advances the session by one frame of `dt` wall-clock time.
    pub(crate) fn frame(
        &mut self,
        dt: Duration,
        frame_input: FrameInput,
        layout: &GridPresentation,
    ) -> FrameControl {
        for command in input::commands(&frame_input, query::is_running(&self.world)) {
            self.dispatch(command);
        }
        self.submit(Command::Tick { dt });

        let events = std::mem::take(&mut self.pending);
        let gestures = input::gestures(&frame_input, layout);
        let mut commands = Vec::new();
        self.cadence.handle(&events, &mut commands);
        // Edits land after this frame's steps so a stroke is never overwritten.
        let current = &self.world;
        self.editor
            .handle(&events, &gestures, |cell| current.cell(cell), &mut commands);

        for command in commands {
            self.dispatch(command);
        }

        if self.reached_target() {
            debug!(generation = query::generation(&self.world), "generation target reached");
            FrameControl::Exit
        } else {
            FrameControl::Continue
        }
    }

    /// Snapshot of the current generation for presentation.
    pub(crate) fn scene(&self) -> Scene {
        let mut scene = Scene::capture(
            query::automaton(&self.world),
            query::grid(&self.world),
            query::ant(&self.world),
            query::generation(&self.world),
        );
        scene.running = query::is_running(&self.world);
        scene
    }

    fn dispatch(&mut self, command: Command) {
        if matches!(command, Command::Step) && self.reached_target() {
            return;
        }
        self.submit(command);
    }

    fn reached_target(&self) -> bool {
        self.target
            .is_some_and(|target| query::generation(&self.world) >= target)
    }
}
