//! # Application State Management
//!
//! The windowed shell around a `Simulation`:
//! - Window creation and cursor capture
//! - Input collection and translation into one `TickIntent` per tick
//! - Fixed-rate tick scheduling
//! - The HUD line, shown in the window title

pub mod input_manager;
pub mod input_state;

use input_manager::{InputManager, SLOT_KEYS};
use input_state::ProcessedInputState;
use log::{debug, error, info, warn};

use web_time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorGrabMode, Window, WindowId},
};

use crate::engine_state::{player::MovementIntent, Simulation, TickIntent};

/// Ticks per second the shell tries to hold.
pub const TICK_RATE: u32 = 60;

const WINDOW_TITLE: &str = "Voxel Sandbox";

/// Top level shell state. The simulation exists before the window does.
pub struct ApplicationState {
    /// The session being played
    pub simulation: Simulation,

    /// Window and input state, present once the event loop has resumed
    pub state: Option<InitializedApplicationState>,
}

/// The running part of the shell.
pub struct InitializedApplicationState {
    /// Handle to the application window
    pub window: Window,

    /// Manages input state and event processing
    pub input_manager: InputManager,

    /// When the next tick is due
    pub next_tick: Instant,

    /// Last title written, to skip redundant updates
    pub hud: String,
}

impl ApplicationState {
    /// Wraps a ready simulation. The window comes later, on resume.
    pub fn new(simulation: Simulation) -> Self {
        Self {
            simulation,
            state: None,
        }
    }

    fn tick_interval() -> Duration {
        Duration::from_secs(1) / TICK_RATE
    }
}

/// Maps one tick worth of input onto the simulation's intent.
///
/// Movement and the mouse buttons are level-triggered, slot keys are edge-triggered.
/// When several slot keys go down on the same tick the lowest slot wins.
pub fn translate_processed_input(input: &ProcessedInputState) -> TickIntent {
    let axis = |positive: KeyCode, negative: KeyCode| {
        let mut value = 0.0;
        if input.get_key_state(positive).is_active() {
            value += 1.0;
        }
        if input.get_key_state(negative).is_active() {
            value -= 1.0;
        }
        value
    };

    let look_delta = input
        .get_mouse_delta()
        .map(|(x, y)| (x as f32, y as f32))
        .unwrap_or((0.0, 0.0));

    TickIntent {
        movement: MovementIntent {
            forward: axis(KeyCode::KeyW, KeyCode::KeyS),
            strafe: axis(KeyCode::KeyD, KeyCode::KeyA),
            jump: input.get_key_state(KeyCode::Space).is_active(),
        },
        look_delta,
        break_requested: input.get_mouse_button_state(MouseButton::Left).is_active(),
        place_requested: input.get_mouse_button_state(MouseButton::Right).is_active(),
        select_slot: SLOT_KEYS
            .iter()
            .position(|key| input.get_key_state(*key).is_just_pressed()),
    }
}

/// Text of the HUD: selected block and count, then the rounded position.
pub fn hud_text(simulation: &Simulation) -> String {
    let position = simulation.player().position;
    let selected = match simulation.inventory().get(simulation.selected_slot()) {
        Some(slot) => format!("{} ({})", slot.block_type, slot.count),
        None => "nothing".to_string(),
    };
    format!(
        "{WINDOW_TITLE} | Selected: {selected} | Position: {:.1}, {:.1}, {:.1}",
        position.x, position.y, position.z
    )
}

fn capture_cursor(window: &Window) {
    let grab = window
        .set_cursor_grab(CursorGrabMode::Confined)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Locked));
    if let Err(err) = grab {
        warn!("Could not capture the cursor: {err}");
    }
    window.set_cursor_visible(false);
}

impl ApplicationHandler for ApplicationState {
    /// Handles window events: input intake, focus loss, redraws and exit requests.
    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        state.input_manager.intake_input(&event);

        match event {
            WindowEvent::Focused(is_focused) => {
                if !is_focused {
                    state.input_manager.release_all();
                }
            }
            WindowEvent::RedrawRequested => {
                let hud = hud_text(&self.simulation);
                if hud != state.hud {
                    state.window.set_title(&hud);
                    state.hud = hud;
                }
            }
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => {
                info!("Exiting after {} ticks", self.simulation.ticks());
                event_loop.exit();
            }
            _ => (),
        }
    }

    /// Collects raw mouse motion for the look delta.
    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let Some(state) = &mut self.state {
            if let DeviceEvent::MouseMotion { delta } = event {
                state.input_manager.intake_mouse_motion(delta);
            }
        }
    }

    /// Creates the window the first time the event loop resumes.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(1024.0, 768.0));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => {
                error!("Could not create window: {err}");
                event_loop.exit();
                return;
            }
        };
        capture_cursor(&window);
        info!("Window created, ticking at {TICK_RATE} Hz");

        self.state = Some(InitializedApplicationState {
            window,
            input_manager: InputManager::new(),
            next_tick: Instant::now(),
            hud: String::new(),
        });
    }

    /// Runs a tick when one is due, then sleeps until the next one.
    ///
    /// A late wakeup runs a single tick and schedules the next from now, so missed
    /// intervals are dropped rather than replayed.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };

        let now = Instant::now();
        if now >= state.next_tick {
            let processed_input = state.input_manager.get_and_reset_processed_input();
            let outcome = self
                .simulation
                .tick(&translate_processed_input(&processed_input));
            if outcome.broken.is_some() || outcome.placed.is_some() {
                debug!("Tick {}: {:?}", self.simulation.ticks(), outcome);
            }

            state.next_tick = now + Self::tick_interval();
            state.window.request_redraw();
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(state.next_tick));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulationConfig;
    use input_state::RawInputState;

    fn input_with(keys: &[(KeyCode, RawInputState)]) -> ProcessedInputState {
        let mut input = ProcessedInputState::default();
        input.keyboard_states.extend(keys.iter().copied());
        input
    }

    #[test]
    fn idle_input_is_the_default_intent() {
        let intent = translate_processed_input(&ProcessedInputState::default());
        assert_eq!(intent, TickIntent::default());
    }

    #[test]
    fn opposite_keys_cancel() {
        let input = input_with(&[
            (KeyCode::KeyW, RawInputState::Held),
            (KeyCode::KeyS, RawInputState::Pressed),
            (KeyCode::KeyA, RawInputState::Held),
            (KeyCode::Space, RawInputState::Pressed),
        ]);
        let intent = translate_processed_input(&input);
        assert_eq!(intent.movement.forward, 0.0);
        assert_eq!(intent.movement.strafe, -1.0);
        assert!(intent.movement.jump);
    }

    #[test]
    fn released_keys_do_not_move() {
        let input = input_with(&[(KeyCode::KeyW, RawInputState::Released)]);
        assert_eq!(translate_processed_input(&input).movement.forward, 0.0);
    }

    #[test]
    fn slot_keys_are_edge_triggered() {
        let pressed = input_with(&[(KeyCode::Digit3, RawInputState::Pressed)]);
        assert_eq!(translate_processed_input(&pressed).select_slot, Some(2));

        let held = input_with(&[(KeyCode::Digit3, RawInputState::Held)]);
        assert_eq!(translate_processed_input(&held).select_slot, None);

        let both = input_with(&[
            (KeyCode::Digit6, RawInputState::Pressed),
            (KeyCode::Digit2, RawInputState::Pressed),
        ]);
        assert_eq!(translate_processed_input(&both).select_slot, Some(1));
    }

    #[test]
    fn mouse_buttons_and_motion() {
        let mut input = ProcessedInputState::default();
        input
            .mouse_button_states
            .insert(MouseButton::Left, RawInputState::Held);
        input
            .mouse_button_states
            .insert(MouseButton::Right, RawInputState::Pressed);
        input.mouse_delta = Some((4.0, -2.5));

        let intent = translate_processed_input(&input);
        assert!(intent.break_requested);
        assert!(intent.place_requested);
        assert_eq!(intent.look_delta, (4.0, -2.5));
    }

    #[test]
    fn hud_shows_selection_and_position() {
        let simulation = Simulation::initialize(&SimulationConfig::default(), 5);
        assert_eq!(
            hud_text(&simulation),
            "Voxel Sandbox | Selected: Grass (10) | Position: 8.0, 20.0, 8.0"
        );
    }

    #[test]
    fn tick_interval_matches_rate() {
        assert_eq!(
            ApplicationState::tick_interval(),
            Duration::from_nanos(16_666_666)
        );
    }
}
