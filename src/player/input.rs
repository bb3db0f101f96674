//! Input bindings and dispatch into the character controller.
//!
//! Two tables meet here. `BindingRegistry` maps binding names to character
//! operations and is filled by `PlayerCharacterController::setup_input`.
//! `InputBindings` maps the same names to physical keys, buttons and axes
//! and is loaded from assets/data/input/bindings.ron.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;

use super::collaborators::*;
use super::components::*;
use super::controller::PlayerCharacterController;
use crate::camera::{CameraKind, SpringArm, ViewCamera};
use crate::core::{load_ron, ConfigError};
use crate::ui::ScreenMessages;

/// Path of the input binding file.
pub const INPUT_BINDINGS_PATH: &str = "assets/data/input/bindings.ron";

/// Names bound to character operations.
#[derive(Resource, Debug, Default)]
pub struct BindingRegistry {
    pub actions: Vec<(String, InputEdge, CharacterAction)>,
    pub axes: Vec<(String, CharacterAxis)>,
}

impl BindingRegistry {
    /// Registry populated with the character's bindings.
    pub fn for_character() -> Self {
        let mut registry = Self::default();
        PlayerCharacterController::setup_input(&mut registry);
        registry
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.iter().any(|(n, _, _)| n == name)
    }

    pub fn has_axis(&self, name: &str) -> bool {
        self.axes.iter().any(|(n, _)| n == name)
    }
}

impl InputBinder for BindingRegistry {
    fn bind_action(&mut self, name: &str, edge: InputEdge, action: CharacterAction) {
        self.actions.push((name.to_string(), edge, action));
    }

    fn bind_axis(&mut self, name: &str, axis: CharacterAxis) {
        self.axes.push((name.to_string(), axis));
    }
}

/// A physical button that can trigger an action.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum ButtonSource {
    Key(KeyCode),
    Mouse(MouseButton),
    Gamepad(GamepadButton),
}

/// A physical input that contributes to an axis value.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum AxisSource {
    /// Contributes `scale` while the key is held.
    Key { key: KeyCode, scale: f32 },
    /// Horizontal mouse motion in pixels this frame.
    MouseX { scale: f32 },
    /// Vertical mouse motion in pixels this frame (down is positive).
    MouseY { scale: f32 },
    /// Gamepad stick or trigger value.
    Gamepad { axis: GamepadAxis, scale: f32 },
}

/// Physical inputs for each binding name.
#[derive(Resource, Debug, Clone, Deserialize)]
pub struct InputBindings {
    pub actions: HashMap<String, Vec<ButtonSource>>,
    pub axes: HashMap<String, Vec<AxisSource>>,
    /// Stick values below this magnitude read as zero.
    #[serde(default = "default_dead_zone")]
    pub gamepad_dead_zone: f32,
}

fn default_dead_zone() -> f32 {
    0.15
}

impl Default for InputBindings {
    fn default() -> Self {
        let actions = HashMap::from([
            (
                "Jump".to_string(),
                vec![
                    ButtonSource::Key(KeyCode::Space),
                    ButtonSource::Gamepad(GamepadButton::South),
                ],
            ),
            (
                "Aim".to_string(),
                vec![
                    ButtonSource::Mouse(MouseButton::Right),
                    ButtonSource::Gamepad(GamepadButton::LeftTrigger2),
                ],
            ),
            (
                "Sprint".to_string(),
                vec![
                    ButtonSource::Key(KeyCode::ShiftLeft),
                    ButtonSource::Gamepad(GamepadButton::LeftThumb),
                ],
            ),
            (
                "SwitchCamera".to_string(),
                vec![
                    ButtonSource::Key(KeyCode::KeyV),
                    ButtonSource::Gamepad(GamepadButton::North),
                ],
            ),
        ]);

        let axes = HashMap::from([
            (
                "Move Forward / Backward".to_string(),
                vec![
                    AxisSource::Key { key: KeyCode::KeyW, scale: 1.0 },
                    AxisSource::Key { key: KeyCode::KeyS, scale: -1.0 },
                    AxisSource::Gamepad { axis: GamepadAxis::LeftStickY, scale: 1.0 },
                ],
            ),
            (
                "Move Right / Left".to_string(),
                vec![
                    AxisSource::Key { key: KeyCode::KeyD, scale: 1.0 },
                    AxisSource::Key { key: KeyCode::KeyA, scale: -1.0 },
                    AxisSource::Gamepad { axis: GamepadAxis::LeftStickX, scale: 1.0 },
                ],
            ),
            (
                "Turn Right / Left Mouse".to_string(),
                vec![AxisSource::MouseX { scale: 0.15 }],
            ),
            (
                "Turn Right / Left Gamepad".to_string(),
                vec![AxisSource::Gamepad { axis: GamepadAxis::RightStickX, scale: 1.0 }],
            ),
            (
                "Look Up / Down Mouse".to_string(),
                vec![AxisSource::MouseY { scale: -0.15 }],
            ),
            (
                "Look Up / Down Gamepad".to_string(),
                vec![AxisSource::Gamepad { axis: GamepadAxis::RightStickY, scale: 1.0 }],
            ),
        ]);

        Self {
            actions,
            axes,
            gamepad_dead_zone: default_dead_zone(),
        }
    }
}

impl InputBindings {
    /// Load bindings and check every name against the registry.
    pub fn load(path: &str, registry: &BindingRegistry) -> Result<Self, ConfigError> {
        let bindings: Self = load_ron(path)?;
        bindings.validate(registry)?;
        Ok(bindings)
    }

    pub fn validate(&self, registry: &BindingRegistry) -> Result<(), ConfigError> {
        if let Some(name) = self.actions.keys().find(|name| !registry.has_action(name)) {
            return Err(ConfigError::InvalidBinding {
                kind: "action",
                name: name.clone(),
            });
        }
        if let Some(name) = self.axes.keys().find(|name| !registry.has_axis(name)) {
            return Err(ConfigError::InvalidBinding {
                kind: "axis",
                name: name.clone(),
            });
        }
        Ok(())
    }
}

/// System to register character bindings and load their device mapping.
pub fn load_input_bindings(mut commands: Commands) {
    let registry = BindingRegistry::for_character();

    let bindings = match InputBindings::load(INPUT_BINDINGS_PATH, &registry) {
        Ok(bindings) => {
            info!("Loaded input bindings from {}", INPUT_BINDINGS_PATH);
            bindings
        }
        Err(ConfigError::FileNotFound(_)) => {
            warn!("Could not find {}. Using default bindings.", INPUT_BINDINGS_PATH);
            InputBindings::default()
        }
        Err(e) => {
            error!("{}. Using default bindings.", e);
            InputBindings::default()
        }
    };

    commands.insert_resource(registry);
    commands.insert_resource(bindings);
}

/// Snapshot of device state for one frame.
pub struct DeviceState<'w> {
    pub keyboard: &'w ButtonInput<KeyCode>,
    pub mouse_buttons: &'w ButtonInput<MouseButton>,
    pub mouse_delta: Vec2,
    pub gamepads: Vec<&'w Gamepad>,
    pub dead_zone: f32,
}

impl DeviceState<'_> {
    fn button_edge(&self, source: ButtonSource, edge: InputEdge) -> bool {
        match (source, edge) {
            (ButtonSource::Key(key), InputEdge::Pressed) => self.keyboard.just_pressed(key),
            (ButtonSource::Key(key), InputEdge::Released) => self.keyboard.just_released(key),
            (ButtonSource::Mouse(button), InputEdge::Pressed) => self.mouse_buttons.just_pressed(button),
            (ButtonSource::Mouse(button), InputEdge::Released) => {
                self.mouse_buttons.just_released(button)
            }
            (ButtonSource::Gamepad(button), InputEdge::Pressed) => {
                self.gamepads.iter().any(|pad| pad.just_pressed(button))
            }
            (ButtonSource::Gamepad(button), InputEdge::Released) => {
                self.gamepads.iter().any(|pad| pad.just_released(button))
            }
        }
    }

    fn axis_value(&self, source: AxisSource) -> f32 {
        match source {
            AxisSource::Key { key, scale } => {
                if self.keyboard.pressed(key) {
                    scale
                } else {
                    0.0
                }
            }
            AxisSource::MouseX { scale } => self.mouse_delta.x * scale,
            AxisSource::MouseY { scale } => self.mouse_delta.y * scale,
            AxisSource::Gamepad { axis, scale } => self
                .gamepads
                .iter()
                .filter_map(|pad| pad.get(axis))
                .filter(|value| value.abs() >= self.dead_zone)
                .sum::<f32>()
                * scale,
        }
    }

    /// Actions whose bound buttons crossed their edge this frame.
    pub fn triggered_actions(
        &self,
        registry: &BindingRegistry,
        bindings: &InputBindings,
    ) -> Vec<CharacterAction> {
        registry
            .actions
            .iter()
            .filter(|(name, edge, _)| {
                bindings
                    .actions
                    .get(name)
                    .is_some_and(|sources| sources.iter().any(|s| self.button_edge(*s, *edge)))
            })
            .map(|(_, _, action)| *action)
            .collect()
    }

    /// Every registered axis with its summed value this frame.
    pub fn axis_values(
        &self,
        registry: &BindingRegistry,
        bindings: &InputBindings,
    ) -> Vec<(CharacterAxis, f32)> {
        registry
            .axes
            .iter()
            .map(|(name, axis)| {
                let value = bindings
                    .axes
                    .get(name)
                    .map(|sources| sources.iter().map(|s| self.axis_value(*s)).sum())
                    .unwrap_or(0.0);
                (*axis, value)
            })
            .collect()
    }
}

/// Read devices and drive the player's controller for this frame.
///
/// Actions fire once per button edge; every axis fires every frame,
/// including with a zero value.
#[allow(clippy::too_many_arguments)]
pub fn dispatch_player_input(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    gamepads: Query<&Gamepad>,
    registry: Res<BindingRegistry>,
    bindings: Res<InputBindings>,
    mut messages: ResMut<ScreenMessages>,
    mut player_query: Query<
        (
            &mut CharacterState,
            Option<&mut ControlRotation>,
            Option<&mut MovementIntent>,
            Option<&mut CharacterMovement>,
            Option<&mut SpringArm>,
        ),
        With<Player>,
    >,
    mut camera_query: Query<&mut ViewCamera, Without<Player>>,
) {
    let mouse_delta = mouse_motion.read().map(|event| event.delta).sum::<Vec2>();

    let Ok((mut state, mut control, mut intent, mut movement, mut boom)) =
        player_query.get_single_mut()
    else {
        return;
    };

    let devices = DeviceState {
        keyboard: &*keyboard,
        mouse_buttons: &*mouse_buttons,
        mouse_delta,
        gamepads: gamepads.iter().collect(),
        dead_zone: bindings.gamepad_dead_zone,
    };
    let actions = devices.triggered_actions(&registry, &bindings);
    let axes = devices.axis_values(&registry, &bindings);

    let mut third_person = None;
    let mut first_person = None;
    for camera in camera_query.iter_mut() {
        match camera.kind {
            CameraKind::ThirdPerson => third_person = Some(camera),
            CameraKind::FirstPerson => first_person = Some(camera),
        }
    }

    let mut controller = PlayerCharacterController::new(&mut *state, &mut *messages)
        .with_orientation(control.as_deref_mut().map(|c| c as &mut dyn OrientationSource))
        .with_movement_input(intent.as_deref_mut().map(|i| i as &mut dyn MovementInputSink))
        .with_movement(movement.as_deref_mut().map(|m| m as &mut dyn MovementTuning))
        .with_boom(boom.as_deref_mut().map(|b| b as &mut dyn BoomRig))
        .with_cameras(
            third_person.as_deref_mut().map(|c| c as &mut dyn CameraView),
            first_person.as_deref_mut().map(|c| c as &mut dyn CameraView),
        );

    for action in actions {
        controller.apply_action(action);
    }

    let elapsed = time.delta_secs();
    for (axis, value) in axes {
        controller.apply_axis(axis, value, elapsed);
    }
}

/// Release every held control when gameplay stops reading input.
///
/// Button releases during pause are never dispatched, so aim and sprint
/// are ended up front rather than left latched.
pub fn release_player_controls(
    mut messages: ResMut<ScreenMessages>,
    mut player_query: Query<
        (
            &mut CharacterState,
            Option<&mut CharacterMovement>,
            Option<&mut SpringArm>,
        ),
        With<Player>,
    >,
    mut camera_query: Query<&mut ViewCamera, Without<Player>>,
) {
    let Ok((mut state, mut movement, mut boom)) = player_query.get_single_mut() else {
        return;
    };

    let mut third_person = None;
    let mut first_person = None;
    for camera in camera_query.iter_mut() {
        match camera.kind {
            CameraKind::ThirdPerson => third_person = Some(camera),
            CameraKind::FirstPerson => first_person = Some(camera),
        }
    }

    PlayerCharacterController::new(&mut *state, &mut *messages)
        .with_movement(movement.as_deref_mut().map(|m| m as &mut dyn MovementTuning))
        .with_boom(boom.as_deref_mut().map(|b| b as &mut dyn BoomRig))
        .with_cameras(
            third_person.as_deref_mut().map(|c| c as &mut dyn CameraView),
            first_person.as_deref_mut().map(|c| c as &mut dyn CameraView),
        )
        .release_held_controls();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::parse_ron;

    #[test]
    fn default_bindings_cover_every_registered_name() {
        let registry = BindingRegistry::for_character();
        let bindings = InputBindings::default();
        bindings.validate(&registry).unwrap();

        for (name, _, _) in &registry.actions {
            assert!(bindings.actions.contains_key(name), "no buttons for {name}");
        }
        for (name, _) in &registry.axes {
            assert!(bindings.axes.contains_key(name), "no inputs for {name}");
        }
    }

    #[test]
    fn unknown_binding_name_is_rejected() {
        let registry = BindingRegistry::for_character();
        let mut bindings = InputBindings::default();
        bindings
            .actions
            .insert("Crouch".to_string(), vec![ButtonSource::Key(KeyCode::KeyC)]);

        let err = bindings.validate(&registry).unwrap_err();
        match err {
            ConfigError::InvalidBinding { kind, name } => {
                assert_eq!(kind, "action");
                assert_eq!(name, "Crouch");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shipped_bindings_parse_and_validate() {
        let contents = include_str!("../../assets/data/input/bindings.ron");
        let bindings: InputBindings = parse_ron(INPUT_BINDINGS_PATH, contents).unwrap();
        bindings.validate(&BindingRegistry::for_character()).unwrap();
        assert_eq!(
            bindings.actions["SwitchCamera"],
            vec![
                ButtonSource::Key(KeyCode::KeyV),
                ButtonSource::Gamepad(GamepadButton::North)
            ]
        );
    }

    fn devices<'w>(
        keyboard: &'w ButtonInput<KeyCode>,
        mouse_buttons: &'w ButtonInput<MouseButton>,
        mouse_delta: Vec2,
    ) -> DeviceState<'w> {
        DeviceState {
            keyboard,
            mouse_buttons,
            mouse_delta,
            gamepads: Vec::new(),
            dead_zone: 0.15,
        }
    }

    #[test]
    fn key_edges_trigger_pressed_and_released_actions() {
        let registry = BindingRegistry::for_character();
        let bindings = InputBindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        let mouse_buttons = ButtonInput::<MouseButton>::default();

        keyboard.press(KeyCode::ShiftLeft);
        assert_eq!(
            devices(&keyboard, &mouse_buttons, Vec2::ZERO).triggered_actions(&registry, &bindings),
            vec![CharacterAction::BeginSprint]
        );

        keyboard.clear();
        keyboard.release(KeyCode::ShiftLeft);
        assert_eq!(
            devices(&keyboard, &mouse_buttons, Vec2::ZERO).triggered_actions(&registry, &bindings),
            vec![CharacterAction::EndSprint]
        );
    }

    #[test]
    fn held_keys_do_not_retrigger() {
        let registry = BindingRegistry::for_character();
        let bindings = InputBindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        let mouse_buttons = ButtonInput::<MouseButton>::default();

        keyboard.press(KeyCode::KeyV);
        keyboard.clear();
        assert!(devices(&keyboard, &mouse_buttons, Vec2::ZERO)
            .triggered_actions(&registry, &bindings)
            .is_empty());
    }

    #[test]
    fn opposing_keys_cancel_and_mouse_scales() {
        let registry = BindingRegistry::for_character();
        let bindings = InputBindings::default();
        let mut keyboard = ButtonInput::<KeyCode>::default();
        let mouse_buttons = ButtonInput::<MouseButton>::default();
        keyboard.press(KeyCode::KeyW);
        keyboard.press(KeyCode::KeyS);
        keyboard.press(KeyCode::KeyD);

        let devices = devices(&keyboard, &mouse_buttons, Vec2::new(10.0, 20.0));
        let values: HashMap<CharacterAxis, f32> =
            devices.axis_values(&registry, &bindings).into_iter().collect();

        assert_eq!(values[&CharacterAxis::MoveForward], 0.0);
        assert_eq!(values[&CharacterAxis::MoveRight], 1.0);
        assert!((values[&CharacterAxis::AddYaw] - 1.5).abs() < 1e-5);
        assert!((values[&CharacterAxis::AddPitch] + 3.0).abs() < 1e-5);
        assert_eq!(values[&CharacterAxis::TurnYawAtRate], 0.0);
        assert_eq!(values.len(), 6);
    }
}
