//! Player character controller - aim, sprint and camera-mode transitions.
//!
//! The controller is a short-lived view over the player's `CharacterState`
//! and whichever collaborators are present this frame. Every collaborator
//! is optional: when one is missing, the mutations that target it are
//! skipped and nothing is reported.

use bevy::prelude::*;

use super::collaborators::*;
use super::components::CharacterState;

/// Boom length while aiming down sights.
pub const AIM_ARM_LENGTH: f32 = 50.0;
/// Boom length restored when aiming ends.
pub const REST_ARM_LENGTH: f32 = 300.0;
/// Over-the-shoulder boom offset while aiming (forward, right, up).
pub const AIM_TARGET_OFFSET: Vec3 = Vec3::new(0.0, 30.0, 70.0);
pub const DEFAULT_FIELD_OF_VIEW: f32 = 90.0;
pub const SPRINT_FIELD_OF_VIEW: f32 = 100.0;
/// How long the camera-mode announcement stays on screen.
pub const CAMERA_MODE_MESSAGE_SECS: f32 = 15.0;
pub const CAMERA_MODE_MESSAGE_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);

/// Drives the character's state and collaborators from input.
pub struct PlayerCharacterController<'a> {
    state: &'a mut CharacterState,
    notifications: &'a mut dyn NotificationSink,
    orientation: Option<&'a mut dyn OrientationSource>,
    movement_input: Option<&'a mut dyn MovementInputSink>,
    movement: Option<&'a mut dyn MovementTuning>,
    boom: Option<&'a mut dyn BoomRig>,
    third_person_camera: Option<&'a mut dyn CameraView>,
    first_person_camera: Option<&'a mut dyn CameraView>,
}

impl<'a> PlayerCharacterController<'a> {
    pub fn new(state: &'a mut CharacterState, notifications: &'a mut dyn NotificationSink) -> Self {
        Self {
            state,
            notifications,
            orientation: None,
            movement_input: None,
            movement: None,
            boom: None,
            third_person_camera: None,
            first_person_camera: None,
        }
    }

    pub fn with_orientation(mut self, orientation: Option<&'a mut dyn OrientationSource>) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_movement_input(mut self, sink: Option<&'a mut dyn MovementInputSink>) -> Self {
        self.movement_input = sink;
        self
    }

    pub fn with_movement(mut self, movement: Option<&'a mut dyn MovementTuning>) -> Self {
        self.movement = movement;
        self
    }

    pub fn with_boom(mut self, boom: Option<&'a mut dyn BoomRig>) -> Self {
        self.boom = boom;
        self
    }

    pub fn with_cameras(
        mut self,
        third_person: Option<&'a mut dyn CameraView>,
        first_person: Option<&'a mut dyn CameraView>,
    ) -> Self {
        self.third_person_camera = third_person;
        self.first_person_camera = first_person;
        self
    }

    pub fn state(&self) -> &CharacterState {
        self.state
    }

    /// Register the character's named actions and axes.
    pub fn setup_input(binder: &mut dyn InputBinder) {
        binder.bind_action("Jump", InputEdge::Pressed, CharacterAction::Jump);
        binder.bind_action("Jump", InputEdge::Released, CharacterAction::StopJumping);

        binder.bind_axis("Move Forward / Backward", CharacterAxis::MoveForward);
        binder.bind_axis("Move Right / Left", CharacterAxis::MoveRight);

        // Mouse axes report absolute deltas, gamepad axes report a rate
        binder.bind_axis("Turn Right / Left Mouse", CharacterAxis::AddYaw);
        binder.bind_axis("Turn Right / Left Gamepad", CharacterAxis::TurnYawAtRate);
        binder.bind_axis("Look Up / Down Mouse", CharacterAxis::AddPitch);
        binder.bind_axis("Look Up / Down Gamepad", CharacterAxis::TurnPitchAtRate);

        binder.bind_action("Aim", InputEdge::Pressed, CharacterAction::BeginAim);
        binder.bind_action("Aim", InputEdge::Released, CharacterAction::EndAim);

        binder.bind_action("Sprint", InputEdge::Pressed, CharacterAction::BeginSprint);
        binder.bind_action("Sprint", InputEdge::Released, CharacterAction::EndSprint);

        binder.bind_action("SwitchCamera", InputEdge::Pressed, CharacterAction::ToggleCameraMode);
    }

    pub fn apply_action(&mut self, action: CharacterAction) {
        match action {
            CharacterAction::Jump => self.jump(),
            CharacterAction::StopJumping => self.stop_jumping(),
            CharacterAction::BeginAim => self.begin_aim(),
            CharacterAction::EndAim => self.end_aim(),
            CharacterAction::BeginSprint => self.begin_sprint(),
            CharacterAction::EndSprint => self.end_sprint(),
            CharacterAction::ToggleCameraMode => self.toggle_camera_mode(),
        }
    }

    pub fn apply_axis(&mut self, axis: CharacterAxis, value: f32, elapsed_seconds: f32) {
        match axis {
            CharacterAxis::MoveForward => self.move_forward(value),
            CharacterAxis::MoveRight => self.move_right(value),
            CharacterAxis::AddYaw => self.add_yaw_input(value),
            CharacterAxis::TurnYawAtRate => self.turn_yaw(value, elapsed_seconds),
            CharacterAxis::AddPitch => self.add_pitch_input(value),
            CharacterAxis::TurnPitchAtRate => self.turn_pitch(value, elapsed_seconds),
        }
    }

    pub fn add_yaw_input(&mut self, degrees: f32) {
        if let Some(orientation) = self.orientation.as_deref_mut() {
            orientation.add_yaw_input(degrees);
        }
    }

    pub fn add_pitch_input(&mut self, degrees: f32) {
        if let Some(orientation) = self.orientation.as_deref_mut() {
            orientation.add_pitch_input(degrees);
        }
    }

    /// Turn at a normalized rate, 1.0 being the full turn rate.
    pub fn turn_yaw(&mut self, rate: f32, elapsed_seconds: f32) {
        let delta = rate * self.state.turn_rate_deg_per_sec * elapsed_seconds;
        self.add_yaw_input(delta);
    }

    /// Look up/down at a normalized rate, 1.0 being the full turn rate.
    pub fn turn_pitch(&mut self, rate: f32, elapsed_seconds: f32) {
        let delta = rate * self.state.turn_rate_deg_per_sec * elapsed_seconds;
        self.add_pitch_input(delta);
    }

    pub fn move_forward(&mut self, value: f32) {
        if let Some(direction) = self.planar_direction(value, Rotator::forward) {
            self.add_movement(direction, value);
        }
    }

    pub fn move_right(&mut self, value: f32) {
        if let Some(direction) = self.planar_direction(value, Rotator::right) {
            self.add_movement(direction, value);
        }
    }

    /// Direction from control yaw alone, so camera pitch never tilts movement.
    fn planar_direction(&self, value: f32, axis: fn(&Rotator) -> Vec3) -> Option<Vec3> {
        if value == 0.0 {
            return None;
        }
        let orientation = self.orientation.as_deref()?;
        Some(axis(&orientation.control_rotation().yaw_only()))
    }

    fn add_movement(&mut self, direction: Vec3, value: f32) {
        if let Some(sink) = self.movement_input.as_deref_mut() {
            sink.add_movement_input(direction, value);
        }
    }

    pub fn jump(&mut self) {
        if let Some(movement) = self.movement.as_deref_mut() {
            movement.set_jump_pressed(true);
        }
    }

    pub fn stop_jumping(&mut self) {
        if let Some(movement) = self.movement.as_deref_mut() {
            movement.set_jump_pressed(false);
        }
    }

    pub fn begin_aim(&mut self) {
        if let Some(boom) = self.boom.as_deref_mut() {
            boom.set_arm_length(AIM_ARM_LENGTH);
            boom.set_target_offset(AIM_TARGET_OFFSET);
        }
        if let Some(camera) = self.third_person_camera.as_deref_mut() {
            camera.set_use_pawn_control_rotation(true);
        }
        if let Some(movement) = self.movement.as_deref_mut() {
            movement.set_max_walk_speed(self.state.sneak_movement_speed);
        }
        if self.state.is_third_person {
            self.set_body_follows_controller(true);
        }

        self.state.is_aiming = true;
    }

    pub fn end_aim(&mut self) {
        if let Some(boom) = self.boom.as_deref_mut() {
            boom.set_arm_length(REST_ARM_LENGTH);
            boom.set_target_offset(Vec3::ZERO);
        }
        if let Some(camera) = self.third_person_camera.as_deref_mut() {
            camera.set_use_pawn_control_rotation(false);
        }
        if let Some(movement) = self.movement.as_deref_mut() {
            movement.set_max_walk_speed(self.state.base_movement_speed);
        }
        if self.state.is_third_person {
            self.set_body_follows_controller(false);
        }

        self.state.is_aiming = false;
    }

    /// Aiming overrides sprint, so this does nothing while aiming.
    pub fn begin_sprint(&mut self) {
        if self.state.is_aiming {
            return;
        }
        if let Some(movement) = self.movement.as_deref_mut() {
            movement.set_max_walk_speed(self.state.sprint_movement_speed);
        }
        if let Some(camera) = self.active_camera() {
            camera.set_field_of_view(SPRINT_FIELD_OF_VIEW);
        }
    }

    pub fn end_sprint(&mut self) {
        if self.state.is_aiming {
            return;
        }
        if let Some(movement) = self.movement.as_deref_mut() {
            movement.set_max_walk_speed(self.state.base_movement_speed);
        }
        // The widened camera may no longer be the active one
        for camera in [
            self.third_person_camera.as_deref_mut(),
            self.first_person_camera.as_deref_mut(),
        ]
        .into_iter()
        .flatten()
        {
            camera.set_field_of_view(DEFAULT_FIELD_OF_VIEW);
        }
    }

    /// Let go of every held control, as if each button had been released.
    pub fn release_held_controls(&mut self) {
        self.stop_jumping();
        if self.state.is_aiming {
            self.end_aim();
        }
        self.end_sprint();
    }

    pub fn toggle_camera_mode(&mut self) {
        let third_person = !self.state.is_third_person;
        self.state.is_third_person = third_person;

        if let Some(camera) = self.third_person_camera.as_deref_mut() {
            camera.set_active(third_person);
        }
        if let Some(camera) = self.first_person_camera.as_deref_mut() {
            camera.set_active(!third_person);
        }
        if let Some(movement) = self.movement.as_deref_mut() {
            movement.set_use_controller_desired_rotation(!third_person);
            movement.set_orient_rotation_to_movement(third_person);
        }

        let message = if third_person { "Third Person" } else { "First Person" };
        debug!("Camera mode switched to {}", message);
        self.notifications
            .notify(message, CAMERA_MODE_MESSAGE_SECS, CAMERA_MODE_MESSAGE_COLOR);
    }

    fn active_camera(&mut self) -> Option<&mut (dyn CameraView + 'a)> {
        if self.state.is_third_person {
            self.third_person_camera.as_deref_mut()
        } else {
            self.first_person_camera.as_deref_mut()
        }
    }

    fn set_body_follows_controller(&mut self, follow: bool) {
        self.state.use_controller_rotation_yaw = follow;
        if let Some(movement) = self.movement.as_deref_mut() {
            movement.set_use_controller_desired_rotation(follow);
            movement.set_orient_rotation_to_movement(!follow);
        }
    }
}
