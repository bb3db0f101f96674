//! On-screen messages - the notification sink the character reports to.

use bevy::prelude::*;

use crate::player::collaborators::NotificationSink;

/// A message waiting to expire.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenMessage {
    pub text: String,
    pub remaining_secs: f32,
    pub color: Color,
}

/// Messages currently shown, newest first.
#[derive(Resource, Debug, Default)]
pub struct ScreenMessages {
    entries: Vec<ScreenMessage>,
}

impl ScreenMessages {
    pub fn entries(&self) -> &[ScreenMessage] {
        &self.entries
    }

    /// Count down lifetimes and drop expired messages.
    pub fn tick(&mut self, delta_secs: f32) {
        for entry in &mut self.entries {
            entry.remaining_secs -= delta_secs;
        }
        self.entries.retain(|entry| entry.remaining_secs > 0.0);
    }
}

impl NotificationSink for ScreenMessages {
    fn notify(&mut self, message: &str, duration_secs: f32, color: Color) {
        info!("{}", message);
        self.entries.insert(
            0,
            ScreenMessage {
                text: message.to_string(),
                remaining_secs: duration_secs,
                color,
            },
        );
    }
}

/// Marker for the message list container.
#[derive(Component)]
pub struct MessageList;

/// Setup message systems.
pub fn setup_message_systems(app: &mut App) {
    app.init_resource::<ScreenMessages>()
        .add_systems(Startup, spawn_message_list)
        .add_systems(Update, (expire_messages, render_messages).chain());
}

/// Spawn the message list (top-left corner).
fn spawn_message_list(mut commands: Commands) {
    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            flex_direction: FlexDirection::Column,
            ..default()
        },
        MessageList,
    ));
}

fn expire_messages(time: Res<Time>, mut messages: ResMut<ScreenMessages>) {
    if messages.entries().is_empty() {
        return;
    }
    messages.tick(time.delta_secs());
}

/// Rebuild the list whenever the messages change.
fn render_messages(
    mut commands: Commands,
    messages: Res<ScreenMessages>,
    list_query: Query<Entity, With<MessageList>>,
) {
    if !messages.is_changed() {
        return;
    }
    let Ok(list) = list_query.get_single() else {
        return;
    };

    commands.entity(list).despawn_descendants();
    commands.entity(list).with_children(|parent| {
        for entry in messages.entries() {
            parent.spawn((
                Text::new(entry.text.clone()),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(entry.color),
            ));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_message_first() {
        let mut messages = ScreenMessages::default();
        messages.notify("First Person", 15.0, Color::WHITE);
        messages.notify("Third Person", 15.0, Color::WHITE);
        assert_eq!(messages.entries()[0].text, "Third Person");
        assert_eq!(messages.entries()[1].text, "First Person");
    }

    #[test]
    fn messages_expire_after_duration() {
        let mut messages = ScreenMessages::default();
        messages.notify("short", 1.0, Color::WHITE);
        messages.notify("long", 15.0, Color::WHITE);

        messages.tick(0.5);
        assert_eq!(messages.entries().len(), 2);

        messages.tick(0.6);
        assert_eq!(messages.entries().len(), 1);
        assert_eq!(messages.entries()[0].text, "long");
        assert!((messages.entries()[0].remaining_secs - 13.9).abs() < 1e-4);
    }
}
