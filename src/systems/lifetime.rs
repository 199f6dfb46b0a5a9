use bevy_ecs::{
    component::Component,
    entity::Entity,
    query::With,
    system::{Commands, Query},
};
use tracing::trace;

use crate::systems::components::EntityKind;

/// Marker for entities that should be despawned at the end of the current tick.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Remove;

/// Despawns every entity flagged with [`Remove`].
pub fn removal_system(mut commands: Commands, query: Query<(Entity, &EntityKind), With<Remove>>) {
    for (entity, kind) in query.iter() {
        trace!(entity = ?entity, kind = kind.as_ref(), "Despawning");
        commands.entity(entity).despawn();
    }
}
