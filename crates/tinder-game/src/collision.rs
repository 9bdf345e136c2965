//! Per-frame overlap queries
//!
//! Both variants use [`Rect::overlaps`] (half-open AABB). Queries only
//! report contacts; the simulations decide what a contact does.

use crate::runner::{EntityKind, RunnerEntity};
use hecs::{Entity, World};
use tinder_core::Rect;

/// Contacts found for the platformer player this frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlatformerContacts {
    pub hit_enemy: bool,
    pub reached_goal: bool,
}

/// Test the player against every enemy and the goal
pub fn platformer_contacts<I>(player: &Rect, enemies: I, goal: &Rect) -> PlatformerContacts
where
    I: IntoIterator<Item = Rect>,
{
    PlatformerContacts {
        hit_enemy: enemies.into_iter().any(|e| player.overlaps(&e)),
        reached_goal: player.overlaps(goal),
    }
}

/// Runner entities overlapping the player, in arena iteration order.
///
/// `rect_of` maps an entity to its current screen rectangle.
pub fn runner_contacts<F>(world: &World, player: &Rect, rect_of: F) -> Vec<(Entity, EntityKind)>
where
    F: Fn(&RunnerEntity) -> Rect,
{
    world
        .query::<&RunnerEntity>()
        .iter()
        .filter(|(_, e)| player.overlaps(&rect_of(e)))
        .map(|(id, e)| (id, e.kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_contact() {
        let player = Rect::new(100.0, 100.0, 28.0, 48.0);
        let goal = Rect::new(5000.0, 100.0, 40.0, 64.0);
        let enemies = vec![
            Rect::new(300.0, 120.0, 28.0, 28.0),
            Rect::new(120.0, 120.0, 28.0, 28.0),
        ];
        let c = platformer_contacts(&player, enemies, &goal);
        assert!(c.hit_enemy);
        assert!(!c.reached_goal);
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let player = Rect::new(100.0, 100.0, 28.0, 48.0);
        let goal = Rect::new(128.0, 100.0, 40.0, 64.0);
        let c = platformer_contacts(&player, vec![Rect::new(72.0, 100.0, 28.0, 28.0)], &goal);
        assert_eq!(c, PlatformerContacts::default());
    }

    #[test]
    fn test_runner_contacts_by_kind() {
        let mut world = World::new();
        let coin = world.spawn((RunnerEntity {
            kind: EntityKind::Coin,
            lane: 1,
            spawned_at: 0.0,
            duration: 3.0,
            size: 26.0,
        },));
        world.spawn((RunnerEntity {
            kind: EntityKind::Obstacle,
            lane: 0,
            spawned_at: 0.0,
            duration: 3.0,
            size: 40.0,
        },));

        let player = Rect::new(0.0, 100.0, 40.0, 40.0);
        let hits = runner_contacts(&world, &player, |e| {
            Rect::new(10.0, 100.0 * e.lane as f32, e.size, e.size)
        });
        assert_eq!(hits, vec![(coin, EntityKind::Coin)]);
    }
}
