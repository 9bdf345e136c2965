//! Lane runner: switch lanes to dodge obstacles and collect coins while the
//! world speeds up.
//!
//! Entities live in a `hecs::World` arena. Their screen position is not
//! stored; it is derived from spawn time, traversal duration and the current
//! viewport, so a resize never strands an entity off its lane.

mod spawner;

pub use spawner::Spawner;

use crate::collision::runner_contacts;
use crate::config::RunnerConfig;
use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tinder_core::{Rect, Viewport};
use tinder_runtime::{
    Action, EventBus, FrameContext, GameEvent, HudSnapshot, Outcome, Simulation,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Obstacle,
    Coin,
}

/// A spawned obstacle or coin crossing the screen right to left
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunnerEntity {
    pub kind: EntityKind,
    pub lane: usize,
    /// Simulation time of the spawn
    pub spawned_at: f64,
    /// Seconds to cross from the right edge to fully off the left edge
    pub duration: f64,
    pub size: f32,
}

impl RunnerEntity {
    /// Fraction of the traversal completed at `now`, in `[0, 1]`
    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.spawned_at) / self.duration).clamp(0.0, 1.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunnerPlayer {
    pub lane: usize,
    pub lives: u32,
    pub coins: u32,
    /// Hits are ignored while `now < invulnerable_until`
    pub invulnerable_until: f64,
}

impl RunnerPlayer {
    pub fn is_invulnerable(&self, now: f64) -> bool {
        now < self.invulnerable_until
    }
}

/// Screen geometry of the lane set for one viewport
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaneLayout {
    pub lanes: usize,
    pub lane_height: f32,
    pub floor_y: f32,
    pub width: f32,
}

impl LaneLayout {
    /// Top edge of lane `i`; lane 0 is the highest, the last lane sits on the floor
    pub fn lane_top(&self, lane: usize) -> f32 {
        self.floor_y - (self.lanes - lane) as f32 * self.lane_height
    }

    /// Top y that vertically centers a square of `size` in `lane`
    pub fn centered_y(&self, lane: usize, size: f32) -> f32 {
        self.lane_top(lane) + (self.lane_height - size) / 2.0
    }

    /// Current rectangle of an entity, sliding from `width` to `-size`
    pub fn entity_rect(&self, entity: &RunnerEntity, now: f64) -> Rect {
        let travel = self.width + entity.size;
        let x = self.width - entity.progress(now) as f32 * travel;
        Rect::new(
            x,
            self.centered_y(entity.lane, entity.size),
            entity.size,
            entity.size,
        )
    }
}

pub struct Runner {
    config: RunnerConfig,
    viewport: Viewport,
    pub player: RunnerPlayer,
    world: World,
    obstacles: Spawner,
    coins: Spawner,
    rng: ChaCha8Rng,
    /// Distance travelled, drives the background parallax
    world_x: f32,
    /// Simulation time of the last update
    time: f64,
    speed_scale: f64,
    /// First terminal result of the round; later collisions are ignored
    outcome: Option<Outcome>,
}

impl Runner {
    pub fn new(mut config: RunnerConfig) -> Self {
        config.lanes = config.lanes.max(1);
        let mut runner = Self {
            player: RunnerPlayer {
                lane: config.lanes / 2,
                lives: config.lives,
                coins: 0,
                invulnerable_until: 0.0,
            },
            world: World::new(),
            obstacles: Spawner::new(EntityKind::Obstacle, config.obstacle_delay),
            coins: Spawner::new(EntityKind::Coin, config.coin_delay),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            viewport: Viewport::default(),
            world_x: 0.0,
            time: 0.0,
            speed_scale: 1.0,
            outcome: None,
            config,
        };
        runner.reset();
        runner
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_x(&self) -> f32 {
        self.world_x
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn speed_scale(&self) -> f64 {
        self.speed_scale
    }

    /// Simulation times of the next obstacle and coin spawns
    pub fn next_spawns(&self) -> (f64, f64) {
        (self.obstacles.next_at(), self.coins.next_at())
    }

    pub fn entity_count(&self) -> usize {
        self.world.len() as usize
    }

    pub fn layout(&self) -> LaneLayout {
        LaneLayout {
            lanes: self.config.lanes,
            lane_height: self.config.lane_height,
            floor_y: self.viewport.floor_y(),
            width: self.viewport.width,
        }
    }

    /// Screen-fixed player rectangle in its current lane
    pub fn player_rect(&self) -> Rect {
        let size = self.config.player_size;
        Rect::new(
            self.viewport.width * self.config.player_x_fraction,
            self.layout().centered_y(self.player.lane, size),
            size,
            size,
        )
    }

    /// Live entities with their current rectangles
    pub fn entities(&self) -> Vec<(Entity, RunnerEntity, Rect)> {
        let layout = self.layout();
        let now = self.time;
        self.world
            .query::<&RunnerEntity>()
            .iter()
            .map(|(id, e)| (id, *e, layout.entity_rect(e, now)))
            .collect()
    }

    /// Spawn an entity at the right edge of `lane` at time `now`
    pub fn spawn_entity(&mut self, kind: EntityKind, lane: usize, now: f64) -> Entity {
        let size = match kind {
            EntityKind::Obstacle => self.config.obstacle_size,
            EntityKind::Coin => self.config.coin_size,
        };
        let entity = RunnerEntity {
            kind,
            lane: lane.min(self.config.lanes - 1),
            spawned_at: now,
            duration: self.config.traversal_secs / self.speed_scale,
            size,
        };
        let id = self.world.spawn((entity,));
        tracing::debug!("spawned {:?} in lane {} ({:?})", kind, entity.lane, id);
        id
    }

    /// Spawn an entity whose left edge is at screen `x` right now
    pub fn place_entity(&mut self, kind: EntityKind, lane: usize, x: f32) -> Entity {
        let id = self.spawn_entity(kind, lane, self.time);
        let width = self.viewport.width;
        if let Ok(mut e) = self.world.get::<&mut RunnerEntity>(id) {
            let travel = (width + e.size) as f64;
            let progress = ((width - x) as f64 / travel).clamp(0.0, 1.0);
            e.spawned_at = self.time - progress * e.duration;
        }
        id
    }

    /// Remove a coin and score it. Returns false if `entity` is not a live coin.
    pub fn collect_coin(&mut self, entity: Entity, events: &mut EventBus) -> bool {
        if !self.is_kind(entity, EntityKind::Coin) || self.world.despawn(entity).is_err() {
            return false;
        }
        self.player.coins += 1;
        events.push(GameEvent::CoinCollected {
            total: self.player.coins,
        });
        if self.player.coins >= self.config.coins_to_win && self.outcome.is_none() {
            self.outcome = Some(Outcome::Won);
        }
        true
    }

    /// Apply an obstacle hit at `now`.
    ///
    /// While invulnerable the hit is ignored and the obstacle stays.
    /// Returns whether a life was lost.
    pub fn hit_obstacle(&mut self, entity: Entity, now: f64, events: &mut EventBus) -> bool {
        if self.player.is_invulnerable(now) || !self.is_kind(entity, EntityKind::Obstacle) {
            return false;
        }
        if self.world.despawn(entity).is_err() {
            return false;
        }
        self.player.lives = self.player.lives.saturating_sub(1);
        self.player.invulnerable_until = now + self.config.invulnerable_secs;
        events.push(GameEvent::PlayerHit {
            lives_left: self.player.lives,
        });
        tracing::debug!("hit, {} lives left", self.player.lives);
        if self.player.lives == 0 && self.outcome.is_none() {
            self.outcome = Some(Outcome::Lost);
        }
        true
    }

    fn is_kind(&self, entity: Entity, kind: EntityKind) -> bool {
        self.world
            .get::<&RunnerEntity>(entity)
            .map(|e| e.kind == kind)
            .unwrap_or(false)
    }

    fn change_lane(&mut self, ctx: &mut FrameContext<'_>) {
        let lane = self.player.lane;
        let mut next = lane;
        if ctx.input.is_action_just_pressed(Action::LaneUp) {
            next = next.saturating_sub(1);
        }
        if ctx.input.is_action_just_pressed(Action::LaneDown) {
            next = (next + 1).min(self.config.lanes - 1);
        }
        if next != lane {
            self.player.lane = next;
            ctx.events.push(GameEvent::LaneChanged { lane: next });
        }
    }

    fn run_spawners(&mut self, now: f64) {
        let lanes = self.config.lanes;
        if self.obstacles.poll(now, self.speed_scale, &mut self.rng) {
            let lane = self.rng.random_range(0..lanes);
            self.spawn_entity(EntityKind::Obstacle, lane, now);
        }
        if self.coins.poll(now, self.speed_scale, &mut self.rng) {
            let lane = self.rng.random_range(0..lanes);
            self.spawn_entity(EntityKind::Coin, lane, now);
        }
    }

    fn despawn_finished(&mut self, now: f64) {
        let finished: Vec<Entity> = self
            .world
            .query::<&RunnerEntity>()
            .iter()
            .filter(|(_, e)| e.progress(now) >= 1.0)
            .map(|(id, _)| id)
            .collect();
        for id in finished {
            let _ = self.world.despawn(id);
            tracing::debug!("despawned {:?} off-screen", id);
        }
    }

    fn resolve_collisions(&mut self, now: f64, events: &mut EventBus) {
        let layout = self.layout();
        let hits = runner_contacts(&self.world, &self.player_rect(), |e| {
            layout.entity_rect(e, now)
        });
        for (id, kind) in hits {
            if self.outcome.is_some() {
                break;
            }
            match kind {
                EntityKind::Coin => {
                    self.collect_coin(id, events);
                }
                EntityKind::Obstacle => {
                    self.hit_obstacle(id, now, events);
                }
            }
        }
    }
}

impl Simulation for Runner {
    fn name(&self) -> &str {
        "runner"
    }

    fn reset(&mut self) {
        self.world.clear();
        self.player = RunnerPlayer {
            lane: self.config.lanes / 2,
            lives: self.config.lives,
            coins: 0,
            invulnerable_until: 0.0,
        };
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.obstacles.reset(0.0, &mut self.rng);
        self.coins.reset(0.0, &mut self.rng);
        self.world_x = 0.0;
        self.time = 0.0;
        self.speed_scale = 1.0;
        self.outcome = None;
    }

    fn resize(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        let now = ctx.time;
        self.time = now;
        self.speed_scale = (1.0 + self.config.speed_ramp * now).min(self.config.max_speed_scale);
        self.world_x += self.config.scroll_speed * self.speed_scale as f32 * ctx.dt;

        self.change_lane(ctx);
        self.run_spawners(now);
        self.despawn_finished(now);
        self.resolve_collisions(now, ctx.events);
    }

    fn terminal(&self) -> Option<Outcome> {
        self.outcome
    }

    fn hud(&self, elapsed: f64) -> HudSnapshot {
        HudSnapshot {
            clock: tinder_core::format_clock(elapsed),
            progress: None,
            lives: Some(self.player.lives),
            coins: Some(self.player.coins),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinder_runtime::InputState;
    use winit::keyboard::KeyCode;

    /// Spawning pushed far enough out that nothing appears during a test
    fn quiet_config() -> RunnerConfig {
        RunnerConfig {
            obstacle_delay: [1.0e6, 1.0e6],
            coin_delay: [1.0e6, 1.0e6],
            ..Default::default()
        }
    }

    fn frame(r: &mut Runner, input: &InputState, time: f64, dt: f32) -> Vec<GameEvent> {
        let mut events = EventBus::new();
        let mut ctx = FrameContext {
            dt,
            time,
            input,
            events: &mut events,
        };
        r.update(&mut ctx);
        events.drain()
    }

    #[test]
    fn test_initial_state() {
        let r = Runner::new(RunnerConfig::default());
        assert_eq!(r.player.lane, 1);
        assert_eq!(r.player.lives, 3);
        assert_eq!(r.player.coins, 0);
        assert_eq!(r.entity_count(), 0);
        assert_eq!(r.terminal(), None);
    }

    #[test]
    fn test_lane_geometry() {
        let r = Runner::new(RunnerConfig::default());
        let layout = r.layout();
        let floor_y = r.viewport().floor_y();
        assert_eq!(layout.lane_top(2), floor_y - 72.0);
        assert_eq!(layout.lane_top(0), floor_y - 216.0);
        let p = r.player_rect();
        assert_eq!(p.x, 1280.0 * 0.18);
        assert_eq!(p.y, layout.lane_top(1) + 16.0);
    }

    #[test]
    fn test_lane_change_is_clamped() {
        let mut r = Runner::new(quiet_config());
        let mut input = InputState::new();

        input.process_key_down(KeyCode::ArrowDown);
        input.begin_frame();
        let events = frame(&mut r, &input, 0.016, 0.016);
        assert_eq!(r.player.lane, 2);
        assert!(events.contains(&GameEvent::LaneChanged { lane: 2 }));

        input.process_key_up(KeyCode::ArrowDown);
        input.begin_frame();
        input.process_key_down(KeyCode::ArrowDown);
        input.begin_frame();
        let events = frame(&mut r, &input, 0.032, 0.016);
        assert_eq!(r.player.lane, 2);
        assert!(events.is_empty());

        input.process_key_up(KeyCode::ArrowDown);
        input.process_key_down(KeyCode::ArrowUp);
        input.begin_frame();
        frame(&mut r, &input, 0.048, 0.016);
        assert_eq!(r.player.lane, 1);
    }

    #[test]
    fn test_entity_slides_left_and_despawns() {
        let mut r = Runner::new(quiet_config());
        let id = r.spawn_entity(EntityKind::Obstacle, 0, 0.0);
        let layout = r.layout();
        let e = *r.world().get::<&RunnerEntity>(id).unwrap();
        assert_eq!(layout.entity_rect(&e, 0.0).x, 1280.0);
        assert_eq!(layout.entity_rect(&e, 3.0).x, -40.0);

        let input = InputState::new();
        frame(&mut r, &input, 2.9, 0.016);
        assert_eq!(r.entity_count(), 1);
        frame(&mut r, &input, 3.0, 0.016);
        assert_eq!(r.entity_count(), 0);
    }

    #[test]
    fn test_speed_ramp_caps() {
        let mut r = Runner::new(quiet_config());
        let input = InputState::new();
        frame(&mut r, &input, 20.0, 0.05);
        assert!((r.speed_scale() - 1.3).abs() < 1e-9);
        frame(&mut r, &input, 500.0, 0.05);
        assert_eq!(r.speed_scale(), 2.5);

        // Faster runs produce shorter traversals
        let id = r.spawn_entity(EntityKind::Coin, 0, 500.0);
        let e = *r.world().get::<&RunnerEntity>(id).unwrap();
        assert!((e.duration - 1.2).abs() < 1e-9);
    }

    #[test]
    fn test_world_scrolls() {
        let mut r = Runner::new(quiet_config());
        let input = InputState::new();
        frame(&mut r, &input, 0.05, 0.05);
        assert!((r.world_x() - 240.0 * 0.05 * 1.00075).abs() < 1e-3);
    }

    #[test]
    fn test_coin_collection() {
        let mut r = Runner::new(quiet_config());
        let player_x = r.player_rect().x;
        let coin = r.place_entity(EntityKind::Coin, 1, player_x);
        let input = InputState::new();
        let events = frame(&mut r, &input, 0.016, 0.016);
        assert_eq!(r.player.coins, 1);
        assert!(events.contains(&GameEvent::CoinCollected { total: 1 }));
        assert!(!r.world().contains(coin));
    }

    #[test]
    fn test_other_lane_is_missed() {
        let mut r = Runner::new(quiet_config());
        let player_x = r.player_rect().x;
        r.place_entity(EntityKind::Obstacle, 0, player_x);
        let input = InputState::new();
        frame(&mut r, &input, 0.016, 0.016);
        assert_eq!(r.player.lives, 3);
        assert_eq!(r.entity_count(), 1);
    }

    #[test]
    fn test_invulnerable_obstacle_passes_through() {
        let mut r = Runner::new(quiet_config());
        let mut events = EventBus::new();
        let a = r.spawn_entity(EntityKind::Obstacle, 1, 0.0);
        let b = r.spawn_entity(EntityKind::Obstacle, 1, 0.0);

        assert!(r.hit_obstacle(a, 5.0, &mut events));
        assert_eq!(r.player.lives, 2);
        assert!(!r.hit_obstacle(b, 5.5, &mut events));
        assert_eq!(r.player.lives, 2);
        assert!(r.world().contains(b));

        assert!(r.hit_obstacle(b, 6.5, &mut events));
        assert_eq!(r.player.lives, 1);
    }

    #[test]
    fn test_wrong_kind_is_rejected() {
        let mut r = Runner::new(quiet_config());
        let mut events = EventBus::new();
        let coin = r.spawn_entity(EntityKind::Coin, 1, 0.0);
        assert!(!r.hit_obstacle(coin, 1.0, &mut events));
        let obstacle = r.spawn_entity(EntityKind::Obstacle, 1, 0.0);
        assert!(!r.collect_coin(obstacle, &mut events));
        assert!(events.is_empty());
    }

    #[test]
    fn test_spawners_populate_lanes() {
        let mut r = Runner::new(RunnerConfig::default());
        let input = InputState::new();
        let mut t = 0.0;
        for _ in 0..200 {
            t += 0.016;
            frame(&mut r, &input, t, 0.016);
        }
        assert!(r.entity_count() > 0);
        assert!(r
            .entities()
            .iter()
            .all(|(_, e, _)| e.lane < r.config().lanes));
    }

    #[test]
    fn test_reset_reseeds() {
        let mut r = Runner::new(RunnerConfig::default());
        let first = r.next_spawns();
        let input = InputState::new();
        let mut t = 0.0;
        for _ in 0..300 {
            t += 0.016;
            frame(&mut r, &input, t, 0.016);
        }
        r.reset();
        assert_eq!(r.next_spawns(), first);
        assert_eq!(r.entity_count(), 0);
        assert_eq!(r.world_x(), 0.0);
    }

    #[test]
    fn test_hud_reports_lives_and_coins() {
        let r = Runner::new(RunnerConfig::default());
        let hud = r.hud(5.0);
        assert_eq!(hud.clock, "00:05");
        assert_eq!(hud.lives, Some(3));
        assert_eq!(hud.coins, Some(0));
        assert_eq!(hud.progress, None);
    }
}
