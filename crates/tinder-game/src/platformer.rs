//! Side-scrolling platformer: walk right, jump over patrols, touch the goal.

use crate::camera::Camera;
use crate::collision::platformer_contacts;
use crate::config::{CameraConfig, PlatformerConfig};
use tinder_core::{Rect, Vec2, Viewport};
use tinder_physics::{step_body, Body, Bounds, MoveInput, Patrol};
use tinder_runtime::{Action, FrameContext, GameEvent, HudSnapshot, Outcome, Simulation};

/// The platformer player: a physics body plus round flags
#[derive(Clone, Debug, PartialEq)]
pub struct PlatformerPlayer {
    pub body: Body,
    pub alive: bool,
    pub reached_goal: bool,
}

/// Platformer round state, owned by the game loop
#[derive(Clone, Debug)]
pub struct Platformer {
    config: PlatformerConfig,
    world_len: f32,
    viewport: Viewport,
    pub player: PlatformerPlayer,
    pub enemies: Vec<Patrol>,
    pub goal: Rect,
    pub camera: Camera,
}

impl Platformer {
    pub fn new(config: PlatformerConfig, camera: &CameraConfig) -> Self {
        let world_len = config.world_len();
        let viewport = Viewport::default();
        let floor_y = viewport.floor_y();

        let [pw, ph] = config.player_size;
        let player = PlatformerPlayer {
            body: Body::new(Vec2::new(config.player_start_x, floor_y - ph), Vec2::new(pw, ph)),
            alive: true,
            reached_goal: false,
        };

        let enemies = build_patrols(&config, world_len, floor_y);

        let [gw, gh] = config.goal_size;
        let goal = Rect::new(world_len - gw, floor_y - gh, gw, gh);

        let mut platformer = Self {
            config,
            world_len,
            viewport,
            player,
            enemies,
            goal,
            camera: Camera::new(camera.margin_fraction),
        };
        platformer.reset();
        platformer
    }

    pub fn config(&self) -> &PlatformerConfig {
        &self.config
    }

    pub fn world_len(&self) -> f32 {
        self.world_len
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Course progress in percent, `min(100, (x + w) / world_len * 100)`
    pub fn progress(&self) -> f32 {
        let body = &self.player.body;
        ((body.pos.x + body.size.x) / self.world_len * 100.0).min(100.0)
    }

    fn bounds(&self) -> Bounds {
        Bounds {
            floor_y: self.viewport.floor_y(),
            world_len: self.world_len,
        }
    }
}

/// Patrol `i` of `n` covers a range starting `patrol_lead` before the
/// i-th segment mark, with width and speed cycling every three enemies.
fn build_patrols(config: &PlatformerConfig, world_len: f32, floor_y: f32) -> Vec<Patrol> {
    let n = config.enemy_count;
    let size = Vec2::new(config.enemy_size, config.enemy_size);
    (1..=n)
        .map(|i| {
            let seg = world_len / n as f32 * i as f32;
            let step = (i % 3) as f32;
            let width = config.patrol_base_width + step * config.patrol_width_step;
            let min_x = seg - config.patrol_lead;
            let max_x = min_x + width;
            let speed = config.patrol_base_speed + step * config.patrol_speed_step;
            Patrol::new(
                Vec2::new(min_x + config.spawn_offset, floor_y - size.y),
                size,
                min_x,
                max_x,
                speed,
            )
        })
        .collect()
}

impl Simulation for Platformer {
    fn name(&self) -> &str {
        "platformer"
    }

    fn reset(&mut self) {
        let floor_y = self.viewport.floor_y();
        let body = &mut self.player.body;
        body.pos = Vec2::new(self.config.player_start_x, floor_y - body.size.y);
        body.vel = Vec2::ZERO;
        body.on_ground = true;
        self.player.alive = true;
        self.player.reached_goal = false;

        for enemy in &mut self.enemies {
            enemy.reset();
        }
        self.camera.x = 0.0;
    }

    fn resize(&mut self, viewport: &Viewport) {
        self.viewport = *viewport;
        let floor_y = viewport.floor_y();

        for enemy in &mut self.enemies {
            enemy.pos.y = floor_y - enemy.size.y;
        }
        self.goal.y = floor_y - self.goal.h;

        let body = &mut self.player.body;
        if body.on_ground || body.pos.y + body.size.y > floor_y {
            body.pos.y = floor_y - body.size.y;
            body.vel.y = 0.0;
            body.on_ground = true;
        }

        self.camera.follow(body.pos.x, viewport.width, self.world_len);
    }

    fn update(&mut self, ctx: &mut FrameContext<'_>) {
        let input = MoveInput {
            left: ctx.input.is_action_pressed(Action::MoveLeft),
            right: ctx.input.is_action_pressed(Action::MoveRight),
            jump: ctx.input.is_action_just_pressed(Action::Jump),
        };
        let bounds = self.bounds();
        let step = step_body(
            &mut self.player.body,
            input,
            &self.config.movement,
            &bounds,
            ctx.dt,
        );
        if step.jumped {
            ctx.events.push(GameEvent::Jumped);
        }

        for enemy in &mut self.enemies {
            enemy.step(ctx.dt);
        }

        let contacts = platformer_contacts(
            &self.player.body.rect(),
            self.enemies.iter().map(Patrol::rect),
            &self.goal,
        );
        if contacts.hit_enemy && self.player.alive {
            self.player.alive = false;
            ctx.events.push(GameEvent::PlayerHit { lives_left: 0 });
            tracing::debug!("player hit at x={:.1}", self.player.body.pos.x);
        }
        if contacts.reached_goal && !self.player.reached_goal {
            self.player.reached_goal = true;
            ctx.events.push(GameEvent::GoalReached);
        }

        self.camera
            .follow(self.player.body.pos.x, self.viewport.width, self.world_len);
    }

    fn terminal(&self) -> Option<Outcome> {
        if self.player.reached_goal {
            Some(Outcome::Won)
        } else if !self.player.alive {
            Some(Outcome::Lost)
        } else {
            None
        }
    }

    fn hud(&self, elapsed: f64) -> HudSnapshot {
        HudSnapshot {
            clock: tinder_core::format_clock(elapsed),
            progress: Some(self.progress()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinder_runtime::{EventBus, InputState};

    fn platformer() -> Platformer {
        Platformer::new(PlatformerConfig::classic(), &CameraConfig::default())
    }

    fn frame(p: &mut Platformer, input: &InputState, time: f64) -> Vec<GameEvent> {
        let mut events = EventBus::new();
        let mut ctx = FrameContext {
            dt: 0.016,
            time,
            input,
            events: &mut events,
        };
        p.update(&mut ctx);
        events.drain()
    }

    #[test]
    fn test_course_layout() {
        let p = platformer();
        assert_eq!(p.world_len(), 14400.0);
        assert_eq!(p.enemies.len(), 24);
        assert_eq!(p.goal.x, 14360.0);
        assert_eq!(p.goal.bottom(), p.viewport().floor_y());

        // First patrol: seg 600, width 180, speed 60
        let first = &p.enemies[0];
        assert_eq!(first.min_x, 510.0);
        assert_eq!(first.max_x, 690.0);
        assert_eq!(first.pos.x, 560.0);
        assert_eq!(first.speed, 60.0);

        for e in &p.enemies {
            assert!(e.max_x <= p.world_len() + p.config().patrol_base_width);
            assert!(!e.rect().overlaps(&p.player.body.rect()));
        }
    }

    #[test]
    fn test_player_starts_grounded() {
        let p = platformer();
        let body = &p.player.body;
        assert!(body.on_ground);
        assert_eq!(body.pos.x, 40.0);
        assert_eq!(body.pos.y + body.size.y, p.viewport().floor_y());
        assert_eq!(p.terminal(), None);
    }

    #[test]
    fn test_jump_emits_event() {
        let mut p = platformer();
        let mut input = InputState::new();
        input.process_key_down(winit::keyboard::KeyCode::Space);
        input.begin_frame();
        let events = frame(&mut p, &input, 0.016);
        assert!(events.contains(&GameEvent::Jumped));
        assert!(!p.player.body.on_ground);

        // Held key does not jump again
        input.begin_frame();
        let events = frame(&mut p, &input, 0.032);
        assert!(!events.contains(&GameEvent::Jumped));
    }

    #[test]
    fn test_goal_wins_over_death() {
        let mut p = platformer();
        p.player.alive = false;
        p.player.reached_goal = true;
        assert_eq!(p.terminal(), Some(Outcome::Won));
        p.player.reached_goal = false;
        assert_eq!(p.terminal(), Some(Outcome::Lost));
    }

    #[test]
    fn test_progress_and_hud() {
        let mut p = platformer();
        p.player.body.pos.x = 7200.0 - 28.0;
        assert!((p.progress() - 50.0).abs() < 1e-3);

        p.player.body.pos.x = p.world_len();
        assert_eq!(p.progress(), 100.0);

        let hud = p.hud(83.0);
        assert_eq!(hud.clock, "01:23");
        assert_eq!(hud.progress, Some(100.0));
        assert_eq!(hud.lives, None);
    }

    #[test]
    fn test_camera_follows_after_physics() {
        let mut p = platformer();
        p.player.body.pos.x = 3000.0;
        let input = InputState::new();
        frame(&mut p, &input, 0.016);
        let expected = p.player.body.pos.x - p.viewport().width * 0.33;
        assert!((p.camera.x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_resize_moves_floor_entities() {
        let mut p = platformer();
        let vp = Viewport::new(800.0, 400.0, 2.0);
        p.resize(&vp);
        let floor_y = vp.floor_y();
        assert!(floor_y < Viewport::default().floor_y());
        assert_eq!(p.goal.bottom(), floor_y);
        assert!(p.enemies.iter().all(|e| e.rect().bottom() == floor_y));
        assert_eq!(p.player.body.rect().bottom(), floor_y);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut p = platformer();
        let initial_player = p.player.clone();
        let initial_enemies = p.enemies.clone();

        let mut input = InputState::new();
        input.process_key_down(winit::keyboard::KeyCode::ArrowRight);
        input.begin_frame();
        for i in 0..120 {
            frame(&mut p, &input, i as f64 * 0.016);
        }
        assert_ne!(p.player, initial_player);

        p.reset();
        assert_eq!(p.player, initial_player);
        assert_eq!(p.enemies, initial_enemies);
        assert_eq!(p.camera.x, 0.0);
    }
}
