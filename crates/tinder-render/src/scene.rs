//! Builds display lists from simulation state.
//!
//! Order is fixed: background, ground, goal/collectibles, enemies/obstacles,
//! player. World geometry is drawn at `world - camera.x`; the runner player
//! is screen-fixed and only the backdrop scrolls.

use crate::frame::{DrawCommand, Frame, Layer};
use crate::sprites::SpritePool;
use tinder_core::{Color, Rect, Vec2, Viewport};
use tinder_game::{EntityKind, Platformer, Runner};

const SKY_TOP: u32 = 0x87ceeb;
const SKY_BOTTOM: u32 = 0xb8ecff;
const HILL: u32 = 0x7bd36a;
const GROUND: u32 = 0x3b8c2a;
const GROUND_LIP: u32 = 0x2a5d1e;
const GROUND_LIP_HEIGHT: f32 = 6.0;

const PLAYER_BODY: u32 = 0xffce54;
const PLAYER_CAP: u32 = 0xff6b57;
const PLAYER_EYE: u32 = 0x222222;
const ENEMY_BODY: u32 = 0x6a5acd;
const ENEMY_EYE: u32 = 0x111111;
const GOAL_POLE: u32 = 0x8b5a2b;
const GOAL_FLAG: u32 = 0x4cd6ff;
const GOAL_BASE: u32 = 0x5c3b1a;
const COIN: u32 = 0xffd43b;
const COIN_SHINE: u32 = 0xfff3bf;
const OBSTACLE_TINTS: [u32; 3] = [0x6a5acd, 0x845ef7, 0x5f3dc4];

/// Hill band period in logical units
const HILL_PERIOD: f32 = 600.0;
/// Line segments per quadratic curve when tessellating hills
const CURVE_STEPS: usize = 12;

/// One parallax hill band
struct HillLayer {
    height: f32,
    baseline: f32,
    speed: f32,
    alpha: f32,
}

const HILL_LAYERS: [HillLayer; 2] = [
    HillLayer {
        height: 0.40,
        baseline: 0.75,
        speed: 0.2,
        alpha: 0.35,
    },
    HillLayer {
        height: 0.30,
        baseline: 0.82,
        speed: 0.4,
        alpha: 0.5,
    },
];

/// Turns game state into frames. Holds only presentation state.
#[derive(Debug, Default)]
pub struct SceneRenderer {
    sprites: SpritePool,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sprites(&self) -> &SpritePool {
        &self.sprites
    }

    /// Forget every entity mapping, e.g. after a reset
    pub fn reset(&mut self) {
        self.sprites.clear();
    }

    pub fn draw_platformer(&self, game: &Platformer) -> Frame {
        let viewport = *game.viewport();
        let cam_x = game.camera.x;
        let floor_y = viewport.floor_y();
        let mut frame = Frame::new(viewport);

        draw_backdrop(&mut frame, &viewport, cam_x);
        draw_ground(&mut frame, &viewport);

        draw_goal(&mut frame, &game.goal, cam_x);

        for enemy in &game.enemies {
            let rect = enemy.rect().translated(-cam_x, 0.0);
            if is_visible(&rect, &viewport) {
                draw_enemy(&mut frame, &rect);
            }
        }

        let body = &game.player.body;
        let rect = Rect::new(
            (body.pos.x - cam_x).round(),
            body.pos.y.round(),
            body.size.x,
            body.size.y,
        );
        if body.on_ground {
            frame.fill_rect(
                Layer::Player,
                Rect::new(rect.x - 2.0, floor_y - 2.0, rect.w + 4.0, 4.0),
                Color::BLACK.with_alpha(0.25),
            );
        }
        draw_player(&mut frame, &rect, 1.0);

        frame
    }

    /// Draw the runner. Sprite handles of despawned entities are released.
    pub fn draw_runner(&mut self, game: &Runner) -> Frame {
        let viewport = *game.viewport();
        let mut frame = Frame::new(viewport);

        draw_backdrop(&mut frame, &viewport, game.world_x() * game.config().parallax);
        draw_ground(&mut frame, &viewport);
        draw_lanes(&mut frame, game);

        let entities = game.entities();
        let released = self.sprites.retain_live(entities.iter().map(|(id, _, _)| *id));
        if released > 0 {
            tracing::trace!("released {released} sprite handles");
        }

        for (id, entity, rect) in &entities {
            if entity.kind == EntityKind::Coin {
                self.sprites.acquire(*id);
                draw_coin(&mut frame, rect);
            }
        }
        for (id, entity, rect) in &entities {
            if entity.kind == EntityKind::Obstacle {
                let handle = self.sprites.acquire(*id);
                let tint = OBSTACLE_TINTS[handle.0 as usize % OBSTACLE_TINTS.len()];
                draw_obstacle(&mut frame, rect, Color::from_hex(tint));
            }
        }

        // Blink at 10 Hz while invulnerable
        let now = game.time();
        let blink_off = game.player.is_invulnerable(now) && (now * 10.0).floor() as i64 % 2 == 0;
        let alpha = if blink_off { 0.4 } else { 1.0 };
        draw_player(&mut frame, &game.player_rect(), alpha);

        frame
    }
}

fn is_visible(rect: &Rect, viewport: &Viewport) -> bool {
    rect.right() > 0.0 && rect.x < viewport.width
}

/// Sky gradient plus two hill bands scrolled by `scroll * layer.speed`
fn draw_backdrop(frame: &mut Frame, viewport: &Viewport, scroll: f32) {
    let (w, h) = (viewport.width, viewport.height);
    frame.push(Layer::Background, DrawCommand::Clear(Color::from_hex(SKY_BOTTOM)));
    frame.push(
        Layer::Background,
        DrawCommand::Gradient {
            rect: Rect::new(0.0, 0.0, w, h),
            top: Color::from_hex(SKY_TOP),
            bottom: Color::from_hex(SKY_BOTTOM),
        },
    );

    for layer in &HILL_LAYERS {
        let color = Color::from_hex(HILL).with_alpha(layer.alpha);
        let hill_h = h * layer.height;
        let base_y = h * layer.baseline;
        let offset = -(scroll * layer.speed) % HILL_PERIOD;
        let mut x = offset - HILL_PERIOD;
        while x < w + HILL_PERIOD {
            frame.fill_polygon(Layer::Background, hill_outline(x, base_y, hill_h), color);
            x += HILL_PERIOD;
        }
    }
}

/// One hill period starting at `x`: a crest up to `base_y - hill_h`, then a
/// shallow dip below the baseline.
fn hill_outline(x: f32, base_y: f32, hill_h: f32) -> Vec<Vec2> {
    let q = HILL_PERIOD / 4.0;
    let mut points = Vec::with_capacity(CURVE_STEPS * 2 + 1);
    points.push(Vec2::new(x, base_y));
    quad_curve(
        &mut points,
        Vec2::new(x, base_y),
        Vec2::new(x + q, base_y - hill_h),
        Vec2::new(x + 2.0 * q, base_y),
    );
    quad_curve(
        &mut points,
        Vec2::new(x + 2.0 * q, base_y),
        Vec2::new(x + 3.0 * q, base_y + hill_h * 0.2),
        Vec2::new(x + HILL_PERIOD, base_y),
    );
    points
}

/// Append the points of a quadratic Bézier, excluding its start point
fn quad_curve(points: &mut Vec<Vec2>, p0: Vec2, c: Vec2, p1: Vec2) {
    for i in 1..=CURVE_STEPS {
        let t = i as f32 / CURVE_STEPS as f32;
        let u = 1.0 - t;
        points.push(p0 * (u * u) + c * (2.0 * u * t) + p1 * (t * t));
    }
}

fn draw_ground(frame: &mut Frame, viewport: &Viewport) {
    let floor_y = viewport.floor_y();
    frame.fill_rect(
        Layer::Ground,
        Rect::new(0.0, floor_y, viewport.width, viewport.ground_height()),
        Color::from_hex(GROUND),
    );
    frame.fill_rect(
        Layer::Ground,
        Rect::new(0.0, floor_y, viewport.width, GROUND_LIP_HEIGHT),
        Color::from_hex(GROUND_LIP),
    );
}

fn draw_lanes(frame: &mut Frame, game: &Runner) {
    let layout = game.layout();
    let width = game.viewport().width;
    for lane in 0..layout.lanes {
        let top = layout.lane_top(lane);
        let shade = if lane % 2 == 0 { 0.08 } else { 0.14 };
        frame.fill_rect(
            Layer::Ground,
            Rect::new(0.0, top, width, layout.lane_height),
            Color::WHITE.with_alpha(shade),
        );
        frame.fill_rect(
            Layer::Ground,
            Rect::new(0.0, top, width, 2.0),
            Color::WHITE.with_alpha(0.3),
        );
    }
}

/// Pole, pennant and base
fn draw_goal(frame: &mut Frame, goal: &Rect, cam_x: f32) {
    let x = (goal.x - cam_x).round();
    let y = goal.y;
    frame.fill_rect(
        Layer::Collectibles,
        Rect::new(x, y - 4.0, 6.0, goal.h + 4.0),
        Color::from_hex(GOAL_POLE),
    );
    frame.fill_polygon(
        Layer::Collectibles,
        vec![
            Vec2::new(x + 6.0, y + 8.0),
            Vec2::new(x + 42.0, y + 18.0),
            Vec2::new(x + 6.0, y + 28.0),
        ],
        Color::from_hex(GOAL_FLAG),
    );
    frame.fill_rect(
        Layer::Collectibles,
        Rect::new(x - 6.0, y + goal.h, 18.0, 10.0),
        Color::from_hex(GOAL_BASE),
    );
}

fn draw_enemy(frame: &mut Frame, rect: &Rect) {
    let (x, y) = (rect.x.round(), rect.y.round());
    let (w, h) = (rect.w, rect.h);
    frame.fill_rect(Layer::Enemies, Rect::new(x, y, w, h), Color::from_hex(ENEMY_BODY));
    let eye = Color::from_hex(ENEMY_EYE);
    frame.fill_rect(Layer::Enemies, Rect::new(x + 6.0, y + 8.0, 6.0, 6.0), eye);
    frame.fill_rect(Layer::Enemies, Rect::new(x + w - 12.0, y + 8.0, 6.0, 6.0), eye);
    frame.fill_rect(
        Layer::Enemies,
        Rect::new(x + 8.0, y + h - 8.0, w - 16.0, 4.0),
        Color::WHITE,
    );
}

fn draw_obstacle(frame: &mut Frame, rect: &Rect, tint: Color) {
    frame.fill_rect(Layer::Enemies, *rect, tint);
    frame.fill_rect(
        Layer::Enemies,
        Rect::new(rect.x, rect.y, rect.w, 4.0),
        Color::BLACK.with_alpha(0.25),
    );
}

fn draw_coin(frame: &mut Frame, rect: &Rect) {
    let center = Vec2::new(rect.x + rect.w / 2.0, rect.y + rect.h / 2.0);
    let radii = Vec2::new(rect.w / 2.0, rect.h / 2.0);
    frame.fill_ellipse(Layer::Collectibles, center, radii, Color::from_hex(COIN));
    frame.fill_ellipse(
        Layer::Collectibles,
        center - Vec2::new(radii.x * 0.3, radii.y * 0.3),
        radii * 0.35,
        Color::from_hex(COIN_SHINE),
    );
}

fn draw_player(frame: &mut Frame, rect: &Rect, alpha: f32) {
    let (x, y, w) = (rect.x, rect.y, rect.w);
    frame.fill_rect(Layer::Player, *rect, Color::from_hex(PLAYER_BODY).with_alpha(alpha));
    frame.fill_rect(
        Layer::Player,
        Rect::new(x - 2.0, y - 8.0, w + 4.0, 10.0),
        Color::from_hex(PLAYER_CAP).with_alpha(alpha),
    );
    let eye = Color::from_hex(PLAYER_EYE).with_alpha(alpha);
    frame.fill_rect(Layer::Player, Rect::new(x + 6.0, y + 14.0, 4.0, 6.0), eye);
    frame.fill_rect(Layer::Player, Rect::new(x + w - 10.0, y + 14.0, 4.0, 6.0), eye);
}
