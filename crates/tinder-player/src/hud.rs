//! HUD overlay — timer, progress, lives and coins, plus start/end panels
//!
//! State is fed only from drained `GameEvent`s; the panels return the
//! button the player clicked, if any.

use tinder_core::format_clock;
use tinder_runtime::{
    Action, GameEvent, HudSnapshot, InputSource, InputState, Outcome, OverlaySignal,
};

/// On-screen buttons for the platformer
pub const PLATFORMER_TOUCH: &[(Action, &str)] = &[
    (Action::MoveLeft, "Left"),
    (Action::MoveRight, "Right"),
    (Action::Jump, "Jump"),
];

/// On-screen buttons for the runner
pub const RUNNER_TOUCH: &[(Action, &str)] = &[(Action::LaneUp, "Up"), (Action::LaneDown, "Down")];

/// Which full-screen panel is showing
#[derive(Clone, Debug, PartialEq)]
pub enum Overlay {
    Start,
    End { outcome: Outcome, elapsed: f64 },
    Hidden,
}

/// Button clicked on a panel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudAction {
    Start,
    Restart,
}

impl HudAction {
    /// Logical action the button stands for
    pub fn action(self) -> Action {
        match self {
            HudAction::Start => Action::Start,
            HudAction::Restart => Action::Restart,
        }
    }
}

/// Title and subtitle for the end panel
pub fn end_message(outcome: Outcome, elapsed: f64, win_title: &str) -> (String, String) {
    let time = format_clock(elapsed);
    match outcome {
        Outcome::Won => (win_title.into(), format!("Time: {time}")),
        Outcome::Lost => (
            "Game Over!".into(),
            format!("You lasted {time}. Try again."),
        ),
    }
}

pub struct HudState {
    pub snapshot: HudSnapshot,
    pub overlay: Overlay,
    title: &'static str,
    win_title: &'static str,
}

impl HudState {
    pub fn new(title: &'static str, win_title: &'static str) -> Self {
        Self {
            snapshot: HudSnapshot {
                clock: format_clock(0.0),
                ..Default::default()
            },
            overlay: Overlay::Start,
            title,
            win_title,
        }
    }

    /// Fold one frame's events into the displayed state
    pub fn apply(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Hud(snapshot) => self.snapshot = snapshot.clone(),
                GameEvent::Overlay(OverlaySignal::ShowStart) => self.overlay = Overlay::Start,
                GameEvent::Overlay(OverlaySignal::Hide) => self.overlay = Overlay::Hidden,
                GameEvent::Overlay(OverlaySignal::ShowEnd { outcome, elapsed }) => {
                    self.overlay = Overlay::End {
                        outcome: *outcome,
                        elapsed: *elapsed,
                    }
                }
                GameEvent::Reset => {
                    self.snapshot = HudSnapshot {
                        clock: format_clock(0.0),
                        ..Default::default()
                    }
                }
                _ => {}
            }
        }
    }

    /// Render the HUD via egui
    pub fn render(&self, ctx: &egui::Context) -> Option<HudAction> {
        self.render_bar(ctx);
        match &self.overlay {
            Overlay::Hidden => None,
            Overlay::Start => self.render_panel(
                ctx,
                self.title,
                "Press Enter to start",
                "Start",
                HudAction::Start,
            ),
            Overlay::End { outcome, elapsed } => {
                let (title, subtitle) = end_message(*outcome, *elapsed, self.win_title);
                self.render_panel(ctx, &title, &subtitle, "Play again (R)", HudAction::Restart)
            }
        }
    }

    fn render_bar(&self, ctx: &egui::Context) {
        let text = egui::Color32::from_rgb(250, 250, 245);
        egui::Area::new(egui::Id::new("hud_bar"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::LEFT_TOP, egui::Vec2::new(16.0, 12.0))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(egui::Color32::from_rgba_unmultiplied(10, 10, 10, 140))
                    .rounding(8.0)
                    .inner_margin(egui::Margin::symmetric(12.0, 6.0))
                    .show(ui, |ui: &mut egui::Ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(&self.snapshot.clock)
                                    .color(text)
                                    .size(20.0)
                                    .monospace(),
                            );
                            if let Some(progress) = self.snapshot.progress {
                                ui.add(
                                    egui::ProgressBar::new(progress / 100.0)
                                        .desired_width(160.0)
                                        .text(format!("{progress:.0}%")),
                                );
                            }
                            if let Some(lives) = self.snapshot.lives {
                                ui.label(
                                    egui::RichText::new(format!("Lives {lives}"))
                                        .color(text)
                                        .size(18.0),
                                );
                            }
                            if let Some(coins) = self.snapshot.coins {
                                ui.label(
                                    egui::RichText::new(format!("Coins {coins}"))
                                        .color(egui::Color32::from_rgb(255, 214, 74))
                                        .size(18.0),
                                );
                            }
                        });
                    });
            });
    }

    fn render_panel(
        &self,
        ctx: &egui::Context,
        title: &str,
        subtitle: &str,
        button: &str,
        action: HudAction,
    ) -> Option<HudAction> {
        let mut clicked = None;
        egui::Area::new(egui::Id::new("hud_panel"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(egui::Color32::from_rgba_unmultiplied(10, 10, 10, 200))
                    .rounding(12.0)
                    .inner_margin(egui::Margin::symmetric(32.0, 20.0))
                    .show(ui, |ui: &mut egui::Ui| {
                        ui.vertical_centered(|ui| {
                            ui.label(
                                egui::RichText::new(title)
                                    .color(egui::Color32::WHITE)
                                    .size(28.0)
                                    .strong(),
                            );
                            ui.add_space(6.0);
                            ui.label(
                                egui::RichText::new(subtitle)
                                    .color(egui::Color32::from_rgb(220, 220, 210))
                                    .size(16.0),
                            );
                            ui.add_space(12.0);
                            if ui.button(button).clicked() {
                                clicked = Some(action);
                            }
                        });
                    });
            });
        clicked
    }
}

/// On-screen buttons that hold actions while a pointer is down on them
#[derive(Default)]
pub struct TouchPad {
    held: Vec<Action>,
}

impl TouchPad {
    /// Draw `buttons` along the bottom edge. Returns the actions held this frame.
    pub fn render(ctx: &egui::Context, buttons: &[(Action, &str)]) -> Vec<Action> {
        let mut held = Vec::new();
        egui::Area::new(egui::Id::new("touch_pad"))
            .order(egui::Order::Foreground)
            .anchor(egui::Align2::CENTER_BOTTOM, egui::Vec2::new(0.0, -16.0))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for (action, label) in buttons {
                        let button = egui::Button::new(egui::RichText::new(*label).size(22.0))
                            .min_size(egui::Vec2::new(96.0, 64.0));
                        if ui.add(button).is_pointer_button_down_on() {
                            held.push(*action);
                        }
                    }
                });
            });
        held
    }

    /// Press and release touch actions so `input` matches `now_held`
    pub fn sync(&mut self, now_held: Vec<Action>, input: &mut InputState) {
        for action in &self.held {
            if !now_held.contains(action) {
                input.release(InputSource::Touch, *action);
            }
        }
        for action in &now_held {
            if !self.held.contains(action) {
                input.press(InputSource::Touch, *action);
            }
        }
        self.held = now_held;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_messages() {
        let (title, subtitle) = end_message(Outcome::Won, 125.0, "You reached the goal!");
        assert_eq!(title, "You reached the goal!");
        assert_eq!(subtitle, "Time: 02:05");

        let (title, _) = end_message(Outcome::Won, 30.0, "You collected every coin!");
        assert_eq!(title, "You collected every coin!");

        let (title, subtitle) = end_message(Outcome::Lost, 42.4, "unused");
        assert_eq!(title, "Game Over!");
        assert_eq!(subtitle, "You lasted 00:42. Try again.");
    }

    #[test]
    fn test_overlay_follows_signals() {
        let mut hud = HudState::new("test", "won");
        assert_eq!(hud.overlay, Overlay::Start);

        hud.apply(&[GameEvent::Overlay(OverlaySignal::Hide), GameEvent::Started]);
        assert_eq!(hud.overlay, Overlay::Hidden);

        hud.apply(&[GameEvent::Overlay(OverlaySignal::ShowEnd {
            outcome: Outcome::Lost,
            elapsed: 9.0,
        })]);
        assert_eq!(
            hud.overlay,
            Overlay::End {
                outcome: Outcome::Lost,
                elapsed: 9.0
            }
        );
    }

    #[test]
    fn test_snapshot_and_reset() {
        let mut hud = HudState::new("test", "won");
        hud.apply(&[GameEvent::Hud(HudSnapshot {
            clock: "00:07".into(),
            progress: Some(12.5),
            lives: None,
            coins: None,
        })]);
        assert_eq!(hud.snapshot.clock, "00:07");
        assert_eq!(hud.snapshot.progress, Some(12.5));

        hud.apply(&[GameEvent::Reset]);
        assert_eq!(hud.snapshot.clock, "00:00");
        assert_eq!(hud.snapshot.progress, None);
    }

    #[test]
    fn test_touch_sync_edges() {
        let mut pad = TouchPad::default();
        let mut input = InputState::new();

        pad.sync(vec![Action::MoveRight, Action::Jump], &mut input);
        input.begin_frame();
        assert!(input.is_action_just_pressed(Action::MoveRight));
        assert!(input.is_action_just_pressed(Action::Jump));

        pad.sync(vec![Action::MoveRight], &mut input);
        input.begin_frame();
        assert!(input.is_action_pressed(Action::MoveRight));
        assert!(!input.is_action_pressed(Action::Jump));
    }

    #[test]
    fn test_buttons_map_to_actions() {
        assert_eq!(HudAction::Start.action(), Action::Start);
        assert_eq!(HudAction::Restart.action(), Action::Restart);
    }

    #[test]
    fn test_render_without_click() {
        let ctx = egui::Context::default();
        let hud = HudState::new("test", "won");
        let mut action = Some(HudAction::Restart);
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            action = hud.render(ctx);
        });
        assert_eq!(action, None);
    }
}
