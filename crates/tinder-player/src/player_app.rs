//! Player application implementing winit ApplicationHandler
//!
//! Each redraw ticks the game loop once, rasterizes the scene into an egui
//! texture and paints it with the HUD on top. Redraws are requested only
//! while the loop wants a frame.

use crate::game::{AnyGame, Variant};
use crate::gamepad::GamepadInput;
use crate::hud::{HudAction, HudState, TouchPad, PLATFORMER_TOUCH, RUNNER_TOUCH};
use image::RgbaImage;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tinder_audio::AudioSystem;
use tinder_core::{Result, TinderError, Viewport};
use tinder_game::GameConfig;
use tinder_render::{rasterize_into, RenderContext, SceneRenderer};
use tinder_runtime::{Action, GameEvent, Phase};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

/// Gamepad poll interval while no frame is scheduled
const IDLE_POLL: Duration = Duration::from_millis(50);

pub struct PlayerApp {
    // Game state
    variant: Variant,
    game: AnyGame,
    hud: HudState,
    touch: TouchPad,
    touch_seen: bool,
    epoch: Instant,

    // Systems
    audio: AudioSystem,
    gamepad: GamepadInput,

    // Rendering
    window: Option<Arc<Window>>,
    render_context: Option<RenderContext>,
    scene_renderer: SceneRenderer,
    frame_image: RgbaImage,
    frame_texture: Option<egui::TextureHandle>,
    egui_ctx: egui::Context,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,

    // Window options
    pub fullscreen: bool,
}

impl PlayerApp {
    pub fn new(variant: Variant, config: &GameConfig, fullscreen: bool) -> Self {
        Self {
            variant,
            game: AnyGame::new(variant, config, Viewport::default()),
            hud: HudState::new(variant.title(), variant.win_title()),
            touch: TouchPad::default(),
            touch_seen: false,
            epoch: Instant::now(),
            audio: AudioSystem::new(&config.audio),
            gamepad: GamepadInput::new(),
            window: None,
            render_context: None,
            scene_renderer: SceneRenderer::new(),
            frame_image: RgbaImage::new(1, 1),
            frame_texture: None,
            egui_ctx: egui::Context::default(),
            egui_winit: None,
            egui_renderer: None,
            fullscreen,
        }
    }

    /// Seconds since the app was created
    fn now(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attrs = Window::default_attributes()
            .with_title(self.variant.title())
            .with_inner_size(LogicalSize::new(1280.0, 720.0));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| TinderError::Render(format!("Failed to create window: {}", e)))?,
        );

        if self.fullscreen {
            window.set_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let render_context = pollster::block_on(RenderContext::new(window.clone()))?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &render_context.device,
            render_context.config.format,
            None,
            1,
            false,
        );

        self.game.resize(viewport_of(&window));
        window.request_redraw();

        self.window = Some(window);
        self.render_context = Some(render_context);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    /// Start or restart on the matching action, depending on phase
    fn on_action_pressed(&mut self, action: Action) {
        let now = self.now();
        if self.game.apply_round_action(action, now) {
            self.request_redraw();
        }
    }

    /// Route drained events to audio, HUD and renderer
    fn dispatch_events(&mut self) {
        let events = self.game.drain_events();
        if events.is_empty() {
            return;
        }
        self.audio.process_events(&events);
        self.hud.apply(&events);
        if events.contains(&GameEvent::Reset) {
            self.scene_renderer.reset();
        }
    }

    fn redraw(&mut self) {
        if self.game.wants_frame() {
            let now = self.now();
            self.game.tick(now);
        }
        self.dispatch_events();

        let frame = self.game.draw(&mut self.scene_renderer);
        let (w, h) = frame.viewport.physical_size();
        let (w, h) = (w.max(1), h.max(1));
        if self.frame_image.dimensions() != (w, h) {
            self.frame_image = RgbaImage::new(w, h);
        }
        rasterize_into(&frame, &mut self.frame_image);
        self.upload_frame();

        if let Some(action) = self.paint() {
            self.on_action_pressed(action.action());
        }
        if self.game.wants_frame() {
            self.request_redraw();
        }
    }

    fn upload_frame(&mut self) {
        let (w, h) = self.frame_image.dimensions();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [w as usize, h as usize],
            self.frame_image.as_raw(),
        );
        match &mut self.frame_texture {
            Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.frame_texture = Some(self.egui_ctx.load_texture(
                    "scene",
                    image,
                    egui::TextureOptions::LINEAR,
                ))
            }
        }
    }

    /// Paint the scene texture and HUD. Returns a clicked panel button.
    fn paint(&mut self) -> Option<HudAction> {
        let (Some(window), Some(context), Some(egui_winit), Some(texture)) = (
            &self.window,
            &self.render_context,
            &mut self.egui_winit,
            &self.frame_texture,
        ) else {
            return None;
        };

        let output = match context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                context.reconfigure();
                return None;
            }
            Err(e) => {
                tracing::warn!("surface error: {:?}", e);
                return None;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = egui_winit.take_egui_input(window);
        let hud = &self.hud;
        let buttons = match self.game {
            AnyGame::Platformer(_) => PLATFORMER_TOUCH,
            AnyGame::Runner(_) => RUNNER_TOUCH,
        };
        let show_touch = self.touch_seen && self.game.phase() == Phase::Running;
        let mut action = None;
        let mut touch_held = Vec::new();
        let texture_id = texture.id();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    ui.painter().image(
                        texture_id,
                        ctx.screen_rect(),
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                });
            action = hud.render(ctx);
            if show_touch {
                touch_held = TouchPad::render(ctx, buttons);
            }
        });

        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [context.config.width, context.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let Some(egui_renderer) = &mut self.egui_renderer else {
            return None;
        };

        let mut encoder = context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Tinder Frame Encoder"),
            });

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&context.device, &context.queue, *id, image_delta);
        }

        let callback_buffers = egui_renderer.update_buffers(
            &context.device,
            &context.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Tinder Frame Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        context.queue.submit(
            callback_buffers
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );

        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();

        self.touch.sync(touch_held, self.game.input_mut());
        action
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                match key {
                    KeyCode::Escape => {
                        event_loop.exit();
                        return;
                    }
                    KeyCode::F11 => {
                        if let Some(window) = &self.window {
                            if window.fullscreen().is_some() {
                                window.set_fullscreen(None);
                            } else {
                                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
                            }
                        }
                        return;
                    }
                    _ => {}
                }

                let repeat = self.game.input().is_key_down(key);
                self.game.input_mut().process_key_down(key);
                if !repeat {
                    for action in self.game.input().actions_for_key(key) {
                        self.on_action_pressed(action);
                    }
                }
            }
            ElementState::Released => self.game.input_mut().process_key_up(key),
        }
    }
}

impl ApplicationHandler for PlayerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.initialize(event_loop) {
                tracing::error!("{e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.repaint && self.game.phase() != Phase::Running {
                window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                if let Some(context) = &mut self.render_context {
                    context.resize(new_size);
                }
                if let Some(window) = &self.window {
                    self.game.resize(viewport_of(window));
                }
                self.request_redraw();
            }

            WindowEvent::Focused(false) => {
                self.game.input_mut().release_all();
            }

            WindowEvent::Touch(_) => {
                self.touch_seen = true;
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key_code) = event.physical_key {
                    self.on_key(event_loop, key_code, event.state);
                }
            }

            WindowEvent::RedrawRequested => {
                self.redraw();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        for action in self.gamepad.poll(self.game.input_mut()) {
            self.on_action_pressed(action);
        }

        if self.game.wants_frame() {
            event_loop.set_control_flow(ControlFlow::Wait);
            self.request_redraw();
        } else {
            event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + IDLE_POLL));
        }
    }
}

/// Logical viewport of a window's client area
fn viewport_of(window: &Window) -> Viewport {
    let scale = window.scale_factor() as f32;
    let size = window.inner_size();
    Viewport::new(
        size.width as f32 / scale,
        size.height as f32 / scale,
        scale,
    )
}
