//! `ApplicationHandler` implementation driving the render loop.
//!
//! One synchronous unit of work per redraw: poll the signal source, take one
//! scheduler tick, render. `about_to_wait` keeps the loop continuous by
//! requesting the next redraw immediately.

use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use nimbus_common::BusyFlag;
use nimbus_config::NimbusConfig;
use nimbus_renderer::{FrameScheduler, FrameTimer, SceneRenderer, SpringParams};

use crate::signal::SignalDriver;

/// Log an FPS line at debug level every this many frames.
const FPS_LOG_INTERVAL: u64 = 600;

pub struct NimbusApp {
    config: NimbusConfig,
    window: Option<Arc<Window>>,
    scene: Option<SceneRenderer>,
    scheduler: FrameScheduler,
    signal: SignalDriver,
    timer: FrameTimer,
    frame_index: u64,
}

impl NimbusApp {
    pub fn new(config: NimbusConfig, initial_busy: bool) -> Self {
        let flag = BusyFlag::new(initial_busy);
        let signal = SignalDriver::start(&config.signal, flag.clone());
        let scheduler = FrameScheduler::new(flag, SpringParams::from(&config.visualizer.spring));
        Self {
            config,
            window: None,
            scene: None,
            scheduler,
            signal,
            timer: FrameTimer::new(),
            frame_index: 0,
        }
    }

    /// Create the window and initialize the GPU scene.
    /// Returns `false` if initialization failed and the event loop should exit.
    fn initialize_window(&mut self, event_loop: &ActiveEventLoop) -> bool {
        let attrs = Window::default_attributes()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("failed to create window: {e}");
                return false;
            }
        };

        match pollster::block_on(SceneRenderer::new(window.clone(), &self.config)) {
            Ok(scene) => self.scene = Some(scene),
            Err(e) => {
                // No GPU-class adapter, or an invalid field: nothing to
                // degrade to, so exit.
                tracing::error!("failed to initialize renderer: {e}");
                return false;
            }
        }

        self.window = Some(window);
        tracing::info!("window created and renderer initialized");
        true
    }

    /// Stop the loop and release GPU resources. No tick runs after this.
    fn teardown(&mut self) {
        self.scheduler.stop();
        self.scene = None;
        self.window = None;
    }

    fn render_tick(&mut self) {
        let Some(inputs) = self.scheduler.tick() else {
            return;
        };
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        self.timer.begin_frame();
        if let Err(e) = scene.render_frame(&inputs) {
            tracing::error!("render error: {e}");
        }

        self.frame_index += 1;
        if self.frame_index % FPS_LOG_INTERVAL == 0 {
            tracing::debug!(
                "fps: {:.1} ({:.2} ms), blend: {:.3}",
                self.timer.fps(),
                self.timer.frame_time_ms(),
                inputs.blend,
            );
        }
    }

    fn handle_keyboard_input(&mut self, event_loop: &ActiveEventLoop, event: KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        match event.logical_key {
            Key::Named(NamedKey::Space) => {
                if let Some(busy) = self.signal.toggle() {
                    tracing::info!("signal toggled: {}", if busy { "busy" } else { "idle" });
                }
            }
            Key::Named(NamedKey::Escape) => {
                self.teardown();
                event_loop.exit();
            }
            Key::Character(ref c) if c.as_str() == "q" => {
                self.teardown();
                event_loop.exit();
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for NimbusApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if !self.initialize_window(event_loop) {
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("window close requested");
                self.teardown();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let Some(ref mut scene) = self.scene {
                        scene.resize(size.width, size.height);
                    }
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_keyboard_input(event_loop, event);
            }

            WindowEvent::RedrawRequested => {
                self.signal.poll();
                self.render_tick();
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.scheduler.is_running() {
            event_loop.exit();
            return;
        }
        // Continuous animation: both globals change every tick, so every
        // tick needs a redraw.
        if let Some(ref w) = self.window {
            w.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::Poll);
    }
}
