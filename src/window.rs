//! Windowed host: winit event loop plus the wgpu renderer.

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::gpu::{GpuState, ShapeBatch};
use crate::input::{self, Control};
use crate::simulation::Simulation;
use crate::time::FrameClock;

const WINDOW_TITLE: &str = "Chain Drive";

/// Open a window and animate until it is closed.
pub fn run(config: SimulationConfig) -> Result<(), SimulationError> {
    config.validate()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct App {
    config: SimulationConfig,
    window: Option<Arc<Window>>,
    gpu_state: Option<GpuState>,
    simulation: Option<Simulation>,
    batch: ShapeBatch,
    clock: FrameClock,
    error: Option<SimulationError>,
}

impl App {
    fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            window: None,
            gpu_state: None,
            simulation: None,
            batch: ShapeBatch::new(),
            clock: FrameClock::new(),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), SimulationError> {
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu_state = pollster::block_on(GpuState::new(window.clone()))?;

        let viewport = gpu_state.viewport();
        log::info!("surface {}x{}", viewport.width, viewport.height);
        self.simulation = Some(Simulation::new(self.config.clone(), viewport)?);

        window.request_redraw();
        self.window = Some(window);
        self.gpu_state = Some(gpu_state);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(fps) = self.clock.tick() {
            log::debug!("frame {}: {:.1} fps", self.clock.frame(), fps);
        }

        if let (Some(gpu_state), Some(simulation)) = (&mut self.gpu_state, &mut self.simulation) {
            simulation.tick(&mut self.batch);
            match gpu_state.render(&self.batch) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => gpu_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("GPU out of memory; exiting");
                    event_loop.exit();
                }
                Err(e) => log::error!("Render error: {:?}", e),
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init(event_loop) {
                log::error!("{}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match input::translate(&event) {
            Some(Control::Exit) => event_loop.exit(),
            Some(Control::Resize(viewport)) => {
                if let WindowEvent::Resized(size) = event {
                    if let Some(gpu_state) = &mut self.gpu_state {
                        gpu_state.resize(size);
                    }
                }
                if let Some(simulation) = &mut self.simulation {
                    simulation.resize(viewport);
                }
            }
            Some(Control::Reset) => {
                if let Some(simulation) = &mut self.simulation {
                    simulation.reset();
                }
            }
            Some(Control::Redraw) => self.redraw(event_loop),
            None => {}
        }
    }
}
