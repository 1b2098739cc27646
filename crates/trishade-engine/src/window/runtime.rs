use anyhow::{Context, Result, anyhow};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::coords::Extent;
use crate::core::{App as CoreApp, AppControl, FrameCtx, InitCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::input::platform::translate_window_event;
use crate::input::{InputFrame, InputState, KeyBindings};
use crate::time::FrameClock;

use super::state::{DEFAULT_EXTENT, ResizeEvent, WindowState};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    /// Initial window size in screen units.
    pub initial_size: Extent,
    pub bindings: KeyBindings,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "trishade".to_string(),
            initial_size: DEFAULT_EXTENT,
            bindings: KeyBindings::default(),
        }
    }
}

/// Runtime context passed to the application.
///
/// Commands are buffered and applied after the current callback returns.
#[derive(Default)]
pub struct RuntimeCtx {
    commands: Vec<Command>,
}

impl RuntimeCtx {
    pub fn exit(&mut self) {
        self.commands.push(Command::Exit);
    }

    /// Exits and makes [`Runtime::run`] return `err`.
    pub fn fail(&mut self, err: anyhow::Error) {
        self.commands.push(Command::Fail(err));
    }
}

enum Command {
    Exit,
    Fail(anyhow::Error),
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window and runs the event loop until the app exits.
    ///
    /// Returns the error from `App::on_init` or from [`RuntimeCtx::fail`] if
    /// either ended the run.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window_state: WindowState,
    input_state: InputState,
    input_frame: InputFrame,
    clock: FrameClock,

    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    failure: Option<anyhow::Error>,
    exit_requested: bool,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            failure: None,
            exit_requested: false,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure = Some(err);
        self.exit_requested = true;
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let size = self.config.initial_size;
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(size.width as f64, size.height as f64));

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let mut window_state = WindowState::new(size);
        sync_extents(&mut window_state, &window, window.inner_size());

        let gpu_init = self.gpu_init.clone();
        let entry = WindowEntryTryBuilder {
            window_state,
            input_state: InputState::default(),
            input_frame: InputFrame::default(),
            clock: FrameClock::default(),
            window,
            gpu_builder: |w| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()?;

        self.entry = Some(entry);
        Ok(())
    }

    fn init_app(&mut self) -> Result<()> {
        let (app, entry) = (&mut self.app, &mut self.entry);
        let entry = entry
            .as_mut()
            .ok_or_else(|| anyhow!("window entry missing during init"))?;

        entry.with_mut(|fields| {
            let mut ctx = InitCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                    state: fields.window_state,
                },
                gpu: fields.gpu,
                seconds: fields.clock.seconds(),
            };
            app.on_init(&mut ctx)
        })
    }

    fn apply_commands(&mut self, event_loop: &ActiveEventLoop, mut ctx: RuntimeCtx) {
        for cmd in ctx.commands.drain(..) {
            match cmd {
                Command::Exit => self.exit_requested = true,
                Command::Fail(err) => {
                    log::error!("{err:#}");
                    self.failure = Some(err);
                    self.exit_requested = true;
                }
            }
        }

        if self.exit_requested {
            self.entry = None;
            event_loop.exit();
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let mut runtime_ctx = RuntimeCtx::default();
        let mut app_control = AppControl::Continue;

        let (app, bindings) = (&mut self.app, &self.config.bindings);
        if let Some(entry) = self.entry.as_mut() {
            entry.with_mut(|fields| {
                let seconds = fields.clock.seconds();

                {
                    let mut ctx = FrameCtx {
                        window: WindowCtx {
                            id: fields.window.id(),
                            window: fields.window,
                            state: fields.window_state,
                        },
                        gpu: fields.gpu,
                        input: fields.input_state,
                        input_frame: fields.input_frame,
                        bindings,
                        seconds,
                        runtime: &mut runtime_ctx,
                    };

                    app_control = app.on_frame(&mut ctx);
                }

                // Per-frame deltas are consumed by exactly one frame.
                fields.input_frame.clear();
            });
        }

        if app_control == AppControl::Exit {
            runtime_ctx.exit();
        }

        self.apply_commands(event_loop, runtime_ctx);
    }
}

/// Copies the window's current extents into `state`.
fn sync_extents(state: &mut WindowState, window: &Window, physical: PhysicalSize<u32>) {
    let logical: LogicalSize<u32> = physical.to_logical(window.scale_factor());
    state.apply(ResizeEvent::Window(Extent::new(logical.width, logical.height)));
    state.apply(ResizeEvent::Framebuffer(Extent::from(physical)));
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.exit_requested {
            return;
        }

        if let Err(e) = self.create_window_entry(event_loop) {
            self.fail(event_loop, e.context("failed to create initial window"));
            return;
        }

        if let Err(e) = self.init_app() {
            self.fail(event_loop, e.context("application initialization failed"));
            return;
        }

        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; the frame loop paces itself on the surface's
        // present mode.
        if let Some(entry) = self.entry.as_ref() {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.exit_requested {
            event_loop.exit();
            return;
        }

        // Split borrows to avoid `self` capture inside `ouroboros` closures.
        let (app, entry) = (&mut self.app, &mut self.entry);
        let Some(entry) = entry.as_mut() else {
            return;
        };
        if entry.with_window(|w| w.id()) != window_id {
            return;
        }

        entry.with_mut(|fields| {
            if let Some(ev) = translate_window_event(&event) {
                fields.input_state.apply_event(fields.input_frame, ev);
            }

            match &event {
                WindowEvent::CloseRequested => {
                    log::info!("window close requested");
                    fields.window_state.request_close();
                }

                WindowEvent::Resized(new_size) => {
                    sync_extents(fields.window_state, fields.window, *new_size);
                    fields.gpu.resize(*new_size);
                }

                WindowEvent::ScaleFactorChanged { .. } => {
                    let new_size = fields.window.inner_size();
                    sync_extents(fields.window_state, fields.window, new_size);
                    fields.gpu.resize(new_size);
                }

                _ => {}
            }
        });

        if app.on_window_event(&event) == AppControl::Exit {
            self.exit_requested = true;
            self.entry = None;
            event_loop.exit();
            return;
        }

        match &event {
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::CloseRequested | WindowEvent::Resized(_) => {
                if let Some(entry) = self.entry.as_ref() {
                    entry.with_window(|w| w.request_redraw());
                }
            }
            _ => {}
        }
    }
}
