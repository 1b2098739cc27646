use crate::geometry::GeometryHandle;
use crate::input::FrameActions;
use crate::paint::Color;
use crate::render::{FrameBackend, FrameStatus};
use crate::shader::{
    ProgramBackend, ProgramRegistry, ProgramSources, SemanticUniform, ShaderError, ShaderProgram,
    UniformValues,
};
use crate::time::{FpsSample, FrameTimer};
use crate::window::WindowState;

use super::config::{DrawMode, FrameLoopConfig, ReloadPolicy};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    /// Terminal; no further frames are drawn.
    Terminating,
}

/// Everything the loop reads about the outside world for one frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameInput<'a> {
    /// Seconds on the frame clock.
    pub now: f64,
    pub window: &'a WindowState,
    pub actions: FrameActions,
}

/// Result of a reload request.
#[derive(Debug)]
pub enum ReloadOutcome {
    Reloaded { slot: usize, generation: u64 },
    /// The reload failed and the slot still holds its previous program.
    Kept { slot: usize, error: ShaderError },
}

/// What happened during one call to [`FrameLoop::run_frame`].
#[derive(Debug)]
pub struct FrameReport {
    pub state: LoopState,
    pub fps: Option<FpsSample>,
    pub reload: Option<ReloadOutcome>,
    /// Draw calls submitted this frame.
    pub draws: usize,
}

impl FrameReport {
    fn new(state: LoopState) -> Self {
        Self {
            state,
            fps: None,
            reload: None,
            draws: 0,
        }
    }
}

/// Per-slot draw inputs that live outside the program itself.
#[derive(Debug, Clone)]
struct SlotBinding {
    geometry: GeometryHandle,
    uniforms: UniformValues,
}

/// Coordinates the registry, the throughput timer and per-frame drawing.
///
/// `P` is the backend's program handle type.
#[derive(Debug)]
pub struct FrameLoop<P> {
    registry: ProgramRegistry<P>,
    bindings: Vec<Option<SlotBinding>>,
    timer: FrameTimer,
    config: FrameLoopConfig,
    state: LoopState,
}

impl<P> FrameLoop<P> {
    /// `start` is the clock reading the first throughput sample is measured from.
    pub fn new(registry: ProgramRegistry<P>, config: FrameLoopConfig, start: f64) -> Self {
        let bindings = vec![None; registry.capacity()];
        let timer = FrameTimer::new(config.sample_interval, start);
        Self {
            registry,
            bindings,
            timer,
            config,
            state: LoopState::Running,
        }
    }

    pub fn registry(&self) -> &ProgramRegistry<P> {
        &self.registry
    }

    pub fn config(&self) -> &FrameLoopConfig {
        &self.config
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Loads a program into `slot` and binds it to `geometry`.
    ///
    /// Replacing a loaded slot keeps its uniform values and re-uploads them.
    pub fn load<B>(
        &mut self,
        backend: &mut B,
        slot: usize,
        label: &str,
        sources: ProgramSources,
        geometry: GeometryHandle,
    ) -> Result<&ShaderProgram<P>, ShaderError>
    where
        B: ProgramBackend<Program = P>,
    {
        let program = self.registry.load(backend, slot, label, sources)?;

        let initial = self.config.initial_color;
        let binding = self.bindings[slot].get_or_insert_with(|| SlotBinding {
            geometry,
            uniforms: UniformValues::new(initial.to_array()),
        });
        binding.geometry = geometry;
        binding.uniforms.mark_all_dirty();

        Ok(program)
    }

    /// Makes `slot` the active program.
    pub fn select(&mut self, slot: usize) -> Result<(), ShaderError> {
        self.registry.select(slot)
    }

    /// Sets the `input_color` uniform of a loaded slot.
    pub fn set_color(&mut self, slot: usize, color: Color) -> Result<(), ShaderError> {
        let binding = self.binding_mut(slot)?;
        binding
            .uniforms
            .set(SemanticUniform::PrimaryColor, color.to_array());
        Ok(())
    }

    pub fn color(&self, slot: usize) -> Option<Color> {
        self.bindings
            .get(slot)?
            .as_ref()
            .map(|b| Color::from(b.uniforms.get(SemanticUniform::PrimaryColor)))
    }

    /// Moves the loop to [`LoopState::Terminating`].
    pub fn terminate(&mut self) {
        if self.state != LoopState::Terminating {
            log::info!("frame loop terminating");
        }
        self.state = LoopState::Terminating;
    }

    /// Runs one iteration.
    ///
    /// Order: exit and close checks, slot selection, throughput sample,
    /// reload of the active slot, then clear, viewport, uniform upload, draw
    /// and present. An exit or close request ends the loop before anything
    /// is drawn. `Err` is only returned for a failed reload under
    /// [`ReloadPolicy::Abort`]; the loop is terminated first.
    pub fn run_frame<B>(
        &mut self,
        backend: &mut B,
        input: FrameInput<'_>,
    ) -> Result<FrameReport, ShaderError>
    where
        B: FrameBackend<Program = P>,
    {
        if self.state == LoopState::Terminating {
            return Ok(FrameReport::new(self.state));
        }

        if input.actions.exit || input.window.close_requested() {
            self.terminate();
            return Ok(FrameReport::new(self.state));
        }

        if let Some(slot) = input.actions.select {
            self.select_populated(slot);
        }

        let mut report = FrameReport::new(self.state);

        // Sampled before the reload so a slow recompile lands in the next
        // sample rather than this one.
        report.fps = self.timer.tick(input.now);
        if let Some(sample) = report.fps {
            log::debug!("fps: {:.2} ({} frames in {:.3}s)", sample.fps, sample.frames, sample.elapsed);
        }

        if input.actions.reload {
            report.reload = Some(self.reload_active(backend)?);
        }

        match backend.begin_frame(self.config.clear_color) {
            FrameStatus::Ready => {}
            FrameStatus::Skip => return Ok(report),
            FrameStatus::Fatal => {
                log::error!("surface is unusable; stopping");
                self.terminate();
                report.state = self.state;
                return Ok(report);
            }
        }

        backend.set_viewport(input.window.viewport());

        report.draws = match self.config.draw_mode {
            DrawMode::ActiveOnly => self.draw_slot(backend, self.registry.active_index()),
            DrawMode::AllSlots => {
                let populated: Vec<usize> = self.registry.iter().map(|(i, _)| i).collect();
                populated
                    .into_iter()
                    .map(|slot| self.draw_slot(backend, slot))
                    .sum()
            }
        };

        backend.end_frame();
        Ok(report)
    }

    fn select_populated(&mut self, slot: usize) {
        if self.registry.get(slot).is_none() {
            log::debug!("ignoring selection of empty program slot {slot}");
            return;
        }
        if let Err(err) = self.registry.select(slot) {
            log::warn!("{err}");
        }
    }

    fn reload_active<B>(&mut self, backend: &mut B) -> Result<ReloadOutcome, ShaderError>
    where
        B: ProgramBackend<Program = P>,
    {
        let slot = self.registry.active_index();
        log::info!("reloading program slot {slot}");

        match self.registry.reload(backend, slot) {
            Ok(program) => {
                let generation = program.generation();
                if let Some(binding) = self.bindings[slot].as_mut() {
                    binding.uniforms.mark_all_dirty();
                }
                Ok(ReloadOutcome::Reloaded { slot, generation })
            }
            Err(error) => match self.config.reload_policy {
                ReloadPolicy::KeepPrevious => {
                    log::error!("reload of slot {slot} failed ({}), keeping previous program: {error}", error.kind());
                    Ok(ReloadOutcome::Kept { slot, error })
                }
                ReloadPolicy::Abort => {
                    log::error!("reload of slot {slot} failed ({}): {error}", error.kind());
                    self.terminate();
                    Err(error)
                }
            },
        }
    }

    /// Uploads dirty uniforms and draws one slot. Returns the number of draws.
    fn draw_slot<B>(&mut self, backend: &mut B, slot: usize) -> usize
    where
        B: FrameBackend<Program = P>,
    {
        let Some(program) = self.registry.get(slot) else { return 0; };
        let Some(binding) = self.bindings.get_mut(slot).and_then(Option::as_mut) else {
            log::warn!("program slot {slot} has no geometry bound");
            return 0;
        };

        let handle = program.handle();
        let locations = program.uniforms();
        binding
            .uniforms
            .flush(|uniform, value| backend.write_uniform(handle, locations.get(uniform), value));
        backend.draw(handle, binding.geometry);
        1
    }

    fn binding_mut(&mut self, slot: usize) -> Result<&mut SlotBinding, ShaderError> {
        let capacity = self.bindings.len();
        match self.bindings.get_mut(slot) {
            None => Err(ShaderError::SlotOutOfRange { index: slot, capacity }),
            Some(None) => Err(ShaderError::EmptySlot { index: slot }),
            Some(Some(binding)) => Ok(binding),
        }
    }
}
