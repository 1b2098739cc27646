use std::path::PathBuf;

use anyhow::{Context, Result};
use trishade_engine::core::{App, AppControl, FrameCtx, InitCtx};
use trishade_engine::frame_loop::{FrameInput, FrameLoop, FrameLoopConfig, LoopState, ReloadOutcome};
use trishade_engine::geometry::{GeometryStore, VertexLayout};
use trishade_engine::render::WgpuProgram;
use trishade_engine::shader::{DEFAULT_CAPACITY, ProgramRegistry, ProgramSources};
use trishade_engine::time::fps_title;

use crate::scene::PROGRAMS;

/// Draws the scene programs and reacts to exit/reload/select keys.
pub struct ViewerApp {
    title: String,
    shader_dir: PathBuf,
    loop_config: FrameLoopConfig,
    geometry: GeometryStore,
    frame_loop: Option<FrameLoop<WgpuProgram>>,
}

impl ViewerApp {
    pub fn new(title: String, shader_dir: PathBuf, loop_config: FrameLoopConfig) -> Self {
        Self {
            title,
            shader_dir,
            loop_config,
            geometry: GeometryStore::new(),
            frame_loop: None,
        }
    }
}

impl App for ViewerApp {
    fn on_init(&mut self, ctx: &mut InitCtx<'_, '_>) -> Result<()> {
        let handles: Vec<_> = PROGRAMS
            .iter()
            .map(|p| self.geometry.upload_triangle(ctx.gpu.device(), &p.triangle))
            .collect();

        let registry = ProgramRegistry::new(DEFAULT_CAPACITY, VertexLayout::position_color());
        let mut frame_loop = FrameLoop::new(registry, self.loop_config.clone(), ctx.seconds);
        let mut backend = ctx.backend(&self.geometry);

        for (program, geometry) in PROGRAMS.iter().zip(handles) {
            let sources = ProgramSources::in_dir(&self.shader_dir, program.vertex, program.fragment);
            frame_loop
                .load(&mut backend, program.slot, program.label, sources, geometry)
                .with_context(|| format!("failed to load program '{}'", program.label))?;
            frame_loop.set_color(program.slot, program.color)?;
        }
        frame_loop.select(0)?;

        log::info!(
            "{} programs loaded from {}",
            frame_loop.registry().count(),
            self.shader_dir.display()
        );
        self.frame_loop = Some(frame_loop);
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(frame_loop) = self.frame_loop.as_mut() else {
            return AppControl::Exit;
        };

        let input = FrameInput {
            now: ctx.seconds,
            window: ctx.window.state,
            actions: ctx.actions(),
        };

        let result = {
            let mut backend = ctx.backend(&self.geometry);
            frame_loop.run_frame(&mut backend, input)
        };

        let report = match result {
            Ok(report) => report,
            Err(err) => {
                ctx.runtime.fail(anyhow::Error::new(err).context("shader reload aborted"));
                return AppControl::Exit;
            }
        };

        if let Some(sample) = report.fps {
            ctx.window.set_title(&fps_title(&self.title, sample.fps));
        }

        // Failures are already logged by the frame loop.
        if let Some(ReloadOutcome::Reloaded { slot, generation }) = &report.reload {
            log::info!("reloaded program slot {slot} (generation {generation})");
        }

        match report.state {
            LoopState::Running => AppControl::Continue,
            LoopState::Terminating => AppControl::Exit,
        }
    }
}
