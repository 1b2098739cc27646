mod app;
mod scene;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use trishade_engine::coords::Extent;
use trishade_engine::device::GpuInit;
use trishade_engine::frame_loop::{DrawMode, FrameLoopConfig, ReloadPolicy};
use trishade_engine::logging::{LoggingConfig, init_logging};
use trishade_engine::window::{Runtime, RuntimeConfig};

use crate::app::ViewerApp;

const DEFAULT_SHADER_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders");

/// Draws two triangles with hot-reloadable WGSL programs.
///
/// Keys: Escape exits, R reloads the active program from disk, 1-9 select a
/// program slot.
#[derive(Debug, Parser)]
#[command(name = "trishade", version, about)]
struct Cli {
    /// Directory the WGSL shader files are read from.
    #[arg(long, default_value = DEFAULT_SHADER_DIR)]
    shader_dir: PathBuf,

    /// Session log file (appended to).
    #[arg(long, default_value = "trishade.log")]
    log_file: PathBuf,

    /// Log filter in env_logger syntax; overrides RUST_LOG.
    #[arg(long)]
    log_filter: Option<String>,

    /// Draw every loaded program instead of only the active one.
    #[arg(long)]
    draw_all: bool,

    /// Exit when a reload fails instead of keeping the previous program.
    #[arg(long)]
    abort_on_reload_error: bool,

    /// Initial window width in screen units.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Initial window height in screen units.
    #[arg(long, default_value_t = 480)]
    height: u32,
}

impl Cli {
    fn loop_config(&self) -> FrameLoopConfig {
        FrameLoopConfig {
            draw_mode: if self.draw_all {
                DrawMode::AllSlots
            } else {
                DrawMode::ActiveOnly
            },
            reload_policy: if self.abort_on_reload_error {
                ReloadPolicy::Abort
            } else {
                ReloadPolicy::KeepPrevious
            },
            ..FrameLoopConfig::default()
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log_filter.clone(),
        log_file: Some(cli.log_file.clone()),
        ..LoggingConfig::default()
    })?;

    let config = RuntimeConfig {
        initial_size: Extent::new(cli.width.max(1), cli.height.max(1)),
        ..RuntimeConfig::default()
    };
    let app = ViewerApp::new(config.title.clone(), cli.shader_dir.clone(), cli.loop_config());

    Runtime::run(config, GpuInit::default(), app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_window() {
        let cli = Cli::try_parse_from(["trishade"]).unwrap();
        assert_eq!((cli.width, cli.height), (640, 480));
        assert_eq!(cli.log_file, PathBuf::from("trishade.log"));
        let config = cli.loop_config();
        assert_eq!(config.draw_mode, DrawMode::ActiveOnly);
        assert_eq!(config.reload_policy, ReloadPolicy::KeepPrevious);
    }

    #[test]
    fn flags_select_draw_mode_and_reload_policy() {
        let cli = Cli::try_parse_from(["trishade", "--draw-all", "--abort-on-reload-error"]).unwrap();
        let config = cli.loop_config();
        assert_eq!(config.draw_mode, DrawMode::AllSlots);
        assert_eq!(config.reload_policy, ReloadPolicy::Abort);
    }

    #[test]
    fn bundled_shader_dir_has_every_scene_file() {
        let dir = PathBuf::from(DEFAULT_SHADER_DIR);
        for program in &scene::PROGRAMS {
            assert!(dir.join(program.vertex).is_file(), "{}", program.vertex);
            assert!(dir.join(program.fragment).is_file(), "{}", program.fragment);
        }
    }
}
