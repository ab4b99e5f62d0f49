//! Move a red square around with the arrow keys. Leaving the screen by one edge brings it back by
//! the opposite one.
//!
//! Run from the workspace root so that `shaders/` is found. Close the window to quit.

use cube3::{Config, FrameLoop, FrameLoopError};
use cube3_glfw::{GlfwSurface, GlfwSurfaceError};
use std::{error, fmt, process};

/// Exit status of bootstrap failures (window, context, backend).
const EXIT_BOOTSTRAP: i32 = -1;

/// Exit status of resource failures (shaders, vertices).
const EXIT_FAILURE: i32 = 1;

#[derive(Debug)]
enum AppError {
  Surface(GlfwSurfaceError),
  FrameLoop(FrameLoopError),
}

impl AppError {
  fn exit_code(&self) -> i32 {
    match self {
      AppError::Surface(_) => EXIT_BOOTSTRAP,
      AppError::FrameLoop(_) => EXIT_FAILURE,
    }
  }
}

impl fmt::Display for AppError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      AppError::Surface(ref e) => write!(f, "{}", e),
      AppError::FrameLoop(ref e) => write!(f, "{}", e),
    }
  }
}

impl error::Error for AppError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      AppError::Surface(e) => Some(e),
      AppError::FrameLoop(e) => Some(e),
    }
  }
}

impl From<GlfwSurfaceError> for AppError {
  fn from(e: GlfwSurfaceError) -> Self {
    AppError::Surface(e)
  }
}

impl From<FrameLoopError> for AppError {
  fn from(e: FrameLoopError) -> Self {
    AppError::FrameLoop(e)
  }
}

// the frame loop is consumed before the surface goes out of scope, so GPU resources are released
// while the context is still alive
fn run(config: &Config) -> Result<u64, AppError> {
  let mut surface = GlfwSurface::new(config)?;
  let frame_loop = FrameLoop::new(&mut surface, config)?;

  Ok(frame_loop.run(&mut surface))
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();

  let config = Config::default();

  match run(&config) {
    Ok(frames) => log::info!("bye ({} frames)", frames),

    Err(e) => {
      eprintln!("{}", e);
      log::debug!("{:?}", e);
      process::exit(e.exit_code());
    }
  }
}
