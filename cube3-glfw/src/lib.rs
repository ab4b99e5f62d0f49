//! [GLFW](https://crates.io/crates/glfw) surface for cube3.
//!
//! [`GlfwSurface::new`] opens the window, creates an OpenGL 3.3 core, forward-compatible context
//! and the [`GL33`] backend on top of it. The surface is then the [`Surface`] the frame loop drives.

#![deny(missing_docs)]

use cube3::clock::Clock;
use cube3::context::GraphicsContext;
use cube3::input::{Direction, Directions, KeySampler};
use cube3::surface::Surface;
use cube3::Config;
pub use cube3_gl::gl33::StateQueryError;
use cube3_gl::GL33;
use glfw::{Action, Context as _, InitError, Key, Window, WindowEvent};
use std::{error, fmt, os::raw::c_void, sync::mpsc::Receiver};

pub use glfw;

/// Error that can be risen while creating a surface.
#[non_exhaustive]
#[derive(Debug)]
pub enum GlfwSurfaceError {
  /// Initialization of the surface went wrong.
  ///
  /// This variant exposes a **glfw** error for further information about what went wrong.
  InitError(InitError),

  /// The window (and its context) could not be created.
  WindowCreationFailed,

  /// The graphics state is not available.
  ///
  /// This error is generated when the initialization code is called on a thread on which the
  /// graphics state has already been acquired, or when the OpenGL functions could not be loaded.
  GraphicsStateError(StateQueryError),
}

impl fmt::Display for GlfwSurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      GlfwSurfaceError::InitError(ref e) => write!(f, "failed to initialize GLFW: {}", e),
      GlfwSurfaceError::WindowCreationFailed => f.write_str("failed to open GLFW window"),
      GlfwSurfaceError::GraphicsStateError(ref e) => {
        write!(f, "failed to get graphics state: {}", e)
      }
    }
  }
}

impl From<InitError> for GlfwSurfaceError {
  fn from(e: InitError) -> Self {
    GlfwSurfaceError::InitError(e)
  }
}

impl From<StateQueryError> for GlfwSurfaceError {
  fn from(e: StateQueryError) -> Self {
    GlfwSurfaceError::GraphicsStateError(e)
  }
}

impl error::Error for GlfwSurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      GlfwSurfaceError::InitError(e) => Some(e),
      GlfwSurfaceError::WindowCreationFailed => None,
      GlfwSurfaceError::GraphicsStateError(e) => Some(e),
    }
  }
}

/// GLFW surface.
///
/// Owns the GLFW window, its event receiver and the OpenGL 3.3 backend. GLFW is terminated when it
/// is dropped, so every GPU resource must be dropped before it.
#[derive(Debug)]
pub struct GlfwSurface {
  /// Wrapped GLFW window.
  pub window: Window,

  /// Wrapped GLFW events queue.
  pub events_rx: Receiver<(f64, WindowEvent)>,

  /// OpenGL 3.3 state.
  gl: GL33,
}

impl GlfwSurface {
  /// Initialize GLFW and open a window according to `config`.
  pub fn new(config: &Config) -> Result<Self, GlfwSurfaceError> {
    let mut glfw = glfw::init(glfw::LOG_ERRORS)?;

    // window and OpenGL hints
    glfw.window_hint(glfw::WindowHint::Samples(config.num_samples()));
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::Resizable(config.resizable()));

    let [width, height] = config.size();
    let (mut window, events_rx) = glfw
      .create_window(width, height, config.title(), glfw::WindowMode::Windowed)
      .ok_or(GlfwSurfaceError::WindowCreationFailed)?;

    window.make_current();
    window.set_sticky_keys(config.sticky_keys());
    window.set_close_polling(true);

    // init OpenGL
    gl::load_with(|s| window.get_proc_address(s) as *const c_void);

    let gl = GL33::new()?;
    log::info!(
      "opened {}x{} window “{}” ({} samples)",
      width,
      height,
      config.title(),
      config.num_samples().unwrap_or(0)
    );

    Ok(GlfwSurface {
      window,
      events_rx,
      gl,
    })
  }
}

unsafe impl GraphicsContext for GlfwSurface {
  type Backend = GL33;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.gl
  }
}

impl Clock for GlfwSurface {
  fn now(&self) -> f64 {
    self.window.glfw.get_time()
  }
}

impl KeySampler for GlfwSurface {
  fn sample_directions(&self) -> Directions {
    Directions::from_fn(|dir| self.window.get_key(direction_key(dir)) == Action::Press)
  }
}

impl Surface for GlfwSurface {
  fn should_close(&self) -> bool {
    self.window.should_close()
  }

  fn size(&self) -> [u32; 2] {
    let (w, h) = self.window.get_framebuffer_size();
    [w as u32, h as u32]
  }

  fn swap_buffers(&mut self) {
    self.window.swap_buffers();
  }

  fn poll_events(&mut self) {
    self.window.glfw.poll_events();

    for (_, event) in glfw::flush_messages(&self.events_rx) {
      if let WindowEvent::Close = event {
        log::debug!("close requested");
      } else {
        log::trace!("window event: {:?}", event);
      }
    }
  }
}

/// Key moving the object in a given direction.
pub fn direction_key(dir: Direction) -> Key {
  match dir {
    Direction::Left => Key::Left,
    Direction::Right => Key::Right,
    Direction::Up => Key::Up,
    Direction::Down => Key::Down,
  }
}
