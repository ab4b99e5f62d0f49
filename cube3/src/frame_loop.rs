//! The update / render cycle.
//!
//! Each frame:
//!
//! 1. Stop if the surface was asked to close.
//! 2. Wait for the frame to be due ([`FrameClock::wait`]).
//! 3. Clear the frame.
//! 4. Poll the keyboard and move the [`Transform`].
//! 5. Upload the transposed transform to the `Transform` uniform.
//! 6. Draw the quad.
//! 7. Swap buffers and process window events.
//!
//! Everything that can fail happens in [`FrameLoop::new`], before the first frame.

use std::error;
use std::fmt;

use crate::backend::{Backend, QuadError};
use crate::clock::{FrameClock, Pacing};
use crate::config::Config;
use crate::quad::{Quad, QUAD_VERTICES};
use crate::shader::{Program, ProgramError};
use crate::surface::Surface;
use crate::transform::{MoveUnit, Transform};

/// Errors that can occur while preparing the frame loop.
#[derive(Debug)]
pub enum FrameLoopError {
  /// The shader program could not be built.
  Program(ProgramError),
  /// The quad could not be uploaded.
  Quad(QuadError),
}

impl fmt::Display for FrameLoopError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      FrameLoopError::Program(ref e) => write!(f, "{}", e),
      FrameLoopError::Quad(ref e) => write!(f, "quad error: {}", e),
    }
  }
}

impl error::Error for FrameLoopError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      FrameLoopError::Program(e) => Some(e),
      FrameLoopError::Quad(e) => Some(e),
    }
  }
}

impl From<ProgramError> for FrameLoopError {
  fn from(e: ProgramError) -> Self {
    FrameLoopError::Program(e)
  }
}

impl From<QuadError> for FrameLoopError {
  fn from(e: QuadError) -> Self {
    FrameLoopError::Quad(e)
  }
}

/// Frame loop state.
///
/// Owns the transform and every GPU resource drawn each frame. Dropping it releases them, so it
/// must be dropped before the surface it was created with.
pub struct FrameLoop<B>
where
  B: Backend,
{
  transform: Transform,
  clock: FrameClock,
  program: Program<B>,
  quad: Quad<B>,
  speed: f32,
  unit: MoveUnit,
  clear_color: [f32; 4],
  pacing: Pacing,
  frames: u64,
}

impl<B> FrameLoop<B>
where
  B: Backend,
{
  /// Load the shaders, upload the quad and start the frame clock.
  pub fn new<S>(surface: &mut S, config: &Config) -> Result<Self, FrameLoopError>
  where
    S: Surface<Backend = B>,
  {
    let program = Program::from_files(
      surface.backend(),
      config.fragment_shader(),
      config.vertex_shader(),
    )?;
    let quad = Quad::new(surface.backend(), &QUAD_VERTICES)?;

    surface.backend().use_program(&program.repr);

    // movement steps follow the configured size, whatever the framebuffer ended up being
    let [width, height] = surface.size();
    if [width, height] != config.size() {
      log::warn!(
        "framebuffer is {}x{}, moving in steps of a {}x{} surface",
        width,
        height,
        config.size()[0],
        config.size()[1]
      );
    }

    let clock = FrameClock::new(surface.now(), config.frame_interval());
    log::info!(
      "frame loop ready: {} fps, {} steps per frame",
      config.frame_rate(),
      config.speed()
    );

    Ok(FrameLoop {
      transform: Transform::IDENTITY,
      clock,
      program,
      quad,
      speed: config.speed(),
      unit: config.move_unit(),
      clear_color: config.clear_color(),
      pacing: config.pacing(),
      frames: 0,
    })
  }

  /// Current transform.
  pub fn transform(&self) -> &Transform {
    &self.transform
  }

  /// Frame clock.
  pub fn clock(&self) -> &FrameClock {
    &self.clock
  }

  /// Number of frames rendered so far.
  pub fn frames(&self) -> u64 {
    self.frames
  }

  /// Render one frame, waiting for it to be due first.
  pub fn step<S>(&mut self, surface: &mut S)
  where
    S: Surface<Backend = B>,
  {
    self.clock.wait(&*surface, self.pacing);

    surface.backend().clear(self.clear_color);

    let dirs = surface.sample_directions();
    self.transform.apply_movement(dirs, self.speed, self.unit);

    let backend = surface.backend();
    backend.set_transform(&self.program.transform, &self.transform.transposed());
    backend.draw(&self.quad.repr, self.quad.vert_nb());

    surface.swap_buffers();
    surface.poll_events();

    self.frames += 1;
  }

  /// Render frames until the surface is asked to close. Returns the number of frames rendered.
  pub fn run<S>(mut self, surface: &mut S) -> u64
  where
    S: Surface<Backend = B>,
  {
    'app: loop {
      if surface.should_close() {
        break 'app;
      }

      self.step(surface);
    }

    log::info!("closing after {} frames", self.frames);
    self.frames
  }
}
