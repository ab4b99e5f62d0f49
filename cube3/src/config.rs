//! Demo configuration.

use std::path::{Path, PathBuf};

use crate::clock::Pacing;
use crate::transform::MoveUnit;

/// Path of the fragment shader source, relative to the working directory.
pub const DEFAULT_FRAGMENT_SHADER: &str = "shaders/fragment.glsl";

/// Path of the vertex shader source, relative to the working directory.
pub const DEFAULT_VERTEX_SHADER: &str = "shaders/vertex.glsl";

/// Demo configuration.
///
/// Feel free to look at the different methods available to tweak the options. You may want to start
/// with `default()` though.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
  title: String,
  size: [u32; 2],
  num_samples: Option<u32>,
  resizable: bool,
  sticky_keys: bool,
  fragment_shader: PathBuf,
  vertex_shader: PathBuf,
  frame_rate: u32,
  speed: f32,
  clear_color: [f32; 4],
  pacing: Pacing,
}

impl Default for Config {
  /// Defaults:
  ///
  /// - `title` set to `"Cube3"`.
  /// - `size` set to `[900, 900]`.
  /// - `num_samples` set to `Some(4)`.
  /// - `resizable` set to `false`.
  /// - `sticky_keys` set to `true`.
  /// - `fragment_shader` set to [`DEFAULT_FRAGMENT_SHADER`].
  /// - `vertex_shader` set to [`DEFAULT_VERTEX_SHADER`].
  /// - `frame_rate` set to `60`.
  /// - `speed` set to `25.`.
  /// - `clear_color` set to opaque black.
  /// - `pacing` set to `Pacing::Spin`.
  fn default() -> Self {
    Config {
      title: "Cube3".to_owned(),
      size: [900, 900],
      num_samples: Some(4),
      resizable: false,
      sticky_keys: true,
      fragment_shader: PathBuf::from(DEFAULT_FRAGMENT_SHADER),
      vertex_shader: PathBuf::from(DEFAULT_VERTEX_SHADER),
      frame_rate: 60,
      speed: 25.,
      clear_color: [0., 0., 0., 1.],
      pacing: Pacing::Spin,
    }
  }
}

impl Config {
  /// Window title.
  #[inline]
  pub fn set_title(self, title: impl Into<String>) -> Self {
    Config {
      title: title.into(),
      ..self
    }
  }

  /// Get the window title.
  #[inline]
  pub fn title(&self) -> &str {
    &self.title
  }

  /// Window size, in pixels. Also defines the length of one movement step.
  ///
  /// A `0` component is treated as `1`.
  #[inline]
  pub fn set_size(self, [width, height]: [u32; 2]) -> Self {
    Config {
      size: [width.max(1), height.max(1)],
      ..self
    }
  }

  /// Get the window size.
  #[inline]
  pub fn size(&self) -> [u32; 2] {
    self.size
  }

  /// Set the number of samples to use for multisampling.
  ///
  /// Pass `None` to disable multisampling.
  #[inline]
  pub fn set_num_samples<S>(self, samples: S) -> Self
  where
    S: Into<Option<u32>>,
  {
    Config {
      num_samples: samples.into(),
      ..self
    }
  }

  /// Get the number of samples to use in multisampling, if any.
  #[inline]
  pub fn num_samples(&self) -> Option<u32> {
    self.num_samples
  }

  /// Whether the window can be resized by the user.
  #[inline]
  pub fn set_resizable(self, resizable: bool) -> Self {
    Config { resizable, ..self }
  }

  /// Get whether the window can be resized.
  #[inline]
  pub fn resizable(&self) -> bool {
    self.resizable
  }

  /// Whether key presses shorter than a frame are kept until the next poll.
  #[inline]
  pub fn set_sticky_keys(self, sticky_keys: bool) -> Self {
    Config {
      sticky_keys,
      ..self
    }
  }

  /// Get whether sticky keys are enabled.
  #[inline]
  pub fn sticky_keys(&self) -> bool {
    self.sticky_keys
  }

  /// Path to the fragment shader source.
  #[inline]
  pub fn set_fragment_shader(self, path: impl Into<PathBuf>) -> Self {
    Config {
      fragment_shader: path.into(),
      ..self
    }
  }

  /// Get the path to the fragment shader source.
  #[inline]
  pub fn fragment_shader(&self) -> &Path {
    &self.fragment_shader
  }

  /// Path to the vertex shader source.
  #[inline]
  pub fn set_vertex_shader(self, path: impl Into<PathBuf>) -> Self {
    Config {
      vertex_shader: path.into(),
      ..self
    }
  }

  /// Get the path to the vertex shader source.
  #[inline]
  pub fn vertex_shader(&self) -> &Path {
    &self.vertex_shader
  }

  /// Target frame rate, in frames per second. `0` is treated as `1`.
  #[inline]
  pub fn set_frame_rate(self, frame_rate: u32) -> Self {
    Config {
      frame_rate: frame_rate.max(1),
      ..self
    }
  }

  /// Get the target frame rate.
  #[inline]
  pub fn frame_rate(&self) -> u32 {
    self.frame_rate
  }

  /// Movement steps per frame while a direction is held.
  #[inline]
  pub fn set_speed(self, speed: f32) -> Self {
    Config { speed, ..self }
  }

  /// Get the movement speed.
  #[inline]
  pub fn speed(&self) -> f32 {
    self.speed
  }

  /// Color the frame is cleared with, as RGBA.
  #[inline]
  pub fn set_clear_color(self, clear_color: [f32; 4]) -> Self {
    Config {
      clear_color,
      ..self
    }
  }

  /// Get the clear color.
  #[inline]
  pub fn clear_color(&self) -> [f32; 4] {
    self.clear_color
  }

  /// Frame pacing strategy.
  #[inline]
  pub fn set_pacing(self, pacing: Pacing) -> Self {
    Config { pacing, ..self }
  }

  /// Get the frame pacing strategy.
  #[inline]
  pub fn pacing(&self) -> Pacing {
    self.pacing
  }

  /// Target frame interval, in seconds.
  pub fn frame_interval(&self) -> f64 {
    1. / self.frame_rate as f64
  }

  /// Length of one movement step.
  pub fn move_unit(&self) -> MoveUnit {
    MoveUnit::from_size(self.size)
  }
}
