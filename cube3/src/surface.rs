//! Rendering surface.

use crate::clock::Clock;
use crate::context::GraphicsContext;
use crate::input::KeySampler;

/// Rendering surface.
///
/// A surface is a window bundled with its graphics context. It is also the time source and the
/// keyboard the frame loop polls.
pub trait Surface: GraphicsContext + Clock + KeySampler {
  /// Whether the window system asked the surface to close.
  fn should_close(&self) -> bool;

  /// Size of the surface’s framebuffer.
  fn size(&self) -> [u32; 2];

  /// Swap the back and front buffers.
  fn swap_buffers(&mut self);

  /// Process pending window-system events without blocking.
  fn poll_events(&mut self);
}
