//! Graphics context.

use crate::backend::Backend;

/// Class of graphics context.
///
/// A graphics context gives access to a [`Backend`] that is ready to issue commands.
///
/// # Safety
///
/// Implementors must ensure the backend’s underlying API context is current on the calling thread
/// for as long as the context is alive.
pub unsafe trait GraphicsContext: Sized {
  /// Backend type.
  type Backend: Backend;

  /// Access the underlying backend.
  fn backend(&mut self) -> &mut Self::Backend;
}
