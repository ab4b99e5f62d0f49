//! The rendered square.

use std::marker::PhantomData;

use crate::backend::{Backend, QuadError};

/// Half the side of the square, in normalized device coordinates.
pub const QUAD_HALF_EXTENT: f32 = 0.05;

/// Number of vertices in [`QUAD_VERTICES`].
pub const QUAD_VERTEX_COUNT: usize = 6;

const E: f32 = QUAD_HALF_EXTENT;

/// Two triangles forming a square centered at the origin.
pub const QUAD_VERTICES: [[f32; 3]; QUAD_VERTEX_COUNT] = [
  [-E, -E, 0.], // bottom-left
  [-E, E, 0.],  // top-left
  [E, E, 0.],   // top-right
  [E, E, 0.],   // top-right
  [E, -E, 0.],  // bottom-right
  [-E, -E, 0.], // bottom-left
];

/// Vertices uploaded once to the GPU.
pub struct Quad<B>
where
  B: Backend,
{
  pub(crate) repr: B::QuadRepr,
  vert_nb: usize,
  _b: PhantomData<*const B>,
}

impl<B> Quad<B>
where
  B: Backend,
{
  /// Upload `vertices`. They cannot be changed afterwards.
  pub fn new(backend: &mut B, vertices: &[[f32; 3]]) -> Result<Self, QuadError> {
    if vertices.is_empty() {
      return Err(QuadError::NoData);
    }

    let repr = backend.new_quad(vertices)?;
    log::debug!("quad uploaded ({} vertices)", vertices.len());

    Ok(Quad {
      repr,
      vert_nb: vertices.len(),
      _b: PhantomData,
    })
  }

  /// Number of vertices to draw.
  pub fn vert_nb(&self) -> usize {
    self.vert_nb
  }
}
