//! Backend interface.
//!
//! A backend owns the GPU objects the demo needs (shader stages, one program, one quad) and issues
//! the per-frame commands. Representations are opaque to this crate; they are wrapped by
//! [`Stage`], [`Program`] and [`Quad`], and must release their GPU resources when dropped.
//!
//! [`Stage`]: crate::shader::Stage
//! [`Program`]: crate::shader::Program
//! [`Quad`]: crate::quad::Quad

use std::error;
use std::fmt;

use crate::shader::{ProgramError, StageError, StageType, Uniform, UniformWarning};
use crate::transform::Transform;

/// Errors that can occur while uploading vertices.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum QuadError {
  /// No vertex to upload.
  NoData,
  /// The backend could not allocate the vertex objects.
  CannotCreate(String),
}

impl fmt::Display for QuadError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      QuadError::NoData => f.write_str("no vertex data"),
      QuadError::CannotCreate(ref e) => write!(f, "cannot create vertex objects: {}", e),
    }
  }
}

impl error::Error for QuadError {}

/// Graphics backend.
pub trait Backend {
  /// Compiled shader stage.
  type StageRepr;

  /// Linked shader program.
  type ProgramRepr;

  /// Uploaded vertices.
  type QuadRepr;

  /// Compile a shader stage.
  fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError>;

  /// Link a fragment and a vertex stage into a program.
  fn new_program(
    &mut self,
    fragment: &Self::StageRepr,
    vertex: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError>;

  /// Look up a uniform by name in a linked program.
  fn ask_uniform<T>(
    &mut self,
    program: &Self::ProgramRepr,
    name: &str,
  ) -> Result<Uniform<T>, UniformWarning>;

  /// A uniform bound to nothing; setting it does nothing.
  fn unbound_uniform<T>(&mut self) -> Uniform<T> {
    unsafe { Uniform::new(-1) }
  }

  /// Upload vertices, once.
  fn new_quad(&mut self, vertices: &[[f32; 3]]) -> Result<Self::QuadRepr, QuadError>;

  /// Make `program` the current program.
  fn use_program(&mut self, program: &Self::ProgramRepr);

  /// Clear the color buffer.
  fn clear(&mut self, color: [f32; 4]);

  /// Set the transform uniform of the current program.
  ///
  /// `column_major` is the transpose of the row-major [`Transform`]: it is sent to the GPU
  /// as-is.
  fn set_transform(&mut self, uniform: &Uniform<Transform>, column_major: &[f32; 16]);

  /// Draw `vert_nb` vertices of `quad` as triangles.
  fn draw(&mut self, quad: &Self::QuadRepr, vert_nb: usize);
}
