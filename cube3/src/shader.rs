//! Shader API.
//!
//! Shader sources are plain text files read at startup. A [`Stage`] is one compiled source; a
//! [`Program`] links a fragment and a vertex stage together. Stages are only needed until the
//! program is linked and are released right after.

use std::error;
use std::fmt;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::backend::Backend;
use crate::transform::Transform;

/// Name of the transform uniform in the vertex shader.
pub const TRANSFORM_UNIFORM: &str = "Transform";

/// A shader stage type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StageType {
  /// Vertex shader.
  VertexShader,
  /// Fragment shader.
  FragmentShader,
}

impl fmt::Display for StageType {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageType::VertexShader => f.write_str("vertex shader"),
      StageType::FragmentShader => f.write_str("fragment shader"),
    }
  }
}

/// A shader source file could not be read.
#[derive(Debug)]
pub struct SourceError {
  path: PathBuf,
  source: io::Error,
}

impl SourceError {
  /// Path that failed to be read.
  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl fmt::Display for SourceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    write!(f, "{}: {}", self.path.display(), self.source)
  }
}

impl error::Error for SourceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    Some(&self.source)
  }
}

/// Read a whole shader source file.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, SourceError> {
  let path = path.as_ref();

  fs::read_to_string(path).map_err(|source| SourceError {
    path: path.to_owned(),
    source,
  })
}

/// Errors that shader stages can emit.
#[derive(Clone, Debug)]
pub enum StageError {
  /// The backend refused to allocate a new stage.
  CreationFailed(StageType),
  /// Occurs when a shader fails to compile. The `String` is the compiler log.
  CompilationFailed(StageType, String),
}

impl StageError {
  /// Shader compilation error.
  pub fn compilation_failed(ty: StageType, reason: impl Into<String>) -> Self {
    StageError::CompilationFailed(ty, reason.into())
  }
}

impl fmt::Display for StageError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StageError::CreationFailed(ty) => write!(f, "unable to create {}", ty),
      StageError::CompilationFailed(ref ty, ref r) => write!(f, "{} compilation error: {}", ty, r),
    }
  }
}

impl error::Error for StageError {}

/// Errors that a [`Program`] can generate.
#[derive(Debug)]
pub enum ProgramError {
  /// A shader source could not be read.
  Source(SourceError),
  /// A shader stage failed to compile.
  Stage(StageError),
  /// Program link failed. You can inspect the reason by looking at the contained `String`.
  LinkFailed(String),
}

impl ProgramError {
  /// Shader program link error.
  pub fn link_failed(reason: impl Into<String>) -> Self {
    ProgramError::LinkFailed(reason.into())
  }
}

impl fmt::Display for ProgramError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ProgramError::Source(ref e) => write!(f, "cannot read shader source: {}", e),
      ProgramError::Stage(ref e) => write!(f, "shader program has stage error: {}", e),
      ProgramError::LinkFailed(ref s) => write!(f, "shader linker error: {}", s),
    }
  }
}

impl error::Error for ProgramError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ProgramError::Source(e) => Some(e),
      ProgramError::Stage(e) => Some(e),
      ProgramError::LinkFailed(_) => None,
    }
  }
}

impl From<SourceError> for ProgramError {
  fn from(e: SourceError) -> Self {
    ProgramError::Source(e)
  }
}

impl From<StageError> for ProgramError {
  fn from(e: StageError) -> Self {
    ProgramError::Stage(e)
  }
}

/// Warnings related to uniform issues.
#[derive(Debug, Eq, PartialEq)]
pub enum UniformWarning {
  /// Inactive uniform (not in use / no participation to the final output in shaders).
  Inactive(String),
}

impl UniformWarning {
  /// Create an inactive uniform warning.
  pub fn inactive<N>(name: N) -> Self
  where
    N: Into<String>,
  {
    UniformWarning::Inactive(name.into())
  }
}

impl fmt::Display for UniformWarning {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      UniformWarning::Inactive(ref s) => write!(f, "inactive {} uniform", s),
    }
  }
}

impl error::Error for UniformWarning {}

/// A typed uniform location.
#[derive(Debug, Eq, PartialEq)]
pub struct Uniform<T>
where
  T: ?Sized,
{
  index: i32,
  _t: PhantomData<*const T>,
}

impl<T> Uniform<T>
where
  T: ?Sized,
{
  /// Wrap a backend uniform location.
  ///
  /// # Safety
  ///
  /// `index` must be a location obtained from the backend for a uniform of type `T`, or `-1`.
  pub unsafe fn new(index: i32) -> Self {
    Uniform {
      index,
      _t: PhantomData,
    }
  }

  /// Backend location of the uniform.
  pub fn index(&self) -> i32 {
    self.index
  }
}

/// A compiled shader stage.
pub struct Stage<B>
where
  B: Backend,
{
  repr: B::StageRepr,
}

impl<B> Stage<B>
where
  B: Backend,
{
  /// Compile a stage from its source code.
  pub fn new(backend: &mut B, ty: StageType, src: &str) -> Result<Self, StageError> {
    let repr = backend.new_stage(ty, src)?;
    log::debug!("{} compiled", ty);

    Ok(Stage { repr })
  }

  /// Read and compile a stage.
  pub fn from_file(
    backend: &mut B,
    ty: StageType,
    path: impl AsRef<Path>,
  ) -> Result<Self, ProgramError> {
    let path = path.as_ref();
    let src = read_source(path)?;
    log::debug!("read {} from {}", ty, path.display());

    Ok(Self::new(backend, ty, &src)?)
  }
}

/// A linked shader program, along with its transform uniform.
pub struct Program<B>
where
  B: Backend,
{
  pub(crate) repr: B::ProgramRepr,
  pub(crate) transform: Uniform<Transform>,
}

impl<B> Program<B>
where
  B: Backend,
{
  /// Link a fragment and a vertex stage.
  ///
  /// If the program doesn’t use the [`TRANSFORM_UNIFORM`], a warning is logged and transform
  /// updates do nothing.
  pub fn from_stages(
    backend: &mut B,
    fragment: &Stage<B>,
    vertex: &Stage<B>,
  ) -> Result<Self, ProgramError> {
    let repr = backend.new_program(&fragment.repr, &vertex.repr)?;

    let transform = match backend.ask_uniform(&repr, TRANSFORM_UNIFORM) {
      Ok(uniform) => uniform,
      Err(warning) => {
        log::warn!("{}", warning);
        backend.unbound_uniform()
      }
    };

    Ok(Program { repr, transform })
  }

  /// Read, compile and link the fragment and vertex shaders at the given paths.
  ///
  /// Both stages are released once the program is linked.
  pub fn from_files(
    backend: &mut B,
    fragment_path: impl AsRef<Path>,
    vertex_path: impl AsRef<Path>,
  ) -> Result<Self, ProgramError> {
    let fragment = Stage::from_file(backend, StageType::FragmentShader, fragment_path)?;
    let vertex = Stage::from_file(backend, StageType::VertexShader, vertex_path)?;
    let program = Self::from_stages(backend, &fragment, &vertex)?;
    log::info!("shader program linked");

    Ok(program)
  }
}
