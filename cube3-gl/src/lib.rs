//! OpenGL backend.
//!
//! This crate exports an [OpenGL](https://www.khronos.org/opengl/) 3.3 backend for cube3. The GL
//! function pointers must be loaded (`gl::load_with`) and the context made current before creating
//! a [`GL33`].

pub mod gl33;

pub use gl33::GL33;
