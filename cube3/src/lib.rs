//! # cube3
//!
//! Platform-agnostic core of the cube3 demo: a single quad moved around the screen with the arrow
//! keys, wrapping from one edge of the normalized device coordinates space to the opposite one.
//!
//! This crate doesn’t know anything about OpenGL or about windows. It exposes the state and the
//! rules of the demo, and the traits a platform must implement to run it:
//!
//! - [`backend::Backend`] compiles shaders, owns GPU objects and issues the draw commands.
//! - [`context::GraphicsContext`] gives access to a backend.
//! - [`surface::Surface`] adds the windowing part: close requests, buffer swapping, events, the
//!   time source ([`clock::Clock`]) and keyboard polling ([`input::KeySampler`]).
//!
//! The [`frame_loop::FrameLoop`] ties everything together.

pub mod backend;
pub mod clock;
pub mod config;
pub mod context;
pub mod frame_loop;
pub mod input;
pub mod quad;
pub mod shader;
pub mod surface;
pub mod transform;

pub use crate::config::Config;
pub use crate::frame_loop::{FrameLoop, FrameLoopError};
pub use crate::input::{Direction, Directions};
pub use crate::transform::{MoveUnit, Transform};
