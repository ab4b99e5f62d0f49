//! Object transform and its update rule.
//!
//! The transform is a homogeneous 4x4 matrix stored **row-major**:
//!
//! ```text
//! |r11 r12 r13 tX|
//! |r21 r22 r23 tY|
//! |r31 r32 r33 tZ|
//! |pX  pY  pZ  G |
//! ```
//!
//! Its contiguous memory layout is thus `r11 r12 r13 tX r21 r22 r23 tY r31 r32 r33 tZ pX pY pZ G`.
//! GPU programs expect column-major matrices, so what gets uploaded is [`Transform::transposed`].

use crate::input::Directions;

/// Distance covered by one input step, per axis, expressed in normalized device coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoveUnit {
  /// Horizontal distance per step.
  pub x: f32,
  /// Vertical distance per step.
  pub y: f32,
}

impl MoveUnit {
  /// One step is one pixel of a surface of `[width, height]` pixels. A `0` dimension counts as
  /// one pixel.
  pub fn from_size([width, height]: [u32; 2]) -> Self {
    MoveUnit {
      x: 1. / width.max(1) as f32,
      y: 1. / height.max(1) as f32,
    }
  }
}

/// Row-major homogeneous transform.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform([[f32; 4]; 4]);

impl Default for Transform {
  fn default() -> Self {
    Self::IDENTITY
  }
}

impl Transform {
  /// The identity transform.
  pub const IDENTITY: Transform = Transform([
    [1., 0., 0., 0.],
    [0., 1., 0., 0.],
    [0., 0., 1., 0.],
    [0., 0., 0., 1.],
  ]);

  /// Build a transform out of its rows.
  pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
    Transform(rows)
  }

  /// Rows of the matrix.
  pub fn rows(&self) -> &[[f32; 4]; 4] {
    &self.0
  }

  /// The 16 cells, row after row.
  pub fn to_row_major(&self) -> [f32; 16] {
    let mut out = [0.; 16];

    for (cell, value) in out.iter_mut().zip(self.0.iter().flatten()) {
      *cell = *value;
    }

    out
  }

  /// Column-major image of the matrix; the literal transpose of [`Transform::to_row_major`].
  pub fn transposed(&self) -> [f32; 16] {
    let mut out = [0.; 16];

    for (r, row) in self.0.iter().enumerate() {
      for (c, cell) in row.iter().enumerate() {
        out[c * 4 + r] = *cell;
      }
    }

    out
  }

  /// Horizontal translation.
  pub fn tx(&self) -> f32 {
    self.0[0][3]
  }

  /// Vertical translation.
  pub fn ty(&self) -> f32 {
    self.0[1][3]
  }

  /// Set the horizontal translation.
  pub fn set_tx(&mut self, tx: f32) {
    self.0[0][3] = tx;
  }

  /// Set the vertical translation.
  pub fn set_ty(&mut self, ty: f32) {
    self.0[1][3] = ty;
  }

  /// Move the transform according to the held directions.
  ///
  /// Each held direction contributes `speed * unit` on its axis; opposite directions cancel out.
  /// Both axes are updated every call, even when nothing is held. A translation that ends up
  /// strictly above `1.` is reset to `-1.`, one strictly below `-1.` is reset to `1.`: the object
  /// leaves the screen by one edge and comes back by the opposite one. Landing exactly on `±1.`
  /// doesn’t wrap.
  pub fn apply_movement(&mut self, dirs: Directions, speed: f32, unit: MoveUnit) {
    let dx = axis(dirs.right, dirs.left) * speed * unit.x;
    let dy = axis(dirs.up, dirs.down) * speed * unit.y;

    self.set_tx(wrap(self.tx() + dx));
    self.set_ty(wrap(self.ty() + dy));
  }
}

// -1, 0 or 1
fn axis(positive: bool, negative: bool) -> f32 {
  (positive as i8 - negative as i8) as f32
}

fn wrap(t: f32) -> f32 {
  if t > 1. {
    -1.
  } else if t < -1. {
    1.
  } else {
    t
  }
}
