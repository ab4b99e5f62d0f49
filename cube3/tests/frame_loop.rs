use cube3::backend::{Backend, QuadError};
use cube3::clock::Clock;
use cube3::context::GraphicsContext;
use cube3::input::KeySampler;
use cube3::shader::{ProgramError, StageError, StageType, Uniform, UniformWarning};
use cube3::surface::Surface;
use cube3::{Config, Directions, FrameLoop, FrameLoopError, MoveUnit, Transform};
use std::cell::{Cell, RefCell};
use std::fs;
use std::path::PathBuf;
use std::rc::Rc;

const VS: &str = "layout (location = 0) in vec3 co;\nuniform mat4 Transform;\n";
const FS: &str = "out vec4 frag;\n";

#[derive(Clone, Debug, PartialEq)]
enum Command {
  NewStage(StageType, String),
  ReleaseStage(StageType),
  NewProgram,
  ReleaseProgram,
  UseProgram,
  NewQuad(Vec<[f32; 3]>),
  ReleaseQuad,
  Clear([f32; 4]),
  SetTransform(i32, [f32; 16]),
  Draw(usize),
}

type Log = Rc<RefCell<Vec<Command>>>;

struct Released(Log, Command);

impl Drop for Released {
  fn drop(&mut self) {
    self.0.borrow_mut().push(self.1.clone());
  }
}

#[derive(Default)]
struct RecordingBackend {
  log: Log,
  fail_compile: Option<StageType>,
  fail_link: bool,
  inactive_transform: bool,
}

impl RecordingBackend {
  fn push(&self, cmd: Command) {
    self.log.borrow_mut().push(cmd);
  }
}

impl Backend for RecordingBackend {
  type StageRepr = Released;
  type ProgramRepr = Released;
  type QuadRepr = Released;

  fn new_stage(&mut self, ty: StageType, src: &str) -> Result<Self::StageRepr, StageError> {
    self.push(Command::NewStage(ty, src.to_owned()));

    if self.fail_compile == Some(ty) {
      return Err(StageError::compilation_failed(ty, "0:1(1): error: syntax error"));
    }

    Ok(Released(self.log.clone(), Command::ReleaseStage(ty)))
  }

  fn new_program(
    &mut self,
    _: &Self::StageRepr,
    _: &Self::StageRepr,
  ) -> Result<Self::ProgramRepr, ProgramError> {
    self.push(Command::NewProgram);

    if self.fail_link {
      return Err(ProgramError::link_failed("error: no main function"));
    }

    Ok(Released(self.log.clone(), Command::ReleaseProgram))
  }

  fn ask_uniform<T>(
    &mut self,
    _: &Self::ProgramRepr,
    name: &str,
  ) -> Result<Uniform<T>, UniformWarning> {
    if self.inactive_transform {
      Err(UniformWarning::inactive(name))
    } else {
      Ok(unsafe { Uniform::new(3) })
    }
  }

  fn new_quad(&mut self, vertices: &[[f32; 3]]) -> Result<Self::QuadRepr, QuadError> {
    self.push(Command::NewQuad(vertices.to_vec()));
    Ok(Released(self.log.clone(), Command::ReleaseQuad))
  }

  fn use_program(&mut self, _: &Self::ProgramRepr) {
    self.push(Command::UseProgram);
  }

  fn clear(&mut self, color: [f32; 4]) {
    self.push(Command::Clear(color));
  }

  fn set_transform(&mut self, uniform: &Uniform<Transform>, column_major: &[f32; 16]) {
    self.push(Command::SetTransform(uniform.index(), *column_major));
  }

  fn draw(&mut self, _: &Self::QuadRepr, vert_nb: usize) {
    self.push(Command::Draw(vert_nb));
  }
}

// a surface that closes after a fixed number of frames and replays a key script
struct ScriptedSurface {
  backend: RecordingBackend,
  time: Cell<f64>,
  tick: f64,
  keys: Vec<Directions>,
  close_after: usize,
  framebuffer: [u32; 2],
  size_queries: Cell<usize>,
  swaps: usize,
  polls: usize,
}

impl ScriptedSurface {
  fn new(close_after: usize) -> Self {
    ScriptedSurface {
      backend: RecordingBackend::default(),
      time: Cell::new(0.),
      tick: 0.004,
      keys: Vec::new(),
      close_after,
      framebuffer: [900, 900],
      size_queries: Cell::new(0),
      swaps: 0,
      polls: 0,
    }
  }

  fn log(&self) -> Vec<Command> {
    self.backend.log.borrow().clone()
  }

  fn uploads(&self) -> Vec<[f32; 16]> {
    self
      .log()
      .into_iter()
      .filter_map(|cmd| match cmd {
        Command::SetTransform(_, values) => Some(values),
        _ => None,
      })
      .collect()
  }
}

unsafe impl GraphicsContext for ScriptedSurface {
  type Backend = RecordingBackend;

  fn backend(&mut self) -> &mut Self::Backend {
    &mut self.backend
  }
}

impl Clock for ScriptedSurface {
  fn now(&self) -> f64 {
    let t = self.time.get() + self.tick;
    self.time.set(t);
    t
  }
}

impl KeySampler for ScriptedSurface {
  fn sample_directions(&self) -> Directions {
    self
      .keys
      .get(self.swaps)
      .copied()
      .unwrap_or(Directions::NONE)
  }
}

impl Surface for ScriptedSurface {
  fn should_close(&self) -> bool {
    self.swaps >= self.close_after
  }

  fn size(&self) -> [u32; 2] {
    self.size_queries.set(self.size_queries.get() + 1);
    self.framebuffer
  }

  fn swap_buffers(&mut self) {
    self.swaps += 1;
  }

  fn poll_events(&mut self) {
    self.polls += 1;
  }
}

// shader sources in a fresh directory
struct Shaders {
  dir: PathBuf,
}

impl Shaders {
  fn new(name: &str) -> Self {
    let dir = std::env::temp_dir().join(format!("cube3-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("fragment.glsl"), FS).unwrap();
    fs::write(dir.join("vertex.glsl"), VS).unwrap();

    Shaders { dir }
  }

  fn config(&self) -> Config {
    Config::default()
      .set_fragment_shader(self.dir.join("fragment.glsl"))
      .set_vertex_shader(self.dir.join("vertex.glsl"))
  }
}

impl Drop for Shaders {
  fn drop(&mut self) {
    let _ = fs::remove_dir_all(&self.dir);
  }
}

fn right() -> Directions {
  Directions {
    right: true,
    ..Directions::NONE
  }
}

#[test]
fn renders_until_close() {
  let shaders = Shaders::new("renders-until-close");
  let mut surface = ScriptedSurface::new(3);

  let frame_loop = FrameLoop::new(&mut surface, &shaders.config()).unwrap();
  let frames = frame_loop.run(&mut surface);

  assert_eq!(frames, 3);
  assert_eq!(surface.swaps, 3);
  assert_eq!(surface.polls, 3);

  let per_frame: Vec<_> = surface
    .log()
    .into_iter()
    .filter(|cmd| {
      matches!(
        cmd,
        Command::Clear(_) | Command::SetTransform(..) | Command::Draw(_)
      )
    })
    .collect();
  let identity = Transform::IDENTITY.transposed();
  let frame = [
    Command::Clear([0., 0., 0., 1.]),
    Command::SetTransform(3, identity),
    Command::Draw(6),
  ];

  assert_eq!(per_frame, frame.iter().cycle().take(9).cloned().collect::<Vec<_>>());
}

#[test]
fn bootstrap_order() {
  let shaders = Shaders::new("bootstrap-order");
  let mut surface = ScriptedSurface::new(0);

  let frame_loop = FrameLoop::new(&mut surface, &shaders.config()).unwrap();
  let log = surface.log();

  assert_eq!(log[0], Command::NewStage(StageType::FragmentShader, FS.to_owned()));
  assert_eq!(log[1], Command::NewStage(StageType::VertexShader, VS.to_owned()));
  assert_eq!(log[2], Command::NewProgram);

  // both stages are released once linked
  assert!(log[3..5].contains(&Command::ReleaseStage(StageType::FragmentShader)));
  assert!(log[3..5].contains(&Command::ReleaseStage(StageType::VertexShader)));

  assert_eq!(log[5], Command::NewQuad(cube3::quad::QUAD_VERTICES.to_vec()));
  assert_eq!(log[6], Command::UseProgram);
  assert_eq!(log.len(), 7);

  assert_eq!(frame_loop.run(&mut surface), 0);
  let log = surface.log();
  assert!(log.contains(&Command::ReleaseProgram));
  assert!(log.contains(&Command::ReleaseQuad));
}

#[test]
fn framebuffer_size_does_not_change_the_step() {
  let shaders = Shaders::new("framebuffer-size");
  let mut surface = ScriptedSurface::new(1);
  surface.framebuffer = [1800, 1800];
  surface.keys = vec![right()];

  let frame_loop = FrameLoop::new(&mut surface, &shaders.config()).unwrap();
  assert_eq!(surface.size_queries.get(), 1);
  frame_loop.run(&mut surface);

  let mut expected = Transform::IDENTITY;
  expected.apply_movement(right(), 25., MoveUnit::from_size([900, 900]));
  assert_eq!(surface.uploads(), vec![expected.transposed()]);
}

#[test]
fn uploads_the_transpose() {
  let shaders = Shaders::new("uploads-the-transpose");
  let mut surface = ScriptedSurface::new(usize::MAX);
  surface.keys = vec![right(); 4];

  let mut frame_loop = FrameLoop::new(&mut surface, &shaders.config()).unwrap();
  let unit = MoveUnit::from_size([900, 900]);
  let mut expected = Transform::IDENTITY;

  for _ in 0..4 {
    frame_loop.step(&mut surface);
    expected.apply_movement(right(), 25., unit);

    let uploaded = *surface.uploads().last().unwrap();
    assert_eq!(&uploaded, &expected.transposed());
    assert_eq!(frame_loop.transform(), &expected);

    // tX sits in the last column of the row-major matrix, in the last row once transposed
    assert_eq!(uploaded[12], expected.tx());
    assert_eq!(uploaded[3], 0.);
    assert_eq!(expected.to_row_major()[3], expected.tx());
  }

  assert_eq!(frame_loop.transform().tx(), expected.tx());
  assert!((expected.tx() - 100. / 900.).abs() < 1e-6);
}

#[test]
fn one_frame_right_at_default_speed() {
  let shaders = Shaders::new("one-frame-right");
  let mut surface = ScriptedSurface::new(1);
  surface.keys = vec![right()];

  let frame_loop = FrameLoop::new(&mut surface, &shaders.config()).unwrap();
  frame_loop.run(&mut surface);

  let uploaded = surface.uploads();
  assert_eq!(uploaded.len(), 1);
  assert!((uploaded[0][12] - 25. / 900.).abs() < 1e-7);
}

#[test]
fn idle_frames_leave_the_transform_alone() {
  let shaders = Shaders::new("idle-frames");
  let mut surface = ScriptedSurface::new(50);

  let frame_loop = FrameLoop::new(&mut surface, &shaders.config()).unwrap();
  frame_loop.run(&mut surface);

  let uploads = surface.uploads();
  assert_eq!(uploads.len(), 50);
  assert!(uploads
    .iter()
    .all(|values| values == &Transform::IDENTITY.transposed()));
}

#[test]
fn frames_are_paced() {
  let shaders = Shaders::new("frames-are-paced");
  let mut surface = ScriptedSurface::new(usize::MAX);

  let mut frame_loop = FrameLoop::new(&mut surface, &shaders.config()).unwrap();
  let interval = frame_loop.clock().interval();
  assert_eq!(interval, 1. / 60.);

  let mut previous = frame_loop.clock().expected();
  for _ in 0..10 {
    let before = surface.time.get();
    frame_loop.step(&mut surface);

    // the frame started no earlier than it was due
    assert!(surface.time.get() >= previous);
    assert!(surface.time.get() > before);

    let expected = frame_loop.clock().expected();
    assert!(expected - previous >= interval - 1e-12);
    previous = expected;
  }

  assert_eq!(frame_loop.frames(), 10);
}

#[test]
fn missing_shader_is_fatal() {
  let shaders = Shaders::new("missing-shader");
  let config = shaders.config().set_vertex_shader(shaders.dir.join("nope.glsl"));
  let mut surface = ScriptedSurface::new(1);

  match FrameLoop::new(&mut surface, &config) {
    Err(FrameLoopError::Program(ProgramError::Source(e))) => {
      assert_eq!(e.path(), shaders.dir.join("nope.glsl").as_path());
    }
    Err(e) => panic!("unexpected error: {}", e),
    Ok(_) => panic!("frame loop built without vertex shader"),
  }

  // a frame loop never existed: nothing was drawn
  assert_eq!(surface.swaps, 0);
  assert!(surface.uploads().is_empty());
}

#[test]
fn compilation_error_carries_the_log() {
  let shaders = Shaders::new("compilation-error");
  let mut surface = ScriptedSurface::new(1);
  surface.backend.fail_compile = Some(StageType::VertexShader);

  match FrameLoop::new(&mut surface, &shaders.config()) {
    Err(FrameLoopError::Program(ProgramError::Stage(StageError::CompilationFailed(ty, log)))) => {
      assert_eq!(ty, StageType::VertexShader);
      assert!(log.contains("syntax error"));
    }
    Err(e) => panic!("unexpected error: {}", e),
    Ok(_) => panic!("frame loop built with a broken shader"),
  }

  // the fragment stage compiled first and got released
  let log = surface.log();
  assert!(log.contains(&Command::ReleaseStage(StageType::FragmentShader)));
  assert!(!log.contains(&Command::NewProgram));
}

#[test]
fn link_error_carries_the_log() {
  let shaders = Shaders::new("link-error");
  let mut surface = ScriptedSurface::new(1);
  surface.backend.fail_link = true;

  let err = FrameLoop::new(&mut surface, &shaders.config())
    .err()
    .expect("link should fail");

  assert_eq!(err.to_string(), "shader linker error: error: no main function");
  assert!(!surface.log().iter().any(|cmd| matches!(cmd, Command::NewQuad(_))));
}

#[test]
fn inactive_transform_is_not_fatal() {
  let shaders = Shaders::new("inactive-transform");
  let mut surface = ScriptedSurface::new(2);
  surface.backend.inactive_transform = true;

  let frame_loop = FrameLoop::new(&mut surface, &shaders.config()).unwrap();
  assert_eq!(frame_loop.run(&mut surface), 2);

  let unbound = surface
    .log()
    .into_iter()
    .filter(|cmd| matches!(cmd, Command::SetTransform(-1, _)))
    .count();
  assert_eq!(unbound, 2);
}
