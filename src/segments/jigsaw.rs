//! Jigsaw assembly: pieces fly in one after another, pause at the centre, then spring home.
//!
//! The piece coordinate table is read once, off the render path. Until it arrives the segment
//! draws no pieces. The randomised layout is built once per distinct input set and reused for
//! every frame.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::{Arc, Mutex};

use anyhow::Context;

use crate::animation::interp::{InterpOpts, interpolate, lerp};
use crate::animation::spring::{Spring, SpringConfig};
use crate::foundation::core::{Canvas, Fps, Point, Rect};
use crate::foundation::error::{FamilyError, FamilyResult};
use crate::foundation::math::{Fnv1a64, Rng64};
use crate::segments::draw::{Anchor, DrawOp, FrameCtx, ImageFit, Placement, SegmentRenderer};

const OUTLINE_WIDTH: f64 = 1456.0;
const OUTLINE_HEIGHT: f64 = 816.0;
const OFFSCREEN_MARGIN: f64 = 200.0;
const CAPTION_DELAY: f64 = 30.0;
const CAPTION_FADE: f64 = 30.0;

/// Frames after the last piece lands before a jigsaw composition ends.
pub const JIGSAW_TAIL_FRAMES: u64 = 60;

/// Assembled piece positions in outline pixels, keyed by piece id.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct PieceTable {
    pieces: BTreeMap<String, [f64; 2]>,
}

impl PieceTable {
    /// Table from an id → `[x, y]` map.
    pub fn new(pieces: BTreeMap<String, [f64; 2]>) -> Self {
        Self { pieces }
    }

    /// Parse `{ "<id>": [x, y], ... }`.
    pub fn from_json(raw: &str) -> FamilyResult<Self> {
        let table: Self = serde_json::from_str(raw)?;
        if let Some((id, _)) = table
            .pieces
            .iter()
            .find(|(_, [x, y])| !x.is_finite() || !y.is_finite())
        {
            return Err(FamilyError::validation(format!(
                "piece '{id}' has a non-finite coordinate"
            )));
        }
        Ok(table)
    }

    /// Read and parse a table file.
    #[tracing::instrument]
    pub fn from_path(path: &Path) -> FamilyResult<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("read piece table {}", path.display()))?;
        let table = Self::from_json(&raw)?;
        tracing::debug!(pieces = table.len(), "piece table loaded");
        Ok(table)
    }

    /// Number of pieces.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// `true` without pieces.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Pieces in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Point)> {
        self.pieces
            .iter()
            .map(|(id, [x, y])| (id.as_str(), Point::new(*x, *y)))
    }
}

/// Load state of a piece table.
#[derive(Debug)]
pub enum PieceLoad {
    /// Still reading; nothing to draw yet.
    Pending(Receiver<FamilyResult<PieceTable>>),
    /// Loaded.
    Ready(Arc<PieceTable>),
    /// Load failed; the segment stays empty.
    Failed(String),
}

/// Reads a piece table on a background thread.
#[derive(Debug)]
pub struct PieceLoader {
    state: PieceLoad,
}

impl PieceLoader {
    /// Start reading `path`.
    pub fn spawn(path: PathBuf) -> Self {
        let (tx, rx) = mpsc::channel();
        std::thread::spawn(move || {
            // The receiver may already be gone if the page was dropped.
            let _ = tx.send(PieceTable::from_path(&path));
        });
        Self {
            state: PieceLoad::Pending(rx),
        }
    }

    /// Already-loaded table.
    pub fn ready(table: PieceTable) -> Self {
        Self {
            state: PieceLoad::Ready(Arc::new(table)),
        }
    }

    /// Advance without blocking; returns the table once loaded.
    pub fn poll(&mut self) -> Option<Arc<PieceTable>> {
        if let PieceLoad::Pending(rx) = &self.state {
            let next = match rx.try_recv() {
                Ok(Ok(table)) => PieceLoad::Ready(Arc::new(table)),
                Ok(Err(e)) => PieceLoad::Failed(e.to_string()),
                Err(TryRecvError::Empty) => return None,
                Err(TryRecvError::Disconnected) => {
                    PieceLoad::Failed("piece loader exited without a result".to_owned())
                }
            };
            match &next {
                PieceLoad::Failed(msg) => tracing::warn!(error = %msg, "piece table unavailable"),
                _ => tracing::debug!("piece table ready"),
            }
            self.state = next;
        }
        match &self.state {
            PieceLoad::Ready(t) => Some(Arc::clone(t)),
            _ => None,
        }
    }

    /// Block until the load settles.
    pub fn wait(&mut self) -> Option<Arc<PieceTable>> {
        if let PieceLoad::Pending(rx) = &self.state {
            self.state = match rx.recv() {
                Ok(Ok(table)) => PieceLoad::Ready(Arc::new(table)),
                Ok(Err(e)) => PieceLoad::Failed(e.to_string()),
                Err(_) => PieceLoad::Failed("piece loader exited without a result".to_owned()),
            };
        }
        self.poll()
    }

    /// `true` while the table is still loading.
    pub fn is_pending(&self) -> bool {
        matches!(self.state, PieceLoad::Pending(_))
    }
}

fn default_reveal() -> f64 {
    30.0
}
fn default_fade() -> f64 {
    15.0
}
fn default_true() -> bool {
    true
}
fn default_phase_secs() -> f64 {
    2.0
}
fn default_piece_data_path() -> String {
    "jigsaw/piece_data.json".to_owned()
}

/// Jigsaw props.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JigsawConfig {
    /// Background image.
    pub background_image: String,
    /// Caption faded in after the puzzle is complete.
    #[serde(default)]
    pub text: String,
    /// Frames each piece takes to appear.
    #[serde(default = "default_reveal")]
    pub piece_reveal_duration: f64,
    /// Frames each piece takes to fade.
    #[serde(default = "default_fade")]
    pub piece_fade_duration: f64,
    /// Shuffle the reveal order.
    #[serde(default = "default_true")]
    pub random_order: bool,
    /// Seconds to fly to the centre.
    #[serde(default = "default_phase_secs")]
    pub kick_in_duration: f64,
    /// Seconds to pause at the centre.
    #[serde(default = "default_phase_secs")]
    pub think_duration: f64,
    /// Seconds to spring into place.
    #[serde(default = "default_phase_secs")]
    pub solve_duration: f64,
    /// Seed for start positions and order.
    #[serde(default)]
    pub seed: u64,
    /// Inline piece table; takes precedence over `piece_data_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub piece_data: Option<PieceTable>,
    /// Piece table location under the asset root.
    #[serde(default = "default_piece_data_path")]
    pub piece_data_path: String,
}

impl Default for JigsawConfig {
    fn default() -> Self {
        Self {
            background_image: "demoBg.png".to_owned(),
            text: String::new(),
            piece_reveal_duration: default_reveal(),
            piece_fade_duration: default_fade(),
            random_order: true,
            kick_in_duration: default_phase_secs(),
            think_duration: default_phase_secs(),
            solve_duration: default_phase_secs(),
            seed: 0,
            piece_data: None,
            piece_data_path: default_piece_data_path(),
        }
    }
}

impl JigsawConfig {
    /// Exact frames of one piece's fly-in, pause and spring.
    pub fn sequence_frames(&self, fps: Fps) -> f64 {
        self.phase_frames(fps).iter().sum()
    }

    fn phase_frames(&self, fps: Fps) -> [f64; 3] {
        [self.kick_in_duration, self.think_duration, self.solve_duration]
            .map(|s| fps.secs_to_frames(if s.is_finite() { s.max(0.0) } else { 0.0 }))
    }

    /// Composition length for `pieces` pieces.
    pub fn duration_frames(&self, pieces: usize, fps: Fps) -> u64 {
        (pieces as f64 * self.sequence_frames(fps)).ceil() as u64 + JIGSAW_TAIL_FRAMES
    }
}

/// One piece with its randomised start and reveal slot.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PuzzlePiece {
    /// Piece id (also its image name).
    pub id: String,
    /// Assembled screen position.
    pub target: Point,
    /// Off-screen start position.
    pub start: Point,
    /// Position in the reveal order.
    pub order: usize,
    /// First frame the piece is visible.
    pub reveal_frame: f64,
    /// Uniform outline-to-screen scale.
    pub scale: f64,
}

/// Pose of one piece at one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PiecePose {
    /// Top-left corner.
    pub position: Point,
    /// Rotation, degrees.
    pub rotation_deg: f64,
    /// Horizontal mirror factor in `[-1, 1]`.
    pub scale_x: f64,
}

/// Randomised, memoisable piece layout.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct JigsawLayout {
    /// Hash of every input the layout depends on.
    pub key: u64,
    /// Assembled puzzle area on screen.
    pub puzzle: Rect,
    /// Pieces in reveal order.
    pub pieces: Vec<PuzzlePiece>,
    /// Frames of one piece's sequence.
    pub sequence_frames: f64,
}

fn layout_key(table: &PieceTable, config: &JigsawConfig, canvas: Canvas, fps: Fps) -> u64 {
    let mut h = Fnv1a64::new_default();
    for (id, p) in table.iter() {
        h.write_str(id);
        h.write_f64(p.x);
        h.write_f64(p.y);
    }
    h.write_u64(u64::from(canvas.width));
    h.write_u64(u64::from(canvas.height));
    h.write_u64(u64::from(fps.num));
    h.write_u64(u64::from(fps.den));
    h.write_u8(u8::from(config.random_order));
    h.write_u64(config.seed);
    h.write_f64(config.piece_reveal_duration);
    for f in config.phase_frames(fps) {
        h.write_f64(f);
    }
    h.finish()
}

/// Assembled puzzle area: 70% of the canvas on its tighter axis, centred.
pub fn puzzle_rect(canvas: Canvas) -> Rect {
    let aspect = OUTLINE_WIDTH / OUTLINE_HEIGHT;
    let width = (canvas.w() * 0.7).min(canvas.h() * 0.7 * aspect);
    let height = width / aspect;
    let x = (canvas.w() - width) / 2.0;
    let y = (canvas.h() - height) / 2.0;
    Rect::new(x, y, x + width, y + height)
}

impl JigsawLayout {
    /// Place every piece, pick its start side and shuffle the order.
    #[tracing::instrument(skip(table, config), fields(pieces = table.len()))]
    pub fn build(table: &PieceTable, config: &JigsawConfig, canvas: Canvas, fps: Fps) -> Self {
        let puzzle = puzzle_rect(canvas);
        let scale = puzzle.width() / OUTLINE_WIDTH;
        let mut rng = Rng64::new(config.seed);

        let mut pieces: Vec<PuzzlePiece> = table
            .iter()
            .map(|(id, p)| {
                let start = match rng.below(4) {
                    0 => Point::new(rng.next_f64_01() * canvas.w(), -OFFSCREEN_MARGIN),
                    1 => Point::new(canvas.w() + OFFSCREEN_MARGIN, rng.next_f64_01() * canvas.h()),
                    2 => Point::new(rng.next_f64_01() * canvas.w(), canvas.h() + OFFSCREEN_MARGIN),
                    _ => Point::new(-OFFSCREEN_MARGIN, rng.next_f64_01() * canvas.h()),
                };
                PuzzlePiece {
                    id: id.to_owned(),
                    target: puzzle.origin() + p.to_vec2() * scale,
                    start,
                    order: 0,
                    reveal_frame: 0.0,
                    scale,
                }
            })
            .collect();

        if config.random_order {
            for i in (1..pieces.len()).rev() {
                let j = rng.below(i + 1);
                pieces.swap(i, j);
            }
        }

        let sequence_frames = config.sequence_frames(fps);
        for (i, piece) in pieces.iter_mut().enumerate() {
            piece.order = i;
            piece.reveal_frame = i as f64 * sequence_frames;
        }

        Self {
            key: layout_key(table, config, canvas, fps),
            puzzle,
            pieces,
            sequence_frames,
        }
    }

    /// Frame the last piece finishes its sequence.
    pub fn reveal_end(&self) -> f64 {
        self.pieces.len() as f64 * self.sequence_frames
    }
}

/// Pose of `piece` at global jigsaw frame `t`; `None` before it is revealed.
///
/// Settled pieces stay at their target.
pub fn piece_pose(
    piece: &PuzzlePiece,
    config: &JigsawConfig,
    canvas: Canvas,
    fps: Fps,
    t: f64,
) -> Option<PiecePose> {
    let local = t - piece.reveal_frame;
    if !(local >= 0.0) {
        return None;
    }
    let [kick, think, _] = config.phase_frames(fps);
    let center = canvas.center();

    if local < kick {
        let p = interpolate(local, &[0.0, kick], &[0.0, 1.0], InterpOpts::CLAMP);
        return Some(PiecePose {
            position: piece.start.lerp(center, p),
            rotation_deg: lerp(180.0, 0.0, p),
            scale_x: lerp(-1.0, 1.0, p),
        });
    }
    if local < kick + think {
        return Some(PiecePose {
            position: center,
            rotation_deg: 0.0,
            scale_x: 1.0,
        });
    }
    let spring = Spring::new(SpringConfig {
        mass: 0.5,
        stiffness: 100.0,
        damping: 10.0,
        overshoot_clamping: false,
    });
    let p = spring.progress(local - kick - think, fps).clamp(0.0, 1.0);
    Some(PiecePose {
        position: center.lerp(piece.target, p),
        rotation_deg: 0.0,
        scale_x: 1.0,
    })
}

/// Jigsaw page with its lazily loaded table and memoised layout.
#[derive(Debug)]
pub struct JigsawPage {
    config: JigsawConfig,
    loader: Mutex<PieceLoader>,
    layout: Mutex<Option<Arc<JigsawLayout>>>,
}

impl JigsawPage {
    /// Page whose table comes from `config.piece_data`, or is read from under `assets`.
    pub fn new(config: JigsawConfig, assets: &Path) -> Self {
        let loader = match &config.piece_data {
            Some(table) => PieceLoader::ready(table.clone()),
            None => PieceLoader::spawn(assets.join(&config.piece_data_path)),
        };
        Self::with_loader(config, loader)
    }

    /// Page driven by an explicit loader.
    pub fn with_loader(config: JigsawConfig, loader: PieceLoader) -> Self {
        Self {
            config,
            loader: Mutex::new(loader),
            layout: Mutex::new(None),
        }
    }

    /// Props in use.
    pub fn config(&self) -> &JigsawConfig {
        &self.config
    }

    /// Block until the piece table settles; `true` when pieces are available.
    pub fn wait_loaded(&self) -> bool {
        match self.loader.lock() {
            Ok(mut l) => l.wait().is_some(),
            Err(_) => false,
        }
    }

    fn table(&self) -> Option<Arc<PieceTable>> {
        self.loader.lock().ok()?.poll()
    }

    /// Layout for the current inputs, rebuilt only when they change.
    pub fn layout(&self, canvas: Canvas, fps: Fps) -> Option<Arc<JigsawLayout>> {
        let table = self.table()?;
        let key = layout_key(&table, &self.config, canvas, fps);
        let mut slot = self.layout.lock().ok()?;
        if let Some(cached) = slot.as_ref().filter(|l| l.key == key) {
            return Some(Arc::clone(cached));
        }
        let built = Arc::new(JigsawLayout::build(&table, &self.config, canvas, fps));
        *slot = Some(Arc::clone(&built));
        Some(built)
    }
}

impl SegmentRenderer for JigsawPage {
    fn kind(&self) -> &'static str {
        "jigsaw"
    }

    fn render(&self, ctx: &FrameCtx) -> Vec<DrawOp> {
        let canvas = ctx.canvas;
        let puzzle = puzzle_rect(canvas);
        let mut ops = vec![
            DrawOp::image(
                self.config.background_image.clone(),
                ImageFit::Cover {
                    width: canvas.w(),
                    height: canvas.h(),
                },
                Placement::top_left(Point::ORIGIN),
                -2,
            ),
            DrawOp::image(
                "jigsaw/piece_outline.png",
                ImageFit::Exact {
                    width: puzzle.width(),
                    height: puzzle.height(),
                },
                Placement::top_left(puzzle.origin()),
                0,
            ),
        ];

        let Some(layout) = self.layout(canvas, ctx.fps) else {
            return ops;
        };
        for piece in &layout.pieces {
            let Some(pose) = piece_pose(piece, &self.config, canvas, ctx.fps, ctx.t()) else {
                continue;
            };
            ops.push(DrawOp::image(
                format!("jigsaw/{}.png", piece.id),
                ImageFit::Intrinsic,
                Placement::top_left(pose.position)
                    .pivot_center()
                    .scaled_xy(piece.scale * pose.scale_x, piece.scale)
                    .rotated(pose.rotation_deg),
                10 + piece.order as i32,
            ));
        }

        if !self.config.text.is_empty() {
            let end = layout.reveal_end();
            let opacity = interpolate(
                ctx.t(),
                &[end + CAPTION_DELAY, end + CAPTION_DELAY + CAPTION_FADE],
                &[0.0, 1.0],
                InterpOpts::CLAMP,
            );
            let at = Point::new(canvas.w() * 0.5, canvas.h() * 0.9);
            ops.push(
                DrawOp::text(
                    self.config.text.clone(),
                    48.0,
                    "white",
                    Placement::centered(at).with_anchor(Anchor::BottomCenter),
                    1000,
                )
                .bold()
                .with_opacity(opacity),
            );
        }
        ops
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segments/jigsaw.rs"]
mod tests;
