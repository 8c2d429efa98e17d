//! Every composition a host can mount: identifiers, sizes, schemas, default props, and loading
//! props into something that renders frames.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::composition::finger_family::{FingerFamily, FingerFamilyProps, FrameScene};
use crate::composition::schema::{FieldSchema, FieldType, validate_props};
use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, ceil_frame};
use crate::foundation::error::{FamilyError, FamilyResult};
use crate::segments::burst::{BURST_FRAMES, BurstStar};
use crate::segments::draw::{DrawOp, FrameCtx, SegmentRenderer};
use crate::segments::finger::FingerPage;
use crate::segments::jigsaw::{JigsawConfig, JigsawPage};
use crate::segments::mystery::MysteryPage;
use crate::segments::object::ObjectPage;
use crate::segments::outro::Outro;
use crate::segments::reveal::RevealPage;
use crate::timeline::builder::TRAILING_SECS;
use crate::timeline::duration::CompositionMetadata;
use crate::timeline::spec::Finger;

/// Registered composition identifiers.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub enum CompositionId {
    /// Ten segments plus the outro.
    FingerFamily,
    /// Hand with an object on one finger.
    FingerPage,
    /// Plain bouncing object.
    ObjectPage,
    /// Silhouette with a question mark.
    MysteriousObjectPage,
    /// Spin from silhouette to colour.
    MysteriousRevealPage,
    /// Puzzle pieces assembling an image.
    JigsawPage,
    /// Star particles from one point.
    BurstStarEffect,
    /// Logo and subscribe button.
    EntroPage,
}

impl CompositionId {
    /// Registration order.
    pub const ALL: [Self; 8] = [
        Self::FingerFamily,
        Self::FingerPage,
        Self::ObjectPage,
        Self::MysteriousObjectPage,
        Self::MysteriousRevealPage,
        Self::JigsawPage,
        Self::BurstStarEffect,
        Self::EntroPage,
    ];

    /// Identifier string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FingerFamily => "FingerFamily",
            Self::FingerPage => "FingerPage",
            Self::ObjectPage => "ObjectPage",
            Self::MysteriousObjectPage => "MysteriousObjectPage",
            Self::MysteriousRevealPage => "MysteriousRevealPage",
            Self::JigsawPage => "JigsawPage",
            Self::BurstStarEffect => "BurstStarEffect",
            Self::EntroPage => "EntroPage",
        }
    }
}

impl fmt::Display for CompositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompositionId {
    type Err = FamilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| FamilyError::validation(format!("unknown composition id '{s}'")))
    }
}

/// How a composition's length is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DurationRule {
    /// Same length whatever the props.
    Fixed {
        /// Length in frames.
        frames: u64,
    },
    /// Computed from the props before rendering.
    FromProps,
}

/// Registration record for one composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionInfo {
    /// Identifier.
    pub id: CompositionId,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Frame rate.
    pub fps: Fps,
    /// Length rule.
    pub duration: DurationRule,
    /// Declared props.
    pub schema: Vec<FieldSchema>,
    /// Props used for preview.
    pub default_props: Value,
}

fn finger_names() -> Vec<&'static str> {
    Finger::ALL.iter().map(|f| f.name()).collect()
}

fn page_schema(with_finger: bool) -> Vec<FieldSchema> {
    let mut fields = Vec::new();
    if with_finger {
        fields.push(FieldSchema::optional(
            "finger",
            FieldType::Enum {
                values: finger_names(),
            },
        ));
    }
    let objects = FieldType::array(FieldType::String);
    fields.push(if with_finger {
        FieldSchema::optional("objects", objects)
    } else {
        FieldSchema::required("objects", objects)
    });
    fields.push(FieldSchema::optional("text", FieldType::String));
    fields.push(
        FieldSchema::optional("background", FieldType::String)
            .with_default("white")
            .describe("image file or CSS colour"),
    );
    fields
}

fn family_schema() -> Vec<FieldSchema> {
    let time = |name| FieldSchema::optional(name, FieldType::Time);
    let segment = FieldType::Object {
        fields: vec![
            FieldSchema::required("objectImage", FieldType::String),
            FieldSchema::required("backgroundImage", FieldType::String),
            time("mysteriousEndsAt").describe("MM:SS.CC inside the segment"),
            time("revealEndsAt"),
            time("fingerEndsAt"),
            time("mysteriousDuration").describe("seconds or a milliseconds string"),
            time("revealDuration"),
            time("fingerDuration"),
        ],
    };
    vec![
        FieldSchema::required(
            "objects",
            FieldType::array_of_len(segment, FingerFamilyProps::SEGMENTS),
        ),
        FieldSchema::optional("bgm", FieldType::String),
    ]
}

fn jigsaw_schema() -> Vec<FieldSchema> {
    vec![
        FieldSchema::required("backgroundImage", FieldType::String),
        FieldSchema::optional("text", FieldType::String),
        FieldSchema::optional("pieceRevealDuration", FieldType::Number).with_default(30),
        FieldSchema::optional("pieceFadeDuration", FieldType::Number).with_default(15),
        FieldSchema::optional("randomOrder", FieldType::Boolean).with_default(true),
        FieldSchema::optional("kickInDuration", FieldType::Number)
            .with_default(2)
            .describe("seconds for pieces to reach the centre"),
        FieldSchema::optional("thinkDuration", FieldType::Number)
            .with_default(2)
            .describe("seconds pieces pause at the centre"),
        FieldSchema::optional("solveDuration", FieldType::Number)
            .with_default(2)
            .describe("seconds for pieces to reach their slot"),
        FieldSchema::optional("seed", FieldType::Integer).with_default(0),
        FieldSchema::optional(
            "pieceData",
            FieldType::Map {
                value: Box::new(FieldType::array_of_len(FieldType::Number, 2)),
            },
        ),
        FieldSchema::optional("pieceDataPath", FieldType::String)
            .with_default("jigsaw/piece_data.json"),
    ]
}

fn family_defaults() -> Value {
    let seg = |m: f64, r: f64, f: f64| {
        json!({
            "objectImage": "cat.png",
            "backgroundImage": "demoBg.png",
            "mysteriousDuration": m,
            "revealDuration": r,
            "fingerDuration": f,
        })
    };
    let mut objects = vec![seg(2.04, 2.50, 1.46)];
    objects.extend((1..FingerFamilyProps::SEGMENTS).map(|_| seg(2.0, 2.0, 2.0)));
    json!({
        "objects": objects,
        "bgm": "https://cdn1.suno.ai/31d5ebf2-2686-4ecc-9cd6-458067461c9e.mp3",
    })
}

/// Registration record for `id`.
pub fn composition_info(id: CompositionId) -> CompositionInfo {
    let page_defaults = json!({ "objects": ["cat.png"], "text": "", "background": "demoBg.png" });
    let (duration, schema, default_props) = match id {
        CompositionId::FingerFamily => {
            (DurationRule::FromProps, family_schema(), family_defaults())
        }
        CompositionId::FingerPage => {
            let mut props = page_defaults;
            props["finger"] = json!("index");
            (DurationRule::Fixed { frames: 90 }, page_schema(true), props)
        }
        CompositionId::ObjectPage | CompositionId::MysteriousObjectPage => (
            DurationRule::Fixed { frames: 90 },
            page_schema(false),
            page_defaults,
        ),
        CompositionId::MysteriousRevealPage => (
            DurationRule::Fixed { frames: 120 },
            page_schema(false),
            page_defaults,
        ),
        CompositionId::JigsawPage => (
            DurationRule::FromProps,
            jigsaw_schema(),
            json!({ "backgroundImage": "demoBg.png", "text": "" }),
        ),
        CompositionId::BurstStarEffect => (
            DurationRule::Fixed {
                frames: BURST_FRAMES as u64,
            },
            vec![
                FieldSchema::required("x", FieldType::Number),
                FieldSchema::required("y", FieldType::Number),
            ],
            json!({ "x": 960, "y": 540 }),
        ),
        CompositionId::EntroPage => (
            DurationRule::FromProps,
            vec![
                FieldSchema::optional("duration", FieldType::Number)
                    .with_default(TRAILING_SECS)
                    .describe("seconds"),
            ],
            json!({ "duration": TRAILING_SECS }),
        ),
    };
    CompositionInfo {
        id,
        width: Canvas::FULL_HD.width,
        height: Canvas::FULL_HD.height,
        fps: Fps::default(),
        duration,
        schema,
        default_props,
    }
}

/// All registered compositions, in registration order.
pub fn registry() -> Vec<CompositionInfo> {
    CompositionId::ALL.into_iter().map(composition_info).collect()
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct PageProps {
    finger: Option<String>,
    objects: Vec<String>,
    text: String,
    background: String,
}

impl Default for PageProps {
    fn default() -> Self {
        Self {
            finger: None,
            objects: Vec::new(),
            text: String::new(),
            background: "white".to_owned(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BurstProps {
    x: f64,
    y: f64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct EntroProps {
    duration: f64,
}

impl Default for EntroProps {
    fn default() -> Self {
        Self {
            duration: TRAILING_SECS,
        }
    }
}

enum Body {
    Family(Box<FingerFamily>),
    Single(Box<dyn SegmentRenderer + Send + Sync>),
}

/// A composition with validated props, ready to render any frame.
pub struct LoadedComposition {
    id: CompositionId,
    canvas: Canvas,
    fps: Fps,
    duration_in_frames: u64,
    body: Body,
}

impl fmt::Debug for LoadedComposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedComposition")
            .field("id", &self.id)
            .field("fps", &self.fps)
            .field("duration_in_frames", &self.duration_in_frames)
            .finish_non_exhaustive()
    }
}

impl LoadedComposition {
    /// Validate `props` against the schema of `id` and build it. `null` props mean the defaults.
    ///
    /// Relative asset paths (the jigsaw piece table) resolve under `assets`. A jigsaw page blocks
    /// here until its table is read, since its length depends on the piece count.
    pub fn load(id: CompositionId, props: &Value, assets: &Path) -> FamilyResult<Self> {
        let info = composition_info(id);
        let props = if props.is_null() {
            &info.default_props
        } else {
            props
        };
        validate_props(&info.schema, props)?;

        let canvas = Canvas::FULL_HD;
        let fps = info.fps;
        let fixed = match info.duration {
            DurationRule::Fixed { frames } => frames,
            DurationRule::FromProps => 0,
        };
        let single = |renderer: Box<dyn SegmentRenderer + Send + Sync>, frames: u64| Self {
            id,
            canvas,
            fps,
            duration_in_frames: frames,
            body: Body::Single(renderer),
        };

        let loaded = match id {
            CompositionId::FingerFamily => {
                let family = FingerFamily::new(FingerFamilyProps::deserialize(props)?, fps)?;
                Self {
                    id,
                    canvas,
                    fps,
                    duration_in_frames: family.metadata().duration_in_frames,
                    body: Body::Family(Box::new(family)),
                }
            }
            CompositionId::FingerPage => {
                let p = PageProps::deserialize(props)?;
                let mut page = FingerPage::new(p.finger.as_deref(), p.objects, &p.background);
                page.text = p.text;
                single(Box::new(page), fixed)
            }
            CompositionId::ObjectPage => {
                let p = PageProps::deserialize(props)?;
                let mut page = ObjectPage::new(p.objects, &p.background);
                page.text = p.text;
                single(Box::new(page), fixed)
            }
            CompositionId::MysteriousObjectPage => {
                let p = PageProps::deserialize(props)?;
                let mut page = MysteryPage::new(p.objects, &p.background);
                page.text = p.text;
                single(Box::new(page), fixed)
            }
            CompositionId::MysteriousRevealPage => {
                let p = PageProps::deserialize(props)?;
                let mut page = RevealPage::new(p.objects, &p.background);
                page.text = p.text;
                single(Box::new(page), fixed)
            }
            CompositionId::JigsawPage => {
                let config = JigsawConfig::deserialize(props)?;
                let page = JigsawPage::new(config, assets);
                let layout = page
                    .wait_loaded()
                    .then(|| page.layout(canvas, fps))
                    .flatten()
                    .ok_or_else(|| {
                        FamilyError::validation(format!(
                            "jigsaw piece table '{}' could not be loaded",
                            page.config().piece_data_path
                        ))
                    })?;
                let frames = page.config().duration_frames(layout.pieces.len(), fps);
                single(Box::new(page), frames)
            }
            CompositionId::BurstStarEffect => {
                let p = BurstProps::deserialize(props)?;
                single(Box::new(BurstStar::new(Point::new(p.x, p.y))), fixed)
            }
            CompositionId::EntroPage => {
                let p = EntroProps::deserialize(props)?;
                let frames = ceil_frame(fps.secs_to_frames(p.duration));
                single(Box::new(Outro::default()), frames)
            }
        };
        tracing::debug!(
            id = %loaded.id,
            duration_in_frames = loaded.duration_in_frames,
            "composition loaded"
        );
        Ok(loaded)
    }

    /// Identifier.
    pub fn id(&self) -> CompositionId {
        self.id
    }

    /// Length and frame rate.
    pub fn metadata(&self) -> CompositionMetadata {
        CompositionMetadata {
            duration_in_frames: self.duration_in_frames,
            fps: self.fps,
        }
    }

    /// The finger-family composition, when that is what was loaded.
    pub fn finger_family(&self) -> Option<&FingerFamily> {
        match &self.body {
            Body::Family(f) => Some(f),
            Body::Single(_) => None,
        }
    }

    /// Scene for a global frame; empty past the end.
    pub fn render(&self, frame: FrameIndex) -> FrameScene {
        match &self.body {
            Body::Family(family) => family.render_frame(frame),
            Body::Single(renderer) => {
                if frame.0 >= self.duration_in_frames {
                    return FrameScene::empty(frame);
                }
                let ctx = FrameCtx {
                    frame: frame.0,
                    duration: self.duration_in_frames,
                    fps: self.fps,
                    canvas: self.canvas,
                };
                let mut ops = renderer.render(&ctx);
                ops.sort_by_key(DrawOp::z);
                FrameScene {
                    ops,
                    ..FrameScene::empty(frame)
                }
            }
        }
    }
}

/// Length of composition `id` for `props`; the host calls this before rendering.
#[tracing::instrument(skip(props, assets))]
pub fn resolve_metadata(
    id: CompositionId,
    props: &Value,
    assets: &Path,
) -> FamilyResult<CompositionMetadata> {
    Ok(LoadedComposition::load(id, props, assets)?.metadata())
}

/// One-shot render of a single frame.
pub fn render_composition_frame(
    id: CompositionId,
    props: &Value,
    assets: &Path,
    frame: FrameIndex,
) -> FamilyResult<FrameScene> {
    Ok(LoadedComposition::load(id, props, assets)?.render(frame))
}

#[cfg(test)]
#[path = "../../tests/unit/composition/registry.rs"]
mod tests;
