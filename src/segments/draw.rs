use crate::foundation::core::{Affine, Canvas, Fps, Point, Rect, Vec2};

/// Which point of an element's box sits at [`Placement::position`], as fractions of its size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    /// Top-left corner.
    TopLeft,
    /// Middle of the top edge.
    TopCenter,
    /// Centre of the box.
    Center,
    /// Middle of the bottom edge.
    BottomCenter,
}

impl Anchor {
    /// Offset of the anchor inside a box of `size`.
    pub fn offset(self, size: Vec2) -> Vec2 {
        match self {
            Self::TopLeft => Vec2::ZERO,
            Self::TopCenter => Vec2::new(size.x * 0.5, 0.0),
            Self::Center => size * 0.5,
            Self::BottomCenter => Vec2::new(size.x * 0.5, size.y),
        }
    }
}

/// Rotation/scale pivot of an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Pivot {
    /// The placement anchor.
    #[default]
    Anchor,
    /// Centre of the element box.
    Center,
    /// Fixed point in element-local pixels.
    Local {
        /// Local pivot.
        at: Vec2,
    },
}

/// Screen-space placement of one element.
///
/// The element's size is only known to the host (images keep their aspect ratio), so the final
/// matrix is produced by [`Placement::to_affine`] once the host knows it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Screen position of the anchor.
    pub position: Point,
    /// Anchor point inside the element.
    pub anchor: Anchor,
    /// Rotation/scale pivot.
    pub pivot: Pivot,
    /// Per-axis scale.
    pub scale: Vec2,
    /// In-plane rotation, degrees clockwise.
    pub rotation_deg: f64,
    /// Rotation around the vertical axis, degrees; projected as a horizontal squash.
    pub flip_y_deg: f64,
}

impl Placement {
    /// Element centred on `position`, untransformed.
    pub fn centered(position: Point) -> Self {
        Self {
            position,
            anchor: Anchor::Center,
            pivot: Pivot::Anchor,
            scale: Vec2::new(1.0, 1.0),
            rotation_deg: 0.0,
            flip_y_deg: 0.0,
        }
    }

    /// Element with its top-left corner at `position`.
    pub fn top_left(position: Point) -> Self {
        Self {
            anchor: Anchor::TopLeft,
            ..Self::centered(position)
        }
    }

    /// Same placement with anchor `anchor`.
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Same placement, uniformly scaled by `s`.
    pub fn scaled(mut self, s: f64) -> Self {
        self.scale = Vec2::new(s, s);
        self
    }

    /// Same placement with per-axis scale.
    pub fn scaled_xy(mut self, sx: f64, sy: f64) -> Self {
        self.scale = Vec2::new(sx, sy);
        self
    }

    /// Same placement rotated by `deg`.
    pub fn rotated(mut self, deg: f64) -> Self {
        self.rotation_deg = deg;
        self
    }

    /// Same placement rotated around the vertical axis by `deg`.
    pub fn flipped(mut self, deg: f64) -> Self {
        self.flip_y_deg = deg;
        self
    }

    /// Same placement pivoting around local `origin`.
    pub fn with_origin(mut self, origin: Vec2) -> Self {
        self.pivot = Pivot::Local { at: origin };
        self
    }

    /// Same placement pivoting around the element centre.
    pub fn pivot_center(mut self) -> Self {
        self.pivot = Pivot::Center;
        self
    }

    /// Element-to-screen matrix for an element of `size` pixels.
    pub fn to_affine(&self, size: Vec2) -> Affine {
        let anchor = self.anchor.offset(size);
        let origin = match self.pivot {
            Pivot::Anchor => anchor,
            Pivot::Center => size * 0.5,
            Pivot::Local { at } => at,
        };
        let sx = self.scale.x * self.flip_y_deg.to_radians().cos();
        Affine::translate(self.position.to_vec2() - anchor + origin)
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::scale_non_uniform(sx, self.scale.y)
            * Affine::translate(-origin)
    }
}

/// How an image is sized before its placement is applied.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "fit", rename_all = "snake_case")]
pub enum ImageFit {
    /// Natural pixel size.
    Intrinsic,
    /// Fixed width, height keeps the aspect ratio.
    Width {
        /// Width in pixels.
        width: f64,
    },
    /// Stretched to an exact box.
    Exact {
        /// Box width.
        width: f64,
        /// Box height.
        height: f64,
    },
    /// Scaled to cover the box, cropping overflow.
    Cover {
        /// Box width.
        width: f64,
        /// Box height.
        height: f64,
    },
}

/// Colour treatment applied to an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFilter {
    /// True colour.
    #[default]
    None,
    /// Every opaque pixel black.
    Silhouette,
    /// Every opaque pixel white.
    WhiteSilhouette,
}

/// One primitive for the host compositor. Lower `z` paints first.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Solid colour rectangle.
    Fill {
        /// Rectangle in element-local pixels.
        rect: Rect,
        /// CSS colour string.
        color: String,
        /// Placement of `rect`'s origin.
        placement: Placement,
        /// Opacity in `[0, 1]`.
        opacity: f64,
        /// Paint order.
        z: i32,
    },
    /// Image asset.
    Image {
        /// Opaque asset reference.
        source: String,
        /// Sizing rule.
        fit: ImageFit,
        /// Colour treatment.
        filter: ImageFilter,
        /// Placement.
        placement: Placement,
        /// Opacity in `[0, 1]`.
        opacity: f64,
        /// Paint order.
        z: i32,
    },
    /// Single line of text.
    Text {
        /// Text content.
        text: String,
        /// Font size in pixels.
        font_size: f64,
        /// CSS colour string.
        color: String,
        /// Bold weight.
        bold: bool,
        /// Placement.
        placement: Placement,
        /// Opacity in `[0, 1]`.
        opacity: f64,
        /// Paint order.
        z: i32,
    },
}

impl DrawOp {
    /// Paint order.
    pub fn z(&self) -> i32 {
        match self {
            Self::Fill { z, .. } | Self::Image { z, .. } | Self::Text { z, .. } => *z,
        }
    }

    /// Opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        match self {
            Self::Fill { opacity, .. }
            | Self::Image { opacity, .. }
            | Self::Text { opacity, .. } => *opacity,
        }
    }

    /// Placement.
    pub fn placement(&self) -> &Placement {
        match self {
            Self::Fill { placement, .. }
            | Self::Image { placement, .. }
            | Self::Text { placement, .. } => placement,
        }
    }

    /// Asset reference for images.
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Image { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Shorthand for an opaque, unfiltered image.
    pub fn image(source: impl Into<String>, fit: ImageFit, placement: Placement, z: i32) -> Self {
        Self::Image {
            source: source.into(),
            fit,
            filter: ImageFilter::None,
            placement,
            opacity: 1.0,
            z,
        }
    }

    /// Shorthand for opaque regular-weight text.
    pub fn text(
        text: impl Into<String>,
        font_size: f64,
        color: impl Into<String>,
        placement: Placement,
        z: i32,
    ) -> Self {
        Self::Text {
            text: text.into(),
            font_size,
            color: color.into(),
            bold: false,
            placement,
            opacity: 1.0,
            z,
        }
    }

    /// Same op with opacity `opacity`, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, value: f64) -> Self {
        let v = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        match &mut self {
            Self::Fill { opacity, .. }
            | Self::Image { opacity, .. }
            | Self::Text { opacity, .. } => *opacity = v,
        }
        self
    }

    /// Same op with filter `f`; no-op for non-images.
    pub fn with_filter(mut self, f: ImageFilter) -> Self {
        if let Self::Image { filter, .. } = &mut self {
            *filter = f;
        }
        self
    }

    /// Same op in bold; no-op for non-text.
    pub fn bold(mut self) -> Self {
        if let Self::Text { bold, .. } = &mut self {
            *bold = true;
        }
        self
    }
}

/// Time inputs for one rendered frame of a segment.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameCtx {
    /// Frame relative to the segment's first frame.
    pub frame: u64,
    /// Segment length in frames.
    pub duration: u64,
    /// Frame rate.
    pub fps: Fps,
    /// Output size.
    pub canvas: Canvas,
}

impl FrameCtx {
    /// Context at `frame` of a `duration`-frame segment on a full-HD canvas.
    pub fn new(frame: u64, duration: u64, fps: Fps) -> Self {
        Self {
            frame,
            duration,
            fps,
            canvas: Canvas::FULL_HD,
        }
    }

    /// Local frame as `f64`.
    pub fn t(&self) -> f64 {
        self.frame as f64
    }

    /// Segment length as `f64`.
    pub fn len(&self) -> f64 {
        self.duration as f64
    }

    /// Exact frame count for `secs` at this frame rate.
    pub fn secs(&self, secs: f64) -> f64 {
        self.fps.secs_to_frames(secs)
    }
}

/// A segment kind: pure function from time inputs to draw ops.
///
/// Implementations hold only static parameters. Rendering the same context twice returns the
/// same ops.
pub trait SegmentRenderer {
    /// Short kind name used in logs.
    fn kind(&self) -> &'static str;

    /// Draw ops for one frame, in paint order.
    fn render(&self, ctx: &FrameCtx) -> Vec<DrawOp>;
}

#[cfg(test)]
#[path = "../../tests/unit/segments/draw.rs"]
mod tests;
