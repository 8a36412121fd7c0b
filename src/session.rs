use std::path::Path;

use image::{GrayImage, RgbImage, RgbaImage};
use log::{debug, info};

use crate::{
    detection::{count_set, detect_edges, dilate_square, resize_exact},
    error::EditorError,
    gesture::{Gesture, GestureAction, PointerEvent, StrokeKind},
    masking::{
        blend, colorize, draw_outline, erase_squares, stamp_circles, DRAW_OUTLINE, ERASER_OUTLINE,
    },
    overlay::{build_overlay, write_png},
    params::{clamp_to, BrushParams, EdgeParams, DILATION_RANGE},
    utils::{parse_dimension, Point, PointSet},
};

/// Interaction mode selected by the Eraser and Draw toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    Eraser,
    Draw,
}

impl Mode {
    fn stroke_kind(self) -> Option<StrokeKind> {
        match self {
            Mode::Idle => None,
            Mode::Eraser => Some(StrokeKind::Erase),
            Mode::Draw => Some(StrokeKind::Draw),
        }
    }
}

/// All state of one editing session.
///
/// Every operation runs to completion synchronously; the GUI calls these from
/// its event loop and re-uploads [`EditorSession::view`] whenever
/// [`EditorSession::view_revision`] changes.
#[derive(Debug, Default)]
pub struct EditorSession {
    pub edge_params: EdgeParams,
    pub brush: BrushParams,

    source: Option<RgbImage>,
    // binary mask after dilation and erasing
    edges: Option<GrayImage>,
    composite: Option<RgbImage>,
    view: Option<RgbImage>,
    view_revision: u64,

    mode: Mode,
    eraser_points: PointSet,
    drawn_points: PointSet,
    gesture: Gesture,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Accessors ---

    pub fn image(&self) -> Option<&RgbImage> {
        self.source.as_ref()
    }
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.source.as_ref().map(|img| img.dimensions())
    }
    pub fn edge_mask(&self) -> Option<&GrayImage> {
        self.edges.as_ref()
    }
    pub fn composite(&self) -> Option<&RgbImage> {
        self.composite.as_ref()
    }
    /// What the canvas should currently show.
    pub fn view(&self) -> Option<&RgbImage> {
        self.view.as_ref()
    }
    pub fn view_revision(&self) -> u64 {
        self.view_revision
    }
    pub fn mode(&self) -> Mode {
        self.mode
    }
    pub fn eraser_points(&self) -> &PointSet {
        &self.eraser_points
    }
    pub fn drawn_points(&self) -> &PointSet {
        &self.drawn_points
    }
    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    // --- Image source ---

    /// Loads an image from disk and shows it.
    ///
    /// Points, mode and parameters are kept. Returns the new dimensions so the
    /// caller can autofill its size fields.
    pub fn load_image(&mut self, path: &Path) -> Result<(u32, u32), EditorError> {
        let img = image::open(path).map_err(|source| EditorError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;
        let (width, height) = (img.width(), img.height());
        self.set_image(img.to_rgb8());
        info!("loaded {} ({}x{})", path.display(), width, height);
        Ok((width, height))
    }

    /// Replaces the source image. Any previous detection result is dropped.
    pub fn set_image(&mut self, image: RgbImage) {
        self.source = Some(image);
        self.edges = None;
        self.composite = None;
        self.show_source();
    }

    /// True once the source no longer matches the edge mask, i.e. after a
    /// resize and before the next detection.
    pub fn is_mask_stale(&self) -> bool {
        match (&self.source, &self.edges) {
            (Some(source), Some(edges)) => source.dimensions() != edges.dimensions(),
            _ => false,
        }
    }

    // --- Detection pipeline ---

    /// Detects edges on the current image and runs them through
    /// [`EditorSession::modify_edges`]. Returns `false` without an image.
    pub fn detect_edges(&mut self) -> bool {
        let Some(source) = &self.source else {
            return false;
        };
        let edges = detect_edges(source, &self.edge_params);
        self.modify_edges(edges);
        true
    }

    /// Dilates `edges`, applies the eraser markers and recomposites.
    pub fn modify_edges(&mut self, edges: GrayImage) {
        let Some(source) = &self.source else {
            return;
        };
        if edges.dimensions() != source.dimensions() {
            debug!(
                "modify_edges ignoring {:?} mask for {:?} image",
                edges.dimensions(),
                source.dimensions()
            );
            return;
        }

        let mut dilated = dilate_square(&edges, self.edge_params.kernel_side());
        erase_squares(&mut dilated, self.eraser_points.iter(), self.brush.radius());
        debug!(
            "modify_edges kernel={} erased_points={} remaining={}",
            self.edge_params.kernel_side(),
            self.eraser_points.len(),
            count_set(&dilated)
        );
        self.edges = Some(dilated);
        self.recomposite();
    }

    /// Sets the dilation slider value and re-runs detection if possible.
    pub fn set_dilation(&mut self, dilation: u32) {
        self.edge_params.dilation = clamp_to(dilation, &DILATION_RANGE);
        self.refresh_dilation();
    }

    /// Re-applies the current dilation by detecting again.
    pub fn refresh_dilation(&mut self) -> bool {
        self.detect_edges()
    }

    // --- Modes ---

    pub fn toggle_eraser(&mut self) -> Mode {
        self.mode = match self.mode {
            Mode::Eraser => Mode::Idle,
            _ => Mode::Eraser,
        };
        self.mode
    }

    pub fn toggle_draw(&mut self) -> Mode {
        self.mode = match self.mode {
            Mode::Draw => Mode::Idle,
            _ => Mode::Draw,
        };
        self.mode
    }

    // --- Pointer input ---

    /// Feeds one pointer event through the gesture machine and applies the
    /// resulting action. Ignored while no image is loaded.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.source.is_none() {
            return;
        }
        match self.gesture.handle(event, self.mode.stroke_kind()) {
            Some(GestureAction::Mark { kind, pos }) => self.mark(kind, pos),
            Some(GestureAction::Resize { dx, dy }) => self.resize_by(dx, dy),
            Some(GestureAction::End) | None => {}
        }
    }

    fn mark(&mut self, kind: StrokeKind, pos: Point) {
        let (set, color) = match kind {
            StrokeKind::Erase => (&mut self.eraser_points, ERASER_OUTLINE),
            StrokeKind::Draw => (&mut self.drawn_points, DRAW_OUTLINE),
        };
        set.insert(pos);
        if let Some(view) = &mut self.view {
            draw_outline(view, pos, self.brush.radius(), color);
            self.view_revision += 1;
        }
    }

    // --- Point editing ---

    /// Blanks every point of the active set onto the edge mask, then empties
    /// the set. The eraser set is active in eraser mode, the drawn set
    /// otherwise.
    pub fn discard_points(&mut self) {
        let radius = self.brush.radius();
        let points = match self.mode {
            Mode::Eraser => &mut self.eraser_points,
            Mode::Idle | Mode::Draw => &mut self.drawn_points,
        };
        if let Some(edges) = &mut self.edges {
            stamp_circles(edges, points.iter(), radius, 0);
            debug!("discard_points blanked {} points", points.len());
        }
        points.clear();
        if self.edges.is_some() {
            self.recomposite();
        }
    }

    /// Burns the drawn points into the edge mask. Only acts in draw mode once
    /// edges have been detected.
    ///
    /// The mask is not dilated again, so repeated commits leave existing edges
    /// as they are. Eraser squares are re-applied on top of the new strokes.
    pub fn commit_drawn_points(&mut self) -> bool {
        if self.mode != Mode::Draw {
            return false;
        }
        let radius = self.brush.radius();
        let Some(edges) = &mut self.edges else {
            return false;
        };
        stamp_circles(edges, self.drawn_points.iter(), radius, 255);
        erase_squares(edges, self.eraser_points.iter(), radius);
        debug!("commit_drawn_points stamped {} points", self.drawn_points.len());
        self.drawn_points.clear();
        self.recomposite();
        true
    }

    // --- Resizing ---

    /// Resizes from the text of the Length and Breadth fields.
    pub fn resize_manual(&mut self, length: &str, breadth: &str) -> Result<(), EditorError> {
        if self.source.is_none() {
            return Ok(());
        }
        let width = parse_dimension("length", length)?;
        let height = parse_dimension("breadth", breadth)?;
        self.resize_to(width, height);
        Ok(())
    }

    /// Resizes the source to exactly `width` x `height` and shows it.
    ///
    /// Existing points are not rescaled. The edge mask and composite are kept
    /// at their old size: they still export, but are not recomposited until
    /// edges are detected again.
    pub fn resize_to(&mut self, width: u32, height: u32) {
        let Some(source) = &self.source else {
            return;
        };
        let (width, height) = (width.max(1), height.max(1));
        if source.dimensions() == (width, height) {
            return;
        }
        debug!("resize {:?} -> {}x{}", source.dimensions(), width, height);
        let resized = resize_exact(source, width, height);
        self.source = Some(resized);
        self.show_source();
    }

    /// Grows or shrinks the image by a cursor delta, never below 1x1.
    pub fn resize_by(&mut self, dx: i32, dy: i32) {
        let Some((w, h)) = self.dimensions() else {
            return;
        };
        let width = (w as i64 + dx as i64).clamp(1, u32::MAX as i64) as u32;
        let height = (h as i64 + dy as i64).clamp(1, u32::MAX as i64) as u32;
        self.resize_to(width, height);
    }

    // --- Export ---

    /// The overlay that would be saved right now, if edges were detected.
    pub fn build_overlay(&self) -> Option<RgbaImage> {
        self.composite.as_ref()?;
        let edges = self.edges.as_ref()?;
        Some(build_overlay(
            edges,
            self.brush.color.rgb(),
            self.eraser_points.union(&self.drawn_points),
            self.brush.radius(),
        ))
    }

    pub fn save_overlay(&self, path: &Path) -> Result<(), EditorError> {
        let overlay = self.build_overlay().ok_or(EditorError::NoComposite)?;
        write_png(&overlay, path)
    }

    // --- Display ---

    fn recomposite(&mut self) {
        let (Some(source), Some(edges)) = (&self.source, &self.edges) else {
            return;
        };
        if source.dimensions() != edges.dimensions() {
            debug!("recomposite skipped, mask is stale");
            return;
        }
        let colored = colorize(edges, self.brush.color.rgb());
        let composite = blend(source, &colored, edges);
        self.view = Some(composite.clone());
        self.composite = Some(composite);
        self.view_revision += 1;
    }

    fn show_source(&mut self) {
        self.view = self.source.clone();
        self.view_revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::PointerButton;

    #[test]
    fn toggles_are_mutually_exclusive() {
        let mut session = EditorSession::new();
        assert_eq!(session.mode(), Mode::Idle);
        assert_eq!(session.toggle_eraser(), Mode::Eraser);
        assert_eq!(session.toggle_eraser(), Mode::Idle);
        session.toggle_eraser();
        assert_eq!(session.toggle_draw(), Mode::Draw);
        assert_eq!(session.toggle_eraser(), Mode::Eraser);
        assert_eq!(session.toggle_draw(), Mode::Draw);
        assert_eq!(session.toggle_draw(), Mode::Idle);
    }

    #[test]
    fn pointer_events_are_ignored_without_an_image() {
        let mut session = EditorSession::new();
        session.toggle_draw();
        session.handle_pointer(PointerEvent::Press {
            button: PointerButton::Primary,
            pos: Point::new(3, 3),
        });
        assert!(session.drawn_points().is_empty());
        assert_eq!(session.gesture(), Gesture::Idle);
    }

    #[test]
    fn marking_bumps_the_view_revision() {
        let mut session = EditorSession::new();
        session.set_image(RgbImage::new(20, 20));
        session.toggle_eraser();
        let before = session.view_revision();

        session.handle_pointer(PointerEvent::Press {
            button: PointerButton::Primary,
            pos: Point::new(5, 5),
        });
        session.handle_pointer(PointerEvent::Motion { pos: Point::new(10, 10) });

        assert!(session.view_revision() > before);
        assert!(session.eraser_points().contains(&Point::new(10, 10)));
        // outline is red, centre untouched
        let view = session.view().unwrap();
        assert_eq!(view.get_pixel(10, 5)[0], 255);
        assert_eq!(*view.get_pixel(10, 10), image::Rgb([0, 0, 0]));
    }

    #[test]
    fn commit_outside_draw_mode_is_a_no_op() {
        let mut session = EditorSession::new();
        session.set_image(RgbImage::new(10, 10));
        session.detect_edges();
        assert!(!session.commit_drawn_points());
    }
}
