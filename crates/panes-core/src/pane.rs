use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::backend::{Backend, Canvas};
use crate::error::{ConfigError, PanesError};
use crate::geometry::Point;
use crate::primitive::Primitive;
use crate::transform::Transform;

/// Source of per-tree tags, so ids from one tree are refused by another.
static NEXT_TREE_TAG: AtomicU32 = AtomicU32::new(0);

/// Handle to a pane: the owning tree's tag plus the arena index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId {
    tree: u32,
    index: u32,
}

impl PaneId {
    pub fn index(self) -> usize {
        self.index as usize
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}.{}", self.tree, self.index)
    }
}

/// One entry in a pane's content list. Paint order is list order.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Primitive(Primitive),
    Pane(PaneId),
}

/// Parameters for a non-root pane, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneOptions {
    pub parent: Option<PaneId>,
    /// Offset of the pane's origin, in the parent's units.
    pub translation: Point,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for PaneOptions {
    fn default() -> Self {
        Self {
            parent: None,
            translation: Point::new(0.0, 0.0),
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl PaneOptions {
    pub fn child_of(parent: PaneId) -> Self {
        Self {
            parent: Some(parent),
            ..Default::default()
        }
    }

    pub fn translate(mut self, dx: f64, dy: f64) -> Self {
        self.translation = Point::new(dx, dy);
        self
    }

    /// Uniform scale on both axes.
    pub fn scale(self, sf: f64) -> Self {
        self.scale_xy(sf, sf)
    }

    pub fn scale_xy(mut self, sfx: f64, sfy: f64) -> Self {
        self.scale_x = sfx;
        self.scale_y = sfy;
        self
    }
}

/// A node's own frame: local offset, local scale and resulting extent.
#[derive(Debug, Clone, PartialEq)]
pub struct Pane {
    parent: Option<PaneId>,
    dx: f64,
    dy: f64,
    sfx: f64,
    sfy: f64,
    /// Extent in this pane's own units.
    width: f64,
    height: f64,
    contents: Vec<Content>,
}

impl Pane {
    pub fn parent(&self) -> Option<PaneId> {
        self.parent
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Local parameters as a transform relative to the parent.
    pub fn local(&self) -> Transform {
        Transform::new(self.dx, self.dy, self.sfx, self.sfy)
    }

    pub fn extent(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    pub fn children(&self) -> impl Iterator<Item = PaneId> + '_ {
        self.contents.iter().filter_map(|c| match c {
            Content::Pane(id) => Some(*id),
            Content::Primitive(_) => None,
        })
    }

    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> + '_ {
        self.contents.iter().filter_map(|c| match c {
            Content::Primitive(p) => Some(p),
            Content::Pane(_) => None,
        })
    }
}

/// A tree of nested coordinate frames, stored as an arena of panes.
///
/// Pane 0 is always the root. Every other pane records its parent and is
/// listed in exactly one parent's content list; panes are only ever added,
/// so the tree stays acyclic. A clone keeps the tag, so ids stay valid in it.
#[derive(Debug, Clone)]
pub struct PaneTree {
    tag: u32,
    panes: Vec<Pane>,
}

impl PaneTree {
    /// Build a tree whose root covers the whole surface at unit scale.
    pub fn new<B: Backend>(canvas: &mut Canvas<B>) -> Result<Self, PanesError> {
        Self::with_root(canvas, Point::new(0.0, 0.0), 1.0, 1.0)
    }

    /// Build a tree with a root that sets the device origin and base scale.
    ///
    /// The root's extent is the surface size. The surface is created here if
    /// no earlier root did so.
    pub fn with_root<B: Backend>(
        canvas: &mut Canvas<B>,
        translation: Point,
        scale_x: f64,
        scale_y: f64,
    ) -> Result<Self, PanesError> {
        canvas.ensure_surface()?;
        let cfg = canvas.config();
        warn_if_degenerate(scale_x, scale_y);
        let root = Pane {
            parent: None,
            dx: translation.x,
            dy: translation.y,
            sfx: scale_x,
            sfy: scale_y,
            width: cfg.width,
            height: cfg.height,
            contents: Vec::new(),
        };
        Ok(Self {
            tag: NEXT_TREE_TAG.fetch_add(1, Ordering::Relaxed),
            panes: vec![root],
        })
    }

    pub fn root(&self) -> PaneId {
        PaneId {
            tree: self.tag,
            index: 0,
        }
    }

    /// Number of panes, root included; never zero.
    pub fn pane_count(&self) -> usize {
        self.panes.len()
    }

    pub fn get(&self, id: PaneId) -> Result<&Pane, ConfigError> {
        if id.tree != self.tag {
            return Err(ConfigError::UnknownPane(id));
        }
        self.panes.get(id.index()).ok_or(ConfigError::UnknownPane(id))
    }

    fn get_mut(&mut self, id: PaneId) -> Result<&mut Pane, ConfigError> {
        if id.tree != self.tag {
            return Err(ConfigError::UnknownPane(id));
        }
        self.panes
            .get_mut(id.index())
            .ok_or(ConfigError::UnknownPane(id))
    }

    fn next_id(&self) -> Result<PaneId, ConfigError> {
        pane_id_at(self.tag, self.panes.len())
    }

    // ── Construction ─────────────────────────────────────────────────

    /// Create a pane inside `options.parent` and register it as the
    /// parent's newest content entry.
    pub fn add_pane(&mut self, options: PaneOptions) -> Result<PaneId, ConfigError> {
        let parent_id = options.parent.ok_or(ConfigError::MissingParent)?;
        let (parent_w, parent_h) = self.get(parent_id)?.extent();
        warn_if_degenerate(options.scale_x, options.scale_y);

        let id = self.next_id()?;
        self.panes.push(Pane {
            parent: Some(parent_id),
            dx: options.translation.x,
            dy: options.translation.y,
            sfx: options.scale_x,
            sfy: options.scale_y,
            width: parent_w * options.scale_x,
            height: parent_h * options.scale_y,
            contents: Vec::new(),
        });
        self.get_mut(parent_id)?.contents.push(Content::Pane(id));
        log::debug!("Added pane {} under {}", id, parent_id);
        Ok(id)
    }

    /// Create a pane with fully derived geometry. Used by layout helpers that
    /// compute scale and extent themselves.
    pub(crate) fn add_derived_pane(
        &mut self,
        parent: PaneId,
        local: Transform,
        extent: (f64, f64),
    ) -> Result<PaneId, ConfigError> {
        self.get(parent)?;
        let id = self.next_id()?;
        self.panes.push(Pane {
            parent: Some(parent),
            dx: local.dx,
            dy: local.dy,
            sfx: local.sfx,
            sfy: local.sfy,
            width: extent.0,
            height: extent.1,
            contents: Vec::new(),
        });
        self.get_mut(parent)?.contents.push(Content::Pane(id));
        Ok(id)
    }

    /// Attach a primitive to `pane`, painting over anything appended earlier.
    pub fn append(&mut self, pane: PaneId, primitive: Primitive) -> Result<(), ConfigError> {
        self.get_mut(pane)?
            .contents
            .push(Content::Primitive(primitive));
        Ok(())
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn parent(&self, pane: PaneId) -> Result<Option<PaneId>, ConfigError> {
        Ok(self.get(pane)?.parent)
    }

    pub fn extent(&self, pane: PaneId) -> Result<(f64, f64), ConfigError> {
        Ok(self.get(pane)?.extent())
    }

    /// Ancestors of `pane`, nearest first, ending at the root.
    pub fn ancestors(&self, pane: PaneId) -> Result<Vec<PaneId>, ConfigError> {
        let mut out = Vec::new();
        let mut current = self.get(pane)?.parent;
        while let Some(id) = current {
            out.push(id);
            current = self.get(id)?.parent;
        }
        Ok(out)
    }

    /// The transform a full render from the root computes for `pane`.
    pub fn composed_transform(&self, pane: PaneId) -> Result<Transform, ConfigError> {
        let mut chain = self.ancestors(pane)?;
        chain.reverse();
        chain.push(pane);

        let mut composed: Option<Transform> = None;
        for id in chain {
            let local = self.get(id)?.local();
            composed = Some(Transform::compose(
                local.dx,
                local.dy,
                local.sfx,
                local.sfy,
                composed.as_ref(),
            ));
        }
        Ok(composed.unwrap_or_default())
    }

    /// Transform from `pane`'s units into `ancestor`'s units.
    ///
    /// Composes the local transforms strictly below `ancestor` down to and
    /// including `pane`. `ancestor == pane` yields the identity.
    pub fn transform_relative_to(
        &self,
        pane: PaneId,
        ancestor: PaneId,
    ) -> Result<Transform, ConfigError> {
        self.get(ancestor)?;
        let mut chain = vec![pane];
        let mut current = pane;
        while current != ancestor {
            match self.get(current)?.parent {
                Some(parent) if parent == ancestor => break,
                Some(parent) => {
                    chain.push(parent);
                    current = parent;
                }
                None => return Err(ConfigError::NotAnAncestor { pane, ancestor }),
            }
        }
        if pane == ancestor {
            return Ok(Transform::IDENTITY);
        }

        let mut composed = Transform::IDENTITY;
        for id in chain.into_iter().rev() {
            composed = composed.then(&self.get(id)?.local());
        }
        Ok(composed)
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Render the whole tree, then present the frame and clear the surface.
    ///
    /// The canvas need not be the one the tree was built on; its surface is
    /// created first if it does not exist yet.
    pub fn render<B: Backend>(&self, canvas: &mut Canvas<B>) -> Result<(), PanesError> {
        canvas.ensure_surface()?;
        self.render_pane(self.root(), None, canvas)
    }

    /// Depth-first render of `pane` under `parent_transform`.
    ///
    /// Content entries are visited in insertion order. When `pane` is the
    /// root the frame is presented and the surface cleared afterwards.
    pub fn render_pane<B: Backend>(
        &self,
        pane: PaneId,
        parent_transform: Option<&Transform>,
        canvas: &mut Canvas<B>,
    ) -> Result<(), PanesError> {
        let node = self.get(pane)?;
        let transform = Transform::compose(
            node.dx,
            node.dy,
            node.sfx,
            node.sfy,
            parent_transform,
        );
        log::debug!(
            "Rendering pane {} ({} entries) at origin ({}, {}) scale ({}, {})",
            pane,
            node.contents.len(),
            transform.dx,
            transform.dy,
            transform.sfx,
            transform.sfy
        );

        for content in &node.contents {
            match content {
                Content::Primitive(p) => p.render(&transform, canvas)?,
                Content::Pane(child) => self.render_pane(*child, Some(&transform), canvas)?,
            }
        }

        if node.is_root() {
            canvas.finish_frame()?;
        }
        Ok(())
    }
}

fn pane_id_at(tree: u32, len: usize) -> Result<PaneId, ConfigError> {
    let index = u32::try_from(len).map_err(|_| ConfigError::TreeFull)?;
    Ok(PaneId { tree, index })
}

fn warn_if_degenerate(sfx: f64, sfy: f64) {
    if sfx <= 0.0 || sfy <= 0.0 {
        log::warn!("Pane created with degenerate scale ({}, {})", sfx, sfy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::testing::{init_logger, Call, CallLog};
    use crate::config::{Style, SurfaceConfig};
    use crate::geometry::Rgb;

    const EPS: f64 = 1e-9;

    fn canvas(w: f64, h: f64) -> Canvas<CallLog> {
        init_logger();
        Canvas::new(CallLog::default(), SurfaceConfig::new(w, h))
    }

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().map(|&p| p.into()).collect()
    }

    fn assert_points_close(actual: &[Point], expected: &[Point]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!(
                (a.x - e.x).abs() < EPS && (a.y - e.y).abs() < EPS,
                "{:?} != {:?}",
                a,
                e
            );
        }
    }

    #[test]
    fn test_pane_without_parent_is_rejected() {
        let mut c = canvas(500.0, 500.0);
        let mut tree = PaneTree::new(&mut c).unwrap();
        let err = tree.add_pane(PaneOptions::default().scale(0.5)).unwrap_err();
        assert_eq!(err, ConfigError::MissingParent);
        assert_eq!(tree.pane_count(), 1);
        assert!(tree.get(tree.root()).unwrap().contents().is_empty());
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let mut c = canvas(500.0, 500.0);
        let mut tree = PaneTree::new(&mut c).unwrap();
        let missing = PaneId {
            tree: tree.tag,
            index: 7,
        };
        let err = tree.add_pane(PaneOptions::child_of(missing)).unwrap_err();
        assert_eq!(err, ConfigError::UnknownPane(missing));
    }

    #[test]
    fn test_id_from_other_tree_is_rejected() {
        let mut c = canvas(500.0, 500.0);
        let mut a = PaneTree::new(&mut c).unwrap();
        let mut b = PaneTree::new(&mut c).unwrap();
        let from_a = a.add_pane(PaneOptions::child_of(a.root())).unwrap();
        b.add_pane(PaneOptions::child_of(b.root())).unwrap();

        assert_ne!(from_a.index(), 0);
        assert_eq!(
            b.add_pane(PaneOptions::child_of(from_a)).unwrap_err(),
            ConfigError::UnknownPane(from_a)
        );
        assert_eq!(
            b.get(a.root()).unwrap_err(),
            ConfigError::UnknownPane(a.root())
        );
        assert_eq!(b.pane_count(), 2);
    }

    #[test]
    fn test_cloned_tree_accepts_its_ids() {
        let mut c = canvas(500.0, 500.0);
        let mut tree = PaneTree::new(&mut c).unwrap();
        let child = tree.add_pane(PaneOptions::child_of(tree.root())).unwrap();
        let copy = tree.clone();
        assert!(copy.get(child).is_ok());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_pane_index_overflow_is_rejected() {
        assert_eq!(pane_id_at(3, u32::MAX as usize).unwrap().index(), u32::MAX as usize);
        assert_eq!(
            pane_id_at(3, u32::MAX as usize + 1).unwrap_err(),
            ConfigError::TreeFull
        );
    }

    #[test]
    fn test_second_root_reuses_surface() {
        let mut c = canvas(300.0, 200.0);
        let a = PaneTree::new(&mut c).unwrap();
        let b = PaneTree::new(&mut c).unwrap();
        let inits = c
            .backend()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Init(..)))
            .count();
        assert_eq!(inits, 1);
        assert_eq!(a.extent(a.root()).unwrap(), (300.0, 200.0));
        assert_eq!(b.extent(b.root()).unwrap(), (300.0, 200.0));
    }

    #[test]
    fn test_extent_propagates_to_children() {
        let mut c = canvas(1000.0, 800.0);
        let mut tree = PaneTree::new(&mut c).unwrap();
        let a = tree
            .add_pane(PaneOptions::child_of(tree.root()).scale_xy(0.5, 0.25))
            .unwrap();
        let b = tree
            .add_pane(PaneOptions::child_of(a).translate(10.0, 10.0).scale(0.1))
            .unwrap();

        for id in [a, b] {
            let parent = tree.parent(id).unwrap().unwrap();
            let (pw, ph) = tree.extent(parent).unwrap();
            let local = tree.get(id).unwrap().local();
            let (w, h) = tree.extent(id).unwrap();
            assert!((w - pw * local.sfx).abs() < EPS);
            assert!((h - ph * local.sfy).abs() < EPS);
        }
        assert_eq!(tree.extent(a).unwrap(), (500.0, 200.0));
    }

    #[test]
    fn test_half_scale_child_maps_full_quad() {
        let mut c = canvas(1000.0, 800.0);
        let mut tree = PaneTree::new(&mut c).unwrap();
        let child = tree
            .add_pane(PaneOptions::child_of(tree.root()).scale(0.5))
            .unwrap();
        let quad = pts(&[(0.0, 0.0), (0.0, 800.0), (1000.0, 800.0), (1000.0, 0.0)]);
        tree.append(child, Primitive::polygon(quad, Style::default()).unwrap())
            .unwrap();

        tree.render(&mut c).unwrap();

        let drawn = c.backend().polygons();
        assert_eq!(drawn.len(), 1);
        assert_points_close(
            drawn[0],
            &pts(&[(0.0, 0.0), (0.0, 400.0), (500.0, 400.0), (500.0, 0.0)]),
        );
    }

    #[test]
    fn test_paint_order_follows_insertion() {
        let mut c = canvas(100.0, 100.0);
        let mut tree = PaneTree::new(&mut c).unwrap();
        let root = tree.root();
        let first = Primitive::polygon(pts(&[(1.0, 1.0)]), Style::filled(Rgb::new(1, 0, 0))).unwrap();
        let second = Primitive::polygon(pts(&[(2.0, 2.0)]), Style::filled(Rgb::new(2, 0, 0))).unwrap();
        tree.append(root, first).unwrap();
        let nested = tree.add_pane(PaneOptions::child_of(root)).unwrap();
        tree.append(nested, Primitive::polygon(pts(&[(3.0, 3.0)]), Style::filled(Rgb::new(3, 0, 0))).unwrap())
            .unwrap();
        tree.append(root, second).unwrap();

        tree.render(&mut c).unwrap();

        let fills: Vec<u8> = c
            .backend()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Polygon(_, fill, _) => Some(fill.r),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec![1, 3, 2]);
    }

    #[test]
    fn test_root_render_presents_then_clears_once() {
        let mut c = canvas(100.0, 100.0);
        let mut tree = PaneTree::new(&mut c).unwrap();
        let child = tree.add_pane(PaneOptions::child_of(tree.root())).unwrap();
        tree.append(child, Primitive::grid_cell(0, 0, Style::default()).unwrap())
            .unwrap();
        c.backend_mut().calls.clear();

        tree.render(&mut c).unwrap();

        let calls = &c.backend().calls;
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[0], Call::Polygon(..)));
        assert_eq!(calls[1], Call::Present);
        assert_eq!(calls[2], Call::Clear(Rgb::WHITE));
    }

    #[test]
    fn test_subtree_render_does_not_present() {
        let mut c = canvas(100.0, 100.0);
        let mut tree = PaneTree::new(&mut c).unwrap();
        let child = tree
            .add_pane(PaneOptions::child_of(tree.root()).scale(2.0))
            .unwrap();
        tree.append(child, Primitive::polygon(pts(&[(1.0, 1.0)]), Style::default()).unwrap())
            .unwrap();
        c.backend_mut().calls.clear();

        let parent = Transform::new(10.0, 0.0, 1.0, 1.0);
        tree.render_pane(child, Some(&parent), &mut c).unwrap();

        assert_eq!(
            c.backend().calls,
            vec![Call::Polygon(pts(&[(12.0, 2.0)]), Rgb::RED, 0)]
        );
        assert_eq!(c.frames_presented(), 0);
    }

    #[test]
    fn test_composed_transform_matches_render() {
        let mut c = canvas(1000.0, 800.0);
        let mut tree = PaneTree::with_root(&mut c, Point::new(5.0, 7.0), 2.0, 2.0).unwrap();
        let a = tree
            .add_pane(PaneOptions::child_of(tree.root()).translate(100.0, 100.0).scale(0.5))
            .unwrap();
        let b = tree
            .add_pane(PaneOptions::child_of(a).translate(100.0, 100.0).scale(0.5))
            .unwrap();
        let sample = Point::new(10.0, 20.0);
        tree.append(b, Primitive::polygon(vec![sample], Style::default()).unwrap())
            .unwrap();

        tree.render(&mut c).unwrap();

        let expected = tree.composed_transform(b).unwrap().apply(sample);
        assert_points_close(c.backend().polygons()[0], &[expected]);
        assert_points_close(&[expected], &[Point::new(310.0, 317.0)]);
    }

    #[test]
    fn test_transform_relative_to_ancestor() {
        let mut c = canvas(1000.0, 800.0);
        let mut tree = PaneTree::with_root(&mut c, Point::new(50.0, 50.0), 1.0, 1.0).unwrap();
        let a = tree
            .add_pane(PaneOptions::child_of(tree.root()).translate(30.0, 10.0).scale(0.5))
            .unwrap();
        let b = tree
            .add_pane(PaneOptions::child_of(a).translate(100.0, 0.0).scale_xy(2.0, 4.0))
            .unwrap();

        let rel = tree.transform_relative_to(b, tree.root()).unwrap();
        assert_eq!(rel, Transform::new(80.0, 10.0, 1.0, 2.0));
        assert_eq!(tree.transform_relative_to(b, b).unwrap(), Transform::IDENTITY);
        assert_eq!(
            tree.transform_relative_to(b, a).unwrap(),
            Transform::new(100.0, 0.0, 2.0, 4.0)
        );
    }

    #[test]
    fn test_transform_relative_to_non_ancestor_fails() {
        let mut c = canvas(100.0, 100.0);
        let mut tree = PaneTree::new(&mut c).unwrap();
        let a = tree.add_pane(PaneOptions::child_of(tree.root())).unwrap();
        let b = tree.add_pane(PaneOptions::child_of(tree.root())).unwrap();
        assert_eq!(
            tree.transform_relative_to(a, b).unwrap_err(),
            ConfigError::NotAnAncestor { pane: a, ancestor: b }
        );
    }

    #[test]
    fn test_identity_pane_draws_like_parent() {
        let mut c = canvas(400.0, 400.0);
        let mut tree = PaneTree::new(&mut c).unwrap();
        let root = tree.root();
        let outer = tree
            .add_pane(PaneOptions::child_of(root).translate(40.0, 60.0).scale(0.75))
            .unwrap();
        let inner = tree.add_pane(PaneOptions::child_of(outer)).unwrap();
        let shape = pts(&[(0.0, 0.0), (10.0, 30.0), (55.5, 2.0)]);
        tree.append(outer, Primitive::polygon(shape.clone(), Style::default()).unwrap())
            .unwrap();
        tree.append(inner, Primitive::polygon(shape, Style::default()).unwrap())
            .unwrap();

        tree.render(&mut c).unwrap();

        let drawn = c.backend().polygons();
        assert_eq!(drawn[0], drawn[1]);
    }

    #[test]
    fn test_recursive_quadrants() {
        fn quarter(tree: &mut PaneTree, parent: PaneId, depth: u32, w: f64, h: f64) {
            if depth == 0 {
                return;
            }
            for (dx, dy) in [(0.0, 0.0), (0.5 * w, 0.0), (0.0, 0.5 * h), (0.5 * w, 0.5 * h)] {
                let pane = tree
                    .add_pane(PaneOptions::child_of(parent).translate(dx, dy).scale(0.5))
                    .unwrap();
                let shape = pts(&[(0.0, 0.0), (0.0, h), (w, h), (w, 0.0), (0.0, 0.0)]);
                tree.append(pane, Primitive::polygon(shape, Style::default()).unwrap())
                    .unwrap();
                quarter(tree, pane, depth - 1, w, h);
            }
        }

        let mut c = canvas(1000.0, 800.0);
        let mut tree = PaneTree::new(&mut c).unwrap();
        let root = tree.root();
        quarter(&mut tree, root, 3, 1000.0, 800.0);
        assert_eq!(tree.pane_count(), 1 + 4 + 16 + 64);

        tree.render(&mut c).unwrap();

        let drawn = c.backend().polygons();
        assert_eq!(drawn.len(), 84);
        // Last pane drawn is the south-east corner three levels down.
        let last = drawn[83];
        assert_points_close(&last[..1], &[Point::new(875.0, 700.0)]);
        assert_points_close(&last[2..3], &[Point::new(1000.0, 800.0)]);
    }

    #[test]
    fn test_backend_failure_propagates() {
        let mut c = canvas(100.0, 100.0);
        let mut tree = PaneTree::new(&mut c).unwrap();
        tree.append(tree.root(), Primitive::grid_cell(0, 0, Style::default()).unwrap())
            .unwrap();
        c.backend_mut().fail_draws = true;
        let err = tree.render(&mut c).unwrap_err();
        assert!(matches!(err, PanesError::Backend(_)));
        assert_eq!(c.frames_presented(), 0);
    }

    #[test]
    fn test_render_on_fresh_canvas_creates_surface() {
        let mut built_on = canvas(200.0, 200.0);
        let mut tree = PaneTree::new(&mut built_on).unwrap();
        let style = Style::filled(Rgb::RED);
        tree.append(
            tree.root(),
            Primitive::polygon(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)], style).unwrap(),
        )
        .unwrap();

        let mut fresh = canvas(200.0, 200.0);
        tree.render(&mut fresh).unwrap();
        let calls = &fresh.backend().calls;
        assert!(matches!(calls[0], Call::Init(..)));
        assert!(matches!(calls[1], Call::Clear(..)));
        assert!(matches!(calls[2], Call::Polygon(..)));
        assert!(matches!(calls[3], Call::Present));
        assert_eq!(fresh.frames_presented(), 1);
    }
}
