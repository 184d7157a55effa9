use egui::{Pos2, Rect, Vec2, vec2};

use crate::block_tree::BlockTree;
use crate::coords::{LayoutDirection, SurfaceTransform};
use crate::error::MetricsUnavailable;
use crate::host::{EmbeddedOptions, Surface, Workspace};
use crate::metrics::ViewMetrics;

pub(super) const BLOCK_SIZE: Vec2 = vec2(40.0, 20.0);

#[derive(Clone, Debug, PartialEq)]
pub(super) struct TestBlock {
    pub tree: BlockTree,
    pub pos: Pos2,
    pub in_backpack: bool,
}

/// A canvas that records what it is asked to do. Blocks are `BLOCK_SIZE` boxes.
#[derive(Clone, Debug)]
pub(super) struct TestWorkspace {
    pub direction: LayoutDirection,
    pub metrics: Option<ViewMetrics>,
    pub transform: SurfaceTransform,
    pub scrollbars: bool,
    pub unmeasurable: bool,

    pub blocks: Vec<TestBlock>,
    pub embedded: Vec<EmbeddedOptions>,
    pub viewport: Vec2,
    pub renders: usize,
    pub translation: Option<Vec2>,
    pub scrollbar_updates: Vec<ViewMetrics>,
}

impl TestWorkspace {
    /// An 800 x 600 main canvas, unscrolled and unscaled.
    pub fn host() -> Self {
        Self {
            direction: LayoutDirection::LeftToRight,
            metrics: Some(ViewMetrics {
                view_width: 800.0,
                view_height: 600.0,
                content_width: 800.0,
                content_height: 600.0,
                ..Default::default()
            }),
            transform: SurfaceTransform::default(),
            scrollbars: true,
            unmeasurable: false,
            blocks: Vec::new(),
            embedded: Vec::new(),
            viewport: Vec2::ZERO,
            renders: 0,
            translation: None,
            scrollbar_updates: Vec::new(),
        }
    }

    pub fn rtl_host() -> Self {
        Self {
            direction: LayoutDirection::RightToLeft,
            ..Self::host()
        }
    }

    pub fn with_block(mut self, kind: &str, pos: Pos2) -> Self {
        self.blocks.push(TestBlock {
            tree: BlockTree::new(kind),
            pos,
            in_backpack: false,
        });
        self
    }

    pub fn block(&self, id: usize) -> &TestBlock {
        &self.blocks[id]
    }
}

impl Surface for TestWorkspace {
    fn layout_direction(&self) -> LayoutDirection {
        self.direction
    }

    fn view_metrics(&self) -> Option<ViewMetrics> {
        self.metrics
    }

    fn surface_transform(&self) -> SurfaceTransform {
        self.transform
    }
}

impl Workspace for TestWorkspace {
    type BlockId = usize;

    fn create_embedded(&mut self, options: &EmbeddedOptions) -> Self {
        self.embedded.push(*options);
        Self {
            direction: options.direction,
            metrics: None,
            scrollbars: options.scrollbars,
            viewport: options.size,
            ..Self::host()
        }
    }

    fn has_scrollbars(&self) -> bool {
        self.scrollbars
    }

    fn set_viewport_size(&mut self, size: Vec2) {
        self.viewport = size;
    }

    fn render(&mut self) {
        self.renders += 1;
    }

    fn content_bounds(&self) -> Result<Rect, MetricsUnavailable> {
        if self.unmeasurable {
            return Err(MetricsUnavailable);
        }
        Ok(self
            .blocks
            .iter()
            .map(|b| Rect::from_min_size(b.pos, BLOCK_SIZE))
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::from_min_size(Pos2::ZERO, Vec2::ZERO)))
    }

    fn translate_canvas(&mut self, translation: Vec2) {
        self.translation = Some(translation);
    }

    fn update_scrollbars(&mut self, metrics: &ViewMetrics) {
        self.scrollbar_updates.push(*metrics);
    }

    fn top_blocks(&self) -> Vec<usize> {
        (0..self.blocks.len()).collect()
    }

    fn serialize_block(&self, block: usize) -> Option<BlockTree> {
        self.blocks.get(block).map(|b| b.tree.clone())
    }

    fn instantiate_block(&mut self, tree: &BlockTree, at: Pos2) -> usize {
        self.blocks.push(TestBlock {
            tree: tree.clone(),
            pos: at,
            in_backpack: false,
        });
        self.blocks.len() - 1
    }

    fn move_block_by(&mut self, block: usize, delta: Vec2) {
        if let Some(b) = self.blocks.get_mut(block) {
            b.pos += delta;
        }
    }

    fn is_in_backpack(&self, block: usize) -> bool {
        self.blocks.get(block).is_some_and(|b| b.in_backpack)
    }

    fn set_in_backpack(&mut self, block: usize, in_backpack: bool) {
        if let Some(b) = self.blocks.get_mut(block) {
            b.in_backpack = in_backpack;
        }
    }
}
