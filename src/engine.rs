//! Soft-wrap layout engine
//!
//! Computes wrap points for buffer lines against the width reported by the
//! active [`WidthProvider`], caching per-line results and recomputing lazily
//! after edits or reconfiguration. Wrap points are display-only state: they
//! are recomputed on demand and never persisted.
//!
//! The wrap policy is greedy: walk the line accumulating rendered width and,
//! when the next character would exceed the column budget, break at the most
//! recent boundary opportunity in the current segment. The content type
//! active at the offset (injection language inside an injected region, host
//! content type elsewhere) decides what counts as a boundary. When a token is
//! wider than the whole budget, a forced mid-token break keeps every visual
//! line within the viewport.

use std::fmt;
use std::ops::Range;

use crate::config::WrapConfig;
use crate::document::{Document, EditEffect};
use crate::util::text::char_cell_width;
use crate::width::{FontMetrics, WidthProvider};

/// A visual line break: the char offset where the next visual line starts,
/// plus the visual column at which the break occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapPoint {
    /// Char offset into the document
    pub offset: usize,
    /// Visual column of the break within its visual line
    pub visual_column: usize,
}

/// Errors reported by layout and edit operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The width provider reported a non-positive width
    InvalidWidth(i32),
    /// A char offset outside the document was passed to an edit
    OffsetOutOfBounds { offset: usize, len: usize },
    /// A line outside the document was passed to a layout query
    LineOutOfRange { line: usize, line_count: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::InvalidWidth(width) => {
                write!(f, "width provider reported non-positive width {}", width)
            }
            LayoutError::OffsetOutOfBounds { offset, len } => {
                write!(f, "offset {} out of bounds for document of {} chars", offset, len)
            }
            LayoutError::LineOutOfRange { line, line_count } => {
                write!(f, "line {} out of range for document of {} lines", line, line_count)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Cached wrap points for one buffer line
#[derive(Debug)]
struct LineWrap {
    points: Vec<WrapPoint>,
    /// Layout generation the entry was computed under
    layout_gen: u64,
}

/// Soft-wrap layout engine owning the document it lays out.
///
/// All edits go through the engine so the wrap cache can be invalidated for
/// exactly the lines an edit touched. Swapping the width provider or
/// toggling soft wrap bumps a generation counter instead of clearing the
/// cache, so stale entries are discarded on the next query, not before.
pub struct SoftWrapEngine {
    document: Document,
    width_provider: Box<dyn WidthProvider>,
    metrics: FontMetrics,
    config: WrapConfig,
    enabled: bool,
    /// Per-line cache; None means dirty
    cache: Vec<Option<LineWrap>>,
    /// Bumped on provider swap / enable toggle; stale entries fail the check
    layout_gen: u64,
    /// Generation the non-positive-width warning was last emitted for
    warned_gen: Option<u64>,
}

impl SoftWrapEngine {
    /// Create an engine with default configuration
    pub fn new(
        document: Document,
        metrics: FontMetrics,
        width_provider: Box<dyn WidthProvider>,
    ) -> Self {
        Self::with_config(document, metrics, width_provider, WrapConfig::default())
    }

    /// Create an engine with explicit configuration
    pub fn with_config(
        document: Document,
        metrics: FontMetrics,
        width_provider: Box<dyn WidthProvider>,
        config: WrapConfig,
    ) -> Self {
        let enabled = config.enabled;
        Self {
            document,
            width_provider,
            metrics,
            config,
            enabled,
            cache: Vec::new(),
            layout_gen: 0,
            warned_gen: None,
        }
    }

    /// The document being laid out
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Replace the active width source.
    ///
    /// No side effect on existing wrap points until the next layout query:
    /// cached entries survive but fail the generation check when queried.
    pub fn set_width_provider(&mut self, provider: Box<dyn WidthProvider>) {
        self.width_provider = provider;
        self.layout_gen = self.layout_gen.wrapping_add(1);
        tracing::debug!(layout_gen = self.layout_gen, "width provider replaced");
    }

    /// Toggle soft wrapping. A disabled engine yields no wrap points.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.layout_gen = self.layout_gen.wrapping_add(1);
            tracing::debug!(enabled, "soft wrap toggled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Check the current width configuration without computing layout
    pub fn check_width(&self) -> Result<(), LayoutError> {
        let width = self.width_provider.visible_width();
        if width <= 0 {
            Err(LayoutError::InvalidWidth(width))
        } else {
            Ok(())
        }
    }

    /// Insert a single character, invalidating the affected visual line
    pub fn insert_char(&mut self, offset: usize, ch: char) -> Result<(), LayoutError> {
        let effect = self.document.insert_char(offset, ch)?;
        self.apply_edit(effect);
        Ok(())
    }

    /// Insert text at a char offset
    pub fn insert(&mut self, offset: usize, text: &str) -> Result<(), LayoutError> {
        let effect = self.document.insert(offset, text)?;
        self.apply_edit(effect);
        Ok(())
    }

    /// Remove a char range
    pub fn remove(&mut self, range: Range<usize>) -> Result<(), LayoutError> {
        let effect = self.document.remove(range)?;
        self.apply_edit(effect);
        Ok(())
    }

    /// Lazy, restartable sequence of wrap points for a range of buffer
    /// lines, ordered by offset. Dirty lines are recomputed as the iterator
    /// reaches them.
    pub fn wrap_points(&mut self, lines: Range<usize>) -> Result<WrapPoints<'_>, LayoutError> {
        let line_count = self.document.line_count();
        if lines.start > lines.end || lines.end > line_count {
            return Err(LayoutError::LineOutOfRange {
                line: lines.end,
                line_count,
            });
        }
        Ok(WrapPoints {
            line: lines.start,
            end: lines.end,
            index: 0,
            engine: self,
        })
    }

    /// The rendered segments of one buffer line after wrapping.
    ///
    /// An unwrapped line comes back as a single segment.
    pub fn visual_lines(&mut self, line: usize) -> Result<Vec<String>, LayoutError> {
        let line_count = self.document.line_count();
        if line >= line_count {
            return Err(LayoutError::LineOutOfRange { line, line_count });
        }

        let points = self.ensure_line(line).to_vec();
        let chars: Vec<char> = self
            .document
            .line_text(line)
            .unwrap_or_default()
            .chars()
            .collect();

        let mut segments = Vec::with_capacity(points.len() + 1);
        let mut prev = 0usize;
        for point in &points {
            segments.push(chars[prev..point.offset].iter().collect());
            prev = point.offset;
        }
        segments.push(chars[prev..].iter().collect());
        Ok(segments)
    }

    /// Number of visual lines one buffer line occupies
    pub fn visual_line_count(&mut self, line: usize) -> Result<usize, LayoutError> {
        let line_count = self.document.line_count();
        if line >= line_count {
            return Err(LayoutError::LineOutOfRange { line, line_count });
        }
        Ok(self.ensure_line(line).len() + 1)
    }

    /// Targeted cache maintenance after an edit: clear the touched line and
    /// splice/drain entries for split or joined lines so untouched lines
    /// keep their cached layout.
    fn apply_edit(&mut self, effect: EditEffect) {
        let line = effect.first_line;
        if line < self.cache.len() {
            self.cache[line] = None;
        }
        if effect.lines_inserted > 0 {
            let at = (line + 1).min(self.cache.len());
            self.cache.splice(
                at..at,
                std::iter::repeat_with(|| None).take(effect.lines_inserted),
            );
        }
        if effect.lines_removed > 0 {
            let start = line + 1;
            if start < self.cache.len() {
                let end = (start + effect.lines_removed).min(self.cache.len());
                self.cache.drain(start..end);
            }
        }
        tracing::trace!(
            line,
            lines_inserted = effect.lines_inserted,
            lines_removed = effect.lines_removed,
            "wrap cache invalidated"
        );
    }

    /// Get the (possibly recomputed) wrap points for one line.
    ///
    /// Cached offsets are relative to the line start so entries survive
    /// edits on earlier lines; public accessors absolutize them.
    fn ensure_line(&mut self, line: usize) -> &[WrapPoint] {
        if line >= self.cache.len() {
            self.cache.resize_with(line + 1, || None);
        }

        let stale = self.cache[line]
            .as_ref()
            .map_or(true, |lw| lw.layout_gen != self.layout_gen);

        if stale {
            let points = match self.column_budget() {
                Some(budget) => self.compute_line(line, budget),
                None => Vec::new(),
            };
            tracing::trace!(line, points = points.len(), "recomputed wrap points");
            self.cache[line] = Some(LineWrap {
                points,
                layout_gen: self.layout_gen,
            });
        }

        match &self.cache[line] {
            Some(lw) => &lw.points,
            None => &[],
        }
    }

    /// Column budget for the current width, or None when wrapping is off.
    ///
    /// A non-positive provider width is a configuration error: it is logged
    /// once per layout generation and layout degrades to "no wrapping"
    /// rather than looping.
    fn column_budget(&mut self) -> Option<usize> {
        if !self.enabled {
            return None;
        }
        let width = self.width_provider.visible_width();
        if width <= 0 {
            if self.warned_gen != Some(self.layout_gen) {
                tracing::warn!(
                    width,
                    "width provider reported non-positive width; lines left unwrapped"
                );
                self.warned_gen = Some(self.layout_gen);
            }
            return None;
        }
        let budget = self.metrics.columns_for_width(width);
        Some(budget.max(self.config.min_wrap_columns.max(1)))
    }

    /// Greedy wrap computation for a single buffer line. Returned offsets
    /// are relative to the line start.
    fn compute_line(&self, line: usize, budget: usize) -> Vec<WrapPoint> {
        let line_start = self.document.line_to_char(line);
        let chars: Vec<char> = match self.document.line_text(line) {
            Some(text) => text.chars().collect(),
            None => return Vec::new(),
        };
        let tab_width = self.config.tab_width;

        let mut points = Vec::new();
        let mut seg_start = 0usize;

        while seg_start < chars.len() {
            let mut col = 0usize;
            // Most recent break opportunity in this segment: (char index, column)
            let mut opportunity: Option<(usize, usize)> = None;
            let mut i = seg_start;
            let mut wrapped = false;

            while i < chars.len() {
                let w = char_cell_width(chars[i], col, tab_width);
                if col + w > budget && i > seg_start {
                    // Boundary preferred, forced mid-token break otherwise
                    let (break_at, break_col) = opportunity.unwrap_or((i, col));
                    points.push(WrapPoint {
                        offset: break_at,
                        visual_column: break_col,
                    });
                    seg_start = break_at;
                    wrapped = true;
                    break;
                }
                col += w;
                i += 1;
                if i < chars.len() {
                    let content_type = self.document.content_type_at(line_start + i);
                    if content_type.is_break_opportunity(chars[i - 1], Some(chars[i])) {
                        opportunity = Some((i, col));
                    }
                }
            }

            if !wrapped {
                break;
            }
        }

        points
    }
}

/// Lazy iterator over wrap points for a line range.
///
/// Obtained from [`SoftWrapEngine::wrap_points`]; restartable by asking the
/// engine again. Lines are recomputed as the iterator reaches them.
pub struct WrapPoints<'a> {
    engine: &'a mut SoftWrapEngine,
    line: usize,
    end: usize,
    index: usize,
}

impl Iterator for WrapPoints<'_> {
    type Item = WrapPoint;

    fn next(&mut self) -> Option<WrapPoint> {
        while self.line < self.end {
            let points = self.engine.ensure_line(self.line);
            if self.index < points.len() {
                let point = points[self.index];
                self.index += 1;
                let line_start = self.engine.document.line_to_char(self.line);
                return Some(WrapPoint {
                    offset: line_start + point.offset,
                    visual_column: point.visual_column,
                });
            }
            self.line += 1;
            self.index = 0;
        }
        None
    }
}
