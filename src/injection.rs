//! Injected-language regions and their break-boundary preferences
//!
//! An injection marks a sub-range of a document whose content is interpreted
//! under a different language than the enclosing file. The wrap engine never
//! special-cases injection edges for wrapping itself; the only thing an
//! injection changes is which positions count as preferred break boundaries
//! inside its range.

use std::fmt;
use std::ops::Range;

use crate::util::text::is_punctuation;

/// Content type of a document or an injected region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    #[default]
    PlainText,
    Html,
    Css,
    JavaScript,
}

impl ContentType {
    /// Detect content type from a file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "html" | "htm" => ContentType::Html,
            "css" => ContentType::Css,
            "js" | "mjs" | "cjs" => ContentType::JavaScript,
            _ => ContentType::PlainText,
        }
    }

    /// Get display name for the content type
    pub fn display_name(&self) -> &'static str {
        match self {
            ContentType::PlainText => "Plain Text",
            ContentType::Html => "HTML",
            ContentType::Css => "CSS",
            ContentType::JavaScript => "JavaScript",
        }
    }

    /// Whether a soft wrap may be placed between `prev` and `next`.
    ///
    /// Whitespace always opens a break opportunity. On top of that each
    /// language contributes its own boundary tokens: HTML prefers breaking
    /// after a closing `>` or before an opening `<`; the code languages
    /// allow breaking after any punctuation token.
    pub fn is_break_opportunity(&self, prev: char, next: Option<char>) -> bool {
        if prev.is_whitespace() {
            return true;
        }
        match self {
            ContentType::Html => prev == '>' || next == Some('<'),
            ContentType::Css | ContentType::JavaScript => is_punctuation(prev),
            ContentType::PlainText => false,
        }
    }
}

/// A marked sub-region of a document with its own content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection {
    /// Char range within the document
    pub range: Range<usize>,
    /// Language the region is interpreted under
    pub content_type: ContentType,
}

impl Injection {
    pub fn new(range: Range<usize>, content_type: ContentType) -> Self {
        Self {
            range,
            content_type,
        }
    }
}

/// Error raised when an injection set violates its invariants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectionError {
    /// A range with start > end
    InvertedRange { start: usize, end: usize },
    /// A range extending past the end of the document
    OutOfBounds { end: usize, len: usize },
    /// Two ranges overlap
    Overlap { first_end: usize, second_start: usize },
}

impl fmt::Display for InjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectionError::InvertedRange { start, end } => {
                write!(f, "injection range is inverted: {}..{}", start, end)
            }
            InjectionError::OutOfBounds { end, len } => {
                write!(f, "injection ends at {} but document has {} chars", end, len)
            }
            InjectionError::Overlap {
                first_end,
                second_start,
            } => write!(
                f,
                "injection starting at {} overlaps previous one ending at {}",
                second_start, first_end
            ),
        }
    }
}

impl std::error::Error for InjectionError {}

/// Validated, offset-ordered set of injections.
///
/// Invariant: ranges are non-overlapping and fully contained within the
/// document. Enforced at construction and preserved across edits via
/// [`InjectionSet::shift_for_insert`] and [`InjectionSet::shift_for_remove`].
#[derive(Debug, Clone, Default)]
pub struct InjectionSet {
    regions: Vec<Injection>,
}

impl InjectionSet {
    /// Build a validated set from arbitrary regions.
    ///
    /// Regions are sorted by start offset. Empty ranges are allowed but
    /// never match any offset.
    pub fn new(mut regions: Vec<Injection>, doc_len: usize) -> Result<Self, InjectionError> {
        regions.sort_by_key(|inj| inj.range.start);
        let mut prev_end = 0usize;
        for (idx, inj) in regions.iter().enumerate() {
            if inj.range.start > inj.range.end {
                return Err(InjectionError::InvertedRange {
                    start: inj.range.start,
                    end: inj.range.end,
                });
            }
            if inj.range.end > doc_len {
                return Err(InjectionError::OutOfBounds {
                    end: inj.range.end,
                    len: doc_len,
                });
            }
            if idx > 0 && inj.range.start < prev_end {
                return Err(InjectionError::Overlap {
                    first_end: prev_end,
                    second_start: inj.range.start,
                });
            }
            prev_end = inj.range.end;
        }
        Ok(Self { regions })
    }

    /// Content type of the injection containing `offset`, if any
    pub fn content_type_at(&self, offset: usize) -> Option<ContentType> {
        // Regions are ordered by start; find the last one starting at or
        // before the offset and check containment.
        let idx = self
            .regions
            .partition_point(|inj| inj.range.start <= offset);
        if idx == 0 {
            return None;
        }
        let inj = &self.regions[idx - 1];
        if offset < inj.range.end {
            Some(inj.content_type)
        } else {
            None
        }
    }

    /// All regions, ordered by start offset
    pub fn regions(&self) -> &[Injection] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Shift ranges for an insertion of `len` chars at `offset`.
    ///
    /// Text typed strictly inside a region grows it; text typed at or before
    /// its start shifts it right; text typed at or after its end belongs to
    /// the host.
    pub fn shift_for_insert(&mut self, offset: usize, len: usize) {
        if len == 0 {
            return;
        }
        for inj in &mut self.regions {
            if offset <= inj.range.start {
                inj.range.start += len;
                inj.range.end += len;
            } else if offset < inj.range.end {
                inj.range.end += len;
            }
        }
    }

    /// Shift ranges for a removal of `range` chars.
    ///
    /// Regions overlapping the removal are trimmed; regions swallowed whole
    /// are dropped.
    pub fn shift_for_remove(&mut self, range: Range<usize>) {
        if range.start >= range.end {
            return;
        }
        for inj in &mut self.regions {
            let removed_before = range.end.min(inj.range.start) - range.start.min(inj.range.start);
            let removed_inside =
                range.end.min(inj.range.end).saturating_sub(range.start.max(inj.range.start));
            inj.range.start -= removed_before;
            inj.range.end -= removed_before + removed_inside;
        }
        self.regions.retain(|inj| !inj.range.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(regions: Vec<(Range<usize>, ContentType)>, len: usize) -> InjectionSet {
        InjectionSet::new(
            regions
                .into_iter()
                .map(|(r, ct)| Injection::new(r, ct))
                .collect(),
            len,
        )
        .unwrap()
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(ContentType::from_extension("html"), ContentType::Html);
        assert_eq!(ContentType::from_extension("HTM"), ContentType::Html);
        assert_eq!(ContentType::from_extension("js"), ContentType::JavaScript);
        assert_eq!(ContentType::from_extension("txt"), ContentType::PlainText);
    }

    #[test]
    fn test_break_opportunity_whitespace_everywhere() {
        for ct in [
            ContentType::PlainText,
            ContentType::Html,
            ContentType::Css,
            ContentType::JavaScript,
        ] {
            assert!(ct.is_break_opportunity(' ', Some('a')));
        }
    }

    #[test]
    fn test_break_opportunity_html_tags() {
        assert!(ContentType::Html.is_break_opportunity('>', Some('a')));
        assert!(ContentType::Html.is_break_opportunity('a', Some('<')));
        assert!(!ContentType::Html.is_break_opportunity('a', Some('b')));
        // Plain text does not treat tag punctuation as a boundary
        assert!(!ContentType::PlainText.is_break_opportunity('>', Some('a')));
    }

    #[test]
    fn test_break_opportunity_code_punctuation() {
        assert!(ContentType::JavaScript.is_break_opportunity(',', Some('a')));
        assert!(ContentType::Css.is_break_opportunity(';', Some('b')));
        assert!(!ContentType::JavaScript.is_break_opportunity('a', Some('b')));
    }

    #[test]
    fn test_validation_rejects_overlap() {
        let result = InjectionSet::new(
            vec![
                Injection::new(0..10, ContentType::Html),
                Injection::new(5..15, ContentType::Css),
            ],
            20,
        );
        assert!(matches!(result, Err(InjectionError::Overlap { .. })));
    }

    #[test]
    fn test_validation_rejects_out_of_bounds() {
        let result = InjectionSet::new(vec![Injection::new(0..30, ContentType::Html)], 20);
        assert!(matches!(result, Err(InjectionError::OutOfBounds { .. })));
    }

    #[test]
    fn test_validation_rejects_inverted() {
        let result = InjectionSet::new(vec![Injection::new(8..3, ContentType::Html)], 20);
        assert!(matches!(result, Err(InjectionError::InvertedRange { .. })));
    }

    #[test]
    fn test_content_type_at() {
        let s = set(
            vec![(5..10, ContentType::Html), (15..20, ContentType::Css)],
            25,
        );
        assert_eq!(s.content_type_at(4), None);
        assert_eq!(s.content_type_at(5), Some(ContentType::Html));
        assert_eq!(s.content_type_at(9), Some(ContentType::Html));
        assert_eq!(s.content_type_at(10), None);
        assert_eq!(s.content_type_at(17), Some(ContentType::Css));
        assert_eq!(s.content_type_at(20), None);
    }

    #[test]
    fn test_insert_inside_grows() {
        let mut s = set(vec![(5..10, ContentType::Html)], 25);
        s.shift_for_insert(7, 3);
        assert_eq!(s.regions()[0].range, 5..13);
    }

    #[test]
    fn test_insert_before_shifts() {
        let mut s = set(vec![(5..10, ContentType::Html)], 25);
        s.shift_for_insert(2, 4);
        assert_eq!(s.regions()[0].range, 9..14);
        // Insertion exactly at the start belongs to the host
        s.shift_for_insert(9, 1);
        assert_eq!(s.regions()[0].range, 10..15);
    }

    #[test]
    fn test_insert_after_leaves_alone() {
        let mut s = set(vec![(5..10, ContentType::Html)], 25);
        s.shift_for_insert(10, 4);
        assert_eq!(s.regions()[0].range, 5..10);
    }

    #[test]
    fn test_remove_overlapping_trims() {
        let mut s = set(vec![(5..10, ContentType::Html)], 25);
        // Remove 3..7: two chars before the region, two inside
        s.shift_for_remove(3..7);
        assert_eq!(s.regions()[0].range, 3..6);
    }

    #[test]
    fn test_remove_swallowing_drops_region() {
        let mut s = set(vec![(5..10, ContentType::Html)], 25);
        s.shift_for_remove(4..12);
        assert!(s.is_empty());
    }
}
