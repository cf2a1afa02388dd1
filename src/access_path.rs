/// Access path selectors
///
/// Picks which documents in a nested batch are the units being ranked, using
/// DocArray-style expressions: an optional leading `@`, then comma-separated
/// segments where `r` is the root level and `c`, `cc`, ... are chunks at that
/// nesting depth. `"@r,c"` selects the roots and then their direct chunks.
///
/// Selecting nothing is never an error. Segments that do not name a document
/// level (e.g. `m`, since matches are not rankable documents) are dropped
/// with a warning.

use std::fmt;

use crate::document::Document;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPaths {
    raw: String,
    /// Nesting depth of each segment, in expression order (0 = roots)
    depths: Vec<usize>,
}

impl AccessPaths {
    pub fn parse(expr: &str) -> Self {
        let trimmed = expr.trim();
        let body = trimmed.strip_prefix('@').unwrap_or(trimmed);

        let mut depths = Vec::new();
        for segment in body.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match segment_depth(segment) {
                Some(depth) => depths.push(depth),
                None => tracing::warn!(
                    access_paths = %expr,
                    segment = %segment,
                    "access path segment does not select documents, ignoring"
                ),
            }
        }

        AccessPaths {
            raw: trimmed.to_string(),
            depths,
        }
    }

    pub fn depths(&self) -> &[usize] {
        &self.depths
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}

impl fmt::Display for AccessPaths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn segment_depth(segment: &str) -> Option<usize> {
    if segment == "r" {
        return Some(0);
    }
    if segment.chars().all(|c| c == 'c') {
        return Some(segment.len());
    }
    None
}

/// Mutable handles to every document at `depth`, in traversal order.
///
/// All handles sit at the same depth, so none of them contains another.
pub fn select_mut(docs: &mut [Document], depth: usize) -> Vec<&mut Document> {
    let mut level: Vec<&mut Document> = docs.iter_mut().collect();
    for _ in 0..depth {
        level = level
            .into_iter()
            .flat_map(|doc| doc.chunks.iter_mut())
            .collect();
    }
    level
}
