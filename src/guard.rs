//! Recursion bookkeeping shared by the merge variants.
//!
//! A `Walk` tracks which records are currently open on each side of a merge
//! and the key path leading to the current position. Reaching a record that
//! is already open on the same side means the input is cyclic.

use deepmerge_record::RecordRef;

use crate::MergeError;

/// Which stack a record is tracked on.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Side {
    /// Record being merged into.
    Target,
    /// Record being merged from.
    Source,
    /// Record being copied into the output.
    Copy,
}

#[derive(Debug, Default)]
pub(crate) struct Walk {
    targets: Vec<RecordRef>,
    sources: Vec<RecordRef>,
    copies: Vec<RecordRef>,
    path: Vec<String>,
}

impl Walk {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn stack(&mut self, side: Side) -> &mut Vec<RecordRef> {
        match side {
            Side::Target => &mut self.targets,
            Side::Source => &mut self.sources,
            Side::Copy => &mut self.copies,
        }
    }

    /// Run `step` one level deeper. `segment` is the key being entered
    /// (`None` at the root); `open` lists the records entered at this level.
    pub(crate) fn enter<T>(
        &mut self,
        segment: Option<String>,
        open: &[(Side, &RecordRef)],
        step: impl FnOnce(&mut Walk) -> Result<T, MergeError>,
    ) -> Result<T, MergeError> {
        let pushed_segment = segment.is_some();
        if let Some(segment) = segment {
            self.path.push(segment);
        }

        let revisited = open
            .iter()
            .any(|(side, record)| self.stack(*side).iter().any(|seen| seen.ptr_eq(record)));
        if revisited {
            let path = self.path();
            if pushed_segment {
                self.path.pop();
            }
            return Err(MergeError::CycleDetected { path });
        }

        for (side, record) in open {
            self.stack(*side).push((*record).clone());
        }
        let result = step(self);
        for (side, _) in open.iter().rev() {
            self.stack(*side).pop();
        }
        if pushed_segment {
            self.path.pop();
        }
        result
    }

    /// Merge step into a `(target, source)` pair of records.
    pub(crate) fn descend<T>(
        &mut self,
        segment: Option<String>,
        target: &RecordRef,
        source: &RecordRef,
        step: impl FnOnce(&mut Walk) -> Result<T, MergeError>,
    ) -> Result<T, MergeError> {
        self.enter(segment, &[(Side::Target, target), (Side::Source, source)], step)
    }

    /// Dotted path to the current position, `<root>` at the top.
    pub(crate) fn path(&self) -> String {
        if self.path.is_empty() {
            return "<root>".to_string();
        }
        let mut out = String::new();
        for segment in &self.path {
            if !out.is_empty() && !segment.starts_with('[') {
                out.push('.');
            }
            out.push_str(segment);
        }
        out
    }
}
