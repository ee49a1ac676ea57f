//! Plugin translation seam
//!
//! Translating a named Logstash plugin (mutate, grok, date, ...) into ingest
//! processors happens outside this crate. The walker calls a
//! `PluginTranslator` for every plugin or empty node it visits.

use crate::constraint::Constraints;
use crate::cursor::Cursor;
use crate::error::Result;
use logpipe_core::ingest::Pipeline;

/// Appends the processors for the plugin under the cursor
pub trait PluginTranslator {
    /// Translate `cursor.current()` into zero or more processors appended to
    /// `pipeline`.
    ///
    /// `constraints` are the conditions inherited at this nesting level. The
    /// cursor borrows the node sequence for the duration of the call only.
    fn translate(
        &mut self,
        cursor: &mut Cursor<'_>,
        constraints: &Constraints,
        pipeline: &mut Pipeline,
    ) -> Result<()>;
}

impl<F> PluginTranslator for F
where
    F: FnMut(&mut Cursor<'_>, &Constraints, &mut Pipeline) -> Result<()>,
{
    fn translate(
        &mut self,
        cursor: &mut Cursor<'_>,
        constraints: &Constraints,
        pipeline: &mut Pipeline,
    ) -> Result<()> {
        self(cursor, constraints, pipeline)
    }
}

/// Pin a closure to the translator signature.
///
/// Closure parameter types are only inferred from an `FnMut` bound, not from
/// the `PluginTranslator` blanket impl, so pass closures through here.
pub fn from_fn<F>(f: F) -> F
where
    F: FnMut(&mut Cursor<'_>, &Constraints, &mut Pipeline) -> Result<()>,
{
    f
}
