//! Artifact materializer seam.
//!
//! The real materializer is an external, stateful, session-backed program
//! (Outlook) that turns one rendered stage into an opaque `.oft` blob. It
//! holds a single open session and is not reentrant, so the batch runner
//! calls it strictly sequentially and the caller opens exactly one session
//! per batch; dropping the implementation is the release path.

use crate::error::ArtifactError;

/// Produces one opaque artifact per rendered stage.
///
/// `&mut self` because the backing session is stateful. Each call may fail
/// independently; the batch runner treats a failure as a row-level FAILED
/// outcome and moves on.
pub trait Materializer {
    fn materialize(
        &mut self,
        subject: &str,
        to: &str,
        cc: &str,
        bcc: &str,
        html_body: &str,
    ) -> Result<Vec<u8>, ArtifactError>;
}

impl<M: Materializer + ?Sized> Materializer for &mut M {
    fn materialize(
        &mut self,
        subject: &str,
        to: &str,
        cc: &str,
        bcc: &str,
        html_body: &str,
    ) -> Result<Vec<u8>, ArtifactError> {
        (**self).materialize(subject, to, cc, bcc, html_body)
    }
}
