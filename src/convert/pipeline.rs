//! Sequential conversion pipeline
//!
//! Requests are converted strictly one at a time, in order. A progress event
//! follows every request whether it succeeded or not, and a failed request
//! never stops the batch. The pipeline is a `Stream` so the UI can drive it
//! directly; `convert_all` collects it for callers that only want the report.

use futures::stream::{self, Stream, StreamExt};
use std::vec;
use tracing::{info, warn};

use super::Converter;
use crate::error::ConvertError;
use crate::state::{ConversionRequest, ConversionResult};

/// How far a batch has come
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Requests finished so far (1-indexed after the first item)
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// `round(100 * completed / total)`; 100 for an empty batch
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((100 * self.completed + self.total / 2) / self.total) as u8
    }
}

/// A request that produced no result
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    /// Position of the request in the batch
    pub index: usize,
    pub name: String,
    pub error: ConvertError,
}

/// Outcome of a whole batch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionReport {
    /// Successful results, in request order
    pub results: Vec<ConversionResult>,
    pub failures: Vec<ItemFailure>,
    /// Number of requests in the batch
    pub total: usize,
}

impl ConversionReport {
    fn new(total: usize) -> Self {
        Self {
            results: Vec::with_capacity(total),
            failures: Vec::new(),
            total,
        }
    }

    pub fn succeeded(&self) -> usize {
        self.results.len()
    }
}

/// Events emitted while a batch runs
#[derive(Debug, Clone)]
pub enum PipelineEvent {
    Progress(Progress),
    Finished(ConversionReport),
}

struct Batch {
    pending: std::iter::Enumerate<vec::IntoIter<ConversionRequest>>,
    report: ConversionReport,
}

/// Convert `requests` in order, yielding a `Progress` after each one and a
/// single `Finished` at the end
pub fn run(
    requests: Vec<ConversionRequest>,
    converter: Converter,
) -> impl Stream<Item = PipelineEvent> + Send + 'static {
    let total = requests.len();
    let batch = Batch {
        pending: requests.into_iter().enumerate(),
        report: ConversionReport::new(total),
    };

    info!("🔄 Converting {} images", total);

    stream::unfold(Some(batch), move |state| async move {
        let mut batch = state?;

        let Some((index, request)) = batch.pending.next() else {
            info!(
                "✅ Conversion complete: {} of {} converted",
                batch.report.succeeded(),
                total
            );
            return Some((PipelineEvent::Finished(batch.report), None));
        };

        let name = request.source.name().to_string();
        match converter.convert(request).await {
            Ok(result) => batch.report.results.push(result),
            Err(error) => {
                warn!("⚠️  Failed to convert {}: {}", name, error);
                batch.report.failures.push(ItemFailure { index, name, error });
            }
        }

        let progress = Progress {
            completed: index + 1,
            total,
        };
        Some((PipelineEvent::Progress(progress), Some(batch)))
    })
}

/// Run a batch to completion, calling `on_progress` after every request
pub async fn convert_all<F>(
    requests: Vec<ConversionRequest>,
    converter: Converter,
    mut on_progress: F,
) -> ConversionReport
where
    F: FnMut(Progress),
{
    let total = requests.len();
    let mut events = std::pin::pin!(run(requests, converter));

    while let Some(event) = events.next().await {
        match event {
            PipelineEvent::Progress(progress) => on_progress(progress),
            PipelineEvent::Finished(report) => return report,
        }
    }

    ConversionReport::new(total)
}
