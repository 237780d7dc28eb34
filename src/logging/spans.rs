//! Structured spans for lesson runs and individual image operations

use std::time::Instant;
use tracing::{field, span, Level, Span};
use uuid::Uuid;

/// Span around a single image operation (load, write, convert, crop, paste)
pub struct OperationSpan {
    span: Span,
    start_time: Instant,
    operation: String,
}

impl OperationSpan {
    /// Create a new operation span, tagged with the thread's correlation id if any
    pub fn new(operation: &str) -> Self {
        let span = span!(
            Level::DEBUG,
            "image_operation",
            operation = operation,
            correlation_id = field::Empty,
            height = field::Empty,
            width = field::Empty,
            channels = field::Empty,
            execution_time_ms = field::Empty,
        );

        if let Some(corr_id) = crate::logging::get_correlation_id() {
            span.record("correlation_id", field::display(corr_id));
        }

        Self {
            span,
            start_time: Instant::now(),
            operation: operation.to_string(),
        }
    }

    /// Record the output shape and elapsed time
    pub fn complete(&self, shape: (usize, usize, usize)) -> f64 {
        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        self.span.record("height", shape.0);
        self.span.record("width", shape.1);
        self.span.record("channels", shape.2);
        self.span.record("execution_time_ms", elapsed_ms);

        tracing::debug!(
            parent: &self.span,
            operation = %self.operation,
            shape = format!("{}x{}x{}", shape.0, shape.1, shape.2),
            execution_time_ms = elapsed_ms,
            "Operation completed"
        );
        elapsed_ms
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Enter the span context
    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

/// Span for one lesson run
pub struct LessonSpan {
    span: Span,
    start_time: Instant,
    session_id: Uuid,
}

impl LessonSpan {
    pub fn new(lesson: &str, session_id: Uuid) -> Self {
        let span = span!(
            Level::INFO,
            "lesson",
            lesson = lesson,
            session_id = %session_id,
            windows_shown = field::Empty,
            session_duration_ms = field::Empty,
        );

        Self {
            span,
            start_time: Instant::now(),
            session_id,
        }
    }

    /// Record a lesson step such as "display" or "paste"
    pub fn record_step(&self, step: &str, detail: &str) {
        tracing::info!(parent: &self.span, step = step, detail = detail, "Lesson step");
    }

    pub fn record_completion(&self, windows_shown: usize) {
        let duration = self.start_time.elapsed();
        self.span.record("windows_shown", windows_shown);
        self.span
            .record("session_duration_ms", duration.as_millis() as f64);

        tracing::info!(
            parent: &self.span,
            windows_shown = windows_shown,
            session_duration_ms = duration.as_millis(),
            "Lesson completed"
        );
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn enter(&self) -> tracing::span::Entered<'_> {
        self.span.enter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[traced_test]
    #[test]
    fn test_operation_span() {
        crate::logging::new_correlation_id();
        let span = OperationSpan::new("crop");
        let _enter = span.enter();
        let elapsed = span.complete((200, 200, 3));
        assert!(elapsed >= 0.0);
        assert!(logs_contain("Operation completed"));
        crate::logging::clear_correlation_id();
    }

    #[traced_test]
    #[test]
    fn test_lesson_span() {
        let session_id = Uuid::new_v4();
        let span = LessonSpan::new("roi", session_id);
        let _enter = span.enter();
        span.record_step("crop", "100,300,200,400");
        span.record_completion(4);
        assert_eq!(span.session_id(), session_id);
        assert!(logs_contain("Lesson completed"));
    }
}
