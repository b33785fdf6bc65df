//! Helpers for building server-driven datastar SSE responses.

use std::convert::Infallible;

use async_stream::stream;
use axum::response::{
    IntoResponse, Response,
    sse::{Event, Sse},
};
use datastar::prelude::{ElementPatchMode, ExecuteScript, PatchElements, PatchSignals};

/// Collects a finite batch of datastar events and turns them into one SSE response.
pub struct StreamBuilder {
    events: Vec<Event>,
}

impl StreamBuilder {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push_patch(
        &mut self,
        html: String,
        selector: &str,
        mode: ElementPatchMode,
    ) -> &mut Self {
        self.events.push(patch_event(html, selector, mode));
        self
    }

    /// Rewrite the address bar without navigating.
    pub fn push_replace_url(&mut self, href: &str) -> &mut Self {
        let script = format!("window.history.replaceState(null, '', {});", js_string(href));
        let event = ExecuteScript::new(script).write_as_axum_sse_event();
        self.events.push(event);
        self
    }

    pub fn into_response(self) -> Response {
        let stream = stream! {
            for event in self.events {
                yield Ok::<Event, Infallible>(event);
            }
        };
        Sse::new(stream).into_response()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for StreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn patch_event(html: String, selector: &str, mode: ElementPatchMode) -> Event {
    PatchElements::new(html)
        .selector(selector)
        .mode(mode)
        .write_as_axum_sse_event()
}

pub fn signals_event(payload: &str) -> Event {
    PatchSignals::new(payload).write_as_axum_sse_event()
}

/// Quote `value` as a JavaScript string literal.
fn js_string(value: &str) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "''".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_url_is_quoted_for_script_context() {
        assert_eq!(js_string("/blog?search=a'b"), "\"/blog?search=a'b\"");
    }

    #[test]
    fn builder_counts_events() {
        let mut builder = StreamBuilder::new();
        assert!(builder.is_empty());
        builder
            .push_patch("<p></p>".to_string(), "#x", ElementPatchMode::Outer)
            .push_replace_url("/blog");
        assert_eq!(builder.len(), 2);
    }
}
