//! Shared application state.

use std::sync::Arc;

use folio_core::clock::Clock;
use folio_core::store::DocumentStore;
use folio_testimonials::application::widget::TestimonialsWidget;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The mounted testimonials widget every request reads and drives.
    pub widget: Arc<TestimonialsWidget>,
}

impl AppState {
    /// Mounts the widget over `store`.
    ///
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            widget: Arc::new(TestimonialsWidget::mount(store, clock)),
        }
    }
}
