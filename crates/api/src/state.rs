use ocr::Dispatcher;
use std::sync::Arc;

/// Shared per-process state handed to every handler.
#[derive(Clone)]
pub struct ApiState {
    pub dispatcher: Arc<Dispatcher>,
}
