pub mod command_handler;
pub mod listener;
pub mod renderer;

use crate::model::Product;
use crate::ui::{Navigate, Notify, PageMeta, Render, Severity};

/// Terminal front end: renders product cards to stdout and feeds typed
/// commands back into the controller.
pub struct ConsoleUi;

impl ConsoleUi {
    pub fn new() -> Self {
        Self
    }
}

impl Render for ConsoleUi {
    fn render_page(&self, products: &[Product], meta: &PageMeta) {
        renderer::render_page(products, meta);
    }

    fn render_empty(&self, reason: Option<&str>) {
        renderer::render_empty(reason);
    }
}

impl Notify for ConsoleUi {
    fn toast(&self, title: &str, message: &str, severity: Severity) {
        renderer::render_toast(title, message, severity);
    }
}

impl Navigate for ConsoleUi {
    fn go(&self, target: &str) {
        println!("→ open: {target}");
    }
}
