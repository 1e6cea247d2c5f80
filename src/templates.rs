//! HTML page rendering.
//!
//! Templates under `templates/` are embedded at compile time so the binary
//! does not depend on the working directory.

use include_dir::{include_dir, Dir};
use minijinja::Environment;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::AppResult;

static TEMPLATE_DIR: Dir<'static> = include_dir!("$CARGO_MANIFEST_DIR/templates");

static ENV: Lazy<Environment<'static>> = Lazy::new(|| {
    let mut env = Environment::new();

    for file in TEMPLATE_DIR.files() {
        let Some(name) = file.path().to_str() else {
            continue;
        };
        let Some(contents) = file.contents_utf8() else {
            tracing::warn!("Skipping non UTF-8 template {}", name);
            continue;
        };
        if let Err(e) = env.add_template(name, contents) {
            tracing::error!("Invalid template {}: {:#}", name, e);
        }
    }

    env
});

/// Render the named template (e.g. `index.html`) with `ctx`
pub fn render<T: Serialize>(name: &str, ctx: T) -> AppResult<String> {
    let tpl = ENV.get_template(name)?;
    Ok(tpl.render(ctx)?)
}
