//! Embedded heredoc templates.

use std::sync::OnceLock;

use include_dir::{Dir, include_dir};
use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};

use crate::domain::AppError;

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/templates");

static ENV: OnceLock<Result<Environment<'static>, String>> = OnceLock::new();

pub(crate) const ROOT_CA_CSR: &str = "root-ca-csr.tmpl";
pub(crate) const LEAF_CSR: &str = "leaf-csr.tmpl";
pub(crate) const GENCERT_CONFIG: &str = "gencert-config.tmpl";
pub(crate) const SYSTEMD_UNIT: &str = "systemd-unit.tmpl";
pub(crate) const DOCKER_UNIT: &str = "docker-unit.tmpl";
pub(crate) const RKT_UNIT: &str = "rkt-unit.tmpl";
pub(crate) const COREOS_DROPIN: &str = "coreos-dropin.tmpl";
pub(crate) const OPERATOR_MANIFEST: &str = "operator-manifest.tmpl";

fn build_environment() -> Result<Environment<'static>, String> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);

    for file in TEMPLATES_DIR.files() {
        let name = file
            .path()
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| format!("invalid template path {}", file.path().display()))?;
        let content = file
            .contents_utf8()
            .ok_or_else(|| format!("template '{}' is not valid UTF-8", name))?;
        if let Some(token) = disallowed_template_token(content) {
            return Err(format!("template '{}' uses unsupported syntax '{}'", name, token));
        }
        env.add_template(name, content).map_err(|e| e.to_string())?;
    }

    Ok(env)
}

/// Templates may only substitute values with `{{ }}`.
fn disallowed_template_token(template: &str) -> Option<&'static str> {
    if template.contains("{%") {
        return Some("{%");
    }
    if template.contains("{#") {
        return Some("{#");
    }
    None
}

/// Render the named embedded template with `ctx`.
pub(crate) fn render(name: &str, ctx: Value) -> Result<String, AppError> {
    let env = ENV
        .get_or_init(build_environment)
        .as_ref()
        .map_err(|details| AppError::Template { name: name.to_string(), details: details.clone() })?;

    let template = env
        .get_template(name)
        .map_err(|e| AppError::Template { name: name.to_string(), details: e.to_string() })?;

    template.render(ctx).map_err(|e| AppError::Template { name: name.to_string(), details: e.to_string() })
}

/// `cat > path <<EOF` block writing `body` to `path`.
pub(crate) fn heredoc(path: &str, body: &str) -> String {
    format!("cat > {} <<EOF\n{}EOF\n", path, body)
}
