use anyhow::{Context as _, Result};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use thimble_core::{Context, EmptyEachPolicy, RenderOptions, Template, Value};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Settings for one `render` invocation.
#[derive(Clone, Debug)]
pub struct RenderArgs<'a> {
    pub template: &'a Path,
    pub context: Option<&'a Path>,
    pub out: Option<&'a Path>,
    pub no_escape: bool,
    pub allow_empty_each: bool,
}

/// Install a stderr subscriber. `RUST_LOG` wins; otherwise `warn`, or `debug`
/// with `verbose`.
pub fn init_logging(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(true)
                .with_filter(filter),
        )
        .try_init();
}

/// Read and parse a template file.
pub fn load_template(path: &Path) -> Result<Template> {
    let src =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let tpl = Template::parse(&src).with_context(|| format!("failed to parse {}", path.display()))?;
    debug!(path = %path.display(), roots = tpl.nodes().len(), "loaded template");
    Ok(tpl)
}

/// Read a JSON object; each top-level key becomes a context variable.
pub fn load_context(path: &Path) -> Result<Context> {
    let src =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let json: serde_json::Value = serde_json::from_str(&src)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let serde_json::Value::Object(vars) = json else {
        anyhow::bail!("{} must contain a JSON object at the top level", path.display());
    };
    Ok(vars.into_iter().map(|(k, v)| (k, json_to_value(v))).collect())
}

pub fn json_to_value(v: serde_json::Value) -> Value {
    match v {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::List(items.into_iter().map(json_to_value).collect())
        }
        serde_json::Value::Object(m) => {
            Value::Map(m.into_iter().map(|(k, v)| (k, json_to_value(v))).collect())
        }
    }
}

/// Render a template file with an optional JSON context, to `out` or stdout.
pub fn render_cmd(args: &RenderArgs<'_>) -> Result<()> {
    let options = RenderOptions::new()
        .escape(!args.no_escape)
        .empty_each(if args.allow_empty_each {
            EmptyEachPolicy::Skip
        } else {
            EmptyEachPolicy::Error
        });
    let tpl = load_template(args.template)?.with_options(options);

    let mut ctx = match args.context {
        Some(p) => load_context(p)?,
        None => Context::new(),
    };
    debug!(vars = ?ctx.names(), "context loaded");

    let html = tpl
        .render(&mut ctx)
        .with_context(|| format!("failed to render {}", args.template.display()))?;

    match args.out {
        Some(out) => {
            if let Some(dir) = out.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)
                    .with_context(|| format!("failed to create {}", dir.display()))?;
            }
            fs::write(out, &html).with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), bytes = html.len(), "wrote output");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Parse a template and validate its directives without rendering.
pub fn check_cmd(template: &Path) -> Result<()> {
    let tpl = load_template(template)?;
    tpl.check()
        .with_context(|| format!("invalid directive in {}", template.display()))?;
    Ok(())
}
