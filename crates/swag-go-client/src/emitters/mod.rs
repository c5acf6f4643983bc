pub mod artifact;
pub mod operations;
pub mod surface;
pub mod types;

use minijinja::Environment;

use swag_core::config::ClientConfig;
use swag_core::parse::spec::SwaggerSpec;

use crate::error::GenerateError;
use artifact::GoFile;

/// Go keywords plus the locals a generated method body declares. A parameter
/// named after one of these gets a trailing `_`.
const RESERVED: &[&str] = &[
    "break", "case", "chan", "const", "continue", "default", "defer", "else", "fallthrough",
    "for", "func", "go", "goto", "if", "import", "interface", "map", "package", "range",
    "return", "select", "struct", "switch", "type", "var", "body", "buf", "cl", "ctx", "err",
    "errBody", "q", "r", "req", "res", "u",
];

/// Build the template environment shared by every emitter.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("go_comment", go_comment);
    env.add_filter("go_string", go_string);
    env.add_template("file.go.j2", include_str!("../../templates/file.go.j2"))?;
    env.add_template("client.go.j2", include_str!("../../templates/client.go.j2"))?;
    env.add_template(
        "error_response.go.j2",
        include_str!("../../templates/error_response.go.j2"),
    )?;
    env.add_template("struct.go.j2", include_str!("../../templates/struct.go.j2"))?;
    env.add_template("named.go.j2", include_str!("../../templates/named.go.j2"))?;
    env.add_template("method.go.j2", include_str!("../../templates/method.go.j2"))?;
    Ok(env)
}

/// Accumulates declarations for one document. The per-concern emitters in
/// [`types`], [`surface`] and [`operations`] add `impl` blocks to it.
pub struct Emitter<'a> {
    spec: &'a SwaggerSpec,
    config: &'a ClientConfig,
    env: Environment<'static>,
    file: GoFile,
}

impl<'a> Emitter<'a> {
    pub fn new(spec: &'a SwaggerSpec, config: &'a ClientConfig) -> Result<Self, GenerateError> {
        Ok(Self {
            spec,
            config,
            env: environment()?,
            file: GoFile::new(&config.package),
        })
    }

    fn render(&self, template: &str, ctx: minijinja::Value) -> Result<String, GenerateError> {
        Ok(self.env.get_template(template)?.render(ctx)?)
    }

    /// Render the finished file.
    pub fn finish(self) -> Result<String, GenerateError> {
        Ok(self.file.render(&self.env)?)
    }
}

/// Prefix every line with `// `.
fn go_comment(value: String) -> String {
    value
        .trim_end()
        .lines()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                "//".to_string()
            } else {
                format!("// {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn go_string(value: String) -> String {
    go_string_literal(&value)
}

/// Quote `value` as an interpreted Go string literal.
pub fn go_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// A parameter identifier that cannot collide with a keyword or a local.
pub fn go_ident(name: &str) -> String {
    if RESERVED.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Exported field name for a property.
pub fn field_name(property: &str) -> String {
    let name = swag_core::transform::name_normalizer::snake_to_camel(property);
    match name.chars().next() {
        Some(c) if c.is_ascii_digit() => format!("X{name}"),
        Some(_) => name,
        None => "X".to_string(),
    }
}
