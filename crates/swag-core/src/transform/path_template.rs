//! Splits a URL template into literal and variable pieces.
//!
//! Placement is driven by where a placeholder sits in the template, so the
//! resulting variable order is the order the path arguments are declared in
//! a generated signature, independent of the order the document lists them.

/// One piece of an interpolated path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Literal(String),
    Variable(String),
}

/// A URL template split into pieces, relative to the base URL's path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PathTemplate {
    pieces: Vec<Piece>,
    unplaced: Vec<String>,
}

impl PathTemplate {
    /// Place each parameter at the first literal piece that contains its
    /// `{name}` placeholder. A leading `/` is dropped.
    pub fn interpolate<S: AsRef<str>>(template: &str, params: &[S]) -> Self {
        let relative = template.strip_prefix('/').unwrap_or(template);
        let mut pieces = Vec::new();
        if !relative.is_empty() {
            pieces.push(Piece::Literal(relative.to_string()));
        }
        let mut unplaced = Vec::new();

        for param in params {
            let name = param.as_ref();
            let placeholder = format!("{{{name}}}");
            let split = pieces.iter().enumerate().find_map(|(i, piece)| match piece {
                Piece::Literal(text) => text.find(&placeholder).map(|at| {
                    (
                        i,
                        text[..at].to_string(),
                        text[at + placeholder.len()..].to_string(),
                    )
                }),
                Piece::Variable(_) => None,
            });

            let Some((i, prefix, suffix)) = split else {
                unplaced.push(name.to_string());
                continue;
            };

            let mut replacement = Vec::with_capacity(3);
            if !prefix.is_empty() {
                replacement.push(Piece::Literal(prefix));
            }
            replacement.push(Piece::Variable(name.to_string()));
            if !suffix.is_empty() {
                replacement.push(Piece::Literal(suffix));
            }
            pieces.splice(i..=i, replacement);
        }

        Self { pieces, unplaced }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Variables in the order they appear in the template.
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.pieces.iter().filter_map(|p| match p {
            Piece::Variable(name) => Some(name.as_str()),
            Piece::Literal(_) => None,
        })
    }

    /// Parameters whose placeholder never appeared in the template.
    pub fn unplaced(&self) -> &[String] {
        &self.unplaced
    }
}
