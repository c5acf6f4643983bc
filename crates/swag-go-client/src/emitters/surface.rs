//! The fixed part of every client: the `Client` handle, its constructor and
//! the shared `ErrorResponse` type.

use minijinja::context;

use super::Emitter;
use crate::error::GenerateError;

impl Emitter<'_> {
    pub fn emit_surface(&mut self) -> Result<(), GenerateError> {
        let default_base_url = self
            .config
            .base_url
            .clone()
            .or_else(|| self.spec.default_base_url())
            .unwrap_or_default();
        if default_base_url.is_empty() {
            log::warn!("document has no host and no base URL is configured");
        }
        let title = self.spec.info.as_ref().map(|i| i.title.as_str()).unwrap_or_default();

        for import in ["fmt", "net/http", "net/url", "strings"] {
            self.file.import(import);
        }

        let client = self.render(
            "client.go.j2",
            context! {
                title => title,
                default_base_url => default_base_url,
            },
        )?;
        self.file.push("Client", client)?;

        let error_response = self.render("error_response.go.j2", context! {})?;
        self.file.push("ErrorResponse", error_response)
    }
}
