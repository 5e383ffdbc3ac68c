// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

const IDIOMAS_SUPORTADOS: &[&str] = &["pt", "en"];

// Idioma das mensagens de erro, vindo do Accept-Language
#[derive(Debug, Clone)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale("pt".to_string())
    }
}

impl Locale {
    /// "en-US,en;q=0.9" -> "en". Idiomas sem catálogo caem no padrão.
    pub fn from_accept_language(header_str: Option<&str>) -> Self {
        header_str
            .map(accept_language::parse)
            .and_then(|tags| {
                tags.into_iter()
                    // "en-GB" -> "en"
                    .map(|tag| tag.split('-').next().unwrap_or(&tag).to_ascii_lowercase())
                    .find(|lang| IDIOMAS_SUPORTADOS.contains(&lang.as_str()))
            })
            .map(Locale)
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_str = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());

        Ok(Locale::from_accept_language(header_str))
    }
}
