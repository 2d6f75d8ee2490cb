pub mod error;
pub mod scryfall;

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::Deserialize;

pub use error::LookupError;

/// Boxed future returned by [`CardSearch`] implementations
pub type LookupFuture<T> = Pin<Box<dyn Future<Output = Result<T, LookupError>> + Send>>;

/// One symbol of the fixed five-color alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum ColorSymbol {
    W,
    U,
    B,
    R,
    G,
}

impl ColorSymbol {
    pub fn as_char(self) -> char {
        match self {
            ColorSymbol::W => 'W',
            ColorSymbol::U => 'U',
            ColorSymbol::B => 'B',
            ColorSymbol::R => 'R',
            ColorSymbol::G => 'G',
        }
    }
}

/// Ordered color identity of a card.
///
/// `Display` concatenates the symbols with no separator, so a colorless card
/// formats as the empty string. Use [`ColorIdentity::label`] for UI text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ColorIdentity(Vec<ColorSymbol>);

impl ColorIdentity {
    pub fn new(symbols: Vec<ColorSymbol>) -> Self {
        Self(symbols)
    }

    pub fn symbols(&self) -> &[ColorSymbol] {
        &self.0
    }

    pub fn is_colorless(&self) -> bool {
        self.0.is_empty()
    }

    /// Human readable form: the symbols, or "Colorless"
    pub fn label(&self) -> String {
        if self.is_colorless() {
            String::from("Colorless")
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for ColorIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

/// Image references for a card (Scryfall `image_uris`)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageUris {
    pub small: Option<String>,
    pub normal: Option<String>,
}

/// A commander-eligible card returned by a lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Stable identifier assigned by the search service
    pub id: String,
    /// Display name (e.g. "Atraxa, Grand Unifier")
    pub name: String,
    pub color_identity: ColorIdentity,
    /// Optional thumbnail references
    pub images: Option<ImageUris>,
}

impl Candidate {
    /// URI of the small thumbnail, if the card has one
    pub fn thumbnail_uri(&self) -> Option<&str> {
        self.images.as_ref()?.small.as_deref()
    }
}

/// Remote card lookup (extensibility point)
pub trait CardSearch: Send + Sync {
    /// Search commander-eligible cards matching `query`
    fn search(&self, query: &str) -> LookupFuture<Vec<Candidate>>;

    /// Download raw image bytes for a thumbnail
    fn fetch_image(&self, url: &str) -> LookupFuture<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_identity_concatenates_without_separator() {
        let identity = ColorIdentity::new(vec![
            ColorSymbol::W,
            ColorSymbol::U,
            ColorSymbol::B,
            ColorSymbol::G,
        ]);
        assert_eq!(identity.to_string(), "WUBG");
        assert_eq!(identity.label(), "WUBG");
    }

    #[test]
    fn colorless_formats_empty_but_labels_colorless() {
        let identity = ColorIdentity::default();
        assert_eq!(identity.to_string(), "");
        assert_eq!(identity.label(), "Colorless");
    }

    #[test]
    fn color_identity_rejects_unknown_symbols() {
        let parsed: Result<ColorIdentity, _> = serde_json::from_str(r#"["W","X"]"#);
        assert!(parsed.is_err());
    }
}
