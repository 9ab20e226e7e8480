//! Templates and their identifiers.

use crate::image::{Image, ImageView};
use std::fmt;
use std::sync::Arc;

mod scale;

pub use scale::{ScaleRange, ScaledTemplate};
pub(crate) use scale::scaled_variants;

/// Cheaply clonable template identifier, usually the asset name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TemplateId(Arc<str>);

impl TemplateId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TemplateId {
    fn from(value: &str) -> Self {
        Self(Arc::from(value))
    }
}

impl From<String> for TemplateId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A reference image to search for, tagged with its identifier.
#[derive(Clone, Debug)]
pub struct Template {
    id: TemplateId,
    image: Image,
}

impl Template {
    pub fn new(id: impl Into<TemplateId>, image: Image) -> Self {
        Self {
            id: id.into(),
            image,
        }
    }

    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    pub fn image(&self) -> &Image {
        &self.image
    }

    /// Returns a borrowed view of the template pixels.
    pub fn view(&self) -> ImageView<'_> {
        self.image.view()
    }
}
