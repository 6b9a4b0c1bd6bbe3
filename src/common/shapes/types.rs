//! Cross-format shape and placeholder classification.
//!
//! [`crate::ooxml::pptx::shapes::base`] and [`crate::ooxml::docx::drawing`]
//! each keep their own format-specific shape-kind enum (tied to their own
//! parsed field layout); this module holds the format-agnostic vocabulary a
//! caller can use to classify a shape without reaching into either one,
//! built from the same `p:ph/@type` string values
//! [`crate::ooxml::pptx::shapes::base::BaseShape::placeholder_type`] returns
//! raw.

/// General shape category, independent of a specific OOXML format's parsed
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// A plain shape (`p:sp` / `wps:wsp`) — text box, preset geometry, etc.
    Shape,
    /// A picture (`p:pic` / `w:pict`/`wp:inline` drawing).
    Picture,
    /// A table, chart, OLE object, or diagram hosted in a graphic frame.
    GraphicFrame,
    /// A group of shapes (`p:grpSp`).
    GroupShape,
    /// A connector shape (`p:cxnSp`) whose endpoints reference other shapes.
    Connector,
    /// A layout/master placeholder instance (`p:ph`).
    Placeholder,
}

/// `ST_PlaceholderType` — the semantic role of a `p:ph` placeholder shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceholderType {
    /// `title` — slide title.
    Title,
    /// `body` — generic body content.
    Body,
    /// `ctrTitle` — centered title, used on title slides.
    CenterTitle,
    /// `subTitle` — subtitle, used on title slides.
    SubTitle,
    /// `dt` — date/time footer placeholder.
    DateTime,
    /// `ftr` — footer placeholder.
    Footer,
    /// `sldNum` — slide number placeholder.
    SlideNumber,
    /// `pic` — picture placeholder.
    Picture,
    /// `chart` — chart placeholder.
    Chart,
    /// `tbl` — table placeholder.
    Table,
    /// `clipArt` — clip art placeholder.
    ClipArt,
    /// `media` — audio/video placeholder.
    Media,
    /// `dgm` — SmartArt/diagram placeholder.
    Diagram,
    /// `obj` — generic embedded-object placeholder.
    Object,
    /// A `p:ph` with no `type` attribute; PowerPoint treats this as a body
    /// placeholder, but callers that need to distinguish "explicitly body"
    /// from "unspecified" can match on this variant.
    Unspecified,
    /// Any other `type` value the ECMA-376 schema permits but this crate
    /// does not special-case.
    Other(String),
}

impl PlaceholderType {
    /// Parse a `p:ph/@type` attribute value.
    ///
    /// A missing attribute should be passed as `None`, which yields
    /// [`PlaceholderType::Unspecified`] (PowerPoint's "body" default).
    pub fn from_attr(value: Option<&str>) -> Self {
        match value {
            None => PlaceholderType::Unspecified,
            Some("title") => PlaceholderType::Title,
            Some("body") => PlaceholderType::Body,
            Some("ctrTitle") => PlaceholderType::CenterTitle,
            Some("subTitle") => PlaceholderType::SubTitle,
            Some("dt") => PlaceholderType::DateTime,
            Some("ftr") => PlaceholderType::Footer,
            Some("sldNum") => PlaceholderType::SlideNumber,
            Some("pic") => PlaceholderType::Picture,
            Some("chart") => PlaceholderType::Chart,
            Some("tbl") => PlaceholderType::Table,
            Some("clipArt") => PlaceholderType::ClipArt,
            Some("media") => PlaceholderType::Media,
            Some("dgm") => PlaceholderType::Diagram,
            Some("obj") => PlaceholderType::Object,
            Some(other) => PlaceholderType::Other(other.to_string()),
        }
    }

    /// The `p:ph/@type` attribute value this variant serializes to, or
    /// `None` when the attribute should be omitted (body is PowerPoint's
    /// implicit default for a type-less placeholder).
    pub fn to_attr(&self) -> Option<&str> {
        match self {
            PlaceholderType::Title => Some("title"),
            PlaceholderType::Body | PlaceholderType::Unspecified => None,
            PlaceholderType::CenterTitle => Some("ctrTitle"),
            PlaceholderType::SubTitle => Some("subTitle"),
            PlaceholderType::DateTime => Some("dt"),
            PlaceholderType::Footer => Some("ftr"),
            PlaceholderType::SlideNumber => Some("sldNum"),
            PlaceholderType::Picture => Some("pic"),
            PlaceholderType::Chart => Some("chart"),
            PlaceholderType::Table => Some("tbl"),
            PlaceholderType::ClipArt => Some("clipArt"),
            PlaceholderType::Media => Some("media"),
            PlaceholderType::Diagram => Some("dgm"),
            PlaceholderType::Object => Some("obj"),
            PlaceholderType::Other(s) => Some(s.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_known_placeholder_types() {
        for (attr, variant) in [
            ("title", PlaceholderType::Title),
            ("ctrTitle", PlaceholderType::CenterTitle),
            ("subTitle", PlaceholderType::SubTitle),
            ("sldNum", PlaceholderType::SlideNumber),
        ] {
            assert_eq!(PlaceholderType::from_attr(Some(attr)), variant);
            assert_eq!(PlaceholderType::from_attr(Some(attr)).to_attr(), Some(attr));
        }
    }

    #[test]
    fn missing_type_attribute_is_unspecified() {
        assert_eq!(PlaceholderType::from_attr(None), PlaceholderType::Unspecified);
        assert_eq!(PlaceholderType::from_attr(None).to_attr(), None);
    }

    #[test]
    fn unknown_type_round_trips_through_other() {
        let parsed = PlaceholderType::from_attr(Some("vendorExt"));
        assert_eq!(parsed, PlaceholderType::Other("vendorExt".to_string()));
        assert_eq!(parsed.to_attr(), Some("vendorExt"));
    }
}
