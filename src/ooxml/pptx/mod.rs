//! PowerPoint (.pptx) presentation support.
//!
//! This module provides parsing and manipulation of Microsoft PowerPoint presentations
//! in the Office Open XML (OOXML) format (.pptx files).
//!
//! # Architecture
//!
//! The module is organized around these key types:
//! - `Package`: The overall .pptx file package
//! - `Presentation`: The main presentation content and API
//! - `Slide`/`SlideLayout`/`SlideMaster`: Individual slide hierarchy levels
//! - `SlideTransition`/`AnimationSequence`: Slide transitions and shape animation timing
//! - `writer::MutablePresentation`: The patch-oriented write-back path
//!
//! # Example
//!
//! ```rust,no_run
//! use parchment::ooxml::pptx::Package;
//!
//! let package = Package::open("presentation.pptx")?;
//! let pres = package.presentation()?;
//!
//! for slide in pres.slides()? {
//!     println!("Slide title: {:?}", slide.title());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod animations;
pub mod backgrounds;
pub mod customshow;
pub mod format;
pub mod handout;
pub mod hyperlinks;
pub mod media;
pub mod package;
pub mod parts;
pub mod presentation;
pub mod protection;
pub mod sections;
pub mod shapes;
pub mod slide;
pub mod smartart;
pub mod template;
pub mod transitions;
pub mod writer;

pub use animations::{
    Animation, AnimationDirection, AnimationEffect, AnimationSequence, AnimationTrigger,
};
pub use backgrounds::{GradientStop, GradientType, PatternType, PictureStyle, SlideBackground};
pub use customshow::{CustomShow, CustomShowList};
pub use format::{ImageFormat, TextFormat};
pub use handout::{HandoutHeaderFooter, HandoutLayout, HandoutMaster};
pub use hyperlinks::Hyperlink;
pub use media::{Media, MediaFormat, MediaType};
pub use package::Package;
pub use parts::{
    ChartData, ChartInfo, ChartPart, ChartSeries, ChartType, Comment, CommentAuthor,
    CommentAuthorsPart, CommentsPart, PresentationPart, SlideLayoutPart, SlideMasterPart,
    SlidePart, Theme, ThemeColor, ThemeFont, ThemePart,
};
pub use presentation::Presentation;
pub use protection::{CryptoAlgorithm, PresentationProtection, ProtectionType, SlideProtection};
pub use sections::{Section, SectionList};
pub use shapes::{BaseShape, Picture, Shape, ShapeType, Table, TableCell, TableRow, TextFrame};
pub use slide::{Slide, SlideLayout, SlideMaster};
pub use smartart::{DiagramNode, DiagramType, SmartArt, SmartArtBuilder};
pub use transitions::{
    ClockDirection, ShapeTransitionType, SlideTransition, TransitionDirection, TransitionSound,
    TransitionSpeed, TransitionType, ZoomDirection,
};
pub use writer::MutablePresentation;
