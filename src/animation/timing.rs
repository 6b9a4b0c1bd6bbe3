//! Nested presentation timing tree (`p:timing`/`p:par`/`p:seq`/`p:anim*`).
//!
//! [`crate::ooxml::pptx::animations::AnimationSequence`] models a slide's
//! animations as a flat, already-flattened list. PowerPoint actually stores
//! them as a tree of time nodes (`p:par`/`p:seq` containers wrapping
//! `p:childTnLst` children, down to leaf behavior nodes like `p:set`/`p:anim`/
//! `p:animEffect`), where a node's start condition can depend on its parent
//! or a sibling finishing. [`TimeNode`] generalizes the flat list into that
//! tree, following the same parse-via-`quick_xml`-event-loop idiom as
//! [`crate::ooxml::pptx::transitions::SlideTransition::from_xml`].

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::pptx::animations::{AnimationEffect, AnimationTrigger};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Tags that open a nested time node: the two containers (`par`/`seq`) and
/// the leaf behavior elements that carry their own timing.
const NODE_TAGS: &[&[u8]] = &[
    b"par",
    b"seq",
    b"anim",
    b"animEffect",
    b"animClr",
    b"animRot",
    b"animScale",
    b"animMotion",
    b"set",
    b"cmd",
];

/// Semantic role of a time node, taken from the `nodeType` attribute of its
/// `p:cTn` (common timing node) element.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TimeNodeType {
    /// The top-level node of a slide's timing tree (`nodeType="tmRoot"`).
    #[default]
    Root,
    /// The slide's main animation sequence (`nodeType="mainSeq"`).
    MainSequence,
    /// Starts when the user clicks (`nodeType="clickEffect"`).
    ClickEffect,
    /// Starts with the previous node (`nodeType="withEffect"`).
    WithEffect,
    /// Starts after the previous node finishes (`nodeType="afterEffect"`).
    AfterEffect,
    /// An interactive trigger sequence (`nodeType="interactiveSeq"`).
    InteractiveSequence,
    /// Any other `nodeType` value, or none at all (untyped container/behavior
    /// nodes such as `p:set`).
    Custom(String),
}

impl TimeNodeType {
    fn from_attr(value: &str) -> Self {
        match value {
            "tmRoot" => TimeNodeType::Root,
            "mainSeq" => TimeNodeType::MainSequence,
            "clickEffect" => TimeNodeType::ClickEffect,
            "withEffect" => TimeNodeType::WithEffect,
            "afterEffect" => TimeNodeType::AfterEffect,
            "interactiveSeq" => TimeNodeType::InteractiveSequence,
            other => TimeNodeType::Custom(other.to_string()),
        }
    }

    fn to_xml_value(&self) -> Option<&str> {
        match self {
            TimeNodeType::Root => Some("tmRoot"),
            TimeNodeType::MainSequence => Some("mainSeq"),
            TimeNodeType::ClickEffect => Some("clickEffect"),
            TimeNodeType::WithEffect => Some("withEffect"),
            TimeNodeType::AfterEffect => Some("afterEffect"),
            TimeNodeType::InteractiveSequence => Some("interactiveSeq"),
            TimeNodeType::Custom(s) if !s.is_empty() => Some(s.as_str()),
            TimeNodeType::Custom(_) => None,
        }
    }
}

/// Re-export of the flat sequence's trigger vocabulary; a time node's start
/// condition uses the same three values (`p:cond`'s implicit delay).
pub type TimeTrigger = AnimationTrigger;

/// The start condition of a time node, taken from its `p:stCondLst/p:cond`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeCondition {
    /// Delay before the node starts, in milliseconds. `None` means
    /// `delay="indefinite"` (wait for the trigger, e.g. a mouse click).
    pub delay: Option<u32>,
    /// What starts this node.
    pub trigger: TimeTrigger,
}

/// A node in a slide's nested animation timing tree.
#[derive(Debug, Clone, Default)]
pub struct TimeNode {
    /// The wrapping XML tag (`par`, `seq`, `set`, `anim`, `animEffect`, …).
    pub tag: String,
    /// Semantic role, from `nodeType`.
    pub node_type: TimeNodeType,
    /// Start condition for this node.
    pub condition: TimeCondition,
    /// Declared duration in milliseconds; `None` means `dur="indefinite"`.
    pub duration_ms: Option<u32>,
    /// The animation effect this node applies, if it (or its nearest `p:cTn`)
    /// carries a `presetID`/`presetClass` pair.
    pub effect: Option<AnimationEffect>,
    /// The shape this node targets, from `p:tgtEl/p:spTgt`.
    pub target_shape_id: Option<u32>,
    /// Nested time nodes, in document order.
    pub children: Vec<TimeNode>,
}

impl TimeNode {
    /// Parse a `p:timing` element's full tree from a slide part.
    ///
    /// Returns `None` when the slide has no `p:timing` element at all.
    pub fn parse_timing_xml(xml: &str) -> Result<Option<Self>> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<TimeNode> = Vec::new();
        let mut root: Option<TimeNode> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = e.local_name();
                    let name = name.as_ref();
                    if NODE_TAGS.contains(&name) {
                        stack.push(new_frame(name));
                    } else if name == b"cTn" {
                        apply_ctn_attrs(stack.last_mut(), &e);
                    } else if name == b"cond" {
                        apply_cond_attrs(stack.last_mut(), &e);
                    } else if name == b"spTgt" {
                        apply_sp_tgt(stack.last_mut(), &e);
                    }
                },
                Ok(Event::Empty(e)) => {
                    let name = e.local_name();
                    let name = name.as_ref();
                    if NODE_TAGS.contains(&name) {
                        let node = new_frame(name);
                        push_finished(&mut stack, &mut root, node);
                    } else if name == b"cTn" {
                        apply_ctn_attrs(stack.last_mut(), &e);
                    } else if name == b"cond" {
                        apply_cond_attrs(stack.last_mut(), &e);
                    } else if name == b"spTgt" {
                        apply_sp_tgt(stack.last_mut(), &e);
                    }
                },
                Ok(Event::End(e)) => {
                    let name = e.local_name();
                    if NODE_TAGS.contains(&name.as_ref()) {
                        if let Some(node) = stack.pop() {
                            push_finished(&mut stack, &mut root, node);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
        }

        Ok(root)
    }

    /// Serialize this time node (and its children) back to `p:par`/`p:seq`/…
    /// markup, inverse of [`Self::parse_timing_xml`] for a single node.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.children.len() * 128);
        self.write_xml(&mut xml);
        xml
    }

    fn write_xml(&self, xml: &mut String) {
        xml.push_str("<p:");
        xml.push_str(&self.tag);
        xml.push('>');

        xml.push_str("<p:cTn");
        if let Some(nt) = self.node_type.to_xml_value() {
            xml.push_str(" nodeType=\"");
            xml.push_str(nt);
            xml.push('"');
        }
        match self.duration_ms {
            Some(ms) => xml.push_str(&format!(" dur=\"{ms}\"")),
            None => xml.push_str(" dur=\"indefinite\""),
        }
        if let Some(effect) = &self.effect {
            xml.push_str(&format!(
                " presetID=\"{}\" presetClass=\"{}\"",
                effect.preset_id(),
                effect.preset_class()
            ));
        }
        xml.push('>');

        xml.push_str("<p:stCondLst><p:cond delay=\"");
        match self.condition.delay {
            Some(ms) => xml.push_str(&ms.to_string()),
            None => xml.push_str("indefinite"),
        }
        xml.push_str("\"/></p:stCondLst>");

        if let Some(spid) = self.target_shape_id {
            xml.push_str(&format!(
                "<p:tgtEl><p:spTgt spid=\"{spid}\"/></p:tgtEl>"
            ));
        }

        if !self.children.is_empty() {
            xml.push_str("<p:childTnLst>");
            for child in &self.children {
                child.write_xml(xml);
            }
            xml.push_str("</p:childTnLst>");
        }

        xml.push_str("</p:cTn></p:");
        xml.push_str(&self.tag);
        xml.push('>');
    }
}

fn new_frame(tag: &[u8]) -> TimeNode {
    TimeNode {
        tag: String::from_utf8_lossy(tag).into_owned(),
        ..Default::default()
    }
}

fn push_finished(stack: &mut [TimeNode], root: &mut Option<TimeNode>, node: TimeNode) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

fn apply_ctn_attrs(frame: Option<&mut TimeNode>, e: &BytesStart<'_>) {
    let Some(frame) = frame else { return };

    let mut preset_id: Option<u32> = None;
    let mut preset_class: Option<String> = None;

    for attr in e.attributes().flatten() {
        let Ok(value) = std::str::from_utf8(&attr.value) else {
            continue;
        };
        match attr.key.as_ref() {
            b"nodeType" => frame.node_type = TimeNodeType::from_attr(value),
            b"dur" if value != "indefinite" => frame.duration_ms = value.parse().ok(),
            b"presetID" => preset_id = value.parse().ok(),
            b"presetClass" => preset_class = Some(value.to_string()),
            _ => {},
        }
    }

    if let (Some(id), Some(class)) = (preset_id, preset_class) {
        frame.effect = Some(preset_effect(id, &class));
    }
}

/// Map a `(presetID, presetClass)` pair to an [`AnimationEffect`].
///
/// `AnimationEffect::from_preset_id` only knows the entrance-effect ID space;
/// for other classes we fall back to a custom label so the class is not lost.
fn preset_effect(preset_id: u32, preset_class: &str) -> AnimationEffect {
    match preset_class {
        "entr" => AnimationEffect::from_preset_id(preset_id),
        other => AnimationEffect::Custom(format!("{other}:{preset_id}")),
    }
}

fn apply_cond_attrs(frame: Option<&mut TimeNode>, e: &BytesStart<'_>) {
    let Some(frame) = frame else { return };

    for attr in e.attributes().flatten() {
        if attr.key.as_ref() != b"delay" {
            continue;
        }
        let Ok(value) = std::str::from_utf8(&attr.value) else {
            continue;
        };
        if value == "indefinite" {
            frame.condition.delay = None;
            frame.condition.trigger = AnimationTrigger::OnClick;
        } else if let Ok(ms) = value.parse::<u32>() {
            frame.condition.delay = Some(ms);
            frame.condition.trigger = if ms == 0 {
                AnimationTrigger::WithPrevious
            } else {
                AnimationTrigger::AfterPrevious
            };
        }
    }
}

fn apply_sp_tgt(frame: Option<&mut TimeNode>, e: &BytesStart<'_>) {
    let Some(frame) = frame else { return };

    for attr in e.attributes().flatten() {
        if attr.key.as_ref() != b"spid" {
            continue;
        }
        if let Ok(value) = std::str::from_utf8(&attr.value) {
            frame.target_shape_id = value.parse().ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_tree() {
        let xml = r#"
            <p:timing><p:tnLst><p:par><p:cTn id="1" dur="indefinite" nodeType="tmRoot">
                <p:childTnLst><p:seq concurrent="1"><p:cTn id="2" dur="indefinite" nodeType="mainSeq">
                    <p:childTnLst><p:par><p:cTn id="3" nodeType="clickEffect" presetID="1" presetClass="entr">
                        <p:stCondLst><p:cond delay="indefinite"/></p:stCondLst>
                        <p:childTnLst><p:set><p:cTn id="4" dur="1">
                            <p:stCondLst><p:cond delay="0"/></p:stCondLst>
                            <p:tgtEl><p:spTgt spid="7"/></p:tgtEl>
                        </p:cTn></p:set></p:childTnLst>
                    </p:cTn></p:par></p:childTnLst>
                </p:cTn></p:seq></p:childTnLst>
            </p:cTn></p:par></p:tnLst></p:timing>
        "#;

        let root = TimeNode::parse_timing_xml(xml).unwrap().unwrap();
        assert_eq!(root.tag, "par");
        assert_eq!(root.node_type, TimeNodeType::Root);
        assert_eq!(root.children.len(), 1);

        let seq = &root.children[0];
        assert_eq!(seq.tag, "seq");
        assert_eq!(seq.node_type, TimeNodeType::MainSequence);

        let click = &seq.children[0];
        assert_eq!(click.node_type, TimeNodeType::ClickEffect);
        assert_eq!(click.condition.trigger, TimeTrigger::OnClick);
        assert_eq!(click.effect, Some(AnimationEffect::Appear));

        let set = &click.children[0];
        assert_eq!(set.tag, "set");
        assert_eq!(set.target_shape_id, Some(7));
        assert_eq!(set.condition.trigger, TimeTrigger::WithPrevious);
    }

    #[test]
    fn round_trips_through_to_xml() {
        let node = TimeNode {
            tag: "par".to_string(),
            node_type: TimeNodeType::ClickEffect,
            condition: TimeCondition {
                delay: None,
                trigger: TimeTrigger::OnClick,
            },
            duration_ms: Some(500),
            effect: Some(AnimationEffect::Fade),
            target_shape_id: Some(3),
            children: Vec::new(),
        };

        let xml = node.to_xml();
        assert!(xml.contains("nodeType=\"clickEffect\""));
        assert!(xml.contains("presetID=\"10\""));
        assert!(xml.contains("spid=\"3\""));
    }
}
