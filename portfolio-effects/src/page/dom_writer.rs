use bevy::prelude::*;

/// Part of an observed element a write is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementPart {
    Itself,
    Stage3d,
    TimelineContent,
    Skill3d,
    Hero3d,
    HeroContent,
}

impl ElementPart {
    /// Selector relative to the observed element, `None` for the element itself.
    pub fn selector(&self) -> Option<&'static str> {
        match self {
            Self::Itself => None,
            Self::Stage3d => Some(".stage-3d"),
            Self::TimelineContent => Some(".timeline-content"),
            Self::Skill3d => Some(".skill-3d"),
            Self::Hero3d => Some("#hero-3d"),
            Self::HeroContent => Some(".hero-content"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomTarget {
    /// An element registered with the visibility observer, by registration index.
    Observed { element: usize, part: ElementPart },
    /// First element matching a document-wide selector.
    Selector(String),
    DocumentElement,
    Body,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomCommand {
    SetStyle {
        target: DomTarget,
        property: &'static str,
        value: String,
    },
    SetClass {
        target: DomTarget,
        class: String,
        enabled: bool,
    },
    /// Remove a class from every element matching `selector`.
    ClearClass { selector: String, class: String },
    /// Append a `<div>` with the given class and inline style to `<body>`.
    AppendDiv { class: &'static str, style: &'static str },
}

/// Outgoing DOM writes for this frame.
#[derive(Resource, Default)]
pub struct DomWriter {
    outgoing: Vec<DomCommand>,
}

impl DomWriter {
    pub fn set_style(&mut self, target: DomTarget, property: &'static str, value: impl Into<String>) {
        self.outgoing.push(DomCommand::SetStyle {
            target,
            property,
            value: value.into(),
        });
    }

    pub fn set_class(&mut self, target: DomTarget, class: impl Into<String>, enabled: bool) {
        self.outgoing.push(DomCommand::SetClass {
            target,
            class: class.into(),
            enabled,
        });
    }

    pub fn set_css_variable(&mut self, name: &'static str, value: impl Into<String>) {
        self.set_style(DomTarget::DocumentElement, name, value);
    }

    pub fn clear_class(&mut self, selector: impl Into<String>, class: impl Into<String>) {
        self.outgoing.push(DomCommand::ClearClass {
            selector: selector.into(),
            class: class.into(),
        });
    }

    pub fn append_div(&mut self, class: &'static str, style: &'static str) {
        self.outgoing.push(DomCommand::AppendDiv { class, style });
    }

    pub fn pending(&self) -> &[DomCommand] {
        &self.outgoing
    }

    pub fn take(&mut self) -> Vec<DomCommand> {
        std::mem::take(&mut self.outgoing)
    }
}

/// Elements registered with the visibility observer, indexed by registration order.
#[cfg(target_arch = "wasm32")]
#[derive(Default)]
pub struct ObservedElements(pub Vec<web_sys::Element>);

/// Flush queued writes to the DOM.
#[cfg(target_arch = "wasm32")]
pub fn flush_dom_writes(mut writer: ResMut<DomWriter>, observed: Option<NonSend<ObservedElements>>) {
    let commands = writer.take();
    if commands.is_empty() {
        return;
    }

    let elements = observed.as_deref().map(|o| o.0.as_slice()).unwrap_or(&[]);
    for command in &commands {
        match wasm_dom::apply(command, elements) {
            Ok(()) => {}
            // Optional parts such as `.timeline-content` are not on every page.
            Err(e @ crate::page::PageBridgeError::MissingElement(_)) => {
                debug!("DOM write skipped: {}", e);
            }
            Err(e) => warn!("DOM write failed ({:?}): {}", command, e),
        }
    }
}

/// No DOM natively; writes are dropped after tracing them.
#[cfg(not(target_arch = "wasm32"))]
pub fn flush_dom_writes(mut writer: ResMut<DomWriter>) {
    for command in writer.take() {
        trace!("DOM write (native no-op): {:?}", command);
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_dom {
    use super::{DomCommand, DomTarget};
    use crate::page::PageBridgeError;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlElement};

    pub fn apply(command: &DomCommand, observed: &[Element]) -> Result<(), PageBridgeError> {
        let document = web_sys::window()
            .ok_or(PageBridgeError::NoWindow)?
            .document()
            .ok_or(PageBridgeError::NoDocument)?;

        match command {
            DomCommand::SetStyle {
                target,
                property,
                value,
            } => {
                let element = resolve(&document, target, observed)?;
                let html = element
                    .dyn_into::<HtmlElement>()
                    .map_err(|_| PageBridgeError::Js("target is not an HTML element".into()))?;
                html.style().set_property(property, value)?;
            }
            DomCommand::SetClass {
                target,
                class,
                enabled,
            } => {
                let element = resolve(&document, target, observed)?;
                if *enabled {
                    element.class_list().add_1(class)?;
                } else {
                    element.class_list().remove_1(class)?;
                }
            }
            DomCommand::ClearClass { selector, class } => {
                let nodes = document.query_selector_all(selector)?;
                for i in 0..nodes.length() {
                    if let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                        element.class_list().remove_1(class)?;
                    }
                }
            }
            DomCommand::AppendDiv { class, style } => {
                let body = document.body().ok_or(PageBridgeError::NoDocument)?;
                let div = document.create_element("div")?;
                div.set_class_name(class);
                div.set_attribute("style", style)?;
                body.append_child(&div)?;
            }
        }
        Ok(())
    }

    fn resolve(
        document: &Document,
        target: &DomTarget,
        observed: &[Element],
    ) -> Result<Element, PageBridgeError> {
        match target {
            DomTarget::Observed { element, part } => {
                let root = observed
                    .get(*element)
                    .ok_or_else(|| PageBridgeError::MissingElement(format!("observed #{element}")))?;
                match part.selector() {
                    None => Ok(root.clone()),
                    Some(selector) => root
                        .query_selector(selector)?
                        .ok_or_else(|| PageBridgeError::MissingElement(selector.to_string())),
                }
            }
            DomTarget::Selector(selector) => document
                .query_selector(selector)?
                .ok_or_else(|| PageBridgeError::MissingElement(selector.clone())),
            DomTarget::DocumentElement => document
                .document_element()
                .ok_or_else(|| PageBridgeError::MissingElement("html".into())),
            DomTarget::Body => document
                .body()
                .map(Into::into)
                .ok_or_else(|| PageBridgeError::MissingElement("body".into())),
        }
    }
}
