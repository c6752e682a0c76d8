use crate::page::PageBridgeError;
use crate::page::dom_writer::ObservedElements;
use crate::page::geometry::{ContainerInfo, ContainerKey, PageRect, ScrollSnapshot, SectionBounds};
use crate::page::web_bridge::{PageMessage, PageMessageQueue, SectionRole};
use bevy::prelude::*;
use constants::scroll::{
    NAV_LINK_SELECTOR, OBSERVED_SELECTOR, VISIBILITY_ROOT_MARGIN, VISIBILITY_THRESHOLDS,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

/// Index stored on every observed element so observer callbacks can name it.
const OBSERVED_INDEX_ATTRIBUTE: &str = "data-fx-index";

/// Register every DOM listener the effects need and push the initial page state.
pub fn register_page_listeners(world: &mut World) {
    let queue = world.resource::<PageMessageQueue>().clone();

    let (window, document) = match window_and_document() {
        Ok(pair) => pair,
        Err(e) => {
            warn!("Page listeners not registered: {}", e);
            return;
        }
    };

    push_page_state(&queue, &window, &document);

    if let Some(settings) = document
        .get_element_by_id("effects-settings")
        .and_then(|script| script.text_content())
    {
        queue.push(PageMessage::Settings(settings));
    }

    match observe_sections(&document, &queue) {
        Ok(elements) => {
            info!("Observing {} page sections", elements.len());
            world.insert_non_send_resource(ObservedElements(elements));
        }
        Err(e) => warn!("Visibility observer unavailable: {}", e),
    }

    for (event, message) in [("scroll", None), ("resize", None), ("pagehide", Some(PageMessage::Unload))] {
        if let Err(e) = listen_on_window(&window, &queue, event, message) {
            warn!("Failed to register `{}` listener: {}", event, e);
        }
    }

    if let Err(e) = register_anchor_links(&document, &queue) {
        warn!("Smooth scrolling disabled: {}", e);
    }
}

fn window_and_document() -> Result<(Window, Document), PageBridgeError> {
    let window = web_sys::window().ok_or(PageBridgeError::NoWindow)?;
    let document = window.document().ok_or(PageBridgeError::NoDocument)?;
    Ok((window, document))
}

fn push_page_state(queue: &PageMessageQueue, window: &Window, document: &Document) {
    queue.push(PageMessage::Layout(collect_containers(document)));
    queue.push(PageMessage::Scroll(capture_snapshot(window, document)));
}

/// `scroll`/`resize` refresh layout and scroll state; other events push `message`.
fn listen_on_window(
    window: &Window,
    queue: &PageMessageQueue,
    event: &str,
    message: Option<PageMessage>,
) -> Result<(), PageBridgeError> {
    let queue = queue.clone();
    let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        match &message {
            Some(message) => queue.push(message.clone()),
            None => {
                if let Ok((window, document)) = window_and_document() {
                    push_page_state(&queue, &window, &document);
                }
            }
        }
    }) as Box<dyn FnMut(web_sys::Event)>);

    window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Listener lives for the page session.
    closure.forget();
    Ok(())
}

fn observe_sections(
    document: &Document,
    queue: &PageMessageQueue,
) -> Result<Vec<Element>, PageBridgeError> {
    let callback_queue = queue.clone();
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let Some(element) = target
                    .get_attribute(OBSERVED_INDEX_ATTRIBUTE)
                    .and_then(|v| v.parse::<usize>().ok())
                else {
                    continue;
                };
                let Some(role) = role_of(&target) else {
                    continue;
                };
                callback_queue.push(PageMessage::Visibility {
                    element,
                    role,
                    ratio: entry.intersection_ratio() as f32,
                });
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let thresholds: js_sys::Array = VISIBILITY_THRESHOLDS
        .iter()
        .map(|t| JsValue::from_f64(*t))
        .collect();
    let options = IntersectionObserverInit::new();
    options.set_threshold(&thresholds);
    options.set_root_margin(VISIBILITY_ROOT_MARGIN);

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    let elements = select_all(document, OBSERVED_SELECTOR)?;
    for (index, element) in elements.iter().enumerate() {
        element.set_attribute(OBSERVED_INDEX_ATTRIBUTE, &index.to_string())?;
        observer.observe(element);
    }
    Ok(elements)
}

fn role_of(element: &Element) -> Option<SectionRole> {
    let class_name = element.class_name();
    SectionRole::from_classes(class_name.split_whitespace())
}

/// In-page anchors scroll smoothly; nav links also pin their section as active.
fn register_anchor_links(document: &Document, queue: &PageMessageQueue) -> Result<(), PageBridgeError> {
    let nav_links = select_all(document, NAV_LINK_SELECTOR)?;

    for anchor in select_all(document, "a[href^=\"#\"]")? {
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        let is_nav_link = nav_links.iter().any(|link| link == &anchor);
        let queue = queue.clone();

        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            event.prevent_default();
            let section = href.trim_start_matches('#').to_string();
            if is_nav_link && !section.is_empty() {
                queue.push(PageMessage::NavClick {
                    section: section.clone(),
                });
            }
            if let Err(e) = scroll_to(&href) {
                debug!("Anchor {} has no target: {}", href, e);
            }
        }) as Box<dyn FnMut(web_sys::Event)>);

        anchor.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

fn scroll_to(selector: &str) -> Result<(), PageBridgeError> {
    let (_, document) = window_and_document()?;
    let target = document
        .query_selector(selector)?
        .ok_or_else(|| PageBridgeError::MissingElement(selector.to_string()))?;

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&options);
    Ok(())
}

fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>, PageBridgeError> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn rect_of(element: &Element) -> PageRect {
    let rect = element.get_bounding_client_rect();
    PageRect::new(
        rect.x() as f32,
        rect.y() as f32,
        rect.width() as f32,
        rect.height() as f32,
    )
}

fn collect_containers(document: &Document) -> Vec<ContainerInfo> {
    let mut containers = Vec::new();

    for (index, item) in select_all(document, ".timeline-item")
        .unwrap_or_default()
        .iter()
        .enumerate()
    {
        // Element may not exist on this page.
        let Ok(Some(stage)) = item.query_selector(".stage-3d") else {
            continue;
        };
        containers.push(ContainerInfo {
            key: ContainerKey::TimelineStage(index),
            rect: rect_of(&stage),
            skill: None,
            model: stage.get_attribute("data-model"),
        });
    }

    for (index, badge) in select_all(document, ".skill-3d")
        .unwrap_or_default()
        .iter()
        .enumerate()
    {
        containers.push(ContainerInfo {
            key: ContainerKey::SkillBadge(index),
            rect: rect_of(badge),
            skill: badge.get_attribute("data-skill"),
            model: None,
        });
    }

    if let Some(hero) = document.get_element_by_id("hero-3d") {
        containers.push(ContainerInfo {
            key: ContainerKey::Hero,
            rect: rect_of(&hero),
            skill: None,
            model: hero.get_attribute("data-model"),
        });
    }

    containers
}

fn capture_snapshot(window: &Window, document: &Document) -> ScrollSnapshot {
    let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|h| h.as_f64())
        .unwrap_or(0.0) as f32;
    let document_height = document.body().map(|b| b.scroll_height()).unwrap_or(0) as f32;

    let sections = select_all(document, "section[id]")
        .unwrap_or_default()
        .iter()
        .map(|section| {
            let rect = section.get_bounding_client_rect();
            SectionBounds::new(
                section.id(),
                rect.top() as f32 + scroll_y,
                rect.height() as f32,
            )
        })
        .collect();

    let has_timeline = document
        .query_selector(".timeline-item")
        .ok()
        .flatten()
        .is_some();
    let journey = document
        .query_selector(".portfolio-timeline")
        .ok()
        .flatten()
        .filter(|_| has_timeline)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(|el| {
            SectionBounds::new(
                "journey",
                el.offset_top() as f32,
                el.offset_height() as f32,
            )
        });

    ScrollSnapshot {
        scroll_y,
        viewport_height,
        document_height,
        sections,
        journey,
    }
}
