use crate::engine::core::settings::{EffectsSettings, SettingsLoader};
use crate::page::dom_writer::{DomWriter, flush_dom_writes};
use crate::page::geometry::{ContainerInfo, PageLayout, ScrollSnapshot};
use bevy::prelude::*;
use std::sync::{Arc, Mutex};

/// Role of an element registered with the visibility observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionRole {
    TimelineEntry,
    SkillBadge,
    HeroBanner,
}

impl SectionRole {
    /// Role from an element's class list. Timeline entries win over skill badges,
    /// which win over the hero, whatever order the classes are listed in.
    pub fn from_classes<'a>(classes: impl Iterator<Item = &'a str>) -> Option<Self> {
        let classes: Vec<&str> = classes.collect();
        [
            ("timeline-item", Self::TimelineEntry),
            ("skill-item", Self::SkillBadge),
            ("hero", Self::HeroBanner),
        ]
        .into_iter()
        .find(|(class, _)| classes.contains(class))
        .map(|(_, role)| role)
    }
}

/// Raw message produced by a browser callback.
#[derive(Debug, Clone, PartialEq)]
pub enum PageMessage {
    Scroll(ScrollSnapshot),
    Layout(Vec<ContainerInfo>),
    Visibility {
        element: usize,
        role: SectionRole,
        ratio: f32,
    },
    NavClick {
        section: String,
    },
    /// JSON from an inline `<script id="effects-settings">` block.
    Settings(String),
    Unload,
}

#[derive(Default)]
struct QueuedMessages {
    /// Newest scroll snapshot only; bursts between frames collapse into one.
    scroll: Option<ScrollSnapshot>,
    layout: Option<Vec<ContainerInfo>>,
    ordered: Vec<PageMessage>,
}

/// Queue shared between DOM callbacks and the Bevy frame.
#[derive(Resource, Clone, Default)]
pub struct PageMessageQueue(Arc<Mutex<QueuedMessages>>);

impl PageMessageQueue {
    pub fn push(&self, message: PageMessage) {
        let Ok(mut queue) = self.0.lock() else {
            return;
        };
        match message {
            PageMessage::Scroll(snapshot) => queue.scroll = Some(snapshot),
            PageMessage::Layout(containers) => queue.layout = Some(containers),
            other => queue.ordered.push(other),
        }
    }

    /// Take everything queued since the last frame. Layout comes first so scroll
    /// effects computed this frame see the fresh container rectangles.
    pub fn drain(&self) -> Vec<PageMessage> {
        let Ok(mut queue) = self.0.lock() else {
            return Vec::new();
        };
        let mut messages = Vec::with_capacity(queue.ordered.len() + 2);
        if let Some(layout) = queue.layout.take() {
            messages.push(PageMessage::Layout(layout));
        }
        messages.append(&mut queue.ordered);
        if let Some(snapshot) = queue.scroll.take() {
            messages.push(PageMessage::Scroll(snapshot));
        }
        messages
    }
}

#[derive(Event, Debug, Clone)]
pub struct ScrollFrameEvent(pub ScrollSnapshot);

#[derive(Event, Debug, Clone, Copy)]
pub struct VisibilityEvent {
    pub element: usize,
    pub role: SectionRole,
    pub ratio: f32,
}

#[derive(Event, Debug, Clone)]
pub struct NavClickEvent {
    pub section: String,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct PageUnloadEvent;

/// Plugin wiring the page queue, typed events and the DOM flush.
pub struct PageBridgePlugin;

impl Plugin for PageBridgePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PageMessageQueue>()
            .init_resource::<DomWriter>()
            .init_resource::<PageLayout>()
            .add_event::<ScrollFrameEvent>()
            .add_event::<VisibilityEvent>()
            .add_event::<NavClickEvent>()
            .add_event::<PageUnloadEvent>()
            .add_systems(PreUpdate, process_page_messages)
            .add_systems(Last, flush_dom_writes);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, crate::page::listeners::register_page_listeners);

        #[cfg(not(target_arch = "wasm32"))]
        app.add_systems(Startup, seed_native_layout);
    }
}

/// Turn queued page messages into typed events.
fn process_page_messages(
    queue: Res<PageMessageQueue>,
    mut layout: ResMut<PageLayout>,
    mut settings: ResMut<EffectsSettings>,
    mut settings_loader: ResMut<SettingsLoader>,
    mut scroll_events: EventWriter<ScrollFrameEvent>,
    mut visibility_events: EventWriter<VisibilityEvent>,
    mut nav_events: EventWriter<NavClickEvent>,
    mut unload_events: EventWriter<PageUnloadEvent>,
) {
    for message in queue.drain() {
        match message {
            PageMessage::Layout(containers) => layout.replace(containers),
            PageMessage::Scroll(snapshot) => {
                scroll_events.write(ScrollFrameEvent(snapshot));
            }
            PageMessage::Visibility {
                element,
                role,
                ratio,
            } => {
                visibility_events.write(VisibilityEvent {
                    element,
                    role,
                    ratio: ratio.clamp(0.0, 1.0),
                });
            }
            PageMessage::NavClick { section } => {
                nav_events.write(NavClickEvent { section });
            }
            PageMessage::Settings(json) => match EffectsSettings::from_json_str(&json) {
                Ok(inline) => {
                    info!("Applied inline effects settings");
                    *settings = inline;
                    settings_loader.inline_applied = true;
                }
                Err(e) => warn!("Ignoring inline effects settings: {}", e),
            },
            PageMessage::Unload => {
                unload_events.write(PageUnloadEvent);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn seed_native_layout(
    windows: Query<&Window, With<bevy::window::PrimaryWindow>>,
    queue: Res<PageMessageQueue>,
) {
    let (width, height) = windows
        .single()
        .map(|w| (w.width(), w.height()))
        .unwrap_or((1280.0, 720.0));

    let demo = PageLayout::demo(width, height);
    queue.push(PageMessage::Layout(
        demo.sorted().into_iter().cloned().collect(),
    ));
    queue.push(PageMessage::Scroll(ScrollSnapshot {
        scroll_y: 0.0,
        viewport_height: height,
        document_height: height,
        sections: Vec::new(),
        journey: None,
    }));
}
