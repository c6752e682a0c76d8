use crate::engine::core::settings::EffectsSettings;
use crate::page::dom_writer::{DomTarget, DomWriter};
use crate::page::geometry::SectionBounds;
use crate::page::web_bridge::{NavClickEvent, ScrollFrameEvent};
use bevy::prelude::*;
use constants::scroll::{NAV_ACTIVE_CLASS, NAV_LINK_SELECTOR};

/// Which nav link is active, and until when a click keeps scrolling from moving it.
#[derive(Resource, Default, Debug)]
pub struct NavHighlight {
    active: Option<String>,
    pinned_until: Option<f64>,
}

impl NavHighlight {
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_pinned(&self, now: f64) -> bool {
        self.pinned_until.is_some_and(|until| now < until)
    }

    /// Activate `section` straight away and hold it for `cooldown` seconds.
    /// Returns the section when the active link changed.
    pub fn click(&mut self, section: &str, now: f64, cooldown: f64) -> Option<String> {
        self.pinned_until = Some(now + cooldown);
        self.activate(section)
    }

    /// Follow the section under `probe` unless a recent click pinned the highlight.
    pub fn on_scroll(&mut self, probe: f32, sections: &[SectionBounds], now: f64) -> Option<String> {
        if self.is_pinned(now) {
            return None;
        }
        self.pinned_until = None;
        let section = section_at(probe, sections)?;
        self.activate(section)
    }

    fn activate(&mut self, section: &str) -> Option<String> {
        if self.active.as_deref() == Some(section) {
            return None;
        }
        self.active = Some(section.to_string());
        self.active.clone()
    }
}

pub fn probe_point(scroll_y: f32, viewport_height: f32, fraction: f32) -> f32 {
    scroll_y + viewport_height * fraction
}

/// Section spanning `probe`. When sections overlap the last one in document order wins.
pub fn section_at(probe: f32, sections: &[SectionBounds]) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|s| s.contains(probe))
        .map(|s| s.id.as_str())
}

fn mark_active_link(writer: &mut DomWriter, section: &str) {
    writer.clear_class(NAV_LINK_SELECTOR, NAV_ACTIVE_CLASS);
    writer.set_class(
        DomTarget::Selector(format!(".nav-links a[href=\"#{section}\"]")),
        NAV_ACTIVE_CLASS,
        true,
    );
}

/// The click pin runs on wall-clock time; virtual time is clamped on slow frames.
pub fn update_nav_highlight(
    time: Res<Time<Real>>,
    mut clicks: EventReader<NavClickEvent>,
    mut scrolls: EventReader<ScrollFrameEvent>,
    settings: Res<EffectsSettings>,
    mut nav: ResMut<NavHighlight>,
    mut writer: ResMut<DomWriter>,
) {
    let now = time.elapsed_secs_f64();

    for click in clicks.read() {
        if let Some(section) = nav.click(&click.section, now, settings.nav_click_cooldown_secs) {
            mark_active_link(&mut writer, &section);
        }
    }

    if let Some(ScrollFrameEvent(snapshot)) = scrolls.read().last() {
        let probe = probe_point(
            snapshot.scroll_y,
            snapshot.viewport_height,
            settings.nav_probe_fraction,
        );
        if let Some(section) = nav.on_scroll(probe, &snapshot.sections, now) {
            debug!("Nav highlight → {}", section);
            mark_active_link(&mut writer, &section);
        }
    }
}
