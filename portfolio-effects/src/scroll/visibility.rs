use crate::page::dom_writer::{DomTarget, DomWriter, ElementPart};
use crate::page::web_bridge::{SectionRole, VisibilityEvent};
use bevy::prelude::*;
use constants::scroll::{
    HERO_PARALLAX_TRAVEL_PX, SKILL_SCALE_GAIN, SKILL_VISIBLE_RATIO, TIMELINE_OPACITY_GAIN,
    TIMELINE_VISIBLE_RATIO, VISIBLE_CLASS,
};

pub fn timeline_opacity(ratio: f32) -> f32 {
    (ratio * TIMELINE_OPACITY_GAIN).min(1.0)
}

pub fn skill_transform(ratio: f32) -> String {
    let scale = (ratio * SKILL_SCALE_GAIN).min(1.0);
    format!("scale({}) rotateY({}deg)", scale, ratio * 360.0)
}

pub fn hero_offset_px(ratio: f32) -> f32 {
    (1.0 - ratio) * HERO_PARALLAX_TRAVEL_PX
}

fn part(element: usize, part: ElementPart) -> DomTarget {
    DomTarget::Observed { element, part }
}

pub fn animate_timeline_item(writer: &mut DomWriter, element: usize, ratio: f32) {
    if ratio > TIMELINE_VISIBLE_RATIO {
        writer.set_class(part(element, ElementPart::Itself), VISIBLE_CLASS, true);
        let opacity = timeline_opacity(ratio).to_string();
        writer.set_style(part(element, ElementPart::Stage3d), "opacity", opacity.clone());
        writer.set_style(part(element, ElementPart::TimelineContent), "opacity", opacity);
    } else {
        writer.set_class(part(element, ElementPart::Itself), VISIBLE_CLASS, false);
    }
}

/// Badges only ever animate in; dropping below the threshold leaves them as they were.
pub fn animate_skill_item(writer: &mut DomWriter, element: usize, ratio: f32) {
    if ratio <= SKILL_VISIBLE_RATIO {
        return;
    }
    writer.set_class(part(element, ElementPart::Itself), VISIBLE_CLASS, true);
    writer.set_style(part(element, ElementPart::Skill3d), "transform", skill_transform(ratio));
    writer.set_style(part(element, ElementPart::Skill3d), "opacity", ratio.to_string());
}

pub fn animate_hero(writer: &mut DomWriter, element: usize, ratio: f32) {
    writer.set_style(
        part(element, ElementPart::Hero3d),
        "transform",
        format!("translateY({}px)", hero_offset_px(ratio)),
    );
    writer.set_style(part(element, ElementPart::HeroContent), "opacity", ratio.to_string());
}

pub fn apply_visibility_effects(mut events: EventReader<VisibilityEvent>, mut writer: ResMut<DomWriter>) {
    for event in events.read() {
        match event.role {
            SectionRole::TimelineEntry => animate_timeline_item(&mut writer, event.element, event.ratio),
            SectionRole::SkillBadge => animate_skill_item(&mut writer, event.element, event.ratio),
            SectionRole::HeroBanner => animate_hero(&mut writer, event.element, event.ratio),
        }
    }
}
