use bevy::prelude::*;
use constants::camera::{SKILL_CONTAINER_SIZE, TIMELINE_CONTAINER_SIZE};
use std::collections::HashMap;

/// Rectangle in CSS pixels, relative to the top-left of the browser viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PageRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PageRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// Identifies a 3D container element on the page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerKey {
    /// `.stage-3d` inside the n-th `.timeline-item`.
    TimelineStage(usize),
    /// The n-th `.skill-3d` element.
    SkillBadge(usize),
    /// `#hero-3d`.
    Hero,
}

/// A container as reported by the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerInfo {
    pub key: ContainerKey,
    pub rect: PageRect,
    /// `data-skill` on skill badges.
    pub skill: Option<String>,
    /// `data-model` override on timeline stages.
    pub model: Option<String>,
}

/// A `section[id]` in document coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f32,
    pub height: f32,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f32, height: f32) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Half-open: a probe sitting exactly on the bottom edge belongs to the next section.
    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Everything scroll effects need, captured at the moment the page scrolled.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScrollSnapshot {
    pub scroll_y: f32,
    pub viewport_height: f32,
    pub document_height: f32,
    pub sections: Vec<SectionBounds>,
    /// `.portfolio-timeline`, present only when the page has timeline items.
    pub journey: Option<SectionBounds>,
}

/// Latest known position of every 3D container on the page.
#[derive(Resource, Debug, Default, Clone)]
pub struct PageLayout {
    containers: HashMap<ContainerKey, ContainerInfo>,
}

impl PageLayout {
    pub fn from_containers(containers: impl IntoIterator<Item = ContainerInfo>) -> Self {
        let mut layout = Self::default();
        layout.replace(containers);
        layout
    }

    /// Replace the whole layout; containers missing from `containers` are forgotten.
    pub fn replace(&mut self, containers: impl IntoIterator<Item = ContainerInfo>) {
        self.containers = containers
            .into_iter()
            .map(|info| (info.key.clone(), info))
            .collect();
    }

    pub fn resolve(&self, key: &ContainerKey) -> Option<&ContainerInfo> {
        self.containers.get(key)
    }

    /// Containers in a stable order: timeline stages, skill badges, hero.
    pub fn sorted(&self) -> Vec<&ContainerInfo> {
        let mut containers: Vec<_> = self.containers.values().collect();
        containers.sort_by(|a, b| a.key.cmp(&b.key));
        containers
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Stand-in arrangement for native builds: four timeline stages down the left
    /// half of the window and three skill badges along the right edge.
    pub fn demo(window_width: f32, window_height: f32) -> Self {
        let (stage_w, stage_h) = TIMELINE_CONTAINER_SIZE;
        let (badge_w, badge_h) = SKILL_CONTAINER_SIZE;
        let stage_w = stage_w.min(window_width * 0.5) * 0.5;
        let stage_h = stage_h.min(window_height * 0.5) * 0.5;

        let stages = (0..4).map(|i| ContainerInfo {
            key: ContainerKey::TimelineStage(i),
            rect: PageRect::new(
                (i % 2) as f32 * stage_w,
                (i / 2) as f32 * stage_h,
                stage_w,
                stage_h,
            ),
            skill: None,
            model: None,
        });

        let badges = ["python", "javascript", "web"]
            .into_iter()
            .enumerate()
            .map(|(i, skill)| ContainerInfo {
                key: ContainerKey::SkillBadge(i),
                rect: PageRect::new(
                    window_width - badge_w,
                    i as f32 * badge_h,
                    badge_w,
                    badge_h,
                ),
                skill: Some(skill.to_string()),
                model: None,
            });

        Self::from_containers(stages.chain(badges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_contains_is_half_open() {
        let section = SectionBounds::new("about", 100.0, 50.0);
        assert!(section.contains(100.0));
        assert!(section.contains(149.9));
        assert!(!section.contains(150.0));
        assert!(!section.contains(99.0));
    }

    #[test]
    fn replace_forgets_removed_containers() {
        let mut layout = PageLayout::demo(1280.0, 720.0);
        assert!(layout.resolve(&ContainerKey::TimelineStage(0)).is_some());

        layout.replace([ContainerInfo {
            key: ContainerKey::Hero,
            rect: PageRect::new(0.0, 0.0, 10.0, 10.0),
            skill: None,
            model: None,
        }]);

        assert!(layout.resolve(&ContainerKey::TimelineStage(0)).is_none());
        assert!(layout.resolve(&ContainerKey::Hero).is_some());
    }

    #[test]
    fn sorted_puts_stages_before_badges() {
        let layout = PageLayout::demo(1280.0, 720.0);
        let keys: Vec<_> = layout.sorted().into_iter().map(|c| c.key.clone()).collect();
        assert_eq!(keys.first(), Some(&ContainerKey::TimelineStage(0)));
        assert_eq!(keys.last(), Some(&ContainerKey::SkillBadge(2)));
    }
}
