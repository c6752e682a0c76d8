use crate::page::dom_writer::{DomTarget, DomWriter};
use bevy::prelude::*;
use constants::scroll::PULSE_DURATION_SECS;
use std::time::Duration;

#[derive(Debug)]
struct Pulse {
    target: DomTarget,
    class: String,
    timer: Timer,
}

/// Temporary `animate-<kind>` classes waiting to be removed.
#[derive(Resource, Default, Debug)]
pub struct PulseTimers {
    active: Vec<Pulse>,
}

impl PulseTimers {
    /// Add `animate-<kind>` to `target` and remove it again after one second.
    /// Re-triggering a running pulse restarts its timer.
    pub fn trigger_animation(&mut self, writer: &mut DomWriter, target: DomTarget, kind: &str) {
        let class = format!("animate-{kind}");
        writer.set_class(target.clone(), class.clone(), true);

        if let Some(pulse) = self
            .active
            .iter_mut()
            .find(|p| p.target == target && p.class == class)
        {
            pulse.timer.reset();
            return;
        }
        self.active.push(Pulse {
            target,
            class,
            timer: Timer::from_seconds(PULSE_DURATION_SECS, TimerMode::Once),
        });
    }

    pub fn tick(&mut self, delta: Duration, writer: &mut DomWriter) {
        self.active.retain_mut(|pulse| {
            pulse.timer.tick(delta);
            if pulse.timer.finished() {
                writer.set_class(pulse.target.clone(), pulse.class.clone(), false);
                false
            } else {
                true
            }
        });
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

pub fn expire_pulses(time: Res<Time>, mut pulses: ResMut<PulseTimers>, mut writer: ResMut<DomWriter>) {
    if pulses.is_empty() {
        return;
    }
    pulses.tick(time.delta(), &mut writer);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::dom_writer::DomCommand;

    fn journey() -> DomTarget {
        DomTarget::Selector("#journey".into())
    }

    #[test]
    fn class_is_removed_after_one_second() {
        let mut pulses = PulseTimers::default();
        let mut writer = DomWriter::default();

        pulses.trigger_animation(&mut writer, journey(), "highlight");
        assert_eq!(
            writer.take(),
            vec![DomCommand::SetClass {
                target: journey(),
                class: "animate-highlight".into(),
                enabled: true,
            }]
        );

        pulses.tick(Duration::from_millis(600), &mut writer);
        assert!(writer.pending().is_empty());
        assert_eq!(pulses.len(), 1);

        pulses.tick(Duration::from_millis(400), &mut writer);
        assert_eq!(
            writer.take(),
            vec![DomCommand::SetClass {
                target: journey(),
                class: "animate-highlight".into(),
                enabled: false,
            }]
        );
        assert!(pulses.is_empty());
    }

    #[test]
    fn retrigger_restarts_the_timer() {
        let mut pulses = PulseTimers::default();
        let mut writer = DomWriter::default();

        pulses.trigger_animation(&mut writer, journey(), "highlight");
        pulses.tick(Duration::from_millis(800), &mut writer);
        pulses.trigger_animation(&mut writer, journey(), "highlight");
        pulses.tick(Duration::from_millis(800), &mut writer);

        assert_eq!(pulses.len(), 1);
        writer.take();
        pulses.tick(Duration::from_millis(200), &mut writer);
        assert!(pulses.is_empty());
        assert_eq!(writer.pending().len(), 1);
    }
}
