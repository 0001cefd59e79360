// view/ - Page sequencing
//
// Intro -> Transitioning -> FormActive, one way only. Timed transitions
// run on a cancellable dwell; the host either feeds elapsed time through
// `advance` or fires the dwell from its own timer via `expire`.

mod dwell;

pub use dwell::Dwell;

use std::fmt;
use std::time::Duration;

use crate::config::Config;
use crate::studio::Studio;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Intro,
    Transitioning,
    FormActive,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Intro => "intro",
            Phase::Transitioning => "transitioning",
            Phase::FormActive => "form",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Generate,
    Wardrobe,
}

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Generate => "generate",
            Tab::Wardrobe => "wardrobe",
        }
    }

    pub fn parse(s: &str) -> Option<Tab> {
        match s {
            "generate" => Some(Tab::Generate),
            "wardrobe" => Some(Tab::Wardrobe),
            _ => None,
        }
    }
}

/// Side effects the host performs on a phase change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Entered Transitioning: play the full-screen light sweep.
    LightSweep,
    /// Entered FormActive: stop intro ambience.
    StopAmbientAudio,
}

impl Effect {
    pub fn as_str(self) -> &'static str {
        match self {
            Effect::LightSweep => "light-sweep",
            Effect::StopAmbientAudio => "stop-ambient-audio",
        }
    }

    /// Phase the sequencer is in once this effect is emitted.
    pub fn phase(self) -> Phase {
        match self {
            Effect::LightSweep => Phase::Transitioning,
            Effect::StopAmbientAudio => Phase::FormActive,
        }
    }
}

pub struct Sequencer {
    phase: Phase,
    tab: Tab,
    dwell: Dwell,
    transition_dwell: f32,
    torn_down: bool,
    studio: Studio,
}

impl Sequencer {
    pub fn new(config: &Config) -> Self {
        let mut dwell = Dwell::idle();
        if config.auto_enter {
            dwell.start(config.intro_dwell);
        }
        Self {
            phase: Phase::Intro,
            tab: Tab::Generate,
            dwell,
            transition_dwell: config.transition_dwell,
            torn_down: false,
            studio: Studio::new(config),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    /// Switch tabs; only meaningful once the form is showing.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        if self.phase != Phase::FormActive || self.torn_down {
            return false;
        }
        self.tab = tab;
        true
    }

    /// Explicit "enter" from the intro screen. Skips the intro dwell.
    pub fn enter(&mut self) -> Option<Effect> {
        if self.phase != Phase::Intro || self.torn_down {
            return None;
        }
        self.dwell.cancel();
        self.step()
    }

    /// Feed `dt` seconds of elapsed time. A large `dt` may cross several
    /// dwells; effects come back in order.
    pub fn advance(&mut self, dt: f32) -> Vec<Effect> {
        let mut effects = Vec::new();
        let mut dt = dt;
        while let Some(left) = self.dwell.consume(dt) {
            effects.extend(self.step());
            dt = left;
        }
        effects
    }

    /// The current dwell elapsed on an external timer.
    pub fn expire(&mut self) -> Option<Effect> {
        if !self.dwell.is_armed() {
            return None;
        }
        self.dwell.cancel();
        self.step()
    }

    /// Time left before the next automatic transition, if one is pending.
    pub fn dwell_remaining(&self) -> Option<Duration> {
        self.dwell.remaining().and_then(|secs| Duration::try_from_secs_f32(secs).ok())
    }

    /// Disarm pending transitions for good. Used when the view unmounts.
    pub fn teardown(&mut self) {
        self.dwell.cancel();
        self.studio.close();
        self.torn_down = true;
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn studio(&self) -> &Studio {
        &self.studio
    }

    pub fn studio_mut(&mut self) -> &mut Studio {
        &mut self.studio
    }

    fn step(&mut self) -> Option<Effect> {
        let effect = match self.phase {
            Phase::Intro => {
                self.phase = Phase::Transitioning;
                self.dwell.start(self.transition_dwell);
                Effect::LightSweep
            }
            Phase::Transitioning => {
                self.phase = Phase::FormActive;
                self.tab = Tab::Generate;
                Effect::StopAmbientAudio
            }
            Phase::FormActive => return None,
        };
        log::info!("view -> {} ({})", self.phase, effect.as_str());
        Some(effect)
    }
}
