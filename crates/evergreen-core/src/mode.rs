//! Display mode and focus selection.

use std::fmt;

use rand::prelude::*;

use crate::particle::{ParticleId, ParticleKind, ParticleRegistry};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Tree,
    Scatter,
    Focus,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::Scatter => "scatter",
            Self::Focus => "focus",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tree" => Some(Self::Tree),
            "scatter" => Some(Self::Scatter),
            "focus" => Some(Self::Focus),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owns the current mode and the focused particle.
///
/// Any mode can be entered from any other. Leaving [`Mode::Focus`] always
/// drops the selection so the next entry rolls a fresh photo.
pub struct ModeController {
    mode: Mode,
    focus: Option<ParticleId>,
    rng: StdRng,
    warned_no_photo: bool,
}

impl ModeController {
    pub fn new(mode: Mode, seed: u64) -> Self {
        Self {
            mode,
            focus: None,
            rng: StdRng::seed_from_u64(seed),
            warned_no_photo: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Only ever `Some` while the mode is [`Mode::Focus`].
    pub fn focus(&self) -> Option<ParticleId> {
        self.focus
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if mode == self.mode {
            return;
        }
        log::info!("[mode] {} -> {}", self.mode, mode);
        if mode != Mode::Focus {
            self.focus = None;
            self.warned_no_photo = false;
        }
        self.mode = mode;
    }

    /// Enter focus mode framing `id` directly, bypassing random selection.
    ///
    /// Only photos can be framed; any other id is ignored and `false` returned.
    pub fn focus_on(&mut self, id: ParticleId, registry: &ParticleRegistry) -> bool {
        match registry.get(id).map(|p| p.kind()) {
            Some(ParticleKind::Photo) => {
                self.set_mode(Mode::Focus);
                log::debug!("[focus] framing {}", id);
                self.focus = Some(id);
                true
            }
            Some(kind) => {
                log::warn!("[focus] {} is {}, not a photo; ignored", id, kind.as_str());
                false
            }
            None => {
                log::warn!("[focus] unknown particle {}; ignored", id);
                false
            }
        }
    }

    /// Pick a photo to frame if focus mode has none yet.
    pub fn resolve(&mut self, registry: &ParticleRegistry) {
        if self.mode != Mode::Focus || self.focus.is_some() {
            return;
        }
        let photos: Vec<ParticleId> = registry.photos().collect();
        match photos.choose(&mut self.rng) {
            Some(&id) => {
                log::debug!("[focus] selected {} of {} photos", id, photos.len());
                self.focus = Some(id);
            }
            None => {
                if !self.warned_no_photo {
                    log::warn!("[focus] no photo to frame; background only");
                    self.warned_no_photo = true;
                }
            }
        }
    }
}
