//! Scene sequencing
//!
//! A [`Timeline`] lays scenes end to end and answers, for any global frame, which scenes are
//! on screen, what their local frame is, and whether a transition overlay is running.
//!
//! Scene `i` starts at `start[i] = start[i-1] + duration[i-1] + hold[i-1]`. With a transition
//! of length `T`, each boundary `b = start[i] + duration[i]` gets an overlay window
//! `[b - T, b + T)`, and the outgoing scene stays mounted until the incoming one has started
//! and the overlay has fully covered it.
//!
//! ```rust
//! use reel_animation::{Timeline, Transition};
//!
//! let timeline = Timeline::builder()
//!     .scene("intro", 90)
//!     .scene("feature", 90)
//!     .hold(5)
//!     .scene("outro", 90)
//!     .transition(Transition::fade(5))
//!     .build()?;
//!
//! assert_eq!(timeline.total_duration(), 275);
//! let at = timeline.resolve(100);
//! assert_eq!(at.primary().map(|s| *s.scene), Some("feature"));
//! assert_eq!(at.primary().map(|s| s.local_frame), Some(10));
//! # Ok::<(), reel_animation::AnimationError>(())
//! ```

use reel_core::Frame;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{AnimationError, Result};
use crate::interpolate::Interpolation;

/// Shape of the overlay drawn across a scene boundary
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Overlay fades in over the first half of the window and stays opaque
    #[default]
    Fade,
    /// Overlay fades in to the boundary, then back out
    Dip,
}

/// Overlay applied at every scene boundary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Half the overlay window, in frames
    pub length: Frame,
    #[serde(default)]
    pub kind: TransitionKind,
}

impl Transition {
    pub fn fade(length: Frame) -> Self {
        Self {
            length,
            kind: TransitionKind::Fade,
        }
    }

    pub fn dip(length: Frame) -> Self {
        Self {
            length,
            kind: TransitionKind::Dip,
        }
    }

    fn opacity_curve(&self) -> Result<Interpolation> {
        let t = self.length as f32;
        Ok(match self.kind {
            TransitionKind::Fade => Interpolation::new(&[0.0, t], &[0.0, 1.0])?.clamp(),
            TransitionKind::Dip => {
                Interpolation::new(&[0.0, t, 2.0 * t], &[0.0, 1.0, 0.0])?.clamp()
            }
        })
    }
}

#[derive(Clone, Debug)]
struct Entry<S> {
    scene: S,
    start: Frame,
    duration: Frame,
    hold: Frame,
    /// Exclusive end of the frames this scene is on screen
    mounted_until: Frame,
}

/// A scene on screen at a resolved frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveScene<'a, S> {
    pub index: usize,
    pub scene: &'a S,
    /// Frame relative to the scene's start; negative before it
    pub local_frame: Frame,
}

/// The overlay running at a resolved frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActiveTransition {
    /// Index of the outgoing scene
    pub after: usize,
    pub kind: TransitionKind,
    /// Frame relative to the start of the overlay window
    pub local_frame: Frame,
    pub opacity: f32,
}

/// Everything on screen at one global frame
#[derive(Clone, Debug, PartialEq)]
pub struct Resolved<'a, S> {
    /// Active scenes in start order
    pub scenes: SmallVec<[ActiveScene<'a, S>; 2]>,
    pub transition: Option<ActiveTransition>,
}

impl<'a, S> Resolved<'a, S> {
    /// The latest-starting active scene, which carries the main content
    pub fn primary(&self) -> Option<&ActiveScene<'a, S>> {
        self.scenes.last()
    }
}

/// Builder for [`Timeline`]
#[derive(Clone, Debug)]
pub struct TimelineBuilder<S> {
    entries: Vec<(S, Frame, Frame)>,
    leading_hold: Frame,
    transition: Option<Transition>,
}

impl<S> Default for TimelineBuilder<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            leading_hold: 0,
            transition: None,
        }
    }
}

impl<S> TimelineBuilder<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scene lasting `duration` frames
    pub fn scene(mut self, scene: S, duration: Frame) -> Self {
        self.entries.push((scene, duration, 0));
        self
    }

    /// Keep the last added scene on screen for `frames` more frames before the next one starts
    pub fn hold(mut self, frames: Frame) -> Self {
        match self.entries.last_mut() {
            Some((_, _, hold)) => *hold += frames,
            None => self.leading_hold += frames,
        }
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = Some(transition);
        self
    }

    pub fn build(self) -> Result<Timeline<S>> {
        if self.entries.is_empty() {
            return Err(AnimationError::EmptyTimeline);
        }
        if self.leading_hold != 0 {
            return Err(AnimationError::InvalidDuration {
                what: "hold before the first scene",
                frames: self.leading_hold,
            });
        }

        let transition = match self.transition {
            Some(t) if t.length < 0 => {
                return Err(AnimationError::InvalidDuration {
                    what: "transition length",
                    frames: t.length,
                })
            }
            Some(t) if t.length > 0 => Some(t),
            _ => None,
        };
        let overlap = transition.map_or(0, |t| t.length);

        for (index, (_, duration, hold)) in self.entries.iter().enumerate() {
            if *duration <= 0 {
                return Err(AnimationError::InvalidDuration {
                    what: "scene duration",
                    frames: *duration,
                });
            }
            if *hold < 0 {
                return Err(AnimationError::InvalidDuration {
                    what: "hold",
                    frames: *hold,
                });
            }
            if index == 0 && *duration < overlap {
                return Err(AnimationError::TransitionTooLong {
                    index,
                    length: overlap,
                });
            }
        }

        // Adjacent overlay windows must not overlap, and the last one must end in time
        let last = self.entries.len() - 1;
        for index in 0..last {
            let room = self.entries[index].2 + self.entries[index + 1].1;
            let needed = if index + 1 == last { overlap } else { 2 * overlap };
            if room < needed {
                return Err(AnimationError::TransitionTooLong {
                    index: index + 1,
                    length: overlap,
                });
            }
        }

        let mut entries = Vec::with_capacity(self.entries.len());
        let mut start = 0;
        for (scene, duration, hold) in self.entries {
            entries.push(Entry {
                scene,
                start,
                duration,
                hold,
                mounted_until: 0,
            });
            start += duration + hold;
        }
        let total = start;

        let next_starts: Vec<Frame> = entries.iter().skip(1).map(|e| e.start).collect();
        for (index, entry) in entries.iter_mut().enumerate() {
            entry.mounted_until = match next_starts.get(index) {
                Some(&next) => next.max(entry.start + entry.duration + overlap),
                None => total,
            };
        }

        let overlay = match transition {
            Some(t) => Some((t, t.opacity_curve()?)),
            None => None,
        };

        tracing::debug!(
            "Built timeline: {} scenes, {} frames, transition {:?}",
            entries.len(),
            total,
            transition
        );

        Ok(Timeline {
            entries,
            total,
            overlay,
        })
    }
}

/// An immutable, validated sequence of scenes
#[derive(Clone, Debug)]
pub struct Timeline<S> {
    entries: Vec<Entry<S>>,
    total: Frame,
    overlay: Option<(Transition, Interpolation)>,
}

impl<S> Timeline<S> {
    pub fn builder() -> TimelineBuilder<S> {
        TimelineBuilder::new()
    }

    /// Sum of every scene's duration and hold
    pub fn total_duration(&self) -> Frame {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn transition(&self) -> Option<Transition> {
        self.overlay.as_ref().map(|(t, _)| *t)
    }

    /// Start frame of scene `index`
    pub fn start(&self, index: usize) -> Option<Frame> {
        self.entries.get(index).map(|e| e.start)
    }

    /// `(start, duration, hold, scene)` for every scene in order
    pub fn scenes(&self) -> impl Iterator<Item = (Frame, Frame, Frame, &S)> {
        self.entries
            .iter()
            .map(|e| (e.start, e.duration, e.hold, &e.scene))
    }

    /// Resolve a global frame into the scenes and overlay on screen
    pub fn resolve(&self, frame: Frame) -> Resolved<'_, S> {
        let mut scenes = SmallVec::new();

        if frame < 0 {
            scenes.push(self.active(0, frame));
            return Resolved {
                scenes,
                transition: None,
            };
        }
        if frame >= self.total {
            scenes.push(self.active(self.entries.len() - 1, frame));
            return Resolved {
                scenes,
                transition: None,
            };
        }

        for (index, entry) in self.entries.iter().enumerate() {
            if entry.start > frame {
                break;
            }
            if frame < entry.mounted_until {
                scenes.push(self.active(index, frame));
            }
        }

        Resolved {
            scenes,
            transition: self.active_transition(frame),
        }
    }

    fn active(&self, index: usize, frame: Frame) -> ActiveScene<'_, S> {
        let entry = &self.entries[index];
        ActiveScene {
            index,
            scene: &entry.scene,
            local_frame: frame.saturating_sub(entry.start),
        }
    }

    fn active_transition(&self, frame: Frame) -> Option<ActiveTransition> {
        let (transition, curve) = self.overlay.as_ref()?;
        let t = transition.length;
        let last = self.entries.len() - 1;
        self.entries[..last]
            .iter()
            .enumerate()
            .find_map(|(after, entry)| {
                let boundary = entry.start + entry.duration;
                if frame < boundary - t || frame >= boundary + t {
                    return None;
                }
                let local_frame = frame - (boundary - t);
                Some(ActiveTransition {
                    after,
                    kind: transition.kind,
                    local_frame,
                    opacity: curve.sample(local_frame as f32),
                })
            })
    }
}
