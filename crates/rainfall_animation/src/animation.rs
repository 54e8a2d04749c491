//! Tweens, sequences and animation sets
//!
//! An [`AnimationSet`] is the composed animation carried by one element. Every
//! child starts from the same reference time (elapsed `0`); a child's own start
//! offset delays it relative to that reference. The set's easing curve is
//! shared: each child applies it to its own normalised progress.
//!
//! Children are combined per property when sampled:
//! - translations add
//! - alphas multiply
//! - rotations add (independent rotation effects stack)
//!
//! # Example
//!
//! ```rust
//! use rainfall_animation::{AnimationSet, Easing, Property, Sequence, Tween};
//!
//! let set = AnimationSet::new(Easing::Linear)
//!     .tween(Property::TranslateY, Tween::new(-50.0, 1000.0, 1000))
//!     .sequence(Property::Rotation, Sequence::chained(250, [3.0, 6.0, 8.0, 11.0]));
//!
//! let frame = set.sample(500);
//! assert!((frame.translate_y - 475.0).abs() < 1e-3);
//! assert!((frame.rotation - 6.0).abs() < 1e-3);
//! ```

use crate::easing::Easing;
use crate::values::Interpolate;
use smallvec::SmallVec;

/// Animated property of an element
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// Vertical translation in layout units
    TranslateY,
    /// Opacity multiplier
    Alpha,
    /// Rotation in degrees
    Rotation,
}

/// A single property ramp
///
/// Before its start offset a tween reports `from`; after its end it holds `to`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Delay relative to the owning set's start (ms)
    pub start_offset_ms: u64,
    /// Duration of the ramp (ms)
    pub duration_ms: u64,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            start_offset_ms: 0,
            duration_ms,
        }
    }

    /// Delay the tween relative to the set's start
    pub fn start_offset(mut self, offset_ms: u64) -> Self {
        self.start_offset_ms = offset_ms;
        self
    }

    /// Time at which the ramp completes, relative to the set's start
    pub fn end_ms(&self) -> u64 {
        self.start_offset_ms.saturating_add(self.duration_ms)
    }

    /// Linear progress (0.0 to 1.0) at `elapsed_ms` since the set started
    pub fn progress_at(&self, elapsed_ms: u64) -> f32 {
        if elapsed_ms < self.start_offset_ms {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        let local = (elapsed_ms - self.start_offset_ms) as f32;
        (local / self.duration_ms as f32).min(1.0)
    }

    /// Eased value at `elapsed_ms` since the set started
    pub fn value_at(&self, elapsed_ms: u64, easing: Easing) -> f32 {
        Interpolate::lerp(&self.from, &self.to, easing.apply(self.progress_at(elapsed_ms)))
    }
}

/// Tweens on one property played one after another
///
/// At any time the sequence reports the value of its latest-started segment,
/// so it holds the final segment's `to` once it has finished.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sequence {
    segments: SmallVec<[Tween; 4]>,
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chain equal-length segments through `targets`, starting from zero
    ///
    /// Segment `i` runs from the previous target to `targets[i]` and starts at
    /// `i * segment_ms`, so there is no gap between segments.
    pub fn chained(segment_ms: u64, targets: impl IntoIterator<Item = f32>) -> Self {
        let mut sequence = Self::new();
        let mut start = 0.0;
        for (index, end) in targets.into_iter().enumerate() {
            sequence.segments.push(
                Tween::new(start, end, segment_ms).start_offset(segment_ms * index as u64),
            );
            start = end;
        }
        sequence
    }

    /// Append a segment
    pub fn push(&mut self, segment: Tween) {
        self.segments.push(segment);
    }

    pub fn segments(&self) -> &[Tween] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Target value of each segment, in order
    pub fn targets(&self) -> impl Iterator<Item = f32> + '_ {
        self.segments.iter().map(|segment| segment.to)
    }

    /// Time at which the last segment completes
    pub fn end_ms(&self) -> u64 {
        self.segments.iter().map(Tween::end_ms).max().unwrap_or(0)
    }

    /// Value at `elapsed_ms`, or `None` for an empty sequence
    pub fn value_at(&self, elapsed_ms: u64, easing: Easing) -> Option<f32> {
        let first = self.segments.first()?;
        let active = self
            .segments
            .iter()
            .filter(|segment| segment.start_offset_ms <= elapsed_ms)
            .max_by_key(|segment| segment.start_offset_ms);

        Some(match active {
            Some(segment) => segment.value_at(elapsed_ms, easing),
            None => first.from,
        })
    }
}

/// Sampled visual state of an element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transformation {
    pub translate_y: f32,
    pub alpha: f32,
    /// Degrees
    pub rotation: f32,
}

impl Default for Transformation {
    fn default() -> Self {
        Self {
            translate_y: 0.0,
            alpha: 1.0,
            rotation: 0.0,
        }
    }
}

impl Transformation {
    fn apply(&mut self, property: Property, value: f32) {
        match property {
            Property::TranslateY => self.translate_y += value,
            Property::Alpha => self.alpha *= value,
            Property::Rotation => self.rotation += value,
        }
    }
}

/// A group of animations played concurrently under one easing curve
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationSet {
    easing: Easing,
    lifetime_ms: Option<u64>,
    tweens: Vec<(Property, Tween)>,
    sequences: Vec<(Property, Sequence)>,
}

impl AnimationSet {
    pub fn new(easing: Easing) -> Self {
        Self {
            easing,
            ..Self::default()
        }
    }

    /// Add a tween on a property
    pub fn tween(mut self, property: Property, tween: Tween) -> Self {
        self.tweens.push((property, tween));
        self
    }

    /// Add a chained sequence on a property
    pub fn sequence(mut self, property: Property, sequence: Sequence) -> Self {
        self.sequences.push((property, sequence));
        self
    }

    /// Fix the set's total lifetime instead of deriving it from its children
    ///
    /// Children still running when the lifetime ends are cut short.
    pub fn lifetime(mut self, lifetime_ms: u64) -> Self {
        self.lifetime_ms = Some(lifetime_ms);
        self
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Tweens animating `property`
    pub fn tweens(&self, property: Property) -> impl Iterator<Item = &Tween> + '_ {
        self.tweens
            .iter()
            .filter(move |(p, _)| *p == property)
            .map(|(_, tween)| tween)
    }

    /// Sequences animating `property`
    pub fn sequences(&self, property: Property) -> impl Iterator<Item = &Sequence> + '_ {
        self.sequences
            .iter()
            .filter(move |(p, _)| *p == property)
            .map(|(_, sequence)| sequence)
    }

    /// Number of top-level children (tweens and sequences)
    pub fn child_count(&self) -> usize {
        self.tweens.len() + self.sequences.len()
    }

    /// Total duration: the fixed lifetime, or the latest child end
    pub fn duration_ms(&self) -> u64 {
        self.lifetime_ms.unwrap_or_else(|| {
            let tweens = self.tweens.iter().map(|(_, t)| t.end_ms());
            let sequences = self.sequences.iter().map(|(_, s)| s.end_ms());
            tweens.chain(sequences).max().unwrap_or(0)
        })
    }

    pub fn is_finished(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.duration_ms()
    }

    /// Combined transformation at `elapsed_ms` since the set started
    pub fn sample(&self, elapsed_ms: u64) -> Transformation {
        let elapsed_ms = elapsed_ms.min(self.duration_ms());
        let mut frame = Transformation::default();

        for (property, tween) in &self.tweens {
            frame.apply(*property, tween.value_at(elapsed_ms, self.easing));
        }
        for (property, sequence) in &self.sequences {
            if let Some(value) = sequence.value_at(elapsed_ms, self.easing) {
                frame.apply(*property, value);
            }
        }

        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        a.approx_eq(&b, 1e-3)
    }

    #[test]
    fn test_tween_fill_before_and_after() {
        let tween = Tween::new(1.0, 0.0, 1000).start_offset(500);

        assert_eq!(tween.value_at(0, Easing::Linear), 1.0);
        assert_eq!(tween.value_at(500, Easing::Linear), 1.0);
        assert!(close(tween.value_at(1000, Easing::Linear), 0.5));
        assert_eq!(tween.value_at(1500, Easing::Linear), 0.0);
        assert_eq!(tween.value_at(10_000, Easing::Linear), 0.0);
        assert_eq!(tween.end_ms(), 1500);
    }

    #[test]
    fn test_zero_duration_tween_jumps_to_end() {
        let tween = Tween::new(0.0, 10.0, 0);
        assert_eq!(tween.progress_at(0), 1.0);
        assert_eq!(tween.value_at(0, Easing::Linear), 10.0);
    }

    #[test]
    fn test_tween_uses_shared_easing() {
        let tween = Tween::new(0.0, 100.0, 1000);
        let eased = tween.value_at(500, Easing::EaseOutSlowIn);
        assert!(eased > 50.0);
    }

    #[test]
    fn test_chained_sequence_has_no_gaps() {
        let sequence = Sequence::chained(250, [2.0, 5.0, 9.0, 12.0]);

        let offsets: Vec<u64> = sequence
            .segments()
            .iter()
            .map(|s| s.start_offset_ms)
            .collect();
        assert_eq!(offsets, vec![0, 250, 500, 750]);

        for pair in sequence.segments().windows(2) {
            assert_eq!(pair[0].end_ms(), pair[1].start_offset_ms);
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_eq!(sequence.segments()[0].from, 0.0);
        assert_eq!(sequence.end_ms(), 1000);
    }

    #[test]
    fn test_sequence_value_follows_active_segment() {
        let sequence = Sequence::chained(100, [4.0, -4.0]);

        assert!(close(sequence.value_at(0, Easing::Linear).unwrap(), 0.0));
        assert!(close(sequence.value_at(50, Easing::Linear).unwrap(), 2.0));
        assert!(close(sequence.value_at(100, Easing::Linear).unwrap(), 4.0));
        assert!(close(sequence.value_at(150, Easing::Linear).unwrap(), 0.0));
        // Holds the last target afterwards
        assert!(close(sequence.value_at(500, Easing::Linear).unwrap(), -4.0));
    }

    #[test]
    fn test_empty_sequence() {
        let sequence = Sequence::new();
        assert!(sequence.is_empty());
        assert_eq!(sequence.value_at(10, Easing::Linear), None);
        assert_eq!(sequence.end_ms(), 0);
    }

    #[test]
    fn test_set_combines_channels() {
        let set = AnimationSet::new(Easing::Linear)
            .tween(Property::TranslateY, Tween::new(0.0, 100.0, 1000))
            .tween(Property::Alpha, Tween::new(1.0, 0.0, 1000))
            .sequence(Property::Rotation, Sequence::chained(500, [10.0, 20.0]))
            .sequence(Property::Rotation, Sequence::chained(500, [4.0, -4.0]));

        let frame = set.sample(500);
        assert!(close(frame.translate_y, 50.0));
        assert!(close(frame.alpha, 0.5));
        // Rotations stack: 10 + 4
        assert!(close(frame.rotation, 14.0));
        assert_eq!(set.child_count(), 4);
        assert_eq!(set.sequences(Property::Rotation).count(), 2);
    }

    #[test]
    fn test_identity_transformation() {
        let frame = AnimationSet::new(Easing::Linear).sample(100);
        assert_eq!(frame, Transformation::default());
        assert_eq!(frame.alpha, 1.0);
    }

    #[test]
    fn test_duration_derived_from_children() {
        let set = AnimationSet::new(Easing::Linear)
            .tween(Property::TranslateY, Tween::new(0.0, 1.0, 1000))
            .tween(Property::Alpha, Tween::new(1.0, 0.0, 800).start_offset(400));

        assert_eq!(set.duration_ms(), 1200);
        assert!(!set.is_finished(1199));
        assert!(set.is_finished(1200));
    }

    #[test]
    fn test_fixed_lifetime_cuts_children_short() {
        let set = AnimationSet::new(Easing::Linear)
            .tween(Property::TranslateY, Tween::new(0.0, 100.0, 1000))
            .tween(Property::Alpha, Tween::new(1.0, 0.0, 4000))
            .lifetime(1000);

        assert_eq!(set.duration_ms(), 1000);
        assert!(set.is_finished(1000));

        // Sampling past the lifetime freezes at the lifetime
        let frame = set.sample(3000);
        assert!(close(frame.translate_y, 100.0));
        assert!(close(frame.alpha, 0.75));
    }
}
