use std::fmt;
use std::sync::Arc;

/// A function mapping the normalized position `t ∈ [0, 1]` along a ribbon to a width multiplier.
///
/// The profile is evaluated once per centerline point when the ribbon is built, never when it
/// is advanced. Cloning is cheap: the underlying closure is shared.
#[derive(Clone)]
pub struct WidthProfile(Arc<dyn Fn(f32) -> f32 + Send + Sync>);

impl WidthProfile {
    /// Wraps an arbitrary closure.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(f32) -> f32 + Send + Sync + 'static,
    {
        WidthProfile(Arc::new(f))
    }

    /// A profile returning `width` everywhere.
    pub fn constant(width: f32) -> Self {
        Self::from_fn(move |_| width)
    }

    /// A profile interpolating linearly from `start` at `t = 0` to `end` at `t = 1`.
    pub fn linear(start: f32, end: f32) -> Self {
        Self::from_fn(move |t| start + (end - start) * t)
    }

    /// A profile shrinking from 1 to 0, useful for trails.
    pub fn taper() -> Self {
        Self::linear(1.0, 0.0)
    }

    /// Evaluates the profile at `t`.
    #[inline]
    pub fn eval(&self, t: f32) -> f32 {
        (self.0)(t)
    }
}

impl fmt::Debug for WidthProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("WidthProfile(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_profiles() {
        assert_eq!(WidthProfile::constant(3.0).eval(0.7), 3.0);
        assert_eq!(WidthProfile::linear(2.0, 4.0).eval(0.5), 3.0);
        assert_eq!(WidthProfile::taper().eval(0.0), 1.0);
        assert_eq!(WidthProfile::taper().eval(1.0), 0.0);
    }

    #[test]
    fn test_from_closure() {
        let profile = WidthProfile::from_fn(|t| t * t);
        assert_eq!(profile.eval(0.5), 0.25);
    }
}
