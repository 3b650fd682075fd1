use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::shape::ShapeKind;

/// Supplies the shape of each newly spawned piece.
///
/// The board draws from a `ShapeSource` instead of a global generator, so tests
/// can script the exact sequence of shapes.
pub trait ShapeSource: fmt::Debug + Send {
    fn next_shape(&mut self) -> ShapeKind;
}

/// Uniformly random shapes from a seeded `Pcg32` generator.
///
/// Each draw is independent: any of the seven shapes is equally likely, with no
/// bag or history.
///
/// # Example
///
/// ```
/// use blockfall_engine::{RandomShapes, ShapeSeed, ShapeSource as _};
///
/// let seed: ShapeSeed = "000102030405060708090a0b0c0d0e0f".parse().unwrap();
/// let mut a = RandomShapes::with_seed(seed);
/// let mut b = RandomShapes::with_seed(seed);
///
/// for _ in 0..10 {
///     assert_eq!(a.next_shape(), b.next_shape());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RandomShapes {
    seed: ShapeSeed,
    rng: Pcg32,
}

impl Default for RandomShapes {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomShapes {
    /// Creates a source with a seed from the thread-local generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but reproducible.
    #[must_use]
    pub fn with_seed(seed: ShapeSeed) -> Self {
        Self {
            seed,
            rng: Pcg32::from_seed(seed.0),
        }
    }

    /// The seed this source was created from.
    #[must_use]
    pub fn seed(&self) -> ShapeSeed {
        self.seed
    }
}

impl ShapeSource for RandomShapes {
    fn next_shape(&mut self) -> ShapeKind {
        self.rng.random()
    }
}

/// Replays a fixed list of shapes, starting over after the last one.
#[derive(Debug, Clone)]
pub struct ScriptedShapes {
    shapes: Vec<ShapeKind>,
    next: usize,
}

impl ScriptedShapes {
    /// # Panics
    ///
    /// Panics if `shapes` is empty.
    pub fn new(shapes: impl IntoIterator<Item = ShapeKind>) -> Self {
        let shapes: Vec<_> = shapes.into_iter().collect();
        assert!(!shapes.is_empty(), "scripted shape list must not be empty");
        Self { shapes, next: 0 }
    }
}

impl ShapeSource for ScriptedShapes {
    fn next_shape(&mut self) -> ShapeKind {
        let shape = self.shapes[self.next];
        self.next = (self.next + 1) % self.shapes.len();
        shape
    }
}

/// 128-bit seed for [`RandomShapes`].
///
/// Formats and parses as a 32-character hex string, so a game can be replayed
/// from a seed printed in the logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeSeed([u8; 16]);

impl ShapeSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }
}

/// Error returned when parsing a [`ShapeSeed`] from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseShapeSeedError {
    #[display("invalid hex: expected 32 characters, got {len}")]
    Length { len: usize },
    #[display("invalid hex: {text}")]
    Digits { text: String },
}

impl fmt::Display for ShapeSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for ShapeSeed {
    type Err = ParseShapeSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(ParseShapeSeedError::Length { len: s.len() });
        }
        // from_str_radix accepts a leading '+', which is not a hex digit
        if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseShapeSeedError::Digits { text: s.to_owned() });
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|_| ParseShapeSeedError::Digits { text: s.to_owned() })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for ShapeSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShapeSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<ShapeSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ShapeSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        ShapeSeed(seed)
    }
}
