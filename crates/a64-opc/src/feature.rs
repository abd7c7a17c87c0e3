//! Architecture extensions and CPU feature sets.

use std::fmt;

/// An optional AArch64 architecture extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Feature {
    /// Armv8.0-A base instruction set.
    V8,
    /// Scalar floating point.
    Fp,
    /// Advanced SIMD.
    Simd,
    /// CRC32 instructions.
    Crc,
    /// Large System Extensions (atomics).
    Lse,
    /// Privileged Access Never.
    Pan,
    /// Armv8.2-A.
    V8_2A,
    /// Armv8.4-A.
    V8_4A,
    /// Armv8.8-A.
    V8_8A,
    /// Speculative Store Bypass Safe.
    Ssbs,
    /// Memory Tagging Extension.
    Memtag,
    /// Transactional Memory Extension.
    Tme,
    /// Release-consistent processor-consistent loads, version 3.
    Rcpc3,
    /// Common Short Sequence Compression.
    Cssc,
    /// Memory copy and memory set instructions.
    Mops,
    /// Scalable Vector Extension.
    Sve,
    /// Scalable Vector Extension 2.
    Sve2,
    /// Scalable Matrix Extension.
    Sme,
    /// Scalable Matrix Extension 2.
    Sme2,
    /// SME double-precision outer products.
    SmeF64F64,
    /// SME 16-bit to 64-bit integer outer products.
    SmeI16I64,
}

impl Feature {
    /// Every extension.
    pub const ALL: [Feature; 21] = [
        Feature::V8,
        Feature::Fp,
        Feature::Simd,
        Feature::Crc,
        Feature::Lse,
        Feature::Pan,
        Feature::V8_2A,
        Feature::V8_4A,
        Feature::V8_8A,
        Feature::Ssbs,
        Feature::Memtag,
        Feature::Tme,
        Feature::Rcpc3,
        Feature::Cssc,
        Feature::Mops,
        Feature::Sve,
        Feature::Sve2,
        Feature::Sme,
        Feature::Sme2,
        Feature::SmeF64F64,
        Feature::SmeI16I64,
    ];

    /// Lowercase extension name, as accepted by `-march=...+name`.
    pub fn name(self) -> &'static str {
        match self {
            Feature::V8 => "v8",
            Feature::Fp => "fp",
            Feature::Simd => "simd",
            Feature::Crc => "crc",
            Feature::Lse => "lse",
            Feature::Pan => "pan",
            Feature::V8_2A => "v8.2a",
            Feature::V8_4A => "v8.4a",
            Feature::V8_8A => "v8.8a",
            Feature::Ssbs => "ssbs",
            Feature::Memtag => "memtag",
            Feature::Tme => "tme",
            Feature::Rcpc3 => "rcpc3",
            Feature::Cssc => "cssc",
            Feature::Mops => "mops",
            Feature::Sve => "sve",
            Feature::Sve2 => "sve2",
            Feature::Sme => "sme",
            Feature::Sme2 => "sme2",
            Feature::SmeF64F64 => "sme-f64f64",
            Feature::SmeI16I64 => "sme-i16i64",
        }
    }

    const fn bit(self) -> u64 {
        1u64 << (self as u8)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`Feature`]s, used both for what an opcode requires and for what
/// a CPU provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureSet(u64);

impl FeatureSet {
    /// No extensions at all.
    pub const EMPTY: FeatureSet = FeatureSet(0);

    /// Armv8.0-A with FP and Advanced SIMD.
    pub const fn base() -> Self {
        FeatureSet(Feature::V8.bit() | Feature::Fp.bit() | Feature::Simd.bit())
    }

    /// Every known extension.
    pub const fn all() -> Self {
        FeatureSet((1u64 << Feature::ALL.len()) - 1)
    }

    /// Exactly one extension.
    pub const fn only(feature: Feature) -> Self {
        FeatureSet(feature.bit())
    }

    /// This set plus `feature`.
    #[must_use]
    pub const fn with(self, feature: Feature) -> Self {
        FeatureSet(self.0 | feature.bit())
    }

    /// This set minus `feature`.
    #[must_use]
    pub const fn without(self, feature: Feature) -> Self {
        FeatureSet(self.0 & !feature.bit())
    }

    /// Union of two sets.
    #[must_use]
    pub const fn union(self, other: FeatureSet) -> Self {
        FeatureSet(self.0 | other.0)
    }

    /// Whether `feature` is in the set.
    pub const fn has(self, feature: Feature) -> bool {
        self.0 & feature.bit() != 0
    }

    /// Whether every member of `other` is in this set.
    pub const fn has_all(self, other: FeatureSet) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether any member of `other` is in this set.
    pub const fn has_any(self, other: FeatureSet) -> bool {
        self.0 & other.0 != 0
    }

    /// The set is empty.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Feature> {
        Feature::ALL.into_iter().filter(move |f| self.has(*f))
    }
}

impl FromIterator<Feature> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        iter.into_iter().fold(FeatureSet::EMPTY, FeatureSet::with)
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for feat in self.iter() {
            if !first {
                f.write_str("+")?;
            }
            first = false;
            f.write_str(feat.name())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let cpu = FeatureSet::base().with(Feature::Sve);
        assert!(cpu.has(Feature::Sve));
        assert!(cpu.has(Feature::V8));
        assert!(!cpu.has(Feature::Sme));
        assert!(cpu.has_all(FeatureSet::only(Feature::Sve)));
        assert!(!cpu.without(Feature::Sve).has(Feature::Sve));
    }

    #[test]
    fn all_covers_every_feature() {
        let all = FeatureSet::all();
        assert!(Feature::ALL.iter().all(|f| all.has(*f)));
        assert_eq!(all.iter().count(), Feature::ALL.len());
    }

    #[test]
    fn display_joins_names() {
        let set: FeatureSet = [Feature::V8, Feature::Sve2].into_iter().collect();
        assert_eq!(set.to_string(), "v8+sve2");
        assert_eq!(FeatureSet::EMPTY.to_string(), "");
    }
}
