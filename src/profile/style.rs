use std::collections::BTreeMap;

use super::tables::VARK_STYLES;

/// Normalized weight per learning style, in first-encountered order.
///
/// Weights sum to 1.0 unless every weight is zero, in which case the zero map
/// is kept as-is.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleDistribution {
    weights: Vec<(String, f64)>,
}

impl StyleDistribution {
    /// `"Visual"` becomes `{Visual: 1.0}`; `"Visual-Kinesthetic"` splits into equal parts.
    pub fn from_name(name: &str) -> Self {
        let parts: Vec<&str> = name
            .split('-')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect();
        Self::from_weights(parts.into_iter().map(|part| (part, 1.0)))
    }

    pub fn from_weights<I, S>(weights: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut merged: Vec<(String, f64)> = Vec::new();
        for (style, weight) in weights {
            let style = style.into();
            let weight = if weight.is_finite() { weight.max(0.0) } else { 0.0 };
            match merged.iter_mut().find(|(name, _)| *name == style) {
                Some(entry) => entry.1 += weight,
                None => merged.push((style, weight)),
            }
        }

        let total: f64 = merged.iter().map(|(_, w)| w).sum();
        if total > 0.0 {
            for entry in merged.iter_mut() {
                entry.1 /= total;
            }
        }

        Self { weights: merged }
    }

    /// Rebuilds a distribution from a sorted map, VARK styles first in canonical order.
    pub fn from_vark_map(map: &BTreeMap<String, f64>) -> Self {
        let vark = VARK_STYLES
            .iter()
            .filter_map(|style| map.get(*style).map(|w| (style.to_string(), *w)));
        let rest = map
            .iter()
            .filter(|(style, _)| !VARK_STYLES.contains(&style.as_str()))
            .map(|(style, w)| (style.clone(), *w));
        Self::from_weights(vark.chain(rest))
    }

    pub fn vark_uniform() -> Self {
        Self::from_weights(VARK_STYLES.iter().map(|style| (*style, 1.0)))
    }

    pub fn weight_of(&self, style: &str) -> f64 {
        self.weights
            .iter()
            .find(|(name, _)| name == style)
            .map(|(_, w)| *w)
            .unwrap_or(0.0)
    }

    pub fn styles(&self) -> Vec<&str> {
        self.weights
            .iter()
            .filter(|(_, w)| *w > 0.0)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn is_multimodal(&self) -> bool {
        self.styles().len() > 1
    }

    pub fn is_empty(&self) -> bool {
        self.styles().is_empty()
    }

    pub fn primary_style(&self) -> Option<&str> {
        self.ranked().first().map(|(name, _)| *name)
    }

    pub fn secondary_style(&self) -> Option<&str> {
        self.ranked().get(1).map(|(name, _)| *name)
    }

    /// Styles with positive weight, heaviest first; ties keep encounter order.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .weights
            .iter()
            .filter(|(_, w)| *w > 0.0)
            .map(|(name, w)| (name.as_str(), *w))
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        ranked
    }

    /// Bounded L1 similarity: 1.0 for identical, 0.0 for disjoint single styles.
    pub fn similarity(&self, other: &StyleDistribution) -> f64 {
        let mut union: Vec<&str> = self.styles();
        for style in other.styles() {
            if !union.contains(&style) {
                union.push(style);
            }
        }
        if union.is_empty() {
            return 1.0;
        }

        let distance: f64 = union
            .iter()
            .map(|style| (self.weight_of(style) - other.weight_of(style)).abs())
            .sum();
        let scale = (union.len() as f64).min(2.0);

        (1.0 - distance / scale).clamp(0.0, 1.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(name, w)| (name.as_str(), *w))
    }

    pub fn total(&self) -> f64 {
        self.weights.iter().map(|(_, w)| w).sum()
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.weights.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_on_construction() {
        let dist = StyleDistribution::from_weights([("Visual", 3.0), ("Auditory", 1.0)]);
        assert!((dist.total() - 1.0).abs() < 1e-12);
        assert!((dist.weight_of("Visual") - 0.75).abs() < 1e-12);
        assert_eq!(dist.weight_of("Kinesthetic"), 0.0);
    }

    #[test]
    fn zero_map_is_preserved() {
        let dist = StyleDistribution::from_weights([("Visual", 0.0), ("Auditory", 0.0)]);
        assert_eq!(dist.total(), 0.0);
        assert_eq!(dist.iter().count(), 2);
        assert!(dist.styles().is_empty());
        assert_eq!(dist.primary_style(), None);
    }

    #[test]
    fn bare_name_degenerates_to_single_style() {
        let dist = StyleDistribution::from_name("Visual");
        assert_eq!(dist.weight_of("Visual"), 1.0);
        assert!(!dist.is_multimodal());
        assert_eq!(dist.secondary_style(), None);
    }

    #[test]
    fn hyphenated_name_splits_evenly() {
        let dist = StyleDistribution::from_name("Visual-Kinesthetic");
        assert_eq!(dist.weight_of("Visual"), 0.5);
        assert_eq!(dist.weight_of("Kinesthetic"), 0.5);
        assert!(dist.is_multimodal());
    }

    #[test]
    fn primary_tie_goes_to_first_key() {
        let dist = StyleDistribution::from_weights([("Auditory", 0.5), ("Visual", 0.5)]);
        assert_eq!(dist.primary_style(), Some("Auditory"));
        assert_eq!(dist.secondary_style(), Some("Visual"));
    }

    #[test]
    fn similarity_bounds() {
        let a = StyleDistribution::from_name("A");
        let b = StyleDistribution::from_name("B");
        assert_eq!(a.similarity(&a), 1.0);
        assert_eq!(a.similarity(&b), 0.0);

        let mixed = StyleDistribution::from_weights([("A", 0.5), ("B", 0.5)]);
        assert!((a.similarity(&mixed) - 0.5).abs() < 1e-12);
        assert_eq!(
            StyleDistribution::default().similarity(&StyleDistribution::default()),
            1.0
        );
    }

    #[test]
    fn vark_map_restores_canonical_order() {
        let map: BTreeMap<String, f64> = [
            ("Auditory".to_string(), 0.25),
            ("Kinesthetic".to_string(), 0.25),
            ("ReadWrite".to_string(), 0.25),
            ("Visual".to_string(), 0.25),
        ]
        .into_iter()
        .collect();
        let dist = StyleDistribution::from_vark_map(&map);
        assert_eq!(dist.primary_style(), Some("Visual"));
        assert_eq!(dist, StyleDistribution::vark_uniform());
    }

    #[test]
    fn to_map_keeps_every_weight() {
        let dist = StyleDistribution::from_weights([("Visual", 1.0), ("Auditory", 0.0)]);
        let map = dist.to_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map["Visual"], 1.0);
        assert_eq!(map["Auditory"], 0.0);
    }
}
