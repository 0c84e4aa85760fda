//! Static LRGASP challenge rules.

use std::collections::BTreeSet;

use crate::domain::{Challenge, DataCategory, ExperimentType, Platform, Sample};

const REFERENCE_SAMPLES: &[Sample] = &[Sample::Wtc11, Sample::H1Mix, Sample::Es];
const DE_NOVO_SAMPLES: &[Sample] = &[Sample::Es, Sample::Blood];

const LONG_READ_PLATFORMS: &[Platform] = &[Platform::PacBio, Platform::Ont];
const SHORT_READ_PLATFORMS: &[Platform] = &[Platform::Illumina];
const ALL_PLATFORMS: &[Platform] = &[Platform::PacBio, Platform::Ont, Platform::Illumina];

/// Samples an entry for `challenge` may (and, outside freestyle, must) use.
pub fn challenge_samples(challenge: Challenge) -> BTreeSet<Sample> {
    let samples = match challenge {
        Challenge::IsoDetectRef | Challenge::IsoQuant => REFERENCE_SAMPLES,
        Challenge::IsoDetectDeNovo => DE_NOVO_SAMPLES,
    };
    samples.iter().copied().collect()
}

pub fn data_category_platforms(category: DataCategory) -> BTreeSet<Platform> {
    let platforms = match category {
        DataCategory::LongOnly => LONG_READ_PLATFORMS,
        DataCategory::ShortOnly => SHORT_READ_PLATFORMS,
        DataCategory::LongShort | DataCategory::Freestyle => ALL_PLATFORMS,
    };
    platforms.iter().copied().collect()
}

pub fn is_long_read_platform(platform: Platform) -> bool {
    LONG_READ_PLATFORMS.contains(&platform)
}

pub fn challenge_to_experiment_type(challenge: Challenge) -> ExperimentType {
    match challenge {
        Challenge::IsoDetectRef | Challenge::IsoDetectDeNovo => ExperimentType::Model,
        Challenge::IsoQuant => ExperimentType::Expression,
    }
}

pub fn challenge_desc(challenge: Challenge) -> &'static str {
    match challenge {
        Challenge::IsoDetectRef => "isoform detection with a high-quality genome",
        Challenge::IsoQuant => "isoform quantification",
        Challenge::IsoDetectDeNovo => "de novo isoform detection without a high-quality genome",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn de_novo_uses_its_own_samples() {
        let samples = challenge_samples(Challenge::IsoDetectDeNovo);
        assert!(samples.contains(&Sample::Blood));
        assert!(!samples.contains(&Sample::Wtc11));
        assert_eq!(
            challenge_samples(Challenge::IsoDetectRef),
            challenge_samples(Challenge::IsoQuant)
        );
    }

    #[test]
    fn long_only_excludes_illumina() {
        let platforms = data_category_platforms(DataCategory::LongOnly);
        assert!(!platforms.contains(&Platform::Illumina));
        assert_eq!(data_category_platforms(DataCategory::Freestyle).len(), 3);
    }

    #[test]
    fn illumina_is_short_read() {
        assert!(is_long_read_platform(Platform::Ont));
        assert!(!is_long_read_platform(Platform::Illumina));
    }

    #[test]
    fn quantification_produces_expression() {
        assert_eq!(
            challenge_to_experiment_type(Challenge::IsoQuant),
            ExperimentType::Expression
        );
        assert_eq!(
            challenge_to_experiment_type(Challenge::IsoDetectDeNovo),
            ExperimentType::Model
        );
    }
}
