//! Vector similarity helpers

use serde::Serialize;
use std::fmt;

use crate::domain::DomainError;

/// Calculate cosine similarity between two vectors.
///
/// Vectors of different length are a configuration error. A zero-magnitude
/// vector has similarity 0.0 with everything.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, DomainError> {
    if a.len() != b.len() {
        return Err(DomainError::configuration(format!(
            "Vectors must be same length! Got {} and {}",
            a.len(),
            b.len()
        )));
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot_product / (norm_a * norm_b))
}

/// Human-friendly bucket for a similarity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityLevel {
    NearlyIdentical,
    VerySimilar,
    SomewhatSimilar,
    ABitRelated,
    QuiteDifferent,
}

impl SimilarityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::NearlyIdentical => "Nearly identical!",
            Self::VerySimilar => "Very similar",
            Self::SomewhatSimilar => "Somewhat similar",
            Self::ABitRelated => "A bit related",
            Self::QuiteDifferent => "Quite different",
        }
    }
}

impl fmt::Display for SimilarityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Map a similarity score to its level
pub fn interpret_similarity(score: f32) -> SimilarityLevel {
    if score >= 0.9 {
        SimilarityLevel::NearlyIdentical
    } else if score >= 0.7 {
        SimilarityLevel::VerySimilar
    } else if score >= 0.5 {
        SimilarityLevel::SomewhatSimilar
    } else if score >= 0.3 {
        SimilarityLevel::ABitRelated
    } else {
        SimilarityLevel::QuiteDifferent
    }
}

/// A named vector scored against a base vector
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch {
    pub name: String,
    pub score: f32,
}

/// Score every candidate against `base`, highest similarity first
pub fn rank_by_similarity<N, V>(
    base: &[f32],
    candidates: impl IntoIterator<Item = (N, V)>,
) -> Result<Vec<RankedMatch>, DomainError>
where
    N: Into<String>,
    V: AsRef<[f32]>,
{
    let mut ranked = candidates
        .into_iter()
        .map(|(name, vector)| {
            Ok(RankedMatch {
                name: name.into(),
                score: cosine_similarity(base, vector.as_ref())?,
            })
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity_identical() {
        let similarity = cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0, 0.0]).unwrap();
        assert!((similarity - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_orthogonal_and_opposite() {
        let orthogonal = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(orthogonal.abs() < 0.0001);

        let opposite = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((opposite + 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_cosine_similarity_king_queen() {
        let similarity = cosine_similarity(&[0.8, 0.6], &[0.7, 0.5]).unwrap();
        assert!((similarity - 0.9995).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_zero_vector() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_cosine_similarity_length_mismatch() {
        let err = cosine_similarity(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("Got 2 and 3"));
    }

    #[test]
    fn test_interpret_similarity() {
        assert_eq!(interpret_similarity(0.95).label(), "Nearly identical!");
        assert_eq!(interpret_similarity(0.9), SimilarityLevel::NearlyIdentical);
        assert_eq!(interpret_similarity(0.75), SimilarityLevel::VerySimilar);
        assert_eq!(interpret_similarity(0.5), SimilarityLevel::SomewhatSimilar);
        assert_eq!(interpret_similarity(0.3), SimilarityLevel::ABitRelated);
        assert_eq!(interpret_similarity(0.1).to_string(), "Quite different");
    }

    #[test]
    fn test_rank_by_similarity() {
        let king = [0.8, 0.6];
        let ranked = rank_by_similarity(
            &king,
            vec![
                ("car", vec![0.2, 0.9]),
                ("queen", vec![0.7, 0.5]),
                ("dog", vec![0.6, 0.3]),
            ],
        )
        .unwrap();

        let names: Vec<&str> = ranked.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["queen", "dog", "car"]);
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_by_similarity_propagates_mismatch() {
        let result = rank_by_similarity(&[1.0, 0.0], vec![("bad", vec![1.0])]);
        assert!(result.unwrap_err().is_configuration());
    }
}
