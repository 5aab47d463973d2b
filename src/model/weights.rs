use crate::model::criteria::Criterion;

/// Default hiring profile in percent points: written test 40, interview 40,
/// years of work experience 20.
pub const DEFAULT_PROFILE: [(&str, f64); 3] = [
    ("nilai_tes_tertulis", 40.0),
    ("nilai_wawancara", 40.0),
    ("pengalaman_kerja_tahun", 20.0),
];

/// Criterion-name-to-weight mapping, weights as fractions. The scorer owns
/// the sum-to-1.0 validation.
#[derive(Debug, Clone)]
pub struct WeightVector {
    pub entries: Vec<(String, f64)>,
}

impl WeightVector {
    pub fn from_fractions(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    /// Percent points divided by 100 here at the boundary; a bad total is
    /// passed through untouched for the scorer to reject.
    pub fn from_percentages(entries: &[(String, f64)]) -> Self {
        Self::from_fractions(
            entries
                .iter()
                .map(|(name, pct)| (name.clone(), pct / 100.0))
                .collect(),
        )
    }

    pub fn default_v1() -> Self {
        Self::from_percentages(&DEFAULT_PROFILE.map(|(name, pct)| (name.to_string(), pct)))
    }

    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|(_, w)| w).sum()
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| *w)
    }

    /// The criterion set this vector covers, in entry order.
    pub fn criteria(&self) -> Vec<Criterion> {
        self.entries
            .iter()
            .map(|(name, _)| Criterion::new(name.clone()))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/weights.rs"]
mod tests;
