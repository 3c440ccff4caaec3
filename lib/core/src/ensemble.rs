use ahash::AHashMap;

use crate::{CategoryKey, Error, ProbabilityModel, Result};

/// Classifiers voting on one category, plus its decision threshold
#[derive(Debug)]
pub struct Ensemble {
    category: CategoryKey,
    threshold: f64,
    members: Vec<Box<dyn ProbabilityModel>>,
}

impl Ensemble {
    pub fn new(
        category: CategoryKey,
        threshold: f64,
        members: Vec<Box<dyn ProbabilityModel>>,
    ) -> Result<Self> {
        if members.is_empty() {
            return Err(Error::EmptyEnsemble(category.to_string()));
        }
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidThreshold {
                category: category.to_string(),
                threshold,
            });
        }
        Ok(Self { category, threshold, members })
    }

    pub fn category(&self) -> &CategoryKey {
        &self.category
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn members(&self) -> &[Box<dyn ProbabilityModel>] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// One ensemble per category; its keys define the category universe
#[derive(Debug, Default)]
pub struct ClassifierRegistry {
    ensembles: AHashMap<CategoryKey, Ensemble>,
}

impl ClassifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an ensemble, replacing any previous one for the category
    pub fn insert(&mut self, ensemble: Ensemble) -> Option<Ensemble> {
        self.ensembles.insert(ensemble.category.clone(), ensemble)
    }

    /// Look up a category's ensemble; an unknown key is an integrity error
    pub fn get(&self, category: &str) -> Result<&Ensemble> {
        self.ensembles
            .get(category)
            .ok_or_else(|| Error::UnknownCategory(category.to_string()))
    }

    pub fn contains(&self, category: &str) -> bool {
        self.ensembles.contains_key(category)
    }

    /// Registered categories, sorted
    pub fn keys(&self) -> Vec<CategoryKey> {
        let mut keys: Vec<CategoryKey> = self.ensembles.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.ensembles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ensembles.is_empty()
    }
}

impl FromIterator<Ensemble> for ClassifierRegistry {
    fn from_iter<I: IntoIterator<Item = Ensemble>>(iter: I) -> Self {
        let mut registry = ClassifierRegistry::new();
        for ensemble in iter {
            registry.insert(ensemble);
        }
        registry
    }
}
