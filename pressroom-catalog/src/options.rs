use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A selectable material or finish
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemOption {
    pub id: String,
    pub name: String,
    pub multiplier: f64,
}

impl ItemOption {
    pub fn new(id: impl Into<String>, name: impl Into<String>, multiplier: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            multiplier,
        }
    }
}

/// Materials and finishes, looked up by their stable id
#[derive(Debug, Clone, Default)]
pub struct OptionCatalog {
    materials: HashMap<String, ItemOption>,
    finishes: HashMap<String, ItemOption>,
}

impl OptionCatalog {
    pub fn new(materials: Vec<ItemOption>, finishes: Vec<ItemOption>) -> Result<Self, OptionError> {
        Ok(Self {
            materials: index(materials)?,
            finishes: index(finishes)?,
        })
    }

    pub fn material(&self, id: &str) -> Result<&ItemOption, OptionError> {
        self.materials
            .get(id)
            .ok_or_else(|| OptionError::UnknownMaterial(id.to_string()))
    }

    pub fn finish(&self, id: &str) -> Result<&ItemOption, OptionError> {
        self.finishes
            .get(id)
            .ok_or_else(|| OptionError::UnknownFinish(id.to_string()))
    }

    /// Combined multiplier for a material/finish pair.
    pub fn combined_multiplier(&self, material_id: &str, finish_id: &str) -> Result<f64, OptionError> {
        Ok(self.material(material_id)?.multiplier * self.finish(finish_id)?.multiplier)
    }

    pub fn materials(&self) -> impl Iterator<Item = &ItemOption> {
        self.materials.values()
    }

    pub fn finishes(&self) -> impl Iterator<Item = &ItemOption> {
        self.finishes.values()
    }
}

fn index(options: Vec<ItemOption>) -> Result<HashMap<String, ItemOption>, OptionError> {
    let mut map = HashMap::with_capacity(options.len());
    for option in options {
        if !option.multiplier.is_finite() || option.multiplier < 0.0 {
            return Err(OptionError::InvalidMultiplier {
                id: option.id,
                multiplier: option.multiplier,
            });
        }
        if map.contains_key(&option.id) {
            return Err(OptionError::DuplicateId(option.id));
        }
        map.insert(option.id.clone(), option);
    }
    Ok(map)
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OptionError {
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Unknown finish: {0}")]
    UnknownFinish(String),

    #[error("Option {id} has invalid multiplier {multiplier}")]
    InvalidMultiplier { id: String, multiplier: f64 },

    #[error("Duplicate option id: {0}")]
    DuplicateId(String),
}
