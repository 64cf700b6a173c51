//! Catalog of buildable construction types.
//!
//! The registry is filled once during bootstrap. Worlds only store
//! [`ConstructionTypeId`]s, so loading a world depends on the registry
//! already knowing every id the world mentions.

use lincity_common::ConstructionTypeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Broad category of a construction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstructionGroup {
    Residence,
    Farm,
    Industry,
    Mine,
    Power,
    Water,
    Transport,
    Commerce,
    Education,
    Health,
    Safety,
    Recreation,
    Waste,
    Monument,
}

/// A buildable construction type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstructionType {
    pub id: ConstructionTypeId,
    pub name: String,
    pub group: ConstructionGroup,
    /// Edge length of the square footprint, in tiles.
    pub size: u16,
    /// Build cost deducted from the city's money on placement.
    pub cost: u32,
}

impl ConstructionType {
    pub fn new(
        id: &str,
        name: &str,
        group: ConstructionGroup,
        size: u16,
        cost: u32,
    ) -> Self {
        Self {
            id: ConstructionTypeId::new(id),
            name: name.to_string(),
            group,
            size,
            cost,
        }
    }
}

/// Errors from registry population.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("construction type '{0}' is already registered")]
    Duplicate(ConstructionTypeId),
    #[error("construction type '{0}' has a zero-sized footprint")]
    ZeroSize(ConstructionTypeId),
}

/// Construction types indexed by id, iterated in id order.
#[derive(Debug, Clone, Default)]
pub struct ConstructionRegistry {
    types: BTreeMap<ConstructionTypeId, ConstructionType>,
}

impl ConstructionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry holding the standard catalog.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for ty in builtin_types() {
            registry.register(ty)?;
        }
        Ok(registry)
    }

    /// Add a construction type. Ids must be unique.
    pub fn register(&mut self, ty: ConstructionType) -> Result<(), RegistryError> {
        if ty.size == 0 {
            return Err(RegistryError::ZeroSize(ty.id));
        }
        if self.types.contains_key(&ty.id) {
            return Err(RegistryError::Duplicate(ty.id));
        }
        self.types.insert(ty.id.clone(), ty);
        Ok(())
    }

    pub fn get(&self, id: &ConstructionTypeId) -> Option<&ConstructionType> {
        self.types.get(id)
    }

    pub fn contains(&self, id: &ConstructionTypeId) -> bool {
        self.types.contains_key(id)
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConstructionType> {
        self.types.values()
    }
}

fn builtin_types() -> Vec<ConstructionType> {
    use ConstructionGroup::*;
    vec![
        ConstructionType::new("residence_ll", "Low-density residence (low tech)", Residence, 3, 1_000),
        ConstructionType::new("residence_ml", "Medium-density residence (low tech)", Residence, 3, 2_000),
        ConstructionType::new("residence_hl", "High-density residence (low tech)", Residence, 3, 4_000),
        ConstructionType::new("residence_lh", "Low-density residence (high tech)", Residence, 3, 3_000),
        ConstructionType::new("residence_mh", "Medium-density residence (high tech)", Residence, 3, 5_000),
        ConstructionType::new("residence_hh", "High-density residence (high tech)", Residence, 3, 8_000),
        ConstructionType::new("organic_farm", "Organic farm", Farm, 4, 1_000),
        ConstructionType::new("water_well", "Water well", Water, 2, 1_000),
        ConstructionType::new("light_industry", "Light industry", Industry, 3, 20_000),
        ConstructionType::new("heavy_industry", "Heavy industry", Industry, 4, 50_000),
        ConstructionType::new("blacksmith", "Blacksmith", Industry, 2, 5_000),
        ConstructionType::new("mill", "Mill", Industry, 2, 5_000),
        ConstructionType::new("pottery", "Pottery", Industry, 2, 5_000),
        ConstructionType::new("coal_mine", "Coal mine", Mine, 4, 10_000),
        ConstructionType::new("ore_mine", "Ore mine", Mine, 4, 500),
        ConstructionType::new("commune", "Commune", Farm, 4, 1),
        ConstructionType::new("coal_power", "Coal power station", Power, 4, 100_000),
        ConstructionType::new("solar_power", "Solar power station", Power, 4, 500_000),
        ConstructionType::new("windmill", "Windmill", Power, 2, 20_000),
        ConstructionType::new("substation", "Substation", Power, 2, 500),
        ConstructionType::new("track", "Track", Transport, 1, 1),
        ConstructionType::new("road", "Road", Transport, 1, 50),
        ConstructionType::new("rail", "Rail", Transport, 1, 500),
        ConstructionType::new("port", "Port", Transport, 4, 100_000),
        ConstructionType::new("rocket", "Rocket pad", Transport, 4, 700_000),
        ConstructionType::new("market", "Market", Commerce, 2, 100),
        ConstructionType::new("school", "School", Education, 2, 10_000),
        ConstructionType::new("university", "University", Education, 3, 250_000),
        ConstructionType::new("health_centre", "Health centre", Health, 2, 100_000),
        ConstructionType::new("fire_station", "Fire station", Safety, 2, 20_000),
        ConstructionType::new("park", "Park", Recreation, 1, 1_000),
        ConstructionType::new("cricket", "Sports field", Recreation, 2, 1_000),
        ConstructionType::new("recycle", "Recycling centre", Waste, 2, 100_000),
        ConstructionType::new("tip", "Tip", Waste, 4, 10_000),
        ConstructionType::new("monument", "Monument", Monument, 2, 10_000),
    ]
}
