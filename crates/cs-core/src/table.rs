//! Fixed-size maps keyed by [`Ability`] and [`Skill`].
//!
//! Both key sets are closed, so lookups are plain array indexing and can
//! never miss.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::rules::{Ability, Skill};

/// One value per ability, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbilityMap<T>([T; 6]);

impl<T> AbilityMap<T> {
    /// Build the map by computing a value for every ability.
    pub fn from_fn(mut f: impl FnMut(Ability) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Ability::ALL[i])))
    }

    /// Value for `ability`.
    pub fn get(&self, ability: Ability) -> &T {
        &self.0[ability as usize]
    }

    /// `(ability, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Ability, &T)> {
        Ability::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T: Serialize> Serialize for AbilityMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        for (ability, value) in self.iter() {
            map.serialize_entry(ability.key(), value)?;
        }
        map.end()
    }
}

/// One value per skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillMap<T>([T; 18]);

impl<T> SkillMap<T> {
    /// Build the map by computing a value for every skill.
    pub fn from_fn(mut f: impl FnMut(Skill) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Skill::ALL[i])))
    }

    /// Value for `skill`.
    pub fn get(&self, skill: Skill) -> &T {
        &self.0[skill as usize]
    }

    /// All `(skill, value)` pairs, grouped by governing ability.
    pub fn iter(&self) -> impl Iterator<Item = (Skill, &T)> {
        Skill::ALL.into_iter().zip(self.0.iter())
    }

    /// The skills governed by `ability`, in presentation order.
    pub fn for_ability(&self, ability: Ability) -> impl Iterator<Item = (Skill, &T)> {
        self.iter().filter(move |(skill, _)| skill.ability() == ability)
    }
}

/// Serialized grouped by ability: `{"dex": {"stealth": ..}, "con": {}, ..}`.
impl<T: Serialize> Serialize for SkillMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        for ability in Ability::ALL {
            map.serialize_entry(ability.key(), &Group(self, ability))?;
        }
        map.end()
    }
}

struct Group<'a, T>(&'a SkillMap<T>, Ability);

impl<T: Serialize> Serialize for Group<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (skill, value) in self.0.for_ability(self.1) {
            map.serialize_entry(skill.name(), value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ability_map_indexes_by_variant() {
        let map = AbilityMap::from_fn(|a| a.key());
        assert_eq!(*map.get(Ability::Wis), "wis");
        let keys: Vec<_> = map.iter().map(|(_, k)| *k).collect();
        assert_eq!(keys, ["str", "dex", "con", "int", "wis", "cha"]);
    }

    #[test]
    fn skill_map_indexes_by_variant() {
        let map = SkillMap::from_fn(|s| s.name());
        for skill in Skill::ALL {
            assert_eq!(*map.get(skill), skill.name());
        }
    }

    #[test]
    fn skill_map_groups() {
        let map = SkillMap::from_fn(|s| s.ability());
        let dex: Vec<_> = map.for_ability(Ability::Dex).map(|(s, _)| s).collect();
        assert_eq!(dex, [Skill::Acrobatics, Skill::SleightOfHand, Skill::Stealth]);
        assert_eq!(map.for_ability(Ability::Con).count(), 0);
    }

    #[test]
    fn skill_map_serializes_grouped() {
        let map = SkillMap::from_fn(|s| s.ability() == Ability::Str);
        let json = serde_json::to_value(map).unwrap();
        assert_eq!(json["str"]["athletics"], true);
        assert_eq!(json["dex"]["sleight of hand"], false);
        assert!(json["con"].as_object().unwrap().is_empty());
    }
}
