//! Read-only actor snapshots
//!
//! The host stores actors as opaque JSON documents with embedded skill,
//! specialization and feat sub-documents. A snapshot is decoded once per
//! user action; name references inside the document are resolved to stable
//! handles here, so everything downstream works on indices and never
//! searches a mutable item collection by name.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::actor::feats::{Feat, FeatTarget};
use crate::core::error::{EngineError, Result};
use crate::core::types::{ActorId, Attribute};
use crate::dice::complication::RiskReductionSource;

/// Actor archetype. Closed set: adding one forces every match site to be
/// revisited at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    Character,
    Npc,
    Vehicle,
    Ice,
}

/// ICE sub-types. Only some inflict damage; the rest are effect-only and
/// deal no damage even when their attack succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IceKind {
    Blaster,
    Black,
    Sparky,
    Killer,
    Acid,
    Binder,
    Crippler,
    Jammer,
    Marker,
    TarBaby,
}

impl IceKind {
    pub fn deals_damage(&self) -> bool {
        matches!(
            self,
            IceKind::Blaster | IceKind::Black | IceKind::Sparky | IceKind::Killer
        )
    }
}

/// Core attribute block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Attributes {
    pub strength: u32,
    pub agility: u32,
    pub willpower: u32,
    pub logic: u32,
    pub charisma: u32,
    pub edge: u32,
}

impl Attributes {
    pub fn get(&self, attribute: Attribute) -> u32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Willpower => self.willpower,
            Attribute::Logic => self.logic,
            Attribute::Charisma => self.charisma,
            Attribute::Edge => self.edge,
        }
    }
}

/// Skill categories; Sorcery and Conjuration are the drain-liable ones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Combat,
    Sorcery,
    Conjuration,
    Technical,
    Social,
    Physical,
}

impl SkillCategory {
    /// Does a complication on this skill drain the caster?
    pub fn drains(&self) -> bool {
        matches!(self, SkillCategory::Sorcery | SkillCategory::Conjuration)
    }
}

/// Stable index of a skill inside one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillHandle(pub usize);

/// Stable index of a specialization inside one snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpecHandle(pub usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub rating: u32,
    pub category: SkillCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialization {
    pub name: String,
    /// Parent skill, resolved at snapshot construction
    pub skill: SkillHandle,
}

/// Immutable view of one actor at roll time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub name: String,
    pub kind: CharacterKind,
    pub attributes: Attributes,
    pub skills: Vec<Skill>,
    pub specializations: Vec<Specialization>,
    pub feats: Vec<Feat>,
    pub armor: u32,
    /// Vehicle hull rating; zero for other archetypes
    pub structure: u32,
    /// Host rating an ICE substitutes for its attack roll
    pub server_index: u32,
    pub ice_kind: Option<IceKind>,
}

impl ActorSnapshot {
    /// Decode a snapshot from the host's document store.
    pub fn from_json(document: &str) -> Result<Self> {
        let doc: SnapshotDoc = serde_json::from_str(document)?;
        Self::from_doc(doc)
    }

    /// Resolve a raw document's name references into handles.
    fn from_doc(doc: SnapshotDoc) -> Result<Self> {
        let skill_by_name: AHashMap<&str, SkillHandle> = doc
            .skills
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.as_str(), SkillHandle(i)))
            .collect();

        let mut specializations = Vec::with_capacity(doc.specializations.len());
        for spec in &doc.specializations {
            let skill = *skill_by_name
                .get(spec.skill.as_str())
                .ok_or_else(|| EngineError::UnknownSkill(spec.skill.clone()))?;
            specializations.push(Specialization {
                name: spec.name.clone(),
                skill,
            });
        }

        let spec_by_name: AHashMap<&str, SpecHandle> = doc
            .specializations
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.as_str(), SpecHandle(i)))
            .collect();

        let mut feats = Vec::with_capacity(doc.feats.len());
        for feat in doc.feats {
            let target = match feat.target {
                FeatTargetDoc::Attribute(attribute) => FeatTarget::Attribute(attribute),
                FeatTargetDoc::Skill(name) => FeatTarget::Skill(
                    *skill_by_name
                        .get(name.as_str())
                        .ok_or(EngineError::UnknownSkill(name.clone()))?,
                ),
                FeatTargetDoc::Specialization(name) => FeatTarget::Specialization(
                    *spec_by_name
                        .get(name.as_str())
                        .ok_or(EngineError::UnknownSpecialization(name.clone()))?,
                ),
            };
            feats.push(Feat {
                name: feat.name,
                active: feat.active,
                target,
                risk_reduction: feat.risk_reduction,
                threshold_bonus: feat.threshold_bonus,
            });
        }

        Ok(Self {
            id: doc.id.unwrap_or_default(),
            name: doc.name,
            kind: doc.kind,
            attributes: doc.attributes,
            skills: doc.skills,
            specializations,
            feats,
            armor: doc.armor,
            structure: doc.structure,
            server_index: doc.server_index,
            ice_kind: doc.ice_kind,
        })
    }

    pub fn skill(&self, handle: SkillHandle) -> &Skill {
        &self.skills[handle.0]
    }

    pub fn specialization(&self, handle: SpecHandle) -> &Specialization {
        &self.specializations[handle.0]
    }

    /// Handle lookup by name, for hosts that address skills textually.
    /// This happens once at request construction, never during resolution.
    pub fn skill_handle(&self, name: &str) -> Option<SkillHandle> {
        self.skills
            .iter()
            .position(|s| s.name == name)
            .map(SkillHandle)
    }

    pub fn specialization_handle(&self, name: &str) -> Option<SpecHandle> {
        self.specializations
            .iter()
            .position(|s| s.name == name)
            .map(SpecHandle)
    }

    /// Risk Reduction sources for a roll against the given selection.
    ///
    /// Derived fresh on every call: the active-feat scan must track the
    /// current skill/specialization selection, so nothing here is cached.
    pub fn risk_reduction_sources(
        &self,
        attribute: Attribute,
        skill: Option<SkillHandle>,
        specialization: Option<SpecHandle>,
    ) -> Vec<RiskReductionSource> {
        self.feats
            .iter()
            .filter(|f| f.active && f.risk_reduction > 0)
            .filter(|f| match f.target {
                FeatTarget::Attribute(a) => a == attribute,
                FeatTarget::Skill(h) => skill == Some(h),
                FeatTarget::Specialization(h) => specialization == Some(h),
            })
            .map(|f| RiskReductionSource {
                origin_name: f.name.clone(),
                value: f.risk_reduction,
            })
            .collect()
    }

    /// Sum of threshold bonuses from active feats
    pub fn threshold_bonus(&self) -> i32 {
        self.feats
            .iter()
            .filter(|f| f.active)
            .map(|f| f.threshold_bonus)
            .sum()
    }
}

/// Raw document shape as stored by the host, names not yet resolved
#[derive(Debug, Deserialize)]
struct SnapshotDoc {
    #[serde(default)]
    id: Option<ActorId>,
    name: String,
    kind: CharacterKind,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    skills: Vec<Skill>,
    #[serde(default)]
    specializations: Vec<SpecializationDoc>,
    #[serde(default)]
    feats: Vec<FeatDoc>,
    #[serde(default)]
    armor: u32,
    #[serde(default)]
    structure: u32,
    #[serde(default)]
    server_index: u32,
    #[serde(default)]
    ice_kind: Option<IceKind>,
}

#[derive(Debug, Deserialize)]
struct SpecializationDoc {
    name: String,
    skill: String,
}

#[derive(Debug, Deserialize)]
struct FeatDoc {
    name: String,
    #[serde(default = "default_true")]
    active: bool,
    target: FeatTargetDoc,
    #[serde(default)]
    risk_reduction: u32,
    #[serde(default)]
    threshold_bonus: i32,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FeatTargetDoc {
    Attribute(Attribute),
    Skill(String),
    Specialization(String),
}
