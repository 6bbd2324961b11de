pub mod feats;
pub mod snapshot;

pub use feats::{Feat, FeatTarget};
pub use snapshot::{
    ActorSnapshot, Attributes, CharacterKind, IceKind, Skill, SkillCategory, SkillHandle,
    SpecHandle, Specialization,
};
