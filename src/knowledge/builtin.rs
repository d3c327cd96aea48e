//! Built-in first-aid catalog and the process-wide installed instance.
//!
//! The table is compiled into the binary; there is no file or network
//! source.  [`install`] validates it once and parks it in a `OnceLock` so
//! every caller shares the same read-only `&'static` catalog.

use std::sync::OnceLock;

use crate::knowledge::base::{KnowledgeBase, KnowledgeBaseError};
use crate::knowledge::topic::Topic;

// ---------------------------------------------------------------------------
// Static table
// ---------------------------------------------------------------------------

struct TopicDef {
    id: &'static str,
    title: &'static str,
    keywords: &'static [&'static str],
    response: &'static str,
}

static FIRST_AID: &[TopicDef] = &[
    TopicDef {
        id: "burn",
        title: "Burns & Scalds",
        keywords: &["burn", "burns", "burning", "fire", "hot"],
        response: "For a minor burn: 1. Cool the burn under cold running water for at least 10 minutes. \
                   2. Remove any jewelry or clothing near the burnt area. \
                   3. Cover with a sterile gauze bandage. \
                   4. Take over-the-counter pain medication if needed.",
    },
    TopicDef {
        id: "bleeding",
        title: "Bleeding Control",
        keywords: &["bleeding", "blood", "cut", "wound"],
        response: "To control bleeding: 1. Apply direct pressure with a clean cloth. \
                   2. Keep the injured area elevated above the heart. \
                   3. Apply a pressure bandage. \
                   4. If bleeding is severe or doesn't stop, seek immediate medical attention.",
    },
    TopicDef {
        id: "choking",
        title: "Choking Response",
        keywords: &["choke", "choking", "heimlich", "can't breathe", "cant breathe"],
        response: "For a choking adult: 1. Give 5 back blows between the shoulder blades. \
                   2. Perform 5 abdominal thrusts (Heimlich maneuver). \
                   3. Alternate between back blows and abdominal thrusts. \
                   4. If person becomes unconscious, start CPR.",
    },
    TopicDef {
        id: "cpr",
        title: "CPR Procedure",
        keywords: &["cpr", "unconscious", "not breathing", "heart", "cardiac"],
        response: "Adult CPR steps: 1. Check the scene is safe. \
                   2. Call emergency services. \
                   3. Check for breathing. \
                   4. Give 30 chest compressions. \
                   5. Give 2 rescue breaths. \
                   6. Continue cycles of 30 compressions and 2 breaths.",
    },
    TopicDef {
        id: "fracture",
        title: "Fractures & Sprains",
        keywords: &["broken", "fracture", "bone", "sprain"],
        response: "For a suspected fracture: 1. Keep the injured area still. \
                   2. Apply ice wrapped in cloth. \
                   3. Elevate the injury if possible. \
                   4. Seek immediate medical attention.",
    },
    TopicDef {
        id: "seizure",
        title: "Seizures",
        keywords: &["seizure", "convulsion", "fits", "epilepsy"],
        response: "During a seizure: 1. Ease the person to the floor. \
                   2. Turn them on their side. \
                   3. Clear the area of hazards. \
                   4. Time the seizure. \
                   5. Never put anything in their mouth. \
                   6. Stay with them until fully recovered.",
    },
    TopicDef {
        id: "allergic",
        title: "Allergic Reactions",
        keywords: &["allergy", "allergic", "anaphylaxis", "reaction"],
        response: "For severe allergic reaction: 1. Check for medical alert bracelet. \
                   2. Call emergency services. \
                   3. Help them use their epinephrine auto-injector if available. \
                   4. Keep them calm and lying down.",
    },
    TopicDef {
        id: "heatstroke",
        title: "Heatstroke",
        keywords: &["heat", "heatstroke", "overheated", "dehydrated"],
        response: "For heatstroke: 1. Move to a cool place. \
                   2. Call emergency services. \
                   3. Remove excess clothing. \
                   4. Cool with water or ice packs. \
                   5. Do not give fluids if unconscious.",
    },
];

/// Topic ids shown as quick-select category cards, in display order.
pub const QUICK_SELECT: &[&str] = &["burn", "bleeding", "cpr", "choking"];

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

/// Build (and validate) a fresh copy of the built-in catalog.
pub fn builtin() -> Result<KnowledgeBase, KnowledgeBaseError> {
    let topics = FIRST_AID
        .iter()
        .map(|def| Topic::new(def.id, def.title, def.keywords.iter().copied(), def.response))
        .collect();
    KnowledgeBase::new(topics)
}

static INSTALLED: OnceLock<KnowledgeBase> = OnceLock::new();

/// Validate the built-in catalog and install it as process-wide state.
///
/// The first successful call wins; later calls return the same instance.
/// Call this once at startup and abort on `Err`.
pub fn install() -> Result<&'static KnowledgeBase, KnowledgeBaseError> {
    if let Some(kb) = INSTALLED.get() {
        return Ok(kb);
    }
    let kb = builtin()?;
    log::info!("installed first-aid knowledge base ({} topics)", kb.len());
    Ok(INSTALLED.get_or_init(|| kb))
}

/// The installed catalog, or `None` before [`install`] succeeds.
pub fn installed() -> Option<&'static KnowledgeBase> {
    INSTALLED.get()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_valid() {
        let kb = builtin().expect("built-in table must validate");
        assert_eq!(kb.len(), 8);
    }

    #[test]
    fn builtin_declaration_order() {
        let kb = builtin().unwrap();
        let ids: Vec<&str> = kb.topics().map(Topic::id).collect();
        assert_eq!(
            ids,
            [
                "burn",
                "bleeding",
                "choking",
                "cpr",
                "fracture",
                "seizure",
                "allergic",
                "heatstroke"
            ]
        );
    }

    #[test]
    fn responses_are_single_spaced() {
        let kb = builtin().unwrap();
        for topic in kb.topics() {
            assert!(!topic.response().contains("  "), "{}", topic.id());
        }
    }

    #[test]
    fn quick_select_ids_exist() {
        let kb = builtin().unwrap();
        for id in QUICK_SELECT {
            assert!(kb.contains(id), "missing quick-select topic {id}");
        }
    }

    #[test]
    fn install_returns_same_instance() {
        let a = install().unwrap();
        let b = install().unwrap();
        assert!(std::ptr::eq(a, b));
        assert!(installed().is_some_and(|kb| std::ptr::eq(kb, a)));
    }
}
