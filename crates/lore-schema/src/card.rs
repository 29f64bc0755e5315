//! Card validation.
//!
//! A card is bound to exactly two elements and may name the characters,
//! events and locations it depicts. Whether the referenced ids exist is the
//! reference collector's concern; here only shape and grammar are checked.

use lore_core::{EntityKind, TypedReference};

use crate::error::SchemaReason;
use crate::frontmatter::Frontmatter;
use crate::validate::DocumentCheck;

/// Number of elements every card carries.
pub const CARD_ELEMENT_COUNT: usize = 2;

/// Kinds a card's `represents` entries may point at.
pub const REPRESENTABLE_KINDS: [EntityKind; 4] = [
    EntityKind::Character,
    EntityKind::Event,
    EntityKind::Place,
    EntityKind::Planet,
];

/// Element ids from `elements`.
///
/// `Required` when absent, `InvalidShape` when not a string array,
/// `InvalidLength` unless exactly two entries, `InvalidReference` for an
/// entry that is not `element:<id>`.
pub fn parse_elements(fm: &Frontmatter<'_>) -> Result<Vec<String>, SchemaReason> {
    if fm.value("elements").is_none() {
        return Err(SchemaReason::Required);
    }
    let entries = fm.string_array("elements")?;
    if entries.len() != CARD_ELEMENT_COUNT {
        return Err(SchemaReason::InvalidLength);
    }
    entries
        .into_iter()
        .map(|entry| match TypedReference::parse(entry) {
            Some(TypedReference::Element(id)) => Ok(id),
            _ => Err(SchemaReason::InvalidReference),
        })
        .collect()
}

/// References from the optional `represents` list.
pub fn parse_represents(fm: &Frontmatter<'_>) -> Result<Vec<TypedReference>, SchemaReason> {
    fm.string_array("represents")?
        .into_iter()
        .map(|entry| {
            TypedReference::parse_generic(entry)
                .filter(|reference| {
                    reference
                        .entity_kind()
                        .is_some_and(|kind| REPRESENTABLE_KINDS.contains(&kind))
                })
                .ok_or(SchemaReason::InvalidReference)
        })
        .collect()
}

pub(crate) fn check(ctx: &mut DocumentCheck<'_>) {
    let elements = parse_elements(&ctx.fm);
    ctx.check("elements", elements);

    let represents = parse_represents(&ctx.fm);
    ctx.check("represents", represents);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::tests::{finding, findings};
    use serde_json::{json, Value};

    fn card(elements: Value, represents: Option<Value>) -> Value {
        let mut doc = json!({"type": "card", "id": "ember-tide", "name": "Ember Tide", "elements": elements});
        if let (Some(fields), Some(represents)) = (doc.as_object_mut(), represents) {
            fields.insert("represents".into(), represents);
        }
        doc
    }

    #[test]
    fn test_two_elements_is_clean() {
        assert!(findings(card(json!(["element:ember", "element:tide"]), None)).is_empty());
    }

    #[test]
    fn test_elements_length() {
        for elements in [json!(["element:ember"]), json!(["element:a", "element:b", "element:c"]), json!([])] {
            assert_eq!(
                findings(card(elements.clone(), None)),
                vec![finding("elements", SchemaReason::InvalidLength)],
                "{elements}"
            );
        }
    }

    #[test]
    fn test_elements_required_and_shaped() {
        let mut doc = card(json!([]), None);
        doc.as_object_mut().unwrap().remove("elements");
        assert_eq!(findings(doc), vec![finding("elements", SchemaReason::Required)]);

        assert_eq!(
            findings(card(json!("element:ember"), None)),
            vec![finding("elements", SchemaReason::InvalidShape)]
        );
        assert_eq!(
            findings(card(json!(["element:ember", 2]), None)),
            vec![finding("elements", SchemaReason::InvalidShape)]
        );
    }

    #[test]
    fn test_elements_must_be_element_refs() {
        assert_eq!(
            findings(card(json!(["element:ember", "place:docks"]), None)),
            vec![finding("elements", SchemaReason::InvalidReference)]
        );
    }

    #[test]
    fn test_represents_kinds() {
        let ok = json!(["character:kael-nyx", "event:fall", "place:docks", "planet:aurora"]);
        assert!(findings(card(json!(["element:a", "element:b"]), Some(ok))).is_empty());

        for bad in ["element:ember", "mechanic:stagger", "kael-nyx", "space:belt"] {
            assert_eq!(
                findings(card(json!(["element:a", "element:b"]), Some(json!([bad])))),
                vec![finding("represents", SchemaReason::InvalidReference)],
                "{bad}"
            );
        }
    }
}
