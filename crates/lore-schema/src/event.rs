//! Event validation: a required calendar `date`, a required `who` list of
//! participants, and optional `locations`.

use lore_core::TypedReference;
use serde_json::Value;

use crate::error::SchemaReason;
use crate::frontmatter::Frontmatter;
use crate::validate::{check_image, DocumentCheck};

/// Character ids named in `who`.
///
/// `Required` when absent; otherwise the value must be an array of
/// mappings, each with a string `character`.
pub fn parse_participants<'a>(fm: &Frontmatter<'a>) -> Result<Vec<&'a str>, SchemaReason> {
    let entries = fm
        .value("who")
        .ok_or(SchemaReason::Required)?
        .as_array()
        .ok_or(SchemaReason::InvalidShape)?;
    entries
        .iter()
        .map(|entry| {
            entry
                .get("character")
                .and_then(Value::as_str)
                .ok_or(SchemaReason::InvalidShape)
        })
        .collect()
}

/// References in `locations`, each parsed with [`TypedReference::parse`].
pub fn parse_locations(fm: &Frontmatter<'_>) -> Result<Vec<TypedReference>, SchemaReason> {
    fm.string_array("locations")?
        .into_iter()
        .map(|entry| TypedReference::parse(entry).ok_or(SchemaReason::InvalidReference))
        .collect()
}

pub(crate) fn check(ctx: &mut DocumentCheck<'_>) {
    check_image(ctx);

    let date = ctx.fm.date("date", true);
    ctx.check("date", date);

    let who = parse_participants(&ctx.fm);
    ctx.check("who", who);

    let locations = parse_locations(&ctx.fm);
    ctx.check("locations", locations);
}
