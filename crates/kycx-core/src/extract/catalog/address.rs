//! Current, permanent and temporary address rules.
//!
//! Current and permanent rules normally run against their segmented view, so the
//! generic rules at the end of each list only see one block.

use super::{FieldCatalog, ALPHA};
use crate::extract::rule::{FieldRule, Guard};
use crate::extract::Category;

const ALNUM: &str = r"[A-Za-z0-9_\s]+?";
const EMAIL: &str = r"[A-Za-z0-9@._\-]+?";

/// Current-address lines never mention the other address blocks.
const OTHER_BLOCKS: Guard = Guard::LineExcludes(&["permanent", "temporary"]);

/// The permanent-address glyph label is a suffix of the temporary one.
const NOT_TEMPORARY_GLYPH: Guard = Guard::NotPrecededBy(&["c"]);

pub(super) fn register(catalog: &mut FieldCatalog) {
    register_current(catalog);
    register_permanent(catalog);
    register_temporary(catalog);
}

/// Rule pair for a current-address field: anchored on the block header, then any line
/// that does not belong to another block.
fn current(label: &str, value: &str, stops: &[&str], generic_stops: &[&str]) -> Vec<FieldRule> {
    vec![
        FieldRule::anchored(&format!(r"Current\s+Address[:\s]*.*?{label}"), value, stops),
        FieldRule::anchored(&format!(r"^.*?{label}"), value, generic_stops).guard(OTHER_BLOCKS),
    ]
}

fn register_current(catalog: &mut FieldCatalog) {
    let c = Category::CurrentAddress;

    catalog.insert(c, "country", current(r"Country[:\s]*", ALPHA, &["Province", "District"], &["Province", "District"]));
    catalog.insert(c, "province", current(r"Province[:\s]*", ALNUM, &["District", "Municipality"], &["District", "Municipality"]));
    catalog.insert(c, "district", vec![
        FieldRule::anchored(
            r"Current\s+Address(?s:.){0,100}?District[:\s]*",
            ALPHA,
            &["Municipality", "Ward", "Tole"],
        ),
        FieldRule::anchored(r"\bCurrent\s+District[:\s]*", ALPHA, &["Municipality", "Ward", "Tole"]),
    ]);
    catalog.insert(c, "municipality", current(r"Municipality[:\s]*", ALPHA, &["Ward", "Tole"], &["Ward", "Tole"]));
    catalog.insert(c, "ward_no", current(
        r"Ward No[.:]?\s*",
        r"\d+",
        &["Tole", "Telephone", "Mobile", "Email"],
        &["Tole", "Telephone", "Mobile", "Email"],
    ));
    catalog.insert(c, "tole", current(r"Tole[:\s]*", ALPHA, &["Telephone", "Mobile", "Email"], &["Telephone", "Mobile", "Email"]));
    catalog.insert(c, "telephone", current(r"Telephone No[.:]?\s*", r"\d+", &["Mobile", "Email", "Permanent"], &["Mobile", "Email"]));
    catalog.insert(c, "mobile", current(r"Mobile No[.:]?\s*", r"\d+", &["Email", "Permanent", "Temporary"], &["Email"]));
    catalog.insert(c, "email", current(r"Email ID[:\s]*", EMAIL, &["Mobile", "Permanent", "Temporary"], &[]));
}

fn register_permanent(catalog: &mut FieldCatalog) {
    let c = Category::PermanentAddress;

    catalog.insert(c, "country", vec![
        FieldRule::anchored(r"Permanent Address[:\s]*.*?Country[:\s]*", ALPHA, &["Province", "District"]),
        FieldRule::anchored(r"Permanent.*?Country[:\s]*", ALPHA, &["Province", "District"]),
        FieldRule::anchored(r":yfoL 7\]ufgf[:\s]*.*?b\]z[:\s]*", ALPHA, &[r"k\|b\]z", "lhNnf"])
            .guard(NOT_TEMPORARY_GLYPH),
        FieldRule::open(r"Permanent.*?Country[:\s]*", r"[A-Za-z\s]+"),
        FieldRule::bounded(
            r"(?:Country|b\]z)[:\s]*",
            ALPHA,
            &["Province", r"k\|b\]z", "District", "lhNnf"],
        )
        .fallback(),
    ]);

    catalog.insert(c, "province", vec![
        FieldRule::anchored(r"Permanent Address[:\s]*.*?Province[:\s]*", ALNUM, &["District", "Municipality"]),
        FieldRule::anchored(r"Permanent.*?Province[:\s]*", ALNUM, &["District", "Municipality"]),
        FieldRule::anchored(r":yfoL 7\]ufgf[:\s]*.*?k\|b\]z[:\s]*", ALNUM, &["lhNnf", "uf=kf="])
            .guard(NOT_TEMPORARY_GLYPH),
        FieldRule::open(r"Permanent.*?Province[:\s]*", r"[A-Za-z0-9_\s]+"),
        FieldRule::bounded(
            r"(?:Province|k\|b\]z)[:\s]*",
            ALNUM,
            &["District", "lhNnf", "Municipality", "uf=kf="],
        )
        .fallback(),
    ]);

    catalog.insert(c, "district", vec![
        FieldRule::anchored(r"Permanent Address[:\s]*.*?District[:\s]*", ALPHA, &["Municipality", "Ward", "Tole"]),
        FieldRule::anchored(r"Permanent.*?District[:\s]*", ALPHA, &["Municipality", "Ward", "Tole"]),
        FieldRule::anchored(r":yfoL 7\]ufgf[:\s]*.*?lhNnf[:\s]*", ALPHA, &["uf=kf=", "j8f", r"6f\]n"])
            .guard(NOT_TEMPORARY_GLYPH),
        FieldRule::open(r"Permanent.*?District[:\s]*", r"[A-Za-z\s]+"),
        FieldRule::bounded(
            r"(?:District|lhNnf)[:\s]*",
            ALPHA,
            &["Municipality", "uf=kf=", "Ward", "j8f", "Tole", r"6f\]n"],
        )
        .fallback(),
    ]);

    catalog.insert(c, "municipality", vec![
        FieldRule::anchored(
            r"Permanent Address[:\s]*.*?Municipality[:\s]*",
            ALPHA,
            &["Ward", "Tole", "Telephone"],
        ),
        FieldRule::anchored(r"Permanent.*?Municipality[:\s]*", ALPHA, &["Ward", "Tole", "Telephone"]),
        FieldRule::anchored(
            r":yfoL 7\]ufgf[:\s]*.*?uf=kf=[:\s]*",
            ALPHA,
            &["j8f", r"6f\]n", r"6\]lnkmf\]g"],
        )
        .guard(NOT_TEMPORARY_GLYPH),
        FieldRule::open(r"Permanent.*?Municipality[:\s]*", r"[A-Za-z\s]+"),
        FieldRule::bounded(
            r"(?:Municipality|uf=kf=)[:\s]*",
            ALPHA,
            &["Ward", "j8f", "Tole", r"6f\]n", "Telephone", r"6\]lnkmf\]g"],
        )
        .fallback(),
    ]);

    catalog.insert(c, "ward_no", vec![
        FieldRule::anchored(
            r"Permanent Address[:\s]*.*?Ward No[.:]?\s*",
            r"\d+",
            &["Tole", "Telephone", "Block"],
        ),
        FieldRule::anchored(r"Permanent.*?Ward No[.:]?\s*", r"\d+", &["Tole", "Telephone", "Block"]),
        FieldRule::open(r"Permanent Ward Number[:\s]*", r"\d+"),
        FieldRule::anchored(r":yfoL 7\]ufgf[:\s]*.*?j8f g\+=[:\s]*", r"\d+", &[r"6f\]n", r"6\]lnkmf\]g"])
            .guard(NOT_TEMPORARY_GLYPH),
        FieldRule::open(r"Permanent.*?Ward.*?", r"\d+"),
        FieldRule::open(r"Ward No[.:]?\s*", r"\d+").fallback(),
        FieldRule::open(r"Ward Number[:\s]*", r"\d+").fallback(),
        FieldRule::open(r"(?:Ward|j8f)[:\s]*(?:No[.:]?\s*|Number[:\s]*|g\+=[:\s]*)?", r"\d+").fallback(),
    ]);

    catalog.insert(c, "tole", vec![
        FieldRule::anchored(r"Permanent Address[:\s]*.*?Tole[:\s]*", ALPHA, &["Telephone", "Block"]),
        FieldRule::anchored(r"Permanent.*?Tole[:\s]*", ALPHA, &["Telephone", "Block"]),
        FieldRule::open(r"Permanent Address Tole[:\s]*", r"[A-Za-z \t]+"),
        FieldRule::anchored(r":yfoL 7\]ufgf[:\s]*.*?6f\]n[:\s]*", ALPHA, &[r"6\]lnkmf\]g"])
            .guard(NOT_TEMPORARY_GLYPH),
        FieldRule::open(r"Permanent.*?Tole[:\s]*", r"[A-Za-z \t]+"),
        FieldRule::bounded(r"Tole[:\s]*", ALPHA, &["Telephone"]).fallback(),
        FieldRule::anchored(r"(?:Tole|6f\]n)[:\s]*", ALPHA, &["Telephone", r"6\]lnkmf\]g", "Block"])
            .fallback(),
    ]);

    catalog.insert(c, "telephone", vec![
        FieldRule::open(r"Permanent Address[:\s]*.*?Telephone No[.:]?\s*", r"\d+"),
        FieldRule::open(r"Permanent Telephone Number[:\s]*", r"\d+"),
        FieldRule::open(r":yfoL 7\]ufgf[:\s]*.*?6\]lnkmf\]g g\+=[:\s]*", r"\d+").guard(NOT_TEMPORARY_GLYPH),
        FieldRule::open(r"Permanent.*?Telephone.*?", r"\d+"),
        FieldRule::open(r"Telephone No[.:]?\s*", r"\d+").fallback(),
        FieldRule::open(r"Telephone Number[:\s]*", r"\d+").fallback(),
        FieldRule::open(
            r"(?:Telephone|6\]lnkmf\]g)[:\s]*(?:No[.:]?\s*|Number[:\s]*|g\+=[:\s]*)?",
            r"\d+",
        )
        .fallback(),
    ]);

    catalog.insert(c, "block_no", vec![
        FieldRule::open(r"Permanent Address[:\s]*.*?Block No[.:]?\s*", r"\d+"),
        FieldRule::open(r"Permanent Block Number[:\s]*", r"\d+"),
        FieldRule::open(r":yfoL 7\]ufgf[:\s]*.*?An\]s g\+=[:\s]*", r"\d+").guard(NOT_TEMPORARY_GLYPH),
        FieldRule::open(r"Permanent.*?Block.*?", r"\d+"),
        FieldRule::open(r"Block No[.:]?\s*", r"\d+").fallback(),
        FieldRule::open(r"Block Number[:\s]*", r"\d+").fallback(),
        FieldRule::open(r"(?:Block|An\]s)[:\s]*(?:No[.:]?\s*|Number[:\s]*|g\+=[:\s]*)?", r"\d+").fallback(),
    ]);
}

/// Temporary address values run to the end of the label's text; the normalizer
/// truncates them at the next sub-field label.
fn register_temporary(catalog: &mut FieldCatalog) {
    let c = Category::TemporaryAddress;
    let english = r"Temporary Address[:\s]*.*?";
    let glyph = r"c:yfoL 7\]ufgf[:\s]*.*?";

    let pair = |english_label: &str, glyph_label: &str, value: &str| {
        vec![
            FieldRule::open(&format!("{english}{english_label}"), value),
            FieldRule::open(&format!("{glyph}{glyph_label}"), value),
        ]
    };

    catalog.insert(c, "country", pair(r"Country[:\s]*", r"b\]z[:\s]*", r"[A-Za-z\s]+"));
    catalog.insert(c, "province", pair(r"Province[:\s]*", r"k\|b\]z[:\s]*", r"[A-Za-z0-9_\s]+"));
    catalog.insert(c, "district", pair(r"District[:\s]*", r"lhNnf[:\s]*", r"[A-Za-z\s]+"));
    catalog.insert(c, "municipality", pair(r"Municipality[:\s]*", r"uf=kf=[:\s]*", r"[A-Za-z\s]+"));
    catalog.insert(c, "ward_no", pair(r"Ward No[.:]?\s*", r"j8f g\+=[:\s]*", r"\d+"));
    catalog.insert(c, "tole", vec![
        FieldRule::anchored(&format!(r"{english}Tole[:\s]*"), ALPHA, &["Telephone", "Mobile", "Email"]),
        FieldRule::anchored(&format!(r"{glyph}6f\]n[:\s]*"), ALPHA, &[r"6\]lnkmf\]g"]),
    ]);
    catalog.insert(c, "telephone", pair(r"Telephone No[.:]?\s*", r"6\]lnkmf\]g g\+=[:\s]*", r"\d+"));
    catalog.insert(c, "mobile", pair(r"Mobile No[.:]?\s*", r"df\]afOn g\+=[:\s]*", r"\d+"));
    catalog.insert(c, "email", pair(r"Email ID[:\s]*", r"O\{d\]n[:\s]*", r"[A-Za-z0-9@._\-]+"));
}
