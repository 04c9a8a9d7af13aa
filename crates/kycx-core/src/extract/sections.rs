//! Address section segmentation.
//!
//! Current and permanent address blocks use the same labels ("Country", "District",
//! ...), so address rules run against a view holding only the lines of their block.

use serde::Serialize;

const CURRENT_MARKER: &str = "current address";
const PERMANENT_MARKER: &str = "permanent address";

/// Keywords that end a current address block. The closing line is still part of it.
const CURRENT_END_KEYWORDS: &[&str] = &["permanent", "temporary", "family", "bank", "occupation"];

/// Keywords that end a permanent address block.
const PERMANENT_END_KEYWORDS: &[&str] = &["temporary", "family", "bank", "occupation"];

/// Which address block a line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    CurrentAddress,
    PermanentAddress,
    Neither,
}

/// A line of the document with its section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionedLine<'a> {
    pub section: Section,
    pub line: &'a str,
}

/// Classify every line of `text` into exactly one section.
pub fn classify_lines(text: &str) -> Vec<SectionedLine<'_>> {
    let mut lines = Vec::new();
    let mut open = Section::Neither;

    for line in text.split('\n') {
        let lower = line.trim().to_lowercase();

        if lower.contains(CURRENT_MARKER) && !lower.contains("permanent") {
            open = Section::CurrentAddress;
            lines.push(SectionedLine { section: open, line });
            continue;
        }

        if lower.contains(PERMANENT_MARKER) {
            open = Section::PermanentAddress;
            lines.push(SectionedLine { section: open, line });
            continue;
        }

        let section = open;
        lines.push(SectionedLine { section, line });

        let end_keywords = match open {
            Section::CurrentAddress => CURRENT_END_KEYWORDS,
            Section::PermanentAddress => PERMANENT_END_KEYWORDS,
            Section::Neither => continue,
        };
        if end_keywords.iter().any(|k| lower.contains(k)) {
            open = Section::Neither;
        }
    }

    lines
}

/// `text` without the lines of address blocks other than `keep`.
///
/// Lines outside every block stay, so a label printed before the first marker can
/// still be found.
pub fn without_other_blocks(text: &str, keep: Section) -> String {
    classify_lines(text)
        .into_iter()
        .filter(|l| l.section == Section::Neither || l.section == keep)
        .map(|l| l.line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Derived per-block views of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSections {
    /// Lines of the current address block, newline-joined.
    pub current: String,
    /// Lines of the permanent address block, newline-joined.
    pub permanent: String,
}

impl AddressSections {
    /// Split `text` into its address views.
    pub fn segment(text: &str) -> Self {
        let mut current = Vec::new();
        let mut permanent = Vec::new();

        for SectionedLine { section, line } in classify_lines(text) {
            match section {
                Section::CurrentAddress => current.push(line),
                Section::PermanentAddress => permanent.push(line),
                Section::Neither => {}
            }
        }

        Self {
            current: current.join("\n"),
            permanent: permanent.join("\n"),
        }
    }

    /// The view for a section. `Neither` has no view.
    pub fn view(&self, section: Section) -> Option<&str> {
        match section {
            Section::CurrentAddress => Some(&self.current),
            Section::PermanentAddress => Some(&self.permanent),
            Section::Neither => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FORM: &str = "Name: RAM\n\
        Current Address\n\
        Country: Nepal\n\
        District: Kathmandu\n\
        Permanent Address\n\
        Country: India\n\
        District: Darjeeling\n\
        Family Details\n\
        Father's Name: HARI";

    #[test]
    fn test_segment_separates_blocks() {
        let sections = AddressSections::segment(FORM);

        assert_eq!(sections.current, "Current Address\nCountry: Nepal\nDistrict: Kathmandu");
        assert_eq!(
            sections.permanent,
            "Permanent Address\nCountry: India\nDistrict: Darjeeling\nFamily Details"
        );
        assert!(!sections.current.contains("India"));
        assert!(!sections.permanent.contains("Nepal"));
    }

    #[test]
    fn test_end_keyword_line_is_kept_then_closes() {
        let text = "Current Address\nWard No: 4\nBank Details\nAccount: 123";
        let sections = AddressSections::segment(text);
        assert_eq!(sections.current, "Current Address\nWard No: 4\nBank Details");
    }

    #[test]
    fn test_current_marker_with_permanent_opens_permanent() {
        let text = "Current Address same as Permanent Address\nCountry: Nepal";
        let sections = AddressSections::segment(text);
        assert_eq!(sections.current, "");
        assert_eq!(sections.permanent, text);
    }

    #[test]
    fn test_classify_lines_outside_blocks() {
        let lines = classify_lines("Name: RAM\nCurrent Address\nTemporary Address\nTole: X");
        let sections: Vec<Section> = lines.iter().map(|l| l.section).collect();
        assert_eq!(
            sections,
            vec![
                Section::Neither,
                Section::CurrentAddress,
                Section::CurrentAddress,
                Section::Neither,
            ]
        );
    }

    #[test]
    fn test_without_other_blocks() {
        assert_eq!(
            without_other_blocks(FORM, Section::CurrentAddress),
            "Name: RAM\nCurrent Address\nCountry: Nepal\nDistrict: Kathmandu\nFather's Name: HARI"
        );
        assert!(!without_other_blocks(FORM, Section::PermanentAddress).contains("Nepal"));
        assert_eq!(without_other_blocks("Country: Nepal", Section::CurrentAddress), "Country: Nepal");
    }

    #[test]
    fn test_no_markers_yields_empty_views() {
        let sections = AddressSections::segment("Name: RAM\nGender: M");
        assert_eq!(sections, AddressSections::default());
        assert_eq!(sections.view(Section::Neither), None);
    }
}
