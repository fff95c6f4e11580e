//! Static canonical book table: protestant canon followed by the apocrypha.
//!
//! Used as a fallback when a document lacks explicit ids or names.

/// Number of books in the protestant canon.
pub const BIBLE_SIZE: usize = 66;

/// Number of books in the New Testament.
pub const NT_SIZE: usize = 27;

/// Number of books in the Old Testament.
pub const OT_SIZE: usize = 39;

/// `(id, name)` pairs in canonical order. Position + 1 is the book number.
const BOOKS: &[(&str, &str)] = &[
    ("GEN", "Genesis"),
    ("EXO", "Exodus"),
    ("LEV", "Leviticus"),
    ("NUM", "Numbers"),
    ("DEU", "Deuteronomy"),
    ("JOS", "Joshua"),
    ("JDG", "Judges"),
    ("RUT", "Ruth"),
    ("1SA", "1 Samuel"),
    ("2SA", "2 Samuel"),
    ("1KI", "1 Kings"),
    ("2KI", "2 Kings"),
    ("1CH", "1 Chronicles"),
    ("2CH", "2 Chronicles"),
    ("EZR", "Ezra"),
    ("NEH", "Nehemiah"),
    ("EST", "Esther"),
    ("JOB", "Job"),
    ("PSA", "Psalms"),
    ("PRO", "Proverbs"),
    ("ECC", "Ecclesiastes"),
    ("SNG", "Song of Solomon"),
    ("ISA", "Isaiah"),
    ("JER", "Jeremiah"),
    ("LAM", "Lamentations"),
    ("EZK", "Ezekiel"),
    ("DAN", "Daniel"),
    ("HOS", "Hosea"),
    ("JOL", "Joel"),
    ("AMO", "Amos"),
    ("OBA", "Obadiah"),
    ("JON", "Jonah"),
    ("MIC", "Micah"),
    ("NAM", "Nahum"),
    ("HAB", "Habakkuk"),
    ("ZEP", "Zephaniah"),
    ("HAG", "Haggai"),
    ("ZEC", "Zechariah"),
    ("MAL", "Malachi"),
    ("MAT", "Matthew"),
    ("MRK", "Mark"),
    ("LUK", "Luke"),
    ("JHN", "John"),
    ("ACT", "Acts"),
    ("ROM", "Romans"),
    ("1CO", "1 Corinthians"),
    ("2CO", "2 Corinthians"),
    ("GAL", "Galatians"),
    ("EPH", "Ephesians"),
    ("PHP", "Philippians"),
    ("COL", "Colossians"),
    ("1TH", "1 Thessalonians"),
    ("2TH", "2 Thessalonians"),
    ("1TI", "1 Timothy"),
    ("2TI", "2 Timothy"),
    ("TIT", "Titus"),
    ("PHM", "Philemon"),
    ("HEB", "Hebrews"),
    ("JAS", "James"),
    ("1PE", "1 Peter"),
    ("2PE", "2 Peter"),
    ("1JN", "1 John"),
    ("2JN", "2 John"),
    ("3JN", "3 John"),
    ("JUD", "Jude"),
    ("REV", "Revelation"),
    ("TOB", "Tobit"),
    ("JDT", "Judith"),
    ("ESG", "Esther (Greek)"),
    ("WIS", "Wisdom"),
    ("SIR", "Sirach"),
    ("BAR", "Baruch"),
    ("LJE", "Letter of Jeremiah"),
    ("1MA", "1 Maccabees"),
    ("2MA", "2 Maccabees"),
];

/// All canonical ids in order.
pub fn ids() -> impl Iterator<Item = &'static str> {
    return BOOKS.iter().map(|(id, _)| return *id);
}

/// Canonical id of a 1-based book number.
pub fn id_by_number(number: u32) -> Option<&'static str> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    return BOOKS.get(index).map(|(id, _)| return *id);
}

/// Canonical name for an id, or `None` for unknown ids.
pub fn name_by_id(id: &str) -> Option<&'static str> {
    return BOOKS
        .iter()
        .find(|(candidate, _)| return *candidate == id)
        .map(|(_, name)| return *name);
}

/// Canonical name of a 1-based book number.
pub fn name_by_number(number: u32) -> Option<&'static str> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    return BOOKS.get(index).map(|(_, name)| return *name);
}

/// All canonical names in order.
pub fn names() -> impl Iterator<Item = &'static str> {
    return BOOKS.iter().map(|(_, name)| return *name);
}

/// 1-based number of the book whose id or name equals `token` exactly.
pub fn number_of(token: &str) -> Option<u32> {
    let index = BOOKS
        .iter()
        .position(|(id, name)| return *id == token || *name == token)?;
    return u32::try_from(index).ok()?.checked_add(1);
}

/// Render a canonical id in title case: `"GEN"` -> `"Gen"`, `"1SA"` -> `"1sa"`.
pub fn title_case_id(id: &str) -> String {
    let mut chars = id.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let rest: String = chars.as_str().to_lowercase();
    return format!("{first}{rest}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_covers_both_testaments() {
        assert_eq!(OT_SIZE + NT_SIZE, BIBLE_SIZE);
        assert_eq!(name_by_number(1), Some("Genesis"));
        assert_eq!(name_by_number(66), Some("Revelation"));
        assert_eq!(id_by_number(40), Some("MAT"));
        assert!(ids().count() > BIBLE_SIZE);
    }

    #[test]
    fn lookups_by_id_and_name() {
        assert_eq!(name_by_id("JHN"), Some("John"));
        assert_eq!(number_of("JHN"), Some(43));
        assert_eq!(number_of("1 John"), Some(62));
        assert_eq!(number_of("Nonexistent"), None);
        assert_eq!(name_by_number(0), None);
    }

    #[test]
    fn title_cases_ids() {
        assert_eq!(title_case_id("GEN"), "Gen");
        assert_eq!(title_case_id(""), "");
    }
}
