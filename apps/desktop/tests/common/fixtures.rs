//! Test fixtures and factory functions for creating test data.

/// Dataset header row.
pub const HEADER: &str = "Bisaya,Tagalog,English,Part of Speech,Pronunciation,Category,\
Beginner Example (Bisaya),Beginner English Translation,Beginner Tagalog Translation,\
Intermediate Example (Bisaya),Intermediate English Translation,Intermediate Tagalog Translation,\
Advanced Example (Bisaya),Advanced English Translation,Advanced Tagalog Translation";

/// Verbs whose example sentences use the `mo`/`nag`/`gi` forms.
pub const VERBS: [(&str, &str); 5] = [
    ("kaon", "eat"),
    ("inom", "drink"),
    ("basa", "read"),
    ("sulat", "write"),
    ("lakaw", "walk"),
];

/// One CSV row for a verb. Sentences contain commas, so they are quoted.
pub fn verb_row(word: &str, english: &str) -> String {
    format!(
        "{word},,{english},Verb,,Actions,\
\"Gusto ko mo{word}, higala.\",\"I want to {english}, friend.\",,\
\"Nag{word} siya sa balay.\",\"She is going to {english} at home.\",,\
\"Gi{word} na nila ang tanan, \"\"ingon niya\"\".\",\"They did it all, \"\"she said\"\".\","
    )
}

/// A dataset CSV with every verb in [`VERBS`].
pub fn sample_csv() -> String {
    let mut csv = String::from(HEADER);
    csv.push('\n');
    for (word, english) in VERBS {
        csv.push_str(&verb_row(word, english));
        csv.push('\n');
    }
    csv
}
