//! CSV parser for the vocabulary dataset.
//!
//! # Format
//! ```text
//! Bisaya,Tagalog,English,Part of Speech,Pronunciation,Category,Beginner Example (Bisaya),...
//! kaon,kain,eat,Verb,ka-on,Actions,Gusto ko mokaon.,I want to eat.,Gusto kong kumain.,...
//! ```
//!
//! Fields follow the usual CSV quoting rules: a field wrapped in double quotes
//! may contain commas, newlines and doubled quotes (`""`).

use crate::error::{ParseError, Result};
use crate::types::{ExampleSentence, VocabularyEntry};
use std::iter::Peekable;
use std::str::Chars;

/// Column headers, in file order.
pub const COLUMNS: [&str; 15] = [
    "Bisaya",
    "Tagalog",
    "English",
    "Part of Speech",
    "Pronunciation",
    "Category",
    "Beginner Example (Bisaya)",
    "Beginner English Translation",
    "Beginner Tagalog Translation",
    "Intermediate Example (Bisaya)",
    "Intermediate English Translation",
    "Intermediate Tagalog Translation",
    "Advanced Example (Bisaya)",
    "Advanced English Translation",
    "Advanced Tagalog Translation",
];

/// Parse dataset content into vocabulary entries.
///
/// Rows without a Bisaya word or an English gloss are skipped.
pub fn parse(content: &str) -> Result<Vec<VocabularyEntry>> {
    if content.trim().is_empty() {
        return Ok(vec![]);
    }

    let mut reader = RecordReader::new(content);
    let header = reader.next_record()?.ok_or(ParseError::MissingHeader)?;
    let first = header
        .fields
        .first()
        .map(|f| f.trim_start_matches('\u{feff}').trim())
        .unwrap_or_default();
    if first != COLUMNS[0] {
        return Err(ParseError::MissingHeader);
    }
    header.check_width()?;

    let mut entries = Vec::new();
    while let Some(record) = reader.next_record()? {
        if record.is_blank() {
            continue;
        }
        record.check_width()?;
        if let Some(entry) = record.into_entry() {
            entries.push(entry);
        }
    }

    Ok(entries)
}

struct Record {
    line: usize,
    fields: Vec<String>,
}

impl Record {
    fn is_blank(&self) -> bool {
        self.fields.iter().all(|f| f.trim().is_empty())
    }

    fn check_width(&self) -> Result<()> {
        if self.fields.len() != COLUMNS.len() {
            return Err(ParseError::ColumnCount {
                line: self.line,
                expected: COLUMNS.len(),
                found: self.fields.len(),
            });
        }
        Ok(())
    }

    fn into_entry(self) -> Option<VocabularyEntry> {
        let mut cells = self.fields.into_iter().map(|f| f.trim().to_string());
        let mut next = || cells.next().unwrap_or_default();

        let source_word = next();
        let tagalog = non_empty(next());
        let english = next();
        let part_of_speech = non_empty(next()).unwrap_or_else(|| "Unknown".to_string());
        let pronunciation = non_empty(next());
        let category = non_empty(next()).unwrap_or_else(|| "Uncategorized".to_string());

        let mut example = || ExampleSentence {
            bisaya: next(),
            english: next(),
            tagalog: non_empty(next()),
        };
        let examples = [example(), example(), example()];

        if source_word.is_empty() || english.is_empty() {
            return None;
        }

        Some(VocabularyEntry {
            source_word,
            english,
            tagalog,
            part_of_speech,
            category,
            pronunciation,
            examples,
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldState {
    Start,
    Unquoted,
    Quoted,
    AfterQuote,
}

struct RecordReader<'a> {
    chars: Peekable<Chars<'a>>,
    line: usize,
}

impl<'a> RecordReader<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
            line: 1,
        }
    }

    fn next_record(&mut self) -> Result<Option<Record>> {
        if self.chars.peek().is_none() {
            return Ok(None);
        }

        let start_line = self.line;
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut state = FieldState::Start;

        loop {
            let Some(c) = self.chars.next() else {
                if state == FieldState::Quoted {
                    return Err(ParseError::UnterminatedQuote { line: start_line });
                }
                fields.push(field);
                break;
            };

            match (state, c) {
                (FieldState::Quoted, '"') => {
                    if self.chars.peek() == Some(&'"') {
                        self.chars.next();
                        field.push('"');
                    } else {
                        state = FieldState::AfterQuote;
                    }
                }
                (FieldState::Quoted, c) => {
                    if c == '\n' {
                        self.line += 1;
                    }
                    field.push(c);
                }
                (_, ',') => {
                    fields.push(std::mem::take(&mut field));
                    state = FieldState::Start;
                }
                (_, '\r') => {}
                (_, '\n') => {
                    self.line += 1;
                    fields.push(field);
                    break;
                }
                (FieldState::Start, '"') => state = FieldState::Quoted,
                (FieldState::AfterQuote, _) => {
                    return Err(ParseError::StrayQuote { line: self.line });
                }
                (_, c) => {
                    field.push(c);
                    state = FieldState::Unquoted;
                }
            }
        }

        Ok(Some(Record {
            line: start_line,
            fields,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Tier;

    fn header() -> String {
        COLUMNS.join(",")
    }

    #[test]
    fn parse_single_entry() {
        let input = format!(
            "{}\nkaon,kain,eat,Verb,ka-on,Actions,Gusto ko mokaon.,I want to eat.,Gusto kong kumain.,Nakaon na ba ka?,Have you eaten already?,Kumain ka na ba?,Gikaon nako ang tinapay ganina.,I ate the bread earlier.,Kumain ako ng tinapay kanina.",
            header()
        );
        let entries = parse(&input).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.source_word, "kaon");
        assert_eq!(entry.tagalog.as_deref(), Some("kain"));
        assert_eq!(entry.part_of_speech, "Verb");
        assert_eq!(entry.example(Tier::Beginner).bisaya, "Gusto ko mokaon.");
        assert_eq!(
            entry.example(Tier::Advanced).english,
            "I ate the bread earlier."
        );
    }

    #[test]
    fn parse_quoted_fields() {
        let input = format!(
            "{}\r\npalihug,pakiusap,please,Expression,,Greetings,Palihug.,Please.,Pakiusap.,\"Palihug, tabangi ko.\",\"Please, help me.\",\"Pakiusap, tulungan mo ako.\",\"Ingon siya, \"\"palihug\"\".\",\"He said, \"\"please\"\".\",\r\n",
            header()
        );
        let entries = parse(&input).unwrap();
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.pronunciation, None);
        assert_eq!(
            entry.example(Tier::Intermediate).bisaya,
            "Palihug, tabangi ko."
        );
        assert_eq!(
            entry.example(Tier::Advanced).bisaya,
            "Ingon siya, \"palihug\"."
        );
        assert_eq!(entry.example(Tier::Advanced).tagalog, None);
    }

    #[test]
    fn skip_rows_without_word_or_gloss() {
        let input = format!(
            "{}\n,x,eat,Verb,,,a,b,c,d,e,f,g,h,i\nbalay,,,Noun,,,a,b,c,d,e,f,g,h,i\n",
            header()
        );
        let entries = parse(&input).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn defaults_for_missing_metadata() {
        let input = format!("{}\nbalay,bahay,house,,,,a,b,c,d,e,f,g,h,i", header());
        let entries = parse(&input).unwrap();
        assert_eq!(entries[0].part_of_speech, "Unknown");
        assert_eq!(entries[0].category, "Uncategorized");
    }

    #[test]
    fn skip_blank_lines() {
        let input = format!("{}\n\nbalay,bahay,house,Noun,,Home,a,b,c,d,e,f,g,h,i\n\n", header());
        let entries = parse(&input).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn reject_wrong_column_count() {
        let input = format!("{}\nbalay,bahay,house", header());
        let result = parse(&input);
        assert!(matches!(
            result,
            Err(ParseError::ColumnCount {
                line: 2,
                expected: 15,
                found: 3
            })
        ));
    }

    #[test]
    fn reject_missing_header() {
        let result = parse("balay,bahay,house");
        assert!(matches!(result, Err(ParseError::MissingHeader)));
    }

    #[test]
    fn reject_unterminated_quote() {
        let input = format!("{}\nbalay,\"bahay", header());
        let result = parse(&input);
        assert!(matches!(result, Err(ParseError::UnterminatedQuote { line: 2 })));
    }

    #[test]
    fn multiline_field_advances_line_count() {
        let input = format!(
            "{}\nbalay,bahay,house,Noun,,Home,\"Naa koy\nbalay.\",b,c,d,e,f,g,h,i\nbalay,bahay\n",
            header()
        );
        let result = parse(&input);
        assert!(matches!(result, Err(ParseError::ColumnCount { line: 4, .. })));
    }

    #[test]
    fn parse_empty_content() {
        let entries = parse("").unwrap();
        assert!(entries.is_empty());
    }
}
