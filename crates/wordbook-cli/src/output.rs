use std::io::{self, Write};

use wordbook_core::{Definition, Dictionary, Word};

const RULE_WIDTH: usize = 25;

pub fn dictionary(out: &mut impl Write, dict: &Dictionary) -> io::Result<()> {
    writeln!(out, "Language ..: {} ({})", dict.long(), dict.short())?;
    writeln!(out, "Language id: {}", dict.id())?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

pub fn dictionaries<'a>(
    out: &mut impl Write,
    dicts: impl IntoIterator<Item = &'a Dictionary>,
) -> io::Result<()> {
    for dict in dicts {
        dictionary(out, dict)?;
    }
    Ok(())
}

pub fn word(out: &mut impl Write, word: &Word) -> io::Result<()> {
    writeln!(out, "Word ...: {} (#{})", word.word, word.word_id)?;
    writeln!(out, "Language: {} (#{})", word.language, word.language_id)
}

/// Definitions indented by a tab, one line of text per line
pub fn definitions(out: &mut impl Write, definitions: &[Definition]) -> io::Result<()> {
    if definitions.is_empty() {
        return writeln!(out, "\tNo definitions found!");
    }

    for def in definitions {
        writeln!(
            out,
            "\tDictionary {} (#{}-{})",
            def.dictionary, def.src_language_id, def.dest_language_id
        )?;
        for line in def.definition.lines() {
            writeln!(out, "\t{}", line)?;
        }
    }
    Ok(())
}
